//! Module that provides English word definitions, downloaded from dictionaryapi.dev

#![deny(unsafe_code)]
#![deny(missing_docs)]

extern crate async_trait;

use serde::Deserialize;

use crate::{
    BotCommand,
    BotCommandResult,
    BotConfig,
    BotParameters,
    BotResponse,
    LookupError,
    http,
};

static DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
const PROVIDER: &str = "Free Dictionary API";
const NO_DEFINITIONS: &str = "No definitions found for the given word.";

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(rename = "partOfSpeech")]
    part_of_speech: Option<String>,
    #[serde(default)]
    definitions: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    definition: String,
}

struct DictCommand {
    config: BotConfig,
    client: reqwest::Client,
    base_url: String,
}

/**
 * Factory function that will create instances of all implemented commands in this module.
 */
pub fn mk(config: &BotConfig) -> Vec<Box<dyn BotCommand>> {
    vec![Box::new(DictCommand::new(config, DICTIONARY_API_URL))]
}

impl DictCommand {
    fn new(config: &BotConfig, base_url: &str) -> DictCommand {
        DictCommand {
            config: config.clone(),
            client: http::REQWEST.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn define(&self, word: &str) -> Result<String, LookupError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|err| LookupError::Configuration(format!("Invalid dictionary URL: {}", err)))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Configuration("Invalid dictionary URL".to_string()))?
            .push(word);

        let body = http::get_text(&self.client, &url, PROVIDER).await
            .map_err(|err| match err {
                LookupError::NotFound(_) => LookupError::NotFound(NO_DEFINITIONS.to_string()),
                err => err,
            })?;

        // unknown words come back as an object with a "title" instead of a list of entries
        let value: serde_json::Value = http::decode(&body, PROVIDER)?;
        if !value.is_array() {
            return Err(LookupError::NotFound(NO_DEFINITIONS.to_string()));
        }
        let entries: Vec<Entry> = serde_json::from_value(value)
            .map_err(|err| LookupError::upstream(PROVIDER, format!("unexpected response format: {}", err)))?;

        let meaning = entries
            .into_iter()
            .next()
            .and_then(|entry| entry.meanings.into_iter().next())
            .ok_or_else(|| LookupError::upstream(PROVIDER, "unexpected response format: no meanings"))?;
        let definition = meaning.definitions
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::upstream(PROVIDER, "unexpected response format: no definitions"))?;

        Ok(format!("{} ({}): {}",
            word,
            meaning.part_of_speech.as_deref().unwrap_or("unknown"),
            definition.definition))
    }
}

#[async_trait::async_trait]
impl BotCommand for DictCommand {
    fn trigger(&self) -> &'static str {
        "dict"
    }

    async fn handle(&self, params: BotParameters) -> BotCommandResult {
        let response_target = params.response_target()?;
        if !self.config.is_enabled("dictionary", &response_target, true) {
            return Ok(BotResponse::Ignore);
        }

        if !params.args.is_empty() {
            let word = params.args.join(" ").to_lowercase();
            Ok(BotResponse::Privmsg(
                response_target,
                match self.define(&word).await {
                    Ok(definition) =>
                        definition,
                    Err(err) => {
                        debug!("dict {}: {:?}", word, err);
                        format!("Error: {}", err)
                    },
                }))
        } else {
            Ok(BotResponse::Privmsg(
                response_target,
                format!("Usage: {}dict <word>", params.leader)))
        }
    }
}
