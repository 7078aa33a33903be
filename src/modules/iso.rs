//! Module that converts between ISO 3166-1 country codes and country names

#![deny(unsafe_code)]
#![deny(missing_docs)]

extern crate async_trait;

use std::collections::HashMap;

use crate::{
    BotCommand,
    BotCommandResult,
    BotConfig,
    BotParameters,
    BotResponse,
    LookupError,
};

static ISO3166_TABLE: &str = include_str!("../../data/iso3166.tsv");

#[derive(Debug, Clone, PartialEq)]
struct Country {
    alpha2: &'static str,
    alpha3: &'static str,
    numeric: &'static str,
    name: &'static str,
}

lazy_static! {
    static ref COUNTRIES: Vec<Country> = ISO3166_TABLE
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| {
            let mut fields = line.split('\t');
            Some(Country {
                alpha2: fields.next()?,
                alpha3: fields.next()?,
                numeric: fields.next()?,
                name: fields.next()?,
            })
        })
        .collect();

    // every code and name, lower-cased, pointing into COUNTRIES
    static ref INDEX: HashMap<String, usize> = {
        let mut index = HashMap::new();
        for (position, country) in COUNTRIES.iter().enumerate() {
            for key in &[country.alpha2, country.alpha3, country.numeric, country.name] {
                index.insert(key.to_lowercase(), position);
            }
        }
        index
    };
}

fn lookup(query: &str) -> Result<&'static Country, LookupError> {
    let key = query.trim().to_lowercase();
    INDEX
        .get(&key)
        .map(|&position| &COUNTRIES[position])
        .ok_or_else(|| LookupError::NotFound(format!("'{}' unknown country code.", key)))
}

struct CountryCommand {
    config: BotConfig,
}

/**
 * Factory function that will create instances of all implemented commands in this module.
 */
pub fn mk(config: &BotConfig) -> Vec<Box<dyn BotCommand>> {
    vec![Box::new(CountryCommand { config: config.clone() })]
}

#[async_trait::async_trait]
impl BotCommand for CountryCommand {
    fn trigger(&self) -> &'static str {
        "country"
    }

    async fn handle(&self, params: BotParameters) -> BotCommandResult {
        let response_target = params.response_target()?;
        if !self.config.is_enabled("iso", &response_target, true) {
            return Ok(BotResponse::Ignore);
        }

        if params.args.is_empty() {
            return Ok(BotResponse::Privmsg(
                response_target,
                format!("Usage: {}country <code|name>", params.leader)));
        }

        let reply = match lookup(&params.args.join(" ")) {
            Ok(country) => format!("{} {}", country.alpha2, country.name),
            Err(err) => format!("Error: {}", err),
        };
        Ok(BotResponse::Privmsg(response_target, reply))
    }
}
