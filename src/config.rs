//! Settings for the lookup commands, read from the `[options]` table of the irc crate's TOML
//! configuration file.

#![deny(unsafe_code)]
#![deny(missing_docs)]

use std::collections::HashMap;
use std::path::PathBuf;

use crate::util::{is_public, matches_any};

/// The leader used when none is configured.
pub const DEFAULT_LEADER: &str = "&";

/**
 * Bot-wide settings. Everything not covered by a dedicated field stays available through
 * `option()`, e.g. API keys and per-plugin channel lists.
 */
#[derive(Debug, Clone, Default)]
pub struct BotConfig {
    /// The character (or string) that prefixes commands in a channel.
    pub leader: String,

    /// The directory persistent state such as the weather location database is kept in.
    pub data_dir: PathBuf,

    options: HashMap<String, String>,
}

impl BotConfig {
    /**
     * Build the configuration from the irc crate's `options` map.
     */
    pub fn from_options(options: &HashMap<String, String>) -> BotConfig {
        BotConfig {
            leader: options.get("leader").map_or(DEFAULT_LEADER, String::as_str).to_owned(),
            data_dir: PathBuf::from(options.get("data_dir").map_or(".", String::as_str)),
            options: options.clone(),
        }
    }

    /**
     * Return the value of the given option, unless it is missing or blank.
     */
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /**
     * Return the API key stored under the given option.
     */
    pub fn api_key(&self, key: &str) -> Option<String> {
        self.option(key).map(str::to_string)
    }

    /**
     * Decide whether `plugin` may answer in `target`. Queries are always allowed. For channels the
     * `<plugin>.channels` option lists `;`-separated glob patterns of enabled channels; when it is
     * not set, `default` applies.
     */
    pub fn is_enabled(&self, plugin: &str, target: &str, default: bool) -> bool {
        if !is_public(target) {
            return true;
        }
        match self.option(&format!("{}.channels", plugin)) {
            None =>
                default,
            Some(patterns) => {
                let patterns: Vec<&str> = patterns.split(';').map(str::trim).collect();
                matches_any(&patterns, &target.to_lowercase())
            },
        }
    }
}
