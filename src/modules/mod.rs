//! Modules for the fully async IRC bot

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub use self::dictionary::mk as dictionary;
pub use self::iso::mk as iso;
pub use self::titler::mk as titler;
pub use self::titler::mk_listeners as titler_listeners;
pub use self::weather::mk as weather;

use crate::{BotCommand, BotConfig, BotListener};

/// A module that looks up English word definitions on dictionaryapi.dev
pub mod dictionary;

/// A module that translates between ISO 3166 country codes and country names
pub mod iso;

/// A module that shows the title of web pages and details of other files behind URLs
pub mod titler;

/// A module that shows weather conditions and forecasts, and remembers the users' locations
pub mod weather;

/// A slice of functions that will create vectors of all implemented modules
pub const ALL: &[fn(&BotConfig) -> Vec<Box<dyn BotCommand>>] = &[dictionary, iso, titler, weather];

/// A slice of functions that will create vectors of all implemented passive listeners
pub const LISTENERS: &[fn(&BotConfig) -> Vec<Box<dyn BotListener>>] = &[titler_listeners];
