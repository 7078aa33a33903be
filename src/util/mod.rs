//! Utility functions to help write IRC bot commands.

#![deny(unsafe_code)]
#![deny(missing_docs)]

extern crate irc;

use std::collections::HashMap;

use irc::client::prelude::ChannelExt;
use irc::client::prelude::Prefix;
use parking_lot::RwLock;

/// mIRC colour and formatting codes.
pub mod format;

/**
 * Return true iff the given haystack matches one of the glob patterns. Patterns that fail to
 * compile are logged and skipped, empty patterns never match.
 */
pub fn matches_any(patterns: &[&str], haystack: &str) -> bool {
    let compile_and_test = |pattern: &str| {
        match glob::Pattern::new(pattern) {
            Err(err) => {
                warn!("Failed to compile pattern '{}': {}", pattern, err);
                false
            },
            Ok(matcher) =>
                matcher.matches(haystack),
        }
    };

    patterns
        .iter()
        .filter(|pattern| !pattern.is_empty())
        .any(|pattern| compile_and_test(&pattern.to_lowercase()))
}

/**
 * Return true iff the given target string represents an IRC channel. Returns false otherwise, e.g.
 * then the given target is a nickname.
 */
pub fn is_public(target: &str) -> bool {
    target.is_channel_name()
}

/**
 * The stable identity of a user: the user@host part of their prefix. Server prefixes and
 * prefixes without a username or hostname have no identity.
 */
pub fn identity(prefix: &Prefix) -> Option<String> {
    match prefix {
        Prefix::ServerName(_) =>
            None,
        Prefix::Nickname(_, user, host) =>
            if user.is_empty() || host.is_empty() {
                None
            } else {
                Some(format!("{}@{}", user, host))
            },
    }
}

/**
 * Remembers the identity of every nickname the bot has seen speaking or joining, so commands can
 * act on behalf of another user.
 */
#[derive(Debug, Default)]
pub struct Hostmasks {
    seen: RwLock<HashMap<String, String>>,
}

impl Hostmasks {
    /**
     * Record the identity for the nickname in the given prefix.
     */
    pub fn record(&self, prefix: &Prefix) {
        if let Prefix::Nickname(nick, _, _) = prefix {
            if let Some(identity) = identity(prefix) {
                self.seen.write().insert(nick.to_lowercase(), identity);
            }
        }
    }

    /**
     * Look up the last identity seen for the given nickname.
     */
    pub fn lookup(&self, nick: &str) -> Option<String> {
        self.seen.read().get(&nick.to_lowercase()).cloned()
    }
}
