//! A fully async library of lookup commands for IRC bots using the irc crate (>= 0.15)

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![recursion_limit="256"]

extern crate async_trait;
extern crate futures;
extern crate irc;

#[macro_use] extern crate log;
#[macro_use] extern crate lazy_static;

use std::result::Result;
use std::sync::Arc;

use futures::future;

/// Bot-specific settings read from the `[options]` table of the irc configuration.
pub mod config;

/// The error taxonomy shared by all lookup commands.
pub mod error;

/// Shared HTTP client and request helpers.
pub mod http;

/// Various modules that provide commands for the IRC bot.
pub mod modules;

/// Utility functions to help write IRC bot commands.
pub mod util;

pub use crate::config::BotConfig;
pub use crate::error::LookupError;

/// An error type for the IRC bot; these abort a command without a reply.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /** This message could have been processed, but there is no response target to send the
        response to, so it has been ignored. */
    #[error("Ignoring message since no response target is set")]
    NoResponseTarget,

    /** The message did not carry a full nick!user@host prefix to derive an identity from. */
    #[error("Message has no user@host prefix to identify the sender")]
    NoIdentity,
}

/**
 * Various actions the bot can trigger in response to a command. Each enum specifies one response.
 */
#[derive(Debug, PartialEq)]
pub enum BotResponse {
    /**
     * Do nothing and just ignore the command.
     */
    Ignore,

    /**
     * Send a privmsg. This is probably what you will use most of the time. The first parameter is
     * the target of the privmsg (e.g. a channel name or a nickname), the second argument is the
     * text to send.
     */
    Privmsg(String, String),

    /**
     * Send several responses in order, e.g. a title line followed by a description line.
     */
    Many(Vec<BotResponse>),
}

/**
 * Parameters passed to a module that implements a command whenever it is being invoked.
 */
#[derive(Debug)]
pub struct BotParameters {
    /**
     * The received IRC message that triggered the module
     */
    pub message: irc::proto::message::Message,

    /**
     * The leader character that was used in this context to trigger the bot. Usually a single
     * character when the message was written in a channel, and an empty string when it was written
     * in a query.
     */
    pub leader: String,

    /**
     * A list of arguments given to the command, split at whitespaces.
     */
    pub args: Vec<String>,

    /**
     * The user@host identities of nicknames the bot has seen so far, used to act on behalf of
     * another user (e.g. `weather --user <nick>`).
     */
    pub hostmasks: Arc<util::Hostmasks>,
}

impl BotParameters {
    /**
     * The channel or nickname a reply to this message should be sent to.
     */
    pub fn response_target(&self) -> Result<String, BotError> {
        self.message
            .response_target()
            .map(str::to_string)
            .ok_or(BotError::NoResponseTarget)
    }

    /**
     * The stable identity (user@host) of the sender of this message.
     */
    pub fn identity(&self) -> Result<String, BotError> {
        self.message
            .prefix
            .as_ref()
            .and_then(util::identity)
            .ok_or(BotError::NoIdentity)
    }
}

/**
 * The result of a bot command; either a BotResponse, or a BotError.
 */
pub type BotCommandResult = Result<BotResponse, BotError>;

/**
 * A bot result as it would be returned by an async function, only boxed so it can be used without
 * knowing the size of the result.
 */
pub type BotCommandFutureResult<'a> = future::BoxFuture<'a, BotCommandResult>;

/**
 * A trait implementing a command.
 */
#[async_trait::async_trait]
pub trait BotCommand: Send + Sync {
    /**
     * The trigger string for this bot command, must be a single-word string.
     */
    fn trigger(&self) -> &'static str;

    /**
     * Handler for this bot command, will be invoked when the trigger word has been seen.
     */
    async fn handle(&self, params: BotParameters) -> BotCommandResult;

    /**
     * Write any state this command keeps to durable storage. Called before the bot exits.
     */
    fn flush(&self) -> std::io::Result<()> {
        Ok(())
    }
}

/**
 * A trait implementing a passive listener that sees every channel message, not only those that
 * start with a trigger word.
 */
#[async_trait::async_trait]
pub trait BotListener: Send + Sync {
    /**
     * A short name for this listener, used in log messages and channel configuration.
     */
    fn name(&self) -> &'static str;

    /**
     * Handler invoked for every PRIVMSG the bot receives. `params.args` holds the full message
     * text split at whitespaces.
     */
    async fn hear(&self, params: BotParameters) -> BotCommandResult;
}
