#![forbid(unsafe_code)]
#![recursion_limit="256"]

extern crate clap;
extern crate futures;
extern crate irc;
extern crate lookupbot;
extern crate pretty_env_logger;
extern crate tokio;

#[macro_use] extern crate log;

use std::collections::HashMap;
use std::sync::Arc;

use futures::{
    prelude::*,
    future::{Fuse, FutureExt},
    stream::FuturesUnordered,
    select,
};
use irc::client::prelude::*;

use lookupbot::{
    modules,
    util,
    BotCommand,
    BotCommandFutureResult,
    BotConfig,
    BotListener,
    BotParameters,
    BotResponse,
};

fn handle_response(client: &Client, response: BotResponse) -> irc::error::Result<()> {
    match response {
        BotResponse::Ignore =>
            Ok(()),
        BotResponse::Privmsg(target, message) =>
            client.send_privmsg(target, message),
        BotResponse::Many(responses) =>
            responses
                .into_iter()
                .try_for_each(|response| handle_response(client, response)),
    }
}

#[tokio::main]
async fn main() -> Result<(), failure::Error> {
    let args = clap::App::new("lookupbot")
        .arg(
            clap::Arg::with_name("config-file")
                .long("config-file")
                .default_value("config.toml"),
        )
        .get_matches();

    pretty_env_logger::init();

    let config = Config::load(args.value_of("config-file").unwrap_or("config.toml"))?;
    let bot_config = BotConfig::from_options(&config.options);
    let leader = bot_config.leader.clone();
    let hostmasks = Arc::new(util::Hostmasks::default());

    let mut commands: HashMap<&'static str, Box<dyn BotCommand>> = HashMap::new();
    for factory in modules::ALL {
        for command in factory(&bot_config) {
            debug!("registering command {}", command.trigger());
            commands.insert(command.trigger(), command);
        }
    }
    let listeners: Vec<Box<dyn BotListener>> = modules::LISTENERS
        .iter()
        .flat_map(|factory| factory(&bot_config))
        .collect();

    let mut client = Client::from_config(config).await?;
    client.identify()?;

    let mut stream = client.stream()?;
    let mut shutdown = Box::pin(tokio::signal::ctrl_c()).fuse();

    let mut futures: FuturesUnordered<Fuse<BotCommandFutureResult>> = FuturesUnordered::new();

    loop {
        select! {
            maybe_message = stream.next() => {
                let message = match maybe_message.transpose()? {
                    Some(message) => message,
                    None => break,
                };
                if let Some(ref prefix) = message.prefix {
                    hostmasks.record(prefix);
                }

                let (leader_required, text) = match message.command {
                    Command::PRIVMSG(ref target, ref text) => (util::is_public(target), text.clone()),
                    _ => continue,
                };

                let tokens: Vec<String> = if leader_required && !text.starts_with(&leader) {
                    Vec::new()
                } else {
                    match leader_required {
                        true => text.trim_start_matches(&leader),
                        false => text.as_str(),
                    }.split_whitespace().map(String::from).collect()
                };

                let handler = tokens
                    .split_first()
                    .and_then(|(cmd, args)| commands.get(cmd.to_lowercase().as_str()).map(|handler| (handler, args)));

                match handler {
                    Some((handler, args)) =>
                        futures.push(handler.handle(BotParameters {
                            message,
                            leader: if leader_required { leader.to_string() } else { "".to_string() },
                            args: args.to_vec(),
                            hostmasks: hostmasks.clone(),
                        }).fuse()),
                    None =>
                        for listener in &listeners {
                            futures.push(listener.hear(BotParameters {
                                message: message.clone(),
                                leader: "".to_string(),
                                args: text.split_whitespace().map(String::from).collect(),
                                hostmasks: hostmasks.clone(),
                            }).fuse());
                        },
                }
            },
            result = futures.select_next_some() => {
                match result {
                    Err(e) => warn!("error running command: {}", e),
                    Ok(response) =>
                        match handle_response(&client, response) {
                            Ok(()) => (),
                            Err(e) => warn!("error handling response: {:?}", e),
                        },
                };
            },
            interrupted = shutdown => {
                if let Err(e) = interrupted {
                    error!("failed to listen for interrupts: {}", e);
                }
                info!("shutting down");
                client.send_quit("")?;
                break;
            },
            complete => break,
        }
    }

    for command in commands.values() {
        if let Err(e) = command.flush() {
            error!("failed to save state of {}: {}", command.trigger(), e);
        }
    }

    Ok(())
}
