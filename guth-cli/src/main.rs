//! Issue and open guth tokens from the command line.
//!
//! ```text
//! guth-cli encrypt <content>   encrypted token carrying <content> and the current time
//! guth-cli decrypt <token>     print the content and creation time of an encrypted token
//! guth-cli wrap <content>      signed token carrying <content> until it expires
//! guth-cli unwrap <token>      print the content of a valid signed token
//! ```
#![forbid(unsafe_code)]

mod config;

use guth_aes::G1;
use guth_core::GuthError;
use guth_json::Payload;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::CliConfig;

const USAGE: &str = "usage: guth-cli <encrypt|decrypt|wrap|unwrap> <argument>";

enum Command {
    Encrypt(String),
    Decrypt(String),
    Wrap(String),
    Unwrap(String),
}

impl Command {
    fn parse(mut args: impl Iterator<Item = String>) -> Option<Self> {
        let command = args.next()?;
        let argument = args.next()?;
        if args.next().is_some() {
            return None;
        }

        match &*command {
            "encrypt" => Some(Self::Encrypt(argument)),
            "decrypt" => Some(Self::Decrypt(argument)),
            "wrap" => Some(Self::Wrap(argument)),
            "unwrap" => Some(Self::Unwrap(argument)),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Encrypt(_) => "encrypt",
            Self::Decrypt(_) => "decrypt",
            Self::Wrap(_) => "wrap",
            Self::Unwrap(_) => "unwrap",
        }
    }

    fn run(self, config: &guth_core::Config) -> Result<(), GuthError> {
        match self {
            Self::Encrypt(content) => {
                let token = config
                    .encrypted::<G1, Payload>()
                    .encrypt(&Payload::now(content))?;
                println!("{token}");
                println!("length: {}", token.as_bytes().len());
            }
            Self::Decrypt(token) => {
                let payload = config
                    .encrypted::<G1, Payload>()
                    .decrypt(token.trim().parse()?)?;
                println!("content: {}", payload.content);
                println!("created: {}", payload.created);
            }
            Self::Wrap(content) => {
                let token = config.signed::<G1>().wrap(content)?;
                println!("{token}");
            }
            Self::Unwrap(token) => {
                let content = config.signed::<G1>().unwrap(token.trim())?;
                println!("{}", String::from_utf8_lossy(&content));
            }
        }
        Ok(())
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guth_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = Command::parse(std::env::args().skip(1)) else {
        tracing::error!("{USAGE}");
        std::process::exit(1);
    };

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::debug!(
        "Loaded configuration: token_lifetime={:?}, framing={:?}",
        config.token_lifetime,
        config.framing
    );

    let name = command.name();
    if let Err(e) = command.run(&config.token_config()) {
        tracing::error!("{name} failed: {e}");
        std::process::exit(1);
    }
}
