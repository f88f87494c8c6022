//! `dictwire` - command-line DICT client.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod render;

use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use dictwire::{Client, Config, Endpoint};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, CliCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the response
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dictwire=info,dictwire_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let output = run(&cli).await?;
    print!("{output}");
    Ok(())
}

async fn run(cli: &Cli) -> anyhow::Result<String> {
    let endpoint = Endpoint::parse(&cli.server)
        .with_context(|| format!("invalid server address {:?}", cli.server))?;
    let config = Config::builder(endpoint)
        .connect_timeout(Duration::from_secs(cli.timeout))
        .build();

    let mut client = Client::new(config);
    let greeting = client
        .connect()
        .await
        .with_context(|| format!("failed to connect to {}", client.endpoint()))?;
    info!(server = %greeting.message, "Connected");

    let reply = client.client(&cli.client_name).await?;
    if !reply.ok {
        debug!(code = %reply.code, "Server ignored CLIENT");
    }

    if cli.mime {
        if !client.has_capability("mime") {
            warn!("Server does not advertise MIME support");
        }
        let reply = client.mime().await?;
        if !reply.ok {
            bail!("OPTION MIME refused: {} {}", reply.code, reply.message);
        }
    }

    if cli.user.is_some() || client.endpoint().username().is_some() {
        let reply = client
            .auth(cli.user.as_deref(), cli.password.as_deref())
            .await?;
        if !reply.ok {
            bail!("authentication failed: {} {}", reply.code, reply.message);
        }
    }

    let output = match &cli.command {
        CliCommand::Define { word, database } => {
            render::define(&client.define(database, word).await?)
        }
        CliCommand::Match {
            word,
            database,
            strategy,
        } => render::matches(&client.r#match(database, strategy, word).await?),
        CliCommand::Databases => render::databases(&client.show_databases().await?),
        CliCommand::Strategies => render::strategies(&client.show_strategies().await?),
        CliCommand::Info { database } => render::info(&client.show_info(database).await?),
        CliCommand::Server => render::info(&client.show_server().await?),
        CliCommand::Help => render::help(&client.help().await?),
        CliCommand::Status => render::reply(&client.status().await?),
    };

    if let Err(e) = client.quit().await {
        debug!(error = %e, "QUIT failed");
    }
    Ok(output)
}
