// RS Lang client - interactive word cards and annotations
// Entry point and application setup

use anyhow::Context;
use clap::Parser;
use rslang_client::app::{self, SetupOptions};
use rslang_client::commands::{self, Command, HELP};
use rslang_client::models::Credentials;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "rslang-client",
    about = "Browse RS Lang words and manage your annotations",
    version
)]
struct Cli {
    /// Directory holding settings.json
    #[arg(long, default_value = ".rslang")]
    settings_dir: PathBuf,

    /// API endpoint, overrides the settings file
    #[arg(long)]
    endpoint: Option<String>,

    /// User id for this run, overrides stored credentials
    #[arg(long, requires = "token")]
    user_id: Option<String>,

    /// Bearer token for this run
    #[arg(long, requires = "user_id")]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rslang_client=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting RS Lang client");

    let cli = Cli::parse();
    let credentials = match (cli.user_id, cli.token) {
        (Some(user_id), Some(token)) => Some(Credentials::new(user_id, token)),
        _ => None,
    };

    let state = app::setup(SetupOptions {
        settings_dir: cli.settings_dir,
        endpoint: cli.endpoint,
        credentials,
    })
    .await
    .context("application setup failed")?;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(format!("{}\n", HELP).as_bytes()).await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        match commands::execute(&state, command).await {
            Ok(output) => stdout.write_all(format!("{}\n", output).as_bytes()).await?,
            Err(e) => eprintln!("{}", e),
        }
    }

    tracing::info!("Exiting");
    Ok(())
}
