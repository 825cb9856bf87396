//! slirc - Straylight IRC Client
//!
//! Reads the config path from the first argument (default `slirc.toml`),
//! then runs the client against the terminal until `/quit` or end of input.

use anyhow::Context;
use slirc_client::config::{self, Config};
use slirc_client::filter::{Censor, Highlighter};
use slirc_client::ui::TerminalFrontend;
use slirc_client::{Client, history, telemetry};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init("warn");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "slirc.toml".to_string());
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("failed to load config from {config_path}"))?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {config_path}", errors.len());
    }

    let frontend = TerminalFrontend::new(
        std::io::stdout(),
        Censor::from_file(config.files.badwords.as_deref()),
        Highlighter::from_file(config.files.hilites.as_deref()),
    )
    .with_nick_colors(config.client.nick_colors);
    let log = history::open(config.files.log.as_deref());
    let mut client = Client::new(&config, frontend, log);

    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    debug!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
    });

    info!(nick = %config.identity.nick, "starting");
    client.greet();
    if let Some(auto) = &config.autoconnect {
        if let Err(e) = client.autoconnect(auto).await {
            debug!(error = %e, "autoconnect failed");
        }
    }

    client.run(rx).await;
    info!("bye");
    Ok(())
}
