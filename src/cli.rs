use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{preview, serve};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "fincast")]
#[command(about = "Fincast forecast dashboard server and terminal preview")]
#[command(version)]
pub struct Cli {
    /// Path to a configuration file (TOML, YAML or JSON)
    ///
    /// Defaults to an optional `fincast.toml` in the working directory.
    #[arg(short, long, global = true, env = "FINCAST_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server, overrides the configuration file
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS")]
        bind_address: Option<String>,
    },
    /// Run one dashboard session in the terminal
    ///
    /// Walks through every processing stage in real time, then prints the
    /// composed dashboard or the failure panel.
    Preview {
        /// Make the forecast provider fail with this reason
        #[arg(long)]
        fail: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut settings = Settings::load(self.config.as_deref())?;
        match self.command {
            Commands::Serve { bind_address } => {
                if let Some(bind_address) = bind_address {
                    settings.server.bind_address = bind_address;
                }
                serve(&settings).await?;
            }
            Commands::Preview { fail } => {
                if fail.is_some() {
                    settings.provider.failure = fail;
                }
                preview(&settings).await?;
            }
        }
        Ok(())
    }
}
