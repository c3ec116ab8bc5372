use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scoring_http::{config, server::ServerConfig};

/// Scoring HTTP API Server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "SCORING_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SCORING_PORT")]
    port: Option<u16>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "SCORING_LOG_LEVEL")]
    log_level: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server with a specific configuration file
    Config {
        /// Path to the configuration file
        #[arg(short, long)]
        file: PathBuf,
    },
}

impl Cli {
    /// Flags given on the command line override the loaded configuration.
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.command {
        Some(Commands::Config { file }) => config::from_file(file)?,
        None => ServerConfig::default(),
    };
    let config = cli.apply(config);

    println!(
        "Starting scoring HTTP server on {}:{}",
        config.host, config.port
    );
    scoring_http::start_with_config(config)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
