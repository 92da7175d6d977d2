//! watcherd — the watcher registry daemon.
//!
//! Opens the document store, serves the watcher REST API, and closes the
//! store again on shutdown.
//!
//! # Usage
//!
//! ```text
//! watcherd serve --config /etc/watcher/watcher.toml --port 8080
//! watcherd show-config --data-dir /tmp/watcher
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use watcher_core::WatcherConfig;

mod serve;

#[derive(Parser)]
#[command(name = "watcherd", about = "Watcher registry daemon", version)]
struct Cli {
    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the watcher API.
    Serve(ConfigArgs),
    /// Print the effective configuration as TOML and exit.
    ShowConfig(ConfigArgs),
}

/// Config file plus command-line overrides (flags win over the file).
#[derive(Debug, Default, Args)]
struct ConfigArgs {
    /// Path to a watcher.toml file. Compiled-in defaults apply without one.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on.
    #[arg(long)]
    port: Option<u16>,

    /// Data directory for the store.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl ConfigArgs {
    fn resolve(self) -> anyhow::Result<WatcherConfig> {
        let mut config = match &self.config {
            Some(path) => WatcherConfig::from_file(path)?,
            None => WatcherConfig::default(),
        };
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(data_dir) = self.data_dir {
            config.store.data_dir = data_dir;
        }
        Ok(config)
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,watcherd=debug,watcher_api=debug,watcher_state=debug,tower_http=debug",
        )
    });
    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Command::Serve(args) => serve::run_serve(args.resolve()?).await,
        Command::ShowConfig(args) => {
            print!("{}", args.resolve()?.to_toml_string()?);
            Ok(())
        }
    }
}
