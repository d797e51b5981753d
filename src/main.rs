//! Salesdash
//!
//! Command-line entry point:
//! - `serve`: run the dashboard server
//! - `filter`: run one update in-process and print the chart payload
//! - `config`: print or write the default config file

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use salesdash::api::{serve, AppState};
use salesdash::config::{generate_default_config, Config, LoggingConfig};
use salesdash::data::DataStore;
use salesdash::dispatch::Dispatcher;
use salesdash::filter::ControlInput;

#[derive(Parser)]
#[command(name = "salesdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Single-page sales analytics dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the synthetic sales table
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the dashboard server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Filter the sales table and print the chart payload as JSON
    Filter {
        /// Start date (default: first day of the table)
        #[arg(short, long)]
        start: Option<String>,
        /// End date (default: last day of the table)
        #[arg(short, long)]
        end: Option<String>,
        /// Category to include (repeatable; default: all)
        #[arg(short = 'C', long = "category")]
        categories: Vec<String>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                eprintln!("Wrote default config to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    // A config file that exists but fails to load ends the process here
    let (mut config, source) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Some(path.clone())),
        None => Config::load_default()?,
    };
    if let Some(seed) = cli.seed {
        config.data.seed = seed;
    }

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            init_logging(&config.logging);
            log_config_source(source.as_deref());
            run_server(config).await
        }
        Commands::Filter {
            start,
            end,
            categories,
            pretty,
        } => {
            init_logging(&LoggingConfig {
                level: "warn".to_string(),
                ..config.logging.clone()
            });
            log_config_source(source.as_deref());
            run_filter(&config, start, end, categories, pretty)
        }
        Commands::Config { .. } => Ok(()),
    }
}

/// Build the store and layout, then serve until shutdown
///
/// Nothing is bound until the store and layout exist; a failure while
/// building them ends the process.
async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting Salesdash v{}", env!("CARGO_PKG_VERSION"));

    let store = match DataStore::build(config.data.seed, &config.data.generator()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build sales table");
            return Err(e.into());
        }
    };

    let state = AppState::new(store, config.server.clone());

    tracing::info!(
        "Dashboard available at http://{}{}",
        config.server.addr(),
        config.server.dashboard_path
    );

    serve(state).await?;

    tracing::info!("Salesdash stopped");
    Ok(())
}

/// One in-process update, printed to stdout
fn run_filter(
    config: &Config,
    start: Option<String>,
    end: Option<String>,
    categories: Vec<String>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(DataStore::build(config.data.seed, &config.data.generator())?);
    let dispatcher = Dispatcher::new(store);

    let input = ControlInput {
        start_date: start,
        end_date: end,
        categories: Some(categories),
    };
    let payload = dispatcher.handle(&input)?;

    let json = if pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    println!("{}", json);

    Ok(())
}

fn log_config_source(source: Option<&Path>) {
    match source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }
}

/// Initialize tracing
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr so the
/// `filter` command's stdout stays clean JSON.
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("salesdash={},tower_http=info", config.level))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_json() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
