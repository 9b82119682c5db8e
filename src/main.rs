use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pubfetch::config::{find_config_file, load_config, Config};
use pubfetch::models::SortBy;
use pubfetch::server::{self, AppState};
use pubfetch::sources::CrossRefSource;
use pubfetch::PublicationFetcher;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// pubfetch - Serve an author's CrossRef publications as JSON
#[derive(Parser, Debug)]
#[command(name = "pubfetch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve an author's CrossRef publications as JSON", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Sort order for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortField {
    /// Most cited first
    Popular,
    /// Newest first
    Latest,
    /// Oldest first
    Oldest,
}

impl From<SortField> for SortBy {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Popular => SortBy::Popular,
            SortField::Latest => SortBy::Latest,
            SortField::Oldest => SortBy::Oldest,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Fetch publications once and print them as JSON
    #[command(alias = "f")]
    Fetch {
        /// Author to query (defaults to the configured default author)
        author: Option<String>,

        /// Sort the results
        #[arg(long, short, value_enum)]
        sort: Option<SortField>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Write it to this file instead of stdout
        #[arg(long, value_name = "PATH")]
        write: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    let (json_layer, text_layer) = if cli.json_logs {
        (
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
            None,
        )
    } else {
        (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("pubfetch={}", env_filter)),
        ))
        .with(json_layer)
        .with(text_layer)
        .init();

    let config_path = cli.config.clone().or_else(find_config_file);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => run_server(config, host, port).await,
        Commands::Fetch {
            author,
            sort,
            pretty,
        } => run_fetch(config, author, sort, pretty).await,
        Commands::Config { write: Some(path) } => {
            config
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote configuration to {}", path.display());
            Ok(())
        }
        Commands::Config { write: None } => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn build_fetcher(config: &Config) -> Result<PublicationFetcher> {
    let source = CrossRefSource::from_config(&config.crossref)
        .context("Failed to create CrossRef client")?;
    Ok(PublicationFetcher::from_config(Arc::new(source), config))
}

async fn run_server(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let fetcher = build_fetcher(&config)?;
    let state = Arc::new(AppState::new(fetcher, config.server.default_author.clone()));
    let addr = config.server.bind_address();

    tracing::info!(
        filter_family = %config.filter.family,
        filter_given = %config.filter.given,
        "Starting server on {}",
        addr
    );

    server::bind_and_serve(&addr, state)
        .await
        .with_context(|| format!("Server error on {}", addr))
}

async fn run_fetch(
    config: Config,
    author: Option<String>,
    sort: Option<SortField>,
    pretty: bool,
) -> Result<()> {
    let fetcher = build_fetcher(&config)?;
    let author = author.unwrap_or_else(|| config.server.default_author.clone());

    let mut publications = fetcher.fetch_publications(&author).await?;
    if let Some(sort) = sort {
        SortBy::from(sort).apply(&mut publications);
    }

    let output = if pretty {
        serde_json::to_string_pretty(&publications)?
    } else {
        serde_json::to_string(&publications)?
    };
    println!("{}", output);

    Ok(())
}
