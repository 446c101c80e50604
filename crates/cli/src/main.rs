mod interactive;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use galsearch_core::{
    load_config, organize, validate_config, Catalog, CatalogClient, Category, Config, Dispatch,
    SearchCoordinator, SearchEvent, TitleId,
};

/// Config file looked up when no path is given
const DEFAULT_CONFIG_PATH: &str = "galsearch.toml";

/// Buffer size for search event channel
const EVENT_BUFFER_SIZE: usize = 16;

#[derive(Debug, Parser)]
#[command(name = "galsearch", version, about = "Search the galgame catalog and list download resources")]
struct Cli {
    /// Config file (default: ./galsearch.toml if present, else built-in defaults)
    #[arg(long, env = "GALSEARCH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search titles by keyword
    Search {
        keyword: String,
    },
    /// List a title's resources, best first
    Resources {
        title_id: String,
        /// body, patch or save
        #[arg(long, short, default_value = "body")]
        category: Category,
    },
    /// Read commands from stdin
    Interactive,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr; stdout is for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref())?;
    validate_config(&config).context("Configuration validation failed")?;
    info!("Catalog base URL: {}", config.catalog.base_url);

    let catalog: Arc<dyn Catalog> = Arc::new(
        CatalogClient::new(&config.catalog).context("Failed to create catalog client")?,
    );

    match cli.command {
        Command::Search { keyword } => search(catalog, &keyword).await,
        Command::Resources { title_id, category } => {
            resources(catalog.as_ref(), &TitleId::new(title_id), category).await
        }
        Command::Interactive => {
            let (coordinator, events) =
                SearchCoordinator::new(Arc::clone(&catalog), EVENT_BUFFER_SIZE);
            interactive::run(catalog, coordinator, events).await
        }
    }
}

/// Load the given config file, or the default one if it exists.
fn resolve_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                info!("No config file, using defaults");
                return Ok(Config::default());
            }
            default
        }
    };

    info!("Loading configuration from {:?}", path);
    load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
}

async fn search(catalog: Arc<dyn Catalog>, keyword: &str) -> Result<()> {
    let (coordinator, mut events) = SearchCoordinator::new(catalog, EVENT_BUFFER_SIZE);

    match coordinator.request(keyword) {
        Dispatch::Started(_) => {}
        Dispatch::EmptyKeyword => bail!("Keyword cannot be empty"),
        Dispatch::Busy => bail!("A search is already running"),
    }

    let event = events.recv().await.context("Search worker stopped")?;
    if let Some(message) = event.user_message() {
        if let SearchEvent::Failed { .. } = event {
            bail!(message);
        }
        println!("{}", message);
        return Ok(());
    }

    if let SearchEvent::Completed { titles, .. } = &event {
        print!("{}", render::titles(titles));
    }
    Ok(())
}

async fn resources(catalog: &dyn Catalog, title_id: &TitleId, category: Category) -> Result<()> {
    let entries = catalog
        .fetch_resources(title_id)
        .await
        .with_context(|| format!("获取详情失败 (title {})", title_id))?;

    print!("{}", render::resources(category, &organize(&entries, category)));
    Ok(())
}
