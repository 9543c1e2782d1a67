//! Skiphire CLI

use std::{
    io::{self, BufRead, Write},
    process,
};

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use skiphire::{observability::init_logging, prelude::*};
use tracing::info;

use crate::shop::{Flow, Session, ShopCommand};

mod shop;

#[derive(Debug, Parser)]
#[command(name = "skiphire", about = "Skip hire storefront", long_about = None)]
struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the skips on offer
    Catalog(CatalogArgs),

    /// Start an interactive shopping session
    Shop(SourceArgs),
}

#[derive(Debug, Args)]
struct SourceArgs {
    #[command(flatten)]
    catalog: CatalogConfig,

    /// Report API failures instead of serving the built-in skips
    #[arg(long)]
    no_fallback: bool,
}

#[derive(Debug, Args)]
struct CatalogArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Only show skips that accept heavy waste
    #[arg(long)]
    heavy_waste: bool,

    /// Hide skips that are not allowed on the road
    #[arg(long)]
    hide_off_road: bool,

    /// Minimum price in pounds
    #[arg(long)]
    min_price: Option<Decimal>,

    /// Maximum price in pounds
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Field to sort by
    #[arg(long, value_enum, default_value_t = SortKey::Name)]
    sort: SortKey,

    /// Sort in descending order
    #[arg(long)]
    desc: bool,
}

impl CatalogArgs {
    fn filter(&self) -> Result<CatalogFilter, PriceError> {
        Ok(CatalogFilter {
            heavy_waste_only: self.heavy_waste,
            hide_not_allowed_on_road: self.hide_off_road,
            min_price: self.min_price.map(Price::from_major).transpose()?,
            max_price: self.max_price.map(Price::from_major).transpose()?,
        })
    }

    fn sort(&self) -> Sort {
        Sort {
            key: self.sort,
            order: if self.desc {
                SortOrder::Desc
            } else {
                SortOrder::Asc
            },
        }
    }
}

/// Where products come from.
#[derive(Debug)]
enum Source {
    Http(HttpCatalogLoader),
    Fixture(FixtureCatalogLoader),
}

impl Source {
    fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        match config.fixture.clone() {
            Some(path) => Ok(Source::Fixture(FixtureCatalogLoader::new(path))),
            None => Ok(Source::Http(HttpCatalogLoader::new(config)?)),
        }
    }
}

impl CatalogLoader for Source {
    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        match self {
            Source::Http(loader) => loader.load().await,
            Source::Fixture(loader) => loader.load().await,
        }
    }
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Catalog(args) => list_catalog(args).await,
        Commands::Shop(args) => run_shop(args).await,
    }
}

async fn load_catalog(args: &SourceArgs) -> Result<Catalog, String> {
    let source = Source::from_config(args.catalog.clone())
        .map_err(|error| format!("failed to set up catalog loader: {error}"))?;

    let products = if args.no_fallback {
        source.load().await
    } else {
        FallbackCatalogLoader::new(source)
            .map_err(|error| format!("failed to read fallback skips: {error}"))?
            .load()
            .await
    }
    .map_err(|error| format!("Error loading skip containers: {}", error.user_message()))?;

    info!(count = products.len(), "catalog ready");

    Ok(Catalog::new(products))
}

async fn list_catalog(args: CatalogArgs) -> Result<(), String> {
    let filter = args
        .filter()
        .map_err(|error| format!("invalid price filter: {error}"))?;

    let catalog = load_catalog(&args.source).await?;
    let view = catalog.view(&filter, args.sort());

    write_catalog(io::stdout().lock(), &view, &CartState::default())
        .map_err(|error| error.to_string())
}

async fn run_shop(args: SourceArgs) -> Result<(), String> {
    let catalog = match load_catalog(&args).await {
        Ok(catalog) => catalog,
        Err(message) => {
            eprintln!("{message}\nType `reload` to try again.");
            Catalog::default()
        }
    };

    let mut session = Session::new(catalog, CartStore::default());
    let mut stdout = io::stdout();

    writeln!(stdout, "Welcome to the skip hire shop. Type `help` for commands.")
        .map_err(|error| error.to_string())?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        write!(stdout, "> ").map_err(|error| error.to_string())?;
        stdout.flush().map_err(|error| error.to_string())?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(|error| error.to_string())?;

        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ShopCommand>() {
            Ok(command) => command,
            Err(error) => {
                writeln!(stdout, "{error}").map_err(|error| error.to_string())?;
                continue;
            }
        };

        match session
            .handle(command, &mut stdout)
            .map_err(|error| error.to_string())?
        {
            Flow::Continue => {}
            Flow::Reload => match load_catalog(&args).await {
                Ok(catalog) => {
                    writeln!(stdout, "Loaded {} skips.", catalog.len())
                        .map_err(|error| error.to_string())?;
                    session.replace_catalog(catalog);
                }
                Err(message) => {
                    writeln!(stdout, "{message}\nType `reload` to try again.")
                        .map_err(|error| error.to_string())?;
                }
            },
            Flow::Quit => break,
        }
    }

    Ok(())
}
