mod catalog;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "buscacar")]
#[command(about = "Buscacar vehicle catalog command line interface")]
struct Cli {
    /// Vehicle feed to read (defaults to `BUSCACAR_FEED_PATH`)
    #[arg(long, global = true)]
    feed: Option<PathBuf>,
    /// Brand/model reference file (defaults to `BUSCACAR_BRANDS_PATH`)
    #[arg(long, global = true)]
    brands: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse the feed and print row statistics
    Parse {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search the catalog and print a page of results
    Search(catalog::SearchArgs),
    /// List brand/model pairs matching a partial query
    Suggest { query: String },
    /// Detect the brand and model named in a free-text query
    Extract { query: String },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = buscacar_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let feed = cli.feed.unwrap_or_else(|| config.feed_path.clone());
    let brands = cli.brands.unwrap_or_else(|| config.brands_path.clone());

    match cli.command {
        Some(Commands::Parse { json }) => catalog::run_parse(&feed, json)?,
        Some(Commands::Search(args)) => {
            let store = catalog::load_store(&feed, &brands)?;
            let request = args.into_request(config.page_size);
            catalog::run_search(&store, &request)?;
        }
        Some(Commands::Suggest { query }) => {
            let store = catalog::load_store(&feed, &brands)?;
            catalog::run_suggest(&store, &query);
        }
        Some(Commands::Extract { query }) => {
            let store = catalog::load_store(&feed, &brands)?;
            catalog::run_extract(&store, &query);
        }
        None => println!("buscacar: run with --help to list commands"),
    }

    Ok(())
}
