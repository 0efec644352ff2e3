mod display;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use devshoes_core::{AppConfig, CatalogQuery, SortOption, StatusFilter};
use devshoes_scraper::{fetch_development_shoes, CertCheckClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "devshoes")]
#[command(about = "Browse World Athletics development shoe approvals")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List development shoes (default)
    List(ListArgs),
    /// Show totals for brands and disciplines
    Stats,
    /// Show brand, discipline and shoe type counts
    Facets,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only shoes from this manufacturer (repeatable)
    #[arg(long = "brand")]
    brands: Vec<String>,
    /// Only shoes approved for this discipline (repeatable)
    #[arg(long = "discipline")]
    disciplines: Vec<String>,
    /// Only shoes of this type (repeatable)
    #[arg(long = "type")]
    shoe_types: Vec<String>,
    /// all, valid, expiring or expired
    #[arg(long, default_value = "all")]
    status: StatusFilter,
    /// Case-insensitive match on product, brand or model number
    #[arg(long)]
    search: Option<String>,
    /// newest, expiring or alphabetical
    #[arg(long, default_value = "newest")]
    sort: SortOption,
    /// Group output under brand headings
    #[arg(long)]
    group_by_brand: bool,
}

impl ListArgs {
    fn to_query(&self) -> CatalogQuery {
        let mut query = CatalogQuery {
            status: self.status,
            search: self.search.clone().unwrap_or_default(),
            sort: self.sort,
            ..CatalogQuery::default()
        };
        query.brands.extend(self.brands.iter().cloned());
        query.disciplines.extend(self.disciplines.iter().cloned());
        query.shoe_types.extend(self.shoe_types.iter().cloned());
        query
    }
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = devshoes_core::load_app_config()?;
    init_tracing(&config)?;
    tracing::debug!(env = %config.env, url = %config.catalog.data_url, "starting");

    let client = CertCheckClient::from_config(&config)?;
    let shoes = fetch_development_shoes(&client, &config.catalog).await;

    let output = match cli.command {
        None => display::render_list(
            &shoes,
            &CatalogQuery::default(),
            false,
            Utc::now(),
            &config.catalog,
            cli.json,
        )?,
        Some(Commands::List(args)) => display::render_list(
            &shoes,
            &args.to_query(),
            args.group_by_brand,
            Utc::now(),
            &config.catalog,
            cli.json,
        )?,
        Some(Commands::Stats) => display::render_stats(&shoes, &config.catalog, cli.json)?,
        Some(Commands::Facets) => display::render_facets(&shoes, cli.json)?,
    };
    print!("{output}");

    Ok(())
}
