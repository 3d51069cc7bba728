use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use animecat_common::{Config, Provider};
use animecat_resolver::{
    CatalogSink, ItemSource, JsonFileSource, MetadataSearch, Orchestrator, OrchestratorOptions,
    QueryCache, Resolver, StremioCatalogSink,
};
use cinemeta_client::CinemetaClient;
use kitsu_client::KitsuClient;

/// Resolve scraped anime titles to catalog IDs and write a Stremio catalog.
#[derive(Parser, Debug)]
#[command(name = "animecat")]
struct Args {
    /// JSON array of scraped items.
    #[arg(long)]
    items: PathBuf,

    /// Directory that receives manifest.json and catalog/.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Worker pool size (overrides ANIMECAT_WORKERS).
    #[arg(long)]
    workers: Option<usize>,

    /// kitsu or cinemeta (overrides ANIMECAT_PROVIDER).
    #[arg(long)]
    provider: Option<Provider>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("animecat=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(workers) = args.workers {
        config.workers = workers.max(1);
    }
    if let Some(provider) = args.provider {
        config.provider = provider;
    }
    config.log_summary();

    let search: Arc<dyn MetadataSearch> = match config.provider {
        Provider::Kitsu => Arc::new(KitsuClient::new(
            &config.kitsu_base_url,
            config.lookup_timeout,
        )?),
        Provider::Cinemeta => Arc::new(CinemetaClient::new(
            &config.cinemeta_base_url,
            config.lookup_timeout,
        )?),
    };

    let resolver = Arc::new(Resolver::new(
        search,
        Arc::new(QueryCache::new()),
        config.lookup_timeout,
    ));
    let orchestrator = Orchestrator::new(
        resolver,
        OrchestratorOptions {
            workers: config.workers,
            order: config.output_order,
        },
    );

    let items = JsonFileSource::new(&args.items).items().await?;
    let run = orchestrator.resolve_all_with_report(items).await;

    let sink = StremioCatalogSink::from_config(&args.out, &config);
    sink.write(&run.records).await?;

    info!(
        resolved = run.report.resolved,
        unresolved = run.report.unresolved,
        malformed = run.report.malformed,
        "animecat finished"
    );
    Ok(())
}
