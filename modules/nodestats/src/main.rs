use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use asrank_client::AsRankClient;
use nodestats_core::{
    enrich_and_sort, export, AsRankSource, CloudSummary, EnrichConfig, MemoryRankCache, NodeStore,
};

mod report;

const DEFAULT_LOG_DIRECTIVES: &str = "nodestats=info,nodestats_core=info";

#[derive(Parser)]
#[command(name = "nodestats", about = "Aggregate statistics over the node database")]
struct Cli {
    /// SQLite database produced by the collector
    #[arg(long, env = "NODESTATS_DB", default_value = "node_filter.db")]
    db: PathBuf,

    /// Directory for output tables
    #[arg(long, env = "NODESTATS_OUT_DIR", default_value = "paper")]
    out_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// ASN breakdown enriched with CAIDA ASRank, sorted by rank
    AsnRanks {
        /// Include the AS organisation name column
        #[arg(long)]
        with_names: bool,

        #[arg(long, env = "ASRANK_URL", default_value = asrank_client::DEFAULT_BASE_URL)]
        asrank_url: String,

        /// Pause after this many new lookups (0 disables)
        #[arg(long, default_value_t = 10)]
        throttle_every: usize,

        #[arg(long, default_value_t = 1000)]
        throttle_ms: u64,

        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Cloud vs non-cloud instances per ASN
    AsnCloud {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Domains per cloud provider
    CloudProviders {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Domains per country
    Countries {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref())?)
        .init();

    let cli = Cli::parse();

    let store = NodeStore::open(&cli.db)
        .await
        .with_context(|| format!("Cannot open node database {}", cli.db.display()))?;

    let result = run(&cli, &store).await;
    store.close().await;
    result
}

async fn run(cli: &Cli, store: &NodeStore) -> Result<()> {
    match &cli.command {
        Command::AsnRanks {
            with_names,
            asrank_url,
            throttle_every,
            throttle_ms,
            output,
        } => {
            let config = EnrichConfig {
                throttle_every: *throttle_every,
                throttle_pause: Duration::from_millis(*throttle_ms),
                with_names: *with_names,
            };
            let path = output_path(&cli.out_dir, output, "asn_ranks.csv");
            asn_ranks(store, asrank_url, &config, &path).await
        }
        Command::AsnCloud { output } => {
            let path = output_path(&cli.out_dir, output, "asn_cloud_analysis.csv");
            let rows = store.asn_cloud_counts().await?;

            println!("\nASN analysis with cloud vs non-cloud instances:");
            report::print_asn_cloud(&rows);
            export::write_asn_cloud_counts(&path, &rows)?;

            println!("\nSummary Statistics:");
            println!("{}", CloudSummary::from_rows(&rows));
            Ok(())
        }
        Command::CloudProviders { output } => {
            let path = output_path(&cli.out_dir, output, "cloud_providers.csv");
            let rows = store.cloud_provider_counts().await?;

            println!("\nDomain counts per cloud provider:");
            report::print_cloud_providers(&rows);
            export::write_cloud_provider_counts(&path, &rows)?;
            Ok(())
        }
        Command::Countries { output } => {
            let path = output_path(&cli.out_dir, output, "countries.csv");
            let rows = store.country_counts().await?;

            println!("\nDomain counts per country:");
            report::print_countries(&rows);
            export::write_country_counts(&path, &rows)?;
            Ok(())
        }
    }
}

async fn asn_ranks(
    store: &NodeStore,
    asrank_url: &str,
    config: &EnrichConfig,
    path: &Path,
) -> Result<()> {
    config.log_settings();

    let rows = store.asn_cloud_counts().await?;
    info!(rows = rows.len(), "Loaded ASN breakdown");

    let client = AsRankClient::new(asrank_url).context("Failed to build ASRank client")?;
    let source = AsRankSource::new(client);
    let mut cache = MemoryRankCache::new();
    let mut throttle = config.throttle();

    let outcome = enrich_and_sort(rows, &source, &mut cache, &mut throttle, config.with_names).await;

    println!("\nASNs by rank:");
    report::print_ranked_asns(&outcome.rows, config.with_names);
    println!(
        "\nLookups: {}  |  Rows: {}  |  Unranked rows: {}",
        outcome.stats.lookups, outcome.stats.rows, outcome.stats.unknown
    );

    export::write_ranked_asns(path, &outcome.rows, config.with_names)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// `RUST_LOG` when set, otherwise info for this binary and the core library.
fn log_filter(rust_log: Option<&str>) -> Result<EnvFilter> {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => Ok(EnvFilter::try_new(directives)?),
        _ => Ok(EnvFilter::new(DEFAULT_LOG_DIRECTIVES)),
    }
}

fn output_path(out_dir: &Path, output: &Option<PathBuf>, default_name: &str) -> PathBuf {
    output.clone().unwrap_or_else(|| out_dir.join(default_name))
}
