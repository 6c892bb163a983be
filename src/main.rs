use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gryphon_mapf::adapters::outbound::{init_domain_logger, FilesystemDataSource};
use gryphon_mapf::application::MapfService;
use gryphon_mapf::domains::mapf::{MapDataSource, RepairStrategy, VertexId};
use gryphon_mapf::Config;

/// Plan connectivity-preserving paths for a group of agents.
#[derive(Parser, Debug)]
#[command(name = "gryphon-mapf", version)]
struct Cli {
    /// TOML configuration file; defaults apply when it does not exist
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Movement graph name under <data dir>/graphs
    #[arg(long)]
    movement: String,

    /// Communication graph name under <data dir>/graphs
    #[arg(long)]
    communication: String,

    /// Source vertex of every agent
    #[arg(long, value_delimiter = ',', required = true)]
    sources: Vec<VertexId>,

    /// Target vertex of every agent
    #[arg(long, value_delimiter = ',', required = true)]
    targets: Vec<VertexId>,

    /// Override the configured random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Use the ranked depth-first waypoint search
    #[arg(long)]
    ranked: bool,

    /// Write the execution as JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        Config::from_file(&cli.config)
            .await
            .with_context(|| format!("loading {}", cli.config.display()))?
    } else {
        Config::default()
    };
    if let Some(seed) = cli.seed {
        config.solver.seed = Some(seed);
    }
    if cli.ranked {
        config.solver.strategy = RepairStrategy::RankedSearch;
    }

    // Initialize tracing; the `log` facade stays free for the fast_log file appender.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing tracing subscriber")?;

    info!("Starting gryphon-mapf");
    let logger = init_domain_logger(&config.logging);

    let data_source: Arc<dyn MapDataSource> = Arc::new(FilesystemDataSource::new(config.data.dir.clone()));
    let service = MapfService::new(data_source, logger, config.solver.clone());

    let solution = match service.plan_by_name(&cli.movement, &cli.communication, &cli.sources, &cli.targets) {
        Ok(solution) => solution,
        Err(e) => {
            error!("Planning failed: {}", e);
            return Err(e.into());
        }
    };
    info!(
        run_id = %solution.report.run_id,
        attempts = solution.report.attempts_used,
        horizon = solution.execution.len(),
        "Planning finished"
    );

    let json = serde_json::to_string_pretty(&solution.execution)?;
    match cli.output {
        Some(path) => tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}
