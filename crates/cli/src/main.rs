use anyhow::Context;
use clap::Parser;
use geoscan::{Config, Scanner};
use geoscan_cli::input::{self, Columns};
use geoscan_cli::{Overrides, load_config, output};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Density-based clustering of CSV point files", long_about = None)]
struct Args {
    /// Input CSV file [default: ./data.csv]
    input: Option<PathBuf>,

    /// Neighborhood radius
    epsilon: Option<f64>,

    /// Minimum points for a cluster to be kept
    min_pts: Option<usize>,

    /// Maximum number of points handled by a single job
    max_job_size: Option<usize>,

    /// Worker threads (defaults to the number of logical cores)
    threads: Option<usize>,

    /// JSON or TOML file with clustering parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 0-based column holding x (longitude)
    #[arg(long, default_value_t = 8)]
    x_column: usize,

    /// 0-based column holding y (latitude)
    #[arg(long, default_value_t = 9)]
    y_column: usize,

    #[arg(long, default_value = "./clusters.csv")]
    clusters_out: PathBuf,

    #[arg(long, default_value = "./points.csv")]
    points_out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoscan=info,geoscan_cli=info,info".into()),
        )
        .init();

    let args = Args::parse();
    let input_path = args.input.unwrap_or_else(|| PathBuf::from("./data.csv"));
    let started = Instant::now();

    let base = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };
    let config = Overrides {
        epsilon: args.epsilon,
        min_pts: args.min_pts,
        max_job_size: args.max_job_size,
        workers: args.threads,
    }
    .apply(base);
    let scanner = Scanner::new(config).context("Invalid clustering parameters")?;

    let config = scanner.config();
    info!(
        "Input: {}, epsilon: {}, min_pts: {}, max_job_size: {}, workers: {}",
        input_path.display(),
        config.epsilon,
        config.min_pts,
        config.max_job_size,
        config.worker_count()
    );

    info!("Reading points...");
    let columns = Columns {
        x: args.x_column,
        y: args.y_column,
    };
    let dataset = input::read_points(&input_path, columns)?;
    info!(
        "Read {} points ({} rows skipped), bounds {:?}",
        dataset.points.len(),
        dataset.skipped,
        dataset.bounds
    );

    let outcome = scanner.run(dataset.bounds, &dataset.points)?;
    info!(
        "Kept {} of {} clusters in {:?}",
        outcome.stats.retained_clusters,
        outcome.stats.merged_clusters,
        outcome.stats.total_time()
    );

    info!("Saving results...");
    output::write_clusters_file(&args.clusters_out, &outcome.clusters)?;
    output::write_points_file(&args.points_out, &outcome.clusters)?;
    info!(
        "Wrote {} and {}",
        args.clusters_out.display(),
        args.points_out.display()
    );
    info!("Total elapsed time: {:?}", started.elapsed());

    Ok(())
}
