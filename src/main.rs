use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

mod centrality;
mod community;
mod config;
mod data;
mod graph;
mod rank;
mod storage;

use config::Config;

#[derive(Parser, Debug)]
#[clap(
    name = "social-graph-analyzer",
    about = "Community and centrality analysis of social-network edge lists"
)]
struct Cli {
    /// Directory containing .edges input files
    #[clap(long)]
    input: PathBuf,

    /// Output directory for results
    #[clap(long, default_value = "analysis_results")]
    output_dir: String,

    /// Number of nodes to sample from the universe
    #[clap(long, default_value = "2000")]
    sample_size: usize,

    /// Seed for the deterministic sampling procedure
    #[clap(long, default_value = "42")]
    seed: u64,

    /// Ranking depth per centrality measure
    #[clap(long, default_value = "10")]
    top_k: usize,

    /// Eigenvector power-iteration cap
    #[clap(long, default_value = "1000")]
    eigen_max_iter: usize,

    /// Eigenvector convergence tolerance
    #[clap(long, default_value = "1e-6")]
    eigen_tol: f64,

    /// Maximum local-moving sweeps per Louvain level
    #[clap(long, default_value = "100")]
    louvain_sweep_cap: usize,

    /// Maximum Louvain aggregation levels
    #[clap(long, default_value = "20")]
    louvain_level_cap: usize,

    /// Maximum label-propagation iterations for the fallback
    #[clap(long, default_value = "100")]
    label_prop_cap: usize,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config {
        sample_size: args.sample_size,
        seed: args.seed,
        top_k: args.top_k,
        eigen_max_iter: args.eigen_max_iter,
        eigen_tol: args.eigen_tol,
        louvain_sweep_cap: args.louvain_sweep_cap,
        louvain_level_cap: args.louvain_level_cap,
        label_prop_cap: args.label_prop_cap,
    };

    log::info!("Starting social-graph analysis");
    log::info!("Input: {}", args.input.display());
    log::info!("Output: {}", args.output_dir);

    // 1. Ingest edge-list files
    let edge_data = data::edges::load_edge_files(&args.input)?;

    // 2. Draw the reproducible node sample and build the graph
    let sampled = data::sampling::sample_graph(&edge_data, config.sample_size, config.seed);
    log::info!(
        "Sampled graph: {} nodes, {} edges, density {:.4}",
        sampled.node_count,
        sampled.edge_count,
        sampled.density()
    );

    // 3. Reduce to the giant component for the expensive measures
    let components = graph::components::connected_components(&sampled);
    log::info!("Connected components: {}", components.len());

    let giant = graph::components::giant_component(&sampled);
    log::info!(
        "Giant component: {} nodes, {} edges",
        giant.node_count,
        giant.edge_count
    );

    // 4. Community detection (Louvain, label-propagation fallback)
    let partition = community::detect_communities(&giant, &config.community())
        .context("community detection failed")?;

    // 5. Centrality suite
    let suite = centrality::compute_suite(&giant, &config.centrality())
        .context("centrality computation failed")?;

    // 6. Rankings, overlap, correlation
    let rankings = rank::rank_all(&giant, &suite, config.top_k);
    let overlap = rank::overlap(&rankings);
    let correlation = rank::correlation_matrix(&suite);

    if overlap.is_empty() {
        log::info!("No node ranks in the top-{} of every measure", config.top_k);
    } else {
        log::info!("Nodes in the top-{} of every measure: {:?}", config.top_k, overlap);
    }

    // 7. Persist results
    storage::save_results(
        &sampled,
        &giant,
        components.len(),
        &partition,
        &suite,
        &rankings,
        &overlap,
        &correlation,
        &args.output_dir,
    )?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
