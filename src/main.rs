use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hfmea_graph::server::DEFAULT_SOURCE;
use hfmea_graph::{
    AnalysisReport, ServerConfig, graph_from_file, read_records, serve, try_build_graph,
};

#[derive(Parser)]
#[command(name = "hfmea-graph")]
#[command(author, version, about = "HFMEA table to graph visualization service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the visualization page and the graph API
    Serve {
        /// HFMEA source file (comma-separated, header line first)
        #[arg(long, default_value = DEFAULT_SOURCE)]
        csv: PathBuf,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report how the rows of a source file normalize
    Analyze {
        /// HFMEA source file
        #[arg(long, default_value = DEFAULT_SOURCE)]
        csv: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the graph JSON for a source file
    Export {
        /// HFMEA source file
        #[arg(long, default_value = DEFAULT_SOURCE)]
        csv: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Write single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            csv,
            host,
            port,
            verbose,
        } => {
            setup_logging(verbose);
            serve(ServerConfig {
                source_path: csv,
                host,
                port,
            })
            .await
        }
        Commands::Analyze { csv, verbose } => {
            setup_logging(verbose);
            analyze_source(csv)
        }
        Commands::Export {
            csv,
            output,
            compact,
            verbose,
        } => {
            setup_logging(verbose);
            export_graph(csv, output, !compact)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn analyze_source(csv: PathBuf) -> Result<()> {
    info!("Analyzing {:?}", csv);
    let mut reader = read_records(&csv).context("Failed to open source file")?;
    let graph = try_build_graph(reader.by_ref()).context("Failed to read source file")?;

    print!("{}", AnalysisReport::new(reader.path(), reader.stats(), &graph).format());
    Ok(())
}

fn export_graph(csv: PathBuf, output: PathBuf, pretty: bool) -> Result<()> {
    info!("Loading {:?}", csv);
    let graph = graph_from_file(&csv).context("Failed to build graph")?;

    graph.write_json(&output, pretty)?;
    info!(
        "Wrote {} nodes and {} edges to {:?}",
        graph.nodes.len(),
        graph.edges.len(),
        output
    );
    Ok(())
}
