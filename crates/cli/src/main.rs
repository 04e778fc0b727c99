use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as Process;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use migration_map_core::{render, AnalyzerConfig, DuplicatePolicy};

/// migration-map - Map service and repository migration status
#[derive(Parser)]
#[command(name = "migration-map")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Analyze service and repository dependencies and render a migration graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze service directories and render the migration graph
    Analyze {
        /// Directories containing service files (*Service*.ts, *Facade*.ts)
        #[arg(required = true)]
        service_dirs: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "graphviz")]
        format: Format,

        /// Output file stem; writes <stem>.dot, <stem>.json, <stem>.png
        #[arg(long, default_value = "services")]
        output: PathBuf,

        /// Key duplicate service names by parent directory instead of
        /// aborting
        #[arg(long)]
        merge_duplicates: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Write dot text and rasterize it with the external `dot` tool
    Graphviz,
    /// Write dot text only
    Dot,
    /// Write the graph as a JSON document
    Json,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Analyze {
            service_dirs,
            format,
            output,
            merge_duplicates,
        } => run_analyze(&service_dirs, format, &output, merge_duplicates),
    }
}

fn run_analyze(
    service_dirs: &[PathBuf],
    format: Format,
    output: &Path,
    merge_duplicates: bool,
) -> anyhow::Result<()> {
    let mut config = AnalyzerConfig::default();
    if merge_duplicates {
        config.duplicate_policy = DuplicatePolicy::PrefixParentDir;
    }

    let graph = migration_map_core::analyze(service_dirs, &config)?;
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph assembled"
    );

    match format {
        Format::Json => {
            let path = output.with_extension("json");
            let document = render::json::to_string(&graph)?;
            fs::write(&path, document)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "graph rendered");
        }
        Format::Dot => {
            write_dot(&graph, output)?;
        }
        Format::Graphviz => {
            let dot_path = write_dot(&graph, output)?;
            let png_path = output.with_extension("png");
            // The layout tool is a post-step on the finished artifact; a
            // failure here must not disturb the .dot file already written.
            if let Err(err) = rasterize(&dot_path, &png_path) {
                tracing::warn!(error = %format!("{err:#}"), "graph layout failed, dot file kept");
            } else {
                tracing::info!(path = %png_path.display(), "graph rasterized");
            }
        }
    }

    Ok(())
}

fn write_dot(graph: &migration_map_core::Graph, output: &Path) -> anyhow::Result<PathBuf> {
    let path = output.with_extension("dot");
    fs::write(&path, render::graphviz::render(graph))
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "graph rendered");
    Ok(path)
}

fn rasterize(dot_path: &Path, png_path: &Path) -> anyhow::Result<()> {
    let status = Process::new("dot")
        .arg("-Tpng")
        .arg("-o")
        .arg(png_path)
        .arg(dot_path)
        .status()
        .context("running dot; is graphviz installed?")?;
    anyhow::ensure!(status.success(), "dot exited with {status}");
    Ok(())
}
