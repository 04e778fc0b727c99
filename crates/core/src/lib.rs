//! Migration-map core library.
//!
//! Infers a migration-status dependency graph for a codebase's services
//! and repositories from lexical scans of their source files, classifies
//! every node with a fixed rule set, and renders the result as dot text or
//! structured JSON.
//!
//! Pipeline: file discovery → reference extraction → dependency map →
//! repository inverse index → classification → graph assembly → rendering.
//! Single-threaded and sequential; the repository map is fully derived
//! before classification starts because the ownership rules inspect it.

pub mod classify;
pub mod config;
pub mod depmap;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod graph;
pub mod render;

// Re-export commonly used types
pub use config::{AnalyzerConfig, CoverageSet, DuplicatePolicy, IgnoreSet};
pub use error::{AnalyzeError, Result};
pub use graph::{Edge, Graph, MigrationCategory, Node, NodeKind};

use std::path::PathBuf;

/// Run the whole analysis over one or more service root directories.
///
/// # Example
/// ```no_run
/// use migration_map_core::{analyze, AnalyzerConfig};
///
/// let graph = analyze(
///     &[std::path::PathBuf::from("backend/services")],
///     &AnalyzerConfig::default(),
/// ).unwrap();
/// println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
/// ```
pub fn analyze(roots: &[PathBuf], config: &AnalyzerConfig) -> Result<Graph> {
    let mut files = Vec::new();
    for root in roots {
        files.extend(discovery::discover_service_files(root));
    }
    files.sort();
    files.dedup();
    tracing::info!(files = files.len(), "discovered service files");

    let dependencies = depmap::build_dependency_map(&files, config)?;
    let repositories = depmap::invert_dependencies(&dependencies);

    let nodes = classify::classify(&dependencies, &repositories, config);
    let edges = classify::collect_edges(&dependencies, &config.ignore);

    Ok(Graph::assemble(nodes, edges))
}
