//! Graph data structures for migration-status tracking.
//!
//! The graph is a plain value: a name-keyed node table plus a directed edge
//! list. Edge endpoints are names, not indices, and an endpoint is allowed
//! to have no node entry — a service that matches no classification rule
//! still contributes its edges.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Migration status assigned to a node by the classifier.
///
/// Closed set: every renderer matches exhaustively, so adding a category is
/// a compile-time-checked change everywhere it is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationCategory {
    /// Wrapped by a migration shim.
    Migrated,
    /// Wrapped by the fully-migrated shim.
    FullyMigrated,
    /// Migrated, and one dependency away from fully migrated.
    FullyMigratedCandidate,
    /// Nothing blocks migration; nothing to migrate first.
    NoDependencies,
    /// Owns its single repository exclusively — safe to migrate next.
    MigrationCandidate,
    /// Repository referenced by more than one service.
    SharedRepository,
    /// Service seen only through a repository's inverse entry, never
    /// classified in its own right.
    NeedsAttention,
    /// A migrated service depends on this non-migrated service.
    Anomaly,
    /// No rule applied.
    Unclassified,
}

impl MigrationCategory {
    pub const ALL: [MigrationCategory; 9] = [
        MigrationCategory::Migrated,
        MigrationCategory::FullyMigrated,
        MigrationCategory::FullyMigratedCandidate,
        MigrationCategory::NoDependencies,
        MigrationCategory::MigrationCandidate,
        MigrationCategory::SharedRepository,
        MigrationCategory::NeedsAttention,
        MigrationCategory::Anomaly,
        MigrationCategory::Unclassified,
    ];

    /// Fixed category → fill-color table shared by every renderer.
    pub fn fill_color(self) -> &'static str {
        match self {
            MigrationCategory::Migrated => "green",
            MigrationCategory::FullyMigrated => "darkgreen",
            MigrationCategory::FullyMigratedCandidate => "palegreen",
            MigrationCategory::NoDependencies => "yellow",
            MigrationCategory::MigrationCandidate => "orange",
            MigrationCategory::SharedRepository => "purple",
            MigrationCategory::NeedsAttention => "cyan",
            MigrationCategory::Anomaly => "red",
            MigrationCategory::Unclassified => "white",
        }
    }

    /// Label used for the legend swatch of this category.
    pub fn legend_label(self) -> &'static str {
        match self {
            MigrationCategory::Migrated => "migrated",
            MigrationCategory::FullyMigrated => "fully_migrated",
            MigrationCategory::FullyMigratedCandidate => "fully_migrated_candidate",
            MigrationCategory::NoDependencies => "no_dependencies",
            MigrationCategory::MigrationCandidate => "candidate_to_migrate",
            MigrationCategory::SharedRepository => "repo_multi_owners",
            MigrationCategory::NeedsAttention => "needs_attention",
            MigrationCategory::Anomaly => "migration_anomaly",
            MigrationCategory::Unclassified => "unclassified",
        }
    }
}

/// Structural kind of a node, derived from its name once at creation time
/// and carried thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Service,
    Repository,
}

impl NodeKind {
    pub fn of(name: &str) -> Self {
        if name.contains("Repository") {
            NodeKind::Repository
        } else {
            NodeKind::Service
        }
    }
}

/// A classified node in the migration graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,
    pub category: MigrationCategory,
    pub kind: NodeKind,
    pub covered_by_story: bool,
}

/// A directed reference from a service to a symbol it imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// The assembled migration graph: the sole artifact handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: BTreeMap<String, Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Pure composition of classifier output and the edge list.
    pub fn assemble(nodes: BTreeMap<String, Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }
}
