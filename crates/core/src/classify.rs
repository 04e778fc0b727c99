//! Node classification: the migration-status rules.
//!
//! A pure pass over the dependency map and the repository inverse index.
//! Rules are mutually exclusive and ordered; the first match wins for the
//! service under inspection and may also classify other nodes as a side
//! effect. Node assignment is first-writer-wins: once a name has a
//! category, later attempts are no-ops.

use std::collections::BTreeMap;

use crate::config::{AnalyzerConfig, CoverageSet, IgnoreSet};
use crate::depmap::{DependencyMap, RepositoryMap};
use crate::graph::{Edge, MigrationCategory, Node, NodeKind};

/// Sentinel dependency marking a service as wrapped by the migration shim.
pub const WRAP_MIGRATED_SERVICE: &str = "wrapMigratedService";
/// Sentinel marking a fully migrated service.
pub const WRAP_FULLY_MIGRATED_SERVICE: &str = "wrapFullyMigratedService";
/// Sentinel marking a cloud-agnostic (migrated) service.
pub const WRAP_CLOUD_AGNOSTIC_SERVICE: &str = "wrapCloudAgnosticService";

/// The marker-derived status of a dependency list, if any marker is
/// present. `wrapFullyMigratedService` outranks the other two.
fn marker_category(dependencies: &[String]) -> Option<MigrationCategory> {
    let mut migrated = false;
    for dependency in dependencies {
        match dependency.as_str() {
            WRAP_FULLY_MIGRATED_SERVICE => return Some(MigrationCategory::FullyMigrated),
            WRAP_MIGRATED_SERVICE | WRAP_CLOUD_AGNOSTIC_SERVICE => migrated = true,
            _ => {}
        }
    }
    migrated.then_some(MigrationCategory::Migrated)
}

fn dependencies_of<'a>(dependencies: &'a DependencyMap, name: &str) -> &'a [String] {
    // Absent entry and empty entry are the same thing.
    dependencies.get(name).map(Vec::as_slice).unwrap_or(&[])
}

/// First-writer-wins node table. The coverage flag is stamped at creation
/// and, like the category, never revisited.
struct NodeTable<'a> {
    nodes: BTreeMap<String, Node>,
    coverage: &'a CoverageSet,
}

impl<'a> NodeTable<'a> {
    fn new(coverage: &'a CoverageSet) -> Self {
        Self {
            nodes: BTreeMap::new(),
            coverage,
        }
    }

    fn insert(&mut self, name: &str, category: MigrationCategory) {
        if self.nodes.contains_key(name) {
            return;
        }
        self.nodes.insert(
            name.to_string(),
            Node {
                name: name.to_string(),
                category,
                kind: NodeKind::of(name),
                covered_by_story: self.coverage.is_covered(name),
            },
        );
    }

    fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }
}

/// The exclusive single-repository test: the non-ignored dependencies
/// reduce to exactly one repository.
fn sole_repository_dependency<'a>(relevant: &[&'a String]) -> Option<&'a String> {
    match relevant {
        [only] if NodeKind::of(only) == NodeKind::Repository => Some(*only),
        _ => None,
    }
}

/// Whether the repository's non-ignored inverse entry is exactly this one
/// service — a strict 1:1 ownership relationship.
fn owned_exclusively_by(
    repositories: &RepositoryMap,
    repository: &str,
    service: &str,
    ignore: &IgnoreSet,
) -> bool {
    let owners: Vec<&String> = repositories
        .get(repository)
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
        .filter(|owner| !ignore.is_ignored(owner))
        .collect();
    matches!(owners.as_slice(), [only] if *only == service)
}

/// The fully-migrated-candidate test: migrated but not fully, with at
/// least one fully migrated dependency. Evaluated after the migrated rule,
/// which already captures every marker-bearing service, so in practice it
/// cannot fire; the published graph has never shown this category and
/// changing that is a product decision, not a code fix.
fn is_fully_migrated_candidate(dependencies: &DependencyMap, service_deps: &[String]) -> bool {
    marker_category(service_deps) == Some(MigrationCategory::Migrated)
        && service_deps
            .iter()
            .any(|dependency| {
                marker_category(dependencies_of(dependencies, dependency))
                    == Some(MigrationCategory::FullyMigrated)
            })
}

/// Classify every node reachable from the two maps.
///
/// Service pass first (dependency-map order), then the repository pass
/// (repository-map order). Both maps are ordered, so for fixed inputs the
/// output is identical on every run.
pub fn classify(
    dependencies: &DependencyMap,
    repositories: &RepositoryMap,
    config: &AnalyzerConfig,
) -> BTreeMap<String, Node> {
    let ignore = &config.ignore;
    let mut table = NodeTable::new(&config.coverage);

    for (service, service_deps) in dependencies {
        if ignore.is_ignored(service) {
            continue;
        }
        tracing::debug!(service = %service, dependencies = ?service_deps, "classifying");

        let relevant: Vec<&String> = service_deps
            .iter()
            .filter(|dependency| !ignore.is_ignored(dependency))
            .collect();

        // Rule 1: already migrated. Dependencies inherit migrated status;
        // a service-kind dependency without its own marker is an anomaly.
        if let Some(category) = marker_category(service_deps) {
            table.insert(service, category);
            for dependency in &relevant {
                match NodeKind::of(dependency) {
                    NodeKind::Repository => table.insert(dependency, MigrationCategory::Migrated),
                    NodeKind::Service => {
                        match marker_category(dependencies_of(dependencies, dependency)) {
                            Some(dependency_category) => table.insert(dependency, dependency_category),
                            None => {
                                tracing::warn!(
                                    service = %service,
                                    dependency = %dependency,
                                    "migrated service depends on a non-migrated service"
                                );
                                table.insert(dependency, MigrationCategory::Anomaly);
                            }
                        }
                    }
                }
            }
            continue;
        }

        // Rule 2: one step away from fully migrated.
        if is_fully_migrated_candidate(dependencies, service_deps) {
            table.insert(service, MigrationCategory::FullyMigratedCandidate);
            continue;
        }

        // Rule 3: nothing blocks migration.
        if service_deps.is_empty() {
            table.insert(service, MigrationCategory::NoDependencies);
            continue;
        }

        // Rule 4: exclusive ownership of a single repository.
        if let Some(repository) = sole_repository_dependency(&relevant) {
            if owned_exclusively_by(repositories, repository, service, ignore) {
                table.insert(service, MigrationCategory::MigrationCandidate);
                for dependency in &relevant {
                    table.insert(dependency, MigrationCategory::MigrationCandidate);
                }
            }
        }
    }

    for (repository, owners) in repositories {
        if ignore.is_ignored(repository) {
            continue;
        }
        let owning: Vec<&String> = owners
            .iter()
            .filter(|owner| !ignore.is_ignored(owner))
            .collect();

        if owning.len() > 1 {
            // Rule 6: shared repository. First-writer-wins still holds for
            // repositories already colored by rules 1 or 4.
            table.insert(repository, MigrationCategory::SharedRepository);
        } else {
            // Rule 7: a sole owner that never became a node was referenced
            // only through this repository.
            for owner in owning {
                if !table.contains(owner) {
                    table.insert(owner, MigrationCategory::NeedsAttention);
                }
            }
        }
        table.insert(repository, MigrationCategory::Unclassified);
    }

    table.nodes
}

/// One edge per (service, dependency) pair, skipping self-references and
/// ignored names on either end. Emitted independently of classification.
pub fn collect_edges(dependencies: &DependencyMap, ignore: &IgnoreSet) -> Vec<Edge> {
    let mut edges = Vec::new();

    for (service, service_deps) in dependencies {
        if ignore.is_ignored(service) {
            continue;
        }
        for dependency in service_deps {
            if dependency == service || ignore.is_ignored(dependency) {
                continue;
            }
            edges.push(Edge {
                from: service.clone(),
                to: dependency.clone(),
            });
        }
    }

    edges
}
