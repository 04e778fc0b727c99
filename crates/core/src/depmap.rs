//! Dependency map construction and the derived repository inverse index.
//!
//! `BTreeMap` keys give the classifier the deterministic iteration order it
//! needs: the same set of input files must produce byte-identical graphs on
//! every run.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{AnalyzerConfig, DuplicatePolicy};
use crate::error::{AnalyzeError, Result};
use crate::extract;
use crate::graph::NodeKind;

/// Service name → sorted, deduplicated list of referenced symbols.
pub type DependencyMap = BTreeMap<String, Vec<String>>;

/// Repository name → list of services referencing it. Derived from the
/// dependency map, never built independently.
pub type RepositoryMap = BTreeMap<String, Vec<String>>;

/// Build the dependency map from discovered service files.
///
/// Each file contributes one entry keyed by its derived service name. Two
/// files yielding the same name is a fatal condition under the default
/// [`DuplicatePolicy::Fail`]; [`DuplicatePolicy::PrefixParentDir`] instead
/// re-keys the later file with its parent directory name.
pub fn build_dependency_map(files: &[PathBuf], config: &AnalyzerConfig) -> Result<DependencyMap> {
    let mut map = DependencyMap::new();

    for file in files {
        let Some(mut name) = extract::service_name_from_path(file) else {
            continue;
        };
        if map.contains_key(&name) {
            match config.duplicate_policy {
                DuplicatePolicy::Fail => {
                    return Err(AnalyzeError::DuplicateService {
                        name,
                        path: file.clone(),
                    });
                }
                DuplicatePolicy::PrefixParentDir => {
                    let rekeyed = prefix_parent_dir(file, &name);
                    tracing::warn!(
                        service = %name,
                        rekeyed = %rekeyed,
                        file = %file.display(),
                        "duplicate service name, keying by parent directory"
                    );
                    name = rekeyed;
                    if map.contains_key(&name) {
                        return Err(AnalyzeError::DuplicateService {
                            name,
                            path: file.clone(),
                        });
                    }
                }
            }
        }

        let content = fs::read_to_string(file)?;
        let references = extract::extract_references(&name, &content);
        map.insert(name, references);
    }

    tracing::debug!(?map, "dependency map");
    Ok(map)
}

/// Derive the repository inverse index: for every repository name appearing
/// in a dependency list, the services that reference it.
pub fn invert_dependencies(dependencies: &DependencyMap) -> RepositoryMap {
    let mut map = RepositoryMap::new();

    for (service, references) in dependencies {
        for reference in references {
            if NodeKind::of(reference) == NodeKind::Repository {
                map.entry(reference.clone())
                    .or_default()
                    .push(service.clone());
            }
        }
    }

    tracing::debug!(?map, "repository map");
    map
}

fn prefix_parent_dir(file: &Path, name: &str) -> String {
    let parent = file
        .parent()
        .and_then(|dir| dir.file_name())
        .and_then(|dir| dir.to_str())
        .unwrap_or("dup");
    format!("{}_{name}", parent.replace('-', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn write_service(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_build_map_from_files() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            write_service(
                temp.path(),
                "AlphaService.ts",
                "import { FooRepository } from './FooRepository';\n",
            ),
            write_service(temp.path(), "BetaService.ts", "// no imports\n"),
        ];

        let map = build_dependency_map(&files, &AnalyzerConfig::default()).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map["AlphaService"], vec!["FooRepository"]);
        assert!(map["BetaService"].is_empty());
    }

    #[test]
    fn test_duplicate_name_is_fatal_by_default() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a")).unwrap();
        fs::create_dir_all(temp.path().join("b")).unwrap();
        let files = vec![
            write_service(&temp.path().join("a"), "FooService.ts", ""),
            write_service(&temp.path().join("b"), "FooService.ts", ""),
        ];

        let err = build_dependency_map(&files, &AnalyzerConfig::default()).unwrap_err();
        match err {
            AnalyzeError::DuplicateService { name, .. } => assert_eq!(name, "FooService"),
            other => panic!("expected DuplicateService, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_name_rekeyed_by_parent_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("billing")).unwrap();
        fs::create_dir_all(temp.path().join("sales-team")).unwrap();
        let files = vec![
            write_service(&temp.path().join("billing"), "FooService.ts", ""),
            write_service(&temp.path().join("sales-team"), "FooService.ts", ""),
        ];

        let config = AnalyzerConfig {
            duplicate_policy: DuplicatePolicy::PrefixParentDir,
            ..AnalyzerConfig::default()
        };
        let map = build_dependency_map(&files, &config).unwrap();

        assert_eq!(map.len(), 2);
        assert!(map.contains_key("FooService"));
        assert!(map.contains_key("sales_team_FooService"));
    }

    #[test]
    fn test_invert_groups_services_by_repository() {
        let mut dependencies = DependencyMap::new();
        dependencies.insert(
            "AlphaService".to_string(),
            vec!["FooRepository".to_string(), "BarService".to_string()],
        );
        dependencies.insert(
            "BetaService".to_string(),
            vec!["FooRepository".to_string(), "BazRepository".to_string()],
        );

        let repositories = invert_dependencies(&dependencies);

        assert_eq!(
            repositories["FooRepository"],
            vec!["AlphaService", "BetaService"]
        );
        assert_eq!(repositories["BazRepository"], vec!["BetaService"]);
        // Service references never become repository entries
        assert!(!repositories.contains_key("BarService"));
    }

    #[test]
    fn test_inverse_index_matches_dependency_map() {
        let mut dependencies = DependencyMap::new();
        dependencies.insert("A".to_string(), vec!["XRepository".to_string()]);
        dependencies.insert(
            "B".to_string(),
            vec!["XRepository".to_string(), "YRepository".to_string()],
        );
        dependencies.insert("C".to_string(), vec![]);

        let repositories = invert_dependencies(&dependencies);

        for (repository, owners) in &repositories {
            for owner in owners {
                assert!(dependencies[owner].contains(repository));
            }
        }
        for (service, references) in &dependencies {
            for reference in references.iter().filter(|r| r.contains("Repository")) {
                assert!(repositories[reference].contains(service));
            }
        }
    }

    #[test]
    fn test_empty_file_list_yields_empty_map() {
        let map = build_dependency_map(&[], &AnalyzerConfig::default()).unwrap();
        assert!(map.is_empty());
    }
}
