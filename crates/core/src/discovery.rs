//! Service-file discovery with gitignore-aware filtering.
//!
//! Walks one or more service roots and returns the absolute paths of files
//! matching the service and facade naming conventions. Test and mock
//! files are excluded up front so the map builder only ever sees real
//! service sources.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Glob patterns for the file naming conventions that identify a service.
pub const SERVICE_FILE_PATTERNS: &[&str] = &["**/*Service*.ts", "**/*Facade*.ts"];

/// Discover service and facade files under `root`.
///
/// Returns sorted, deduplicated absolute paths. Files whose names contain
/// `.test.` or `.mock.` are excluded, as is anything matched by
/// `.gitignore`.
pub fn discover_service_files(root: &Path) -> Vec<PathBuf> {
    let mut files = discover_files(root, SERVICE_FILE_PATTERNS);
    files.retain(|path| !is_test_or_mock(path));
    files.sort();
    files.dedup();
    files
}

/// Discover files matching glob patterns under `root`, respecting
/// `.gitignore`. A missing root or an invalid pattern yields an empty
/// result rather than an error: discovery feeds a lexical scan, and "no
/// files" is always a valid answer.
pub fn discover_files(root: &Path, patterns: &[&str]) -> Vec<PathBuf> {
    let Ok(canonical_root) = root.canonicalize() else {
        return Vec::new();
    };
    let Ok(matcher) = build_glob_matcher(patterns) else {
        return Vec::new();
    };

    let mut files = Vec::new();
    for result in build_walker(&canonical_root) {
        match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    if let Ok(relative) = entry.path().strip_prefix(&canonical_root) {
                        if matcher.is_match(relative) {
                            files.push(entry.into_path());
                        }
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "error walking service directory");
            }
        }
    }

    files
}

fn is_test_or_mock(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.contains(".test.") || name.contains(".mock."))
}

fn build_glob_matcher(patterns: &[&str]) -> Result<globset::GlobSet, globset::Error> {
    use globset::GlobSetBuilder;

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(globset::Glob::new(pattern)?);
    }
    builder.build()
}

fn build_walker(root: &Path) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);
    builder
        .git_ignore(true)
        .git_exclude(true)
        .hidden(false)
        .parents(true);

    // Explicitly add .gitignore if it exists (needed for test environments
    // where WalkBuilder may not automatically discover it)
    let gitignore_path = root.join(".gitignore");
    if gitignore_path.exists() {
        let _ = builder.add_ignore(gitignore_path);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        File::create(path).unwrap();
    }

    #[test]
    fn test_discover_services_and_facades() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        touch(&root.join("CandidateService.ts"));
        touch(&root.join("BillingFacade.ts"));
        touch(&root.join("helpers.ts"));
        touch(&root.join("README.md"));

        let files = discover_service_files(root);

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.is_absolute()));
        assert!(files.iter().any(|p| p.ends_with("CandidateService.ts")));
        assert!(files.iter().any(|p| p.ends_with("BillingFacade.ts")));
    }

    #[test]
    fn test_test_and_mock_files_are_excluded() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        touch(&root.join("CandidateService.ts"));
        touch(&root.join("CandidateService.test.ts"));
        touch(&root.join("CandidateService.mock.ts"));

        let files = discover_service_files(root);

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("CandidateService.ts"));
    }

    #[test]
    fn test_nested_directories_are_walked() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("billing/internal")).unwrap();
        touch(&root.join("billing/QuoteService.ts"));
        touch(&root.join("billing/internal/LedgerService.ts"));

        let files = discover_service_files(root);

        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_gitignore_is_respected() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        let mut gitignore = File::create(root.join(".gitignore")).unwrap();
        gitignore.write_all(b"dist/\n").unwrap();

        fs::create_dir_all(root.join("dist")).unwrap();
        touch(&root.join("dist/BuiltService.ts"));
        touch(&root.join("RealService.ts"));

        let files = discover_service_files(root);

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("RealService.ts"));
    }

    #[test]
    fn test_results_are_sorted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        touch(&root.join("ZService.ts"));
        touch(&root.join("AService.ts"));

        let files = discover_service_files(root);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_missing_root_yields_empty() {
        let files = discover_service_files(Path::new("/nonexistent/service/root"));
        assert!(files.is_empty());
    }
}
