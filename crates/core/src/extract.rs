//! Lexical symbol-reference extraction from service source files.
//!
//! The extractor works on raw text with no scope or type awareness: it
//! scans import-like lines for names matching the repository, service, and
//! facade conventions. That is deliberately all it does — a referenced name
//! is a referenced name, whether it appears in a type position, a call, or
//! a re-export.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

static REPOSITORY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("[a-zA-Z]+Repository").expect("valid repository pattern"));
static SERVICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("[a-zA-Z]+Service").expect("valid service pattern"));
static FACADE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("[a-zA-Z]+Facade").expect("valid facade pattern"));

/// The lexical categories of referenced symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Repository,
    Service,
    Facade,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 3] = [
        ReferenceKind::Repository,
        ReferenceKind::Service,
        ReferenceKind::Facade,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            ReferenceKind::Repository => &REPOSITORY_PATTERN,
            ReferenceKind::Service => &SERVICE_PATTERN,
            ReferenceKind::Facade => &FACADE_PATTERN,
        }
    }
}

/// Derive a service name from its file path: the base name before the
/// first `.`, with dashes flattened to underscores (dot node identifiers
/// cannot carry dashes).
///
/// `candidate-scoring.Service.ts` → `candidate_scoring`.
pub fn service_name_from_path(path: &Path) -> Option<String> {
    let base = path.file_name()?.to_str()?;
    let stem = base.split('.').next().unwrap_or(base);
    if stem.is_empty() {
        return None;
    }
    Some(stem.replace('-', "_"))
}

/// Uppercase the first character of a reference so that casing variants of
/// the same symbol collapse into one name. Wrapper helpers such as
/// `wrapMigratedService` keep their exact spelling: the classifier tests
/// them for literal membership.
fn normalize_reference(name: &str) -> String {
    if name.contains("wrap") {
        return name.to_string();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Extract the set of distinct symbol references from a service file's
/// text.
///
/// Only lines containing `import` are scanned. Matches across all
/// [`ReferenceKind`] patterns are unioned, normalized, and deduplicated;
/// the service's own name and its `Migrated<Name>` twin are dropped. The
/// result is sorted lexicographically so downstream maps are deterministic.
pub fn extract_references(service_name: &str, content: &str) -> Vec<String> {
    let mut references = BTreeSet::new();

    for line in content.lines().filter(|line| line.contains("import")) {
        for kind in ReferenceKind::ALL {
            for found in kind.pattern().find_iter(line) {
                references.insert(normalize_reference(found.as_str()));
            }
        }
    }

    references.remove(service_name);
    references.remove(&format!("Migrated{service_name}"));

    references.into_iter().collect()
}
