//! Analyzer configuration: ignore and coverage sets, duplicate handling.
//!
//! Both sets are plain data passed explicitly into the map builder and
//! classifier, so tests can run with custom lists instead of the
//! production defaults.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Names matching this pattern are compatibility shims around already
/// migrated services and must never appear in the graph.
static MIGRATED_WRAPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new("migrated.*Service.*").expect("valid wrapper pattern"));

/// Symbol names excluded from the graph entirely: no nodes, no edges.
///
/// Contains the migration marker sentinels (tested for membership by the
/// classifier, never rendered) plus infrastructure helpers that show up in
/// import lines without being services or repositories.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    names: BTreeSet<String>,
}

impl IgnoreSet {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    /// An empty set still excludes `migrated.*Service.*` wrapper names.
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.names.contains(name) || MIGRATED_WRAPPER.is_match(name)
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new(
            [
                "wrapMigratedService",
                "wrapFullyMigratedService",
                "wrapCloudAgnosticService",
                "AbstractRepository",
                "wrapService",
                "ensure_indexes",
            ]
            .map(String::from),
        )
    }
}

/// Symbol names already covered by an existing test or story.
///
/// Display-only: a covered node renders with a dashed border, nothing in
/// classification reads this set.
#[derive(Debug, Clone)]
pub struct CoverageSet {
    names: BTreeSet<String>,
}

impl CoverageSet {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    pub fn is_covered(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl Default for CoverageSet {
    fn default() -> Self {
        Self::new(
            [
                "RequestReportingRepository",
                "MessageFeedRepository",
                "CandidateProfileSharesService",
                "CandidateScoringService",
                "CVParsingService",
                "CandidateBlockedRepository",
                "CandidateDmsDocumentsService",
                "DeletedCandidateRepository",
                "RequestCampaignStateRepository",
                "OrganizationDataRepository",
                "AcceptedQuoteRepository",
                "OrganizationPoolRepository",
                "OrganizationPricesConfigRepository",
                "PasswordRepository",
                "RequestCandidatesPresenceRepository",
                "SalesDashboardTodosRepository",
                "UserActivityRepository",
                "WatchlistRepository",
                "QuoteRepository",
                "SalesforceAPIService",
                "GeolocationRepository",
                "FavoritesRepository",
                "OrganizationCandidateVisibilityRepository",
                "ApiTokenRepository",
                "RequestTemplatesRepository",
                "CandidateParsedCvsRepository",
                "ExternalRequestRepository",
                "PermanentPlacementRequestService",
                "PermanentPlacementRequestRepository",
            ]
            .map(String::from),
        )
    }
}

/// What to do when two discovered files yield the same service name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Abort the run. Overwriting silently would merge two unrelated
    /// services into one node.
    #[default]
    Fail,
    /// Re-key the later file as `<parent-dir>_<name>`.
    PrefixParentDir,
}

/// Configuration handed to the map builder and classifier.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    pub ignore: IgnoreSet,
    pub coverage: CoverageSet,
    pub duplicate_policy: DuplicatePolicy,
}
