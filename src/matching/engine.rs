use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

use crate::catalog::index::ReferenceIndex;
use crate::core::activity::ReferenceActivity;
use crate::core::exchange::ExchangeRecord;
use crate::core::types::ExchangeType;
use crate::matching::diagnosis::{CandidateSummary, Diagnostic, LookupSite};
use crate::matching::name::{parse_source_name, NameError};
use crate::matching::selector::{CandidateSelector, LocationEquivalence, Selection};
use crate::migration::{MigrationDocument, MigrationEntry};

/// How much candidate context to keep for successful matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateDetail {
    /// Keep only the chosen activity
    #[default]
    MatchOnly,
    /// Also keep the bucket each match was selected from
    WithCandidates,
}

/// Configuration for the matching engine
#[derive(Debug, Clone, Default)]
pub struct MatchingConfig {
    /// Locations treated as interchangeable catch-all geographies
    pub locations: LocationEquivalence,
    /// Candidate context retained in the report
    pub candidate_detail: CandidateDetail,
}

/// Terminal state of one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeOutcome {
    /// Not a technosphere exchange
    Skipped,
    /// Name does not follow the composite convention
    Irregular,
    /// Unique match found
    Matched,
    /// No bucket, no surviving candidate, or several surviving candidates
    Unmatched,
}

/// Counters accumulated over a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub total: usize,
    pub skipped: usize,
    pub irregular: usize,
    pub matched: usize,
    pub not_found: usize,
    pub ambiguous: usize,
    pub no_bucket: usize,
    pub unit_mismatches: usize,
}

impl MatchStats {
    /// Exchanges that were parsed but not matched
    #[must_use]
    pub fn unmatched(&self) -> usize {
        self.not_found + self.ambiguous + self.no_bucket
    }
}

/// Result of matching a batch of exchanges
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchReport {
    /// Raw source name -> migration entry, one per matched name
    pub matches: BTreeMap<String, MigrationEntry>,

    /// Names that do not follow the composite convention, first-seen order
    pub irregular: Vec<String>,

    /// Diagnostics in processing order
    pub diagnostics: Vec<Diagnostic>,

    /// Bucket each match was chosen from (only with `CandidateDetail::WithCandidates`)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub candidates: BTreeMap<String, Vec<CandidateSummary>>,

    pub stats: MatchStats,
}

impl MatchReport {
    /// Build a migration document from the matches
    #[must_use]
    pub fn to_migration(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> MigrationDocument {
        MigrationDocument::new(name, description, self.matches.values())
    }
}

/// The matching engine
pub struct MatchingEngine<'a> {
    index: &'a ReferenceIndex,
    selector: CandidateSelector,
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    pub fn new(index: &'a ReferenceIndex) -> Self {
        Self::with_config(index, MatchingConfig::default())
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(index: &'a ReferenceIndex, config: MatchingConfig) -> Self {
        Self {
            index,
            selector: CandidateSelector::new(config.locations.clone()),
            config,
        }
    }

    /// Match every exchange against the index
    ///
    /// Never fails: each exchange ends in one terminal state and problems
    /// are reported in the returned diagnostics.
    pub fn match_all<'e, I>(&self, exchanges: I) -> MatchReport
    where
        I: IntoIterator<Item = &'e ExchangeRecord>,
    {
        let mut report = MatchReport::default();
        let mut seen_irregular: HashSet<String> = HashSet::new();

        for exchange in exchanges {
            let outcome = self.process(exchange, &mut report);
            if outcome == ExchangeOutcome::Irregular && seen_irregular.insert(exchange.name.clone())
            {
                report.irregular.push(exchange.name.clone());
            }
        }

        info!(
            "Matched {} of {} exchanges ({} irregular, {} skipped, {} unmatched)",
            report.stats.matched,
            report.stats.total,
            report.stats.irregular,
            report.stats.skipped,
            report.stats.unmatched()
        );

        report
    }

    /// Drive one exchange to its terminal state, recording into `report`
    pub fn process(&self, exchange: &ExchangeRecord, report: &mut MatchReport) -> ExchangeOutcome {
        report.stats.total += 1;

        if !exchange.has_composite_name() {
            return Self::irregular(exchange, &NameError::NoSeparator, report);
        }

        if exchange.exchange_type != ExchangeType::Technosphere {
            debug!("Skipping {} exchange '{}'", exchange.exchange_type, exchange.name);
            report.stats.skipped += 1;
            return ExchangeOutcome::Skipped;
        }

        let parsed = match parse_source_name(&exchange.name) {
            Ok(parsed) => parsed,
            Err(reason) => return Self::irregular(exchange, &reason, report),
        };
        let location = parsed.location_code();

        let Some(hit) = self.index.lookup(&parsed) else {
            debug!("No bucket for '{}'", exchange.name);
            report.stats.no_bucket += 1;
            report
                .diagnostics
                .push(Diagnostic::no_bucket(exchange, &parsed, location));
            return ExchangeOutcome::Unmatched;
        };

        debug!(
            "'{}' hit bucket '{}' via {} ({} candidates)",
            exchange.name,
            hit.key,
            hit.kind,
            hit.candidates.len()
        );
        let site = LookupSite {
            kind: hit.kind,
            key: hit.key.as_str(),
        };

        match self
            .selector
            .select(hit.candidates, &exchange.unit, location, &parsed.ref_name)
        {
            Selection::Matched {
                activity,
                unit_mismatch,
            } => {
                if unit_mismatch {
                    report.stats.unit_mismatches += 1;
                    report.diagnostics.push(Diagnostic::unit_mismatch(
                        exchange, &parsed, location, site, activity,
                    ));
                }
                self.record_match(exchange, activity, hit.candidates, report);
                ExchangeOutcome::Matched
            }
            Selection::NoMatch { candidates } => {
                report.stats.not_found += 1;
                report.diagnostics.push(Diagnostic::not_found(
                    exchange,
                    &parsed,
                    location,
                    site,
                    &candidates,
                ));
                ExchangeOutcome::Unmatched
            }
            Selection::Ambiguous { candidates } => {
                report.stats.ambiguous += 1;
                report.diagnostics.push(Diagnostic::ambiguous(
                    exchange,
                    &parsed,
                    location,
                    site,
                    &candidates,
                ));
                ExchangeOutcome::Unmatched
            }
        }
    }

    fn record_match<'c, I>(
        &self,
        exchange: &ExchangeRecord,
        activity: &ReferenceActivity,
        bucket: I,
        report: &mut MatchReport,
    ) where
        I: IntoIterator<Item = &'c ReferenceActivity>,
    {
        debug!("'{}' -> '{}' ({})", exchange.name, activity.name, activity.location);
        report.stats.matched += 1;
        report.matches.insert(
            exchange.name.clone(),
            MigrationEntry::new(exchange.name.clone(), activity),
        );

        if self.config.candidate_detail == CandidateDetail::WithCandidates {
            report.candidates.insert(
                exchange.name.clone(),
                bucket.into_iter().map(CandidateSummary::from).collect(),
            );
        }
    }

    fn irregular(
        exchange: &ExchangeRecord,
        reason: &NameError,
        report: &mut MatchReport,
    ) -> ExchangeOutcome {
        debug!("Irregular name '{}': {reason}", exchange.name);
        report.stats.irregular += 1;
        report
            .diagnostics
            .push(Diagnostic::irregular(exchange, reason));
        ExchangeOutcome::Irregular
    }
}

/// Build a fresh index from `reference_inventory` and match `exchanges` against it
pub fn match_all(
    exchanges: &[ExchangeRecord],
    reference_inventory: &[ReferenceActivity],
) -> MatchReport {
    let index = ReferenceIndex::build(reference_inventory);
    MatchingEngine::new(&index).match_all(exchanges)
}
