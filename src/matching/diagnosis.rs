use serde::Serialize;

use crate::core::activity::ReferenceActivity;
use crate::core::exchange::ExchangeRecord;
use crate::core::types::Severity;
use crate::matching::name::{LookupKeyKind, NameError, ParsedName};

/// What went wrong (or needs review) for one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Name does not follow the composite convention
    Irregular,
    /// Unique match whose unit differs from the exchange unit
    UnitMismatch,
    /// A bucket was found but no candidate survived the filters
    NotFound,
    /// A bucket was found and several candidates survived the filters
    Ambiguous,
    /// None of the lookup keys found a bucket
    NoBucket,
}

/// One candidate as shown to a reviewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSummary {
    pub name: String,
    pub unit: String,
    pub location: String,
    pub reference_product: String,
    pub canonical_product: String,
}

impl From<&ReferenceActivity> for CandidateSummary {
    fn from(activity: &ReferenceActivity) -> Self {
        Self {
            name: activity.name.clone(),
            unit: activity.unit.clone(),
            location: activity.location.clone(),
            reference_product: activity.reference_product.clone(),
            canonical_product: activity.canonical_product().to_string(),
        }
    }
}

impl std::fmt::Display for CandidateSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "name: '{}', unit: {}, loc: {}, ref: '{}' ({})",
            self.name, self.unit, self.location, self.reference_product, self.canonical_product
        )
    }
}

/// Everything a reviewer needs to resolve a case by hand
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticContext {
    /// Raw exchange name
    pub source_name: String,

    /// Exchange unit
    pub unit: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Lookup key that found the bucket the candidates came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_kind: Option<LookupKeyKind>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<CandidateSummary>,
}

/// A structured diagnostic record produced while matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub context: DiagnosticContext,
}

/// Where the candidates under discussion were looked up
#[derive(Debug, Clone, Copy)]
pub struct LookupSite<'a> {
    pub kind: LookupKeyKind,
    pub key: &'a str,
}

fn parsed_context(
    exchange: &ExchangeRecord,
    parsed: &ParsedName,
    location: &str,
) -> DiagnosticContext {
    DiagnosticContext {
        source_name: exchange.name.clone(),
        unit: exchange.unit.clone(),
        ref_name: Some(parsed.ref_name.clone()),
        location: Some(location.to_string()),
        ..DiagnosticContext::default()
    }
}

fn search_description(exchange: &ExchangeRecord, parsed: &ParsedName, location: &str) -> String {
    format!(
        "source={}, ref_name={}, loc={}, unit={}",
        exchange.name,
        parsed.ref_name.trim(),
        location,
        exchange.unit
    )
}

impl Diagnostic {
    #[must_use]
    pub fn irregular(exchange: &ExchangeRecord, reason: &NameError) -> Self {
        Self {
            level: Severity::Info,
            kind: DiagnosticKind::Irregular,
            message: format!("'{}' does not follow the composite naming convention: {reason}", exchange.name),
            context: DiagnosticContext {
                source_name: exchange.name.clone(),
                unit: exchange.unit.clone(),
                ..DiagnosticContext::default()
            },
        }
    }

    #[must_use]
    pub fn unit_mismatch(
        exchange: &ExchangeRecord,
        parsed: &ParsedName,
        location: &str,
        site: LookupSite<'_>,
        activity: &ReferenceActivity,
    ) -> Self {
        let mut context = parsed_context(exchange, parsed, location);
        context.lookup_key = Some(site.key.to_string());
        context.lookup_kind = Some(site.kind);
        context.candidates = vec![CandidateSummary::from(activity)];

        Self {
            level: Severity::Warning,
            kind: DiagnosticKind::UnitMismatch,
            message: format!(
                "Mismatched unit for {}: {} != {}",
                parsed.ref_name.trim(),
                exchange.unit,
                activity.unit
            ),
            context,
        }
    }

    #[must_use]
    pub fn not_found(
        exchange: &ExchangeRecord,
        parsed: &ParsedName,
        location: &str,
        site: LookupSite<'_>,
        candidates: &[&ReferenceActivity],
    ) -> Self {
        Self::with_candidates(
            DiagnosticKind::NotFound,
            format!(
                "Not found ({}) among {} candidate(s) for key '{}'",
                search_description(exchange, parsed, location),
                candidates.len(),
                site.key
            ),
            exchange,
            parsed,
            location,
            site,
            candidates,
        )
    }

    #[must_use]
    pub fn ambiguous(
        exchange: &ExchangeRecord,
        parsed: &ParsedName,
        location: &str,
        site: LookupSite<'_>,
        candidates: &[&ReferenceActivity],
    ) -> Self {
        Self::with_candidates(
            DiagnosticKind::Ambiguous,
            format!(
                "Too many matches ({}) for ({})",
                candidates.len(),
                search_description(exchange, parsed, location)
            ),
            exchange,
            parsed,
            location,
            site,
            candidates,
        )
    }

    #[must_use]
    pub fn no_bucket(exchange: &ExchangeRecord, parsed: &ParsedName, location: &str) -> Self {
        Self {
            level: Severity::Warning,
            kind: DiagnosticKind::NoBucket,
            message: format!("No match found for '{}'", exchange.name),
            context: parsed_context(exchange, parsed, location),
        }
    }

    fn with_candidates(
        kind: DiagnosticKind,
        message: String,
        exchange: &ExchangeRecord,
        parsed: &ParsedName,
        location: &str,
        site: LookupSite<'_>,
        candidates: &[&ReferenceActivity],
    ) -> Self {
        let mut context = parsed_context(exchange, parsed, location);
        context.lookup_key = Some(site.key.to_string());
        context.lookup_kind = Some(site.kind);
        context.candidates = candidates.iter().map(|c| CandidateSummary::from(*c)).collect();

        Self {
            level: Severity::Warning,
            kind,
            message,
            context,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)?;
        for candidate in &self.context.candidates {
            write!(f, "\n    {candidate}")?;
        }
        Ok(())
    }
}
