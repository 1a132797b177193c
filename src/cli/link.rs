use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::catalog::store::{ReferenceInventory, SourceInventory};
use crate::cli::OutputFormat;
use crate::core::types::Severity;
use crate::matching::engine::{CandidateDetail, MatchReport, MatchingConfig, MatchingEngine};
use crate::matching::selector::LocationEquivalence;

#[derive(Args)]
pub struct LinkArgs {
    /// Unlinked exchanges (JSON or TSV, optionally .gz)
    #[arg(short, long, required = true)]
    pub exchanges: PathBuf,

    /// Reference inventory activities (JSON or TSV, optionally .gz)
    #[arg(short, long, required = true)]
    pub reference: PathBuf,

    /// Write the matches as a migration document to this file
    #[arg(short = 'o', long)]
    pub migration_out: Option<PathBuf>,

    /// Name recorded in the migration document
    #[arg(long, default_value = "relink-unlinked-exchanges")]
    pub migration_name: String,

    /// Location treated as a catch-all geography (repeatable; default GLO and RoW)
    #[arg(long = "global-location", value_name = "LOC")]
    pub global_locations: Vec<String>,

    /// Keep the candidate bucket of every match in the report
    #[arg(long)]
    pub with_candidates: bool,
}

/// Execute link subcommand
///
/// # Errors
///
/// Returns an error if either inventory cannot be loaded or the migration
/// cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: LinkArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let source = SourceInventory::load_from_file(&args.exchanges)
        .with_context(|| format!("reading exchanges from {}", args.exchanges.display()))?;
    let reference = ReferenceInventory::load_from_file(&args.reference)
        .with_context(|| format!("reading reference inventory from {}", args.reference.display()))?;

    if verbose {
        eprintln!(
            "Loaded {} exchanges ({} technosphere) and {} reference activities",
            source.len(),
            source.technosphere_count(),
            reference.len()
        );
    }

    if reference.is_empty() {
        eprintln!("Warning: Reference inventory is empty, nothing can be matched.");
    }

    let index = reference.index();
    if verbose {
        eprintln!(
            "Indexed {} activities under {} canonical names",
            index.activity_count(),
            index.len()
        );
    }

    let locations = if args.global_locations.is_empty() {
        LocationEquivalence::default()
    } else {
        LocationEquivalence::new(args.global_locations.iter().cloned())
    };
    let config = MatchingConfig {
        locations,
        candidate_detail: if args.with_candidates {
            CandidateDetail::WithCandidates
        } else {
            CandidateDetail::MatchOnly
        },
    };

    let engine = MatchingEngine::with_config(&index, config);
    let report = engine.match_all(&source.exchanges);

    if let Some(path) = &args.migration_out {
        let description = format!(
            "Relinking of {} exchanges of the form 'reference product {{location}} | activity | code' from {}",
            report.matches.len(),
            args.exchanges.display()
        );
        report
            .to_migration(&args.migration_name, description)
            .write_to(path)
            .with_context(|| format!("writing migration to {}", path.display()))?;

        if verbose {
            eprintln!("Wrote {} migration entries to {}", report.matches.len(), path.display());
        }
    }

    match format {
        OutputFormat::Text => print_text_report(&report, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn print_text_report(report: &MatchReport, verbose: bool) {
    let stats = &report.stats;

    println!("Matching Results");
    println!("{}", "=".repeat(60));
    println!("  Exchanges:       {}", stats.total);
    println!("  Matched:         {}", stats.matched);
    println!("  Irregular:       {}", stats.irregular);
    println!("  Skipped:         {}", stats.skipped);
    println!("  Not found:       {}", stats.not_found);
    println!("  Ambiguous:       {}", stats.ambiguous);
    println!("  No bucket:       {}", stats.no_bucket);
    println!("  Unit mismatches: {}", stats.unit_mismatches);

    if !report.matches.is_empty() {
        println!("\nMatches:");
        for (source_name, entry) in &report.matches {
            println!(
                "  {} -> {} [{}] ({})",
                source_name, entry.matched.name, entry.matched.location, entry.matched.unit
            );
            if let Some(candidates) = report.candidates.get(source_name) {
                for candidate in candidates {
                    println!("      candidate: {candidate}");
                }
            }
        }
    }

    if !report.irregular.is_empty() {
        println!("\nIrregular names:");
        for name in &report.irregular {
            println!("  {name}");
        }
    }

    // Irregular names are already listed above
    let diagnostics: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| verbose || d.level >= Severity::Warning)
        .collect();
    if !diagnostics.is_empty() {
        println!("\nDiagnostics:");
        for diagnostic in diagnostics {
            println!("  {diagnostic}");
        }
    }
}

fn print_tsv_report(report: &MatchReport) {
    println!("source_name\tname\treference_product\tlocation\tunit");
    for (source_name, entry) in &report.matches {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            source_name,
            entry.matched.name,
            entry.matched.reference_product,
            entry.matched.location,
            entry.matched.unit
        );
    }
}
