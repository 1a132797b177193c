//! Command-line interface for lci-relink.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **link**: Match unlinked exchanges against a reference inventory
//! - **inspect**: Show how composite names are parsed and canonicalized
//! - **index**: List the canonical-name buckets of a reference inventory
//!
//! ## Usage
//!
//! ```text
//! # Match and write a migration
//! lci-relink link -e unlinked.tsv -r reference.json.gz -o migration.json
//!
//! # JSON report for scripting
//! lci-relink --format json link -e unlinked.json -r reference.json
//!
//! # Check how a name will be looked up
//! lci-relink inspect "Steel, low-alloyed {GLO}| market for steel, low-alloyed | Cutoff, U"
//!
//! # Find homonyms in the reference inventory
//! lci-relink index -r reference.json --homonyms-only
//! ```

use clap::{Parser, Subcommand};

pub mod index;
pub mod inspect;
pub mod link;

#[derive(Parser)]
#[command(name = "lci-relink")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Relink unlinked inventory exchanges to reference activities")]
#[command(
    long_about = "lci-relink matches unlinked exchanges exported from one life-cycle inventory against the activities of a reference inventory.\n\nNames of the form `ReferenceProduct {Location}| Qualifier | Code` are parsed, canonicalized and looked up by name; a match is accepted only when exactly one candidate has a compatible location and the same reference product. The result can be written as a migration keyed on exchange name."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match unlinked exchanges against a reference inventory
    Link(link::LinkArgs),

    /// Show parse results and lookup keys for composite names
    Inspect(inspect::InspectArgs),

    /// List canonical-name buckets of a reference inventory
    Index(index::IndexArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
