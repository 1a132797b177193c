use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::catalog::store::ReferenceInventory;
use crate::cli::OutputFormat;
use crate::core::activity::ReferenceActivity;

#[derive(Args)]
pub struct IndexArgs {
    /// Reference inventory activities (JSON or TSV, optionally .gz)
    #[arg(short, long, required = true)]
    pub reference: PathBuf,

    /// Only list canonical names shared by more than one activity
    #[arg(long)]
    pub homonyms_only: bool,
}

/// Execute index subcommand
///
/// # Errors
///
/// Returns an error if the inventory cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: IndexArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let inventory = ReferenceInventory::load_from_file(&args.reference)
        .with_context(|| format!("reading reference inventory from {}", args.reference.display()))?;
    let index = inventory.index();

    let buckets = if args.homonyms_only {
        index.homonyms()
    } else {
        index.buckets()
    };

    match format {
        OutputFormat::Text => {
            println!(
                "{} activities under {} canonical names ({} locations)",
                index.activity_count(),
                index.len(),
                inventory.locations().len()
            );
            println!("{}", "=".repeat(60));
            for (key, bucket) in &buckets {
                println!("{key} ({})", bucket.len());
                if verbose || args.homonyms_only {
                    for activity in bucket.iter() {
                        println!("    {activity}");
                    }
                }
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = buckets
                .iter()
                .map(|(key, bucket)| {
                    serde_json::json!({
                        "key": key,
                        "activities": bucket.iter().collect::<Vec<&ReferenceActivity>>(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("key\tactivities");
            for (key, bucket) in &buckets {
                println!("{key}\t{}", bucket.len());
            }
        }
    }

    Ok(())
}
