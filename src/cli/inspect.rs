use clap::Args;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::matching::canonical::CanonicalKey;
use crate::matching::name::{parse_source_name, LookupKeyKind, ParsedName};

#[derive(Args)]
pub struct InspectArgs {
    /// Composite exchange names to inspect
    #[arg(required = true, num_args = 1..)]
    pub names: Vec<String>,
}

#[derive(Serialize)]
struct LookupKeyView {
    kind: LookupKeyKind,
    key: CanonicalKey,
}

#[derive(Serialize)]
struct NameView<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parsed: Option<ParsedName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    irregular: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    lookup_keys: Vec<LookupKeyView>,
}

impl<'a> NameView<'a> {
    fn new(name: &'a str) -> Self {
        match parse_source_name(name) {
            Ok(parsed) => Self {
                name,
                location_code: Some(parsed.location_code().to_string()),
                lookup_keys: parsed
                    .lookup_keys()
                    .into_iter()
                    .map(|(kind, key)| LookupKeyView { kind, key })
                    .collect(),
                parsed: Some(parsed),
                irregular: None,
            },
            Err(reason) => Self {
                name,
                parsed: None,
                location_code: None,
                irregular: Some(reason.to_string()),
                lookup_keys: Vec::new(),
            },
        }
    }
}

/// Execute inspect subcommand
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: InspectArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let views: Vec<NameView<'_>> = args.names.iter().map(|n| NameView::new(n)).collect();

    match format {
        OutputFormat::Text => print_text(&views),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&views)?),
        OutputFormat::Tsv => print_tsv(&views),
    }

    Ok(())
}

fn print_text(views: &[NameView<'_>]) {
    for (i, view) in views.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", view.name);

        let Some(parsed) = &view.parsed else {
            println!("  Irregular: {}", view.irregular.as_deref().unwrap_or_default());
            continue;
        };

        println!("  Reference product: {:?}", parsed.ref_name);
        println!("  Location:          {:?}", parsed.location);
        if let Some(code) = &view.location_code {
            println!("  Location code:     {code}");
        }
        println!("  Qualifier:         {:?}", parsed.suffix);
        println!("  Lookup keys (in trial order):");
        for (n, lookup) in view.lookup_keys.iter().enumerate() {
            println!("    {}. {:<18} '{}'", n + 1, lookup.kind.to_string(), lookup.key);
        }
    }
}

fn print_tsv(views: &[NameView<'_>]) {
    println!("name\tref_name\tlocation\tsuffix\tref_name_and_suffix_key\tref_name_key\tsuffix_key");
    for view in views {
        match &view.parsed {
            Some(parsed) => {
                let keys: Vec<&str> = view.lookup_keys.iter().map(|k| k.key.as_str()).collect();
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    view.name,
                    parsed.ref_name.trim(),
                    view.location_code.as_deref().unwrap_or_default(),
                    parsed.suffix.trim(),
                    keys.join("\t")
                );
            }
            None => println!("{}\t\t\t\t\t\t", view.name),
        }
    }
}
