use std::path::PathBuf;

use anyhow::bail;
use clap::Args;

use crate::cli::{build_index, OutputFormat};
use crate::matching::engine::{MatchEngine, SearchError};
use crate::parsing::genome::is_base;

#[derive(Args)]
pub struct SearchArgs {
    /// Genome library files (plain text or .gz)
    #[arg(required = true)]
    pub library: Vec<PathBuf>,

    /// DNA fragment to search for
    #[arg(short = 'd', long)]
    pub fragment: String,

    /// Minimum match length to report (defaults to the full fragment length)
    #[arg(short, long)]
    pub min_length: Option<usize>,

    /// Indexed prefix length (1-100)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub min_search_length: u32,

    /// Require exact matches only (no SNiP tolerance)
    #[arg(short, long)]
    pub exact: bool,
}

/// Execute the search subcommand
///
/// # Errors
///
/// Returns an error if a library file cannot be loaded or the search
/// preconditions are violated.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if let Some(bad) = args.fragment.chars().find(|&c| !is_base(c)) {
        bail!("invalid base '{bad}' in fragment {}", args.fragment);
    }

    let index = build_index(&args.library, args.min_search_length as usize, verbose)?;
    if verbose {
        eprintln!("Indexed {} genome(s)", index.len());
    }

    let engine = MatchEngine::new(&index);
    let minimum_length = args.min_length.unwrap_or(args.fragment.len());

    match engine.find_fragment(&args.fragment, minimum_length, args.exact) {
        Ok(mut hits) => {
            hits.sort_by(|a, b| a.genome_name.cmp(&b.genome_name));
            match format {
                OutputFormat::Text => {
                    let kind = if args.exact {
                        "match(es)"
                    } else {
                        "match(es) and/or SNiPs"
                    };
                    println!("{} {} of {} found:", hits.len(), kind, args.fragment);
                    for hit in &hits {
                        println!(
                            "  length {} position {} in {}",
                            hit.length, hit.position, hit.genome_name
                        );
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&hits)?);
                }
            }
        }
        Err(SearchError::NoMatchFound) => match format {
            OutputFormat::Text => {
                println!("No matches of {} were found.", args.fragment);
            }
            OutputFormat::Json => println!("[]"),
        },
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
