use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use serde::Serialize;

use crate::cli::{build_index, OutputFormat};
use crate::core::types::RelatednessResult;
use crate::matching::engine::{MatchEngine, SearchError};
use crate::parsing::genome::load_genome_file;

#[derive(Args)]
pub struct RelateArgs {
    /// Genome library files (plain text or .gz)
    #[arg(required = true)]
    pub library: Vec<PathBuf>,

    /// File containing one or more query genomes
    #[arg(short, long)]
    pub query: PathBuf,

    /// Chunk length for relatedness scoring (defaults to twice the indexed
    /// prefix length)
    #[arg(long)]
    pub fragment_length: Option<usize>,

    /// Minimum percentage of matching chunks to report (0-100)
    #[arg(short, long, default_value = "10.0")]
    pub threshold: f64,

    /// Indexed prefix length (1-100)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=100))]
    pub min_search_length: u32,

    /// Require exact matches only (no SNiP tolerance)
    #[arg(short, long)]
    pub exact: bool,
}

#[derive(Serialize)]
struct QueryReport<'a> {
    query: &'a str,
    matches: Vec<RelatednessResult>,
}

/// Execute the relate subcommand
///
/// # Errors
///
/// Returns an error if a file cannot be loaded, the threshold is out of
/// range, or the chunk length is below the indexed prefix length.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RelateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if !(0.0..=100.0).contains(&args.threshold) {
        bail!("threshold must be in the range 0 to 100");
    }

    let index = build_index(&args.library, args.min_search_length as usize, verbose)?;
    let queries = load_genome_file(&args.query)
        .with_context(|| format!("failed to load {}", args.query.display()))?;
    if verbose {
        eprintln!(
            "Indexed {} genome(s); scoring {} query genome(s)",
            index.len(),
            queries.len()
        );
    }

    let engine = MatchEngine::new(&index);
    let fragment_length = args
        .fragment_length
        .unwrap_or(2 * args.min_search_length as usize);

    let mut reports = Vec::new();
    for query in &queries {
        let matches =
            match engine.find_related_genomes(query, fragment_length, args.exact, args.threshold) {
                Ok(matches) => matches,
                Err(SearchError::NoMatchFound) => Vec::new(),
                Err(err) => return Err(err.into()),
            };
        reports.push(QueryReport {
            query: query.name(),
            matches,
        });
    }

    match format {
        OutputFormat::Text => {
            for report in &reports {
                println!("For {}:", report.query);
                if report.matches.is_empty() {
                    println!("  No related genomes were found");
                    continue;
                }
                println!("  {} related genome(s) were found:", report.matches.len());
                for result in &report.matches {
                    println!("  {:6.2}%  {}", result.percent_match, result.genome_name);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(())
}
