//! Command-line interface for frag-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Find library genomes containing a DNA fragment, exactly or
//!   with one substituted base
//! - **relate**: Rank library genomes by how much of a query genome's
//!   chunks they contain
//!
//! ## Usage
//!
//! ```text
//! # Find a fragment, tolerating one SNiP
//! frag-solver search library.txt --fragment GATTACA --min-search-length 4
//!
//! # Exact matches only, reported from length 6 up
//! frag-solver search library.txt --fragment GATTACA --min-search-length 4 \
//!     --min-length 6 --exact
//!
//! # Rank genomes related to each genome in query.txt
//! frag-solver relate library.txt --query query.txt --threshold 25
//!
//! # JSON output for scripting
//! frag-solver search library.txt --fragment GATTACA --min-search-length 4 \
//!     --format json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::index::store::FragmentIndex;
use crate::parsing::genome::load_genome_file;

pub mod relate;
pub mod search;

#[derive(Parser)]
#[command(name = "frag-solver")]
#[command(version)]
#[command(about = "Search genome libraries for DNA fragments and related genomes")]
#[command(
    long_about = "frag-solver indexes a library of genome files and answers two questions:\n\n- which genomes contain a given DNA fragment, exactly or with at most one\n  substituted base (a SNiP)?\n- how related is a query genome to each library genome, measured as the\n  percentage of its fixed-length chunks found somewhere in that genome?"
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
    /// Find library genomes containing a DNA fragment
    Search(search::SearchArgs),

    /// Rank library genomes by relatedness to query genomes
    Relate(relate::RelateArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Load every genome file into a fresh index.
pub(crate) fn build_index(
    paths: &[PathBuf],
    min_search_length: usize,
    verbose: bool,
) -> anyhow::Result<FragmentIndex> {
    let mut index = FragmentIndex::new(min_search_length);
    for path in paths {
        let genomes = load_genome_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        if verbose {
            eprintln!("Loaded {} genome(s) from {}", genomes.len(), path.display());
        }
        for genome in genomes {
            index.add_genome(genome);
        }
    }
    Ok(index)
}
