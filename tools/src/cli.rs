use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Sentence file, or a directory of them (default: prompt for sentences)
    pub path: Option<PathBuf>,

    /// File containing the grammar (default: built-in English grammar)
    #[arg(short, long, value_name = "FILE")]
    pub grammar: Option<PathBuf>,

    /// Start symbol (default: head of the first rule)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Print at most this many trees per sentence
    #[arg(short = 'n', long, value_name = "N")]
    pub max_trees: Option<usize>,

    /// Parse this sentence instead of reading files
    #[arg(long, value_name = "TEXT", conflicts_with = "path")]
    pub sentence: Option<String>,
}
