mod cli;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::fs;

use anyhow::{Context, Result};
use chartparse::{noun_phrase_chunks, CfgGrammarParser, EarleyParser, Grammar};
use clap::Parser;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn load_grammar(path: Option<&Path>, start: Option<&str>) -> Result<Grammar> {
    let (text, origin) = match path {
        Some(path) => (
            fs::read_to_string(path)
                .with_context(|| format!("reading grammar {}", path.display()))?,
            path.display().to_string(),
        ),
        None => (chartparse::ENGLISH.to_string(), "built-in English grammar".to_string()),
    };
    let mut loader = CfgGrammarParser::new(&text);
    if let Some(start) = start {
        loader = loader.start(start);
    }
    loader.into_grammar().with_context(|| format!("loading {}", origin))
}

// Leading digits of the file name: "10.txt" sorts after "9.txt"
fn numeric_prefix(path: &Path) -> Option<u64> {
    let name = path.file_name()?.to_str()?;
    let digits: String = name.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Files of `dir` ordered by numeric prefix; dotfiles and subdirectories are skipped
fn sentence_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && !is_hidden(&path) {
            files.push(path);
        }
    }
    files.sort_by_key(|path| (numeric_prefix(path).unwrap_or(u64::MAX), path.clone()));
    Ok(files)
}

/// Print the trees of `sentence` and the noun phrase chunks of each one.
/// Returns whether the sentence could be parsed.
fn report(out: &mut impl Write, parser: &EarleyParser, sentence: &str, max_trees: Option<usize>)
    -> io::Result<bool>
{
    let words = lexers::sentence_words(sentence);
    let chart = parser.parse(&words);
    if !chart.accepted() {
        writeln!(out, "Could not parse sentence.")?;
        return Ok(false);
    }
    for tree in chart.trees().take(max_trees.unwrap_or(usize::MAX)) {
        write!(out, "{}", tree.render())?;
        writeln!(out, "\nNoun Phrase Chunks")?;
        for np in noun_phrase_chunks(&tree) {
            writeln!(out, "{}", np.leaves().join(" "))?;
        }
    }
    Ok(true)
}

fn interactive(parser: &EarleyParser, max_trees: Option<usize>) -> Result<()> {
    let mut rl = rustyline::DefaultEditor::new()?;
    loop {
        match rl.readline("Sentence: ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e).context("reading sentence"),
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);
                report(&mut io::stdout().lock(), parser, &line, max_trees)?;
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let grammar = load_grammar(cli.grammar.as_deref(), cli.start.as_deref())?;
    debug!(rules = grammar.rules().len(), start = grammar.start(), "grammar ready");
    let parser = EarleyParser::new(grammar);

    if let Some(sentence) = &cli.sentence {
        report(&mut io::stdout().lock(), &parser, sentence, cli.max_trees)?;
        return Ok(());
    }
    let Some(path) = &cli.path else {
        return interactive(&parser, cli.max_trees);
    };

    let files = if path.is_dir() { sentence_files(path)? } else { vec![path.clone()] };
    let mut out = io::stdout().lock();
    for file in &files {
        let text = fs::read_to_string(file)
            .with_context(|| format!("reading sentence {}", file.display()))?;
        if files.len() > 1 {
            writeln!(out, "== {} ==", file.display())?;
        }
        if !report(&mut out, &parser, &text, cli.max_trees)? {
            warn!(file = %file.display(), "no derivation");
        }
    }
    Ok(())
}

///////////////////////////////////////////////////////////////////////////////
