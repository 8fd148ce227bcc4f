mod grammar;
pub use crate::grammar::{Grammar, GrammarBuilder, GrammarError, Rule, Symbol};

mod items;
pub use crate::items::{BackPointer, Item};

mod parser;
pub use crate::parser::{Chart, EarleyParser};

mod trees;
pub use crate::trees::{Subtrees, Tree, Trees};

mod chunks;
pub use crate::chunks::{chunks_labelled, noun_phrase_chunks, NOUN_PHRASE};

pub mod cfg;
pub use crate::cfg::{parse_grammar, CfgGrammarParser, ENGLISH};
