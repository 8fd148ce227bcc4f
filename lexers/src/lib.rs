mod scanner;
mod char_scanner;
mod cfg_tokenizer;
mod word_tokenizer;

pub use scanner::Scanner;
pub use cfg_tokenizer::{CfgTokenizer, CfgToken};
pub use word_tokenizer::{WordTokenizer, sentence_words};

#[cfg(test)]
mod scanner_test;
