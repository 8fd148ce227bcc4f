#![deny(warnings)]

use crate::scanner::Scanner;

/// Splits free text into lowercase words. Punctuation comes out as single
/// character tokens so callers can decide what to keep.
pub struct WordTokenizer<I: Iterator<Item=char>>(Scanner<I>);

impl<I: Iterator<Item=char>> WordTokenizer<I> {
    pub fn new(src: I) -> Self {
        WordTokenizer(Scanner::new(src))
    }
}

impl<I: Iterator<Item=char>> Iterator for WordTokenizer<I> {
    type Item = String;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.scan_whitespace();
        if let Some(word) = self.0.scan_word() {
            return Some(word.to_lowercase());
        }
        self.0.next()?;
        Some(self.0.extract_string())
    }
}

/// Lowercased words of `sentence` that contain at least one alphabetic char.
pub fn sentence_words(sentence: &str) -> Vec<String> {
    WordTokenizer::new(sentence.chars())
        .filter(|word| word.chars().any(char::is_alphabetic))
        .collect()
}

///////////////////////////////////////////////////////////////////////////////
