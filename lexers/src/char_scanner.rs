#![deny(warnings)]

use crate::scanner::Scanner;

static WHITE: &[char] = &[' ', '\n', '\r', '\t'];
static ALPHA: &[char] = &['_',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z'];
static ALNUM: &[char] = &['_',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z'];


impl<I: Iterator<Item=char>> Scanner<I> {
    pub fn extract_string(&mut self) -> String {
        self.extract().into_iter().collect()
    }

    pub fn scan_whitespace(&mut self) -> Option<String> {
        self.skip_all(WHITE);
        Some(self.extract_string())
    }

    // discard everything up to the end of the line (or input)
    pub fn skip_line(&mut self) {
        self.until_any(&['\n']);
        self.accept(&'\n');
        self.ignore();
    }

    // scan a quoted string like "this is \"an\" example"
    pub fn scan_quoted_string(&mut self, q: char) -> Option<String> {
        let backtrack = self.pos();
        self.accept(&q)?;
        while let Some(n) = self.next() {
            if n == '\\' { self.next(); continue; }
            if n == q { return Some(self.extract_string()); }
        }
        self.set_pos(backtrack);
        None
    }

    // scan [a-zA-Z_][a-zA-Z0-9_]*
    pub fn scan_identifier(&mut self) -> Option<String> {
        self.accept_any(ALPHA)?;
        self.skip_all(ALNUM);
        Some(self.extract_string())
    }

    // scan a word: an alphanumeric run that may carry inner ' or -
    pub fn scan_word(&mut self) -> Option<String> {
        let backtrack = self.pos();
        match self.next() {
            Some(c) if c.is_alphanumeric() => (),
            _ => {
                self.set_pos(backtrack);
                return None;
            }
        }
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '\'' || c == '-') { break; }
            self.next();
        }
        Some(self.extract_string())
    }
}

///////////////////////////////////////////////////////////////////////////////
