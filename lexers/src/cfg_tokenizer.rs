#![deny(warnings)]

use crate::scanner::Scanner;

/// Tokens of the `NP -> Det N | "he"` rule notation.
#[derive(Clone, PartialEq, Debug)]
pub enum CfgToken {
    Arrow,
    Bar,
    /// A bare name, always a nonterminal
    Ident(String),
    /// Quoted text (either quote style) with its escapes resolved
    Quoted(String),
    Unknown(String),
}

pub struct CfgTokenizer<I: Iterator<Item=char>>(Scanner<I>);

impl<I: Iterator<Item=char>> CfgTokenizer<I> {
    pub fn new(src: I) -> Self {
        CfgTokenizer(Scanner::new(src))
    }
}

fn unquote(quoted: &str) -> String {
    let mut out = String::new();
    let mut inner = quoted[1..quoted.len()-1].chars();
    while let Some(c) = inner.next() {
        match c {
            '\\' => out.extend(inner.next()),
            c => out.push(c),
        }
    }
    out
}

impl<I: Iterator<Item=char>> Iterator for CfgTokenizer<I> {
    type Item = CfgToken;
    fn next(&mut self) -> Option<Self::Item> {
        let s = &mut self.0;
        s.scan_whitespace();
        // discard comments starting with '#' until new-line
        while s.accept(&'#').is_some() {
            s.skip_line();
            s.scan_whitespace();
        }
        if s.accept(&'|').is_some() {
            s.ignore();
            return Some(CfgToken::Bar);
        }
        if s.accept(&'-').is_some() {
            if s.accept(&'>').is_some() {
                s.ignore();
                return Some(CfgToken::Arrow);
            }
            return Some(CfgToken::Unknown(s.extract_string()));
        }
        for q in ['"', '\''] {
            if let Some(quoted) = s.scan_quoted_string(q) {
                return Some(CfgToken::Quoted(unquote(&quoted)));
            }
        }
        if let Some(id) = s.scan_identifier() {
            return Some(CfgToken::Ident(id));
        }
        s.next()?;
        Some(CfgToken::Unknown(s.extract_string()))
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<CfgToken> {
        CfgTokenizer::new(src.chars()).collect()
    }

    #[test]
    fn rule_line() {
        assert_eq!(tokens(r#"NP -> Det NP | "he" | 'she'"#), vec![
            CfgToken::Ident("NP".to_string()),
            CfgToken::Arrow,
            CfgToken::Ident("Det".to_string()),
            CfgToken::Ident("NP".to_string()),
            CfgToken::Bar,
            CfgToken::Quoted("he".to_string()),
            CfgToken::Bar,
            CfgToken::Quoted("she".to_string()),
        ]);
    }

    #[test]
    fn escapes_and_comments() {
        assert_eq!(tokens("# heading\nX -> \"a \\\"b\\\"\" # trailing"), vec![
            CfgToken::Ident("X".to_string()),
            CfgToken::Arrow,
            CfgToken::Quoted("a \"b\"".to_string()),
        ]);
    }

    #[test]
    fn unknown_tokens() {
        assert_eq!(tokens("X - > ;"), vec![
            CfgToken::Ident("X".to_string()),
            CfgToken::Unknown("-".to_string()),
            CfgToken::Unknown(">".to_string()),
            CfgToken::Unknown(";".to_string()),
        ]);
    }
}
