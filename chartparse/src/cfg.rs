#![deny(warnings)]

use crate::grammar::{Grammar, GrammarError, Rule, Symbol};
use lexers::{CfgToken, CfgTokenizer};
use tracing::debug;

/// English sentence grammar: noun phrases (`NP`), verb phrases (`VP`),
/// prepositional phrases (`PP`) and conjoined clauses over a small lexicon.
pub const ENGLISH: &str = include_str!("../grammars/english.cfg");

/// Reads grammars written one rule per line:
///
/// ```text
/// # comment
/// S -> NP VP | S Conj S
/// Det -> "a" | "the"
/// Opt -> "x" |
/// ```
///
/// Bare names are nonterminals, quoted text is a terminal and an empty
/// alternative derives the empty string. The start symbol defaults to the
/// head of the first rule.
pub struct CfgGrammarParser {
    grammar: String,
    start: Option<String>,
}

fn syntax(line: usize, message: impl Into<String>) -> GrammarError {
    GrammarError::Syntax{line, message: message.into()}
}

// Parse `Head -> alt | alt ...` into one Rule per alternative
fn parse_line(lineno: usize, tokens: Vec<CfgToken>) -> Result<Vec<Rule>, GrammarError> {
    let mut tokens = tokens.into_iter();
    let head = match tokens.next() {
        Some(CfgToken::Ident(head)) => head,
        Some(other) => return Err(syntax(lineno, format!("expected rule head, found {:?}", other))),
        None => return Ok(Vec::new()),
    };
    match tokens.next() {
        Some(CfgToken::Arrow) => (),
        other => return Err(syntax(lineno, format!("expected '->' after {}, found {:?}", head, other))),
    }
    let mut rules = Vec::new();
    let mut spec = Vec::new();
    for token in tokens {
        match token {
            CfgToken::Ident(name) => spec.push(Symbol::Nonterminal(name)),
            CfgToken::Quoted(text) => spec.push(Symbol::Terminal(text)),
            CfgToken::Bar => rules.push(Rule::new(head.clone(), std::mem::take(&mut spec))),
            CfgToken::Arrow => return Err(syntax(lineno, "unexpected '->'")),
            CfgToken::Unknown(text) => return Err(syntax(lineno, format!("unexpected {:?}", text))),
        }
    }
    rules.push(Rule::new(head, spec));
    Ok(rules)
}

impl CfgGrammarParser {
    pub fn new(grammar: &str) -> Self {
        CfgGrammarParser{grammar: grammar.to_string(), start: None}
    }

    /// Use `start` instead of the first rule's head
    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn into_grammar(self) -> Result<Grammar, GrammarError> {
        let mut rules = Vec::new();
        for (idx, line) in self.grammar.lines().enumerate() {
            let tokens: Vec<_> = CfgTokenizer::new(line.chars()).collect();
            rules.extend(parse_line(idx + 1, tokens)?);
        }
        let start = match self.start {
            Some(start) => start,
            None => rules.first()
                .map(|rule: &Rule| rule.head.clone())
                .ok_or_else(|| syntax(0, "grammar has no rules"))?,
        };
        debug!(rules = rules.len(), start = %start, "loaded grammar");
        Grammar::new(rules, start)
    }
}

/// Parse a grammar whose start symbol is the head of its first rule
pub fn parse_grammar(grammar: &str) -> Result<Grammar, GrammarError> {
    CfgGrammarParser::new(grammar).into_grammar()
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn nt(name: &str) -> Symbol { Symbol::Nonterminal(name.to_string()) }
    fn t(name: &str) -> Symbol { Symbol::Terminal(name.to_string()) }

    #[test]
    fn alternatives_split_into_rules() {
        let g = parse_grammar(r#"
            # toy grammar
            S -> NP VP
            NP -> Det N | N
            Det -> "the" | 'a'
            N -> "dog"
            VP -> "barked"
        "#).expect("Bad grammar");
        assert_eq!(g.start(), "S");
        assert_eq!(g.rules().len(), 7);
        let np: Vec<_> = g.rules_for("NP").iter().map(|r| r.spec.clone()).collect();
        assert_eq!(np, vec![vec![nt("Det"), nt("N")], vec![nt("N")]]);
        let det: Vec<_> = g.rules_for("Det").iter().map(|r| r.spec.clone()).collect();
        assert_eq!(det, vec![vec![t("the")], vec![t("a")]]);
    }

    #[test]
    fn empty_alternative() {
        let g = CfgGrammarParser::new("S -> A \"b\"\nA -> \"a\" |")
            .into_grammar()
            .expect("Bad grammar");
        let a: Vec<_> = g.rules_for("A").iter().map(|r| r.spec.clone()).collect();
        assert_eq!(a, vec![vec![t("a")], vec![]]);
    }

    #[test]
    fn explicit_start() {
        let g = CfgGrammarParser::new("A -> B\nB -> \"b\"")
            .start("B")
            .into_grammar()
            .expect("Bad grammar");
        assert_eq!(g.start(), "B");
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(parse_grammar("S -> \"a\"\nS = \"b\"").unwrap_err(),
                   GrammarError::Syntax{line: 2, message: "expected '->' after S, found Some(Unknown(\"=\"))".to_string()});
        assert!(matches!(parse_grammar("\"a\" -> S"),
                         Err(GrammarError::Syntax{line: 1, ..})));
        assert!(matches!(parse_grammar("S -> A -> B"),
                         Err(GrammarError::Syntax{line: 1, ..})));
        assert!(matches!(parse_grammar("# nothing here"),
                         Err(GrammarError::Syntax{line: 0, ..})));
    }

    #[test]
    fn dangling_nonterminal() {
        assert_eq!(parse_grammar("S -> NP VP\nNP -> \"he\"").unwrap_err(),
                   GrammarError::UndefinedNonterminal("VP".to_string()));
    }

    #[test]
    fn english_grammar_loads() {
        let g = parse_grammar(ENGLISH).expect("Bad grammar");
        assert_eq!(g.start(), "S");
        assert_eq!(g.rules_for("S").len(), 4);
        assert_eq!(g.rules_for("NP").len(), 6);
        assert!(g.rules_for("N").iter().any(|r| r.spec == vec![t("holmes")]));
    }
}
