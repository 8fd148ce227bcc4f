#![deny(warnings)]

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    // A terminal matches an input token equal to its name
    Terminal(String),
    Nonterminal(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub head: String,
    pub spec: Vec<Symbol>,
}

/// Immutable set of rules indexed by their head. Cheap to clone and safe to
/// share between threads; parsers only ever read it.
#[derive(Clone, Debug)]
pub struct Grammar {
    start: String,
    rules: Vec<Arc<Rule>>,
    by_head: HashMap<String, Vec<Arc<Rule>>>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("Undefined nonterminal: {0}")]
    UndefinedNonterminal(String),
    #[error("Missing Symbol: {0}")]
    UnknownSymbol(String),
    #[error("Duplicate Symbol: {0}")]
    DuplicateSymbol(String),
    #[error("Duplicate Rule: {0}")]
    DuplicateRule(String),
    #[error("Terminal used as rule head: {0}")]
    TerminalHead(String),
    #[error("Syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },
}

#[derive(Default)]
pub struct GrammarBuilder {
    symbols: HashMap<String, Symbol>,
    rules: Vec<Rule>,
    error: Option<GrammarError>,
}


impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) => name,
            Symbol::Nonterminal(name) => name,
        }
    }

    pub fn matches(&self, input: &str) -> bool {
        match self {
            Symbol::Terminal(name) => name == input,
            Symbol::Nonterminal(_) => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Terminal(name) => write!(f, "{:?}", name),
            Symbol::Nonterminal(name) => write!(f, "{}", name),
        }
    }
}

impl Rule {
    pub fn new(head: impl Into<String>, spec: Vec<Symbol>) -> Self {
        Rule{head: head.into(), spec}
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ->", self.head)?;
        for symbol in &self.spec {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

impl Grammar {
    /// Index `rules` by head and check every referenced nonterminal,
    /// including `start`, has at least one rule.
    pub fn new<R>(rules: R, start: impl Into<String>) -> Result<Grammar, GrammarError>
        where R: IntoIterator<Item=Rule>
    {
        let start = start.into();
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        let mut by_head: HashMap<String, Vec<Arc<Rule>>> = HashMap::new();
        for rule in rules {
            if !seen.insert(rule.clone()) {
                return Err(GrammarError::DuplicateRule(rule.to_string()));
            }
            let rule = Arc::new(rule);
            by_head.entry(rule.head.clone()).or_default().push(rule.clone());
            ordered.push(rule);
        }
        let dangling = ordered.iter()
            .flat_map(|rule| rule.spec.iter())
            .find_map(|symbol| match symbol {
                Symbol::Nonterminal(name) if !by_head.contains_key(name) => Some(name),
                _ => None,
            });
        if let Some(name) = dangling {
            return Err(GrammarError::UndefinedNonterminal(name.clone()));
        }
        if !by_head.contains_key(&start) {
            return Err(GrammarError::UndefinedNonterminal(start));
        }
        Ok(Grammar{start, rules: ordered, by_head})
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// All rules in the order they were given
    pub fn rules(&self) -> &[Arc<Rule>] {
        &self.rules
    }

    pub fn rules_for(&self, head: &str) -> &[Arc<Rule>] {
        self.by_head.get(head).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

/// Builds a Grammar while validating existence of Symbols and checking rules.
/// Only the first problem found is reported.
impl GrammarBuilder {
    fn fail(&mut self, error: GrammarError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn add_symbol(&mut self, symbol: Symbol) {
        // Check for duplicate symbols to avoid overwriting by mistake
        if self.symbols.contains_key(symbol.name()) {
            self.fail(GrammarError::DuplicateSymbol(symbol.name().to_string()));
        } else {
            self.symbols.insert(symbol.name().to_string(), symbol);
        }
    }

    pub fn nonterm(mut self, name: impl Into<String>) -> Self {
        self.add_symbol(Symbol::Nonterminal(name.into()));
        self
    }

    pub fn terminal(mut self, name: impl Into<String>) -> Self {
        self.add_symbol(Symbol::Terminal(name.into()));
        self
    }

    /// Register a rule for a previously declared nonterminal. `spec` names
    /// declared symbols; an empty `spec` derives the empty string.
    pub fn rule<S, S2>(mut self, head: S, spec: &[S2]) -> Self
        where S: AsRef<str>, S2: AsRef<str>
    {
        let head = head.as_ref();
        match self.symbols.get(head).map(Symbol::is_terminal) {
            None => {
                self.fail(GrammarError::UnknownSymbol(head.to_string()));
                return self;
            }
            Some(true) => {
                self.fail(GrammarError::TerminalHead(head.to_string()));
                return self;
            }
            Some(false) => (),
        }
        let mut symbols = Vec::with_capacity(spec.len());
        for name in spec {
            match self.symbols.get(name.as_ref()).cloned() {
                Some(symbol) => symbols.push(symbol),
                None => {
                    self.fail(GrammarError::UnknownSymbol(name.as_ref().to_string()));
                    return self;
                }
            }
        }
        self.rules.push(Rule::new(head, symbols));
        self
    }

    pub fn into_grammar(self, start: impl Into<String>) -> Result<Grammar, GrammarError> {
        match self.error {
            Some(error) => Err(error),
            None => Grammar::new(self.rules, start),
        }
    }
}


///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Grammar, GrammarBuilder, GrammarError, Rule, Symbol};
    use std::collections::HashSet;

    fn nt(name: &str) -> Symbol { Symbol::Nonterminal(name.to_string()) }
    fn t(name: &str) -> Symbol { Symbol::Terminal(name.to_string()) }

    #[test]
    fn symbol_eq_hash() {
        assert_ne!(nt("X"), t("X"));
        // Check that term and non-term of equal name are not the same
        let mut m = HashSet::new();
        m.insert(nt("X"));
        m.insert(t("X"));
        m.insert(t("X"));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn symbol_terminal() {
        let term = t("dog");
        assert_eq!(term.name(), "dog");
        assert!(term.matches("dog"));
        assert!(!term.matches("dogs"));
        assert!(!nt("dog").matches("dog"));
    }

    #[test]
    fn rule_display() {
        let rule = Rule::new("NP", vec![nt("Det"), t("dog")]);
        assert_eq!(rule.to_string(), r#"NP -> Det "dog""#);
        assert_eq!(Rule::new("X", vec![]).to_string(), "X ->");
    }

    #[test]
    fn build_grammar() {
        let g = GrammarBuilder::default()
            .nonterm("S")
            .nonterm("NP")
            .nonterm("VP")
            .terminal("he")
            .terminal("smiled")
            .rule("S", &["NP", "VP"])
            .rule("NP", &["he"])
            .rule("VP", &["smiled"])
            .into_grammar("S")
            .expect("Bad grammar");
        assert_eq!(g.start(), "S");
        assert_eq!(g.rules().len(), 3);
        assert_eq!(g.rules_for("NP").len(), 1);
        assert_eq!(g.rules_for("NP")[0].spec, vec![t("he")]);
        assert!(g.rules_for("he").is_empty());
        assert_eq!(g.to_string(), "S -> NP VP\nNP -> \"he\"\nVP -> \"smiled\"\n");
    }

    #[test]
    fn dangling_nonterminal() {
        let rules = vec![
            Rule::new("S", vec![nt("NP"), nt("VP")]),
            Rule::new("NP", vec![t("he")]),
        ];
        assert_eq!(Grammar::new(rules, "S").unwrap_err(),
                   GrammarError::UndefinedNonterminal("VP".to_string()));

        let g = GrammarBuilder::default()
            .nonterm("S")
            .nonterm("X")
            .terminal("x")
            .rule("S", &["X"])
            .into_grammar("S");
        assert_eq!(g.unwrap_err().to_string(), "Undefined nonterminal: X");
    }

    #[test]
    fn missing_start() {
        let rules = vec![Rule::new("S", vec![t("a")])];
        assert_eq!(Grammar::new(rules, "Xum").unwrap_err(),
                   GrammarError::UndefinedNonterminal("Xum".to_string()));
    }

    #[test]
    fn dup_symbol() {
        let g = GrammarBuilder::default()
            .nonterm("Sum")
            .terminal("Sum")
            .into_grammar("Sum");
        assert_eq!(g.unwrap_err().to_string(), "Duplicate Symbol: Sum");
    }

    #[test]
    fn dup_rule() {
        let g = GrammarBuilder::default()
            .nonterm("Sum")
            .terminal("1")
            .terminal("+")
            .rule("Sum", &["Sum", "+", "1"])
            .rule("Sum", &["Sum", "+", "1"])
            .rule("Sum", &["1"])
            .into_grammar("Sum");
        assert_eq!(g.unwrap_err().to_string(), r#"Duplicate Rule: Sum -> Sum "+" "1""#);
    }

    #[test]
    fn missing_symbol() {
        let g = GrammarBuilder::default()
            .nonterm("Sum")
            .rule("Sum", &["Num"])
            .into_grammar("Sum");
        assert_eq!(g.unwrap_err(), GrammarError::UnknownSymbol("Num".to_string()));

        let g = GrammarBuilder::default()
            .terminal("a")
            .rule("a", &["a"])
            .into_grammar("a");
        assert_eq!(g.unwrap_err(), GrammarError::TerminalHead("a".to_string()));
    }

    #[test]
    fn grammar_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Grammar>();
    }
}
