#![deny(warnings)]

use crate::grammar::{Grammar, Symbol};
use crate::items::{Item, StateSet, Trigger};
use crate::trees::Trees;
use std::rc::Rc;
use tracing::{debug, trace};

pub struct EarleyParser {
    pub grammar: Grammar,
}

/// The finished chart of one parse: a StateSet per input position plus the
/// complete start-symbol Items spanning the whole input.
pub struct Chart {
    statesets: Vec<StateSet>,
    roots: Vec<Rc<Item>>,
}

///////////////////////////////////////////////////////////////////////////////

impl EarleyParser {
    pub fn new(grammar: Grammar) -> EarleyParser {
        EarleyParser{grammar}
    }

    /// Build new `Prediction` items for `next_nonterm` at `pos`. Nullable
    /// Items that already completed at `pos` advance `source` right away,
    /// since their completion pass may have run before `source` arrived.
    fn predictions(
        &self,
        stateset: &StateSet,
        source: &Rc<Item>,
        next_nonterm: &str,
        pos: usize,
    ) -> Vec<Item>
    {
        let predicted = self.grammar.rules_for(next_nonterm).iter()
            .map(|rule| Item::new(rule, pos));
        let nulled = stateset.iter()
            .filter(|item| item.complete() && item.start == pos &&
                           item.rule.head == next_nonterm)
            .map(|item| source.extend(Trigger::Complete(item.clone()), pos));
        predicted.chain(nulled).collect()
    }

    /// Build new `Completion` items based on `trigger` item having completed.
    /// When an item is completed it advances all items in the same starting
    /// StateSet whose next symbol matches its rule name.
    fn completions(
        starting_stateset: &StateSet,
        trigger: &Rc<Item>,
        complete_pos: usize,
    ) -> Vec<Item>
    {
        assert!(trigger.complete(), "Incomplete `trigger` used for completions");
        starting_stateset.iter()
            .filter(|item| match item.next_symbol() {
                Some(Symbol::Nonterminal(name)) => *name == trigger.rule.head,
                Some(Symbol::Terminal(_)) | None => false,
            })
            .map(|item| item.extend(Trigger::Complete(trigger.clone()), complete_pos))
            .collect()
    }

    /// Build new `Scan` items for items in the current stateset whose next
    /// symbol is a Terminal that matches the input lexeme ahead in the stream.
    fn scans(current_stateset: &StateSet, lexeme: &str, end: usize) -> StateSet {
        current_stateset.iter()
            .filter(|item| item.next_symbol().is_some_and(|s| s.matches(lexeme)))
            .map(|item| item.extend(Trigger::Scan(lexeme.to_string()), end))
            .collect()
    }

    // Predict/Complete until no new Items are added to the StateSet. Each
    // item is expanded once, in insertion order, so new ones are picked up.
    fn close(&self, statesets: &mut [StateSet], idx: usize) {
        let mut cursor = 0;
        while cursor < statesets[idx].len() {
            let item = statesets[idx][cursor].clone();
            cursor += 1;
            let new_items = match item.next_symbol() {
                Some(Symbol::Nonterminal(name)) => {
                    trace!(?item, "predict {}", name);
                    self.predictions(&statesets[idx], &item, name, idx)
                }
                None => {
                    trace!(?item, "complete");
                    EarleyParser::completions(&statesets[item.start], &item, idx)
                }
                // Scan items populate next stateset only when done with current state
                Some(Symbol::Terminal(_)) => continue,
            };
            statesets[idx].extend(new_items);
        }
    }

    /// Run the recognizer over `tokens`. Failing to derive the input is not
    /// an error: the returned Chart simply has no roots.
    pub fn parse<T>(&self, tokens: T) -> Chart
        where T: IntoIterator, T::Item: AsRef<str>
    {
        let mut tokens = tokens.into_iter();
        // Populate S0, add items for each rule matching the start symbol
        let s0: StateSet = self.grammar.rules_for(self.grammar.start()).iter()
            .map(|rule| Item::new(rule, 0))
            .collect();

        let mut statesets = vec![s0];

        // New statesets are generated from input stream (Scans)
        for idx in 0.. {
            self.close(&mut statesets, idx);
            // Build Si+1 with items in the current state that accept the next token
            match tokens.next() {
                Some(lexeme) => {
                    let next = EarleyParser::scans(&statesets[idx], lexeme.as_ref(), idx + 1);
                    if next.is_empty() {
                        debug!(position = idx, token = lexeme.as_ref(), "no item scans token");
                    }
                    statesets.push(next);
                }
                None => break,
            }
        }

        if cfg!(feature="debug") {
            for (idx, stateset) in statesets.iter().enumerate() {
                debug!("=== StateSet {} ===", idx);
                for item in stateset.iter() {
                    let src = item.sources().iter()
                        .map(|bp| format!("{:?}", bp))
                        .collect::<Vec<_>>().join(", ");
                    debug!("{:?} -- SRC: {}", item, src);
                }
            }
        }

        // Check that at least one item is a. complete, b. starts at the idx 0,
        // and c. the name of the rule matches the starting symbol.
        // It spans the whole input because we search at the last stateset
        let roots: Vec<_> = statesets.last()
            .expect("BUG: No Statesets (even s0)")
            .iter()
            .filter(|item| item.start == 0 && item.complete() &&
                           item.rule.head == self.grammar.start())
            .cloned()
            .collect();

        debug!(
            tokens = statesets.len() - 1,
            items = statesets.iter().map(StateSet::len).sum::<usize>(),
            roots = roots.len(),
            "earley parse finished");
        Chart{statesets, roots}
    }
}

impl Chart {
    /// Whether the start symbol derives the whole input
    pub fn accepted(&self) -> bool {
        !self.roots.is_empty()
    }

    /// Complete start-symbol Items spanning the whole input
    pub fn roots(&self) -> &[Rc<Item>] {
        &self.roots
    }

    /// Number of StateSets, one more than the number of tokens parsed.
    pub fn len(&self) -> usize {
        self.statesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statesets.is_empty()
    }

    /// Items ending at input position `pos`
    pub fn items(&self, pos: usize) -> impl Iterator<Item=&Rc<Item>> {
        self.statesets.get(pos).into_iter().flat_map(|stateset| stateset.iter())
    }

    /// Lazily enumerate every parse tree. Empty when nothing was derived.
    pub fn trees(&self) -> Trees {
        Trees::new(&self.roots)
    }
}

impl std::fmt::Debug for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Chart")
            .field("statesets", &self.statesets)
            .field("roots", &self.roots)
            .finish()
    }
}
