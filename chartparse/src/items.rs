#![deny(warnings)]

use crate::grammar::{Rule, Symbol};
use indexmap::IndexSet;
use std::{cell, fmt, hash, iter, ops};
use std::rc::Rc;
use std::sync::Arc;


/// How an Item came to be: the Item one step behind it plus either the
/// scanned token or the completed Item that advanced it.
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub enum BackPointer {
    Scan(Rc<Item>, String),
    Complete(Rc<Item>, Rc<Item>),
}

pub enum Trigger {
    Scan(String),
    Complete(Rc<Item>),
}

/// An Item is a partially matched `Rule`. `dot` shows the match progress.
/// Items of a finished Chart are read-only:
///
/// ```compile_fail
/// fn merge(item: &chartparse::Item, other: chartparse::Item) {
///     item.merge_sources(other);
/// }
/// ```
pub struct Item {
    pub rule: Arc<Rule>, // LR0item (dotted rule)
    pub dot: usize,      // dot position within the rule
    pub start: usize,    // input stream position where item starts
    pub end: usize,      // input stream position where item ends

    // Need a RefCell to update existing Items. A replacement with the union
    // of backpointers would invalidate other Items already pointing to this one.
    // Insertion ordered so walking the chart is reproducible.
    backpointers: cell::RefCell<IndexSet<BackPointer>>,
}


// Items are deduped only by rule, dot, start, end (ie: not bp)
// The intention is that 2 Items are the same and can be merged ignoring bp.
impl hash::Hash for Item {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.rule.hash(state);
        self.dot.hash(state);
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Item) -> bool {
        self.rule == other.rule &&
        self.dot == other.dot &&
        self.start == other.start &&
        self.end == other.end
    }
}

impl Eq for Item {}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pre = self.rule.spec.iter().take(self.dot)
            .map(|s| s.to_string()).collect::<Vec<_>>().join(" ");
        let post = self.rule.spec.iter().skip(self.dot)
            .map(|s| s.to_string()).collect::<Vec<_>>().join(" ");
        write!(f, "({} - {}) {} -> {} \u{00b7} {} #bp: {}",
               self.start, self.end, self.rule.head, pre, post,
               self.backpointers.borrow().len())
    }
}

impl Item {
    pub fn new(rule: &Arc<Rule>, start: usize) -> Item {
        Item{
            rule: rule.clone(),
            dot: 0,
            start,
            end: start,
            backpointers: cell::RefCell::new(IndexSet::new()),
        }
    }

    /// Item is complete if Rule has being fully matched
    pub fn complete(&self) -> bool {
        self.dot >= self.rule.spec.len()
    }

    /// Exposes the next symbol in the progress of the Rule
    pub fn next_symbol(&self) -> Option<&Symbol> {
        self.rule.spec.get(self.dot)
    }

    /// Scans or Completions that led to the creation of this Item.
    /// Only ever borrowed non-mutable ref returned for public consumption
    pub fn sources(&self) -> cell::Ref<'_, IndexSet<BackPointer>> {
        self.backpointers.borrow()
    }

    /// Merge other Item into this one moving over its backpointers
    pub(crate) fn merge_sources(&self, other: Item) {
        assert_eq!(*self, other, "Items to merge should be Eq");
        let other_bp = other.backpointers.into_inner();
        self.backpointers.borrow_mut().extend(other_bp);
    }

    /// Advance the dot over the next symbol, ending at `end`.
    pub fn extend(self: &Rc<Self>, trigger: Trigger, end: usize) -> Item {
        let mut bp = IndexSet::new();
        bp.insert(match trigger {
            Trigger::Scan(token) => BackPointer::Scan(self.clone(), token),
            Trigger::Complete(child) => BackPointer::Complete(self.clone(), child),
        });
        Item{
            rule: self.rule.clone(),
            dot: self.dot + 1,
            start: self.start,
            end,
            backpointers: cell::RefCell::new(bp),
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

/// Items ending at the same input position. Iterates in insertion order.
#[derive(Default)]
pub struct StateSet {
    items: IndexSet<Rc<Item>>,
}

impl StateSet {
    // push an item into the set, merging back-pointers of an existing one
    pub fn push(&mut self, item: Item) {
        match self.items.get(&item) {
            Some(existent) => existent.merge_sources(item),
            None => { self.items.insert(Rc::new(item)); }
        }
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item=&Rc<Item>> { self.items.iter() }
}

impl Extend<Item> for StateSet {
    fn extend<I: IntoIterator<Item=Item>>(&mut self, iterable: I) {
        for item in iterable { self.push(item); }
    }
}

impl iter::FromIterator<Item> for StateSet {
    fn from_iter<I: IntoIterator<Item=Item>>(iterable: I) -> Self {
        let mut ss = StateSet::default();
        ss.extend(iterable);
        ss
    }
}

impl ops::Index<usize> for StateSet {
    type Output = Rc<Item>;
    fn index(&self, idx: usize) -> &Rc<Item> { &self.items[idx] }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

///////////////////////////////////////////////////////////////////////////////
