#![deny(warnings)]

use crate::grammar::Symbol;
use crate::items::{BackPointer, Item};
use std::fmt;
use std::rc::Rc;


/// A concrete derivation. Leaves hold the matched token (which is also the
/// name of the terminal that matched it).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tree {
    // "dog"
    Leaf(String),
    // ("NP", [Node("Det", [Leaf("the")]), Node("N", [Leaf("dog")])])
    Node(String, Vec<Tree>),
}

impl Tree {
    pub fn label(&self) -> &str {
        match self {
            Tree::Leaf(token) => token,
            Tree::Node(head, _) => head,
        }
    }

    pub fn symbol(&self) -> Symbol {
        match self {
            Tree::Leaf(token) => Symbol::Terminal(token.clone()),
            Tree::Node(head, _) => Symbol::Nonterminal(head.clone()),
        }
    }

    pub fn children(&self) -> &[Tree] {
        match self {
            Tree::Leaf(_) => &[],
            Tree::Node(_, children) => children,
        }
    }

    /// Whether this is an internal node labelled `label`
    pub fn is_node(&self, label: &str) -> bool {
        matches!(self, Tree::Node(head, _) if head == label)
    }

    /// Pre-order walk over this tree and all of its descendants
    pub fn subtrees(&self) -> Subtrees<'_> {
        Subtrees{stack: vec![self]}
    }

    /// Tokens at the leaves, left to right
    pub fn leaves(&self) -> Vec<&str> {
        self.subtrees()
            .filter_map(|t| match t {
                Tree::Leaf(token) => Some(token.as_str()),
                Tree::Node(..) => None,
            })
            .collect()
    }

    /// Indented multi-line drawing of the tree
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_helper("", &mut out);
        out
    }

    fn render_helper(&self, level: &str, out: &mut String) {
        match self {
            Tree::Leaf(token) => {
                *out += &format!("{}`-- {:?}\n", level, token);
            }
            Tree::Node(head, children) => {
                *out += &format!("{}`-- {}\n", level, head);
                if let Some((last, rest)) = children.split_last() {
                    let l = format!("{}  |", level);
                    for n in rest { n.render_helper(&l, out); }
                    let l = format!("{}   ", level);
                    last.render_helper(&l, out);
                }
            }
        }
    }
}

// Bracketed form: (S (NP (N holmes)) (VP (V sat)))
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tree::Leaf(token) => write!(f, "{}", token),
            Tree::Node(head, children) => {
                write!(f, "({}", head)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

pub struct Subtrees<'t> {
    stack: Vec<&'t Tree>,
}

impl<'t> Iterator for Subtrees<'t> {
    type Item = &'t Tree;
    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.stack.pop()?;
        self.stack.extend(tree.children().iter().rev());
        Some(tree)
    }
}

///////////////////////////////////////////////////////////////////////////////

/*
    ## S -> S + N | N
    ## N -> [0-9]
    ## "1 + 2"

                 S -> S + N.
                    /  \
                   /    \
              S +.N     N -> [0-9].
               / \             / \
              /   \           /   \
           S.+ N   "+"    .[0-9]   "2"
             /\
            /  \
       .S + N   S -> N.
                  /\
                 /  \
               .N    N -> [0-9].
                       / \
                      /   \
                  .[0-9]   "1"

   The chart is unwound from a root, right to left. Completed items open a
   rule, their sources are followed back to the item with dot at 0 where the
   rule's arguments are reduced into a Node. Items with several sources fork
   the walk, one path per alternative.
*/

#[derive(Clone, Debug)]
struct ForestPath {
    // Subtrees built so far, rightmost first within each open rule
    args: Vec<Tree>,
    // Completed Items whose rule is being unwound (ancestors of the cursor)
    completions: Vec<Rc<Item>>,
    // Items left to unwind
    spans: Vec<Rc<Item>>,
}

impl ForestPath {
    fn new(root: &Rc<Item>) -> Self {
        ForestPath{args: Vec::new(), completions: Vec::new(), spans: vec![root.clone()]}
    }

    fn expanding(&self, item: &Rc<Item>) -> bool {
        self.completions.iter().any(|open| Rc::ptr_eq(open, item))
    }

    fn follow(&mut self, backpointer: BackPointer) {
        match backpointer {
            // Scan sources -> lift scanned tokens into leaves
            BackPointer::Scan(source, token) => {
                self.args.push(Tree::Leaf(token));
                self.spans.push(source);
            }
            // Completion sources -> the child is unwound before its left siblings
            BackPointer::Complete(source, child) => {
                self.spans.push(source);
                self.spans.push(child);
            }
        }
    }

    fn reduce(&mut self, cursor: &Item) {
        let completed = self.completions.pop().expect("BUG: span rule never completed");
        assert_eq!(completed.rule, cursor.rule, "BUG: unwound into a different rule");
        let num_rule_slots = completed.rule.spec.len();
        // Get input nodes for this reduction. Stored reversed.
        let children = self.args.split_off(self.args.len() - num_rule_slots)
            .into_iter().rev().collect();
        self.args.push(Tree::Node(completed.rule.head.clone(), children));
    }

    /// Unwind until the path yields a tree. Alternatives other than the first
    /// one are pushed to `forks`. A path whose only ways forward re-enter an
    /// Item already being expanded is a cycle and gets dropped.
    fn walk(mut self, forks: &mut Vec<ForestPath>) -> Option<Tree> {
        while let Some(cursor) = self.spans.pop() {
            // As the chart is unwound keep a record of rules to reduce
            if cursor.complete() {
                self.completions.push(cursor.clone());
            }
            if cursor.dot == 0 {
                self.reduce(&cursor);
                continue;
            }
            let mut alternatives = cursor.sources().iter()
                .filter(|bp| match bp {
                    BackPointer::Complete(_, child) => !self.expanding(child),
                    BackPointer::Scan(..) => true,
                })
                .cloned()
                .collect::<Vec<_>>()
                .into_iter();
            let first = alternatives.next()?;
            for backpointer in alternatives.rev() {
                let mut fork = self.clone();
                fork.follow(backpointer);
                forks.push(fork);
            }
            self.follow(first);
        }
        assert_eq!(self.args.len(), 1, "BUG: mismatched reduce args");
        self.args.pop()
    }
}

/// Lazy sequence of every parse tree in a Chart. Order is stable for a given
/// chart: roots in chart order, then backpointers in the order they were found.
pub struct Trees {
    paths: Vec<ForestPath>,
}

impl Trees {
    pub(crate) fn new(roots: &[Rc<Item>]) -> Self {
        Trees{paths: roots.iter().rev().map(ForestPath::new).collect()}
    }
}

impl Iterator for Trees {
    type Item = Tree;
    fn next(&mut self) -> Option<Tree> {
        while let Some(path) = self.paths.pop() {
            if let Some(tree) = path.walk(&mut self.paths) {
                return Some(tree);
            }
        }
        None
    }
}

///////////////////////////////////////////////////////////////////////////////
