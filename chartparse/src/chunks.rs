#![deny(warnings)]

use crate::trees::Tree;

/// Label of noun-phrase nodes in the sentence grammars
pub const NOUN_PHRASE: &str = "NP";

/// Minimal noun phrases of `tree`: `NP` subtrees with no `NP` below them,
/// left to right.
pub fn noun_phrase_chunks(tree: &Tree) -> Vec<&Tree> {
    chunks_labelled(tree, NOUN_PHRASE)
}

/// Subtrees labelled `label` that contain no other subtree with that label,
/// in pre-order. The chunks borrow from `tree`.
pub fn chunks_labelled<'t>(tree: &'t Tree, label: &str) -> Vec<&'t Tree> {
    let mut chunks = Vec::new();
    collect(tree, label, &mut chunks);
    chunks
}

fn collect<'t>(tree: &'t Tree, label: &str, chunks: &mut Vec<&'t Tree>) {
    if tree.is_node(label) && !tree.subtrees().skip(1).any(|t| t.is_node(label)) {
        chunks.push(tree);
        return;
    }
    for child in tree.children() {
        collect(child, label, chunks);
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(token: &str) -> Tree { Tree::Leaf(token.to_string()) }
    fn node(head: &str, children: Vec<Tree>) -> Tree { Tree::Node(head.to_string(), children) }

    fn flat(chunks: &[&Tree]) -> Vec<String> {
        chunks.iter().map(|chunk| chunk.leaves().join(" ")).collect()
    }

    #[test]
    fn single_chunk() {
        let tree = node("S", vec![
            node("NP", vec![node("Det", vec![leaf("the")]), node("N", vec![leaf("dog")])]),
            node("VP", vec![node("V", vec![leaf("barked")])]),
        ]);
        let chunks = noun_phrase_chunks(&tree);
        assert_eq!(flat(&chunks), vec!["the dog"]);
        assert!(std::ptr::eq(chunks[0], &tree.children()[0]));
    }

    #[test]
    fn nested_noun_phrases() {
        // (NP (NP (Det the) (N man)) (PP (P with) (NP (Det a) (N pipe))))
        let tree = node("S", vec![
            node("NP", vec![
                node("NP", vec![node("Det", vec![leaf("the")]), node("N", vec![leaf("man")])]),
                node("PP", vec![
                    node("P", vec![leaf("with")]),
                    node("NP", vec![node("Det", vec![leaf("a")]), node("N", vec![leaf("pipe")])]),
                ]),
            ]),
            node("VP", vec![node("V", vec![leaf("smiled")])]),
        ]);
        assert_eq!(flat(&noun_phrase_chunks(&tree)), vec!["the man", "a pipe"]);
    }

    #[test]
    fn leaves_do_not_count_as_labels() {
        // a token spelled like the label is not a noun phrase
        let tree = node("NP", vec![node("N", vec![leaf("NP")])]);
        assert_eq!(flat(&noun_phrase_chunks(&tree)), vec!["NP"]);
    }

    #[test]
    fn no_chunks() {
        let tree = node("S", vec![node("VP", vec![node("V", vec![leaf("smiled")])])]);
        assert!(noun_phrase_chunks(&tree).is_empty());
        assert_eq!(flat(&chunks_labelled(&tree, "VP")), vec!["smiled"]);
    }
}
