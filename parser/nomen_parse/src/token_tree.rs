//! Nesting the flat token array into a tree.
//!
//! The engine records tokens children-first (a rule's children are pushed
//! while its body runs, the rule itself after it succeeds). Nesting is
//! therefore a single stack pass: each new token absorbs every stack entry
//! its span contains.

use crate::engine::Token;
use crate::rule::Rule;

/// A node of the parse tree. Spans are rune offsets into the buffer.
#[derive(Clone, Debug)]
pub struct Node {
    pub rule: Rule,
    pub start: usize,
    pub end: usize,
    pub children: Vec<Node>,
}

impl Node {
    /// First child produced by `rule`.
    pub fn child(&self, rule: Rule) -> Option<&Node> {
        self.children.iter().find(|c| c.rule == rule)
    }

    /// All children produced by `rule`, in source order.
    pub fn children_of(&self, rule: Rule) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(move |c| c.rule == rule)
    }
}

/// Build the tree from the recorded token array.
///
/// Empty tokens (zero-width matches such as an absent tail) are dropped.
/// Returns the root node, normally `SciName`.
pub fn build(tokens: &[Token]) -> Option<Node> {
    let mut stack: Vec<Node> = Vec::new();
    for token in tokens {
        if token.start == token.end {
            continue;
        }
        let mut node = Node {
            rule: token.rule,
            start: token.start as usize,
            end: token.end as usize,
            children: Vec::new(),
        };
        while let Some(top) = stack.last() {
            if top.start >= node.start && top.end <= node.end {
                let child = stack.pop().expect("checked non-empty");
                node.children.insert(0, child);
            } else {
                break;
            }
        }
        stack.push(node);
    }
    stack.pop()
}

/// Render the tree for the tracing side-channel.
pub fn render(node: &Node, buffer_text: &dyn Fn(usize, usize) -> String) -> String {
    let mut out = String::new();
    render_into(node, buffer_text, 0, &mut out);
    out
}

fn render_into(
    node: &Node,
    buffer_text: &dyn Fn(usize, usize) -> String,
    depth: usize,
    out: &mut String,
) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(node.rule.name());
    out.push(' ');
    out.push_str(&format!("{:?}\n", buffer_text(node.start, node.end)));
    for child in &node.children {
        render_into(child, buffer_text, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(rule: Rule, start: u32, end: u32) -> Token {
        Token { rule, start, end }
    }

    #[test]
    fn nests_children_under_parents() {
        // "Aus bus": Word at 4..7, SpeciesEpithet at 4..7, GenusWord 0..3,
        // SciName 0..7 — children recorded before parents.
        let tokens = vec![
            tok(Rule::UninomialWord, 0, 3),
            tok(Rule::GenusWord, 0, 3),
            tok(Rule::Word, 4, 7),
            tok(Rule::SpeciesEpithet, 4, 7),
            tok(Rule::NameSpecies, 0, 7),
            tok(Rule::SciName, 0, 7),
        ];
        let root = build(&tokens).expect("root");
        assert_eq!(root.rule, Rule::SciName);
        assert_eq!(root.children.len(), 1);
        let species = &root.children[0];
        assert_eq!(species.rule, Rule::NameSpecies);
        let rules: Vec<Rule> = species.children.iter().map(|c| c.rule).collect();
        assert_eq!(rules, vec![Rule::GenusWord, Rule::SpeciesEpithet]);
        assert_eq!(species.children[1].children[0].rule, Rule::Word);
    }

    #[test]
    fn drops_empty_tokens() {
        let tokens = vec![tok(Rule::Tail, 7, 7), tok(Rule::SciName, 0, 7)];
        let root = build(&tokens).expect("root");
        assert!(root.children.is_empty());
    }

    #[test]
    fn empty_input_has_no_tree() {
        assert!(build(&[]).is_none());
    }

    #[test]
    fn identical_spans_nest_by_order() {
        let tokens = vec![tok(Rule::RankVar, 0, 4), tok(Rule::Rank, 0, 4)];
        let root = build(&tokens).expect("root");
        assert_eq!(root.rule, Rule::Rank);
        assert_eq!(root.children[0].rule, Rule::RankVar);
    }
}
