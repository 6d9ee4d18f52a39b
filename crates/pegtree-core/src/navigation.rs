//! Path and label addressing over partially-built parse trees.
//!
//! Both schemes operate on a slice of sibling nodes (typically a context's
//! current subnode accumulator) and deliver results in pre-order, with
//! ties at the same depth broken by insertion order.
//!
//! A path is a `/`-separated sequence of label prefixes. Resolution is
//! depth-first, left-to-right: at each level, children whose label starts
//! with the head segment are considered in order, recursing with the path
//! tail. The trailing segment resolves at its own level.

use crate::tree::ParseNode;

/// First node addressed by `path`, or `None`.
///
/// Equivalent to the first element of [`collect_by_path`]: a child whose
/// label matches a segment but whose subtree has no match for the rest of
/// the path does not block later siblings.
pub fn find_by_path<'a, V>(nodes: &'a [ParseNode<V>], path: &str) -> Option<&'a ParseNode<V>> {
    let segments: Vec<&str> = path.split('/').collect();
    find_segments(nodes, &segments)
}

/// All nodes addressed by `path`, in pre-order.
pub fn collect_by_path<'a, V>(nodes: &'a [ParseNode<V>], path: &str) -> Vec<&'a ParseNode<V>> {
    let segments: Vec<&str> = path.split('/').collect();
    let mut out = Vec::new();
    collect_segments(nodes, &segments, &mut out);
    out
}

/// All nodes whose label starts with `prefix`, in pre-order over the
/// whole forest (matched nodes are still descended into).
pub fn collect_by_label<'a, V>(nodes: &'a [ParseNode<V>], prefix: &str) -> Vec<&'a ParseNode<V>> {
    let mut out = Vec::new();
    collect_label(nodes, prefix, &mut out);
    out
}

fn find_segments<'a, V>(nodes: &'a [ParseNode<V>], segments: &[&str]) -> Option<&'a ParseNode<V>> {
    let (head, tail) = segments.split_first()?;
    for node in nodes {
        if !node.label.starts_with(head) {
            continue;
        }
        if tail.is_empty() {
            return Some(node);
        }
        if let Some(found) = find_segments(&node.children, tail) {
            return Some(found);
        }
    }
    None
}

fn collect_segments<'a, V>(
    nodes: &'a [ParseNode<V>],
    segments: &[&str],
    out: &mut Vec<&'a ParseNode<V>>,
) {
    let Some((head, tail)) = segments.split_first() else {
        return;
    };
    for node in nodes {
        if !node.label.starts_with(head) {
            continue;
        }
        if tail.is_empty() {
            out.push(node);
        } else {
            collect_segments(&node.children, tail, out);
        }
    }
}

fn collect_label<'a, V>(nodes: &'a [ParseNode<V>], prefix: &str, out: &mut Vec<&'a ParseNode<V>>) {
    for node in nodes {
        if node.label.starts_with(prefix) {
            out.push(node);
        }
        collect_label(&node.children, prefix, out);
    }
}
