//! Depth-first traversal of the Figma document tree.

use std::collections::HashSet;

use super::api_types::Node;

/// Whether a traversal should keep going after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Continue,
    Stop,
}

/// Pre-order walk starting at `root`.
///
/// Returns the node at which `visit` returned [`Walk::Stop`], if any. A node
/// whose id was already visited is skipped together with its subtree, so
/// malformed input that repeats ids cannot cause repeated work. Nodes without
/// an id are always visited.
pub fn walk<'a, F>(root: &'a Node, mut visit: F) -> Option<&'a Node>
where
    F: FnMut(&'a Node) -> Walk,
{
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if !node.id.is_empty() && !seen.insert(node.id.as_str()) {
            log::debug!("skipping repeated node id {}", node.id);
            continue;
        }
        if visit(node) == Walk::Stop {
            return Some(node);
        }
        stack.extend(node.children.iter().rev());
    }

    None
}

/// Call `visit` on every node of the tree.
pub fn for_each_node<'a, F>(root: &'a Node, mut visit: F)
where
    F: FnMut(&'a Node),
{
    walk(root, |node| {
        visit(node);
        Walk::Continue
    });
}

/// First node in pre-order whose id equals `id`.
pub fn find_node_by_id<'a>(root: &'a Node, id: &str) -> Option<&'a Node> {
    walk(root, |node| {
        if node.id == id {
            Walk::Stop
        } else {
            Walk::Continue
        }
    })
}

/// All nodes matching `predicate`, in pre-order.
pub fn collect_nodes<'a, P>(root: &'a Node, mut predicate: P) -> Vec<&'a Node>
where
    P: FnMut(&Node) -> bool,
{
    let mut found = Vec::new();
    for_each_node(root, |node| {
        if predicate(node) {
            found.push(node);
        }
    });
    found
}
