//! Checkbox selection over a built tree
//!
//! Selection never mutates the tree it is given; every change returns a new
//! tree so a caller holding the previous one keeps a consistent snapshot.

use std::collections::HashSet;

use super::TreeNode;

/// Return a copy of `tree` with the node `id` (and its whole subtree) set to
/// `checked`.
///
/// Only the first node with a matching id, in depth-first order, is changed.
/// Each ancestor of that node becomes checked exactly when all of its
/// children are. An unknown id yields an unchanged copy.
pub fn set_checked(tree: &[TreeNode], id: &str, checked: bool) -> Vec<TreeNode> {
    let mut next = tree.to_vec();
    update(&mut next, id, checked);
    next
}

/// Ids of checked nodes accepted by `filter`, depth-first, without repeats
pub fn checked_ids<F>(tree: &[TreeNode], filter: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    let mut stack: Vec<&TreeNode> = tree.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if node.checked && filter(&node.id) && seen.insert(node.id.as_str()) {
            ids.push(node.id.clone());
        }
        stack.extend(node.children().iter().rev());
    }
    ids
}

fn update(nodes: &mut [TreeNode], id: &str, checked: bool) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            mark(node, checked);
            return true;
        }

        if let Some(children) = node.children.as_mut() {
            if update(children, id, checked) {
                if !children.is_empty() {
                    node.checked = children.iter().all(|c| c.checked);
                }
                return true;
            }
        }
    }
    false
}

fn mark(node: &mut TreeNode, checked: bool) {
    node.checked = checked;
    for child in node.children.iter_mut().flatten() {
        mark(child, checked);
    }
}
