//! Pure hierarchy logic over flat node collections.
//!
//! # Responsibility
//! - Materialize the nested tree projection from a flat node list.
//! - Detect parent-link cycles before a move mutation is issued.
//! - Compute downward subtree closures for cascading cache removal.
//!
//! # Invariants
//! - Sibling order is deterministic: `order ASC, id ASC`.
//! - A node whose declared parent is absent from the collection is
//!   invisible in the materialized tree (neither hoisted nor reported).
//! - The cycle walk terminates on corrupt input via a visited-set guard.

use crate::model::dictionary::{DictionaryNode, NodeId, TreeNode};
use std::collections::HashSet;

/// Materializes the full forest from root.
pub fn materialize_forest(nodes: &[DictionaryNode]) -> Vec<TreeNode> {
    materialize_children(nodes, None)
}

/// Materializes the subtrees whose nodes declare `parent_id` as parent.
///
/// Pure and deterministic; safe to call on every read.
pub fn materialize_children(nodes: &[DictionaryNode], parent_id: Option<NodeId>) -> Vec<TreeNode> {
    let mut level: Vec<&DictionaryNode> = nodes
        .iter()
        .filter(|node| node.parent_id == parent_id)
        .collect();
    level.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));

    level
        .into_iter()
        .map(|node| TreeNode {
            node: node.clone(),
            children: materialize_children(nodes, Some(node.id)),
        })
        .collect()
}

/// Returns whether moving `moving_id` under `candidate_parent_id` would
/// make the node its own ancestor.
///
/// Walks parent links upward from the candidate parent until a root or a
/// missing node is reached. A candidate equal to the node's current parent
/// reports no cycle, so no-op moves pass through for idempotency.
pub fn would_create_cycle(
    nodes: &[DictionaryNode],
    moving_id: NodeId,
    candidate_parent_id: NodeId,
) -> bool {
    let mut visited = HashSet::new();
    let mut cursor = Some(candidate_parent_id);
    while let Some(current) = cursor {
        if current == moving_id {
            return true;
        }
        if !visited.insert(current) {
            // Pre-existing cycle in the input; refuse to extend it.
            return true;
        }
        cursor = nodes
            .iter()
            .find(|node| node.id == current)
            .and_then(|node| node.parent_id);
    }
    false
}

/// Returns `root_id` plus every node whose parent chain passes through it.
pub fn subtree_ids(nodes: &[DictionaryNode], root_id: NodeId) -> HashSet<NodeId> {
    let mut result = HashSet::new();
    result.insert(root_id);
    let mut frontier = vec![root_id];
    while let Some(current) = frontier.pop() {
        for node in nodes.iter().filter(|node| node.parent_id == Some(current)) {
            if result.insert(node.id) {
                frontier.push(node.id);
            }
        }
    }
    result
}
