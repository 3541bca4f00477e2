//! Dictionary and node domain records.
//!
//! # Responsibility
//! - Define the cache-resident shapes for dictionaries and their nodes.
//! - Provide targeted patch helpers used by the store after remote calls.
//!
//! # Invariants
//! - `Dictionary::nodes` is identifier-unique; `upsert_node` replaces by id.
//! - `DictionaryNode::entry_ids` is duplicate-free; the store enforces set
//!   semantics before any assignment reaches the gateway.
//! - `parent_id == None` means root-level node.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Stable dictionary identifier.
pub type DictionaryId = Uuid;
/// Stable node identifier within a dictionary.
pub type NodeId = Uuid;
/// Identifier of a catalog entry assigned to a node (external entity).
pub type EntryId = Uuid;

/// A named hierarchical namespace containing nodes.
///
/// Owned exclusively by the cache: replaced wholesale on load/refresh,
/// patched in place on a successful single-dictionary mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    /// Stable global ID.
    pub id: DictionaryId,
    /// User-facing label.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Icon token rendered by the console.
    pub icon: String,
    /// Color token rendered by the console.
    pub color: String,
    /// Flat, identifier-unique node collection. Unordered; ordering lives
    /// in each node's `order` field relative to its siblings.
    #[serde(default)]
    pub nodes: Vec<DictionaryNode>,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Epoch ms update timestamp.
    pub updated_at: i64,
}

impl Dictionary {
    /// Returns one node by id.
    pub fn node(&self, node_id: NodeId) -> Option<&DictionaryNode> {
        self.nodes.iter().find(|node| node.id == node_id)
    }

    /// Returns one node by id for in-place patching.
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut DictionaryNode> {
        self.nodes.iter_mut().find(|node| node.id == node_id)
    }

    /// Replaces the node with the same id, or appends when absent.
    pub fn upsert_node(&mut self, node: DictionaryNode) {
        match self.nodes.iter_mut().find(|existing| existing.id == node.id) {
            Some(existing) => *existing = node,
            None => self.nodes.push(node),
        }
    }

    /// Removes every node whose id is in `ids`.
    pub fn remove_nodes(&mut self, ids: &HashSet<NodeId>) {
        self.nodes.retain(|node| !ids.contains(&node.id));
    }
}

/// One element of a dictionary's hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryNode {
    /// Stable global ID.
    pub id: NodeId,
    /// Owning dictionary.
    pub dictionary_id: DictionaryId,
    /// User-facing label.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Icon token rendered by the console.
    pub icon: String,
    /// Parent node id. `None` means root-level node.
    pub parent_id: Option<NodeId>,
    /// Sibling order key. Not required to be contiguous, only relatively
    /// ordered within one parent.
    pub order: i64,
    /// Assigned catalog entries, insertion-ordered and duplicate-free.
    #[serde(default)]
    pub entry_ids: Vec<EntryId>,
}

/// Read-only nested projection of one node, built fresh on every read.
///
/// Never the authoritative store of state; the flat node collection is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// The projected node.
    pub node: DictionaryNode,
    /// Recursively materialized children, sorted ascending by `order`.
    pub children: Vec<TreeNode>,
}

/// Creation request for one dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryDraft {
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
}

/// Full-replacement update request for one dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryPatch {
    pub id: DictionaryId,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
}

/// Creation request for one node. The owning dictionary travels as a
/// separate gateway argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDraft {
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub parent_id: Option<NodeId>,
    pub order: i64,
}

/// Update request for one node's own fields. Structural fields (parent,
/// order) move through the dedicated move operation instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePatch {
    pub id: NodeId,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::{Dictionary, DictionaryNode};
    use std::collections::HashSet;
    use uuid::Uuid;

    fn sample_node(dictionary: &Dictionary, name: &str) -> DictionaryNode {
        DictionaryNode {
            id: Uuid::new_v4(),
            dictionary_id: dictionary.id,
            name: name.to_string(),
            description: None,
            icon: "folder".to_string(),
            parent_id: None,
            order: 0,
            entry_ids: Vec::new(),
        }
    }

    fn sample_dictionary() -> Dictionary {
        Dictionary {
            id: Uuid::new_v4(),
            name: "Plant equipment".to_string(),
            description: None,
            icon: "database".to_string(),
            color: "blue".to_string(),
            nodes: Vec::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn upsert_node_replaces_by_id_instead_of_appending() {
        let mut dictionary = sample_dictionary();
        let mut node = sample_node(&dictionary, "Line 1");
        dictionary.upsert_node(node.clone());
        assert_eq!(dictionary.nodes.len(), 1);

        node.name = "Line 2".to_string();
        dictionary.upsert_node(node.clone());
        assert_eq!(dictionary.nodes.len(), 1);
        assert_eq!(dictionary.node(node.id).unwrap().name, "Line 2");
    }

    #[test]
    fn remove_nodes_drops_only_listed_ids() {
        let mut dictionary = sample_dictionary();
        let keep = sample_node(&dictionary, "Keep");
        let drop = sample_node(&dictionary, "Drop");
        dictionary.upsert_node(keep.clone());
        dictionary.upsert_node(drop.clone());

        let mut ids = HashSet::new();
        ids.insert(drop.id);
        dictionary.remove_nodes(&ids);

        assert_eq!(dictionary.nodes.len(), 1);
        assert_eq!(dictionary.nodes[0].id, keep.id);
    }
}
