//! Entity gateway contract for dictionary and node resources.
//!
//! # Responsibility
//! - Define the narrow capability interface the store depends on.
//! - Keep transport details (HTTP client, serialization) outside the core.
//!
//! # Invariants
//! - Gateway calls return whole-resource snapshots or fail; the store
//!   treats responses, never request payloads, as the source of truth.
//! - The store never inspects failure shape beyond its display text.

use crate::model::dictionary::{
    Dictionary, DictionaryDraft, DictionaryId, DictionaryNode, DictionaryPatch, EntryId, NodeDraft,
    NodeId, NodePatch,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors from gateway operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Request never produced a usable response (connectivity, timeout).
    Transport(String),
    /// Server answered with a failure status.
    Remote { status: u16, message: String },
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(details) => write!(f, "gateway transport failure: {details}"),
            Self::Remote { status, message } => {
                write!(f, "gateway remote failure ({status}): {message}")
            }
        }
    }
}

impl Error for GatewayError {}

/// Remote operations over dictionaries and their nodes.
///
/// Implementations wrap the console's HTTP client; tests use in-memory
/// doubles. The server owns cascading semantics (deleting a node deletes
/// its subtree remotely); the store mirrors that cascade locally.
pub trait DictionaryGateway {
    /// Lists all dictionaries, optionally with their node collections.
    fn list_dictionaries(&self, include_nodes: bool) -> GatewayResult<Vec<Dictionary>>;
    /// Loads one dictionary including its nodes.
    fn get_dictionary(&self, id: DictionaryId) -> GatewayResult<Dictionary>;
    /// Creates dictionaries in bulk, returning the created records.
    fn create_dictionaries(&self, drafts: &[DictionaryDraft]) -> GatewayResult<Vec<Dictionary>>;
    /// Replaces one dictionary's own fields, returning the updated record.
    fn update_dictionary(&self, patch: &DictionaryPatch) -> GatewayResult<Dictionary>;
    /// Deletes dictionaries in bulk.
    fn delete_dictionaries(&self, ids: &[DictionaryId]) -> GatewayResult<()>;
    /// Lists nodes of one dictionary, optionally filtered by id.
    fn list_nodes(
        &self,
        dictionary_id: DictionaryId,
        ids: Option<&[NodeId]>,
    ) -> GatewayResult<Vec<DictionaryNode>>;
    /// Creates one node, returning the record with its server-assigned id.
    fn create_node(
        &self,
        dictionary_id: DictionaryId,
        draft: &NodeDraft,
    ) -> GatewayResult<DictionaryNode>;
    /// Updates one node's own fields, returning the updated record.
    fn update_node(
        &self,
        dictionary_id: DictionaryId,
        patch: &NodePatch,
    ) -> GatewayResult<DictionaryNode>;
    /// Reparents and reorders one node.
    fn move_node(
        &self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        new_parent_id: Option<NodeId>,
        new_order: i64,
    ) -> GatewayResult<()>;
    /// Deletes one node; the server cascades to its subtree.
    fn delete_node(&self, dictionary_id: DictionaryId, node_id: NodeId) -> GatewayResult<()>;
    /// Replaces one node's full entry-assignment set.
    fn assign_entries(
        &self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        entry_ids: &[EntryId],
    ) -> GatewayResult<()>;
    /// Adds one entry assignment.
    fn add_entry(
        &self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        entry_id: EntryId,
    ) -> GatewayResult<()>;
    /// Removes one entry assignment.
    fn remove_entry(
        &self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        entry_id: EntryId,
    ) -> GatewayResult<()>;
}
