//! Client-side dictionary cache and mutation coordinator.
//!
//! # Responsibility
//! - Own the cached dictionary collection, selection, loading flag, and
//!   error slot consumed by views.
//! - Apply each mutation against the gateway and patch the cache by
//!   identifier on success, never by positional index.
//!
//! # Invariants
//! - Errors never propagate past this boundary: callers observe failure
//!   as `None` plus a fixed, operation-scoped message in the error slot.
//! - Only the last error is retained; every operation clears it on entry.
//! - Cycle-creating moves are rejected before any gateway call.
//! - The cache is not durable; it stays empty until the first load.
//!
//! Mutations are not reentrant-guarded: two racing calls on the same node
//! resolve as last-response-wins, matching the console's accepted
//! best-effort consistency model.

pub mod refresh;
pub mod templates;

use crate::gateway::{DictionaryGateway, GatewayError};
use crate::model::dictionary::{
    Dictionary, DictionaryDraft, DictionaryId, DictionaryNode, DictionaryPatch, EntryId, NodeDraft,
    NodeId, NodePatch, TreeNode,
};
use crate::model::template::NodeTemplate;
use crate::store::refresh::RefreshMode;
use crate::tree::{materialize_forest, subtree_ids, would_create_cycle};
use log::{info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

const ERR_LOAD_DICTIONARIES: &str = "Failed to load dictionaries";
const ERR_CREATE_DICTIONARY: &str = "Failed to create dictionary";
const ERR_UPDATE_DICTIONARY: &str = "Failed to update dictionary";
const ERR_DELETE_DICTIONARY: &str = "Failed to delete dictionary";
const ERR_ADD_NODE: &str = "Failed to add node";
const ERR_UPDATE_NODE: &str = "Failed to update node";
const ERR_DELETE_NODE: &str = "Failed to delete node";
const ERR_MOVE_NODE: &str = "Failed to move node";
const ERR_MOVE_CYCLE: &str = "Cannot move node: would create circular reference";
const ERR_ASSIGN_ENTRIES: &str = "Failed to assign entries";
const ERR_ADD_ENTRIES: &str = "Failed to add entries";
const ERR_REMOVE_ENTRY: &str = "Failed to remove entry";
pub(crate) const ERR_EXPAND_TEMPLATE: &str = "Failed to expand template";

/// Dictionary store facade over a gateway implementation.
pub struct DictionaryStore<G: DictionaryGateway> {
    pub(crate) gateway: G,
    pub(crate) dictionaries: Vec<Dictionary>,
    pub(crate) selected_id: Option<DictionaryId>,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
    pub(crate) last_refreshed_at_ms: Option<i64>,
}

impl<G: DictionaryGateway> DictionaryStore<G> {
    /// Creates an empty store over the provided gateway.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            dictionaries: Vec::new(),
            selected_id: None,
            loading: false,
            error: None,
            last_refreshed_at_ms: None,
        }
    }

    /// Returns the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // Read-only projections.

    /// Returns the cached dictionary collection.
    pub fn dictionaries(&self) -> &[Dictionary] {
        &self.dictionaries
    }

    /// Returns one cached dictionary by id.
    pub fn dictionary(&self, id: DictionaryId) -> Option<&Dictionary> {
        self.dictionaries.iter().find(|dictionary| dictionary.id == id)
    }

    /// Returns one cached node by id.
    pub fn node(&self, dictionary_id: DictionaryId, node_id: NodeId) -> Option<&DictionaryNode> {
        self.dictionary(dictionary_id)?.node(node_id)
    }

    /// Returns whether a blocking foreground operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the last operation's error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the currently selected dictionary id.
    pub fn selected_id(&self) -> Option<DictionaryId> {
        self.selected_id
    }

    /// Returns the currently selected dictionary, if still cached.
    pub fn selected_dictionary(&self) -> Option<&Dictionary> {
        self.dictionary(self.selected_id?)
    }

    /// Materializes the selected dictionary's tree, fresh on every call.
    pub fn selected_tree(&self) -> Vec<TreeNode> {
        match self.selected_dictionary() {
            Some(dictionary) => materialize_forest(&dictionary.nodes),
            None => Vec::new(),
        }
    }

    /// Returns when the cache was last replaced from the remote source.
    pub fn last_refreshed_at_ms(&self) -> Option<i64> {
        self.last_refreshed_at_ms
    }

    /// Selects the dictionary to project, or clears the selection.
    pub fn select_dictionary(&mut self, id: Option<DictionaryId>) {
        self.selected_id = id;
    }

    // Dictionary mutations.

    /// Performs the initial blocking load of all dictionaries with nodes.
    pub fn load(&mut self) -> Option<usize> {
        self.loading = true;
        let result = self.refresh(RefreshMode::Foreground);
        self.loading = false;
        result
    }

    /// Creates one dictionary, optionally expanding a node template into it.
    ///
    /// With a template, the dictionary is reloaded wholesale afterwards:
    /// expansion produces many nodes whose identifiers are only known after
    /// each round trip.
    pub fn create_dictionary(
        &mut self,
        draft: &DictionaryDraft,
        template: Option<&[NodeTemplate]>,
    ) -> Option<Dictionary> {
        self.error = None;
        self.loading = true;
        let created = match self.gateway.create_dictionaries(std::slice::from_ref(draft)) {
            Ok(mut created) if !created.is_empty() => created.remove(0),
            Ok(_) => {
                self.loading = false;
                warn!("event=dictionary_create_failed module=store error=empty_response");
                self.error = Some(ERR_CREATE_DICTIONARY.to_string());
                return None;
            }
            Err(err) => {
                self.loading = false;
                return self.fail(ERR_CREATE_DICTIONARY, "dictionary_create_failed", &err);
            }
        };
        info!(
            "event=dictionary_created module=store dictionary_id={}",
            created.id
        );
        self.dictionaries.push(created.clone());

        let Some(templates) = template else {
            self.loading = false;
            return Some(created);
        };

        let expanded = self.expand_template(created.id, templates).is_some();
        let reload = self.gateway.get_dictionary(created.id);
        self.loading = false;
        match reload {
            Ok(reloaded) => {
                let result = expanded.then(|| reloaded.clone());
                self.replace_dictionary(reloaded);
                result
            }
            Err(err) => {
                // Keep the more specific expansion error when both failed.
                warn!("event=dictionary_reload_failed module=store error={err}");
                if expanded {
                    self.error = Some(ERR_CREATE_DICTIONARY.to_string());
                }
                None
            }
        }
    }

    /// Updates one dictionary's own fields, patching the cached record in
    /// place from the response and preserving its node collection.
    pub fn update_dictionary(&mut self, patch: &DictionaryPatch) -> Option<Dictionary> {
        self.error = None;
        let updated = match self.gateway.update_dictionary(patch) {
            Ok(updated) => updated,
            Err(err) => return self.fail(ERR_UPDATE_DICTIONARY, "dictionary_update_failed", &err),
        };
        if let Some(cached) = self.dictionary_mut(updated.id) {
            cached.name = updated.name.clone();
            cached.description = updated.description.clone();
            cached.icon = updated.icon.clone();
            cached.color = updated.color.clone();
            cached.updated_at = updated.updated_at;
        }
        Some(updated)
    }

    /// Deletes one dictionary, clearing the selection when it pointed at it.
    pub fn delete_dictionary(&mut self, id: DictionaryId) -> Option<()> {
        self.error = None;
        self.loading = true;
        let result = self.gateway.delete_dictionaries(&[id]);
        self.loading = false;
        if let Err(err) = result {
            return self.fail(ERR_DELETE_DICTIONARY, "dictionary_delete_failed", &err);
        }
        self.dictionaries.retain(|dictionary| dictionary.id != id);
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
        info!("event=dictionary_deleted module=store dictionary_id={id}");
        Some(())
    }

    // Node mutations. None of these raise the loading flag: a node-level
    // edit must not block the whole view.

    /// Creates one node and patches it into the owning dictionary.
    pub fn add_node(
        &mut self,
        dictionary_id: DictionaryId,
        draft: &NodeDraft,
    ) -> Option<DictionaryNode> {
        self.error = None;
        let created = match self.gateway.create_node(dictionary_id, draft) {
            Ok(created) => created,
            Err(err) => return self.fail(ERR_ADD_NODE, "node_add_failed", &err),
        };
        if let Some(dictionary) = self.dictionary_mut(dictionary_id) {
            dictionary.upsert_node(created.clone());
        }
        Some(created)
    }

    /// Updates one node's own fields and patches the cached record by id.
    pub fn update_node(
        &mut self,
        dictionary_id: DictionaryId,
        patch: &NodePatch,
    ) -> Option<DictionaryNode> {
        self.error = None;
        let updated = match self.gateway.update_node(dictionary_id, patch) {
            Ok(updated) => updated,
            Err(err) => return self.fail(ERR_UPDATE_NODE, "node_update_failed", &err),
        };
        if let Some(dictionary) = self.dictionary_mut(dictionary_id) {
            dictionary.upsert_node(updated.clone());
        }
        Some(updated)
    }

    /// Deletes one node remotely and removes it plus its whole subtree from
    /// the cache, mirroring the server-side cascade without a second fetch.
    pub fn delete_node(&mut self, dictionary_id: DictionaryId, node_id: NodeId) -> Option<()> {
        self.error = None;
        if let Err(err) = self.gateway.delete_node(dictionary_id, node_id) {
            return self.fail(ERR_DELETE_NODE, "node_delete_failed", &err);
        }
        if let Some(dictionary) = self.dictionary_mut(dictionary_id) {
            let doomed = subtree_ids(&dictionary.nodes, node_id);
            dictionary.remove_nodes(&doomed);
        }
        Some(())
    }

    /// Reparents and reorders one node.
    ///
    /// Rejected locally, before any gateway call, when the destination
    /// parent is a descendant of the moving node.
    pub fn move_node(
        &mut self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        new_parent_id: Option<NodeId>,
        new_order: i64,
    ) -> Option<()> {
        self.error = None;
        if let Some(parent_id) = new_parent_id {
            let nodes = match self.dictionary(dictionary_id) {
                Some(dictionary) => &dictionary.nodes,
                None => return self.missing(ERR_MOVE_NODE, dictionary_id, node_id),
            };
            if would_create_cycle(nodes, node_id, parent_id) {
                warn!(
                    "event=node_move_rejected module=store node_id={node_id} \
                     parent_id={parent_id} reason=cycle"
                );
                self.error = Some(ERR_MOVE_CYCLE.to_string());
                return None;
            }
        }
        if let Err(err) = self
            .gateway
            .move_node(dictionary_id, node_id, new_parent_id, new_order)
        {
            return self.fail(ERR_MOVE_NODE, "node_move_failed", &err);
        }
        if let Some(node) = self.node_mut(dictionary_id, node_id) {
            node.parent_id = new_parent_id;
            node.order = new_order;
        }
        Some(())
    }

    // Entry-assignment mutations.

    /// Replaces one node's entire assignment set (bulk reconciliation).
    pub fn assign_entries_to_node(
        &mut self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        entry_ids: &[EntryId],
    ) -> Option<()> {
        self.error = None;
        if self.node(dictionary_id, node_id).is_none() {
            return self.missing(ERR_ASSIGN_ENTRIES, dictionary_id, node_id);
        }
        let deduped = dedup_preserving_order(entry_ids);
        if let Err(err) = self.gateway.assign_entries(dictionary_id, node_id, &deduped) {
            return self.fail(ERR_ASSIGN_ENTRIES, "entries_assign_failed", &err);
        }
        if let Some(node) = self.node_mut(dictionary_id, node_id) {
            node.entry_ids = deduped;
        }
        Some(())
    }

    /// Merges incoming entry ids into one node's assignment set.
    ///
    /// Set semantics: already-assigned ids are no-ops, and when nothing new
    /// remains the gateway is never called. Otherwise exactly one remote
    /// call carries the full merged set.
    pub fn add_entries_to_node(
        &mut self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        entry_ids: &[EntryId],
    ) -> Option<()> {
        self.error = None;
        let existing = match self.node(dictionary_id, node_id) {
            Some(node) => node.entry_ids.clone(),
            None => return self.missing(ERR_ADD_ENTRIES, dictionary_id, node_id),
        };
        let mut merged = existing.clone();
        for entry_id in dedup_preserving_order(entry_ids) {
            if !merged.contains(&entry_id) {
                merged.push(entry_id);
            }
        }
        if merged.len() == existing.len() {
            return Some(());
        }
        if let Err(err) = self.gateway.assign_entries(dictionary_id, node_id, &merged) {
            return self.fail(ERR_ADD_ENTRIES, "entries_add_failed", &err);
        }
        if let Some(node) = self.node_mut(dictionary_id, node_id) {
            node.entry_ids = merged;
        }
        Some(())
    }

    /// Removes one entry id from one node's assignment set.
    pub fn remove_entry_from_node(
        &mut self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        entry_id: EntryId,
    ) -> Option<()> {
        self.error = None;
        if self.node(dictionary_id, node_id).is_none() {
            return self.missing(ERR_REMOVE_ENTRY, dictionary_id, node_id);
        }
        if let Err(err) = self.gateway.remove_entry(dictionary_id, node_id, entry_id) {
            return self.fail(ERR_REMOVE_ENTRY, "entry_remove_failed", &err);
        }
        if let Some(node) = self.node_mut(dictionary_id, node_id) {
            node.entry_ids.retain(|existing| *existing != entry_id);
        }
        Some(())
    }

    // Internal helpers.

    pub(crate) fn dictionary_mut(&mut self, id: DictionaryId) -> Option<&mut Dictionary> {
        self.dictionaries
            .iter_mut()
            .find(|dictionary| dictionary.id == id)
    }

    fn node_mut(
        &mut self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
    ) -> Option<&mut DictionaryNode> {
        self.dictionary_mut(dictionary_id)?.node_mut(node_id)
    }

    fn replace_dictionary(&mut self, dictionary: Dictionary) {
        match self.dictionary_mut(dictionary.id) {
            Some(cached) => *cached = dictionary,
            None => self.dictionaries.push(dictionary),
        }
    }

    fn fail<T>(&mut self, message: &str, event: &str, err: &GatewayError) -> Option<T> {
        warn!("event={event} module=store status=error error={err}");
        self.error = Some(message.to_string());
        None
    }

    fn missing<T>(
        &mut self,
        message: &str,
        dictionary_id: DictionaryId,
        node_id: NodeId,
    ) -> Option<T> {
        warn!(
            "event=target_not_cached module=store dictionary_id={dictionary_id} \
             node_id={node_id}"
        );
        self.error = Some(message.to_string());
        None
    }
}

pub(crate) fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

fn dedup_preserving_order(entry_ids: &[EntryId]) -> Vec<EntryId> {
    let mut seen = std::collections::HashSet::new();
    entry_ids
        .iter()
        .copied()
        .filter(|entry_id| seen.insert(*entry_id))
        .collect()
}
