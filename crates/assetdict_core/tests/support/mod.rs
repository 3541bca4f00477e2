//! Shared in-memory gateway double for store integration tests.
#![allow(dead_code)]

use assetdict_core::{
    Dictionary, DictionaryDraft, DictionaryGateway, DictionaryId, DictionaryNode, DictionaryPatch,
    EntryId, GatewayError, GatewayResult, NodeDraft, NodeId, NodePatch,
};
use std::cell::RefCell;
use std::collections::HashSet;
use uuid::Uuid;

/// Recording, scriptable gateway backed by an in-memory dictionary list.
pub struct MockGateway {
    state: RefCell<Vec<Dictionary>>,
    calls: RefCell<Vec<&'static str>>,
    fail_ops: RefCell<HashSet<&'static str>>,
    create_node_budget: RefCell<Option<usize>>,
}

impl MockGateway {
    pub fn new(dictionaries: Vec<Dictionary>) -> Self {
        Self {
            state: RefCell::new(dictionaries),
            calls: RefCell::new(Vec::new()),
            fail_ops: RefCell::new(HashSet::new()),
            create_node_budget: RefCell::new(None),
        }
    }

    /// Scripts every future call of `op` to fail.
    pub fn fail_on(&self, op: &'static str) {
        self.fail_ops.borrow_mut().insert(op);
    }

    pub fn clear_failures(&self) {
        self.fail_ops.borrow_mut().clear();
    }

    /// Scripts `create_node` to fail after `budget` successful calls.
    pub fn limit_create_node(&self, budget: usize) {
        *self.create_node_budget.borrow_mut() = Some(budget);
    }

    pub fn calls_of(&self, op: &'static str) -> usize {
        self.calls.borrow().iter().filter(|name| **name == op).count()
    }

    pub fn remote_dictionary(&self, id: DictionaryId) -> Option<Dictionary> {
        self.state
            .borrow()
            .iter()
            .find(|dictionary| dictionary.id == id)
            .cloned()
    }

    fn guard(&self, op: &'static str) -> GatewayResult<()> {
        self.calls.borrow_mut().push(op);
        if self.fail_ops.borrow().contains(op) {
            return Err(GatewayError::Remote {
                status: 500,
                message: format!("scripted failure for {op}"),
            });
        }
        Ok(())
    }

    fn with_node<T>(
        &self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        apply: impl FnOnce(&mut DictionaryNode) -> T,
    ) -> GatewayResult<T> {
        let mut state = self.state.borrow_mut();
        let node = state
            .iter_mut()
            .find(|dictionary| dictionary.id == dictionary_id)
            .and_then(|dictionary| dictionary.node_mut(node_id))
            .ok_or(GatewayError::Remote {
                status: 404,
                message: "node not found".to_string(),
            })?;
        Ok(apply(node))
    }
}

impl DictionaryGateway for MockGateway {
    fn list_dictionaries(&self, _include_nodes: bool) -> GatewayResult<Vec<Dictionary>> {
        self.guard("list_dictionaries")?;
        Ok(self.state.borrow().clone())
    }

    fn get_dictionary(&self, id: DictionaryId) -> GatewayResult<Dictionary> {
        self.guard("get_dictionary")?;
        self.remote_dictionary(id).ok_or(GatewayError::Remote {
            status: 404,
            message: "dictionary not found".to_string(),
        })
    }

    fn create_dictionaries(&self, drafts: &[DictionaryDraft]) -> GatewayResult<Vec<Dictionary>> {
        self.guard("create_dictionaries")?;
        let created: Vec<Dictionary> = drafts
            .iter()
            .map(|draft| Dictionary {
                id: Uuid::new_v4(),
                name: draft.name.clone(),
                description: draft.description.clone(),
                icon: draft.icon.clone(),
                color: draft.color.clone(),
                nodes: Vec::new(),
                created_at: 1_000,
                updated_at: 1_000,
            })
            .collect();
        self.state.borrow_mut().extend(created.clone());
        Ok(created)
    }

    fn update_dictionary(&self, patch: &DictionaryPatch) -> GatewayResult<Dictionary> {
        self.guard("update_dictionary")?;
        let mut state = self.state.borrow_mut();
        let dictionary = state
            .iter_mut()
            .find(|dictionary| dictionary.id == patch.id)
            .ok_or(GatewayError::Remote {
                status: 404,
                message: "dictionary not found".to_string(),
            })?;
        dictionary.name = patch.name.clone();
        dictionary.description = patch.description.clone();
        dictionary.icon = patch.icon.clone();
        dictionary.color = patch.color.clone();
        dictionary.updated_at += 1;
        Ok(dictionary.clone())
    }

    fn delete_dictionaries(&self, ids: &[DictionaryId]) -> GatewayResult<()> {
        self.guard("delete_dictionaries")?;
        self.state
            .borrow_mut()
            .retain(|dictionary| !ids.contains(&dictionary.id));
        Ok(())
    }

    fn list_nodes(
        &self,
        dictionary_id: DictionaryId,
        ids: Option<&[NodeId]>,
    ) -> GatewayResult<Vec<DictionaryNode>> {
        self.guard("list_nodes")?;
        let state = self.state.borrow();
        let nodes = state
            .iter()
            .find(|dictionary| dictionary.id == dictionary_id)
            .map(|dictionary| dictionary.nodes.clone())
            .unwrap_or_default();
        Ok(match ids {
            Some(ids) => nodes
                .into_iter()
                .filter(|node| ids.contains(&node.id))
                .collect(),
            None => nodes,
        })
    }

    fn create_node(
        &self,
        dictionary_id: DictionaryId,
        draft: &NodeDraft,
    ) -> GatewayResult<DictionaryNode> {
        self.guard("create_node")?;
        if let Some(budget) = self.create_node_budget.borrow_mut().as_mut() {
            if *budget == 0 {
                return Err(GatewayError::Remote {
                    status: 500,
                    message: "create_node budget exhausted".to_string(),
                });
            }
            *budget -= 1;
        }
        let node = DictionaryNode {
            id: Uuid::new_v4(),
            dictionary_id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            icon: draft.icon.clone(),
            parent_id: draft.parent_id,
            order: draft.order,
            entry_ids: Vec::new(),
        };
        let mut state = self.state.borrow_mut();
        if let Some(dictionary) = state
            .iter_mut()
            .find(|dictionary| dictionary.id == dictionary_id)
        {
            dictionary.nodes.push(node.clone());
        }
        Ok(node)
    }

    fn update_node(
        &self,
        dictionary_id: DictionaryId,
        patch: &NodePatch,
    ) -> GatewayResult<DictionaryNode> {
        self.guard("update_node")?;
        self.with_node(dictionary_id, patch.id, |node| {
            node.name = patch.name.clone();
            node.description = patch.description.clone();
            node.icon = patch.icon.clone();
            node.clone()
        })
    }

    fn move_node(
        &self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        new_parent_id: Option<NodeId>,
        new_order: i64,
    ) -> GatewayResult<()> {
        self.guard("move_node")?;
        self.with_node(dictionary_id, node_id, |node| {
            node.parent_id = new_parent_id;
            node.order = new_order;
        })
    }

    fn delete_node(&self, dictionary_id: DictionaryId, node_id: NodeId) -> GatewayResult<()> {
        self.guard("delete_node")?;
        let mut state = self.state.borrow_mut();
        if let Some(dictionary) = state
            .iter_mut()
            .find(|dictionary| dictionary.id == dictionary_id)
        {
            // Server-side cascade over the subtree.
            let doomed = assetdict_core::subtree_ids(&dictionary.nodes, node_id);
            dictionary.nodes.retain(|node| !doomed.contains(&node.id));
        }
        Ok(())
    }

    fn assign_entries(
        &self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        entry_ids: &[EntryId],
    ) -> GatewayResult<()> {
        self.guard("assign_entries")?;
        self.with_node(dictionary_id, node_id, |node| {
            node.entry_ids = entry_ids.to_vec();
        })
    }

    fn add_entry(
        &self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        entry_id: EntryId,
    ) -> GatewayResult<()> {
        self.guard("add_entry")?;
        self.with_node(dictionary_id, node_id, |node| {
            if !node.entry_ids.contains(&entry_id) {
                node.entry_ids.push(entry_id);
            }
        })
    }

    fn remove_entry(
        &self,
        dictionary_id: DictionaryId,
        node_id: NodeId,
        entry_id: EntryId,
    ) -> GatewayResult<()> {
        self.guard("remove_entry")?;
        self.with_node(dictionary_id, node_id, |node| {
            node.entry_ids.retain(|existing| *existing != entry_id);
        })
    }
}

pub fn dictionary(name: &str) -> Dictionary {
    Dictionary {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        icon: "database".to_string(),
        color: "blue".to_string(),
        nodes: Vec::new(),
        created_at: 1_000,
        updated_at: 1_000,
    }
}

pub fn node(
    dictionary: &Dictionary,
    name: &str,
    parent_id: Option<NodeId>,
    order: i64,
    entry_ids: Vec<EntryId>,
) -> DictionaryNode {
    DictionaryNode {
        id: Uuid::new_v4(),
        dictionary_id: dictionary.id,
        name: name.to_string(),
        description: None,
        icon: "folder".to_string(),
        parent_id,
        order,
        entry_ids,
    }
}

pub fn draft(name: &str) -> DictionaryDraft {
    DictionaryDraft {
        name: name.to_string(),
        description: None,
        icon: "database".to_string(),
        color: "blue".to_string(),
    }
}
