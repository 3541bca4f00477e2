//! Template expansion into sequential node creation.
//!
//! # Responsibility
//! - Walk a declarative template depth-first and issue ordered create
//!   calls against the gateway.
//! - Thread each created node's server-assigned id into its children's
//!   creation requests.
//!
//! # Invariants
//! - Sibling order is the zero-based declaration index.
//! - A template node's id must be known before its children are created.
//! - A failed creation aborts the remaining expansion of that branch; no
//!   rollback of already-created nodes is attempted.

use crate::gateway::DictionaryGateway;
use crate::model::dictionary::{DictionaryId, DictionaryNode, NodeDraft, NodeId};
use crate::model::template::NodeTemplate;
use crate::store::{DictionaryStore, ERR_EXPAND_TEMPLATE};
use log::{info, warn};

impl<G: DictionaryGateway> DictionaryStore<G> {
    /// Expands `templates` as root-level subtrees of one dictionary.
    ///
    /// Returns every created node in creation order, or `None` once any
    /// creation call fails (already-created nodes stay in the cache).
    pub fn expand_template(
        &mut self,
        dictionary_id: DictionaryId,
        templates: &[NodeTemplate],
    ) -> Option<Vec<DictionaryNode>> {
        self.error = None;
        let mut created = Vec::new();
        if self.expand_branch(dictionary_id, None, templates, &mut created) {
            info!(
                "event=template_expanded module=store dictionary_id={dictionary_id} \
                 node_count={}",
                created.len()
            );
            Some(created)
        } else {
            self.error = Some(ERR_EXPAND_TEMPLATE.to_string());
            None
        }
    }

    fn expand_branch(
        &mut self,
        dictionary_id: DictionaryId,
        parent_id: Option<NodeId>,
        templates: &[NodeTemplate],
        created: &mut Vec<DictionaryNode>,
    ) -> bool {
        for (index, template) in templates.iter().enumerate() {
            let draft = NodeDraft {
                name: template.name.clone(),
                description: template.description.clone(),
                icon: template.icon.clone(),
                parent_id,
                order: index as i64,
            };
            let node = match self.gateway.create_node(dictionary_id, &draft) {
                Ok(node) => node,
                Err(err) => {
                    warn!(
                        "event=template_node_create_failed module=store \
                         dictionary_id={dictionary_id} name={} error={err}",
                        template.name
                    );
                    return false;
                }
            };
            if let Some(dictionary) = self.dictionary_mut(dictionary_id) {
                dictionary.upsert_node(node.clone());
            }
            let node_id = node.id;
            created.push(node);
            if !self.expand_branch(dictionary_id, Some(node_id), &template.children, created) {
                return false;
            }
        }
        true
    }
}
