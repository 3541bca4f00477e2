//! Client-side core for the asset-dictionary hierarchy store.
//! This crate is the single source of truth for cache and tree invariants.

pub mod config;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod store;
pub mod tree;

pub use config::{ConfigError, StoreConfig, DEFAULT_REFRESH_INTERVAL_MS, MIN_REFRESH_INTERVAL_MS};
pub use gateway::{DictionaryGateway, GatewayError, GatewayResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::dictionary::{
    Dictionary, DictionaryDraft, DictionaryId, DictionaryNode, DictionaryPatch, EntryId, NodeDraft,
    NodeId, NodePatch, TreeNode,
};
pub use model::template::{builtin_templates, NamedTemplate, NodeTemplate};
pub use store::refresh::{RefreshMode, RefreshScheduler};
pub use store::DictionaryStore;
pub use tree::{materialize_children, materialize_forest, subtree_ids, would_create_cycle};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
