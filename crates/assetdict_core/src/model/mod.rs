//! Domain model for asset-dictionary hierarchies.
//!
//! # Responsibility
//! - Define the canonical dictionary/node records cached by the store.
//! - Define the materialized tree projection consumed by views.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Nodes form a forest: parent links stay inside one dictionary and
//!   never cycle (enforced by the store before mutations are issued).

pub mod dictionary;
pub mod template;
