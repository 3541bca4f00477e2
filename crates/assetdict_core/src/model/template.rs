//! Static node-hierarchy templates.
//!
//! # Responsibility
//! - Define the identifier-free blueprint consumed by template expansion.
//! - Ship the stock templates offered at dictionary-creation time.
//!
//! # Invariants
//! - Templates carry no identifiers; real ids exist only after expansion
//!   round-trips through the gateway.
//! - Declaration order inside a sibling list becomes the `order` value.

use serde::{Deserialize, Serialize};

/// One blueprint node: name/icon/description plus nested children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTemplate {
    pub name: String,
    pub icon: String,
    pub description: Option<String>,
    #[serde(default)]
    pub children: Vec<NodeTemplate>,
}

impl NodeTemplate {
    /// Creates a leaf template node.
    pub fn leaf(name: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            description: None,
            children: Vec::new(),
        }
    }

    /// Creates a template node with children.
    pub fn branch(name: &str, icon: &str, children: Vec<NodeTemplate>) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            description: None,
            children,
        }
    }
}

/// A named stock template selectable in the creation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedTemplate {
    pub name: String,
    pub roots: Vec<NodeTemplate>,
}

/// Returns the stock templates shipped with the console.
pub fn builtin_templates() -> Vec<NamedTemplate> {
    vec![
        NamedTemplate {
            name: "Manufacturing site".to_string(),
            roots: vec![NodeTemplate::branch(
                "Plant",
                "factory",
                vec![
                    NodeTemplate::branch(
                        "Line 1",
                        "conveyor",
                        vec![
                            NodeTemplate::leaf("Filling", "bottle"),
                            NodeTemplate::leaf("Packaging", "box"),
                        ],
                    ),
                    NodeTemplate::leaf("Utilities", "bolt"),
                ],
            )],
        },
        NamedTemplate {
            name: "Organization".to_string(),
            roots: vec![
                NodeTemplate::branch(
                    "Departments",
                    "sitemap",
                    vec![
                        NodeTemplate::leaf("Engineering", "wrench"),
                        NodeTemplate::leaf("Operations", "gears"),
                        NodeTemplate::leaf("Finance", "coins"),
                    ],
                ),
                NodeTemplate::leaf("Shared", "users"),
            ],
        },
    ]
}
