//! Diagram metadata
//!
//! The metadata document accompanies a pre-rendered SVG diagram and describes
//! every node the viewer can make interactive: switches that can be clicked
//! and feeders that lead to another diagram.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ViewerError;

/// Kind of equipment a node draws
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    Breaker,
    Disconnector,
    LoadBreakSwitch,
    /// Busbars, feeders, transformers, labels...
    #[serde(other)]
    Other,
}

impl ComponentType {
    /// True for the component kinds that accept open/close clicks
    pub fn is_switch(self) -> bool {
        match self {
            ComponentType::Breaker
            | ComponentType::Disconnector
            | ComponentType::LoadBreakSwitch => true,
            ComponentType::Other => false,
        }
    }
}

/// Placement hint for a navigation arrow
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Top,
    Bottom,
    #[default]
    #[serde(other)]
    Undefined,
}

/// One entry of the metadata `nodes` list
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// DOM id of the element drawing this node
    pub id: String,

    #[serde(default)]
    pub component_type: Option<ComponentType>,

    #[serde(default)]
    pub equipment_id: String,

    #[serde(default)]
    pub open: bool,

    /// Voltage level the node belongs to
    #[serde(default)]
    pub vid: String,

    /// Diagram reached by navigating from this node
    #[serde(default, rename = "nextVId")]
    pub next_vid: Option<String>,

    #[serde(default)]
    pub direction: Option<Direction>,
}

impl Node {
    pub fn is_switch(&self) -> bool {
        self.component_type.is_some_and(ComponentType::is_switch)
    }

    pub fn direction(&self) -> Direction {
        self.direction.unwrap_or_default()
    }
}

/// Metadata document for one diagram
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DiagramMetadata {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl DiagramMetadata {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Parse a metadata document from its JSON text
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        serde_json::from_str(json).map_err(|e| ViewerError::InvalidMetadata(e.to_string()))
    }

    /// Nodes that accept open/close clicks, in document order
    pub fn switches(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_switch())
    }

    /// Distinct non-empty voltage level ids drawn in this diagram
    pub fn voltage_levels(&self) -> HashSet<&str> {
        self.nodes
            .iter()
            .map(|node| node.vid.as_str())
            .filter(|vid| !vid.is_empty())
            .collect()
    }

    /// Nodes whose `nextVId` leads outside of this diagram
    ///
    /// A `nextVId` naming one of the diagram's own voltage levels is already
    /// on screen, so it gets no arrow.
    pub fn external_navigables(&self) -> Vec<&Node> {
        let local = self.voltage_levels();

        self.nodes
            .iter()
            .filter(|node| {
                node.next_vid
                    .as_deref()
                    .is_some_and(|next| !local.contains(next))
            })
            .collect()
    }
}
