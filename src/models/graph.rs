use serde::{Deserialize, Serialize};

use super::NodeCategory;

/// Display name attached to every graph response
pub const GRAPH_NAME: &str = "HFMEA - Process Analysis (CSV)";

/// Label used when a record cell is empty
pub const MISSING_LABEL: &str = "N/A";

/// A positioned node in the HFMEA graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// `node_<n>`, unique within one response
    pub id: String,
    pub label: String,
    pub category: NodeCategory,
    /// Layout column
    pub x: u32,
    /// Row offset, shared by every node of a row
    pub y: f64,
    pub severity: String,
    pub occurrence: String,
    pub detectability: String,
    pub risk_priority_number: String,
}

/// Directed link between two nodes of the same row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

/// Complete payload served to the visualization client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphResponse {
    pub name: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphResponse {
    /// Response with no rows
    pub fn empty() -> Self {
        Self {
            name: GRAPH_NAME.to_string(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}
