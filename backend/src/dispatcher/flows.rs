//! Static flow-graph documents
//!
//! Each seeded agent has a linear logic graph that the canvas editor loads
//! through `/flows/{id}`.

use crate::error::AppError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Canvas position of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset
    pub x: f32,
    /// Vertical offset
    pub y: f32,
}

/// Node payload shown on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Node caption
    pub label: String,
}

/// A step in a flow graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Node id, unique within the document
    pub id: String,
    /// `input`, `default` or `output`
    #[serde(rename = "type")]
    pub node_type: String,
    /// Caption
    pub data: NodeData,
    /// Canvas position
    pub position: Position,
}

/// A directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Edge id
    pub id: String,
    /// Upstream node id
    pub source: String,
    /// Downstream node id
    pub target: String,
}

/// A complete flow graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    /// Steps
    pub nodes: Vec<FlowNode>,
    /// Connections
    pub edges: Vec<FlowEdge>,
}

impl FlowDocument {
    /// Build a left-to-right chain from step captions
    pub fn chain(labels: &[&str]) -> Self {
        let last = labels.len().saturating_sub(1);
        let nodes = labels
            .iter()
            .enumerate()
            .map(|(i, label)| FlowNode {
                id: format!("n{}", i + 1),
                node_type: match i {
                    0 => "input",
                    i if i == last => "output",
                    _ => "default",
                }
                .to_string(),
                data: NodeData {
                    label: label.to_string(),
                },
                position: Position {
                    x: 250.0,
                    y: 100.0 * i as f32,
                },
            })
            .collect();
        let edges = (1..labels.len())
            .map(|i| FlowEdge {
                id: format!("e{}-{}", i, i + 1),
                source: format!("n{i}"),
                target: format!("n{}", i + 1),
            })
            .collect();

        Self { nodes, edges }
    }
}

static FLOWS: Lazy<HashMap<&'static str, FlowDocument>> = Lazy::new(|| {
    HashMap::from([
        (
            "safety",
            FlowDocument::chain(&[
                "Camera Feed",
                "PPE Detection",
                "Congestion Check",
                "Alert Router",
                "Slack / Email",
            ]),
        ),
        (
            "labour",
            FlowDocument::chain(&[
                "WMS Volume Forecast",
                "Staffing Model",
                "Gap Detection",
                "Shift Planner",
            ]),
        ),
        (
            "dock",
            FlowDocument::chain(&[
                "Inbound ASN",
                "Door Availability",
                "Priority Rules",
                "Dock Assignment",
            ]),
        ),
        (
            "rfp",
            FlowDocument::chain(&[
                "RFP Intake",
                "Template Match",
                "Pricing Model",
                "Draft Proposal",
                "Approval",
            ]),
        ),
        (
            "retail",
            FlowDocument::chain(&[
                "Retailer Rules",
                "Label Scan",
                "Violation Check",
                "Compliance Report",
            ]),
        ),
    ])
});

/// Load the flow document named `id`
pub fn load_flow(id: &str) -> Result<FlowDocument, AppError> {
    FLOWS
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::FlowNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_flows_exist() {
        for id in ["safety", "labour", "dock", "rfp", "retail"] {
            let flow = load_flow(id).unwrap();
            assert_eq!(flow.edges.len(), flow.nodes.len() - 1);
        }
    }

    #[test]
    fn test_unknown_flow() {
        assert!(matches!(load_flow("ghost"), Err(AppError::FlowNotFound(id)) if id == "ghost"));
    }

    #[test]
    fn test_chain_shape() {
        let flow = FlowDocument::chain(&["a", "b", "c"]);
        assert_eq!(flow.nodes[0].node_type, "input");
        assert_eq!(flow.nodes[1].node_type, "default");
        assert_eq!(flow.nodes[2].node_type, "output");
        assert_eq!(flow.edges[1].source, "n2");
        assert_eq!(flow.edges[1].target, "n3");
    }
}
