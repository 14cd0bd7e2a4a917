// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A connection from one node's output port to another node's input port
///
/// Connections are plain values: two connections with the same four fields
/// are the same connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// Source node ID
    #[serde(rename = "outNode")]
    pub output_node: NodeId,
    /// Source port index
    #[serde(rename = "outPort")]
    pub output_port: usize,
    /// Target node ID
    #[serde(rename = "inNode")]
    pub input_node: NodeId,
    /// Target port index
    #[serde(rename = "inPort")]
    pub input_port: usize,
}

impl Connection {
    /// Create a new connection
    pub fn new(output_node: NodeId, output_port: usize, input_node: NodeId, input_port: usize) -> Self {
        Self {
            output_node,
            output_port,
            input_node,
            input_port,
        }
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.output_node == node_id || self.input_node == node_id
    }

    /// Check if this connection feeds the given input port
    pub fn drives(&self, node_id: NodeId, port: usize) -> bool {
        self.input_node == node_id && self.input_port == port
    }

    /// Check if this connection reads the given output port
    pub fn reads(&self, node_id: NodeId, port: usize) -> bool {
        self.output_node == node_id && self.output_port == port
    }

    /// Classify this connection against a node subset
    pub fn scope_in(&self, subset: &HashSet<NodeId>) -> ConnectionScope {
        match (subset.contains(&self.output_node), subset.contains(&self.input_node)) {
            (true, true) => ConnectionScope::Interior,
            (false, false) => ConnectionScope::Unrelated,
            _ => ConnectionScope::Exterior,
        }
    }
}

/// Where a connection sits relative to a node subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionScope {
    /// Both endpoints are in the subset
    Interior,
    /// Exactly one endpoint is in the subset
    Exterior,
    /// Neither endpoint is in the subset
    Unrelated,
}
