// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the graph engine.

use crate::node::NodeId;
use crate::port::PortType;

/// Result type alias using [`GraphError`]
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors reported by graph, node, port and registry operations
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The node factory was asked for a type it does not know
    #[error("Unknown node type: {0:?}")]
    UnknownType(String),

    /// No codec is registered for a port type
    #[error("No codec registered for type {0}")]
    UnregisteredType(PortType),

    /// A value does not fit the port or codec it was given to
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Type the port or codec accepts
        expected: PortType,
        /// Type that was offered
        found: PortType,
    },

    /// A codec could not translate a value
    #[error("Cannot convert {port_type} value: {reason}")]
    Codec {
        /// Type of the codec that failed
        port_type: PortType,
        /// What went wrong
        reason: String,
    },

    /// A record does not describe the node it is applied to
    #[error("Record does not fit node {node_type}: {reason}")]
    SchemaMismatch {
        /// Type name of the receiving node
        node_type: String,
        /// What differs
        reason: String,
    },

    /// A connection was rejected
    #[error("Invalid connection: {0}")]
    InvalidConnection(#[from] ConnectionError),

    /// A node with this id is already in the graph
    #[error("Node already in graph: {0}")]
    DuplicateNode(NodeId),

    /// A node id does not resolve in the graph
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Malformed JSON text
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error when creating a connection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Port index out of range
    #[error("Node {node} has no port {index}")]
    PortNotFound {
        /// Node that was addressed
        node: NodeId,
        /// Port index that was addressed
        index: usize,
    },

    /// The source port cannot drive a connection
    #[error("Port {index} of node {node} is not an output")]
    NotAnOutput {
        /// Node that was addressed
        node: NodeId,
        /// Port index that was addressed
        index: usize,
    },

    /// The target port cannot receive a connection
    #[error("Port {index} of node {node} is not an input")]
    NotAnInput {
        /// Node that was addressed
        node: NodeId,
        /// Port index that was addressed
        index: usize,
    },

    /// Incompatible port types
    #[error("Cannot assign {from} to {to}")]
    IncompatiblePorts {
        /// Type of the output port
        from: PortType,
        /// Type of the input port
        to: PortType,
    },

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,

    /// An equal connection already exists
    #[error("Connection already exists")]
    DuplicateConnection,
}
