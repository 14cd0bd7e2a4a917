// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.
//!
//! Nodes are kept in insertion order, which is also the order the compute
//! sweep visits them (see [`Graph::tick`]). Connections form an
//! insertion-ordered set: equal connections are never stored twice.
//!
//! Removing a node does not remove the connections that touch it. Callers
//! that want that use [`Graph::detach`] or clear the connections themselves
//! with the queries below.

use crate::codec::CodecRegistry;
use crate::connection::{Connection, ConnectionScope};
use crate::error::{ConnectionError, GraphError, Result};
use crate::ids::IdAllocator;
use crate::node::{Node, NodeId, NodeRecord, SupergraphRole};
use crate::registry::NodeRegistry;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A node graph
#[derive(Debug)]
pub struct Graph {
    ids: Arc<IdAllocator>,
    /// Nodes in the graph
    pub(crate) nodes: IndexMap<NodeId, Node>,
    /// Connections between nodes
    pub(crate) connections: IndexSet<Connection>,
}

/// Serialized form of a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    /// Node records in graph order
    pub nodes: Vec<NodeRecord>,
    /// Connection records in graph order
    pub connections: Vec<Connection>,
}

/// Outcome of [`Graph::toggle_connection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    /// A matching connection existed and was removed
    Removed,
    /// The connection was added, replacing the previous drivers of its input
    Added {
        /// Connections that fed the input port before
        replaced: Vec<Connection>,
    },
}

/// Nodes and connections taken out of a graph by [`Graph::detach`]
#[derive(Debug)]
pub struct DetachedSubgraph {
    /// Removed nodes, in their former graph order
    pub nodes: Vec<Node>,
    /// Removed connections between two removed nodes
    pub interior: Vec<Connection>,
    /// Removed connections between a removed node and a remaining one
    pub exterior: Vec<Connection>,
}

impl Graph {
    /// Create a new empty graph whose copies draw ids from `ids`
    pub fn new(ids: Arc<IdAllocator>) -> Self {
        Self {
            ids,
            nodes: IndexMap::new(),
            connections: IndexSet::new(),
        }
    }

    /// The id allocator this graph copies nodes with
    pub fn ids(&self) -> &Arc<IdAllocator> {
        &self.ids
    }

    /// Add a node to the end of the graph
    pub fn add_node(&mut self, node: Node) -> Result<NodeId> {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.ids.reserve_past(id);
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Remove a node. Its connections stay in the graph.
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.nodes.shift_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get a node by its position in graph order
    pub fn node_at_index(&self, index: usize) -> Option<&Node> {
        self.nodes.get_index(index).map(|(_, node)| node)
    }

    /// Get all nodes in graph order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs in graph order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes and no connections
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty()
    }

    /// Count nodes of one type
    pub fn count_nodes_of_type(&self, type_name: &str) -> usize {
        self.nodes().filter(|n| n.type_name() == type_name).count()
    }

    /// Position of the first node of `type_name` at or after `from`
    pub fn index_of_type(&self, type_name: &str, from: usize) -> Option<usize> {
        self.nodes
            .values()
            .enumerate()
            .skip(from)
            .find(|(_, n)| n.type_name() == type_name)
            .map(|(i, _)| i)
    }

    /// Topmost node whose placement contains `point`
    pub fn node_at(&self, point: [f32; 2]) -> Option<&Node> {
        self.nodes.values().rev().find(|n| n.placement.contains(point))
    }

    /// Nodes whose placement overlaps the box spanned by `min` and `max`
    pub fn nodes_in_rect(&self, min: [f32; 2], max: [f32; 2]) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|n| n.placement.intersects(min, max))
            .collect()
    }

    /// Nodes standing for the inputs of a folded subgraph
    pub fn supergraph_inputs(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .values()
            .filter(|n| n.supergraph_role() == Some(SupergraphRole::Input))
    }

    /// Nodes standing for the outputs of a folded subgraph
    pub fn supergraph_outputs(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .values()
            .filter(|n| n.supergraph_role() == Some(SupergraphRole::Output))
    }

    /// Check that `connection` may join this graph, ignoring duplicates
    pub fn check_connection(&self, connection: &Connection) -> std::result::Result<(), ConnectionError> {
        if connection.output_node == connection.input_node {
            return Err(ConnectionError::SelfLoop);
        }

        let source_node = self
            .nodes
            .get(&connection.output_node)
            .ok_or(ConnectionError::NodeNotFound(connection.output_node))?;
        let target_node = self
            .nodes
            .get(&connection.input_node)
            .ok_or(ConnectionError::NodeNotFound(connection.input_node))?;

        let source_port = source_node
            .port(connection.output_port)
            .ok_or(ConnectionError::PortNotFound {
                node: connection.output_node,
                index: connection.output_port,
            })?;
        let target_port = target_node
            .port(connection.input_port)
            .ok_or(ConnectionError::PortNotFound {
                node: connection.input_node,
                index: connection.input_port,
            })?;

        if !source_port.is_output() {
            return Err(ConnectionError::NotAnOutput {
                node: connection.output_node,
                index: connection.output_port,
            });
        }
        if !target_port.is_input() {
            return Err(ConnectionError::NotAnInput {
                node: connection.input_node,
                index: connection.input_port,
            });
        }
        if !source_port.port_type().is_assignable_to(target_port.port_type()) {
            return Err(ConnectionError::IncompatiblePorts {
                from: source_port.port_type(),
                to: target_port.port_type(),
            });
        }
        Ok(())
    }

    /// Add a connection between ports
    pub fn add_connection(&mut self, connection: Connection) -> Result<()> {
        self.check_connection(&connection)?;
        if self.connections.contains(&connection) {
            return Err(ConnectionError::DuplicateConnection.into());
        }
        self.connections.insert(connection);
        Ok(())
    }

    /// Remove a connection. Returns whether it was present.
    pub fn remove_connection(&mut self, connection: &Connection) -> bool {
        self.connections.shift_remove(connection)
    }

    /// The stored connection equal to `candidate`, if any
    pub fn matching_connection(&self, candidate: &Connection) -> Option<&Connection> {
        self.connections.get(candidate)
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get connections feeding an input port
    pub fn connections_into(&self, node_id: NodeId, port: usize) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.drives(node_id, port))
    }

    /// Get connections reading an output port
    pub fn connections_from(&self, node_id: NodeId, port: usize) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.reads(node_id, port))
    }

    /// Get connections involving a node
    pub fn connections_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.involves_node(node_id))
    }

    /// Remove every connection feeding an input port
    pub fn remove_connections_into(&mut self, node_id: NodeId, port: usize) -> Vec<Connection> {
        let removed: Vec<Connection> = self.connections_into(node_id, port).copied().collect();
        self.connections.retain(|c| !c.drives(node_id, port));
        removed
    }

    /// Add a connection as the only driver of its input port
    pub fn connect_exclusive(&mut self, connection: Connection) -> Result<Vec<Connection>> {
        self.check_connection(&connection)?;
        let replaced = self.remove_connections_into(connection.input_node, connection.input_port);
        self.connections.insert(connection);
        Ok(replaced)
    }

    /// Remove `connection` if it exists, otherwise connect it exclusively
    pub fn toggle_connection(&mut self, connection: Connection) -> Result<Toggle> {
        if self.remove_connection(&connection) {
            return Ok(Toggle::Removed);
        }
        let replaced = self.connect_exclusive(connection)?;
        Ok(Toggle::Added { replaced })
    }

    /// Connections with both endpoints in `subset`
    pub fn interior_connections(&self, subset: &[NodeId]) -> Vec<Connection> {
        self.connections_in_scope(subset, ConnectionScope::Interior)
    }

    /// Connections with exactly one endpoint in `subset`
    pub fn exterior_connections(&self, subset: &[NodeId]) -> Vec<Connection> {
        self.connections_in_scope(subset, ConnectionScope::Exterior)
    }

    fn connections_in_scope(&self, subset: &[NodeId], scope: ConnectionScope) -> Vec<Connection> {
        let subset: HashSet<NodeId> = subset.iter().copied().collect();
        self.connections
            .iter()
            .filter(|c| c.scope_in(&subset) == scope)
            .copied()
            .collect()
    }

    /// An independent copy with fresh ids for every node
    pub fn deep_copy(&self) -> Graph {
        let all: Vec<NodeId> = self.node_ids().collect();
        self.copy_nodes(&all)
    }

    /// A copy of `subset` and its interior connections, with fresh ids.
    ///
    /// Ids listed more than once are copied once.
    pub fn extract(&self, subset: &[NodeId]) -> Result<Graph> {
        self.require_nodes(subset)?;
        Ok(self.copy_nodes(subset))
    }

    /// Copies the listed nodes, then rewires every connection between two of
    /// them onto the copy made for each endpoint.
    fn copy_nodes(&self, sources: &[NodeId]) -> Graph {
        let mut copy = Graph::new(Arc::clone(&self.ids));
        let mut remap: HashMap<NodeId, NodeId> = HashMap::with_capacity(sources.len());
        for id in sources {
            if remap.contains_key(id) {
                continue;
            }
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let duplicate = node.duplicate(&self.ids);
            remap.insert(*id, duplicate.id());
            copy.nodes.insert(duplicate.id(), duplicate);
        }

        for connection in &self.connections {
            let (Some(&output_node), Some(&input_node)) = (
                remap.get(&connection.output_node),
                remap.get(&connection.input_node),
            ) else {
                continue;
            };
            copy.connections.insert(Connection::new(
                output_node,
                connection.output_port,
                input_node,
                connection.input_port,
            ));
        }

        tracing::debug!(
            "Copied {} nodes and {} connections",
            copy.node_count(),
            copy.connection_count()
        );
        copy
    }

    /// Move every node and connection of `other` into this graph.
    ///
    /// Fails without changing anything if a node id exists in both graphs.
    pub fn merge(&mut self, other: Graph) -> Result<()> {
        if let Some(id) = other.nodes.keys().find(|id| self.nodes.contains_key(*id)) {
            return Err(GraphError::DuplicateNode(*id));
        }
        for (id, node) in other.nodes {
            self.ids.reserve_past(id);
            self.nodes.insert(id, node);
        }
        self.connections.extend(other.connections);
        Ok(())
    }

    /// Remove and return every connection crossing the border of `subset`
    pub fn isolate(&mut self, subset: &[NodeId]) -> Vec<Connection> {
        let exterior = self.exterior_connections(subset);
        for connection in &exterior {
            self.connections.shift_remove(connection);
        }
        exterior
    }

    /// Remove `subset` together with all of its connections
    pub fn detach(&mut self, subset: &[NodeId]) -> Result<DetachedSubgraph> {
        self.require_nodes(subset)?;
        let interior = self.interior_connections(subset);
        let exterior = self.exterior_connections(subset);
        for connection in interior.iter().chain(&exterior) {
            self.connections.shift_remove(connection);
        }

        let members: HashSet<NodeId> = subset.iter().copied().collect();
        let order: Vec<NodeId> = self.node_ids().filter(|id| members.contains(id)).collect();
        let nodes = order
            .iter()
            .filter_map(|id| self.nodes.shift_remove(id))
            .collect();

        Ok(DetachedSubgraph {
            nodes,
            interior,
            exterior,
        })
    }

    /// Put back what [`detach`](Self::detach) removed.
    ///
    /// Nodes are appended to the end of the graph. Connections are restored
    /// as they were, even if a node they touch has since been removed.
    pub fn reattach(&mut self, detached: DetachedSubgraph) -> Result<()> {
        if let Some(node) = detached.nodes.iter().find(|n| self.nodes.contains_key(&n.id())) {
            return Err(GraphError::DuplicateNode(node.id()));
        }
        for node in detached.nodes {
            self.ids.reserve_past(node.id());
            self.nodes.insert(node.id(), node);
        }
        self.connections.extend(detached.exterior);
        self.connections.extend(detached.interior);
        Ok(())
    }

    fn require_nodes(&self, subset: &[NodeId]) -> Result<()> {
        match subset.iter().find(|id| !self.nodes.contains_key(*id)) {
            Some(id) => Err(GraphError::NodeNotFound(*id)),
            None => Ok(()),
        }
    }

    /// Remove every node and connection. The id allocator is left alone.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
    }

    /// Clear the graph and restart id numbering.
    ///
    /// Only valid when no other live graph shares this graph's allocator.
    pub fn reset(&mut self) {
        self.clear();
        self.ids.reset();
    }

    /// Serialize every node and connection
    pub fn to_record(&self, codecs: &CodecRegistry) -> Result<GraphRecord> {
        let nodes = self
            .nodes
            .values()
            .map(|n| n.to_record(codecs))
            .collect::<Result<Vec<_>>>()?;
        Ok(GraphRecord {
            nodes,
            connections: self.connections.iter().copied().collect(),
        })
    }

    /// Build a graph from a record. Node ids are preserved.
    ///
    /// The shared id allocator is only moved past the loaded ids once the
    /// whole record has been accepted.
    pub fn from_record(
        record: &GraphRecord,
        registry: &NodeRegistry,
        codecs: &CodecRegistry,
    ) -> Result<Graph> {
        let mut graph = Graph::new(Arc::clone(registry.ids()));
        for node_record in &record.nodes {
            let mut node = registry.create_with_id(&node_record.type_name, node_record.id)?;
            node.apply_record(node_record, codecs)?;
            if graph.nodes.contains_key(&node.id()) {
                return Err(GraphError::DuplicateNode(node.id()));
            }
            graph.nodes.insert(node.id(), node);
        }
        for connection in &record.connections {
            graph.add_connection(*connection)?;
        }
        if let Some(highest) = graph.nodes.keys().max() {
            graph.ids.reserve_past(*highest);
        }
        tracing::debug!(
            "Loaded graph with {} nodes and {} connections",
            graph.node_count(),
            graph.connection_count()
        );
        Ok(graph)
    }

    /// Serialize to compact JSON
    pub fn to_json(&self, codecs: &CodecRegistry) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record(codecs)?)?)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self, codecs: &CodecRegistry) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_record(codecs)?)?)
    }

    /// Parse a graph from JSON text
    pub fn from_json(text: &str, registry: &NodeRegistry, codecs: &CodecRegistry) -> Result<Graph> {
        let record: GraphRecord = serde_json::from_str(text)?;
        Self::from_record(&record, registry, codecs)
    }
}
