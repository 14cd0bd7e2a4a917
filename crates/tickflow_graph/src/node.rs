// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph framework.

use crate::codec::CodecRegistry;
use crate::error::{GraphError, Result};
use crate::ids::IdAllocator;
use crate::port::{Port, PortRecord, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Marks nodes that stand for the external ports of a folded subgraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupergraphRole {
    /// Feeds a value into the subgraph
    Input,
    /// Reports a value out of the subgraph
    Output,
}

/// Behavior of one kind of node
///
/// A kind declares the ports of a fresh node and computes outputs from
/// inputs. Values live in the ports owned by [`Node`]; most kinds are
/// therefore stateless unit structs.
pub trait NodeKind: NodeKindClone + fmt::Debug + Send + Sync {
    /// Name the factory knows this kind by
    fn type_name(&self) -> &str;

    /// Ports of a freshly created node, in declaration order
    fn ports(&self) -> Vec<Port>;

    /// Read the input ports and write the output ports
    fn compute(&mut self, ports: &mut [Port]) -> Result<()>;

    /// Folded-subgraph marker, if any
    fn supergraph_role(&self) -> Option<SupergraphRole> {
        None
    }
}

/// Clones a boxed [`NodeKind`]. Implemented for every `Clone` kind.
pub trait NodeKindClone {
    /// Clone into a new box
    fn clone_kind(&self) -> Box<dyn NodeKind>;
}

impl<T> NodeKindClone for T
where
    T: NodeKind + Clone + 'static,
{
    fn clone_kind(&self) -> Box<dyn NodeKind> {
        Box::new(self.clone())
    }
}

/// Where the editor draws a node. The engine only stores it and answers
/// spatial queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Top-left corner
    pub position: [f32; 2],
    /// Width and height
    pub size: [f32; 2],
}

impl Placement {
    /// Whether `point` lies inside the placement rectangle
    pub fn contains(&self, point: [f32; 2]) -> bool {
        let [x, y] = self.position;
        let [w, h] = self.size;
        point[0] >= x && point[0] <= x + w && point[1] >= y && point[1] <= y + h
    }

    /// Whether the placement rectangle overlaps the box spanned by `min` and `max`
    pub fn intersects(&self, min: [f32; 2], max: [f32; 2]) -> bool {
        let [x, y] = self.position;
        let [w, h] = self.size;
        x <= max[0] && x + w >= min[0] && y <= max[1] && y + h >= min[1]
    }

    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Serialized form of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Node id
    pub id: NodeId,
    /// Port values in declaration order
    pub ports: Vec<PortRecord>,
    /// Editor placement
    #[serde(default, skip_serializing_if = "Placement::is_default")]
    pub placement: Placement,
}

/// A node instance in the graph
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    kind: Box<dyn NodeKind>,
    ports: Vec<Port>,
    /// Position in the editor
    pub placement: Placement,
}

impl Node {
    /// Create a node of `kind` with default port values and a fresh id
    pub fn new(kind: impl NodeKind + 'static, ids: &IdAllocator) -> Self {
        Self::from_kind(Box::new(kind), ids)
    }

    /// Create a node from a boxed kind
    pub fn from_kind(kind: Box<dyn NodeKind>, ids: &IdAllocator) -> Self {
        Self::with_id(kind, ids.allocate())
    }

    /// Create a node under an id that was issued elsewhere, such as one read
    /// back from a saved graph. No allocator is touched.
    pub(crate) fn with_id(kind: Box<dyn NodeKind>, id: NodeId) -> Self {
        let ports = kind.ports();
        Self {
            id,
            kind,
            ports,
            placement: Placement::default(),
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.placement.position = [x, y];
        self
    }

    /// Set a port value while building a node
    pub fn with_value(mut self, index: usize, value: impl Into<Value>) -> Result<Self> {
        self.set_port_value(index, value)?;
        Ok(self)
    }

    /// Unique instance ID
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Node type name
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    /// Folded-subgraph marker, if any
    pub fn supergraph_role(&self) -> Option<SupergraphRole> {
        self.kind.supergraph_role()
    }

    /// All ports in declaration order
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Get a port by index
    pub fn port(&self, index: usize) -> Option<&Port> {
        self.ports.get(index)
    }

    /// Get a mutable port by index
    pub fn port_mut(&mut self, index: usize) -> Option<&mut Port> {
        self.ports.get_mut(index)
    }

    /// Store a value in the port at `index`
    pub fn set_port_value(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        let node_type = self.kind.type_name().to_owned();
        let port = self.ports.get_mut(index).ok_or_else(|| GraphError::SchemaMismatch {
            node_type,
            reason: format!("no port {index}"),
        })?;
        port.set_value(value)
    }

    /// Current value of the port at `index`
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.ports.get(index).map(Port::value)
    }

    /// True iff any input port is dirty
    pub fn is_dirty(&self) -> bool {
        self.ports.iter().any(|p| p.is_input() && p.is_dirty())
    }

    /// Run the compute step, then mark every input as consumed.
    ///
    /// If the kind fails, the inputs stay dirty.
    pub fn update(&mut self) -> Result<()> {
        self.kind.compute(&mut self.ports)?;
        for port in self.ports.iter_mut().filter(|p| p.is_input()) {
            port.clear_dirty();
        }
        Ok(())
    }

    /// A new node of the same kind with default port values and a fresh id
    pub fn clone_prototype(&self, ids: &IdAllocator) -> Node {
        Self::from_kind(self.kind.clone_kind(), ids)
    }

    /// A copy of this node's current state under a fresh id
    pub fn duplicate(&self, ids: &IdAllocator) -> Node {
        Self {
            id: ids.allocate(),
            kind: self.kind.clone_kind(),
            ports: self.ports.clone(),
            placement: self.placement,
        }
    }

    /// Serialize type, id, port values and placement
    pub fn to_record(&self, codecs: &CodecRegistry) -> Result<NodeRecord> {
        let ports = self
            .ports
            .iter()
            .map(|p| p.to_record(codecs))
            .collect::<Result<Vec<_>>>()?;
        Ok(NodeRecord {
            type_name: self.type_name().to_owned(),
            id: self.id,
            ports,
            placement: self.placement,
        })
    }

    /// Load id, port values and placement from `record`.
    ///
    /// Nothing changes unless the whole record fits.
    pub fn apply_record(&mut self, record: &NodeRecord, codecs: &CodecRegistry) -> Result<()> {
        let mismatch = |reason: String| GraphError::SchemaMismatch {
            node_type: self.type_name().to_owned(),
            reason,
        };

        if record.type_name != self.type_name() {
            return Err(mismatch(format!("record is a {}", record.type_name)));
        }
        if record.ports.len() != self.ports.len() {
            return Err(mismatch(format!(
                "record has {} ports, node has {}",
                record.ports.len(),
                self.ports.len()
            )));
        }

        let mut values = Vec::with_capacity(self.ports.len());
        for (port, port_record) in self.ports.iter().zip(&record.ports) {
            if port.name() != port_record.name {
                return Err(mismatch(format!(
                    "expected port {:?}, record has {:?}",
                    port.name(),
                    port_record.name
                )));
            }
            values.push(port.decode_record(port_record, codecs)?);
        }

        for (port, value) in self.ports.iter_mut().zip(values) {
            port.set_value(value)?;
        }
        self.id = record.id;
        self.placement = record.placement;
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {{", self.type_name(), self.id)?;
        for (i, port) in self.ports.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{}={}", port.name(), port.value())?;
        }
        write!(f, " }}")
    }
}
