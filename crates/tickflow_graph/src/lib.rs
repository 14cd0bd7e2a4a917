// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tick-driven dataflow graph engine.
//!
//! This crate provides the execution and persistence core behind visual
//! dataflow editors and batch evaluators:
//! - Typed input/output ports with dirty tracking
//! - Nodes built from a registry of prototype kinds
//! - Connection validation and the single-driver rule
//! - Tick-based propagation with one tick of delay per connection
//! - Deep copy, merge and subgraph extraction with id remapping
//! - JSON persistence through a registry of value codecs
//!
//! ## Architecture
//!
//! Session state is explicit: an [`IdAllocator`] shared by the
//! [`NodeRegistry`] and every [`Graph`], plus a [`CodecRegistry`] passed to
//! the serialization calls. None of it is global, so independent sessions
//! (and tests) can run side by side.
//!
//! ```
//! use tickflow_graph::{CodecRegistry, Connection, Graph, IdAllocator, NodeRegistry, Value};
//!
//! let ids = IdAllocator::shared();
//! let registry = NodeRegistry::with_builtins(ids.clone());
//! let codecs = CodecRegistry::with_builtins();
//!
//! let mut graph = Graph::new(ids);
//! let a = graph.add_node(registry.create("LoadNumber")?.with_value(0, 1.0)?)?;
//! let b = graph.add_node(registry.create("LoadNumber")?.with_value(0, 2.0)?)?;
//! let add = graph.add_node(registry.create("Add")?)?;
//! graph.add_connection(Connection::new(a, 0, add, 0))?;
//! graph.add_connection(Connection::new(b, 0, add, 1))?;
//!
//! graph.tick()?;
//! assert_eq!(graph.node(add).unwrap().value(2), Some(&Value::Number(3.0)));
//! let saved = graph.to_json(&codecs)?;
//! # let _ = saved;
//! # Ok::<(), tickflow_graph::GraphError>(())
//! ```

pub mod catalog;
pub mod codec;
pub mod connection;
pub mod error;
pub mod evaluation;
pub mod graph;
pub mod ids;
pub mod node;
pub mod port;
pub mod registry;

pub use codec::CodecRegistry;
pub use connection::{Connection, ConnectionScope};
pub use error::{ConnectionError, GraphError, Result};
pub use evaluation::TickStats;
pub use graph::{DetachedSubgraph, Graph, GraphRecord, Toggle};
pub use ids::IdAllocator;
pub use node::{Node, NodeId, NodeKind, NodeRecord, Placement, SupergraphRole};
pub use port::{Port, PortRecord, PortType, Rect, Value};
pub use registry::NodeRegistry;
