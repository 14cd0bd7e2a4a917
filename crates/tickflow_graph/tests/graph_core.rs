// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end scenarios across the registry, graph and codecs.

use std::collections::HashSet;
use std::sync::Arc;
use tickflow_graph::{
    CodecRegistry, Connection, Graph, GraphError, IdAllocator, Node, NodeId, NodeRegistry, Value,
};

struct Session {
    ids: Arc<IdAllocator>,
    registry: NodeRegistry,
    codecs: CodecRegistry,
}

impl Session {
    fn new() -> Self {
        let ids = IdAllocator::shared();
        Self {
            registry: NodeRegistry::with_builtins(Arc::clone(&ids)),
            codecs: CodecRegistry::with_builtins(),
            ids,
        }
    }

    fn graph(&self) -> Graph {
        Graph::new(Arc::clone(&self.ids))
    }

    fn create(&self, name: &str) -> Node {
        self.registry.create(name).unwrap()
    }

    fn number(&self, value: f64) -> Node {
        self.create("LoadNumber").with_value(0, value).unwrap()
    }
}

/// 1 + 2 wired into an adder; returns the adder
fn add_two_constants(session: &Session, graph: &mut Graph) -> NodeId {
    let a = graph.add_node(session.number(1.0)).unwrap();
    let b = graph.add_node(session.number(2.0)).unwrap();
    let add = graph.add_node(session.create("Add")).unwrap();
    graph.add_connection(Connection::new(a, 0, add, 0)).unwrap();
    graph.add_connection(Connection::new(b, 0, add, 1)).unwrap();
    add
}

#[test]
fn test_add_two_constants_and_report() {
    let session = Session::new();
    let mut graph = session.graph();
    let add = add_two_constants(&session, &mut graph);
    let report = graph.add_node(session.create("PrintToStdOut")).unwrap();
    graph.add_connection(Connection::new(add, 2, report, 0)).unwrap();
    let before = graph.node(report).unwrap().value(0).cloned();

    graph.tick().unwrap();
    assert_eq!(graph.node(add).unwrap().value(2), Some(&Value::Number(3.0)));
    assert_eq!(graph.node(report).unwrap().value(0).cloned(), before);

    graph.tick().unwrap();
    assert_eq!(graph.node(report).unwrap().value(0), Some(&Value::Number(3.0)));
}

#[test]
fn test_model_to_json_and_back() {
    let session = Session::new();
    let mut graph = session.graph();
    add_two_constants(&session, &mut graph);
    graph.tick().unwrap();

    let first = graph.to_json(&session.codecs).unwrap();
    let loaded = Graph::from_json(&first, &session.registry, &session.codecs).unwrap();
    let second = loaded.to_json(&session.codecs).unwrap();
    assert_eq!(first, second);
    assert_eq!(loaded.node_count(), 3);
    assert_eq!(loaded.connection_count(), 2);
}

#[test]
fn test_pretty_json_loads_the_same_graph() {
    let session = Session::new();
    let mut graph = session.graph();
    add_two_constants(&session, &mut graph);

    let pretty = graph.to_json_pretty(&session.codecs).unwrap();
    let loaded = Graph::from_json(&pretty, &session.registry, &session.codecs).unwrap();
    assert_eq!(
        loaded.to_json(&session.codecs).unwrap(),
        graph.to_json(&session.codecs).unwrap()
    );
}

#[test]
fn test_add_two_models_together() {
    let session = Session::new();
    let mut graph = session.graph();
    add_two_constants(&session, &mut graph);
    let copy = graph.deep_copy();

    let mut merged = session.graph();
    merged.merge(graph).unwrap();
    merged.merge(copy).unwrap();

    assert_eq!(merged.count_nodes_of_type("Add"), 2);
    assert_eq!(merged.count_nodes_of_type("LoadNumber"), 4);
    assert_eq!(merged.connection_count(), 4);

    let ids: HashSet<NodeId> = merged.node_ids().collect();
    assert_eq!(ids.len(), merged.node_count());

    let first = merged.index_of_type("Add", 0).unwrap();
    let second = merged.index_of_type("Add", first + 1).unwrap();
    let a0 = merged.node_at_index(first).unwrap();
    let a1 = merged.node_at_index(second).unwrap();
    assert!(!std::ptr::eq(a0, a1));
    assert_ne!(a0.id(), a1.id());
    assert_eq!(a0.ports(), a1.ports());
    let (a0, a1) = (a0.id(), a1.id());

    // Multiply the two sums.
    let multiply = merged.add_node(session.create("Multiply")).unwrap();
    merged.add_connection(Connection::new(a0, 2, multiply, 0)).unwrap();
    merged.add_connection(Connection::new(a1, 2, multiply, 1)).unwrap();
    merged.run(2).unwrap();
    assert_eq!(merged.node(multiply).unwrap().value(2), Some(&Value::Number(9.0)));
}

#[test]
fn test_copy_paste_selection() {
    let session = Session::new();
    let mut graph = session.graph();
    let add = add_two_constants(&session, &mut graph);
    let first = graph.node_ids().next().unwrap();

    let clip = graph.extract(&[first, add]).unwrap();
    assert_eq!(clip.connection_count(), 1);

    let before = graph.node_count();
    graph.merge(clip.deep_copy()).unwrap();
    graph.merge(clip).unwrap();
    assert_eq!(graph.node_count(), before + 4);
    assert_eq!(graph.count_nodes_of_type("Add"), 3);
}

#[test]
fn test_model_clears() {
    let session = Session::new();
    let mut graph = session.graph();
    add_two_constants(&session, &mut graph);
    graph.clear();
    assert_eq!(
        graph.to_json(&session.codecs).unwrap(),
        session.graph().to_json(&session.codecs).unwrap()
    );
}

#[test]
fn test_load_fails_without_codecs() {
    let session = Session::new();
    let mut graph = session.graph();
    add_two_constants(&session, &mut graph);
    let text = graph.to_json(&session.codecs).unwrap();

    let empty = CodecRegistry::new();
    assert!(matches!(
        graph.to_json(&empty),
        Err(GraphError::UnregisteredType(_))
    ));
    assert!(matches!(
        Graph::from_json(&text, &session.registry, &empty),
        Err(GraphError::UnregisteredType(_))
    ));
}

#[test]
fn test_load_rejects_garbage() {
    let session = Session::new();
    assert!(matches!(
        Graph::from_json("{\"nodes\":", &session.registry, &session.codecs),
        Err(GraphError::Json(_))
    ));
}

#[test]
fn test_loaded_ids_are_not_reissued() {
    let session = Session::new();
    let text = r#"{"nodes":[{"type":"LoadNumber","id":500,"ports":[{"name":"value","type":"Number","value":4.0}]}],"connections":[]}"#;
    let mut graph = Graph::from_json(text, &session.registry, &session.codecs).unwrap();
    let fresh = graph.add_node(session.create("LoadNumber")).unwrap();
    assert!(fresh.0 > 500);
    assert_eq!(graph.to_json(&session.codecs).unwrap().matches("\"id\"").count(), 2);
}

#[test]
fn test_independent_sessions() {
    let a = Session::new();
    let b = Session::new();
    assert_eq!(a.create("Add").id(), b.create("Add").id());
}
