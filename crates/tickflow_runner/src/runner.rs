// SPDX-License-Identifier: MIT OR Apache-2.0
//! Loads a graph file, ticks it and serializes the result.

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tickflow_graph::{CodecRegistry, Graph, IdAllocator, NodeRegistry, TickStats};

/// Node type that prints to standard output while ticking
const STDOUT_SINK: &str = "PrintToStdOut";

/// Registries for one batch run
pub struct Session {
    registry: NodeRegistry,
    codecs: CodecRegistry,
}

impl Session {
    /// A session with the built-in node types and codecs
    pub fn with_builtins() -> Self {
        let ids = IdAllocator::shared();
        Self {
            registry: NodeRegistry::with_builtins(Arc::clone(&ids)),
            codecs: CodecRegistry::with_builtins(),
        }
    }

    /// Registered node type names
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.registry.names()
    }

    /// Parse a graph from JSON text
    pub fn load(&self, text: &str) -> anyhow::Result<Graph> {
        Graph::from_json(text, &self.registry, &self.codecs).context("Failed to load graph")
    }

    /// Read and parse a graph file
    pub fn load_file(&self, path: &Path) -> anyhow::Result<Graph> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        self.load(&text)
            .with_context(|| format!("While loading {}", path.display()))
    }

    /// Fail if ticking `graph` would print to standard output, where the
    /// result record is also written
    pub fn check_stdout_free(&self, graph: &Graph) -> anyhow::Result<()> {
        let sinks = graph.count_nodes_of_type(STDOUT_SINK);
        if sinks > 0 {
            anyhow::bail!(
                "Graph has {sinks} {STDOUT_SINK} node(s) writing to standard output; pass --output to save the result"
            );
        }
        Ok(())
    }

    /// Tick `graph` and return the stats
    pub fn run(&self, graph: &mut Graph, ticks: u32) -> anyhow::Result<TickStats> {
        let stats = graph.run(ticks).context("Tick failed")?;
        tracing::info!(
            "Ran {ticks} ticks: {} values propagated, {} node updates",
            stats.propagated,
            stats.updated
        );
        Ok(stats)
    }

    /// Serialize `graph` to JSON
    pub fn save(&self, graph: &Graph, pretty: bool) -> anyhow::Result<String> {
        let text = if pretty {
            graph.to_json_pretty(&self.codecs)
        } else {
            graph.to_json(&self.codecs)
        };
        text.context("Failed to serialize graph")
    }
}
