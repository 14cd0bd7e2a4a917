// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tick-driven graph evaluation.
//!
//! A tick has two phases. First every connection copies its output value into
//! its input port and marks that input dirty, whether or not the value
//! changed. Then every dirty node is updated, in the order nodes were added
//! to the graph.
//!
//! Because all copying happens before any node runs, each connection delays a
//! value by exactly one tick: a chain of `k` connections needs `k` ticks to
//! carry a change from one end to the other. Cycles are neither detected nor
//! rejected; they simply never settle.

use crate::error::Result;
use crate::graph::Graph;

/// What one or more ticks did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Values copied across connections
    pub propagated: usize,
    /// Node updates run
    pub updated: usize,
}

impl std::ops::AddAssign for TickStats {
    fn add_assign(&mut self, other: Self) {
        self.propagated += other.propagated;
        self.updated += other.updated;
    }
}

impl Graph {
    /// Advance the graph by one tick.
    ///
    /// A failing node update stops the sweep and is returned; nodes later in
    /// the order are not updated this tick.
    pub fn tick(&mut self) -> Result<TickStats> {
        let propagated = self.propagate();
        let updated = self.sweep()?;
        tracing::trace!(propagated, updated, "tick");
        Ok(TickStats { propagated, updated })
    }

    /// Tick `ticks` times
    pub fn run(&mut self, ticks: u32) -> Result<TickStats> {
        let mut total = TickStats::default();
        for _ in 0..ticks {
            total += self.tick()?;
        }
        Ok(total)
    }

    /// Copy every connected output into its input.
    ///
    /// Connections whose endpoints are gone, or whose input no longer accepts
    /// the value, are skipped.
    fn propagate(&mut self) -> usize {
        let mut count = 0;
        for connection in &self.connections {
            let Some(value) = self
                .nodes
                .get(&connection.output_node)
                .and_then(|n| n.value(connection.output_port))
                .cloned()
            else {
                tracing::warn!("Skipping connection from missing {}", connection.output_node);
                continue;
            };
            let Some(input) = self
                .nodes
                .get_mut(&connection.input_node)
                .and_then(|n| n.port_mut(connection.input_port))
            else {
                tracing::warn!("Skipping connection into missing {}", connection.input_node);
                continue;
            };
            if let Err(err) = input.set_value(value) {
                tracing::warn!("Skipping connection into {}: {err}", connection.input_node);
                continue;
            }
            count += 1;
        }
        count
    }

    /// Update every dirty node in insertion order
    fn sweep(&mut self) -> Result<usize> {
        let mut count = 0;
        for node in self.nodes.values_mut() {
            if node.is_dirty() {
                node.update()?;
                count += 1;
            }
        }
        Ok(count)
    }
}
