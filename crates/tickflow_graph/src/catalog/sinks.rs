// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sinks that report values out of the graph.

use crate::error::Result;
use crate::node::{NodeKind, SupergraphRole};
use crate::port::{Port, PortType};

/// Prints whatever arrives on its input to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintToStdOut;

impl NodeKind for PrintToStdOut {
    fn type_name(&self) -> &str {
        "PrintToStdOut"
    }

    fn ports(&self) -> Vec<Port> {
        vec![Port::input("value", PortType::Any)]
    }

    fn compute(&mut self, ports: &mut [Port]) -> Result<()> {
        println!("{}", ports[0].value());
        Ok(())
    }

    fn supergraph_role(&self) -> Option<SupergraphRole> {
        Some(SupergraphRole::Output)
    }
}
