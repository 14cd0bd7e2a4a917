// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node catalogue.
//!
//! Small leaf nodes that exercise the node contract: constants, arithmetic,
//! comparison, boolean logic and a print sink.

pub mod logic;
pub mod math;
pub mod sinks;
pub mod sources;

use crate::registry::NodeRegistry;
use logic::{Logic, LogicOp, LogicalNot};
use math::{Math, MathOp};
use sinks::PrintToStdOut;
use sources::{LoadBoolean, LoadNumber, LoadString};

/// Register every built-in node type
pub fn register_builtin_nodes(registry: &mut NodeRegistry) {
    registry.register(LoadNumber);
    registry.register(LoadBoolean);
    registry.register(LoadString);

    for op in MathOp::ALL {
        registry.register(Math(op));
    }
    for op in LogicOp::ALL {
        registry.register(Logic(op));
    }
    registry.register(LogicalNot);

    registry.register(PrintToStdOut);
}
