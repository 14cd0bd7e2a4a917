// SPDX-License-Identifier: MIT OR Apache-2.0
//! Boolean logic.

use crate::error::Result;
use crate::node::NodeKind;
use crate::port::{Port, PortType, Value};

/// Binary boolean operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    /// A && B
    And,
    /// A || B
    Or,
    /// A ^ B
    Xor,
}

impl LogicOp {
    /// Every operation, in registration order
    pub const ALL: [LogicOp; 3] = [Self::And, Self::Or, Self::Xor];

    /// Node type name
    pub fn name(self) -> &'static str {
        match self {
            Self::And => "LogicalAnd",
            Self::Or => "LogicalOr",
            Self::Xor => "LogicalXor",
        }
    }

    /// Apply the operation
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Self::And => a && b,
            Self::Or => a || b,
            Self::Xor => a ^ b,
        }
    }
}

/// Node computing one [`LogicOp`]
#[derive(Debug, Clone, Copy)]
pub struct Logic(pub LogicOp);

impl NodeKind for Logic {
    fn type_name(&self) -> &str {
        self.0.name()
    }

    fn ports(&self) -> Vec<Port> {
        vec![
            Port::input("A", PortType::Bool),
            Port::input("B", PortType::Bool),
            Port::output("output", PortType::Bool),
        ]
    }

    fn compute(&mut self, ports: &mut [Port]) -> Result<()> {
        let a = ports[0].value().as_bool().unwrap_or_default();
        let b = ports[1].value().as_bool().unwrap_or_default();
        ports[2].set_value(Value::Bool(self.0.apply(a, b)))
    }
}

/// output = !A
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicalNot;

impl NodeKind for LogicalNot {
    fn type_name(&self) -> &str {
        "LogicalNot"
    }

    fn ports(&self) -> Vec<Port> {
        vec![
            Port::input("A", PortType::Bool),
            Port::output("output", PortType::Bool),
        ]
    }

    fn compute(&mut self, ports: &mut [Port]) -> Result<()> {
        let a = ports[0].value().as_bool().unwrap_or_default();
        ports[1].set_value(Value::Bool(!a))
    }
}
