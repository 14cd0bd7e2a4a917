// SPDX-License-Identifier: MIT OR Apache-2.0
//! Arithmetic and comparison on numbers.
//!
//! Every node here has inputs `A` and `B` and one output, `output = A op B`.

use crate::error::Result;
use crate::node::NodeKind;
use crate::port::{Port, PortType, Value};

/// Binary numeric operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOp {
    /// A + B
    Add,
    /// A - B
    Subtract,
    /// A * B
    Multiply,
    /// A / B
    Divide,
    /// Remainder of A / B
    Modulo,
    /// 1 if A == B, else 0
    Equals,
    /// Smaller of A and B
    Min,
    /// Larger of A and B
    Max,
}

impl MathOp {
    /// Every operation, in registration order
    pub const ALL: [MathOp; 8] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::Equals,
        Self::Min,
        Self::Max,
    ];

    /// Node type name
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Modulo => "Mod",
            Self::Equals => "Equals",
            Self::Min => "Min",
            Self::Max => "Max",
        }
    }

    /// Apply the operation
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
            Self::Modulo => a % b,
            Self::Equals => {
                if a == b {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Min => a.min(b),
            Self::Max => a.max(b),
        }
    }
}

/// Node computing one [`MathOp`]
#[derive(Debug, Clone, Copy)]
pub struct Math(pub MathOp);

impl NodeKind for Math {
    fn type_name(&self) -> &str {
        self.0.name()
    }

    fn ports(&self) -> Vec<Port> {
        vec![
            Port::input("A", PortType::Number),
            Port::input("B", PortType::Number),
            Port::output("output", PortType::Number),
        ]
    }

    fn compute(&mut self, ports: &mut [Port]) -> Result<()> {
        let a = ports[0].value().as_number().unwrap_or_default();
        let b = ports[1].value().as_number().unwrap_or_default();
        ports[2].set_value(Value::Number(self.0.apply(a, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdAllocator;
    use crate::node::Node;

    fn eval(op: MathOp, a: f64, b: f64) -> f64 {
        let ids = IdAllocator::new();
        let mut node = Node::new(Math(op), &ids)
            .with_value(0, a)
            .unwrap()
            .with_value(1, b)
            .unwrap();
        node.update().unwrap();
        node.value(2).and_then(Value::as_number).unwrap()
    }

    #[test]
    fn test_operations() {
        assert_eq!(eval(MathOp::Add, 1.0, 2.0), 3.0);
        assert_eq!(eval(MathOp::Subtract, 1.0, 2.0), -1.0);
        assert_eq!(eval(MathOp::Multiply, 3.0, 3.0), 9.0);
        assert_eq!(eval(MathOp::Divide, 1.0, 4.0), 0.25);
        assert_eq!(eval(MathOp::Modulo, 7.0, 3.0), 1.0);
        assert_eq!(eval(MathOp::Equals, 2.0, 2.0), 1.0);
        assert_eq!(eval(MathOp::Equals, 2.0, 3.0), 0.0);
        assert_eq!(eval(MathOp::Min, 2.0, 3.0), 2.0);
        assert_eq!(eval(MathOp::Max, 2.0, 3.0), 3.0);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = MathOp::ALL.iter().map(|op| op.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MathOp::ALL.len());
    }
}
