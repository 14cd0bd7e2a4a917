// SPDX-License-Identifier: MIT OR Apache-2.0
//! Constant sources.
//!
//! Sources have no inputs, so they are never dirty and never update during a
//! tick. Their value is set when the node is built or edited.

use crate::error::Result;
use crate::node::{NodeKind, SupergraphRole};
use crate::port::{Port, PortType};

macro_rules! constant_source {
    ($(#[$meta:meta])* $kind:ident, $name:literal, $port_type:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $kind;

        impl NodeKind for $kind {
            fn type_name(&self) -> &str {
                $name
            }

            fn ports(&self) -> Vec<Port> {
                vec![Port::output("value", $port_type)]
            }

            fn compute(&mut self, _ports: &mut [Port]) -> Result<()> {
                Ok(())
            }

            fn supergraph_role(&self) -> Option<SupergraphRole> {
                Some(SupergraphRole::Input)
            }
        }
    };
}

constant_source!(
    /// Holds a number
    LoadNumber,
    "LoadNumber",
    PortType::Number
);
constant_source!(
    /// Holds a boolean
    LoadBoolean,
    "LoadBoolean",
    PortType::Bool
);
constant_source!(
    /// Holds a string
    LoadString,
    "LoadString",
    PortType::String
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdAllocator;
    use crate::node::Node;
    use crate::port::Value;

    #[test]
    fn test_sources_mark_supergraph_inputs() {
        let ids = IdAllocator::new();
        for node in [
            Node::new(LoadNumber, &ids),
            Node::new(LoadBoolean, &ids),
            Node::new(LoadString, &ids),
        ] {
            assert_eq!(node.supergraph_role(), Some(SupergraphRole::Input));
            assert!(!node.is_dirty());
        }
    }

    #[test]
    fn test_update_keeps_value() {
        let ids = IdAllocator::new();
        let mut node = Node::new(LoadString, &ids).with_value(0, "hello").unwrap();
        node.update().unwrap();
        assert_eq!(node.value(0), Some(&Value::from("hello")));
    }
}
