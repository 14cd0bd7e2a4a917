// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use crate::codec::CodecRegistry;
use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Data type that can flow through ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortType {
    /// Accepts a value of any concrete type
    Any,
    /// Boolean value
    Bool,
    /// Floating point value
    Number,
    /// String value
    String,
    /// Axis-aligned rectangle
    Rect,
}

impl PortType {
    /// Check whether a value of this type may be stored in a port of `target` type
    pub fn is_assignable_to(self, target: PortType) -> bool {
        target == Self::Any || self == target
    }

    /// Value a freshly declared port of this type holds
    pub fn default_value(self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Number => Value::Number(0.0),
            Self::Any | Self::String => Value::String(String::new()),
            Self::Rect => Value::Rect(Rect::default()),
        }
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "Any",
            Self::Bool => "Bool",
            Self::Number => "Number",
            Self::String => "String",
            Self::Rect => "Rect",
        };
        f.write_str(name)
    }
}

/// Axis-aligned rectangle value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its corner and extent
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Value that can be stored in a port
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Number
    Number(f64),
    /// String
    String(String),
    /// Rectangle
    Rect(Rect),
}

impl Value {
    /// Get the port type for this value
    pub fn port_type(&self) -> PortType {
        match self {
            Self::Bool(_) => PortType::Bool,
            Self::Number(_) => PortType::Number,
            Self::String(_) => PortType::String,
            Self::Rect(_) => PortType::Rect,
        }
    }

    /// The number held, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean held, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string held, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Rect(r) => write!(f, "[{}, {}, {}, {}]", r.x, r.y, r.width, r.height),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Rect> for Value {
    fn from(value: Rect) -> Self {
        Self::Rect(value)
    }
}

/// Serialized form of a single port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    /// Port name
    pub name: String,
    /// Concrete type of the stored value
    #[serde(rename = "type")]
    pub port_type: PortType,
    /// Codec output for the value
    pub value: serde_json::Value,
}

/// A named, typed slot on a node
///
/// The declared type never changes after construction and the stored value is
/// always assignable to it. Only input ports track the dirty flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    name: String,
    port_type: PortType,
    value: Value,
    is_input: bool,
    is_output: bool,
    dirty: bool,
}

impl Port {
    /// Create a port holding the default value of its type
    pub fn new(name: impl Into<String>, port_type: PortType, is_input: bool, is_output: bool) -> Self {
        Self {
            name: name.into(),
            port_type,
            value: port_type.default_value(),
            is_input,
            is_output,
            dirty: false,
        }
    }

    /// Create a new input port
    pub fn input(name: impl Into<String>, port_type: PortType) -> Self {
        Self::new(name, port_type, true, false)
    }

    /// Create a new output port
    pub fn output(name: impl Into<String>, port_type: PortType) -> Self {
        Self::new(name, port_type, false, true)
    }

    /// Create a port that is both an input and an output
    pub fn pass_through(name: impl Into<String>, port_type: PortType) -> Self {
        Self::new(name, port_type, true, true)
    }

    /// Port name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    pub fn port_type(&self) -> PortType {
        self.port_type
    }

    /// Whether connections may feed this port
    pub fn is_input(&self) -> bool {
        self.is_input
    }

    /// Whether connections may read from this port
    pub fn is_output(&self) -> bool {
        self.is_output
    }

    /// Current value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Store a value. Input ports become dirty.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let found = value.port_type();
        if !found.is_assignable_to(self.port_type) {
            return Err(GraphError::TypeMismatch {
                expected: self.port_type,
                found,
            });
        }
        self.value = value;
        if self.is_input {
            self.dirty = true;
        }
        Ok(())
    }

    /// Whether the value was written since the owning node last consumed it
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the value as consumed
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Serialize the current value through the codec of its type
    pub fn to_record(&self, codecs: &CodecRegistry) -> Result<PortRecord> {
        let port_type = self.value.port_type();
        Ok(PortRecord {
            name: self.name.clone(),
            port_type,
            value: codecs.encode(port_type, &self.value)?,
        })
    }

    /// Decode the value carried by `record` without storing it
    pub fn decode_record(&self, record: &PortRecord, codecs: &CodecRegistry) -> Result<Value> {
        if !record.port_type.is_assignable_to(self.port_type) {
            return Err(GraphError::TypeMismatch {
                expected: self.port_type,
                found: record.port_type,
            });
        }
        codecs.decode(record.port_type, &record.value)
    }
}
