// SPDX-License-Identifier: MIT OR Apache-2.0
//! Value codec registry.
//!
//! Maps a port type to the functions that turn its values into JSON and back.
//! Ports persist their values through this registry, so every concrete type a
//! graph stores must have a codec before the graph is saved or loaded.
//!
//! The registry is an ordinary owned object. It is not synchronized; share it
//! behind a lock if several threads need it.

use crate::error::{GraphError, Result};
use crate::port::{PortType, Rect, Value};
use indexmap::IndexMap;
use std::fmt;

/// Encodes a value into its JSON form
pub type EncodeFn = Box<dyn Fn(&Value) -> Result<serde_json::Value> + Send + Sync>;

/// Decodes a value from its JSON form
pub type DecodeFn = Box<dyn Fn(&serde_json::Value) -> Result<Value> + Send + Sync>;

struct Codec {
    encode: EncodeFn,
    decode: DecodeFn,
}

/// Registry of value codecs keyed by port type
#[derive(Default)]
pub struct CodecRegistry {
    codecs: IndexMap<PortType, Codec>,
}

impl CodecRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with codecs for every concrete port type
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtin_codecs(&mut registry);
        registry
    }

    /// Register a codec. An existing codec for the same type is replaced.
    pub fn register<E, D>(&mut self, port_type: PortType, encode: E, decode: D)
    where
        E: Fn(&Value) -> Result<serde_json::Value> + Send + Sync + 'static,
        D: Fn(&serde_json::Value) -> Result<Value> + Send + Sync + 'static,
    {
        let codec = Codec {
            encode: Box::new(encode),
            decode: Box::new(decode),
        };
        if self.codecs.insert(port_type, codec).is_some() {
            tracing::debug!("Replaced codec for {port_type}");
        }
    }

    /// Whether a codec exists for `port_type`
    pub fn contains(&self, port_type: PortType) -> bool {
        self.codecs.contains_key(&port_type)
    }

    /// Registered types, in registration order
    pub fn types(&self) -> impl Iterator<Item = PortType> + '_ {
        self.codecs.keys().copied()
    }

    /// Encode `value` with the codec of `port_type`
    pub fn encode(&self, port_type: PortType, value: &Value) -> Result<serde_json::Value> {
        let codec = self.get(port_type)?;
        let found = value.port_type();
        if found != port_type {
            return Err(GraphError::TypeMismatch {
                expected: port_type,
                found,
            });
        }
        (codec.encode)(value)
    }

    /// Decode a value with the codec of `port_type`
    pub fn decode(&self, port_type: PortType, data: &serde_json::Value) -> Result<Value> {
        let codec = self.get(port_type)?;
        let value = (codec.decode)(data)?;
        let found = value.port_type();
        if found != port_type {
            return Err(GraphError::TypeMismatch {
                expected: port_type,
                found,
            });
        }
        Ok(value)
    }

    /// Remove every codec
    pub fn clear(&mut self) {
        self.codecs.clear();
    }

    fn get(&self, port_type: PortType) -> Result<&Codec> {
        self.codecs
            .get(&port_type)
            .ok_or(GraphError::UnregisteredType(port_type))
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("types", &self.codecs.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn codec_error(port_type: PortType, reason: impl Into<String>) -> GraphError {
    GraphError::Codec {
        port_type,
        reason: reason.into(),
    }
}

fn mismatch(expected: PortType, value: &Value) -> GraphError {
    GraphError::TypeMismatch {
        expected,
        found: value.port_type(),
    }
}

/// Register codecs for `Bool`, `Number`, `String` and `Rect`
pub fn register_builtin_codecs(registry: &mut CodecRegistry) {
    registry.register(
        PortType::Bool,
        |value| match value {
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            other => Err(mismatch(PortType::Bool, other)),
        },
        |data| {
            data.as_bool()
                .map(Value::Bool)
                .ok_or_else(|| codec_error(PortType::Bool, format!("expected a boolean, got {data}")))
        },
    );

    registry.register(
        PortType::Number,
        |value| match value {
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .ok_or_else(|| codec_error(PortType::Number, format!("{n} is not finite"))),
            other => Err(mismatch(PortType::Number, other)),
        },
        |data| {
            data.as_f64()
                .map(Value::Number)
                .ok_or_else(|| codec_error(PortType::Number, format!("expected a number, got {data}")))
        },
    );

    registry.register(
        PortType::String,
        |value| match value {
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            other => Err(mismatch(PortType::String, other)),
        },
        |data| {
            data.as_str()
                .map(Value::from)
                .ok_or_else(|| codec_error(PortType::String, format!("expected a string, got {data}")))
        },
    );

    registry.register(
        PortType::Rect,
        |value| match value {
            Value::Rect(r) => {
                serde_json::to_value(r).map_err(|e| codec_error(PortType::Rect, e.to_string()))
            }
            other => Err(mismatch(PortType::Rect, other)),
        },
        |data| {
            serde_json::from_value::<Rect>(data.clone())
                .map(Value::Rect)
                .map_err(|e| codec_error(PortType::Rect, e.to_string()))
        },
    );
}
