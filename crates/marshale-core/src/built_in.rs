//! Built-in leaf converters for common scalar types
//!
//! Every built-in passes a value through unchanged when it already has the
//! target shape and tries a string coercion otherwise.
//!
//! Copyright (c) 2025 Marshale Team
//! Licensed under the Apache-2.0 license

use crate::converter::{Converter, SharedConverter};
use crate::error::ConverterError;
use crate::pipe::try_pipe;
use serde_json::{Number, Value as JsonValue};
use std::collections::HashMap;
use std::sync::Arc;

struct IntegerConverter;

impl Converter for IntegerConverter {
    fn name(&self) -> &str {
        "integer"
    }

    fn convert(&self, raw: &JsonValue) -> Result<JsonValue, ConverterError> {
        match raw {
            JsonValue::Number(n) if n.is_i64() || n.is_u64() => Ok(raw.clone()),
            JsonValue::String(s) => {
                let trimmed = s.trim();
                if let Ok(n) = trimmed.parse::<i64>() {
                    Ok(JsonValue::from(n))
                } else if let Ok(n) = trimmed.parse::<u64>() {
                    Ok(JsonValue::from(n))
                } else {
                    Err(ConverterError::invalid("integer", raw))
                }
            }
            _ => Err(ConverterError::invalid("integer", raw)),
        }
    }
}

struct FloatConverter;

impl Converter for FloatConverter {
    fn name(&self) -> &str {
        "float"
    }

    fn convert(&self, raw: &JsonValue) -> Result<JsonValue, ConverterError> {
        match raw {
            JsonValue::Number(_) => Ok(raw.clone()),
            JsonValue::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(JsonValue::Number)
                .ok_or_else(|| ConverterError::invalid("float", raw)),
            _ => Err(ConverterError::invalid("float", raw)),
        }
    }
}

struct BooleanConverter;

impl Converter for BooleanConverter {
    fn name(&self) -> &str {
        "boolean"
    }

    fn convert(&self, raw: &JsonValue) -> Result<JsonValue, ConverterError> {
        match raw {
            JsonValue::Bool(_) => Ok(raw.clone()),
            JsonValue::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(JsonValue::Bool(true)),
                "false" | "no" | "0" | "off" => Ok(JsonValue::Bool(false)),
                _ => Err(ConverterError::invalid("boolean", raw)),
            },
            _ => Err(ConverterError::invalid("boolean", raw)),
        }
    }
}

struct StringConverter;

impl Converter for StringConverter {
    fn name(&self) -> &str {
        "string"
    }

    fn convert(&self, raw: &JsonValue) -> Result<JsonValue, ConverterError> {
        match raw {
            JsonValue::String(_) => Ok(raw.clone()),
            JsonValue::Number(n) => Ok(JsonValue::String(n.to_string())),
            JsonValue::Bool(b) => Ok(JsonValue::String(b.to_string())),
            _ => Err(ConverterError::invalid("string", raw)),
        }
    }
}

struct AnyConverter;

impl Converter for AnyConverter {
    fn name(&self) -> &str {
        "any"
    }

    fn convert(&self, raw: &JsonValue) -> Result<JsonValue, ConverterError> {
        Ok(raw.clone())
    }
}

struct NullableConverter {
    name: String,
    inner: SharedConverter,
}

impl Converter for NullableConverter {
    fn name(&self) -> &str {
        &self.name
    }

    fn convert(&self, raw: &JsonValue) -> Result<JsonValue, ConverterError> {
        if raw.is_null() {
            Ok(JsonValue::Null)
        } else {
            self.inner.convert(raw)
        }
    }
}

struct EnumMappingConverter {
    name: String,
    mappings: HashMap<String, String>,
    default: Option<String>,
}

impl Converter for EnumMappingConverter {
    fn name(&self) -> &str {
        &self.name
    }

    fn convert(&self, raw: &JsonValue) -> Result<JsonValue, ConverterError> {
        let key = raw
            .as_str()
            .ok_or_else(|| ConverterError::invalid("enumeration label", raw))?;

        if let Some(mapped) = self.mappings.get(key) {
            Ok(JsonValue::String(mapped.clone()))
        } else if let Some(default) = &self.default {
            Ok(JsonValue::String(default.clone()))
        } else {
            let mut available: Vec<&str> = self.mappings.keys().map(String::as_str).collect();
            available.sort_unstable();
            Err(ConverterError {
                message: format!("unknown label '{}'", key),
                expected: Some(format!("one of [{}]", available.join(", "))),
                actual: Some(raw.to_string()),
                source: None,
            })
        }
    }
}

struct ChainConverter {
    name: String,
    steps: Vec<SharedConverter>,
}

impl Converter for ChainConverter {
    fn name(&self) -> &str {
        &self.name
    }

    fn convert(&self, raw: &JsonValue) -> Result<JsonValue, ConverterError> {
        try_pipe(
            raw.clone(),
            self.steps
                .iter()
                .map(|step| move |value: JsonValue| step.convert(&value)),
        )
    }
}

/// Integers; numeric strings are parsed
pub fn integer() -> SharedConverter {
    Arc::new(IntegerConverter)
}

/// Floating point numbers; any JSON number passes, numeric strings are parsed
pub fn float() -> SharedConverter {
    Arc::new(FloatConverter)
}

/// Booleans; accepts true/false, yes/no, 1/0 and on/off strings
pub fn boolean() -> SharedConverter {
    Arc::new(BooleanConverter)
}

/// Strings; numbers and booleans are rendered to text
pub fn string() -> SharedConverter {
    Arc::new(StringConverter)
}

/// Identity converter
pub fn any() -> SharedConverter {
    Arc::new(AnyConverter)
}

/// Let `null` through, delegate everything else to `inner`
///
/// The resulting converter is named `nullable_<inner>`.
pub fn nullable(inner: SharedConverter) -> SharedConverter {
    Arc::new(NullableConverter {
        name: format!("nullable_{}", inner.name()),
        inner,
    })
}

/// Map string labels through a lookup table
pub fn enum_mapping<N: Into<String>>(
    name: N,
    mappings: HashMap<String, String>,
    default: Option<String>,
) -> SharedConverter {
    Arc::new(EnumMappingConverter {
        name: name.into(),
        mappings,
        default,
    })
}

/// Compose converters left to right into a single leaf converter
pub fn chain<N: Into<String>>(name: N, steps: Vec<SharedConverter>) -> SharedConverter {
    Arc::new(ChainConverter {
        name: name.into(),
        steps,
    })
}
