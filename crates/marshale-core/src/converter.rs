//! Leaf converter capability
//!
//! A leaf converter turns one raw scalar (or any raw value it chooses to
//! accept) into a typed value. Converters are shared, stateless trait
//! objects; closures are adapted with [`from_fn`].
//!
//! Copyright (c) 2025 Marshale Team
//! Licensed under the Apache-2.0 license

use crate::built_in;
use crate::error::ConverterError;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A unary conversion `raw -> value` that may fail
///
/// Convention: a raw value already in the target shape is returned as-is,
/// and strings are coerced into the target scalar otherwise.
pub trait Converter: Send + Sync {
    /// Short name used in error reports and declaration documents
    fn name(&self) -> &str;

    /// Convert a raw value
    fn convert(&self, raw: &JsonValue) -> Result<JsonValue, ConverterError>;
}

/// Shared handle to a converter
pub type SharedConverter = Arc<dyn Converter>;

impl fmt::Debug for dyn Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Converter({})", self.name())
    }
}

/// Converter backed by a closure
pub struct FnConverter<F> {
    name: String,
    func: F,
}

impl<F> Converter for FnConverter<F>
where
    F: Fn(&JsonValue) -> Result<JsonValue, ConverterError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn convert(&self, raw: &JsonValue) -> Result<JsonValue, ConverterError> {
        (self.func)(raw)
    }
}

/// Wrap a closure as a shared converter
///
/// ```
/// use marshale_core::converter::{from_fn, Converter};
/// use marshale_core::ConverterError;
/// use serde_json::json;
///
/// let upper = from_fn("upper", |raw| {
///     raw.as_str()
///         .map(|s| json!(s.to_uppercase()))
///         .ok_or_else(|| ConverterError::invalid("string", raw))
/// });
/// assert_eq!(upper.convert(&json!("abc")).unwrap(), json!("ABC"));
/// ```
pub fn from_fn<N, F>(name: N, func: F) -> SharedConverter
where
    N: Into<String>,
    F: Fn(&JsonValue) -> Result<JsonValue, ConverterError> + Send + Sync + 'static,
{
    Arc::new(FnConverter {
        name: name.into(),
        func,
    })
}

/// Named converters available to declaration documents
///
/// Any type expression that names an entry here is a leaf; every other name
/// is read as a record reference.
#[derive(Clone, Default)]
pub struct ConverterSet {
    converters: BTreeMap<String, SharedConverter>,
}

impl ConverterSet {
    /// An empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in scalar converters and their nullable variants
    pub fn built_in() -> Self {
        let mut set = Self::new();
        for converter in [
            built_in::integer(),
            built_in::float(),
            built_in::boolean(),
            built_in::string(),
        ] {
            set.insert(built_in::nullable(converter.clone()));
            set.insert(converter);
        }
        set.insert(built_in::any());
        set
    }

    /// Register a converter under its own name, replacing any previous entry
    pub fn insert(&mut self, converter: SharedConverter) -> Option<SharedConverter> {
        self.converters.insert(converter.name().to_string(), converter)
    }

    /// Register a converter under an explicit alias
    pub fn insert_as<N: Into<String>>(
        &mut self,
        name: N,
        converter: SharedConverter,
    ) -> Option<SharedConverter> {
        self.converters.insert(name.into(), converter)
    }

    pub fn with(mut self, converter: SharedConverter) -> Self {
        self.insert(converter);
        self
    }

    pub fn get(&self, name: &str) -> Option<&SharedConverter> {
        self.converters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.converters.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl fmt::Debug for ConverterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.converters.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_fn_uses_name_and_closure() {
        let negate = from_fn("negate", |raw| {
            raw.as_i64()
                .map(|n| json!(-n))
                .ok_or_else(|| ConverterError::invalid("integer", raw))
        });
        assert_eq!(negate.name(), "negate");
        assert_eq!(negate.convert(&json!(4)).unwrap(), json!(-4));
        assert!(negate.convert(&json!("4")).is_err());
    }

    #[test]
    fn test_built_in_set_contents() {
        let set = ConverterSet::built_in();
        for name in [
            "integer",
            "float",
            "boolean",
            "string",
            "any",
            "nullable_integer",
            "nullable_float",
            "nullable_boolean",
            "nullable_string",
        ] {
            assert!(set.contains(name), "missing built-in converter {}", name);
        }
        assert_eq!(set.len(), 9);
    }

    #[test]
    fn test_insert_as_alias() {
        let mut set = ConverterSet::new();
        assert!(set.is_empty());
        set.insert_as("int", built_in::integer());
        assert_eq!(set.get("int").map(|c| c.name()), Some("integer"));
        assert!(!set.contains("integer"));
    }

    #[test]
    fn test_debug_lists_names() {
        let set = ConverterSet::new().with(built_in::any());
        assert_eq!(format!("{:?}", set), "{\"any\"}");
    }
}
