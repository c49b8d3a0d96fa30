//! Check definitions and the registry that holds them.
//!
//! A [`Check`] describes itself with [`CheckMetadata`] and, when activated
//! with an options record, returns the [`Listener`]s to register with the
//! pattern engine. Handlers receive a [`CheckContext`] giving access to the
//! tree, the [`TypeOracle`](crate::TypeOracle) and the reporter. Checks
//! keep no state between nodes.

mod context;
mod error;
mod metadata;
mod no_ignored_observable;
mod no_ignored_subscribe;
mod no_unsafe_first;

use serde_json::{Map, Value};

pub use context::{CheckContext, Handler, Listener};
pub use error::{CheckConfigError, HandlerError};
pub use metadata::{CheckKind, CheckMetadata, OptionSchema};
pub use no_ignored_observable::NoIgnoredObservable;
pub use no_ignored_subscribe::NoIgnoredSubscribe;
pub use no_unsafe_first::{DEFAULT_OBSERVABLE_PATTERN, NoUnsafeFirst};

/// A configurable analysis over syntax trees.
pub trait Check: Send + Sync {
    /// Returns the check's static description.
    fn metadata(&self) -> &'static CheckMetadata;

    /// Validates `options` and returns the listeners to register.
    ///
    /// `options` is `null` when the user supplied none.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckConfigError`] when the options do not match the
    /// schema or a pattern cannot be compiled.
    fn configure(&self, options: &Value) -> Result<Vec<Listener>, CheckConfigError>;
}

/// The set of checks available to a session.
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in check.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(NoIgnoredObservable));
        registry.register(Box::new(NoIgnoredSubscribe));
        registry.register(Box::new(NoUnsafeFirst));
        registry
    }

    /// Adds a check. Later registrations with a known identifier are
    /// ignored.
    pub fn register(&mut self, check: Box<dyn Check>) {
        if self.get(check.metadata().id).is_none() {
            self.checks.push(check);
        }
    }

    /// Looks up a check by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Check> {
        self.checks
            .iter()
            .find(|check| check.metadata().id == id)
            .map(|check| &**check)
    }

    /// Iterates over the checks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|check| &**check)
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns `true` if no check is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.checks.iter().map(|check| check.metadata().id))
            .finish()
    }
}

/// Returns the options object, rejecting non-objects and keys the schema
/// does not declare. `null` is treated as an empty record.
pub(crate) fn options_object(
    metadata: &CheckMetadata,
    options: &Value,
) -> Result<Map<String, Value>, CheckConfigError> {
    let record = match options {
        Value::Null => return Ok(Map::new()),
        Value::Object(record) => record,
        other => {
            return Err(CheckConfigError::invalid_option(
                metadata.id,
                format!("expected an object, found {}", json_type(other)),
            ));
        }
    };
    if let Some(unknown) = record.keys().find(|key| metadata.option(key).is_none()) {
        return Err(CheckConfigError::invalid_option(
            metadata.id,
            format!("unknown option `{unknown}`"),
        ));
    }
    Ok(record.clone())
}

/// Reads an optional string option.
pub(crate) fn string_option<'v>(
    metadata: &CheckMetadata,
    record: &'v Map<String, Value>,
    name: &str,
) -> Result<Option<&'v str>, CheckConfigError> {
    match record.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(other) => Err(CheckConfigError::invalid_option(
            metadata.id,
            format!("option `{name}` must be a string, found {}", json_type(other)),
        )),
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
