//! The component registry: type tag to factory.
//!
//! Registration happens explicitly at startup (`with_builtins`), never by
//! reflection. Instantiation of an unknown or malformed descriptor is a
//! hard, descriptive error: it means the template itself is broken.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::component::Component;
use crate::kinds;

/// Errors from descriptor instantiation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown component type '{0}'")]
    UnknownType(String),

    #[error("component descriptor is not an object")]
    NotAnObject,

    #[error("component descriptor is missing its 'type' tag")]
    MissingType,

    #[error("invalid '{kind}' descriptor: {reason}")]
    InvalidDescriptor { kind: String, reason: String },
}

/// A factory producing a live component from descriptor JSON. The registry
/// is passed through so container kinds can instantiate their children.
pub type Factory = fn(&Value, &ComponentRegistry) -> Result<Box<dyn Component>, RegistryError>;

/// Maps descriptor type tags to component factories.
pub struct ComponentRegistry {
    factories: BTreeMap<String, Factory>,
}

impl ComponentRegistry {
    /// An empty registry. Hosts embedding vellum register their own kinds.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A registry with every built-in component kind registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(kinds::label::TAG, kinds::label::from_json);
        registry.register(kinds::text_field::TAG, kinds::text_field::from_json);
        registry.register(kinds::number_field::TAG, kinds::number_field::from_json);
        registry.register(kinds::checkbox::TAG, kinds::checkbox::from_json);
        registry.register(kinds::dropdown::TAG, kinds::dropdown::from_json);
        registry.register(kinds::panel::TAG, kinds::panel::from_json);
        registry.register(kinds::table::TAG, kinds::table::from_json);
        registry.register(kinds::roll_button::TAG, kinds::roll_button::from_json);
        registry
    }

    /// Register a factory for a type tag, replacing any previous one.
    pub fn register(&mut self, tag: impl Into<String>, factory: Factory) {
        let tag = tag.into();
        debug!(tag, "registering component type");
        self.factories.insert(tag, factory);
    }

    /// Instantiate a descriptor into a live component.
    pub fn instantiate(&self, descriptor: &Value) -> Result<Box<dyn Component>, RegistryError> {
        let object = descriptor.as_object().ok_or(RegistryError::NotAnObject)?;
        let kind = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(RegistryError::MissingType)?;
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| RegistryError::UnknownType(kind.to_string()))?;
        factory(descriptor, self)
    }

    /// Registered type tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Shorthand for kind factories reporting a serde failure.
pub(crate) fn invalid(kind: &str, err: impl std::fmt::Display) -> RegistryError {
    RegistryError::InvalidDescriptor {
        kind: kind.to_string(),
        reason: err.to_string(),
    }
}
