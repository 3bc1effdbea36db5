//! Property registries: property name → value grammar.
//!
//! A registry is assembled once by a [`RegistryBuilder`] and is read-only
//! afterwards. Sanitizers take their registry by value and only ever read it,
//! so a built registry can be shared across threads without locking.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use tessera_common::warning::warn_once;

use crate::grammar::{DefaultMatcherFactory, MatcherFactory, MatcherRef};

/// Errors raised while building a registry.
///
/// These are configuration mistakes in the code composing the registry, not
/// problems with any stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A property was added that the registry already knows.
    #[error("duplicate registration of property '{name}'")]
    DuplicatePropertyRegistration {
        /// The property name, lowercased.
        name: String,
    },
    /// An extension needed a property that is not registered.
    #[error("property '{name}' is required but not registered")]
    MissingProperty {
        /// The property name, lowercased.
        name: String,
    },
}

/// An ordered step in registry construction.
///
/// Extensions replace the subclass override chains of a classic sanitizer
/// design: each one receives the registry built so far and the factory
/// supplying primitive matchers.
pub type PropertyExtension =
    fn(&mut PropertyRegistry, &dyn MatcherFactory) -> Result<(), RegistryError>;

/// A map from property name to value grammar.
///
/// "Property names are ASCII case-insensitive", so names are stored
/// lowercased and looked up the same way.
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    properties: BTreeMap<String, MatcherRef>,
}

impl PropertyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            properties: BTreeMap::new(),
        }
    }

    /// The grammar for `name`, if registered.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<MatcherRef> {
        self.properties.get(&name.to_ascii_lowercase()).cloned()
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(&name.to_ascii_lowercase())
    }

    /// Number of registered properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if no property is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Registered property names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Registered properties with their grammars, sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &MatcherRef)> {
        self.properties.iter().map(|(name, m)| (name.as_str(), m))
    }

    /// Replace the whole property set with `properties`.
    pub fn set_all<S: AsRef<str>>(&mut self, properties: impl IntoIterator<Item = (S, MatcherRef)>) {
        self.properties = properties
            .into_iter()
            .map(|(name, m)| (name.as_ref().to_ascii_lowercase(), m))
            .collect();
    }

    /// Register or replace a single property, returning the grammar it replaced.
    pub fn set(&mut self, name: &str, matcher: MatcherRef) -> Option<MatcherRef> {
        self.properties.insert(name.to_ascii_lowercase(), matcher)
    }

    /// Register new properties.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicatePropertyRegistration`] if any name is
    /// already registered or appears twice in `properties`. Nothing is added
    /// in that case.
    pub fn add<S: AsRef<str>>(
        &mut self,
        properties: impl IntoIterator<Item = (S, MatcherRef)>,
    ) -> Result<(), RegistryError> {
        let mut pending: BTreeMap<String, MatcherRef> = BTreeMap::new();
        for (name, matcher) in properties {
            let name = name.as_ref().to_ascii_lowercase();
            if self.properties.contains_key(&name) || pending.contains_key(&name) {
                return Err(RegistryError::DuplicatePropertyRegistration { name });
            }
            let _ = pending.insert(name, matcher);
        }
        self.properties.append(&mut pending);
        Ok(())
    }

    /// Unregister `name`, returning its grammar.
    pub fn remove(&mut self, name: &str) -> Option<MatcherRef> {
        self.properties.remove(&name.to_ascii_lowercase())
    }

    /// The grammar for `name`, or an error naming it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingProperty`] if `name` is not registered.
    pub fn require(&self, name: &str) -> Result<MatcherRef, RegistryError> {
        self.get(name).ok_or_else(|| RegistryError::MissingProperty {
            name: name.to_ascii_lowercase(),
        })
    }
}

impl<S: AsRef<str>> FromIterator<(S, MatcherRef)> for PropertyRegistry {
    fn from_iter<I: IntoIterator<Item = (S, MatcherRef)>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.set_all(iter);
        registry
    }
}

/// One-time construction of a [`PropertyRegistry`].
///
/// ```text
///   base set ──► extension 1 ──► extension 2 ──► ... ──► build()
///                     │               │
///                     └── factory ────┘   (shared primitive matchers)
/// ```
///
/// Every extension runs exactly once, in the order given. The built registry
/// is immutable, so there is never a question of whether a step was already
/// applied.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    registry: PropertyRegistry,
    factory: Arc<dyn MatcherFactory>,
}

impl RegistryBuilder {
    /// Start from `base`, with `factory` supplying primitives to extensions.
    #[must_use]
    pub fn new(base: PropertyRegistry, factory: Arc<dyn MatcherFactory>) -> Self {
        Self {
            registry: base,
            factory,
        }
    }

    /// Start from the standard property set built with `factory`.
    #[must_use]
    pub fn standard(factory: Arc<dyn MatcherFactory>) -> Self {
        let base = crate::properties::standard_properties(factory.as_ref());
        Self::new(base, factory)
    }

    /// The factory extensions receive.
    #[must_use]
    pub fn factory(&self) -> &dyn MatcherFactory {
        self.factory.as_ref()
    }

    /// Apply `extension`.
    ///
    /// # Errors
    ///
    /// Propagates the extension's error. The builder is consumed either way.
    pub fn extend(mut self, extension: PropertyExtension) -> Result<Self, RegistryError> {
        extension(&mut self.registry, self.factory.as_ref())?;
        Ok(self)
    }

    /// Apply `extension`, logging a failure instead of returning it.
    ///
    /// A failing extension leaves the registry as it was before the call.
    #[must_use]
    pub fn extend_or_warn(mut self, label: &str, extension: PropertyExtension) -> Self {
        let mut scratch = self.registry.clone();
        match extension(&mut scratch, self.factory.as_ref()) {
            Ok(()) => self.registry = scratch,
            Err(err) => warn_once("Registry", &format!("skipping extension '{label}': {err}")),
        }
        self
    }

    /// Finish construction.
    #[must_use]
    pub fn build(self) -> PropertyRegistry {
        self.registry
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::standard(Arc::new(DefaultMatcherFactory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::KeywordMatcher;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry: PropertyRegistry = [("Color", KeywordMatcher::one("red"))]
            .into_iter()
            .collect();
        assert!(registry.contains("COLOR"));
        assert!(registry.get("color").is_some());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["color"]);
    }

    #[test]
    fn test_add_is_all_or_nothing() {
        let mut registry: PropertyRegistry = [("color", KeywordMatcher::one("red"))]
            .into_iter()
            .collect();
        let result = registry.add([
            ("margin", KeywordMatcher::one("auto")),
            ("color", KeywordMatcher::one("blue")),
        ]);
        assert_eq!(
            result,
            Err(RegistryError::DuplicatePropertyRegistration {
                name: "color".to_string()
            })
        );
        assert!(!registry.contains("margin"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_rejects_duplicates_within_batch() {
        let mut registry = PropertyRegistry::new();
        let result = registry.add([
            ("gap", KeywordMatcher::one("normal")),
            ("GAP", KeywordMatcher::one("normal")),
        ]);
        assert!(result.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_and_require() {
        let mut registry: PropertyRegistry = [("filter", KeywordMatcher::one("none"))]
            .into_iter()
            .collect();
        assert!(registry.require("filter").is_ok());
        assert!(registry.remove("FILTER").is_some());
        assert_eq!(
            registry.require("filter").err(),
            Some(RegistryError::MissingProperty {
                name: "filter".to_string()
            })
        );
    }

    fn add_gap(registry: &mut PropertyRegistry, _: &dyn MatcherFactory) -> Result<(), RegistryError> {
        registry.add([("gap", KeywordMatcher::one("normal"))])
    }

    fn add_gap_and_color(
        registry: &mut PropertyRegistry,
        _: &dyn MatcherFactory,
    ) -> Result<(), RegistryError> {
        let _ = registry.set("row-gap", KeywordMatcher::one("normal"));
        registry.add([("color", KeywordMatcher::one("red"))])
    }

    #[test]
    fn test_builder_extend_propagates_errors() {
        let builder = RegistryBuilder::new(PropertyRegistry::new(), Arc::new(DefaultMatcherFactory));
        let builder = builder.extend(add_gap).expect("first registration succeeds");
        assert!(builder.extend(add_gap).is_err());
    }

    #[test]
    fn test_builder_extend_or_warn_rolls_back() {
        let base: PropertyRegistry = [("color", KeywordMatcher::one("red"))]
            .into_iter()
            .collect();
        let registry = RegistryBuilder::new(base, Arc::new(DefaultMatcherFactory))
            .extend_or_warn("gap-and-color", add_gap_and_color)
            .extend_or_warn("gap", add_gap)
            .build();
        assert!(registry.contains("gap"));
        assert!(!registry.contains("row-gap"));
        assert_eq!(registry.len(), 2);
    }
}
