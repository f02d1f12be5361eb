// SPDX-License-Identifier: MIT OR Apache-2.0

use indexmap::IndexMap;

use crate::control::{Control, PlainControl};
use crate::error::UiError;

/// Builds a fresh control.
pub type ControlFactory = Box<dyn Fn() -> Control>;

/// Maps control type names to factories.
///
/// Layout files name the type of every control they create; the registry
/// turns that name into a new, disconnected [Control].
pub struct ControlRegistry {
    factories: IndexMap<String, ControlFactory>,
}

impl ControlRegistry {
    /// Creates a registry that only knows the plain `Control` type.
    pub fn new() -> Self {
        let mut registry = Self {
            factories: IndexMap::new(),
        };
        registry.register("Control", || Control::new(PlainControl));
        registry
    }

    /// Registers a factory under `type_name`, replacing any previous one.
    pub fn register<F>(&mut self, type_name: impl Into<String>, factory: F)
    where
        F: Fn() -> Control + 'static,
    {
        let type_name = type_name.into();
        if self.factories.contains_key(&type_name) {
            log::debug!("Replacing control factory for {}", type_name);
        }
        self.factories.insert(type_name, Box::new(factory));
    }

    /// Creates a new control of the named type.
    pub fn create(&self, type_name: &str) -> Result<Control, UiError> {
        let factory = self
            .factories
            .get(type_name)
            .ok_or_else(|| UiError::UnknownControlType {
                type_name: type_name.to_string(),
            })?;
        Ok(factory())
    }

    /// If a factory is registered for `type_name`.
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Registered type names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl Default for ControlRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type() {
        let registry = ControlRegistry::new();
        assert!(registry.contains("Control"));
        assert_eq!(
            registry.create("Gizmo").unwrap_err(),
            UiError::UnknownControlType {
                type_name: "Gizmo".to_string()
            }
        );
    }

    #[test]
    fn test_factory_builds_fresh_controls() {
        let mut registry = ControlRegistry::new();
        registry.register("Box", || Control::default().with_size(4, 4));

        let control = registry.create("Box").unwrap();
        assert_eq!(control.type_name(), "Control");
        assert_eq!(registry.names().collect::<Vec<_>>(), ["Control", "Box"]);
    }
}
