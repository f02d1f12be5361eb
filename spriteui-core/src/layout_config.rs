// SPDX-License-Identifier: MIT OR Apache-2.0

//! Control attributes loaded from TOML.
//!
//! Every table is named after a control and holds its attributes in
//! document order:
//!
//! ```toml
//! [MainPanel]
//! Size = "300,200"
//! "$CC0" = "btnOk:Button"
//!
//! [btnOk]
//! Location = [12, 160]
//! Text = "OK"
//! ```
//!
//! `$CC` keys create a child through the [ControlRegistry], add it to the
//! control being configured and then apply the child's own table.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::control::ControlId;
use crate::error::UiError;
use crate::registry::ControlRegistry;
use crate::window_manager::WindowManager;

/// Prefix of keys that create child controls.
pub const CHILD_CONTROL_PREFIX: &str = "$CC";

/// Attribute tables keyed by control name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutConfig {
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl LayoutConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, UiError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| UiError::LayoutParse {
            details: format!("{}: {}", path.display(), err),
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, UiError> {
        let document: IndexMap<String, IndexMap<String, toml::Value>> =
            toml::from_str(content).map_err(|err| UiError::LayoutParse {
                details: err.to_string(),
            })?;

        let mut config = Self::new();
        for (section, values) in document {
            for (key, value) in values {
                match value_to_string(&value) {
                    Some(value) => config.set(&section, key, value),
                    None => log::warn!("Unsupported value for {}.{}: {}", section, key, value),
                }
            }
        }
        Ok(config)
    }

    /// Set one attribute, appending it to the control's table.
    pub fn set(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// The attributes of one control in document order.
    pub fn section(&self, name: &str) -> Option<&IndexMap<String, String>> {
        self.sections.get(name)
    }

    /// Names of all configured controls.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Apply the table named after the control to it, creating child
    /// controls declared with `$CC` keys.
    ///
    /// Controls without a table are left untouched.
    pub fn apply(
        &self,
        wm: &mut WindowManager,
        registry: &ControlRegistry,
        id: ControlId,
    ) -> Result<(), UiError> {
        let mut chain = Vec::new();
        self.apply_recursive(wm, registry, id, &mut chain)
    }

    fn apply_recursive(
        &self,
        wm: &mut WindowManager,
        registry: &ControlRegistry,
        id: ControlId,
        chain: &mut Vec<String>,
    ) -> Result<(), UiError> {
        let name = wm.name(id).to_string();
        if chain.contains(&name) {
            return Err(UiError::LayoutParse {
                details: format!("control '{}' contains itself", name),
            });
        }
        let Some(section) = self.sections.get(&name) else {
            return Ok(());
        };

        chain.push(name);
        for (key, value) in section {
            if !key.starts_with(CHILD_CONTROL_PREFIX) {
                wm.apply_attribute(id, key, value);
                continue;
            }

            let Some((child_name, type_name)) = value.split_once(':') else {
                log::warn!("Malformed child declaration '{}' for {}", value, key);
                continue;
            };
            let control = registry.create(type_name.trim())?.with_name(child_name.trim());
            let child = wm.create_child(id, control)?;
            self.apply_recursive(wm, registry, child, chain)?;
        }
        chain.pop();
        Ok(())
    }
}

fn value_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(",")),
        toml::Value::Datetime(_) | toml::Value::Table(_) => None,
    }
}
