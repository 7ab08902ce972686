use crate::materialize::RecursionPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A serializable configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerializableConfig {
    extend: Option<PathBuf>,
    roots: Option<Vec<String>>,
    allow_duplicate_names: Option<bool>,
    recursion: Option<RecursionPolicy>,
    placeholders: Option<bool>,
}

impl SerializableConfig {
    /// Returns a configuration file path to extend from.
    pub fn extend(&self) -> Option<&Path> {
        self.extend.as_deref()
    }

    /// Merges another configuration that extends this one.
    ///
    /// The `extend` field of this configuration is kept so that an extension
    /// chain can be followed further.
    pub fn merge(&mut self, other: Self) {
        if other.roots.is_some() {
            self.roots = other.roots;
        }

        if other.allow_duplicate_names.is_some() {
            self.allow_duplicate_names = other.allow_duplicate_names;
        }

        if other.recursion.is_some() {
            self.recursion = other.recursion;
        }

        if other.placeholders.is_some() {
            self.placeholders = other.placeholders;
        }
    }
}

/// Compiles a configuration.
pub fn compile_config(config: SerializableConfig) -> super::Config {
    super::Config::new()
        .set_roots(config.roots.unwrap_or_default())
        .set_allow_duplicate_names(config.allow_duplicate_names.unwrap_or_default())
        .set_recursion(config.recursion.unwrap_or_default())
        .set_placeholders(config.placeholders.unwrap_or_default())
}
