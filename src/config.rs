mod error;
mod serde;
mod toml;

pub use self::{
    error::ConfigError,
    serde::{SerializableConfig, compile_config},
    toml::read_config,
};
use crate::materialize::{MaterializeOptions, RecursionPolicy};
use core::ops::Deref;

/// A materialization configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    roots: Vec<String>,
    allow_duplicate_names: bool,
    materialize: MaterializeOptions,
}

impl Config {
    /// Creates a configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns names of roots to materialize.
    ///
    /// No name means all top-level elements.
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.roots.iter().map(Deref::deref)
    }

    /// Returns whether duplicate type names are allowed.
    pub const fn allow_duplicate_names(&self) -> bool {
        self.allow_duplicate_names
    }

    /// Returns materialization options.
    pub const fn materialize(&self) -> MaterializeOptions {
        self.materialize
    }

    /// Sets names of roots to materialize.
    pub fn set_roots(mut self, roots: Vec<String>) -> Self {
        self.roots = roots;
        self
    }

    /// Sets whether duplicate type names are allowed.
    pub const fn set_allow_duplicate_names(mut self, allowed: bool) -> Self {
        self.allow_duplicate_names = allowed;
        self
    }

    /// Sets a recursion policy.
    pub const fn set_recursion(mut self, recursion: RecursionPolicy) -> Self {
        self.materialize = self.materialize.set_recursion(recursion);
        self
    }

    /// Sets whether references to primitive types are emitted as empty placeholders.
    pub const fn set_placeholders(mut self, placeholders: bool) -> Self {
        self.materialize = self.materialize.set_placeholders(placeholders);
        self
    }
}
