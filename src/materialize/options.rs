use serde::{Deserialize, Serialize};

/// A policy on circular type references.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecursionPolicy {
    /// Rejects circular references before materialization.
    #[default]
    Reject,
    /// Expands a circular reference once and stops at its name.
    Truncate,
}

/// Materialization options.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MaterializeOptions {
    recursion: RecursionPolicy,
    placeholders: bool,
}

impl MaterializeOptions {
    /// Creates materialization options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a recursion policy.
    pub const fn recursion(&self) -> RecursionPolicy {
        self.recursion
    }

    /// Returns whether references to primitive types are emitted as empty placeholders.
    pub const fn placeholders(&self) -> bool {
        self.placeholders
    }

    /// Sets a recursion policy.
    pub const fn set_recursion(mut self, recursion: RecursionPolicy) -> Self {
        self.recursion = recursion;
        self
    }

    /// Sets whether references to primitive types are emitted as empty placeholders.
    pub const fn set_placeholders(mut self, placeholders: bool) -> Self {
        self.placeholders = placeholders;
        self
    }
}
