use indexmap::IndexMap;
use serde::Serialize;

/// A materialized template tree.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Template {
    /// A terminal leaf.
    Leaf(String),
    /// A map from names to nested templates.
    Map(IndexMap<String, Self>),
}

impl Template {
    /// Creates a map with a single entry.
    pub fn single(name: impl Into<String>, content: Self) -> Self {
        Self::Map(IndexMap::from_iter([(name.into(), content)]))
    }

    /// Creates an empty placeholder keyed by a type name.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::single(name, Self::Map(Default::default()))
    }

    /// Returns a leaf value if the template is a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Map(_) => None,
        }
    }

    /// Returns entries if the template is a map.
    pub const fn as_map(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Leaf(_) => None,
            Self::Map(map) => Some(map),
        }
    }

    /// Gets a nested template by a name.
    pub fn get(&self, name: &str) -> Option<&Self> {
        self.as_map()?.get(name)
    }

    /// Merges entries of another map template into this one.
    ///
    /// Non-map templates are left untouched.
    pub fn merge(&mut self, other: Self) {
        if let (Self::Map(map), Self::Map(other)) = (self, other) {
            map.extend(other);
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Self)> for Template {
    fn from_iter<I: IntoIterator<Item = (K, Self)>>(iterator: I) -> Self {
        Self::Map(
            iterator
                .into_iter()
                .map(|(name, template)| (name.into(), template))
                .collect(),
        )
    }
}
