use crate::{
    context_path::ContextPath,
    error::Error,
    node_spec::{Classification, Specification, TypeLocator},
};
use indexmap::{IndexMap, map::Entry};
use log::warn;

/// A policy on duplicate type definition names.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DuplicatePolicy {
    /// Rejects duplicate names.
    #[default]
    Reject,
    /// Lets later definitions shadow earlier ones.
    Shadow,
}

/// An entry of a reference index.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexEntry {
    context: ContextPath,
    type_locator: TypeLocator,
}

impl IndexEntry {
    /// Creates an index entry.
    pub const fn new(context: ContextPath, type_locator: TypeLocator) -> Self {
        Self {
            context,
            type_locator,
        }
    }

    /// Returns a context of a definition.
    pub const fn context(&self) -> &ContextPath {
        &self.context
    }

    /// Returns a type locator of a definition.
    pub const fn type_locator(&self) -> &TypeLocator {
        &self.type_locator
    }

    /// Returns a classification of a definition, which is always a reference.
    pub const fn classification(&self) -> Classification {
        Classification::Ref
    }
}

/// An index from names of type definitions to their definitions.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReferenceIndex {
    entries: IndexMap<String, IndexEntry>,
}

impl ReferenceIndex {
    /// Builds a reference index from named type definitions.
    pub fn build(specification: &Specification, duplicates: DuplicatePolicy) -> Result<Self, Error> {
        let mut entries = IndexMap::<String, IndexEntry>::new();

        for (context, node) in specification
            .iter()
            .filter(|(_, node)| node.classification() == Classification::Ref)
        {
            let entry = IndexEntry::new(context.clone(), node.type_locator().clone());

            match entries.entry(node.name().into()) {
                Entry::Occupied(mut occupied) => {
                    if duplicates == DuplicatePolicy::Reject {
                        return Err(Error::DuplicateName {
                            name: node.name().into(),
                            first: occupied.get().context.clone(),
                            second: context.clone(),
                        });
                    }

                    warn!(
                        "type {} at {} shadows one at {}",
                        node.name(),
                        context,
                        occupied.get().context
                    );
                    occupied.insert(entry);
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(entry);
                }
            }
        }

        Ok(Self { entries })
    }

    /// Gets an entry by a name.
    ///
    /// A prefixed name falls back to its local part if it is not found as it is.
    pub fn get(&self, name: &str) -> Option<&IndexEntry> {
        self.entries.get(name).or_else(|| {
            name.split_once(':')
                .and_then(|(_, local)| self.entries.get(local))
        })
    }

    /// Looks up an entry by a name referenced at a context.
    pub fn lookup(&self, name: &str, context: &ContextPath) -> Result<&IndexEntry, Error> {
        self.get(name).ok_or_else(|| Error::DanglingReference {
            name: name.into(),
            context: context.clone(),
        })
    }

    /// Returns entries in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Returns a number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there is no entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
