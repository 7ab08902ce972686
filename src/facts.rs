use crate::{
    context_path::ContextPath,
    extract::{PathFilter, extract_paths},
    node_spec::TypeLocator,
    vocabulary::Vocabulary,
};
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

const NAME: &str = "@name";
const BASE: &str = "@base";
const TYPE: &str = "@type";

/// A table of facts keyed by contexts.
pub type FactTable = IndexMap<ContextPath, String>;

/// Fact tables extracted from a raw schema tree.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FactTables {
    names: FactTable,
    bases: FactTable,
    types: FactTable,
    primitives: FactTable,
}

impl FactTables {
    /// Extracts fact tables from the content of a schema element.
    ///
    /// The primitive catalog is expected to be merged into the schema
    /// beforehand.
    pub fn extract(schema: &Value, vocabulary: &Vocabulary) -> Self {
        let restriction = vocabulary.restriction();
        let extension = vocabulary.extension();
        let primitive_type = vocabulary.primitive_type();

        let mut bases = collect(extract_paths(
            schema,
            BASE,
            -2,
            Some(PathFilter::new(-2, &restriction)),
        ));
        bases.extend(collect(extract_paths(
            schema,
            BASE,
            -3,
            Some(PathFilter::new(-2, &extension)),
        )));

        let tables = Self {
            names: collect(extract_paths(schema, NAME, -1, None)),
            bases,
            types: collect(extract_paths(schema, TYPE, -1, None)),
            primitives: collect(extract_paths(
                schema,
                NAME,
                -1,
                Some(PathFilter::new(0, &primitive_type)),
            )),
        };

        debug!(
            "extracted {} names, {} bases, {} types, and {} primitives",
            tables.names.len(),
            tables.bases.len(),
            tables.types.len(),
            tables.primitives.len()
        );

        tables
    }

    /// Returns declared names.
    pub const fn names(&self) -> &FactTable {
        &self.names
    }

    /// Returns inherited base type references.
    pub const fn bases(&self) -> &FactTable {
        &self.bases
    }

    /// Returns explicit type references.
    pub const fn types(&self) -> &FactTable {
        &self.types
    }

    /// Returns primitive type markers.
    pub const fn primitives(&self) -> &FactTable {
        &self.primitives
    }

    /// Returns primitive contexts labeled as terminals.
    pub fn primitive_labels(&self) -> impl Iterator<Item = (&ContextPath, TypeLocator)> {
        self.primitives
            .keys()
            .map(|context| (context, TypeLocator::Terminal))
    }

    /// Resolves a type locator of a context.
    ///
    /// An explicit type takes precedence over an inherited base, which takes
    /// precedence over a primitive marker. Anything else is a container.
    pub fn type_locator(&self, context: &ContextPath) -> TypeLocator {
        if let Some(name) = self.types.get(context) {
            TypeLocator::Named(name.clone())
        } else if let Some(name) = self.bases.get(context) {
            TypeLocator::Named(name.clone())
        } else if self.primitives.contains_key(context) {
            TypeLocator::Terminal
        } else {
            TypeLocator::Container
        }
    }
}

fn collect(values: IndexMap<ContextPath, &Value>) -> FactTable {
    values
        .into_iter()
        .filter_map(|(context, value)| Some((context, value.as_str()?.to_owned())))
        .collect()
}
