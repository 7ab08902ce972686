use crate::{
    context_path::ContextPath,
    error::Error,
    facts::FactTables,
    materialize::{MaterializeOptions, Materializer},
    node_spec::{Classification, Specification},
    raw_tree::parse_document,
    reference_index::{DuplicatePolicy, ReferenceIndex},
    vocabulary::Vocabulary,
};
use log::debug;
use serde_json::{Map, Value};

/// Parses a schema document with default options.
pub fn parse_schema(bytes: &[u8]) -> Result<ParsedSchema, Error> {
    SchemaParser::new().parse(bytes)
}

/// A schema parser.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SchemaParser {
    duplicates: DuplicatePolicy,
}

impl SchemaParser {
    /// Creates a schema parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether duplicate type names are allowed.
    ///
    /// If allowed, later definitions shadow earlier ones.
    pub const fn set_allow_duplicate_names(mut self, allowed: bool) -> Self {
        self.duplicates = if allowed {
            DuplicatePolicy::Shadow
        } else {
            DuplicatePolicy::Reject
        };
        self
    }

    /// Parses a schema document.
    pub fn parse(&self, bytes: &[u8]) -> Result<ParsedSchema, Error> {
        self.parse_tree(parse_document(bytes)?)
    }

    /// Parses a raw schema tree.
    ///
    /// Attributes are keyed by their names prefixed with `@` and repeated
    /// child elements are grouped into lists.
    pub fn parse_tree(&self, mut tree: Value) -> Result<ParsedSchema, Error> {
        let Some(vocabulary) = Vocabulary::detect(&tree) else {
            return Err(Error::MissingSchema(
                tree.as_object()
                    .and_then(|map| map.keys().next().cloned())
                    .unwrap_or_default(),
            ));
        };
        let schema = tree
            .get_mut(vocabulary.schema())
            .ok_or_else(|| Error::MissingSchema(vocabulary.schema()))?;

        if !schema.is_object() {
            *schema = Value::Object(Map::new());
        }

        if let Value::Object(map) = schema {
            map.insert(vocabulary.primitive_type(), vocabulary.primitive_catalog());
        }

        let facts = FactTables::extract(schema, &vocabulary);
        let specification = Specification::build(&facts, &vocabulary);
        let reference_index = ReferenceIndex::build(&specification, self.duplicates)?;

        debug!(
            "indexed {} type definitions with prefix {:?}",
            reference_index.len(),
            vocabulary.prefix()
        );

        Ok(ParsedSchema {
            vocabulary,
            facts,
            specification,
            reference_index,
        })
    }
}

/// A parsed schema.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedSchema {
    vocabulary: Vocabulary,
    facts: FactTables,
    specification: Specification,
    reference_index: ReferenceIndex,
}

impl ParsedSchema {
    /// Returns a vocabulary.
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Returns fact tables.
    pub const fn facts(&self) -> &FactTables {
        &self.facts
    }

    /// Returns node specifications.
    pub const fn specification(&self) -> &Specification {
        &self.specification
    }

    /// Returns a reference index.
    pub const fn reference_index(&self) -> &ReferenceIndex {
        &self.reference_index
    }

    /// Returns contexts of top-level element declarations.
    ///
    /// A top-level declaration is not nested in any other named node.
    pub fn roots(&self) -> impl Iterator<Item = &ContextPath> {
        let element = self.vocabulary.element();

        self.specification
            .iter()
            .filter(move |(context, node)| {
                node.classification() == Classification::Spec
                    && context
                        .segment(0)
                        .and_then(|segment| segment.as_key())
                        == Some(element.as_str())
                    && !self
                        .specification
                        .iter()
                        .any(|(other, _)| other.is_ancestor_of(context))
            })
            .map(|(context, _)| context)
    }

    /// Finds a root context by a top-level element or type definition name.
    pub fn find_root(&self, name: &str) -> Result<&ContextPath, Error> {
        self.roots()
            .find(|context| {
                self.specification
                    .get(context)
                    .is_ok_and(|node| node.name() == name)
            })
            .or_else(|| {
                self.reference_index
                    .get(name)
                    .map(|entry| entry.context())
            })
            .ok_or_else(|| Error::UnknownRoot(name.into()))
    }

    /// Returns `true` if a context belongs to the built-in primitive catalog.
    pub fn is_primitive(&self, context: &ContextPath) -> bool {
        self.facts.primitives().contains_key(context)
    }

    /// Creates a materializer.
    pub fn materializer(&self, options: MaterializeOptions) -> Materializer<'_> {
        Materializer::new(&self.specification, &self.reference_index, options)
    }
}
