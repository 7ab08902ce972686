use serde_json::{Map, Value};

/// A default namespace prefix of XML Schema.
pub const DEFAULT_PREFIX: &str = "xs";

/// Local names of built-in primitive types.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "duration",
    "dateTime",
    "time",
    "date",
    "gYearMonth",
    "gYear",
    "gMonthDay",
    "gDay",
    "gMonth",
    "string",
    "boolean",
    "base64Binary",
    "hexBinary",
    "float",
    "decimal",
    "integer",
    "nonPositiveInteger",
    "negativeInteger",
    "int",
    "short",
    "byte",
    "nonNegativeInteger",
    "unsignedLong",
    "positiveInteger",
    "unsignedInt",
    "unsignedShort",
    "unsignedByte",
    "double",
    "anyURI",
    "QName",
    "NOTATION",
];

const SCHEMA: &str = "schema";
const ELEMENT: &str = "element";
const ATTRIBUTE: &str = "attribute";
const RESTRICTION: &str = "restriction";
const EXTENSION: &str = "extension";
const PRIMITIVE_TYPE: &str = "primitiveType";

/// Structural markers of a schema document qualified by its namespace prefix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vocabulary {
    prefix: Option<String>,
}

impl Vocabulary {
    /// Creates a vocabulary.
    pub const fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Detects a vocabulary from the root key of a raw schema tree.
    pub fn detect(tree: &Value) -> Option<Self> {
        tree.as_object()?.keys().find_map(|key| match key.split_once(':') {
            Some((prefix, SCHEMA)) => Some(Self::new(Some(prefix.into()))),
            None if key == SCHEMA => Some(Self::new(None)),
            _ => None,
        })
    }

    /// Returns a namespace prefix.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Qualifies a local name with the prefix.
    pub fn qualify(&self, local: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{local}"),
            None => local.into(),
        }
    }

    /// Returns a schema root marker.
    pub fn schema(&self) -> String {
        self.qualify(SCHEMA)
    }

    /// Returns an element declaration marker.
    pub fn element(&self) -> String {
        self.qualify(ELEMENT)
    }

    /// Returns an attribute declaration marker.
    pub fn attribute(&self) -> String {
        self.qualify(ATTRIBUTE)
    }

    /// Returns a restriction marker.
    pub fn restriction(&self) -> String {
        self.qualify(RESTRICTION)
    }

    /// Returns an extension marker.
    pub fn extension(&self) -> String {
        self.qualify(EXTENSION)
    }

    /// Returns a marker of the synthetic primitive catalog.
    pub fn primitive_type(&self) -> String {
        self.qualify(PRIMITIVE_TYPE)
    }

    /// Returns qualified names of primitive types.
    pub fn primitive_names(&self) -> impl Iterator<Item = String> + '_ {
        PRIMITIVE_TYPES.iter().map(|name| self.qualify(name))
    }

    /// Returns a primitive catalog as a list of name-only entries.
    pub fn primitive_catalog(&self) -> Value {
        Value::Array(
            self.primitive_names()
                .map(|name| Value::Object(Map::from_iter([("@name".into(), Value::String(name))])))
                .collect(),
        )
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(Some(DEFAULT_PREFIX.into()))
    }
}
