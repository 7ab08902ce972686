use crate::context_path::ContextPath;
use core::{
    error,
    fmt::{self, Display, Formatter},
    str::Utf8Error,
};
use std::io;

/// An error.
#[derive(Debug)]
pub enum Error {
    /// A circular type reference.
    CircularReference(Vec<String>),
    /// A type reference to an undeclared name.
    DanglingReference {
        /// A referenced name.
        name: String,
        /// A context referencing the name.
        context: ContextPath,
    },
    /// Duplicate names of structural children in a container.
    DuplicateChild {
        /// A duplicate name.
        name: String,
        /// A context of the first child.
        first: ContextPath,
        /// A context of the second child.
        second: ContextPath,
    },
    /// Duplicate names of type definitions.
    DuplicateName {
        /// A duplicate name.
        name: String,
        /// A context of the first definition.
        first: ContextPath,
        /// A context of the second definition.
        second: ContextPath,
    },
    /// An I/O error.
    Io(io::Error),
    /// A JSON serialization error.
    Json(serde_json::Error),
    /// A missing context.
    MissingContext(ContextPath),
    /// A document whose root is not a schema element.
    MissingSchema(String),
    /// An unknown root name.
    UnknownRoot(String),
    /// An invalid UTF-8 encoding.
    Utf8(Utf8Error),
    /// An XML parse error.
    Xml(roxmltree::Error),
}

impl error::Error for Error {}

impl Display for Error {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::CircularReference(names) => {
                write!(formatter, "circular type reference: {}", names.join(" -> "))
            }
            Self::DanglingReference { name, context } => {
                write!(formatter, "dangling type reference: {name} at {context}")
            }
            Self::DuplicateChild {
                name,
                first,
                second,
            } => {
                write!(
                    formatter,
                    "duplicate child name: {name} at {first} and {second}"
                )
            }
            Self::DuplicateName {
                name,
                first,
                second,
            } => {
                write!(
                    formatter,
                    "duplicate type name: {name} at {first} and {second}"
                )
            }
            Self::Io(error) => write!(formatter, "{error}"),
            Self::Json(error) => write!(formatter, "{error}"),
            Self::MissingContext(context) => write!(formatter, "missing context: {context}"),
            Self::MissingSchema(name) => {
                write!(formatter, "schema element not found (root: {name})")
            }
            Self::UnknownRoot(name) => write!(formatter, "unknown root: {name}"),
            Self::Utf8(error) => write!(formatter, "{error}"),
            Self::Xml(error) => write!(formatter, "{error}"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

impl From<Utf8Error> for Error {
    fn from(error: Utf8Error) -> Self {
        Self::Utf8(error)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(error: roxmltree::Error) -> Self {
        Self::Xml(error)
    }
}
