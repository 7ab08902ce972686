use crate::{
    context_path::ContextPath, error::Error, facts::FactTables, vocabulary::Vocabulary,
};
use core::fmt::{self, Display, Formatter};
use indexmap::IndexMap;
use log::debug;

const CONTAINER: &str = "_container_";
const TERMINAL: &str = "_terminal_";
const REF: &str = "_ref_";
const SPEC: &str = "_spec_";

/// A type locator.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeLocator {
    /// A structural aggregate of its children.
    Container,
    /// A primitive leaf.
    Terminal,
    /// A reference to a named type.
    Named(String),
}

impl TypeLocator {
    /// Returns `true` if the locator is a terminal.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }
}

impl Display for TypeLocator {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => write!(formatter, "{CONTAINER}"),
            Self::Terminal => write!(formatter, "{TERMINAL}"),
            Self::Named(name) => write!(formatter, "{name}"),
        }
    }
}

/// A classification of a node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Classification {
    /// A reusable named type definition.
    Ref,
    /// A concrete element or attribute usage site.
    Spec,
}

impl Display for Classification {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Ref => REF,
                Self::Spec => SPEC,
            }
        )
    }
}

/// Classifies a context.
///
/// A context is a usage site if either of its last two segments is an
/// element or attribute declaration marker. Otherwise, it is a named type
/// definition.
pub fn classify(context: &ContextPath, vocabulary: &Vocabulary) -> Classification {
    let element = vocabulary.element();
    let attribute = vocabulary.attribute();

    if context.tail(2).iter().any(|segment| {
        segment
            .as_key()
            .is_some_and(|key| key == element || key == attribute)
    }) {
        Classification::Spec
    } else {
        Classification::Ref
    }
}

/// A tagged declaration of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Declaration<'a> {
    /// A named type aggregating its structural children.
    Container,
    /// A named type referring to another named type.
    Reference {
        /// A referenced type name.
        target: &'a str,
    },
    /// A primitive type.
    Primitive,
    /// A usage site referring to a named type.
    Usage {
        /// A referenced type name.
        target: &'a str,
    },
    /// A usage site with an inline type.
    AnonymousUsage,
}

/// A node specification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeSpec {
    name: String,
    type_locator: TypeLocator,
    classification: Classification,
}

impl NodeSpec {
    /// Creates a node specification.
    pub const fn new(
        name: String,
        type_locator: TypeLocator,
        classification: Classification,
    ) -> Self {
        Self {
            name,
            type_locator,
            classification,
        }
    }

    /// Returns a declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a type locator.
    pub const fn type_locator(&self) -> &TypeLocator {
        &self.type_locator
    }

    /// Returns a classification.
    pub const fn classification(&self) -> Classification {
        self.classification
    }

    /// Returns a tagged declaration.
    pub fn declaration(&self) -> Declaration<'_> {
        match (self.classification, &self.type_locator) {
            (Classification::Ref, TypeLocator::Container) => Declaration::Container,
            (Classification::Ref, TypeLocator::Named(target)) => {
                Declaration::Reference { target }
            }
            (Classification::Spec, TypeLocator::Named(target)) => Declaration::Usage { target },
            (Classification::Spec, TypeLocator::Container) => Declaration::AnonymousUsage,
            (_, TypeLocator::Terminal) => Declaration::Primitive,
        }
    }
}

/// Node specifications keyed by contexts.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Specification {
    nodes: IndexMap<ContextPath, NodeSpec>,
    children: IndexMap<ContextPath, Vec<ContextPath>>,
}

impl Specification {
    /// Builds node specifications from fact tables.
    pub fn build(facts: &FactTables, vocabulary: &Vocabulary) -> Self {
        Self::from_nodes(
            facts
                .names()
                .iter()
                .map(|(context, name)| {
                    (
                        context.clone(),
                        NodeSpec::new(
                            name.clone(),
                            facts.type_locator(context),
                            classify(context, vocabulary),
                        ),
                    )
                })
                .collect(),
        )
    }

    /// Creates node specifications from nodes.
    pub fn from_nodes(nodes: IndexMap<ContextPath, NodeSpec>) -> Self {
        let mut children = IndexMap::<_, Vec<_>>::new();

        for context in nodes.keys() {
            if let Some(parent) = context
                .ancestors()
                .find(|ancestor| nodes.contains_key(ancestor))
            {
                children.entry(parent).or_default().push(context.clone());
            }
        }

        debug!("built {} node specifications", nodes.len());

        Self { nodes, children }
    }

    /// Returns a node specification at a context.
    pub fn get(&self, context: &ContextPath) -> Result<&NodeSpec, Error> {
        self.nodes
            .get(context)
            .ok_or_else(|| Error::MissingContext(context.clone()))
    }

    /// Returns `true` if a context exists.
    pub fn contains(&self, context: &ContextPath) -> bool {
        self.nodes.contains_key(context)
    }

    /// Returns nodes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&ContextPath, &NodeSpec)> {
        self.nodes.iter()
    }

    /// Returns a number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if there is no node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns structural children of a context.
    ///
    /// They are the nearest name-bearing strict descendants.
    pub fn children(&self, context: &ContextPath) -> impl Iterator<Item = &ContextPath> {
        self.children.get(context).into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn path(string: &str) -> ContextPath {
        string.parse().unwrap()
    }

    #[rstest]
    #[case("/xs:element", Classification::Spec)]
    #[case("/xs:element/3", Classification::Spec)]
    #[case("/xs:complexType/0/xs:attribute", Classification::Spec)]
    #[case("/xs:complexType/xs:sequence/xs:element/1", Classification::Spec)]
    #[case("/xs:complexType/0", Classification::Ref)]
    #[case("/xs:simpleType", Classification::Ref)]
    #[case("/xs:primitiveType/4", Classification::Ref)]
    #[case("/xs:element/xs:complexType/xs:sequence", Classification::Ref)]
    fn classify_contexts(#[case] context: &str, #[case] expected: Classification) {
        assert_eq!(classify(&path(context), &Vocabulary::default()), expected);
    }

    #[rstest]
    #[case(Classification::Ref, TypeLocator::Container, Declaration::Container)]
    #[case(
        Classification::Ref,
        TypeLocator::Named("T".into()),
        Declaration::Reference { target: "T" }
    )]
    #[case(Classification::Ref, TypeLocator::Terminal, Declaration::Primitive)]
    #[case(
        Classification::Spec,
        TypeLocator::Named("T".into()),
        Declaration::Usage { target: "T" }
    )]
    #[case(
        Classification::Spec,
        TypeLocator::Container,
        Declaration::AnonymousUsage
    )]
    #[case(Classification::Spec, TypeLocator::Terminal, Declaration::Primitive)]
    fn tag_declarations(
        #[case] classification: Classification,
        #[case] locator: TypeLocator,
        #[case] expected: Declaration<'static>,
    ) {
        assert_eq!(
            NodeSpec::new("x".into(), locator, classification).declaration(),
            expected
        );
    }

    #[test]
    fn display_sentinels() {
        assert_eq!(TypeLocator::Container.to_string(), "_container_");
        assert_eq!(TypeLocator::Terminal.to_string(), "_terminal_");
        assert_eq!(TypeLocator::Named("xs:int".into()).to_string(), "xs:int");
        assert_eq!(Classification::Ref.to_string(), "_ref_");
        assert_eq!(Classification::Spec.to_string(), "_spec_");
    }

    #[test]
    fn build_specification() {
        let vocabulary = Vocabulary::default();
        let facts = FactTables::extract(
            &json!({
                "xs:element": { "@name": "A", "@type": "B" },
                "xs:complexType": {
                    "@name": "B",
                    "xs:sequence": {
                        "xs:element": [
                            { "@name": "C", "@type": "xs:int" },
                            {
                                "@name": "D",
                                "xs:complexType": {
                                    "xs:sequence": { "xs:element": { "@name": "E", "@type": "xs:int" } }
                                }
                            }
                        ]
                    }
                },
                "xs:primitiveType": [{ "@name": "xs:int" }]
            }),
            &vocabulary,
        );

        let specification = Specification::build(&facts, &vocabulary);

        assert_eq!(specification.len(), 6);
        assert_eq!(
            specification.get(&path("/xs:element")).unwrap(),
            &NodeSpec::new(
                "A".into(),
                TypeLocator::Named("B".into()),
                Classification::Spec
            )
        );
        assert_eq!(
            specification.get(&path("/xs:complexType")).unwrap(),
            &NodeSpec::new("B".into(), TypeLocator::Container, Classification::Ref)
        );
        assert_eq!(
            specification
                .get(&path("/xs:complexType/xs:sequence/xs:element/1"))
                .unwrap()
                .declaration(),
            Declaration::AnonymousUsage
        );
        assert_eq!(
            specification
                .get(&path("/xs:primitiveType/0"))
                .unwrap()
                .declaration(),
            Declaration::Primitive
        );
        assert_eq!(
            specification
                .children(&path("/xs:complexType"))
                .collect::<Vec<_>>(),
            vec![
                &path("/xs:complexType/xs:sequence/xs:element/0"),
                &path("/xs:complexType/xs:sequence/xs:element/1"),
            ]
        );
        assert_eq!(
            specification
                .children(&path("/xs:complexType/xs:sequence/xs:element/1"))
                .collect::<Vec<_>>(),
            vec![&path(
                "/xs:complexType/xs:sequence/xs:element/1/xs:complexType/xs:sequence/xs:element"
            )]
        );
        assert_eq!(specification.children(&path("/xs:element")).count(), 0);
    }

    #[test]
    fn fail_on_missing_context() {
        assert!(matches!(
            Specification::default().get(&path("/xs:element")),
            Err(Error::MissingContext(context)) if context == path("/xs:element")
        ));
    }
}
