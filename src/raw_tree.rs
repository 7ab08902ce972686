//! Conversion of XML documents into generic value trees.
//!
//! Attributes are keyed by their names prefixed with `@`, text content by
//! `#text`, and repeated child elements are grouped into lists under the
//! position of their first occurrence.
//!
//! Element names and qualified names in `type` and `base` attribute values
//! are written with the first prefix in scope bound to their namespace, so
//! that names spelled with different prefixes of the same namespace agree.

use crate::error::Error;
use log::trace;
use roxmltree::{Document, Node, ParsingOptions};
use serde_json::{Map, Value};

const ATTRIBUTE_PREFIX: &str = "@";
const TEXT_KEY: &str = "#text";
const QUALIFIED_NAME_ATTRIBUTES: &[&str] = &["type", "base"];

/// Parses XML bytes into a raw tree.
pub fn parse_document(bytes: &[u8]) -> Result<Value, Error> {
    let document = Document::parse_with_options(
        core::str::from_utf8(bytes)?,
        ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        },
    )?;
    let root = document.root_element();

    trace!("parsed document rooted at {}", root.tag_name().name());

    Ok(Value::Object(Map::from_iter([(
        qualified_name(root, root.tag_name().namespace(), root.tag_name().name()),
        element_value(root),
    )])))
}

fn element_value(node: Node) -> Value {
    let mut map = Map::new();
    let mut text = String::new();

    for attribute in node.attributes() {
        map.insert(
            format!(
                "{ATTRIBUTE_PREFIX}{}",
                qualified_name(node, attribute.namespace(), attribute.name())
            ),
            Value::String(
                if attribute.namespace().is_none()
                    && QUALIFIED_NAME_ATTRIBUTES.contains(&attribute.name())
                {
                    qualified_value(node, attribute.value())
                } else {
                    attribute.value().into()
                },
            ),
        );
    }

    for child in node.children() {
        if child.is_element() {
            insert_child(
                &mut map,
                qualified_name(child, child.tag_name().namespace(), child.tag_name().name()),
                element_value(child),
            );
        } else if let Some(content) = child.is_text().then(|| child.text()).flatten() {
            text.push_str(content);
        }
    }

    let text = text.trim();

    if !text.is_empty() {
        if map.is_empty() {
            return Value::String(text.into());
        }

        map.insert(TEXT_KEY.into(), Value::String(text.into()));
    }

    if map.is_empty() {
        Value::Null
    } else {
        Value::Object(map)
    }
}

fn insert_child(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

fn qualified_value(node: Node, value: &str) -> String {
    let Some((prefix, local)) = value.split_once(':') else {
        return value.into();
    };

    match node.lookup_namespace_uri(Some(prefix)) {
        Some(uri) => qualified_name(node, Some(uri), local),
        None => value.into(),
    }
}

fn qualified_name(node: Node, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| {
        node.namespaces()
            .find(|namespace| namespace.uri() == uri)
            .and_then(|namespace| namespace.name())
    }) {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_attributes_and_children() {
        let tree = parse_document(
            indoc! {r#"
                <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                  <xs:element name="foo" type="xs:string"/>
                  <xs:complexType name="Bar">
                    <xs:sequence>
                      <xs:element name="baz" type="xs:int"/>
                    </xs:sequence>
                  </xs:complexType>
                  <xs:element name="qux" type="Bar"/>
                </xs:schema>
            "#}
            .as_bytes(),
        )
        .unwrap();

        assert_eq!(
            tree,
            json!({
                "xs:schema": {
                    "xs:element": [
                        { "@name": "foo", "@type": "xs:string" },
                        { "@name": "qux", "@type": "Bar" }
                    ],
                    "xs:complexType": {
                        "@name": "Bar",
                        "xs:sequence": {
                            "xs:element": { "@name": "baz", "@type": "xs:int" }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn keep_prefix_in_use() {
        let tree = parse_document(
            br#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"><xsd:element name="a"/></xsd:schema>"#,
        )
        .unwrap();

        assert_eq!(
            tree,
            json!({ "xsd:schema": { "xsd:element": { "@name": "a" } } })
        );
    }

    #[test]
    fn unify_prefixes_of_same_namespace() {
        let tree = parse_document(
            indoc! {r#"
                <xs:schema
                  xmlns:xs="http://www.w3.org/2001/XMLSchema"
                  xmlns:xsd="http://www.w3.org/2001/XMLSchema"
                  xmlns:tns="urn:example">
                  <xsd:element name="a" type="xsd:string"/>
                  <xs:element name="b" type="tns:B"/>
                  <xs:simpleType name="C">
                    <xsd:restriction base="unknown:D"/>
                  </xs:simpleType>
                </xs:schema>
            "#}
            .as_bytes(),
        )
        .unwrap();
        let schema = tree.as_object().unwrap().values().next().unwrap();
        let (element, elements) = schema.as_object().unwrap().iter().next().unwrap();
        let prefix = element.split_once(':').unwrap().0;

        assert_eq!(schema.as_object().unwrap().len(), 2);
        assert_eq!(
            elements[0],
            json!({ "@name": "a", "@type": format!("{prefix}:string") })
        );
        assert_eq!(elements[1], json!({ "@name": "b", "@type": "tns:B" }));
        assert_eq!(
            schema[format!("{prefix}:simpleType")][format!("{prefix}:restriction")]["@base"],
            json!("unknown:D")
        );
    }

    #[test]
    fn parse_default_namespace() {
        let tree = parse_document(
            br#"<schema xmlns="http://www.w3.org/2001/XMLSchema"><element name="a"/></schema>"#,
        )
        .unwrap();

        assert_eq!(tree, json!({ "schema": { "element": { "@name": "a" } } }));
    }

    #[test]
    fn parse_text() {
        let tree = parse_document(
            indoc! {r#"
                <a>
                  <b>text</b>
                  <c id="1">more</c>
                  <d/>
                  <!-- comment -->
                </a>
            "#}
            .as_bytes(),
        )
        .unwrap();

        assert_eq!(
            tree,
            json!({
                "a": {
                    "b": "text",
                    "c": { "@id": "1", "#text": "more" },
                    "d": null
                }
            })
        );
    }

    #[test]
    fn fail_on_malformed_xml() {
        assert!(matches!(parse_document(b"<a><b></a>"), Err(Error::Xml(_))));
    }

    #[test]
    fn fail_on_invalid_utf8() {
        assert!(matches!(parse_document(&[0xff, 0xfe]), Err(Error::Utf8(_))));
    }
}
