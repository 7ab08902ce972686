use crate::context_path::{ContextPath, Segment};
use serde_json::Value;

/// A node matched by a tree scan.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScanMatch<'a> {
    path: ContextPath,
    value: &'a Value,
}

impl<'a> ScanMatch<'a> {
    /// Creates a match.
    pub const fn new(path: ContextPath, value: &'a Value) -> Self {
        Self { path, value }
    }

    /// Returns a full path to the matched node.
    pub const fn path(&self) -> &ContextPath {
        &self.path
    }

    /// Returns a matched value.
    pub const fn value(&self) -> &'a Value {
        self.value
    }
}

/// Scans a tree depth-first for nodes matching a target.
///
/// A map entry matches when its key or its string value equals the target
/// and a list element matches when it equals the target. Matched values are
/// not descended into. Without a target, every scalar leaf matches.
pub fn scan<'a>(value: &'a Value, target: Option<&str>) -> Vec<ScanMatch<'a>> {
    let mut matches = vec![];

    scan_value(value, target, &ContextPath::default(), &mut matches);

    matches
}

fn scan_value<'a>(
    value: &'a Value,
    target: Option<&str>,
    path: &ContextPath,
    matches: &mut Vec<ScanMatch<'a>>,
) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                scan_entry(
                    Segment::from(key.as_str()),
                    target == Some(key.as_str()),
                    value,
                    target,
                    path,
                    matches,
                );
            }
        }
        Value::Array(values) => {
            for (index, value) in values.iter().enumerate() {
                scan_entry(Segment::Index(index), false, value, target, path, matches);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            if target.is_none() || is_target(value, target) {
                matches.push(ScanMatch::new(path.clone(), value));
            }
        }
    }
}

fn scan_entry<'a>(
    segment: Segment,
    key_matched: bool,
    value: &'a Value,
    target: Option<&str>,
    path: &ContextPath,
    matches: &mut Vec<ScanMatch<'a>>,
) {
    let path = path.child(segment);

    if key_matched || is_target(value, target) {
        matches.push(ScanMatch::new(path, value));
    } else if target.is_none() || value.is_object() || value.is_array() {
        scan_value(value, target, &path, matches);
    }
}

fn is_target(value: &Value, target: Option<&str>) -> bool {
    target.is_some_and(|target| value.as_str() == Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn paths(matches: &[ScanMatch]) -> Vec<String> {
        matches
            .iter()
            .map(|found| found.path().to_string())
            .collect()
    }

    #[test]
    fn match_keys() {
        let tree = json!({
            "xs:element": [
                { "@name": "foo", "@type": "xs:string" },
                { "@name": "bar" }
            ],
            "xs:complexType": { "@name": "Baz" }
        });

        let matches = scan(&tree, Some("@name"));

        assert_eq!(
            paths(&matches),
            vec![
                "/xs:element/0/@name",
                "/xs:element/1/@name",
                "/xs:complexType/@name"
            ]
        );
        assert_eq!(
            matches
                .iter()
                .map(|found| found.value().as_str().unwrap())
                .collect::<Vec<_>>(),
            vec!["foo", "bar", "Baz"]
        );
    }

    #[test]
    fn match_values() {
        let tree = json!({ "a": { "b": "target" }, "c": ["x", "target"] });

        assert_eq!(paths(&scan(&tree, Some("target"))), vec!["/a/b", "/c/1"]);
    }

    #[test]
    fn stop_at_matched_composites() {
        let tree = json!({ "@name": { "@name": "inner" } });

        let matches = scan(&tree, Some("@name"));

        assert_eq!(paths(&matches), vec!["/@name"]);
        assert_eq!(matches[0].value(), &json!({ "@name": "inner" }));
    }

    #[test]
    fn skip_unmatched_scalars() {
        let tree = json!({ "a": 1, "b": null, "c": [true] });

        assert!(scan(&tree, Some("@name")).is_empty());
    }

    #[test]
    fn collect_leaves_without_target() {
        let tree = json!({ "a": { "b": 1 }, "c": ["x", null] });

        assert_eq!(paths(&scan(&tree, None)), vec!["/a/b", "/c/0", "/c/1"]);
    }

    #[test]
    fn scan_scalar_root() {
        assert_eq!(paths(&scan(&json!("x"), None)), vec!["/"]);
        assert_eq!(paths(&scan(&json!("x"), Some("x"))), vec!["/"]);
        assert!(scan(&json!("x"), Some("y")).is_empty());
    }
}
