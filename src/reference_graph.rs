use crate::{
    context_path::ContextPath,
    error::Error,
    node_spec::{Declaration, Specification},
    reference_index::ReferenceIndex,
};
use log::debug;
use petgraph::{
    Graph,
    algo::kosaraju_scc,
    graph::{DefaultIx, NodeIndex},
    visit::{Control, DfsEvent, depth_first_search},
};
use std::collections::HashMap;

/// A directed graph of references between contexts.
#[derive(Debug)]
pub struct ReferenceGraph<'a> {
    graph: Graph<&'a ContextPath, ()>,
    nodes: HashMap<&'a ContextPath, NodeIndex<DefaultIx>>,
}

impl<'a> ReferenceGraph<'a> {
    /// Builds a reference graph.
    ///
    /// Dangling references are left out and reported on materialization
    /// instead.
    pub fn build(specification: &'a Specification, index: &'a ReferenceIndex) -> Self {
        let mut graph = Graph::<&ContextPath, ()>::new();
        let mut nodes = HashMap::new();

        for (context, _) in specification.iter() {
            nodes.insert(context, graph.add_node(context));
        }

        for (context, node) in specification.iter() {
            for target in targets(specification, index, context, node.declaration()) {
                if let Some(&target) = nodes.get(target) {
                    graph.add_edge(nodes[context], target, ());
                }
            }
        }

        debug!(
            "built a reference graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Self { graph, nodes }
    }

    /// Checks if any context reachable from a root refers back to itself.
    pub fn check_cycles(
        &self,
        specification: &Specification,
        root: &ContextPath,
    ) -> Result<(), Error> {
        let Some(&root) = self.nodes.get(root) else {
            return Err(Error::MissingContext(root.clone()));
        };

        let Control::Break(node) = depth_first_search(&self.graph, Some(root), |event| {
            if let DfsEvent::BackEdge(_, target) = event {
                Control::Break(target)
            } else {
                Control::Continue
            }
        }) else {
            return Ok(());
        };

        let component = kosaraju_scc(&self.graph)
            .into_iter()
            .find(|component| component.contains(&node))
            .unwrap_or_else(|| vec![node]);

        Err(Error::CircularReference(
            component
                .into_iter()
                .rev()
                .map(|index| {
                    specification
                        .get(self.graph[index])
                        .map(|node| node.name().to_owned())
                })
                .collect::<Result<_, _>>()?,
        ))
    }
}

fn targets<'a>(
    specification: &'a Specification,
    index: &'a ReferenceIndex,
    context: &'a ContextPath,
    declaration: Declaration,
) -> Vec<&'a ContextPath> {
    match declaration {
        Declaration::Container | Declaration::AnonymousUsage => {
            specification.children(context).collect()
        }
        Declaration::Reference { target } => index
            .get(target)
            .filter(|entry| !entry.type_locator().is_terminal())
            .map(|entry| entry.context())
            .into_iter()
            .collect(),
        Declaration::Usage { target } => index
            .get(target)
            .map(|entry| entry.context())
            .into_iter()
            .collect(),
        Declaration::Primitive => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        node_spec::{Classification, NodeSpec, TypeLocator},
        reference_index::DuplicatePolicy,
    };
    use pretty_assertions::assert_eq;

    fn path(string: &str) -> ContextPath {
        string.parse().unwrap()
    }

    fn node(name: &str, type_locator: TypeLocator, classification: Classification) -> NodeSpec {
        NodeSpec::new(name.into(), type_locator, classification)
    }

    fn named(name: &str) -> TypeLocator {
        TypeLocator::Named(name.into())
    }

    #[test]
    fn accept_acyclic_references() {
        let specification = Specification::from_nodes(
            [
                (
                    path("/xs:element"),
                    node("a", named("A"), Classification::Spec),
                ),
                (
                    path("/xs:complexType"),
                    node("A", TypeLocator::Container, Classification::Ref),
                ),
                (
                    path("/xs:complexType/xs:sequence/xs:element"),
                    node("b", named("xs:int"), Classification::Spec),
                ),
                (
                    path("/xs:primitiveType/0"),
                    node("xs:int", TypeLocator::Terminal, Classification::Ref),
                ),
            ]
            .into_iter()
            .collect(),
        );
        let index = ReferenceIndex::build(&specification, DuplicatePolicy::Reject).unwrap();

        assert!(
            ReferenceGraph::build(&specification, &index)
                .check_cycles(&specification, &path("/xs:element"))
                .is_ok()
        );
    }

    #[test]
    fn detect_self_reference() {
        let specification = Specification::from_nodes(
            [
                (
                    path("/xs:complexType"),
                    node("Node", TypeLocator::Container, Classification::Ref),
                ),
                (
                    path("/xs:complexType/xs:sequence/xs:element"),
                    node("next", named("Node"), Classification::Spec),
                ),
            ]
            .into_iter()
            .collect(),
        );
        let index = ReferenceIndex::build(&specification, DuplicatePolicy::Reject).unwrap();

        let Err(Error::CircularReference(mut names)) = ReferenceGraph::build(&specification, &index)
            .check_cycles(&specification, &path("/xs:complexType"))
        else {
            panic!("cycle should be detected");
        };

        names.sort();

        assert_eq!(names, vec!["Node".to_owned(), "next".to_owned()]);
    }

    #[test]
    fn detect_mutual_references() {
        let specification = Specification::from_nodes(
            [
                (
                    path("/xs:simpleType/0"),
                    node("A", named("B"), Classification::Ref),
                ),
                (
                    path("/xs:simpleType/1"),
                    node("B", named("A"), Classification::Ref),
                ),
            ]
            .into_iter()
            .collect(),
        );
        let index = ReferenceIndex::build(&specification, DuplicatePolicy::Reject).unwrap();

        assert!(matches!(
            ReferenceGraph::build(&specification, &index)
                .check_cycles(&specification, &path("/xs:simpleType/0")),
            Err(Error::CircularReference(names)) if names.len() == 2
        ));
    }

    #[test]
    fn ignore_unreachable_cycles() {
        let specification = Specification::from_nodes(
            [
                (
                    path("/xs:simpleType/0"),
                    node("A", named("A"), Classification::Ref),
                ),
                (
                    path("/xs:complexType"),
                    node("B", TypeLocator::Container, Classification::Ref),
                ),
            ]
            .into_iter()
            .collect(),
        );
        let index = ReferenceIndex::build(&specification, DuplicatePolicy::Reject).unwrap();
        let graph = ReferenceGraph::build(&specification, &index);

        assert!(
            graph
                .check_cycles(&specification, &path("/xs:complexType"))
                .is_ok()
        );
        assert!(matches!(
            graph.check_cycles(&specification, &path("/xs:simpleType/0")),
            Err(Error::CircularReference(names)) if names == vec!["A".to_owned()]
        ));
    }

    #[test]
    fn fail_on_missing_root() {
        let specification = Specification::default();
        let index = ReferenceIndex::default();

        assert!(matches!(
            ReferenceGraph::build(&specification, &index)
                .check_cycles(&specification, &path("/xs:element")),
            Err(Error::MissingContext(_))
        ));
    }
}
