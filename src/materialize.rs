mod options;

pub use self::options::{MaterializeOptions, RecursionPolicy};
use crate::{
    context_path::ContextPath,
    error::Error,
    node_spec::{Declaration, Specification},
    reference_graph::ReferenceGraph,
    reference_index::{DuplicatePolicy, ReferenceIndex},
    template::Template,
};
use indexmap::IndexMap;
use log::trace;

/// Materializes a template rooted at a context with default options.
///
/// The reference index is rebuilt with [`DuplicatePolicy::Reject`], so a
/// specification with duplicate type names fails with
/// [`Error::DuplicateName`] even if its schema was parsed with duplicates
/// allowed. Use [`crate::ParsedSchema::materializer`] to keep the index built
/// at parse time.
pub fn materialize(root: &ContextPath, specification: &Specification) -> Result<Template, Error> {
    let index = ReferenceIndex::build(specification, DuplicatePolicy::default())?;

    Materializer::new(specification, &index, MaterializeOptions::default()).materialize(root)
}

/// A template materializer.
#[derive(Debug)]
pub struct Materializer<'a> {
    specification: &'a Specification,
    index: &'a ReferenceIndex,
    graph: Option<ReferenceGraph<'a>>,
    options: MaterializeOptions,
}

impl<'a> Materializer<'a> {
    /// Creates a materializer.
    pub fn new(
        specification: &'a Specification,
        index: &'a ReferenceIndex,
        options: MaterializeOptions,
    ) -> Self {
        Self {
            specification,
            index,
            graph: (options.recursion() == RecursionPolicy::Reject)
                .then(|| ReferenceGraph::build(specification, index)),
            options,
        }
    }

    /// Materializes a template with a single entry of a root's name and content.
    pub fn materialize(&self, root: &ContextPath) -> Result<Template, Error> {
        let node = self.specification.get(root)?;

        if let Some(graph) = &self.graph {
            graph.check_cycles(self.specification, root)?;
        }

        Ok(Template::single(node.name(), self.resolve(root)?))
    }

    /// Resolves content of a context.
    pub fn resolve(&self, context: &ContextPath) -> Result<Template, Error> {
        self.resolve_in(context, &mut vec![])
    }

    fn resolve_in<'b>(
        &'b self,
        context: &'b ContextPath,
        stack: &mut Vec<&'b ContextPath>,
    ) -> Result<Template, Error> {
        let node = self.specification.get(context)?;

        if stack.contains(&context) {
            trace!("truncated recursion at {context}");
            return Ok(Template::Leaf(node.name().into()));
        }

        trace!("resolving {} at {context}", node.name());

        stack.push(context);

        let template = match node.declaration() {
            Declaration::Container | Declaration::AnonymousUsage => {
                let mut children = IndexMap::<&str, (&ContextPath, Template)>::new();

                for child in self.specification.children(context) {
                    let name = self.specification.get(child)?.name();

                    if let Some((first, _)) = children.get(name) {
                        return Err(Error::DuplicateChild {
                            name: name.into(),
                            first: (*first).clone(),
                            second: child.clone(),
                        });
                    }

                    children.insert(name, (child, self.resolve_in(child, stack)?));
                }

                children
                    .into_iter()
                    .map(|(name, (_, template))| (name, template))
                    .collect()
            }
            Declaration::Reference { target } => {
                let entry = self.index.lookup(target, context)?;

                if entry.type_locator().is_terminal() {
                    if self.options.placeholders() {
                        Template::placeholder(target)
                    } else {
                        Template::Leaf(target.into())
                    }
                } else {
                    self.resolve_in(entry.context(), stack)?
                }
            }
            Declaration::Usage { target } => {
                self.resolve_in(self.index.lookup(target, context)?.context(), stack)?
            }
            Declaration::Primitive => Template::Leaf(node.name().into()),
        };

        stack.pop();

        Ok(template)
    }
}
