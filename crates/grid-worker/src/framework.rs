use std::collections::HashMap;
use std::sync::Arc;

use grid_store::ObjectValue;

use crate::error::{WorkerError, WorkerResult};

/// An invokable node in a framework's call graph.
pub type AstCallable = Arc<dyn Fn(&[ObjectValue]) -> WorkerResult<ObjectValue> + Send + Sync>;

/// One node in a framework's exposed call graph.
///
/// A node may be invokable (a function, or a class constructor), have named
/// children (a module, or a class whose children are its methods), or both.
/// The worker stores the graph verbatim at registration and only ever walks
/// it to resolve dotted paths.
#[derive(Clone, Default)]
pub struct AstNode {
    callable: Option<AstCallable>,
    children: HashMap<String, AstNode>,
}

impl AstNode {
    /// A node with no callable and no children (an empty module).
    pub fn module() -> Self {
        Self::default()
    }

    /// A leaf function node.
    pub fn function(
        f: impl Fn(&[ObjectValue]) -> WorkerResult<ObjectValue> + Send + Sync + 'static,
    ) -> Self {
        Self {
            callable: Some(Arc::new(f)),
            children: HashMap::new(),
        }
    }

    /// Attach a named child node.
    pub fn with_child(mut self, name: impl Into<String>, node: AstNode) -> Self {
        self.children.insert(name.into(), node);
        self
    }

    /// Attach a callable (turns a module node into a constructor/function).
    pub fn with_callable(
        mut self,
        f: impl Fn(&[ObjectValue]) -> WorkerResult<ObjectValue> + Send + Sync + 'static,
    ) -> Self {
        self.callable = Some(Arc::new(f));
        self
    }

    /// The callable at this node, if any.
    pub fn callable(&self) -> Option<&AstCallable> {
        self.callable.as_ref()
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&AstNode> {
        self.children.get(name)
    }

    /// Returns `true` if this node has children (a module or class).
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

impl std::fmt::Debug for AstNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AstNode")
            .field("callable", &self.callable.is_some())
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A framework's exposed call graph: a name plus a mapping of
/// attribute-name to call-graph node.
#[derive(Clone, Debug)]
pub struct FrameworkAst {
    name: String,
    attrs: HashMap<String, AstNode>,
}

impl FrameworkAst {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: HashMap::new(),
        }
    }

    /// Expose a top-level attribute.
    pub fn with_attr(mut self, name: impl Into<String>, node: AstNode) -> Self {
        self.attrs.insert(name.into(), node);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Walk `segments` through the attribute map and child nodes.
    fn resolve(&self, segments: &[&str]) -> Option<&AstNode> {
        let (first, rest) = segments.split_first()?;
        let mut node = self.attrs.get(*first)?;
        for segment in rest {
            node = node.child(segment)?;
        }
        Some(node)
    }
}

/// The set of frameworks registered with one worker, keyed by name.
///
/// Built once at worker construction; a framework name registers at most
/// once; duplicates are a construction failure, never a silent merge.
#[derive(Debug)]
pub struct FrameworkRegistry {
    frameworks: HashMap<String, FrameworkAst>,
}

impl FrameworkRegistry {
    /// Register `frameworks` one at a time, rejecting duplicate names.
    pub fn new(frameworks: Vec<FrameworkAst>) -> WorkerResult<Self> {
        let mut registered: HashMap<String, FrameworkAst> = HashMap::new();
        for fw in frameworks {
            if registered.contains_key(fw.name()) {
                return Err(WorkerError::DuplicateFramework(fw.name().to_owned()));
            }
            tracing::debug!(framework = fw.name(), "registered framework");
            registered.insert(fw.name().to_owned(), fw);
        }
        Ok(Self {
            frameworks: registered,
        })
    }

    /// Number of registered frameworks.
    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    /// Returns `true` when no framework is registered.
    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }

    /// Returns `true` if a framework is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.frameworks.contains_key(name)
    }

    /// Resolve a dotted path to a call-graph node.
    ///
    /// The first segment selects the framework; the rest walk its graph.
    pub fn resolve(&self, path: &str) -> WorkerResult<&AstNode> {
        let segments: Vec<&str> = path.split('.').collect();
        let (framework, rest) = segments
            .split_first()
            .filter(|_| !path.is_empty())
            .ok_or_else(|| WorkerError::UnknownPath(path.to_owned()))?;
        self.frameworks
            .get(*framework)
            .and_then(|fw| fw.resolve(rest))
            .ok_or_else(|| WorkerError::UnknownPath(path.to_owned()))
    }

    /// Resolve a dotted path to its callable, failing if the node exists
    /// but is not invokable.
    pub fn resolve_callable(&self, path: &str) -> WorkerResult<&AstCallable> {
        self.resolve(path)?
            .callable()
            .ok_or_else(|| WorkerError::UnknownPath(path.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn math_framework() -> FrameworkAst {
        FrameworkAst::new("mathlib").with_attr(
            "ops",
            AstNode::module().with_child(
                "double",
                AstNode::function(|args| match args {
                    [ObjectValue::Int(n)] => Ok(ObjectValue::Int(n * 2)),
                    _ => Err(WorkerError::Invocation {
                        path: "mathlib.ops.double".into(),
                        reason: "expected one int".into(),
                    }),
                }),
            ),
        )
    }

    #[test]
    fn resolves_nested_path() {
        let registry = FrameworkRegistry::new(vec![math_framework()]).unwrap();
        let callable = registry.resolve_callable("mathlib.ops.double").unwrap();
        let result = callable(&[ObjectValue::Int(21)]).unwrap();
        assert_eq!(result, ObjectValue::Int(42));
    }

    #[test]
    fn unknown_framework_is_unknown_path() {
        let registry = FrameworkRegistry::new(vec![math_framework()]).unwrap();
        let err = registry.resolve("otherlib.ops.double").unwrap_err();
        assert!(matches!(err, WorkerError::UnknownPath(_)));
    }

    #[test]
    fn unknown_attr_is_unknown_path() {
        let registry = FrameworkRegistry::new(vec![math_framework()]).unwrap();
        let err = registry.resolve("mathlib.ops.missing").unwrap_err();
        assert!(matches!(err, WorkerError::UnknownPath(_)));
    }

    #[test]
    fn empty_path_is_unknown_path() {
        let registry = FrameworkRegistry::new(vec![math_framework()]).unwrap();
        assert!(matches!(
            registry.resolve(""),
            Err(WorkerError::UnknownPath(_))
        ));
    }

    #[test]
    fn module_node_is_not_callable() {
        let registry = FrameworkRegistry::new(vec![math_framework()]).unwrap();
        assert!(registry.resolve("mathlib.ops").is_ok());
        assert!(matches!(
            registry.resolve_callable("mathlib.ops"),
            Err(WorkerError::UnknownPath(_))
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err =
            FrameworkRegistry::new(vec![math_framework(), math_framework()]).unwrap_err();
        assert!(matches!(err, WorkerError::DuplicateFramework(name) if name == "mathlib"));
    }

    #[test]
    fn class_nodes_carry_constructor_and_methods() {
        let class = AstNode::module()
            .with_callable(|_args| Ok(ObjectValue::Text("instance".into())))
            .with_child(
                "describe",
                AstNode::function(|_args| Ok(ObjectValue::Text("described".into()))),
            );
        let registry = FrameworkRegistry::new(vec![
            FrameworkAst::new("lib").with_attr("Thing", class),
        ])
        .unwrap();

        let node = registry.resolve("lib.Thing").unwrap();
        assert!(node.callable().is_some());
        assert!(node.has_children());
        assert!(registry.resolve_callable("lib.Thing.describe").is_ok());
    }
}
