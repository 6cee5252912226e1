use std::{any::TypeId, collections::HashSet};

use indexmap::{IndexMap, IndexSet};

use super::report::{CleanWarning, Reachability};
use crate::{
  document::{Components, Schema},
  refs::{ComponentKind, ComponentRef},
};

/// Identity of a node inside the borrowed document.
///
/// The address alone is not enough: a struct and its first field share one.
/// Pairing it with the node type keeps distinct nodes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeId {
  type_id: TypeId,
  addr: usize,
}

impl NodeId {
  fn of<N: Reachable>(node: &N) -> Self {
    Self {
      type_id: TypeId::of::<N>(),
      addr: std::ptr::from_ref(node).addr(),
    }
  }
}

/// A document node that can lead, directly or through `$ref`s, to schema components.
///
/// Each implementation lists the node's structural edges and hands every child
/// back to the walker; the walker decides whether the child is new.
pub(crate) trait Reachable: 'static {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>);
}

/// A node type that is also stored by name in one of the `components` tables.
pub(crate) trait Component: Reachable {
  const KIND: ComponentKind;

  /// How a table entry is stored: usually the node or a further `$ref`.
  type Entry: Reachable;

  fn table(components: &Components) -> &IndexMap<String, Self::Entry>;
}

/// Depth-first walk that collects every schema name reachable from its roots.
///
/// Lives for a single clean: the visited set holds addresses into the document it
/// was started on and is meaningless once that borrow ends.
pub(crate) struct ReachabilityWalker<'d> {
  components: Option<&'d Components>,
  visited: HashSet<NodeId>,
  referenced: IndexSet<String>,
  warnings: IndexSet<CleanWarning>,
}

impl<'d> ReachabilityWalker<'d> {
  pub(crate) fn new(components: Option<&'d Components>) -> Self {
    Self {
      components,
      visited: HashSet::new(),
      referenced: IndexSet::new(),
      warnings: IndexSet::new(),
    }
  }

  /// Visits `node` unless this exact node was visited before.
  pub(crate) fn walk<N: Reachable>(&mut self, node: &N) {
    if self.visited.insert(NodeId::of(node)) {
      node.visit(self);
    }
  }

  pub(crate) fn walk_all<'n, N, I>(&mut self, nodes: I)
  where
    N: Reachable,
    I: IntoIterator<Item = &'n N>,
  {
    for node in nodes {
      self.walk(node);
    }
  }

  /// Marks the schema `name` as referenced and walks its definition the first
  /// time the name is seen.
  pub(crate) fn record_named_reference(&mut self, name: &str) {
    if !self.referenced.insert(name.to_string()) {
      return;
    }

    match self.lookup::<Schema>(name) {
      Some(schema) => self.walk(schema),
      None => self.report(CleanWarning::DanglingReference {
        reference: ComponentRef::schema(name).to_string(),
      }),
    }
  }

  /// Resolves a `$ref` found where a `T` is expected and walks its target.
  pub(crate) fn follow<T: Component>(&mut self, ref_path: &str) {
    let target = match ref_path.parse::<ComponentRef>() {
      Ok(target) => target,
      Err(error) => {
        self.report(CleanWarning::UnsupportedReference {
          reference: ref_path.to_string(),
          reason: error.to_string(),
        });
        return;
      }
    };

    if target.kind != T::KIND {
      self.report(CleanWarning::MismatchedReference {
        reference: ref_path.to_string(),
        expected: T::KIND,
        found: target.kind,
      });
      return;
    }

    if T::KIND == ComponentKind::Schemas {
      self.record_named_reference(&target.name);
      return;
    }

    match self.lookup::<T>(&target.name) {
      Some(node) => self.walk(node),
      None => self.report(CleanWarning::DanglingReference {
        reference: ref_path.to_string(),
      }),
    }
  }

  /// Roots the schema `name` regardless of whether any operation reaches it.
  pub(crate) fn keep_schema(&mut self, name: &str) {
    if self.lookup::<Schema>(name).is_some() {
      self.record_named_reference(name);
    } else {
      self.report(CleanWarning::UnknownException { name: name.to_string() });
    }
  }

  pub(crate) fn finish(self) -> Reachability {
    Reachability {
      referenced: self.referenced,
      warnings: self.warnings.into_iter().collect(),
    }
  }

  fn lookup<T: Component>(&self, name: &str) -> Option<&'d T::Entry> {
    self.components.and_then(|components| T::table(components).get(name))
  }

  fn report(&mut self, warning: CleanWarning) {
    self.warnings.insert(warning);
  }
}
