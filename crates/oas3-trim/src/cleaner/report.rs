use indexmap::IndexSet;
use strum::Display;

use crate::refs::ComponentKind;

/// Outcome of walking a document without changing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reachability {
  /// Schema names reached from the roots, in discovery order.
  pub referenced: IndexSet<String>,
  pub warnings: Vec<CleanWarning>,
}

impl Reachability {
  pub fn is_referenced(&self, name: &str) -> bool {
    self.referenced.contains(name)
  }
}

/// Outcome of a [`SchemaCleaner::clean`](super::SchemaCleaner::clean) call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanReport {
  /// Schemas deleted from `components.schemas`, in their former document order.
  pub removed: Vec<String>,
  /// Schemas left in `components.schemas`.
  pub kept: Vec<String>,
  pub warnings: Vec<CleanWarning>,
}

impl CleanReport {
  pub fn removed_count(&self) -> usize {
    self.removed.len()
  }
}

/// Non-fatal findings collected while walking references.
///
/// None of these abort a clean. A reference that cannot be followed simply
/// contributes nothing to the reachable set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum CleanWarning {
  #[strum(to_string = "Reference not found: {reference}")]
  DanglingReference { reference: String },
  #[strum(to_string = "Reference '{reference}' not followed: {reason}")]
  UnsupportedReference { reference: String, reason: String },
  #[strum(to_string = "Reference '{reference}' points into {found} where {expected} are expected")]
  MismatchedReference {
    reference: String,
    expected: ComponentKind,
    found: ComponentKind,
  },
  #[strum(to_string = "Schema '{name}' was listed to keep but is not defined in components")]
  UnknownException { name: String },
}

impl CleanWarning {
  /// Whether the warning points at a broken `$ref` in the document, as opposed to
  /// a problem with the caller's input.
  pub fn is_document_issue(&self) -> bool {
    !matches!(self, Self::UnknownException { .. })
  }
}
