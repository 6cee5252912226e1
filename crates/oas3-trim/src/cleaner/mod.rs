//! Removal of schema components that no remaining operation can reach.
//!
//! The cleaner walks the document from its roots: every operation under `paths`
//! and `webhooks` (parameters, request bodies, responses, callbacks), path-level
//! parameters, and any schema names the caller asks to keep. Every composite node
//! it passes is remembered by identity, so shared sub-documents are walked once
//! and cycles through `$ref`s terminate. A `#/components/schemas/<name>`
//! reference adds `<name>` to the reachable set and continues into that schema's
//! definition; references into other component tables, shared path items
//! included, are resolved and walked the same way. Keywords written next to a
//! schema `$ref` are walked as well. Whatever is left out of the reachable set is deleted from
//! `components.schemas`.
//!
//! ```
//! use oas3_trim::{Document, SchemaCleaner};
//!
//! let mut document: Document = serde_json::from_str(r##"{
//!   "openapi": "3.0.3",
//!   "info": { "title": "Users", "version": "1.0.0" },
//!   "paths": {
//!     "/users/{id}": {
//!       "get": {
//!         "operationId": "getUser",
//!         "responses": {
//!           "200": {
//!             "description": "ok",
//!             "content": { "application/json": { "schema": { "$ref": "#/components/schemas/User" } } }
//!           }
//!         }
//!       }
//!     }
//!   },
//!   "components": { "schemas": { "User": { "type": "object" }, "Ghost": { "type": "object" } } }
//! }"##)?;
//!
//! let report = SchemaCleaner::default().clean(&mut document);
//! assert_eq!(report.removed, vec!["Ghost".to_string()]);
//! assert_eq!(document.schema_names(), vec!["User"]);
//! # Ok::<(), serde_json::Error>(())
//! ```

mod edges;
mod report;
mod walker;

#[cfg(test)]
mod tests;

use indexmap::IndexSet;

pub use report::{CleanReport, CleanWarning, Reachability};
use walker::ReachabilityWalker;

use crate::document::Document;

/// Removes unreferenced schema components, keeping a fixed set of exceptions.
#[derive(Debug, Clone, Default)]
pub struct SchemaCleaner {
  exceptions: IndexSet<String>,
}

impl SchemaCleaner {
  /// Creates a cleaner that always keeps the schemas named in `exceptions`, along
  /// with everything they reference.
  pub fn new<I, S>(exceptions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      exceptions: exceptions.into_iter().map(Into::into).collect(),
    }
  }

  /// Computes the set of reachable schema names without modifying the document.
  pub fn analyze(&self, document: &Document) -> Reachability {
    let mut walker = ReachabilityWalker::new(document.components.as_ref());
    walker.walk(document);
    for name in &self.exceptions {
      walker.keep_schema(name);
    }
    walker.finish()
  }

  /// Deletes every schema in `components.schemas` that [`analyze`](Self::analyze)
  /// does not report as referenced.
  pub fn clean(&self, document: &mut Document) -> CleanReport {
    let Reachability { referenced, warnings } = self.analyze(document);

    let mut removed = Vec::new();
    let mut kept = Vec::new();
    if let Some(components) = document.components.as_mut() {
      components.schemas.retain(|name, _| {
        let keep = referenced.contains(name);
        if keep {
          kept.push(name.clone());
        } else {
          removed.push(name.clone());
        }
        keep
      });
    }

    CleanReport {
      removed,
      kept,
      warnings,
    }
  }
}

/// Removes every schema not reachable from the document's operations or from
/// `exceptions`. Returns the number of schemas removed.
pub fn clean_schemas<S: AsRef<str>>(document: &mut Document, exceptions: &[S]) -> usize {
  SchemaCleaner::new(exceptions.iter().map(|name| name.as_ref().to_string()))
    .clean(document)
    .removed_count()
}
