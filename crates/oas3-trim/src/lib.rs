//! Trim OpenAPI v3 documents down to a chosen set of operations.
//!
//! Trimming runs in two steps over a [`Document`] loaded once and written once:
//!
//! 1. [`filter_operations`] drops every operation whose `operationId` the
//!    [`OperationFilter`] rejects, along with path items left without operations.
//! 2. [`SchemaCleaner::clean`] drops every entry of `components.schemas` that the
//!    remaining operations (and an explicit list of exceptions) can no longer
//!    reach through `$ref`s.
//!
//! Keys the model does not interpret are preserved, so the output differs from
//! the input only in the removed entries.

pub mod cleaner;
pub mod document;
pub mod filter;
pub mod loader;
pub mod refs;

pub use cleaner::{CleanReport, CleanWarning, Reachability, SchemaCleaner, clean_schemas};
pub use document::{Document, Operation, PathItem, RefOr, Schema};
pub use filter::{FilterReport, OperationFilter, RemovedOperation, filter_operations, filter_operations_by_id};
pub use loader::{SpecFormat, SpecLoader, make_output_path, render_document, write_document};
pub use refs::{ComponentKind, ComponentRef, RefError, parse_schema_ref_path};
