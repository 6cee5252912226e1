//! Selection of the operations a trimmed document keeps.

use std::collections::HashSet;

use http::Method;
use indexmap::IndexMap;

use crate::{
  document::{Document, PathItem},
  refs::{ComponentKind, ComponentRef},
};

/// Filter for operation inclusion/exclusion by `operationId`.
///
/// An operation passes if its id is in the inclusion set (or there is no
/// inclusion set) and is not in the exclusion set. Operations without an
/// `operationId` are matched as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationFilter {
  only: Option<HashSet<String>>,
  excluded: Option<HashSet<String>>,
}

impl OperationFilter {
  /// Creates a new filter with the given inclusion and exclusion sets.
  #[must_use]
  pub fn new(only: Option<HashSet<String>>, excluded: Option<HashSet<String>>) -> Self {
    Self { only, excluded }
  }

  /// Creates a filter that accepts exactly the given ids.
  ///
  /// An empty `ids` accepts nothing.
  #[must_use]
  pub fn keep<I, S>(ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      only: Some(ids.into_iter().map(Into::into).collect()),
      excluded: None,
    }
  }

  /// Adds ids to the exclusion set.
  #[must_use]
  pub fn excluding<I, S>(mut self, ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .excluded
      .get_or_insert_with(HashSet::new)
      .extend(ids.into_iter().map(Into::into));
    self
  }

  /// Returns whether the given operation id passes this filter.
  #[must_use]
  pub fn accepts<S>(&self, operation_id: S) -> bool
  where
    S: AsRef<str>,
  {
    if let Some(ref included) = self.only
      && !included.contains(operation_id.as_ref())
    {
      return false;
    }

    if let Some(ref excluded) = self.excluded
      && excluded.contains(operation_id.as_ref())
    {
      return false;
    }

    true
  }
}

/// An operation taken out of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedOperation {
  /// The path template, or `webhooks/<name>` for a webhook.
  pub path: String,
  pub method: Method,
  pub operation_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
  /// Removed operations in document order.
  pub removed_operations: Vec<RemovedOperation>,
  /// Paths (and `webhooks/<name>` entries) dropped because no operation was left.
  pub removed_paths: Vec<String>,
}

impl FilterReport {
  pub fn removed_count(&self) -> usize {
    self.removed_operations.len()
  }
}

/// Removes every operation the filter rejects, then every path item left without
/// operations, including items that had none to begin with. `components` is not
/// touched.
///
/// A path item that is a `$ref` into `components.pathItems` counts the operations
/// of its target: it stays while any of them passes the filter, and otherwise is
/// dropped with those operations reported as removed. A `$ref` that cannot be
/// resolved in the document always stays.
pub fn filter_operations(document: &mut Document, filter: &OperationFilter) -> FilterReport {
  let mut report = FilterReport::default();
  let Document {
    paths,
    webhooks,
    components,
    ..
  } = document;
  let shared = components.as_ref().map(|components| &components.path_items);

  if let Some(paths) = paths.as_mut() {
    prune_path_items(paths, shared, filter, &mut report, |path| path.to_string());
  }
  prune_path_items(webhooks, shared, filter, &mut report, |name| format!("webhooks/{name}"));

  report
}

/// Keeps only the operations whose `operationId` is in `ids` and returns how many
/// were removed. Ids that match no operation are ignored.
pub fn filter_operations_by_id<S: AsRef<str>>(document: &mut Document, ids: &[S]) -> usize {
  let ids: Vec<&str> = ids.iter().map(|id| id.as_ref()).collect();
  filter_operations(document, &OperationFilter::keep(ids)).removed_count()
}

/// Looks up the `components.pathItems` entry a path item `$ref` points at.
fn resolve_shared<'c>(ref_path: &str, shared: Option<&'c IndexMap<String, PathItem>>) -> Option<&'c PathItem> {
  let target = ref_path.parse::<ComponentRef>().ok()?;
  if target.kind != ComponentKind::PathItems {
    return None;
  }
  shared?.get(&target.name)
}

fn prune_path_items<F>(
  items: &mut IndexMap<String, PathItem>,
  shared: Option<&IndexMap<String, PathItem>>,
  filter: &OperationFilter,
  report: &mut FilterReport,
  display: F,
) where
  F: Fn(&str) -> String,
{
  items.retain(|key, item| {
    let removed = item.retain_operations(|_, operation| filter.accepts(operation.id()));
    let location = display(key.as_str());
    let removed_operation = |method, operation_id| RemovedOperation {
      path: location.clone(),
      method,
      operation_id,
    };
    report.removed_operations.extend(
      removed
        .into_iter()
        .map(|(method, operation)| removed_operation(method, operation.operation_id)),
    );

    if item.has_operations() {
      return true;
    }

    if let Some(ref_path) = item.ref_path.as_deref() {
      let Some(target) = resolve_shared(ref_path, shared) else {
        return true;
      };
      if target.operations().any(|(_, operation)| filter.accepts(operation.id())) {
        return true;
      }
      report.removed_operations.extend(
        target
          .operations()
          .map(|(method, operation)| removed_operation(method, operation.operation_id.clone())),
      );
    }

    report.removed_paths.push(location);
    false
  });
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn users_document() -> Document {
    serde_json::from_value(json!({
      "openapi": "3.1.0",
      "info": { "title": "Users", "version": "1.0.0" },
      "paths": {
        "/users/{id}": {
          "get": { "operationId": "getUser" },
          "delete": { "operationId": "deleteUser" }
        },
        "/legacy": {
          "delete": { "operationId": "deleteUser" }
        },
        "/health": {
          "summary": "no operations at all"
        }
      },
      "components": { "schemas": { "User": { "type": "object" } } }
    }))
    .expect("failed to parse test document")
  }

  fn remaining_ids(document: &Document) -> Vec<(String, Method, String)> {
    document
      .operations()
      .map(|(path, method, operation)| (path.to_string(), method, operation.id().to_string()))
      .collect()
  }

  #[test]
  fn test_accepts() {
    let only: HashSet<String> = ["getUser".to_string(), "listUsers".to_string()].into();
    let excluded: HashSet<String> = ["listUsers".to_string()].into();

    let cases = [
      (OperationFilter::default(), "anything", true),
      (OperationFilter::new(Some(only.clone()), None), "getUser", true),
      (OperationFilter::new(Some(only.clone()), None), "deleteUser", false),
      (OperationFilter::new(None, Some(excluded.clone())), "listUsers", false),
      (OperationFilter::new(None, Some(excluded.clone())), "deleteUser", true),
      (OperationFilter::new(Some(only), Some(excluded)), "listUsers", false),
      (OperationFilter::keep(Vec::<String>::new()), "getUser", false),
      (OperationFilter::keep([""]), "", true),
    ];

    for (filter, id, expected) in cases {
      assert_eq!(filter.accepts(id), expected, "failed for {id:?} with {filter:?}");
    }
  }

  #[test]
  fn test_filter_by_id_keeps_path_with_remaining_operation() {
    let mut document = users_document();

    let removed = filter_operations_by_id(&mut document, &["getUser"]);

    assert_eq!(removed, 2);
    assert_eq!(
      remaining_ids(&document),
      vec![("/users/{id}".to_string(), Method::GET, "getUser".to_string())]
    );
    let paths = document.paths.as_ref().unwrap();
    assert!(paths.contains_key("/users/{id}"));
    assert!(!paths.contains_key("/legacy"), "emptied path should be removed");
    assert!(!paths.contains_key("/health"), "paths without operations are dropped");
    assert_eq!(document.schema_names(), vec!["User"]);
  }

  #[test]
  fn test_report_lists_removed_operations_and_paths() {
    let mut document = users_document();

    let report = filter_operations(&mut document, &OperationFilter::keep(["getUser"]));

    assert_eq!(
      report.removed_operations,
      vec![
        RemovedOperation {
          path: "/users/{id}".to_string(),
          method: Method::DELETE,
          operation_id: Some("deleteUser".to_string()),
        },
        RemovedOperation {
          path: "/legacy".to_string(),
          method: Method::DELETE,
          operation_id: Some("deleteUser".to_string()),
        },
      ]
    );
    assert_eq!(report.removed_paths, vec!["/legacy", "/health"]);
    assert_eq!(report.removed_count(), 2);
  }

  #[test]
  fn test_unknown_ids_are_ignored() {
    let mut document = users_document();

    let removed = filter_operations_by_id(&mut document, &["getUser", "deleteUser", "doesNotExist"]);

    assert_eq!(removed, 0);
    assert_eq!(remaining_ids(&document).len(), 3);
  }

  #[test]
  fn test_empty_keep_list_removes_all_operations() {
    let mut document = users_document();

    let removed = filter_operations_by_id::<&str>(&mut document, &[]);

    assert_eq!(removed, 3);
    assert_eq!(document.operations().count(), 0);
    assert!(document.paths.as_ref().unwrap().is_empty());
  }

  #[test]
  fn test_exclusion_only_filter() {
    let mut document = users_document();

    let report = filter_operations(&mut document, &OperationFilter::default().excluding(["deleteUser"]));

    assert_eq!(report.removed_count(), 2);
    assert_eq!(report.removed_paths, vec!["/legacy", "/health"]);
    assert!(document.operations().all(|(_, _, operation)| operation.id() != "deleteUser"));
  }

  #[test]
  fn test_webhooks_are_filtered() {
    let mut document: Document = serde_json::from_value(json!({
      "webhooks": {
        "petAdopted": { "post": { "operationId": "onPetAdopted" } },
        "petLost": { "post": { "operationId": "onPetLost" } }
      }
    }))
    .unwrap();

    let report = filter_operations(&mut document, &OperationFilter::keep(["onPetAdopted"]));

    assert_eq!(report.removed_paths, vec!["webhooks/petLost"]);
    assert_eq!(
      document.webhook_operations().map(|(name, ..)| name).collect::<Vec<_>>(),
      vec!["petAdopted"]
    );
  }

  fn shared_pets_document() -> Document {
    serde_json::from_value(json!({
      "openapi": "3.1.0",
      "info": { "title": "Pets", "version": "1.0.0" },
      "paths": {
        "/pets": { "$ref": "#/components/pathItems/Pets" },
        "/owners": { "$ref": "#/components/pathItems/Owners" },
        "/remote": { "$ref": "shared.yaml#/paths/~1remote" }
      },
      "components": {
        "pathItems": {
          "Pets": { "get": { "operationId": "listPets" }, "post": { "operationId": "createPet" } },
          "Owners": { "get": { "operationId": "listOwners" } }
        }
      }
    }))
    .expect("failed to parse test document")
  }

  #[test]
  fn test_referenced_path_item_kept_when_target_operation_selected() {
    let mut document = shared_pets_document();

    let report = filter_operations(&mut document, &OperationFilter::keep(["listPets"]));

    let paths = document.paths.as_ref().unwrap();
    assert!(paths.contains_key("/pets"));
    assert_eq!(
      paths["/pets"].ref_path.as_deref(),
      Some("#/components/pathItems/Pets")
    );
    assert!(paths.contains_key("/remote"), "unresolvable references are kept");
    assert_eq!(report.removed_paths, vec!["/owners"]);
    assert_eq!(
      report.removed_operations,
      vec![RemovedOperation {
        path: "/owners".to_string(),
        method: Method::GET,
        operation_id: Some("listOwners".to_string()),
      }]
    );
    let shared = &document.components.as_ref().unwrap().path_items;
    assert_eq!(shared.len(), 2, "components.pathItems is left untouched");
  }

  #[test]
  fn test_referenced_path_item_dropped_when_target_rejected() {
    let mut document = shared_pets_document();

    let removed = filter_operations_by_id(&mut document, &["listOwners"]);

    assert_eq!(removed, 2);
    let paths = document.paths.as_ref().unwrap();
    assert_eq!(paths.keys().collect::<Vec<_>>(), vec!["/owners", "/remote"]);
  }

  #[test]
  fn test_operations_without_id_match_empty_string() {
    let mut document: Document = serde_json::from_value(json!({
      "paths": { "/anon": { "get": {} }, "/named": { "get": { "operationId": "named" } } }
    }))
    .unwrap();

    let removed = filter_operations_by_id(&mut document, &["named"]);

    assert_eq!(removed, 1);
    assert_eq!(document.paths.as_ref().unwrap().len(), 1);
  }
}
