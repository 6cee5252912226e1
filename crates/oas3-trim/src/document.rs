//! In-memory model of an OpenAPI document.
//!
//! Only the structure that can lead to a schema component is typed: paths,
//! operations, parameters, request bodies, responses, headers, media types and
//! the applicator keywords of a schema (including the keywords written next to a
//! schema `$ref`). Every other key lands in the
//! `extensions` map of the node it belongs to, in document order, and is written
//! back untouched. A document that is loaded, trimmed and saved therefore only
//! differs from its source in the entries that were removed.

use http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Keys of a node that the model does not interpret.
pub type Extensions = IndexMap<String, Value>;

/// Media type string (e.g. `application/json`) to its body description.
pub type Content = IndexMap<String, MediaType>;

/// Runtime expression to the path item invoked by a callback.
pub type Callback = IndexMap<String, PathItem>;

pub type SchemaRef = RefOr<Schema, ObjectSchema>;
pub type ParameterRef = RefOr<Parameter>;
pub type ResponseRef = RefOr<Response>;
pub type RequestBodyRef = RefOr<RequestBody>;
pub type HeaderRef = RefOr<Header>;
pub type CallbackRef = RefOr<Callback>;

/// Root of an OpenAPI document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
  #[serde(flatten)]
  pub extensions: Extensions,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub paths: Option<IndexMap<String, PathItem>>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub webhooks: IndexMap<String, PathItem>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub components: Option<Components>,
}

impl Document {
  /// Iterates over every operation under `paths` as `(path, method, operation)`.
  ///
  /// Paths are yielded in document order, methods in OpenAPI field order (get, put,
  /// post, delete, options, head, patch, trace).
  pub fn operations(&self) -> impl Iterator<Item = (&str, Method, &Operation)> {
    self
      .paths
      .iter()
      .flat_map(|paths| paths.iter())
      .flat_map(|(path, item)| item.operations().map(move |(method, op)| (path.as_str(), method, op)))
  }

  /// Iterates over every webhook operation as `(name, method, operation)`.
  pub fn webhook_operations(&self) -> impl Iterator<Item = (&str, Method, &Operation)> {
    self
      .webhooks
      .iter()
      .flat_map(|(name, item)| item.operations().map(move |(method, op)| (name.as_str(), method, op)))
  }

  /// Returns the `components.schemas` table, if the document has one.
  pub fn schemas(&self) -> Option<&IndexMap<String, SchemaRef>> {
    self.components.as_ref().map(|components| &components.schemas)
  }

  /// Names of all schema components, in document order.
  pub fn schema_names(&self) -> Vec<&str> {
    self
      .schemas()
      .map(|schemas| schemas.keys().map(String::as_str).collect())
      .unwrap_or_default()
  }
}

/// Operations available on a single path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
  /// Pointer to a `components.pathItems` entry whose operations this item shares.
  #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
  pub ref_path: Option<String>,
  #[serde(flatten)]
  pub extensions: Extensions,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub get: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub put: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub post: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub delete: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub head: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub patch: Option<Operation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub trace: Option<Operation>,
  /// Parameters shared by every operation of this path.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub parameters: Vec<ParameterRef>,
}

impl PathItem {
  fn slots(&self) -> [(Method, &Option<Operation>); 8] {
    [
      (Method::GET, &self.get),
      (Method::PUT, &self.put),
      (Method::POST, &self.post),
      (Method::DELETE, &self.delete),
      (Method::OPTIONS, &self.options),
      (Method::HEAD, &self.head),
      (Method::PATCH, &self.patch),
      (Method::TRACE, &self.trace),
    ]
  }

  fn slots_mut(&mut self) -> [(Method, &mut Option<Operation>); 8] {
    [
      (Method::GET, &mut self.get),
      (Method::PUT, &mut self.put),
      (Method::POST, &mut self.post),
      (Method::DELETE, &mut self.delete),
      (Method::OPTIONS, &mut self.options),
      (Method::HEAD, &mut self.head),
      (Method::PATCH, &mut self.patch),
      (Method::TRACE, &mut self.trace),
    ]
  }

  /// Iterates over the operations present on this path.
  pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
    self
      .slots()
      .into_iter()
      .filter_map(|(method, slot)| slot.as_ref().map(|operation| (method, operation)))
  }

  /// Returns the operation registered for `method`.
  pub fn operation(&self, method: &Method) -> Option<&Operation> {
    self
      .slots()
      .into_iter()
      .find(|(candidate, _)| candidate == method)
      .and_then(|(_, slot)| slot.as_ref())
  }

  pub fn has_operations(&self) -> bool {
    self.slots().iter().any(|(_, slot)| slot.is_some())
  }

  /// Removes every operation for which `keep` returns `false` and hands the
  /// removed operations back in method order.
  pub fn retain_operations<F>(&mut self, mut keep: F) -> Vec<(Method, Operation)>
  where
    F: FnMut(&Method, &Operation) -> bool,
  {
    let mut removed = Vec::new();
    for (method, slot) in self.slots_mut() {
      if slot.as_ref().is_some_and(|operation| !keep(&method, operation))
        && let Some(operation) = slot.take()
      {
        removed.push((method, operation));
      }
    }
    removed
  }
}

/// A single API operation on a path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
  #[serde(flatten)]
  pub extensions: Extensions,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub operation_id: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub parameters: Vec<ParameterRef>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub request_body: Option<RequestBodyRef>,
  #[serde(
    default,
    deserialize_with = "deserialize_responses",
    skip_serializing_if = "Option::is_none"
  )]
  pub responses: Option<IndexMap<String, ResponseRef>>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub callbacks: IndexMap<String, CallbackRef>,
}

impl Operation {
  /// The `operationId`, or the empty string when the operation has none.
  pub fn id(&self) -> &str {
    self.operation_id.as_deref().unwrap_or_default()
  }
}

/// A `responses` key. YAML parsers hand unquoted status codes over as integers.
#[derive(Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
enum ResponseKey {
  Code(u64),
  Text(String),
}

impl From<ResponseKey> for String {
  fn from(key: ResponseKey) -> Self {
    match key {
      ResponseKey::Code(code) => code.to_string(),
      ResponseKey::Text(text) => text,
    }
  }
}

fn deserialize_responses<'de, D>(deserializer: D) -> Result<Option<IndexMap<String, ResponseRef>>, D::Error>
where
  D: Deserializer<'de>,
{
  let responses = Option::<IndexMap<ResponseKey, ResponseRef>>::deserialize(deserializer)?;
  Ok(responses.map(|responses| responses.into_iter().map(|(key, value)| (String::from(key), value)).collect()))
}

/// Either an inline value or a `$ref` pointer to a named component. `S` holds
/// the keys written next to the `$ref`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T, S = Extensions> {
  Ref(Reference<S>),
  Item(T),
}

impl<T, S: Default> RefOr<T, S> {
  pub fn new_ref(ref_path: impl Into<String>) -> Self {
    Self::Ref(Reference {
      ref_path: ref_path.into(),
      siblings: S::default(),
    })
  }
}

impl<T, S> RefOr<T, S> {

  /// The `$ref` string, if this node is a reference.
  pub fn ref_path(&self) -> Option<&str> {
    match self {
      Self::Ref(reference) => Some(&reference.ref_path),
      Self::Item(_) => None,
    }
  }

  /// The inline value, if this node is not a reference.
  pub fn item(&self) -> Option<&T> {
    match self {
      Self::Ref(_) => None,
      Self::Item(item) => Some(item),
    }
  }
}

/// A `$ref` object. Sibling keys such as `summary` or `description` are kept in
/// `siblings`; for schemas that is a full [`ObjectSchema`], since OpenAPI 3.1
/// applies keywords written next to a `$ref`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference<S = Extensions> {
  #[serde(rename = "$ref")]
  pub ref_path: String,
  #[serde(flatten)]
  pub siblings: S,
}

/// A schema: either the boolean schemas `true`/`false` or a schema object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Schema {
  Boolean(bool),
  Object(Box<ObjectSchema>),
}

/// The parts of a schema object that can contain other schemas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSchema {
  #[serde(flatten)]
  pub extensions: Extensions,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub one_of: Vec<SchemaRef>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub any_of: Vec<SchemaRef>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub all_of: Vec<SchemaRef>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub not: Option<Box<SchemaRef>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub items: Option<Box<SchemaRef>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub additional_properties: Option<Box<SchemaRef>>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub properties: IndexMap<String, SchemaRef>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub prefix_items: Vec<SchemaRef>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub pattern_properties: IndexMap<String, SchemaRef>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub contains: Option<Box<SchemaRef>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub property_names: Option<Box<SchemaRef>>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub dependent_schemas: IndexMap<String, SchemaRef>,
  #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
  pub if_schema: Option<Box<SchemaRef>>,
  #[serde(rename = "then", default, skip_serializing_if = "Option::is_none")]
  pub then_schema: Option<Box<SchemaRef>>,
  #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
  pub else_schema: Option<Box<SchemaRef>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub unevaluated_items: Option<Box<SchemaRef>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub unevaluated_properties: Option<Box<SchemaRef>>,
  /// Schemas defined locally for reuse inside this schema.
  #[serde(rename = "$defs", default, skip_serializing_if = "IndexMap::is_empty")]
  pub defs: IndexMap<String, SchemaRef>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
  #[serde(flatten)]
  pub extensions: Extensions,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub schema: Option<SchemaRef>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Parameter {
  #[serde(flatten)]
  pub extensions: Extensions,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub schema: Option<SchemaRef>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content: Option<Content>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
  #[serde(flatten)]
  pub extensions: Extensions,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub schema: Option<SchemaRef>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content: Option<Content>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestBody {
  #[serde(flatten)]
  pub extensions: Extensions,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
  #[serde(flatten)]
  pub extensions: Extensions,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub headers: IndexMap<String, HeaderRef>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub content: Content,
}

/// Named, reusable objects referenced through `#/components/<kind>/<name>`.
///
/// `schemas` is the table the cleaner prunes. The other typed tables are only
/// read, to resolve references of their kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub schemas: IndexMap<String, SchemaRef>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub responses: IndexMap<String, ResponseRef>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub parameters: IndexMap<String, ParameterRef>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub request_bodies: IndexMap<String, RequestBodyRef>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub headers: IndexMap<String, HeaderRef>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub callbacks: IndexMap<String, CallbackRef>,
  #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
  pub path_items: IndexMap<String, PathItem>,
  #[serde(flatten)]
  pub extensions: Extensions,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn parse(value: Value) -> Document {
    serde_json::from_value(value).expect("test document should deserialize")
  }

  #[test]
  fn test_unknown_keys_survive_round_trip() {
    let source = json!({
      "openapi": "3.1.0",
      "info": { "title": "Pets", "version": "1.0.0" },
      "x-internal": { "owner": "platform" },
      "paths": {
        "/pets": {
          "summary": "Pet collection",
          "get": {
            "operationId": "listPets",
            "tags": ["pets"],
            "responses": {
              "200": {
                "description": "ok",
                "content": {
                  "application/json": {
                    "schema": { "$ref": "#/components/schemas/Pet", "description": "a pet" },
                    "example": { "name": "Rex" }
                  }
                }
              }
            }
          }
        }
      },
      "components": {
        "schemas": {
          "Pet": {
            "type": "object",
            "required": ["name"],
            "properties": { "name": { "type": "string", "maxLength": 64 } },
            "additionalProperties": false
          }
        },
        "securitySchemes": { "key": { "type": "apiKey", "in": "header", "name": "X-Key" } }
      }
    });

    let document = parse(source.clone());
    let written = serde_json::to_value(&document).unwrap();

    assert_eq!(written, source);
  }

  #[test]
  fn test_ref_and_inline_nodes() {
    let document = parse(json!({
      "components": {
        "schemas": {
          "Named": { "$ref": "#/components/schemas/Other" },
          "Inline": { "type": "string" },
          "Anything": true
        }
      }
    }));

    let schemas = document.schemas().unwrap();
    assert_eq!(schemas["Named"].ref_path(), Some("#/components/schemas/Other"));
    assert!(matches!(schemas["Inline"].item(), Some(Schema::Object(_))));
    assert!(matches!(schemas["Anything"].item(), Some(Schema::Boolean(true))));
  }

  #[test]
  fn test_boolean_additional_properties() {
    let document = parse(json!({
      "components": { "schemas": { "Closed": { "type": "object", "additionalProperties": false } } }
    }));

    let Some(Schema::Object(closed)) = document.schemas().unwrap()["Closed"].item() else {
      panic!("expected an object schema");
    };
    assert!(matches!(
      closed.additional_properties.as_deref(),
      Some(RefOr::Item(Schema::Boolean(false)))
    ));
  }

  #[test]
  fn test_schema_ref_siblings_are_typed() {
    let source = json!({
      "paths": { "/pets": { "$ref": "#/components/pathItems/Pets" } },
      "components": {
        "schemas": {
          "Dog": {
            "$ref": "#/components/schemas/Pet",
            "description": "a dog",
            "properties": { "owner": { "$ref": "#/components/schemas/Owner" } }
          }
        },
        "pathItems": { "Pets": { "get": { "operationId": "listPets" } } }
      }
    });
    let document = parse(source.clone());

    let RefOr::Ref(dog) = &document.schemas().unwrap()["Dog"] else {
      panic!("expected a reference");
    };
    assert_eq!(dog.ref_path, "#/components/schemas/Pet");
    assert_eq!(
      dog.siblings.properties["owner"].ref_path(),
      Some("#/components/schemas/Owner")
    );
    assert_eq!(dog.siblings.extensions["description"], json!("a dog"));

    let pets = &document.paths.as_ref().unwrap()["/pets"];
    assert_eq!(pets.ref_path.as_deref(), Some("#/components/pathItems/Pets"));
    assert!(!pets.has_operations());
    let components = document.components.as_ref().unwrap();
    assert!(components.path_items["Pets"].operation(&Method::GET).is_some());

    assert_eq!(serde_json::to_value(&document).unwrap(), source);
  }

  #[test]
  fn test_conditional_keywords_are_typed() {
    let document = parse(json!({
      "components": {
        "schemas": {
          "Shape": {
            "if": { "properties": { "kind": { "const": "circle" } } },
            "then": { "$ref": "#/components/schemas/Circle" },
            "else": { "$ref": "#/components/schemas/Square" },
            "$defs": { "side": { "type": "number" } },
            "unevaluatedProperties": false
          }
        }
      }
    }));

    let Some(Schema::Object(shape)) = document.schemas().unwrap()["Shape"].item() else {
      panic!("expected an object schema");
    };
    assert!(shape.if_schema.is_some());
    assert_eq!(
      shape.then_schema.as_deref().and_then(RefOr::ref_path),
      Some("#/components/schemas/Circle")
    );
    assert_eq!(
      shape.else_schema.as_deref().and_then(RefOr::ref_path),
      Some("#/components/schemas/Square")
    );
    assert!(shape.defs.contains_key("side"));
    assert!(matches!(
      shape.unevaluated_properties.as_deref(),
      Some(RefOr::Item(Schema::Boolean(false)))
    ));
  }

  #[test]
  fn test_operations_follow_method_order() {
    let document = parse(json!({
      "paths": {
        "/b": { "post": { "operationId": "createB" }, "get": { "operationId": "listB" } },
        "/a": { "delete": {}, "summary": "no id" }
      }
    }));

    let seen: Vec<(&str, Method, &str)> = document
      .operations()
      .map(|(path, method, operation)| (path, method, operation.id()))
      .collect();

    assert_eq!(
      seen,
      vec![
        ("/b", Method::GET, "listB"),
        ("/b", Method::POST, "createB"),
        ("/a", Method::DELETE, ""),
      ]
    );
  }

  #[test]
  fn test_retain_operations_returns_removed() {
    let mut item: PathItem = serde_json::from_value(json!({
      "get": { "operationId": "getUser" },
      "delete": { "operationId": "deleteUser" },
      "parameters": [{ "name": "id", "in": "path", "required": true }]
    }))
    .unwrap();

    let removed = item.retain_operations(|_, operation| operation.id() == "getUser");

    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].0, Method::DELETE);
    assert_eq!(removed[0].1.id(), "deleteUser");
    assert!(item.operation(&Method::GET).is_some());
    assert!(item.operation(&Method::DELETE).is_none());
    assert!(item.has_operations());
    assert_eq!(item.parameters.len(), 1);
  }

  #[test]
  fn test_schema_names_without_components() {
    let document = parse(json!({ "openapi": "3.0.3", "paths": {} }));
    assert!(document.schema_names().is_empty());
    assert_eq!(document.operations().count(), 0);
  }
}
