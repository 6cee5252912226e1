use serde_json::{Value, json};

use crate::document::Document;

pub(super) fn schema_ref(name: &str) -> Value {
  json!({ "$ref": format!("#/components/schemas/{name}") })
}

pub(super) fn json_content(schema: Value) -> Value {
  json!({ "application/json": { "schema": schema } })
}

/// An operation whose `200` response carries `schema` as JSON.
pub(super) fn returning(operation_id: &str, schema: Value) -> Value {
  json!({
    "operationId": operation_id,
    "responses": { "200": { "description": "ok", "content": json_content(schema) } }
  })
}

pub(super) fn document(paths: Value, components: Value) -> Document {
  serde_json::from_value(json!({
    "openapi": "3.1.0",
    "info": { "title": "Test API", "version": "1.0.0" },
    "paths": paths,
    "components": components
  }))
  .expect("failed to parse test document")
}

/// A document with a single `GET /users/{id}` returning `User`, where `User`
/// embeds `Address` and `Ghost` is defined but never referenced.
pub(super) fn users_document() -> Document {
  document(
    json!({ "/users/{id}": { "get": returning("getUser", schema_ref("User")) } }),
    json!({
      "schemas": {
        "User": {
          "type": "object",
          "properties": { "id": { "type": "string" }, "address": schema_ref("Address") }
        },
        "Address": { "type": "object", "properties": { "city": { "type": "string" } } },
        "Ghost": { "type": "object" }
      }
    }),
  )
}

pub(super) fn sorted(names: Vec<&str>) -> Vec<&str> {
  let mut names = names;
  names.sort_unstable();
  names
}
