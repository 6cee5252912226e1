//! Parsing of local component references.
//!
//! In OpenAPI documents the `$ref` keyword uses JSON Pointer syntax inside a URI
//! fragment. References within the same document point below `#/components/`,
//! followed by the component section and the component name (e.g.
//! `#/components/schemas/User`). Only that form is understood here; external
//! documents and arbitrary pointers are rejected with a [`RefError`].

use std::{borrow::Cow, fmt, str::FromStr};

use percent_encoding::percent_decode_str;
use strum::{Display, EnumString};
use thiserror::Error;

pub const COMPONENTS_PREFIX: &str = "#/components/";
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// A section of the `components` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum ComponentKind {
  Schemas,
  Responses,
  Parameters,
  Examples,
  RequestBodies,
  Headers,
  SecuritySchemes,
  Links,
  Callbacks,
  PathItems,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefError {
  #[error("'{0}' is not a reference into #/components of this document")]
  NotLocal(String),
  #[error("'{reference}' points into unknown components section '{section}'")]
  UnknownSection { reference: String, section: String },
  #[error("'{0}' does not name a component")]
  MissingName(String),
}

/// A parsed `#/components/<kind>/<name>` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentRef {
  pub kind: ComponentKind,
  pub name: String,
}

impl ComponentRef {
  pub fn new(kind: ComponentKind, name: impl Into<String>) -> Self {
    Self {
      kind,
      name: name.into(),
    }
  }

  pub fn schema(name: impl Into<String>) -> Self {
    Self::new(ComponentKind::Schemas, name)
  }
}

impl FromStr for ComponentRef {
  type Err = RefError;

  /// Pointers that reach below a component (`#/components/schemas/Pet/properties/id`)
  /// resolve to the component itself, since keeping it keeps everything inside it.
  fn from_str(ref_path: &str) -> Result<Self, Self::Err> {
    let pointer = ref_path
      .strip_prefix(COMPONENTS_PREFIX)
      .ok_or_else(|| RefError::NotLocal(ref_path.to_string()))?;

    let (section, rest) = pointer
      .split_once('/')
      .ok_or_else(|| RefError::MissingName(ref_path.to_string()))?;

    let kind = section.parse::<ComponentKind>().map_err(|_| RefError::UnknownSection {
      reference: ref_path.to_string(),
      section: section.to_string(),
    })?;

    let token = rest.split('/').next().unwrap_or_default();
    if token.is_empty() {
      return Err(RefError::MissingName(ref_path.to_string()));
    }

    Ok(Self::new(kind, decode_token(token)))
  }
}

impl fmt::Display for ComponentRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let escaped = self.name.replace('~', "~0").replace('/', "~1");
    write!(f, "{COMPONENTS_PREFIX}{}/{escaped}", self.kind)
  }
}

/// Decodes one reference token: percent-escapes first, then `~1` and `~0`.
fn decode_token(token: &str) -> Cow<'_, str> {
  let decoded = percent_decode_str(token).decode_utf8_lossy();
  if decoded.contains('~') {
    Cow::Owned(decoded.replace("~1", "/").replace("~0", "~"))
  } else {
    decoded
  }
}

/// Extracts the schema name from a `#/components/schemas/<name>` reference.
///
/// Returns `None` for references into other sections and for anything that is not
/// a local component reference.
pub fn parse_schema_ref_path(ref_path: &str) -> Option<String> {
  match ref_path.parse::<ComponentRef>() {
    Ok(ComponentRef {
      kind: ComponentKind::Schemas,
      name,
    }) => Some(name),
    _ => None,
  }
}
