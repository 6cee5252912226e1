//! Reading and writing OpenAPI documents in JSON or YAML.

use std::{
  ffi::OsStr,
  path::{Path, PathBuf},
};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use oas3::OpenApiV3Spec;

use crate::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext.to_ascii_lowercase().as_str() {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

/// A memory-mapped OpenAPI file.
pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self {
      file,
      format: SpecFormat::from_path(path),
    })
  }

  /// Parses the file into the editable document model.
  pub fn document(&self) -> anyhow::Result<Document> {
    match self.format {
      SpecFormat::Json => Ok(serde_json::from_slice::<Document>(self.file.as_slice())?),
      SpecFormat::Yaml => {
        let content = std::str::from_utf8(self.file.as_slice())?;
        serde_saphyr::from_str::<Document>(content).map_err(|e| anyhow::anyhow!("invalid YAML document: {e}"))
      }
    }
  }

  /// Parses the file into the full OpenAPI v3 model, failing on anything that is
  /// not a structurally valid specification.
  pub fn validate(&self) -> anyhow::Result<oas3::Spec> {
    match self.format {
      SpecFormat::Json => Ok(serde_json::from_slice::<OpenApiV3Spec>(self.file.as_slice())?),
      SpecFormat::Yaml => {
        let content = std::str::from_utf8(self.file.as_slice())?;
        Ok(oas3::from_yaml(content)?)
      }
    }
  }
}

/// Serializes `document` in `format`. JSON is pretty-printed and ends with a newline.
pub fn render_document(document: &Document, format: SpecFormat) -> anyhow::Result<String> {
  match format {
    SpecFormat::Json => {
      let mut rendered = serde_json::to_string_pretty(document)?;
      rendered.push('\n');
      Ok(rendered)
    }
    SpecFormat::Yaml => {
      serde_saphyr::to_string(document).map_err(|e| anyhow::anyhow!("failed to render YAML document: {e}"))
    }
  }
}

/// Writes `document` to `path`, choosing the format from the path's extension.
pub async fn write_document(path: &Path, document: &Document) -> anyhow::Result<()> {
  let rendered = render_document(document, SpecFormat::from_path(path))?;
  if let Some(parent) = path.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }
  tokio::fs::write(path, rendered)
    .await
    .with_context(|| format!("failed to write {}", path.display()))?;
  Ok(())
}

/// Derives `<stem>-<suffix>.<ext>` next to `input`, appending `-<n>` for the
/// smallest `n` that does not clash with an existing file.
pub async fn make_output_path(input: &Path, suffix: &str) -> anyhow::Result<PathBuf> {
  let stem = input.file_stem().and_then(OsStr::to_str).unwrap_or("openapi");
  let extension = input.extension().and_then(OsStr::to_str);
  let file_name = |counter: Option<usize>| {
    let base = match counter {
      Some(n) => format!("{stem}-{suffix}-{n}"),
      None => format!("{stem}-{suffix}"),
    };
    match extension {
      Some(ext) => format!("{base}.{ext}"),
      None => base,
    }
  };

  let candidate = input.with_file_name(file_name(None));
  if !tokio::fs::try_exists(&candidate).await? {
    return Ok(candidate);
  }

  let mut counter = 1;
  loop {
    let candidate = input.with_file_name(file_name(Some(counter)));
    if !tokio::fs::try_exists(&candidate).await? {
      return Ok(candidate);
    }
    counter += 1;
  }
}
