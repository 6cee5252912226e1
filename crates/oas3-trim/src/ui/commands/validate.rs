use std::path::Path;

use anyhow::Context;
use oas3_trim::{SchemaCleaner, SpecLoader};

use crate::ui::{Colors, Logger, Verbosity};

/// Parses `input` with the full OpenAPI model, then walks every reference the
/// operations reach. Broken references fail the command.
pub async fn validate_spec(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let logger = Logger::new(colors, Verbosity::Normal);
  logger.info(format!("Validating OpenAPI spec: {}", input.display()));

  let loader = SpecLoader::open(input).await?;
  let spec = loader
    .validate()
    .with_context(|| format!("{} is not a valid OpenAPI v3 document", input.display()))?;

  logger.stat("Title:", &spec.info.title);
  logger.stat("Version:", &spec.info.version);
  logger.stat("Operations:", spec.operations().count());
  logger.stat(
    "Schemas:",
    spec.components.as_ref().map_or(0, |components| components.schemas.len()),
  );

  let document = loader.document()?;
  let reachability = SchemaCleaner::default().analyze(&document);
  let unreachable = document
    .schema_names()
    .into_iter()
    .filter(|name| !reachability.is_referenced(name))
    .count();
  logger.stat("Unreferenced schemas:", unreachable);

  let broken = reachability
    .warnings
    .iter()
    .filter(|warning| warning.is_document_issue())
    .inspect(|warning| logger.warn(warning))
    .count();

  if broken > 0 {
    anyhow::bail!("{} has {broken} unresolved references", input.display());
  }

  logger.success("Specification is valid");
  Ok(())
}
