use oas3_trim::{CleanReport, SchemaCleaner};

use super::IoConfig;
use crate::ui::{Colors, Logger, cli::CleanSchemasCommand};

#[derive(Debug, Clone)]
pub struct CleanConfig {
  pub io: IoConfig,
  pub cleaner: SchemaCleaner,
}

impl CleanConfig {
  pub fn from_command(command: CleanSchemasCommand) -> Self {
    let CleanSchemasCommand { io, keep } = command;
    Self {
      io: io.into(),
      cleaner: SchemaCleaner::new(keep),
    }
  }
}

pub(super) fn report_cleaning(logger: &Logger<'_>, report: &CleanReport) {
  logger.stat("Schemas removed:", report.removed_count());
  logger.stat("Schemas kept:", report.kept.len());
  for name in &report.removed {
    logger.detail("removed", name);
  }

  if !report.warnings.is_empty() {
    logger.stat("Warnings:", report.warnings.len());
    for warning in &report.warnings {
      logger.warn(warning);
    }
  }
}

pub async fn clean_schemas(config: CleanConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = Logger::new(colors, config.io.verbosity);
  let mut document = config.io.load(&logger).await?;

  logger.info("Removing unreferenced schemas...");
  let report = config.cleaner.clean(&mut document);
  report_cleaning(&logger, &report);

  config.io.save(&document, "cleaned", &logger).await?;
  logger.success(&format!("Removed {} schemas", report.removed_count()));
  Ok(())
}
