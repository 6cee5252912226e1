use oas3_trim::{FilterReport, OperationFilter, SchemaCleaner, filter_operations};

use super::{IoConfig, clean::report_cleaning};
use crate::ui::{Colors, Logger, cli::FilterOpsCommand};

#[derive(Debug, Clone)]
pub struct FilterConfig {
  pub io: IoConfig,
  pub filter: OperationFilter,
  /// Set when unreferenced schemas should be removed after filtering.
  pub cleaner: Option<SchemaCleaner>,
}

impl FilterConfig {
  pub fn from_command(command: FilterOpsCommand) -> anyhow::Result<Self> {
    let FilterOpsCommand {
      io,
      ids,
      remove_all,
      exclude,
      clean_schemas,
      keep_schemas,
    } = command;

    if ids.is_empty() && exclude.is_none() && !remove_all {
      anyhow::bail!(
        "No operations selected: pass the operation ids to keep, --exclude the ones to drop, or --remove-all"
      );
    }

    let only = (remove_all || !ids.is_empty()).then(|| ids.into_iter().collect());
    let excluded = exclude.map(|ids| ids.into_iter().collect());

    Ok(Self {
      io: io.into(),
      filter: OperationFilter::new(only, excluded),
      cleaner: clean_schemas.then(|| SchemaCleaner::new(keep_schemas)),
    })
  }
}

fn report_filtering(logger: &Logger<'_>, report: &FilterReport, kept: usize) {
  logger.stat("Operations removed:", report.removed_count());
  logger.stat("Operations kept:", kept);
  for operation in &report.removed_operations {
    let id = operation.operation_id.as_deref().unwrap_or("<no operationId>");
    logger.detail("removed", format!("{id} ({} {})", operation.method, operation.path));
  }

  if !report.removed_paths.is_empty() {
    logger.stat("Paths removed:", report.removed_paths.len());
    for path in &report.removed_paths {
      logger.detail("dropped", path);
    }
  }
}

pub async fn filter_ops(config: FilterConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = Logger::new(colors, config.io.verbosity);
  let mut document = config.io.load(&logger).await?;

  logger.info("Filtering operations...");
  let report = filter_operations(&mut document, &config.filter);
  let kept = document.operations().count() + document.webhook_operations().count();
  report_filtering(&logger, &report, kept);

  if let Some(cleaner) = &config.cleaner {
    logger.info("Removing unreferenced schemas...");
    let cleaned = cleaner.clean(&mut document);
    report_cleaning(&logger, &cleaned);
  }

  config.io.save(&document, "filtered", &logger).await?;
  logger.success(&format!("Removed {} operations", report.removed_count()));
  Ok(())
}
