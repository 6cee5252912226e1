pub mod clean;
pub mod filter;
pub mod list;
pub mod validate;

use std::path::{Path, PathBuf};

use oas3_trim::{Document, SpecLoader, make_output_path, write_document};

pub use clean::{CleanConfig, clean_schemas};
pub use filter::{FilterConfig, filter_ops};
pub use list::{list_operations, list_schemas};
pub use validate::validate_spec;

use crate::ui::{Logger, Verbosity, cli::OutputArgs};

/// Source and destination of a command that rewrites a document.
#[derive(Debug, Clone)]
pub struct IoConfig {
  pub input: PathBuf,
  pub output: Option<PathBuf>,
  pub dry_run: bool,
  pub verbosity: Verbosity,
}

impl From<OutputArgs> for IoConfig {
  fn from(args: OutputArgs) -> Self {
    let OutputArgs {
      input,
      output,
      dry_run,
      verbose,
      quiet,
    } = args;

    Self {
      input,
      output,
      dry_run,
      verbosity: Verbosity::from_flags(verbose, quiet),
    }
  }
}

impl IoConfig {
  async fn load(&self, logger: &Logger<'_>) -> anyhow::Result<Document> {
    logger.info(format!("Loading OpenAPI spec from: {}", self.input.display()));
    SpecLoader::open(&self.input).await?.document()
  }

  /// Writes `document` unless this is a dry run. Without an explicit output the
  /// file lands next to the input, named with `suffix`.
  async fn save(&self, document: &Document, suffix: &str, logger: &Logger<'_>) -> anyhow::Result<()> {
    if self.dry_run {
      logger.info("Dry run, nothing written");
      return Ok(());
    }

    let output = resolve_output(&self.input, self.output.as_deref(), suffix).await?;
    logger.info(format!("Writing to: {}", output.display()));
    write_document(&output, document).await
  }
}

async fn resolve_output(input: &Path, output: Option<&Path>, suffix: &str) -> anyhow::Result<PathBuf> {
  match output {
    Some(path) => Ok(path.to_path_buf()),
    None => make_output_path(input, suffix).await,
  }
}
