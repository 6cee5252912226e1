use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-trim")]
#[command(author, version, about = "Trim OpenAPI v3 specifications down to selected operations")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Keep only the given operations, dropping paths left without operations
  FilterOps(FilterOpsCommand),
  /// Remove schemas that no operation references
  CleanSchemas(CleanSchemasCommand),
  /// Check that a file parses as OpenAPI v3 and that its references resolve
  Validate {
    /// Path to the OpenAPI specification file (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}

/// Input, output and verbosity flags shared by the commands that rewrite a file.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
  /// Path to the OpenAPI specification file (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Where to write the result. Defaults to `<input>-<command suffix>.<ext>` next to the input;
  /// the extension picks JSON or YAML output
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Report what would be removed without writing anything
  #[arg(long, default_value_t = false)]
  pub dry_run: bool,

  /// List every removed item
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FilterOpsCommand {
  #[command(flatten)]
  pub io: OutputArgs,

  /// Operation ids to keep (space or comma separated). Without ids, every
  /// operation not excluded is kept
  #[arg(value_name = "IDS", value_delimiter = ',')]
  pub ids: Vec<String>,

  /// Treat a missing id list as an empty keep list, removing every operation
  #[arg(long, default_value_t = false, conflicts_with_all = ["ids", "exclude"])]
  pub remove_all: bool,

  /// Operation ids to remove even if listed for keeping (comma-separated)
  #[arg(long, value_name = "IDS", value_delimiter = ',')]
  pub exclude: Option<Vec<String>>,

  /// Also remove schemas the remaining operations no longer reference
  #[arg(long, default_value_t = false)]
  pub clean_schemas: bool,

  /// Schemas to keep when cleaning, even if unreferenced (comma-separated)
  #[arg(long, value_name = "NAMES", value_delimiter = ',', requires = "clean_schemas")]
  pub keep_schemas: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CleanSchemasCommand {
  #[command(flatten)]
  pub io: OutputArgs,

  /// Schema names to keep even if no operation references them
  #[arg(value_name = "NAMES", value_delimiter = ',')]
  pub keep: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations defined in the OpenAPI specification
  Operations {
    /// Path to the OpenAPI specification file (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
  /// List schema components and whether any operation reaches them
  Schemas {
    /// Path to the OpenAPI specification file (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
