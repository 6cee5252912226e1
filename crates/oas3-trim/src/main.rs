#![allow(clippy::missing_errors_doc)]
use clap::Parser;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Operations { input } => ui::commands::list_operations(&input, &colors).await?,
      ListCommands::Schemas { input } => ui::commands::list_schemas(&input, &colors).await?,
    },
    Commands::FilterOps(command) => {
      let config = ui::commands::FilterConfig::from_command(command)?;
      ui::commands::filter_ops(config, &colors).await?;
    }
    Commands::CleanSchemas(command) => {
      let config = ui::commands::CleanConfig::from_command(command);
      ui::commands::clean_schemas(config, &colors).await?;
    }
    Commands::Validate { input } => ui::commands::validate_spec(&input, &colors).await?,
  }

  Ok(())
}
