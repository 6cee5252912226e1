pub mod cli;
pub mod colors;
pub mod commands;
pub mod logger;

pub use cli::{Cli, Commands, ListCommands};
pub use colors::Colors;
pub use logger::{Logger, Verbosity};

fn term_width() -> u16 {
  if let Ok((width, _)) = crossterm::terminal::size() {
    width
  } else {
    80
  }
}
