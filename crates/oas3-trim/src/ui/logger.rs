use std::fmt::Display;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use super::Colors;

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

/// How much console output a command produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
  Quiet,
  #[default]
  Normal,
  Verbose,
}

impl Verbosity {
  pub fn from_flags(verbose: bool, quiet: bool) -> Self {
    match (verbose, quiet) {
      (_, true) => Self::Quiet,
      (true, false) => Self::Verbose,
      (false, false) => Self::Normal,
    }
  }
}

/// Timestamped, coloured progress output for the trimming commands.
pub struct Logger<'a> {
  colors: &'a Colors,
  verbosity: Verbosity,
}

impl<'a> Logger<'a> {
  pub fn new(colors: &'a Colors, verbosity: Verbosity) -> Self {
    Self { colors, verbosity }
  }

  pub fn is_quiet(&self) -> bool {
    self.verbosity == Verbosity::Quiet
  }

  pub fn is_verbose(&self) -> bool {
    self.verbosity == Verbosity::Verbose
  }

  pub fn info(&self, message: impl Display) {
    if !self.is_quiet() {
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.to_string().with(self.colors.primary())
      );
    }
  }

  pub fn stat(&self, label: &str, value: impl Display) {
    if !self.is_quiet() {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.to_string().with(self.colors.value())
      );
    }
  }

  /// A line under the statistics, shown only with `--verbose`.
  pub fn detail(&self, kind: &str, item: impl Display) {
    if self.is_verbose() {
      println!(
        "              {} {}",
        kind.with(self.colors.accent()),
        item.to_string().with(self.colors.info())
      );
    }
  }

  /// Warnings go to stderr and are shown unless `--quiet` is set.
  pub fn warn(&self, warning: impl Display) {
    if !self.is_quiet() {
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  pub fn success(&self, message: &str) {
    if !self.is_quiet() {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.with(self.colors.success())
      );
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_verbosity_from_flags() {
    let cases = [
      (false, false, Verbosity::Normal),
      (true, false, Verbosity::Verbose),
      (false, true, Verbosity::Quiet),
      (true, true, Verbosity::Quiet),
    ];

    for (verbose, quiet, expected) in cases {
      assert_eq!(
        Verbosity::from_flags(verbose, quiet),
        expected,
        "failed for verbose={verbose} quiet={quiet}"
      );
    }
  }

  #[test]
  fn test_timestamp_format() {
    let timestamp = format_timestamp();
    assert_eq!(timestamp.len(), 10);
    assert!(timestamp.starts_with('[') && timestamp.ends_with(']'));
  }
}
