use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use oas3_trim::{SchemaCleaner, SpecLoader};

use crate::ui::{Colors, colors::IntoComfyColor, term_width};

fn new_table(colors: &Colors, headers: &[&str]) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in headers {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);
  table
}

pub async fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = SpecLoader::open(input).await?.document()?;

  let mut operations = document
    .operations()
    .map(|(path, method, operation)| (operation.id().to_string(), method, path.to_string()))
    .chain(
      document
        .webhook_operations()
        .map(|(name, method, operation)| (operation.id().to_string(), method, format!("webhooks/{name}"))),
    )
    .collect::<Vec<_>>();
  operations.sort_by(|a, b| a.0.cmp(&b.0));

  let mut table = new_table(colors, &["OPERATION ID", "METHOD", "PATH"]);
  for (operation_id, method, path) in operations {
    let operation_id = if operation_id.is_empty() {
      "-".to_string()
    } else {
      operation_id
    };

    let mut row = Row::new();
    row.add_cell(
      Cell::new(operation_id)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(method)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(path).fg(IntoComfyColor::into(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}

pub async fn list_schemas(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = SpecLoader::open(input).await?.document()?;
  let reachability = SchemaCleaner::default().analyze(&document);

  let mut table = new_table(colors, &["SCHEMA", "REFERENCED"]);
  for name in document.schema_names() {
    let (status, color) = if reachability.is_referenced(name) {
      ("yes", colors.success())
    } else {
      ("no", colors.accent())
    };

    let mut row = Row::new();
    row.add_cell(
      Cell::new(name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(status).fg(IntoComfyColor::into(color)));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
