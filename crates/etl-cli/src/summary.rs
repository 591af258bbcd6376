use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};

use etl_model::Dataset;

use crate::commands::RunOutcome;

/// Print the invocation outcome to stdout.
pub fn print_outcome(outcome: &RunOutcome, preview_rows: usize) {
    match outcome {
        RunOutcome::Loaded { table, rows } => {
            println!("loaded {rows} rows into table `{table}`");
        }
        RunOutcome::Preview(dataset) => {
            println!(
                "{} rows x {} columns (no --table given, previewing)",
                dataset.row_count(),
                dataset.column_count()
            );
            if dataset.column_count() > 0 {
                println!("{}", preview_table(dataset, preview_rows));
            }
        }
        RunOutcome::NoData => {
            println!("source returned no data");
        }
    }
}

/// Render the first `limit` rows, with column types in the header.
fn preview_table(dataset: &Dataset, limit: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        dataset
            .columns()
            .iter()
            .map(|c| Cell::new(format!("{} ({})", c.name(), c.column_type().as_str()))),
    );
    for row in 0..dataset.row_count().min(limit) {
        table.add_row(dataset.row(row).iter().map(|cell| Cell::new(cell.render())));
    }
    table
}
