use std::fs::File;

use anyhow::Context;

use etl_extract::{extract_api, extract_csv, extract_json};
use etl_model::Dataset;
use etl_transform::Pipeline;

use crate::cli::Cli;

/// What a pipeline invocation produced.
#[derive(Debug)]
pub enum RunOutcome {
    /// Result was written to the database.
    Loaded { table: String, rows: usize },
    /// No destination was given; the transformed dataset is returned for
    /// previewing.
    Preview(Dataset),
    /// The source had no data to offer (e.g. a non-200 HTTP response).
    NoData,
}

/// Extract, transform, and (optionally) load, per the CLI arguments.
pub fn run(args: &Cli) -> anyhow::Result<RunOutcome> {
    let Some(dataset) = extract(args)? else {
        return Ok(RunOutcome::NoData);
    };
    tracing::info!(
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "dataset extracted"
    );

    let pipeline = Pipeline::new(args.pipeline_config());
    let dataset = pipeline.run(dataset)?;

    match (&args.database, &args.table) {
        (Some(db_path), Some(table)) => {
            etl_load::load_dataset(&dataset, db_path, table)
                .with_context(|| format!("failed to load table {table}"))?;
            Ok(RunOutcome::Loaded {
                table: table.clone(),
                rows: dataset.row_count(),
            })
        }
        _ => Ok(RunOutcome::Preview(dataset)),
    }
}

fn extract(args: &Cli) -> anyhow::Result<Option<Dataset>> {
    if let Some(path) = &args.from_csv {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        return Ok(Some(extract_csv(file)?));
    }
    if let Some(path) = &args.from_json {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return Ok(Some(extract_json(&bytes)?));
    }
    if let Some(url) = &args.from_url {
        return Ok(extract_api(url)?);
    }
    // clap's source group guarantees one of the three is present.
    anyhow::bail!("no data source given")
}
