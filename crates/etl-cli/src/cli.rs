use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use etl_transform::{PipelineConfig, Stage};

/// Extract a tabular dataset, run the selected transform stages, and
/// either preview the result or load it into a SQLite table.
#[derive(Debug, Parser)]
#[command(name = "etl", version, about)]
#[command(group(ArgGroup::new("source").required(true)))]
pub struct Cli {
    /// Read a CSV file (first row is the header).
    #[arg(long, value_name = "PATH", group = "source")]
    pub from_csv: Option<PathBuf>,

    /// Read a JSON file (array of flat objects, or one object).
    #[arg(long, value_name = "PATH", group = "source")]
    pub from_json: Option<PathBuf>,

    /// Fetch rows from an HTTP endpoint (GET, expects a JSON body).
    #[arg(long, value_name = "URL", group = "source")]
    pub from_url: Option<String>,

    /// Clean column names and remove duplicate rows.
    #[arg(long)]
    pub clean: bool,

    /// Parse date/time-named columns as datetimes.
    #[arg(long)]
    pub parse_dates: bool,

    /// Convert columns to their narrowest consistent type.
    #[arg(long)]
    pub convert_types: bool,

    /// Drop rows with missing values.
    #[arg(long)]
    pub drop_missing: bool,

    /// Remove z-score outliers from numeric columns.
    #[arg(long)]
    pub remove_outliers: bool,

    /// Z-score threshold for --remove-outliers.
    #[arg(long, value_name = "Z", default_value_t = 3.0)]
    pub z_thresh: f64,

    /// Encode categorical columns as drop-first indicator columns.
    #[arg(long)]
    pub encode: bool,

    /// Scale numeric features to zero mean, unit variance.
    #[arg(long)]
    pub scale: bool,

    /// Derive total_value from price and quantity.
    #[arg(long)]
    pub derive: bool,

    /// Enable every transform stage.
    #[arg(long)]
    pub all: bool,

    /// SQLite database to load the result into.
    #[arg(long, value_name = "PATH", requires = "table")]
    pub database: Option<PathBuf>,

    /// Destination table name (replaced if it exists).
    #[arg(long, value_name = "NAME", requires = "database")]
    pub table: Option<String>,

    /// Rows to show when previewing instead of loading.
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub preview_rows: usize,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    #[command(flatten)]
    pub color: colorchoice_clap::Color,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormatArg::Compact)]
    pub log_format: LogFormatArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl Cli {
    /// Translate the stage flags into a pipeline configuration.
    ///
    /// The flag order on the command line never matters; the pipeline's
    /// canonical order decides execution.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut config = if self.all {
            PipelineConfig::all_enabled()
        } else {
            PipelineConfig::default()
        };
        for (flag, stage) in [
            (self.clean, Stage::CleanNames),
            (self.parse_dates, Stage::ParseDates),
            (self.convert_types, Stage::ConvertTypes),
            (self.drop_missing, Stage::DropMissing),
            (self.remove_outliers, Stage::RemoveOutliers),
            (self.encode, Stage::EncodeCategoricals),
            (self.scale, Stage::ScaleFeatures),
            (self.derive, Stage::DeriveFeatures),
        ] {
            if flag {
                config.enable(stage);
            }
        }
        config.z_thresh = self.z_thresh;
        config
    }
}
