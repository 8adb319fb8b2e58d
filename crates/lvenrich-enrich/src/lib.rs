use anyhow::{Context, Result};
use lvenrich_acquire::{FetchConfig, LaunchVehicleFetcher, PageSource};
use lvenrich_model::DESIGNATOR_FIELD;
use std::path::PathBuf;

pub mod csv_io;
pub mod enrich;

pub use enrich::EnrichStats;

pub const DEFAULT_INPUT: &str = "input.csv";
pub const DEFAULT_OUTPUT: &str = "output.csv";

/// Everything one enrichment run needs to know.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Header of the column holding international designators.
    pub designator_field: String,
    pub fetch: FetchConfig,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            designator_field: DESIGNATOR_FIELD.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

/// Read the input CSV, add a launch vehicle to every row, and write the output CSV.
///
/// Fetch failures never fail the run; they surface as "NOT FOUND" rows and in
/// the returned stats. Reading or writing the CSV files is fatal.
pub async fn run<S: PageSource>(config: &EnrichConfig, source: S) -> Result<EnrichStats> {
    tracing::info!(path = %config.input.display(), "Reading input CSV");
    let mut table = csv_io::read_table(&config.input).context("Failed to load input CSV")?;
    tracing::info!(rows = table.records.len(), fields = table.fields.len(), "Loaded records");

    let mut fetcher = LaunchVehicleFetcher::new(source, config.fetch.clone());
    let stats = enrich::enrich_table(&mut table, &mut fetcher, &config.designator_field).await;

    tracing::info!(path = %config.output.display(), "Writing output CSV");
    csv_io::write_table(&table, &config.output).context("Failed to write output CSV")?;

    tracing::info!(
        rows = stats.rows,
        found = stats.found,
        not_found = stats.not_found,
        invalid = stats.invalid,
        blank = stats.blank,
        years = stats.years_fetched,
        "Done"
    );
    if !stats.failed_years.is_empty() {
        tracing::warn!(
            years = ?stats.failed_years,
            "Launch tables unavailable for some years; their rows are marked NOT FOUND"
        );
    }

    Ok(stats)
}
