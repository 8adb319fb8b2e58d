use lvenrich_acquire::{LaunchVehicleFetcher, PageSource, YearStatus};
use lvenrich_model::{Table, VehicleLookup, LAUNCH_VEHICLE_FIELD};

/// Outcome counts for one enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichStats {
    pub rows: usize,
    pub found: usize,
    pub not_found: usize,
    pub invalid: usize,
    pub blank: usize,
    pub years_fetched: usize,
    /// Years whose page could not be fetched or parsed. Their rows are
    /// counted under `not_found`.
    pub failed_years: Vec<i32>,
}

impl EnrichStats {
    fn record(&mut self, lookup: &VehicleLookup) {
        match lookup {
            VehicleLookup::Blank => self.blank += 1,
            VehicleLookup::Invalid => self.invalid += 1,
            VehicleLookup::Found(_) => self.found += 1,
            VehicleLookup::NotFound => self.not_found += 1,
        }
    }
}

/// Fill the launch vehicle column of every record, in file order.
///
/// The column is appended to the header if absent. A missing designator
/// column is not an error: every row is then treated as blank.
pub async fn enrich_table<S: PageSource>(
    table: &mut Table,
    fetcher: &mut LaunchVehicleFetcher<S>,
    designator_field: &str,
) -> EnrichStats {
    if !table.has_field(designator_field) {
        tracing::warn!(
            column = designator_field,
            "Designator column missing from header; all rows will be left blank"
        );
    }
    table.ensure_field(LAUNCH_VEHICLE_FIELD);

    let total = table.records.len();
    let mut stats = EnrichStats {
        rows: total,
        ..EnrichStats::default()
    };

    for (idx, record) in table.records.iter_mut().enumerate() {
        let designator = record
            .get(designator_field)
            .unwrap_or_default()
            .trim()
            .to_string();

        let lookup = fetcher.lookup(&designator).await;
        record.set(LAUNCH_VEHICLE_FIELD, lookup.field_value());

        match &lookup {
            VehicleLookup::Blank => tracing::debug!("[{}/{}] blank designator", idx + 1, total),
            _ => tracing::info!(
                "[{}/{}] {} -> {}",
                idx + 1,
                total,
                designator,
                lookup.field_value()
            ),
        }
        stats.record(&lookup);
    }

    stats.years_fetched = fetcher.cache().count(YearStatus::Fetched);
    stats.failed_years = fetcher.cache().years(YearStatus::Failed);
    stats
}
