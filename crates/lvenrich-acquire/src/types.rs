use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Designator to launch vehicle name, as scraped from one year's page.
pub type VehicleTable = BTreeMap<String, String>;

/// Provenance information about a fetched year page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub url: String,
    pub site: String,
    pub year: i32,
    pub fetched_at: String,
}

/// One year's parsed launch table together with where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearTableDump {
    pub source: SourceInfo,
    pub entries: VehicleTable,
}
