pub mod cache;
pub mod encoding;
pub mod fetcher;
pub mod memory;
pub mod normalize;
pub mod output;
pub mod source;
pub mod table;
pub mod types;

pub use cache::{YearCache, YearEntry, YearStatus};
pub use fetcher::{fetch_year, LaunchVehicleFetcher};
pub use memory::MemorySource;
pub use source::{year_url, FetchConfig, FetchError, HttpSource, PageSource};
pub use table::{parse_vehicle_table, TableError};
pub use types::{SourceInfo, VehicleTable, YearTableDump};
