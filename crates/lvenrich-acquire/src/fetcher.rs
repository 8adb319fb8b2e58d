use crate::cache::{YearCache, YearEntry};
use crate::output;
use crate::source::{year_url, FetchConfig, FetchError, PageSource};
use crate::table::parse_vehicle_table;
use crate::types::{SourceInfo, YearTableDump};
use lvenrich_model::{resolve_year, VehicleLookup, YearResolution};
use std::collections::hash_map::Entry;

/// Fetch and parse the launch table for one year.
///
/// Raw HTML is archived first when `config.archive_dir` is set; an archive
/// write failure is logged and does not fail the fetch.
pub async fn fetch_year<S: PageSource>(
    source: &S,
    config: &FetchConfig,
    year: i32,
) -> Result<YearTableDump, FetchError> {
    let url = year_url(&config.base_url, year);

    tracing::info!(year, url = %url, "Fetching launch table");
    let html = source.fetch_page(&url).await?;
    tracing::debug!(year, bytes = html.len(), "Received HTML");

    if let Some(dir) = &config.archive_dir {
        if let Err(e) = output::archive_page(dir, year, &html) {
            tracing::warn!(year, error = %e, "Failed to archive raw HTML");
        }
    }

    let entries = parse_vehicle_table(&html)?;
    tracing::debug!(year, entries = entries.len(), "Parsed launch table");

    let site = reqwest::Url::parse(&url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();

    Ok(YearTableDump {
        source: SourceInfo {
            url,
            site,
            year,
            fetched_at: chrono::Utc::now().to_rfc3339(),
        },
        entries,
    })
}

/// Resolves designators to launch vehicles, fetching each year's table on
/// first use and keeping it for the lifetime of the fetcher.
pub struct LaunchVehicleFetcher<S> {
    source: S,
    config: FetchConfig,
    cache: YearCache,
}

impl<S: PageSource> LaunchVehicleFetcher<S> {
    pub fn new(source: S, config: FetchConfig) -> Self {
        Self {
            source,
            config,
            cache: YearCache::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &YearCache {
        &self.cache
    }

    /// Look up the launch vehicle for one designator.
    ///
    /// Blank, unparsable, and out-of-range designators are answered without
    /// touching the cache or the network.
    pub async fn lookup(&mut self, designator: &str) -> VehicleLookup {
        let designator = designator.trim();
        if designator.is_empty() {
            return VehicleLookup::Blank;
        }

        let year = match resolve_year(designator) {
            YearResolution::Year(year) => year,
            YearResolution::Invalid => return VehicleLookup::Invalid,
            YearResolution::OutOfRange => {
                tracing::debug!(designator, "Year out of range; no chronology to fetch");
                return VehicleLookup::NotFound;
            }
        };

        match self.year_entry(year).await.lookup(designator) {
            Some(vehicle) => VehicleLookup::Found(vehicle.to_string()),
            None => VehicleLookup::NotFound,
        }
    }

    /// The cached table for `year`, fetching it if this is the first request.
    ///
    /// A failed fetch is cached as an empty table and never retried. Every
    /// fetch attempt is followed by the configured delay.
    pub async fn year_entry(&mut self, year: i32) -> &YearEntry {
        match self.cache.entry(year) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let entry = match fetch_year(&self.source, &self.config, year).await {
                    Ok(dump) => {
                        tracing::info!(year, entries = dump.entries.len(), "Cached launch table");
                        YearEntry::fetched(dump.entries)
                    }
                    Err(e) => {
                        tracing::warn!(year, error = %e, "Error fetching launch table; treating year as empty");
                        YearEntry::failed()
                    }
                };

                if !self.config.delay.is_zero() {
                    tokio::time::sleep(self.config.delay).await;
                }

                vacant.insert(entry)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::YearStatus;
    use crate::memory::MemorySource;
    use std::time::{Duration, Instant};

    const BASE: &str = "http://launches.test/doc_chr";

    const PAGE_2023: &str = r#"
    <table>
      <tr><th>ID</th><th>Date</th><th>Payload</th><th>Vehicle</th></tr>
      <tr><td>2023-001</td><td>03.01.2023</td><td>Transporter 6</td><td>Falcon 9</td></tr>
      <tr><td>2023-002</td><td>08.01.2023</td><td>Shiyan 22A</td><td>CZ-2D</td></tr>
    </table>
    "#;

    fn config() -> FetchConfig {
        FetchConfig {
            base_url: BASE.to_string(),
            delay: Duration::ZERO,
            ..FetchConfig::default()
        }
    }

    fn fetcher() -> LaunchVehicleFetcher<MemorySource> {
        let source = MemorySource::new().with_page(year_url(BASE, 2023), PAGE_2023);
        LaunchVehicleFetcher::new(source, config())
    }

    #[tokio::test]
    async fn test_found_and_not_found() {
        let mut fetcher = fetcher();

        assert_eq!(
            fetcher.lookup("2023-001").await,
            VehicleLookup::Found("Falcon 9".into())
        );
        assert_eq!(fetcher.lookup(" 2023-002 ").await, VehicleLookup::Found("CZ-2D".into()));
        assert_eq!(fetcher.lookup("2023-999").await, VehicleLookup::NotFound);
    }

    #[tokio::test]
    async fn test_one_fetch_per_year() {
        let mut fetcher = fetcher();

        for designator in ["2023-001", "2023-002", "2023-999", "2023-001"] {
            fetcher.lookup(designator).await;
        }

        assert_eq!(fetcher.source().requests(), vec![year_url(BASE, 2023)]);
        assert_eq!(fetcher.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_and_invalid_skip_network() {
        let mut fetcher = fetcher();

        assert_eq!(fetcher.lookup("").await, VehicleLookup::Blank);
        assert_eq!(fetcher.lookup("   ").await, VehicleLookup::Blank);
        assert_eq!(fetcher.lookup("abcd-002").await, VehicleLookup::Invalid);

        assert!(fetcher.source().requests().is_empty());
        assert!(fetcher.cache().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_year_is_not_found_without_fetch() {
        let mut fetcher = fetcher();

        assert_eq!(fetcher.lookup("99999999999-001").await, VehicleLookup::NotFound);

        assert!(fetcher.source().requests().is_empty());
        assert!(fetcher.cache().is_empty());
    }

    #[tokio::test]
    async fn test_failed_year_is_cached_empty() {
        let mut fetcher = fetcher();

        assert_eq!(fetcher.lookup("1899-001").await, VehicleLookup::NotFound);
        assert_eq!(fetcher.lookup("1899-002").await, VehicleLookup::NotFound);

        assert_eq!(fetcher.source().requests(), vec![year_url(BASE, 1899)]);
        assert_eq!(fetcher.cache().get(1899).unwrap().status, YearStatus::Failed);
    }

    #[tokio::test]
    async fn test_page_without_table_fails_year() {
        let source = MemorySource::new().with_page(year_url(BASE, 1960), "<p>moved</p>");
        let mut fetcher = LaunchVehicleFetcher::new(source, config());

        assert_eq!(fetcher.lookup("1960-001").await, VehicleLookup::NotFound);
        assert_eq!(fetcher.cache().get(1960).unwrap().status, YearStatus::Failed);
    }

    #[tokio::test]
    async fn test_delay_after_each_new_fetch() {
        let source = MemorySource::new().with_page(year_url(BASE, 2023), PAGE_2023);
        let delay = Duration::from_millis(30);
        let mut fetcher = LaunchVehicleFetcher::new(source, FetchConfig { delay, ..config() });

        let start = Instant::now();
        fetcher.lookup("2023-001").await;
        assert!(start.elapsed() >= delay);

        assert_eq!(fetcher.lookup("2023-002").await, VehicleLookup::Found("CZ-2D".into()));
        assert_eq!(fetcher.source().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_delay_after_failed_fetch() {
        let delay = Duration::from_millis(30);
        let mut fetcher = LaunchVehicleFetcher::new(MemorySource::new(), FetchConfig { delay, ..config() });

        let start = Instant::now();
        assert_eq!(fetcher.lookup("1899-001").await, VehicleLookup::NotFound);
        assert!(start.elapsed() >= delay);
        assert_eq!(fetcher.cache().get(1899).unwrap().status, YearStatus::Failed);
    }

    #[tokio::test]
    async fn test_fetch_year_archives_page() {
        let dir = tempfile::tempdir().unwrap();
        let source = MemorySource::new().with_page(year_url(BASE, 2023), PAGE_2023);
        let config = FetchConfig {
            archive_dir: Some(dir.path().to_path_buf()),
            ..config()
        };

        let dump = fetch_year(&source, &config, 2023).await.unwrap();

        assert_eq!(dump.source.year, 2023);
        assert_eq!(dump.source.site, "launches.test");
        assert_eq!(dump.entries.len(), 2);
        let archived = std::fs::read_to_string(dir.path().join("lau2023.html")).unwrap();
        assert_eq!(archived, PAGE_2023);
    }
}
