use crate::types::YearTableDump;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Save a raw year page to `dir` as `lau{year}.html` for archival/debugging.
///
/// Lets the original page be re-examined without re-fetching.
pub fn archive_page(dir: &Path, year: i32, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create archive directory {}", dir.display()))?;
    let path = dir.join(format!("lau{year}.html"));
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = html.len(), "Archived raw HTML");
    Ok(path)
}

/// Write a parsed year table as pretty JSON.
pub fn write_year_table(dump: &YearTableDump, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(dump)?;
    fs::write(path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        year = dump.source.year,
        entries = dump.entries.len(),
        "Wrote launch table JSON"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SourceInfo, VehicleTable};

    #[test]
    fn test_write_year_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables").join("lau2023.json");

        let mut entries = VehicleTable::new();
        entries.insert("2023-001".into(), "Falcon 9".into());
        let dump = YearTableDump {
            source: SourceInfo {
                url: "https://space.skyrocket.de/doc_chr/lau2023.htm".into(),
                site: "space.skyrocket.de".into(),
                year: 2023,
                fetched_at: "2026-01-01T00:00:00+00:00".into(),
            },
            entries,
        };

        write_year_table(&dump, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["source"]["year"], 2023);
        assert_eq!(value["entries"]["2023-001"], "Falcon 9");
    }
}
