use crate::normalize;
use crate::types::VehicleTable;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Column holding the international designator in the launch table.
const DESIGNATOR_COLUMN: usize = 0;
/// Column holding the launch vehicle name in the launch table.
const VEHICLE_COLUMN: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("page contains no <table> element")]
    NoTable,
}

/// Parse a year page into a designator → launch vehicle mapping.
///
/// Only the first `<table>` in the document is read. Every `<tr>` beneath it
/// with at least four `<td>` cells contributes its first cell as the key and
/// its fourth cell as the value, provided both are non-empty. When a
/// designator appears twice the later row wins.
pub fn parse_vehicle_table(html: &str) -> Result<VehicleTable, TableError> {
    let document = Html::parse_document(html);

    let table_sel = Selector::parse("table").expect("valid selector");
    let tr_sel = Selector::parse("tr").expect("valid selector");
    let td_sel = Selector::parse("td").expect("valid selector");

    let table = document.select(&table_sel).next().ok_or(TableError::NoTable)?;

    let mut entries = VehicleTable::new();

    for (index, tr) in table.select(&tr_sel).enumerate() {
        let tds: Vec<ElementRef> = tr.select(&td_sel).collect();

        if tds.len() <= VEHICLE_COLUMN {
            tracing::trace!(row = index, cols = tds.len(), "Skipping row with < 4 columns");
            continue;
        }

        let designator = cell_text(tds[DESIGNATOR_COLUMN]);
        let vehicle = cell_text(tds[VEHICLE_COLUMN]);
        if designator.is_empty() || vehicle.is_empty() {
            continue;
        }

        entries.insert(designator, vehicle);
    }

    Ok(entries)
}

/// All text beneath a cell, fragment by fragment.
fn cell_text(td: ElementRef) -> String {
    normalize::join_fragments(td.text())
}
