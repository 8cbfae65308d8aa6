use bill_client::domain::HistoryEntry;
use scraper::{ElementRef, Html};

use super::page::{selector, text_of};
use super::ExtractError;

pub const HEADER_TOKENS: [&str; 3] = ["MONTH", "UNITS", "BILL"];
const MIN_CELLS: usize = 4;

fn is_layout_row(row: ElementRef<'_>) -> bool {
    row.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|e| e.value().name() == "tr")
}

fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name() == "td")
        .map(|c| text_of(c).trim().to_string())
        .collect()
}

/// Usage history rows, in document order.
///
/// The header is the first row whose text has all of [`HEADER_TOKENS`]
/// (rows wrapping a nested table are skipped, they only carry the header
/// text of their children). Every row after it, in any table, is a
/// candidate; rows with fewer than four cells or a blank month/units are
/// spacers and are dropped.
pub fn extract_history(document: &Html) -> Result<Vec<HistoryEntry>, ExtractError> {
    let row_sel = selector("tr")?;
    let rows: Vec<ElementRef<'_>> = document.select(&row_sel).collect();

    let header = rows.iter().position(|row| {
        if is_layout_row(*row) {
            return false;
        }
        let text = text_of(*row);
        HEADER_TOKENS.iter().all(|token| text.contains(token))
    });

    let Some(header) = header else {
        return Ok(Vec::new());
    };

    let entries = rows[header + 1..]
        .iter()
        .filter_map(|row| {
            let cells = row_cells(*row);
            if cells.len() < MIN_CELLS {
                return None;
            }
            let mut cells = cells.into_iter();
            let entry = HistoryEntry {
                month: cells.next().unwrap_or_default(),
                units: cells.next().unwrap_or_default(),
                bill: cells.next().unwrap_or_default(),
                payment: cells.next().unwrap_or_default(),
            };
            (!entry.month.is_empty() && !entry.units.is_empty()).then_some(entry)
        })
        .collect();

    Ok(entries)
}
