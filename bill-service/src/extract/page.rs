use scraper::{ElementRef, Html, Selector};

use super::ExtractError;

/// A label's adjacent value longer than this is assumed to be a mis-guessed
/// row shape rather than a scalar, and the last sibling is read instead.
pub const VALUE_MAX_CHARS: usize = 50;

/// The meter reading sub-table keeps its values on the third row
/// (header, sub-header, values). The bill site has used this layout for years;
/// do not try to generalise it.
pub const READING_ROW_INDEX: usize = 2;

pub const NAME_ADDRESS_LABEL: &str = "NAME & ADDRESS";
pub const READING_TABLE_MARKER: &str = "PREVIOUS";

pub(crate) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector(format!("{css}: {e}")))
}

pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn closest<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == tag)
}

fn next_sibling_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

fn last_sibling_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let parent = el.parent()?;
    parent
        .children()
        .filter(|n| n.id() != el.id())
        .filter_map(ElementRef::wrap)
        .last()
}

/// A parsed bill page plus the selectors every lookup needs.
///
/// All lookups are read-only and independent of each other; asking for the
/// same label twice gives the same answer.
pub struct BillPage {
    document: Html,
    cell: Selector,
    row: Selector,
    body: Selector,
}

impl BillPage {
    pub fn parse(html: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            document: Html::parse_document(html),
            cell: selector("td")?,
            row: selector("tr")?,
            body: selector("body")?,
        })
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    /// Text a reader would see: the `<body>`, or the whole document when the
    /// page has no body element.
    pub fn visible_text(&self) -> String {
        match self.document.select(&self.body).next() {
            Some(body) => text_of(body),
            None => text_of(self.document.root_element()),
        }
    }

    /// Last `<td>` in document order whose text contains `label`.
    ///
    /// The bill page repeats section captions near the top; the cell that sits
    /// next to the real value is always the last occurrence. Outer layout cells
    /// also "contain" the label, but they precede their descendants, so the
    /// innermost cell wins.
    pub fn find_last_cell_containing(&self, label: &str) -> Option<ElementRef<'_>> {
        self.document
            .select(&self.cell)
            .filter(|c| text_of(*c).contains(label))
            .last()
    }

    /// Best-effort value for a `label -> value` cell pair. Empty when the label
    /// does not appear on the page.
    pub fn lookup_label(&self, label: &str) -> String {
        let Some(cell) = self.find_last_cell_containing(label) else {
            tracing::debug!(label, "label cell not found");
            return String::new();
        };

        let next = next_sibling_element(cell).map(text_of).unwrap_or_default();
        let next = next.trim();
        if !next.is_empty() && next.chars().count() <= VALUE_MAX_CHARS {
            return next.to_string();
        }

        last_sibling_element(cell)
            .map(|e| text_of(e).trim().to_string())
            .unwrap_or_default()
    }

    /// Name and address share the row after the `NAME & ADDRESS` caption: the
    /// first cell is the name and the whole row text is name plus address.
    /// The address is what is left after cutting every occurrence of the name
    /// out of the row text.
    pub fn name_and_address(&self) -> (String, String) {
        let next_row = self
            .find_last_cell_containing(NAME_ADDRESS_LABEL)
            .and_then(|cell| closest(cell, "tr"))
            .and_then(next_sibling_element);

        let Some(row) = next_row else {
            return (String::new(), String::new());
        };

        let name = row
            .select(&self.cell)
            .next()
            .map(|c| text_of(c).trim().to_string())
            .unwrap_or_default();

        let row_text = text_of(row);
        let address = if name.is_empty() {
            row_text
        } else {
            row_text.replace(&name, "")
        };

        (name, collapse_whitespace(&address))
    }

    /// `(previous, present)` meter readings from the reading sub-table.
    pub fn meter_readings(&self) -> (String, String) {
        let values_row = self
            .find_last_cell_containing(READING_TABLE_MARKER)
            .and_then(|cell| closest(cell, "table"))
            .and_then(|table| table.select(&self.row).nth(READING_ROW_INDEX));

        let Some(row) = values_row else {
            return (String::new(), String::new());
        };

        let mut cells = row.select(&self.cell).map(|c| text_of(c).trim().to_string());
        let previous = cells.next().unwrap_or_default();
        let present = cells.next().unwrap_or_default();
        (previous, present)
    }
}
