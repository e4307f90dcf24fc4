//! Spreadsheet export of selected dictionary rows

use crate::constants::*;
use crate::types::{DictionaryEntry, RowId};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No terms selected")]
    EmptySelection,

    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] XlsxError),
}

/// One spreadsheet row, already formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub term: String,
    pub definition: String,
    pub appears_in_model: &'static str,
    pub domain: String,
    pub standard: String,
}

impl ExportRow {
    fn from_entry(entry: &DictionaryEntry) -> Self {
        Self {
            term: entry.term.clone(),
            definition: entry.definition.clone(),
            appears_in_model: if entry.appears_in_model { GLYPH_YES } else { GLYPH_NO },
            domain: entry.domain.join(DOMAIN_DELIMITER),
            standard: entry.standard_or_fallback().to_string(),
        }
    }

    fn cells(&self) -> [&str; 5] {
        [
            &self.term,
            &self.definition,
            self.appears_in_model,
            &self.domain,
            &self.standard,
        ]
    }
}

/// Rows for every selected id, in dictionary order
pub fn build_rows(
    entries: &[DictionaryEntry],
    selection: &BTreeSet<RowId>,
) -> Result<Vec<ExportRow>, ExportError> {
    if selection.is_empty() {
        return Err(ExportError::EmptySelection);
    }
    Ok(entries
        .iter()
        .enumerate()
        .filter(|(i, _)| selection.contains(&RowId(*i)))
        .map(|(_, entry)| ExportRow::from_entry(entry))
        .collect())
}

fn build_workbook(rows: &[ExportRow]) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, title) in EXPORT_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    for (i, row) in rows.iter().enumerate() {
        for (col, cell) in row.cells().iter().enumerate() {
            sheet.write_string(i as u32 + 1, col as u16, *cell)?;
        }
    }

    sheet.set_column_width(0, 24)?;
    sheet.set_column_width(1, 60)?;
    sheet.set_column_width(2, 18)?;
    sheet.set_column_width(3, 28)?;
    sheet.set_column_width(4, 16)?;

    Ok(workbook)
}

/// Write the selected rows to `path`, returning how many rows were written
pub fn export_selection(
    entries: &[DictionaryEntry],
    selection: &BTreeSet<RowId>,
    path: &Path,
) -> Result<usize, ExportError> {
    let rows = build_rows(entries, selection)?;
    let mut workbook = build_workbook(&rows)?;
    workbook.save(path)?;
    info!(rows = rows.len(), path = %path.display(), "Exported dictionary selection");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbook_bytes(rows: &[ExportRow]) -> Vec<u8> {
        build_workbook(rows).unwrap().save_to_buffer().unwrap()
    }

    fn entry(term: &str, in_model: bool, domain: &[&str], standard: Option<&str>) -> DictionaryEntry {
        DictionaryEntry {
            term: term.to_string(),
            definition: format!("{} definition", term),
            appears_in_model: in_model,
            domain: domain.iter().map(|s| s.to_string()).collect(),
            standard: standard.map(str::to_string),
        }
    }

    fn sample() -> Vec<DictionaryEntry> {
        vec![
            entry("Customer", true, &["Sales", "CRM"], Some("ISO 8000")),
            entry("Invoice", false, &["Finance"], None),
            entry("Order", true, &[], None),
        ]
    }

    #[test]
    fn rows_follow_dictionary_order() {
        let selection: BTreeSet<RowId> = [RowId(2), RowId(0)].into_iter().collect();
        let rows = build_rows(&sample(), &selection).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].term, "Customer");
        assert_eq!(rows[0].appears_in_model, "✅");
        assert_eq!(rows[0].domain, "Sales, CRM");
        assert_eq!(rows[0].standard, "ISO 8000");
        assert_eq!(rows[1].term, "Order");
        assert_eq!(rows[1].domain, "");
        assert_eq!(rows[1].standard, "N/A");
    }

    #[test]
    fn absent_flag_and_standard_render_fallbacks() {
        let selection: BTreeSet<RowId> = [RowId(1)].into_iter().collect();
        let rows = build_rows(&sample(), &selection).unwrap();
        assert_eq!(rows[0].appears_in_model, "❌");
        assert_eq!(rows[0].standard, "N/A");
    }

    #[test]
    fn empty_selection_is_rejected() {
        let result = build_rows(&sample(), &BTreeSet::new());
        assert!(matches!(result, Err(ExportError::EmptySelection)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        assert!(export_selection(&sample(), &BTreeSet::new(), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn workbook_is_a_zip_container() {
        let selection: BTreeSet<RowId> = [RowId(0)].into_iter().collect();
        let rows = build_rows(&sample(), &selection).unwrap();
        let bytes = workbook_bytes(&rows);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let selection: BTreeSet<RowId> = (0..3).map(RowId).collect();

        let written = export_selection(&sample(), &selection, &path).unwrap();
        assert_eq!(written, 3);
        assert!(path.metadata().unwrap().len() > 0);
    }
}
