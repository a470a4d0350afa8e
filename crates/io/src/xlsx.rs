// Excel / OpenDocument import (xlsx, xlsm, xls, xlsb, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use clientrank_engine::{Cell, NormalizationError, RawTable};

/// Load one worksheet (first by default). A first row with numeric labels is
/// treated as a metadata row and the second row becomes the header.
pub fn load(path: &Path, sheet: Option<&str>) -> Result<RawTable, NormalizationError> {
    Ok(RawTable::from_spreadsheet(read_grid(path, sheet)?))
}

/// Sheet names in workbook order.
pub fn sheet_names(path: &Path) -> Result<Vec<String>, NormalizationError> {
    let workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| NormalizationError::parse(format!("failed to open spreadsheet: {e}")))?;
    Ok(workbook.sheet_names().to_vec())
}

/// Typed cell grid of one worksheet, starting at the first used row.
pub fn read_grid(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<Cell>>, NormalizationError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| NormalizationError::parse(format!("failed to open spreadsheet: {e}")))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| {
                NormalizationError::parse(format!(
                    "sheet '{name}' not found (available: {})",
                    sheet_names.join(", ")
                ))
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| NormalizationError::parse("spreadsheet contains no sheets"))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| NormalizationError::parse(format!("failed to read sheet '{sheet_name}': {e}")))?;

    let (height, width) = range.get_size();
    log::debug!("sheet '{sheet_name}': {height} rows x {width} columns");

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
        // Serial date number; only meaningful if someone typed a date into
        // an axis column.
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::tempdir;

    fn write_sheet(path: &Path, rows: &[Vec<Cell>]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(s) => {
                        sheet.write_string(r as u32, c as u16, s).unwrap();
                    }
                    Cell::Number(n) => {
                        sheet.write_number(r as u32, c as u16, *n).unwrap();
                    }
                    Cell::Bool(b) => {
                        sheet.write_boolean(r as u32, c as u16, *b).unwrap();
                    }
                    Cell::Empty => {}
                }
            }
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn reads_typed_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("typed.xlsx");
        write_sheet(
            &path,
            &[
                vec![Cell::text("Client"), Cell::text("Current Work")],
                vec![Cell::text("Acme"), Cell::Number(42.5)],
            ],
        );
        let table = load(&path, None).unwrap();
        assert_eq!(table.header_labels(), vec!["Client", "Current Work"]);
        assert_eq!(table.rows[0][1], Cell::Number(42.5));
        assert!(table.metadata_row.is_none());
    }

    #[test]
    fn numeric_first_row_becomes_metadata() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weights.xlsx");
        write_sheet(
            &path,
            &[
                vec![Cell::Empty, Cell::Number(30.0)],
                vec![Cell::text("Client"), Cell::text("Current Work")],
                vec![Cell::text("Acme"), Cell::Number(7.0)],
            ],
        );
        let table = load(&path, None).unwrap();
        assert_eq!(table.header_labels(), vec!["Client", "Current Work"]);
        assert_eq!(table.rows.len(), 1);
        let meta = table.metadata_row.unwrap();
        assert!(meta.contains(&Cell::Number(30.0)));
    }

    #[test]
    fn unknown_sheet_lists_available() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one.xlsx");
        write_sheet(&path, &[vec![Cell::text("Client")]]);
        let err = load(&path, Some("Missing")).unwrap_err();
        assert!(err.to_string().contains("sheet 'Missing' not found"));
        assert!(err.to_string().contains("Sheet1"));
        assert_eq!(sheet_names(&path).unwrap(), vec!["Sheet1"]);
    }

    #[test]
    fn garbage_file_is_parse_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        assert!(matches!(load(&path, None), Err(NormalizationError::ParseFailure(_))));
    }
}
