// Example upload files

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use clientrank_engine::normalize::DISPLAY_COLUMNS;
use clientrank_engine::WeightVector;

/// Sample rows: name, current client flag, five axis scores.
pub const SAMPLE_CLIENTS: [(&str, &str, [f64; 5]); 8] = [
    ("Northwind Traders", "Y", [90.0, 80.0, 70.0, 85.0, 60.0]),
    ("Contoso Ltd", "Y", [75.0, 70.0, 60.0, 65.0, 50.0]),
    ("Fabrikam", "N", [20.0, 85.0, 75.0, 70.0, 80.0]),
    ("Tailspin Toys", "Y", [60.0, 40.0, 30.0, 55.0, 40.0]),
    ("Litware", "N", [10.0, 60.0, 55.0, 45.0, 70.0]),
    ("Adventure Works", "Y", [45.0, 35.0, 80.0, 30.0, 20.0]),
    ("Proseware", "N", [5.0, 20.0, 40.0, 25.0, 30.0]),
    ("Wide World Importers", "N", [15.0, 10.0, 20.0, 15.0, 10.0]),
];

/// Write a template matching the file extension: `.xlsx` gets a weights row
/// above the header, `.csv` is header plus rows only.
pub fn write_template(path: &Path, weights: &WeightVector) -> Result<(), String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" => write_xlsx_template(path, weights),
        "csv" => write_csv_template(path),
        other => Err(format!(
            "cannot write a template as '.{other}'; use .xlsx or .csv"
        )),
    }
}

fn write_xlsx_template(path: &Path, weights: &WeightVector) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook
        .add_worksheet()
        .set_name("Clients")
        .map_err(|e| format!("Failed to create sheet: {}", e))?;

    // Row 1: weights above the axis columns
    for (offset, weight) in weights.as_array().iter().enumerate() {
        worksheet
            .write_number(0, (2 + offset) as u16, *weight)
            .map_err(|e| format!("Failed to write weight: {}", e))?;
    }

    // Row 2: header
    for (col, label) in DISPLAY_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(1, col as u16, *label, &header_format)
            .map_err(|e| format!("Failed to write header: {}", e))?;
    }

    for (idx, (name, current, axes)) in SAMPLE_CLIENTS.iter().enumerate() {
        let row = (idx + 2) as u32;
        worksheet
            .write_string(row, 0, *name)
            .map_err(|e| format!("Failed to write row {}: {}", row + 1, e))?;
        worksheet
            .write_string(row, 1, *current)
            .map_err(|e| format!("Failed to write row {}: {}", row + 1, e))?;
        for (offset, value) in axes.iter().enumerate() {
            worksheet
                .write_number(row, (2 + offset) as u16, *value)
                .map_err(|e| format!("Failed to write row {}: {}", row + 1, e))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))
}

fn write_csv_template(path: &Path) -> Result<(), String> {
    let mut writer = ::csv::Writer::from_path(path).map_err(|e| e.to_string())?;
    writer.write_record(DISPLAY_COLUMNS).map_err(|e| e.to_string())?;
    for (name, current, axes) in &SAMPLE_CLIENTS {
        let mut record = vec![name.to_string(), current.to_string()];
        record.extend(axes.iter().map(|v| v.to_string()));
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientrank_engine::{normalize, score};
    use tempfile::tempdir;

    #[test]
    fn xlsx_template_round_trips_with_weights() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.xlsx");
        let weights = WeightVector::new(40.0, 20.0, 10.0, 20.0, 10.0);
        write_template(&path, &weights).unwrap();

        let table = normalize(&crate::load(&path).unwrap()).unwrap();
        assert_eq!(table.row_count, SAMPLE_CLIENTS.len());
        assert_eq!(table.embedded_weights, Some(weights));
        assert_eq!(table.records[0].name, "Northwind Traders");

        let result = score(&table.records, &weights).unwrap();
        assert_eq!(result.clients.len(), SAMPLE_CLIENTS.len());
    }

    #[test]
    fn csv_template_has_no_weight_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.csv");
        write_template(&path, &WeightVector::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Client,Current Client,Current Work"));

        let table = normalize(&crate::load(&path).unwrap()).unwrap();
        assert_eq!(table.row_count, SAMPLE_CLIENTS.len());
        assert_eq!(table.embedded_weights, None);
        assert_eq!(table.records[7].current_work, 15.0);
    }

    #[test]
    fn other_extensions_rejected() {
        let dir = tempdir().unwrap();
        let err = write_template(&dir.path().join("t.ods"), &WeightVector::default()).unwrap_err();
        assert!(err.contains("'.ods'"));
    }
}
