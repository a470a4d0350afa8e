// File I/O: client ranking uploads in, templates and ranked tables out

pub mod csv;
pub mod export;
pub mod template;
pub mod xlsx;

use std::path::Path;

use clientrank_engine::{normalize, NormalizationError, NormalizedTable, RawTable};

/// Container type of an upload, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text. `None` sniffs the delimiter.
    Delimited(Option<u8>),
    /// Excel / OpenDocument workbook.
    Spreadsheet,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, NormalizationError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(Self::Delimited(None)),
            "tsv" | "tab" => Ok(Self::Delimited(Some(b'\t'))),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Spreadsheet),
            "" => Err(NormalizationError::parse(format!(
                "{}: no file extension; expected .csv, .tsv, .xlsx, .xls or .ods",
                path.display()
            ))),
            other => Err(NormalizationError::parse(format!(
                "{}: unsupported file type '.{other}'; expected .csv, .tsv, .xlsx, .xls or .ods",
                path.display()
            ))),
        }
    }
}

/// Read an upload into a raw table (first sheet for workbooks).
pub fn load(path: &Path) -> Result<RawTable, NormalizationError> {
    load_sheet(path, None)
}

/// Read an upload, choosing a named sheet for workbooks.
pub fn load_sheet(path: &Path, sheet: Option<&str>) -> Result<RawTable, NormalizationError> {
    let format = SourceFormat::from_path(path)?;
    log::debug!("loading {} as {:?}", path.display(), format);
    match format {
        SourceFormat::Delimited(delimiter) => crate::csv::load(path, delimiter),
        SourceFormat::Spreadsheet => crate::xlsx::load(path, sheet),
    }
}

/// Read and normalize in one step.
pub fn load_and_normalize(path: &Path, sheet: Option<&str>) -> Result<NormalizedTable, NormalizationError> {
    let table = load_sheet(path, sheet)?;
    normalize(&table)
}
