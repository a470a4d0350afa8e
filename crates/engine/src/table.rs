//! Raw tabular input as handed over by the ingestion layer.
//!
//! Cells keep the type the container reported, so the header heuristic can
//! tell a numeric label from a text one.

use serde::Serialize;

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Cell::Number(_))
    }

    /// Display text. Integral numbers render without a fractional part.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
            Cell::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

/// Format integers without decimals, everything else as-is.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A header row plus data rows. Rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<Cell>,
    pub rows: Vec<Vec<Cell>>,
    /// Row found above the real header in spreadsheets (usually weights).
    pub metadata_row: Option<Vec<Cell>>,
}

impl RawTable {
    /// Delimited text: the first non-blank row is always the header.
    pub fn from_delimited(grid: Vec<Vec<Cell>>) -> Self {
        Self::split(grid, false)
    }

    /// Spreadsheet grid: if any label in the first row is numeric, that row
    /// is metadata and the next row is the real header.
    pub fn from_spreadsheet(grid: Vec<Vec<Cell>>) -> Self {
        let has_metadata = grid
            .iter()
            .find(|row| !is_blank_row(row))
            .is_some_and(|row| row.iter().any(Cell::is_number));
        if has_metadata {
            log::debug!("first spreadsheet row has numeric labels; using row 2 as header");
        }
        Self::split(grid, has_metadata)
    }

    fn split(grid: Vec<Vec<Cell>>, metadata: bool) -> Self {
        let mut rows = grid.into_iter().skip_while(|row| is_blank_row(row));
        let metadata_row = if metadata { rows.next() } else { None };
        let headers = rows.next().unwrap_or_default();
        let rows = rows.filter(|row| !is_blank_row(row)).collect();
        Self { headers, rows, metadata_row }
    }

    /// Header labels as text, in column order.
    pub fn header_labels(&self) -> Vec<String> {
        self.headers.iter().map(Cell::to_text).collect()
    }

    /// Cell at (data row, column); missing cells of ragged rows read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

fn is_blank_row(row: &[Cell]) -> bool {
    row.iter().all(Cell::is_blank)
}
