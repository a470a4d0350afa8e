// CSV/TSV import

use std::io::Read;
use std::path::Path;

use clientrank_engine::{Cell, NormalizationError, RawTable};

/// Load a delimited file. The first row is the header; no metadata-row
/// detection for flat text.
pub fn load(path: &Path, delimiter: Option<u8>) -> Result<RawTable, NormalizationError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(&content));
    Ok(RawTable::from_delimited(parse_grid(&content, delimiter)?))
}

// Comma last so it wins ties.
const DELIMITERS: [u8; 4] = [b'|', b';', b'\t', b','];

/// Pick a delimiter from the header line, the only line normalization
/// cannot do without. Candidates must split the header into more than one
/// field; among those, the one the next few data lines agree with wins,
/// then the one giving the widest header.
pub fn sniff_delimiter(content: &str) -> u8 {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let Some(header) = lines.next() else {
        return b',';
    };
    let data: Vec<&str> = lines.take(5).collect();

    DELIMITERS
        .into_iter()
        .filter_map(|delim| {
            let width = field_count(header, delim);
            if width < 2 {
                return None;
            }
            let agreeing = data.iter().filter(|l| field_count(l, delim) == width).count();
            Some((delim, (agreeing, width)))
        })
        .max_by_key(|(_, key)| *key)
        .map(|(delim, _)| delim)
        .unwrap_or(b',')
}

fn field_count(line: &str, delimiter: u8) -> usize {
    ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(|r| r.ok())
        .map(|r| r.len())
        .unwrap_or(1)
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, NormalizationError> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| NormalizationError::parse(format!("cannot open {}: {e}", path.display())))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| NormalizationError::parse(format!("cannot read {}: {e}", path.display())))?;
    Ok(decode(bytes))
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => match s.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => s,
        },
        Err(e) => {
            let bytes = e.into_bytes();
            // Excel on Windows exports CSV as Windows-1252
            log::warn!("file is not valid UTF-8; decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// Split delimited text into a grid of text cells. Blank fields become
/// [`Cell::Empty`]; numbers stay text until normalization coerces them.
pub fn parse_grid(content: &str, delimiter: u8) -> Result<Vec<Vec<Cell>>, NormalizationError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| NormalizationError::parse(format!("line {}: {e}", row_idx + 1)))?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        Cell::Empty
                    } else {
                        Cell::text(field)
                    }
                })
                .collect(),
        );
    }
    Ok(grid)
}
