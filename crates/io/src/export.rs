// Ranked table export

use std::io::Write;
use std::path::Path;

use clientrank_engine::ScoringResult;

pub const RANKED_HEADERS: [&str; 5] = ["Rank", "Client", "Score", "Tier", "Current Client"];

/// Write the detail table (rank order) as CSV to any writer.
pub fn write_ranked<W: Write>(writer: W, result: &ScoringResult, decimals: usize) -> Result<(), String> {
    let mut writer = ::csv::Writer::from_writer(writer);
    writer.write_record(RANKED_HEADERS).map_err(|e| e.to_string())?;
    for client in &result.clients {
        writer
            .write_record([
                client.rank.to_string(),
                client.name().to_string(),
                format!("{:.*}", decimals, client.score),
                client.tier.label().to_string(),
                client.record.current_client.as_str().to_string(),
            ])
            .map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())
}

pub fn write_ranked_csv(path: &Path, result: &ScoringResult, decimals: usize) -> Result<(), String> {
    let file = std::fs::File::create(path)
        .map_err(|e| format!("cannot create {}: {e}", path.display()))?;
    write_ranked(file, result, decimals)
}
