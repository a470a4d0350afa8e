// Text and JSON rendering of a scoring result

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use clientrank_engine::aggregate::DistributionStats;
use clientrank_engine::normalize::DISPLAY_COLUMNS;
use clientrank_engine::{ScoringResult, Tier, WeightVector};

/// Where the raw weights for a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightSource {
    Flag,
    File,
    Config,
    Default,
}

#[derive(Debug, Serialize)]
pub struct Meta {
    pub engine_version: &'static str,
    pub generated_at: String,
    pub source: String,
}

impl Meta {
    pub fn new(source: &Path) -> Self {
        Self {
            engine_version: env!("CARGO_PKG_VERSION"),
            generated_at: chrono::Utc::now().to_rfc3339(),
            source: source.display().to_string(),
        }
    }
}

/// `crank score --json` output. Always carries every client; `--top` only
/// affects the text table.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub meta: Meta,
    pub weight_source: WeightSource,
    pub raw_weights: WeightVector,
    pub boundaries: [String; 4],
    #[serde(flatten)]
    pub result: &'a ScoringResult,
}

/// Rendering knobs shared by the text sections.
#[derive(Debug, Clone, Copy)]
pub struct TextOptions {
    /// Detail rows to show; 0 shows all.
    pub top: usize,
    pub decimals: usize,
}

pub fn render_text(result: &ScoringResult, source: WeightSource, opts: TextOptions) -> String {
    let mut out = String::new();
    out.push_str(&weights_line(&result.weights, source));
    out.push('\n');
    out.push_str(&tier_table(result, opts.decimals));
    out.push('\n');
    out.push_str(&boundary_lines(result, opts.decimals));
    out.push('\n');
    out.push_str(&status_table(result, opts.decimals));
    out.push('\n');
    out.push_str(&detail_table(result, opts));
    out
}

/// Normalized fractions as percentages, one decimal.
pub fn weights_line(fractions: &WeightVector, source: WeightSource) -> String {
    let parts: Vec<String> = DISPLAY_COLUMNS[2..]
        .iter()
        .zip(fractions.as_array())
        .map(|(label, w)| format!("{label} {:.1}%", w * 100.0))
        .collect();
    let origin = match source {
        WeightSource::Flag => "--weights",
        WeightSource::File => "file",
        WeightSource::Config => "config",
        WeightSource::Default => "defaults",
    };
    format!("Weights ({origin}): {}\n", parts.join(", "))
}

pub fn tier_table(result: &ScoringResult, decimals: usize) -> String {
    let label_width = Tier::ALL.iter().map(|t| t.label().len()).max().unwrap_or(0);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<label_width$}  {:>7}  {:>8}  {:>8}  {:>8}",
        "Tier", "Clients", "Min", "Max", "Mean"
    );
    for summary in &result.tiers {
        let _ = writeln!(
            out,
            "{:<label_width$}  {:>7}  {:>8}  {:>8}  {:>8}",
            summary.tier.label(),
            summary.count,
            opt(summary.min, decimals),
            opt(summary.max, decimals),
            opt(summary.mean, decimals),
        );
    }
    out
}

pub fn boundary_lines(result: &ScoringResult, decimals: usize) -> String {
    let mut out = String::from("Boundaries\n");
    for line in result.boundary_descriptions(decimals) {
        let _ = writeln!(out, "  {line}");
    }
    out
}

/// Box-plot numbers for current versus non-current clients.
pub fn status_table(result: &ScoringResult, decimals: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<11}  {:>5}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
        "Status", "Count", "Min", "Q1", "Median", "Q3", "Max", "Mean", "Std Dev"
    );
    let rows: [(&str, &DistributionStats); 2] = [
        ("Current", &result.status_split.current),
        ("Non-current", &result.status_split.non_current),
    ];
    for (label, stats) in rows {
        let _ = writeln!(
            out,
            "{:<11}  {:>5}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
            label,
            stats.count,
            opt(stats.min, decimals),
            opt(stats.q1, decimals),
            opt(stats.median, decimals),
            opt(stats.q3, decimals),
            opt(stats.max, decimals),
            opt(stats.mean, decimals),
            opt(stats.std_dev, decimals),
        );
    }
    out
}

pub fn detail_table(result: &ScoringResult, opts: TextOptions) -> String {
    let shown = if opts.top == 0 {
        result.clients.len()
    } else {
        opts.top.min(result.clients.len())
    };
    let rows = &result.clients[..shown];
    let name_width = rows.iter().map(|c| c.name().chars().count()).max().unwrap_or(0).max(6);
    let tier_width = Tier::ALL.iter().map(|t| t.label().len()).max().unwrap_or(0);
    let decimals = opts.decimals;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<name_width$}  {:>8}  {:<tier_width$}  {}",
        "Rank", "Client", "Score", "Tier", "Current Client"
    );
    for client in rows {
        let _ = writeln!(
            out,
            "{:>4}  {:<name_width$}  {:>8.decimals$}  {:<tier_width$}  {}",
            client.rank,
            client.name(),
            client.score,
            client.tier.label(),
            client.record.current_client.as_str(),
        );
    }
    if shown < result.clients.len() {
        let _ = writeln!(out, "... {} more", result.clients.len() - shown);
    }
    out
}

fn opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "-".to_string(),
    }
}
