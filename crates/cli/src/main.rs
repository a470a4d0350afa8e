// ClientRank CLI - score, tier and rank clients from a spreadsheet upload

mod exit_codes;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use clientrank_config::{ConfigError, Settings};
use clientrank_engine::normalize::DISPLAY_COLUMNS;
use clientrank_engine::{NormalizationError, NormalizedTable, ScoringError, Session, WeightVector};

use exit_codes::{
    normalization_exit_code, scoring_exit_code, EXIT_CONFIG, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE,
};
use report::{JsonReport, Meta, TextOptions, WeightSource};

#[derive(Parser)]
#[command(name = "crank")]
#[command(about = "Rank clients by weighted score and sort them into four natural-breaks tiers")]
#[command(version)]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an upload and print tiers, boundaries and the ranked table
    #[command(after_help = "\
Weight precedence: --weights, then --use-file-weights (spreadsheet weight row),
then the settings file, then the defaults 30,25,15,25,5.

Examples:
  crank score clients.xlsx
  crank score clients.csv --weights 40,20,10,20,10
  crank score clients.xlsx --use-file-weights --top 10
  crank score clients.csv --json | jq '.tiers'
  crank score clients.csv --output ranked.csv")]
    Score {
        /// Upload to score (.csv, .tsv, .xlsx, .xls, .ods)
        file: PathBuf,

        /// Five comma-separated weights: current work, future work,
        /// difficulty, profitability, ease to distribute
        #[arg(long, short = 'w', value_name = "W1,W2,W3,W4,W5")]
        weights: Option<String>,

        /// Use the weight row above the header of a spreadsheet upload
        #[arg(long)]
        use_file_weights: bool,

        /// Settings file (default: <config dir>/clientrank/settings.toml)
        #[arg(long, env = "CLIENTRANK_CONFIG")]
        config: Option<PathBuf>,

        /// Override the tier boundary offset
        #[arg(long, value_name = "OFFSET")]
        boundary_offset: Option<f64>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Also write the ranked table as CSV
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Detail rows to print (0 = all)
        #[arg(long)]
        top: Option<usize>,

        /// Sheet name for multi-sheet workbooks
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Check that an upload has the required columns and numeric scores
    Check {
        file: PathBuf,

        /// Sheet name for multi-sheet workbooks
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Write an example upload (.xlsx with a weight row, or .csv)
    Template {
        output: PathBuf,

        /// Weights for the spreadsheet weight row (default: settings file)
        #[arg(long, short = 'w', value_name = "W1,W2,W3,W4,W5")]
        weights: Option<String>,

        /// Settings file (default: <config dir>/clientrank/settings.toml)
        #[arg(long, env = "CLIENTRANK_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Score {
            file,
            weights,
            use_file_weights,
            config,
            boundary_offset,
            json,
            output,
            top,
            sheet,
        } => cmd_score(ScoreArgs {
            file,
            weights,
            use_file_weights,
            config,
            boundary_offset,
            json,
            output,
            top,
            sheet,
        }),
        Commands::Check { file, sheet } => cmd_check(&file, sheet.as_deref()),
        Commands::Template { output, weights, config } => {
            cmd_template(&output, weights.as_deref(), config.as_deref())
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<NormalizationError> for CliError {
    fn from(err: NormalizationError) -> Self {
        let hint = match &err {
            NormalizationError::MissingColumns { .. } => Some(format!(
                "expected headers: {} (case and surrounding spaces ignored)",
                DISPLAY_COLUMNS.join(", ")
            )),
            NormalizationError::ParseFailure(_) => None,
        };
        Self { code: normalization_exit_code(&err), message: err.to_string(), hint }
    }
}

impl From<ScoringError> for CliError {
    fn from(err: ScoringError) -> Self {
        let hint = match &err {
            ScoringError::ZeroWeight => Some("pass e.g. --weights 30,25,15,25,5".to_string()),
            ScoringError::InvalidWeight { .. } => None,
            ScoringError::InsufficientData { .. } => {
                Some("add more clients, or check that scores are not all identical".to_string())
            }
        };
        Self { code: scoring_exit_code(&err), message: err.to_string(), hint }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self { code: EXIT_CONFIG, message: err.to_string(), hint: None }
            .with_hint(format!("settings file: {}", Settings::config_path().display()))
    }
}

// ---------------------------------------------------------------------------
// score
// ---------------------------------------------------------------------------

struct ScoreArgs {
    file: PathBuf,
    weights: Option<String>,
    use_file_weights: bool,
    config: Option<PathBuf>,
    boundary_offset: Option<f64>,
    json: bool,
    output: Option<PathBuf>,
    top: Option<usize>,
    sheet: Option<String>,
}

fn cmd_score(args: ScoreArgs) -> Result<(), CliError> {
    let flag_weights = args.weights.as_deref().map(parse_weights).transpose()?;
    let loaded = load_settings(args.config.as_deref())?;
    let settings = &loaded.settings;

    let mut options = settings.scoring;
    if let Some(offset) = args.boundary_offset {
        if !offset.is_finite() || offset < 0.0 {
            return Err(CliError::args(format!(
                "--boundary-offset must be a finite number >= 0, got {offset}"
            )));
        }
        options.boundary_offset = offset;
    }

    let table = clientrank_io::load_and_normalize(&args.file, args.sheet.as_deref())?;
    log::info!("loaded {} clients from {}", table.row_count, args.file.display());

    let (weights, source) =
        resolve_weights(flag_weights, args.use_file_weights, &table, &loaded)?;
    log::info!("weights {} from {:?}", weights, source);

    let session = Session::new(table).with_weights(weights).with_options(options);
    let result = session.recompute()?;

    let decimals = settings.report.decimals;
    if let Some(path) = &args.output {
        clientrank_io::export::write_ranked_csv(path, &result, decimals).map_err(CliError::io)?;
        log::info!("wrote ranked table to {}", path.display());
    }

    if args.json {
        let report = JsonReport {
            meta: Meta::new(&args.file),
            weight_source: source,
            raw_weights: weights,
            boundaries: result.boundary_descriptions(decimals),
            result: &result,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::io(format!("cannot serialize result: {e}")))?;
        println!("{json}");
    } else {
        let opts = TextOptions { top: args.top.unwrap_or(settings.report.top), decimals };
        print!("{}", report::render_text(&result, source, opts));
    }
    Ok(())
}

/// `--weights` > embedded row (when asked for) > settings file > defaults.
fn resolve_weights(
    flag: Option<WeightVector>,
    use_file_weights: bool,
    table: &NormalizedTable,
    loaded: &LoadedSettings,
) -> Result<(WeightVector, WeightSource), CliError> {
    if let Some(weights) = flag {
        return Ok((weights, WeightSource::Flag));
    }
    if use_file_weights {
        return match table.embedded_weights {
            Some(weights) => Ok((weights, WeightSource::File)),
            None => Err(CliError::args("--use-file-weights: the upload has no weight row")
                .with_hint("only spreadsheet uploads with numbers above the five score columns carry weights")),
        };
    }
    let weights = loaded.settings.weights;
    match loaded.loaded_from {
        Some(_) => Ok((weights, WeightSource::Config)),
        None => Ok((weights, WeightSource::Default)),
    }
}

fn parse_weights(raw: &str) -> Result<WeightVector, CliError> {
    let weights: WeightVector = raw
        .parse()
        .map_err(|e| CliError::args(format!("--weights: {e}")).with_hint("e.g. --weights 30,25,15,25,5"))?;
    if let Err(e) = weights.check_slider() {
        log::warn!("{e}; using the value as given");
    }
    Ok(weights)
}

/// Settings plus the file they were read from, `None` for built-in defaults.
struct LoadedSettings {
    settings: Settings,
    loaded_from: Option<PathBuf>,
}

fn load_settings(explicit: Option<&Path>) -> Result<LoadedSettings, CliError> {
    let (settings, loaded_from) = match explicit {
        Some(path) => {
            let settings = Settings::load_from(path).map_err(|e| {
                CliError::from(e).with_hint(format!("settings file: {}", path.display()))
            })?;
            (settings, Some(path.to_path_buf()))
        }
        None => Settings::load()?,
    };
    if let Some(path) = &loaded_from {
        log::info!("settings from {}", path.display());
    }
    Ok(LoadedSettings { settings, loaded_from })
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

fn cmd_check(file: &Path, sheet: Option<&str>) -> Result<(), CliError> {
    let table = clientrank_io::load_and_normalize(file, sheet)?;
    println!("Loaded {} clients", table.row_count);
    println!("Columns: {}", table.columns_found.join(", "));
    if let Some(weights) = table.embedded_weights {
        println!("Weight row: {weights}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// template
// ---------------------------------------------------------------------------

fn cmd_template(output: &Path, weights: Option<&str>, config: Option<&Path>) -> Result<(), CliError> {
    let weights = match weights {
        Some(raw) => parse_weights(raw)?,
        None => load_settings(config)?.settings.weights,
    };
    clientrank_io::template::write_template(output, &weights).map_err(CliError::io)?;
    println!("Wrote {}", output.display());
    Ok(())
}
