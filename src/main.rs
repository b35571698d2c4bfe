//! dermatoglyph CLI: fingerprint pattern detection and ridge counting.

use clap::{Args, Parser, Subcommand, ValueEnum};
use dermatoglyph::api::{self, ApiRequest, CountRidgesResponse, DetectResponse};
use dermatoglyph::config::load_params;
use dermatoglyph::image::io::{load_grayscale_image, write_json_file};
use dermatoglyph::profile::{summarize, FingerRecord};
use dermatoglyph::{AnalysisInput, AnalyzerParams, FingerprintAnalyzer, Hand, ImageVariant, Point};
use serde::Serialize;
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "dermatoglyph")]
#[command(about = "Detect cores, deltas and pattern types in fingerprint images; count ridges")]
#[command(version)]
struct Cli {
    /// Analyzer parameters (JSON); missing fields keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect singular points and classify the pattern.
    Detect(DetectArgs),

    /// Count ridges between given cores and deltas.
    CountRidges(CountArgs),

    /// Process a JSON request file (one tagged request or an array).
    Request {
        /// Request file.
        #[arg(long)]
        file: PathBuf,
        /// Write responses here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Aggregate per-finger records (JSON array) into a profile.
    Profile {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    Raw,
    Filtered,
}

impl From<VariantArg> for ImageVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Raw => ImageVariant::Raw,
            VariantArg::Filtered => ImageVariant::Filtered,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HandArg {
    Left,
    Right,
}

impl From<HandArg> for Hand {
    fn from(h: HandArg) -> Self {
        match h {
            HandArg::Left => Hand::Left,
            HandArg::Right => Hand::Right,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct DetectArgs {
    /// Input fingerprint image.
    #[arg(long)]
    image: PathBuf,

    #[arg(long, value_enum, default_value_t = VariantArg::Filtered)]
    variant: VariantArg,

    /// Hand the finger belongs to (enables radial/ulnar loops with fine granularity).
    #[arg(long, value_enum)]
    hand: Option<HandArg>,

    /// Skip ridge counting between detected points.
    #[arg(long)]
    no_ridge_count: bool,

    /// Emit the full stage trace instead of the plain response.
    #[arg(long)]
    diagnostics: bool,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct CountArgs {
    #[arg(long)]
    image: PathBuf,

    #[arg(long, value_enum, default_value_t = VariantArg::Filtered)]
    variant: VariantArg,

    /// Core position as `x,y` (repeatable).
    #[arg(long = "core", value_parser = parse_point)]
    cores: Vec<Point>,

    /// Delta position as `x,y` (repeatable).
    #[arg(long = "delta", value_parser = parse_point)]
    deltas: Vec<Point>,

    #[arg(long)]
    out: Option<PathBuf>,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{s}'"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok(Point::new(x, y))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let params = match &cli.config {
        Some(path) => load_params(path)?,
        None => AnalyzerParams::default(),
    };
    let analyzer = FingerprintAnalyzer::new(params);

    match cli.command {
        Commands::Detect(args) => run_detect(&analyzer, &args),
        Commands::CountRidges(args) => run_count(&analyzer, &args),
        Commands::Request { file, out } => run_request(&analyzer, &file, out.as_deref()),
        Commands::Profile { file } => run_profile(&file),
    }
}

fn run_detect(analyzer: &FingerprintAnalyzer, args: &DetectArgs) -> CliResult<()> {
    log::info!("Loading image: {}", args.image.display());
    let gray = load_grayscale_image(&args.image)?;
    let input = AnalysisInput {
        variant: args.variant.into(),
        hand: args.hand.map(Hand::from),
        count_ridges: !args.no_ridge_count,
    };
    let report = analyzer.analyze_with_diagnostics(gray.as_view(), input)?;
    for line in report.trace.summary_lines() {
        log::info!("{line}");
    }
    if args.diagnostics {
        emit(&report, args.out.as_deref())
    } else {
        emit(&DetectResponse::from(report.result), args.out.as_deref())
    }
}

fn run_count(analyzer: &FingerprintAnalyzer, args: &CountArgs) -> CliResult<()> {
    let gray = load_grayscale_image(&args.image)?;
    let summary =
        analyzer.count_ridges(gray.as_view(), args.variant.into(), &args.cores, &args.deltas)?;
    emit(&CountRidgesResponse::from(summary), args.out.as_deref())
}

fn run_request(analyzer: &FingerprintAnalyzer, file: &Path, out: Option<&Path>) -> CliResult<()> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| -> CliError { format!("Failed to read {}: {e}", file.display()).into() })?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    if value.is_array() {
        let requests: Vec<ApiRequest> = serde_json::from_value(value)?;
        log::info!("Processing {} requests", requests.len());
        emit(&api::handle_batch(analyzer, &requests), out)
    } else {
        let request: ApiRequest = serde_json::from_value(value)?;
        emit(&api::handle(analyzer, &request), out)
    }
}

fn run_profile(file: &Path) -> CliResult<()> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| -> CliError { format!("Failed to read {}: {e}", file.display()).into() })?;
    let records: Vec<FingerRecord> = serde_json::from_str(&text)?;
    let profile = summarize(&records)?;
    emit(&profile, None)
}

fn emit<T: Serialize>(value: &T, out: Option<&Path>) -> CliResult<()> {
    match out {
        Some(path) => {
            write_json_file(path, value)?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
