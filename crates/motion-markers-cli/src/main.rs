//! motion-markers CLI: scan a folder of rendered frames and write one CSV
//! track per marker color.

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use motion_markers::extract::run_extraction;
use motion_markers::{MissingCorePolicy, TrackerConfig, VerticalOrigin};
use std::path::PathBuf;
use std::process::ExitCode;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(name = "motion-markers")]
#[command(
    about = "Extract per-marker motion tracks (meters, timecoded) from a transparent frame sequence"
)]
#[command(version)]
struct Cli {
    /// Folder with frames named like `name.0042.png`.
    folder: PathBuf,

    /// Directory the `out_<color>.csv` files are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// JSON tracker config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames per second of the sequence.
    #[arg(long)]
    fps: Option<u32>,

    /// Scale from pixels to meters.
    #[arg(long)]
    pixels_per_meter: Option<f64>,

    /// Grid step and patch side in pixels (markers must fit in one patch).
    #[arg(long)]
    patch_size: Option<usize>,

    /// Edge the metric y axis starts from.
    #[arg(long, value_enum)]
    origin: Option<OriginArg>,

    /// Drop detections that have no fully opaque pixel instead of filing
    /// them under color `0`.
    #[arg(long)]
    skip_missing_core: bool,

    /// Fixed number of decimals for x/y (default: shortest exact form).
    #[arg(long)]
    precision: Option<usize>,

    /// Write a JSON run report here.
    #[arg(long)]
    report: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevelArg::Info)]
    log_level: LogLevelArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OriginArg {
    Bottom,
    Top,
}

impl From<OriginArg> for VerticalOrigin {
    fn from(value: OriginArg) -> Self {
        match value {
            OriginArg::Bottom => VerticalOrigin::Bottom,
            OriginArg::Top => VerticalOrigin::Top,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(value: LogLevelArg) -> Self {
        match value {
            LogLevelArg::Off => LevelFilter::Off,
            LogLevelArg::Error => LevelFilter::Error,
            LogLevelArg::Warn => LevelFilter::Warn,
            LogLevelArg::Info => LevelFilter::Info,
            LogLevelArg::Debug => LevelFilter::Debug,
            LogLevelArg::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn tracker_config(&self) -> CliResult<TrackerConfig> {
        let mut config = match &self.config {
            Some(path) => TrackerConfig::load_json(path)
                .map_err(|e| format!("failed to read config {}: {e}", path.display()))?,
            None => TrackerConfig::default(),
        };
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(ppm) = self.pixels_per_meter {
            config.pixels_per_meter = ppm;
        }
        if let Some(size) = self.patch_size {
            config.scan.patch_size = size;
        }
        if let Some(origin) = self.origin {
            config.vertical_origin = origin.into();
        }
        if self.skip_missing_core {
            config.scan.missing_core = MissingCorePolicy::Skip;
        }
        if self.precision.is_some() {
            config.csv.precision = self.precision;
        }
        Ok(config)
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LogLevelArg) -> CliResult<()> {
    motion_markers::core::init_with_level(level.into())?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(_level: LogLevelArg) -> CliResult<()> {
    motion_markers::core::init_tracing(false);
    Ok(())
}

fn run(cli: &Cli) -> CliResult<()> {
    let config = cli.tracker_config()?;
    let run = run_extraction(&cli.folder, &config)?;

    std::fs::create_dir_all(&cli.out_dir)
        .map_err(|e| format!("cannot create {}: {e}", cli.out_dir.display()))?;
    let written = run.export(&cli.out_dir, &config)?;
    log::info!(
        "wrote {} track files to {}",
        written.len(),
        cli.out_dir.display()
    );

    if let Some(path) = &cli.report {
        let mut report = run.report(&config);
        report.set_csv_paths(&written);
        report
            .write_json(path)
            .map_err(|e| format!("failed to write report {}: {e}", path.display()))?;
        log::info!("report written to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.log_level) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
