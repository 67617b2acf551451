use std::f64::consts::PI;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use coav::config::{ConfigError, DetectConfig};
use coav::detection::{build_histogram, ParamsError};
use coav::io::{self, LoadError};
use coav::{DepthFrame, Detector, Obstacle};
use log::info;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "coav", version, about = "Obstacle detection on depth images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect obstacles in one depth frame and print them as JSON.
    Detect {
        #[command(flatten)]
        input: InputArgs,
        /// Use the binary front detector instead of the polar histogram.
        #[arg(long)]
        simple: bool,
    },
    /// Print the per-slice polar histogram of one depth frame as JSON.
    Histogram {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Depth image: 16-bit PNG, or a raw little-endian u16 dump with `--raw`.
    depth: PathBuf,
    /// JSON config with `camera`, `detector` and `simple` sections.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Treat the input as raw samples of the given size, e.g. `640x480`.
    #[arg(long, value_name = "WxH", value_parser = parse_dims)]
    raw: Option<(usize, usize)>,
    /// Write JSON here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(long)]
    pretty: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Serialize)]
struct ObstacleReport<'a> {
    width: usize,
    height: usize,
    obstacles: &'a [Obstacle],
}

#[derive(Serialize)]
struct AheadReport {
    width: usize,
    height: usize,
    ahead: bool,
}

#[derive(Serialize)]
struct HistogramReport {
    width: usize,
    height: usize,
    fixed_step: f64,
    rows: [usize; 2],
    slice_pixel_count: usize,
    slices: Vec<SliceReport>,
}

#[derive(Serialize)]
struct SliceReport {
    azimuth: f64,
    range: f64,
    near: u32,
}

fn parse_dims(s: &str) -> Result<(usize, usize), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got `{s}`"))?;
    let w = w.trim().parse().map_err(|e| format!("bad width `{w}`: {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("bad height `{h}`: {e}"))?;
    Ok((w, h))
}

#[cfg(feature = "tracing")]
fn init_logging() {
    coav::core::init_tracing(false);
}

#[cfg(not(feature = "tracing"))]
fn init_logging() {
    let _ = coav::core::init_from_env(log::LevelFilter::Warn);
}

fn load_config(path: Option<&Path>) -> Result<DetectConfig, ConfigError> {
    match path {
        Some(path) => DetectConfig::load(path),
        None => Ok(DetectConfig::default()),
    }
}

fn load_frame(input: &InputArgs, config: &DetectConfig) -> Result<DepthFrame, LoadError> {
    let frame = match input.raw {
        Some((w, h)) => io::load_depth_raw(&input.depth, w, h, &config.camera)?,
        None => io::load_depth_png(&input.depth, &config.camera)?,
    };
    info!(
        "{}: {}x{} frame",
        input.depth.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

fn emit<T: Serialize>(input: &InputArgs, value: &T) -> Result<(), CliError> {
    let mut text = if input.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');

    let (path, result) = match &input.output {
        Some(path) => (path.display().to_string(), std::fs::write(path, &text)),
        None => (
            "stdout".to_string(),
            std::io::stdout().lock().write_all(text.as_bytes()),
        ),
    };
    result.map_err(|source| CliError::Write { path, source })
}

fn detect(input: &InputArgs, simple: bool) -> Result<(), CliError> {
    let config = load_config(input.config.as_deref())?;
    let frame = load_frame(input, &config)?;
    let (width, height) = (frame.width, frame.height);

    if simple {
        let mut detector = config.simple_detector()?;
        let ahead = detector.detect(&frame).first().copied().unwrap_or(false);
        emit(input, &AheadReport { width, height, ahead })
    } else {
        let mut detector = config.polar_hist_detector()?;
        let obstacles = detector.detect(&frame);
        info!("{} obstacle(s)", obstacles.len());
        emit(input, &ObstacleReport { width, height, obstacles })
    }
}

fn histogram(input: &InputArgs) -> Result<(), CliError> {
    let config = load_config(input.config.as_deref())?;
    config.detector.validate()?;
    let frame = load_frame(input, &config)?;

    let report = match build_histogram(&frame, &config.detector) {
        Some(hist) => {
            let max_azimuth = 0.5 * (hist.hfov + PI);
            let slices = hist
                .ranges
                .iter()
                .zip(&hist.density_count)
                .enumerate()
                .map(|(i, (&range, &near))| SliceReport {
                    azimuth: max_azimuth - (i as f64 + 0.5) * hist.fixed_step,
                    range,
                    near,
                })
                .collect();
            HistogramReport {
                width: frame.width,
                height: frame.height,
                fixed_step: hist.fixed_step,
                rows: [hist.rows.start, hist.rows.end],
                slice_pixel_count: hist.slice_pixel_count(),
                slices,
            }
        }
        None => HistogramReport {
            width: frame.width,
            height: frame.height,
            fixed_step: 0.0,
            rows: [0, 0],
            slice_pixel_count: 0,
            slices: Vec::new(),
        },
    };
    emit(input, &report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match &cli.command {
        Command::Detect { input, simple } => detect(input, *simple),
        Command::Histogram { input } => histogram(input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
