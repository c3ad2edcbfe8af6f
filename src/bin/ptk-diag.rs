// ptk-diag - fixture replay harness CLI
//
// Replays JSON fixtures of estimator output through the tracker so the
// hysteresis thresholds and noise captures can be inspected offline,
// without a host application attached. The `replay` report lines use the
// same shape as the per-tick session log the visualizer writes.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use pitch_tracker::{AppConfig, EstimatorFrame, NoiseCalibrator, NoteStabilizer, TrackerSession};

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ptk-diag error: {err:?}");
            ExitCode::from(1)
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ptk-diag", about = "Pitch tracker fixture replay CLI")]
struct Cli {
    /// Path to a JSON config file (defaults are used when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn execute(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => AppConfig::load_from_file(path),
            None => AppConfig::default(),
        };

        match self.command {
            Command::Replay(args) => replay_command(args, &config),
            Command::Calibrate(args) => calibrate_command(args, &config),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a frame fixture through a full tracker session.
    Replay(ReplayArgs),
    /// Average a spectrum fixture into a noise profile file.
    Calibrate(CalibrateArgs),
}

#[derive(Args, Debug, Clone)]
struct ReplayArgs {
    /// Path to a JSON array of per-tick frames.
    #[arg(long)]
    fixture: PathBuf,
    /// Arm the noise capture for the whole replay.
    #[arg(long, default_value_t = false)]
    armed: bool,
    /// Output format for the per-tick report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    format: ReportFormat,
}

#[derive(Args, Debug, Clone)]
struct CalibrateArgs {
    /// Path to a JSON array of spectra (arrays of floats).
    #[arg(long)]
    fixture: PathBuf,
    /// Destination file for the noise profile JSON.
    #[arg(long)]
    output: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ReportFormat {
    Table,
    Json,
}

/// One fixture tick
///
/// `frequency` must be present but may be null (no pitch detected). A
/// missing spectrum is replayed as all-zero bins so pure note fixtures
/// don't have to spell out silence.
#[derive(Debug, Deserialize)]
struct FixtureFrame {
    frequency: Option<f32>,
    #[serde(default)]
    spectrum: Option<Vec<f32>>,
    #[serde(default = "default_frequency_min")]
    frequency_min: f32,
    #[serde(default = "default_frequency_max")]
    frequency_max: f32,
}

fn default_frequency_min() -> f32 {
    40.0
}

fn default_frequency_max() -> f32 {
    600.0
}

fn replay_command(args: ReplayArgs, config: &AppConfig) -> Result<()> {
    let contents = fs::read_to_string(&args.fixture)
        .with_context(|| format!("failed to read fixture {:?}", args.fixture))?;
    let frames: Vec<FixtureFrame> =
        serde_json::from_str(&contents).context("fixture is not a JSON array of frames")?;
    if frames.is_empty() {
        bail!("fixture contains no frames");
    }

    let stabilizer = NoteStabilizer::new(config.stabilizer)?;
    let calibrator = NoiseCalibrator::new(config.calibration.spectrum_size)?;
    let mut session = TrackerSession::new(stabilizer, calibrator);
    session.set_armed(args.armed);

    let silent_spectrum = vec![0.0; config.calibration.spectrum_size];
    for fixture_frame in &frames {
        let frame = EstimatorFrame {
            frequency: fixture_frame.frequency.unwrap_or(f32::NAN),
            spectrum: fixture_frame
                .spectrum
                .as_deref()
                .unwrap_or(&silent_spectrum),
            frequency_min: fixture_frame.frequency_min,
            frequency_max: fixture_frame.frequency_max,
        };
        let report = session
            .process_frame(&frame)
            .with_context(|| format!("frame {} rejected", session.tick() + 1))?;

        match args.format {
            ReportFormat::Table => {
                println!("{} {}, {:.1} Hz", report.tick, report.label(), report.frequency);
            }
            ReportFormat::Json => {
                println!("{}", serde_json::to_string(&report)?);
            }
        }
    }

    if args.armed {
        let profile = session.noise_profile();
        println!(
            "noise capture: {} samples over {} bins",
            profile.sample_count, profile.spectrum_size
        );
    }

    Ok(())
}

fn calibrate_command(args: CalibrateArgs, config: &AppConfig) -> Result<()> {
    let contents = fs::read_to_string(&args.fixture)
        .with_context(|| format!("failed to read fixture {:?}", args.fixture))?;
    let spectra: Vec<Vec<f32>> =
        serde_json::from_str(&contents).context("fixture is not a JSON array of spectra")?;
    if spectra.is_empty() {
        bail!("fixture contains no spectra");
    }

    let mut calibrator = NoiseCalibrator::new(config.calibration.spectrum_size)?;
    calibrator.set_armed(true);
    for (index, spectrum) in spectra.iter().enumerate() {
        calibrator
            .accumulate(spectrum)
            .with_context(|| format!("spectrum {} rejected", index))?;
    }
    calibrator.set_armed(false);

    let profile = calibrator.profile();
    let json = serde_json::to_string_pretty(&profile)?;
    fs::write(&args.output, json)
        .with_context(|| format!("failed to write profile {:?}", args.output))?;

    println!(
        "wrote noise profile: {} samples over {} bins -> {}",
        profile.sample_count,
        profile.spectrum_size,
        args.output.display()
    );

    Ok(())
}
