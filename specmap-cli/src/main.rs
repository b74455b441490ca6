//! specmap command-line interface.
//!
//! Headless access to a spectral session: inspect a map, calibrate a lamp
//! reference, and export rows as calibrated spectra.
#![allow(clippy::uninlined_format_args, clippy::cast_precision_loss)]

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::info;
use specmap_algorithms::LampCalibrator;
use specmap_core::{
    CalibrationDraft, CalibrationEngine, Controller, Error, Event, FitDiagnostics, SessionConfig,
};
use specmap_io::TextLoader;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

type Session = Controller<TextLoader, LampCalibrator>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Core(#[from] Error),

    #[error("Nothing to export: pass --rows or --all")]
    NoRows,
}

/// Spectral map explorer: calibration and spectrum export.
#[derive(Parser)]
#[command(name = "specmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Session configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Calibration parameter overrides.
#[derive(Args, Debug, Default, Clone)]
struct CalibrationArgs {
    /// Center wavelength of the initial axis guess (nm)
    #[arg(long)]
    center: Option<f64>,

    /// Polynomial dimension of the fit
    #[arg(long)]
    dimension: Option<u32>,

    /// Lamp material; inferred from the reference file name when omitted
    #[arg(long)]
    material: Option<String>,

    /// Peak-shape function (Lorentzian, Gaussian, Centroid)
    #[arg(long)]
    function: Option<String>,

    /// Half-width of the peak search window (channels)
    #[arg(long)]
    search_width: Option<f64>,
}

impl CalibrationArgs {
    fn apply(&self, draft: &mut CalibrationDraft) {
        if let Some(center) = self.center {
            draft.center = Some(center);
        }
        if let Some(dimension) = self.dimension {
            draft.dimension = Some(dimension);
        }
        if let Some(material) = &self.material {
            draft.material = Some(material.clone());
        }
        if let Some(function) = &self.function {
            draft.function = Some(function.clone());
        }
        if let Some(width) = self.search_width {
            draft.search_width = Some(width);
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a spectral map
    Info {
        /// Input map file
        input: PathBuf,

        /// Reference spectrum to check against the map
        #[arg(short, long)]
        reference: Option<PathBuf>,
    },

    /// Calibrate the wavelength axis against a lamp reference
    Calibrate {
        /// Reference spectrum file
        reference: PathBuf,

        /// Map whose channel count must match the reference
        #[arg(short, long)]
        map: Option<PathBuf>,

        #[command(flatten)]
        calibration: CalibrationArgs,

        /// Print the fit as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export map rows as individual spectrum files
    Export {
        /// Input map file
        input: PathBuf,

        /// Output folder
        #[arg(short, long)]
        output: PathBuf,

        /// Rows to export, comma separated, in order
        #[arg(long, value_delimiter = ',', conflicts_with = "all")]
        rows: Vec<usize>,

        /// Export every row
        #[arg(long)]
        all: bool,

        /// Reference spectrum, recorded in the header
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Calibrate against the reference before exporting
        #[arg(long, requires = "reference")]
        calibrate: bool,

        #[command(flatten)]
        calibration: CalibrationArgs,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let mut session = Session::new(&config, TextLoader, LampCalibrator::default());

    match cli.command {
        Commands::Info { input, reference } => {
            session.handle(Event::LoadMap(input.clone()))?;
            let state = session.session();
            let map = state.map().ok_or(Error::NoMap)?;
            let (min, max) = map.value_range();

            println!("File: {}", input.display());
            println!("Rows: {}", map.row_count());
            println!("Channels: {}", map.channel_count());
            println!("Value range: {} - {}", min, max);

            if let Some(reference) = reference {
                session.handle(Event::LoadReference(reference.clone()))?;
                let state = session.session();
                let channels = state.reference().map_or(0, |r| r.channel_count());
                println!("Reference: {}", reference.display());
                println!("Reference channels: {}", channels);
                if channels != map_channels(&session) {
                    println!("Warning: reference and map channel counts differ");
                }
                println!(
                    "Material: {}",
                    state.draft().material.as_deref().unwrap_or("-")
                );
            }
        }

        Commands::Calibrate {
            reference,
            map,
            calibration,
            json,
        } => {
            if let Some(map) = map {
                session.handle(Event::LoadMap(map))?;
            }
            session.handle(Event::LoadReference(reference))?;
            calibration.apply(session.session_mut().draft_mut());
            session.handle(Event::Calibrate)?;

            let state = session.session();
            let fit = state.last_fit().cloned().unwrap_or_default();
            if json {
                println!("{}", serde_json::to_string_pretty(&fit_json(&session, &fit))?);
            } else {
                print_fit(&state.calibration_descriptor(), &fit);
            }
        }

        Commands::Export {
            input,
            output,
            rows,
            all,
            reference,
            calibrate,
            calibration,
        } => {
            if rows.is_empty() && !all {
                return Err(CliError::NoRows);
            }
            session.handle(Event::LoadMap(input))?;
            if let Some(reference) = reference {
                session.handle(Event::LoadReference(reference))?;
            }
            if calibrate {
                calibration.apply(session.session_mut().draft_mut());
                session.handle(Event::Calibrate)?;
                info!("exporting with {}", session.session().calibration_descriptor());
            }

            if all {
                session.handle(Event::AddAll)?;
            } else {
                queue_rows(&mut session, &rows)?;
            }

            fs::create_dir_all(&output)?;
            let summary = session.export(Some(&output))?;
            println!(
                "Exported {} spectra to {}",
                summary.written.len(),
                output.display()
            );
            if summary.overwritten > 0 {
                println!("Overwritten duplicates: {}", summary.overwritten);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let text = fs::read_to_string(path)?;
    let config: SessionConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

fn map_channels(session: &Session) -> usize {
    session.session().map().map_or(0, |m| m.channel_count())
}

/// Queue `rows` in the given order, duplicates included.
fn queue_rows(session: &mut Session, rows: &[usize]) -> Result<()> {
    let row_count = session.session().map().ok_or(Error::NoMap)?.row_count();
    for &row in rows {
        if row >= row_count {
            return Err(Error::RowOutOfRange { row, row_count }.into());
        }
        let state = session.session_mut();
        state.move_to(row);
        state.add_current();
    }
    Ok(())
}

fn print_fit(descriptor: &str, fit: &FitDiagnostics) {
    println!("Calibration: {}", descriptor);
    println!(
        "{:<12} | {:<14} | {:<12}",
        "Channel", "Wavelength (nm)", "Residual (nm)"
    );
    println!("{:-<46}", "");
    for peak in &fit.peaks {
        println!(
            "{:<12.3} | {:<15.3} | {:<12.4}",
            peak.channel, peak.wavelength, peak.residual
        );
    }
    let coefficients: Vec<String> = fit.coefficients.iter().map(|c| format!("{c:.6e}")).collect();
    println!("Coefficients: [{}]", coefficients.join(", "));
    println!("RMS: {:.4} nm", fit.rms);
}

fn fit_json(session: &Session, fit: &FitDiagnostics) -> serde_json::Value {
    let state = session.session();
    serde_json::json!({
        "calibration": state.calibration_descriptor(),
        "reference": state.reference_path().map(|p| p.display().to_string()),
        "materials": session.engine().materials(),
        "coefficients": fit.coefficients,
        "rms": fit.rms,
        "peaks": fit.peaks.iter().map(|p| serde_json::json!({
            "channel": p.channel,
            "wavelength": p.wavelength,
            "residual": p.residual,
        })).collect::<Vec<_>>(),
    })
}
