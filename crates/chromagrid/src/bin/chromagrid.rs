//! chromagrid CLI: calibrate photographed color panels.

use std::path::PathBuf;

use chromagrid::color::{classify_rgb, HsvSample};
use chromagrid::detect::{calibrate_image, load_rgba, save_preview};
use chromagrid::io::{CalibrateConfig, CalibrationReport};
use chromagrid::{CellDivisions, ColorLabel};
use clap::{Args, Parser, Subcommand};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "chromagrid")]
#[command(about = "Classify and calibrate photographed grids of colored cells")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one calibration pass over an image and write a JSON report.
    Calibrate(CalibrateArgs),

    /// Print the color label of an RGB triple.
    Classify {
        red: u8,
        green: u8,
        blue: u8,
        /// Also print the HSV components.
        #[arg(long)]
        hsv: bool,
    },
}

#[derive(Debug, Clone, Args)]
struct CalibrateArgs {
    /// JSON config; explicit flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input image.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Cell columns to aggregate into (requires --y-div).
    #[arg(long, requires = "y_div")]
    x_div: Option<usize>,

    /// Cell rows to aggregate into (requires --x-div).
    #[arg(long, requires = "x_div")]
    y_div: Option<usize>,

    /// Color of the fiducial markers.
    #[arg(long)]
    marker: Option<ColorLabel>,

    /// Draw cell boundaries in the preview.
    #[arg(long)]
    lines: bool,

    /// Write an RGBA preview of the calibrated grid.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Report path (default: chromagrid_report.json).
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Calibrate(args) => run_calibrate(args),
        Commands::Classify {
            red,
            green,
            blue,
            hsv,
        } => {
            let label = classify_rgb(red, green, blue);
            if hsv {
                let s = HsvSample::from_rgb(red, green, blue);
                println!(
                    "{label} (h={:.1} s={:.3} v={:.3})",
                    s.hue, s.saturation, s.value
                );
            } else {
                println!("{label}");
            }
            Ok(())
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbosity: u8) -> CliResult<()> {
    chromagrid::core::init_with_level(chromagrid::core::level_from_verbosity(verbosity))?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(_verbosity: u8) -> CliResult<()> {
    chromagrid::core::init_tracing(false);
    let _ = tracing_log::LogTracer::init();
    Ok(())
}

fn resolve_config(args: &CalibrateArgs) -> CliResult<CalibrateConfig> {
    let mut cfg = match (&args.config, &args.image) {
        (Some(path), _) => CalibrateConfig::load_json(path)?,
        (None, Some(image)) => CalibrateConfig::new(image.to_string_lossy()),
        (None, None) => return Err("either --config or --image is required".into()),
    };
    if let Some(image) = &args.image {
        cfg.image_path = image.to_string_lossy().into_owned();
    }
    if let (Some(x), Some(y)) = (args.x_div, args.y_div) {
        cfg.params.divisions = Some(CellDivisions::new(x, y));
    }
    if let Some(marker) = args.marker {
        cfg.params.calibration.marker = marker;
    }
    if args.lines {
        cfg.enable_lines = true;
    }
    if let Some(preview) = &args.preview {
        cfg.preview_path = Some(preview.to_string_lossy().into_owned());
    }
    if let Some(report) = &args.report {
        cfg.output_path = Some(report.to_string_lossy().into_owned());
    }
    Ok(cfg)
}

fn run_calibrate(args: CalibrateArgs) -> CliResult<()> {
    let cfg = resolve_config(&args)?;
    let img = load_rgba(&cfg.image_path)?;
    let mut report = CalibrationReport::new(
        cfg.image_path.clone(),
        img.width() as usize,
        img.height() as usize,
    );
    let report_path = cfg.output_path();

    let outcome = match calibrate_image(&img, cfg.params) {
        Ok(outcome) => outcome,
        Err(err) => {
            log::warn!("calibration failed: {err}");
            report.set_error(&err);
            report.write_json(&report_path)?;
            return Err(err.into());
        }
    };
    report.set_outcome(&outcome);
    report.write_json(&report_path)?;
    log::info!("report written to {}", report_path.display());

    if let Some(preview) = &cfg.preview_path {
        save_preview(
            &outcome.grid,
            img.width(),
            img.height(),
            cfg.enable_lines,
            preview,
        )?;
        log::info!("preview written to {preview}");
    }

    for row in outcome.grid.rows() {
        let names: Vec<&str> = row.iter().map(|label| label.name()).collect();
        println!("{}", names.join(" "));
    }
    Ok(())
}
