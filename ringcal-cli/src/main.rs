//! Command-line front end for ringcal.
//!
//! Runs calibration sessions headless: the two disc-edge clicks and the ring
//! multipliers come from arguments instead of a pointer and a dialog.
#![allow(clippy::uninlined_format_args)]

use clap::{Parser, Subcommand, ValueEnum};

use ringcal_core::{
    normalize, Calibration, CalibrationSession, FixedMultipliers, Point, ScriptedClicks, DEFAULT_MULTIPLIERS,
};
use ringcal_io::{
    parse_records, write_ring_info, write_table, CommandAnalyzer, CommandSegmenter,
    ExternalCommand, SessionConfig, SessionOutcome, SessionPipeline, TableFileWriter,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    RingcalIo(#[from] ringcal_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] ringcal_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format for the ring table.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum RingFormat {
    /// Comma-separated values
    Csv,
    /// JSON array
    Json,
}

/// Concentric ring calibration and bend-angle result normalization.
#[derive(Parser)]
#[command(name = "ringcal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full session on one image
    Run {
        /// Source image (jpg, jpeg, png, bmp)
        image: PathBuf,

        /// Disc edge click; give it twice (fewer clicks cancel the session)
        #[arg(long = "click", value_name = "X,Y")]
        clicks: Vec<Point>,

        /// Ring multipliers, in order
        #[arg(short, long, value_delimiter = ',', default_value = "1.0")]
        multipliers: Vec<f64>,

        /// Segmentation program; receives the image path
        #[arg(long)]
        segment_cmd: PathBuf,

        /// Extra leading argument for the segmentation program
        #[arg(long = "segment-arg", allow_hyphen_values = true)]
        segment_args: Vec<String>,

        /// Contour analysis program; receives overlay, folder and short name
        #[arg(long)]
        analyze_cmd: PathBuf,

        /// Extra leading argument for the analysis program
        #[arg(long = "analyze-arg", allow_hyphen_values = true)]
        analyze_args: Vec<String>,

        /// File name of the final result table
        #[arg(long, default_value = "result.xlsx")]
        result_name: String,

        /// Ring outline thickness in pixels
        #[arg(long, default_value = "1")]
        ring_thickness: u32,

        /// Keep intermediate artifacts after export
        #[arg(long)]
        keep_intermediates: bool,
    },

    /// Compute rings from two clicks without running a session
    Rings {
        /// First disc edge point
        #[arg(value_name = "X1,Y1")]
        first: Point,

        /// Second disc edge point
        #[arg(value_name = "X2,Y2")]
        second: Point,

        /// Ring multipliers, in order (defaults to the preset list)
        #[arg(short, long, value_delimiter = ',')]
        multipliers: Option<Vec<f64>>,

        /// File name stamped on each ring
        #[arg(long, default_value = "")]
        file_name: String,

        /// Stdout format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: RingFormat,

        /// Also write the ring-info table (xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Normalize analysis records (JSON array) into the result table
    Normalize {
        /// JSON file with an array of records
        input: PathBuf,

        /// Output table (.xlsx or .csv); CSV to stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            image,
            clicks,
            multipliers,
            segment_cmd,
            segment_args,
            analyze_cmd,
            analyze_args,
            result_name,
            ring_thickness,
            keep_intermediates,
        } => {
            let config = SessionConfig::default()
                .with_result_file_name(result_name)
                .with_ring_thickness(ring_thickness)
                .with_keep_intermediates(keep_intermediates);
            let segmenter = CommandSegmenter::new(ExternalCommand::new(segment_cmd).args(segment_args));
            let analyzer = CommandAnalyzer::new(ExternalCommand::new(analyze_cmd).args(analyze_args));

            let mut pipeline = SessionPipeline::new(config, segmenter, analyzer);
            let mut input = ScriptedClicks::new(clicks);
            let mut selector = FixedMultipliers::new(multipliers);

            match pipeline.run(&image, &mut input, &mut selector) {
                Ok(outcome) => {
                    println!("{}", outcome.summary());
                    if let SessionOutcome::Completed { cleanup, .. } = &outcome {
                        println!("Removed {} intermediate file(s)", cleanup.removed.len());
                    }
                }
                Err(e) if e.is_cancelled() => {
                    println!("Calibration cancelled, exiting...");
                }
                Err(e) => return Err(e.into()),
            }
            println!("Processing finished.");
        }

        Commands::Rings {
            first,
            second,
            multipliers,
            file_name,
            format,
            output,
        } => {
            let multipliers = multipliers.unwrap_or_else(|| DEFAULT_MULTIPLIERS.to_vec());
            let mut session = CalibrationSession::new(file_name);
            let mut selector = FixedMultipliers::new(multipliers);
            session.submit_click(first, &mut selector);
            session.submit_click(second, &mut selector);
            let calibration = session
                .into_calibration()
                .ok_or(ringcal_core::Error::UserCancelled)?;

            // Kept off stdout so the ring table stays machine-readable.
            eprintln!("{}", base_circle_line(&calibration));
            match format {
                RingFormat::Csv => {
                    let mut writer = TableFileWriter::new(std::io::stdout().lock());
                    writer.write_rings_csv(&calibration.rings)?;
                }
                RingFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&calibration.rings)?);
                }
            }
            if let Some(path) = output {
                write_ring_info(&path, &calibration.rings)?;
            }
        }

        Commands::Normalize { input, output } => {
            let json = std::fs::read_to_string(&input)?;
            let records = parse_records(&json)?;
            let table = normalize(&records)?;

            match output {
                Some(path) if is_csv(&path) => {
                    TableFileWriter::create(&path)?.write_table_csv(&table)?;
                }
                Some(path) => write_table(&path, &table)?,
                None => {
                    TableFileWriter::new(std::io::stdout().lock()).write_table_csv(&table)?;
                }
            }
            eprintln!(
                "Normalized {} record(s), max bend index {}",
                table.len(),
                table.max_bend_index()
            );
        }
    }

    Ok(())
}

fn base_circle_line(calibration: &Calibration) -> String {
    format!(
        "# base circle center {} radius {}",
        calibration.base.center, calibration.base.radius
    )
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
