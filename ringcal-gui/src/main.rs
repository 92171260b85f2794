//! Ringcal GUI entry point.
//!
//! Picks an image, opens the two-click calibrator, then runs segmentation,
//! analysis and export on the finished calibration.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod message;
mod state;
mod ui;
mod util;
mod viewer;

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::mpsc::channel;

use anyhow::{anyhow, Context, Result};
use app::CalibratorApp;
use clap::Parser;
use eframe::egui;
use log::{error, info};
use message::CalibrationMessage;
use rfd::{FileDialog, MessageDialog, MessageLevel};
use ringcal_io::{
    load_image, CommandAnalyzer, CommandSegmenter, Error as IoError, ExternalCommand,
    SessionConfig, SessionPipeline, IMAGE_EXTENSIONS,
};

/// Interactive ring calibration.
#[derive(Parser, Debug)]
#[command(name = "ringcal-gui")]
#[command(author, version, about)]
struct Args {
    /// Image to calibrate (a file dialog opens when omitted)
    image: Option<PathBuf>,

    /// Segmentation command
    #[arg(long, default_value = "ringcal-segment")]
    segment_cmd: PathBuf,

    /// Extra argument passed to the segmentation command (repeatable)
    #[arg(long = "segment-arg", allow_hyphen_values = true)]
    segment_args: Vec<OsString>,

    /// Contour analysis command
    #[arg(long, default_value = "ringcal-analyze")]
    analyze_cmd: PathBuf,

    /// Extra argument passed to the analysis command (repeatable)
    #[arg(long = "analyze-arg", allow_hyphen_values = true)]
    analyze_args: Vec<OsString>,

    /// Keep ring and segmentation artifacts after export
    #[arg(long)]
    keep_intermediates: bool,
}

fn pick_image() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select an image")
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
}

fn show_message(level: MessageLevel, title: &str, text: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(text)
        .show();
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let Some(image_path) = args.image.clone().or_else(pick_image) else {
        info!("No file selected, exiting...");
        return Ok(());
    };

    let image = match load_image(&image_path) {
        Ok(image) => image,
        Err(err @ IoError::InvalidImage { .. }) => {
            error!("{err}");
            show_message(MessageLevel::Error, "Invalid image", &err.to_string());
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    let config = SessionConfig::default().with_keep_intermediates(args.keep_intermediates);
    let (tx, rx) = channel();
    let app_config = config.clone();
    let app_image = image.clone();
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title(format!("Ringcal - {}", image.file_name())),
        ..Default::default()
    };
    eframe::run_native(
        "Ringcal",
        opts,
        Box::new(move |cc| {
            ui::theme::apply_system_theme(&cc.egui_ctx);
            Ok(Box::new(CalibratorApp::new(app_image, app_config, tx)))
        }),
    )
    .map_err(|e| anyhow!("calibrator window failed: {e}"))?;

    let session = match rx.try_recv() {
        Ok(CalibrationMessage::Completed(session)) => session,
        Ok(CalibrationMessage::Cancelled) | Err(_) => {
            info!("Calibration cancelled, exiting...");
            return Ok(());
        }
    };

    let segmenter =
        CommandSegmenter::new(ExternalCommand::new(&args.segment_cmd).args(&args.segment_args));
    let analyzer =
        CommandAnalyzer::new(ExternalCommand::new(&args.analyze_cmd).args(&args.analyze_args));
    let mut pipeline = SessionPipeline::new(config, segmenter, analyzer);

    match pipeline.finish(&image, &session) {
        Ok(outcome) => {
            info!("{}", outcome.summary());
            show_message(MessageLevel::Info, "Ringcal", &outcome.summary());
            Ok(())
        }
        Err(err) => {
            error!("session failed: {err}");
            show_message(MessageLevel::Error, "Ringcal", &err.to_string());
            Err(err).context("processing the calibrated image")
        }
    }
}
