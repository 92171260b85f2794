//! Calibrator window state and frame loop.
//!
//! `CalibratorApp` owns the calibration session. Clicks on the image go
//! straight into the session; once it completes, the finished session is sent
//! back to `main` and the window closes after a short pause.

use std::sync::mpsc::Sender;
use std::time::Instant;

use eframe::egui;
use log::{debug, info};
use ringcal_core::{CalibrationSession, CalibrationState, Point};
use ringcal_io::{SessionConfig, SourceImage};

use crate::message::CalibrationMessage;
use crate::state::{MultiplierChoices, UiState};
use crate::ui::theme;
use crate::viewer::color_image;

/// Calibrator window.
pub struct CalibratorApp {
    /// Image being calibrated.
    pub(crate) image: SourceImage,
    /// Overlay styling, shared with the exported overlay.
    pub(crate) config: SessionConfig,
    /// Two-click state machine.
    pub(crate) session: CalibrationSession,
    /// Multiplier checklist, consulted on the completing click.
    pub(crate) multipliers: MultiplierChoices,
    /// UI display state.
    pub(crate) ui_state: UiState,
    /// Cached image texture.
    pub(crate) texture: Option<egui::TextureHandle>,

    tx: Sender<CalibrationMessage>,
    /// Whether the outcome has already been reported.
    reported: bool,
}

impl CalibratorApp {
    pub fn new(image: SourceImage, config: SessionConfig, tx: Sender<CalibrationMessage>) -> Self {
        let session = CalibrationSession::new(image.file_name());
        Self {
            image,
            config,
            session,
            multipliers: MultiplierChoices::default(),
            ui_state: UiState::default(),
            texture: None,
            tx,
            reported: false,
        }
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_none() {
            let image = color_image(self.image.pixels());
            self.texture =
                Some(ctx.load_texture("source-image", image, egui::TextureOptions::NEAREST));
        }
    }

    /// Feed a pixel click into the session.
    pub(crate) fn handle_click(&mut self, point: Point) {
        let state = self.session.submit_click(point, &mut self.multipliers);
        if state == CalibrationState::Complete && self.ui_state.completed_at.is_none() {
            self.ui_state.completed_at = Some(Instant::now());
        }
    }

    fn report(&mut self, message: CalibrationMessage) {
        if self.reported {
            return;
        }
        self.reported = true;
        if self.tx.send(message).is_err() {
            debug!("calibration receiver already dropped");
        }
    }

    fn cancel(&mut self, ctx: &egui::Context) {
        info!("Calibration cancelled");
        self.report(CalibrationMessage::Cancelled);
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn complete(&mut self, ctx: &egui::Context) {
        let session = Box::new(self.session.clone());
        self.report(CalibrationMessage::Completed(session));
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn cancel_key_pressed(ctx: &egui::Context) -> bool {
        // Q is ignored while a text field has focus.
        let typing = ctx.wants_keyboard_input();
        ctx.input(|i| i.key_pressed(egui::Key::Escape) || (!typing && i.key_pressed(egui::Key::Q)))
    }
}

impl eframe::App for CalibratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        theme::apply_system_theme(ctx);
        self.ensure_texture(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            // Closing before the second point counts as cancel.
            if self.session.is_complete() {
                let session = Box::new(self.session.clone());
                self.report(CalibrationMessage::Completed(session));
            } else {
                self.report(CalibrationMessage::Cancelled);
            }
            return;
        }

        if Self::cancel_key_pressed(ctx) && !self.session.is_complete() {
            self.cancel(ctx);
            return;
        }

        self.render_control_panel(ctx);
        self.render_central_panel(ctx);

        if self.ui_state.cancel_requested {
            self.ui_state.cancel_requested = false;
            self.cancel(ctx);
            return;
        }

        if let Some(remaining) = self.ui_state.close_remaining(Instant::now()) {
            if remaining.is_zero() {
                self.complete(ctx);
            } else {
                ctx.request_repaint_after(remaining);
            }
        }
    }
}
