//! Main view (central panel) rendering.

use eframe::egui;
use egui_plot::{Line, Plot, PlotImage, PlotPoint, PlotPoints, Points};
use log::debug;

use crate::app::CalibratorApp;
use crate::util::{circle_polyline, pixel_to_plot, plot_to_pixel, u32_to_f32, u32_to_f64};
use crate::viewer::preview_color;

/// Segments used to draw one ring.
const RING_SEGMENTS: usize = 180;

impl CalibratorApp {
    /// Render the central panel with the image, click markers and rings.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(tex) = &self.texture else {
                ui.centered_and_justified(|ui| ui.label("No Image"));
                return;
            };
            let (width, height) = self.image.dimensions();

            let mut markers: Vec<[f64; 2]> = self
                .session
                .pending_points()
                .iter()
                .map(|&p| pixel_to_plot(p, height))
                .collect();
            let mut rings = Vec::new();
            if let Some(calibration) = self.session.calibration() {
                markers.extend(calibration.endpoints.iter().map(|&p| pixel_to_plot(p, height)));
                rings.extend(
                    calibration
                        .rings
                        .iter()
                        .filter(|ring| ring.is_drawable())
                        .map(|ring| circle_polyline(ring.center, ring.radius, height, RING_SEGMENTS)),
                );
            }
            let marker_color = preview_color(self.config.marker_color);
            let ring_color = preview_color(self.config.ring_color);

            let response = Plot::new("calibration")
                .data_aspect(1.0)
                .allow_drag(false)
                .allow_boxed_zoom(false)
                .allow_double_click_reset(false)
                .show_grid(false)
                .show(ui, |plot_ui| {
                    plot_ui.image(PlotImage::new(
                        tex,
                        PlotPoint::new(u32_to_f64(width) / 2.0, u32_to_f64(height) / 2.0),
                        [u32_to_f32(width), u32_to_f32(height)],
                    ));
                    for ring in rings {
                        plot_ui.line(Line::new(PlotPoints::from(ring)).color(ring_color).width(1.5));
                    }
                    if !markers.is_empty() {
                        plot_ui.points(
                            Points::new(PlotPoints::from(markers))
                                .color(marker_color)
                                .radius(4.0)
                                .filled(true),
                        );
                    }
                    plot_ui.pointer_coordinate()
                });

            let hovered = response
                .inner
                .and_then(|coord| plot_to_pixel(coord.x, coord.y, width, height));
            self.ui_state.cursor = hovered.map(|p| (p.x, p.y));

            if response.response.clicked() {
                match hovered {
                    Some(point) => self.handle_click(point),
                    None => debug!("click outside the image ignored"),
                }
            }
        });
    }
}
