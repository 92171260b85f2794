//! UI rendering modules.
//!
//! - `control_panel`: left sidebar with prompt, multipliers and ring summary
//! - `main_view`: central plot with the image, markers and ring preview

mod control_panel;
mod main_view;
pub mod theme;
