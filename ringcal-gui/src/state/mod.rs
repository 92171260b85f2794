//! Application state modules.

mod multipliers;
mod ui;

pub use multipliers::MultiplierChoices;
pub use ui::UiState;
