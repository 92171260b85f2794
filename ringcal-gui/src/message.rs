//! Messages sent from the calibrator window back to `main`.

use ringcal_core::CalibrationSession;

/// How the calibration window ended.
pub enum CalibrationMessage {
    /// Both points were clicked; the session holds the rings.
    Completed(Box<CalibrationSession>),
    /// The operator pressed Escape/Q, the cancel button, or closed the window.
    Cancelled,
}
