//! ringcal-core: Core types for concentric ring calibration.
//!
//! This crate provides the two-click calibration state machine, the ring
//! generator, the measurement record model with its schema normalizer, and
//! the traits through which a session talks to its external collaborators.
//!

pub mod calibration;
pub mod collaborator;
pub mod error;
pub mod geometry;
pub mod record;
pub mod ring;
pub mod schema;

pub use calibration::{Calibration, CalibrationSession, CalibrationState};
pub use collaborator::{
    AnalysisRequest, ContourAnalyzer, FixedMultipliers, MultiplierSelector, PointerEvent,
    PointerInput, ScriptedClicks, SegmentationOutput, Segmenter, DEFAULT_MULTIPLIERS,
};
pub use error::{Error, Result};
pub use geometry::{Circle, Point};
pub use record::{FieldValue, MeasurementRecord};
pub use ring::{generate_rings, Ring};
pub use schema::{normalize, Cell, NormalizedTable, MAX_BEND_INDEX};
