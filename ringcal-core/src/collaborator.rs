//! Contracts for the external collaborators a calibration session calls.
//!
//! The multiplier picker, pointer source, segmentation and contour analysis
//! are opaque to the core. Each is a trait so a session can be driven by a
//! GUI, a script, a subprocess or a test double.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationState;
use crate::error::Result;
use crate::geometry::Point;
use crate::record::MeasurementRecord;

/// Multiplier presets offered to the operator.
pub const DEFAULT_MULTIPLIERS: [f64; 6] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0];

/// Chooses the ring multipliers once the base circle is known.
pub trait MultiplierSelector {
    /// Returns the ordered multipliers; may be empty.
    fn select_multipliers(&mut self) -> Vec<f64>;
}

/// A fixed multiplier list, returned on every call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedMultipliers(pub Vec<f64>);

impl FixedMultipliers {
    /// Create from any multiplier sequence.
    #[must_use]
    pub fn new(multipliers: impl Into<Vec<f64>>) -> Self {
        Self(multipliers.into())
    }
}

impl MultiplierSelector for FixedMultipliers {
    fn select_multipliers(&mut self) -> Vec<f64> {
        self.0.clone()
    }
}

/// Input event on the rendered image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    /// Left click at an image pixel.
    Click(Point),
    /// Explicit cancel (keyboard interrupt).
    Cancel,
}

/// Source of pointer events for the calibration poll loop.
pub trait PointerInput {
    /// Next event, given the state the calibrator is currently in.
    ///
    /// `None` means the source is exhausted and is treated as a cancel.
    fn next_event(&mut self, state: CalibrationState) -> Option<PointerEvent>;
}

/// Replays a fixed click sequence.
#[derive(Clone, Debug, Default)]
pub struct ScriptedClicks {
    events: VecDeque<PointerEvent>,
}

impl ScriptedClicks {
    /// Replays the given points as clicks, then reports exhaustion.
    #[must_use]
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            events: points.into_iter().map(PointerEvent::Click).collect(),
        }
    }

    /// Append an arbitrary event.
    #[must_use]
    pub fn then(mut self, event: PointerEvent) -> Self {
        self.events.push_back(event);
        self
    }

    /// Events not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl PointerInput for ScriptedClicks {
    fn next_event(&mut self, _state: CalibrationState) -> Option<PointerEvent> {
        self.events.pop_front()
    }
}

/// Successful output of the segmentation collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentationOutput {
    /// Folder where the final result table is written.
    pub folder: PathBuf,
    /// Short name derived from the image file name.
    pub short_name: String,
    /// Intermediate overlay image handed to contour analysis.
    pub overlay_path: PathBuf,
    /// Intermediate result table.
    pub result_path: PathBuf,
    /// Further intermediate artifacts.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "null_as_empty")
    )]
    pub extra_paths: Vec<PathBuf>,
}

/// Reads a missing or `null` list as empty.
#[cfg(feature = "serde")]
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<PathBuf>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<PathBuf>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SegmentationOutput {
    /// Every intermediate artifact this output references, in cleanup order.
    #[must_use]
    pub fn intermediate_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(self.extra_paths.len() + 2);
        paths.push(self.overlay_path.clone());
        paths.push(self.result_path.clone());
        paths.extend(self.extra_paths.iter().cloned());
        paths
    }
}

/// Segments the source image (livewire tracing).
pub trait Segmenter {
    /// Segment the image at `image_path`; `Ok(None)` is the explicit
    /// "no result" signal.
    fn segment(&mut self, image_path: &Path) -> Result<Option<SegmentationOutput>>;
}

impl<T: Segmenter + ?Sized> Segmenter for &mut T {
    fn segment(&mut self, image_path: &Path) -> Result<Option<SegmentationOutput>> {
        (**self).segment(image_path)
    }
}

/// Input of the contour / bend analysis collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub overlay_path: PathBuf,
    pub folder: PathBuf,
    pub short_name: String,
    /// Reserved slot of the analysis contract; always `None`.
    pub reserved: Option<String>,
}

impl AnalysisRequest {
    /// Build the request that follows a segmentation output.
    #[must_use]
    pub fn from_segmentation(output: &SegmentationOutput) -> Self {
        Self {
            overlay_path: output.overlay_path.clone(),
            folder: output.folder.clone(),
            short_name: output.short_name.clone(),
            reserved: None,
        }
    }
}

/// Traces ring/contour intersections and measures bend angles.
pub trait ContourAnalyzer {
    /// One record per analyzed ring; may be empty.
    fn analyze(&mut self, request: &AnalysisRequest) -> Result<Vec<MeasurementRecord>>;
}

impl<T: ContourAnalyzer + ?Sized> ContourAnalyzer for &mut T {
    fn analyze(&mut self, request: &AnalysisRequest) -> Result<Vec<MeasurementRecord>> {
        (**self).analyze(request)
    }
}
