//! Two-click calibration state machine.
//!
//! The operator clicks both ends of a disc diameter. The second click derives
//! the base circle, asks the multiplier selector for the ring multipliers and
//! expands the circle into rings. The session then stays complete; later
//! clicks are ignored.

use log::{debug, info};

use crate::collaborator::{MultiplierSelector, PointerEvent, PointerInput};
use crate::error::{Error, Result};
use crate::geometry::{Circle, Point};
use crate::ring::{generate_rings, Ring};

/// Where a calibration session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalibrationState {
    AwaitingFirstPoint,
    AwaitingSecondPoint,
    Complete,
}

impl CalibrationState {
    /// Operator prompt for this state, `None` once complete.
    #[must_use]
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            Self::AwaitingFirstPoint => Some("Click one end of the disc edge"),
            Self::AwaitingSecondPoint => Some("Click the other end of the disc edge"),
            Self::Complete => None,
        }
    }
}

/// Result of a completed calibration.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    /// The two clicked diameter endpoints, in click order.
    pub endpoints: [Point; 2],
    /// Circle spanned by the endpoints.
    pub base: Circle,
    /// One ring per selected multiplier, in selection order.
    pub rings: Vec<Ring>,
}

/// Calibration state for one image.
///
/// Holds at most two pending points. Owned by whoever drives the session and
/// mutated only through [`CalibrationSession::submit_click`].
#[derive(Debug, Clone)]
pub struct CalibrationSession {
    file_name: String,
    points: Vec<Point>,
    calibration: Option<Calibration>,
}

impl CalibrationSession {
    /// New session for the image called `file_name`.
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            points: Vec::with_capacity(2),
            calibration: None,
        }
    }

    /// Source image file name stamped on every ring.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CalibrationState {
        if self.calibration.is_some() {
            CalibrationState::Complete
        } else if self.points.is_empty() {
            CalibrationState::AwaitingFirstPoint
        } else {
            CalibrationState::AwaitingSecondPoint
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.calibration.is_some()
    }

    /// Points collected so far (empty once complete).
    #[must_use]
    pub fn pending_points(&self) -> &[Point] {
        &self.points
    }

    /// The calibration, once complete.
    #[must_use]
    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    /// Consume the session, yielding the calibration if complete.
    #[must_use]
    pub fn into_calibration(self) -> Option<Calibration> {
        self.calibration
    }

    /// Feed one click into the state machine.
    ///
    /// The selector is consulted exactly once, on the click that completes
    /// the session. Clicks after completion change nothing.
    pub fn submit_click<S>(&mut self, point: Point, selector: &mut S) -> CalibrationState
    where
        S: MultiplierSelector + ?Sized,
    {
        if self.is_complete() {
            debug!("ignoring click at {point}: calibration already complete");
            return CalibrationState::Complete;
        }

        self.points.push(point);
        if self.points.len() < 2 {
            info!("first disc edge point at {point}");
            return self.state();
        }

        let endpoints = [self.points[0], self.points[1]];
        self.points.clear();

        let base = Circle::from_diameter(endpoints[0], endpoints[1]);
        let multipliers = selector.select_multipliers();
        let rings = generate_rings(&base, &multipliers, &self.file_name);
        info!(
            "base circle center {} radius {}, {} ring(s)",
            base.center,
            base.radius,
            rings.len()
        );

        self.calibration = Some(Calibration {
            endpoints,
            base,
            rings,
        });
        CalibrationState::Complete
    }

    /// Poll `input` until the session completes.
    ///
    /// # Errors
    /// [`Error::UserCancelled`] on a cancel event or when the input runs dry
    /// before completion.
    pub fn run_to_completion<I, S>(&mut self, input: &mut I, selector: &mut S) -> Result<&Calibration>
    where
        I: PointerInput + ?Sized,
        S: MultiplierSelector + ?Sized,
    {
        while !self.is_complete() {
            match input.next_event(self.state()) {
                Some(PointerEvent::Click(point)) => {
                    self.submit_click(point, selector);
                }
                Some(PointerEvent::Cancel) | None => {
                    info!("calibration cancelled in state {:?}", self.state());
                    self.points.clear();
                    return Err(Error::UserCancelled);
                }
            }
        }
        self.calibration.as_ref().ok_or(Error::UserCancelled)
    }
}
