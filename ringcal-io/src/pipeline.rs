//! Single-image calibration session.
//!
//! Stages run strictly in order, each waiting for the previous one:
//! load image, calibrate, write ring artifacts, segment, analyze, normalize,
//! export, clean up. Every collaborator is called at most once.

use std::path::{Path, PathBuf};

use log::info;
use ringcal_core::{
    normalize, AnalysisRequest, CalibrationSession, ContourAnalyzer, MultiplierSelector,
    PointerInput, Segmenter,
};

use crate::artifacts::{remove_artifacts, CleanupReport, RingArtifacts};
use crate::config::SessionConfig;
use crate::overlay::render_overlay;
use crate::source::{load_image, SourceImage};
use crate::workbook::{write_ring_info, write_table};
use crate::Result;

/// How a session that did not fail ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The result table was written.
    Completed {
        /// Path of the final result table.
        result_path: PathBuf,
        /// Number of result rows.
        rows: usize,
        /// Intermediate artifacts removed (empty with `keep_intermediates`).
        cleanup: CleanupReport,
    },
    /// Segmentation produced nothing; ring artifacts were kept.
    NoSegmentationResult { rings: RingArtifacts },
    /// Contour analysis returned no records; ring artifacts were kept.
    NoAnalysisResults { rings: RingArtifacts },
}

impl SessionOutcome {
    /// One-line operator summary.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Completed {
                result_path, rows, ..
            } => format!("{rows} result row(s) saved to {}", result_path.display()),
            Self::NoSegmentationResult { .. } => {
                "Segmentation returned no result; skipping analysis.".to_string()
            }
            Self::NoAnalysisResults { .. } => "No processed results are available.".to_string(),
        }
    }
}

/// Runs one calibration session against its collaborators.
pub struct SessionPipeline<S, A>
where
    S: Segmenter,
    A: ContourAnalyzer,
{
    config: SessionConfig,
    segmenter: S,
    analyzer: A,
}

impl<S, A> SessionPipeline<S, A>
where
    S: Segmenter,
    A: ContourAnalyzer,
{
    #[must_use]
    pub fn new(config: SessionConfig, segmenter: S, analyzer: A) -> Self {
        Self {
            config,
            segmenter,
            analyzer,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run a full session for the image at `image_path`.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidImage`] if the image cannot be decoded.
    /// - `UserCancelled` if calibration is cancelled; nothing is written.
    /// - Any error of [`SessionPipeline::finish`].
    pub fn run<P, M>(&mut self, image_path: &Path, input: &mut P, selector: &mut M) -> Result<SessionOutcome>
    where
        P: PointerInput + ?Sized,
        M: MultiplierSelector + ?Sized,
    {
        let image = load_image(image_path)?;
        let mut session = CalibrationSession::new(image.file_name());
        session.run_to_completion(input, selector)?;
        self.finish(&image, &session)
    }

    /// Run every stage after calibration.
    ///
    /// # Errors
    /// - `UserCancelled` if `session` is not complete.
    /// - I/O, image or xlsx errors while writing artifacts.
    /// - Collaborator errors from segmentation or analysis.
    /// - `MalformedRecord` from normalization; no cleanup happens then.
    pub fn finish(&mut self, image: &SourceImage, session: &CalibrationSession) -> Result<SessionOutcome> {
        let calibration = session
            .calibration()
            .ok_or(ringcal_core::Error::UserCancelled)?;

        let rings = RingArtifacts::for_image(image.path(), &self.config.artifact_suffix);
        render_overlay(image.pixels(), calibration, &self.config).save(&rings.overlay)?;
        info!("Image saved as {}", rings.overlay.display());
        write_ring_info(&rings.ring_info, &calibration.rings)?;

        let Some(segmentation) = self.segmenter.segment(image.path())? else {
            info!("Skipping analysis: segmentation returned no result");
            return Ok(SessionOutcome::NoSegmentationResult { rings });
        };

        let request = AnalysisRequest::from_segmentation(&segmentation);
        let records = self.analyzer.analyze(&request)?;
        if records.is_empty() {
            info!("No processed results are available");
            return Ok(SessionOutcome::NoAnalysisResults { rings });
        }

        let table = normalize(&records)?;
        let result_path = segmentation.folder.join(&self.config.result_file_name);
        write_table(&result_path, &table)?;

        let cleanup = if self.config.keep_intermediates {
            info!("Keeping intermediate artifacts");
            CleanupReport::default()
        } else {
            let mut paths = segmentation.intermediate_paths();
            paths.extend(rings.paths());
            remove_artifacts(paths)
        };

        Ok(SessionOutcome::Completed {
            result_path,
            rows: table.len(),
            cleanup,
        })
    }
}
