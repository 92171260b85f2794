//! Subprocess-backed collaborators.
//!
//! The segmentation and contour-analysis stages ship as opaque programs. Each
//! is run once per session; arguments go on the command line and the result
//! comes back as JSON on stdout.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};
use ringcal_core::{
    AnalysisRequest, ContourAnalyzer, FieldValue, MeasurementRecord, SegmentationOutput, Segmenter,
};

use crate::{Error, Result};

/// Captured output of a finished process.
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Program plus fixed leading arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ExternalCommand {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a fixed argument placed before the per-call arguments.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several fixed arguments.
    #[must_use]
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run with `extra` appended and wait for completion.
    ///
    /// # Errors
    /// [`Error::Io`] if the process cannot be spawned.
    pub fn run<I, A>(&self, extra: I) -> Result<CommandOutput>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<std::ffi::OsStr>,
    {
        debug!("running {}", self.program.display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .args(extra)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }

    /// Run and return stdout, failing on a non-zero exit status.
    fn run_checked<I, A>(&self, extra: I) -> Result<String>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<std::ffi::OsStr>,
    {
        let output = self.run(extra)?;
        if !output.success {
            return Err(Error::Collaborator(format!(
                "{} failed: {}",
                self.program.display(),
                output.stderr.trim()
            )));
        }
        Ok(output.stdout)
    }
}

/// Parse segmentation stdout: `null` or a `SegmentationOutput` object.
///
/// # Errors
/// [`Error::Json`] on malformed JSON.
pub fn parse_segmentation_output(json: &str) -> Result<Option<SegmentationOutput>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse analysis stdout: an array of `field -> number | string | null`
/// objects. Null fields are left out of the record.
///
/// # Errors
/// [`Error::Json`] on malformed JSON.
pub fn parse_records(json: &str) -> Result<Vec<MeasurementRecord>> {
    let raw: Vec<BTreeMap<String, Option<FieldValue>>> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .map(|fields| {
            fields
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v)))
                .collect()
        })
        .collect())
}

fn collaborator_error(e: Error) -> ringcal_core::Error {
    ringcal_core::Error::Collaborator(e.to_string())
}

/// Segmenter that runs `<program> <args..> <image_path>`.
#[derive(Clone, Debug)]
pub struct CommandSegmenter {
    command: ExternalCommand,
}

impl CommandSegmenter {
    #[must_use]
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }
}

impl Segmenter for CommandSegmenter {
    fn segment(&mut self, image_path: &Path) -> ringcal_core::Result<Option<SegmentationOutput>> {
        info!("segmenting {}", image_path.display());
        let stdout = self
            .command
            .run_checked([image_path.as_os_str()])
            .map_err(collaborator_error)?;
        parse_segmentation_output(&stdout).map_err(collaborator_error)
    }
}

/// Analyzer that runs `<program> <args..> <overlay> <folder> <short_name>`.
#[derive(Clone, Debug)]
pub struct CommandAnalyzer {
    command: ExternalCommand,
}

impl CommandAnalyzer {
    #[must_use]
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }
}

impl ContourAnalyzer for CommandAnalyzer {
    fn analyze(&mut self, request: &AnalysisRequest) -> ringcal_core::Result<Vec<MeasurementRecord>> {
        info!("analyzing {}", request.overlay_path.display());
        let stdout = self
            .command
            .run_checked([
                request.overlay_path.as_os_str(),
                request.folder.as_os_str(),
                std::ffi::OsStr::new(&request.short_name),
            ])
            .map_err(collaborator_error)?;
        parse_records(&stdout).map_err(collaborator_error)
    }
}
