//! Output paths derived from the source image and best-effort cleanup.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::{debug, warn};

/// Ring overlay and ring-info paths for one source image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingArtifacts {
    /// Source pixels with markers and rings, PNG.
    pub overlay: PathBuf,
    /// Ring-info table, xlsx.
    pub ring_info: PathBuf,
}

impl RingArtifacts {
    /// Paths next to `image_path`: `<stem><suffix>.png` and `<stem><suffix>.xlsx`.
    #[must_use]
    pub fn for_image(image_path: &Path, suffix: &str) -> Self {
        Self {
            overlay: sibling_with_suffix(image_path, suffix, "png"),
            ring_info: sibling_with_suffix(image_path, suffix, "xlsx"),
        }
    }

    /// Both paths, in cleanup order.
    #[must_use]
    pub fn paths(&self) -> [PathBuf; 2] {
        [self.ring_info.clone(), self.overlay.clone()]
    }
}

fn sibling_with_suffix(path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let mut name: OsString = path.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    name.push(".");
    name.push(extension);
    path.with_file_name(name)
}

/// What a cleanup pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Files deleted.
    pub removed: Vec<PathBuf>,
    /// Paths that were empty, missing or could not be deleted.
    pub skipped: Vec<PathBuf>,
}

/// Delete every path that exists; never fails.
///
/// Empty and missing paths are skipped; a failed deletion is logged and
/// skipped too.
pub fn remove_artifacts<I, P>(paths: I) -> CleanupReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut report = CleanupReport::default();
    for path in paths {
        let path = path.as_ref();
        if path.as_os_str().is_empty() || !path.exists() {
            debug!("nothing to remove at '{}'", path.display());
            report.skipped.push(path.to_path_buf());
            continue;
        }
        match std::fs::remove_file(path) {
            Ok(()) => {
                debug!("removed {}", path.display());
                report.removed.push(path.to_path_buf());
            }
            Err(e) => {
                warn!("could not remove {}: {e}", path.display());
                report.skipped.push(path.to_path_buf());
            }
        }
    }
    report
}
