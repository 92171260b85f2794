//! Session output configuration.

/// Output naming, overlay styling and cleanup policy for a session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Suffix appended to the image stem for the ring overlay and ring table.
    pub artifact_suffix: String,
    /// Final table file name inside the segmentation folder.
    pub result_file_name: String,
    /// Radius of the filled click markers (pixels).
    pub marker_radius: u32,
    /// Click marker colour (RGB, blue).
    pub marker_color: [u8; 3],
    /// Ring outline colour (RGB, yellow).
    pub ring_color: [u8; 3],
    /// Ring outline thickness (pixels).
    pub ring_thickness: u32,
    /// Skip deleting intermediate artifacts after export.
    pub keep_intermediates: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            artifact_suffix: "_circles".to_string(),
            result_file_name: "result.xlsx".to_string(),
            marker_radius: 5,
            marker_color: [0, 0, 255],
            ring_color: [255, 255, 0],
            ring_thickness: 1,
            keep_intermediates: false,
        }
    }
}

impl SessionConfig {
    /// Set the artifact suffix.
    #[must_use]
    pub fn with_artifact_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.artifact_suffix = suffix.into();
        self
    }

    /// Set the result table file name.
    #[must_use]
    pub fn with_result_file_name(mut self, name: impl Into<String>) -> Self {
        self.result_file_name = name.into();
        self
    }

    /// Set the ring outline thickness (at least 1).
    #[must_use]
    pub fn with_ring_thickness(mut self, thickness: u32) -> Self {
        self.ring_thickness = thickness.max(1);
        self
    }

    /// Keep or delete intermediate artifacts after export.
    #[must_use]
    pub fn with_keep_intermediates(mut self, keep: bool) -> Self {
        self.keep_intermediates = keep;
        self
    }
}
