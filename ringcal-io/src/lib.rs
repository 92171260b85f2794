//! ringcal-io: File I/O and session orchestration for ringcal.
//!
//! This crate loads source images, renders ring overlays, exports ring and
//! result tables (xlsx via `rust_xlsxwriter`, CSV), runs the external
//! segmentation/analysis programs and sequences a whole calibration session.
//!

pub mod artifacts;
pub mod config;
mod error;
pub mod external;
pub mod overlay;
pub mod pipeline;
pub mod source;
pub mod workbook;
mod writer;

pub use artifacts::{remove_artifacts, CleanupReport, RingArtifacts};
pub use config::SessionConfig;
pub use error::{Error, Result};
pub use external::{
    parse_records, parse_segmentation_output, CommandAnalyzer, CommandSegmenter, ExternalCommand,
};
pub use overlay::render_overlay;
pub use pipeline::{SessionOutcome, SessionPipeline};
pub use source::{load_image, SourceImage, IMAGE_EXTENSIONS};
pub use workbook::{write_ring_info, write_table};
pub use writer::TableFileWriter;
