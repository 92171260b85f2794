#![allow(clippy::uninlined_format_args)]
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use image::{Rgb, RgbImage};
use ringcal_core::record::{
    bend_field, FILE_NAME, INTERSECTION_NUMBER, MULTIPLIER, NUMBER_OF_BENDS,
    TOTAL_MEANDERING_ANGLE,
};
use ringcal_core::{
    AnalysisRequest, CalibrationSession, ContourAnalyzer, FixedMultipliers, MeasurementRecord,
    Point, PointerEvent, ScriptedClicks, SegmentationOutput, Segmenter,
};
use ringcal_io::{load_image, Error, SessionConfig, SessionOutcome, SessionPipeline};
use tempfile::TempDir;

#[derive(Default)]
struct StubSegmenter {
    output: Option<SegmentationOutput>,
    calls: usize,
}

impl Segmenter for StubSegmenter {
    fn segment(&mut self, _image_path: &Path) -> ringcal_core::Result<Option<SegmentationOutput>> {
        self.calls += 1;
        Ok(self.output.clone())
    }
}

#[derive(Default)]
struct StubAnalyzer {
    records: Vec<MeasurementRecord>,
    requests: Vec<AnalysisRequest>,
}

impl ContourAnalyzer for StubAnalyzer {
    fn analyze(&mut self, request: &AnalysisRequest) -> ringcal_core::Result<Vec<MeasurementRecord>> {
        self.requests.push(request.clone());
        Ok(self.records.clone())
    }
}

struct Fixture {
    dir: TempDir,
    image_path: PathBuf,
    segmentation: SegmentationOutput,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("disc.png");
        RgbImage::from_pixel(64, 48, Rgb([40, 40, 40]))
            .save(&image_path)
            .unwrap();

        let folder = dir.path().join("disc_out");
        std::fs::create_dir(&folder).unwrap();
        let segmentation = SegmentationOutput {
            folder: folder.clone(),
            short_name: "disc".to_string(),
            overlay_path: folder.join("canvas2.png"),
            result_path: folder.join("livewire.xlsx"),
            extra_paths: vec![folder.join("mask.png"), folder.join("never_written.png")],
        };
        for path in [
            &segmentation.overlay_path,
            &segmentation.result_path,
            &segmentation.extra_paths[0],
        ] {
            std::fs::write(path, b"intermediate").unwrap();
        }

        Self {
            dir,
            image_path,
            segmentation,
        }
    }

    fn ring_overlay(&self) -> PathBuf {
        self.dir.path().join("disc_circles.png")
    }

    fn ring_info(&self) -> PathBuf {
        self.dir.path().join("disc_circles.xlsx")
    }

    fn result_table(&self) -> PathBuf {
        self.segmentation.folder.join("result.xlsx")
    }
}

fn read_sheet(path: &Path) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    range.rows().map(<[Data]>::to_vec).collect()
}

fn text(s: &str) -> Data {
    Data::String(s.to_string())
}

fn clicks() -> ScriptedClicks {
    ScriptedClicks::new([Point::new(10, 10), Point::new(30, 10)])
}

fn measurement(multiplier: f64, bends: &[f64]) -> MeasurementRecord {
    let mut record = MeasurementRecord::new()
        .with(FILE_NAME, "disc.png")
        .with(MULTIPLIER, multiplier)
        .with(INTERSECTION_NUMBER, 2)
        .with(NUMBER_OF_BENDS, i64::try_from(bends.len()).unwrap())
        .with(TOTAL_MEANDERING_ANGLE, bends.iter().sum::<f64>());
    for (i, angle) in bends.iter().enumerate() {
        record.insert(bend_field(i + 1), *angle);
    }
    record
}

#[test]
fn test_completed_session_exports_and_cleans_up() {
    let fx = Fixture::new();
    let mut segmenter = StubSegmenter {
        output: Some(fx.segmentation.clone()),
        calls: 0,
    };
    let mut analyzer = StubAnalyzer {
        records: vec![measurement(1.0, &[12.0]), measurement(1.5, &[5.0, 8.0])],
        requests: Vec::new(),
    };
    let mut selector = FixedMultipliers::new(vec![1.0, 1.5]);

    let outcome = SessionPipeline::new(SessionConfig::default(), &mut segmenter, &mut analyzer)
        .run(&fx.image_path, &mut clicks(), &mut selector)
        .unwrap();

    let (result_path, rows, cleanup) = match outcome {
        SessionOutcome::Completed {
            result_path,
            rows,
            cleanup,
        } => (result_path, rows, cleanup),
        other => panic!("expected a completed session, got {:?}", other),
    };
    assert_eq!(result_path, fx.result_table());
    assert_eq!(rows, 2);
    assert!(result_path.exists());

    let sheet = read_sheet(&result_path);
    assert_eq!(
        sheet,
        vec![
            vec![
                text(FILE_NAME),
                text(MULTIPLIER),
                text(INTERSECTION_NUMBER),
                text(NUMBER_OF_BENDS),
                text(&bend_field(1)),
                text(&bend_field(2)),
                text(TOTAL_MEANDERING_ANGLE),
            ],
            vec![
                text("disc.png"),
                Data::Float(1.0),
                Data::Float(2.0),
                Data::Float(1.0),
                Data::Float(12.0),
                Data::Empty,
                Data::Float(12.0),
            ],
            vec![
                text("disc.png"),
                Data::Float(1.5),
                Data::Float(2.0),
                Data::Float(2.0),
                Data::Float(5.0),
                Data::Float(8.0),
                Data::Float(13.0),
            ],
        ]
    );

    assert_eq!(analyzer.requests.len(), 1);
    let request = &analyzer.requests[0];
    assert_eq!(request.overlay_path, fx.segmentation.overlay_path);
    assert_eq!(request.folder, fx.segmentation.folder);
    assert_eq!(request.short_name, "disc");
    assert_eq!(request.reserved, None);

    for path in fx.segmentation.intermediate_paths() {
        assert!(!path.exists(), "{} should be removed", path.display());
    }
    assert!(!fx.ring_overlay().exists());
    assert!(!fx.ring_info().exists());
    assert_eq!(cleanup.removed.len(), 5);
    assert_eq!(cleanup.skipped, vec![fx.segmentation.extra_paths[1].clone()]);
    assert!(fx.image_path.exists());
}

#[test]
fn test_no_segmentation_result_stops_before_analysis() {
    let fx = Fixture::new();
    let mut segmenter = StubSegmenter::default();
    let mut analyzer = StubAnalyzer::default();
    let mut selector = FixedMultipliers::new(vec![1.0]);

    let outcome = SessionPipeline::new(SessionConfig::default(), &mut segmenter, &mut analyzer)
        .run(&fx.image_path, &mut clicks(), &mut selector)
        .unwrap();

    assert!(matches!(outcome, SessionOutcome::NoSegmentationResult { .. }));
    assert_eq!(segmenter.calls, 1);
    assert!(analyzer.requests.is_empty());
    assert!(!fx.result_table().exists());
    // Ring artifacts were written before segmentation and are kept.
    assert!(fx.ring_overlay().exists());
    assert!(fx.ring_info().exists());

    let ring_info = read_sheet(&fx.ring_info());
    assert_eq!(ring_info.len(), 2);
    assert_eq!(ring_info[0][0], text("FileName"));
    assert_eq!(ring_info[0][4], text("Radius"));
    assert_eq!(
        ring_info[1],
        vec![
            text("disc.png"),
            Data::Float(1.0),
            Data::Float(20.0),
            Data::Float(10.0),
            Data::Float(10.0),
        ]
    );
}

#[test]
fn test_no_analysis_results_writes_no_table() {
    let fx = Fixture::new();
    let mut segmenter = StubSegmenter {
        output: Some(fx.segmentation.clone()),
        calls: 0,
    };
    let mut analyzer = StubAnalyzer::default();
    let mut selector = FixedMultipliers::new(vec![1.0]);

    let outcome = SessionPipeline::new(SessionConfig::default(), &mut segmenter, &mut analyzer)
        .run(&fx.image_path, &mut clicks(), &mut selector)
        .unwrap();

    assert!(matches!(outcome, SessionOutcome::NoAnalysisResults { .. }));
    assert_eq!(analyzer.requests.len(), 1);
    assert!(!fx.result_table().exists());
    // Cleanup only follows a successful export.
    assert!(fx.segmentation.overlay_path.exists());
    assert!(fx.ring_overlay().exists());
    assert!(fx.ring_info().exists());
}

#[test]
fn test_malformed_record_fails_without_cleanup() {
    let fx = Fixture::new();
    let mut segmenter = StubSegmenter {
        output: Some(fx.segmentation.clone()),
        calls: 0,
    };
    let broken = MeasurementRecord::new().with(FILE_NAME, "disc.png");
    let mut analyzer = StubAnalyzer {
        records: vec![measurement(1.0, &[3.0]), broken],
        requests: Vec::new(),
    };
    let mut selector = FixedMultipliers::new(vec![1.0]);

    let err = SessionPipeline::new(SessionConfig::default(), &mut segmenter, &mut analyzer)
        .run(&fx.image_path, &mut clicks(), &mut selector)
        .unwrap_err();

    match err {
        Error::CoreError(ringcal_core::Error::MalformedRecord {
            index, file_name, ..
        }) => {
            assert_eq!(index, 1);
            assert_eq!(file_name.as_deref(), Some("disc.png"));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(!fx.result_table().exists());
    assert!(fx.segmentation.overlay_path.exists());
    assert!(fx.ring_info().exists());
}

#[test]
fn test_cancelled_calibration_writes_nothing() {
    let fx = Fixture::new();
    let mut segmenter = StubSegmenter::default();
    let mut analyzer = StubAnalyzer::default();
    let mut selector = FixedMultipliers::new(vec![1.0]);
    let mut input = ScriptedClicks::new([Point::new(10, 10)]).then(PointerEvent::Cancel);

    let err = SessionPipeline::new(SessionConfig::default(), &mut segmenter, &mut analyzer)
        .run(&fx.image_path, &mut input, &mut selector)
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(segmenter.calls, 0);
    assert!(!fx.ring_overlay().exists());
    assert!(!fx.ring_info().exists());
}

#[test]
fn test_invalid_image_stops_session() {
    let fx = Fixture::new();
    let bogus = fx.dir.path().join("bogus.jpg");
    std::fs::write(&bogus, b"definitely not a jpeg").unwrap();
    let mut segmenter = StubSegmenter::default();
    let mut analyzer = StubAnalyzer::default();
    let mut selector = FixedMultipliers::new(vec![1.0]);

    let err = SessionPipeline::new(SessionConfig::default(), &mut segmenter, &mut analyzer)
        .run(&bogus, &mut clicks(), &mut selector)
        .unwrap_err();

    assert!(matches!(err, Error::InvalidImage { .. }));
    assert_eq!(segmenter.calls, 0);
    assert!(!fx.dir.path().join("bogus_circles.png").exists());
}

#[test]
fn test_keep_intermediates_skips_cleanup() {
    let fx = Fixture::new();
    let mut segmenter = StubSegmenter {
        output: Some(fx.segmentation.clone()),
        calls: 0,
    };
    let mut analyzer = StubAnalyzer {
        records: vec![measurement(1.0, &[])],
        requests: Vec::new(),
    };
    let config = SessionConfig::default().with_keep_intermediates(true);

    let image = load_image(&fx.image_path).unwrap();
    let mut session = CalibrationSession::new(image.file_name());
    let mut selector = FixedMultipliers::new(vec![1.0, 2.0]);
    session.submit_click(Point::new(10, 10), &mut selector);
    session.submit_click(Point::new(30, 10), &mut selector);

    let outcome = SessionPipeline::new(config, &mut segmenter, &mut analyzer)
        .finish(&image, &session)
        .unwrap();

    let SessionOutcome::Completed { cleanup, .. } = outcome else {
        panic!("expected a completed session");
    };
    assert!(cleanup.removed.is_empty());
    assert!(fx.result_table().exists());
    assert!(fx.segmentation.overlay_path.exists());
    assert!(fx.ring_overlay().exists());
}

#[test]
fn test_finish_requires_complete_session() {
    let fx = Fixture::new();
    let mut segmenter = StubSegmenter::default();
    let mut analyzer = StubAnalyzer::default();
    let image = load_image(&fx.image_path).unwrap();
    let session = CalibrationSession::new(image.file_name());

    let err = SessionPipeline::new(SessionConfig::default(), &mut segmenter, &mut analyzer)
        .finish(&image, &session)
        .unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(segmenter.calls, 0);
}
