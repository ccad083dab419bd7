use super::*;
use crate::encode::{AnimationEncoder, EncodeJob};
use crate::foundation::core::Rgba8;
use crate::scene::model::Animation;
use std::sync::{Arc, Mutex};

const W: u32 = 16;
const H: u32 = 8;

#[derive(Default)]
struct RecordingClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl Clock for RecordingClock {
    fn sleep(&self, d: Duration) {
        self.sleeps.lock().unwrap().push(d);
    }
}

#[derive(Default)]
struct FakeRasterizer {
    calls: Vec<CaptureOptions>,
    fail_at: Option<usize>,
}

impl Rasterizer for FakeRasterizer {
    type Root = ();

    fn capture(&mut self, _root: &(), opts: &CaptureOptions) -> BannerResult<RasterImage> {
        let i = self.calls.len();
        self.calls.push(*opts);
        if self.fail_at == Some(i) {
            return Err(BannerError::capture("tainted canvas"));
        }
        let w = (f64::from(W) * opts.scale).round() as u32;
        let h = (f64::from(H) * opts.scale).round() as u32;
        Ok(RasterImage::filled(w, h, Rgba8::new(i as u8, 0, 0, 255)))
    }
}

#[derive(Default)]
struct EncoderLog {
    configs: Vec<EncoderConfig>,
    delays: Vec<u32>,
}

struct RecordingFactory {
    log: Arc<Mutex<EncoderLog>>,
    fail_render: bool,
}

impl RecordingFactory {
    fn new() -> Self {
        Self {
            log: Arc::default(),
            fail_render: false,
        }
    }
}

struct RecordingEncoder {
    log: Arc<Mutex<EncoderLog>>,
    frames: usize,
    fail_render: bool,
}

impl EncoderFactory for RecordingFactory {
    fn create(&self, cfg: EncoderConfig) -> BannerResult<Box<dyn AnimationEncoder>> {
        self.log.lock().unwrap().configs.push(cfg);
        Ok(Box::new(RecordingEncoder {
            log: Arc::clone(&self.log),
            frames: 0,
            fail_render: self.fail_render,
        }))
    }
}

impl AnimationEncoder for RecordingEncoder {
    fn add_frame(&mut self, _frame: &RasterImage, opts: FrameOptions) -> BannerResult<()> {
        self.log.lock().unwrap().delays.push(opts.delay_ms);
        self.frames += 1;
        Ok(())
    }

    fn frame_count(&self) -> usize {
        self.frames
    }

    fn render(self: Box<Self>) -> BannerResult<EncodeJob> {
        if self.fail_render {
            return Ok(EncodeJob::ready(Err(BannerError::encode("worker crashed"))));
        }
        Ok(EncodeJob::ready(Ok(b"GIF89a".to_vec())))
    }
}

fn config(format: ExportFormat, animated: bool) -> Configuration {
    let mut c = Configuration::default();
    c.canvas.width = W;
    c.canvas.height = H;
    c.canvas.export_format = format;
    if animated {
        c.logo.animation = Animation::named("float");
    }
    c
}

fn orchestrator() -> ExportOrchestrator<RecordingClock> {
    ExportOrchestrator::with_clock(RecordingClock::default(), ExportOptions::default())
}

#[test]
fn animated_request_without_animation_downgrades_to_one_capture() {
    let orch = orchestrator();
    let mut r = FakeRasterizer::default();
    let factory = RecordingFactory::new();

    let report = orch
        .export(&mut r, &(), &config(ExportFormat::Animated, false), &factory)
        .unwrap()
        .into_report()
        .unwrap();

    assert_eq!(r.calls.len(), 1);
    assert_eq!(report.note, Some(ExportNote::Downgraded));
    assert_eq!(report.artifact.kind, ArtifactKind::Still);
    assert!(factory.log.lock().unwrap().configs.is_empty());
    assert!(orch.clock.sleeps.lock().unwrap().is_empty());
    assert_eq!(orch.state(), ExportState::Done);
}

#[test]
fn animated_export_samples_twenty_frames_at_fixed_delay() {
    let orch = orchestrator();
    let mut r = FakeRasterizer::default();
    let factory = RecordingFactory::new();

    let report = orch
        .export(&mut r, &(), &config(ExportFormat::Animated, true), &factory)
        .unwrap()
        .into_report()
        .unwrap();

    assert_eq!(r.calls.len(), 20);
    assert!(
        r.calls
            .iter()
            .all(|o| o.scale == 1.0 && o.allow_cross_origin && !o.transparent_background)
    );

    let log = factory.log.lock().unwrap();
    assert_eq!(log.delays, vec![100; 20]);
    assert_eq!(
        log.configs,
        vec![EncoderConfig {
            width: W,
            height: H,
            frame_delay_ms: 100,
            transparent: false,
        }]
    );

    // One wait between consecutive captures, none after the last.
    let sleeps = orch.clock.sleeps.lock().unwrap();
    assert_eq!(*sleeps, vec![Duration::from_millis(100); 19]);

    assert_eq!(report.note, None);
    assert_eq!(report.artifact.kind, ArtifactKind::Animated);
    assert_eq!(report.artifact.frame_count, 20);
    assert_eq!(report.artifact.bytes, b"GIF89a".to_vec());
    assert_eq!(orch.state(), ExportState::Done);
}

#[test]
fn still_export_uses_quality_scale_and_png() {
    let orch = orchestrator();
    let mut r = FakeRasterizer::default();
    let mut cfg = config(ExportFormat::Still, true);
    cfg.canvas.export_quality = None;

    let report = orch
        .export(&mut r, &(), &cfg, &RecordingFactory::new())
        .unwrap()
        .into_report()
        .unwrap();

    assert_eq!(r.calls, vec![CaptureOptions::still(DEFAULT_EXPORT_QUALITY, false)]);
    assert_eq!((report.artifact.width, report.artifact.height), (W * 2, H * 2));
    assert_eq!(&report.artifact.bytes[..4], b"\x89PNG");
    assert_eq!(report.note, None);
}

#[test]
fn capture_failure_fails_once_without_retry() {
    let orch = orchestrator();
    let mut r = FakeRasterizer {
        fail_at: Some(3),
        ..FakeRasterizer::default()
    };
    let err = orch
        .export(
            &mut r,
            &(),
            &config(ExportFormat::Animated, true),
            &RecordingFactory::new(),
        )
        .unwrap_err();

    assert!(matches!(err, BannerError::Capture(_)));
    assert_eq!(r.calls.len(), 4);
    assert!(matches!(orch.state(), ExportState::Failed(msg) if msg.contains("tainted")));
    assert!(!orch.is_busy());
}

#[test]
fn encoder_error_fails_export() {
    let orch = orchestrator();
    let factory = RecordingFactory {
        fail_render: true,
        ..RecordingFactory::new()
    };
    let err = orch
        .export(
            &mut FakeRasterizer::default(),
            &(),
            &config(ExportFormat::Animated, true),
            &factory,
        )
        .unwrap_err();
    assert!(matches!(err, BannerError::Encode(_)));
    assert!(matches!(orch.state(), ExportState::Failed(_)));
}

/// Calls back into the orchestrator from inside a capture.
struct ReentrantRasterizer<'a> {
    orch: &'a ExportOrchestrator<RecordingClock>,
    cancel_at: Option<usize>,
    nested: Option<BannerResult<ExportOutcome>>,
    captures: usize,
}

impl Rasterizer for ReentrantRasterizer<'_> {
    type Root = ();

    fn capture(&mut self, _root: &(), _opts: &CaptureOptions) -> BannerResult<RasterImage> {
        if self.captures == 0 {
            let cfg = config(ExportFormat::Still, false);
            self.nested = Some(self.orch.export(
                &mut FakeRasterizer::default(),
                &(),
                &cfg,
                &RecordingFactory::new(),
            ));
        }
        if self.cancel_at == Some(self.captures) {
            self.orch.cancel();
        }
        self.captures += 1;
        Ok(RasterImage::filled(W, H, Rgba8::BLACK))
    }
}

#[test]
fn concurrent_export_is_rejected() {
    let orch = orchestrator();
    let mut r = ReentrantRasterizer {
        orch: &orch,
        cancel_at: None,
        nested: None,
        captures: 0,
    };
    let outcome = orch
        .export(
            &mut r,
            &(),
            &config(ExportFormat::Still, false),
            &RecordingFactory::new(),
        )
        .unwrap();

    assert!(matches!(outcome, ExportOutcome::Finished(_)));
    assert!(matches!(r.nested, Some(Err(BannerError::Busy))));
}

#[test]
fn cancelled_run_is_discarded_and_orchestrator_recovers() {
    let orch = orchestrator();
    let factory = RecordingFactory::new();
    let mut r = ReentrantRasterizer {
        orch: &orch,
        cancel_at: Some(5),
        nested: None,
        captures: 0,
    };
    let outcome = orch
        .export(&mut r, &(), &config(ExportFormat::Animated, true), &factory)
        .unwrap();

    assert_eq!(outcome, ExportOutcome::Stale);
    assert_eq!(r.captures, 6);
    assert!(factory.log.lock().unwrap().configs.is_empty());
    assert_eq!(orch.state(), ExportState::Idle);

    let again = orch
        .export(
            &mut FakeRasterizer::default(),
            &(),
            &config(ExportFormat::Still, false),
            &factory,
        )
        .unwrap();
    assert!(matches!(again, ExportOutcome::Finished(_)));
}

/// Cancels the run as soon as encoding is handed off.
struct CancellingFactory<'a> {
    orch: &'a ExportOrchestrator<RecordingClock>,
}

impl EncoderFactory for CancellingFactory<'_> {
    fn create(&self, _cfg: EncoderConfig) -> BannerResult<Box<dyn AnimationEncoder>> {
        self.orch.cancel();
        Ok(Box::new(RecordingEncoder {
            log: Arc::default(),
            frames: 0,
            fail_render: false,
        }))
    }
}

#[test]
fn late_encode_result_is_ignored() {
    let orch = orchestrator();
    let outcome = orch
        .export(
            &mut FakeRasterizer::default(),
            &(),
            &config(ExportFormat::Animated, true),
            &CancellingFactory { orch: &orch },
        )
        .unwrap();
    assert_eq!(outcome, ExportOutcome::Stale);
    assert_eq!(orch.state(), ExportState::Idle);
}

#[test]
fn zero_frames_is_rejected() {
    let orch = ExportOrchestrator::with_clock(
        RecordingClock::default(),
        ExportOptions {
            frame_count: 0,
            ..ExportOptions::default()
        },
    );
    let err = orch
        .export(
            &mut FakeRasterizer::default(),
            &(),
            &config(ExportFormat::Animated, true),
            &RecordingFactory::new(),
        )
        .unwrap_err();
    assert!(matches!(err, BannerError::Validation(_)));
    assert!(!orch.is_busy());
}

#[test]
fn frame_delay_is_floored() {
    let opts = ExportOptions {
        frame_count: 3,
        duration_ms: 1000,
        ..ExportOptions::default()
    };
    assert_eq!(opts.frame_delay_ms(), 333);
    assert_eq!(ExportOptions::default().frame_delay_ms(), 100);
}
