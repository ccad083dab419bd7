use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::encode::{EncoderConfig, EncoderFactory, FrameOptions, encode_png};
use crate::export::artifact::{Artifact, ArtifactKind};
use crate::export::clock::{Clock, SystemClock};
use crate::foundation::core::RasterImage;
use crate::foundation::error::{BannerError, BannerResult};
use crate::raster::{CaptureOptions, Rasterizer};
use crate::scene::model::{Configuration, ExportFormat};

/// Scale used for still captures when the configuration leaves it unset.
pub const DEFAULT_EXPORT_QUALITY: f64 = 2.0;

/// Where an export run currently is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportState {
    #[default]
    Idle,
    CapturingStill,
    CapturingFrame(u32),
    WaitingInterval(u32),
    Encoding,
    Done,
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Frames sampled for an animated export.
    pub frame_count: u32,
    /// Total sampled duration; each frame gets `duration_ms / frame_count`.
    pub duration_ms: u32,
    /// How often a pending encode is checked for cancellation.
    pub encode_poll: Duration,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            frame_count: 20,
            duration_ms: 2000,
            encode_poll: Duration::from_millis(25),
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> BannerResult<()> {
        if self.frame_count == 0 {
            return Err(BannerError::validation("export frame_count must be >= 1"));
        }
        if self.encode_poll.is_zero() {
            return Err(BannerError::validation("export encode_poll must be non-zero"));
        }
        Ok(())
    }

    pub fn frame_delay_ms(&self) -> u32 {
        self.duration_ms / self.frame_count.max(1)
    }
}

/// Informational notes attached to a successful export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportNote {
    /// Animated output was requested but nothing is animated; a still was produced.
    Downgraded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportReport {
    pub artifact: Artifact,
    pub note: Option<ExportNote>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    Finished(ExportReport),
    /// The run was cancelled; whatever it produced was dropped.
    Stale,
}

impl ExportOutcome {
    pub fn into_report(self) -> Option<ExportReport> {
        match self {
            Self::Finished(r) => Some(r),
            Self::Stale => None,
        }
    }
}

/// Drives the rasterizer and encoder for one visual root.
///
/// At most one run is in flight; a second call while one runs gets [`BannerError::Busy`].
/// [`cancel`](Self::cancel) may be called from any thread: the running export notices at its
/// next suspension point (capture, interval, encode poll) and returns
/// [`ExportOutcome::Stale`].
#[derive(Debug)]
pub struct ExportOrchestrator<C: Clock = SystemClock> {
    clock: C,
    options: ExportOptions,
    generation: AtomicU64,
    busy: AtomicBool,
    state: Mutex<ExportState>,
}

impl ExportOrchestrator<SystemClock> {
    pub fn new(options: ExportOptions) -> Self {
        Self::with_clock(SystemClock, options)
    }
}

impl Default for ExportOrchestrator<SystemClock> {
    fn default() -> Self {
        Self::new(ExportOptions::default())
    }
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<C: Clock> ExportOrchestrator<C> {
    pub fn with_clock(clock: C, options: ExportOptions) -> Self {
        Self {
            clock,
            options,
            generation: AtomicU64::new(0),
            busy: AtomicBool::new(false),
            state: Mutex::new(ExportState::Idle),
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn state(&self) -> ExportState {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Mark the in-flight run (if any) stale.
    pub fn cancel(&self) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(generation, "export cancelled");
    }

    fn set_state(&self, next: ExportState) {
        tracing::debug!(state = ?next, "export state");
        *self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = next;
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::Acquire) != generation
    }

    fn stale(&self) -> BannerResult<ExportOutcome> {
        tracing::warn!("discarding results of a cancelled export");
        self.set_state(ExportState::Idle);
        Ok(ExportOutcome::Stale)
    }

    fn fail(&self, err: BannerError) -> BannerError {
        tracing::warn!(error = %err, "export failed");
        self.set_state(ExportState::Failed(err.to_string()));
        err
    }

    /// Export `root` as configured by `config`.
    ///
    /// Animated output needs both `exportFormat = animated` and at least one active
    /// animation; otherwise a still is produced and the report carries
    /// [`ExportNote::Downgraded`]. Failures are reported once, with no retry.
    #[tracing::instrument(skip_all, fields(format = ?config.canvas.export_format))]
    pub fn export<R>(
        &self,
        rasterizer: &mut R,
        root: &R::Root,
        config: &Configuration,
        encoders: &dyn EncoderFactory,
    ) -> BannerResult<ExportOutcome>
    where
        R: Rasterizer + ?Sized,
    {
        // Read before claiming the root, so a cancel from anyone who sees us busy counts.
        let generation = self.generation.load(Ordering::Acquire);
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(BannerError::Busy);
        }
        let _guard = BusyGuard(&self.busy);
        self.options.validate()?;

        let wants_animation = config.canvas.export_format == ExportFormat::Animated;
        if wants_animation && config.has_active_animation() {
            tracing::info!(frames = self.options.frame_count, "animated export started");
            return self.export_animated(rasterizer, root, config, encoders, generation);
        }

        let note = if wants_animation {
            tracing::warn!("nothing is animated; exporting a still image instead");
            Some(ExportNote::Downgraded)
        } else {
            None
        };
        tracing::info!("still export started");
        self.export_still(rasterizer, root, config, generation, note)
    }

    fn export_still<R>(
        &self,
        rasterizer: &mut R,
        root: &R::Root,
        config: &Configuration,
        generation: u64,
        note: Option<ExportNote>,
    ) -> BannerResult<ExportOutcome>
    where
        R: Rasterizer + ?Sized,
    {
        let transparent = config.canvas.transparent_background;
        let scale = config.canvas.export_quality.unwrap_or(DEFAULT_EXPORT_QUALITY);

        self.set_state(ExportState::CapturingStill);
        let captured = rasterizer.capture(root, &CaptureOptions::still(scale, transparent));
        if self.is_stale(generation) {
            return self.stale();
        }
        let raster = captured.map_err(|e| self.fail(e))?;

        let bytes = encode_png(&raster, transparent).map_err(|e| self.fail(e))?;
        let artifact = Artifact {
            kind: ArtifactKind::Still,
            bytes,
            width: raster.width,
            height: raster.height,
            frame_count: 1,
        };

        self.set_state(ExportState::Done);
        tracing::info!(bytes = artifact.bytes.len(), "still export finished");
        Ok(ExportOutcome::Finished(ExportReport { artifact, note }))
    }

    fn export_animated<R>(
        &self,
        rasterizer: &mut R,
        root: &R::Root,
        config: &Configuration,
        encoders: &dyn EncoderFactory,
        generation: u64,
    ) -> BannerResult<ExportOutcome>
    where
        R: Rasterizer + ?Sized,
    {
        let transparent = config.canvas.transparent_background;
        let frame_count = self.options.frame_count;
        let delay_ms = self.options.frame_delay_ms();
        let opts = CaptureOptions::frame(transparent);

        // Strictly sequential: capture, wait, capture. Never two captures at once.
        let mut frames: Vec<RasterImage> = Vec::with_capacity(frame_count as usize);
        for i in 0..frame_count {
            self.set_state(ExportState::CapturingFrame(i));
            let captured = rasterizer.capture(root, &opts);
            if self.is_stale(generation) {
                return self.stale();
            }
            frames.push(captured.map_err(|e| self.fail(e))?);

            if i + 1 < frame_count {
                self.set_state(ExportState::WaitingInterval(i));
                self.clock.sleep(Duration::from_millis(u64::from(delay_ms)));
                if self.is_stale(generation) {
                    return self.stale();
                }
            }
        }

        let cfg = EncoderConfig {
            width: config.canvas.width,
            height: config.canvas.height,
            frame_delay_ms: delay_ms,
            transparent,
        };
        let mut encoder = encoders.create(cfg).map_err(|e| self.fail(e))?;
        for frame in &frames {
            encoder
                .add_frame(frame, FrameOptions { delay_ms })
                .map_err(|e| self.fail(e))?;
        }
        drop(frames);

        self.set_state(ExportState::Encoding);
        let job = encoder.render().map_err(|e| self.fail(e))?;
        let encoded = loop {
            if self.is_stale(generation) {
                return self.stale();
            }
            if let Some(result) = job.wait_timeout(self.options.encode_poll) {
                break result;
            }
        };
        if self.is_stale(generation) {
            return self.stale();
        }
        let bytes = encoded.map_err(|e| self.fail(e))?;

        let artifact = Artifact {
            kind: ArtifactKind::Animated,
            bytes,
            width: cfg.width,
            height: cfg.height,
            frame_count,
        };
        self.set_state(ExportState::Done);
        tracing::info!(
            bytes = artifact.bytes.len(),
            frames = frame_count,
            "animated export finished"
        );
        Ok(ExportOutcome::Finished(ExportReport {
            artifact,
            note: None,
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/orchestrator.rs"]
mod tests;
