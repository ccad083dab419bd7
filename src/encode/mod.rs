//! Turning captured rasters into artifact bytes.

pub mod gif;
pub mod png;

use std::sync::mpsc;
use std::time::Duration;

use crate::foundation::core::RasterImage;
use crate::foundation::error::{BannerError, BannerResult};

pub use gif::{GifEncoder, GifEncoderFactory};
pub use png::encode_png;

/// Configuration handed to an encoder at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Default delay for frames added without an explicit one.
    pub frame_delay_ms: u32,
    /// Keep alpha; otherwise frames are flattened over white.
    pub transparent: bool,
}

impl EncoderConfig {
    pub fn validate(&self) -> BannerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BannerError::encode("encoder width/height must be non-zero"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(BannerError::encode(format!(
                "encoder size {}x{} exceeds {}px",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameOptions {
    pub delay_ms: u32,
}

/// Encoder contract for multi-frame artifacts.
///
/// Frames are copied on `add_frame`, so callers may reuse their buffers. `render` must not
/// block on pixel work; it hands the frames to a worker and returns a job to wait on.
pub trait AnimationEncoder: Send {
    fn add_frame(&mut self, frame: &RasterImage, opts: FrameOptions) -> BannerResult<()>;

    fn frame_count(&self) -> usize;

    fn render(self: Box<Self>) -> BannerResult<EncodeJob>;
}

/// Creates a fresh encoder per export run.
pub trait EncoderFactory {
    fn create(&self, cfg: EncoderConfig) -> BannerResult<Box<dyn AnimationEncoder>>;
}

/// Pending result of an encoder running off the calling thread.
#[derive(Debug)]
pub struct EncodeJob {
    rx: mpsc::Receiver<BannerResult<Vec<u8>>>,
}

impl EncodeJob {
    /// Run `work` on a named worker thread.
    pub fn spawn<F>(name: &str, work: F) -> BannerResult<Self>
    where
        F: FnOnce() -> BannerResult<Vec<u8>> + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        std::thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || {
                // The receiver may be gone if the run was abandoned.
                let _ = tx.send(work());
            })
            .map_err(|e| BannerError::encode(format!("failed to start encoder worker: {e}")))?;
        Ok(Self { rx })
    }

    /// A job that is already finished.
    pub fn ready(result: BannerResult<Vec<u8>>) -> Self {
        let (tx, rx) = mpsc::sync_channel(1);
        let _ = tx.send(result);
        Self { rx }
    }

    /// Block until the worker reports.
    pub fn wait(self) -> BannerResult<Vec<u8>> {
        self.rx.recv().map_err(|_| worker_lost())?
    }

    /// Wait up to `timeout`; `None` while the worker is still busy.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<BannerResult<Vec<u8>>> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(mpsc::RecvTimeoutError::Timeout) => None,
            Err(mpsc::RecvTimeoutError::Disconnected) => Some(Err(worker_lost())),
        }
    }
}

fn worker_lost() -> BannerError {
    BannerError::encode("encoder worker exited without a result")
}

/// Composite straight-alpha RGBA8 over an opaque background color.
pub fn flatten_to_opaque_rgba8(dst: &mut [u8], src: &[u8], bg_rgba: [u8; 4]) -> BannerResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BannerError::encode(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg = [
        u16::from(bg_rgba[0]),
        u16::from(bg_rgba[1]),
        u16::from(bg_rgba[2]),
    ];

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            let v = mul_div255(u16::from(s[c]), a) + mul_div255(bg[c], inv);
            d[c] = v.min(255) as u8;
        }
        d[3] = 255;
    }

    Ok(())
}

/// Owned copy of `img` with alpha flattened over white.
pub fn flatten_over_white(img: &RasterImage) -> BannerResult<RasterImage> {
    let mut out = vec![0u8; img.data.len()];
    flatten_to_opaque_rgba8(&mut out, &img.data, [255, 255, 255, 255])?;
    RasterImage::from_rgba8(img.width, img.height, out)
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}
