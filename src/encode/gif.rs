use image::codecs::gif::{GifEncoder as ImageGifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use rayon::prelude::*;

use crate::encode::{
    AnimationEncoder, EncodeJob, EncoderConfig, EncoderFactory, FrameOptions, flatten_over_white,
};
use crate::foundation::core::RasterImage;
use crate::foundation::error::{BannerError, BannerResult};

/// Worker threads used for per-frame pixel preparation.
pub const DEFAULT_GIF_WORKERS: usize = 2;
/// `image` quantizer speed, 1 (best) to 30 (fastest).
pub const DEFAULT_GIF_SPEED: i32 = 10;

#[derive(Clone, Copy, Debug)]
pub struct GifEncoderFactory {
    pub workers: usize,
    pub speed: i32,
}

impl Default for GifEncoderFactory {
    fn default() -> Self {
        Self {
            workers: DEFAULT_GIF_WORKERS,
            speed: DEFAULT_GIF_SPEED,
        }
    }
}

impl EncoderFactory for GifEncoderFactory {
    fn create(&self, cfg: EncoderConfig) -> BannerResult<Box<dyn AnimationEncoder>> {
        Ok(Box::new(GifEncoder::new(cfg, self.workers, self.speed)?))
    }
}

/// Looping GIF encoder.
///
/// Frames are buffered as owned copies; `render` moves them to a worker thread which
/// prepares pixels on a small rayon pool and then quantizes and writes frames in order.
#[derive(Debug)]
pub struct GifEncoder {
    cfg: EncoderConfig,
    workers: usize,
    speed: i32,
    frames: Vec<(RasterImage, FrameOptions)>,
}

impl GifEncoder {
    pub fn new(cfg: EncoderConfig, workers: usize, speed: i32) -> BannerResult<Self> {
        cfg.validate()?;
        if workers == 0 {
            return Err(BannerError::encode("gif workers must be >= 1"));
        }
        Ok(Self {
            cfg,
            workers,
            speed: speed.clamp(1, 30),
            frames: Vec::new(),
        })
    }
}

impl AnimationEncoder for GifEncoder {
    fn add_frame(&mut self, frame: &RasterImage, opts: FrameOptions) -> BannerResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(BannerError::encode(format!(
                "frame {} is {}x{}, expected {}x{}",
                self.frames.len(),
                frame.width,
                frame.height,
                self.cfg.width,
                self.cfg.height
            )));
        }
        self.frames.push((frame.clone(), opts));
        Ok(())
    }

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn render(self: Box<Self>) -> BannerResult<EncodeJob> {
        if self.frames.is_empty() {
            return Err(BannerError::encode("no frames to encode"));
        }
        let GifEncoder {
            cfg,
            workers,
            speed,
            frames,
        } = *self;
        tracing::debug!(frames = frames.len(), workers, "gif render queued");
        EncodeJob::spawn("bannerkit-gif", move || {
            encode_gif(&cfg, &frames, workers, speed)
        })
    }
}

fn build_thread_pool(threads: usize) -> BannerResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("bannerkit-gif-{i}"))
        .build()
        .map_err(|e| BannerError::encode(format!("failed to build rayon thread pool: {e}")))
}

fn encode_gif(
    cfg: &EncoderConfig,
    frames: &[(RasterImage, FrameOptions)],
    workers: usize,
    speed: i32,
) -> BannerResult<Vec<u8>> {
    let pool = build_thread_pool(workers)?;
    let buffers = pool.install(|| {
        frames
            .par_iter()
            .map(|(img, _)| prepare_frame(img, cfg.transparent))
            .collect::<BannerResult<Vec<_>>>()
    })?;

    let mut out = Vec::new();
    {
        let mut enc = ImageGifEncoder::new_with_speed(&mut out, speed);
        enc.set_repeat(Repeat::Infinite)
            .map_err(|e| BannerError::encode(format!("gif header: {e}")))?;
        for (i, (buf, (_, opts))) in buffers.into_iter().zip(frames).enumerate() {
            let delay_ms = if opts.delay_ms == 0 {
                cfg.frame_delay_ms
            } else {
                opts.delay_ms
            };
            let frame = Frame::from_parts(buf, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1));
            enc.encode_frame(frame)
                .map_err(|e| BannerError::encode(format!("gif frame {i}: {e}")))?;
        }
    }
    tracing::debug!(bytes = out.len(), "gif encoded");
    Ok(out)
}

fn prepare_frame(img: &RasterImage, transparent: bool) -> BannerResult<RgbaImage> {
    if transparent {
        img.to_rgba_image()
    } else {
        flatten_over_white(img)?.to_rgba_image()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
