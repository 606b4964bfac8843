//! Camera-side collaborator and the stable frame buffer the phases read from.

use std::path::Path;

use crate::foundation::core::{Canvas, Color, Rect};
use crate::foundation::error::{BoothError, BoothResult};

/// A captured frame as straight RGBA8, tightly packed, row-major.
///
/// The buffer always holds `width * height * 4` bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> BoothResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if data.len() != expected {
            return Err(BoothError::capture(format!(
                "frame byte len {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn blank(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let px = [color.r, color.g, color.b, color.a];
        let data = px
            .iter()
            .copied()
            .cycle()
            .take((width as usize) * (height as usize) * 4)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[i..i + 4];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    /// Iterates the pixels inside `region`, clipped to the frame. Inverted boxes are normalised.
    pub fn pixels_in(&self, region: Rect) -> impl Iterator<Item = Color> + '_ {
        let r = region.abs();
        let x0 = r.x0.floor().clamp(0.0, f64::from(self.width)) as u32;
        let x1 = r.x1.ceil().clamp(0.0, f64::from(self.width)) as u32;
        let y0 = r.y0.floor().clamp(0.0, f64::from(self.height)) as u32;
        let y1 = r.y1.ceil().clamp(0.0, f64::from(self.height)) as u32;
        (y0..y1).flat_map(move |y| (x0..x1).filter_map(move |x| self.pixel(x, y)))
    }

    pub fn to_image(&self) -> BoothResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| BoothError::capture("frame buffer size mismatch"))
    }

    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

/// Source of live frames. Each call writes the current frame into a fresh, stable buffer.
#[allow(async_fn_in_trait)]
pub trait CaptureSource {
    async fn capture_frame(&mut self, target: Canvas) -> BoothResult<Frame>;
}

/// Mirrors `src` horizontally and scales it so its height fills `target`, centred horizontally.
pub fn mirror_fill(src: &image::RgbaImage, target: Canvas) -> Frame {
    let (sw, sh) = src.dimensions();
    let mut out = image::RgbaImage::new(target.width, target.height);
    if sw == 0 || sh == 0 {
        return Frame::from_image(out);
    }

    let scale = f64::from(target.height) / f64::from(sh);
    let scaled_w = ((f64::from(sw) * scale).round() as u32).max(1);
    let mirrored = if (scaled_w, target.height) == (sw, sh) {
        image::imageops::flip_horizontal(src)
    } else {
        let scaled = image::imageops::resize(
            src,
            scaled_w,
            target.height,
            image::imageops::FilterType::Triangle,
        );
        image::imageops::flip_horizontal(&scaled)
    };

    let offset = (i64::from(target.width) - i64::from(scaled_w)) / 2;
    image::imageops::replace(&mut out, &mirrored, offset, 0);
    Frame::from_image(out)
}

/// Serves one still image as if it were a live camera.
#[derive(Clone, Debug)]
pub struct StillCapture {
    source: image::RgbaImage,
}

impl StillCapture {
    pub fn new(source: image::RgbaImage) -> Self {
        Self { source }
    }

    pub fn open(path: &Path) -> BoothResult<Self> {
        let img = image::open(path).map_err(|e| {
            BoothError::capture(format!("failed to open '{}': {e}", path.display()))
        })?;
        Ok(Self::new(img.to_rgba8()))
    }
}

impl CaptureSource for StillCapture {
    async fn capture_frame(&mut self, target: Canvas) -> BoothResult<Frame> {
        Ok(mirror_fill(&self.source, target))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/mod.rs"]
mod tests;
