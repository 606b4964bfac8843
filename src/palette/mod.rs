//! Colour sampling: a region of a frame becomes an ordered palette and its prominent colour.

use std::collections::HashMap;

use crate::capture::Frame;
use crate::foundation::core::{Color, Rect};
use crate::foundation::error::{BoothError, BoothResult};
use crate::geometry::bbox::{BodyRegion, BoundingBox};

/// An ordered palette and the index of its prominent colour.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorSample {
    palette: Vec<Color>,
    prominent: usize,
}

impl ColorSample {
    /// Fails unless `prominent` is one of `palette`'s colours.
    pub fn new(palette: Vec<Color>, prominent: Color) -> BoothResult<Self> {
        let index = palette
            .iter()
            .position(|&c| c == prominent)
            .ok_or_else(|| {
                BoothError::sampling(format!("prominent colour {prominent} is not in the palette"))
            })?;
        Ok(Self {
            palette,
            prominent: index,
        })
    }

    pub fn with_index(palette: Vec<Color>, prominent: usize) -> BoothResult<Self> {
        if prominent >= palette.len() {
            return Err(BoothError::sampling(format!(
                "prominent index {prominent} out of range for {} colours",
                palette.len()
            )));
        }
        Ok(Self { palette, prominent })
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn prominent(&self) -> Color {
        self.palette[self.prominent]
    }

    pub fn prominent_index(&self) -> usize {
        self.prominent
    }
}

/// Maps a region of a frame to a [`ColorSample`].
pub trait PaletteSampler {
    fn sample(&self, frame: &Frame, region: &BoundingBox) -> BoothResult<ColorSample>;
}

/// Samples all six regions, preserving order.
pub fn sample_regions<S: PaletteSampler + ?Sized>(
    sampler: &S,
    frame: &Frame,
    regions: &[BoundingBox; 6],
) -> BoothResult<[ColorSample; 6]> {
    let samples = regions
        .iter()
        .map(|region| sampler.sample(frame, region))
        .collect::<BoothResult<Vec<_>>>()?;
    samples
        .try_into()
        .map_err(|_| BoothError::sampling("expected exactly six samples"))
}

/// Popularity quantiser: buckets pixels on the top `bits` of each channel, keeps the most
/// populated buckets and reports each as the mean colour of its members.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HistogramSampler {
    pub colors: usize,
    pub bits: u8,
}

impl Default for HistogramSampler {
    fn default() -> Self {
        Self { colors: 7, bits: 4 }
    }
}

#[derive(Default)]
struct Bucket {
    count: u64,
    sum: [u64; 3],
}

impl HistogramSampler {
    fn key(&self, c: Color) -> u32 {
        let shift = 8 - u32::from(self.bits.clamp(1, 8));
        (u32::from(c.r >> shift) << 16) | (u32::from(c.g >> shift) << 8) | u32::from(c.b >> shift)
    }

    fn histogram(&self, pixels: impl Iterator<Item = Color>) -> HashMap<u32, Bucket> {
        let mut buckets: HashMap<u32, Bucket> = HashMap::new();
        for c in pixels.filter(|c| c.a > 0) {
            let b = buckets.entry(self.key(c)).or_default();
            b.count += 1;
            b.sum[0] += u64::from(c.r);
            b.sum[1] += u64::from(c.g);
            b.sum[2] += u64::from(c.b);
        }
        buckets
    }
}

/// Pulls `rect` inside the frame, keeping at least one pixel on each axis. A box past an edge
/// becomes the strip of pixels along that edge. `None` for an empty frame.
fn clamp_into(frame: &Frame, rect: Rect) -> Option<Rect> {
    if frame.width() == 0 || frame.height() == 0 {
        return None;
    }
    let (w, h) = (f64::from(frame.width()), f64::from(frame.height()));
    let r = rect.abs();
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    let x0 = finite(r.x0).floor().clamp(0.0, w - 1.0);
    let x1 = finite(r.x1).ceil().clamp(x0 + 1.0, w);
    let y0 = finite(r.y0).floor().clamp(0.0, h - 1.0);
    let y1 = finite(r.y1).ceil().clamp(y0 + 1.0, h);
    Some(Rect::new(x0, y0, x1, y1))
}

impl PaletteSampler for HistogramSampler {
    /// Never fails on geometry: a region with no opaque pixels falls back to the nearest pixels
    /// inside the frame, and a frame with none at all yields a single transparent colour.
    fn sample(&self, frame: &Frame, region: &BoundingBox) -> BoothResult<ColorSample> {
        let mut buckets = self.histogram(frame.pixels_in(region.rect()));
        if buckets.is_empty()
            && let Some(edge) = clamp_into(frame, region.rect())
        {
            tracing::debug!(region = ?region.rect(), ?edge, "region empty, sampling frame edge");
            buckets = self.histogram(frame.pixels_in(edge));
        }
        if buckets.is_empty() {
            tracing::debug!(region = ?region.rect(), "no opaque pixels to sample");
            return ColorSample::with_index(vec![Color::TRANSPARENT], 0);
        }

        let mut ranked: Vec<(u32, Bucket)> = buckets.into_iter().collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(&b.0)));
        ranked.truncate(self.colors.max(1));

        let palette = ranked
            .iter()
            .map(|(_, b)| {
                let mean = |s: u64| ((s + b.count / 2) / b.count) as u8;
                Color::rgb(mean(b.sum[0]), mean(b.sum[1]), mean(b.sum[2]))
            })
            .collect();
        ColorSample::with_index(palette, 0)
    }
}

/// The published result: one prominent colour per [`BodyRegion`], in [`BodyRegion::ALL`] order.
///
/// Serialises as `{"colors": ["#rrggbb", ...]}`; exactly six entries are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Swatch {
    pub colors: [Color; 6],
}

impl Swatch {
    pub fn new(colors: [Color; 6]) -> Self {
        Self { colors }
    }

    pub fn from_samples(samples: &[ColorSample; 6]) -> Self {
        Self::new(samples.each_ref().map(ColorSample::prominent))
    }

    pub fn from_json(json: &str) -> BoothResult<Self> {
        serde_json::from_str(json).map_err(|e| BoothError::serde(format!("invalid swatch: {e}")))
    }

    pub fn to_json(&self) -> BoothResult<String> {
        serde_json::to_string(self).map_err(|e| BoothError::serde(e.to_string()))
    }

    pub fn get(&self, region: BodyRegion) -> Color {
        self.colors[region as usize]
    }

    pub fn hex(&self) -> [String; 6] {
        self.colors.map(Color::to_hex)
    }
}

impl std::fmt::Display for Swatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, c) in self.colors.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", c.to_hex())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/mod.rs"]
mod tests;
