//! Attribution plots as JPEG images
//!
//! The signal is drawn as a black polyline with its value on the horizontal
//! axis and the sample grid `t` on the vertical axis. Every sample carries a
//! translucent disc colored on a blue-white-red scale by its attribution
//! toward the predicted class, normalized by the largest magnitude.
//!
//! [`render_curve`] draws the sweep's train and test error against width.

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sweep::SweepEntry;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
const LINE: Rgb<u8> = Rgb([0, 0, 0]);
const GRID_DIVISIONS: u32 = 8;
const MARKER_ALPHA: f32 = 0.7;
const TRAIN_CURVE: Rgb<u8> = Rgb([240, 160, 160]);
const TEST_CURVE: Rgb<u8> = Rgb([30, 60, 220]);

/// Image settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Radius of the attribution discs
    pub marker_radius: u32,
    /// JPEG quality, 1-100
    pub quality: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            marker_radius: 7,
            quality: 90,
        }
    }
}

/// Blue-white-red color for `s` in `[-1, 1]`
pub fn bwr(s: f32) -> Rgb<u8> {
    let s = if s.is_finite() { s.clamp(-1.0, 1.0) } else { 0.0 };
    let fade = |v: f32| (255.0 * v).round() as u8;
    if s < 0.0 {
        Rgb([fade(1.0 + s), fade(1.0 + s), 255])
    } else {
        Rgb([255, fade(1.0 - s), fade(1.0 - s)])
    }
}

/// Draw one attribution plot
pub fn render(
    signal: ArrayView1<'_, f32>,
    t: ArrayView1<'_, f32>,
    scores: ArrayView1<'_, f32>,
    config: &RenderConfig,
) -> Result<RgbImage> {
    if t.len() != signal.len() || scores.len() != signal.len() {
        return Err(Error::ShapeMismatch {
            context: "rendered signal",
            expected: signal.len(),
            actual: if t.len() != signal.len() {
                t.len()
            } else {
                scores.len()
            },
        });
    }

    let mut canvas = Canvas::new(config.width, config.height);
    canvas.grid();

    let x_axis = Axis::fit(signal.iter().copied());
    let y_axis = Axis::fit(t.iter().copied());
    let points: Vec<(f32, f32)> = signal
        .iter()
        .zip(t.iter())
        .map(|(&v, &ti)| canvas.to_pixel(x_axis.unit(v), y_axis.unit(ti)))
        .collect();

    for pair in points.windows(2) {
        canvas.line(pair[0], pair[1], LINE);
    }

    let peak = scores.iter().fold(0.0f32, |m, &s| m.max(s.abs()));
    for (&(px, py), &score) in points.iter().zip(scores.iter()) {
        let shade = if peak > 0.0 { score / peak } else { 0.0 };
        canvas.disc(px, py, config.marker_radius as f32, bwr(shade));
    }

    Ok(canvas.image)
}

/// Draw train (faded red) and test (blue) error against hidden width
///
/// The error axis always spans 0 to 100 percent. An empty sweep yields an
/// empty grid.
pub fn render_curve(entries: &[SweepEntry], config: &RenderConfig) -> Result<RgbImage> {
    let mut canvas = Canvas::new(config.width, config.height);
    canvas.grid();

    let x_axis = Axis::fit(entries.iter().map(|e| e.width as f32));
    let y_axis = Axis {
        min: 0.0,
        span: 100.0,
    };
    let radius = (config.marker_radius as f32 * 0.5).max(1.0);
    for (error, color) in [
        (entries.iter().map(|e| e.train_error).collect::<Vec<_>>(), TRAIN_CURVE),
        (entries.iter().map(|e| e.test_error).collect::<Vec<_>>(), TEST_CURVE),
    ] {
        let points: Vec<(f32, f32)> = entries
            .iter()
            .zip(&error)
            .map(|(entry, &err)| {
                canvas.to_pixel(x_axis.unit(entry.width as f32), y_axis.unit(err))
            })
            .collect();
        for pair in points.windows(2) {
            canvas.line(pair[0], pair[1], color);
        }
        for &(px, py) in &points {
            canvas.disc(px, py, radius, color);
        }
    }

    Ok(canvas.image)
}

/// Encode an image as JPEG bytes
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
        encoder.encode_image(image)?;
    }
    Ok(bytes)
}

/// Linear map of a data range onto `[0, 1]` with a small margin
struct Axis {
    min: f32,
    span: f32,
}

impl Axis {
    fn fit(values: impl Iterator<Item = f32>) -> Self {
        let (min, max) = values
            .filter(|v| v.is_finite())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if !min.is_finite() {
            return Self {
                min: -1.0,
                span: 2.0,
            };
        }
        let span = (max - min).max(1e-6);
        let pad = 0.05 * span;
        Self {
            min: min - pad,
            span: span + 2.0 * pad,
        }
    }

    fn unit(&self, v: f32) -> f32 {
        (v - self.min) / self.span
    }
}

struct Canvas {
    image: RgbImage,
    margin: f32,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        let image = RgbImage::from_pixel(width, height, BACKGROUND);
        let margin = 0.08 * width.min(height) as f32;
        Self { image, margin }
    }

    fn plot_size(&self) -> (f32, f32) {
        (
            self.image.width() as f32 - 2.0 * self.margin,
            self.image.height() as f32 - 2.0 * self.margin,
        )
    }

    /// Unit coordinates to pixels; `uy = 1` is the top of the plot
    fn to_pixel(&self, ux: f32, uy: f32) -> (f32, f32) {
        let (w, h) = self.plot_size();
        (self.margin + ux * w, self.margin + (1.0 - uy) * h)
    }

    fn grid(&mut self) {
        for i in 0..=GRID_DIVISIONS {
            let u = i as f32 / GRID_DIVISIONS as f32;
            let (x0, y0) = self.to_pixel(u, 0.0);
            let (x1, y1) = self.to_pixel(u, 1.0);
            self.line((x0, y0), (x1, y1), GRID);
            let (x0, y0) = self.to_pixel(0.0, u);
            let (x1, y1) = self.to_pixel(1.0, u);
            self.line((x0, y0), (x1, y1), GRID);
        }
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: f32) {
        let (width, height) = self.image.dimensions();
        if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for (dst, &src) in pixel.0.iter_mut().zip(color.0.iter()) {
            let blended = alpha * f32::from(src) + (1.0 - alpha) * f32::from(*dst);
            *dst = blended.round().clamp(0.0, 255.0) as u8;
        }
    }

    /// Two-pixel-wide line
    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb<u8>) {
        let steps = (to.0 - from.0).abs().max((to.1 - from.1).abs()).ceil().max(1.0) as i64;
        for step in 0..=steps {
            let f = step as f32 / steps as f32;
            let x = (from.0 + f * (to.0 - from.0)).round() as i64;
            let y = (from.1 + f * (to.1 - from.1)).round() as i64;
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                self.put(x + dx, y + dy, color, 1.0);
            }
        }
    }

    fn disc(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb<u8>) {
        let r = radius.ceil() as i64;
        let (cx_i, cy_i) = (cx.round() as i64, cy.round() as i64);
        for dy in -r..=r {
            for dx in -r..=r {
                if ((dx * dx + dy * dy) as f32) <= radius * radius {
                    self.put(cx_i + dx, cy_i + dy, color, MARKER_ALPHA);
                }
            }
        }
    }
}
