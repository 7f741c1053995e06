//! Immediate-mode 2D drawing surface.
//!
//! Coordinates are surface pixels as `f64`, origin top-left, y down. The
//! renderer only talks to [`Surface`]; the terminal framebuffer and the
//! recording [`DrawList`] are two backends for it.

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::COLUMNS_PER_PIXEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// `x` is where the text starts.
    Start,
    /// `x` is where the text ends.
    End,
}

/// A filled ellipse, optionally rotated about its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the `rx` axis, radians.
    pub rotation: f64,
}

impl Ellipse {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.rx <= 0.0 || self.ry <= 0.0 {
            return false;
        }
        let (sin, cos) = self.rotation.sin_cos();
        let dx = x - self.cx;
        let dy = y - self.cy;
        let u = dx * cos + dy * sin;
        let v = -dx * sin + dy * cos;
        (u / self.rx).powi(2) + (v / self.ry).powi(2) <= 1.0
    }
}

pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb);
    fn fill_ellipse(&mut self, ellipse: Ellipse, color: Rgb);
    /// Draw one line of text whose top edge is at `y`.
    fn fill_text(&mut self, x: f64, y: f64, text: &str, align: TextAlign, color: Rgb);
}

const SHAPE_GLYPH: char = '█';

/// Pixel index for a coordinate, if it is non-negative and representable.
fn pixel(v: f64) -> Option<u16> {
    (v.is_finite() && v >= 0.0 && v < u16::MAX as f64).then(|| v as u16)
}

/// Pixels whose centers fall in `[lo, hi)`.
fn covered(lo: f64, hi: f64, limit: u16) -> std::ops::Range<u16> {
    let start = (lo - 0.5).ceil().max(0.0);
    let end = (hi - 0.5).ceil().min(limit as f64);
    if !start.is_finite() || !end.is_finite() || start >= end {
        return 0..0;
    }
    start as u16..end as u16
}

impl FrameBuffer {
    fn pixel_width(&self) -> u16 {
        self.width() / COLUMNS_PER_PIXEL
    }

    fn paint(&mut self, px: u16, py: u16, color: Rgb) {
        let cell = Cell {
            ch: SHAPE_GLYPH,
            style: CellStyle::fg(color),
        };
        let col = px.saturating_mul(COLUMNS_PER_PIXEL);
        for dx in 0..COLUMNS_PER_PIXEL {
            self.set(col.saturating_add(dx), py, cell);
        }
    }

    /// Paint the pixel under `(x, y)`; used when a shape covers no pixel center.
    fn paint_point(&mut self, x: f64, y: f64, color: Rgb) {
        if let (Some(px), Some(py)) = (pixel(x), pixel(y)) {
            if px < self.pixel_width() && py < self.height() {
                self.paint(px, py, color);
            }
        }
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> (f64, f64) {
        (self.pixel_width() as f64, self.height() as f64)
    }

    fn clear(&mut self) {
        self.fill(Cell::default());
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        let cols = covered(x, x + w, self.pixel_width());
        let rows = covered(y, y + h, self.height());
        if cols.is_empty() || rows.is_empty() {
            self.paint_point(x + w / 2.0, y + h / 2.0, color);
            return;
        }
        for py in rows {
            for px in cols.clone() {
                self.paint(px, py, color);
            }
        }
    }

    fn fill_ellipse(&mut self, ellipse: Ellipse, color: Rgb) {
        let r = ellipse.rx.max(ellipse.ry);
        let cols = covered(ellipse.cx - r, ellipse.cx + r, self.pixel_width());
        let rows = covered(ellipse.cy - r, ellipse.cy + r, self.height());
        let mut painted = false;
        for py in rows {
            for px in cols.clone() {
                if ellipse.contains(px as f64 + 0.5, py as f64 + 0.5) {
                    self.paint(px, py, color);
                    painted = true;
                }
            }
        }
        if !painted {
            self.paint_point(ellipse.cx, ellipse.cy, color);
        }
    }

    fn fill_text(&mut self, x: f64, y: f64, text: &str, align: TextAlign, color: Rgb) {
        let Some(row) = pixel(y) else {
            return;
        };
        let anchor = (x * COLUMNS_PER_PIXEL as f64).round();
        let len = text.chars().count() as f64;
        let start = match align {
            TextAlign::Start => anchor,
            TextAlign::End => anchor - len,
        };
        // Clip on the left by dropping leading characters.
        let skip = if start < 0.0 { (-start) as usize } else { 0 };
        let Some(col) = pixel(start.max(0.0)) else {
            return;
        };
        let visible: String = text.chars().skip(skip).collect();
        self.put_str(col, row, &visible, CellStyle::fg(color));
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgb,
    },
    Ellipse {
        ellipse: Ellipse,
        color: Rgb,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        align: TextAlign,
        color: Rgb,
    },
}

/// A surface that records calls instead of rasterizing them.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded calls (the size is kept).
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn rect_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { .. }))
            .count()
    }

    pub fn ellipse_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Ellipse { .. }))
            .count()
    }

    /// Replay onto another surface.
    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        for op in &self.ops {
            match op {
                DrawOp::Clear => target.clear(),
                DrawOp::Rect { x, y, w, h, color } => target.fill_rect(*x, *y, *w, *h, *color),
                DrawOp::Ellipse { ellipse, color } => target.fill_ellipse(*ellipse, *color),
                DrawOp::Text {
                    x,
                    y,
                    text,
                    align,
                    color,
                } => target.fill_text(*x, *y, text, *align, *color),
            }
        }
    }
}

impl Surface for DrawList {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        self.ops.push(DrawOp::Rect { x, y, w, h, color });
    }

    fn fill_ellipse(&mut self, ellipse: Ellipse, color: Rgb) {
        self.ops.push(DrawOp::Ellipse { ellipse, color });
    }

    fn fill_text(&mut self, x: f64, y: f64, text: &str, align: TextAlign, color: Rgb) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            align,
            color,
        });
    }
}
