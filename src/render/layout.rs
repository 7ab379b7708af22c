//! Pixel geometry of the broken-axis chart.
//!
//! Everything here is plain arithmetic so the chart shape can be checked
//! without touching a drawing backend. Pixel y grows downwards; axes-relative
//! coordinates follow the plotting convention of y growing upwards.

use crate::domain::model::CategoryCounts;
use crate::utils::error::{ChartError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_UPPER: YRange = YRange {
    min: 9900.0,
    max: 10000.0,
};
pub const DEFAULT_LOWER: YRange = YRange {
    min: 0.0,
    max: 700.0,
};

const BAR_WIDTH: f64 = 0.8;
const X_MARGIN: f64 = 0.05;

/// Largest canvas side, in pixels, a figure may render to.
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// Canvas size and the fraction of it reserved around the panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureSpec {
    pub width: f64,
    pub height: f64,
    pub dpi: f64,
    pub margin: f64,
    /// Gap between the panels as a fraction of the average panel height.
    pub panel_gap: f64,
    pub title: String,
}

impl Default for FigureSpec {
    fn default() -> Self {
        Self {
            width: 24.0,
            height: 13.5,
            dpi: 80.0,
            margin: 0.05,
            panel_gap: 0.2,
            title: "Language Distribution".to_string(),
        }
    }
}

impl FigureSpec {
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpi).round() as u32,
            (self.height * self.dpi).round() as u32,
        )
    }

    /// Rejects canvases that are empty or larger than [`MAX_CANVAS_SIDE`] on
    /// either side.
    pub fn check_canvas(&self) -> Result<()> {
        let (width, height) = self.pixel_size();
        if width == 0 || height == 0 {
            return Err(ChartError::ConfigValidationError {
                field: "figure".to_string(),
                message: format!("figure renders to an empty {}x{} canvas", width, height),
            });
        }
        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(ChartError::ConfigValidationError {
                field: "figure".to_string(),
                message: format!(
                    "figure renders to {}x{} pixels; each side must be at most {}",
                    width, height, MAX_CANVAS_SIDE
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    /// Use the configured ranges as given.
    #[default]
    Fixed,
    /// Derive both ranges from the count distribution.
    Adaptive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    pub scale: AxisScale,
    pub upper: YRange,
    pub lower: YRange,
    /// Half-length of the break marks in axes-relative units.
    pub break_mark: f64,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            scale: AxisScale::Fixed,
            upper: DEFAULT_UPPER,
            lower: DEFAULT_LOWER,
            break_mark: 0.005,
        }
    }
}

impl AxisSettings {
    /// The (upper, lower) ranges to plot for `counts`.
    pub fn resolve(&self, counts: &CategoryCounts) -> (YRange, YRange) {
        match self.scale {
            AxisScale::Fixed => (self.upper, self.lower),
            AxisScale::Adaptive => adaptive_ranges(counts),
        }
    }
}

/// Upper panel for the outliers, lower panel for the bulk of the distribution.
///
/// lower = [0, p95 + margin], upper = [ceil10(max(1, p99)), max + margin],
/// with margin = max(1, ceil(5%)). When the upper floor would reach the upper
/// ceiling the upper panel continues from the top of the lower one.
pub fn adaptive_ranges(counts: &CategoryCounts) -> (YRange, YRange) {
    let mut sorted: Vec<u64> = counts.values().collect();
    sorted.sort_unstable();

    let p95 = percentile(&sorted, 0.95);
    let p99 = percentile(&sorted, 0.99);
    let max = sorted.last().copied().unwrap_or(0) as f64;

    let lower = YRange {
        min: 0.0,
        max: p95 + margin(p95),
    };
    let upper_max = max + margin(max);
    let mut upper_min = ((p99.max(1.0)) / 10.0).ceil() * 10.0;
    if upper_min >= upper_max {
        upper_min = lower.max.min(upper_max - 1.0);
    }

    (
        YRange {
            min: upper_min,
            max: upper_max,
        },
        lower,
    )
}

// Nearest-rank percentile over ascending values.
fn percentile(sorted: &[u64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (q * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1] as f64
}

fn margin(value: f64) -> f64 {
    (value / 20.0).ceil().max(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Pixel position of an axes-relative point.
    pub fn at(&self, u: f64, v: f64) -> (f64, f64) {
        (self.left + u * self.width(), self.bottom - v * self.height())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spine {
    Top,
    Bottom,
    Left,
    Right,
}

/// A straight line in pixel coordinates.
pub type Segment = ((f64, f64), (f64, f64));

/// The part of one bar that falls inside a panel, in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpan {
    pub index: usize,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub rect: Rect,
    pub y_range: YRange,
    pub spines: Vec<Spine>,
    pub break_marks: Vec<Segment>,
    pub bars: Vec<BarSpan>,
    pub show_x_labels: bool,
}

impl Panel {
    pub fn has_spine(&self, spine: Spine) -> bool {
        self.spines.contains(&spine)
    }

    pub fn spine_segment(&self, spine: Spine) -> Segment {
        let r = self.rect;
        match spine {
            Spine::Top => ((r.left, r.top), (r.right, r.top)),
            Spine::Bottom => ((r.left, r.bottom), (r.right, r.bottom)),
            Spine::Left => ((r.left, r.top), (r.left, r.bottom)),
            Spine::Right => ((r.right, r.top), (r.right, r.bottom)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrokenAxisLayout {
    pub size: (u32, u32),
    pub x_range: (f64, f64),
    pub labels: Vec<String>,
    pub upper: Panel,
    pub lower: Panel,
}

impl BrokenAxisLayout {
    pub fn compute(figure: &FigureSpec, axes: &AxisSettings, counts: &CategoryCounts) -> Self {
        let size = figure.pixel_size();
        let (width, height) = (size.0 as f64, size.1 as f64);

        let left = figure.margin * width;
        let right = (1.0 - figure.margin) * width;
        let top = figure.margin * height;
        let bottom = (1.0 - figure.margin) * height;

        let panel_height = (bottom - top) / (2.0 + figure.panel_gap);
        let gap = panel_height * figure.panel_gap;

        let upper_rect = Rect {
            left,
            top,
            right,
            bottom: top + panel_height,
        };
        let lower_rect = Rect {
            left,
            top: top + panel_height + gap,
            right,
            bottom,
        };

        let (upper_range, lower_range) = axes.resolve(counts);
        let values: Vec<u64> = counts.values().collect();
        let d = axes.break_mark;

        let upper = Panel {
            rect: upper_rect,
            y_range: upper_range,
            spines: vec![Spine::Top, Spine::Left, Spine::Right],
            break_marks: vec![
                (upper_rect.at(-d, -d), upper_rect.at(d, d)),
                (upper_rect.at(1.0 - d, -d), upper_rect.at(1.0 + d, d)),
            ],
            bars: clip_bars(&values, upper_range),
            show_x_labels: false,
        };
        let lower = Panel {
            rect: lower_rect,
            y_range: lower_range,
            spines: vec![Spine::Bottom, Spine::Left, Spine::Right],
            break_marks: vec![
                (lower_rect.at(-d, 1.0 - d), lower_rect.at(d, 1.0 + d)),
                (lower_rect.at(1.0 - d, 1.0 - d), lower_rect.at(1.0 + d, 1.0 + d)),
            ],
            bars: clip_bars(&values, lower_range),
            show_x_labels: true,
        };

        Self {
            size,
            x_range: x_range(values.len()),
            labels: counts.labels().map(str::to_string).collect(),
            upper,
            lower,
        }
    }

    /// Pixel x of category `index` on the shared axis.
    pub fn category_x(&self, index: usize) -> f64 {
        let rect = self.lower.rect;
        let (lo, hi) = self.x_range;
        rect.left + (index as f64 - lo) / (hi - lo) * rect.width()
    }
}

// Bars sit at integer positions with autoscale padding on both ends.
fn x_range(n: usize) -> (f64, f64) {
    let half = BAR_WIDTH / 2.0;
    let lo = -half;
    let hi = n.saturating_sub(1) as f64 + half;
    let pad = (hi - lo) * X_MARGIN;
    (lo - pad, hi + pad)
}

fn clip_bars(values: &[u64], range: YRange) -> Vec<BarSpan> {
    let half = BAR_WIDTH / 2.0;
    values
        .iter()
        .enumerate()
        .filter_map(|(index, &count)| {
            let top = (count as f64).min(range.max);
            let base = range.min.max(0.0);
            (top > base).then(|| BarSpan {
                index,
                x0: index as f64 - half,
                x1: index as f64 + half,
                y0: base,
                y1: top,
            })
        })
        .collect()
}
