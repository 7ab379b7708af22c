//! Broken-axis bar chart rendering.
//!
//! A render owns its canvas from start to finish: the chart is drawn into an
//! in-memory RGB buffer, encoded to PNG, and only then handed to storage.

pub mod backend;
pub mod chart;
pub mod fonts;
pub mod layout;

use crate::adapters::storage::write_atomic;
use crate::domain::model::CategoryCounts;
use crate::utils::error::{ChartError, Result};
use backend::FontSafeBackend;
use image::{ImageFormat, RgbImage};
use layout::{AxisSettings, BrokenAxisLayout, FigureSpec};
use plotters::prelude::*;
use std::io::Cursor;
use std::path::Path;

pub struct Renderer {
    figure: FigureSpec,
    axes: AxisSettings,
    font_path: Option<String>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(FigureSpec::default(), AxisSettings::default(), None)
    }
}

impl Renderer {
    pub fn new(figure: FigureSpec, axes: AxisSettings, font_path: Option<String>) -> Self {
        Self {
            figure,
            axes,
            font_path,
        }
    }

    pub fn layout(&self, counts: &CategoryCounts) -> Result<BrokenAxisLayout> {
        if counts.is_empty() {
            return Err(ChartError::EmptyInputError);
        }
        self.figure.check_canvas()?;
        Ok(BrokenAxisLayout::compute(&self.figure, &self.axes, counts))
    }

    /// Draws the chart and returns it as PNG bytes.
    pub fn render_png(&self, counts: &CategoryCounts) -> Result<Vec<u8>> {
        let layout = self.layout(counts)?;
        fonts::ensure_registered(self.font_path.as_deref());

        let (width, height) = layout.size;
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let backend = BitMapBackend::with_buffer(&mut buffer, (width, height));
            let root = FontSafeBackend::new(backend).into_drawing_area();
            chart::draw_broken_axis(&root, &layout, &self.figure.title)
                .map_err(ChartError::render)?;
            root.present().map_err(ChartError::render)?;
        }

        tracing::debug!(
            "Rendered {} categories onto a {}x{} canvas",
            layout.labels.len(),
            width,
            height
        );
        encode_png(buffer, width, height)
    }

    /// Renders `counts` and writes the PNG to `output_path`.
    pub fn render_to_file(&self, counts: &CategoryCounts, output_path: &Path) -> Result<()> {
        let png = self.render_png(counts)?;
        write_atomic(output_path, &png)
    }
}

/// Renders `counts` with the default figure to `output_path`, then shows it.
pub fn render(counts: &CategoryCounts, output_path: &Path) -> Result<()> {
    use crate::domain::ports::Viewer;

    Renderer::default().render_to_file(counts, output_path)?;
    if let Err(e) = crate::adapters::viewer::SystemViewer::default().show(output_path) {
        tracing::warn!("Could not display {}: {}", output_path.display(), e);
    }
    Ok(())
}

fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| ChartError::RenderError {
        message: "canvas buffer does not match the figure size".to_string(),
    })?;

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(ChartError::render)?;
    Ok(png)
}
