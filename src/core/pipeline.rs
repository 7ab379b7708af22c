use crate::core::aggregate::Tally;
use crate::core::{CategoryCounts, ConfigProvider, MovieRecord, Pipeline, Storage, Viewer};
use crate::domain::model::IndexEntry;
use crate::render::Renderer;
use crate::utils::error::{ChartError, Result};
use std::path::Path;

/// Reads the movie index and records, tallies original languages and charts them.
pub struct LanguageChartPipeline<S: Storage, C: ConfigProvider, V: Viewer> {
    storage: S,
    config: C,
    viewer: V,
}

impl<S: Storage, C: ConfigProvider, V: Viewer> LanguageChartPipeline<S, C, V> {
    pub fn new(storage: S, config: C, viewer: V) -> Self {
        Self {
            storage,
            config,
            viewer,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read_index(&self) -> Result<Vec<IndexEntry>> {
        let path = self.config.index_path();
        let index_error = |reason: String| ChartError::IndexReadError {
            path: path.to_string(),
            reason,
        };

        let bytes = self
            .storage
            .read_file(path)
            .map_err(|e| index_error(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| index_error(e.to_string()))
    }

    fn read_record(&self, entry: &IndexEntry) -> Result<MovieRecord> {
        let path = record_path(self.config.records_dir(), &entry.id);
        let record_error = |reason: String| ChartError::RecordReadError {
            id: entry.id.clone(),
            path: path.clone(),
            reason,
        };

        let bytes = self
            .storage
            .read_file(&path)
            .map_err(|e| record_error(e.to_string()))?;
        let mut record: MovieRecord =
            serde_json::from_slice(&bytes).map_err(|e| record_error(e.to_string()))?;

        if record.id.is_empty() {
            record.id = entry.id.clone();
        }
        Ok(record)
    }
}

/// `<records_dir>/<id>.json`
pub fn record_path(records_dir: &str, id: &str) -> String {
    if records_dir.is_empty() {
        format!("{}.json", id)
    } else {
        format!("{}/{}.json", records_dir.trim_end_matches('/'), id)
    }
}

impl<S: Storage, C: ConfigProvider, V: Viewer> Pipeline for LanguageChartPipeline<S, C, V> {
    fn extract(&self) -> Result<Vec<MovieRecord>> {
        let index = self.read_index()?;
        tracing::debug!(
            "Index {} lists {} movies",
            self.config.index_path(),
            index.len()
        );

        index.iter().map(|entry| self.read_record(entry)).collect()
    }

    fn transform(&self, records: Vec<MovieRecord>) -> Result<CategoryCounts> {
        Tally::languages().aggregate(&records)
    }

    fn load(&self, counts: CategoryCounts) -> Result<String> {
        let settings = self.config.chart_settings();
        let renderer = Renderer::new(
            settings.figure.clone(),
            settings.axes.clone(),
            settings.font_path.clone(),
        );

        let png = renderer.render_png(&counts)?;
        let output_path = self.config.output_path();
        tracing::debug!("Writing {} byte PNG to {}", png.len(), output_path);
        self.storage.write_file(output_path, &png)?;

        if self.config.display_enabled() {
            if let Err(e) = self.viewer.show(Path::new(output_path)) {
                tracing::warn!("Could not display {}: {}", output_path, e);
            }
        }

        Ok(output_path.to_string())
    }
}
