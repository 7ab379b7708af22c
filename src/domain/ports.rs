use crate::domain::model::{CategoryCounts, MovieRecord};
use crate::config::chart::ChartSettings;
use crate::utils::error::Result;
use std::path::Path;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn index_path(&self) -> &str;
    fn records_dir(&self) -> &str;
    fn output_path(&self) -> &str;
    fn chart_settings(&self) -> &ChartSettings;
    fn display_enabled(&self) -> bool;
}

/// Shows a finished chart to the user.
pub trait Viewer {
    fn show(&self, path: &Path) -> Result<()>;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<MovieRecord>>;
    fn transform(&self, records: Vec<MovieRecord>) -> Result<CategoryCounts>;
    fn load(&self, counts: CategoryCounts) -> Result<String>;
}
