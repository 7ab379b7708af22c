pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    storage::LocalStorage,
    viewer::{NoopViewer, SystemViewer},
};
pub use config::chart::ChartSettings;
pub use core::{
    aggregate::{aggregate, Tally},
    etl::ChartEngine,
    pipeline::LanguageChartPipeline,
};
pub use domain::model::{CategoryCounts, IndexEntry, MovieRecord};
pub use render::{render, Renderer};
pub use utils::error::{ChartError, Result};
