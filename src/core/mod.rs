pub mod aggregate;
pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{CategoryCounts, MovieRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, Viewer};
pub use crate::utils::error::Result;
