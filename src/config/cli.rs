use crate::config::chart::ChartSettings;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "movie-stats")]
#[command(about = "Chart the original languages of movies with Metacritic reviews")]
pub struct CliConfig {
    /// Index of movies to read
    #[arg(long, default_value = "movies.json")]
    pub index: String,

    /// Directory holding one <id>.json file per movie
    #[arg(long, default_value = "movies")]
    pub records_dir: String,

    /// Where to write the chart
    #[arg(long, default_value = "languages.png")]
    pub output: String,

    /// TOML file with chart settings
    #[arg(long)]
    pub config: Option<String>,

    /// Write the chart without opening it
    #[arg(long)]
    pub no_display: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(skip)]
    pub chart: ChartSettings,
}

impl CliConfig {
    /// Loads `--config` into `chart`, if given.
    pub fn load_chart_settings(&mut self) -> Result<()> {
        if let Some(path) = &self.config {
            tracing::info!("📁 Loading chart settings from: {}", path);
            self.chart = ChartSettings::from_file(path)?;
        }
        Ok(())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("index", &self.index)?;
        validate_path("records_dir", &self.records_dir)?;
        validate_path("output", &self.output)?;
        self.chart.validate()
    }
}

impl ConfigProvider for CliConfig {
    fn index_path(&self) -> &str {
        &self.index
    }

    fn records_dir(&self) -> &str {
        &self.records_dir
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn chart_settings(&self) -> &ChartSettings {
        &self.chart
    }

    fn display_enabled(&self) -> bool {
        !self.no_display && self.chart.display.enabled
    }
}
