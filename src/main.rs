use clap::Parser;
use movie_stats::core::ConfigProvider;
use movie_stats::utils::{logger, validation::Validate};
use movie_stats::{
    ChartEngine, ChartError, CliConfig, LanguageChartPipeline, LocalStorage, SystemViewer,
};

fn main() {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting movie-stats");

    if let Err(e) = config.load_chart_settings().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let viewer = SystemViewer::new(config.chart_settings().display.viewer.clone());
    let pipeline = LanguageChartPipeline::new(LocalStorage::default(), config, viewer);
    let engine = ChartEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(output_path) => {
            tracing::info!("✅ Chart written to: {}", output_path);
        }
        Err(e) => exit_with(e),
    }
}

fn exit_with(e: ChartError) -> ! {
    tracing::error!(
        "❌ Chart generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
