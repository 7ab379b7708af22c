use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::cell::RefCell;

/// Runs a pipeline's three phases in order, logging each one.
pub struct ChartEngine<P: Pipeline> {
    pipeline: P,
    monitor: RefCell<SystemMonitor>,
}

impl<P: Pipeline> ChartEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RefCell::new(SystemMonitor::new(monitor_enabled)),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn run(&self) -> Result<String> {
        let mut monitor = self.monitor.borrow_mut();
        monitor.log_stats("Start");

        tracing::info!("📥 Reading movie records...");
        let records = self.pipeline.extract()?;
        tracing::info!("Read {} records", records.len());
        monitor.log_stats("Extract");

        tracing::info!("🔢 Counting original languages...");
        let counts = self.pipeline.transform(records)?;
        tracing::info!(
            "Counted {} movies across {} languages",
            counts.total(),
            counts.len()
        );
        monitor.log_stats("Transform");

        tracing::info!("🎨 Rendering chart...");
        let output_path = self.pipeline.load(counts)?;
        tracing::info!("Chart saved to: {}", output_path);
        monitor.log_stats("Load");

        monitor.log_final_stats();
        Ok(output_path)
    }
}
