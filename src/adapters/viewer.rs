use crate::domain::ports::Viewer;
use crate::utils::error::{ChartError, Result};
use std::path::Path;
use std::process::Command;

/// Opens the chart with a desktop image viewer.
#[derive(Debug, Clone, Default)]
pub struct SystemViewer {
    command: Option<String>,
}

impl SystemViewer {
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    fn opener(&self) -> Option<(String, Vec<String>)> {
        if let Some(command) = &self.command {
            let mut parts = command.split_whitespace().map(str::to_string);
            let program = parts.next()?;
            return Some((program, parts.collect()));
        }

        if cfg!(target_os = "macos") {
            Some(("open".to_string(), Vec::new()))
        } else if cfg!(target_os = "windows") {
            Some((
                "cmd".to_string(),
                vec!["/C".to_string(), "start".to_string(), String::new()],
            ))
        } else if has_display() {
            Some(("xdg-open".to_string(), Vec::new()))
        } else {
            None
        }
    }
}

fn has_display() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

impl Viewer for SystemViewer {
    fn show(&self, path: &Path) -> Result<()> {
        let Some((program, args)) = self.opener() else {
            tracing::info!("No display available, skipping preview of {}", path.display());
            return Ok(());
        };

        tracing::debug!("Opening {} with {}", path.display(), program);
        let status = Command::new(&program).args(&args).arg(path).status()?;
        if !status.success() {
            return Err(ChartError::RenderError {
                message: format!("{} exited with {}", program, status),
            });
        }
        Ok(())
    }
}

/// Viewer for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopViewer;

impl Viewer for NoopViewer {
    fn show(&self, path: &Path) -> Result<()> {
        tracing::debug!("Display disabled, not opening {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_command_is_split_into_program_and_args() {
        let viewer = SystemViewer::new(Some("feh --scale-down".to_string()));
        let (program, args) = viewer.opener().unwrap();
        assert_eq!(program, "feh");
        assert_eq!(args, vec!["--scale-down"]);
    }

    #[test]
    fn test_blank_command_has_no_opener() {
        let viewer = SystemViewer::new(Some("   ".to_string()));
        assert!(viewer.opener().is_none());
    }

    #[test]
    fn test_noop_viewer_succeeds() {
        assert!(NoopViewer.show(Path::new("languages.png")).is_ok());
    }
}
