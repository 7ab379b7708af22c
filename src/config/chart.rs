use crate::render::layout::{AxisSettings, FigureSpec};
use crate::utils::error::{ChartError, Result};
use crate::utils::validation::{
    validate_interval, validate_non_empty_string, validate_positive, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Chart settings, usually loaded from a TOML file. Every key is optional.
///
/// ```toml
/// [figure]
/// width = 24.0
/// height = 13.5
/// dpi = 80
///
/// [axes]
/// scale = "fixed"
/// upper = { min = 9900, max = 10000 }
/// lower = { min = 0, max = 700 }
///
/// [display]
/// enabled = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub figure: FigureSpec,
    pub axes: AxisSettings,
    pub display: DisplaySettings,
    /// TTF used for labels. The first font registered in a process is kept.
    pub font_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub enabled: bool,
    /// Viewer command, e.g. `"feh --scale-down"`. Defaults to the platform opener.
    pub viewer: Option<String>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            viewer: None,
        }
    }
}

impl ChartSettings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ChartError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ChartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl Validate for ChartSettings {
    fn validate(&self) -> Result<()> {
        validate_positive("figure.width", self.figure.width)?;
        validate_positive("figure.height", self.figure.height)?;
        validate_positive("figure.dpi", self.figure.dpi)?;
        validate_range("figure.margin", self.figure.margin, 0.0, 0.49)?;
        validate_range("figure.panel_gap", self.figure.panel_gap, 0.0, 5.0)?;
        validate_range("axes.break_mark", self.axes.break_mark, 0.0, 0.5)?;
        validate_interval("axes.upper", self.axes.upper.min, self.axes.upper.max)?;
        validate_interval("axes.lower", self.axes.lower.min, self.axes.lower.max)?;

        self.figure.check_canvas()?;

        if let Some(viewer) = &self.display.viewer {
            validate_non_empty_string("display.viewer", viewer)?;
        }
        if let Some(font) = &self.font_path {
            validate_non_empty_string("font_path", font)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::layout::{AxisScale, YRange};

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = ChartSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ChartSettings::default());
        assert_eq!(settings.figure.pixel_size(), (1920, 1080));
        assert!(settings.display.enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let settings = ChartSettings::from_toml_str(
            r#"
font_path = "/opt/fonts/Inter.ttf"

[figure]
title = "Languages"

[axes]
scale = "adaptive"
lower = { min = 0, max = 1200 }

[display]
enabled = false
"#,
        )
        .unwrap();

        assert_eq!(settings.figure.title, "Languages");
        assert_eq!(settings.figure.dpi, 80.0);
        assert_eq!(settings.axes.scale, AxisScale::Adaptive);
        assert_eq!(
            settings.axes.lower,
            YRange {
                min: 0.0,
                max: 1200.0
            }
        );
        assert_eq!(settings.axes.upper.min, 9900.0);
        assert!(!settings.display.enabled);
        assert_eq!(settings.font_path.as_deref(), Some("/opt/fonts/Inter.ttf"));
    }

    #[test]
    fn test_inverted_range_fails_validation() {
        let settings = ChartSettings::from_toml_str(
            r#"
[axes]
upper = { min = 10000, max = 9900 }
"#,
        )
        .unwrap();

        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("axes.upper"));
    }

    #[test]
    fn test_unknown_scale_is_a_parse_error() {
        let err = ChartSettings::from_toml_str("[axes]\nscale = \"log\"\n").unwrap_err();
        assert!(matches!(err, ChartError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_zero_dpi_fails_validation() {
        let mut settings = ChartSettings::default();
        settings.figure.dpi = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_oversized_canvas_fails_validation() {
        let settings = ChartSettings::from_toml_str(
            r#"
[figure]
width = 1e5
dpi = 1e3
"#,
        )
        .unwrap();

        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            ChartError::ConfigValidationError { ref field, .. } if field == "figure"
        ));
    }
}
