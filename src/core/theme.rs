use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Font;
use crate::error::{FigureError, FigureResult};

const DARK_THEME_JSON: &str = include_str!("../../themes/dark.json");
const LIGHT_THEME_JSON: &str = include_str!("../../themes/light.json");

static GLOBAL_THEME: OnceLock<Arc<Theme>> = OnceLock::new();

/// Style template merged as the base of every new figure layout.
///
/// A theme is loaded once per process and then only shared read-only
/// through `Arc<Theme>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    /// Background/map style token; `"dark"` switches finalize to the dark modebar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_bgcolor: Option<String>,
    pub colorway: Vec<String>,
}

impl Theme {
    pub fn from_json_str(input: &str) -> FigureResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| FigureError::InvalidConfig(format!("failed to parse theme document: {e}")))
    }

    /// Loads one of the embedded theme documents (`dark` or `light`).
    pub fn builtin(style: &str) -> FigureResult<Self> {
        match style {
            "dark" => Self::from_json_str(DARK_THEME_JSON),
            "light" => Self::from_json_str(LIGHT_THEME_JSON),
            other => Err(FigureError::InvalidConfig(format!(
                "unknown chart style `{other}`"
            ))),
        }
    }

    /// Installs the process-wide theme. Fails once a theme is already in place.
    pub fn install_global(theme: Theme) -> FigureResult<Arc<Theme>> {
        let name = theme.name.clone();
        GLOBAL_THEME.set(Arc::new(theme)).map_err(|_| {
            FigureError::InvalidConfig("global theme is already installed".to_owned())
        })?;
        debug!(theme = %name, "installed global theme");
        Ok(Self::global())
    }

    /// Process-wide theme; falls back to the embedded dark theme when
    /// nothing was installed.
    #[must_use]
    pub fn global() -> Arc<Theme> {
        GLOBAL_THEME
            .get_or_init(|| {
                let theme = Self::builtin("dark").unwrap_or_else(|err| {
                    warn!(error = %err, "embedded dark theme is unreadable; using empty theme");
                    Self::default()
                });
                Arc::new(theme)
            })
            .clone()
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.map_style.as_deref() == Some("dark")
    }
}

#[cfg(test)]
mod tests {
    use super::Theme;

    #[test]
    fn embedded_themes_parse() {
        let dark = Theme::builtin("dark").expect("dark theme");
        let light = Theme::builtin("light").expect("light theme");

        assert!(dark.is_dark());
        assert!(!light.is_dark());
        assert!(!dark.colorway.is_empty());
    }

    #[test]
    fn unknown_style_is_rejected() {
        assert!(Theme::builtin("sepia").is_err());
    }
}
