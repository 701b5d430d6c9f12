use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::Theme;
use crate::error::{FigureError, FigureResult};

pub const EXPORT_MODE_ENV: &str = "FIGURE_EXPORT_MODE";
/// Older name of the export switch, still honored.
pub const LEGACY_EXPORT_MODE_ENV: &str = "TERMINAL_PRO";
pub const PLOT_WIDTH_ENV: &str = "FIGURE_PLOT_WIDTH";
pub const PLOT_HEIGHT_ENV: &str = "FIGURE_PLOT_HEIGHT";
pub const CHART_STYLE_ENV: &str = "FIGURE_CHART_STYLE";

/// Process-level rendering configuration.
///
/// Serializable so hosts can persist it next to their own preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Return export documents instead of displaying, regardless of surface.
    pub export_mode: bool,
    pub plot_width: u32,
    pub plot_height: u32,
    /// Embedded theme name (`dark` or `light`).
    pub chart_style: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            export_mode: false,
            plot_width: 1400,
            plot_height: 762,
            chart_style: "dark".to_owned(),
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn with_export_mode(mut self, export_mode: bool) -> Self {
        self.export_mode = export_mode;
        self
    }

    #[must_use]
    pub fn with_plot_size(mut self, width: u32, height: u32) -> Self {
        self.plot_width = width;
        self.plot_height = height;
        self
    }

    #[must_use]
    pub fn with_chart_style(mut self, style: impl Into<String>) -> Self {
        self.chart_style = style.into();
        self
    }

    /// Reads overrides from the process environment.
    pub fn from_env() -> FigureResult<Self> {
        Self::from_env_map(std::env::vars())
    }

    /// Reads overrides from an explicit variable set.
    pub fn from_env_map<I, K, V>(vars: I) -> FigureResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        let mut config = Self::default();

        if let Some(raw) = vars
            .get(EXPORT_MODE_ENV)
            .or_else(|| vars.get(LEGACY_EXPORT_MODE_ENV))
        {
            config.export_mode = parse_bool_flag(raw)?;
        }
        if let Some(raw) = vars.get(PLOT_WIDTH_ENV) {
            config.plot_width = parse_dimension(raw, PLOT_WIDTH_ENV)?;
        }
        if let Some(raw) = vars.get(PLOT_HEIGHT_ENV) {
            config.plot_height = parse_dimension(raw, PLOT_HEIGHT_ENV)?;
        }
        if let Some(raw) = vars.get(CHART_STYLE_ENV) {
            config.chart_style = raw.trim().to_owned();
        }
        config.validate()
    }

    pub fn validate(self) -> FigureResult<Self> {
        if self.plot_width == 0 || self.plot_height == 0 {
            return Err(FigureError::InvalidConfig(format!(
                "plot size must be > 0: width={}, height={}",
                self.plot_width, self.plot_height
            )));
        }
        Ok(self)
    }

    /// Loads the embedded theme selected by `chart_style`.
    pub fn load_theme(&self) -> FigureResult<Theme> {
        Theme::builtin(&self.chart_style)
    }
}

/// Parses a truthy/falsy flag (`y yes t true on 1` / `n no f false off 0`).
pub fn parse_bool_flag(raw: &str) -> FigureResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
        other => Err(FigureError::InvalidConfig(format!(
            "invalid truth value `{other}`"
        ))),
    }
}

fn parse_dimension(raw: &str, name: &str) -> FigureResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| FigureError::InvalidConfig(format!("{name} must be a positive integer: {e}")))
}
