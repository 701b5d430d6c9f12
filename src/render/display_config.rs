use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Svg,
    Jpeg,
    Webp,
}

/// Caller-supplied display options for native hand-off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayOptions {
    pub responsive: Option<bool>,
    pub image_format: Option<ImageFormat>,
    pub modebar_buttons_to_remove: Vec<String>,
}

/// Display options as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    pub scroll_zoom: bool,
    pub display_logo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_format: Option<ImageFormat>,
    #[serde(default)]
    pub modebar_buttons_to_remove: Vec<String>,
}

impl DisplayConfig {
    /// Merges caller options under the fixed `scroll_zoom = true`,
    /// `display_logo = false` settings.
    #[must_use]
    pub fn from_options(options: DisplayOptions) -> Self {
        Self {
            scroll_zoom: true,
            display_logo: false,
            responsive: options.responsive,
            image_format: options.image_format,
            modebar_buttons_to_remove: options.modebar_buttons_to_remove,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplayConfig, DisplayOptions, ImageFormat};

    #[test]
    fn fixed_settings_win_and_caller_settings_pass_through() {
        let config = DisplayConfig::from_options(DisplayOptions {
            responsive: Some(true),
            image_format: Some(ImageFormat::Svg),
            modebar_buttons_to_remove: vec!["lasso2d".to_owned()],
        });

        assert!(config.scroll_zoom);
        assert!(!config.display_logo);
        assert_eq!(config.responsive, Some(true));
        assert_eq!(config.image_format, Some(ImageFormat::Svg));
        assert_eq!(config.modebar_buttons_to_remove, vec!["lasso2d".to_owned()]);
    }

    #[test]
    fn unknown_display_option_is_rejected() {
        let parsed = serde_json::from_str::<DisplayOptions>(r#"{"displaylogo": true}"#);
        assert!(parsed.is_err());
    }
}
