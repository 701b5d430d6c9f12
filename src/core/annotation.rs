use serde::{Deserialize, Serialize};

use crate::core::primitives::ensure_finite;
use crate::core::{CoordinateRef, Font, XAnchor, YAnchor};
use crate::error::{FigureError, FigureResult};

/// Positioned text overlay with no data dependency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub xref: CoordinateRef,
    pub yref: CoordinateRef,
    #[serde(default)]
    pub xanchor: XAnchor,
    #[serde(default)]
    pub yanchor: YAnchor,
    #[serde(default)]
    pub xshift: f64,
    #[serde(default)]
    pub yshift: f64,
    #[serde(default)]
    pub text_angle: f64,
    #[serde(default)]
    pub font: Font,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub show_arrow: bool,
}

fn default_opacity() -> f64 {
    1.0
}

impl Annotation {
    /// Paper-anchored annotation at the paper origin.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: 0.0,
            y: 0.0,
            xref: CoordinateRef::Paper,
            yref: CoordinateRef::Paper,
            xanchor: XAnchor::Auto,
            yanchor: YAnchor::Auto,
            xshift: 0.0,
            yshift: 0.0,
            text_angle: 0.0,
            font: Font::default(),
            opacity: default_opacity(),
            show_arrow: false,
        }
    }

    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    #[must_use]
    pub fn with_refs(mut self, xref: CoordinateRef, yref: CoordinateRef) -> Self {
        self.xref = xref;
        self.yref = yref;
        self
    }

    #[must_use]
    pub fn with_anchors(mut self, xanchor: XAnchor, yanchor: YAnchor) -> Self {
        self.xanchor = xanchor;
        self.yanchor = yanchor;
        self
    }

    #[must_use]
    pub fn with_shift(mut self, xshift: f64, yshift: f64) -> Self {
        self.xshift = xshift;
        self.yshift = yshift;
        self
    }

    #[must_use]
    pub fn with_text_angle(mut self, degrees: f64) -> Self {
        self.text_angle = degrees;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn validate(&self) -> FigureResult<()> {
        if self.text.is_empty() {
            return Err(FigureError::InvalidData(
                "annotation text must not be empty".to_owned(),
            ));
        }
        for (value, name) in [
            (self.x, "annotation x"),
            (self.y, "annotation y"),
            (self.xshift, "annotation xshift"),
            (self.yshift, "annotation yshift"),
            (self.text_angle, "annotation text angle"),
        ] {
            ensure_finite(value, name)?;
        }
        self.xref.validate()?;
        self.yref.validate()?;
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(FigureError::InvalidData(
                "annotation opacity must be in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}
