use serde::{Deserialize, Serialize};

use crate::core::{AxisDimension, AxisId, CoordinateRef};
use crate::core::primitives::ensure_finite;
use crate::error::{FigureError, FigureResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    #[default]
    Solid,
    Dot,
    Dash,
    LongDash,
    DashDot,
    LongDashDot,
}

/// Stroke settings shared by trace lines and shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<LineDash>,
}

/// Fully specified stroke for a reference line that also gets a legend entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceLineStyle {
    pub color: String,
    pub dash: LineDash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl ReferenceLineStyle {
    #[must_use]
    pub fn new(color: impl Into<String>, dash: LineDash) -> Self {
        Self {
            color: color.into(),
            dash,
            width: None,
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

impl From<&ReferenceLineStyle> for LineStyle {
    fn from(style: &ReferenceLineStyle) -> Self {
        Self {
            color: Some(style.color.clone()),
            width: style.width,
            dash: Some(style.dash),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Line,
    Rect,
}

/// Geometry-only layout shape. Shapes never produce legend entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Shape {
    pub kind: ShapeKind,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub xref: CoordinateRef,
    pub yref: CoordinateRef,
    #[serde(default)]
    pub line: LineStyle,
}

impl Shape {
    /// Horizontal line spanning the full primary x domain at data value `y`.
    #[must_use]
    pub fn hline(y: f64, line: LineStyle) -> Self {
        Self {
            kind: ShapeKind::Line,
            x0: 0.0,
            x1: 1.0,
            y0: y,
            y1: y,
            xref: CoordinateRef::x_domain(),
            yref: CoordinateRef::Axis(AxisDimension::Y, AxisId::PRIMARY),
            line,
        }
    }

    /// Vertical line spanning the full primary y domain at data value `x`.
    #[must_use]
    pub fn vline(x: f64, line: LineStyle) -> Self {
        Self {
            kind: ShapeKind::Line,
            x0: x,
            x1: x,
            y0: 0.0,
            y1: 1.0,
            xref: CoordinateRef::Axis(AxisDimension::X, AxisId::PRIMARY),
            yref: CoordinateRef::y_domain(),
            line,
        }
    }

    pub fn validate(&self) -> FigureResult<()> {
        for (value, name) in [
            (self.x0, "shape x0"),
            (self.x1, "shape x1"),
            (self.y0, "shape y0"),
            (self.y1, "shape y1"),
        ] {
            ensure_finite(value, name)?;
        }
        self.xref.validate()?;
        self.yref.validate()?;
        if let Some(width) = self.line.width {
            if !width.is_finite() || width < 0.0 {
                return Err(FigureError::InvalidData(
                    "shape line width must be finite and >= 0".to_owned(),
                ));
            }
        }
        Ok(())
    }
}
