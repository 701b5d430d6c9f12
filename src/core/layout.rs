use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{ensure_finite, ensure_positive_size};
use crate::core::{Annotation, AxisId, AxisLayout, Font, Orientation, Shape, Theme, XAnchor};
use crate::error::{FigureError, FigureResult};

/// Margin component, in the order margin deltas are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarginSide {
    Left,
    Right,
    Bottom,
    Top,
    Pad,
}

impl MarginSide {
    pub const ALL: [Self; 5] = [Self::Left, Self::Right, Self::Bottom, Self::Top, Self::Pad];
}

/// Figure margins in pixels. Unset components use the renderer defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Margin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoexpand: Option<bool>,
}

impl Margin {
    /// All five components set, `autoexpand` left to the renderer.
    #[must_use]
    pub const fn fixed(l: f64, r: f64, b: f64, t: f64, pad: f64) -> Self {
        Self {
            l: Some(l),
            r: Some(r),
            b: Some(b),
            t: Some(t),
            pad: Some(pad),
            autoexpand: None,
        }
    }

    #[must_use]
    pub fn get(&self, side: MarginSide) -> Option<f64> {
        match side {
            MarginSide::Left => self.l,
            MarginSide::Right => self.r,
            MarginSide::Bottom => self.b,
            MarginSide::Top => self.t,
            MarginSide::Pad => self.pad,
        }
    }

    pub fn set(&mut self, side: MarginSide, value: f64) {
        let slot = match side {
            MarginSide::Left => &mut self.l,
            MarginSide::Right => &mut self.r,
            MarginSide::Bottom => &mut self.b,
            MarginSide::Top => &mut self.t,
            MarginSide::Pad => &mut self.pad,
        };
        *slot = Some(value);
    }

    fn validate(&self) -> FigureResult<()> {
        for side in MarginSide::ALL {
            if let Some(value) = self.get(side) {
                if !value.is_finite() || value < 0.0 {
                    return Err(FigureError::InvalidData(format!(
                        "margin {side:?} must be finite and >= 0"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Title {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<XAnchor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegendConfig {
    /// Vertical gap between legend groups, in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_group_gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModeBar {
    pub orientation: Orientation,
    pub bg_color: String,
    pub color: String,
    pub active_color: String,
}

/// Non-data presentation state of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default)]
    pub xaxes: IndexMap<AxisId, AxisLayout>,
    #[serde(default)]
    pub yaxes: IndexMap<AxisId, AxisLayout>,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default)]
    pub legend: LegendConfig,
    pub template: Arc<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modebar: Option<ModeBar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_shape_line_color: Option<String>,
}

impl Layout {
    #[must_use]
    pub fn new(template: Arc<Theme>) -> Self {
        Self {
            title: None,
            xaxes: IndexMap::new(),
            yaxes: IndexMap::new(),
            margin: Margin::default(),
            legend: LegendConfig::default(),
            template,
            map_style: None,
            height: None,
            width: None,
            annotations: Vec::new(),
            shapes: Vec::new(),
            modebar: None,
            new_shape_line_color: None,
        }
    }

    /// Dark styling from the layout's own style token, falling back to the template.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        match self.map_style.as_deref() {
            Some(style) => style == "dark",
            None => self.template.is_dark(),
        }
    }

    /// First y axis drawn on top of the primary y axis.
    #[must_use]
    pub fn secondary_yaxis(&self) -> Option<(AxisId, &AxisLayout)> {
        self.yaxes
            .iter()
            .find(|(id, axis)| !id.is_primary() && axis.overlaying == Some(AxisId::PRIMARY))
            .map(|(id, axis)| (*id, axis))
    }

    /// Whether any y axis overlays another y axis.
    #[must_use]
    pub fn has_overlaying_yaxis(&self) -> bool {
        self.yaxes.values().any(|axis| axis.overlaying.is_some())
    }

    pub fn validate(&self) -> FigureResult<()> {
        self.margin.validate()?;
        for (value, name) in [(self.height, "layout height"), (self.width, "layout width")] {
            if let Some(value) = value {
                ensure_positive_size(value, name)?;
            }
        }
        if let Some(gap) = self.legend.trace_group_gap {
            ensure_finite(gap, "legend trace group gap")?;
        }
        for annotation in &self.annotations {
            annotation.validate()?;
        }
        for shape in &self.shapes {
            shape.validate()?;
        }
        Ok(())
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(Theme::global())
    }
}

#[cfg(test)]
mod tests {
    use super::{Margin, MarginSide};

    #[test]
    fn margin_sides_round_trip_through_accessors() {
        let mut margin = Margin::default();
        for (index, side) in MarginSide::ALL.into_iter().enumerate() {
            assert_eq!(margin.get(side), None);
            margin.set(side, index as f64);
        }
        assert_eq!(margin, Margin::fixed(0.0, 1.0, 2.0, 3.0, 4.0));
    }
}
