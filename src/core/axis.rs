use serde::{Deserialize, Serialize};

use crate::core::{AxisId, AxisSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Linear,
    Log,
    Date,
    Category,
}

/// Layout fragment for one x or y axis.
///
/// Every field is optional so the same record doubles as a partial patch
/// (see [`AxisLayout::merge_from`]). Unset fields fall back to the renderer
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<AxisSide>,
    /// Axis of the same dimension this axis is drawn on top of.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<AxisId>,
    /// Axis of the other dimension this axis is anchored to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AxisId>,
    /// Axis of the same dimension whose range this axis follows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<AxisId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<AxisType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_tick_labels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_range: Option<bool>,
}

impl AxisLayout {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_side(mut self, side: AxisSide) -> Self {
        self.side = Some(side);
        self
    }

    #[must_use]
    pub fn with_overlaying(mut self, axis: AxisId) -> Self {
        self.overlaying = Some(axis);
        self
    }

    #[must_use]
    pub fn with_domain(mut self, start: f64, end: f64) -> Self {
        self.domain = Some([start, end]);
        self
    }

    /// Non-empty title text, if any.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref().filter(|text| !text.is_empty())
    }

    /// Overwrites every field that `patch` sets, keeping the rest.
    pub fn merge_from(&mut self, patch: &AxisLayout) {
        fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if let Some(value) = value {
                *slot = Some(value.clone());
            }
        }

        take(&mut self.title, &patch.title);
        take(&mut self.side, &patch.side);
        take(&mut self.overlaying, &patch.overlaying);
        take(&mut self.anchor, &patch.anchor);
        take(&mut self.matches, &patch.matches);
        take(&mut self.domain, &patch.domain);
        take(&mut self.range, &patch.range);
        take(&mut self.axis_type, &patch.axis_type);
        take(&mut self.tick_format, &patch.tick_format);
        take(&mut self.show_grid, &patch.show_grid);
        take(&mut self.show_tick_labels, &patch.show_tick_labels);
        take(&mut self.fixed_range, &patch.fixed_range);
    }
}
