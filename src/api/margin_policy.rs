use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Margin, MarginSide};
use crate::error::{FigureError, FigureResult};

use super::{Figure, RenderContext};

/// Five margin components in `MarginSide::ALL` order (left, right, bottom, top, pad).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarginValues {
    pub l: f64,
    pub r: f64,
    pub b: f64,
    pub t: f64,
    pub pad: f64,
}

impl MarginValues {
    #[must_use]
    pub const fn new(l: f64, r: f64, b: f64, t: f64, pad: f64) -> Self {
        Self { l, r, b, t, pad }
    }

    #[must_use]
    pub fn get(self, side: MarginSide) -> f64 {
        match side {
            MarginSide::Left => self.l,
            MarginSide::Right => self.r,
            MarginSide::Bottom => self.b,
            MarginSide::Top => self.t,
            MarginSide::Pad => self.pad,
        }
    }

    #[must_use]
    pub const fn to_margin(self) -> Margin {
        Margin::fixed(self.l, self.r, self.b, self.t, self.pad)
    }

    fn validate(self, name: &str) -> FigureResult<()> {
        for side in MarginSide::ALL {
            let value = self.get(side);
            if !value.is_finite() || value < 0.0 {
                return Err(FigureError::InvalidConfig(format!(
                    "{name} {side:?} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Final margin and legend spacing rules.
///
/// Interactive mode adds deltas onto whatever margins are already set, so it
/// must run once per figure. Export mode replaces margins outright.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarginPolicy {
    pub interactive_delta: MarginValues,
    pub interactive_delta_secondary_y: MarginValues,
    pub export_margin: MarginValues,
    /// Margins a grid gets when a panel is merged into it in export mode.
    pub merge_export_margin: MarginValues,
    /// Height assumed for legend spacing when the layout sets none.
    pub default_height: f64,
    pub legend_gap_divisor: f64,
}

impl Default for MarginPolicy {
    fn default() -> Self {
        Self {
            interactive_delta: MarginValues::new(90.0, 100.0, 80.0, 40.0, 10.0),
            interactive_delta_secondary_y: MarginValues::new(90.0, 40.0, 80.0, 40.0, 10.0),
            export_margin: MarginValues::new(40.0, 40.0, 50.0, 50.0, 10.0),
            merge_export_margin: MarginValues::new(30.0, 30.0, 50.0, 50.0, 0.0),
            default_height: 600.0,
            legend_gap_divisor: 4.5,
        }
    }
}

impl MarginPolicy {
    pub fn validate(self) -> FigureResult<Self> {
        self.interactive_delta.validate("interactive_delta")?;
        self.interactive_delta_secondary_y
            .validate("interactive_delta_secondary_y")?;
        self.export_margin.validate("export_margin")?;
        self.merge_export_margin.validate("merge_export_margin")?;
        for (value, name) in [
            (self.default_height, "default_height"),
            (self.legend_gap_divisor, "legend_gap_divisor"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FigureError::InvalidConfig(format!(
                    "margin policy `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }

    /// Delta vector interactive mode adds for `figure`.
    #[must_use]
    pub fn interactive_delta_for(&self, figure: &Figure) -> MarginValues {
        if figure.has_secondary_y {
            self.interactive_delta_secondary_y
        } else {
            self.interactive_delta
        }
    }

    /// Computes final margins and the legend group gap for `figure`.
    pub fn apply(&self, figure: &mut Figure, context: RenderContext) {
        if context.is_interactive() {
            let delta = self.interactive_delta_for(figure);
            let margin = &mut figure.layout.margin;
            for side in MarginSide::ALL {
                let add = delta.get(side);
                let value = margin.get(side).map_or(add, |current| current + add);
                margin.set(side, value);
            }
        } else {
            figure.layout.margin = self.export_margin.to_margin();
        }

        let height = figure.layout.height.unwrap_or(self.default_height);
        figure.layout.legend.trace_group_gap = Some(height / self.legend_gap_divisor);
        debug!(
            mode = ?context.mode(),
            has_secondary_y = figure.has_secondary_y,
            margin = ?figure.layout.margin,
            "applied margin policy"
        );
    }
}
