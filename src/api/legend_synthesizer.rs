use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::ensure_finite;
use crate::core::{
    AxisId, LineDash, LineStyle, Marker, ReferenceLineStyle, Trace, TraceKind, TraceMode,
};
use crate::error::{FigureError, FigureResult};

use super::Figure;

/// Legend rank the renderer assumes for traces that set none.
pub const DEFAULT_LEGEND_RANK: f64 = 1000.0;

/// Fields copied onto a legend label trace as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegendLabelExtra {
    pub xaxis: Option<AxisId>,
    pub yaxis: Option<AxisId>,
    pub legend_group: Option<String>,
    pub show_legend: Option<bool>,
}

/// Request for a synthetic legend entry.
///
/// With `template_trace`, unset `label`, `mode`, `marker` and `line_dash`
/// are taken from the first trace of that name, and so are its axes.
/// Without a template, `label` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegendLabelOptions {
    pub template_trace: Option<String>,
    pub label: Option<String>,
    /// Defaults to `lines`.
    pub mode: Option<TraceMode>,
    /// Defaults to an empty marker.
    pub marker: Option<Marker>,
    /// Defaults to `solid`.
    pub line_dash: Option<LineDash>,
    /// Unset keeps natural legend order.
    pub legend_rank: Option<f64>,
    pub extra: LegendLabelExtra,
}

impl LegendLabelOptions {
    #[must_use]
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_template(trace_name: impl Into<String>) -> Self {
        Self {
            template_trace: Some(trace_name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: TraceMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    #[must_use]
    pub fn with_line_dash(mut self, dash: LineDash) -> Self {
        self.line_dash = Some(dash);
        self
    }

    #[must_use]
    pub fn with_legend_rank(mut self, rank: f64) -> Self {
        self.legend_rank = Some(rank);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: LegendLabelExtra) -> Self {
        self.extra = extra;
        self
    }
}

/// One visible legend entry in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub trace_index: usize,
    pub legend_group: Option<String>,
    pub legend_rank: Option<f64>,
}

impl Figure {
    /// Appends a zero-data trace that only renders a legend entry.
    pub fn add_legend_label(&mut self, options: LegendLabelOptions) -> FigureResult<()> {
        let LegendLabelOptions {
            template_trace,
            mut label,
            mut mode,
            mut marker,
            mut line_dash,
            legend_rank,
            mut extra,
        } = options;

        if let Some(template_name) = template_trace.filter(|name| !name.is_empty()) {
            let template = self
                .find_trace(&template_name)
                .ok_or_else(|| FigureError::TraceNotFound {
                    name: template_name.clone(),
                })?;
            if label.as_deref().is_none_or(str::is_empty) {
                label = Some(template_name.clone());
            }
            mode = mode.or(template.mode);
            if marker.is_none() && !template.marker.is_empty() {
                marker = Some(template.marker.clone());
            }
            line_dash = line_dash.or(template.line.dash);
            extra.xaxis = Some(template.xaxis);
            extra.yaxis = Some(template.yaxis);
        }

        let label = label
            .filter(|label| !label.is_empty())
            .ok_or(FigureError::MissingLabel)?;

        let trace = Trace {
            kind: TraceKind::Scatter,
            name: Some(label),
            x: Vec::new(),
            y: Vec::new(),
            ohlc: None,
            mode: Some(mode.unwrap_or(TraceMode::Lines)),
            marker: marker.unwrap_or_default(),
            line: LineStyle {
                dash: Some(line_dash.unwrap_or(LineDash::Solid)),
                ..LineStyle::default()
            },
            xaxis: extra.xaxis.unwrap_or_default(),
            yaxis: extra.yaxis.unwrap_or_default(),
            legend_group: extra.legend_group,
            legend_rank,
            show_legend: extra.show_legend,
        };
        trace.validate()?;
        debug!(label = ?trace.name, rank = ?trace.legend_rank, "add legend label");
        self.traces.push(trace);
        Ok(())
    }

    /// Horizontal reference line at `y` plus a legend entry named `name`.
    pub fn add_hline_legend(
        &mut self,
        y: f64,
        name: &str,
        line: &ReferenceLineStyle,
        legend_rank: Option<f64>,
        extra: LegendLabelExtra,
    ) -> FigureResult<()> {
        ensure_rank_finite(legend_rank)?;
        self.add_hline(y, LineStyle::from(line));
        self.add_legend_label(reference_line_label(name, line, legend_rank, extra))
    }

    /// Vertical reference line at `x` plus a legend entry named `name`.
    pub fn add_vline_legend(
        &mut self,
        x: f64,
        name: &str,
        line: &ReferenceLineStyle,
        legend_rank: Option<f64>,
        extra: LegendLabelExtra,
    ) -> FigureResult<()> {
        ensure_rank_finite(legend_rank)?;
        self.add_vline(x, LineStyle::from(line));
        self.add_legend_label(reference_line_label(name, line, legend_rank, extra))
    }

    /// Named, legend-visible traces ordered by legend rank, then insertion.
    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        let mut entries: Vec<LegendEntry> = self
            .traces
            .iter()
            .enumerate()
            .filter(|(_, trace)| trace.show_legend != Some(false))
            .filter_map(|(trace_index, trace)| {
                let name = trace.name().filter(|name| !name.is_empty())?;
                Some(LegendEntry {
                    name: name.to_owned(),
                    trace_index,
                    legend_group: trace.legend_group.clone(),
                    legend_rank: trace.legend_rank,
                })
            })
            .collect();
        entries.sort_by_key(|entry| OrderedFloat(entry.legend_rank.unwrap_or(DEFAULT_LEGEND_RANK)));
        entries
    }
}

fn ensure_rank_finite(legend_rank: Option<f64>) -> FigureResult<()> {
    if let Some(rank) = legend_rank {
        ensure_finite(rank, "legend rank")?;
    }
    Ok(())
}

fn reference_line_label(
    name: &str,
    line: &ReferenceLineStyle,
    legend_rank: Option<f64>,
    extra: LegendLabelExtra,
) -> LegendLabelOptions {
    LegendLabelOptions {
        template_trace: None,
        label: Some(name.to_owned()),
        mode: Some(TraceMode::Lines),
        marker: Some(Marker::colored(line.color.clone())),
        line_dash: Some(line.dash),
        legend_rank,
        extra,
    }
}
