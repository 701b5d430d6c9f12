use std::sync::Arc;

use tracing::debug;

use crate::core::{AxisId, GridOptions, SubplotGrid, Theme};
use crate::error::{FigureError, FigureResult};

use super::{Figure, MarginPolicy, RenderContext};

/// Builds subplot grids and merges standalone figures into their cells.
#[derive(Debug, Clone)]
pub struct SubplotComposer {
    context: RenderContext,
    policy: MarginPolicy,
    template: Arc<Theme>,
}

impl SubplotComposer {
    #[must_use]
    pub fn new(context: RenderContext) -> Self {
        Self {
            context,
            policy: MarginPolicy::default(),
            template: Theme::global(),
        }
    }

    #[must_use]
    pub fn with_margin_policy(mut self, policy: MarginPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: Arc<Theme>) -> Self {
        self.template = template;
        self
    }

    #[must_use]
    pub fn context(&self) -> RenderContext {
        self.context
    }

    /// Creates an empty `rows x cols` grid figure.
    ///
    /// The figure is flagged as a subplot, and as having a secondary y axis
    /// when any cell spec asks for one.
    pub fn create_grid(&self, rows: usize, cols: usize, options: GridOptions) -> FigureResult<Figure> {
        let blueprint = SubplotGrid::build(rows, cols, &options)?;
        let has_secondary_y = options.requests_secondary_y();
        debug!(rows, cols, has_secondary_y, "created subplot grid");
        Ok(Figure::from_grid(
            self.template.clone(),
            blueprint,
            has_secondary_y,
        ))
    }

    /// Moves every trace of `source` into cell (`row`, `col`) of `target`,
    /// then copies the source's x axis keyed by `col` and y axis keyed by
    /// `row` over the target's axes with the same keys.
    ///
    /// Every trace is tagged with legend group `row`. In export mode the
    /// target's margins are reset to the merge margins.
    pub fn merge_into(
        &self,
        source: Figure,
        mut target: Figure,
        row: usize,
        col: usize,
        secondary_y: bool,
    ) -> FigureResult<Figure> {
        let grid = target.grid.as_ref().ok_or(FigureError::NotAGrid)?;
        let cell = grid.cell(row, col)?;
        if secondary_y && cell.secondary_yaxis.is_none() {
            return Err(FigureError::SecondaryAxisUnavailable { row, col });
        }

        let Figure {
            traces,
            layout: source_layout,
            ..
        } = source;
        traces.iter().try_for_each(|trace| trace.validate())?;
        let trace_count = traces.len();
        let legend_group = row.to_string();
        for mut trace in traces {
            trace.legend_group = Some(legend_group.clone());
            target.add_trace_at(trace, row, col, secondary_y)?;
        }

        let xaxis_key = axis_key(col)?;
        let yaxis_key = axis_key(row)?;
        let mut source_xaxes = source_layout.xaxes;
        let mut source_yaxes = source_layout.yaxes;
        if let Some(axis) = source_xaxes.swap_remove(&xaxis_key) {
            target.layout.xaxes.insert(xaxis_key, axis);
        }
        if let Some(axis) = source_yaxes.swap_remove(&yaxis_key) {
            target.layout.yaxes.insert(yaxis_key, axis);
        }

        if self.context.is_export() {
            target.layout.margin = self.policy.merge_export_margin.to_margin();
        }

        debug!(row, col, secondary_y, trace_count, "merged figure into grid cell");
        Ok(target)
    }
}

fn axis_key(index: usize) -> FigureResult<AxisId> {
    u32::try_from(index)
        .map(AxisId::new)
        .map_err(|_| FigureError::InvalidData(format!("axis index {index} is too large")))
}
