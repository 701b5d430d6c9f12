use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    Annotation, AxisId, AxisLayout, AxisSide, Font, GridBlueprint, Layout, LineStyle, Margin,
    Shape, SubplotGrid, Theme, Title, Trace, XAnchor,
};
use crate::core::primitives::ensure_positive_size;
use crate::error::{FigureError, FigureResult};
use crate::render::FigureDocument;

use super::{RenderConfig, RenderContext};

/// Construction options for a [`Figure`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FigureOptions {
    pub is_subplot: bool,
    /// Must only be set when the layout really carries an overlaying y axis.
    pub has_secondary_y: bool,
    /// Patch applied to every x axis.
    pub xaxis: Option<AxisLayout>,
    /// Patch applied to every y axis.
    pub yaxis: Option<AxisLayout>,
    pub title: Option<String>,
    pub height: Option<f64>,
    pub width: Option<f64>,
}

impl FigureOptions {
    #[must_use]
    pub fn with_xaxis(mut self, axis: AxisLayout) -> Self {
        self.xaxis = Some(axis);
        self
    }

    #[must_use]
    pub fn with_yaxis(mut self, axis: AxisLayout) -> Self {
        self.yaxis = Some(axis);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// Extra title settings merged next to the title text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleOptions {
    pub x: Option<f64>,
    pub xanchor: Option<XAnchor>,
    pub font: Option<Font>,
}

/// One logical chart: traces, layout and subplot flags.
///
/// A figure has a single owner. [`Figure::wrap`] moves an existing figure
/// into a new handle; [`Figure::copy_of`] deep-copies it.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub(super) traces: Vec<Trace>,
    pub(super) layout: Layout,
    pub(super) grid: Option<SubplotGrid>,
    pub(super) is_subplot: bool,
    pub(super) has_secondary_y: bool,
}

impl Figure {
    /// Creates an empty figure on the process-wide theme.
    pub fn new(options: FigureOptions) -> FigureResult<Self> {
        Self::with_template(Theme::global(), options)
    }

    pub fn with_template(template: Arc<Theme>, options: FigureOptions) -> FigureResult<Self> {
        let figure = Self {
            traces: Vec::new(),
            layout: Layout::new(template),
            grid: None,
            is_subplot: false,
            has_secondary_y: false,
        };
        figure.adopt(options)
    }

    /// Creates a figure sized for the output surface.
    ///
    /// Interactive surfaces start from zeroed, auto-expanding margins and the
    /// configured plot size; export figures start unsized.
    pub fn for_context(
        context: RenderContext,
        config: &RenderConfig,
        options: FigureOptions,
    ) -> FigureResult<Self> {
        let mut figure = Self::new(options)?;
        if context.is_interactive() {
            figure.layout.margin = Margin {
                autoexpand: Some(true),
                ..Margin::fixed(0.0, 0.0, 0.0, 0.0, 0.0)
            };
            figure.layout.width = figure.layout.width.or(Some(f64::from(config.plot_width)));
            figure.layout.height = figure
                .layout
                .height
                .or(Some(f64::from(config.plot_height)));
        }
        Ok(figure)
    }

    /// Takes over `base` without copying. The base handle is consumed.
    ///
    /// Flags already set on `base` are kept; `options` can only add to them.
    pub fn wrap(base: Figure, options: FigureOptions) -> FigureResult<Self> {
        trace!(traces = base.traces.len(), "wrap figure");
        base.adopt(options)
    }

    /// Deep copy of `base` with independent lifetime.
    pub fn copy_of(base: &Figure, options: FigureOptions) -> FigureResult<Self> {
        base.clone().adopt(options)
    }

    pub(super) fn from_grid(
        template: Arc<Theme>,
        blueprint: GridBlueprint,
        has_secondary_y: bool,
    ) -> Self {
        let mut layout = Layout::new(template);
        layout.xaxes = blueprint.xaxes;
        layout.yaxes = blueprint.yaxes;
        layout.annotations = blueprint.title_annotations;
        Self {
            traces: Vec::new(),
            layout,
            grid: Some(blueprint.grid),
            is_subplot: true,
            has_secondary_y,
        }
    }

    fn adopt(mut self, options: FigureOptions) -> FigureResult<Self> {
        self.is_subplot |= options.is_subplot;
        self.has_secondary_y |= options.has_secondary_y;
        if let Some(patch) = &options.xaxis {
            self.update_xaxes(patch);
        }
        if let Some(patch) = &options.yaxis {
            self.update_yaxes(patch);
        }
        if let Some(title) = options.title {
            self.set_title(title, TitleOptions::default());
        }
        if let Some(height) = options.height {
            self.layout.height = Some(ensure_positive_size(height, "figure height")?);
        }
        if let Some(width) = options.width {
            self.layout.width = Some(ensure_positive_size(width, "figure width")?);
        }
        if self.has_secondary_y && !self.layout.has_overlaying_yaxis() {
            return Err(FigureError::InvalidData(
                "has_secondary_y requires a y axis overlaying another".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_document(document: FigureDocument) -> FigureResult<Self> {
        document.validate()?;
        Ok(Self {
            traces: document.data,
            layout: document.layout,
            grid: document.grid,
            is_subplot: document.is_subplot,
            has_secondary_y: document.has_secondary_y,
        })
    }

    #[must_use]
    pub fn into_document(self) -> FigureDocument {
        FigureDocument {
            data: self.traces,
            layout: self.layout,
            grid: self.grid,
            is_subplot: self.is_subplot,
            has_secondary_y: self.has_secondary_y,
        }
    }

    pub fn set_title(&mut self, text: impl Into<String>, options: TitleOptions) {
        self.layout.title = Some(Title {
            text: text.into(),
            x: options.x,
            xanchor: options.xanchor,
            font: options.font,
        });
    }

    /// Applies `patch` to every x axis, creating the primary one if none exists.
    pub fn update_xaxes(&mut self, patch: &AxisLayout) {
        if self.layout.xaxes.is_empty() {
            self.layout.xaxes.insert(AxisId::PRIMARY, AxisLayout::default());
        }
        for axis in self.layout.xaxes.values_mut() {
            axis.merge_from(patch);
        }
    }

    /// Applies `patch` to every y axis, creating the primary one if none exists.
    pub fn update_yaxes(&mut self, patch: &AxisLayout) {
        if self.layout.yaxes.is_empty() {
            self.layout.yaxes.insert(AxisId::PRIMARY, AxisLayout::default());
        }
        for axis in self.layout.yaxes.values_mut() {
            axis.merge_from(patch);
        }
    }

    pub fn set_xaxis(&mut self, id: AxisId, axis: AxisLayout) {
        self.layout.xaxes.insert(id, axis);
    }

    pub fn set_yaxis(&mut self, id: AxisId, axis: AxisLayout) {
        self.layout.yaxes.insert(id, axis);
    }

    /// Adds a right-side y axis overlaying the primary one and flags the
    /// figure accordingly. Returns the new axis id.
    pub fn add_secondary_y_axis(&mut self, axis: AxisLayout) -> AxisId {
        let next = self
            .layout
            .yaxes
            .keys()
            .map(|id| id.raw())
            .max()
            .unwrap_or(1)
            + 1;
        let id = AxisId::new(next);
        let mut secondary = AxisLayout {
            overlaying: Some(AxisId::PRIMARY),
            side: Some(AxisSide::Right),
            ..AxisLayout::default()
        };
        secondary.merge_from(&axis);
        self.layout.yaxes.entry(AxisId::PRIMARY).or_default();
        self.layout.yaxes.insert(id, secondary);
        self.has_secondary_y = true;
        debug!(axis = id.raw(), "added secondary y axis");
        id
    }

    pub fn add_trace(&mut self, trace: Trace) -> FigureResult<()> {
        trace.validate()?;
        self.traces.push(trace);
        Ok(())
    }

    /// Routes `trace` onto the axes of grid cell (`row`, `col`).
    pub fn add_trace_at(
        &mut self,
        mut trace: Trace,
        row: usize,
        col: usize,
        secondary_y: bool,
    ) -> FigureResult<()> {
        let grid = self.grid.as_ref().ok_or(FigureError::NotAGrid)?;
        let cell = grid.cell(row, col)?;
        let yaxis = if secondary_y {
            cell.secondary_yaxis
                .ok_or(FigureError::SecondaryAxisUnavailable { row, col })?
        } else {
            cell.yaxis
        };
        trace.xaxis = cell.xaxis;
        trace.yaxis = yaxis;
        self.add_trace(trace)
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.layout.annotations.push(annotation);
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.layout.shapes.push(shape);
    }

    /// Horizontal reference line. Geometry only; it has no legend entry.
    pub fn add_hline(&mut self, y: f64, line: LineStyle) {
        self.add_shape(Shape::hline(y, line));
    }

    /// Vertical reference line. Geometry only; it has no legend entry.
    pub fn add_vline(&mut self, x: f64, line: LineStyle) {
        self.add_shape(Shape::vline(x, line));
    }

    pub fn set_size(&mut self, width: f64, height: f64) -> FigureResult<()> {
        let width = ensure_positive_size(width, "figure width")?;
        let height = ensure_positive_size(height, "figure height")?;
        self.layout.width = Some(width);
        self.layout.height = Some(height);
        Ok(())
    }

    pub fn set_margin(&mut self, margin: Margin) {
        self.layout.margin = margin;
    }

    pub fn set_map_style(&mut self, style: impl Into<String>) {
        self.layout.map_style = Some(style.into());
    }

    #[must_use]
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    #[must_use]
    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }

    /// First trace named `name`, in insertion order.
    #[must_use]
    pub fn find_trace(&self, name: &str) -> Option<&Trace> {
        self.traces.iter().find(|trace| trace.name() == Some(name))
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn grid(&self) -> Option<&SubplotGrid> {
        self.grid.as_ref()
    }

    #[must_use]
    pub fn is_subplot(&self) -> bool {
        self.is_subplot
    }

    #[must_use]
    pub fn has_secondary_y(&self) -> bool {
        self.has_secondary_y
    }
}
