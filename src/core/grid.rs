use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::{
    Annotation, AxisId, AxisLayout, AxisSide, CoordinateRef, Font, XAnchor, YAnchor,
};
use crate::error::{FigureError, FigureResult};

const SUBPLOT_TITLE_FONT_SIZE: f64 = 16.0;

/// Per-cell subplot options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CellSpec {
    /// Adds a right-side y axis overlaying the cell's primary y axis.
    pub secondary_y: bool,
}

impl CellSpec {
    #[must_use]
    pub const fn with_secondary_y() -> Self {
        Self { secondary_y: true }
    }
}

/// Options for building a subplot grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridOptions {
    /// Link every x axis in a column to the bottom row's x axis.
    pub shared_xaxes: bool,
    /// Fraction of paper height between rows; defaults to `0.3 / rows`.
    pub vertical_spacing: Option<f64>,
    /// Fraction of paper width between columns; defaults to `0.2 / cols`.
    pub horizontal_spacing: Option<f64>,
    /// Titles in row-major cell order; may be shorter than the cell count.
    pub subplot_titles: Vec<String>,
    /// Relative row heights listed from the bottom row up; defaults to `[1; rows]`.
    pub row_width: Option<Vec<f64>>,
    /// `rows x cols` cell specs; defaults to an empty spec per cell.
    pub specs: Option<Vec<Vec<CellSpec>>>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            shared_xaxes: true,
            vertical_spacing: None,
            horizontal_spacing: None,
            subplot_titles: Vec::new(),
            row_width: None,
            specs: None,
        }
    }
}

impl GridOptions {
    #[must_use]
    pub fn with_specs(mut self, specs: Vec<Vec<CellSpec>>) -> Self {
        self.specs = Some(specs);
        self
    }

    #[must_use]
    pub fn with_row_width(mut self, row_width: Vec<f64>) -> Self {
        self.row_width = Some(row_width);
        self
    }

    #[must_use]
    pub fn with_vertical_spacing(mut self, spacing: f64) -> Self {
        self.vertical_spacing = Some(spacing);
        self
    }

    #[must_use]
    pub fn with_horizontal_spacing(mut self, spacing: f64) -> Self {
        self.horizontal_spacing = Some(spacing);
        self
    }

    #[must_use]
    pub fn with_subplot_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subplot_titles = titles.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_shared_xaxes(mut self, shared: bool) -> Self {
        self.shared_xaxes = shared;
        self
    }

    /// Whether any cell asks for a secondary y axis.
    #[must_use]
    pub fn requests_secondary_y(&self) -> bool {
        self.specs
            .iter()
            .flatten()
            .flatten()
            .any(|spec| spec.secondary_y)
    }
}

/// Axis routing for one grid cell (1-based row/col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub xaxis: AxisId,
    pub yaxis: AxisId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_yaxis: Option<AxisId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubplotGrid {
    rows: usize,
    cols: usize,
    cells: Vec<GridCell>,
}

/// Everything a grid contributes to a fresh layout.
#[derive(Debug, Clone, PartialEq)]
pub struct GridBlueprint {
    pub grid: SubplotGrid,
    pub xaxes: IndexMap<AxisId, AxisLayout>,
    pub yaxes: IndexMap<AxisId, AxisLayout>,
    pub title_annotations: Vec<Annotation>,
}

impl SubplotGrid {
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> FigureResult<&GridCell> {
        if row == 0 || col == 0 || row > self.rows || col > self.cols {
            return Err(FigureError::CellOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.cells
            .get((row - 1) * self.cols + (col - 1))
            .filter(|cell| cell.row == row && cell.col == col)
            .ok_or_else(|| {
                FigureError::InvalidData(format!("grid has no cell record for ({row}, {col})"))
            })
    }

    /// Checks the grid shape against its cell records and the layout axes.
    pub fn validate(
        &self,
        xaxes: &IndexMap<AxisId, AxisLayout>,
        yaxes: &IndexMap<AxisId, AxisLayout>,
    ) -> FigureResult<()> {
        if self.rows < 1 || self.cols < 1 {
            return Err(FigureError::InvalidGridSpec {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let expected = self.rows.checked_mul(self.cols).ok_or(FigureError::InvalidGridSpec {
            rows: self.rows,
            cols: self.cols,
        })?;
        if self.cells.len() != expected {
            return Err(FigureError::InvalidData(format!(
                "grid {}x{} carries {} cell records",
                self.rows,
                self.cols,
                self.cells.len()
            )));
        }
        for (index, cell) in self.cells.iter().enumerate() {
            if cell.row != index / self.cols + 1 || cell.col != index % self.cols + 1 {
                return Err(FigureError::InvalidData(format!(
                    "grid cell record {index} is labeled ({}, {})",
                    cell.row, cell.col
                )));
            }
            let missing_y = std::iter::once(cell.yaxis)
                .chain(cell.secondary_yaxis)
                .find(|id| !yaxes.contains_key(id));
            if !xaxes.contains_key(&cell.xaxis) || missing_y.is_some() {
                return Err(FigureError::InvalidData(format!(
                    "grid cell ({}, {}) routes to an axis the layout does not define",
                    cell.row, cell.col
                )));
            }
        }
        Ok(())
    }

    /// Lays out a `rows x cols` grid: cell domains, axis ids, shared-x links
    /// and subplot title annotations.
    pub fn build(rows: usize, cols: usize, options: &GridOptions) -> FigureResult<GridBlueprint> {
        if rows < 1 || cols < 1 {
            return Err(FigureError::InvalidGridSpec { rows, cols });
        }
        let specs = resolve_specs(rows, cols, options.specs.as_ref())?;
        let row_heights = resolve_row_heights(rows, cols, options.row_width.as_deref())?;

        let vertical_spacing =
            resolve_spacing(options.vertical_spacing, 0.3 / rows as f64, rows, "vertical")?;
        let horizontal_spacing = resolve_spacing(
            options.horizontal_spacing,
            0.2 / cols as f64,
            cols,
            "horizontal",
        )?;

        let col_width = (1.0 - horizontal_spacing * (cols - 1) as f64) / cols as f64;
        let usable_height = 1.0 - vertical_spacing * (rows - 1) as f64;
        let height_sum: f64 = row_heights.iter().sum();

        let mut cells = Vec::with_capacity(rows * cols);
        let mut xaxes = IndexMap::new();
        let mut yaxes = IndexMap::new();
        let mut next_x = 1_u32;
        let mut next_y = 1_u32;
        let mut row_top = 1.0;

        for (row_index, spec_row) in specs.iter().enumerate() {
            let row_height = row_heights[row_index] / height_sum * usable_height;
            let y_domain = [(row_top - row_height).max(0.0), row_top];

            for (col_index, spec) in spec_row.iter().enumerate() {
                let x_start = col_index as f64 * (col_width + horizontal_spacing);
                let x_domain = [x_start, (x_start + col_width).min(1.0)];

                let xaxis = AxisId::new(next_x);
                next_x += 1;
                let yaxis = AxisId::new(next_y);
                next_y += 1;

                xaxes.insert(
                    xaxis,
                    AxisLayout {
                        anchor: Some(yaxis),
                        domain: Some(x_domain),
                        ..AxisLayout::default()
                    },
                );
                yaxes.insert(
                    yaxis,
                    AxisLayout {
                        anchor: Some(xaxis),
                        domain: Some(y_domain),
                        ..AxisLayout::default()
                    },
                );

                let secondary_yaxis = if spec.secondary_y {
                    let secondary = AxisId::new(next_y);
                    next_y += 1;
                    yaxes.insert(
                        secondary,
                        AxisLayout {
                            anchor: Some(xaxis),
                            overlaying: Some(yaxis),
                            side: Some(AxisSide::Right),
                            ..AxisLayout::default()
                        },
                    );
                    Some(secondary)
                } else {
                    None
                };

                cells.push(GridCell {
                    row: row_index + 1,
                    col: col_index + 1,
                    xaxis,
                    yaxis,
                    secondary_yaxis,
                });
            }
            row_top -= row_height + vertical_spacing;
        }

        let grid = Self { rows, cols, cells };
        if options.shared_xaxes && rows > 1 {
            grid.link_shared_xaxes(&mut xaxes);
        }
        let title_annotations = grid.title_annotations(&options.subplot_titles, &xaxes, &yaxes);

        Ok(GridBlueprint {
            grid,
            xaxes,
            yaxes,
            title_annotations,
        })
    }

    fn link_shared_xaxes(&self, xaxes: &mut IndexMap<AxisId, AxisLayout>) {
        for col in 1..=self.cols {
            let bottom = self.cells[(self.rows - 1) * self.cols + (col - 1)].xaxis;
            for row in 1..self.rows {
                let xaxis = self.cells[(row - 1) * self.cols + (col - 1)].xaxis;
                if let Some(axis) = xaxes.get_mut(&xaxis) {
                    axis.matches = Some(bottom);
                    axis.show_tick_labels = Some(false);
                }
            }
        }
    }

    fn title_annotations(
        &self,
        titles: &[String],
        xaxes: &IndexMap<AxisId, AxisLayout>,
        yaxes: &IndexMap<AxisId, AxisLayout>,
    ) -> Vec<Annotation> {
        self.cells
            .iter()
            .zip(titles)
            .filter(|(_, title)| !title.is_empty())
            .filter_map(|(cell, title)| {
                let [x0, x1] = xaxes.get(&cell.xaxis)?.domain?;
                let [_, y1] = yaxes.get(&cell.yaxis)?.domain?;
                Some(
                    Annotation::new(title.clone())
                        .at((x0 + x1) / 2.0, y1)
                        .with_refs(CoordinateRef::Paper, CoordinateRef::Paper)
                        .with_anchors(XAnchor::Center, YAnchor::Bottom)
                        .with_font(Font {
                            size: Some(SUBPLOT_TITLE_FONT_SIZE),
                            ..Font::default()
                        }),
                )
            })
            .collect()
    }
}

fn resolve_specs(
    rows: usize,
    cols: usize,
    specs: Option<&Vec<Vec<CellSpec>>>,
) -> FigureResult<Vec<Vec<CellSpec>>> {
    let Some(specs) = specs else {
        return Ok(vec![vec![CellSpec::default(); cols]; rows]);
    };
    if specs.len() != rows || specs.iter().any(|row| row.len() != cols) {
        return Err(FigureError::InvalidGridSpec { rows, cols });
    }
    Ok(specs.clone())
}

type RowHeights = SmallVec<[f64; 4]>;

/// Row heights top row first.
fn resolve_row_heights(
    rows: usize,
    cols: usize,
    row_width: Option<&[f64]>,
) -> FigureResult<RowHeights> {
    let Some(row_width) = row_width else {
        return Ok(smallvec![1.0; rows]);
    };
    if row_width.len() != rows
        || row_width
            .iter()
            .any(|width| !width.is_finite() || *width <= 0.0)
    {
        return Err(FigureError::InvalidGridSpec { rows, cols });
    }
    Ok(row_width.iter().rev().copied().collect())
}

fn resolve_spacing(
    value: Option<f64>,
    default: f64,
    count: usize,
    name: &str,
) -> FigureResult<f64> {
    let spacing = value.unwrap_or(default);
    if !spacing.is_finite() || spacing < 0.0 {
        return Err(FigureError::InvalidData(format!(
            "{name} spacing must be finite and >= 0"
        )));
    }
    if count > 1 && spacing * (count - 1) as f64 >= 1.0 {
        return Err(FigureError::InvalidData(format!(
            "{name} spacing {spacing} leaves no room for {count} subplots"
        )));
    }
    Ok(spacing)
}

#[cfg(test)]
mod tests {
    use super::{CellSpec, GridOptions, SubplotGrid};
    use crate::core::AxisId;
    use crate::error::FigureError;

    #[test]
    fn single_cell_grid_spans_full_paper() {
        let blueprint = SubplotGrid::build(1, 1, &GridOptions::default()).expect("grid");
        let cell = blueprint.grid.cell(1, 1).expect("cell");

        assert_eq!(cell.xaxis, AxisId::PRIMARY);
        assert_eq!(cell.yaxis, AxisId::PRIMARY);
        assert_eq!(blueprint.xaxes[&AxisId::PRIMARY].domain, Some([0.0, 1.0]));
        assert_eq!(blueprint.yaxes[&AxisId::PRIMARY].domain, Some([0.0, 1.0]));
    }

    #[test]
    fn secondary_axis_takes_next_y_id() {
        let options = GridOptions::default().with_specs(vec![
            vec![CellSpec::with_secondary_y()],
            vec![CellSpec::default()],
        ]);
        let blueprint = SubplotGrid::build(2, 1, &options).expect("grid");

        let top = blueprint.grid.cell(1, 1).expect("top");
        let bottom = blueprint.grid.cell(2, 1).expect("bottom");
        assert_eq!(top.secondary_yaxis, Some(AxisId::new(2)));
        assert_eq!(bottom.yaxis, AxisId::new(3));
        assert_eq!(
            blueprint.yaxes[&AxisId::new(2)].overlaying,
            Some(AxisId::PRIMARY)
        );
    }

    #[test]
    fn mismatched_specs_are_rejected() {
        let options = GridOptions::default().with_specs(vec![vec![CellSpec::default(); 2]]);
        let err = SubplotGrid::build(2, 2, &options).expect_err("shape mismatch");
        assert!(matches!(err, FigureError::InvalidGridSpec { rows: 2, cols: 2 }));
    }

    #[test]
    fn built_grid_passes_validation() {
        let options = GridOptions::default().with_specs(vec![
            vec![CellSpec::with_secondary_y(), CellSpec::default()],
            vec![CellSpec::default(), CellSpec::default()],
        ]);
        let blueprint = SubplotGrid::build(2, 2, &options).expect("grid");
        blueprint
            .grid
            .validate(&blueprint.xaxes, &blueprint.yaxes)
            .expect("consistent grid");
    }

    #[test]
    fn grid_missing_layout_axis_fails_validation() {
        let mut blueprint = SubplotGrid::build(2, 1, &GridOptions::default()).expect("grid");
        blueprint.yaxes.swap_remove(&AxisId::new(2));
        assert!(
            blueprint
                .grid
                .validate(&blueprint.xaxes, &blueprint.yaxes)
                .is_err()
        );
    }

    #[test]
    fn out_of_range_cells_are_rejected() {
        let blueprint = SubplotGrid::build(2, 2, &GridOptions::default()).expect("grid");
        assert!(blueprint.grid.cell(0, 1).is_err());
        assert!(blueprint.grid.cell(3, 1).is_err());
        assert!(blueprint.grid.cell(1, 3).is_err());
    }
}
