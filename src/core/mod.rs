pub mod annotation;
pub mod axis;
pub mod grid;
pub mod layout;
pub mod primitives;
pub mod shape;
pub mod theme;
pub mod trace;
pub mod types;

pub use annotation::Annotation;
pub use axis::{AxisLayout, AxisType};
pub use grid::{CellSpec, GridBlueprint, GridCell, GridOptions, SubplotGrid};
pub use layout::{LegendConfig, Layout, Margin, MarginSide, ModeBar, Title};
pub use shape::{LineDash, LineStyle, ReferenceLineStyle, Shape, ShapeKind};
pub use theme::Theme;
pub use trace::{Marker, OhlcColumns, Trace, TraceKind, TraceMode};
pub use types::{
    AxisDimension, AxisId, AxisSide, CoordinateRef, Font, Orientation, XAnchor, YAnchor,
};
