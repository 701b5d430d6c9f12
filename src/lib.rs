//! figure-rs: composition layer for multi-panel financial charts.
//!
//! Independently built figures are merged into subplot grids, decorated with
//! synthetic legend entries and standard overlays, and finalized either as a
//! native display hand-off or as a serializable export document.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{Figure, FigureOptions, RenderContext, SubplotComposer};
pub use error::{FigureError, FigureResult};
