mod display_config;
mod document;
mod null_renderer;

pub use display_config::{DisplayConfig, DisplayOptions, ImageFormat};
pub use document::FigureDocument;
pub use null_renderer::NullRenderer;

use crate::error::FigureResult;

/// Contract implemented by the underlying scene-graph renderer.
///
/// Backends receive a fully finalized, deterministic `FigureDocument` so
/// display code stays isolated from composition and annotation logic.
pub trait FigureRenderer {
    fn show(&mut self, document: &FigureDocument, config: &DisplayConfig) -> FigureResult<()>;
}
