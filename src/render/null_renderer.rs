use crate::error::FigureResult;
use crate::render::{DisplayConfig, FigureDocument, FigureRenderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates the handed-off document so tests catch malformed
/// figures before a real display backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub show_count: usize,
    pub last_trace_count: usize,
    pub last_annotation_count: usize,
    pub last_config: Option<DisplayConfig>,
}

impl FigureRenderer for NullRenderer {
    fn show(&mut self, document: &FigureDocument, config: &DisplayConfig) -> FigureResult<()> {
        document.validate()?;
        self.show_count += 1;
        self.last_trace_count = document.data.len();
        self.last_annotation_count = document.layout.annotations.len();
        self.last_config = Some(config.clone());
        Ok(())
    }
}
