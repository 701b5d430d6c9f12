//! Figure composition surface: figures, subplot grids, legend labels,
//! overlays, margins and the finalize hand-off.

mod figure;
mod json_contract;
mod legend_synthesizer;
mod margin_policy;
mod overlay_annotator;
mod render_config;
mod render_context;
mod subplot_composer;

pub use figure::{Figure, FigureOptions, TitleOptions};
pub use json_contract::{FIGURE_DOCUMENT_JSON_SCHEMA_V1, FigureDocumentJsonContractV1};
pub use legend_synthesizer::{
    DEFAULT_LEGEND_RANK, LegendEntry, LegendLabelExtra, LegendLabelOptions,
};
pub use margin_policy::{MarginPolicy, MarginValues};
pub use overlay_annotator::{BRANDING_TEXT, command_location_xshift};
pub use render_config::{
    CHART_STYLE_ENV, EXPORT_MODE_ENV, LEGACY_EXPORT_MODE_ENV, PLOT_HEIGHT_ENV, PLOT_WIDTH_ENV,
    RenderConfig, parse_bool_flag,
};
pub use render_context::{
    FinalizeOutcome, FinalizeRequest, RenderContext, RenderMode, SurfaceProbe, TerminalProbe,
};
pub use subplot_composer::SubplotComposer;
