use std::io::IsTerminal;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ModeBar, Orientation};
use crate::error::FigureResult;
use crate::render::{DisplayConfig, DisplayOptions, FigureDocument, FigureRenderer};

use super::{Figure, MarginPolicy, RenderConfig};

const DARK_MODEBAR_BG_COLOR: &str = "#2A2A2A";
const DARK_MODEBAR_COLOR: &str = "#FFFFFF";
const DARK_MODEBAR_ACTIVE_COLOR: &str = "#d1030d";
const DARK_NEW_SHAPE_LINE_COLOR: &str = "gold";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// An interactive display surface is attached.
    Interactive,
    /// Headless or explicitly requested export; finalize returns a document.
    Export,
}

/// Answers whether an interactive display surface is attached.
pub trait SurfaceProbe {
    fn is_interactive_surface(&self) -> bool;
}

/// Treats an attached stdout terminal as an interactive surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalProbe;

impl SurfaceProbe for TerminalProbe {
    fn is_interactive_surface(&self) -> bool {
        std::io::stdout().is_terminal()
    }
}

impl SurfaceProbe for bool {
    fn is_interactive_surface(&self) -> bool {
        *self
    }
}

/// Inputs for one finalize call besides the figure itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinalizeRequest<'a> {
    /// Location of the command that produced the figure, drawn along the left edge.
    pub command_location: Option<&'a str>,
    pub display: DisplayOptions,
    pub margin_policy: MarginPolicy,
}

impl<'a> FinalizeRequest<'a> {
    #[must_use]
    pub fn with_command_location(mut self, location: &'a str) -> Self {
        self.command_location = Some(location);
        self
    }

    #[must_use]
    pub fn with_display(mut self, display: DisplayOptions) -> Self {
        self.display = display;
        self
    }

    #[must_use]
    pub fn with_margin_policy(mut self, policy: MarginPolicy) -> Self {
        self.margin_policy = policy;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FinalizeOutcome {
    /// Handed off to the renderer with this display config.
    Displayed(DisplayConfig),
    /// Export mode result; nothing was displayed.
    Document(FigureDocument),
}

impl FinalizeOutcome {
    #[must_use]
    pub fn into_document(self) -> Option<FigureDocument> {
        match self {
            Self::Document(document) => Some(document),
            Self::Displayed(_) => None,
        }
    }
}

/// Output mode resolved once per finalize call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    mode: RenderMode,
}

impl RenderContext {
    #[must_use]
    pub const fn interactive() -> Self {
        Self {
            mode: RenderMode::Interactive,
        }
    }

    #[must_use]
    pub const fn export() -> Self {
        Self {
            mode: RenderMode::Export,
        }
    }

    /// The export flag wins; otherwise the probe decides.
    #[must_use]
    pub fn resolve(probe: &impl SurfaceProbe, export_flag: bool) -> Self {
        let context = if export_flag || !probe.is_interactive_surface() {
            Self::export()
        } else {
            Self::interactive()
        };
        debug!(mode = ?context.mode, export_flag, "resolved render context");
        context
    }

    #[must_use]
    pub fn from_config(probe: &impl SurfaceProbe, config: &RenderConfig) -> Self {
        Self::resolve(probe, config.export_mode)
    }

    #[must_use]
    pub const fn mode(self) -> RenderMode {
        self.mode
    }

    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self.mode, RenderMode::Interactive)
    }

    #[must_use]
    pub const fn is_export(self) -> bool {
        matches!(self.mode, RenderMode::Export)
    }

    /// Applies overlays and margins, then either displays the figure or
    /// returns its document.
    ///
    /// The figure is consumed, so it cannot be finalized twice.
    pub fn finalize<R: FigureRenderer>(
        self,
        mut figure: Figure,
        renderer: &mut R,
        request: FinalizeRequest<'_>,
    ) -> FigureResult<FinalizeOutcome> {
        let policy = request.margin_policy.validate()?;

        figure.apply_standard_overlays(request.command_location);
        policy.apply(&mut figure, self);

        if figure.layout.is_dark() {
            figure.layout.new_shape_line_color = Some(DARK_NEW_SHAPE_LINE_COLOR.to_owned());
            figure.layout.modebar = Some(ModeBar {
                orientation: Orientation::Vertical,
                bg_color: DARK_MODEBAR_BG_COLOR.to_owned(),
                color: DARK_MODEBAR_COLOR.to_owned(),
                active_color: DARK_MODEBAR_ACTIVE_COLOR.to_owned(),
            });
        }

        let document = figure.into_document();
        match self.mode {
            RenderMode::Export => {
                debug!(traces = document.data.len(), "finalize returned export document");
                Ok(FinalizeOutcome::Document(document))
            }
            RenderMode::Interactive => {
                let config = DisplayConfig::from_options(request.display);
                renderer.show(&document, &config)?;
                debug!(traces = document.data.len(), "finalize handed off to renderer");
                Ok(FinalizeOutcome::Displayed(config))
            }
        }
    }
}
