use serde::{Deserialize, Serialize};

use crate::core::{Layout, SubplotGrid, Trace};
use crate::error::{FigureError, FigureResult};

/// Backend-agnostic scene graph for one finalized figure.
///
/// This is both what renderers receive on hand-off and what export mode
/// returns; it carries enough state to rebuild the originating figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FigureDocument {
    pub data: Vec<Trace>,
    pub layout: Layout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<SubplotGrid>,
    #[serde(default)]
    pub is_subplot: bool,
    #[serde(default)]
    pub has_secondary_y: bool,
}

impl FigureDocument {
    pub fn validate(&self) -> FigureResult<()> {
        for trace in &self.data {
            trace.validate()?;
        }
        self.layout.validate()?;
        if let Some(grid) = &self.grid {
            grid.validate(&self.layout.xaxes, &self.layout.yaxes)?;
        }
        if self.has_secondary_y && !self.layout.has_overlaying_yaxis() {
            return Err(FigureError::InvalidData(
                "document flags a secondary y axis but defines none".to_owned(),
            ));
        }
        Ok(())
    }

    /// Tree-of-maps form of the document.
    pub fn to_value(&self) -> FigureResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| {
            FigureError::InvalidData(format!("failed to serialize figure document: {e}"))
        })
    }
}
