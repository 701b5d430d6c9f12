use serde::{Deserialize, Serialize};

use crate::error::{FigureError, FigureResult};
use crate::render::FigureDocument;

use super::Figure;

pub const FIGURE_DOCUMENT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureDocumentJsonContractV1 {
    pub schema_version: u32,
    pub document: FigureDocument,
}

impl FigureDocument {
    pub fn to_json_pretty(&self) -> FigureResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            FigureError::InvalidData(format!("failed to serialize figure document json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> FigureResult<String> {
        let payload = FigureDocumentJsonContractV1 {
            schema_version: FIGURE_DOCUMENT_JSON_SCHEMA_V1,
            document: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            FigureError::InvalidData(format!("failed to serialize figure document contract v1: {e}"))
        })
    }

    /// Accepts either a bare document or a versioned v1 payload.
    pub fn from_json_compat_str(input: &str) -> FigureResult<Self> {
        if let Ok(document) = serde_json::from_str::<FigureDocument>(input) {
            return Ok(document);
        }
        let payload: FigureDocumentJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            FigureError::InvalidData(format!("failed to parse figure document json payload: {e}"))
        })?;
        if payload.schema_version != FIGURE_DOCUMENT_JSON_SCHEMA_V1 {
            return Err(FigureError::InvalidData(format!(
                "unsupported figure document schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.document)
    }

    /// Rebuilds the figure this document was produced from.
    pub fn into_figure(self) -> FigureResult<Figure> {
        Figure::from_document(self)
    }
}

impl Figure {
    /// Versioned JSON document of the figure in its current state.
    pub fn document_json_contract_v1_pretty(&self) -> FigureResult<String> {
        self.clone().into_document().to_json_contract_v1_pretty()
    }
}
