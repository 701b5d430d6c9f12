use thiserror::Error;

pub type FigureResult<T> = Result<T, FigureError>;

#[derive(Debug, Error)]
pub enum FigureError {
    #[error("trace `{name}` not found")]
    TraceNotFound { name: String },

    #[error("legend label must be specified when no template trace is given")]
    MissingLabel,

    #[error("invalid grid spec: rows={rows}, cols={cols}")]
    InvalidGridSpec { rows: usize, cols: usize },

    #[error("grid cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("figure was not created as a subplot grid")]
    NotAGrid,

    #[error("grid cell ({row}, {col}) has no secondary y axis")]
    SecondaryAxisUnavailable { row: usize, col: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
