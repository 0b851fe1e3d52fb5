use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Row width mismatch: expected {expected} cells, got {actual}")]
    RowWidth { expected: usize, actual: usize },

    #[error("Column not found: {name}")]
    MissingColumn { name: String },

    #[error("Duplicate column: {name}")]
    DuplicateColumn { name: String },

    #[error("Geometry count mismatch: {rows} rows but {geometries} geometries")]
    GeometryCount { rows: usize, geometries: usize },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
