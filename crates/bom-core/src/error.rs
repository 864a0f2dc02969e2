use thiserror::Error;

#[derive(Error, Debug)]
pub enum BomError {
    #[error("cyclic BOM detected, witness path: {0}")]
    CyclicBom(String),

    #[error("part not found: {0}")]
    PartNotFound(String),

    #[error("invalid BOM edge: {0}")]
    InvalidEdge(String),

    #[error("repository error: {0}")]
    RepositoryError(String),
}

pub type Result<T> = std::result::Result<T, BomError>;
