use thiserror::Error;

#[derive(Debug, Error)]
pub enum UvOptimizeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid model: {0}")]
    InvalidModel(String),
    #[error("No faces to optimize")]
    NoFaces,
    #[error("No source textures")]
    NoTextures,
    #[error("Face references texture index {0} which does not exist")]
    MissingTexture(usize),
    #[error("Face groups do not fit within the {max_w}x{max_h} surface limit")]
    OutOfSpace { max_w: u32, max_h: u32 },
    #[error("Internal invariant violated: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, UvOptimizeError>;
