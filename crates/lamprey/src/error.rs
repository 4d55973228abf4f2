#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("vertex {vertex} is out of range for a graph of size {size}")]
    VertexOutOfRange { vertex: usize, size: usize },

    #[error("{op} is not supported by the {backend} backend")]
    Unsupported {
        op: &'static str,
        backend: &'static str,
    },

    #[error("graph sizes differ: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },

    #[error("negative weight {weight} on edge {from} -> {into}")]
    NegativeWeight { from: usize, into: usize, weight: f64 },

    #[error("predecessor chain from {from} to {into} does not terminate")]
    PathCycle { from: usize, into: usize },

    #[error("edge data decode failed: {message}")]
    Decode { message: String },

    #[error("invalid edge data configuration: {message}")]
    Config { message: String },

    #[error(transparent)]
    Store(#[from] lamprey_store::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
