#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("range [{from_incl}, {upto_excl}) is invalid for a store of size {size}")]
    InvalidRange {
        from_incl: usize,
        upto_excl: usize,
        size: usize,
    },

    #[error("position {pos} is out of bounds for a store of size {size}")]
    InvalidPosition { pos: usize, size: usize },

    #[error("size {size} exceeds the wire format limit of {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("unknown store kind tag: {tag}")]
    UnknownKind { tag: u8 },

    #[error("stream truncated while reading {context}")]
    Truncated { context: &'static str },

    #[error("corrupt store stream: {message}")]
    Corrupt { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
