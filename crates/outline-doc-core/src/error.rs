use thiserror::Error;

use crate::store::StoreError;

pub type OutlineResult<T> = Result<T, OutlineError>;

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("cannot move index {index} by {offset} in list of length {len}")]
    MoveOutOfBounds {
        index: usize,
        offset: isize,
        len: usize,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no document is open")]
    NoDocumentOpen,

    #[error(transparent)]
    Store(#[from] StoreError),
}
