use thiserror::Error;

use nr_core::MapError;

use crate::command::SyntaxError;

/// Failure of a whole run: the input or an output stream broke.
#[derive(Debug, Error)]
pub enum TextError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TextResult<T> = Result<T, TextError>;

/// Failure of a single line; reported as `ERROR <line>` and the run goes on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("line is not valid UTF-8")]
    NotUtf8,

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Map(#[from] MapError),
}
