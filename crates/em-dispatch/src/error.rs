use em_core::EmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("AI pass configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match entity count {expected}")]
    EntityCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] EmError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
