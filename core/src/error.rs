use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration, need at least one row, one column and one safe cell")]
    InvalidConfiguration,
    #[error("Coordinates are outside of the board")]
    OutOfBounds,
    #[error("Malformed board size, expected ROWSxCOLSxMINES")]
    MalformedConfig,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
