use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No round has been started yet")]
    NotStarted,
    #[error("Sequence is still being presented, input is not accepted")]
    Presenting,
    #[error("Game already ended, no new guesses are accepted")]
    AlreadyEnded,
    #[error("Game is still running, cannot restart")]
    NotOver,
    #[error("Timer belongs to a round that is no longer current")]
    StaleRound,
}

pub type Result<T> = core::result::Result<T, GameError>;
