use crate::voice::RecognizerError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown profile field: {0}")]
    UnknownField(String),
    #[error(transparent)]
    Config(#[from] envy::Error),
    #[error(transparent)]
    Spawn(#[from] ractor::SpawnErr),
    #[error("conversation actor unavailable: {0}")]
    Actor(String),
    #[error("voice capture is already listening")]
    AlreadyListening,
    #[error("speech recognition failed: {0}")]
    Recognizer(RecognizerError),
}
