use thiserror::Error;

pub type Result<T> = std::result::Result<T, LdwmError>;

#[derive(Debug, Error)]
pub enum LdwmError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("cannot open display")]
    DisplayUnavailable,
    #[error("another window manager is already running")]
    OtherWindowManager,
    #[error("cannot load font: '{0}'")]
    FontUnavailable(String),
    #[error("display server error: {0}")]
    DisplayServer(String),
}
