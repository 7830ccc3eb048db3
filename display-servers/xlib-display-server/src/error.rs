//! Error handling and reporting for this backend

use ldwm_core::LdwmError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, XlibError>;

#[derive(Debug, Error)]
pub enum XlibError {
    #[error("Unable to load Xlib: {0}")]
    Library(String),
    #[error("Cannot open display.")]
    DisplayUnavailable,
    #[error("Another window manager is already running.")]
    OtherWindowManager,
    #[error("Cannot load font: '{0}'")]
    FontUnavailable(String),
    #[error("Cannot allocate color '{0}'")]
    ColorUnavailable(String),
    #[error("Xlib returned a failed status.")]
    FailedStatus,
    #[error("Unable to watch the X connection: {0}")]
    Poll(#[from] std::io::Error),
}

impl From<XlibError> for LdwmError {
    fn from(err: XlibError) -> Self {
        match err {
            XlibError::DisplayUnavailable => Self::DisplayUnavailable,
            XlibError::OtherWindowManager => Self::OtherWindowManager,
            XlibError::FontUnavailable(font) => Self::FontUnavailable(font),
            XlibError::Poll(err) => Self::IoError(err),
            other => Self::DisplayServer(other.to_string()),
        }
    }
}
