use std::backtrace::Backtrace;
use std::fmt::{Display, Formatter};

use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub backtrace: Backtrace,
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            backtrace: Backtrace::capture(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            write!(f, ", {}", self.backtrace)?;
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ErrorKind {
    #[error("unexpected error")]
    StdIoError(#[from] std::io::Error),

    #[error("config error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("other error: {0}")]
    Other(String),

    #[error("bad input: {0}")]
    BadInput(String),

    /// The store itself could not be opened. Retrying the action later may
    /// succeed, so this is surfaced as a temporary condition.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    /// The store was open but reading from it failed.
    #[error("read failed: {0}")]
    ReadFailed(String),
    /// The store was open but writing to it failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    #[error("entity with id '{0}' not found")]
    NotFound(Uuid),
    #[error("photo not found: {0}")]
    PhotoNotFound(String),

    #[cfg(feature = "sled")]
    #[error("sled db error: {0}")]
    SledError(#[from] sled::Error),

    #[error("json decode error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("pot decode error: {0}")]
    PotError(#[from] pot::Error),

    #[error("uuid error: {0}")]
    UuidError(#[from] uuid::Error),
}

impl From<String> for Error {
    fn from(e: String) -> Self {
        Self::new(ErrorKind::Other(e))
    }
}

impl From<uuid::Error> for Error {
    fn from(e: uuid::Error) -> Self {
        Self::new(ErrorKind::UuidError(e))
    }
}

#[cfg(feature = "sled")]
impl From<sled::Error> for Error {
    fn from(e: sled::Error) -> Self {
        Self::new(ErrorKind::SledError(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::JsonError(e))
    }
}

impl From<pot::Error> for Error {
    fn from(e: pot::Error) -> Self {
        Self::new(ErrorKind::PotError(e))
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Self::new(ErrorKind::ConfigError(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::StdIoError(e))
    }
}

impl From<ErrorKind> for Error {
    fn from(k: ErrorKind) -> Self {
        Self::new(k)
    }
}

#[cfg(feature = "axum")]
mod response {
    use axum::response::{IntoResponse, Response};
    use http::status::StatusCode;

    use super::{Error, ErrorKind};

    /// Implements conversion into an http response for all error variants.
    ///
    /// Validation problems echo the offending field back to the caller.
    /// Storage problems only ever produce a generic body; the detail stays in
    /// the logs, backtrace included.
    impl IntoResponse for Error {
        fn into_response(self) -> Response {
            match &self.kind {
                ErrorKind::BadInput(_) => {
                    tracing::trace!("{}", self);
                    (StatusCode::BAD_REQUEST, self.kind.to_string()).into_response()
                }
                ErrorKind::NotFound(_) | ErrorKind::PhotoNotFound(_) => {
                    tracing::debug!("{}", self);
                    StatusCode::NOT_FOUND.into_response()
                }
                ErrorKind::StorageUnavailable(_) => {
                    tracing::error!("{}", self);
                    (StatusCode::SERVICE_UNAVAILABLE, "storage unavailable").into_response()
                }
                ErrorKind::ReadFailed(_) | ErrorKind::WriteFailed(_) => {
                    tracing::error!("{}", self);
                    (StatusCode::INTERNAL_SERVER_ERROR, "storage operation failed")
                        .into_response()
                }
                _ => {
                    tracing::error!("{}", self);
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }
    }
}
