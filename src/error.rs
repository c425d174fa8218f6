use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    InvalidSettings(&'static str),
    InvalidLevel(String),
    EmptyRecording,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid json: {err}"),
            Self::InvalidSettings(reason) => write!(f, "invalid settings: {reason}"),
            Self::InvalidLevel(reason) => write!(f, "invalid level: {reason}"),
            Self::EmptyRecording => write!(f, "recording has no snapshots"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
