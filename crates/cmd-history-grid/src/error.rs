use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("invalid config: {}", .problems.join("; "))]
    InvalidConfig { problems: Vec<String> },

    #[error("invalid script at frame {frame}: {message}")]
    InvalidScript { frame: usize, message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl GridError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } | Self::InvalidScript { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn script(frame: usize, message: impl Into<String>) -> Self {
        Self::InvalidScript {
            frame,
            message: message.into(),
        }
    }
}
