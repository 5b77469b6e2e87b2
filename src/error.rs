//! Error types and handling for ResizeBench

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ResizeBench operations
pub type Result<T> = std::result::Result<T, ResizeBenchError>;

/// Main error type for ResizeBench operations
#[derive(Debug, Error)]
pub enum ResizeBenchError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source root directory does not exist
    #[error("Source directory not found: {path:?}")]
    DirectoryNotFound { path: PathBuf },

    /// A source file could not be read or decoded as an image
    #[error("Decode error: {message} (file: {file:?})")]
    Decode { message: String, file: PathBuf },

    /// Computed target dimensions are degenerate
    #[error("Invalid target dimensions {width}x{height} (file: {file:?})")]
    InvalidDimensions {
        width: u32,
        height: u32,
        file: PathBuf,
    },

    /// A result image could not be written to the output area
    #[error("Write error: {message} (file: {file:?})")]
    Write { message: String, file: PathBuf },

    /// Two source files normalize to the same destination filename
    #[error("Destination collision: {second:?} maps to {dest:?} already claimed by {first:?}")]
    DestinationCollision {
        dest: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A spawned pipeline task could not be joined
    #[error("Task join error: {message}")]
    TaskJoin { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl ResizeBenchError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new decode error for a source file
    pub fn decode<S: Into<String>>(message: S, file: PathBuf) -> Self {
        Self::Decode {
            message: message.into(),
            file,
        }
    }

    /// Create a new invalid dimensions error
    pub fn invalid_dimensions(width: u32, height: u32, file: PathBuf) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            file,
        }
    }

    /// Create a new write error for a destination file
    pub fn write<S: Into<String>>(message: S, file: PathBuf) -> Self {
        Self::Write {
            message: message.into(),
            file,
        }
    }

    /// Create a new destination collision error
    pub fn collision(dest: PathBuf, first: PathBuf, second: PathBuf) -> Self {
        Self::DestinationCollision {
            dest,
            first,
            second,
        }
    }

    /// Create a new task join error
    pub fn task_join<S: Into<String>>(message: S) -> Self {
        Self::TaskJoin {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (the batch can continue)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // These errors affect individual files but processing can continue
            Self::Decode { .. }
            | Self::InvalidDimensions { .. }
            | Self::Write { .. }
            | Self::DestinationCollision { .. } => true,

            // These errors should stop the whole run
            Self::Io(_)
            | Self::DirectoryNotFound { .. }
            | Self::Config { .. }
            | Self::TaskJoin { .. }
            | Self::Serde(_) => false,
        }
    }

    /// Get the associated source or destination file path if available
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Decode { file, .. }
            | Self::InvalidDimensions { file, .. }
            | Self::Write { file, .. } => Some(file),

            Self::DestinationCollision { second, .. } => Some(second),
            Self::DirectoryNotFound { path } => Some(path),

            _ => None,
        }
    }
}

// Convert serde errors to our error type
impl From<toml::de::Error> for ResizeBenchError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serde(format!("TOML parsing error: {}", err))
    }
}

impl From<serde_yaml::Error> for ResizeBenchError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serde(format!("YAML parsing error: {}", err))
    }
}
