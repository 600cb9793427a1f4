//! Application-level errors.

use std::path::PathBuf;
use swatchset_core::PaletteError;
use swatchset_core::storage::StorageError;
use swatchset_render::RendererError;
use thiserror::Error;

/// Errors surfaced to the user by the shell.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("No set matches \"{0}\"")]
    UnknownSet(String),
    #[error("No segment matches \"{0}\"")]
    UnknownSegment(String),
    #[error("{0}")]
    Rejected(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

impl AppError {
    /// Whether the user was already told about this failure through a notice.
    pub fn is_notified(&self) -> bool {
        matches!(
            self,
            AppError::Palette(PaletteError::LastSet) | AppError::Render(RendererError::NothingToExport)
        )
    }
}

/// Result type for shell operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notified_errors() {
        assert!(AppError::Palette(PaletteError::LastSet).is_notified());
        assert!(AppError::Render(RendererError::NothingToExport).is_notified());
        assert!(!AppError::Palette(PaletteError::SetNotFound("x".to_string())).is_notified());
        assert!(!AppError::UnknownSet("x".to_string()).is_notified());
        assert!(!AppError::Render(RendererError::FontUnavailable).is_notified());
    }
}
