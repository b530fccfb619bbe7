pub mod config;
pub mod export;
pub mod inventory;
pub mod manifest;
pub mod select;

pub use config::ExportConfig;
pub use inventory::ModelRow;
pub use manifest::ModelName;

/// Custom error type for Ollama Export
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`ollama` command not found. Ensure Ollama is installed and in PATH")]
    OllamaNotFound,

    #[error("`ollama list` failed: {0}")]
    ListCommand(String),

    #[error("invalid model name format: {0} (expected name:tag)")]
    InvalidModelName(String),

    #[error("manifest not found for model: {0}")]
    ManifestNotFound(String),

    #[error("dialog error: {0}")]
    Dialog(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
