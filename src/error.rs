use mathsheet_layout::LayoutError;
use mathsheet_render_core::RenderError;
use thiserror::Error;

/// A failure that aborts an export. Problems with individual math spans never
/// end up here; those degrade to placeholder text.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid exercise set: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Math rendering task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Exporter is misconfigured: {0}")]
    Config(String),
}

impl From<tempfile::PersistError> for ExportError {
    fn from(e: tempfile::PersistError) -> Self {
        ExportError::Io(e.error)
    }
}
