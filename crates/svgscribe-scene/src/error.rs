use svgscribe_core::{FormatError, TreeStructureError};
use svgscribe_emf::MetafileParseError;

pub type Result<T> = std::result::Result<T, SceneError>;

/// A drawing command that has no equivalent in a static vector document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported operation: {operation}")]
pub struct UnsupportedOperationError {
    pub operation: &'static str,
}

impl UnsupportedOperationError {
    pub fn new(operation: &'static str) -> Self {
        Self { operation }
    }
}

/// Failure reported by a [`crate::StrokeRenderer`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stroke renderer failed: {message}")]
pub struct StrokeRenderError {
    pub message: String,
}

impl StrokeRenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedOperationError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Tree(#[from] TreeStructureError),

    #[error("custom cap metafile: {0}")]
    Metafile(#[from] MetafileParseError),

    #[error(transparent)]
    StrokeRenderer(#[from] StrokeRenderError),
}

pub(crate) fn unsupported<T>(operation: &'static str) -> Result<T> {
    tracing::debug!(operation, "rejecting unsupported drawing command");
    Err(UnsupportedOperationError::new(operation).into())
}
