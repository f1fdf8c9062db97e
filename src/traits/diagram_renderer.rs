use thiserror::Error;

use crate::models::diagram::RenderedDiagram;

/// User-facing text shown in place of a diagram that failed to render
pub const RENDER_ERROR_MESSAGE: &str =
    "Failed to render architecture diagram. Syntax verification required.";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("empty diagram definition")]
    EmptyDefinition,

    #[error("unknown diagram type '{0}'")]
    UnknownDiagramType(String),

    #[error("unbalanced braces at line {line}")]
    UnbalancedBraces { line: usize },
}

/// Turns diagram text in the external mini-language into something drawable
pub trait DiagramRenderer: Send + Sync {
    /// Render a definition; `id` is stable for the diagram slot being drawn
    fn render(&self, id: &str, definition: &str) -> Result<RenderedDiagram, RenderError>;
}
