use log::{debug, warn};

use crate::models::diagram::{Offset, RenderedDiagram, Viewport};
use crate::traits::diagram_renderer::{DiagramRenderer, RenderError, RENDER_ERROR_MESSAGE};

#[derive(Debug, Clone, PartialEq)]
pub enum RenderStatus {
    Rendered(RenderedDiagram),
    /// Render failed; the front-end offers a retry instead of the diagram
    Failed { message: String, cause: RenderError },
}

/// One mounted diagram: its text, last render result and zoom/pan state.
///
/// Zoom and pan only apply to a successfully rendered diagram. The text is
/// fixed for the viewer's lifetime; other text gets a freshly mounted viewer.
#[derive(Debug, Clone)]
pub struct DiagramViewer {
    id: String,
    definition: String,
    status: RenderStatus,
    viewport: Viewport,
}

impl DiagramViewer {
    pub fn new(id: &str, definition: &str, renderer: &dyn DiagramRenderer) -> Self {
        let status = render(renderer, id, definition);
        Self {
            id: id.to_string(),
            definition: definition.to_string(),
            status,
            viewport: Viewport::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn status(&self) -> &RenderStatus {
        &self.status
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn rendered(&self) -> Option<&RenderedDiagram> {
        match &self.status {
            RenderStatus::Rendered(diagram) => Some(diagram),
            RenderStatus::Failed { .. } => None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self.status, RenderStatus::Rendered(_))
    }

    /// Render the current text again, e.g. after a transient renderer failure
    pub fn retry(&mut self, renderer: &dyn DiagramRenderer) {
        self.viewport.reset();
        self.status = render(renderer, &self.id, &self.definition);
    }

    pub fn zoom_in(&mut self) {
        if self.is_interactive() {
            self.viewport.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if self.is_interactive() {
            self.viewport.zoom_out();
        }
    }

    pub fn wheel(&mut self, delta_y: f64) {
        if self.is_interactive() {
            self.viewport.wheel(delta_y);
        }
    }

    pub fn begin_drag(&mut self, pointer: Offset) {
        if self.is_interactive() {
            self.viewport.begin_drag(pointer);
        }
    }

    pub fn drag_to(&mut self, pointer: Offset) {
        self.viewport.drag_to(pointer);
    }

    pub fn end_drag(&mut self) {
        self.viewport.end_drag();
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if self.is_interactive() {
            self.viewport.pan_by(dx, dy);
        }
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }
}

fn render(renderer: &dyn DiagramRenderer, id: &str, definition: &str) -> RenderStatus {
    match renderer.render(id, definition) {
        Ok(diagram) => {
            debug!("Rendered diagram {} ({} lines)", diagram.render_id, diagram.lines.len());
            RenderStatus::Rendered(diagram)
        }
        Err(cause) => {
            warn!("Diagram render error for '{}': {}", id, cause);
            RenderStatus::Failed {
                message: RENDER_ERROR_MESSAGE.to_string(),
                cause,
            }
        }
    }
}
