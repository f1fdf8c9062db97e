use std::sync::Arc;

use crate::implementations::diagram_viewer::DiagramViewer;
use crate::models::asset::GeneratedAsset;
use crate::models::common::{CodeLanguage, DiagramKind};
use crate::traits::diagram_renderer::DiagramRenderer;

/// View model for a received asset bundle: which code and diagram tabs are
/// open, plus the mounted diagram viewer.
pub struct DashboardView {
    asset: GeneratedAsset,
    renderer: Arc<dyn DiagramRenderer>,
    active_code: CodeLanguage,
    active_diagram: DiagramKind,
    viewer: DiagramViewer,
}

impl DashboardView {
    pub fn new(asset: GeneratedAsset, renderer: Arc<dyn DiagramRenderer>) -> Self {
        let active_diagram = DiagramKind::default();
        let viewer = DiagramViewer::new(
            active_diagram.id(),
            asset.diagram(active_diagram),
            renderer.as_ref(),
        );
        Self {
            asset,
            renderer,
            active_code: CodeLanguage::default(),
            active_diagram,
            viewer,
        }
    }

    pub fn asset(&self) -> &GeneratedAsset {
        &self.asset
    }

    pub fn active_code(&self) -> CodeLanguage {
        self.active_code
    }

    pub fn active_diagram(&self) -> DiagramKind {
        self.active_diagram
    }

    pub fn select_code(&mut self, language: CodeLanguage) {
        self.active_code = language;
    }

    /// Listing for the open code tab
    pub fn source(&self) -> &str {
        self.asset.source(self.active_code)
    }

    /// Open a diagram tab. The viewer is mounted fresh, so zoom and pan
    /// always start at scale 1 and offset (0, 0).
    pub fn select_diagram(&mut self, kind: DiagramKind) {
        self.active_diagram = kind;
        self.viewer = DiagramViewer::new(kind.id(), self.asset.diagram(kind), self.renderer.as_ref());
    }

    pub fn viewer(&self) -> &DiagramViewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut DiagramViewer {
        &mut self.viewer
    }

    pub fn retry_diagram(&mut self) {
        self.viewer.retry(self.renderer.as_ref());
    }

    /// Filled cells of a score bar `width` cells wide. The score itself is
    /// shown unclamped; only the bar is kept inside its track.
    pub fn score_bar_cells(&self, width: usize) -> usize {
        let fraction = (self.asset.compliance_score / 100.0).clamp(0.0, 1.0);
        if fraction.is_nan() {
            return 0;
        }
        (fraction * width as f64).round() as usize
    }
}
