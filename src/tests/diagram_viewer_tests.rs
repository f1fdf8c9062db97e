#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::implementations::dashboard::DashboardView;
    use crate::implementations::diagram_renderer::MermaidTextRenderer;
    use crate::implementations::diagram_viewer::{ DiagramViewer, RenderStatus };
    use crate::models::common::{ CodeLanguage, DiagramKind };
    use crate::models::diagram::{ Offset, Viewport, Visibility, MAX_SCALE, MIN_SCALE };
    use crate::tests::fixtures::{ sample_asset, FlakyRenderer, CLASS_DIAGRAM, SEQUENCE_DIAGRAM };
    use crate::traits::diagram_renderer::{ DiagramRenderer, RenderError, RENDER_ERROR_MESSAGE };

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_class_diagram_lines_are_tagged() {
        let renderer = MermaidTextRenderer::new();
        let diagram = renderer.render("class", CLASS_DIAGRAM).expect("render");

        assert_eq!(diagram.diagram_type, "classDiagram");
        let tagged: Vec<Option<Visibility>> = diagram.lines
            .iter()
            .filter(|line| line.visibility.is_some())
            .map(|line| line.visibility)
            .collect();
        assert_eq!(tagged, vec![
            Some(Visibility::Public),
            Some(Visibility::Private),
            Some(Visibility::Protected),
            Some(Visibility::Package),
            Some(Visibility::Public)
        ]);
    }

    #[test]
    fn test_sequence_lines_are_not_tagged() {
        let renderer = MermaidTextRenderer::new();
        let diagram = renderer.render("sequence", "sequenceDiagram\n  - not a member\n  A->>B: hi").expect("render");

        assert_eq!(diagram.diagram_type, "sequenceDiagram");
        assert!(diagram.lines.iter().all(|line| line.visibility.is_none()));
    }

    #[test]
    fn test_render_ids_are_unique() {
        let renderer = MermaidTextRenderer::new();
        let first = renderer.render("class", CLASS_DIAGRAM).expect("render");
        let second = renderer.render("class", CLASS_DIAGRAM).expect("render");

        assert!(first.render_id.starts_with("mermaid-class-"));
        assert_ne!(first.render_id, second.render_id);
    }

    #[test]
    fn test_leading_comments_are_skipped() {
        let renderer = MermaidTextRenderer::new();
        let diagram = renderer.render("class", "\n%% generated\nclassDiagram\n  class A").expect("render");

        assert_eq!(diagram.diagram_type, "classDiagram");
    }

    #[test]
    fn test_front_matter_is_skipped() {
        let renderer = MermaidTextRenderer::new();
        let definition = "---\ntitle: Lane Keep Assist\n---\nclassDiagram\n  class A {\n    +int x\n  }";

        let diagram = renderer.render("class", definition).expect("render");
        assert_eq!(diagram.diagram_type, "classDiagram");
        assert_eq!(diagram.lines.len(), 3);

        assert_eq!(
            renderer.render("class", "---\ntitle: X\nclassDiagram\n  class A {"),
            Err(RenderError::UnknownDiagramType("---".to_string()))
        );
        assert_eq!(
            renderer.render("class", "---\ntitle: X\n---\nclassDiagram\n  class A {"),
            Err(RenderError::UnbalancedBraces { line: 5 })
        );
    }

    #[test]
    fn test_render_errors() {
        let renderer = MermaidTextRenderer::new();

        assert_eq!(renderer.render("sequence", "  \n"), Err(RenderError::EmptyDefinition));
        assert_eq!(
            renderer.render("class", "pieChart\n  \"a\": 1"),
            Err(RenderError::UnknownDiagramType("pieChart".to_string()))
        );
        assert_eq!(
            renderer.render("class", "classDiagram\n  class A {\n    +int x\n"),
            Err(RenderError::UnbalancedBraces { line: 3 })
        );
        assert_eq!(
            renderer.render("class", "classDiagram\n  class A }\n"),
            Err(RenderError::UnbalancedBraces { line: 2 })
        );
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::default();
        viewport.zoom_in();
        assert_close(viewport.scale(), 1.2);
        assert_eq!(viewport.zoom_percent(), 120);

        for _ in 0..50 {
            viewport.zoom_in();
        }
        assert_close(viewport.scale(), MAX_SCALE);

        for _ in 0..100 {
            viewport.zoom_out();
        }
        assert_close(viewport.scale(), MIN_SCALE);
    }

    #[test]
    fn test_wheel_direction() {
        let mut viewport = Viewport::default();
        viewport.wheel(-120.0);
        assert_close(viewport.scale(), 1.1);

        viewport.wheel(120.0);
        viewport.wheel(120.0);
        assert_close(viewport.scale(), 1.0 / 1.1);
    }

    #[test]
    fn test_drag_moves_offset_relative_to_anchor() {
        let mut viewport = Viewport::default();
        viewport.pan_by(10.0, 5.0);

        viewport.begin_drag(Offset::new(100.0, 100.0));
        assert!(viewport.is_dragging());
        viewport.drag_to(Offset::new(130.0, 80.0));
        assert_eq!(viewport.offset(), Offset::new(40.0, -15.0));

        viewport.end_drag();
        viewport.drag_to(Offset::new(500.0, 500.0));
        assert_eq!(viewport.offset(), Offset::new(40.0, -15.0), "no movement after release");

        viewport.reset();
        assert_eq!(viewport, Viewport::default());
    }

    #[test]
    fn test_failed_render_blocks_interaction() {
        let renderer = MermaidTextRenderer::new();
        let mut viewer = DiagramViewer::new("sequence", "", &renderer);

        match viewer.status() {
            RenderStatus::Failed { message, cause } => {
                assert_eq!(message, RENDER_ERROR_MESSAGE);
                assert_eq!(cause, &RenderError::EmptyDefinition);
            }
            other => panic!("expected a failed render, got {:?}", other),
        }

        viewer.zoom_in();
        viewer.wheel(-1.0);
        viewer.pan_by(20.0, 20.0);
        viewer.begin_drag(Offset::new(1.0, 1.0));
        viewer.drag_to(Offset::new(50.0, 50.0));
        assert_eq!(viewer.viewport(), &Viewport::default());
        assert!(viewer.rendered().is_none());
    }

    #[test]
    fn test_retry_recovers_from_transient_failure() {
        let renderer = FlakyRenderer::new(MermaidTextRenderer::new(), 1);
        let mut viewer = DiagramViewer::new("class", CLASS_DIAGRAM, &renderer);
        assert!(!viewer.is_interactive());

        viewer.retry(&renderer);

        assert!(viewer.is_interactive());
        assert_eq!(viewer.rendered().map(|d| d.diagram_type.as_str()), Some("classDiagram"));
    }

    #[test]
    fn test_retry_resets_view() {
        let renderer = MermaidTextRenderer::new();
        let mut viewer = DiagramViewer::new("class", CLASS_DIAGRAM, &renderer);
        viewer.zoom_in();
        viewer.pan_by(30.0, 0.0);
        assert_close(viewer.viewport().scale(), 1.2);

        viewer.retry(&renderer);

        assert_eq!(viewer.viewport(), &Viewport::default());
        assert_eq!(viewer.definition(), CLASS_DIAGRAM);
    }

    #[test]
    fn test_switching_diagram_tab_starts_fresh() {
        let mut view = DashboardView::new(sample_asset(94.0), Arc::new(MermaidTextRenderer::new()));
        assert_eq!(view.active_diagram(), DiagramKind::Class);

        view.viewer_mut().zoom_in();
        view.viewer_mut().zoom_in();
        view.viewer_mut().pan_by(-40.0, 80.0);
        assert!(view.viewer().viewport().scale() > 1.0);

        view.select_diagram(DiagramKind::Sequence);
        assert_eq!(view.viewer().id(), "sequence");
        assert_close(view.viewer().viewport().scale(), 1.0);
        assert_eq!(view.viewer().viewport().offset(), Offset::ORIGIN);
        assert_eq!(view.viewer().definition(), SEQUENCE_DIAGRAM);

        view.viewer_mut().zoom_out();
        view.select_diagram(DiagramKind::Class);
        assert_close(view.viewer().viewport().scale(), 1.0);
        assert_eq!(view.viewer().viewport().offset(), Offset::ORIGIN);
    }

    #[test]
    fn test_code_tabs() {
        let mut view = DashboardView::new(sample_asset(94.0), Arc::new(MermaidTextRenderer::new()));
        assert_eq!(view.active_code(), CodeLanguage::Cpp);
        assert!(view.source().contains("LaneKeepService final"));

        view.select_code(CodeLanguage::Rust);
        assert!(view.source().starts_with("pub struct"));

        view.select_code(CodeLanguage::Java);
        assert!(view.source().contains("public final class"));
        assert_eq!(CodeLanguage::Cpp.label(), "C++ (MISRA)");
        for language in CodeLanguage::ALL {
            assert_eq!(CodeLanguage::from_key(language.key()), Some(language));
        }
    }

    #[test]
    fn test_score_bar_is_clamped() {
        let renderer: Arc<dyn DiagramRenderer> = Arc::new(MermaidTextRenderer::new());

        let view = DashboardView::new(sample_asset(94.0), renderer.clone());
        assert_eq!(view.score_bar_cells(100), 94);

        let view = DashboardView::new(sample_asset(120.0), renderer.clone());
        assert_eq!(view.score_bar_cells(40), 40);
        assert_eq!(view.asset().compliance_score, 120.0);

        let view = DashboardView::new(sample_asset(-5.0), renderer);
        assert_eq!(view.score_bar_cells(40), 0);
    }
}
