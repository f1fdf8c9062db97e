#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use log::info;

    use tokio::test;

    use crate::config::WorkflowOptions;
    use crate::errors::ErrorKind;
    use crate::implementations::asset_generator::LLMAssetGenerator;
    use crate::implementations::config::GeneratorConfig;
    use crate::implementations::dashboard::DashboardView;
    use crate::implementations::diagram_renderer::MermaidTextRenderer;
    use crate::implementations::stage_ticker::StageTicker;
    use crate::implementations::workflow_controller::{
        IgnoreReason,
        SubmitOutcome,
        WorkflowController,
        CANCELLED_MESSAGE,
    };
    use crate::models::workflow::{ Phase, WorkflowState, WorkflowStep };
    use crate::tests::fixtures::{ sample_asset, sample_asset_json, sample_asset_value, GatedGenerator, Reply, ScriptedBackend, LANE_KEEP_PROMPT };

    type ScriptedController = WorkflowController<LLMAssetGenerator<ScriptedBackend>>;

    fn setup() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn controller_with(reply: Reply) -> ScriptedController {
        let generator = LLMAssetGenerator::new(GeneratorConfig::default(), ScriptedBackend::new(reply));
        WorkflowController::with_ticker(generator, StageTicker::new(Duration::ZERO))
    }

    fn calls(controller: &ScriptedController) -> usize {
        controller.generator().backend().calls()
    }

    #[test]
    async fn test_blank_prompt_is_ignored() {
        setup();
        let controller = controller_with(Reply::Text(sample_asset_json(94.0)));

        for prompt in ["", "   ", "\n\t "] {
            let outcome = controller.submit(prompt).await;
            assert_eq!(outcome, SubmitOutcome::Ignored(IgnoreReason::EmptyPrompt));
        }

        assert_eq!(controller.state(), WorkflowState::default(), "no transition");
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(calls(&controller), 0, "no request sent");
    }

    #[test]
    async fn test_successful_cycle() {
        setup();
        let controller = controller_with(Reply::Text(sample_asset_json(94.0)));

        let outcome = controller.submit(LANE_KEEP_PROMPT).await;
        info!("Outcome: {:?}", outcome);

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        let state = controller.state();
        assert_eq!(state.phase(), Phase::Succeeded);
        assert!(!state.is_generating);
        assert!(state.error.is_none());
        assert!(state.elapsed().is_some());
        assert!(WorkflowStep::ALL.iter().all(|step| state.is_step_done(*step)));

        let asset = state.asset.expect("asset stored");
        assert_eq!(asset.compliance_score, 94.0);
        assert!(!asset.source_code.cpp.is_empty());

        let view = DashboardView::new(asset, Arc::new(MermaidTextRenderer::new()));
        assert_eq!(view.score_bar_cells(100), 94, "score bar at 94%");
        assert!(view.viewer().is_interactive());
    }

    #[test]
    async fn test_prompt_is_trimmed_before_sending() {
        setup();
        let controller = controller_with(Reply::Text(sample_asset_json(94.0)));

        controller.submit("  Lane Keep Assist with steer-by-wire \n").await;

        let request = controller.generator().backend().last_request().expect("request");
        assert!(request.user_prompt.ends_with("\"Lane Keep Assist with steer-by-wire\""));
    }

    #[test]
    async fn test_rate_limit_fails_cycle() {
        setup();
        let controller = controller_with(Reply::RateLimited);

        let outcome = controller.submit(LANE_KEEP_PROMPT).await;

        match &outcome {
            SubmitOutcome::Failed { kind, message } => {
                assert_eq!(*kind, ErrorKind::RateLimited);
                assert!(message.contains("Rate limit"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        let state = controller.state();
        assert_eq!(state.phase(), Phase::Failed);
        assert!(state.asset.is_none());
        assert!(state.error.as_deref().unwrap_or_default().contains("Rate limit"));
    }

    #[test]
    async fn test_incomplete_asset_fails_cycle() {
        setup();
        let mut value = sample_asset_value(94.0);
        value.as_object_mut().expect("object").remove("classDiagram");
        let controller = controller_with(Reply::Text(value.to_string()));

        let outcome = controller.submit(LANE_KEEP_PROMPT).await;

        assert!(matches!(outcome, SubmitOutcome::Failed { kind: ErrorKind::IncompleteAsset, .. }));
        assert_eq!(controller.phase(), Phase::Failed);
        assert!(controller.state().asset.is_none());
    }

    #[test]
    async fn test_failure_skips_stage_walk() {
        setup();
        let generator = LLMAssetGenerator::new(
            GeneratorConfig::default(),
            ScriptedBackend::new(Reply::RateLimited)
        );
        let controller = WorkflowController::with_ticker(generator, StageTicker::new(Duration::from_secs(30)));

        let outcome = tokio::time::timeout(Duration::from_secs(5), controller.submit(LANE_KEEP_PROMPT)).await;

        assert!(matches!(outcome, Ok(SubmitOutcome::Failed { .. })), "failure is reported without the walk");
    }

    #[test]
    async fn test_resubmit_replaces_previous_outcome() {
        setup();
        let generator = LLMAssetGenerator::new(
            GeneratorConfig::default(),
            ScriptedBackend::sequence(vec![
                Reply::Text(sample_asset_json(70.0)),
                Reply::RateLimited,
                Reply::Text(sample_asset_json(91.0))
            ])
        );
        let controller = WorkflowController::with_ticker(generator, StageTicker::new(Duration::ZERO));

        assert_eq!(controller.submit(LANE_KEEP_PROMPT).await, SubmitOutcome::Succeeded);
        assert!(controller.state().asset.is_some());

        let outcome = controller.submit(LANE_KEEP_PROMPT).await;
        assert!(matches!(outcome, SubmitOutcome::Failed { kind: ErrorKind::RateLimited, .. }));
        let state = controller.state();
        assert!(state.asset.is_none(), "old asset is not shown next to a new error");
        assert!(state.error.is_some());

        assert_eq!(controller.submit(LANE_KEEP_PROMPT).await, SubmitOutcome::Succeeded);
        let state = controller.state();
        assert!(state.error.is_none(), "error cleared by the new cycle");
        assert_eq!(state.asset.map(|a| a.compliance_score), Some(91.0));
        assert_eq!(calls(&controller), 3);
    }

    #[test]
    async fn test_submit_while_generating_is_ignored() {
        setup();
        let options = WorkflowOptions { step_interval_ms: 0 };
        let controller = Arc::new(WorkflowController::new(GatedGenerator::new(sample_asset(94.0)), &options));

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit(LANE_KEEP_PROMPT).await })
        };
        controller.generator().wait_started().await;

        assert_eq!(controller.phase(), Phase::Generating);
        let state = controller.state();
        assert!(state.is_step_active(WorkflowStep::Requirements));
        assert!(state.asset.is_none() && state.error.is_none());

        let second = controller.submit(LANE_KEEP_PROMPT).await;
        assert_eq!(second, SubmitOutcome::Ignored(IgnoreReason::InFlight));

        controller.generator().release();
        let first = first.await.expect("submit task");

        assert_eq!(first, SubmitOutcome::Succeeded);
        assert_eq!(controller.generator().calls(), 1, "exactly one request");
        assert_eq!(controller.phase(), Phase::Succeeded);
    }

    #[test]
    async fn test_dropped_submit_releases_controller() {
        setup();
        let options = WorkflowOptions { step_interval_ms: 0 };
        let controller = WorkflowController::new(GatedGenerator::new(sample_asset(94.0)), &options);

        let abandoned = tokio::time::timeout(
            Duration::from_millis(50),
            controller.submit(LANE_KEEP_PROMPT)
        ).await;
        assert!(abandoned.is_err(), "the gated call never answers on its own");
        controller.generator().wait_started().await;

        let state = controller.state();
        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(state.error.as_deref(), Some(CANCELLED_MESSAGE));
        assert!(state.asset.is_none());

        let controller = Arc::new(controller);
        let retry = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit(LANE_KEEP_PROMPT).await })
        };
        controller.generator().wait_started().await;
        controller.generator().release();

        assert_eq!(retry.await.expect("submit task"), SubmitOutcome::Succeeded);
        assert_eq!(controller.generator().calls(), 2);
        assert!(controller.state().error.is_none());
    }

    #[test]
    async fn test_stage_ticker_walks_in_order() {
        setup();
        let ticker = StageTicker::new(Duration::from_millis(5));
        let mut seen = Vec::new();

        let started = tokio::time::Instant::now();
        ticker.walk(|step| seen.push(step)).await;

        assert_eq!(seen, WorkflowStep::ALL.to_vec());
        assert!(started.elapsed() >= ticker.duration());
        assert_eq!(ticker.duration(), Duration::from_millis(25));
    }

    #[test]
    async fn test_subscriber_sees_cycle_end() {
        setup();
        let controller = Arc::new(controller_with(Reply::Text(sample_asset_json(88.0))));
        let mut updates = controller.subscribe();

        let task = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit(LANE_KEEP_PROMPT).await })
        };
        assert_eq!(task.await.expect("submit task"), SubmitOutcome::Succeeded);

        assert!(updates.has_changed().expect("sender alive"));
        let state = updates.borrow_and_update().clone();
        assert_eq!(state.phase(), Phase::Succeeded);
        assert_eq!(state.asset.map(|a| a.compliance_score), Some(88.0));
    }
}
