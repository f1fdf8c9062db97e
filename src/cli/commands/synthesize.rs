use anyhow::{ anyhow, Result };
use log::info;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use autocodegen::{
    CodeLanguage,
    AssetGenerator,
    AutoCodeGenConfig,
    DashboardView,
    ErrorKind,
    IgnoreReason,
    LLMAssetGenerator,
    MermaidTextRenderer,
    SubmitOutcome,
    WorkflowController,
};

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Synthesize command: one generation cycle followed by the dashboard
pub async fn execute(
    config: &AutoCodeGenConfig,
    prompt: Option<&str>,
    save_path: Option<&Path>,
    code: CodeLanguage,
    browse: bool,
    format: OutputFormat
) -> Result<()> {
    let prompt = match prompt {
        Some(p) => p.to_string(),
        None => ui::get_prompt()?,
    };

    let generator = LLMAssetGenerator::gemini(config.generator.clone())?;
    let controller = Arc::new(WorkflowController::new(generator, &config.workflow));

    if format == OutputFormat::Text {
        ui::print_header("Requirement Input");
        ui::print_text(prompt.trim());
        println!();
    }

    let outcome = run_cycle(controller.clone(), prompt, format == OutputFormat::Text).await?;
    let state = controller.state();

    match outcome {
        SubmitOutcome::Ignored(IgnoreReason::EmptyPrompt) => {
            ui::print_warning("The prompt is empty; nothing to synthesize.");
            Ok(())
        }
        SubmitOutcome::Ignored(IgnoreReason::InFlight) => {
            Err(anyhow!("A synthesis is already running"))
        }
        SubmitOutcome::Failed { kind, message } => {
            ui::print_error(&message);
            if kind == ErrorKind::RateLimited {
                ui::print_info("The service is throttling requests; wait a moment and run the command again.");
            }
            Err(anyhow!("Synthesis failed"))
        }
        SubmitOutcome::Succeeded => {
            let asset = state.asset.clone().ok_or_else(|| anyhow!("No asset bundle was stored"))?;

            if let Some(path) = save_path {
                fs::write(path, serde_json::to_string_pretty(&asset)?)?;
                info!("Asset bundle written to {}", path.display());
            }

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&asset)?);
                }
                OutputFormat::Text => {
                    ui::print_pipeline(&state);
                    let mut view = DashboardView::new(asset, Arc::new(MermaidTextRenderer::new()));
                    view.select_code(code);
                    ui::render_dashboard(&view);
                    if let Some(path) = save_path {
                        ui::print_success(&format!("Asset bundle saved to {}", path.display()));
                    }
                    if browse {
                        ui::browse_dashboard(&mut view)?;
                    }
                }
            }
            Ok(())
        }
    }
}

/// Submit on a background task and mirror state changes onto the progress bar
async fn run_cycle<G: AssetGenerator + 'static>(
    controller: Arc<WorkflowController<G>>,
    prompt: String,
    show_progress: bool
) -> Result<SubmitOutcome> {
    let mut updates = controller.subscribe();
    let mut submit = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit(&prompt).await })
    };

    let progress = show_progress.then(ui::PipelineProgress::new);
    let outcome = loop {
        tokio::select! {
            outcome = &mut submit => break outcome?,
            changed = updates.changed() => {
                if changed.is_err() {
                    break submit.await?;
                }
                let state = updates.borrow_and_update().clone();
                if let Some(progress) = &progress {
                    progress.update(&state);
                }
            }
        }
    };

    if let Some(progress) = &progress {
        match outcome {
            SubmitOutcome::Ignored(_) => progress.clear(),
            _ => progress.finish(&controller.state()),
        }
    }
    Ok(outcome)
}
