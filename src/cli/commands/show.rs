use anyhow::{ anyhow, Result };
use std::fs;
use std::path::Path;
use std::sync::Arc;

use autocodegen::{
    CodeLanguage,
    parse_asset,
    AutoCodeGenConfig,
    DashboardView,
    MermaidTextRenderer,
    RecoverableError,
    ValidationPolicy,
};

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Show command: render a saved asset bundle without calling the service
pub fn execute(
    config: &AutoCodeGenConfig,
    asset_path: &Path,
    lenient: bool,
    code: CodeLanguage,
    browse: bool,
    format: OutputFormat
) -> Result<()> {
    let contents = fs::read_to_string(asset_path)
        .map_err(|e| anyhow!("Failed to read asset file {}: {}", asset_path.display(), e))?;

    let policy = if lenient { ValidationPolicy::Lenient } else { config.generator.validation };
    let asset = match parse_asset(&contents, policy) {
        Ok(asset) => asset,
        Err(e) => {
            ui::print_error(&e.to_string());
            if let Some(hint) = e.recovery_strategy() {
                ui::print_info(&hint);
            }
            return Err(anyhow!("{} is not a usable asset bundle", asset_path.display()));
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&asset)?),
        OutputFormat::Text => {
            let mut view = DashboardView::new(asset, Arc::new(MermaidTextRenderer::new()));
            view.select_code(code);
            ui::render_dashboard(&view);
            if browse {
                ui::browse_dashboard(&mut view)?;
            }
        }
    }

    Ok(())
}
