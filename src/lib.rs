pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{AutoCodeGenConfig, WorkflowOptions};
pub use errors::{ErrorKind, GenerationError, GenerationResult, RecoverableError};
pub use implementations::asset_generator::{parse_asset, strip_code_fence, LLMAssetGenerator};
pub use implementations::config::{ConfigError, GeneratorConfig, ValidationPolicy};
pub use implementations::dashboard::DashboardView;
pub use implementations::diagram_renderer::MermaidTextRenderer;
pub use implementations::diagram_viewer::{DiagramViewer, RenderStatus};
pub use implementations::gemini_backend::GeminiBackend;
pub use implementations::schema::SCHEMA_VERSION;
pub use implementations::stage_ticker::StageTicker;
pub use implementations::workflow_controller::{IgnoreReason, SubmitOutcome, WorkflowController};
pub use models::{
    common::{CodeLanguage, DiagramKind},
    asset::{GeneratedAsset, SimData, SimMetric, SimStatus, SourceCode},
    workflow::{Phase, WorkflowState, WorkflowStep},
    diagram::{Offset, RenderedDiagram, Viewport, Visibility},
};
pub use traits::{
    AssetGenerator,
    DiagramRenderer,
    GenerationRequest,
    ModelBackend,
    RenderError,
};
