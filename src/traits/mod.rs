pub mod model_backend;
pub mod asset_generator;
pub mod diagram_renderer;

// Re-export traits
pub use model_backend::{GenerationRequest, ModelBackend};
pub use asset_generator::AssetGenerator;
pub use diagram_renderer::{DiagramRenderer, RenderError, RENDER_ERROR_MESSAGE};
