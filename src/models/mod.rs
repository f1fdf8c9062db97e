pub mod common;
pub mod asset;
pub mod workflow;
pub mod diagram;

// Re-export common model types
pub use common::{CodeLanguage, DiagramKind};
pub use asset::{GeneratedAsset, SimData, SimMetric, SimStatus, SourceCode};
pub use workflow::{Phase, WorkflowState, WorkflowStep};
pub use diagram::{DiagramLine, Offset, RenderedDiagram, Viewport, Visibility};
