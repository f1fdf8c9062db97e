use async_trait::async_trait;

use crate::errors::GenerationResult;
use crate::models::asset::GeneratedAsset;

/// Main trait for turning a feature prompt into an asset bundle
#[async_trait]
pub trait AssetGenerator: Send + Sync {
    /// Generate an asset bundle for a prompt.
    ///
    /// The caller guarantees the prompt is non-empty after trimming; the
    /// generator does not check again.
    async fn generate(&self, prompt: &str) -> GenerationResult<GeneratedAsset>;
}
