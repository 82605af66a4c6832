use crate::{BilingualText, CopyModelResult, GenerationRequest};

/// A provider able to turn a section prompt into bilingual copy.
///
/// Implementations must treat every request independently; callers are
/// responsible for pacing and sequencing.
#[async_trait::async_trait]
pub trait CopyModel: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    async fn generate(&self, request: GenerationRequest) -> CopyModelResult<BilingualText>;
}
