mod builtin;
pub mod density;
mod errors;
mod keywords;
pub mod opentelemetry;
mod orchestrator;
mod prompt;
mod section;
mod session;
mod settings;
mod template;
mod throttle;

pub use density::{DensityReport, KeywordDensityEntry};
pub use errors::StudioError;
pub use keywords::{sample_optional, KeywordList, OPTIONAL_SAMPLE_SIZE};
pub use orchestrator::{
    BatchReport, Orchestrator, OrchestratorParams, SectionOutcome, DEFAULT_INTER_CALL_DELAY,
};
pub use prompt::{PromptBuilder, PromptMode, RewriteRequest};
pub use section::{SectionCatalog, SectionConfig, FALLBACK_COUNT};
pub use session::{GeneratedContent, GenerationMarker, ResultStore, SectionRecord, StudioSession};
pub use settings::{CopySettings, MAX_SECTION_COUNT, MIN_SECTION_COUNT};
pub use template::{PromptTemplate, TemplateSegment, COUNT_PLACEHOLDER};
pub use throttle::{NoThrottle, Throttle, TokioThrottle};
