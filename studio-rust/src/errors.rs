use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Generation error: {0}")]
    Generation(#[from] copy_sdk::CopyModelError),
    #[error("Unknown section: {0}")]
    UnknownSection(String),
    /// Another batch or rewrite holds the session's generation marker.
    #[error("Generation already in progress{}", section.as_deref().map(|s| format!(" (section {s})")).unwrap_or_default())]
    GenerationInProgress { section: Option<String> },
    #[error("Keyword pattern error: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Section catalog error: {0}")]
    Catalog(#[from] serde_json::Error),
    #[error("Duplicate section id: {0}")]
    DuplicateSection(String),
}
