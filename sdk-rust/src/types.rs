use crate::{CopyModelError, CopyModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single call to the generation provider.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The fully composed section prompt.
    pub prompt: String,
    /// Caller-supplied API key. Overrides the key the model was configured
    /// with when present and non-blank.
    pub credential: Option<String>,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            credential: None,
        }
    }

    #[must_use]
    pub fn with_credential(mut self, credential: Option<String>) -> Self {
        self.credential = credential;
        self
    }

    /// The credential if one was supplied and is not blank.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.credential
            .as_deref()
            .map(str::trim)
            .filter(|credential| !credential.is_empty())
    }
}

impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("prompt", &self.prompt)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Copy produced by the provider. Both variants share the same line
/// structure (e.g. `Title:` / `标题:` prefixes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    pub english: String,
    pub chinese: String,
}

impl BilingualText {
    #[must_use]
    pub fn new(english: impl Into<String>, chinese: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            chinese: chinese.into(),
        }
    }

    /// Parse the JSON object a model returns. A surrounding Markdown code
    /// fence (```json ... ```) is tolerated.
    pub fn from_model_output(output: &str) -> CopyModelResult<Self> {
        let payload = strip_code_fence(output);
        serde_json::from_str::<Self>(payload).map_err(|error| {
            CopyModelError::Invariant(
                "copy_sdk",
                format!("Model output is not a bilingual JSON object: {error}"),
            )
        })
    }
}

fn strip_code_fence(output: &str) -> &str {
    let trimmed = output.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
