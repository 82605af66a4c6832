use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder replaced by a section's item count.
pub const COUNT_PLACEHOLDER: &str = "{{COUNT}}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    Text(String),
    Count,
}

/// A section prompt template, kept as ordered static text and count
/// placeholder segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PromptTemplate {
    segments: Vec<TemplateSegment>,
}

impl PromptTemplate {
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        for (index, text) in source.split(COUNT_PLACEHOLDER).enumerate() {
            if index > 0 {
                segments.push(TemplateSegment::Count);
            }
            if !text.is_empty() {
                segments.push(TemplateSegment::Text(text.to_string()));
            }
        }
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, TemplateSegment::Count))
    }

    /// Render with every placeholder replaced by `count`.
    #[must_use]
    pub fn render(&self, count: u32) -> String {
        let count = count.to_string();
        self.render_with(&count)
    }

    /// Render leaving placeholders untouched, for sections without a count.
    #[must_use]
    pub fn render_raw(&self) -> String {
        self.render_with(COUNT_PLACEHOLDER)
    }

    fn render_with(&self, count: &str) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                TemplateSegment::Text(text) => text.as_str(),
                TemplateSegment::Count => count,
            })
            .collect()
    }
}

impl From<&str> for PromptTemplate {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl From<String> for PromptTemplate {
    fn from(source: String) -> Self {
        Self::parse(&source)
    }
}

impl From<PromptTemplate> for String {
    fn from(template: PromptTemplate) -> Self {
        template.render_raw()
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_raw())
    }
}
