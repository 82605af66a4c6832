use crate::{builtin, PromptTemplate, StudioError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Count used when neither the user nor the section supplies one.
pub const FALLBACK_COUNT: u32 = 3;

/// Static definition of one page section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionConfig {
    pub id: String,
    pub label: String,
    /// Whether the template takes a `{{COUNT}}` parameter.
    #[serde(default)]
    pub has_count: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_label: Option<String>,
    pub base_prompt: PromptTemplate,
}

impl SectionConfig {
    /// The count to substitute: the configured value, then the section
    /// default, then [`FALLBACK_COUNT`]. Zero counts as unset.
    #[must_use]
    pub fn effective_count(&self, configured: Option<u32>) -> u32 {
        configured
            .filter(|count| *count > 0)
            .or(self.default_count.filter(|count| *count > 0))
            .unwrap_or(FALLBACK_COUNT)
    }
}

/// Ordered, read-only list of sections available for generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SectionCatalog {
    sections: Vec<SectionConfig>,
}

impl SectionCatalog {
    pub fn new(sections: Vec<SectionConfig>) -> Result<Self, StudioError> {
        let mut seen = HashSet::new();
        for section in &sections {
            if !seen.insert(section.id.as_str()) {
                return Err(StudioError::DuplicateSection(section.id.clone()));
            }
        }
        Ok(Self { sections })
    }

    /// The standard landing page sections.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            sections: builtin::sections(),
        }
    }

    /// Load a catalog from a JSON array of section definitions.
    pub fn from_json(json: &str) -> Result<Self, StudioError> {
        let sections: Vec<SectionConfig> = serde_json::from_str(json)?;
        Self::new(sections)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|section| section.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionConfig> {
        self.sections.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, has_count: bool, default_count: Option<u32>) -> SectionConfig {
        SectionConfig {
            id: id.to_string(),
            label: id.to_uppercase(),
            has_count,
            default_count,
            count_label: None,
            base_prompt: PromptTemplate::parse("Generate {{COUNT}} things."),
        }
    }

    #[test]
    fn effective_count_falls_back_in_order() {
        let with_default = section("feature", true, Some(4));
        let without_default = section("faq", true, None);

        assert_eq!(with_default.effective_count(Some(7)), 7);
        assert_eq!(with_default.effective_count(None), 4);
        assert_eq!(with_default.effective_count(Some(0)), 4);
        assert_eq!(without_default.effective_count(None), FALLBACK_COUNT);
    }

    #[test]
    fn builtin_catalog_is_ordered_and_consistent() {
        let catalog = SectionCatalog::builtin();

        assert_eq!(
            catalog.ids().collect::<Vec<_>>(),
            [
                "hero",
                "what_is",
                "showcase",
                "feature",
                "how_to_use",
                "benefit",
                "user_review",
                "faq",
                "cta",
                "aitdk",
                "metadata"
            ]
        );
        for section in catalog.iter() {
            assert_eq!(
                section.has_count,
                section.base_prompt.has_placeholder(),
                "section {}",
                section.id
            );
            assert_eq!(section.has_count, section.default_count.is_some());
        }
        assert!(SectionCatalog::new(catalog.iter().cloned().collect()).is_ok());
    }

    #[test]
    fn loads_catalog_from_json() {
        let catalog = SectionCatalog::from_json(
            r#"[
                {"id": "intro", "label": "Intro", "basePrompt": "Write an intro."},
                {"id": "tips", "label": "Tips", "hasCount": true, "defaultCount": 5,
                 "countLabel": "Tips", "basePrompt": "Write {{COUNT}} tips."}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let tips = catalog.get("tips").unwrap();
        assert!(tips.has_count);
        assert_eq!(tips.default_count, Some(5));
        assert_eq!(tips.base_prompt.render(5), "Write 5 tips.");
        assert!(!catalog.get("intro").unwrap().has_count);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = SectionCatalog::new(vec![
            section("hero", false, None),
            section("hero", false, None),
        ])
        .unwrap_err();

        assert_eq!(err.to_string(), "Duplicate section id: hero");
        assert!(matches!(err, StudioError::DuplicateSection(id) if id == "hero"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SectionCatalog::from_json("{not json").unwrap_err();

        assert!(matches!(err, StudioError::Catalog(_)));
    }
}
