use crate::{KeywordList, SectionCatalog};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_MANDATORY_TARGET_DENSITY: f64 = 2.0;
pub const DEFAULT_OPTIONAL_TARGET_DENSITY: f64 = 1.0;
pub const MIN_SECTION_COUNT: u32 = 1;
pub const MAX_SECTION_COUNT: u32 = 20;

/// User configuration for a generation session.
///
/// Keyword fields hold the raw delimited text as typed; they are parsed into
/// [`KeywordList`]s on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopySettings {
    /// Optional API key forwarded with every generation request.
    #[serde(default, skip_serializing)]
    pub credential: Option<String>,
    #[serde(default)]
    pub mandatory_keywords: String,
    #[serde(default)]
    pub optional_keywords: String,
    pub mandatory_target_density: f64,
    pub optional_target_density: f64,
    #[serde(default)]
    pub custom_prompt: String,
    /// Sections to generate, in generation order.
    #[serde(default)]
    pub selected_sections: Vec<String>,
    #[serde(default)]
    pub section_counts: HashMap<String, u32>,
}

impl Default for CopySettings {
    fn default() -> Self {
        Self {
            credential: None,
            mandatory_keywords: String::new(),
            optional_keywords: String::new(),
            mandatory_target_density: DEFAULT_MANDATORY_TARGET_DENSITY,
            optional_target_density: DEFAULT_OPTIONAL_TARGET_DENSITY,
            custom_prompt: String::new(),
            selected_sections: Vec::new(),
            section_counts: HashMap::new(),
        }
    }
}

impl CopySettings {
    /// Settings with every catalog section selected and each counted section
    /// at its default count.
    #[must_use]
    pub fn for_catalog(catalog: &SectionCatalog) -> Self {
        Self {
            selected_sections: catalog.ids().map(ToString::to_string).collect(),
            section_counts: catalog
                .iter()
                .filter(|section| section.has_count)
                .filter_map(|section| {
                    section
                        .default_count
                        .map(|count| (section.id.clone(), count))
                })
                .collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn mandatory(&self) -> KeywordList {
        KeywordList::parse(&self.mandatory_keywords)
    }

    #[must_use]
    pub fn optional_pool(&self) -> KeywordList {
        KeywordList::parse(&self.optional_keywords)
    }

    #[must_use]
    pub fn section_count(&self, section_id: &str) -> Option<u32> {
        self.section_counts.get(section_id).copied()
    }

    /// Store a count for a section, clamped to the accepted range.
    pub fn set_section_count(&mut self, section_id: &str, count: u32) {
        self.section_counts.insert(
            section_id.to_string(),
            count.clamp(MIN_SECTION_COUNT, MAX_SECTION_COUNT),
        );
    }

    /// Select the section if it is not selected (appending it to the
    /// generation order), otherwise deselect it. Returns whether the section
    /// is selected afterwards.
    pub fn toggle_section(&mut self, section_id: &str) -> bool {
        if let Some(position) = self
            .selected_sections
            .iter()
            .position(|id| id == section_id)
        {
            self.selected_sections.remove(position);
            false
        } else {
            self.selected_sections.push(section_id.to_string());
            true
        }
    }

    /// The custom instruction, if it has any non-whitespace content.
    #[must_use]
    pub fn custom_instruction(&self) -> Option<&str> {
        Some(self.custom_prompt.trim()).filter(|prompt| !prompt.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_defaults_select_everything() {
        let catalog = SectionCatalog::builtin();
        let settings = CopySettings::for_catalog(&catalog);

        assert_eq!(settings.selected_sections.len(), catalog.len());
        assert_eq!(settings.section_count("showcase"), Some(6));
        assert_eq!(settings.section_count("feature"), Some(4));
        assert_eq!(settings.section_count("hero"), None);
        assert!((settings.mandatory_target_density - 2.0).abs() < f64::EPSILON);
        assert!((settings.optional_target_density - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn toggle_appends_and_removes() {
        let mut settings = CopySettings {
            selected_sections: vec!["hero".into(), "faq".into()],
            ..CopySettings::default()
        };

        assert!(!settings.toggle_section("hero"));
        assert!(settings.toggle_section("hero"));
        assert_eq!(settings.selected_sections, ["faq", "hero"]);
    }

    #[test]
    fn section_counts_are_clamped() {
        let mut settings = CopySettings::default();

        settings.set_section_count("feature", 0);
        assert_eq!(settings.section_count("feature"), Some(1));
        settings.set_section_count("feature", 99);
        assert_eq!(settings.section_count("feature"), Some(20));
    }

    #[test]
    fn blank_custom_prompt_is_ignored() {
        let mut settings = CopySettings {
            custom_prompt: "  \n ".into(),
            ..CopySettings::default()
        };
        assert_eq!(settings.custom_instruction(), None);

        settings.custom_prompt = " Keep it formal. ".into();
        assert_eq!(settings.custom_instruction(), Some("Keep it formal."));
    }

    #[test]
    fn credential_is_never_serialized() {
        let settings = CopySettings {
            credential: Some("sk-secret".into()),
            ..CopySettings::default()
        };

        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
