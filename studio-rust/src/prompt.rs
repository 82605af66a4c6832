//! Section prompt composition.
//!
//! A prompt is the section template followed, in order, by the SEO block, the
//! global custom instruction and, for rewrites, the rewrite block. Later
//! blocks only append.

use crate::{keywords, CopySettings, SectionCatalog};
use rand::Rng;
use std::fmt::Write;

const DEFAULT_REWRITE_INSTRUCTION: &str = "Improve quality";

/// A targeted regeneration of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteRequest {
    /// The change the user asks for. Blank means a generic quality pass.
    pub instruction: String,
    pub target_word_count: Option<u32>,
}

impl RewriteRequest {
    #[must_use]
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            target_word_count: None,
        }
    }

    #[must_use]
    pub fn with_target_word_count(mut self, target_word_count: u32) -> Self {
        self.target_word_count = Some(target_word_count);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode<'a> {
    Generate,
    Rewrite(&'a RewriteRequest),
}

pub struct PromptBuilder<'a> {
    catalog: &'a SectionCatalog,
    settings: &'a CopySettings,
}

impl<'a> PromptBuilder<'a> {
    #[must_use]
    pub fn new(catalog: &'a SectionCatalog, settings: &'a CopySettings) -> Self {
        Self { catalog, settings }
    }

    /// Build the prompt for `section_id`, or an empty string when the catalog
    /// does not know the section. The optional keyword sample is drawn fresh
    /// from `rng` on every call.
    pub fn build<R: Rng + ?Sized>(
        &self,
        section_id: &str,
        mode: PromptMode<'_>,
        rng: &mut R,
    ) -> String {
        let Some(section) = self.catalog.get(section_id) else {
            return String::new();
        };

        let mut prompt = if section.has_count {
            let count = section.effective_count(self.settings.section_count(section_id));
            section.base_prompt.render(count)
        } else {
            section.base_prompt.render_raw()
        };

        self.push_seo_instructions(&mut prompt, rng);

        if let Some(custom) = self.settings.custom_instruction() {
            let _ = write!(prompt, "\n\n[Additional User Instructions]: {custom}");
        }

        if let PromptMode::Rewrite(rewrite) = mode {
            push_rewrite_instructions(&mut prompt, rewrite);
        }

        prompt
    }

    fn push_seo_instructions<R: Rng + ?Sized>(&self, prompt: &mut String, rng: &mut R) {
        let mandatory = self.settings.mandatory();
        let optional = keywords::sample_optional(&self.settings.optional_pool(), rng);

        let _ = write!(
            prompt,
            "\n\n[SEO Instructions]\n\
             - Mandatory Keywords (MUST include these words): {mandatory}\n\
             - Selected Optional Keywords (Try to include): {optional}\n\
             - Target Mandatory Keyword Density for the entire page is approx {mandatory_density}%.\n\
             - Target Optional Keyword Density for the entire page is approx {optional_density}%.\n",
            mandatory = mandatory.joined(),
            optional = optional.join(", "),
            mandatory_density = self.settings.mandatory_target_density,
            optional_density = self.settings.optional_target_density,
        );
    }
}

fn push_rewrite_instructions(prompt: &mut String, rewrite: &RewriteRequest) {
    let instruction = Some(rewrite.instruction.trim())
        .filter(|instruction| !instruction.is_empty())
        .unwrap_or(DEFAULT_REWRITE_INSTRUCTION);

    let _ = write!(
        prompt,
        "\n\n[REWRITE INSTRUCTION]\n\
         This is a specific rewrite request for this section ONLY.\n\
         Focus on these specific changes: {instruction}.\n"
    );

    if let Some(words) = rewrite.target_word_count {
        let _ = writeln!(prompt, "Target word count for this section: {words}");
    }
}
