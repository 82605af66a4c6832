//! Keyword density over the English copy of every generated section.

use crate::{CopySettings, KeywordList, ResultStore, StudioError};
use regex::Regex;
use serde::Serialize;

/// Occurrences of one keyword in the generated corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDensityEntry {
    pub keyword: String,
    pub count: usize,
    /// `percentage` formatted with two decimals and a `%` suffix.
    pub density: String,
    pub percentage: f64,
    pub is_mandatory: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityReport {
    pub total_words: usize,
    /// Mandatory keywords first, then optional ones, each in input order.
    pub entries: Vec<KeywordDensityEntry>,
    pub mandatory_sum: String,
    pub optional_sum: String,
    pub mandatory_target: f64,
    pub optional_target: f64,
}

impl DensityReport {
    pub fn mandatory(&self) -> impl Iterator<Item = &KeywordDensityEntry> {
        self.entries.iter().filter(|entry| entry.is_mandatory)
    }

    pub fn optional(&self) -> impl Iterator<Item = &KeywordDensityEntry> {
        self.entries.iter().filter(|entry| !entry.is_mandatory)
    }
}

/// Analyze the store against the keyword lists and density targets held in
/// `settings`.
pub fn analyze(results: &ResultStore, settings: &CopySettings) -> Result<DensityReport, StudioError> {
    let mut report = analyze_keywords(results, &settings.mandatory(), &settings.optional_pool())?;
    report.mandatory_target = settings.mandatory_target_density;
    report.optional_target = settings.optional_target_density;
    Ok(report)
}

/// Count whole-word occurrences of each keyword in the lower-cased English
/// corpus. Group sums add the two-decimal row values. An empty corpus yields
/// no entries and `0.00%` sums.
pub fn analyze_keywords(
    results: &ResultStore,
    mandatory: &KeywordList,
    optional: &KeywordList,
) -> Result<DensityReport, StudioError> {
    let corpus = results
        .contents()
        .map(|content| content.english.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let total_words = corpus.split_whitespace().count();

    let mut entries = Vec::with_capacity(mandatory.len() + optional.len());
    if total_words > 0 {
        for (keywords, is_mandatory) in [(mandatory, true), (optional, false)] {
            for keyword in keywords.iter() {
                entries.push(measure(&corpus, total_words, keyword, is_mandatory)?);
            }
        }
    }

    let sum = |is_mandatory: bool| {
        entries
            .iter()
            .filter(|entry| entry.is_mandatory == is_mandatory)
            .map(|entry| round_to_hundredths(entry.percentage))
            .sum::<f64>()
    };

    Ok(DensityReport {
        total_words,
        mandatory_sum: format_percentage(sum(true)),
        optional_sum: format_percentage(sum(false)),
        entries,
        mandatory_target: 0.0,
        optional_target: 0.0,
    })
}

#[allow(clippy::cast_precision_loss)]
fn measure(
    corpus: &str,
    total_words: usize,
    keyword: &str,
    is_mandatory: bool,
) -> Result<KeywordDensityEntry, StudioError> {
    let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&keyword.to_lowercase())))?;
    let count = pattern.find_iter(corpus).count();
    let percentage = count as f64 / total_words as f64 * 100.0;

    Ok(KeywordDensityEntry {
        keyword: keyword.to_string(),
        count,
        density: format_percentage(percentage),
        percentage,
        is_mandatory,
    })
}

/// The value a `"{:.2}%"` row displays. Sums add these so they agree with
/// the rows.
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeneratedContent;
    use copy_sdk::BilingualText;

    fn store(texts: &[(&str, &str)]) -> ResultStore {
        let mut store = ResultStore::new();
        for (section_id, english) in texts {
            store.record_success(GeneratedContent::new(
                *section_id,
                BilingualText::new(*english, ""),
            ));
        }
        store
    }

    #[test]
    fn counts_whole_word_matches() {
        let results = store(&[("hero", "seo tool seo tool seo")]);

        let report =
            analyze_keywords(&results, &KeywordList::parse("seo"), &KeywordList::default())
                .unwrap();

        assert_eq!(report.total_words, 5);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].count, 3);
        assert_eq!(report.entries[0].density, "60.00%");
        assert_eq!(report.mandatory_sum, "60.00%");
        assert_eq!(report.optional_sum, "0.00%");
    }

    #[test]
    fn empty_store_has_no_entries() {
        let report = analyze_keywords(
            &ResultStore::new(),
            &KeywordList::parse("seo, tool"),
            &KeywordList::parse("fast"),
        )
        .unwrap();

        assert_eq!(report.total_words, 0);
        assert!(report.entries.is_empty());
        assert_eq!(report.mandatory_sum, "0.00%");
        assert_eq!(report.optional_sum, "0.00%");
    }

    #[test]
    fn blank_copy_counts_as_empty_corpus() {
        let results = store(&[("hero", "  \n ")]);

        let report =
            analyze_keywords(&results, &KeywordList::parse("seo"), &KeywordList::default())
                .unwrap();

        assert!(report.entries.is_empty());
    }

    #[test]
    fn does_not_match_inside_longer_words() {
        let results = store(&[("hero", "Seoul has SEO experts; seo-friendly pages")]);

        let report =
            analyze_keywords(&results, &KeywordList::parse("seo"), &KeywordList::default())
                .unwrap();

        assert_eq!(report.entries[0].count, 2);
    }

    #[test]
    fn matching_is_case_insensitive_and_keeps_original_keyword() {
        let results = store(&[("hero", "AI Writing beats ai writing")]);

        let report = analyze_keywords(
            &results,
            &KeywordList::parse("AI Writing"),
            &KeywordList::default(),
        )
        .unwrap();

        assert_eq!(report.entries[0].keyword, "AI Writing");
        assert_eq!(report.entries[0].count, 2);
        assert_eq!(report.entries[0].density, "40.00%");
    }

    #[test]
    fn escapes_pattern_metacharacters() {
        let results = store(&[("hero", "learn c++ and c# fast, or (seo) tips.")]);

        let report = analyze_keywords(
            &results,
            &KeywordList::parse("(seo), tips., a.b"),
            &KeywordList::default(),
        )
        .unwrap();

        let counts: Vec<_> = report.entries.iter().map(|entry| entry.count).collect();
        // `(seo)` and `tips.` end in non-word characters, so a trailing
        // boundary needs a following word character.
        assert_eq!(counts, [0, 0, 0]);

        let report = analyze_keywords(
            &results,
            &KeywordList::parse("learn c"),
            &KeywordList::default(),
        )
        .unwrap();
        assert_eq!(report.entries[0].count, 1);
    }

    #[test]
    fn orders_mandatory_before_optional_and_sums_each_group() {
        let results = store(&[
            ("hero", "fast seo tool for fast ranking"),
            ("faq", "seo answers rank"),
        ]);

        let report = analyze_keywords(
            &results,
            &KeywordList::parse("seo, tool"),
            &KeywordList::parse("fast, rank"),
        )
        .unwrap();

        assert_eq!(report.total_words, 9);
        let summary: Vec<_> = report
            .entries
            .iter()
            .map(|entry| (entry.keyword.as_str(), entry.count, entry.is_mandatory))
            .collect();
        assert_eq!(
            summary,
            [
                ("seo", 2, true),
                ("tool", 1, true),
                ("fast", 2, false),
                ("rank", 1, false),
            ]
        );
        assert_eq!(report.entries[0].density, "22.22%");
        assert_eq!(report.mandatory_sum, "33.33%");
        assert_eq!(report.optional_sum, "33.33%");
        assert_eq!(report.mandatory().count(), 2);
        assert_eq!(report.optional().count(), 2);
    }

    #[test]
    fn sums_add_the_displayed_row_values() {
        let results = store(&[("hero", "alpha beta x y z w")]);

        let report = analyze_keywords(
            &results,
            &KeywordList::parse("alpha, beta"),
            &KeywordList::parse("x, y, z"),
        )
        .unwrap();

        let densities: Vec<_> = report
            .entries
            .iter()
            .map(|entry| entry.density.as_str())
            .collect();
        assert_eq!(densities, ["16.67%", "16.67%", "16.67%", "16.67%", "16.67%"]);
        assert_eq!(report.mandatory_sum, "33.34%");
        assert_eq!(report.optional_sum, "50.01%");
    }

    #[test]
    fn duplicate_keywords_are_counted_independently() {
        let results = store(&[("hero", "seo seo tool tool")]);

        let report = analyze_keywords(
            &results,
            &KeywordList::parse("seo, seo"),
            &KeywordList::default(),
        )
        .unwrap();

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.mandatory_sum, "100.00%");
    }

    #[test]
    fn analyze_copies_targets_from_settings() {
        let results = store(&[("hero", "seo tool")]);
        let settings = CopySettings {
            mandatory_keywords: "seo".into(),
            mandatory_target_density: 3.5,
            optional_target_density: 0.5,
            ..CopySettings::default()
        };

        let report = analyze(&results, &settings).unwrap();

        assert_eq!(report.entries[0].density, "50.00%");
        assert!((report.mandatory_target - 3.5).abs() < f64::EPSILON);
        assert!((report.optional_target - 0.5).abs() < f64::EPSILON);
    }
}
