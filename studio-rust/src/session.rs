use crate::{density, CopySettings, DensityReport, SectionCatalog, StudioError};
use chrono::{DateTime, Utc};
use copy_sdk::BilingualText;
use futures::lock::Mutex;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex as SyncMutex, PoisonError},
};

/// Copy generated for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub section_id: String,
    pub english: String,
    pub chinese: String,
    /// Whitespace separated tokens in the English text.
    pub word_count: usize,
    /// UTF-16 code units in the English text, so astral characters such as
    /// emoji count twice.
    pub char_count: usize,
    pub created_at: DateTime<Utc>,
}

impl GeneratedContent {
    #[must_use]
    pub fn new(section_id: impl Into<String>, text: BilingualText) -> Self {
        let BilingualText { english, chinese } = text;
        Self {
            section_id: section_id.into(),
            word_count: english.split_whitespace().count(),
            char_count: english.encode_utf16().count(),
            english,
            chinese,
            created_at: Utc::now(),
        }
    }
}

/// Latest known state of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRecord {
    pub content: Option<GeneratedContent>,
    /// Message of the most recent failed attempt, cleared on success.
    pub last_error: Option<String>,
}

/// Generated content keyed by section id. The single mutable source of truth
/// for generation results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultStore {
    records: HashMap<String, SectionRecord>,
}

impl ResultStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Store fresh content, replacing any previous content and error.
    pub fn record_success(&mut self, content: GeneratedContent) {
        let record = self.records.entry(content.section_id.clone()).or_default();
        record.content = Some(content);
        record.last_error = None;
    }

    /// Note a failed attempt. Existing content is kept.
    pub fn record_failure(&mut self, section_id: &str, error: &StudioError) {
        self.records
            .entry(section_id.to_string())
            .or_default()
            .last_error = Some(error.to_string());
    }

    #[must_use]
    pub fn record(&self, section_id: &str) -> Option<&SectionRecord> {
        self.records.get(section_id)
    }

    #[must_use]
    pub fn content(&self, section_id: &str) -> Option<&GeneratedContent> {
        self.records
            .get(section_id)
            .and_then(|record| record.content.as_ref())
    }

    #[must_use]
    pub fn last_error(&self, section_id: &str) -> Option<&str> {
        self.records
            .get(section_id)
            .and_then(|record| record.last_error.as_deref())
    }

    /// All stored content, in no particular order.
    pub fn contents(&self) -> impl Iterator<Item = &GeneratedContent> {
        self.records
            .values()
            .filter_map(|record| record.content.as_ref())
    }

    /// Stored content for the given sections, in the given order.
    pub fn contents_in<'a, I, S>(&'a self, order: I) -> impl Iterator<Item = &'a GeneratedContent>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        order
            .into_iter()
            .filter_map(move |section_id| self.content(section_id.as_ref()))
    }

    #[must_use]
    pub fn content_count(&self) -> usize {
        self.contents().count()
    }
}

/// What the session is currently generating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationMarker {
    #[default]
    Idle,
    Batch {
        current: Option<String>,
    },
    Rewrite {
        section: String,
    },
}

impl GenerationMarker {
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Batch { current } => current.as_deref(),
            Self::Rewrite { section } => Some(section),
        }
    }
}

/// Holds the generation marker for as long as it lives; dropping it returns
/// the session to idle.
pub(crate) struct GenerationGuard {
    marker: Arc<SyncMutex<GenerationMarker>>,
}

impl GenerationGuard {
    pub(crate) fn set_current(&self, section_id: Option<&str>) {
        let mut marker = self.marker.lock().unwrap_or_else(PoisonError::into_inner);
        if let GenerationMarker::Batch { current } = &mut *marker {
            *current = section_id.map(ToString::to_string);
        }
    }
}

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        let mut marker = self.marker.lock().unwrap_or_else(PoisonError::into_inner);
        *marker = GenerationMarker::Idle;
    }
}

/// The explicit context shared by the orchestrator and the density analyzer:
/// user settings, the result store and the "currently generating" marker.
#[derive(Clone)]
pub struct StudioSession {
    settings: Arc<Mutex<CopySettings>>,
    results: Arc<Mutex<ResultStore>>,
    marker: Arc<SyncMutex<GenerationMarker>>,
}

impl StudioSession {
    #[must_use]
    pub fn new(settings: CopySettings) -> Self {
        Self {
            settings: Arc::new(Mutex::new(settings)),
            results: Arc::new(Mutex::new(ResultStore::new())),
            marker: Arc::new(SyncMutex::new(GenerationMarker::Idle)),
        }
    }

    /// A session over `catalog` with default settings.
    #[must_use]
    pub fn for_catalog(catalog: &SectionCatalog) -> Self {
        Self::new(CopySettings::for_catalog(catalog))
    }

    /// Snapshot of the current settings.
    pub async fn settings(&self) -> CopySettings {
        self.settings.lock().await.clone()
    }

    pub async fn update_settings<F>(&self, update: F)
    where
        F: FnOnce(&mut CopySettings),
    {
        let mut settings = self.settings.lock().await;
        update(&mut settings);
    }

    /// Snapshot of the result store.
    pub async fn results(&self) -> ResultStore {
        self.results.lock().await.clone()
    }

    pub async fn content(&self, section_id: &str) -> Option<GeneratedContent> {
        self.results.lock().await.content(section_id).cloned()
    }

    pub async fn last_error(&self, section_id: &str) -> Option<String> {
        self.results
            .lock()
            .await
            .last_error(section_id)
            .map(ToString::to_string)
    }

    /// Keyword density over everything generated so far.
    pub async fn density_report(&self) -> Result<DensityReport, StudioError> {
        let settings = self.settings().await;
        let results = self.results.lock().await;
        density::analyze(&results, &settings)
    }

    #[must_use]
    pub fn marker(&self) -> GenerationMarker {
        self.marker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The section whose call is currently in flight, if any.
    #[must_use]
    pub fn generating_section(&self) -> Option<String> {
        self.marker().section().map(ToString::to_string)
    }

    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.marker() != GenerationMarker::Idle
    }

    pub(crate) async fn clear_results(&self) {
        self.results.lock().await.clear();
    }

    pub(crate) async fn record_success(&self, content: GeneratedContent) {
        self.results.lock().await.record_success(content);
    }

    pub(crate) async fn record_failure(&self, section_id: &str, error: &StudioError) {
        self.results.lock().await.record_failure(section_id, error);
    }

    /// Claim the marker for `next`, failing if anything is already running.
    pub(crate) fn begin(&self, next: GenerationMarker) -> Result<GenerationGuard, StudioError> {
        let mut marker = self.marker.lock().unwrap_or_else(PoisonError::into_inner);
        if *marker != GenerationMarker::Idle {
            return Err(StudioError::GenerationInProgress {
                section: marker.section().map(ToString::to_string),
            });
        }
        *marker = next;
        drop(marker);

        Ok(GenerationGuard {
            marker: self.marker.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(section_id: &str, english: &str) -> GeneratedContent {
        GeneratedContent::new(section_id, BilingualText::new(english, "中文"))
    }

    #[test]
    fn generated_content_counts_words_and_chars() {
        let ascii = content("hero", "Title: Fast  SEO\nDescription: Rank higher");

        assert_eq!(ascii.word_count, 6);
        assert_eq!(ascii.char_count, 41);

        let mixed = content("hero", "SEO 🚀 标题");
        assert_eq!(mixed.word_count, 3);
        assert_eq!(mixed.char_count, 9);

        let empty = GeneratedContent::new("hero", BilingualText::default());
        assert_eq!(empty.word_count, 0);
        assert_eq!(empty.char_count, 0);
    }

    #[test]
    fn failure_keeps_previous_content() {
        let mut store = ResultStore::new();
        store.record_success(content("hero", "v1"));

        store.record_failure("hero", &StudioError::UnknownSection("x".into()));
        assert_eq!(store.content("hero").unwrap().english, "v1");
        assert_eq!(store.last_error("hero"), Some("Unknown section: x"));

        store.record_success(content("hero", "v2"));
        assert_eq!(store.content("hero").unwrap().english, "v2");
        assert_eq!(store.last_error("hero"), None);
    }

    #[test]
    fn contents_in_follows_requested_order() {
        let mut store = ResultStore::new();
        store.record_success(content("a", "A"));
        store.record_success(content("b", "B"));
        store.record_failure("c", &StudioError::UnknownSection("c".into()));

        let ordered: Vec<_> = store
            .contents_in(["b", "c", "a"])
            .map(|content| content.section_id.as_str())
            .collect();
        assert_eq!(ordered, ["b", "a"]);
        assert_eq!(store.content_count(), 2);
    }

    #[test]
    fn guard_releases_marker_on_drop() {
        let session = StudioSession::new(CopySettings::default());

        let guard = session
            .begin(GenerationMarker::Rewrite {
                section: "hero".into(),
            })
            .unwrap();
        assert_eq!(session.generating_section().as_deref(), Some("hero"));

        let err = session
            .begin(GenerationMarker::Batch { current: None })
            .err()
            .unwrap();
        assert!(matches!(
            err,
            StudioError::GenerationInProgress { section: Some(section) } if section == "hero"
        ));

        drop(guard);
        assert!(!session.is_generating());
    }
}
