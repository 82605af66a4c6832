use crate::{BatchReport, GeneratedContent, StudioError};
use opentelemetry::trace::Status;
use std::future::Future;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub struct BatchSpan {
    span: Span,
    generated: Option<usize>,
    failed: Option<usize>,
}

impl BatchSpan {
    #[allow(clippy::cast_possible_wrap)]
    pub fn new(section_count: usize) -> Self {
        let span = info_span!("copy_studio.generate_all");
        span.set_attribute("copy_studio.sections", section_count as i64);

        Self {
            span,
            generated: None,
            failed: None,
        }
    }

    pub fn span(&self) -> Span {
        self.span.clone()
    }

    pub fn on_report(&mut self, report: &BatchReport) {
        self.generated = Some(report.succeeded().count());
        self.failed = Some(report.failed().count());
    }

    #[allow(clippy::cast_possible_wrap)]
    pub fn on_end(&mut self) {
        if let Some(generated) = self.generated {
            self.span
                .set_attribute("copy_studio.generated", generated as i64);
        }
        if let Some(failed) = self.failed {
            self.span.set_attribute("copy_studio.failed", failed as i64);
            if failed > 0 {
                self.span
                    .set_status(Status::error(format!("{failed} section(s) failed")));
            }
        }
    }
}

impl Drop for BatchSpan {
    fn drop(&mut self) {
        self.on_end();
    }
}

pub async fn trace_section<Fut>(
    section_id: &str,
    mode: &'static str,
    future: Fut,
) -> Result<GeneratedContent, StudioError>
where
    Fut: Future<Output = Result<GeneratedContent, StudioError>> + Send,
{
    let span = info_span!("copy_studio.section");
    span.set_attribute("copy_studio.section.id", section_id.to_string());
    span.set_attribute("copy_studio.section.mode", mode);

    match future.instrument(span.clone()).await {
        Ok(content) => {
            let words = i64::try_from(content.word_count).unwrap_or(i64::MAX);
            span.set_attribute("copy_studio.section.words", words);
            Ok(content)
        }
        Err(err) => {
            span.set_attribute("exception.message", err.to_string());
            span.set_status(Status::error(err.to_string()));
            Err(err)
        }
    }
}
