use crate::{BilingualText, CopyModelResult, GenerationRequest};
use opentelemetry::trace::Status;
use std::time::Instant;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub struct CopySpan {
    span: Span,
    start_time: Instant,
    prompt_chars: usize,
    output_words: Option<usize>,
}

impl CopySpan {
    pub fn new(provider: &str, model_id: &str, request: &GenerationRequest) -> Self {
        let span = info_span!("copy_sdk.generate");
        span.set_attribute("gen_ai.operation.name", "generate_content");
        span.set_attribute("gen_ai.provider.name", provider.to_string());
        span.set_attribute("gen_ai.request.model", model_id.to_string());
        span.set_attribute("copy_sdk.custom_credential", request.credential().is_some());

        Self {
            span,
            start_time: Instant::now(),
            prompt_chars: request.prompt.chars().count(),
            output_words: None,
        }
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        future.instrument(self.span()).await
    }

    pub fn on_response(&mut self, response: &BilingualText) {
        self.output_words = Some(response.english.split_whitespace().count());
    }

    pub fn on_error(&mut self, error: &(dyn std::error::Error + 'static)) {
        tracing::warn!(parent: &self.span, error = %error, "copy generation failed");
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    #[allow(clippy::cast_possible_wrap)]
    pub fn on_end(&mut self) {
        self.span
            .set_attribute("copy_sdk.prompt.chars", self.prompt_chars as i64);
        if let Some(words) = self.output_words {
            self.span
                .set_attribute("copy_sdk.output.english_words", words as i64);
        }
        self.span.set_attribute(
            "copy_sdk.duration_seconds",
            self.start_time.elapsed().as_secs_f64(),
        );
    }
}

pub async fn trace_generate<F, Fut>(
    provider: &str,
    model_id: &str,
    request: GenerationRequest,
    f: F,
) -> CopyModelResult<BilingualText>
where
    F: FnOnce(GenerationRequest) -> Fut,
    Fut: std::future::Future<Output = CopyModelResult<BilingualText>>,
{
    let mut span = CopySpan::new(provider, model_id, &request);
    let result = span.instrument_future(f(request)).await;

    match &result {
        Ok(response) => span.on_response(response),
        Err(error) => span.on_error(error),
    }

    span.on_end();
    result
}
