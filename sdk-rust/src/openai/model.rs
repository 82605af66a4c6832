use super::chat_api::{
    ChatCompletionRequestMessage, CreateChatCompletionRequest, CreateChatCompletionResponse,
    ResponseFormat,
};
use crate::{
    client_utils, BilingualText, CopyModel, CopyModelError, CopyModelResult, GenerationRequest,
    SYSTEM_INSTRUCTION,
};
use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::collections::HashMap;

const PROVIDER: &str = "openai";

pub struct OpenAICopyModel {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
    temperature: Option<f64>,
}

#[derive(Clone, Default)]
pub struct OpenAICopyModelOptions {
    pub base_url: Option<String>,
    /// Default key. A request credential takes precedence over it.
    pub api_key: String,
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
    pub temperature: Option<f64>,
}

impl OpenAICopyModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: OpenAICopyModelOptions) -> Self {
        let OpenAICopyModelOptions {
            base_url,
            api_key,
            headers,
            client,
            temperature,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);
        let headers = headers.unwrap_or_default();

        Self {
            model_id: model_id.into(),
            api_key,
            base_url,
            client,
            headers,
            temperature,
        }
    }

    fn request_headers(&self, credential: Option<&str>) -> CopyModelResult<HeaderMap> {
        let api_key = credential
            .or_else(|| Some(self.api_key.trim()).filter(|key| !key.is_empty()))
            .ok_or_else(|| {
                CopyModelError::InvalidInput(
                    "No API key configured and no credential supplied".to_string(),
                )
            })?;

        let mut headers = HeaderMap::new();

        let mut auth_header =
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|error| {
                CopyModelError::InvalidInput(format!(
                    "Invalid OpenAI API key header value: {error}"
                ))
            })?;
        auth_header.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_header);

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                CopyModelError::InvalidInput(format!(
                    "Invalid OpenAI header name '{key}': {error}"
                ))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                CopyModelError::InvalidInput(format!(
                    "Invalid OpenAI header value for '{key}': {error}"
                ))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl CopyModel for OpenAICopyModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(&self, request: GenerationRequest) -> CopyModelResult<BilingualText> {
        crate::opentelemetry::trace_generate(
            self.provider(),
            &self.model_id(),
            request,
            |request| async move {
                let headers = self.request_headers(request.credential())?;
                let params =
                    convert_to_openai_create_params(request, &self.model_id, self.temperature);

                let response: CreateChatCompletionResponse = client_utils::send_json(
                    &self.client,
                    &format!("{}/chat/completions", self.base_url),
                    &params,
                    headers,
                )
                .await?;

                map_openai_response(response)
            },
        )
        .await
    }
}

fn convert_to_openai_create_params(
    request: GenerationRequest,
    model_id: &str,
    temperature: Option<f64>,
) -> CreateChatCompletionRequest {
    CreateChatCompletionRequest {
        model: model_id.to_string(),
        messages: vec![
            ChatCompletionRequestMessage::System {
                content: SYSTEM_INSTRUCTION.to_string(),
            },
            ChatCompletionRequestMessage::User {
                content: request.prompt,
            },
        ],
        temperature,
        response_format: ResponseFormat::JsonObject,
    }
}

fn map_openai_response(response: CreateChatCompletionResponse) -> CopyModelResult<BilingualText> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        CopyModelError::Invariant(PROVIDER, "No choices in response".to_string())
    })?;

    let message = choice.message;

    if let Some(refusal) = &message.refusal {
        if !refusal.is_empty() {
            return Err(CopyModelError::Refusal(refusal.clone()));
        }
    }

    let content = message
        .content
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| {
            CopyModelError::Invariant(PROVIDER, "Empty message content in response".to_string())
        })?;

    BilingualText::from_model_output(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::chat_api::{ChatCompletionChoice, ChatCompletionResponseMessage};
    use serde_json::json;

    fn response_with(content: Option<&str>, refusal: Option<&str>) -> CreateChatCompletionResponse {
        CreateChatCompletionResponse {
            choices: vec![ChatCompletionChoice {
                message: ChatCompletionResponseMessage {
                    content: content.map(ToString::to_string),
                    refusal: refusal.map(ToString::to_string),
                },
            }],
        }
    }

    #[test]
    fn create_params_carry_system_instruction_and_json_mode() {
        let params = convert_to_openai_create_params(
            GenerationRequest::new("Write the hero"),
            "gpt-4o-mini",
            Some(0.7),
        );

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["model"], json!("gpt-4o-mini"));
        assert_eq!(value["response_format"], json!({ "type": "json_object" }));
        assert_eq!(value["temperature"], json!(0.7));
        assert_eq!(value["messages"][0]["role"], json!("system"));
        assert_eq!(value["messages"][0]["content"], json!(SYSTEM_INSTRUCTION));
        assert_eq!(
            value["messages"][1],
            json!({ "role": "user", "content": "Write the hero" })
        );
    }

    #[test]
    fn omits_temperature_when_unset() {
        let params =
            convert_to_openai_create_params(GenerationRequest::new("p"), "gpt-4o-mini", None);
        let value = serde_json::to_value(&params).unwrap();

        assert!(value.get("temperature").is_none());
    }

    #[test]
    fn maps_message_content_to_bilingual_text() {
        let response = response_with(
            Some(r#"{"english": "Title: Hi", "chinese": "标题: 你好"}"#),
            None,
        );

        let text = map_openai_response(response).unwrap();
        assert_eq!(text, BilingualText::new("Title: Hi", "标题: 你好"));
    }

    #[test]
    fn maps_refusal_to_error() {
        let response = response_with(None, Some("I can't help with that"));

        let err = map_openai_response(response).unwrap_err();
        assert!(matches!(err, CopyModelError::Refusal(message) if message == "I can't help with that"));
    }

    #[test]
    fn empty_choices_is_an_invariant_error() {
        let err = map_openai_response(CreateChatCompletionResponse { choices: vec![] })
            .unwrap_err();

        assert!(matches!(err, CopyModelError::Invariant(PROVIDER, _)));
    }

    #[test]
    fn request_credential_overrides_configured_key() {
        let model = OpenAICopyModel::new(
            "gpt-4o-mini",
            OpenAICopyModelOptions {
                api_key: "sk-default".to_string(),
                ..Default::default()
            },
        );

        let headers = model.request_headers(Some("sk-user")).unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer sk-user");

        let headers = model.request_headers(None).unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer sk-default");
    }

    #[test]
    fn missing_key_fails_before_any_request() {
        let model = OpenAICopyModel::new("gpt-4o-mini", OpenAICopyModelOptions::default());

        let err = model.request_headers(None).unwrap_err();
        assert!(matches!(err, CopyModelError::InvalidInput(_)));
    }
}
