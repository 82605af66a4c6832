use copy_sdk::{
    openai::{OpenAICopyModel, OpenAICopyModelOptions},
    CopyModel, CopyModelError, GenerationRequest,
};
use std::{env, sync::OnceLock};

fn openai_api_key() -> &'static String {
    static KEY: OnceLock<String> = OnceLock::new();

    KEY.get_or_init(|| {
        dotenvy::dotenv().ok();
        env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set")
    })
}

fn local_model() -> OpenAICopyModel {
    OpenAICopyModel::new(
        "gpt-4o-mini",
        OpenAICopyModelOptions {
            base_url: Some("http://127.0.0.1:9/".to_string()),
            ..Default::default()
        },
    )
}

#[tokio::test]
async fn missing_key_is_rejected_without_a_request() {
    let err = local_model()
        .generate(GenerationRequest::new("Write a hero section"))
        .await
        .unwrap_err();

    assert!(matches!(err, CopyModelError::InvalidInput(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let request =
        GenerationRequest::new("Write a hero section").with_credential(Some("sk-test".into()));

    let err = local_model().generate(request).await.unwrap_err();

    assert!(matches!(err, CopyModelError::Transport(_)), "{err:?}");
}

#[tokio::test]
#[ignore = "calls the OpenAI API"]
async fn generates_bilingual_copy() {
    let model = OpenAICopyModel::new(
        "gpt-4o-mini",
        OpenAICopyModelOptions {
            api_key: openai_api_key().clone(),
            ..Default::default()
        },
    );

    let text = model
        .generate(GenerationRequest::new(
            "Write a one-line hero title for an SEO writing tool.\nFormat: Title: ...",
        ))
        .await
        .expect("generate should succeed");

    assert!(!text.english.trim().is_empty());
    assert!(!text.chinese.trim().is_empty());
}
