use copy_sdk::openai::{OpenAICopyModel, OpenAICopyModelOptions};
use copy_studio::Orchestrator;
use dotenvy::dotenv;
use std::{env, error::Error, sync::Arc};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("copy_studio=info")),
        )
        .init();

    let api_key = env::var("OPENAI_API_KEY").map_err(|_| "OPENAI_API_KEY is not set")?;
    let model_id = env::var("COPY_STUDIO_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

    let model = OpenAICopyModel::new(
        model_id,
        OpenAICopyModelOptions {
            api_key,
            base_url: env::var("OPENAI_BASE_URL").ok(),
            ..Default::default()
        },
    );

    let orchestrator = Orchestrator::builder(Arc::new(model)).build();
    let session = orchestrator.new_session();
    session
        .update_settings(|settings| {
            settings.mandatory_keywords = "ai writer, seo copy".to_string();
            settings.optional_keywords = "landing page，content marketing\nkeyword density".to_string();
            settings.selected_sections = vec!["hero".into(), "feature".into(), "faq".into()];
            settings.set_section_count("feature", 3);
        })
        .await;

    let report = orchestrator.generate_all(&session).await?;
    for outcome in &report.outcomes {
        println!("{outcome:?}");
    }

    let results = session.results().await;
    let selected = session.settings().await.selected_sections;
    for content in results.contents_in(&selected) {
        println!("\n=== {} ({} words) ===", content.section_id, content.word_count);
        println!("{}\n---\n{}", content.english, content.chinese);
    }

    let density = session.density_report().await?;
    println!("\nTotal words: {}", density.total_words);
    for entry in &density.entries {
        let kind = if entry.is_mandatory { "mandatory" } else { "optional" };
        println!("{:<24} {:>4} {:>8} ({kind})", entry.keyword, entry.count, entry.density);
    }
    println!(
        "Mandatory: {} (target {}%), optional: {} (target {}%)",
        density.mandatory_sum, density.mandatory_target, density.optional_sum, density.optional_target
    );

    Ok(())
}
