use anyhow::Result;

use exam_generator::{
    Attachment, AttachmentStore, Config, ConfigAction, ConfigStore, GeminiClient, Language,
    RequestPipeline,
};

/// Apply exam settings from environment variables through the config
/// reducer, so the same clamping rules apply as for interactive edits.
fn exam_config_from_env() -> ConfigStore {
    let mut store = ConfigStore::new();
    if let Ok(topic) = std::env::var("EXAM_TOPIC") {
        store.apply(ConfigAction::SetTopic(topic));
    }
    if let Ok(grade) = std::env::var("EXAM_GRADE") {
        store.apply(ConfigAction::SetGrade(grade));
    }
    if let Ok(count) = std::env::var("EXAM_MC_COUNT") {
        store.apply(ConfigAction::SetMultipleChoiceCount(count));
    }
    if let Ok(count) = std::env::var("EXAM_ESSAY_COUNT") {
        store.apply(ConfigAction::SetEssayCount(count));
    }
    if let Ok(flag) = std::env::var("EXAM_USE_TIKZ") {
        store.apply(ConfigAction::SetUseTikz(flag.parse().unwrap_or(false)));
    }
    if let Ok(flag) = std::env::var("EXAM_VARY_DATA") {
        store.apply(ConfigAction::SetVaryData(flag.parse().unwrap_or(false)));
    }
    if let Ok(code) = std::env::var("EXAM_LANGUAGE") {
        store.apply(ConfigAction::SetLanguage(Language::from_code(&code)));
    }
    store
}

#[tokio::main]
async fn main() -> Result<()> {
    exam_generator::logger::init();

    let config = Config::from_env();
    let exam_store = exam_config_from_env();

    // Any command-line arguments are attachment paths (PDF or image).
    let mut attachments = AttachmentStore::new();
    for path in std::env::args().skip(1) {
        match Attachment::from_path(&path) {
            Some(attachment) => {
                attachments.add([attachment]);
            }
            None => tracing::warn!("ignoring unsupported file: {}", path),
        }
    }

    let client = GeminiClient::new(&config)?;
    let mut pipeline = RequestPipeline::new(client);

    let latex = pipeline.submit(exam_store.get(), attachments.list()).await?;
    println!("{latex}");

    Ok(())
}
