//! End-to-end pipeline scenarios against a mock generation client.

use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;

use exam_generator::{
    Attachment, AttachmentData, AttachmentStore, Difficulty, ExamConfig, GenerationClient,
    GenerationError, GenerationState, Language, RequestPart, RequestPipeline,
};

/// Records every issued call and replies with a canned response.
#[derive(Clone)]
struct MockClient {
    calls: Arc<Mutex<Vec<Vec<RequestPart>>>>,
    response: String,
}

impl MockClient {
    fn replying(response: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response: response.to_string(),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn calls(&self) -> Vec<Vec<RequestPart>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for MockClient {
    async fn generate(&self, parts: &[RequestPart]) -> exam_generator::Result<String> {
        self.calls.lock().unwrap().push(parts.to_vec());
        Ok(self.response.clone())
    }
}

/// Always fails, standing in for a broken provider.
struct FailingClient;

#[async_trait]
impl GenerationClient for FailingClient {
    async fn generate(&self, _parts: &[RequestPart]) -> exam_generator::Result<String> {
        Err(GenerationError::Provider("503 service unavailable".into()))
    }
}

fn fractions_config() -> ExamConfig {
    ExamConfig {
        topic: "Fractions".to_string(),
        grade: "6".to_string(),
        difficulty: Difficulty::Medium,
        num_multiple_choice: 10,
        num_essay: 2,
        use_tikz: false,
        vary_data: false,
        language: Language::En,
    }
}

#[tokio::test]
async fn empty_topic_and_no_attachments_issues_no_call() {
    let client = MockClient::replying("DOC");
    let mut pipeline = RequestPipeline::new(client.clone());

    let config = ExamConfig {
        topic: String::new(),
        grade: "6".to_string(),
        ..ExamConfig::default()
    };

    let err = pipeline.submit(&config, &[]).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(client.call_count(), 0);
    assert!(pipeline.state().accepts_submission());
}

#[tokio::test]
async fn successful_generation_publishes_sanitized_result() {
    let client = MockClient::replying("```\nDOC\n```");
    let mut pipeline = RequestPipeline::new(client.clone());

    let result = pipeline.submit(&fractions_config(), &[]).await.unwrap();

    assert_eq!(result, "DOC");
    assert_eq!(pipeline.state(), &GenerationState::Succeeded("DOC".into()));
    assert_eq!(client.call_count(), 1);

    // exactly one instruction part, no attachment parts
    let calls = client.calls();
    assert_eq!(calls[0].len(), 1);
    match &calls[0][0] {
        RequestPart::Text(instruction) => {
            assert!(instruction.contains("GRADE"));
            assert!(instruction.contains("Fractions"));
        }
        other => panic!("expected instruction text first, got {other:?}"),
    }
}

#[tokio::test]
async fn attachment_parts_keep_add_order_after_the_instruction() {
    let client = MockClient::replying("DOC");
    let mut pipeline = RequestPipeline::new(client.clone());

    let mut store = AttachmentStore::new();
    store.add(vec![
        Attachment::from_bytes("a.png", "image/png", b"AAA".to_vec()),
        Attachment::from_bytes("b.pdf", "application/pdf", b"BBB".to_vec()),
    ]);

    let mut config = fractions_config();
    config.topic = String::new(); // attachments alone are enough

    pipeline.submit(&config, store.list()).await.unwrap();

    let calls = client.calls();
    assert_eq!(calls[0].len(), 3);
    assert!(matches!(calls[0][0], RequestPart::Text(_)));

    let engine = base64::engine::general_purpose::STANDARD;
    match &calls[0][1] {
        RequestPart::InlineData { mime_type, data } => {
            assert_eq!(mime_type, "image/png");
            assert_eq!(engine.decode(data).unwrap(), b"AAA");
        }
        other => panic!("expected inline data, got {other:?}"),
    }
    match &calls[0][2] {
        RequestPart::InlineData { mime_type, data } => {
            assert_eq!(mime_type, "application/pdf");
            assert_eq!(engine.decode(data).unwrap(), b"BBB");
        }
        other => panic!("expected inline data, got {other:?}"),
    }
}

#[tokio::test]
async fn one_unreadable_attachment_fails_without_issuing_a_call() {
    let client = MockClient::replying("DOC");
    let mut pipeline = RequestPipeline::new(client.clone());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"readable").unwrap();

    let attachments = vec![
        Attachment {
            name: "a.png".to_string(),
            mime_type: "image/png".to_string(),
            data: AttachmentData::File(file.path().to_path_buf()),
        },
        Attachment {
            name: "b.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            data: AttachmentData::File("/nonexistent/b.pdf".into()),
        },
    ];

    let err = pipeline
        .submit(&fractions_config(), &attachments)
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::AttachmentRead { .. }));
    // no partial payload containing only the readable attachment
    assert_eq!(client.call_count(), 0);
    assert!(matches!(pipeline.state(), GenerationState::Failed(_)));
    assert!(pipeline.state().accepts_submission());
}

/// Succeeds once, then fails every later call.
struct FlakyClient {
    calls: Arc<Mutex<usize>>,
}

#[async_trait]
impl GenerationClient for FlakyClient {
    async fn generate(&self, _parts: &[RequestPart]) -> exam_generator::Result<String> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        if *calls == 1 {
            Ok("first result".to_string())
        } else {
            Err(GenerationError::Provider("503 service unavailable".into()))
        }
    }
}

#[tokio::test]
async fn provider_failure_clears_previous_result() {
    let mut pipeline = RequestPipeline::new(FlakyClient {
        calls: Arc::new(Mutex::new(0)),
    });
    pipeline.submit(&fractions_config(), &[]).await.unwrap();
    assert_eq!(pipeline.state().result_text(), Some("first result"));

    let err = pipeline
        .submit(&fractions_config(), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Provider(_)));
    let message = pipeline.state().error_message().unwrap();
    assert!(message.contains("503"));
    // the earlier successful output is not restored after a failed retry
    assert!(pipeline.state().result_text().is_none());
}

#[tokio::test]
async fn empty_response_is_a_valid_empty_result() {
    let client = MockClient::replying("");
    let mut pipeline = RequestPipeline::new(client);

    let result = pipeline.submit(&fractions_config(), &[]).await.unwrap();
    assert_eq!(result, "");
    assert_eq!(pipeline.state(), &GenerationState::Succeeded(String::new()));
}

#[tokio::test]
async fn a_new_submission_starts_a_fresh_cycle_after_failure() {
    let mut pipeline = RequestPipeline::new(FailingClient);
    pipeline
        .submit(&fractions_config(), &[])
        .await
        .unwrap_err();
    assert!(pipeline.state().accepts_submission());

    let client = MockClient::replying("```latex\nDOC2\n```");
    let mut pipeline = RequestPipeline::new(client);
    let result = pipeline.submit(&fractions_config(), &[]).await.unwrap();
    assert_eq!(result, "DOC2");
}
