use async_trait::async_trait;
use roteiro_application::ContentUsecase;
use roteiro_core::content::{
    ContextSample, GenerationRequest, ParsedContent, PlatformFormatRepository, PromptRepository,
    StoredPrompt,
};
use roteiro_core::error::{Result, RoteiroError};
use roteiro_core::model_config::{ActiveModelRow, ModelConfigRepository};
use roteiro_interaction::{CompletionProvider, CompletionRequest, ProviderError};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Provider fake that answers with well-marked output for the platform named
/// in the user message, and records every invocation.
#[derive(Default)]
struct RecordingProvider {
    calls: AtomicUsize,
    /// Platform whose invocation should fail
    fail_for: Option<String>,
    /// Answer with free text carrying no markers at all
    respond_unmarked: bool,
}

fn marked_response(platform: &str) -> String {
    format!(
        "## script results start ##\nRoteiro para *{platform}*\n## script results ends ##\n\
         ## content analyses start ##\n- Gancho (Pontuação: 8/10): forte\n## content analyses ends ##\n\
         ## viral score start ##\nPontuação Viral: 77\n## viral score ends ##"
    )
}

#[async_trait]
impl CompletionProvider for RecordingProvider {
    async fn complete(&self, request: CompletionRequest) -> std::result::Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let user = &request
            .messages
            .last()
            .expect("request should carry messages")
            .content;
        let platform = user
            .lines()
            .find_map(|line| line.strip_prefix("Platform: "))
            .unwrap_or("unknown")
            .to_string();

        if self.fail_for.as_deref() == Some(platform.as_str()) {
            return Err(ProviderError::Http {
                status: 500,
                message: "provider exploded".to_string(),
                is_retryable: true,
                retry_after: None,
            });
        }

        if self.respond_unmarked {
            return Ok("resposta livre sem nenhum marcador".to_string());
        }

        Ok(marked_response(&platform))
    }
}

struct FakeModelConfigs {
    row: Option<ActiveModelRow>,
}

impl FakeModelConfigs {
    fn complete() -> Self {
        Self {
            row: Some(ActiveModelRow {
                model_name: "gpt-4o".to_string(),
                settings: json!({
                    "temperature": 0.8,
                    "max_tokens": 2048,
                    "top_p": 0.95,
                    "frequency_penalty": 0.3,
                    "presence_penalty": 0.4,
                }),
            }),
        }
    }

    fn absent() -> Self {
        Self { row: None }
    }
}

#[async_trait]
impl ModelConfigRepository for FakeModelConfigs {
    async fn find_active(&self) -> Result<Option<ActiveModelRow>> {
        Ok(self.row.clone())
    }
}

struct FakeFormats;

#[async_trait]
impl PlatformFormatRepository for FakeFormats {
    async fn format_for(&self, platform: &str) -> Result<String> {
        Ok(match platform.to_lowercase().as_str() {
            "tiktok" => "Vídeo curto, 30-60s.".to_string(),
            _ => String::new(),
        })
    }
}

/// In-memory persistence fake recording how often update_content runs.
#[derive(Default)]
struct MemoryPromptRepository {
    records: Mutex<HashMap<String, StoredPrompt>>,
    updates: AtomicUsize,
}

#[async_trait]
impl PromptRepository for MemoryPromptRepository {
    async fn create(&self, prompt: &StoredPrompt) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(prompt.id.clone(), prompt.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredPrompt>> {
        Ok(self.records.lock().unwrap().get(id).cloned())
    }

    async fn update_content(&self, id: &str, content: &ParsedContent) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(id)
            .ok_or_else(|| RoteiroError::not_found("prompt", id))?;
        record.content = content.clone();
        Ok(())
    }
}

struct Harness {
    provider: Arc<RecordingProvider>,
    prompts: Arc<MemoryPromptRepository>,
    usecase: ContentUsecase,
}

fn harness(provider: RecordingProvider, model_configs: FakeModelConfigs) -> Harness {
    let provider = Arc::new(provider);
    let prompts = Arc::new(MemoryPromptRepository::default());
    let usecase = ContentUsecase::new(
        provider.clone(),
        Arc::new(model_configs),
        Arc::new(FakeFormats),
        prompts.clone(),
    );
    Harness {
        provider,
        prompts,
        usecase,
    }
}

fn generation_request(platforms: &[&str]) -> GenerationRequest {
    GenerationRequest {
        topic: "rotina matinal".to_string(),
        platforms: platforms.iter().map(|p| p.to_string()).collect(),
        requester_id: "user-1".to_string(),
        context_sample: None,
    }
}

#[tokio::test]
async fn test_batch_results_come_back_in_request_order() {
    let h = harness(RecordingProvider::default(), FakeModelConfigs::complete());

    let outcome = h
        .usecase
        .generate_and_store(generation_request(&["youtube", "tiktok", "newsletter"]))
        .await
        .expect("batch should succeed");

    let platforms: Vec<_> = outcome
        .results
        .iter()
        .map(|result| result.platform.as_str())
        .collect();
    assert_eq!(platforms, vec!["youtube", "tiktok", "newsletter"]);

    // Each platform got its own completion, parsed with asterisks stripped
    assert_eq!(
        outcome.results[1].content.script_body,
        "Roteiro para tiktok"
    );
    assert_eq!(outcome.results[1].content.aggregate_score, 77);
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_duplicate_platforms_are_invoked_twice() {
    let h = harness(RecordingProvider::default(), FakeModelConfigs::complete());

    let outcome = h
        .usecase
        .generate_and_store(generation_request(&["tiktok", "tiktok"]))
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_missing_configuration_aborts_before_any_invocation() {
    let h = harness(RecordingProvider::default(), FakeModelConfigs::absent());

    let err = h
        .usecase
        .generate_and_store(generation_request(&["tiktok"]))
        .await
        .unwrap_err();

    assert!(err.is_config());
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 0);
    assert!(h.prompts.records.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_single_platform_failure_aborts_batch_with_platform_tag() {
    let provider = RecordingProvider {
        fail_for: Some("tiktok".to_string()),
        ..Default::default()
    };
    let h = harness(provider, FakeModelConfigs::complete());

    let err = h
        .usecase
        .generate_and_store(generation_request(&["youtube", "tiktok"]))
        .await
        .unwrap_err();

    match err {
        RoteiroError::Provider { platform, message } => {
            assert_eq!(platform, "tiktok");
            assert!(message.contains("500"));
        }
        other => panic!("Expected Provider error, got {other:?}"),
    }

    // No partial success: nothing was persisted
    assert!(h.prompts.records.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_generation_stores_first_platform_content() {
    let h = harness(RecordingProvider::default(), FakeModelConfigs::complete());

    let outcome = h
        .usecase
        .generate_and_store(generation_request(&["youtube", "tiktok"]))
        .await
        .unwrap();

    let stored = h
        .prompts
        .find_by_id(&outcome.record_id)
        .await
        .unwrap()
        .expect("record should be stored");

    assert_eq!(stored.topic, "rotina matinal");
    assert_eq!(stored.platform, "youtube");
    assert_eq!(stored.content.script_body, "Roteiro para youtube");
    assert_eq!(stored.requester_id, "user-1");
}

#[tokio::test]
async fn test_unmarked_completion_is_stored_as_sentinels() {
    let provider = RecordingProvider {
        respond_unmarked: true,
        ..Default::default()
    };
    let h = harness(provider, FakeModelConfigs::complete());

    // Parse degradation is silent on first-time generation
    let outcome = h
        .usecase
        .generate_and_store(generation_request(&["tiktok"]))
        .await
        .expect("degraded parse must not fail generation");

    assert!(outcome.results[0].content.is_parse_failure());
}

#[tokio::test]
async fn test_empty_topic_is_rejected_upstream() {
    let h = harness(RecordingProvider::default(), FakeModelConfigs::complete());

    let mut request = generation_request(&["tiktok"]);
    request.topic = "  ".to_string();

    let err = h.usecase.generate_and_store(request).await.unwrap_err();
    assert!(matches!(err, RoteiroError::InvalidRequest(_)));
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_context_sample_reaches_the_provider_prompt() {
    let h = harness(RecordingProvider::default(), FakeModelConfigs::complete());

    let mut request = generation_request(&["tiktok"]);
    request.context_sample = Some(ContextSample {
        title: "Acorde às 5h".to_string(),
        body: "Gancho anterior".to_string(),
        aggregate_score: 82,
    });

    h.usecase.generate_and_store(request).await.unwrap();
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_refine_record_updates_stored_content() {
    let h = harness(RecordingProvider::default(), FakeModelConfigs::complete());

    let outcome = h
        .usecase
        .generate_and_store(generation_request(&["tiktok"]))
        .await
        .unwrap();

    let refined = h
        .usecase
        .refine_record(&outcome.record_id, "deixe o gancho mais agressivo")
        .await
        .expect("refinement should pass the gate");

    assert_eq!(refined.script_body, "Roteiro para tiktok");
    assert_eq!(h.prompts.updates.load(Ordering::SeqCst), 1);

    let stored = h
        .prompts
        .find_by_id(&outcome.record_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.content, refined);
}

#[tokio::test]
async fn test_failed_refinement_never_touches_stored_content() {
    let h = harness(RecordingProvider::default(), FakeModelConfigs::complete());

    let outcome = h
        .usecase
        .generate_and_store(generation_request(&["tiktok"]))
        .await
        .unwrap();
    let original = h
        .prompts
        .find_by_id(&outcome.record_id)
        .await
        .unwrap()
        .unwrap();

    // Second harness sharing the same store, with a provider that degrades
    let degraded = Arc::new(RecordingProvider {
        respond_unmarked: true,
        ..Default::default()
    });
    let usecase = ContentUsecase::new(
        degraded,
        Arc::new(FakeModelConfigs::complete()),
        Arc::new(FakeFormats),
        h.prompts.clone(),
    );

    let err = usecase
        .refine_record(&outcome.record_id, "melhore o final")
        .await
        .unwrap_err();

    assert!(err.is_refinement_validation());
    assert_eq!(h.prompts.updates.load(Ordering::SeqCst), 0);

    let untouched = h
        .prompts
        .find_by_id(&outcome.record_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.content, original.content);
}

#[tokio::test]
async fn test_refining_unknown_record_is_not_found() {
    let h = harness(RecordingProvider::default(), FakeModelConfigs::complete());

    let err = h
        .usecase
        .refine_record("missing-id", "qualquer coisa")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(h.provider.calls.load(Ordering::SeqCst), 0);
}
