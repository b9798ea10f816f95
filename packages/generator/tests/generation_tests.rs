// ABOUTME: Tests for the proposal generation workflow and chat assistant
// ABOUTME: Runs against in-memory SQLite and a recording fake text generator

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use proposer_ai::{AIServiceError, AIServiceResult, TextGenerator};
use proposer_core::{Caller, Role};
use proposer_generator::{
    ChatAssistant, ChatError, GenerateProposalRequest, GenerationError, ProposalGenerator,
};
use proposer_proposals::{ProposalStatus, ProposalStorage};
use proposer_storage::connect_in_memory;
use proposer_templates::{TemplateCreateInput, TemplateStorage};
use sqlx::SqlitePool;

/// Records every prompt pair and answers with a fixed reply
struct RecordingGenerator {
    reply: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingGenerator {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate_text(&self, system_prompt: &str, prompt: &str) -> AIServiceResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), prompt.to_string()));
        self.reply
            .clone()
            .ok_or_else(|| AIServiceError::ApiError("model unavailable".to_string()))
    }
}

struct Fixture {
    pool: SqlitePool,
    templates: Arc<TemplateStorage>,
    proposals: Arc<ProposalStorage>,
}

impl Fixture {
    async fn new() -> Self {
        let pool = connect_in_memory().await.unwrap();
        Self {
            templates: Arc::new(TemplateStorage::new(pool.clone())),
            proposals: Arc::new(ProposalStorage::new(pool.clone())),
            pool,
        }
    }

    fn generator(&self, ai: Arc<RecordingGenerator>) -> ProposalGenerator {
        ProposalGenerator::new(self.templates.clone(), self.proposals.clone(), ai)
    }

    async fn user(&self, id: &str, role: Role) -> Caller {
        sqlx::query(
            "INSERT INTO users (id, username, role, created_at, updated_at) VALUES (?, ?, ?, datetime('now'), datetime('now'))",
        )
        .bind(id)
        .bind(id)
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .unwrap();
        Caller::new(id, role)
    }
}

fn acme_request() -> GenerateProposalRequest {
    GenerateProposalRequest {
        client_name: "Acme".to_string(),
        industry: "Technology".to_string(),
        services: vec!["Strategy Development".to_string()],
        objectives: "Grow revenue 20% in 12 months".to_string(),
        timeline: "3 months".to_string(),
        budget: "$75,000".to_string(),
        tone: "professional".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_generate_without_template_stores_draft() {
    let fixture = Fixture::new().await;
    let alice = fixture.user("alice", Role::Analyst).await;
    let ai = RecordingGenerator::replying("# Acme Proposal\n\nExecutive Summary");

    let proposal = fixture
        .generator(ai.clone())
        .generate(&alice, acme_request())
        .await
        .unwrap();

    assert_eq!(proposal.title, "Acme - Technology Proposal");
    assert_eq!(proposal.markdown_content, "# Acme Proposal\n\nExecutive Summary");
    assert_eq!(proposal.status, ProposalStatus::Draft);
    assert_eq!(proposal.created_by, "alice");
    assert!(proposal.template_id.is_none());

    let calls = ai.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0]
        .0
        .contains("Template to enhance (if provided): Create a standard business proposal structure"));
    assert!(calls[0].1.contains("Client: Acme"));

    let stored = fixture.proposals.list_proposals(&alice).await.unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_template_is_filled_and_embedded() {
    let fixture = Fixture::new().await;
    let alice = fixture.user("alice", Role::Analyst).await;
    let template = fixture
        .templates
        .create_template(
            &alice,
            TemplateCreateInput {
                title: "Consulting".to_string(),
                description: None,
                content: "# {{clientName}} ({{industry}})\nServices: {{services}}\nBudget: {{budget}} {{unknown}}"
                    .to_string(),
                is_public: false,
            },
        )
        .await
        .unwrap();

    let ai = RecordingGenerator::replying("# Done");
    let mut request = acme_request();
    request.services.push("Market Research".to_string());
    request.template_id = Some(template.id.clone());

    let proposal = fixture
        .generator(ai.clone())
        .generate(&alice, request)
        .await
        .unwrap();

    assert_eq!(proposal.template_id.as_deref(), Some(template.id.as_str()));
    let system_prompt = &ai.calls()[0].0;
    assert!(system_prompt.contains(
        "# Acme (Technology)\nServices: Strategy Development, Market Research\nBudget: $75,000 {{unknown}}"
    ));
}

#[tokio::test]
async fn test_missing_template_behaves_like_no_template() {
    let fixture = Fixture::new().await;
    let alice = fixture.user("alice", Role::Analyst).await;

    let without = RecordingGenerator::replying("# A");
    fixture
        .generator(without.clone())
        .generate(&alice, acme_request())
        .await
        .unwrap();

    let with_missing = RecordingGenerator::replying("# B");
    let mut request = acme_request();
    request.template_id = Some("template-does-not-exist".to_string());
    let proposal = fixture
        .generator(with_missing.clone())
        .generate(&alice, request)
        .await
        .unwrap();

    assert_eq!(without.calls(), with_missing.calls());
    assert!(proposal.template_id.is_none());
}

#[tokio::test]
async fn test_unreadable_template_falls_back() {
    let fixture = Fixture::new().await;
    let alice = fixture.user("alice", Role::Analyst).await;
    let bob = fixture.user("bob", Role::Analyst).await;
    let private = fixture
        .templates
        .create_template(
            &alice,
            TemplateCreateInput {
                title: "Private".to_string(),
                description: None,
                content: "SECRET {{clientName}}".to_string(),
                is_public: false,
            },
        )
        .await
        .unwrap();

    let ai = RecordingGenerator::replying("# Bob's");
    let mut request = acme_request();
    request.template_id = Some(private.id);
    fixture
        .generator(ai.clone())
        .generate(&bob, request)
        .await
        .unwrap();

    assert!(!ai.calls()[0].0.contains("SECRET"));
}

#[tokio::test]
async fn test_invalid_request_never_reaches_model() {
    let fixture = Fixture::new().await;
    let alice = fixture.user("alice", Role::Analyst).await;
    let ai = RecordingGenerator::replying("# unused");

    let mut request = acme_request();
    request.services.clear();
    request.budget = "  ".to_string();

    let err = fixture
        .generator(ai.clone())
        .generate(&alice, request)
        .await
        .unwrap_err();

    match err {
        GenerationError::Validation(errors) => {
            assert!(errors.has_field("services"));
            assert!(errors.has_field("budget"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(ai.calls().is_empty());
    assert!(fixture.proposals.list_proposals(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_model_failure_stores_nothing() {
    let fixture = Fixture::new().await;
    let alice = fixture.user("alice", Role::Analyst).await;

    let err = fixture
        .generator(RecordingGenerator::failing())
        .generate(&alice, acme_request())
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Generation(_)));
    assert!(fixture.proposals.list_proposals(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_storage_failure_is_reported() {
    let fixture = Fixture::new().await;
    // Unknown owner violates the proposals foreign key
    let ghost = Caller::new("ghost", Role::Analyst);

    let err = fixture
        .generator(RecordingGenerator::replying("# Lost"))
        .generate(&ghost, acme_request())
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Storage(_)));
}

#[tokio::test]
async fn test_resubmission_creates_distinct_records() {
    let fixture = Fixture::new().await;
    let alice = fixture.user("alice", Role::Analyst).await;
    let generator = fixture.generator(RecordingGenerator::replying("# Same"));

    let first = generator.generate(&alice, acme_request()).await.unwrap();
    let second = generator.generate(&alice, acme_request()).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(fixture.proposals.list_proposals(&alice).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_chat_trims_and_uses_persona() {
    let ai = RecordingGenerator::replying("Lead with outcomes.");
    let chat = ChatAssistant::new(ai.clone());

    let reply = chat.reply("  How should I open a proposal?  ").await.unwrap();

    assert_eq!(reply, "Lead with outcomes.");
    let calls = ai.calls();
    assert!(calls[0].0.starts_with("You are a professional business proposal assistant."));
    assert_eq!(calls[0].1, "How should I open a proposal?");
}

#[tokio::test]
async fn test_chat_rejects_empty_and_oversized() {
    let ai = RecordingGenerator::replying("unused");
    let chat = ChatAssistant::new(ai.clone());

    assert!(matches!(chat.reply("   ").await, Err(ChatError::Validation(_))));
    assert!(matches!(
        chat.reply(&"x".repeat(10_001)).await,
        Err(ChatError::Validation(_))
    ));
    assert!(ai.calls().is_empty());

    let chat = ChatAssistant::new(RecordingGenerator::failing());
    assert!(matches!(
        chat.reply("hello").await,
        Err(ChatError::Generation(_))
    ));
}
