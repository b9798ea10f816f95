// ABOUTME: Shared application state for the HTTP layer
// ABOUTME: Wires storage layers, the generation workflow and chat around one pool and one text generator

use std::sync::Arc;

use proposer_ai::TextGenerator;
use proposer_generator::{ChatAssistant, ProposalGenerator};
use proposer_proposals::ProposalStorage;
use proposer_templates::TemplateStorage;
use proposer_users::UserStorage;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStorage>,
    pub templates: Arc<TemplateStorage>,
    pub proposals: Arc<ProposalStorage>,
    pub generator: Arc<ProposalGenerator>,
    pub chat: Arc<ChatAssistant>,
}

impl AppState {
    pub fn new(pool: SqlitePool, ai: Arc<dyn TextGenerator>) -> Self {
        let users = Arc::new(UserStorage::new(pool.clone()));
        let templates = Arc::new(TemplateStorage::new(pool.clone()));
        let proposals = Arc::new(ProposalStorage::new(pool));
        let generator = Arc::new(ProposalGenerator::new(
            templates.clone(),
            proposals.clone(),
            ai.clone(),
        ));
        let chat = Arc::new(ChatAssistant::new(ai));

        Self {
            users,
            templates,
            proposals,
            generator,
            chat,
        }
    }
}
