// ABOUTME: Integration tests for template storage
// ABOUTME: Covers read scoping per role, owner-only mutation and listing order

use proposer_core::{Caller, Role};
use proposer_storage::{connect_in_memory, StorageError};
use proposer_templates::{TemplateCreateInput, TemplatePatch, TemplateStorage};
use sqlx::SqlitePool;

async fn setup() -> (SqlitePool, TemplateStorage) {
    let pool = connect_in_memory().await.unwrap();
    let storage = TemplateStorage::new(pool.clone());
    (pool, storage)
}

async fn insert_user(pool: &SqlitePool, id: &str, role: Role) -> Caller {
    sqlx::query(
        "INSERT INTO users (id, username, role, created_at, updated_at) VALUES (?, ?, ?, datetime('now'), datetime('now'))",
    )
    .bind(id)
    .bind(id)
    .bind(role.as_str())
    .execute(pool)
    .await
    .unwrap();
    Caller::new(id, role)
}

fn template(title: &str, is_public: bool) -> TemplateCreateInput {
    TemplateCreateInput {
        title: title.to_string(),
        description: Some("Test template".to_string()),
        content: "# {{clientName}}\n\n{{industry}} engagement".to_string(),
        is_public,
    }
}

#[tokio::test]
async fn test_create_assigns_caller_as_owner() {
    let (pool, storage) = setup().await;
    let alice = insert_user(&pool, "alice", Role::Analyst).await;

    let created = storage
        .create_template(&alice, template("Starter", false))
        .await
        .unwrap();

    assert!(created.id.starts_with("template-"));
    assert_eq!(created.created_by, "alice");
    assert!(!created.is_public);
    assert_eq!(created.placeholders, vec!["clientName", "industry"]);
}

#[tokio::test]
async fn test_analysts_only_see_their_own_private_templates() {
    let (pool, storage) = setup().await;
    let alice = insert_user(&pool, "alice", Role::Analyst).await;
    let bob = insert_user(&pool, "bob", Role::Analyst).await;

    let a = storage
        .create_template(&alice, template("Alice's", false))
        .await
        .unwrap();
    let b = storage
        .create_template(&bob, template("Bob's", false))
        .await
        .unwrap();

    let alice_list = storage.list_templates(&alice).await.unwrap();
    let ids: Vec<_> = alice_list.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![a.id.as_str()]);

    let bob_list = storage.list_templates(&bob).await.unwrap();
    let ids: Vec<_> = bob_list.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![b.id.as_str()]);
}

#[tokio::test]
async fn test_public_templates_visible_to_everyone() {
    let (pool, storage) = setup().await;
    let alice = insert_user(&pool, "alice", Role::Analyst).await;
    let carol = insert_user(&pool, "carol", Role::Consultant).await;

    let shared = storage
        .create_template(&alice, template("Shared", true))
        .await
        .unwrap();
    storage
        .create_template(&alice, template("Private", false))
        .await
        .unwrap();

    let list = storage.list_templates(&carol).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, shared.id);

    let fetched = storage.get_template(&carol, &shared.id).await.unwrap();
    assert_eq!(fetched.title, "Shared");
}

#[tokio::test]
async fn test_manager_lists_everything_newest_first() {
    let (pool, storage) = setup().await;
    let alice = insert_user(&pool, "alice", Role::Analyst).await;
    let bob = insert_user(&pool, "bob", Role::Consultant).await;
    let pm = insert_user(&pool, "pm", Role::ProductManager).await;

    let first = storage
        .create_template(&alice, template("First", false))
        .await
        .unwrap();
    let second = storage
        .create_template(&bob, template("Second", false))
        .await
        .unwrap();
    let third = storage
        .create_template(&alice, template("Third", true))
        .await
        .unwrap();

    let list = storage.list_templates(&pm).await.unwrap();
    let ids: Vec<_> = list.iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn test_unreadable_template_is_not_found() {
    let (pool, storage) = setup().await;
    let alice = insert_user(&pool, "alice", Role::Analyst).await;
    let bob = insert_user(&pool, "bob", Role::Analyst).await;

    let private = storage
        .create_template(&alice, template("Private", false))
        .await
        .unwrap();

    let err = storage.get_template(&bob, &private.id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));

    let err = storage.get_template(&bob, "template-missing").await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn test_owner_can_patch_fields() {
    let (pool, storage) = setup().await;
    let alice = insert_user(&pool, "alice", Role::Analyst).await;

    let created = storage
        .create_template(&alice, template("Draft", false))
        .await
        .unwrap();

    let patch = TemplatePatch {
        title: Some("Final".to_string()),
        description: Some(None),
        content: Some("Budget: {{budget}}".to_string()),
        is_public: Some(true),
    };
    let updated = storage
        .update_template(&alice, &created.id, patch)
        .await
        .unwrap();

    assert_eq!(updated.title, "Final");
    assert!(updated.description.is_none());
    assert!(updated.is_public);
    assert_eq!(updated.placeholders, vec!["budget"]);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_empty_patch_returns_record_unchanged() {
    let (pool, storage) = setup().await;
    let alice = insert_user(&pool, "alice", Role::Analyst).await;

    let created = storage
        .create_template(&alice, template("Same", false))
        .await
        .unwrap();
    let updated = storage
        .update_template(&alice, &created.id, TemplatePatch::default())
        .await
        .unwrap();

    assert_eq!(updated.title, "Same");
    assert_eq!(updated.updated_at, created.updated_at);
}

#[tokio::test]
async fn test_manager_cannot_update_or_delete_others_templates() {
    let (pool, storage) = setup().await;
    let alice = insert_user(&pool, "alice", Role::Analyst).await;
    let pm = insert_user(&pool, "pm", Role::ProductManager).await;

    let created = storage
        .create_template(&alice, template("Alice's", true))
        .await
        .unwrap();

    let patch = TemplatePatch {
        title: Some("Hijacked".to_string()),
        ..Default::default()
    };
    let err = storage
        .update_template(&pm, &created.id, patch)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotOwner));

    let err = storage.delete_template(&pm, &created.id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFoundOrNotOwner));

    let still_there = storage.get_template(&alice, &created.id).await.unwrap();
    assert_eq!(still_there.title, "Alice's");
}

#[tokio::test]
async fn test_update_missing_template_is_not_found() {
    let (pool, storage) = setup().await;
    let alice = insert_user(&pool, "alice", Role::Analyst).await;

    let err = storage
        .update_template(&alice, "template-missing", TemplatePatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn test_owner_deletes_template() {
    let (pool, storage) = setup().await;
    let alice = insert_user(&pool, "alice", Role::Analyst).await;

    let created = storage
        .create_template(&alice, template("Temporary", false))
        .await
        .unwrap();
    storage.delete_template(&alice, &created.id).await.unwrap();

    let err = storage.get_template(&alice, &created.id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));

    let err = storage.delete_template(&alice, &created.id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFoundOrNotOwner));
}
