//!
//! # Ownership-Scoped Resource Layer
//!
//! Task CRUD, every operation filtered by the caller's identity. The caller
//! id always comes from the gatekeeper, never from a request payload. For
//! single-task lookups, a malformed id, a missing record, and a record owned
//! by someone else all collapse to `NotFound`, so a non-owner learns nothing
//! about what exists.

use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskPatch};
use crate::store::Store;

/// Parses a raw path segment as a task id. An unparsable id reads the same
/// as a nonexistent one.
fn parse_task_id(raw_id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw_id).map_err(|_| AppError::NotFound)
}

pub async fn create_task(
    store: &Store,
    creator_id: Uuid,
    input: TaskInput,
) -> Result<Task, AppError> {
    input.validate()?;
    let task = Task::new(input.text, creator_id);
    store.insert_task(task.clone()).await;
    Ok(task)
}

/// All of the caller's tasks, in insertion order.
pub async fn list_tasks(store: &Store, creator_id: Uuid) -> Result<Vec<Task>, AppError> {
    Ok(store.tasks_by_creator(creator_id).await)
}

pub async fn get_task(store: &Store, creator_id: Uuid, raw_id: &str) -> Result<Task, AppError> {
    let id = parse_task_id(raw_id)?;
    store
        .task_scoped(creator_id, id)
        .await
        .ok_or(AppError::NotFound)
}

/// Removes the task and returns its prior value.
pub async fn delete_task(store: &Store, creator_id: Uuid, raw_id: &str) -> Result<Task, AppError> {
    let id = parse_task_id(raw_id)?;
    store
        .remove_task_scoped(creator_id, id)
        .await
        .ok_or(AppError::NotFound)
}

/// Applies the patch policy (see `Task::apply_patch`) and returns the updated
/// task.
pub async fn update_task(
    store: &Store,
    creator_id: Uuid,
    raw_id: &str,
    patch: TaskPatch,
) -> Result<Task, AppError> {
    let id = parse_task_id(raw_id)?;
    store
        .patch_task_scoped(creator_id, id, &patch)
        .await
        .ok_or(AppError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_create_rejects_empty_text() {
        let store = Store::new();
        let creator = Uuid::new_v4();
        match create_task(&store, creator, TaskInput { text: "".into() }).await {
            Err(AppError::Validation(_)) => {}
            other => panic!("expected Validation error, got {:?}", other),
        }
        assert!(list_tasks(&store, creator).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_malformed_id_reads_as_not_found() {
        let store = Store::new();
        let creator = Uuid::new_v4();
        match get_task(&store, creator, "123").await {
            Err(AppError::NotFound) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }
        match delete_task(&store, creator, "not-a-uuid").await {
            Err(AppError::NotFound) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_ownership_isolation() {
        let store = Store::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let task = create_task(&store, alice, TaskInput { text: "buy milk".into() })
            .await
            .unwrap();
        let raw_id = task.id.to_string();

        for result in [
            get_task(&store, bob, &raw_id).await,
            delete_task(&store, bob, &raw_id).await,
            update_task(&store, bob, &raw_id, TaskPatch::default()).await,
        ] {
            match result {
                Err(AppError::NotFound) => {}
                other => panic!("expected NotFound for foreign caller, got {:?}", other),
            }
        }

        // Untouched for the owner.
        let fetched = get_task(&store, alice, &raw_id).await.unwrap();
        assert_eq!(fetched.text, "buy milk");
        assert!(!fetched.completed);
    }

    #[actix_rt::test]
    async fn test_update_policy_round_trip() {
        let store = Store::new();
        let creator = Uuid::new_v4();
        let task = create_task(&store, creator, TaskInput { text: "x".into() })
            .await
            .unwrap();
        let raw_id = task.id.to_string();

        let done = update_task(
            &store,
            creator,
            &raw_id,
            TaskPatch {
                text: None,
                completed: Some(true),
            },
        )
        .await
        .unwrap();
        assert!(done.completed);
        assert!(done.completed_at.is_some());

        let reopened = update_task(
            &store,
            creator,
            &raw_id,
            TaskPatch {
                text: Some("y".into()),
                completed: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(reopened.text, "y");
        assert!(!reopened.completed);
        assert!(reopened.completed_at.is_none());
    }

    #[actix_rt::test]
    async fn test_delete_returns_prior_value() {
        let store = Store::new();
        let creator = Uuid::new_v4();
        let task = create_task(&store, creator, TaskInput { text: "gone".into() })
            .await
            .unwrap();

        let deleted = delete_task(&store, creator, &task.id.to_string())
            .await
            .unwrap();
        assert_eq!(deleted.id, task.id);
        assert_eq!(deleted.text, "gone");
        assert!(list_tasks(&store, creator).await.unwrap().is_empty());
    }
}
