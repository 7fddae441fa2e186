//!
//! # In-Memory Backing Store
//!
//! Process-local store for users and tasks. Each table sits behind its own
//! `tokio::sync::RwLock`, which gives every operation single-record atomicity:
//! a read-modify-write on one record happens entirely under the write lock.
//! No cross-record transactions exist.
//!
//! Users carry a unique email index so duplicate signups are rejected
//! atomically. Tasks carry a secondary index keyed by creator, kept in
//! insertion order, so listing and ownership checks never scan the whole
//! table. All task accessors are scoped by `(creator_id, task_id)`: a task
//! owned by someone else is indistinguishable from a missing one.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{SessionToken, Task, TaskPatch, User};

#[derive(Default)]
struct UserTable {
    by_id: HashMap<Uuid, User>,
    by_email: HashMap<String, Uuid>,
}

#[derive(Default)]
struct TaskTable {
    by_id: HashMap<Uuid, Task>,
    /// Task ids per creator, in insertion order.
    by_creator: HashMap<Uuid, Vec<Uuid>>,
}

#[derive(Default)]
pub struct Store {
    users: RwLock<UserTable>,
    tasks: RwLock<TaskTable>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new user. Returns `false` without writing if the email is
    /// already taken; the check and the insert happen under one write lock.
    pub async fn create_user(&self, user: User) -> bool {
        let mut table = self.users.write().await;
        if table.by_email.contains_key(&user.email) {
            return false;
        }
        table.by_email.insert(user.email.clone(), user.id);
        table.by_id.insert(user.id, user);
        true
    }

    pub async fn user_by_email(&self, email: &str) -> Option<User> {
        let table = self.users.read().await;
        let id = table.by_email.get(email)?;
        table.by_id.get(id).cloned()
    }

    pub async fn user_by_id(&self, id: Uuid) -> Option<User> {
        self.users.read().await.by_id.get(&id).cloned()
    }

    /// Appends a session token entry to the user's list. Concurrent appends
    /// for the same user serialize on the write lock; none is lost. Returns
    /// `false` if the user does not exist.
    pub async fn append_token(&self, user_id: Uuid, entry: SessionToken) -> bool {
        let mut table = self.users.write().await;
        match table.by_id.get_mut(&user_id) {
            Some(user) => {
                user.tokens.push(entry);
                true
            }
            None => false,
        }
    }

    /// Removes the matching token entry if present. Idempotent: removing an
    /// absent entry is not an error.
    pub async fn remove_token(&self, user_id: Uuid, token: &str) {
        let mut table = self.users.write().await;
        if let Some(user) = table.by_id.get_mut(&user_id) {
            user.tokens.retain(|entry| entry.token != token);
        }
    }

    pub async fn insert_task(&self, task: Task) {
        let mut table = self.tasks.write().await;
        table
            .by_creator
            .entry(task.creator_id)
            .or_default()
            .push(task.id);
        table.by_id.insert(task.id, task);
    }

    /// All tasks belonging to `creator_id`, in insertion order.
    pub async fn tasks_by_creator(&self, creator_id: Uuid) -> Vec<Task> {
        let table = self.tasks.read().await;
        table
            .by_creator
            .get(&creator_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| table.by_id.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub async fn task_scoped(&self, creator_id: Uuid, id: Uuid) -> Option<Task> {
        let table = self.tasks.read().await;
        table
            .by_id
            .get(&id)
            .filter(|task| task.creator_id == creator_id)
            .cloned()
    }

    /// Removes the task and returns its prior value, but only when owned by
    /// `creator_id`.
    pub async fn remove_task_scoped(&self, creator_id: Uuid, id: Uuid) -> Option<Task> {
        let mut table = self.tasks.write().await;
        if table.by_id.get(&id)?.creator_id != creator_id {
            return None;
        }
        let task = table.by_id.remove(&id)?;
        if let Some(ids) = table.by_creator.get_mut(&creator_id) {
            ids.retain(|task_id| *task_id != id);
        }
        Some(task)
    }

    /// Applies a patch to the task in place under the write lock and returns
    /// the updated value, subject to the same ownership scoping.
    pub async fn patch_task_scoped(
        &self,
        creator_id: Uuid,
        id: Uuid,
        patch: &TaskPatch,
    ) -> Option<Task> {
        let mut table = self.tasks.write().await;
        let task = table
            .by_id
            .get_mut(&id)
            .filter(|task| task.creator_id == creator_id)?;
        task.apply_patch(patch);
        Some(task.clone())
    }
}
