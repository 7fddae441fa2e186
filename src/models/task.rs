use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The task text. Must be non-empty.
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

/// Patch payload for updating a task.
///
/// Exactly two fields are recognized; any other field in the request body is
/// dropped at deserialization rather than picked out of an arbitrary payload.
/// `completed` is read leniently: only a literal `true` marks completion, and
/// any other present value reads as false rather than failing the request.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TaskPatch {
    pub text: Option<String>,
    #[serde(default, deserialize_with = "completed_flag")]
    pub completed: Option<bool>,
}

fn completed_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(Some(matches!(value, serde_json::Value::Bool(true))))
}

/// A task record, owned by exactly one user.
///
/// Serializes camelCase (`completedAt`, `creatorId`) to match the wire
/// format the API has always exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    /// Milliseconds since epoch; set if and only if `completed` is true.
    pub completed_at: Option<i64>,
    /// The owning user. Set once at creation, never reassigned.
    pub creator_id: Uuid,
}

impl Task {
    pub fn new(text: String, creator_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
            completed_at: None,
            creator_id,
        }
    }

    /// Applies a patch under the reference update policy: `completed: true`
    /// stamps `completed_at` with the current time; every other case (absent
    /// or false) resets both fields, even when only `text` was supplied.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if patch.completed == Some(true) {
            self.completed = true;
            self.completed_at = Some(Utc::now().timestamp_millis());
        } else {
            self.completed = false;
            self.completed_at = None;
        }
    }
}
