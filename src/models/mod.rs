pub mod task;
pub mod user;

pub use task::{Task, TaskInput, TaskPatch};
pub use user::{PublicUser, SessionToken, User};
