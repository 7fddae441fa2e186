use crate::{
    auth::AuthSession,
    error::AppError,
    models::{TaskInput, TaskPatch},
    store::Store,
    tasks,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;

/// Create a task owned by the caller.
///
/// The creator is always the authenticated identity; the payload cannot name
/// an owner.
#[post("")]
pub async fn create_task(
    store: web::Data<Store>,
    session: AuthSession,
    body: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = tasks::create_task(&store, session.user.id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// List the caller's tasks, in insertion order.
#[get("")]
pub async fn list_tasks(
    store: web::Data<Store>,
    session: AuthSession,
) -> Result<impl Responder, AppError> {
    let tasks = tasks::list_tasks(&store, session.user.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "tasks": tasks })))
}

/// Fetch one of the caller's tasks by id.
///
/// A malformed id, a missing task, and a task owned by someone else are all
/// a bare 404.
#[get("/{id}")]
pub async fn get_task(
    store: web::Data<Store>,
    session: AuthSession,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task = tasks::get_task(&store, session.user.id, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}

/// Delete one of the caller's tasks, returning the deleted value.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<Store>,
    session: AuthSession,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task = tasks::delete_task(&store, session.user.id, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}

/// Patch one of the caller's tasks.
///
/// Recognizes only `text` and `completed`; anything else in the body is
/// dropped. `completed: true` stamps `completedAt`; otherwise both completion
/// fields reset, even on a text-only patch.
#[patch("/{id}")]
pub async fn update_task(
    store: web::Data<Store>,
    session: AuthSession,
    path: web::Path<String>,
    body: web::Json<TaskPatch>,
) -> Result<impl Responder, AppError> {
    let task =
        tasks::update_task(&store, session.user.id, &path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}
