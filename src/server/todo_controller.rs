//! Todo resource handlers.
//!
//! `GET/POST /todos`, `GET/PUT/PATCH/DELETE /todos/{id}`. Each handler
//! validates its input explicitly, calls one storage operation and maps
//! the result to a response.

use crate::error::{Error, Result};
use crate::model::TodoOutput;
use crate::server::{AppState, with_storage};
use crate::validate;
use actix_web::{HttpResponse, web};
use serde_json::Value;
use tracing::{debug, info};

/// Configure todo routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/todos")
            .route(web::get().to(list_todos))
            .route(web::post().to(create_todo)),
    )
    .service(
        web::resource("/todos/{id}")
            .route(web::get().to(get_todo))
            .route(web::put().to(replace_todo))
            .route(web::patch().to(patch_todo))
            .route(web::delete().to(delete_todo)),
    );
}

/// Parse a path id. Anything that is not an integer cannot name a todo.
fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| Error::TodoNotFound { id: raw.to_string() })
}

/// GET /todos - List all todos, newest first
async fn list_todos(state: web::Data<AppState>) -> Result<HttpResponse> {
    let todos = with_storage(&state, |storage| storage.list_todos()).await?;
    debug!(count = todos.len(), "Listed todos");

    let body: Vec<TodoOutput> = todos.into_iter().map(TodoOutput::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /todos - Create a todo
async fn create_todo(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse> {
    let new = validate::validate_create(&body)?;
    let todo = with_storage(&state, move |storage| storage.create_todo(&new)).await?;
    info!(id = todo.id, "Created todo");

    Ok(HttpResponse::Created().json(TodoOutput::from(todo)))
}

/// GET /todos/{id} - Retrieve one todo
async fn get_todo(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    let todo = with_storage(&state, move |storage| storage.get_todo(id))
        .await?
        .ok_or_else(|| Error::not_found(id))?;

    Ok(HttpResponse::Ok().json(TodoOutput::from(todo)))
}

/// PUT /todos/{id} - Full update (title required)
async fn replace_todo(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    update(state, &path, body, false).await
}

/// PATCH /todos/{id} - Partial update
async fn patch_todo(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    update(state, &path, body, true).await
}

/// Look the todo up before reading the body, so an unknown id is a 404
/// whatever the payload holds.
async fn update(
    state: web::Data<AppState>,
    raw_id: &str,
    body: web::Bytes,
    partial: bool,
) -> Result<HttpResponse> {
    let id = parse_id(raw_id)?;
    let todo = with_storage(&state, move |storage| {
        if storage.get_todo(id)?.is_none() {
            return Err(Error::not_found(id));
        }
        let body = parse_body(&body)?;
        let changes = validate::validate_update(&body, partial)?;
        storage.update_todo(id, &changes)
    })
    .await?;
    info!(id, partial, "Updated todo");

    Ok(HttpResponse::Ok().json(TodoOutput::from(todo)))
}

/// Decode a raw JSON body.
fn parse_body(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(|e| Error::InvalidBody(e.to_string()))
}

/// DELETE /todos/{id} - Delete a todo
async fn delete_todo(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path)?;
    with_storage(&state, move |storage| storage.delete_todo(id)).await?;
    info!(id, "Deleted todo");

    Ok(HttpResponse::NoContent().finish())
}
