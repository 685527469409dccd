//! HTTP API for the todo store.
//!
//! One `SqliteStorage` is opened at startup and shared by every worker
//! through [`AppState`]. Handlers never touch the connection on the async
//! executor: each storage call runs on the blocking pool.

pub mod todo_controller;

use crate::error::{Error, Result};
use crate::storage::SqliteStorage;
use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Mutex;
use tracing::info;

/// Shared server state.
#[derive(Debug)]
pub struct AppState {
    storage: Mutex<SqliteStorage>,
}

impl AppState {
    #[must_use]
    pub fn new(storage: SqliteStorage) -> Self {
        Self {
            storage: Mutex::new(storage),
        }
    }
}

/// Run a storage operation on the blocking pool.
pub(crate) async fn with_storage<F, R>(state: &web::Data<AppState>, f: F) -> Result<R>
where
    F: FnOnce(&mut SqliteStorage) -> Result<R> + Send + 'static,
    R: Send + 'static,
{
    let state = state.clone();
    web::block(move || {
        let mut storage = state
            .storage
            .lock()
            .map_err(|_| Error::Other("storage lock poisoned".to_string()))?;
        f(&mut storage)
    })
    .await?
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// JSON extractor settings: malformed bodies become structured 400s.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| Error::InvalidBody(err.to_string()).into())
}

/// Register the API under `/api`.
///
/// Routes are declared without trailing slashes; wrap the app in
/// `NormalizePath::trim()` so `/api/todos/` and `/api/todos` both match.
pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .configure(todo_controller::config)
            .route("/health", web::get().to(health)),
    );
}

/// Serve the API until the process is interrupted.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run(storage: SqliteStorage, addr: SocketAddr, workers: Option<usize>) -> Result<()> {
    let state = web::Data::new(AppState::new(storage));

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(app_config)
    });
    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    let server = server.bind(addr)?.run();
    info!(%addr, "Todo API listening on http://{addr}/api/todos/");

    server.await?;
    info!("Todo API stopped");
    Ok(())
}
