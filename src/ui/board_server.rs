use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::http::StatusCode;
use warp::Filter;
use serde_json::json;
use crate::config::constants::{
    DEFAULT_SERVER_PORT_RANGE_END, MAX_REQUEST_BODY_BYTES, MAX_SESSION_ID_LENGTH,
    SERVER_SHUTDOWN_GRACE_PERIOD_MS, SESSION_CLEANUP_POLL_INTERVAL_SECS, sleep_duration_millis,
};
use crate::errors::{SpecBoardError, SpecBoardResult};
use crate::structs::board_snapshot::BoardSnapshot;
use crate::structs::compare_request::CompareRequest;
use crate::structs::select_request::SelectRequest;
use crate::ui::session_manager::SessionManager;

/// Local web surface for the board: one page plus a small JSON API that
/// drives per-browser `BoardSession`s.
pub struct BoardServer {
    session_manager: Arc<SessionManager>,
    port: Option<u16>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    cleanup_task: Option<JoinHandle<()>>,
}

impl BoardServer {
    pub fn new(session_manager: SessionManager) -> Self {
        Self {
            session_manager: Arc::new(session_manager),
            port: None,
            shutdown_tx: None,
            cleanup_task: None,
        }
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub async fn start(&mut self, preferred_port: u16) -> SpecBoardResult<u16> {
        let port = find_available_port(preferred_port).await?;
        self.port = Some(port);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let routes = routes(Arc::clone(&self.session_manager))
            .with(warp::cors()
                .allow_origin("http://127.0.0.1")
                .allow_origin("http://localhost")
                .allow_headers(vec!["content-type"])
                .allow_methods(vec!["GET", "POST"]));

        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        let (_, server) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(addr, async {
                shutdown_rx.await.ok();
            })
            .map_err(|e| SpecBoardError::system_error("bind board server", &e.to_string()))?;

        tokio::spawn(server);
        self.cleanup_task = Some(self.spawn_cleanup());

        log::info!("🌐 Board server started on port {}", port);
        Ok(port)
    }

    fn spawn_cleanup(&self) -> JoinHandle<()> {
        let session_manager = Arc::clone(&self.session_manager);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(SESSION_CLEANUP_POLL_INTERVAL_SECS));
            loop {
                interval.tick().await;
                session_manager.cleanup_expired_sessions(Instant::now());
            }
        })
    }

    pub async fn shutdown(&mut self) -> SpecBoardResult<()> {
        log::info!("🛑 Shutting down board server...");

        if let Some(cleanup_task) = self.cleanup_task.take() {
            cleanup_task.abort();
        }
        self.session_manager.clear();

        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            shutdown_tx.send(()).map_err(|_|
                SpecBoardError::system_error("shutdown", "Failed to send shutdown signal")
            )?;
        }

        tokio::time::sleep(sleep_duration_millis(SERVER_SHUTDOWN_GRACE_PERIOD_MS)).await;
        log::info!("✅ Board server shutdown complete");

        Ok(())
    }
}

/// Page and API filters, without CORS or binding.
pub fn routes(
    session_manager: Arc<SessionManager>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let session_manager_filter = warp::any().map(move || Arc::clone(&session_manager));

    let page = warp::path::end()
        .and(warp::get())
        .and_then(serve_board_page);

    let create_session = warp::path!("api" / "session")
        .and(warp::post())
        .and(session_manager_filter.clone())
        .and_then(create_session_handler);

    let get_board = warp::path!("api" / "session" / String / "board")
        .and(warp::get())
        .and(session_manager_filter.clone())
        .and_then(get_board_handler);

    let compare = warp::path!("api" / "session" / String / "compare")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_REQUEST_BODY_BYTES))
        .and(warp::body::json())
        .and(session_manager_filter.clone())
        .and_then(compare_handler);

    let select = warp::path!("api" / "session" / String / "select")
        .and(warp::post())
        .and(warp::body::json())
        .and(session_manager_filter.clone())
        .and_then(select_handler);

    let close_overlay = warp::path!("api" / "session" / String / "overlay" / "close")
        .and(warp::post())
        .and(session_manager_filter.clone())
        .and_then(close_overlay_handler);

    let backdrop = warp::path!("api" / "session" / String / "overlay" / "backdrop")
        .and(warp::post())
        .and(session_manager_filter)
        .and_then(backdrop_handler);

    page
        .or(create_session)
        .or(get_board)
        .or(compare)
        .or(select)
        .or(close_overlay)
        .or(backdrop)
}

async fn find_available_port(preferred_port: u16) -> SpecBoardResult<u16> {
    let last = DEFAULT_SERVER_PORT_RANGE_END.max(preferred_port);
    for port in preferred_port..=last {
        if let Ok(listener) = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await {
            drop(listener);
            return Ok(port);
        }
    }
    Err(SpecBoardError::system_error(
        "find available port",
        &format!("No free port between {} and {}", preferred_port, last),
    ))
}

async fn serve_board_page() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::html(include_str!("static/index.html")))
}

pub fn sanitize_session_id(session_id: &str) -> String {
    session_id.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(MAX_SESSION_ID_LENGTH)
        .collect()
}

fn status_for(error: &SpecBoardError) -> StatusCode {
    match error {
        SpecBoardError::SessionNotFound { .. } => StatusCode::NOT_FOUND,
        SpecBoardError::InvalidSelection { .. } | SpecBoardError::PreconditionError { .. } => StatusCode::BAD_REQUEST,
        SpecBoardError::RequestInFlight { .. } => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn board_reply(result: SpecBoardResult<BoardSnapshot>) -> warp::reply::WithStatus<warp::reply::Json> {
    match result {
        Ok(snapshot) => warp::reply::with_status(warp::reply::json(&snapshot), StatusCode::OK),
        Err(e) => {
            log::warn!("⚠️ Board request rejected: {}", e);
            warp::reply::with_status(
                warp::reply::json(&json!({ "error": e.user_message() })),
                status_for(&e),
            )
        }
    }
}

fn invalid_session_reply() -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&json!({ "error": "Invalid session ID" })),
        StatusCode::BAD_REQUEST,
    )
}

async fn create_session_handler(session_manager: Arc<SessionManager>) -> Result<impl warp::Reply, Infallible> {
    let session_id = session_manager.create_session();
    Ok(warp::reply::with_status(
        warp::reply::json(&json!({ "session_id": session_id })),
        StatusCode::CREATED,
    ))
}

async fn get_board_handler(session_id: String, session_manager: Arc<SessionManager>) -> Result<impl warp::Reply, Infallible> {
    let session_id = sanitize_session_id(&session_id);
    if session_id.is_empty() {
        return Ok(invalid_session_reply());
    }
    Ok(board_reply(session_manager.board(&session_id)))
}

async fn compare_handler(
    session_id: String,
    body: CompareRequest,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, Infallible> {
    let session_id = sanitize_session_id(&session_id);
    if session_id.is_empty() {
        return Ok(invalid_session_reply());
    }
    Ok(board_reply(session_manager.submit(&session_id, &body.old_spec, &body.new_spec)))
}

async fn select_handler(
    session_id: String,
    body: SelectRequest,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, Infallible> {
    let session_id = sanitize_session_id(&session_id);
    if session_id.is_empty() {
        return Ok(invalid_session_reply());
    }
    Ok(board_reply(session_manager.select(&session_id, body.row)))
}

async fn close_overlay_handler(session_id: String, session_manager: Arc<SessionManager>) -> Result<impl warp::Reply, Infallible> {
    let session_id = sanitize_session_id(&session_id);
    if session_id.is_empty() {
        return Ok(invalid_session_reply());
    }
    Ok(board_reply(session_manager.close_overlay(&session_id)))
}

async fn backdrop_handler(session_id: String, session_manager: Arc<SessionManager>) -> Result<impl warp::Reply, Infallible> {
    let session_id = sanitize_session_id(&session_id);
    if session_id.is_empty() {
        return Ok(invalid_session_reply());
    }
    Ok(board_reply(session_manager.backdrop_click(&session_id)))
}
