//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the board handlers
//! - Wire up middleware (request ID, tracing, metrics, limits, security headers)
//! - Bind server to listener
//! - Run the session sweeper alongside the server
//! - Stop gracefully on the shutdown signal

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::FormRejection, State},
    http::{HeaderMap, Request},
    middleware,
    response::Response,
    routing::get,
    Form, Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::board::{render_page, Board, Submission};
use crate::config::BoardConfig;
use crate::http::request::{request_span, MakeUuidRequestId};
use crate::http::response::{board_page, redirect_to_board, with_session_cookie};
use crate::lifecycle::Shutdown;
use crate::observability::{metrics, OPLOG_TARGET};
use crate::security::{headers::with_security_headers, limits::with_request_limits};
use crate::session::{run_sweeper, unix_now, SessionStore};
use crate::store::PostStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub board: Board,
    pub sessions: Arc<SessionStore>,
    pub heartbeat: bool,
}

/// HTTP server for the board.
pub struct HttpServer {
    router: Router,
    config: BoardConfig,
    sessions: Arc<SessionStore>,
}

impl HttpServer {
    /// Create a new HTTP server over `store`.
    pub fn new(config: BoardConfig, store: Arc<dyn PostStore>) -> Self {
        let sessions = Arc::new(SessionStore::new(config.session.clone()));

        let state = AppState {
            board: Board::new(config.board.clone(), store),
            sessions: sessions.clone(),
            heartbeat: config.observability.heartbeat,
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            sessions,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &BoardConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/", get(show_board).post(submit_post))
            .with_state(state)
            .layer(middleware::from_fn(metrics::track_requests));

        let router = with_request_limits(router, config);
        let router = if config.security.enable_headers {
            with_security_headers(router)
        } else {
            router
        };

        router
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                request_span(request)
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeUuidRequestId))
    }

    /// The fully layered router, for driving the app without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            title = %self.config.board.title,
            "HTTP server starting"
        );

        let sweeper = tokio::spawn(run_sweeper(self.sessions.clone(), shutdown.subscribe()));

        let mut stop = shutdown.subscribe();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = stop.recv().await;
            })
            .await?;

        shutdown.trigger();
        let _ = sweeper.await;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// GET /: render the board for this session.
async fn show_board(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.sessions.resolve(&headers, unix_now());
    let csrf_token = session.handle.lock().await.csrf_token.clone();

    if state.heartbeat {
        tracing::info!(target: OPLOG_TARGET, "Page loaded");
    }

    let board = state.board.clone();
    let token = csrf_token.clone();
    let html = match tokio::task::spawn_blocking(move || board.render(&token)).await {
        Ok(html) => html,
        Err(e) => {
            tracing::error!(error = %e, "Render task failed");
            render_page(state.board.settings(), &csrf_token, &[])
        }
    };

    with_session_cookie(board_page(html), session.set_cookie)
}

/// POST /: validate and store a submission, then redirect back.
///
/// The response is the same redirect whatever the outcome.
async fn submit_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<Submission>, FormRejection>,
) -> Response {
    let now = unix_now();
    let session = state.sessions.resolve(&headers, now);

    let submission = match form {
        Ok(Form(submission)) => submission,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable form body");
            Submission::default()
        }
    };

    // Held until the append finishes: one request at a time per session.
    let mut guard = session.handle.clone().lock_owned().await;
    let board = state.board.clone();
    let result =
        tokio::task::spawn_blocking(move || board.submit(&mut guard, submission, now)).await;
    if let Err(e) = result {
        tracing::error!(error = %e, "Submit task failed");
    }

    with_session_cookie(redirect_to_board(), session.set_cookie)
}
