use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use geminichat_chat::Notification;
use geminichat_types::{ChatError, Feedback};

use crate::navigation::{resolve, Navigation, Page, CHAT_PATH};
use crate::web::{pages, session::ChatSession};

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ChatSession>,
}

#[derive(Debug, Deserialize)]
pub struct PromptForm {
    #[serde(default)]
    pub prompt: String,
}

/// Create router with all routes.
///
/// Pages are served by the fallback so that path matching follows the
/// shared route table; actions are POSTs that redirect back to the chat.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/Chat", get(serve_page).post(submit))
        .route("/Chat/regenerate", post(regenerate))
        .route("/Chat/history", post(load_history))
        .route("/Chat/reset", post(reset))
        .route("/Chat/copy/:index", post(copy))
        .route("/Chat/download/:index", post(download))
        .route("/Chat/feedback/:index/:kind", post(feedback))
        .fallback(serve_page)
        .with_state(state)
}

/// GET /Chat and any unrouted path - resolve it against the route table
async fn serve_page(State(state): State<AppState>, uri: Uri) -> Response {
    match resolve(uri.path()) {
        Navigation::Redirect(target) => {
            log::debug!("Redirecting {} to {}", uri.path(), target);
            Redirect::temporary(target).into_response()
        }
        Navigation::Show(Page::Chat) => {
            let (view, flash) = state.session.view().await;
            Html(pages::chat_page(&view, flash.as_ref())).into_response()
        }
        Navigation::Show(Page::Login) => Html(pages::login_page()).into_response(),
        Navigation::Show(Page::NotFound) => {
            (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response()
        }
    }
}

fn back_to_chat() -> Redirect {
    Redirect::to(CHAT_PATH)
}

/// Rejected actions become a notice on the next chat page
async fn report(state: &AppState, result: Result<(), ChatError>) -> Redirect {
    if let Err(e) = result {
        log::info!("Chat action rejected: {}", e);
        state.session.notify(Notification::error(e.to_string())).await;
    }
    back_to_chat()
}

/// POST /Chat - ask the prompt
async fn submit(State(state): State<AppState>, Form(form): Form<PromptForm>) -> Redirect {
    let result = state.session.submit(form.prompt).await.map(|_| ());
    report(&state, result).await
}

/// POST /Chat/regenerate - ask the last query again
async fn regenerate(State(state): State<AppState>) -> Redirect {
    let result = state.session.regenerate().await.map(|_| ());
    report(&state, result).await
}

/// POST /Chat/history - replace the transcript with the saved history
async fn load_history(State(state): State<AppState>) -> Redirect {
    let result = state.session.load_history().await;
    if let Ok(count) = &result {
        log::debug!("Loaded {} saved exchanges", count);
    }
    report(&state, result.map(|_| ())).await
}

/// POST /Chat/reset - clear the conversation
async fn reset(State(state): State<AppState>) -> Redirect {
    state.session.reset().await;
    back_to_chat()
}

/// POST /Chat/copy/:index - copy an entry to the clipboard
async fn copy(State(state): State<AppState>, Path(index): Path<usize>) -> Redirect {
    match state.session.copy(index).await {
        Ok(notification) => {
            state.session.notify(notification).await;
            back_to_chat()
        }
        Err(e) => report(&state, Err(e)).await,
    }
}

/// POST /Chat/download/:index
async fn download(State(state): State<AppState>, Path(index): Path<usize>) -> Redirect {
    let result = state.session.download(index).await;
    report(&state, result).await
}

/// POST /Chat/feedback/:index/:kind - mark an entry up or down
async fn feedback(
    State(state): State<AppState>,
    Path((index, kind)): Path<(usize, String)>,
) -> Result<Redirect, AppError> {
    let feedback = Feedback::from_str(&kind)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown feedback '{}'", kind)))?;
    let result = state.session.feedback(index, feedback).await.map(|_| ());
    Ok(report(&state, result).await)
}

/// Error type for handlers
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, message).into_response()
    }
}
