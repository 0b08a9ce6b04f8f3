use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tokio::sync::Notify;
use tower::ServiceExt;

use geminichat::chat::{
    Clipboard, ConversationController, FileStore, HistoryStore, KeyValueStore, MemoryStore,
};
use geminichat::llm_api::ModelClient;
use geminichat::types::{ClipboardError, GenerationError, PersistenceError};
use geminichat::web::{ChatSession, WebServer, WebServerConfig};

/// Answers once released, so tests can look at the pending page
struct GatedClient {
    answer: Result<String, ()>,
    release: Notify,
}

impl GatedClient {
    fn answering(answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(answer.to_string()),
            release: Notify::new(),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            answer: Err(()),
            release: Notify::new(),
        })
    }

    fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ModelClient for GatedClient {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.release.notified().await;
        self.answer
            .clone()
            .map_err(|_| GenerationError::Transport("connection refused".to_string()))
    }

    fn model_name(&self) -> &str {
        "gated"
    }
}

#[derive(Default)]
struct RecordingClipboard {
    written: Mutex<Vec<String>>,
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Clipboard whose writes hang until released
#[derive(Default)]
struct StuckClipboard {
    release: Notify,
}

#[async_trait]
impl Clipboard for StuckClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        self.release.notified().await;
        Ok(())
    }
}

/// Store that refuses every write
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only store").into())
    }
}

struct Harness {
    app: Router,
    session: Arc<ChatSession>,
    client: Arc<GatedClient>,
    clipboard: Arc<RecordingClipboard>,
}

fn serve(session: ChatSession) -> (Router, Arc<ChatSession>) {
    let bind_addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let server = WebServer::new(
        WebServerConfig {
            bind_addr,
            web_dir: None,
        },
        session,
    );
    (server.router(), server.session())
}

fn harness_with(controller: ConversationController, client: Arc<GatedClient>) -> Harness {
    let clipboard = Arc::new(RecordingClipboard::default());
    let (app, session) = serve(ChatSession::new(controller, client.clone(), clipboard.clone()));
    Harness {
        app,
        session,
        client,
        clipboard,
    }
}

fn harness(client: Arc<GatedClient>) -> Harness {
    harness_with(
        ConversationController::with_history(HistoryStore::new(MemoryStore::new())),
        client,
    )
}

async fn get(app: &Router, path: &str) -> Response {
    app.clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post(app: &Router, path: &str, form: &str) -> Response {
    app.clone()
        .oneshot(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn chat_html(app: &Router) -> String {
    let response = get(app, "/Chat").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await
}

/// Poll the chat page until no request is pending
async fn settled_html(app: &Router) -> String {
    for _ in 0..100 {
        let html = chat_html(app).await;
        if !html.contains("http-equiv=\"refresh\"") {
            return html;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("request never settled");
}

#[tokio::test]
async fn test_root_redirects_to_chat() {
    let h = harness(GatedClient::answering("unused"));

    let response = get(&h.app, "/").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/Chat");
}

#[tokio::test]
async fn test_unknown_path_redirects_to_404() {
    let h = harness(GatedClient::answering("unused"));

    let response = get(&h.app, "/settings").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/404");

    let response = get(&h.app, "/404").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found"));
}

#[tokio::test]
async fn test_routes_ignore_case_and_trailing_slash() {
    let h = harness(GatedClient::answering("unused"));

    let response = get(&h.app, "/login/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Sign-in is not available"));

    let response = get(&h.app, "/chat").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Hi. Ask me anything you want."));
}

#[tokio::test]
async fn test_submit_shows_pending_then_answer() {
    let h = harness(GatedClient::answering("Rust is\na language"));

    let response = post(&h.app, "/Chat", "prompt=What+is+Rust%3F").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/Chat");

    let pending = chat_html(&h.app).await;
    assert!(pending.contains("http-equiv=\"refresh\""));
    assert!(pending.contains("What is Rust?"));
    assert!(pending.contains("class=\"thinking\">Thinking..."));

    // a second submit while pending is refused
    post(&h.app, "/Chat", "prompt=again").await;
    assert!(chat_html(&h.app).await.contains("a request is already in progress"));

    h.client.release();
    let html = settled_html(&h.app).await;
    assert!(html.contains("<p>Rust is</p><p>a language</p>"));
    assert!(html.contains("action=\"/Chat/regenerate\""));
}

#[tokio::test]
async fn test_failed_request_shows_error_message() {
    let h = harness(GatedClient::failing());

    let handle = h.session.submit("hello".to_string()).await.unwrap();
    h.client.release();
    handle.await.unwrap();

    let html = chat_html(&h.app).await;
    assert!(html.contains("Something went wrong. Please try again."));
    assert!(html.contains("hello"));
}

#[tokio::test]
async fn test_empty_prompt_is_rejected() {
    let h = harness(GatedClient::answering("unused"));

    let response = post(&h.app, "/Chat", "prompt=").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html = chat_html(&h.app).await;
    assert!(html.contains("prompt is empty"));
    assert!(!html.contains("http-equiv=\"refresh\""));
}

#[tokio::test]
async fn test_copy_download_and_feedback() {
    let h = harness(GatedClient::answering("forty-two"));
    let handle = h.session.submit("answer?".to_string()).await.unwrap();
    h.client.release();
    handle.await.unwrap();

    let response = post(&h.app, "/Chat/copy/0", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(chat_html(&h.app).await.contains("Copied to clipboard!"));
    assert_eq!(
        h.clipboard.written.lock().unwrap().clone(),
        vec!["Query: answer?\nResponse: forty-two".to_string()]
    );

    post(&h.app, "/Chat/download/0", "").await;
    assert!(chat_html(&h.app).await.contains("download is not implemented"));

    post(&h.app, "/Chat/feedback/0/up", "").await;
    assert!(chat_html(&h.app).await.contains("class=\"marked\">👍"));

    let response = post(&h.app, "/Chat/feedback/0/meh", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    post(&h.app, "/Chat/copy/7", "").await;
    assert!(chat_html(&h.app).await.contains("no transcript entry at index 7"));
}

#[tokio::test]
async fn test_notice_is_shown_once() {
    let h = harness(GatedClient::answering("unused"));

    post(&h.app, "/Chat/regenerate", "").await;
    assert!(chat_html(&h.app).await.contains("there is no previous query to regenerate"));
    assert!(!chat_html(&h.app).await.contains("there is no previous query to regenerate"));
}

#[tokio::test]
async fn test_history_survives_reset_and_reloads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_storage.json");
    let controller = ConversationController::with_history(HistoryStore::new(FileStore::new(&path)));
    let h = harness_with(controller, GatedClient::answering("saved answer"));

    let handle = h.session.submit("saved question".to_string()).await.unwrap();
    h.client.release();
    handle.await.unwrap();

    let stored = std::fs::read_to_string(&path).unwrap();
    assert!(stored.contains("chatHistory"));
    assert!(stored.contains("saved question"));

    post(&h.app, "/Chat/reset", "").await;
    assert!(!chat_html(&h.app).await.contains("saved answer"));

    post(&h.app, "/Chat/history", "").await;
    assert!(chat_html(&h.app).await.contains("saved answer"));
}

#[tokio::test]
async fn test_single_turn_has_no_history() {
    let h = harness_with(
        ConversationController::single_turn(),
        GatedClient::answering("only one"),
    );

    post(&h.app, "/Chat/history", "").await;
    assert!(chat_html(&h.app).await.contains("load history is not implemented"));
}

#[tokio::test]
async fn test_store_write_failure_is_shown_as_notice() {
    let controller = ConversationController::with_history(HistoryStore::new(ReadOnlyStore));
    let h = harness_with(controller, GatedClient::answering("not saved"));

    let handle = h.session.submit("save this".to_string()).await.unwrap();
    h.client.release();
    handle.await.unwrap();

    let html = chat_html(&h.app).await;
    assert!(html.contains("notice error"));
    assert!(html.contains("storage I/O failed"));
    // the answer is still shown
    assert!(html.contains("<p>not saved</p>"));
    assert!(!html.contains("http-equiv=\"refresh\""));
}

#[tokio::test]
async fn test_pages_render_while_copy_is_stuck() {
    let client = GatedClient::answering("copied later");
    let clipboard = Arc::new(StuckClipboard::default());
    let controller = ConversationController::with_history(HistoryStore::new(MemoryStore::new()));
    let (app, session) = serve(ChatSession::new(controller, client.clone(), clipboard.clone()));

    let handle = session.submit("copy me".to_string()).await.unwrap();
    client.release();
    handle.await.unwrap();

    let copy_app = app.clone();
    let copying = tokio::spawn(async move { post(&copy_app, "/Chat/copy/0", "").await });
    tokio::task::yield_now().await;

    let html = tokio::time::timeout(Duration::from_secs(5), chat_html(&app))
        .await
        .expect("chat page blocked by clipboard write");
    assert!(html.contains("copied later"));

    clipboard.release.notify_one();
    let response = copying.await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(chat_html(&app).await.contains("Copied to clipboard!"));
}

#[tokio::test]
async fn test_no_cross_origin_access() {
    let h = harness(GatedClient::answering("unused"));

    let response = h
        .app
        .clone()
        .oneshot(
            Request::post("/Chat/reset")
                .header(header::ORIGIN, "http://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
