use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use geminichat_chat::{
    render, ChatView, Clipboard, ConversationController, Notification, PendingRequest,
};
use geminichat_llm_api::ModelClient;
use geminichat_types::{ChatError, Feedback};

/// The one conversation served by the web front end.
///
/// Generation runs on a spawned task so pages can be rendered while a
/// request is pending; the controller lock is never held across the model call.
pub struct ChatSession {
    controller: Mutex<ConversationController>,
    client: Arc<dyn ModelClient>,
    clipboard: Arc<dyn Clipboard>,
    flash: Mutex<Option<Notification>>,
}

impl ChatSession {
    pub fn new(
        controller: ConversationController,
        client: Arc<dyn ModelClient>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            controller: Mutex::new(controller),
            client,
            clipboard,
            flash: Mutex::new(None),
        }
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Current view plus the notification to show once
    pub async fn view(&self) -> (ChatView, Option<Notification>) {
        let view = render(&*self.controller.lock().await);
        let flash = self.flash.lock().await.take();
        (view, flash)
    }

    pub async fn notify(&self, notification: Notification) {
        *self.flash.lock().await = Some(notification);
    }

    /// Start a request for `prompt`. The returned handle finishes once the
    /// result has been applied.
    pub async fn submit(self: &Arc<Self>, prompt: String) -> Result<JoinHandle<()>, ChatError> {
        let request = {
            let mut chat = self.controller.lock().await;
            chat.set_input(prompt)?;
            chat.begin_submit()?
        };
        Ok(self.spawn_generation(request))
    }

    pub async fn regenerate(self: &Arc<Self>) -> Result<JoinHandle<()>, ChatError> {
        let request = self.controller.lock().await.begin_regenerate()?;
        Ok(self.spawn_generation(request))
    }

    fn spawn_generation(self: &Arc<Self>, request: PendingRequest) -> JoinHandle<()> {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            let result = session.client.generate(request.prompt()).await;
            let completed = session.controller.lock().await.complete(request, result);
            if let Err(e) = completed {
                session.notify(Notification::error(e.to_string())).await;
            }
        })
    }

    pub async fn load_history(&self) -> Result<usize, ChatError> {
        self.controller.lock().await.load_history()
    }

    pub async fn reset(&self) {
        self.controller.lock().await.reset();
    }

    /// The controller is only locked while the text is built
    pub async fn copy(&self, index: usize) -> Result<Notification, ChatError> {
        let text = self.controller.lock().await.copy_text(index)?;
        Ok(ConversationController::write_clipboard(&text, self.clipboard.as_ref()).await)
    }

    pub async fn download(&self, index: usize) -> Result<(), ChatError> {
        self.controller.lock().await.download(index)
    }

    pub async fn feedback(
        &self,
        index: usize,
        feedback: Feedback,
    ) -> Result<Option<Feedback>, ChatError> {
        self.controller.lock().await.feedback(index, feedback)
    }
}
