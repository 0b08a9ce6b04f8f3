use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::web::{routes, session::ChatSession};

/// Web server configuration
pub struct WebServerConfig {
    pub bind_addr: SocketAddr,
    pub web_dir: Option<PathBuf>,
}

/// Web server instance
pub struct WebServer {
    config: WebServerConfig,
    session: Arc<ChatSession>,
}

impl WebServer {
    pub fn new(config: WebServerConfig, session: ChatSession) -> Self {
        Self {
            config,
            session: Arc::new(session),
        }
    }

    /// Router with the static asset directory mounted when configured
    pub fn router(&self) -> axum::Router {
        let mut app = routes::create_router(routes::AppState {
            session: Arc::clone(&self.session),
        });

        if let Some(web_dir) = &self.config.web_dir {
            if web_dir.exists() {
                log::info!("Serving static files from: {}", web_dir.display());
                app = app.nest_service("/static", ServeDir::new(web_dir));
            } else {
                log::warn!("Static directory {} does not exist", web_dir.display());
            }
        }

        app
    }

    /// Start the web server
    pub async fn start(self) -> Result<()> {
        let app = self.router();

        println!("🌐 Web server starting on http://{}/Chat", self.config.bind_addr);
        println!("   Model: {}", self.session.model_name());

        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    pub fn session(&self) -> Arc<ChatSession> {
        Arc::clone(&self.session)
    }
}
