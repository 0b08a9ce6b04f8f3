// Web frontend module
pub mod pages;
pub mod routes;
pub mod server;
pub mod session;

pub use routes::{create_router, AppState};
pub use server::{WebServer, WebServerConfig};
pub use session::ChatSession;
