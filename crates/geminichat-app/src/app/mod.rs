pub mod repl;
pub mod transcript;
pub mod web_server;

pub use repl::run_repl_mode;
pub use web_server::run_web_server;
