//! HTTP API: the chat endpoint and the browser chat page.

pub mod routes;
pub mod types;
pub mod ui;

pub use routes::serve;
