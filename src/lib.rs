//! HTTP response object for framework request handlers.
//!
//! [`HttpResponse`] collects status, headers and body while a request is
//! handled, then flushes them to a [`Transport`](http::Transport) or hands
//! them to axum.

pub mod config;
pub mod error;
pub mod http;
pub mod observability;

pub use config::AppConfig;
pub use error::{ResponseError, ResponseResult};
pub use http::{HttpResponse, HttpServer, ResponseSnapshot};
