//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! response mutations and sends
//!     → tracing events (status, header counts, rejected codes)
//!     → logging.rs (subscriber, filter)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted messages
//! - Library code only emits events; binaries install the subscriber

pub mod logging;

pub use logging::init_logging;
