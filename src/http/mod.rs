//! HTTP response subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → response.rs (status, headers, body mutations)
//!     → send_headers / send_response
//!         → transport.rs (raw writer, recorder)
//!     → or platform.rs (axum Response)
//!     → Send to client
//!
//! persistence
//!     → snapshot.rs (body, redirect flag, status only)
//! ```

pub mod headers;
pub mod platform;
pub mod response;
pub mod server;
pub mod snapshot;
pub mod status;
pub mod transport;
pub mod version;

pub use headers::{HeaderLine, HeaderMultimap};
pub use response::HttpResponse;
pub use server::HttpServer;
pub use snapshot::ResponseSnapshot;
pub use transport::{HeaderMode, RecordingTransport, Transport, TransportCall, WriterTransport};
pub use version::{EnvVersionDetector, FixedVersion, RequestVersion, VersionDetector};
