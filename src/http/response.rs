//! Outgoing response object.
//!
//! # Responsibilities
//! - Hold status, reason phrase, protocol version, headers and body
//! - Track whether the status is a redirect
//! - Flush the status line, headers and body to a [`Transport`]
//! - Produce and restore persistable snapshots
//!
//! # Design Decisions
//! - Mutators return `&mut Self` so handlers can chain calls
//! - The redirect flag is recomputed on every status change, never set directly
//! - Repeated header names are flushed as repeated lines (append mode)
//! - Headers are flushed at most once per response

use std::fmt;
use std::sync::Arc;

use crate::config::ResponseConfig;
use crate::error::{ResponseError, ResponseResult};
use crate::http::headers::HeaderMultimap;
use crate::http::snapshot::{ResponseSnapshot, SERIALIZABLE_FIELDS};
use crate::http::status::{self, IntoStatusCode};
use crate::http::transport::{HeaderMode, Transport};
use crate::http::version::{EnvVersionDetector, FixedVersion, VersionDetector};

/// Header carrying the redirect target.
pub const LOCATION: &str = "Location";

/// An HTTP response under construction.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status_code: u16,
    reason_phrase: Option<String>,
    version: Option<String>,
    headers: HeaderMultimap,
    content: String,
    is_redirect: bool,
    headers_sent: bool,
    content_sent: bool,
    detector: Arc<dyn VersionDetector>,
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResponse {
    /// Create an empty `200` response that detects its version from the environment.
    pub fn new() -> Self {
        Self::with_detector(Arc::new(EnvVersionDetector))
    }

    /// Create an empty `200` response using the given version detector.
    pub fn with_detector(detector: Arc<dyn VersionDetector>) -> Self {
        Self {
            status_code: 200,
            reason_phrase: None,
            version: None,
            headers: HeaderMultimap::new(),
            content: String::new(),
            is_redirect: false,
            headers_sent: false,
            content_sent: false,
            detector,
        }
    }

    /// Create a response carrying the configured defaults.
    pub fn from_config(config: &ResponseConfig) -> Self {
        let mut response = match &config.default_version {
            Some(v) => Self::with_detector(Arc::new(FixedVersion::new(v.clone()))),
            None => Self::new(),
        };
        if let Some(server) = &config.server_header {
            response.set_header("Server", server, true);
        }
        if let Some(content_type) = &config.default_content_type {
            response.set_header("Content-Type", content_type, true);
        }
        response
    }

    // --- Headers ---

    /// First value stored under `name`, if any.
    ///
    /// When a name carries several values only the first is returned; use
    /// [`get_all_headers`](Self::get_all_headers) to see every value.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.first(name)
    }

    /// Every value stored under `name`, in insertion order.
    pub fn get_all_headers(&self, name: &str) -> Vec<&str> {
        self.headers.all(name)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    pub fn headers(&self) -> &HeaderMultimap {
        &self.headers
    }

    /// Add a header line. With `replace`, existing values for `name` go first.
    pub fn set_header(
        &mut self,
        name: &str,
        value: impl fmt::Display,
        replace: bool,
    ) -> &mut Self {
        let value = value.to_string();
        if replace {
            self.clear_header(name);
        }
        self.headers.append(name, value);
        self
    }

    /// Remove every value stored under `name`. Absent names are ignored.
    pub fn clear_header(&mut self, name: &str) -> &mut Self {
        self.headers.remove(name);
        self
    }

    pub fn clear_headers(&mut self) -> &mut Self {
        self.headers.clear();
        self
    }

    // --- Body ---

    pub fn body(&self) -> &str {
        &self.content
    }

    pub fn append_body(&mut self, value: impl AsRef<str>) -> &mut Self {
        self.content.push_str(value.as_ref());
        self
    }

    pub fn set_body(&mut self, value: impl Into<String>) -> &mut Self {
        self.content = value.into();
        self
    }

    pub fn clear_body(&mut self) -> &mut Self {
        self.content.clear();
        self
    }

    // --- Status ---

    /// Set the status code, rejecting non-numeric input and anything outside 100..=599.
    pub fn set_http_response_code(&mut self, code: impl IntoStatusCode) -> ResponseResult<&mut Self> {
        let code = code.into_status_code().inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected status code");
        })?;
        self.is_redirect = status::is_redirect_code(code);
        self.status_code = code;
        Ok(self)
    }

    pub fn get_http_response_code(&self) -> u16 {
        self.status_code
    }

    /// Point the client at `url` with the given redirect status.
    ///
    /// A previous `Location` is replaced.
    pub fn set_redirect(&mut self, url: &str, code: impl IntoStatusCode) -> ResponseResult<&mut Self> {
        let code = code.into_status_code()?;
        self.set_header(LOCATION, url, true);
        self.set_http_response_code(code)
    }

    /// Set version, status and reason phrase in one call.
    ///
    /// A missing version is detected; a missing phrase keeps the phrase the
    /// response reports right now, i.e. the one for the status being replaced
    /// unless a phrase was set explicitly before.
    pub fn set_status_header(
        &mut self,
        code: impl IntoStatusCode,
        version: Option<&str>,
        phrase: Option<&str>,
    ) -> ResponseResult<&mut Self> {
        let code = code.into_status_code()?;
        let version = version.map_or_else(|| self.detector.detect(), str::to_string);
        let phrase = phrase.map_or_else(|| self.reason_phrase().to_string(), str::to_string);

        self.set_version(version);
        self.set_http_response_code(code)?;
        self.set_reason_phrase(phrase);
        Ok(self)
    }

    /// Cached redirect flag: true for codes 300..=307.
    pub fn is_redirect(&self) -> bool {
        self.is_redirect
    }

    /// Explicit reason phrase, or the conventional one for the current code.
    pub fn reason_phrase(&self) -> &str {
        match &self.reason_phrase {
            Some(phrase) => phrase,
            None => status::reason_phrase_for(self.status_code),
        }
    }

    pub fn set_reason_phrase(&mut self, phrase: impl Into<String>) -> &mut Self {
        self.reason_phrase = Some(phrase.into());
        self
    }

    /// Explicit version, or the detected one.
    pub fn version(&self) -> String {
        self.version
            .clone()
            .unwrap_or_else(|| self.detector.detect())
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = Some(version.into());
        self
    }

    pub fn is_informational(&self) -> bool {
        (100..200).contains(&self.status_code)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status_code == 403
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    // --- Rendering ---

    /// `HTTP/<version> <code> <phrase>`, without a trailing space when the phrase is empty.
    pub fn render_status_line(&self) -> String {
        format!(
            "HTTP/{} {} {}",
            self.version(),
            self.status_code,
            self.reason_phrase()
        )
        .trim_end()
        .to_string()
    }

    /// Whole response in wire form.
    pub fn render(&self) -> String {
        self.to_string()
    }

    // --- Sending ---

    pub fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    pub fn content_sent(&self) -> bool {
        self.content_sent
    }

    /// Flush the status line and every header line.
    ///
    /// Does nothing once headers went out, whether through this response or
    /// because the transport reports the platform already flushed them.
    pub fn send_headers<T>(&mut self, transport: &mut T) -> ResponseResult<&mut Self>
    where
        T: Transport + ?Sized,
    {
        if self.headers_sent || transport.headers_sent() {
            return Ok(self);
        }

        let status_line = self.render_status_line();
        transport.emit_status_line(&status_line)?;
        for line in &self.headers {
            transport.emit_header(line, HeaderMode::Append)?;
        }

        self.headers_sent = true;
        tracing::debug!(
            status = self.status_code,
            headers = self.headers.len(),
            "Response headers sent"
        );
        Ok(self)
    }

    /// Flush the body once.
    pub fn send_content<T>(&mut self, transport: &mut T) -> ResponseResult<&mut Self>
    where
        T: Transport + ?Sized,
    {
        if self.content_sent {
            return Ok(self);
        }
        transport.write_body(self.content.as_bytes())?;
        self.content_sent = true;
        Ok(self)
    }

    /// Send headers and body.
    pub fn send_response<T>(&mut self, transport: &mut T) -> ResponseResult<()>
    where
        T: Transport + ?Sized,
    {
        self.send_headers(transport)?;
        self.send_content(transport)?;
        Ok(())
    }

    // --- Persistence ---

    /// Names of the fields kept in a snapshot.
    pub fn serializable_fields() -> &'static [&'static str] {
        &SERIALIZABLE_FIELDS
    }

    pub fn snapshot(&self) -> ResponseSnapshot {
        ResponseSnapshot {
            content: self.content.clone(),
            is_redirect: self.is_redirect,
            status_code: self.status_code,
        }
    }

    /// Rebuild a response from a snapshot. Headers start empty.
    ///
    /// The redirect flag is derived from the restored status code.
    pub fn restore(snapshot: ResponseSnapshot) -> ResponseResult<Self> {
        let mut response = Self::new();
        response.set_http_response_code(snapshot.status_code)?;
        if response.is_redirect != snapshot.is_redirect {
            tracing::warn!(
                status = snapshot.status_code,
                stored = snapshot.is_redirect,
                "Snapshot redirect flag disagrees with status code"
            );
        }
        response.content = snapshot.content;
        Ok(response)
    }
}

impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\r\n", self.render_status_line())?;
        for line in &self.headers {
            write!(f, "{}\r\n", line)?;
        }
        write!(f, "\r\n{}", self.content)
    }
}

impl TryFrom<ResponseSnapshot> for HttpResponse {
    type Error = ResponseError;

    fn try_from(snapshot: ResponseSnapshot) -> Result<Self, Self::Error> {
        Self::restore(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::transport::RecordingTransport;

    fn response() -> HttpResponse {
        HttpResponse::with_detector(Arc::new(FixedVersion::new("1.1")))
    }

    #[test]
    fn test_defaults() {
        let r = response();
        assert_eq!(r.get_http_response_code(), 200);
        assert_eq!(r.reason_phrase(), "OK");
        assert_eq!(r.version(), "1.1");
        assert!(!r.is_redirect());
        assert!(!r.headers_sent());
        assert_eq!(r.body(), "");
    }

    #[test]
    fn test_invalid_code_leaves_state_untouched() {
        let mut r = response();
        r.set_http_response_code(301).unwrap();

        assert!(r.set_http_response_code(600).is_err());
        assert!(r.set_http_response_code("nope").is_err());
        assert_eq!(r.get_http_response_code(), 301);
        assert!(r.is_redirect());
    }

    #[test]
    fn test_set_header_coerces_value() {
        let mut r = response();
        r.set_header("Content-Length", 42, false);
        assert_eq!(r.get_header("content-length"), Some("42"));
    }

    #[test]
    fn test_chaining() {
        let mut r = response();
        r.set_header("X-A", "1", false)
            .set_body("hello")
            .append_body(" world")
            .clear_header("X-B");
        assert_eq!(r.body(), "hello world");
        assert_eq!(r.headers().len(), 1);
    }

    #[test]
    fn test_redirect_replaces_location() {
        let mut r = response();
        r.set_redirect("/first", 302).unwrap();
        r.set_redirect("/second", 301).unwrap();

        assert_eq!(r.get_all_headers(LOCATION), vec!["/second"]);
        assert_eq!(r.get_http_response_code(), 301);
    }

    #[test]
    fn test_invalid_redirect_code_changes_nothing() {
        let mut r = response();
        assert!(r.set_redirect("/login", 999).is_err());
        assert!(!r.has_header(LOCATION));
        assert_eq!(r.get_http_response_code(), 200);
    }

    #[test]
    fn test_status_header_explicit() {
        let mut r = response();
        r.set_status_header(404, Some("1.0"), Some("Gone Fishing")).unwrap();
        assert_eq!(r.render_status_line(), "HTTP/1.0 404 Gone Fishing");
    }

    #[test]
    fn test_status_header_keeps_current_phrase() {
        let mut r = response();
        r.set_status_header(404, None, None).unwrap();
        // The phrase associated before the call was the one for 200.
        assert_eq!(r.render_status_line(), "HTTP/1.1 404 OK");
    }

    #[test]
    fn test_status_header_rejects_before_mutating() {
        let mut r = response();
        assert!(r.set_status_header(42, Some("1.0"), Some("x")).is_err());
        assert_eq!(r.render_status_line(), "HTTP/1.1 200 OK");
    }

    #[test]
    fn test_status_line_without_phrase() {
        let mut r = response();
        r.set_http_response_code(599).unwrap();
        assert_eq!(r.render_status_line(), "HTTP/1.1 599");
    }

    #[test]
    fn test_classification() {
        let mut r = response();
        assert!(r.is_ok() && r.is_success());
        r.set_http_response_code(404).unwrap();
        assert!(r.is_not_found() && r.is_client_error());
        r.set_http_response_code(403).unwrap();
        assert!(r.is_forbidden());
        r.set_http_response_code(503).unwrap();
        assert!(r.is_server_error());
        r.set_http_response_code(101).unwrap();
        assert!(r.is_informational());
    }

    #[test]
    fn test_render() {
        let mut r = response();
        r.set_header("Set-Cookie", "a=1", false)
            .set_header("Set-Cookie", "b=2", false)
            .set_body("ok");
        assert_eq!(
            r.render(),
            "HTTP/1.1 200 OK\r\nSet-Cookie: a=1\r\nSet-Cookie: b=2\r\n\r\nok"
        );
    }

    #[test]
    fn test_platform_already_sent() {
        let mut r = response();
        let mut transport = RecordingTransport::new().with_platform_headers_sent();
        r.send_headers(&mut transport).unwrap();
        assert_eq!(transport.call_count(), 0);
        assert!(!r.headers_sent());
    }

    #[test]
    fn test_content_sent_once() {
        let mut r = response();
        r.set_body("payload");
        let mut transport = RecordingTransport::new();
        r.send_response(&mut transport).unwrap();
        r.send_response(&mut transport).unwrap();
        assert_eq!(transport.body(), b"payload".to_vec());
        assert!(r.content_sent());
    }

    #[test]
    fn test_from_config() {
        let config = ResponseConfig {
            default_version: Some("1.0".into()),
            server_header: Some("env-response".into()),
            default_content_type: Some("text/plain".into()),
        };
        let r = HttpResponse::from_config(&config);
        assert_eq!(r.version(), "1.0");
        assert_eq!(r.get_header("server"), Some("env-response"));
        assert_eq!(r.get_header("content-type"), Some("text/plain"));
    }
}
