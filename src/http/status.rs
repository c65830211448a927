//! Status code validation and reason phrases.

use axum::http::StatusCode;

use crate::error::{ResponseError, ResponseResult};

/// Lowest accepted status code.
pub const MIN_STATUS: u16 = 100;
/// Highest accepted status code.
pub const MAX_STATUS: u16 = 599;

/// Values that can be turned into a checked status code.
///
/// Integers are range-checked; strings must parse as an integer first.
pub trait IntoStatusCode {
    fn into_status_code(self) -> ResponseResult<u16>;
}

fn check_range(code: i64) -> ResponseResult<u16> {
    if code < MIN_STATUS as i64 || code > MAX_STATUS as i64 {
        return Err(ResponseError::InvalidStatusCode(code.to_string()));
    }
    Ok(code as u16)
}

impl IntoStatusCode for u16 {
    fn into_status_code(self) -> ResponseResult<u16> {
        check_range(self as i64)
    }
}

impl IntoStatusCode for u32 {
    fn into_status_code(self) -> ResponseResult<u16> {
        check_range(self as i64)
    }
}

impl IntoStatusCode for i32 {
    fn into_status_code(self) -> ResponseResult<u16> {
        check_range(self as i64)
    }
}

impl IntoStatusCode for i64 {
    fn into_status_code(self) -> ResponseResult<u16> {
        check_range(self)
    }
}

impl IntoStatusCode for StatusCode {
    fn into_status_code(self) -> ResponseResult<u16> {
        check_range(self.as_u16() as i64)
    }
}

impl IntoStatusCode for &str {
    fn into_status_code(self) -> ResponseResult<u16> {
        let code: i64 = self
            .trim()
            .parse()
            .map_err(|_| ResponseError::InvalidStatusCode(self.to_string()))?;
        check_range(code)
    }
}

impl IntoStatusCode for String {
    fn into_status_code(self) -> ResponseResult<u16> {
        self.as_str().into_status_code()
    }
}

/// Returns true for 300..=307.
pub fn is_redirect_code(code: u16) -> bool {
    (300..=307).contains(&code)
}

/// Conventional reason phrase for a code, empty when none is registered.
pub fn reason_phrase_for(code: u16) -> &'static str {
    StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        assert_eq!(100u16.into_status_code().unwrap(), 100);
        assert_eq!(599u16.into_status_code().unwrap(), 599);
        assert!(99u16.into_status_code().is_err());
        assert!(600u16.into_status_code().is_err());
        assert!((-200i32).into_status_code().is_err());
    }

    #[test]
    fn test_string_codes() {
        assert_eq!("302".into_status_code().unwrap(), 302);
        assert_eq!(" 404 ".into_status_code().unwrap(), 404);

        match "abc".into_status_code() {
            Err(ResponseError::InvalidStatusCode(raw)) => assert_eq!(raw, "abc"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!("700".into_status_code().is_err());
    }

    #[test]
    fn test_redirect_range() {
        assert!(!is_redirect_code(299));
        assert!(is_redirect_code(300));
        assert!(is_redirect_code(307));
        assert!(!is_redirect_code(308));
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(reason_phrase_for(200), "OK");
        assert_eq!(reason_phrase_for(404), "Not Found");
        assert_eq!(reason_phrase_for(599), "");
    }
}
