//! Handing a response to the axum/hyper stack.
//!
//! Repeated header names are appended to the outgoing `HeaderMap`, so every
//! stored line reaches the client. The connection decides the protocol
//! version; a custom reason phrase is not carried over.

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::{ResponseError, ResponseResult};
use crate::http::response::HttpResponse;

impl HttpResponse {
    /// Build the platform response for this object.
    pub fn to_http_response(&self) -> ResponseResult<Response<Body>> {
        let code = self.get_http_response_code();
        let status = StatusCode::from_u16(code)
            .map_err(|_| ResponseError::InvalidStatusCode(code.to_string()))?;

        let mut response = Response::new(Body::from(self.body().to_owned()));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        for line in self.headers() {
            let invalid = || ResponseError::InvalidHeader {
                name: line.name().to_string(),
            };
            let name = HeaderName::from_bytes(line.name().as_bytes()).map_err(|_| invalid())?;
            let value = HeaderValue::from_str(line.value()).map_err(|_| invalid())?;
            headers.append(name, value);
        }

        Ok(response)
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        match self.to_http_response() {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Response could not be converted");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
