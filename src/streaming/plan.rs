//! Status and header selection for stream responses.
//!
//! A [`ResponsePlan`] is fixed before the first body byte is produced; the
//! status line and headers cannot change once streaming starts.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

use super::range::{ByteWindow, RangeRequest};
use super::transmit::Span;

/// Everything needed to answer a stream request except the bytes themselves.
#[derive(Debug, Clone)]
pub struct ResponsePlan {
    status: StatusCode,
    content_type: HeaderValue,
    content_length: u64,
    content_range: Option<String>,
    span: Option<Span>,
}

impl ResponsePlan {
    /// Derive the plan from the file length and the resolved request.
    pub fn new(file_len: u64, request: &RangeRequest, content_type: HeaderValue) -> Self {
        match *request {
            RangeRequest::Whole => Self {
                status: StatusCode::OK,
                content_type,
                content_length: file_len,
                // There is no last byte to name for an empty file.
                content_range: (file_len > 0)
                    .then(|| format!("bytes 0-{}/{}", file_len - 1, file_len)),
                span: Some(Span::Whole(file_len)),
            },
            RangeRequest::Window(ByteWindow { start, end }) => Self {
                status: StatusCode::PARTIAL_CONTENT,
                content_type,
                content_length: end - start + 1,
                content_range: Some(format!("bytes {start}-{end}/{file_len}")),
                span: Some(Span::Window(ByteWindow { start, end })),
            },
            RangeRequest::Unsatisfiable => Self {
                status: StatusCode::RANGE_NOT_SATISFIABLE,
                content_type,
                content_length: 0,
                content_range: Some(format!("bytes */{file_len}")),
                span: None,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    pub fn content_range(&self) -> Option<&str> {
        self.content_range.as_deref()
    }

    /// The bytes to transmit, or `None` when the response has no body.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Full header set for this plan.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(header::CONTENT_TYPE, self.content_type.clone());
        headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(self.content_length));
        if let Some(range) = &self.content_range {
            // Built only from digits, '-', '/', '*' and spaces.
            if let Ok(value) = HeaderValue::from_str(range) {
                headers.insert(header::CONTENT_RANGE, value);
            }
        }
        headers
    }

    /// Attach the planned status and headers to `body`.
    pub fn into_response(self, body: Body) -> Response {
        let mut response = Response::new(body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers();
        response
    }
}
