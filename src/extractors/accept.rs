//! Extract the negotiated representation from the `Accept` header.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

/// Raw `Accept` value; absent header is treated as "anything".
#[derive(Clone, Debug, Default)]
pub struct Accept(pub Option<String>);

impl Accept {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let value = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty());
        Accept(value)
    }

    pub fn accepts_html(&self) -> bool {
        self.0
            .as_deref()
            .map(|v| v.contains("text/html") || v.contains("application/xhtml+xml"))
            .unwrap_or(false)
    }

    pub fn accepts_json(&self) -> bool {
        self.0
            .as_deref()
            .map(|v| v.contains("application/json") || v.contains("+json"))
            .unwrap_or(false)
    }

    /// JSON only when asked for explicitly and HTML was not.
    pub fn prefers_json(&self) -> bool {
        self.accepts_json() && !self.accepts_html()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Accept
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Accept::from_headers(&parts.headers))
    }
}
