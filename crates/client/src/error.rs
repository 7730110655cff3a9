/// Errors from the REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// The client could not be built from its configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) | ApiError::InvalidConfig(_) => None,
        }
    }

    /// `true` for a 404. On fetch-by-pair this means no plan exists yet
    /// for the pair.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Best-effort server message for user-facing notices.
    ///
    /// The API answers errors with `{"message": "..."}` (or `error`);
    /// anything else falls back to the raw body.
    pub fn server_message(&self) -> Option<String> {
        let ApiError::Api { body, .. } = self else {
            return None;
        };
        let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
        let field = parsed.as_ref().and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });
        match field {
            Some(msg) => Some(msg),
            None if body.trim().is_empty() => None,
            None => Some(body.trim().to_string()),
        }
    }
}
