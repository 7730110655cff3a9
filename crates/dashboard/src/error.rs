use mentorlink_client::ApiError;
use mentorlink_core::error::CoreError;

/// Application-level error type for dashboard controllers.
///
/// Wraps [`CoreError`] for client-side rejections (validation, role
/// checks) and [`ApiError`] for anything the server or transport
/// reported.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mentorlink_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A REST call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

const UNEXPECTED_RESPONSE: &str = "Unexpected response from the server";

/// Convenience type alias for controller return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// One-line message suitable for a transient user-facing notice.
    pub fn notice_message(&self) -> String {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => format!("{entity} not found"),
                CoreError::Validation(msg)
                | CoreError::Conflict(msg)
                | CoreError::Unauthorized(msg)
                | CoreError::Forbidden(msg) => msg.clone(),
                CoreError::Internal(_) => "Something went wrong".to_string(),
            },
            AppError::Api(api) => match api {
                ApiError::Request(e) if e.is_decode() => UNEXPECTED_RESPONSE.to_string(),
                ApiError::Decode(_) => UNEXPECTED_RESPONSE.to_string(),
                ApiError::Request(_) => "Could not reach the server".to_string(),
                ApiError::InvalidConfig(msg) => msg.clone(),
                ApiError::Api { status, .. } => api
                    .server_message()
                    .unwrap_or_else(|| format!("Request failed ({status})")),
            },
        }
    }

    /// `true` when the server reported the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            AppError::Api(api) => api.is_not_found(),
            AppError::Core(CoreError::NotFound { .. }) => true,
            AppError::Core(_) => false,
        }
    }
}
