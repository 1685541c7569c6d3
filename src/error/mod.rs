use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SERVER_ERROR_MESSAGE: &str = "There is a problem with payment processing server.";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Ordered list of messages produced by a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new(messages: Vec<String>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Fields Tembo returns alongside a failed request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderError {
    /// HTTP status of the response.
    pub status: u16,
    /// `statusCode` from the body, which is not always numeric.
    pub status_code: Option<serde_json::Value>,
    pub reason: Option<String>,
    pub error: Option<String>,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub request_id: String,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if !self.request_id.is_empty() {
            write!(f, " (request id {})", self.request_id)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum TemboError {
    // Local, raised before any request is sent
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    // Provider responses
    #[error("Bad request: {0}")]
    BadRequest(ProviderError),

    #[error("Unauthorized: {0}")]
    Unauthorized(ProviderError),

    #[error("Forbidden: {0}")]
    Forbidden(ProviderError),

    #[error("Conflict: {0}")]
    Conflict(ProviderError),

    #[error("Resource not found: {0}")]
    NotFound(ProviderError),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(ProviderError),

    #[error("Bad gateway: {0}")]
    BadGateway(ProviderError),

    #[error("{}", SERVER_ERROR_MESSAGE)]
    ServerError(ProviderError),

    #[error("Unexpected response: {0}")]
    UnexpectedStatus(ProviderError),

    // Webhook errors
    #[error("Invalid signature")]
    SignatureInvalid,

    #[error("Invalid callback payload: {0}")]
    PayloadInvalid(ValidationErrors),

    // Transport
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TemboError {
    /// Provider fields, when the error came from a Tembo response.
    pub fn provider(&self) -> Option<&ProviderError> {
        match self {
            TemboError::BadRequest(e)
            | TemboError::Unauthorized(e)
            | TemboError::Forbidden(e)
            | TemboError::Conflict(e)
            | TemboError::NotFound(e)
            | TemboError::RateLimit(e)
            | TemboError::BadGateway(e)
            | TemboError::ServerError(e)
            | TemboError::UnexpectedStatus(e) => Some(e),
            _ => None,
        }
    }

    pub fn validation_messages(&self) -> Option<&[String]> {
        match self {
            TemboError::Validation(errors) | TemboError::PayloadInvalid(errors) => {
                Some(errors.messages())
            }
            _ => None,
        }
    }
}

/// Statuses beyond 400/401/409/404/502/5xx that an operation maps to a
/// dedicated error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusMapping {
    pub forbidden: bool,
    pub rate_limit: bool,
}

impl StatusMapping {
    pub const STANDARD: StatusMapping = StatusMapping {
        forbidden: false,
        rate_limit: false,
    };

    pub const REMITTANCE: StatusMapping = StatusMapping {
        forbidden: true,
        rate_limit: true,
    };

    pub const REMITTANCE_STATUS: StatusMapping = StatusMapping {
        forbidden: true,
        rate_limit: false,
    };
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: Option<serde_json::Value>,
    reason: Option<serde_json::Value>,
    error: Option<serde_json::Value>,
    message: Option<serde_json::Value>,
    details: Option<serde_json::Value>,
}

fn as_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) if text.is_empty() => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Builds the error for a non-2xx Tembo response.
///
/// Exactly one variant is produced per status. A body that is not JSON leaves
/// every optional field unset and the message empty.
pub fn classify_error(
    status: u16,
    request_id: Option<&str>,
    body: &str,
    mapping: StatusMapping,
) -> TemboError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let message = parsed.message.and_then(as_text).unwrap_or_default();

    let provider = ProviderError {
        status,
        status_code: parsed.status_code.filter(|v| !v.is_null()),
        reason: parsed.reason.and_then(as_text),
        error: parsed.error.and_then(as_text),
        message,
        details: parsed.details.filter(|v| !v.is_null()),
        request_id: request_id.unwrap_or_default().to_string(),
    };

    match status {
        400 => TemboError::BadRequest(provider),
        401 => TemboError::Unauthorized(provider),
        403 if mapping.forbidden => TemboError::Forbidden(provider),
        409 => TemboError::Conflict(provider),
        429 if mapping.rate_limit => TemboError::RateLimit(provider),
        404 => TemboError::NotFound(provider),
        502 => TemboError::BadGateway(provider),
        500..=599 => TemboError::ServerError(ProviderError {
            message: SERVER_ERROR_MESSAGE.to_string(),
            ..provider
        }),
        _ => TemboError::UnexpectedStatus(provider),
    }
}

/// Body returned by the webhook endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl WebhookResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: "Callback received successfully".to_string(),
            errors: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }
}

impl IntoResponse for TemboError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            TemboError::PayloadInvalid(errors) | TemboError::Validation(errors) => {
                let messages = errors.into_messages();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    WebhookResponse {
                        success: false,
                        message: messages
                            .first()
                            .cloned()
                            .unwrap_or_else(|| "The given data was invalid.".to_string()),
                        errors: Some(messages),
                    },
                )
            }
            TemboError::SignatureInvalid => (
                StatusCode::UNAUTHORIZED,
                WebhookResponse::rejected("Invalid signature"),
            ),
            other => {
                tracing::error!("Callback processing failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    WebhookResponse::rejected("Internal error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type TemboResult<T> = Result<T, TemboError>;
