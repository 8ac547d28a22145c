//! Error types for pushboard.

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid username or password. Please try again.")]
    AuthMismatch,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    InvalidFields(FieldErrors),

    // === Server Errors ===
    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::Unauthorized | Self::AuthMismatch => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) | Self::InvalidFields(_) => StatusCode::BAD_REQUEST,

            // 5xx Server Errors
            Self::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::AuthMismatch => "AUTH_MISMATCH",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::InvalidFields(_) => "VALIDATION_ERROR",
            Self::Dispatch(_) => "DISPATCH_ERROR",
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if self.is_server_error() {
            tracing::error!(error = %self, code = code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        }

        let body = match &self {
            Self::InvalidFields(fields) => json!({
                "error": {
                    "code": code,
                    "message": self.to_string(),
                    "fields": fields,
                }
            }),
            _ => json!({
                "error": {
                    "code": code,
                    "message": self.to_string(),
                }
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Why a single form field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The field is empty or missing.
    Required,
    /// The field exceeds its maximum length in characters.
    TooLong {
        /// Maximum accepted length.
        max: u64,
    },
    /// The field does not match its expected format.
    Format,
}

impl FieldErrorKind {
    /// Stable code used on the wire.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::TooLong { .. } => "TOO_LONG",
            Self::Format => "FORMAT",
        }
    }

    /// Interpret a `validator` error code.
    fn from_validator(code: &str, max: Option<u64>) -> Self {
        match code {
            "required" => Self::Required,
            "too_long" | "length" => Self::TooLong {
                max: max.unwrap_or_default(),
            },
            _ => Self::Format,
        }
    }
}

/// A rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Wire (camelCase) name of the field.
    pub field: String,
    /// Failure kind.
    #[serde(serialize_with = "serialize_kind")]
    pub code: FieldErrorKind,
    /// User-facing message shown next to the field.
    pub message: String,
}

fn serialize_kind<S: serde::Serializer>(kind: &FieldErrorKind, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(kind.code())
}

/// Every rejected field of one validation pass, keyed by wire name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, FieldError>);

impl FieldErrors {
    /// Create an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. The first error recorded for a field wins.
    pub fn add(&mut self, field: impl Into<String>, code: FieldErrorKind, message: impl Into<String>) {
        let field = field.into();
        self.0.entry(field.clone()).or_insert_with(|| FieldError {
            field,
            code,
            message: message.into(),
        });
    }

    /// The error recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    /// The failure kind recorded for `field`, if any.
    #[must_use]
    pub fn kind(&self, field: &str) -> Option<FieldErrorKind> {
        self.get(field).map(|e| e.code)
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over failed fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.values()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Convert a Rust field name to its camelCase wire name.
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut errors = Self::new();
        for (field, field_errors) in err.field_errors() {
            let Some(first) = field_errors.first() else {
                continue;
            };
            let max = first
                .params
                .get("max")
                .and_then(serde_json::Value::as_u64);
            let kind = FieldErrorKind::from_validator(&first.code, max);
            let message = first
                .message
                .as_ref()
                .map_or_else(|| first.code.to_string(), ToString::to_string);
            errors.add(wire_name(&field), kind, message);
        }
        errors
    }
}

// === From implementations ===

impl From<FieldErrors> for AppError {
    fn from(err: FieldErrors) -> Self {
        Self::InvalidFields(err)
    }
}
