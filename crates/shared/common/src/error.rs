//! Unified error handling.
//!
//! Every service returns [`AppResult`]; the HTTP layer turns an [`AppError`]
//! into a JSON body of the form `{"error": {"code": ..., "message": ...}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Autenticación requerida")]
    Unauthorized,

    #[error("Acceso denegado")]
    Forbidden,

    #[error("Credenciales inválidas")]
    InvalidCredentials,

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Solicitud inválida: {0}")]
    BadRequest(String),

    // External errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(sea_orm::DbErr),

    #[cfg(feature = "jwt")]
    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Ocurrió un error de base de datos".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "Token inválido o expirado".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Ocurrió un error interno".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Whether the error is a business-rule or input rejection.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Password(msg) => AppError::Validation(msg),
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::Unauthorized => AppError::Unauthorized,
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// DTO shape violations surface the first field message.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(first_validation_message(&errors))
    }
}

fn first_validation_message(errors: &ValidationErrors) -> String {
    use validator::ValidationErrorsKind;

    for kind in errors.errors().values() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(msg) = field_errors.iter().find_map(|e| e.message.as_ref()) {
                    return msg.to_string();
                }
            }
            ValidationErrorsKind::Struct(nested) => return first_validation_message(nested),
            ValidationErrorsKind::List(items) => {
                if let Some(nested) = items.values().next() {
                    return first_validation_message(nested);
                }
            }
        }
    }
    "Los datos enviados no son válidos".to_string()
}

/// Constraint violations become conflicts; missing rows become not-found.
#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::{DbErr, SqlErr};

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::warn!("Unique constraint violation: {}", detail);
                return AppError::conflict("El registro ya existe");
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                tracing::warn!("Foreign key violation: {}", detail);
                return AppError::conflict("El registro está referenciado por otros datos");
            }
            _ => {}
        }

        match err {
            DbErr::RecordNotFound(msg) => AppError::NotFound(msg),
            DbErr::RecordNotUpdated => AppError::not_found("El registro no existe"),
            other => AppError::Database(other),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, msg: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, msg: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(msg.into()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "El nombre es obligatorio"))]
        name: String,
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(AppError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::internal("connection string leaked");
        assert!(!err.user_message().contains("connection string"));
    }

    #[test]
    fn test_business_messages_are_shown_verbatim() {
        let err = AppError::conflict("El paciente con identificación 123 ya existe");
        assert_eq!(err.user_message(), "El paciente con identificación 123 ya existe");
    }

    #[test]
    fn test_validation_errors_use_field_message() {
        let sample = Sample {
            name: String::new(),
        };
        let err = AppError::from(sample.validate().unwrap_err());
        assert!(matches!(err, AppError::Validation(msg) if msg == "El nombre es obligatorio"));
    }

    #[test]
    fn test_domain_errors_keep_their_category() {
        let err = AppError::from(DomainError::not_found("Paciente no encontrado"));
        assert!(matches!(err, AppError::NotFound(_)));

        let err = AppError::from(DomainError::password("corta"));
        assert!(matches!(err, AppError::Validation(_)));
    }
}
