//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ClientNotFound
            | Self::InvoiceNotFound
            | Self::SessionNotFound
            | Self::ProspectNotFound
            | Self::StaffNotFound
            | Self::ReminderTemplateNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::StaffEmailExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::InvalidActor | Self::AccountDisabled => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied
            | Self::AdminRequired
            | Self::OutOfScope
            | Self::StaffCannotDeleteSelf => StatusCode::FORBIDDEN,

            // 502 Bad Gateway (reminder delivery is an external collaborator)
            Self::ReminderSendFailed => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            Self::InternalError | Self::StoreError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
