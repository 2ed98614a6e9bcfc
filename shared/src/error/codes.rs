//! Unified error codes for the CoachDesk CRM
//!
//! This module defines all error codes used across the server and any client.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Client errors
//! - 4xxx: Invoice errors
//! - 5xxx: Session errors
//! - 6xxx: Prospect errors
//! - 7xxx: Staff errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// No actor context on the request
    NotAuthenticated = 1001,
    /// Actor id does not resolve to a known user
    InvalidActor = 1002,
    /// Account is disabled
    AccountDisabled = 1003,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,
    /// Record is outside the actor's scope
    OutOfScope = 2003,

    // ==================== 3xxx: Client ====================
    /// Client not found
    ClientNotFound = 3001,
    /// Client status is invalid
    ClientInvalidStatus = 3002,

    // ==================== 4xxx: Invoice ====================
    /// Invoice not found
    InvoiceNotFound = 4001,
    /// Invoice has no line items
    InvoiceEmpty = 4002,
    /// Invoice amount does not equal the sum of its items
    InvoiceAmountMismatch = 4003,
    /// Invoice status is invalid
    InvoiceInvalidStatus = 4004,
    /// Reminder template not found
    ReminderTemplateNotFound = 4101,
    /// Reminder dispatch failed
    ReminderSendFailed = 4102,

    // ==================== 5xxx: Session ====================
    /// Session not found
    SessionNotFound = 5001,
    /// Session date cannot be parsed
    SessionInvalidDate = 5002,

    // ==================== 6xxx: Prospect ====================
    /// Prospect not found
    ProspectNotFound = 6001,
    /// Pipeline stage is not one of the known stages
    UnknownPipelineStage = 6002,

    // ==================== 7xxx: Staff ====================
    /// Staff member not found
    StaffNotFound = 7001,
    /// Staff email already exists
    StaffEmailExists = 7002,
    /// Cannot delete own account
    StaffCannotDeleteSelf = 7003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Store error
    StoreError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "No actor context on the request",
            ErrorCode::InvalidActor => "Actor is not a known user",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::OutOfScope => "Record is outside the actor's scope",

            // Client
            ErrorCode::ClientNotFound => "Client not found",
            ErrorCode::ClientInvalidStatus => "Client status is invalid",

            // Invoice
            ErrorCode::InvoiceNotFound => "Invoice not found",
            ErrorCode::InvoiceEmpty => "Invoice has no line items",
            ErrorCode::InvoiceAmountMismatch => "Invoice amount does not match its items",
            ErrorCode::InvoiceInvalidStatus => "Invoice status is invalid",
            ErrorCode::ReminderTemplateNotFound => "Reminder template not found",
            ErrorCode::ReminderSendFailed => "Reminder dispatch failed",

            // Session
            ErrorCode::SessionNotFound => "Session not found",
            ErrorCode::SessionInvalidDate => "Session date cannot be parsed",

            // Prospect
            ErrorCode::ProspectNotFound => "Prospect not found",
            ErrorCode::UnknownPipelineStage => "Unknown pipeline stage",

            // Staff
            ErrorCode::StaffNotFound => "Staff member not found",
            ErrorCode::StaffEmailExists => "Staff email already exists",
            ErrorCode::StaffCannotDeleteSelf => "Cannot delete own account",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StoreError => "Store error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidActor),
            1003 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),
            2003 => Ok(ErrorCode::OutOfScope),

            // Client
            3001 => Ok(ErrorCode::ClientNotFound),
            3002 => Ok(ErrorCode::ClientInvalidStatus),

            // Invoice
            4001 => Ok(ErrorCode::InvoiceNotFound),
            4002 => Ok(ErrorCode::InvoiceEmpty),
            4003 => Ok(ErrorCode::InvoiceAmountMismatch),
            4004 => Ok(ErrorCode::InvoiceInvalidStatus),
            4101 => Ok(ErrorCode::ReminderTemplateNotFound),
            4102 => Ok(ErrorCode::ReminderSendFailed),

            // Session
            5001 => Ok(ErrorCode::SessionNotFound),
            5002 => Ok(ErrorCode::SessionInvalidDate),

            // Prospect
            6001 => Ok(ErrorCode::ProspectNotFound),
            6002 => Ok(ErrorCode::UnknownPipelineStage),

            // Staff
            7001 => Ok(ErrorCode::StaffNotFound),
            7002 => Ok(ErrorCode::StaffEmailExists),
            7003 => Ok(ErrorCode::StaffCannotDeleteSelf),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StoreError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::AdminRequired.code(), 2002);
        assert_eq!(ErrorCode::InvoiceNotFound.code(), 4001);
        assert_eq!(ErrorCode::StaffNotFound.code(), 7001);
    }

    #[test]
    fn test_round_trip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidActor,
            ErrorCode::OutOfScope,
            ErrorCode::ClientNotFound,
            ErrorCode::ReminderSendFailed,
            ErrorCode::UnknownPipelineStage,
            ErrorCode::InternalError,
        ] {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(8001), Err(InvalidErrorCode(8001)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::ClientNotFound).unwrap();
        assert_eq!(json, "3001");
        let code: ErrorCode = serde_json::from_str("2002").unwrap();
        assert_eq!(code, ErrorCode::AdminRequired);
    }
}
