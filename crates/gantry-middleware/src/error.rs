//! Middleware error types

use std::fmt;

/// JSON-RPC 2.0 error codes for middleware errors
///
/// These codes are used when converting `MiddlewareError` to a JSON-RPC
/// error response. Codes `-32000` to `-32099` are reserved for
/// application-defined server errors.
pub mod error_codes {
    /// Authentication required (-32001)
    pub const UNAUTHENTICATED: i64 = -32001;
    /// Permission denied (-32002)
    pub const UNAUTHORIZED: i64 = -32002;
    /// Injection declaration names a parameter type outside the supported
    /// enumeration (-32004)
    pub const UNEXPECTED_PARAMETER_TYPE: i64 = -32004;
    /// Injector wired to a method with no registered declaration (-32005)
    pub const MISSING_DECLARATION: i64 = -32005;
    /// Invalid request (standard JSON-RPC error)
    pub const INVALID_REQUEST: i64 = -32600;
    /// Internal error (standard JSON-RPC error)
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Errors that can occur during middleware execution
///
/// Middleware errors short-circuit the request: the handler never runs and
/// the error propagates to the transport layer for conversion to a JSON-RPC
/// error response.
///
/// `UnexpectedParameterType` and `MissingDeclaration` are configuration
/// defects, not runtime conditions: they mean the injector was wired up in
/// a way that disagrees with the declarations it supports. They are never
/// retried and never silently defaulted.
#[derive(Debug, Clone, PartialEq)]
pub enum MiddlewareError {
    /// Authentication required but not provided or not valid
    Unauthenticated(String),

    /// Authentication provided but insufficient permissions
    Unauthorized(String),

    /// Injection declaration names a parameter type outside the supported
    /// enumeration; carries the offending spelling
    UnexpectedParameterType(String),

    /// The injector intercepted a method that has no registered injection
    /// declaration; carries the method name
    MissingDeclaration(String),

    /// Request validation failed
    InvalidRequest(String),

    /// Internal middleware error (should not expose details to the client)
    Internal(String),
}

impl fmt::Display for MiddlewareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated(msg) => write!(f, "Authentication required: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::UnexpectedParameterType(name) => {
                write!(f, "Unexpected parameter type: {}", name)
            }
            Self::MissingDeclaration(method) => {
                write!(f, "No injection declaration registered for method: {}", method)
            }
            Self::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            Self::Internal(msg) => write!(f, "Internal middleware error: {}", msg),
        }
    }
}

impl std::error::Error for MiddlewareError {}

impl MiddlewareError {
    /// Create an unauthenticated error
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create an unexpected-parameter-type error
    pub fn unexpected_parameter_type(name: impl Into<String>) -> Self {
        Self::UnexpectedParameterType(name.into())
    }

    /// Create a missing-declaration error
    pub fn missing_declaration(method: impl Into<String>) -> Self {
        Self::MissingDeclaration(method.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// JSON-RPC error code for this error (see [`error_codes`])
    pub fn json_rpc_code(&self) -> i64 {
        match self {
            Self::Unauthenticated(_) => error_codes::UNAUTHENTICATED,
            Self::Unauthorized(_) => error_codes::UNAUTHORIZED,
            Self::UnexpectedParameterType(_) => error_codes::UNEXPECTED_PARAMETER_TYPE,
            Self::MissingDeclaration(_) => error_codes::MISSING_DECLARATION,
            Self::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            Self::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MiddlewareError::unauthenticated("Missing token");
        assert_eq!(err.to_string(), "Authentication required: Missing token");

        let err = MiddlewareError::unauthorized("Insufficient permissions");
        assert_eq!(err.to_string(), "Unauthorized: Insufficient permissions");

        let err = MiddlewareError::unexpected_parameter_type("TenantId");
        assert_eq!(err.to_string(), "Unexpected parameter type: TenantId");

        let err = MiddlewareError::missing_declaration("app/create");
        assert_eq!(
            err.to_string(),
            "No injection declaration registered for method: app/create"
        );

        let err = MiddlewareError::invalid_request("Malformed params");
        assert_eq!(err.to_string(), "Invalid request: Malformed params");

        let err = MiddlewareError::internal("Resolver backend failed");
        assert_eq!(
            err.to_string(),
            "Internal middleware error: Resolver backend failed"
        );
    }

    #[test]
    fn test_json_rpc_codes() {
        assert_eq!(
            MiddlewareError::unexpected_parameter_type("TenantId").json_rpc_code(),
            error_codes::UNEXPECTED_PARAMETER_TYPE
        );
        assert_eq!(
            MiddlewareError::missing_declaration("m").json_rpc_code(),
            error_codes::MISSING_DECLARATION
        );
        assert_eq!(
            MiddlewareError::unauthenticated("x").json_rpc_code(),
            error_codes::UNAUTHENTICATED
        );
    }

    #[test]
    fn test_error_equality() {
        let err1 = MiddlewareError::unexpected_parameter_type("test");
        let err2 = MiddlewareError::unexpected_parameter_type("test");
        assert_eq!(err1, err2);
    }
}
