//! Request context and dispatcher result types

use gantry_auth::AuthUser;
use serde_json::{Map, Value};

/// Normalized per-call context shared by all middleware
///
/// Provides uniform access to one incoming call's data regardless of how the
/// call arrived: the method name, the mutable argument tree, transport
/// metadata (HTTP headers and the like), and the authenticated user once
/// authentication middleware has resolved one.
///
/// # Examples
///
/// ```rust
/// use gantry_middleware::RequestContext;
/// use serde_json::json;
///
/// let mut ctx = RequestContext::new(
///     "app/create",
///     Some(json!({"data": {"name": "x"}})),
/// );
///
/// ctx.add_metadata("user-agent", json!("gantry-client/1.0"));
///
/// assert_eq!(ctx.method(), "app/create");
/// assert!(ctx.params().is_some());
/// assert!(ctx.user().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    /// Method name (e.g., "app/create")
    method: &'a str,

    /// Request parameters — the call's argument tree
    params: Option<Value>,

    /// Transport-specific metadata (HTTP headers, event fields, etc.)
    metadata: Map<String, Value>,

    /// Authenticated user, populated by authentication middleware
    user: Option<AuthUser>,
}

impl<'a> RequestContext<'a> {
    /// Create a new request context with no metadata and no user
    pub fn new(method: &'a str, params: Option<Value>) -> Self {
        Self {
            method,
            params,
            metadata: Map::new(),
            user: None,
        }
    }

    /// Get the method name
    pub fn method(&self) -> &str {
        self.method
    }

    /// Get request parameters (if any)
    pub fn params(&self) -> Option<&Value> {
        self.params.as_ref()
    }

    /// Get mutable request parameters
    pub fn params_mut(&mut self) -> Option<&mut Value> {
        self.params.as_mut()
    }

    /// Get mutable request parameters, materializing an empty object first
    /// if the call arrived with no arguments
    ///
    /// Injection into a call without arguments must still be well-defined,
    /// so absent params become `{}` before the write.
    pub fn params_mut_or_default(&mut self) -> &mut Value {
        self.params
            .get_or_insert_with(|| Value::Object(Map::new()))
    }

    /// Get transport metadata (read-only)
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: impl Into<String>, value: Value) {
        self.metadata.insert(key.into(), value);
    }

    /// Get the authenticated user, if authentication middleware resolved one
    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// Attach the authenticated user to this call
    ///
    /// Called by authentication middleware; later middleware and the
    /// dispatcher only read the user.
    pub fn set_user(&mut self, user: AuthUser) {
        self.user = Some(user);
    }
}

/// Result from the dispatcher (success or error)
///
/// Middleware can inspect and modify this result in `after_dispatch()`.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatcherResult {
    /// Successful response (JSON-RPC result field)
    Success(Value),

    /// Error response (will be converted to a JSON-RPC error)
    Error(String),
}

impl DispatcherResult {
    /// Check if the result is successful
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if the result is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Get the success value (if any)
    pub fn success(&self) -> Option<&Value> {
        match self {
            Self::Success(v) => Some(v),
            Self::Error(_) => None,
        }
    }

    /// Get the mutable success value (if any)
    pub fn success_mut(&mut self) -> Option<&mut Value> {
        match self {
            Self::Success(v) => Some(v),
            Self::Error(_) => None,
        }
    }

    /// Get the error message (if any)
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn params_mut_or_default_materializes_empty_object() {
        let mut ctx = RequestContext::new("app/create", None);
        assert!(ctx.params().is_none());

        assert_eq!(ctx.params_mut_or_default(), &json!({}));
        assert_eq!(ctx.params(), Some(&json!({})));
    }

    #[test]
    fn params_mut_or_default_keeps_existing_params() {
        let mut ctx = RequestContext::new("app/create", Some(json!({"data": 1})));
        assert_eq!(ctx.params_mut_or_default(), &json!({"data": 1}));
    }

    #[test]
    fn user_slot_starts_empty() {
        let mut ctx = RequestContext::new("app/create", None);
        assert!(ctx.user().is_none());

        ctx.set_user(gantry_auth::AuthUser::new("u1"));
        assert_eq!(ctx.user().map(|u| u.id.as_str()), Some("u1"));
    }
}
