//! Core middleware trait definitions

use super::{DispatcherResult, MiddlewareError, RequestContext};
use async_trait::async_trait;

/// Core middleware trait for intercepting requests and responses
///
/// Middleware can inspect and modify requests before they reach the handler,
/// and inspect/modify responses before they're sent to the client.
///
/// # Lifecycle
///
/// 1. **Before Dispatch**: Called before the method handler executes
///    - Access to request method, arguments, metadata, and the
///      authenticated user once one has been resolved
///    - Can mutate the argument tree (this is how context injection works)
///    - Can short-circuit the request by returning an error
///
/// 2. **After Dispatch**: Called after the method handler completes
///    - Access to the result (success or error)
///    - Can modify the response
///    - Can log, audit, or transform results
///
/// # Examples
///
/// ```rust,no_run
/// use gantry_middleware::{Middleware, MiddlewareError, RequestContext};
/// use async_trait::async_trait;
///
/// struct ApiKeyCheck {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl Middleware for ApiKeyCheck {
///     async fn before_dispatch(
///         &self,
///         ctx: &mut RequestContext<'_>,
///     ) -> Result<(), MiddlewareError> {
///         let provided = ctx.metadata()
///             .get("api-key")
///             .and_then(|v| v.as_str())
///             .ok_or_else(|| MiddlewareError::unauthenticated("Missing API key"))?;
///
///         if provided != self.api_key {
///             return Err(MiddlewareError::unauthenticated("Invalid API key"));
///         }
///
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Called before the method handler executes
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Continue to the next middleware or the handler
    /// - `Err(MiddlewareError)`: Short-circuit and return an error to the
    ///   client; the handler never runs
    ///
    /// # Notes
    ///
    /// - Middleware executes in registration order
    /// - First error stops the chain
    async fn before_dispatch(
        &self,
        ctx: &mut RequestContext<'_>,
    ) -> Result<(), MiddlewareError>;

    /// Called after the method handler completes (optional)
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Continue to the next middleware
    /// - `Err(MiddlewareError)`: Replace the result with an error
    ///
    /// # Notes
    ///
    /// - Middleware executes in reverse registration order
    /// - Default implementation is a no-op
    #[allow(unused_variables)]
    async fn after_dispatch(
        &self,
        ctx: &RequestContext<'_>,
        result: &mut DispatcherResult,
    ) -> Result<(), MiddlewareError> {
        Ok(()) // Default: no-op
    }
}
