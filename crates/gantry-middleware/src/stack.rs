//! Middleware stack execution

use super::{DispatcherResult, Middleware, MiddlewareError, RequestContext};
use std::sync::Arc;

/// Ordered collection of middleware with execution logic
///
/// The stack executes middleware in two phases:
///
/// 1. **Before dispatch**: Middleware execute in registration order
///    - First error stops the chain
///    - Context mutations (injected arguments, resolved user) accumulate
///
/// 2. **After dispatch**: Middleware execute in reverse registration order
///    - Allows proper cleanup/finalization
///    - Errors replace the result
#[derive(Default, Clone)]
pub struct MiddlewareStack {
    middleware: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareStack {
    /// Create an empty middleware stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Add middleware to the end of the stack
    ///
    /// # Execution Order
    ///
    /// - Before dispatch: first added executes first
    /// - After dispatch: first added executes last (reverse order)
    pub fn push(&mut self, middleware: Arc<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Get the number of middleware in the stack
    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }

    /// Execute all middleware before dispatch, in registration order
    ///
    /// Stops on the first error; the request context carries every mutation
    /// made by the middleware that ran before the failure.
    pub async fn execute_before(
        &self,
        ctx: &mut RequestContext<'_>,
    ) -> Result<(), MiddlewareError> {
        for middleware in &self.middleware {
            middleware.before_dispatch(ctx).await?;
        }
        Ok(())
    }

    /// Execute all middleware after dispatch, in reverse registration order
    ///
    /// Stops on the first error. Middleware may modify the result.
    pub async fn execute_after(
        &self,
        ctx: &RequestContext<'_>,
        result: &mut DispatcherResult,
    ) -> Result<(), MiddlewareError> {
        for middleware in self.middleware.iter().rev() {
            middleware.after_dispatch(ctx, result).await?;
        }
        Ok(())
    }
}
