//! Method dispatch with middleware execution
//!
//! The [`Dispatcher`] is the minimal pipeline tail middleware forwards into:
//! run the before-phase, invoke the method handler with the (possibly
//! mutated) argument tree, run the after-phase. Transport concerns — HTTP,
//! wire parsing — live outside this crate.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{DispatcherResult, Middleware, MiddlewareStack, RequestContext};

/// Handler for one method
///
/// Receives the call's argument tree after all before-phase middleware ran,
/// so injected context values are already in place.
#[async_trait]
pub trait RpcHandler: Send + Sync {
    /// Handle the call
    async fn handle(&self, params: Option<Value>) -> Result<Value, String>;
}

/// Method router with a middleware stack around every call
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use gantry_middleware::{Dispatcher, RequestLoggingMiddleware};
///
/// let dispatcher = Dispatcher::new()
///     .middleware(Arc::new(RequestLoggingMiddleware::new()));
/// ```
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<String, Arc<dyn RpcHandler>>,
    middleware: MiddlewareStack,
}

impl Dispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a method, builder-style
    ///
    /// **This method is additive** — each call registers one more method.
    pub fn handler(mut self, method: impl Into<String>, handler: Arc<dyn RpcHandler>) -> Self {
        self.handlers.insert(method.into(), handler);
        self
    }

    /// Add middleware to the stack, builder-style
    ///
    /// **This method is additive** — each call appends one more middleware.
    /// Before-phase runs in registration order, after-phase in reverse.
    pub fn middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Dispatch one call through the middleware stack to its handler
    ///
    /// A before-phase error short-circuits the call: the handler never runs
    /// and the error becomes the result. The handler's outcome then passes
    /// through the after-phase, whose errors replace the result.
    pub async fn dispatch(
        &self,
        method: &str,
        params: Option<Value>,
        metadata: Map<String, Value>,
    ) -> DispatcherResult {
        let mut ctx = RequestContext::new(method, params);
        for (key, value) in metadata {
            ctx.add_metadata(key, value);
        }

        if let Err(err) = self.middleware.execute_before(&mut ctx).await {
            warn!(method, %err, "middleware rejected request");
            return DispatcherResult::Error(err.to_string());
        }

        let mut result = match self.handlers.get(method) {
            Some(handler) => match handler.handle(ctx.params().cloned()).await {
                Ok(value) => DispatcherResult::Success(value),
                Err(message) => DispatcherResult::Error(message),
            },
            None => {
                debug!(method, "no handler registered");
                DispatcherResult::Error(format!("method not found: {}", method))
            }
        };

        if let Err(err) = self.middleware.execute_after(&ctx, &mut result).await {
            warn!(method, %err, "after-dispatch middleware failed");
            result = DispatcherResult::Error(err.to_string());
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoHandler;

    #[async_trait]
    impl RpcHandler for EchoHandler {
        async fn handle(&self, params: Option<Value>) -> Result<Value, String> {
            Ok(params.unwrap_or(Value::Null))
        }
    }

    #[tokio::test]
    async fn dispatches_to_registered_handler() {
        let dispatcher = Dispatcher::new().handler("echo", Arc::new(EchoHandler));

        let result = dispatcher
            .dispatch("echo", Some(json!({"a": 1})), Map::new())
            .await;
        assert_eq!(result, DispatcherResult::Success(json!({"a": 1})));
    }

    #[tokio::test]
    async fn unknown_method_is_an_error() {
        let dispatcher = Dispatcher::new();

        let result = dispatcher.dispatch("missing", None, Map::new()).await;
        assert_eq!(
            result,
            DispatcherResult::Error("method not found: missing".to_string())
        );
    }

    #[tokio::test]
    async fn handler_error_becomes_error_result() {
        struct FailingHandler;

        #[async_trait]
        impl RpcHandler for FailingHandler {
            async fn handle(&self, _params: Option<Value>) -> Result<Value, String> {
                Err("boom".to_string())
            }
        }

        let dispatcher = Dispatcher::new().handler("fail", Arc::new(FailingHandler));
        let result = dispatcher.dispatch("fail", None, Map::new()).await;
        assert_eq!(result, DispatcherResult::Error("boom".to_string()));
    }
}
