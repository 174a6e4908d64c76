//! Request logging middleware
//!
//! Logs every request on the way in and its outcome with duration on the
//! way out. The start timestamp rides through the request as a metadata
//! entry, since before- and after-phases are separate calls on a shared
//! middleware instance.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::{DispatcherResult, Middleware, MiddlewareError, RequestContext};

/// Metadata key carrying the request start timestamp (Unix millis)
const START_MS_KEY: &str = "_logging_start_ms";

/// Middleware that logs requests and responses with timing
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestLoggingMiddleware;

impl RequestLoggingMiddleware {
    /// Create request logging middleware
    pub fn new() -> Self {
        Self
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[async_trait]
impl Middleware for RequestLoggingMiddleware {
    async fn before_dispatch(&self, ctx: &mut RequestContext<'_>) -> Result<(), MiddlewareError> {
        ctx.add_metadata(START_MS_KEY, json!(now_ms()));
        info!(method = ctx.method(), "→ request starting");
        Ok(())
    }

    async fn after_dispatch(
        &self,
        ctx: &RequestContext<'_>,
        result: &mut DispatcherResult,
    ) -> Result<(), MiddlewareError> {
        let elapsed_ms = ctx
            .metadata()
            .get(START_MS_KEY)
            .and_then(|v| v.as_u64())
            .map(|start| now_ms().saturating_sub(start));

        info!(
            method = ctx.method(),
            success = result.is_success(),
            elapsed_ms,
            "← request completed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn records_start_timestamp_in_metadata() {
        let middleware = RequestLoggingMiddleware::new();
        let mut ctx = RequestContext::new("app/create", None);

        middleware.before_dispatch(&mut ctx).await.unwrap();
        assert!(ctx.metadata().get(START_MS_KEY).and_then(|v| v.as_u64()).is_some());

        let mut result = DispatcherResult::Success(json!({"ok": true}));
        middleware.after_dispatch(&ctx, &mut result).await.unwrap();
        // Logging middleware never alters the result
        assert_eq!(result, DispatcherResult::Success(json!({"ok": true})));
    }
}
