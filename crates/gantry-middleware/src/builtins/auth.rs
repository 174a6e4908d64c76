//! Authentication middleware
//!
//! Reads a bearer credential from request metadata, resolves it through a
//! [`UserResolver`], and attaches the resulting [`AuthUser`] to the request
//! context for downstream middleware — the context injector in particular.

use std::sync::Arc;

use async_trait::async_trait;
use gantry_auth::{AuthUser, UserResolver};
use tracing::{info, warn};

use crate::{Middleware, MiddlewareError, RequestContext};

/// Metadata key the credential is read from
pub const AUTHORIZATION_KEY: &str = "authorization";

/// Middleware that authenticates the incoming call
///
/// The credential is taken from the `authorization` metadata entry, with an
/// optional `Bearer ` prefix. A missing or unknown credential rejects the
/// request with `Unauthenticated`; a resolver backend failure surfaces as
/// `Internal` without leaking backend details into the context.
pub struct AuthenticationMiddleware {
    resolver: Arc<dyn UserResolver>,
}

impl AuthenticationMiddleware {
    /// Create authentication middleware over the given resolver
    pub fn new(resolver: Arc<dyn UserResolver>) -> Self {
        Self { resolver }
    }

    fn credential<'c>(&self, ctx: &'c RequestContext<'_>) -> Option<&'c str> {
        let raw = ctx.metadata().get(AUTHORIZATION_KEY)?.as_str()?;
        Some(raw.strip_prefix("Bearer ").unwrap_or(raw))
    }
}

#[async_trait]
impl Middleware for AuthenticationMiddleware {
    async fn before_dispatch(&self, ctx: &mut RequestContext<'_>) -> Result<(), MiddlewareError> {
        let credential = self.credential(ctx).ok_or_else(|| {
            warn!(method = ctx.method(), "missing authorization metadata");
            MiddlewareError::unauthenticated("missing authorization metadata")
        })?;

        let user: AuthUser = match self.resolver.resolve(credential).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(method = ctx.method(), "unknown credential");
                return Err(MiddlewareError::unauthenticated("unknown credential"));
            }
            Err(err) => {
                return Err(MiddlewareError::internal(format!(
                    "credential resolution failed: {}",
                    err
                )));
            }
        };

        info!(method = ctx.method(), user_id = %user.id, "authenticated request");
        ctx.set_user(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_auth::{Organization, StaticKeyResolver};
    use serde_json::json;

    fn middleware() -> AuthenticationMiddleware {
        let resolver = StaticKeyResolver::new().with_user(
            "secret-key-123",
            AuthUser::with_organization("user-alice", Organization::new("org-1")),
        );
        AuthenticationMiddleware::new(Arc::new(resolver))
    }

    #[tokio::test]
    async fn attaches_resolved_user_to_context() {
        let mut ctx = RequestContext::new("app/create", None);
        ctx.add_metadata(AUTHORIZATION_KEY, json!("secret-key-123"));

        middleware().before_dispatch(&mut ctx).await.unwrap();
        assert_eq!(ctx.user().map(|u| u.id.as_str()), Some("user-alice"));
    }

    #[tokio::test]
    async fn strips_bearer_prefix() {
        let mut ctx = RequestContext::new("app/create", None);
        ctx.add_metadata(AUTHORIZATION_KEY, json!("Bearer secret-key-123"));

        middleware().before_dispatch(&mut ctx).await.unwrap();
        assert!(ctx.user().is_some());
    }

    #[tokio::test]
    async fn missing_credential_is_unauthenticated() {
        let mut ctx = RequestContext::new("app/create", None);

        let err = middleware().before_dispatch(&mut ctx).await.unwrap_err();
        assert!(matches!(err, MiddlewareError::Unauthenticated(_)));
        assert!(ctx.user().is_none());
    }

    #[tokio::test]
    async fn unknown_credential_is_unauthenticated() {
        let mut ctx = RequestContext::new("app/create", None);
        ctx.add_metadata(AUTHORIZATION_KEY, json!("wrong-key"));

        let err = middleware().before_dispatch(&mut ctx).await.unwrap_err();
        assert_eq!(err, MiddlewareError::unauthenticated("unknown credential"));
    }
}
