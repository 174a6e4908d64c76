//! In-Memory Credential Resolver
//!
//! Maps static credentials to users with a plain `HashMap`. Suitable for:
//! - Development and testing
//! - Single-instance deployments with a fixed set of API keys

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use crate::{AuthError, AuthUser, UserResolver};

/// Credential resolver backed by a static in-memory map
#[derive(Debug, Clone, Default)]
pub struct StaticKeyResolver {
    /// Users by credential
    users: HashMap<String, AuthUser>,
}

impl StaticKeyResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a credential for a user, replacing any previous registration
    pub fn with_user(mut self, credential: impl Into<String>, user: AuthUser) -> Self {
        self.users.insert(credential.into(), user);
        self
    }

    /// Load a credential map from a JSON object of `credential -> user`
    pub fn from_json(json: &str) -> Result<Self, AuthError> {
        let users: HashMap<String, AuthUser> = serde_json::from_str(json)?;
        Ok(Self { users })
    }

    /// Number of registered credentials
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if no credentials are registered
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserResolver for StaticKeyResolver {
    async fn resolve(&self, credential: &str) -> Result<Option<AuthUser>, AuthError> {
        let user = self.users.get(credential).cloned();
        debug!(known = user.is_some(), "resolved static credential");
        Ok(user)
    }
}
