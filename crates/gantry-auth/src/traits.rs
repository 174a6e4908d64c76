//! Identity types and the credential-resolution trait
//!
//! The identity model is deliberately small: a user carries an identifier and
//! an optional organization, and the organization carries its own identifier.
//! Everything else about the account lives behind whatever backs the
//! [`UserResolver`] implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Organization a user belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique organization identifier
    pub id: String,
    /// Display name, if the backend provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Organization {
    /// Create an organization with just an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

/// Authenticated identity attached to an incoming call
///
/// Owned by the request pipeline for the duration of one call. Middleware
/// reads it; nothing mutates it after authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Unique user identifier
    pub id: String,
    /// Organization the user belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
}

impl AuthUser {
    /// Create a user with no organization
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            organization: None,
        }
    }

    /// Create a user belonging to the given organization
    pub fn with_organization(id: impl Into<String>, organization: Organization) -> Self {
        Self {
            id: id.into(),
            organization: Some(organization),
        }
    }

    /// Identifier of the user's organization, if the user belongs to one
    pub fn organization_id(&self) -> Option<&str> {
        self.organization.as_ref().map(|org| org.id.as_str())
    }
}

/// Error type for credential resolution
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("credential backend failure: {0}")]
    Backend(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Resolves an opaque credential to an authenticated user
///
/// Implementations range from the in-memory [`StaticKeyResolver`] used in
/// development and tests to database- or IdP-backed resolvers in production.
///
/// # Returns
///
/// - `Ok(Some(user))`: credential is known
/// - `Ok(None)`: credential is unknown (not an error; the caller decides how
///   to reject the request)
/// - `Err(error)`: the backing store failed
///
/// [`StaticKeyResolver`]: crate::StaticKeyResolver
#[async_trait]
pub trait UserResolver: Send + Sync {
    /// Resolve a credential to a user
    async fn resolve(&self, credential: &str) -> Result<Option<AuthUser>, AuthError>;
}
