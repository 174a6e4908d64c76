//! # Authenticated Identity Model
//!
//! **User and organization identity types plus the credential-resolution seam
//! used by gantry middleware.**
//!
//! Authentication middleware resolves an opaque credential (an API key, a
//! bearer token) to an [`AuthUser`] through the [`UserResolver`] trait and
//! attaches the user to the request context. Downstream middleware — most
//! importantly the context injector — only ever reads the resolved user.

// Core trait and types
mod traits;
/// Identity types and the credential-resolution trait
pub use traits::*;

// Implementations
pub mod static_keys;

// Re-export for convenience
/// In-memory credential resolver for development and testing
pub use static_keys::StaticKeyResolver;
