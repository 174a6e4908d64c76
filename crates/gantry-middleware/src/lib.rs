//! # Request Middleware with Session-Context Injection
//!
//! **Trait-based middleware for JSON-RPC style services, built around
//! injecting authenticated-user-derived values into call arguments.**
//!
//! Handlers declare, via an explicit [`InjectionDeclaration`], "take this
//! value from the authenticated user and place it at this path in the
//! incoming arguments". The [`ContextInjector`] middleware performs the
//! write before the handler executes, so handler code never reads the
//! session by hand.
//!
//! # Overview
//!
//! The middleware system consists of:
//! - [`Middleware`] - Core trait for implementing middleware
//! - [`RequestContext`] - Normalized per-call context (method, arguments,
//!   metadata, authenticated user)
//! - [`MiddlewareStack`] - Ordered execution of multiple middleware layers
//! - [`ContextInjector`] - Injects user/organization identifiers into the
//!   argument tree at declared paths
//! - [`Dispatcher`] - Minimal method-routing pipeline the stack wraps
//!
//! # Examples
//!
//! ```rust,no_run
//! use gantry_middleware::{
//!     ContextInjector, DeclarationRegistry, InjectableParameter, InjectionDeclaration,
//! };
//!
//! let registry = DeclarationRegistry::new().declare(
//!     "app/create",
//!     InjectionDeclaration::new(
//!         InjectableParameter::UserId,
//!         "data.createdBy.id".parse().unwrap(),
//!     ),
//! );
//! let injector = ContextInjector::new(registry);
//! ```

pub mod builtins;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod inject;
pub mod path;
pub mod prelude;
pub mod stack;
pub mod traits;

pub use builtins::{AuthenticationMiddleware, RequestLoggingMiddleware};
pub use config::{ConfigError, InjectionConfig};
pub use context::{DispatcherResult, RequestContext};
pub use dispatch::{Dispatcher, RpcHandler};
pub use error::{MiddlewareError, error_codes};
pub use inject::{
    ContextInjector, DeclarationRegistry, InjectableParameter, InjectionDeclaration,
    resolve_context_value,
};
pub use path::{ParameterPath, PathParseError};
pub use stack::MiddlewareStack;
pub use traits::Middleware;

#[cfg(test)]
mod tests;
