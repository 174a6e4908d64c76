//! # Gantry Middleware Prelude
//!
//! Convenient re-exports of the most commonly used types.
//!
//! ```rust
//! use gantry_middleware::prelude::*;
//! ```

// Core middleware types
pub use crate::context::{DispatcherResult, RequestContext};
pub use crate::error::{MiddlewareError, error_codes};
pub use crate::stack::MiddlewareStack;
pub use crate::traits::Middleware;

// Context injection
pub use crate::inject::{
    ContextInjector, DeclarationRegistry, InjectableParameter, InjectionDeclaration,
    resolve_context_value,
};
pub use crate::path::{ParameterPath, PathParseError};

// Built-ins and dispatch
pub use crate::builtins::{AuthenticationMiddleware, RequestLoggingMiddleware};
pub use crate::config::{ConfigError, InjectionConfig};
pub use crate::dispatch::{Dispatcher, RpcHandler};

// Identity model
pub use gantry_auth::{AuthError, AuthUser, Organization, StaticKeyResolver, UserResolver};
