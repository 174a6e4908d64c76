//! Built-in middleware implementations
//!
//! Production-ready middleware for the common ends of the stack:
//!
//! - **Authentication**: resolve a credential from request metadata to an
//!   authenticated user (runs before the context injector)
//! - **Logging**: request/response logging with duration tracking

pub mod auth;
pub mod logging;

pub use auth::AuthenticationMiddleware;
pub use logging::RequestLoggingMiddleware;
