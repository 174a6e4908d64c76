//! Session-context injection
//!
//! The [`ContextInjector`] middleware resolves a value from the
//! authenticated user (its identifier, or its organization's identifier) and
//! writes it into the call's argument tree at a declared path, before the
//! handler executes. Handlers declare what to inject and where through an
//! explicit [`InjectionDeclaration`] registered per method — nothing is
//! discovered through runtime introspection.
//!
//! Operation order is fixed: declaration lookup, value resolution, argument
//! mutation, continue. Resolution failures abort the call before the
//! argument tree is touched.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use gantry_auth::AuthUser;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{Middleware, MiddlewareError, ParameterPath, RequestContext};

/// Which user-derived value an injection declaration resolves
///
/// The supported enumeration is closed: `UserId` and `OrganizationId`.
/// Declarations cross a string boundary (configuration files, registration
/// records), so an out-of-enumeration spelling is preserved as
/// [`Other`](Self::Other) and rejected at request time with
/// [`MiddlewareError::UnexpectedParameterType`] — never silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InjectableParameter {
    /// The authenticated user's identifier
    UserId,
    /// The identifier of the user's organization
    OrganizationId,
    /// Any spelling outside the supported enumeration; fatal when resolved
    Other(String),
}

impl FromStr for InjectableParameter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "UserId" => Self::UserId,
            "OrganizationId" => Self::OrganizationId,
            other => Self::Other(other.to_owned()),
        })
    }
}

impl From<String> for InjectableParameter {
    fn from(s: String) -> Self {
        match s.as_str() {
            "UserId" => Self::UserId,
            "OrganizationId" => Self::OrganizationId,
            _ => Self::Other(s),
        }
    }
}

impl From<InjectableParameter> for String {
    fn from(parameter: InjectableParameter) -> Self {
        parameter.to_string()
    }
}

impl fmt::Display for InjectableParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserId => write!(f, "UserId"),
            Self::OrganizationId => write!(f, "OrganizationId"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Declaration of what to inject and where
///
/// Declared once when a method is registered, read fresh on every
/// invocation, never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InjectionDeclaration {
    /// Which user-derived value to resolve
    pub parameter_type: InjectableParameter,
    /// Where inside the argument tree the resolved value is written
    pub parameter_path: ParameterPath,
}

impl InjectionDeclaration {
    /// Create a declaration
    pub fn new(parameter_type: InjectableParameter, parameter_path: ParameterPath) -> Self {
        Self {
            parameter_type,
            parameter_path,
        }
    }
}

/// Resolve the declared value from the authenticated user
///
/// # Returns
///
/// - `Ok(Some(value))`: the value to inject
/// - `Ok(None)`: legitimately absent (`OrganizationId` on a user with no
///   organization) — still written into the argument tree as `null`
/// - `Err(UnexpectedParameterType)`: the declaration names a parameter type
///   outside the supported enumeration; configuration defect, fatal
pub fn resolve_context_value(
    user: &AuthUser,
    parameter_type: &InjectableParameter,
) -> Result<Option<String>, MiddlewareError> {
    match parameter_type {
        InjectableParameter::UserId => Ok(Some(user.id.clone())),
        InjectableParameter::OrganizationId => Ok(user.organization_id().map(str::to_owned)),
        InjectableParameter::Other(name) => {
            Err(MiddlewareError::unexpected_parameter_type(name.clone()))
        }
    }
}

/// Injection declarations keyed by method name
///
/// The explicit replacement for handler-attached metadata: whoever wires the
/// [`ContextInjector`] to methods registers one declaration per method here.
#[derive(Debug, Clone, Default)]
pub struct DeclarationRegistry {
    declarations: HashMap<String, InjectionDeclaration>,
}

impl DeclarationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration for a method, builder-style
    ///
    /// **This method is additive** — each call registers one more method.
    /// Registering the same method twice keeps the later declaration.
    pub fn declare(mut self, method: impl Into<String>, declaration: InjectionDeclaration) -> Self {
        self.declarations.insert(method.into(), declaration);
        self
    }

    /// Get the declaration for a method, if one is registered
    pub fn get(&self, method: &str) -> Option<&InjectionDeclaration> {
        self.declarations.get(method)
    }

    /// Number of registered declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if no declarations are registered
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl FromIterator<(String, InjectionDeclaration)> for DeclarationRegistry {
    fn from_iter<I: IntoIterator<Item = (String, InjectionDeclaration)>>(iter: I) -> Self {
        Self {
            declarations: iter.into_iter().collect(),
        }
    }
}

/// Middleware that injects user-derived values into call arguments
///
/// For each intercepted call: look up the method's declaration, resolve the
/// declared value from the authenticated user, write it at the declared path
/// (creating intermediate objects as needed), and let the call proceed. The
/// injector never alters the response and never catches downstream errors.
///
/// Intercepting a method with no registered declaration is a configuration
/// defect and fails fast with [`MiddlewareError::MissingDeclaration`].
pub struct ContextInjector {
    registry: DeclarationRegistry,
}

impl ContextInjector {
    /// Create an injector over the given declarations
    pub fn new(registry: DeclarationRegistry) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Middleware for ContextInjector {
    async fn before_dispatch(&self, ctx: &mut RequestContext<'_>) -> Result<(), MiddlewareError> {
        let declaration = self
            .registry
            .get(ctx.method())
            .ok_or_else(|| MiddlewareError::missing_declaration(ctx.method()))?;

        let user = ctx
            .user()
            .ok_or_else(|| MiddlewareError::unauthenticated("no authenticated user on request"))?;

        let value = resolve_context_value(user, &declaration.parameter_type)?;

        debug!(
            method = ctx.method(),
            path = %declaration.parameter_path,
            present = value.is_some(),
            "injecting context value"
        );

        let value = value.map(Value::String).unwrap_or(Value::Null);
        declaration
            .parameter_path
            .set(ctx.params_mut_or_default(), value);

        Ok(())
    }
}
