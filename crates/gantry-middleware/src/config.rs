//! Declarative injection configuration
//!
//! Injection declarations can be wired in code through
//! [`DeclarationRegistry::declare`](crate::DeclarationRegistry::declare) or
//! loaded from a TOML file:
//!
//! ```toml
//! [injection."app/create"]
//! parameter-type = "UserId"
//! parameter-path = "data.createdBy.id"
//!
//! [injection."app/list"]
//! parameter-type = "OrganizationId"
//! parameter-path = "filter.orgId"
//! ```
//!
//! Parameter paths are validated at load time (an empty path or segment is
//! a parse error). Parameter types outside the supported enumeration load
//! as [`InjectableParameter::Other`](crate::InjectableParameter::Other) and
//! fail at request time, matching declarations registered in code.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::{DeclarationRegistry, InjectionDeclaration};

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Injection declarations loaded from configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InjectionConfig {
    /// Declarations keyed by method name
    #[serde(default)]
    injection: HashMap<String, InjectionDeclaration>,
}

impl InjectionConfig {
    /// Load configuration from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = contents.parse()?;
        debug!(path = %path.display(), "loaded injection config");
        Ok(config)
    }

    /// Number of declared methods
    pub fn len(&self) -> usize {
        self.injection.len()
    }

    /// Check if no methods are declared
    pub fn is_empty(&self) -> bool {
        self.injection.is_empty()
    }

    /// Convert into a [`DeclarationRegistry`]
    pub fn into_registry(self) -> DeclarationRegistry {
        self.injection.into_iter().collect()
    }
}

impl FromStr for InjectionConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InjectableParameter;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [injection."app/create"]
        parameter-type = "UserId"
        parameter-path = "data.createdBy.id"

        [injection."app/list"]
        parameter-type = "OrganizationId"
        parameter-path = "filter.orgId"
    "#;

    #[test]
    fn parses_declarations_from_toml() {
        let config: InjectionConfig = SAMPLE.parse().unwrap();
        assert_eq!(config.len(), 2);

        let registry = config.into_registry();
        let declaration = registry.get("app/create").unwrap();
        assert_eq!(declaration.parameter_type, InjectableParameter::UserId);
        assert_eq!(declaration.parameter_path.to_string(), "data.createdBy.id");
    }

    #[test]
    fn unknown_parameter_type_survives_parsing_as_other() {
        let config: InjectionConfig = r#"
            [injection."app/create"]
            parameter-type = "TenantId"
            parameter-path = "data.tenantId"
        "#
        .parse()
        .unwrap();

        let registry = config.into_registry();
        assert_eq!(
            registry.get("app/create").unwrap().parameter_type,
            InjectableParameter::Other("TenantId".to_string())
        );
    }

    #[test]
    fn invalid_path_fails_at_load() {
        let result: Result<InjectionConfig, _> = r#"
            [injection."app/create"]
            parameter-type = "UserId"
            parameter-path = "data..id"
        "#
        .parse();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn empty_config_is_an_empty_registry() {
        let config: InjectionConfig = "".parse().unwrap();
        assert!(config.is_empty());
        assert!(config.into_registry().is_empty());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = InjectionConfig::from_path(file.path()).unwrap();
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = InjectionConfig::from_path("/nonexistent/injection.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
