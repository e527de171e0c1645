//! Engine configuration.
//!
//! Configuration is passed to [`PermissionEngine::new`](crate::PermissionEngine::new)
//! explicitly; nothing is read from ambient state at decision time. Values can
//! be loaded from environment variables with defaults suitable for local
//! development.

use grant_org::ADMIN_GROUP_ID;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Permission engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Group whose members are global administrators.
    pub admin_group_id: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            admin_group_id: ADMIN_GROUP_ID.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GRANT_ADMIN_GROUP_ID`: Reserved global administrator group
    ///   (default: `ffffffff-ffff-ffff-ffff-ffffffffffff`)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            admin_group_id: std::env::var("GRANT_ADMIN_GROUP_ID")
                .unwrap_or(default.admin_group_id),
        }
    }

    /// Set the global administrator group.
    pub fn with_admin_group(mut self, group_id: impl Into<String>) -> Self {
        self.admin_group_id = group_id.into();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin_group_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "GRANT_ADMIN_GROUP_ID".to_string(),
                message: "admin group id must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.admin_group_id, ADMIN_GROUP_ID);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_admin_group_is_rejected() {
        let config = EngineConfig::default().with_admin_group("  ");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
