//! Login configuration.
//!
//! Configuration can be loaded from:
//! 1. TOML file (`cas-login.toml`)
//! 2. Environment variables (with `CAS_` prefix)
//!
//! Environment variables override TOML configuration.
//!
//! # Example TOML Configuration
//!
//! ```toml
//! [login]
//! cookie_name = "tgt"
//! issue_login_tickets = true
//!
//! [tickets]
//! ticket_granting_ttl_secs = 28800
//! service_ticket_ttl_secs = 300
//! login_ticket_ttl_secs = 300
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file looked up by [`CasConfig::load`].
pub const DEFAULT_CONFIG_FILE: &str = "cas-login.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasConfig {
    /// Login request handling.
    pub login: LoginConfig,

    /// Ticket lifetimes for the in-memory registry.
    pub tickets: TicketConfig,
}

impl CasConfig {
    /// Load configuration from file and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. `cas-login.toml` in the working directory
    /// 3. Default values
    pub fn load() -> Result<Self> {
        let mut config = if let Ok(contents) = std::fs::read_to_string(DEFAULT_CONFIG_FILE) {
            Self::from_toml(&contents)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::configuration(format!("{}: {}", path.as_ref().display(), e))
        })?;
        let mut config = Self::from_toml(&contents)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML content.
    ///
    /// Environment overrides are not applied.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Reject configurations the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.login.cookie_name.trim().is_empty() {
            return Err(Error::configuration("login.cookie_name must not be empty"));
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("CAS_LOGIN_COOKIE_NAME") {
            self.login.cookie_name = name;
        }
        if let Ok(v) = std::env::var("CAS_LOGIN_ISSUE_LOGIN_TICKETS") {
            if let Ok(b) = v.parse() {
                self.login.issue_login_tickets = b;
            }
        }

        if let Ok(v) = std::env::var("CAS_TGT_TTL_SECS") {
            if let Ok(secs) = v.parse() {
                self.tickets.ticket_granting_ttl_secs = secs;
            }
        }
        if let Ok(v) = std::env::var("CAS_ST_TTL_SECS") {
            if let Ok(secs) = v.parse() {
                self.tickets.service_ticket_ttl_secs = secs;
            }
        }
        if let Ok(v) = std::env::var("CAS_LT_TTL_SECS") {
            if let Ok(secs) = v.parse() {
                self.tickets.login_ticket_ttl_secs = secs;
            }
        }
    }
}

/// Login request handling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Name of the cookie carrying the ticket granting ticket.
    pub cookie_name: String,

    /// Whether rendered login forms carry a fresh login ticket.
    pub issue_login_tickets: bool,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            cookie_name: "tgt".to_string(),
            issue_login_tickets: true,
        }
    }
}

/// Ticket lifetimes, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketConfig {
    /// SSO session lifetime (default: 8 hours).
    pub ticket_granting_ttl_secs: u64,

    /// Service ticket lifetime (default: 5 minutes).
    pub service_ticket_ttl_secs: u64,

    /// Login ticket lifetime (default: 5 minutes).
    pub login_ticket_ttl_secs: u64,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            ticket_granting_ttl_secs: 28_800,
            service_ticket_ttl_secs: 300,
            login_ticket_ttl_secs: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CasConfig::default();
        assert_eq!(config.login.cookie_name, "tgt");
        assert!(config.login.issue_login_tickets);
        assert_eq!(config.tickets.ticket_granting_ttl_secs, 28_800);
        assert_eq!(config.tickets.service_ticket_ttl_secs, 300);
        assert_eq!(config.tickets.login_ticket_ttl_secs, 300);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = CasConfig::from_toml(
            r#"
            [login]
            cookie_name = "CASTGC"

            [tickets]
            service_ticket_ttl_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.login.cookie_name, "CASTGC");
        assert!(config.login.issue_login_tickets);
        assert_eq!(config.tickets.service_ticket_ttl_secs, 60);
        assert_eq!(config.tickets.ticket_granting_ttl_secs, 28_800);
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(CasConfig::from_toml("").unwrap(), CasConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        let err = CasConfig::from_toml("[tickets]\nservice_ticket_ttl_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_validate_empty_cookie_name() {
        let mut config = CasConfig::default();
        config.login.cookie_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = CasConfig::from_file("/nonexistent/cas-login.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/cas-login.toml"));
    }
}
