//! Error types for login negotiation.
//!
//! Only collaborator infrastructure failures are errors. Invalid sessions,
//! invalid service URIs and redirect loops are reported in-band through
//! [`TicketValidationResult`](crate::types::TicketValidationResult) and the
//! rendered [`Messages`](crate::types::Messages).

use thiserror::Error;

/// Errors produced by this crate.
///
/// # Examples
///
/// ```
/// use cas_login::Error;
///
/// let err = Error::validator("ticket store unavailable");
/// assert_eq!(
///     err.to_string(),
///     "SSO session validation failed: ticket store unavailable"
/// );
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// The SSO validator could not reach its backing store.
    #[error("SSO session validation failed: {0}")]
    Validator(String),

    /// The service ticket issuer failed to produce a ticket.
    #[error("service ticket issuance failed: {0}")]
    Issuer(String),

    /// The login ticket issuer failed to produce a ticket.
    #[error("login ticket issuance failed: {0}")]
    LoginTicket(String),

    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A redirect target could not be turned into a `Location` header.
    #[error("invalid redirect target: {0}")]
    InvalidRedirect(String),
}

impl Error {
    /// Create a validator infrastructure error.
    pub fn validator(message: impl Into<String>) -> Self {
        Self::Validator(message.into())
    }

    /// Create a service ticket issuer error.
    pub fn issuer(message: impl Into<String>) -> Self {
        Self::Issuer(message.into())
    }

    /// Create a login ticket issuer error.
    pub fn login_ticket(message: impl Into<String>) -> Self {
        Self::LoginTicket(message.into())
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether the error came from one of the engine's collaborators.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::Validator(_) | Self::Issuer(_) | Self::LoginTicket(_)
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Configuration(format!("TOML parse error: {}", err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::InvalidRedirect(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
