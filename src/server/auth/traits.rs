//! Collaborator traits consumed by the login engine.
//!
//! The engine never touches ticket storage directly. It only sees these
//! narrow interfaces, injected at construction time:
//!
//! - [`SsoValidator`] turns a session cookie into a [`TicketValidationResult`]
//! - [`ServiceTicketIssuer`] issues a [`ServiceTicket`] for a service
//! - [`LoginTicketIssuer`] issues the nonce embedded in the login form
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use cas_login::server::auth::SsoValidator;
//! use cas_login::types::TicketValidationResult;
//! use cas_login::Result;
//!
//! struct EveryoneIsBob;
//!
//! #[async_trait]
//! impl SsoValidator for EveryoneIsBob {
//!     async fn validate_cookie(&self, _cookie: &str) -> Result<TicketValidationResult> {
//!         Ok(TicketValidationResult::for_username("Bob"))
//!     }
//! }
//! ```

use crate::error::Result;
use crate::types::{LoginTicket, ServiceTicket, TicketValidationResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Validates SSO session cookies.
#[async_trait]
pub trait SsoValidator: Send + Sync {
    /// Validate a session cookie value.
    ///
    /// Unknown, expired or malformed cookies are reported with
    /// `has_error = true`, never as `Err`. Only infrastructure failures
    /// (storage unavailable) return an error.
    async fn validate_cookie(&self, cookie: &str) -> Result<TicketValidationResult>;
}

/// Issues service tickets.
#[async_trait]
pub trait ServiceTicketIssuer: Send + Sync {
    /// Issue a ticket for `service`, bound to the validated session.
    ///
    /// Must return a ticket for any `service` string, even one that is not a
    /// valid URI; such a ticket simply has no [`ServiceTicket::service_uri`].
    async fn generate_ticket_for(
        &self,
        service: &str,
        validation: &TicketValidationResult,
    ) -> Result<ServiceTicket>;
}

/// Issues login tickets for rendered login forms.
#[async_trait]
pub trait LoginTicketIssuer: Send + Sync {
    /// Issue a login ticket for the client at `client_host`.
    async fn generate_login_ticket(&self, client_host: Option<&str>) -> Result<LoginTicket>;
}

/// Placeholder issuer type for engines built without login tickets.
///
/// It has no values, so it can never be called.
#[derive(Debug, Clone, Copy)]
pub enum NoLoginTickets {}

#[async_trait]
impl LoginTicketIssuer for NoLoginTickets {
    async fn generate_login_ticket(&self, _client_host: Option<&str>) -> Result<LoginTicket> {
        match *self {}
    }
}

#[async_trait]
impl<T: SsoValidator + ?Sized> SsoValidator for Arc<T> {
    async fn validate_cookie(&self, cookie: &str) -> Result<TicketValidationResult> {
        (**self).validate_cookie(cookie).await
    }
}

#[async_trait]
impl<T: ServiceTicketIssuer + ?Sized> ServiceTicketIssuer for Arc<T> {
    async fn generate_ticket_for(
        &self,
        service: &str,
        validation: &TicketValidationResult,
    ) -> Result<ServiceTicket> {
        (**self).generate_ticket_for(service, validation).await
    }
}

#[async_trait]
impl<T: LoginTicketIssuer + ?Sized> LoginTicketIssuer for Arc<T> {
    async fn generate_login_ticket(&self, client_host: Option<&str>) -> Result<LoginTicket> {
        (**self).generate_login_ticket(client_host).await
    }
}
