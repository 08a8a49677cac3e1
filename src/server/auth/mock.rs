//! Deterministic collaborators for development and testing.
//!
//! These stand-ins answer with a configured result and record every call,
//! so engine behaviour can be asserted without a ticket store.
//! **Never use in production.**
//!
//! # Example
//!
//! ```rust
//! use cas_login::server::auth::{MockSsoValidator, MockTicketIssuer};
//! use cas_login::server::LoginNegotiator;
//!
//! let validator = MockSsoValidator::logged_in("Bob");
//! let issuer = MockTicketIssuer::with_ticket_id("ST-XYZ");
//! let negotiator = LoginNegotiator::new(validator, issuer);
//! ```

use super::memory::UNKNOWN_SESSION;
use super::traits::{LoginTicketIssuer, ServiceTicketIssuer, SsoValidator};
use crate::error::{Error, Result};
use crate::types::{LoginTicket, ServiceTicket, TicketValidationResult};
use async_trait::async_trait;
use chrono::Duration;
use parking_lot::Mutex;
use std::sync::Arc;

/// Mock SSO validator returning a fixed validation result.
#[derive(Debug, Clone)]
pub struct MockSsoValidator {
    /// Result to return; `None` simulates an infrastructure failure.
    response: Option<TicketValidationResult>,
    /// Cookies seen, in call order.
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSsoValidator {
    /// Validate every cookie as a live session for `username`.
    pub fn logged_in(username: impl Into<String>) -> Self {
        Self::returning(TicketValidationResult::for_username(username))
    }

    /// Reject every cookie.
    pub fn invalid() -> Self {
        Self::returning(TicketValidationResult::invalid(None, UNKNOWN_SESSION))
    }

    /// Fail every call as if the ticket store were unreachable.
    pub fn unavailable() -> Self {
        Self {
            response: None,
            calls: Arc::default(),
        }
    }

    /// Return `result` for every cookie.
    pub fn returning(result: TicketValidationResult) -> Self {
        Self {
            response: Some(result),
            calls: Arc::default(),
        }
    }

    /// Cookies this validator has been asked about.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SsoValidator for MockSsoValidator {
    async fn validate_cookie(&self, cookie: &str) -> Result<TicketValidationResult> {
        self.calls.lock().push(cookie.to_string());
        self.response
            .clone()
            .ok_or_else(|| Error::validator("mock ticket store unavailable"))
    }
}

/// A recorded [`MockTicketIssuer`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedFor {
    /// Service the ticket was requested for.
    pub service: String,
    /// Validation result passed alongside.
    pub validation: TicketValidationResult,
}

/// Mock ticket issuer producing tickets with a fixed identifier.
///
/// The tickets carry the real [`ServiceTicket::service_uri`] logic, so an
/// invalid service yields a ticket without a redirect target.
#[derive(Debug, Clone)]
pub struct MockTicketIssuer {
    ticket_id: String,
    fail: bool,
    calls: Arc<Mutex<Vec<IssuedFor>>>,
}

impl MockTicketIssuer {
    /// Issue every ticket with identifier `ticket_id`.
    pub fn with_ticket_id(ticket_id: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            fail: false,
            calls: Arc::default(),
        }
    }

    /// Fail every call.
    pub fn unavailable() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<IssuedFor> {
        self.calls.lock().clone()
    }
}

impl Default for MockTicketIssuer {
    fn default() -> Self {
        Self::with_ticket_id("ST-mock")
    }
}

#[async_trait]
impl ServiceTicketIssuer for MockTicketIssuer {
    async fn generate_ticket_for(
        &self,
        service: &str,
        validation: &TicketValidationResult,
    ) -> Result<ServiceTicket> {
        self.calls.lock().push(IssuedFor {
            service: service.to_string(),
            validation: validation.clone(),
        });
        if self.fail {
            return Err(Error::issuer("mock ticket store unavailable"));
        }
        Ok(ServiceTicket::with_id(self.ticket_id.clone(), service).issued_from(validation))
    }
}

/// Mock login ticket issuer with a fixed identifier.
#[derive(Debug, Clone)]
pub struct MockLoginTicketIssuer {
    ticket_id: String,
    calls: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockLoginTicketIssuer {
    /// Issue every login ticket with identifier `ticket_id`.
    pub fn with_ticket_id(ticket_id: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            calls: Arc::default(),
        }
    }

    /// Client hosts seen, in call order.
    pub fn calls(&self) -> Vec<Option<String>> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl LoginTicketIssuer for MockLoginTicketIssuer {
    async fn generate_login_ticket(&self, client_host: Option<&str>) -> Result<LoginTicket> {
        self.calls.lock().push(client_host.map(String::from));
        let mut ticket = LoginTicket::new(client_host.map(String::from), Duration::minutes(5));
        ticket.id = self.ticket_id.clone();
        Ok(ticket)
    }
}
