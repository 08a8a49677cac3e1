//! In-memory ticket registry.
//!
//! [`TicketRegistry`] keeps ticket granting tickets, service tickets and login
//! tickets in [`DashMap`]s and implements every collaborator trait the login
//! engine needs. It is suitable for single-process deployments and tests;
//! tickets do not survive a restart.
//!
//! # Example
//!
//! ```rust
//! use cas_login::server::auth::{SsoValidator, TicketRegistry};
//!
//! # async fn example() -> cas_login::Result<()> {
//! let registry = TicketRegistry::default();
//! let session = registry.grant_session("bob", None);
//!
//! let result = registry.validate_cookie(&session.id).await?;
//! assert_eq!(result.username.as_deref(), Some("bob"));
//! # Ok(())
//! # }
//! ```

use super::traits::{LoginTicketIssuer, ServiceTicketIssuer, SsoValidator};
use crate::config::TicketConfig;
use crate::error::Result;
use crate::types::{LoginTicket, ServiceTicket, TicketGrantingTicket, TicketValidationResult};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;

/// Diagnostic for cookies that name no known session.
pub const UNKNOWN_SESSION: &str = "No ticket granting ticket found.";
/// Diagnostic for sessions past their lifetime.
pub const EXPIRED_SESSION: &str = "Your session has expired.";

/// Thread-safe in-memory ticket store.
#[derive(Debug, Default)]
pub struct TicketRegistry {
    config: TicketConfig,
    sessions: DashMap<String, TicketGrantingTicket>,
    service_tickets: DashMap<String, ServiceTicket>,
    login_tickets: DashMap<String, LoginTicket>,
}

impl TicketRegistry {
    /// Create an empty registry with the given ticket lifetimes.
    pub fn new(config: TicketConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Record a new SSO session for `username`.
    ///
    /// The returned ticket's `id` is the value the transport sets as the
    /// session cookie.
    pub fn grant_session(
        &self,
        username: impl Into<String>,
        client_host: Option<String>,
    ) -> TicketGrantingTicket {
        let ticket = TicketGrantingTicket::new(
            username,
            client_host,
            ttl(self.config.ticket_granting_ttl_secs),
        );
        self.sessions.insert(ticket.id.clone(), ticket.clone());
        tracing::debug!(username = %ticket.username, "Granted SSO session");
        ticket
    }

    /// Look up a service ticket by identifier.
    pub fn service_ticket(&self, id: &str) -> Option<ServiceTicket> {
        self.service_tickets.get(id).map(|t| t.value().clone())
    }

    /// Look up a login ticket by identifier.
    pub fn login_ticket(&self, id: &str) -> Option<LoginTicket> {
        self.login_tickets.get(id).map(|t| t.value().clone())
    }

    /// Number of live or not-yet-purged sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Remove expired tickets of every kind, returning how many went.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let service_ttl = ttl(self.config.service_ticket_ttl_secs);
        let mut removed = 0;

        // Counted per dropped entry; len() moves under concurrent inserts.
        self.sessions.retain(|_, t| keep(!t.is_expired(now), &mut removed));
        self.service_tickets
            .retain(|_, t| keep(!t.is_expired(now, service_ttl), &mut removed));
        self.login_tickets
            .retain(|_, t| keep(!t.is_expired(now), &mut removed));

        if removed > 0 {
            tracing::debug!(removed, "Purged expired tickets");
        }
        removed
    }
}

fn keep(live: bool, removed: &mut usize) -> bool {
    if !live {
        *removed += 1;
    }
    live
}

fn ttl(secs: u64) -> Duration {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

#[async_trait]
impl SsoValidator for TicketRegistry {
    async fn validate_cookie(&self, cookie: &str) -> Result<TicketValidationResult> {
        let Some(ticket) = self.sessions.get(cookie).map(|t| t.value().clone()) else {
            return Ok(TicketValidationResult::invalid(None, UNKNOWN_SESSION));
        };

        if ticket.is_expired(Utc::now()) {
            self.sessions.remove(cookie);
            tracing::debug!(username = %ticket.username, "SSO session expired");
            return Ok(TicketValidationResult::invalid(Some(ticket), EXPIRED_SESSION));
        }

        Ok(TicketValidationResult::valid(ticket))
    }
}

#[async_trait]
impl ServiceTicketIssuer for TicketRegistry {
    async fn generate_ticket_for(
        &self,
        service: &str,
        validation: &TicketValidationResult,
    ) -> Result<ServiceTicket> {
        let ticket = ServiceTicket::new(service).issued_from(validation);
        self.service_tickets
            .insert(ticket.id.clone(), ticket.clone());
        Ok(ticket)
    }
}

#[async_trait]
impl LoginTicketIssuer for TicketRegistry {
    async fn generate_login_ticket(&self, client_host: Option<&str>) -> Result<LoginTicket> {
        let ticket = LoginTicket::new(
            client_host.map(String::from),
            ttl(self.config.login_ticket_ttl_secs),
        );
        self.login_tickets.insert(ticket.id.clone(), ticket.clone());
        Ok(ticket)
    }
}
