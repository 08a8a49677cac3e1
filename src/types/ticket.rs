//! Ticket types exchanged between the login engine and its collaborators.
//!
//! CAS uses three kinds of tickets at login time:
//!
//! | Ticket | Prefix | Lifetime | Purpose |
//! |--------|--------|----------|---------|
//! | [`TicketGrantingTicket`] | `TGC-` | hours | the SSO session behind the `tgt` cookie |
//! | [`ServiceTicket`] | `ST-` | minutes | lets one service trust the SSO session |
//! | [`LoginTicket`] | `LT-` | minutes | one-shot nonce embedded in the login form |

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Prefix for ticket granting ticket identifiers.
pub const TICKET_GRANTING_PREFIX: &str = "TGC-";
/// Prefix for service ticket identifiers.
pub const SERVICE_TICKET_PREFIX: &str = "ST-";
/// Prefix for login ticket identifiers.
pub const LOGIN_TICKET_PREFIX: &str = "LT-";

/// Generate a ticket identifier with the given prefix.
///
/// Identifiers are unique, not secret: they come from a v4 UUID and carry
/// no cryptographic guarantees beyond that.
pub fn generate_ticket_id(prefix: &str) -> String {
    format!("{}{}", prefix, uuid::Uuid::new_v4().simple())
}

fn expiry(from: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    from.checked_add_signed(ttl)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// An SSO session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketGrantingTicket {
    /// Ticket identifier, also the cookie value.
    pub id: String,

    /// Identity the session was granted to.
    pub username: String,

    /// Host the session was granted from, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_host: Option<String>,

    /// When the session was granted.
    pub created_at: DateTime<Utc>,

    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl TicketGrantingTicket {
    /// Create a new session for `username` that lives for `ttl`.
    pub fn new(username: impl Into<String>, client_host: Option<String>, ttl: Duration) -> Self {
        let created_at = Utc::now();
        Self {
            id: generate_ticket_id(TICKET_GRANTING_PREFIX),
            username: username.into(),
            client_host,
            created_at,
            expires_at: expiry(created_at, ttl),
        }
    }

    /// Whether the session has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Outcome of validating an SSO session cookie.
///
/// Failed validations are not errors: they set `has_error` and may still
/// carry the ticket that was found, for diagnostics.
///
/// # Example
///
/// ```
/// use cas_login::types::TicketValidationResult;
///
/// let result = TicketValidationResult::invalid(None, "No ticket granting ticket found.");
/// assert!(result.has_error);
/// assert!(result.username.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketValidationResult {
    /// The session ticket, when one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<TicketGrantingTicket>,

    /// Identity bound to the ticket. Only set on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// True when the session is invalid, expired or malformed.
    pub has_error: bool,

    /// Diagnostic text for failed validations. Never shown to the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TicketValidationResult {
    /// A successful validation of `ticket`.
    pub fn valid(ticket: TicketGrantingTicket) -> Self {
        Self {
            username: Some(ticket.username.clone()),
            ticket: Some(ticket),
            has_error: false,
            message: None,
        }
    }

    /// A successful validation that only knows the username.
    pub fn for_username(username: impl Into<String>) -> Self {
        Self {
            ticket: None,
            username: Some(username.into()),
            has_error: false,
            message: None,
        }
    }

    /// A failed validation.
    pub fn invalid(ticket: Option<TicketGrantingTicket>, message: impl Into<String>) -> Self {
        Self {
            ticket,
            username: None,
            has_error: true,
            message: Some(message.into()),
        }
    }

    /// Whether the session was validated successfully.
    pub fn is_valid(&self) -> bool {
        !self.has_error
    }
}

/// A ticket authorizing one service to trust the SSO session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTicket {
    /// Ticket identifier, appended to the redirect target.
    pub id: String,

    /// Service URI this ticket authorizes, exactly as the browser supplied it.
    pub service: String,

    /// Identity the ticket vouches for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Ticket granting ticket this ticket was issued from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted_by: Option<String>,

    /// When the ticket was issued.
    pub issued_at: DateTime<Utc>,
}

impl ServiceTicket {
    /// Create a ticket for `service` with a fresh identifier.
    pub fn new(service: impl Into<String>) -> Self {
        Self::with_id(generate_ticket_id(SERVICE_TICKET_PREFIX), service)
    }

    /// Create a ticket for `service` with a known identifier.
    pub fn with_id(id: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            service: service.into(),
            username: None,
            granted_by: None,
            issued_at: Utc::now(),
        }
    }

    /// Bind the ticket to the identity and session it was issued from.
    pub fn issued_from(mut self, validation: &TicketValidationResult) -> Self {
        self.username = validation.username.clone();
        self.granted_by = validation.ticket.as_ref().map(|t| t.id.clone());
        self
    }

    /// Whether a ticket with lifetime `ttl` has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now >= expiry(self.issued_at, ttl)
    }

    /// The redirect target: the service URI with this ticket appended.
    ///
    /// Returns `None` when `service` is not a valid absolute URI. Surrounding
    /// whitespace is trimmed; any other whitespace, control or non-ASCII
    /// character makes the URI invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use cas_login::types::ServiceTicket;
    ///
    /// let ticket = ServiceTicket::with_id("XYZ", "http://example.com");
    /// assert_eq!(ticket.service_uri().as_deref(), Some("http://example.com?ticket=XYZ"));
    ///
    /// let ticket = ServiceTicket::with_id("XYZ", "pickles");
    /// assert_eq!(ticket.service_uri(), None);
    /// ```
    pub fn service_uri(&self) -> Option<String> {
        let service = self.service.trim();
        if service.is_empty() || !service.bytes().all(|b| b.is_ascii_graphic()) {
            return None;
        }

        let parsed = Url::parse(service).ok()?;
        if parsed.cannot_be_a_base() {
            return None;
        }

        let (base, fragment) = match service.find('#') {
            Some(idx) => service.split_at(idx),
            None => (service, ""),
        };
        let separator = if base.ends_with('?') || base.ends_with('&') {
            ""
        } else if parsed.query().is_some() {
            "&"
        } else {
            "?"
        };

        let target = format!(
            "{}{}ticket={}{}",
            base,
            separator,
            urlencoding::encode(&self.id),
            fragment
        );

        Url::parse(&target).ok().map(|_| target)
    }
}

/// A one-shot nonce embedded in the rendered login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginTicket {
    /// Ticket identifier.
    pub id: String,

    /// Host the form was served to, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_host: Option<String>,

    /// When the ticket was issued.
    pub issued_at: DateTime<Utc>,

    /// When the ticket stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl LoginTicket {
    /// Create a login ticket that lives for `ttl`.
    pub fn new(client_host: Option<String>, ttl: Duration) -> Self {
        let issued_at = Utc::now();
        Self {
            id: generate_ticket_id(LOGIN_TICKET_PREFIX),
            client_host,
            issued_at,
            expires_at: expiry(issued_at, ttl),
        }
    }

    /// Whether the ticket has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
