//! The login negotiation engine.
//!
//! [`LoginNegotiator`] decides, for one [`RequestContext`], whether the
//! browser goes straight back to the requesting service with a fresh service
//! ticket or sees the login form, and which notices the form shows.
//!
//! # Decision procedure
//!
//! 1. An intercepted redirect loop queues [`messages::REDIRECTION_LOOP`].
//! 2. A session cookie is always validated. A live session queues
//!    [`messages::logged_in_as`]; a failed validation queues nothing.
//! 3. With a service named, a ticket is issued when the session is live and
//!    no renewal was demanded, or when gateway mode is on. A ticket with a
//!    usable service URI ends evaluation with a `303` redirect, dropping any
//!    queued notices. Otherwise [`messages::INVALID_SERVICE`] is queued.
//! 4. Without a service, gateway mode queues
//!    [`messages::GATEWAY_WITHOUT_SERVICE`].
//! 5. Everything else renders the form with the notices queued so far.
//!
//! # Example
//!
//! ```rust
//! use cas_login::server::auth::{MockSsoValidator, MockTicketIssuer};
//! use cas_login::server::LoginNegotiator;
//! use cas_login::types::{Outcome, RequestContext};
//!
//! # async fn example() -> cas_login::Result<()> {
//! let negotiator = LoginNegotiator::new(
//!     MockSsoValidator::logged_in("B"),
//!     MockTicketIssuer::with_ticket_id("XYZ"),
//! );
//!
//! let context = RequestContext::builder()
//!     .service("http://example.com")
//!     .sso_session_cookie("tgt")
//!     .build();
//!
//! let outcome = negotiator.evaluate(&context).await?;
//! assert_eq!(outcome.location(), Some("http://example.com?ticket=XYZ"));
//! # Ok(())
//! # }
//! ```

pub mod messages;

use crate::config::LoginConfig;
use crate::error::Result;
use crate::server::auth::{
    LoginTicketIssuer, NoLoginTickets, ServiceTicketIssuer, SsoValidator, TicketRegistry,
};
use crate::shared::http_utils::redact_ticket;
use crate::types::{LoginForm, Messages, Outcome, Redirect, RequestContext, TicketValidationResult};
use std::sync::Arc;

/// Diagnostic attached to the validation result handed to the issuer when
/// the request carried no session cookie.
pub const NO_SESSION_COOKIE: &str = "No SSO session cookie was presented.";

/// Stateless login decision engine.
///
/// Collaborators are injected at construction; each call to
/// [`evaluate`](Self::evaluate) is independent and may run concurrently with
/// any other.
#[derive(Debug, Clone)]
pub struct LoginNegotiator<V, I, L = NoLoginTickets> {
    validator: V,
    issuer: I,
    login_tickets: Option<L>,
}

impl<V, I> LoginNegotiator<V, I>
where
    V: SsoValidator,
    I: ServiceTicketIssuer,
{
    /// Create an engine that renders forms without login tickets.
    pub fn new(validator: V, issuer: I) -> Self {
        Self {
            validator,
            issuer,
            login_tickets: None,
        }
    }
}

impl LoginNegotiator<Arc<TicketRegistry>, Arc<TicketRegistry>, Arc<TicketRegistry>> {
    /// Create an engine backed entirely by one in-memory registry.
    ///
    /// Login tickets are issued when [`LoginConfig::issue_login_tickets`]
    /// is set.
    pub fn from_registry(registry: Arc<TicketRegistry>, config: &LoginConfig) -> Self {
        Self {
            validator: Arc::clone(&registry),
            issuer: Arc::clone(&registry),
            login_tickets: config.issue_login_tickets.then_some(registry),
        }
    }
}

impl<V, I, L> LoginNegotiator<V, I, L>
where
    V: SsoValidator,
    I: ServiceTicketIssuer,
    L: LoginTicketIssuer,
{
    /// Attach a login ticket issuer; every rendered form then carries one.
    pub fn with_login_tickets<T: LoginTicketIssuer>(self, issuer: T) -> LoginNegotiator<V, I, T> {
        LoginNegotiator {
            validator: self.validator,
            issuer: self.issuer,
            login_tickets: Some(issuer),
        }
    }

    /// Decide the outcome of one login request.
    ///
    /// # Errors
    ///
    /// Collaborator infrastructure failures propagate unchanged. Nothing is
    /// retried.
    pub async fn evaluate(&self, context: &RequestContext) -> Result<Outcome> {
        let mut notices = Messages::new();

        if context.redirection_loop_intercepted() {
            tracing::warn!(service = ?context.service(), "Redirection loop intercepted");
            notices.push(messages::REDIRECTION_LOOP);
        }

        let validation = match context.sso_session_cookie() {
            Some(cookie) => {
                let result = self.validator.validate_cookie(cookie).await?;
                tracing::debug!(
                    valid = result.is_valid(),
                    username = ?result.username,
                    "Validated SSO session cookie"
                );
                if let (false, Some(username)) = (result.has_error, result.username.as_deref()) {
                    notices.push(messages::logged_in_as(username));
                }
                Some(result)
            },
            None => None,
        };
        let has_valid_session = validation.as_ref().is_some_and(TicketValidationResult::is_valid);

        match context.service() {
            Some(service) => {
                let attempt_issuance =
                    (has_valid_session && !context.is_renewal()) || context.is_gateway();
                tracing::debug!(
                    has_valid_session,
                    renewal = context.is_renewal(),
                    gateway = context.is_gateway(),
                    attempt_issuance,
                    "Evaluated service request"
                );

                if attempt_issuance {
                    let validation = validation
                        .unwrap_or_else(|| TicketValidationResult::invalid(None, NO_SESSION_COOKIE));
                    let ticket = self.issuer.generate_ticket_for(service, &validation).await?;

                    match ticket.service_uri() {
                        Some(location) => {
                            tracing::info!(
                                location = %redact_ticket(&location),
                                username = ?ticket.username,
                                "Redirecting to service"
                            );
                            return Ok(Outcome::Redirect(Redirect::see_other(location)));
                        },
                        None => {
                            tracing::warn!(service = %ticket.service, "Invalid target service");
                            notices.push(messages::INVALID_SERVICE);
                        },
                    }
                }
            },
            None if context.is_gateway() => {
                tracing::debug!("Gateway request without service");
                notices.push(messages::GATEWAY_WITHOUT_SERVICE);
            },
            None => {},
        }

        self.render(context, notices).await
    }

    async fn render(&self, context: &RequestContext, notices: Messages) -> Result<Outcome> {
        let login_ticket = match &self.login_tickets {
            Some(issuer) => Some(issuer.generate_login_ticket(context.client_host()).await?.id),
            None => None,
        };

        Ok(Outcome::Render(LoginForm {
            messages: notices,
            login_ticket,
        }))
    }
}
