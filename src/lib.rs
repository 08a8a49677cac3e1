//! Login negotiation for a CAS-style single-sign-on server.
//!
//! Given one incoming login request, the engine decides whether the requester
//! already holds a valid SSO session, whether a new service ticket should be
//! issued, and whether the browser is redirected back to the requesting
//! service or shown the login form with explanatory notices.
//!
//! # Overview
//!
//! - [`types`] - request snapshot, tickets and outcomes
//! - [`server::auth`] - collaborator traits, in-memory registry and mocks
//! - [`server::login`] - the [`LoginNegotiator`] decision engine
//! - [`config`] - TOML and environment configuration
//! - [`shared`] - cookie extraction and log redaction helpers
//!
//! HTTP serving, template rendering and credential checks are left to the
//! host application.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use cas_login::config::CasConfig;
//! use cas_login::server::auth::TicketRegistry;
//! use cas_login::types::{Outcome, RequestContext};
//! use cas_login::LoginNegotiator;
//!
//! # async fn example() -> cas_login::Result<()> {
//! let config = CasConfig::default();
//! let registry = Arc::new(TicketRegistry::new(config.tickets.clone()));
//! let negotiator = LoginNegotiator::from_registry(Arc::clone(&registry), &config.login);
//!
//! let session = registry.grant_session("bob", None);
//! let context = RequestContext::builder()
//!     .service("https://app.example.com/")
//!     .sso_session_cookie(session.id)
//!     .build();
//!
//! match negotiator.evaluate(&context).await? {
//!     Outcome::Redirect(redirect) => assert_eq!(redirect.status.as_u16(), 303),
//!     Outcome::Render(form) => unreachable!("unexpected form: {:?}", form),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod server;
pub mod shared;
pub mod types;

pub use error::{Error, Result};
pub use server::LoginNegotiator;
pub use types::{Outcome, RequestContext};
