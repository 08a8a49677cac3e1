//! Collaborators of the login engine.
//!
//! The engine only knows the traits in [`traits`]. This module also ships
//! two families of implementations:
//!
//! - [`TicketRegistry`]: an in-memory ticket store implementing every trait
//! - [`MockSsoValidator`], [`MockTicketIssuer`], [`MockLoginTicketIssuer`]:
//!   deterministic stand-ins for tests and local development

pub mod memory;
pub mod mock;
pub mod traits;

// Re-export core traits
pub use traits::{LoginTicketIssuer, NoLoginTickets, ServiceTicketIssuer, SsoValidator};

// Re-export the in-memory registry
pub use memory::TicketRegistry;

// Re-export mocks for testing
pub use mock::{IssuedFor, MockLoginTicketIssuer, MockSsoValidator, MockTicketIssuer};
