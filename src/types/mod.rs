//! Value types for login negotiation.
//!
//! Every value here is constructed fresh per request and dropped once the
//! [`Outcome`] has been handed to the transport.

pub mod outcome;
pub mod request;
pub mod ticket;

pub use outcome::{LoginForm, Messages, Outcome, Redirect};
pub use request::{RequestContext, RequestContextBuilder};
pub use ticket::{LoginTicket, ServiceTicket, TicketGrantingTicket, TicketValidationResult};
