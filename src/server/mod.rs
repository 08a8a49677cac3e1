//! Server-side login handling.

pub mod auth;
pub mod login;

pub use login::LoginNegotiator;
