//! User-facing notices shown above the login form.
//!
//! The wording is part of the contract with existing login templates and
//! must not change.

/// Shown when the transport intercepted a redirect loop.
pub const REDIRECTION_LOOP: &str =
    "The client and server are unable to negotiate authentication.  Please try logging in again later.";

/// Shown when the service URI cannot carry a ticket.
pub const INVALID_SERVICE: &str =
    "The target service your browser supplied appears to be invalid. Please contact your system administrator for help.";

/// Shown for gateway requests that name no service.
pub const GATEWAY_WITHOUT_SERVICE: &str =
    "The server cannot fulfill this gateway request because no service parameter was given.";

/// Notice for a returning user with a live SSO session.
pub fn logged_in_as(username: &str) -> String {
    format!(
        "You are currently logged in as {}.  If this is not you, please log in below.",
        username
    )
}
