//! Helpers shared between request extraction and the login engine.

pub mod http_utils;

pub use http_utils::{find_cookie, redact_ticket};
