//! The per-request snapshot the login engine evaluates.

use crate::config::LoginConfig;
use crate::shared::http_utils::find_cookie;
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Query/body parameter naming the requesting service.
pub const SERVICE_PARAM: &str = "service";
/// Parameter demanding fresh credential verification.
pub const RENEW_PARAM: &str = "renew";
/// Parameter requesting gateway mode.
pub const GATEWAY_PARAM: &str = "gateway";
/// Parameter the transport sets when it intercepts a redirect loop.
pub const REDIRECTION_LOOP_PARAM: &str = "redirection_loop_intercepted";

/// Whether a `gateway` parameter value enables gateway mode.
///
/// Only the exact strings `"1"` and `"true"` count.
///
/// ```
/// use cas_login::types::request::is_gateway_value;
///
/// assert!(is_gateway_value("1"));
/// assert!(is_gateway_value("true"));
/// assert!(!is_gateway_value("TRUE"));
/// assert!(!is_gateway_value("yes"));
/// ```
pub fn is_gateway_value(value: &str) -> bool {
    value == "1" || value == "true"
}

/// Immutable snapshot of one incoming login attempt.
///
/// # Example
///
/// ```
/// use cas_login::types::RequestContext;
///
/// let context = RequestContext::builder()
///     .service("http://example.com")
///     .gateway(true)
///     .sso_session_cookie("TGC-abc")
///     .build();
///
/// assert_eq!(context.service(), Some("http://example.com"));
/// assert!(context.is_gateway());
/// assert!(!context.is_renewal());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    service: Option<String>,
    renewal: Option<String>,
    gateway: bool,
    redirection_loop_intercepted: bool,
    sso_session_cookie: Option<String>,
    client_host: Option<String>,
}

impl RequestContext {
    /// Start building a context.
    pub fn builder() -> RequestContextBuilder {
        RequestContextBuilder::default()
    }

    /// Extract a context from request parameters and headers.
    ///
    /// `params` is the merged query/body parameter map. The session cookie
    /// is read from the `Cookie` headers under [`LoginConfig::cookie_name`].
    pub fn from_http(
        params: &HashMap<String, String>,
        headers: &HeaderMap,
        config: &LoginConfig,
    ) -> Self {
        Self {
            service: params.get(SERVICE_PARAM).cloned(),
            renewal: params.get(RENEW_PARAM).cloned(),
            gateway: params
                .get(GATEWAY_PARAM)
                .is_some_and(|v| is_gateway_value(v)),
            redirection_loop_intercepted: params.contains_key(REDIRECTION_LOOP_PARAM),
            sso_session_cookie: find_cookie(headers, &config.cookie_name),
            client_host: None,
        }
    }

    /// Attach the remote host the transport saw.
    pub fn with_client_host(mut self, client_host: impl Into<String>) -> Self {
        self.client_host = Some(client_host.into());
        self
    }

    /// URI of the requesting service, if one was named.
    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    /// Opaque renewal token, if the request demands fresh credentials.
    pub fn renewal(&self) -> Option<&str> {
        self.renewal.as_deref()
    }

    /// Whether fresh credential verification was demanded.
    pub fn is_renewal(&self) -> bool {
        self.renewal.is_some()
    }

    /// Whether gateway mode was requested.
    pub fn is_gateway(&self) -> bool {
        self.gateway
    }

    /// Whether the transport flagged a redirect loop.
    pub fn redirection_loop_intercepted(&self) -> bool {
        self.redirection_loop_intercepted
    }

    /// Value of the SSO session cookie, if present.
    pub fn sso_session_cookie(&self) -> Option<&str> {
        self.sso_session_cookie.as_deref()
    }

    /// Remote host, if the transport supplied one.
    pub fn client_host(&self) -> Option<&str> {
        self.client_host.as_deref()
    }
}

/// Builder for [`RequestContext`].
#[derive(Debug, Default)]
pub struct RequestContextBuilder {
    context: RequestContext,
}

impl RequestContextBuilder {
    /// Set the requesting service URI.
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.context.service = Some(service.into());
        self
    }

    /// Set the renewal token.
    pub fn renewal(mut self, renewal: impl Into<String>) -> Self {
        self.context.renewal = Some(renewal.into());
        self
    }

    /// Set gateway mode.
    pub fn gateway(mut self, gateway: bool) -> Self {
        self.context.gateway = gateway;
        self
    }

    /// Set the redirect loop flag.
    pub fn redirection_loop_intercepted(mut self, intercepted: bool) -> Self {
        self.context.redirection_loop_intercepted = intercepted;
        self
    }

    /// Set the SSO session cookie value.
    pub fn sso_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.context.sso_session_cookie = Some(cookie.into());
        self
    }

    /// Set the remote host.
    pub fn client_host(mut self, client_host: impl Into<String>) -> Self {
        self.context.client_host = Some(client_host.into());
        self
    }

    /// Finish building.
    pub fn build(self) -> RequestContext {
        self.context
    }
}
