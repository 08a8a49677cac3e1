//! End-to-end login negotiation against the in-memory ticket registry.
//!
//! Requests are built the way a transport would build them: from a
//! parameter map and the raw `Cookie` headers.

use std::collections::HashMap;
use std::sync::Arc;

use cas_login::config::{CasConfig, LoginConfig, TicketConfig};
use cas_login::server::auth::TicketRegistry;
use cas_login::server::login::messages;
use cas_login::types::{Outcome, RequestContext};
use cas_login::LoginNegotiator;
use http::header::{COOKIE, LOCATION};
use http::{HeaderMap, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn cookie_headers(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
    headers
}

type RegistryNegotiator =
    LoginNegotiator<Arc<TicketRegistry>, Arc<TicketRegistry>, Arc<TicketRegistry>>;

fn setup(config: &CasConfig) -> (Arc<TicketRegistry>, RegistryNegotiator) {
    let registry = Arc::new(TicketRegistry::new(config.tickets.clone()));
    let negotiator = LoginNegotiator::from_registry(Arc::clone(&registry), &config.login);
    (registry, negotiator)
}

#[tokio::test]
async fn returning_user_is_sent_back_with_a_stored_service_ticket() {
    let config = CasConfig::default();
    let (registry, negotiator) = setup(&config);
    let session = registry.grant_session("bob", Some("192.0.2.7".to_string()));

    let context = RequestContext::from_http(
        &params(&[("service", "https://app.example.com/?lang=en")]),
        &cookie_headers(&format!("theme=dark; tgt={}", session.id)),
        &config.login,
    );
    assert_eq!(context.sso_session_cookie(), Some(session.id.as_str()));

    let redirect = match negotiator.evaluate(&context).await.unwrap() {
        Outcome::Redirect(redirect) => redirect,
        other => panic!("expected redirect, got {:?}", other),
    };

    let ticket_id = redirect
        .location
        .strip_prefix("https://app.example.com/?lang=en&ticket=")
        .expect("ticket appended to existing query")
        .to_string();
    let ticket = registry.service_ticket(&ticket_id).expect("ticket stored");
    assert_eq!(ticket.username.as_deref(), Some("bob"));
    assert_eq!(ticket.granted_by.as_deref(), Some(session.id.as_str()));

    let response = redirect.into_response().unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[LOCATION],
        format!("https://app.example.com/?lang=en&ticket={}", ticket_id).as_str()
    );
}

#[tokio::test]
async fn unknown_cookie_renders_form_with_login_ticket() {
    let config = CasConfig::default();
    let (registry, negotiator) = setup(&config);

    let context = RequestContext::from_http(
        &params(&[("service", "https://app.example.com/")]),
        &cookie_headers("tgt=TGC-forged"),
        &config.login,
    )
    .with_client_host("198.51.100.4");

    let form = match negotiator.evaluate(&context).await.unwrap() {
        Outcome::Render(form) => form,
        other => panic!("expected render, got {:?}", other),
    };
    assert!(form.messages.is_empty());

    let login_ticket = form.login_ticket.expect("login ticket issued");
    assert!(login_ticket.starts_with("LT-"));
    let stored = registry.login_ticket(&login_ticket).expect("login ticket stored");
    assert_eq!(stored.client_host.as_deref(), Some("198.51.100.4"));
}

#[tokio::test]
async fn expired_session_is_not_greeted_and_is_forgotten() {
    let config = CasConfig {
        login: LoginConfig {
            issue_login_tickets: false,
            ..LoginConfig::default()
        },
        tickets: TicketConfig {
            ticket_granting_ttl_secs: 0,
            ..TicketConfig::default()
        },
    };
    let (registry, negotiator) = setup(&config);
    let session = registry.grant_session("bob", None);

    let context = RequestContext::builder()
        .sso_session_cookie(session.id)
        .redirection_loop_intercepted(true)
        .build();

    let form = match negotiator.evaluate(&context).await.unwrap() {
        Outcome::Render(form) => form,
        other => panic!("expected render, got {:?}", other),
    };
    assert_eq!(form.messages.as_slice(), [messages::REDIRECTION_LOOP.to_string()]);
    assert_eq!(form.login_ticket, None);
    assert_eq!(registry.session_count(), 0);
}

#[tokio::test]
async fn gateway_request_flags_come_from_parameters() {
    let config = CasConfig::default();
    let (registry, negotiator) = setup(&config);
    let session = registry.grant_session("bob", None);

    let context = RequestContext::from_http(
        &params(&[("gateway", "true"), ("redirection_loop_intercepted", "")]),
        &cookie_headers(&format!("tgt={}", session.id)),
        &config.login,
    );

    let outcome = negotiator.evaluate(&context).await.unwrap();
    assert_eq!(
        outcome.messages(),
        [
            messages::REDIRECTION_LOOP.to_string(),
            messages::logged_in_as("bob"),
            messages::GATEWAY_WITHOUT_SERVICE.to_string(),
        ]
    );
}

#[tokio::test]
async fn non_exact_gateway_value_is_ignored() {
    let config = CasConfig::default();
    let (_registry, negotiator) = setup(&config);

    let context = RequestContext::from_http(
        &params(&[("gateway", "yes")]),
        &HeaderMap::new(),
        &config.login,
    );
    assert!(!context.is_gateway());

    let outcome = negotiator.evaluate(&context).await.unwrap();
    assert!(outcome.messages().is_empty());
}

#[tokio::test]
async fn gateway_without_session_issues_anonymous_ticket() {
    let config = CasConfig::default();
    let (registry, negotiator) = setup(&config);

    let context = RequestContext::from_http(
        &params(&[("service", "http://example.com"), ("gateway", "1")]),
        &HeaderMap::new(),
        &config.login,
    );

    let location = negotiator
        .evaluate(&context)
        .await
        .unwrap()
        .location()
        .map(String::from)
        .expect("gateway redirects");
    let ticket_id = location.strip_prefix("http://example.com?ticket=").unwrap();

    let ticket = registry.service_ticket(ticket_id).unwrap();
    assert_eq!(ticket.username, None);
    assert_eq!(ticket.granted_by, None);
}

#[tokio::test]
async fn custom_cookie_name_is_honoured() {
    let config = CasConfig {
        login: LoginConfig {
            cookie_name: "CASTGC".to_string(),
            issue_login_tickets: false,
        },
        ..CasConfig::default()
    };
    let (registry, negotiator) = setup(&config);
    let session = registry.grant_session("alice", None);

    let context = RequestContext::from_http(
        &HashMap::new(),
        &cookie_headers(&format!("tgt=TGC-other; CASTGC={}", session.id)),
        &config.login,
    );

    let outcome = negotiator.evaluate(&context).await.unwrap();
    assert_eq!(outcome.messages(), [messages::logged_in_as("alice")]);
}
