//! Results of login negotiation.

use crate::error::Result;
use http::header::LOCATION;
use http::{Response, StatusCode};
use serde::{Deserialize, Serialize};

/// Ordered, user-facing notices accumulated while evaluating a request.
///
/// Insertion order is evaluation order. No deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages(Vec<String>);

impl Messages {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Whether `message` is in the list.
    pub fn contains(&self, message: &str) -> bool {
        self.0.iter().any(|m| m == message)
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The messages as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Messages {
    fn from(messages: Vec<String>) -> Self {
        Self(messages)
    }
}

/// Redirect instruction for the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Fully qualified target, including the service ticket.
    pub location: String,

    /// Always `303 See Other`.
    pub status: StatusCode,
}

impl Redirect {
    /// A `303 See Other` redirect to `location`.
    pub fn see_other(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            status: StatusCode::SEE_OTHER,
        }
    }

    /// Build an empty-bodied HTTP response carrying the `Location` header.
    pub fn into_response(self) -> Result<Response<()>> {
        let response = Response::builder()
            .status(self.status)
            .header(LOCATION, self.location)
            .body(())?;
        Ok(response)
    }
}

/// Data to merge into the login page template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    /// Notices to display above the form, possibly empty.
    pub messages: Messages,

    /// Login ticket to embed in the form, when login tickets are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_ticket: Option<String>,
}

impl LoginForm {
    /// Variables for the login page template.
    ///
    /// Always has `messages`; `login_ticket` only when one was issued.
    pub fn template_context(&self) -> serde_json::Value {
        let mut context = serde_json::json!({ "messages": self.messages.as_slice() });
        if let Some(login_ticket) = &self.login_ticket {
            context["login_ticket"] = serde_json::Value::String(login_ticket.clone());
        }
        context
    }
}

/// What the transport should do with a login request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Send the browser back to the service with its ticket.
    Redirect(Redirect),

    /// Show the login form.
    Render(LoginForm),
}

impl Outcome {
    /// Whether this is a redirect.
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }

    /// The redirect target, if this is a redirect.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Redirect(redirect) => Some(&redirect.location),
            Self::Render(_) => None,
        }
    }

    /// The messages to render. Empty for redirects.
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Redirect(_) => &[],
            Self::Render(form) => form.messages.as_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_preserve_order_and_duplicates() {
        let mut messages = Messages::new();
        messages.push("first");
        messages.push("second");
        messages.push("first");

        assert_eq!(messages.len(), 3);
        assert_eq!(
            messages.iter().collect::<Vec<_>>(),
            vec!["first", "second", "first"]
        );
        assert!(messages.contains("second"));
        assert!(!messages.contains("third"));
    }

    #[test]
    fn test_messages_serialize_as_array() {
        let messages = Messages::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(serde_json::to_value(&messages).unwrap(), serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_template_context() {
        let mut form = LoginForm::default();
        assert_eq!(form.template_context(), serde_json::json!({ "messages": [] }));

        form.messages.push("Hi");
        form.login_ticket = Some("LT-1".to_string());
        assert_eq!(
            form.template_context(),
            serde_json::json!({ "messages": ["Hi"], "login_ticket": "LT-1" })
        );
    }

    #[test]
    fn test_redirect_into_response() {
        let response = Redirect::see_other("http://example.com?ticket=ST-1")
            .into_response()
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "http://example.com?ticket=ST-1"
        );
    }

    #[test]
    fn test_redirect_rejects_unrepresentable_location() {
        let result = Redirect::see_other("http://example.com/\nSet-Cookie: x=y").into_response();
        assert!(matches!(result, Err(crate::Error::InvalidRedirect(_))));
    }

    #[test]
    fn test_outcome_accessors() {
        let redirect = Outcome::Redirect(Redirect::see_other("http://example.com"));
        assert!(redirect.is_redirect());
        assert_eq!(redirect.location(), Some("http://example.com"));
        assert!(redirect.messages().is_empty());

        let mut messages = Messages::new();
        messages.push("hello");
        let render = Outcome::Render(LoginForm {
            messages,
            login_ticket: None,
        });
        assert!(!render.is_redirect());
        assert_eq!(render.location(), None);
        assert_eq!(render.messages(), ["hello".to_string()]);
    }
}
