//! Inbound request data consumed by the authorization-code flow.
//!
//! Web handlers build a [`RequestContext`] from the redirect they received and attach it to
//! the client with [`RedditClient::with_request_context`](crate::flows::RedditClient::with_request_context).

// self
use crate::_prelude::*;

/// Query parameters and user agent of the request currently being served.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
	/// Decoded query parameters of the inbound request.
	pub query: BTreeMap<String, String>,
	/// User agent the inbound request carried.
	pub user_agent: Option<String>,
}
impl RequestContext {
	/// Builds a context from decoded query pairs; later duplicates win.
	pub fn from_query<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			query: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
			user_agent: None,
		}
	}

	/// Builds a context from the full redirect URL Reddit sent the user back to.
	pub fn from_redirect_url(url: &Url) -> Self {
		Self::from_query(url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())))
	}

	/// Attaches the inbound user agent.
	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Looks up a query parameter, ignoring empty values.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.query.get(name).map(String::as_str).filter(|value| !value.is_empty())
	}

	/// Authorization code returned by the consent screen.
	pub fn code(&self) -> Option<&str> {
		self.param("code")
	}

	/// Anti-CSRF state echoed back by Reddit.
	pub fn state(&self) -> Option<&str> {
		self.param("state")
	}

	/// Error reported by the consent screen (for example `access_denied`).
	pub fn error(&self) -> Option<&str> {
		self.param("error")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn redirect_url_parameters_are_decoded() {
		let url = Url::parse("http://localhost:8080/cb?state=xyz&code=a%2Bb&error=")
			.expect("Redirect URL fixture should parse.");
		let context = RequestContext::from_redirect_url(&url).with_user_agent("browser/1.0");

		assert_eq!(context.code(), Some("a+b"));
		assert_eq!(context.state(), Some("xyz"));
		assert_eq!(context.error(), None);
		assert_eq!(context.user_agent.as_deref(), Some("browser/1.0"));
	}
}
