// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, auth::ScopeSet, error::AuthorizationError, flows::Remember};

const STATE_LEN: usize = 32;

/// Authorization handshake metadata returned by
/// [`RedditClient::authorization_session`](crate::flows::RedditClient::authorization_session).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationSession {
	/// Requested scope set.
	pub scope: ScopeSet,
	/// Persistence requested for the resulting token.
	pub remember: Remember,
	/// Opaque anti-CSRF value that must round-trip via the redirect.
	pub state: String,
	/// Redirect URI embedded in the authorize URL.
	pub redirect_uri: Url,
	/// Consent screen URL the user must be sent to.
	pub authorize_url: Url,
}
impl AuthorizationSession {
	pub(crate) fn new(
		authorize_endpoint: &Url,
		client_id: &str,
		redirect_uri: Url,
		scope: ScopeSet,
		remember: Remember,
	) -> Self {
		let state = random_state();
		let authorize_url = build_authorize_url(
			authorize_endpoint,
			client_id,
			&redirect_uri,
			&scope,
			remember,
			&state,
		);

		Self { scope, remember, state, redirect_uri, authorize_url }
	}

	/// `permanent` or `temporary`, as sent to Reddit.
	pub fn duration(&self) -> &'static str {
		self.remember.duration()
	}

	/// Validates the `state` parameter returned by the redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state {
			Ok(())
		} else {
			Err(AuthorizationError::StateMismatch.into())
		}
	}
}

/// Builds the consent screen URL.
///
/// The result depends only on its inputs: `duration` is `permanent` when `remember` asks for at
/// least an hour and `temporary` otherwise, and scopes are comma-joined.
pub fn build_authorize_url(
	authorize_endpoint: &Url,
	client_id: &str,
	redirect_uri: &Url,
	scope: &ScopeSet,
	remember: Remember,
	state: &str,
) -> Url {
	let mut url = authorize_endpoint.clone();

	url.query_pairs_mut()
		.append_pair("client_id", client_id)
		.append_pair("response_type", "code")
		.append_pair("state", state)
		.append_pair("redirect_uri", redirect_uri.as_str())
		.append_pair("duration", remember.duration())
		.append_pair("scope", &scope.to_url_param());

	url
}

fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn endpoint() -> Url {
		Url::parse("https://www.reddit.com/api/v1/authorize")
			.expect("Authorize endpoint fixture should parse.")
	}

	fn redirect() -> Url {
		Url::parse("http://localhost:8080/cb").expect("Redirect fixture should parse.")
	}

	fn query(url: &Url) -> BTreeMap<String, String> {
		url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
	}

	#[test]
	fn authorize_url_is_a_pure_function_of_its_inputs() {
		let scope = ScopeSet::new(["submit", "identity"]).expect("Fixture scopes should be valid.");
		let remember = Remember::For(3600);
		let a = build_authorize_url(&endpoint(), "cid", &redirect(), &scope, remember, "s1");
		let b = build_authorize_url(&endpoint(), "cid", &redirect(), &scope, remember, "s1");

		assert_eq!(a, b);

		let params = query(&a);

		assert_eq!(params["client_id"], "cid");
		assert_eq!(params["response_type"], "code");
		assert_eq!(params["state"], "s1");
		assert_eq!(params["redirect_uri"], "http://localhost:8080/cb");
		assert_eq!(params["duration"], "permanent");
		assert_eq!(params["scope"], "identity,submit");
	}

	#[test]
	fn duration_depends_on_remember_threshold() {
		let scope = ScopeSet::new(["read"]).expect("Fixture scope should be valid.");

		for (remember, expected) in [
			(Remember::For(3600), "permanent"),
			(Remember::For(86_400), "permanent"),
			(Remember::For(3599), "temporary"),
			(Remember::Never, "temporary"),
		] {
			let url = build_authorize_url(&endpoint(), "cid", &redirect(), &scope, remember, "s");

			assert_eq!(query(&url)["duration"], expected, "remember = {remember:?}");
		}
	}

	#[test]
	fn sessions_carry_fresh_state_and_validate_it() {
		let scope = ScopeSet::all();
		let first =
			AuthorizationSession::new(&endpoint(), "cid", redirect(), scope.clone(), Remember::Never);
		let second =
			AuthorizationSession::new(&endpoint(), "cid", redirect(), scope, Remember::Never);

		assert_eq!(first.state.len(), STATE_LEN);
		assert!(first.state.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(first.state, second.state);
		assert_eq!(query(&first.authorize_url)["state"], first.state);
		assert!(first.validate_state(&first.state).is_ok());
		assert!(matches!(
			first.validate_state("forged"),
			Err(Error::Authorization(AuthorizationError::StateMismatch))
		));
	}
}
