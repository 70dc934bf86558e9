//! Client credentials, endpoint configuration, and environment loading.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Default authorize endpoint.
pub const AUTHORIZE_URL: &str = "https://www.reddit.com/api/v1/authorize";
/// Default token endpoint.
pub const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
/// Default revoke endpoint.
pub const REVOKE_URL: &str = "https://www.reddit.com/api/v1/revoke_token";
/// Default base for authenticated resource requests.
pub const API_BASE_URL: &str = "https://oauth.reddit.com";

const ENV_CLIENT_ID: &str = "REDDIT_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "REDDIT_CLIENT_SECRET";
const ENV_REDIRECT_URI: &str = "REDDIT_REDIRECT_URI";
const ENV_USER_AGENT: &str = "REDDIT_USER_AGENT";

/// Reddit endpoints used by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedditEndpoints {
	/// Consent screen the user is redirected to.
	pub authorize: Url,
	/// Token endpoint for every grant.
	pub token: Url,
	/// Token revocation endpoint.
	pub revoke: Url,
	/// Base URL that resource paths are joined onto.
	pub api_base: Url,
}
impl RedditEndpoints {
	/// Parses and validates the four endpoint URLs.
	pub fn new(
		authorize: &str,
		token: &str,
		revoke: &str,
		api_base: &str,
	) -> Result<Self, ConfigError> {
		let endpoints = Self {
			authorize: parse_url("authorize", authorize)?,
			token: parse_url("token", token)?,
			revoke: parse_url("revoke", revoke)?,
			api_base: parse_url("api_base", api_base)?,
		};

		endpoints.validate()?;

		Ok(endpoints)
	}

	/// Reddit's production endpoints.
	pub fn reddit() -> Result<Self, ConfigError> {
		Self::new(AUTHORIZE_URL, TOKEN_URL, REVOKE_URL, API_BASE_URL)
	}

	/// Points every endpoint at a single origin, keeping Reddit's paths.
	///
	/// Mostly useful for tests running against a local mock server.
	pub fn with_origin(origin: &str) -> Result<Self, ConfigError> {
		let origin = origin.trim_end_matches('/');

		Self::new(
			&format!("{origin}/api/v1/authorize"),
			&format!("{origin}/api/v1/access_token"),
			&format!("{origin}/api/v1/revoke_token"),
			origin,
		)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		validate_scheme("authorize", &self.authorize)?;
		validate_scheme("token", &self.token)?;
		validate_scheme("revoke", &self.revoke)?;
		validate_scheme("api_base", &self.api_base)
	}
}

/// Immutable client credentials and transport settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
	/// OAuth client identifier issued by Reddit.
	pub client_id: String,
	/// Client secret; empty for installed apps.
	pub client_secret: String,
	/// Redirect URI registered with the app, required by the authorization-code flow.
	pub redirect_uri: Option<Url>,
	/// Application user agent sent with every request.
	pub user_agent: Option<String>,
	/// Endpoint set the client talks to.
	pub endpoints: RedditEndpoints,
	/// Disables TLS peer and host verification for grant requests.
	pub danger_accept_invalid_certs: bool,
}
impl ClientConfig {
	/// Starts a builder for the given client identifier.
	pub fn builder(client_id: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(client_id)
	}

	/// Loads configuration from `REDDIT_CLIENT_ID`, `REDDIT_CLIENT_SECRET`,
	/// `REDDIT_REDIRECT_URI`, and `REDDIT_USER_AGENT`.
	///
	/// Only the client identifier is mandatory.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| env::var(name).ok())
	}

	pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
		let client_id =
			non_empty(ENV_CLIENT_ID).ok_or(ConfigError::MissingEnv { name: ENV_CLIENT_ID })?;
		let mut builder = Self::builder(client_id);

		if let Some(secret) = non_empty(ENV_CLIENT_SECRET) {
			builder = builder.client_secret(secret);
		}
		if let Some(redirect) = non_empty(ENV_REDIRECT_URI) {
			builder = builder.redirect_uri(redirect);
		}
		if let Some(user_agent) = non_empty(ENV_USER_AGENT) {
			builder = builder.user_agent(user_agent);
		}

		builder.build()
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.field("redirect_uri", &self.redirect_uri)
			.field("user_agent", &self.user_agent)
			.field("endpoints", &self.endpoints)
			.field("danger_accept_invalid_certs", &self.danger_accept_invalid_certs)
			.finish()
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	client_id: String,
	client_secret: String,
	redirect_uri: Option<String>,
	user_agent: Option<String>,
	endpoints: Option<RedditEndpoints>,
	danger_accept_invalid_certs: bool,
}
impl ClientConfigBuilder {
	fn new(client_id: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: String::new(),
			redirect_uri: None,
			user_agent: None,
			endpoints: None,
			danger_accept_invalid_certs: false,
		}
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = secret.into();

		self
	}

	/// Sets the redirect URI registered with the app.
	pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(uri.into());

		self
	}

	/// Sets the application user agent.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Overrides the endpoint set.
	pub fn endpoints(mut self, endpoints: RedditEndpoints) -> Self {
		self.endpoints = Some(endpoints);

		self
	}

	/// Relaxes TLS verification for grant requests.
	pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
		self.danger_accept_invalid_certs = accept;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingClientId);
		}

		let redirect_uri = self
			.redirect_uri
			.as_deref()
			.map(|raw| parse_url("redirect", raw))
			.transpose()?;

		if let Some(uri) = redirect_uri.as_ref() {
			validate_scheme("redirect", uri)?;
		}

		let endpoints = match self.endpoints {
			Some(endpoints) => {
				endpoints.validate()?;

				endpoints
			},
			None => RedditEndpoints::reddit()?,
		};

		Ok(ClientConfig {
			client_id: self.client_id,
			client_secret: self.client_secret,
			redirect_uri,
			user_agent: self.user_agent.filter(|ua| !ua.is_empty()),
			endpoints,
			danger_accept_invalid_certs: self.danger_accept_invalid_certs,
		})
	}
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { name, source })
}

fn validate_scheme(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		_ => Err(ConfigError::UnsupportedScheme { name, url: url.to_string() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_rejects_empty_client_id_and_bad_redirects() {
		assert!(matches!(ClientConfig::builder(" ").build(), Err(ConfigError::MissingClientId)));
		assert!(matches!(
			ClientConfig::builder("id").redirect_uri("not a url").build(),
			Err(ConfigError::InvalidUrl { name: "redirect", .. })
		));
		assert!(matches!(
			ClientConfig::builder("id").redirect_uri("ftp://example.com/cb").build(),
			Err(ConfigError::UnsupportedScheme { name: "redirect", .. })
		));
	}

	#[test]
	fn defaults_point_at_reddit() {
		let config = ClientConfig::builder("id").build().expect("Minimal config should build.");

		assert_eq!(config.endpoints.token.as_str(), TOKEN_URL);
		assert_eq!(config.endpoints.api_base.as_str(), "https://oauth.reddit.com/");
		assert!(!config.danger_accept_invalid_certs);
		assert!(config.redirect_uri.is_none());
	}

	#[test]
	fn with_origin_keeps_reddit_paths() {
		let endpoints = RedditEndpoints::with_origin("http://127.0.0.1:8080/")
			.expect("Loopback origin should be accepted.");

		assert_eq!(endpoints.token.as_str(), "http://127.0.0.1:8080/api/v1/access_token");
		assert_eq!(endpoints.revoke.path(), "/api/v1/revoke_token");
		assert_eq!(endpoints.api_base.as_str(), "http://127.0.0.1:8080/");
	}

	#[test]
	fn environment_lookup_requires_client_id() {
		let missing = ClientConfig::from_lookup(|_| None);

		assert!(matches!(missing, Err(ConfigError::MissingEnv { name: "REDDIT_CLIENT_ID" })));

		let config = ClientConfig::from_lookup(|name| match name {
			"REDDIT_CLIENT_ID" => Some("abc".into()),
			"REDDIT_CLIENT_SECRET" => Some("shh".into()),
			"REDDIT_REDIRECT_URI" => Some("http://localhost:8080/cb".into()),
			"REDDIT_USER_AGENT" => Some("  ".into()),
			_ => None,
		})
		.expect("Environment config should build.");

		assert_eq!(config.client_id, "abc");
		assert_eq!(config.client_secret, "shh");
		assert_eq!(
			config.redirect_uri.as_ref().map(Url::as_str),
			Some("http://localhost:8080/cb")
		);
		assert_eq!(config.user_agent, None);
		assert!(!format!("{config:?}").contains("shh"));
	}
}
