//! Async Reddit OAuth2 client: password and authorization-code grants, lazy refresh,
//! pluggable token persistence, and a validated catalog of Reddit's REST endpoints.
//!
//! Every endpoint call validates its parameters before any I/O, resolves the current token
//! (refreshing it once when expired), issues exactly one HTTP request, and decodes the body as
//! JSON with a raw-text fallback.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod store;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers shared by integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{ScopeSet, TokenRecord},
		config::{ClientConfig, RedditEndpoints},
		flows::ReqwestRedditClient,
		http::ReqwestTransport,
		store::{MemoryStore, TokenStore},
	};

	/// Client identifier used by test clients.
	pub const TEST_CLIENT_ID: &str = "test-client";
	/// Client secret used by test clients.
	pub const TEST_CLIENT_SECRET: &str = "test-secret";
	/// Redirect URI used by test clients.
	pub const TEST_REDIRECT_URI: &str = "http://localhost:8080/callback";
	/// User agent used by test clients.
	pub const TEST_USER_AGENT: &str = "reddit-oauth2-tests/0.1";
	/// `Authorization` header the token endpoint receives from test clients.
	pub const TEST_BASIC_AUTH: &str = "Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ=";

	/// Builds a configuration whose endpoints all live under `origin`.
	pub fn test_config(origin: &str) -> ClientConfig {
		ClientConfig::builder(TEST_CLIENT_ID)
			.client_secret(TEST_CLIENT_SECRET)
			.redirect_uri(TEST_REDIRECT_URI)
			.user_agent(TEST_USER_AGENT)
			.endpoints(
				RedditEndpoints::with_origin(origin)
					.expect("Mock server origin should be a valid endpoint base."),
			)
			.build()
			.expect("Test configuration should build.")
	}

	/// Builds a reqwest transport whose clients accept the self-signed certificates produced by
	/// `httpmock`.
	pub fn test_reqwest_transport() -> ReqwestTransport {
		let grant = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure grant client for tests.");
		let resource = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure resource client for tests.");

		ReqwestTransport::with_clients(grant, resource)
	}

	/// Constructs a client over `store` that talks to the mock server at `origin`.
	pub fn build_test_client_with_store(
		origin: &str,
		store: Arc<dyn TokenStore>,
	) -> ReqwestRedditClient {
		ReqwestRedditClient::with_transport(test_config(origin), store, test_reqwest_transport())
	}

	/// Constructs a test client over a fresh in-memory store, pointed at `origin`.
	pub fn build_test_client(origin: &str) -> (ReqwestRedditClient, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let client = build_test_client_with_store(origin, store_backend.clone());

		(client, store_backend)
	}

	/// Builds a one-hour token with every scope, issued `age` ago.
	pub fn token_fixture(access: &str, refresh: Option<&str>, age: Duration) -> TokenRecord {
		let mut builder = TokenRecord::builder()
			.access_token(access)
			.scope(ScopeSet::all())
			.issued_at(OffsetDateTime::now_utc() - age)
			.expires_in(Duration::hours(1));

		if let Some(refresh) = refresh {
			builder = builder.refresh_token(refresh);
		}

		builder.build().expect("Token fixture should build.")
	}

	/// Renders a token endpoint success payload.
	pub fn token_body(access: &str, expires_in: i64, refresh: Option<&str>, scope: &str) -> String {
		let mut body = serde_json::json!({
			"access_token": access,
			"token_type": "bearer",
			"expires_in": expires_in,
			"scope": scope,
		});

		if let Some(refresh) = refresh {
			body["refresh_token"] = serde_json::Value::from(refresh);
		}

		body.to_string()
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
