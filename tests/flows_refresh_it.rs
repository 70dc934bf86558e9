#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use reddit_oauth2::{
	_preludet::*,
	auth::{Scope, TokenRecord},
	error::AuthorizationError,
	flows::Remember,
	store::{TOKEN_KEY, TokenStore},
};

const TOKEN_PATH: &str = "/api/v1/access_token";

#[tokio::test]
async fn expired_token_is_refreshed_exactly_once() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client(&server.base_url());
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.header("authorization", TEST_BASIC_AUTH)
				.form_urlencoded_tuple("grant_type", "refresh_token")
				.form_urlencoded_tuple("refresh_token", "r1");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("fresh", 3600, None, "identity read"));
		})
		.await;

	client
		.set_token(token_fixture("stale", Some("r1"), Duration::hours(2)), Remember::Never)
		.await
		.expect("Seeding the token should succeed.");

	assert!(client.is_authorized().await.expect("Authorization check should succeed."));
	assert!(client.is_authorized().await.expect("Authorization check should succeed."));

	refresh.assert_calls_async(1).await;

	let current = client.token().expect("Token should remain loaded.");

	assert_eq!(current.access_token.expose(), "fresh");
	assert_eq!(current.refresh_token.as_ref().map(|secret| secret.expose()), Some("r1"));
	assert!(current.scope.contains(Scope::Read));
	assert!(!current.scope.contains(Scope::Submit));
	assert!(!current.is_expired());
	assert!(store.is_empty(), "silent refreshes must not touch the store");
	assert_eq!(client.refresh_metrics.attempts(), 1);
	assert_eq!(client.refresh_metrics.successes(), 1);
	assert_eq!(client.refresh_metrics.failures(), 0);
}

#[tokio::test]
async fn valid_or_unrefreshable_tokens_are_not_refreshed() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).body(token_body("fresh", 3600, None, "identity"));
		})
		.await;

	assert!(!client.is_authorized().await.expect("Authorization check should succeed."));

	client
		.set_token(token_fixture("valid", Some("r1"), Duration::minutes(5)), Remember::Never)
		.await
		.expect("Seeding the token should succeed.");

	assert!(client.is_authorized().await.expect("Authorization check should succeed."));

	client
		.set_token(token_fixture("expired", None, Duration::hours(2)), Remember::Never)
		.await
		.expect("Seeding the token should succeed.");

	assert!(client.is_authorized().await.expect("Authorization check should succeed."));

	refresh.assert_calls_async(0).await;
	assert_eq!(client.refresh_metrics.attempts(), 0);
}

#[tokio::test]
async fn explicit_refresh_rotates_and_persists_when_remembered() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client(&server.base_url());
	let _refresh = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH).form_urlencoded_tuple("refresh_token", "r1");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("rotated", 1800, Some("r2"), "identity"));
		})
		.await;

	client
		.set_token(token_fixture("stale", Some("r1"), Duration::hours(2)), Remember::Never)
		.await
		.expect("Seeding the token should succeed.");

	let record =
		client.refresh_token(Remember::For(3600)).await.expect("Refresh should succeed.");

	assert_eq!(record.access_token.expose(), "rotated");
	assert_eq!(record.refresh_token.as_ref().map(|secret| secret.expose()), Some("r2"));
	assert_eq!(record.expires_in, Duration::minutes(30));

	let persisted = store
		.get(TOKEN_KEY)
		.await
		.expect("Store read should succeed.")
		.expect("Remembered refreshes should be persisted.");

	assert_eq!(TokenRecord::from_persisted(&persisted).expect("Token should decode."), record);
}

#[tokio::test]
async fn refresh_failures_are_reported() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let _refresh = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(400)
				.header("content-type", "application/json")
				.body(r#"{"error":"invalid_grant"}"#);
		})
		.await;
	let err = client
		.refresh_token(Remember::Never)
		.await
		.expect_err("Refreshing without a token should fail.");

	assert!(matches!(err, Error::Authorization(AuthorizationError::MissingToken)));

	client
		.set_token(token_fixture("access-only", None, Duration::ZERO), Remember::Never)
		.await
		.expect("Seeding the token should succeed.");

	let err = client
		.refresh_token(Remember::Never)
		.await
		.expect_err("Refreshing without a refresh token should fail.");

	assert!(matches!(err, Error::Authorization(AuthorizationError::MissingRefreshToken)));

	client
		.set_token(token_fixture("stale", Some("revoked"), Duration::hours(2)), Remember::Never)
		.await
		.expect("Seeding the token should succeed.");

	let err = client.is_authorized().await.expect_err("A rejected refresh should propagate.");

	assert!(matches!(err, Error::Authorization(AuthorizationError::InvalidGrant { .. })));
	assert_eq!(client.refresh_metrics.attempts(), 3);
	assert_eq!(client.refresh_metrics.failures(), 3);
}
