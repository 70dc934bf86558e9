#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use reddit_oauth2::{
	_preludet::*,
	flows::Remember,
	store::{StoreError, StoreFuture, TOKEN_KEY, TokenStore},
};

const REVOKE_PATH: &str = "/api/v1/revoke_token";

struct UnavailableStore;
impl UnavailableStore {
	fn failure<'a, T>() -> StoreFuture<'a, T>
	where
		T: 'a + Send,
	{
		Box::pin(async { Err(StoreError::Backend { message: "unavailable".into() }) })
	}
}
impl TokenStore for UnavailableStore {
	fn get<'a>(&'a self, _: &'a str) -> StoreFuture<'a, Option<String>> {
		Self::failure()
	}

	fn set<'a>(&'a self, _: &'a str, _: String, _: Option<Duration>) -> StoreFuture<'a, ()> {
		Self::failure()
	}

	fn delete<'a>(&'a self, _: &'a str) -> StoreFuture<'a, ()> {
		Self::failure()
	}
}

#[tokio::test]
async fn revoke_prefers_the_refresh_token_and_clears_state() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client(&server.base_url());
	let revoke = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(REVOKE_PATH)
				.header("authorization", TEST_BASIC_AUTH)
				.form_urlencoded_tuple("token", "r1")
				.form_urlencoded_tuple("token_type_hint", "refresh_token");
			then.status(204);
		})
		.await;

	client
		.set_token(token_fixture("access", Some("r1"), Duration::ZERO), Remember::For(3600))
		.await
		.expect("Seeding the token should succeed.");

	assert!(store.entry(TOKEN_KEY).is_some());

	client.revoke_token().await.expect("Revocation should succeed.");

	revoke.assert_async().await;
	assert!(client.token().is_none());
	assert!(store.is_empty());
	assert!(!client.is_authorized().await.expect("Authorization check should succeed."));
}

#[tokio::test]
async fn revoke_falls_back_to_the_access_token() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let revoke = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(REVOKE_PATH)
				.form_urlencoded_tuple("token", "access")
				.form_urlencoded_tuple("token_type_hint", "access_token");
			then.status(200).body("");
		})
		.await;

	client
		.set_token(token_fixture("access", None, Duration::ZERO), Remember::Never)
		.await
		.expect("Seeding the token should succeed.");
	client.logout().await.expect("Logout should succeed.");

	revoke.assert_async().await;
}

#[tokio::test]
async fn revoke_without_a_token_sends_nothing() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let revoke = server
		.mock_async(|when, then| {
			when.method(POST).path(REVOKE_PATH);
			then.status(204);
		})
		.await;

	client.unauthorize().await.expect("Revoking nothing should succeed.");

	revoke.assert_calls_async(0).await;
}

#[tokio::test]
async fn failed_revocation_still_clears_local_state() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client(&server.base_url());
	let _revoke = server
		.mock_async(|when, then| {
			when.method(POST).path(REVOKE_PATH);
			then.status(500).body("upstream down");
		})
		.await;

	client
		.set_token(token_fixture("access", Some("r1"), Duration::ZERO), Remember::For(60))
		.await
		.expect("Seeding the token should succeed.");

	let err = client.revoke_token().await.expect_err("A 500 should be reported.");

	assert!(
		matches!(err, Error::Api { status: 500, ref message } if message == "upstream down")
	);
	assert!(client.token().is_none());
	assert!(store.is_empty());
}

#[tokio::test]
async fn store_failures_still_clear_the_in_memory_token() {
	let server = MockServer::start_async().await;
	let client = build_test_client_with_store(&server.base_url(), Arc::new(UnavailableStore));
	let revoke = server
		.mock_async(|when, then| {
			when.method(POST).path(REVOKE_PATH);
			then.status(204);
		})
		.await;

	client
		.set_token(token_fixture("access", Some("r1"), Duration::ZERO), Remember::Never)
		.await
		.expect("Seeding an unremembered token should not touch the store.");

	let err = client.revoke_token().await.expect_err("The store failure should be reported.");

	assert!(matches!(err, Error::Storage(StoreError::Backend { .. })));
	assert!(client.token().is_none());

	revoke.assert_calls_async(0).await;
}
