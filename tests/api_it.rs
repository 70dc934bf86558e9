#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use reddit_oauth2::{
	_preludet::*,
	api::{Params, Submission, VoteDirection},
	auth::{Scope, ScopeSet, TokenRecord},
	error::{AuthorizationError, ValidationError},
	flows::{Remember, ReqwestRedditClient},
	http::{ApiResponse, HttpMethod},
};

async fn authorized_client(server: &MockServer) -> ReqwestRedditClient {
	let (client, _) = build_test_client(&server.base_url());

	client
		.set_token(token_fixture("abc", None, Duration::ZERO), Remember::Never)
		.await
		.expect("Seeding the token should succeed.");

	client
}

#[tokio::test]
async fn rate_limited_calls_surface_as_api_errors_without_retry() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server).await;
	let me = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/me");
			then.status(429)
				.header("content-type", "application/json")
				.header("x-ratelimit-remaining", "0.0")
				.header("x-ratelimit-used", "600")
				.header("x-ratelimit-reset", "42")
				.body(r#"{"error": "RATELIMIT"}"#);
		})
		.await;
	let err = client.me().await.expect_err("A 429 should be reported.");

	assert!(matches!(err, Error::Api { status: 429, ref message } if message == "RATELIMIT"));

	me.assert_calls_async(1).await;

	let info = client.transfer_info().expect("The transfer should be recorded.");

	assert_eq!(info.method, HttpMethod::Get);
	assert_eq!(info.status, 429);
	assert_eq!(info.url.path(), "/api/v1/me");
	assert_eq!(info.rate_limit.used, Some(600));
	assert_eq!(info.rate_limit.remaining, Some(0.0));
	assert_eq!(info.rate_limit.reset, Some(Duration::seconds(42)));
}

#[tokio::test]
async fn oversized_flair_text_is_rejected_before_any_request() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server).await;
	let flair = server
		.mock_async(|when, then| {
			when.method(POST).path("/r/rust/api/flair");
			then.status(200).body("");
		})
		.await;
	let text = "x".repeat(65);
	let err = client
		.set_link_flair("rust", "t3_abc", Some(&text), None)
		.await
		.expect_err("Flair text over 64 characters should be rejected.");

	assert!(matches!(
		err,
		Error::Validation(ValidationError::TooLong { max: 64, actual: 65, ref field }) if field == "text"
	));

	flair.assert_calls_async(0).await;
	assert!(client.transfer_info().is_none());
}

#[tokio::test]
async fn flair_is_posted_as_a_form_and_empty_bodies_decode_as_text() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server).await;
	let flair = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/r/rust/api/flair")
				.header("authorization", "bearer abc")
				.form_urlencoded_tuple("link", "t3_abc")
				.form_urlencoded_tuple("text", "Solved")
				.form_urlencoded_tuple("css_class", "solved")
				.form_urlencoded_tuple("api_type", "json");
			then.status(200).body("");
		})
		.await;
	let response = client
		.set_link_flair("rust", "t3_abc", Some("Solved"), Some("solved"))
		.await
		.expect("Flair update should succeed.");

	assert_eq!(response, ApiResponse::Text(String::new()));

	flair.assert_async().await;
}

#[tokio::test]
async fn json_envelope_errors_are_reported() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server).await;
	let _comment = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/comment").form_urlencoded_tuple("thing_id", "t3_abc");
			then.status(200).header("content-type", "application/json").body(
				json!({ "json": { "errors": [["TOO_LONG", "this is too long", "text"]] } })
					.to_string(),
			);
		})
		.await;
	let err = client.comment("t3_abc", "hello").await.expect_err("Envelope errors should fail.");

	assert!(matches!(
		err,
		Error::Api { status: 200, ref message } if message == "TOO_LONG: this is too long"
	));
}

#[tokio::test]
async fn listings_render_query_parameters() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server).await;
	let top = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/r/rust/top")
				.query_param("limit", "5")
				.query_param("t", "week")
				.query_param("sr_detail", "false");
			then.status(200)
				.header("content-type", "application/json")
				.body(json!({ "kind": "Listing", "data": { "children": [] } }).to_string());
		})
		.await;
	let params = Params::new()
		.text("subreddit", "rust")
		.integer("limit", 5)
		.text("t", "week")
		.boolean("sr_detail", false);
	let response = client.call("top", params).await.expect("Listing should succeed.");

	assert_eq!(response.as_json().and_then(|value| value["kind"].as_str()), Some("Listing"));

	top.assert_async().await;

	let err = client
		.call("top", Params::new().text("subreddit", "rust").integer("limit", 0))
		.await
		.expect_err("A zero limit should be rejected.");

	assert!(err.is_validation());

	let err = client
		.call("top", Params::new().text("subreddit", "rust").text("t", "decade"))
		.await
		.expect_err("An unknown time filter should be rejected.");

	assert!(matches!(err, Error::Validation(ValidationError::NotAllowed { .. })));

	top.assert_calls_async(1).await;
}

#[tokio::test]
async fn typed_wrappers_hit_their_endpoints() {
	let server = MockServer::start_async().await;
	let client = authorized_client(&server).await;
	let vote = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/vote")
				.form_urlencoded_tuple("id", "t1_xyz")
				.form_urlencoded_tuple("dir", "-1");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let submit = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/submit")
				.form_urlencoded_tuple("sr", "rust")
				.form_urlencoded_tuple("kind", "link")
				.form_urlencoded_tuple("url", "https://www.rust-lang.org")
				.form_urlencoded_tuple("spoiler", "true")
				.form_urlencoded_tuple("api_type", "json");
			then.status(200)
				.header("content-type", "application/json")
				.body(json!({ "json": { "errors": [], "data": { "name": "t3_new" } } }).to_string());
		})
		.await;

	client.vote("t1_xyz", VoteDirection::Down).await.expect("Vote should succeed.");
	client
		.submit(Submission::link("rust", "Rust", "https://www.rust-lang.org").spoiler(true))
		.await
		.expect("Submission should succeed.");

	vote.assert_async().await;
	submit.assert_async().await;

	let err = client.vote("abc", VoteDirection::Up).await.expect_err("Bad fullnames are rejected.");

	assert!(matches!(err, Error::Validation(ValidationError::InvalidFullname { .. })));
}

#[tokio::test]
async fn calls_require_a_token_with_the_endpoint_scope() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let me = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/me");
			then.status(200).body("{}");
		})
		.await;
	let flair = server
		.mock_async(|when, then| {
			when.method(POST).path("/r/rust/api/flair");
			then.status(200).body("{}");
		})
		.await;
	let err = client.me().await.expect_err("Calls without a token should fail.");

	assert!(matches!(err, Error::Authorization(AuthorizationError::MissingToken)));

	let read_only = TokenRecord::builder()
		.access_token("reader")
		.scope(ScopeSet::new(["read"]).expect("Scope should be valid."))
		.expires_in(Duration::hours(1))
		.build()
		.expect("Token should build.");

	client.set_token(read_only, Remember::Never).await.expect("Seeding the token should succeed.");

	let err = client
		.set_link_flair("rust", "t3_abc", Some("ok"), None)
		.await
		.expect_err("Flair requires modflair.");

	assert!(matches!(
		err,
		Error::Authorization(AuthorizationError::InsufficientScope { required: Scope::ModFlair, .. })
	));

	let err = client.call("nope", Params::new()).await.expect_err("Unknown endpoints fail.");

	assert!(matches!(err, Error::Validation(ValidationError::UnknownEndpoint { .. })));

	me.assert_calls_async(0).await;
	flair.assert_calls_async(0).await;
}

#[tokio::test]
async fn expired_tokens_are_refreshed_before_the_call() {
	let server = MockServer::start_async().await;
	let (client, _) = build_test_client(&server.base_url());
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v1/access_token");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("renewed", 3600, None, "identity"));
		})
		.await;
	let me = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/me").header("authorization", "bearer renewed");
			then.status(200).header("content-type", "application/json").body(r#"{"name":"alice"}"#);
		})
		.await;

	client
		.set_token(token_fixture("stale", Some("r1"), Duration::hours(3)), Remember::Never)
		.await
		.expect("Seeding the token should succeed.");
	client.me().await.expect("Identity call should succeed.");

	refresh.assert_calls_async(1).await;
	me.assert_calls_async(1).await;
}
