//! Shared helpers for grant flows (persistence policy, token endpoint calls, response parsing).

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{Scope, ScopeSet, TokenRecord, WILDCARD},
	error::{AuthorizationError, ConfigError, ValidationError},
	flows::RedditClient,
	http::{self, ApiRequest, HttpMethod, HttpTransport, RawResponse, RequestAuth, RequestBody},
};

/// Token lifetime Reddit assumes when the response omits `expires_in`.
const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Whether and how long a token should be persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Remember {
	/// Keep the token in memory only.
	#[default]
	Never,
	/// Persist the token for the given number of seconds.
	For(u64),
}
impl Remember {
	/// Remember durations at or above this many seconds request a `permanent` authorization.
	pub const PERMANENT_THRESHOLD_SECS: u64 = 3600;

	/// Returns the `duration` value sent to the authorize endpoint.
	pub fn duration(self) -> &'static str {
		match self {
			Remember::For(secs) if secs >= Self::PERMANENT_THRESHOLD_SECS => "permanent",
			_ => "temporary",
		}
	}

	/// Returns `true` when the authorization should yield a refresh token.
	pub fn is_permanent(self) -> bool {
		self.duration() == "permanent"
	}

	/// Store time-to-live, or `None` when nothing should be persisted.
	pub fn ttl(self) -> Option<Duration> {
		match self {
			Remember::Never => None,
			Remember::For(secs) => Some(Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))),
		}
	}
}
impl From<Option<u64>> for Remember {
	fn from(value: Option<u64>) -> Self {
		value.map(Remember::For).unwrap_or(Remember::Never)
	}
}

/// Token endpoint payload, successful or not.
///
/// Reddit answers rejected grants with HTTP 200 and an `error` member, so every field is
/// optional and classification happens after decoding.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct TokenResponse {
	access_token: Option<String>,
	token_type: Option<String>,
	expires_in: Option<i64>,
	refresh_token: Option<String>,
	scope: Option<String>,
	error: Option<Value>,
	message: Option<String>,
}
impl TokenResponse {
	fn error_reason(&self) -> Option<String> {
		let error = self.error.as_ref()?;

		Some(match (error, self.message.as_deref()) {
			(Value::String(code), _) => code.clone(),
			(_, Some(message)) => message.to_owned(),
			(other, None) => other.to_string(),
		})
	}

	/// Builds a record stamped with the current time.
	///
	/// `fallback_scope` applies when the response carries no scope.
	fn into_record(self, fallback_scope: &ScopeSet) -> Result<TokenRecord> {
		let access_token = self.access_token.filter(|token| !token.is_empty()).ok_or_else(|| {
			AuthorizationError::InvalidGrant {
				reason: "Token endpoint response did not include an access token".into(),
			}
		})?;
		let scope = self
			.scope
			.as_deref()
			.map(parse_granted_scope)
			.filter(|scope| !scope.is_empty())
			.unwrap_or_else(|| fallback_scope.clone());
		let mut builder = TokenRecord::builder()
			.access_token(access_token)
			.scope(scope)
			.issued_at(OffsetDateTime::now_utc())
			.expires_in(Duration::seconds(self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN)));

		if let Some(token_type) = self.token_type.filter(|value| !value.is_empty()) {
			builder = builder.token_type(token_type);
		}
		if let Some(refresh) = self.refresh_token.filter(|value| !value.is_empty()) {
			builder = builder.refresh_token(refresh);
		}

		builder.build().map_err(|e| ConfigError::from(e).into())
	}
}

/// Parses the scope string reported by the token endpoint, skipping scopes this crate does
/// not know about.
pub(crate) fn parse_granted_scope(raw: &str) -> ScopeSet {
	let parts = raw.split(|c: char| c == ',' || c.is_whitespace()).filter(|part| !part.is_empty());

	if parts.clone().any(|part| part == WILDCARD) {
		return ScopeSet::all();
	}

	parts.filter_map(|part| part.parse::<Scope>().ok()).collect()
}

/// Classifies a token endpoint response.
///
/// 401 means the client credentials were rejected; 429 and 5xx keep their API error form;
/// any other status of 300 or above, an `error` member, or a missing access token means the
/// grant was rejected.
pub(crate) fn parse_token_response(
	response: RawResponse,
	fallback_scope: &ScopeSet,
) -> Result<TokenRecord> {
	let RawResponse { status, body, .. } = response;
	let reported = serde_json::from_str::<Value>(&body).ok().as_ref().and_then(http::error_message);

	if status == 401 {
		return Err(AuthorizationError::InvalidClient {
			reason: reported.unwrap_or_else(|| "Reddit rejected the client credentials".into()),
		}
		.into());
	}
	if status == 429 || status >= 500 {
		return Err(Error::Api {
			status,
			message: reported.unwrap_or_else(|| body.trim().to_owned()),
		});
	}
	if status >= 300 {
		return Err(AuthorizationError::InvalidGrant {
			reason: reported.unwrap_or_else(|| format!("Token endpoint returned HTTP {status}")),
		}
		.into());
	}

	let mut deserializer = serde_json::Deserializer::from_str(&body);
	let parsed: TokenResponse = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::TokenResponseParse { source, status })?;

	if let Some(reason) = parsed.error_reason() {
		return Err(AuthorizationError::InvalidGrant { reason }.into());
	}

	parsed.into_record(fallback_scope)
}

/// Rejects empty credential inputs before any I/O.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
	if value.is_empty() {
		Err(ValidationError::Empty { field: field.to_owned() })
	} else {
		Ok(())
	}
}

impl<T> RedditClient<T>
where
	T: ?Sized + HttpTransport,
{
	pub(crate) fn client_auth(&self) -> RequestAuth {
		RequestAuth::Basic {
			client_id: self.config().client_id.clone(),
			client_secret: self.config().client_secret.clone(),
		}
	}

	/// Posts a grant to the token endpoint and classifies the answer.
	pub(crate) async fn request_token(
		&self,
		form: Vec<(String, String)>,
		fallback_scope: &ScopeSet,
	) -> Result<TokenRecord> {
		let request = ApiRequest::new(HttpMethod::Post, self.config().endpoints.token.clone())
			.with_auth(self.client_auth())
			.with_body(RequestBody::Form(form));
		let response = self.send(request).await?;

		parse_token_response(response, fallback_scope)
	}
}

/// Builds owned form pairs.
pub(crate) fn form<const N: usize>(pairs: [(&str, &str); N]) -> Vec<(String, String)> {
	pairs.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn scope() -> ScopeSet {
		ScopeSet::new(["identity"]).expect("Fixture scope should be valid.")
	}

	#[test]
	fn remember_classifies_duration_at_one_hour() {
		assert_eq!(Remember::For(3600).duration(), "permanent");
		assert_eq!(Remember::For(3599).duration(), "temporary");
		assert_eq!(Remember::Never.duration(), "temporary");
		assert_eq!(Remember::Never.ttl(), None);
		assert_eq!(Remember::For(60).ttl(), Some(Duration::minutes(1)));
		assert_eq!(Remember::from(None), Remember::Never);
	}

	#[test]
	fn successful_payload_builds_a_record() {
		let body = r#"{"access_token":"abc","token_type":"bearer","expires_in":3600}"#;
		let record = parse_token_response(RawResponse::new(200, body), &scope())
			.expect("Valid payload should parse.");

		assert_eq!(record.authorization_header(), "bearer abc");
		assert_eq!(record.expires_in, Duration::hours(1));
		assert_eq!(record.scope, scope());
		assert!(record.refresh_token.is_none());
	}

	#[test]
	fn granted_scope_overrides_the_requested_one() {
		let body = r#"{"access_token":"abc","expires_in":60,"scope":"read submit unknownscope"}"#;
		let record = parse_token_response(RawResponse::new(200, body), &scope())
			.expect("Valid payload should parse.");

		assert_eq!(record.scope.normalized(), "read submit");
		assert_eq!(parse_granted_scope("*"), ScopeSet::all());
	}

	#[test]
	fn rejected_grants_are_authorization_errors() {
		let err = parse_token_response(RawResponse::new(200, r#"{"error":"invalid_grant"}"#), &scope())
			.expect_err("Error payloads should be rejected.");

		assert!(matches!(
			err,
			Error::Authorization(AuthorizationError::InvalidGrant { ref reason }) if reason == "invalid_grant"
		));

		let err = parse_token_response(RawResponse::new(200, "{}"), &scope())
			.expect_err("Missing access tokens should be rejected.");

		assert!(matches!(err, Error::Authorization(AuthorizationError::InvalidGrant { .. })));

		let err = parse_token_response(
			RawResponse::new(401, r#"{"message":"Unauthorized","error":401}"#),
			&scope(),
		)
		.expect_err("401 should be rejected.");

		assert!(matches!(
			err,
			Error::Authorization(AuthorizationError::InvalidClient { ref reason }) if reason == "Unauthorized"
		));
	}

	#[test]
	fn throttling_and_malformed_payloads_keep_their_shape() {
		let err = parse_token_response(RawResponse::new(429, r#"{"error":"RATELIMIT"}"#), &scope())
			.expect_err("429 should fail.");

		assert!(matches!(err, Error::Api { status: 429, .. }));

		let err = parse_token_response(
			RawResponse::new(200, r#"{"access_token":"abc","expires_in":"soon"}"#),
			&scope(),
		)
		.expect_err("Wrongly typed fields should fail.");

		match err {
			Error::TokenResponseParse { source, status } => {
				assert_eq!(status, 200);
				assert_eq!(source.path().to_string(), "expires_in");
			},
			other => panic!("Unexpected error: {other:?}"),
		}
	}
}
