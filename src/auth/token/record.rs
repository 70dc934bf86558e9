//! Token records, lifecycle helpers, builders, and the persisted cookie form.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, ScopeValidationError, token::secret::TokenSecret},
};

const PERSISTED_FIELDS: usize = 6;
const PERSISTED_DELIMITER: &str = ":";

/// Token type Reddit issues for every grant.
pub const BEARER: &str = "bearer";

/// Lifecycle status for a token record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Token is within its lifetime.
	Active,
	/// `issued_at + expires_in` lies in the past.
	Expired,
}

/// Errors produced by [`TokenRecordBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum TokenRecordBuilderError {
	/// Issued when no access token value was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
	/// Issued when no expiry duration was configured.
	#[error("Expiry must be supplied via expires_in.")]
	MissingExpiry,
}

/// Errors raised while decoding the persisted form.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum PersistedTokenError {
	/// Stored value is not valid base64 or UTF-8.
	#[error("Persisted token is not valid encoded text.")]
	Encoding,
	/// Field count did not match.
	#[error("Persisted token has {actual} fields, expected {expected}.")]
	FieldCount {
		/// Expected number of fields.
		expected: usize,
		/// Fields found.
		actual: usize,
	},
	/// A numeric field could not be parsed.
	#[error("Persisted token field `{field}` is invalid.")]
	InvalidField {
		/// Field name.
		field: &'static str,
	},
	/// Stored scope string is invalid.
	#[error(transparent)]
	Scope(#[from] ScopeValidationError),
}

/// OAuth bearer token state held by the client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
	/// Token type reported by the token endpoint (`bearer`).
	pub token_type: String,
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Refresh token secret, present for `permanent` authorizations.
	pub refresh_token: Option<TokenSecret>,
	/// Scopes granted to this token.
	pub scope: ScopeSet,
	/// Issuance instant, truncated to whole seconds.
	pub issued_at: OffsetDateTime,
	/// Lifetime relative to `issued_at`.
	pub expires_in: Duration,
}
impl TokenRecord {
	/// Returns a builder for constructing records.
	pub fn builder() -> TokenRecordBuilder {
		TokenRecordBuilder::default()
	}

	/// Instant after which the token is expired.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.issued_at + self.expires_in
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if self.expires_at() < instant { TokenStatus::Expired } else { TokenStatus::Active }
	}

	/// Returns `true` if the record has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Returns `true` if the record is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Value for the `Authorization` header of resource requests.
	pub fn authorization_header(&self) -> String {
		format!("{} {}", self.token_type, self.access_token.expose())
	}

	/// Encodes the record into its cookie-safe persisted form.
	pub fn to_persisted(&self) -> String {
		let fields = [
			URL_SAFE_NO_PAD.encode(&self.token_type),
			URL_SAFE_NO_PAD.encode(self.access_token.expose()),
			self.scope.normalized(),
			self.issued_at.unix_timestamp().to_string(),
			self.expires_in.whole_seconds().to_string(),
			self.refresh_token
				.as_ref()
				.map(|secret| URL_SAFE_NO_PAD.encode(secret.expose()))
				.unwrap_or_default(),
		];

		URL_SAFE_NO_PAD.encode(fields.join(PERSISTED_DELIMITER))
	}

	/// Decodes a value produced by [`to_persisted`](Self::to_persisted).
	pub fn from_persisted(value: &str) -> Result<Self, PersistedTokenError> {
		let bytes = URL_SAFE_NO_PAD.decode(value.trim()).map_err(|_| PersistedTokenError::Encoding)?;
		let text = String::from_utf8(bytes).map_err(|_| PersistedTokenError::Encoding)?;
		let fields = text.split(PERSISTED_DELIMITER).collect::<Vec<_>>();

		if fields.len() != PERSISTED_FIELDS {
			return Err(PersistedTokenError::FieldCount {
				expected: PERSISTED_FIELDS,
				actual: fields.len(),
			});
		}

		let issued_at = fields[3]
			.parse::<i64>()
			.ok()
			.and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
			.ok_or(PersistedTokenError::InvalidField { field: "issued_at" })?;
		let expires_in = fields[4]
			.parse::<i64>()
			.map(Duration::seconds)
			.map_err(|_| PersistedTokenError::InvalidField { field: "expires_in" })?;

		let token_type = decode_field(fields[0], "token_type")?;
		let access_token = decode_field(fields[1], "access_token")?;
		let refresh_token = decode_field(fields[5], "refresh_token")?;

		if access_token.is_empty() {
			return Err(PersistedTokenError::InvalidField { field: "access_token" });
		}

		Ok(Self {
			token_type,
			access_token: TokenSecret::new(access_token),
			refresh_token: Some(refresh_token).filter(|v| !v.is_empty()).map(TokenSecret::new),
			scope: fields[2].parse()?,
			issued_at,
			expires_in,
		})
	}
}
impl Debug for TokenRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRecord")
			.field("token_type", &self.token_type)
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("scope", &self.scope)
			.field("issued_at", &self.issued_at)
			.field("expires_in", &self.expires_in)
			.finish()
	}
}

/// Builder for [`TokenRecord`].
#[derive(Clone, Debug, Default)]
pub struct TokenRecordBuilder {
	token_type: Option<String>,
	access_token: Option<TokenSecret>,
	refresh_token: Option<TokenSecret>,
	scope: ScopeSet,
	issued_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
}
impl TokenRecordBuilder {
	/// Overrides the token type (defaults to `bearer`).
	pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into());

		self
	}

	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(TokenSecret::new(token));

		self
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(token));

		self
	}

	/// Sets the granted scope set.
	pub fn scope(mut self, scope: ScopeSet) -> Self {
		self.scope = scope;

		self
	}

	/// Sets the issued-at instant; sub-second precision is dropped.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(truncate_to_seconds(instant));

		self
	}

	/// Sets the lifetime relative to the issued instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Consumes the builder and produces a [`TokenRecord`].
	pub fn build(self) -> Result<TokenRecord, TokenRecordBuilderError> {
		let access_token = self.access_token.ok_or(TokenRecordBuilderError::MissingAccessToken)?;
		let expires_in = self.expires_in.ok_or(TokenRecordBuilderError::MissingExpiry)?;

		Ok(TokenRecord {
			token_type: self.token_type.unwrap_or_else(|| BEARER.to_owned()),
			access_token,
			refresh_token: self.refresh_token,
			scope: self.scope,
			issued_at: self.issued_at.unwrap_or_else(now_truncated),
			expires_in,
		})
	}
}

// Text fields are encoded on their own so they may contain the delimiter.
fn decode_field(raw: &str, field: &'static str) -> Result<String, PersistedTokenError> {
	URL_SAFE_NO_PAD
		.decode(raw)
		.ok()
		.and_then(|bytes| String::from_utf8(bytes).ok())
		.ok_or(PersistedTokenError::InvalidField { field })
}

/// Current UTC instant with sub-second precision dropped, matching the persisted form.
pub fn now_truncated() -> OffsetDateTime {
	truncate_to_seconds(OffsetDateTime::now_utc())
}

fn truncate_to_seconds(instant: OffsetDateTime) -> OffsetDateTime {
	instant - Duration::nanoseconds(i64::from(instant.nanosecond()))
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn fixture(refresh: Option<&str>) -> TokenRecord {
		let mut builder = TokenRecord::builder()
			.access_token("abc-123_XYZ")
			.scope(ScopeSet::new(["identity", "submit"]).expect("Fixture scopes should be valid."))
			.issued_at(macros::datetime!(2025-01-01 00:00:00.750 UTC))
			.expires_in(Duration::hours(1));

		if let Some(value) = refresh {
			builder = builder.refresh_token(value);
		}

		builder.build().expect("Fixture record should build.")
	}

	#[test]
	fn expiry_is_strictly_after_lifetime() {
		let record = fixture(None);

		assert_eq!(record.issued_at, macros::datetime!(2025-01-01 00:00 UTC));
		assert_eq!(record.status_at(macros::datetime!(2025-01-01 00:30 UTC)), TokenStatus::Active);
		assert_eq!(record.status_at(macros::datetime!(2025-01-01 01:00 UTC)), TokenStatus::Active);
		assert_eq!(
			record.status_at(macros::datetime!(2025-01-01 01:00:01 UTC)),
			TokenStatus::Expired
		);
	}

	#[test]
	fn persisted_form_round_trips_every_field() {
		for refresh in [Some("refresh-1"), None] {
			let record = fixture(refresh);
			let encoded = record.to_persisted();

			assert!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));

			let decoded =
				TokenRecord::from_persisted(&encoded).expect("Persisted token should decode.");

			assert_eq!(decoded, record);
			assert_eq!(decoded.token_type, "bearer");
			assert_eq!(decoded.access_token.expose(), "abc-123_XYZ");
			assert_eq!(decoded.scope.normalized(), "identity submit");
			assert_eq!(decoded.issued_at, record.issued_at);
			assert_eq!(decoded.expires_in, Duration::hours(1));
			assert_eq!(
				decoded.refresh_token.as_ref().map(TokenSecret::expose),
				refresh,
			);
		}
	}

	#[test]
	fn malformed_persisted_values_are_rejected() {
		assert_eq!(TokenRecord::from_persisted("%%%"), Err(PersistedTokenError::Encoding));

		let short = URL_SAFE_NO_PAD.encode("bearer:abc");

		assert!(matches!(
			TokenRecord::from_persisted(&short),
			Err(PersistedTokenError::FieldCount { actual: 2, .. })
		));

		let bad_time = URL_SAFE_NO_PAD.encode("bearer:abc:read:soon:3600:");

		assert_eq!(
			TokenRecord::from_persisted(&bad_time),
			Err(PersistedTokenError::InvalidField { field: "issued_at" })
		);
	}

	#[test]
	fn delimiters_inside_secrets_survive_persistence() {
		let record = TokenRecord::builder()
			.token_type("mac:v1")
			.access_token("abc:def")
			.refresh_token("r:1:2")
			.scope(ScopeSet::new(["read"]).expect("Fixture scope should be valid."))
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.expires_in(Duration::hours(1))
			.build()
			.expect("Fixture record should build.");
		let decoded = TokenRecord::from_persisted(&record.to_persisted())
			.expect("Tokens containing colons should decode.");

		assert_eq!(decoded, record);
		assert_eq!(decoded.access_token.expose(), "abc:def");
		assert_eq!(decoded.refresh_token.as_ref().map(TokenSecret::expose), Some("r:1:2"));
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let rendered = format!("{:?}", fixture(Some("refresh-secret")));

		assert!(!rendered.contains("abc-123_XYZ"));
		assert!(!rendered.contains("refresh-secret"));
	}

	#[test]
	fn builder_requires_access_token_and_expiry() {
		assert_eq!(
			TokenRecord::builder().expires_in(Duration::hours(1)).build(),
			Err(TokenRecordBuilderError::MissingAccessToken)
		);
		assert_eq!(
			TokenRecord::builder().access_token("abc").build(),
			Err(TokenRecordBuilderError::MissingExpiry)
		);
	}
}
