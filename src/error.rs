//! Client-level error types shared across flows, the endpoint catalog, transports, and stores.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Caller-supplied input is outside its documented domain; raised before any I/O.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Token is missing, rejected, or lacks the required permissions.
	#[error(transparent)]
	Authorization(#[from] AuthorizationError),
	/// Reddit answered with a non-success status or an `error` payload.
	#[error("Reddit API returned HTTP {status}: {message}.")]
	Api {
		/// HTTP status code of the response.
		status: u16,
		/// Message reported by the API (or the response body).
		message: String,
	},
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint answered with JSON whose fields have unexpected types.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// HTTP status carried by the error, when one is known.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } | Self::TokenResponseParse { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Returns `true` for errors raised before any request was sent.
	pub fn is_validation(&self) -> bool {
		matches!(self, Self::Validation(_))
	}
}
impl From<crate::auth::ScopeValidationError> for Error {
	fn from(e: crate::auth::ScopeValidationError) -> Self {
		Self::Validation(e.into())
	}
}

/// Input validation failures raised before any network call.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// A required string was empty.
	#[error("Parameter `{field}` cannot be empty.")]
	Empty {
		/// Offending parameter.
		field: String,
	},
	/// Text exceeds the documented maximum length.
	#[error("Parameter `{field}` exceeds {max} characters (got {actual}).")]
	TooLong {
		/// Offending parameter.
		field: String,
		/// Maximum permitted character count.
		max: usize,
		/// Supplied character count.
		actual: usize,
	},
	/// Text is shorter than the documented minimum length.
	#[error("Parameter `{field}` requires at least {min} characters (got {actual}).")]
	TooShort {
		/// Offending parameter.
		field: String,
		/// Minimum permitted character count.
		min: usize,
		/// Supplied character count.
		actual: usize,
	},
	/// Value is not part of the enumerated set.
	#[error("Parameter `{field}` must be one of {allowed:?} (got `{value}`).")]
	NotAllowed {
		/// Offending parameter.
		field: String,
		/// Supplied value.
		value: String,
		/// Accepted values.
		allowed: &'static [&'static str],
	},
	/// Integer is outside the documented range.
	#[error("Parameter `{field}` must be within {min}..={max} (got {value}).")]
	OutOfRange {
		/// Offending parameter.
		field: String,
		/// Inclusive lower bound.
		min: i64,
		/// Inclusive upper bound.
		max: i64,
		/// Supplied value.
		value: i64,
	},
	/// Value has the wrong type for the parameter.
	#[error("Parameter `{field}` expects a {expected} value.")]
	WrongType {
		/// Offending parameter.
		field: String,
		/// Expected type label.
		expected: &'static str,
	},
	/// Value is not a Reddit fullname (`t1_`..`t6_` followed by a base36 id).
	#[error("Parameter `{field}` is not a valid fullname: `{value}`.")]
	InvalidFullname {
		/// Offending parameter.
		field: String,
		/// Supplied value.
		value: String,
	},
	/// A required parameter was not supplied.
	#[error("Endpoint `{endpoint}` requires parameter `{field}`.")]
	MissingParameter {
		/// Endpoint name.
		endpoint: &'static str,
		/// Missing parameter.
		field: &'static str,
	},
	/// A parameter is not part of the endpoint schema.
	#[error("Endpoint `{endpoint}` does not accept parameter `{field}`.")]
	UnknownParameter {
		/// Endpoint name.
		endpoint: &'static str,
		/// Unknown parameter.
		field: String,
	},
	/// No endpoint with the given name exists in the catalog.
	#[error("Unknown endpoint `{name}`.")]
	UnknownEndpoint {
		/// Requested endpoint name.
		name: String,
	},
	/// Requested scopes are invalid.
	#[error("Requested scopes are invalid: {0}")]
	Scope(#[from] crate::auth::ScopeValidationError),
}

/// Token and permission failures.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum AuthorizationError {
	/// Reddit rejected the grant (bad credentials, code, or refresh token).
	#[error("Token endpoint rejected the grant: {reason}.")]
	InvalidGrant {
		/// Reason reported by Reddit or the client.
		reason: String,
	},
	/// Client authentication failed or credentials are malformed.
	#[error("Client authentication failed: {reason}.")]
	InvalidClient {
		/// Reason reported by Reddit or the client.
		reason: String,
	},
	/// The user denied the authorization request on the consent screen.
	#[error("Authorization was denied: {reason}.")]
	AccessDenied {
		/// Value of the redirect's `error` parameter.
		reason: String,
	},
	/// No token is loaded.
	#[error("No access token is available; authorize first.")]
	MissingToken,
	/// Refresh was requested but the token carries no refresh token.
	#[error("Token has no refresh token.")]
	MissingRefreshToken,
	/// Token scope does not cover the endpoint.
	#[error("Endpoint requires the `{required}` scope but the token grants `{granted}`.")]
	InsufficientScope {
		/// Scope the endpoint needs.
		required: crate::auth::Scope,
		/// Scope set granted to the token.
		granted: String,
	},
	/// Authorization-code flows need a redirect URI.
	#[error("A redirect URI must be configured for the authorization-code flow.")]
	MissingRedirectUri,
	/// The `state` returned by the redirect did not match the issued one.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A configured URL cannot be parsed.
	#[error("Configured {name} URL is invalid.")]
	InvalidUrl {
		/// Which URL failed.
		name: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A configured URL uses an unsupported scheme.
	#[error("The {name} URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which URL failed.
		name: &'static str,
		/// Offending URL.
		url: String,
	},
	/// The client identifier is empty.
	#[error("Client identifier cannot be empty.")]
	MissingClientId,
	/// A required environment variable is absent.
	#[error("Environment variable `{name}` must be set.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// A multipart file part declared an invalid MIME type.
	#[error("Invalid MIME type `{mime}`.")]
	InvalidMime {
		/// Offending MIME string.
		mime: String,
	},
	/// Token record builder validation failed.
	#[error("Unable to build token record.")]
	TokenBuild(#[from] crate::auth::TokenRecordBuilderError),
	/// Endpoint path could not be joined onto the API base URL.
	#[error("Endpoint path `{path}` cannot be joined onto the API base URL.")]
	InvalidEndpointPath {
		/// Rendered path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// Target URL.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request exceeded the connect or total timeout.
	#[error("Request to {url} timed out.")]
	Timeout {
		/// Target URL.
		url: String,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during transport.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(url: impl Into<String>, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { url: url.into(), source: Box::new(src) }
	}
}
