//! Transport primitives for grant and resource requests.
//!
//! [`HttpTransport`] is the client's only dependency on an HTTP stack. It performs exactly one
//! request per call and hands back the raw status and body; [`decode`] then classifies the
//! response into an [`ApiResponse`] or an [`Error::Api`]. After every response the client
//! records a [`TransferInfo`] in its [`TransferInfoSlot`] so callers can inspect the last
//! transfer.

// std
#[cfg(feature = "reqwest")] use std::time::Instant;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::{
	header::{AUTHORIZATION, HeaderMap, USER_AGENT},
	multipart::{Form, Part},
	redirect::Policy,
};
use serde_json::Value;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<RawResponse>> + 'a + Send>>;

/// Abstraction over HTTP stacks able to execute a single Reddit request.
///
/// Implementations must not retry and must not interpret the response body; status
/// classification happens in [`decode`] and in the grant flows.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves once the full body has been read.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// HTTP verbs used by Reddit's API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
	/// Parameters travel in the query string.
	Get,
	/// Parameters travel in the request body.
	Post,
}
impl HttpMethod {
	/// Returns the canonical verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Credentials attached to a request.
#[derive(Clone, PartialEq, Eq)]
pub enum RequestAuth {
	/// Anonymous request.
	None,
	/// HTTP Basic `client_id:client_secret`, used by grant and revoke calls.
	Basic {
		/// OAuth client identifier.
		client_id: String,
		/// Client secret (may be empty for installed apps).
		client_secret: String,
	},
	/// `Authorization: <token_type> <access_token>`, used by resource calls.
	Token {
		/// Token type, normally `bearer`.
		token_type: String,
		/// Access token value.
		access_token: String,
	},
}
impl RequestAuth {
	/// Returns `true` for credential-bearing grant requests.
	pub fn is_grant(&self) -> bool {
		matches!(self, RequestAuth::Basic { .. })
	}

	/// Renders the `Authorization` header for token auth.
	pub fn token_header(&self) -> Option<String> {
		match self {
			RequestAuth::Token { token_type, access_token } =>
				Some(format!("{token_type} {access_token}")),
			_ => None,
		}
	}
}
impl Debug for RequestAuth {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			RequestAuth::None => f.write_str("None"),
			RequestAuth::Basic { client_id, .. } => f
				.debug_struct("Basic")
				.field("client_id", client_id)
				.field("client_secret", &"<redacted>")
				.finish(),
			RequestAuth::Token { token_type, .. } => f
				.debug_struct("Token")
				.field("token_type", token_type)
				.field("access_token", &"<redacted>")
				.finish(),
		}
	}
}

/// File part of a multipart upload.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
	/// Form field name.
	pub field: String,
	/// File name reported to the server.
	pub file_name: String,
	/// MIME type of the payload.
	pub mime: String,
	/// Raw file contents.
	pub bytes: Vec<u8>,
}
impl Debug for FileUpload {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FileUpload")
			.field("field", &self.field)
			.field("file_name", &self.file_name)
			.field("mime", &self.mime)
			.field("len", &self.bytes.len())
			.finish()
	}
}

/// Request payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
	/// No body.
	Empty,
	/// `application/x-www-form-urlencoded` pairs.
	Form(Vec<(String, String)>),
	/// `multipart/form-data` with text fields and one file part.
	Multipart {
		/// Text fields.
		fields: Vec<(String, String)>,
		/// File part.
		file: FileUpload,
	},
}
impl RequestBody {
	/// Looks up a text field by name.
	pub fn field(&self, name: &str) -> Option<&str> {
		let fields = match self {
			RequestBody::Empty => return None,
			RequestBody::Form(fields) | RequestBody::Multipart { fields, .. } => fields,
		};

		fields.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
	}
}

/// Fully built outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: HttpMethod,
	/// Absolute URL including the query string.
	pub url: Url,
	/// Request payload.
	pub body: RequestBody,
	/// Credentials.
	pub auth: RequestAuth,
	/// User agent header, omitted when `None`.
	pub user_agent: Option<String>,
}
impl ApiRequest {
	/// Creates a bodiless anonymous request.
	pub fn new(method: HttpMethod, url: Url) -> Self {
		Self { method, url, body: RequestBody::Empty, auth: RequestAuth::None, user_agent: None }
	}

	/// Replaces the body.
	pub fn with_body(mut self, body: RequestBody) -> Self {
		self.body = body;

		self
	}

	/// Replaces the credentials.
	pub fn with_auth(mut self, auth: RequestAuth) -> Self {
		self.auth = auth;

		self
	}

	/// Sets the user agent header.
	pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
		self.user_agent = user_agent;

		self
	}
}

/// Reddit's `x-ratelimit-*` response headers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RateLimit {
	/// Requests used in the current window.
	pub used: Option<u64>,
	/// Requests remaining in the current window (Reddit reports a float).
	pub remaining: Option<f64>,
	/// Time until the window resets.
	pub reset: Option<Duration>,
}

/// Raw response handed back by a transport.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body as text.
	pub body: String,
	/// Wall-clock time spent on the request.
	pub elapsed: Duration,
	/// Rate-limit headers, when present.
	pub rate_limit: RateLimit,
}
impl RawResponse {
	/// Creates a response without timing or rate-limit data.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into(), elapsed: Duration::ZERO, rate_limit: RateLimit::default() }
	}
}

/// Metadata about the most recent transfer.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferInfo {
	/// HTTP verb.
	pub method: HttpMethod,
	/// Requested URL.
	pub url: Url,
	/// HTTP status code.
	pub status: u16,
	/// Wall-clock time spent on the request.
	pub elapsed: Duration,
	/// Rate-limit headers, when present.
	pub rate_limit: RateLimit,
}
impl TransferInfo {
	/// Combines the request line and its response.
	pub fn new(method: HttpMethod, url: Url, response: &RawResponse) -> Self {
		Self {
			method,
			url,
			status: response.status,
			elapsed: response.elapsed,
			rate_limit: response.rate_limit,
		}
	}
}

/// Thread-safe slot holding the last [`TransferInfo`].
#[derive(Clone, Debug, Default)]
pub struct TransferInfoSlot(Arc<Mutex<Option<TransferInfo>>>);
impl TransferInfoSlot {
	/// Stores metadata for the latest transfer.
	pub fn store(&self, info: TransferInfo) {
		*self.0.lock() = Some(info);
	}

	/// Returns a copy of the latest metadata.
	pub fn get(&self) -> Option<TransferInfo> {
		self.0.lock().clone()
	}

	/// Returns the captured metadata, consuming it from the slot.
	pub fn take(&self) -> Option<TransferInfo> {
		self.0.lock().take()
	}
}

/// Decoded resource response.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResponse {
	/// Body parsed as JSON.
	Json(Value),
	/// Body that was not valid JSON, returned verbatim.
	Text(String),
}
impl ApiResponse {
	/// Borrows the JSON value, if any.
	pub fn as_json(&self) -> Option<&Value> {
		match self {
			ApiResponse::Json(value) => Some(value),
			ApiResponse::Text(_) => None,
		}
	}

	/// Borrows the raw text, if the body was not JSON.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			ApiResponse::Json(_) => None,
			ApiResponse::Text(text) => Some(text),
		}
	}

	/// Consumes the response, returning the JSON value if any.
	pub fn into_json(self) -> Option<Value> {
		match self {
			ApiResponse::Json(value) => Some(value),
			ApiResponse::Text(_) => None,
		}
	}
}

/// Classifies a raw response.
///
/// Statuses of 300 and above, JSON bodies with an `error` field, and JSON bodies with a
/// non-empty `json.errors` list become [`Error::Api`]. Other JSON bodies decode to
/// [`ApiResponse::Json`]; anything unparsable, including the empty body, is returned as
/// [`ApiResponse::Text`].
pub fn decode(response: RawResponse) -> Result<ApiResponse> {
	let RawResponse { status, body, .. } = response;
	let json = serde_json::from_str::<Value>(&body).ok();

	if status >= 300 {
		let message = json
			.as_ref()
			.and_then(error_message)
			.or_else(|| Some(body.trim().to_owned()).filter(|text| !text.is_empty()))
			.unwrap_or_else(|| canonical_reason(status).to_owned());

		return Err(Error::Api { status, message });
	}

	match json {
		Some(value) => match error_message(&value) {
			Some(message) => Err(Error::Api { status, message }),
			None => Ok(ApiResponse::Json(value)),
		},
		None => Ok(ApiResponse::Text(body)),
	}
}

/// Extracts the message of an error-shaped JSON body.
pub(crate) fn error_message(value: &Value) -> Option<String> {
	if let Some(error) = value.get("error") {
		let message = value.get("message").and_then(Value::as_str);

		return Some(match error {
			Value::String(text) => text.clone(),
			other => message.map(str::to_owned).unwrap_or_else(|| other.to_string()),
		});
	}

	let first = value.pointer("/json/errors")?.as_array()?.first()?;
	let parts = first
		.as_array()
		.map(|parts| parts.iter().filter_map(Value::as_str).collect::<Vec<_>>())
		.unwrap_or_default();

	match parts.as_slice() {
		[] => Some(first.to_string()),
		[code] => Some((*code).to_owned()),
		[code, explanation, ..] => Some(format!("{code}: {explanation}")),
	}
}

fn canonical_reason(status: u16) -> &'static str {
	match status {
		300..=399 => "Redirect",
		400 => "Bad Request",
		401 => "Unauthorized",
		403 => "Forbidden",
		404 => "Not Found",
		409 => "Conflict",
		413 => "Payload Too Large",
		415 => "Unsupported Media Type",
		429 => "Too Many Requests",
		500 => "Internal Server Error",
		502 => "Bad Gateway",
		503 => "Service Unavailable",
		504 => "Gateway Timeout",
		_ => "Unexpected Status",
	}
}

/// Default transport backed by two reqwest clients.
///
/// Grant requests and resource requests use separate clients so TLS relaxation can be limited
/// to grant requests. The grant client never follows redirects. Both enforce a 5 second connect
/// timeout and a 10 second total timeout.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
	grant: ReqwestClient,
	resource: ReqwestClient,
}
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Connect timeout for every request.
	pub const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);
	/// Total timeout for every request.
	pub const TOTAL_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

	/// Builds both clients; `accept_invalid_certs` relaxes TLS for grant requests only.
	pub fn new(accept_invalid_certs: bool) -> Result<Self, ConfigError> {
		let grant = ReqwestClient::builder()
			.connect_timeout(Self::CONNECT_TIMEOUT)
			.timeout(Self::TOTAL_TIMEOUT)
			.redirect(Policy::none())
			.danger_accept_invalid_certs(accept_invalid_certs)
			.danger_accept_invalid_hostnames(accept_invalid_certs)
			.build()?;
		let resource = ReqwestClient::builder()
			.connect_timeout(Self::CONNECT_TIMEOUT)
			.timeout(Self::TOTAL_TIMEOUT)
			.build()?;

		Ok(Self { grant, resource })
	}

	/// Wraps caller-provided clients.
	pub fn with_clients(grant: ReqwestClient, resource: ReqwestClient) -> Self {
		Self { grant, resource }
	}

	async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
		let ApiRequest { method, url, body, auth, user_agent } = request;
		let client = if auth.is_grant() { &self.grant } else { &self.resource };
		let mut builder = match method {
			HttpMethod::Get => client.get(url.clone()),
			HttpMethod::Post => client.post(url.clone()),
		};

		match &auth {
			RequestAuth::None => {},
			RequestAuth::Basic { client_id, client_secret } =>
				builder = builder.basic_auth(client_id, Some(client_secret)),
			RequestAuth::Token { .. } =>
				if let Some(header) = auth.token_header() {
					builder = builder.header(AUTHORIZATION, header);
				},
		}

		if let Some(user_agent) = user_agent {
			builder = builder.header(USER_AGENT, user_agent);
		}

		builder = match body {
			RequestBody::Empty => builder,
			RequestBody::Form(pairs) => builder.form(&pairs),
			RequestBody::Multipart { fields, file } => {
				let part = Part::bytes(file.bytes)
					.file_name(file.file_name)
					.mime_str(&file.mime)
					.map_err(|_| ConfigError::InvalidMime { mime: file.mime.clone() })?;
				let form = fields
					.into_iter()
					.fold(Form::new(), |form, (key, value)| form.text(key, value))
					.part(file.field, part);

				builder.multipart(form)
			},
		};

		let started = Instant::now();
		let response = builder.send().await.map_err(|e| map_reqwest_error(&url, e))?;
		let status = response.status().as_u16();
		let rate_limit = parse_rate_limit(response.headers());
		let body = response.text().await.map_err(|e| map_reqwest_error(&url, e))?;
		let elapsed = Duration::try_from(started.elapsed()).unwrap_or(Duration::MAX);

		Ok(RawResponse { status, body, elapsed, rate_limit })
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		Box::pin(self.send(request))
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(url: &Url, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::Timeout { url: url.to_string() }.into();
	}

	TransportError::network(url.as_str(), err).into()
}

#[cfg(feature = "reqwest")]
fn parse_rate_limit(headers: &HeaderMap) -> RateLimit {
	let header = |name: &str| headers.get(name)?.to_str().ok().map(str::trim);

	RateLimit {
		used: header("x-ratelimit-used").and_then(|raw| raw.parse().ok()),
		remaining: header("x-ratelimit-remaining").and_then(|raw| raw.parse().ok()),
		reset: header("x-ratelimit-reset")
			.and_then(|raw| raw.parse::<i64>().ok())
			.map(Duration::seconds),
	}
}
