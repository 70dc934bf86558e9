//! Password grant for script apps.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, TokenRecord},
	flows::{RedditClient, Remember, common},
	http::{self, ApiRequest, ApiResponse, HttpMethod, HttpTransport, RequestAuth},
	obs::{self, FlowKind},
};

impl<T> RedditClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Logs in with the password grant.
	///
	/// When a token is already loaded and `GET /api/v1/me` reports the same user, that token is
	/// returned without a new grant. Otherwise the credentials are exchanged at the token
	/// endpoint and the new token is kept in memory, and persisted for [`Remember::For`].
	pub async fn login(
		&self,
		username: &str,
		password: &str,
		remember: Remember,
	) -> Result<TokenRecord> {
		obs::observe(FlowKind::Password, "login", async move {
			common::require_non_empty("username", username)?;
			common::require_non_empty("password", password)?;

			if let Some(current) = self.load_token().await? {
				match self.identity_name(&current).await {
					Ok(Some(name)) if name.eq_ignore_ascii_case(username) => return Ok(current),
					Ok(_) | Err(Error::Api { .. }) => {},
					Err(e) => return Err(e),
				}
			}

			let form = common::form([
				("grant_type", "password"),
				("username", username),
				("password", password),
			]);
			let record = self.request_token(form, &ScopeSet::all()).await?;

			self.install_token(record.clone(), remember).await?;

			Ok(record)
		})
		.await
	}

	/// Name of the account `record` belongs to, per `GET /api/v1/me`.
	async fn identity_name(&self, record: &TokenRecord) -> Result<Option<String>> {
		let url = self.resource_url("/api/v1/me")?;
		let request = ApiRequest::new(HttpMethod::Get, url).with_auth(RequestAuth::Token {
			token_type: record.token_type.clone(),
			access_token: record.access_token.expose().to_owned(),
		});
		let response = http::decode(self.send(request).await?)?;

		Ok(match response {
			ApiResponse::Json(value) => value.get("name").and_then(Value::as_str).map(str::to_owned),
			ApiResponse::Text(_) => None,
		})
	}
}
