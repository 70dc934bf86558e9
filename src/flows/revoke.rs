//! Token revocation.

// self
use crate::{
	_prelude::*,
	auth::TokenRecord,
	flows::{RedditClient, common},
	http::{self, ApiRequest, HttpMethod, HttpTransport, RequestBody},
	obs::{self, FlowKind},
	store::TOKEN_KEY,
};

impl<T> RedditClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Revokes the current token.
	///
	/// The in-memory token is cleared first and the persisted record deleted before Reddit is
	/// contacted, so local state is gone even when the store or the revoke request fails. The
	/// refresh token is revoked when present (which also invalidates its access tokens),
	/// otherwise the access token. Without a token nothing is sent.
	pub async fn revoke_token(&self) -> Result<()> {
		obs::observe(FlowKind::Revoke, "revoke_token", async move {
			let current = match self.take_token() {
				Some(record) => Some(record),
				None => self.restore_for_revoke().await,
			};

			self.store.delete(TOKEN_KEY).await?;

			let Some(record) = current else {
				return Ok(());
			};
			let (token, hint) = match record.refresh_token.as_ref() {
				Some(refresh) => (refresh.expose(), "refresh_token"),
				None => (record.access_token.expose(), "access_token"),
			};
			let request = ApiRequest::new(HttpMethod::Post, self.config().endpoints.revoke.clone())
				.with_auth(self.client_auth())
				.with_body(RequestBody::Form(common::form([
					("token", token),
					("token_type_hint", hint),
				])));

			http::decode(self.send(request).await?)?;

			Ok(())
		})
		.await
	}

	// Store read failures leave nothing to revoke.
	async fn restore_for_revoke(&self) -> Option<TokenRecord> {
		let restored = self.load_token().await.ok().flatten();

		self.take_token();

		restored
	}

	/// Alias for [`revoke_token`](Self::revoke_token).
	pub async fn logout(&self) -> Result<()> {
		self.revoke_token().await
	}

	/// Alias for [`revoke_token`](Self::revoke_token).
	pub async fn unauthorize(&self) -> Result<()> {
		self.revoke_token().await
	}
}
