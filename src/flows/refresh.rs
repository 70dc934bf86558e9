//! Refresh token grant and the lazy "is authorized" check.
//!
//! [`RedditClient::is_authorized`] is the gate every authenticated call passes through. It
//! restores the token from the store when needed and, when the token has expired and carries a
//! refresh token, performs exactly one silent refresh. Silent refreshes update the in-memory
//! token but leave the persisted record alone.

mod metrics;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	auth::TokenRecord,
	error::AuthorizationError,
	flows::{RedditClient, Remember, common},
	http::HttpTransport,
	obs::{self, FlowKind},
};

impl<T> RedditClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Returns `true` when a token is available, refreshing it first if it has expired.
	///
	/// Returns `false` only when no token can be loaded. An expired token without a refresh
	/// token is still reported as authorized; Reddit will reject it on use.
	pub async fn is_authorized(&self) -> Result<bool> {
		Ok(self.authorized_token().await?.is_some())
	}

	/// Exchanges the refresh token for a new access token.
	///
	/// The in-memory token receives the new access token, issue time, lifetime, and scope (when
	/// reported). Reddit may rotate the refresh token; otherwise the previous one is kept. The
	/// store is rewritten only for [`Remember::For`].
	pub async fn refresh_token(&self, remember: Remember) -> Result<TokenRecord> {
		obs::observe(FlowKind::Refresh, "refresh_token", self.refresh_counted(remember)).await
	}

	/// Loads the token and silently refreshes it once when it has expired.
	///
	/// Runs inside the caller's flow, so the refresh is counted in [`RefreshMetrics`] but not as
	/// a flow of its own.
	pub(crate) async fn authorized_token(&self) -> Result<Option<TokenRecord>> {
		let Some(current) = self.load_token().await? else {
			return Ok(None);
		};

		if current.refresh_token.is_some() && current.is_expired() {
			return self.refresh_counted(Remember::Never).await.map(Some);
		}

		Ok(Some(current))
	}

	async fn refresh_counted(&self, remember: Remember) -> Result<TokenRecord> {
		self.refresh_metrics.record_attempt();

		let result = self.refresh_once(remember).await;

		match &result {
			Ok(_) => self.refresh_metrics.record_success(),
			Err(_) => self.refresh_metrics.record_failure(),
		}

		result
	}

	async fn refresh_once(&self, remember: Remember) -> Result<TokenRecord> {
		let current = self.load_token().await?.ok_or(AuthorizationError::MissingToken)?;
		let refresh =
			current.refresh_token.clone().ok_or(AuthorizationError::MissingRefreshToken)?;
		let form = common::form([
			("grant_type", "refresh_token"),
			("refresh_token", refresh.expose()),
		]);
		let mut record = self.request_token(form, &current.scope).await?;

		if record.refresh_token.is_none() {
			record.refresh_token = Some(refresh);
		}

		self.install_token(record.clone(), remember).await?;

		Ok(record)
	}
}
