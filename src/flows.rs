//! Token lifecycle orchestration: grants, refresh, revocation, and persistence.
//!
//! [`RedditClient`] owns the credentials, the transport, the token store, and the current
//! token. Each grant lives in its own submodule and extends the client with an `impl` block.

pub mod auth_code;
pub mod common;
pub mod password;
pub mod refresh;
pub mod revoke;

pub use auth_code::*;
pub use common::*;
pub use refresh::*;

// self
use crate::{
	_prelude::*,
	api,
	auth::{PersistedTokenError, TokenRecord},
	config::ClientConfig,
	context::RequestContext,
	http::{ApiRequest, HttpTransport, RawResponse, TransferInfo, TransferInfoSlot},
	obs,
	store::{TOKEN_KEY, TokenStore},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestRedditClient = RedditClient<ReqwestTransport>;

/// Reddit OAuth2 client holding one token at a time.
///
/// Cloning is cheap and clones share the token, the transfer slot, and refresh metrics.
/// Token state sits behind a lock that is never held across an await point; concurrent
/// refreshes on the same client are not coordinated.
pub struct RedditClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	/// Store the token record is persisted to.
	pub store: Arc<dyn TokenStore>,
	/// Shared counters for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	config: Arc<ClientConfig>,
	context: RequestContext,
	token: Arc<RwLock<Option<TokenRecord>>>,
	transfer: TransferInfoSlot,
}
impl<T> RedditClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client over a caller-provided transport.
	pub fn with_transport(
		config: ClientConfig,
		store: Arc<dyn TokenStore>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			transport: transport.into(),
			store,
			refresh_metrics: Default::default(),
			config: Arc::new(config),
			context: RequestContext::default(),
			token: Default::default(),
			transfer: Default::default(),
		}
	}

	/// Attaches the inbound request the client is serving.
	pub fn with_request_context(mut self, context: RequestContext) -> Self {
		self.context = context;

		self
	}

	/// Client configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Inbound request context.
	pub fn request_context(&self) -> &RequestContext {
		&self.context
	}

	/// Metadata of the most recent transfer, if any request produced a response.
	pub fn transfer_info(&self) -> Option<TransferInfo> {
		self.transfer.get()
	}

	/// Snapshot of the in-memory token.
	pub fn token(&self) -> Option<TokenRecord> {
		self.token.read().clone()
	}

	/// Installs a token obtained elsewhere, persisting it when `remember` asks for it.
	pub async fn set_token(&self, record: TokenRecord, remember: Remember) -> Result<()> {
		self.install_token(record, remember).await
	}

	/// User agent for outbound requests: configured, else inbound, else none.
	pub fn user_agent(&self) -> Option<String> {
		self.config.user_agent.clone().or_else(|| self.context.user_agent.clone())
	}

	/// Returns the current token, restoring it from the store when memory is empty.
	///
	/// An undecodable persisted value is discarded and treated as absent.
	pub async fn load_token(&self) -> Result<Option<TokenRecord>> {
		if let Some(record) = self.token() {
			return Ok(Some(record));
		}

		let Some(raw) = self.store.get(TOKEN_KEY).await? else {
			return Ok(None);
		};

		match TokenRecord::from_persisted(&raw) {
			Ok(record) => {
				*self.token.write() = Some(record.clone());

				Ok(Some(record))
			},
			Err(e) => {
				discard_persisted(&e);
				self.store.delete(TOKEN_KEY).await?;

				Ok(None)
			},
		}
	}

	/// Stores `record` in memory and, for [`Remember::For`], in the token store.
	pub(crate) async fn install_token(&self, record: TokenRecord, remember: Remember) -> Result<()> {
		if let Some(ttl) = remember.ttl() {
			self.store.set(TOKEN_KEY, record.to_persisted(), Some(ttl)).await?;
		}

		*self.token.write() = Some(record);

		Ok(())
	}

	pub(crate) fn take_token(&self) -> Option<TokenRecord> {
		self.token.write().take()
	}

	/// Joins a literal resource path onto the API base URL.
	pub(crate) fn resource_url(&self, path: &str) -> Result<Url> {
		let segments = path.split('/').filter(|segment| !segment.is_empty());

		Ok(api::join_segments(&self.config.endpoints.api_base, path, segments)?)
	}

	/// Sends one request and records its transfer metadata.
	pub(crate) async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
		let request = request.with_user_agent(self.user_agent());
		let (method, url) = (request.method, request.url.clone());
		let response = self.transport.execute(request).await?;
		let info = TransferInfo::new(method, url, &response);

		obs::record_transfer(&info);
		self.transfer.store(info);

		Ok(response)
	}
}
#[cfg(feature = "reqwest")]
impl RedditClient<ReqwestTransport> {
	/// Creates a client with its own reqwest transport.
	///
	/// TLS verification for grant requests follows
	/// [`ClientConfig::danger_accept_invalid_certs`].
	pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
		let transport = ReqwestTransport::new(config.danger_accept_invalid_certs)?;

		Ok(Self::with_transport(config, store, transport))
	}
}
impl<T> Clone for RedditClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			store: self.store.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
			config: self.config.clone(),
			context: self.context.clone(),
			token: self.token.clone(),
			transfer: self.transfer.clone(),
		}
	}
}
impl<T> Debug for RedditClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RedditClient")
			.field("config", &self.config)
			.field("context", &self.context)
			.field("token", &*self.token.read())
			.finish()
	}
}

fn discard_persisted(error: &PersistedTokenError) {
	#[cfg(feature = "tracing")]
	tracing::warn!(%error, "Discarding undecodable persisted token.");

	#[cfg(not(feature = "tracing"))]
	{
		let _ = error;
	}
}
