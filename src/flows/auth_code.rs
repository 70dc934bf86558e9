//! Authorization-code redirect flow.
//!
//! [`RedditClient::authorize`] drives the whole dance from a single call site: it short-circuits
//! while a valid token is loaded, exchanges the `code` carried by the attached
//! [`RequestContext`](crate::context::RequestContext), or hands back an
//! [`AuthorizationSession`] whose URL the user must visit.

mod session;

pub use session::*;

// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, TokenRecord},
	error::AuthorizationError,
	flows::{RedditClient, Remember, common},
	http::HttpTransport,
	obs::{self, FlowKind},
};

/// Parameters for [`RedditClient::authorize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizeRequest {
	/// Requested scope identifiers; `"*"` requests every scope.
	pub scopes: Vec<String>,
	/// Whether the caller wants to be told to redirect the user.
	pub redirect: bool,
	/// Persistence for the resulting token; also selects the `duration`.
	pub remember: Remember,
	/// Ignore an already loaded token.
	pub force: bool,
	/// State issued earlier; when set, the inbound `state` must match it.
	pub expected_state: Option<String>,
}
impl AuthorizeRequest {
	/// Creates a request for the given scopes with `redirect` on and nothing persisted.
	pub fn new<I, S>(scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			scopes: scopes.into_iter().map(Into::into).collect(),
			redirect: true,
			remember: Remember::Never,
			force: false,
			expected_state: None,
		}
	}

	/// Sets whether the outcome asks for a redirect.
	pub fn redirect(mut self, redirect: bool) -> Self {
		self.redirect = redirect;

		self
	}

	/// Sets the persistence policy.
	pub fn remember(mut self, remember: Remember) -> Self {
		self.remember = remember;

		self
	}

	/// Forces a new authorization even when a token is loaded.
	pub fn force(mut self, force: bool) -> Self {
		self.force = force;

		self
	}

	/// Requires the inbound `state` to equal `state`.
	pub fn expect_state(mut self, state: impl Into<String>) -> Self {
		self.expected_state = Some(state.into());

		self
	}
}

/// Result of [`RedditClient::authorize`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorizeOutcome {
	/// A token is available.
	Authorized(TokenRecord),
	/// The caller must send the user to `session.authorize_url`.
	Redirect(AuthorizationSession),
	/// Not authorized yet; the caller decides what to do with the session.
	Unauthorized(AuthorizationSession),
}
impl AuthorizeOutcome {
	/// Returns the token for [`AuthorizeOutcome::Authorized`].
	pub fn token(&self) -> Option<&TokenRecord> {
		match self {
			AuthorizeOutcome::Authorized(record) => Some(record),
			_ => None,
		}
	}

	/// Returns the session for the non-authorized outcomes.
	pub fn session(&self) -> Option<&AuthorizationSession> {
		match self {
			AuthorizeOutcome::Redirect(session) | AuthorizeOutcome::Unauthorized(session) =>
				Some(session),
			AuthorizeOutcome::Authorized(_) => None,
		}
	}
}

impl<T> RedditClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Runs the authorization-code flow for the attached request context.
	///
	/// Scopes are validated before any I/O. Unless `force` is set, a loaded token is refreshed
	/// when expired and short-circuits the flow while it is still valid. An expired token that
	/// cannot be refreshed falls through. An inbound `error` parameter becomes
	/// [`AuthorizationError::AccessDenied`]; an inbound `code` is exchanged for a token.
	pub async fn authorize(&self, request: AuthorizeRequest) -> Result<AuthorizeOutcome> {
		obs::observe(FlowKind::AuthorizationCode, "authorize", async move {
			let scope = ScopeSet::new(&request.scopes)?;

			let current = if request.force { None } else { self.authorized_token().await? };

			if let Some(current) = current.filter(|record| !record.is_expired()) {
				return Ok(AuthorizeOutcome::Authorized(current));
			}
			if let Some(reason) = self.request_context().error() {
				return Err(AuthorizationError::AccessDenied { reason: reason.to_owned() }.into());
			}
			if let Some(code) = self.request_context().code() {
				let state_matches = request
					.expected_state
					.as_deref()
					.is_none_or(|expected| self.request_context().state() == Some(expected));

				if !state_matches {
					return Err(AuthorizationError::StateMismatch.into());
				}

				let record = self.exchange_code_once(code, &scope, request.remember).await?;

				return Ok(AuthorizeOutcome::Authorized(record));
			}

			let session = self.authorization_session(scope, request.remember)?;

			Ok(if request.redirect {
				AuthorizeOutcome::Redirect(session)
			} else {
				AuthorizeOutcome::Unauthorized(session)
			})
		})
		.await
	}

	/// Starts a handshake: fresh anti-CSRF state plus the consent screen URL.
	pub fn authorization_session(
		&self,
		scope: ScopeSet,
		remember: Remember,
	) -> Result<AuthorizationSession> {
		let _flow = obs::enter_flow(FlowKind::AuthorizationCode, "authorization_session");
		let redirect_uri =
			self.config().redirect_uri.clone().ok_or(AuthorizationError::MissingRedirectUri)?;

		Ok(AuthorizationSession::new(
			&self.config().endpoints.authorize,
			&self.config().client_id,
			redirect_uri,
			scope,
			remember,
		))
	}

	/// Exchanges an authorization code for a token.
	///
	/// `scope` is recorded on the token when Reddit's response omits one.
	pub async fn exchange_code(
		&self,
		code: &str,
		scope: &ScopeSet,
		remember: Remember,
	) -> Result<TokenRecord> {
		obs::observe(
			FlowKind::AuthorizationCode,
			"exchange_code",
			self.exchange_code_once(code, scope, remember),
		)
		.await
	}

	async fn exchange_code_once(
		&self,
		code: &str,
		scope: &ScopeSet,
		remember: Remember,
	) -> Result<TokenRecord> {
		common::require_non_empty("code", code)?;

		let redirect_uri =
			self.config().redirect_uri.clone().ok_or(AuthorizationError::MissingRedirectUri)?;
		let form = common::form([
			("grant_type", "authorization_code"),
			("code", code),
			("redirect_uri", redirect_uri.as_str()),
		]);
		let record = self.request_token(form, scope).await?;

		self.install_token(record.clone(), remember).await?;

		Ok(record)
	}
}
