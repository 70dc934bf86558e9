//! Reddit resource endpoints.
//!
//! Endpoints are data, not code: [`CATALOG`] lists each one as an [`EndpointSpec`], and a single
//! algorithm validates, authorizes, builds, and sends every call. [`RedditClient::call`] reaches
//! any cataloged endpoint by name, while the typed wrappers in this module cover the most common
//! operations.

mod catalog;
mod methods;
mod schema;

pub use catalog::*;
pub use methods::*;
pub use schema::*;

pub(crate) use schema::join_segments;

// self
use crate::{
	_prelude::*,
	error::{AuthorizationError, ValidationError},
	flows::RedditClient,
	http::{self, ApiRequest, ApiResponse, HttpTransport, RequestAuth},
	obs::{self, FlowKind},
};

impl<T> RedditClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Calls the cataloged endpoint named `name`.
	pub async fn call(&self, name: &str, params: Params) -> Result<ApiResponse> {
		let endpoint =
			find(name).ok_or_else(|| ValidationError::UnknownEndpoint { name: name.to_owned() })?;

		self.call_endpoint(endpoint, params).await
	}

	/// Validates `params`, authorizes, and performs exactly one request against `endpoint`.
	///
	/// Validation happens before any I/O. An expired token is refreshed once first. The token's
	/// granted scope must cover the endpoint's scope unless Reddit reported no scope at all.
	pub async fn call_endpoint(
		&self,
		endpoint: &EndpointSpec,
		params: Params,
	) -> Result<ApiResponse> {
		obs::observe(FlowKind::Resource, endpoint.name, async move {
			endpoint.validate(&params)?;

			let token = self.authorized_token().await?.ok_or(AuthorizationError::MissingToken)?;

			if !token.scope.is_empty() && !token.scope.contains(endpoint.scope) {
				return Err(AuthorizationError::InsufficientScope {
					required: endpoint.scope,
					granted: token.scope.normalized(),
				}
				.into());
			}

			let (url, body) = endpoint.build(&self.config().endpoints.api_base, &params)?;
			let request = ApiRequest::new(endpoint.method, url).with_body(body).with_auth(
				RequestAuth::Token {
					token_type: token.token_type.clone(),
					access_token: token.access_token.expose().to_owned(),
				},
			);

			http::decode(self.send(request).await?)
		})
		.await
	}
}
