//! Optional observability helpers for client flows.
//!
//! # Feature Flags
//!
//! - `tracing` (default) wraps every flow in a `reddit_oauth2.flow` span carrying `flow` and
//!   `stage` fields, and emits a debug event per completed transfer.
//! - `metrics` counts flows in `reddit_oauth2_flow_total` (labels `flow`, `outcome`) and
//!   responses in `reddit_oauth2_transfer_total` (labels `method`, `status`).

mod metrics;
mod tracing;

pub use self::tracing::FlowGuard;

pub(crate) use self::tracing::enter_flow;

// self
use crate::{
	_prelude::*,
	http::TransferInfo,
	obs::{
		metrics::{count_flow, count_transfer},
		tracing::{in_flow, transfer_event},
	},
};

/// Flow kinds observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Password grant (`login`).
	Password,
	/// Authorization-code redirect flow and code exchange.
	AuthorizationCode,
	/// Refresh token grant.
	Refresh,
	/// Token revocation.
	Revoke,
	/// Authenticated resource request.
	Resource,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Password => "password",
			FlowKind::AuthorizationCode => "authorization_code",
			FlowKind::Refresh => "refresh",
			FlowKind::Revoke => "revoke",
			FlowKind::Resource => "resource",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` as one flow: a `reddit_oauth2.flow` span plus attempt and outcome counts.
///
/// Work nested inside a flow must not call this again, so one caller-facing operation counts as
/// exactly one flow.
pub(crate) async fn observe<T, Fut>(kind: FlowKind, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	count_flow(kind, FlowOutcome::Attempt);

	let result = in_flow(kind, stage, fut).await;

	count_flow(kind, if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure });

	result
}

/// Reports a completed transfer to the enabled backends.
pub(crate) fn record_transfer(info: &TransferInfo) {
	transfer_event(info);
	count_transfer(info);
}
