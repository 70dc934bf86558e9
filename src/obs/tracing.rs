//! Flow spans and transfer events; everything here is inert without the `tracing` feature.

// self
use crate::{_prelude::*, http::TransferInfo, obs::FlowKind};

/// Keeps a flow span entered for a synchronous section until dropped.
pub struct FlowGuard {
	#[cfg(feature = "tracing")]
	_entered: tracing::span::EnteredSpan,
}
impl Debug for FlowGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FlowGuard(..)")
	}
}

pub(crate) fn enter_flow(kind: FlowKind, stage: &'static str) -> FlowGuard {
	#[cfg(feature = "tracing")]
	{
		FlowGuard { _entered: flow_span(kind, stage).entered() }
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, stage);

		FlowGuard {}
	}
}

/// Polls `fut` inside the flow span; no guard is held across `.await` points.
pub(crate) async fn in_flow<Fut>(kind: FlowKind, stage: &'static str, fut: Fut) -> Fut::Output
where
	Fut: Future,
{
	#[cfg(feature = "tracing")]
	{
		use tracing::Instrument;

		fut.instrument(flow_span(kind, stage)).await
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, stage);

		fut.await
	}
}

pub(crate) fn transfer_event(info: &TransferInfo) {
	#[cfg(feature = "tracing")]
	tracing::debug!(
		method = info.method.as_str(),
		url = %info.url,
		status = info.status,
		elapsed_ms = info.elapsed.whole_milliseconds() as u64,
		ratelimit_remaining = info.rate_limit.remaining,
		"reddit transfer completed"
	);

	#[cfg(not(feature = "tracing"))]
	{
		let _ = info;
	}
}

#[cfg(feature = "tracing")]
fn flow_span(kind: FlowKind, stage: &'static str) -> tracing::Span {
	tracing::info_span!("reddit_oauth2.flow", flow = kind.as_str(), stage)
}
