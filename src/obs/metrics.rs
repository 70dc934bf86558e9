//! Counters recorded through the global `metrics` recorder.

// self
use crate::{
	http::TransferInfo,
	obs::{FlowKind, FlowOutcome},
};

pub(crate) fn count_flow(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"reddit_oauth2_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

pub(crate) fn count_transfer(info: &TransferInfo) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"reddit_oauth2_transfer_total",
			"method" => info.method.as_str(),
			"status" => status_class(info.status)
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = info;
	}
}

#[cfg(any(test, feature = "metrics"))]
fn status_class(status: u16) -> &'static str {
	match status {
		100..=199 => "1xx",
		200..=299 => "2xx",
		300..=399 => "3xx",
		400..=499 => "4xx",
		500..=599 => "5xx",
		_ => "other",
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn throttled_and_failed_responses_share_a_class() {
		assert_eq!(status_class(200), "2xx");
		assert_eq!(status_class(204), "2xx");
		assert_eq!(status_class(302), "3xx");
		assert_eq!(status_class(429), "4xx");
		assert_eq!(status_class(503), "5xx");
		assert_eq!(status_class(0), "other");
	}
}
