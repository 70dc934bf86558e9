//! Key/value persistence contract for token state and the built-in store implementations.
//!
//! The client keeps one serialized [`TokenRecord`](crate::auth::TokenRecord) under
//! [`TOKEN_KEY`]. Stores play the role a browser cookie jar plays for web apps: values
//! carry an optional time-to-live and vanish once it elapses.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::_prelude::*;

/// Fixed key the token record is persisted under.
pub const TOKEN_KEY: &str = "reddit_oauth2_token";

/// Boxed future returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by token stores.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Returns the value stored under `key`, or `None` when absent or expired.
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>>;

	/// Stores `value` under `key`, replacing any previous value; `ttl` bounds its lifetime.
	fn set<'a>(&'a self, key: &'a str, value: String, ttl: Option<Duration>) -> StoreFuture<'a, ()>;

	/// Removes the value stored under `key`, if any.
	fn delete<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Stored value plus its absolute expiry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
	/// Raw stored value.
	pub value: String,
	/// Instant after which the entry is ignored.
	pub expires_at: Option<OffsetDateTime>,
}
impl StoredEntry {
	/// Creates an entry expiring `ttl` after `now`.
	///
	/// A deadline past the last representable instant never expires.
	pub fn new(value: String, ttl: Option<Duration>, now: OffsetDateTime) -> Self {
		Self { value, expires_at: ttl.and_then(|ttl| now.checked_add(ttl)) }
	}

	/// Returns `true` once the expiry instant has passed.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| expires_at <= instant)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn entries_expire_at_their_deadline() {
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let entry = StoredEntry::new("v".into(), Some(Duration::seconds(10)), now);

		assert!(!entry.is_expired_at(now + Duration::seconds(9)));
		assert!(entry.is_expired_at(now + Duration::seconds(10)));

		let forever = StoredEntry::new("v".into(), None, now);

		assert!(!forever.is_expired_at(now + Duration::days(3650)));

		let unbounded = StoredEntry::new("v".into(), Some(Duration::MAX), now);

		assert_eq!(unbounded.expires_at, None);
	}

	#[test]
	fn store_error_can_be_serialized() {
		let payload = serde_json::to_string(&StoreError::Backend { message: "down".into() })
			.expect("StoreError should serialize to JSON.");
		let round_trip: StoreError =
			serde_json::from_str(&payload).expect("StoreError should deserialize from JSON.");

		assert_eq!(round_trip, StoreError::Backend { message: "down".into() });
	}
}
