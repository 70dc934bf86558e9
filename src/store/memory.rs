//! Thread-safe in-memory [`TokenStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{StoreError, StoreFuture, StoredEntry, TokenStore},
};

type StoreMap = Arc<RwLock<HashMap<String, StoredEntry>>>;

/// Storage backend that keeps values in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Number of live (unexpired) entries.
	pub fn len(&self) -> usize {
		let now = OffsetDateTime::now_utc();

		self.0.read().values().filter(|entry| !entry.is_expired_at(now)).count()
	}

	/// Returns `true` when no live entries remain.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the raw entry (including its expiry) without evicting it.
	pub fn entry(&self, key: &str) -> Option<StoredEntry> {
		self.0.read().get(key).cloned()
	}

	fn get_now(map: &StoreMap, key: &str) -> Option<String> {
		let now = OffsetDateTime::now_utc();
		let mut guard = map.write();

		match guard.get(key) {
			Some(entry) if entry.is_expired_at(now) => {
				guard.remove(key);

				None
			},
			Some(entry) => Some(entry.value.clone()),
			None => None,
		}
	}
}
impl TokenStore for MemoryStore {
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::get_now(&map, key)) })
	}

	fn set<'a>(&'a self, key: &'a str, value: String, ttl: Option<Duration>) -> StoreFuture<'a, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			let entry = StoredEntry::new(value, ttl, OffsetDateTime::now_utc());

			map.write().insert(key.to_owned(), entry);

			Ok(())
		})
	}

	fn delete<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			map.write().remove(key);

			Ok(())
		})
	}
}
