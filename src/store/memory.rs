//! Thread-safe in-memory [`SessionStore`] for applications and tests.

// self
use crate::{
	_prelude::*,
	session::{SessionRecord, TokenSecret},
	store::{ReplaceOutcome, SessionStore, StoreFuture},
};

type Slot = Arc<RwLock<Option<SessionRecord>>>;

/// Keeps the session slot in process memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Slot);
impl MemoryStore {
	fn replace_now(slot: Slot, access: TokenSecret, rotated_at: OffsetDateTime) -> ReplaceOutcome {
		let mut guard = slot.write();

		match guard.as_mut() {
			Some(record) => {
				record.rotate_access_token(access, rotated_at);

				ReplaceOutcome::Replaced
			},
			None => ReplaceOutcome::Missing,
		}
	}
}
impl SessionStore for MemoryStore {
	fn save(&self, record: SessionRecord) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			*slot.write() = Some(record);

			Ok(())
		})
	}

	fn fetch(&self) -> StoreFuture<'_, Option<SessionRecord>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(slot.read().clone()) })
	}

	fn replace_access_token(
		&self,
		access: TokenSecret,
		rotated_at: OffsetDateTime,
	) -> StoreFuture<'_, ReplaceOutcome> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(Self::replace_now(slot, access, rotated_at)) })
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			*slot.write() = None;

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn seeded_record() -> SessionRecord {
		SessionRecord::builder()
			.access_token("expired-1")
			.refresh_token("valid-r1")
			.build()
			.expect("Session record fixture should build successfully.")
	}

	#[tokio::test]
	async fn slot_lifecycle_round_trips() {
		let store = MemoryStore::default();

		assert!(store.fetch().await.expect("Empty fetch should succeed.").is_none());

		store.save(seeded_record()).await.expect("Save should succeed.");

		let fetched = store
			.fetch()
			.await
			.expect("Fetch should succeed.")
			.expect("Saved session should be present.");

		assert_eq!(fetched.access_token.expose(), "expired-1");

		store.clear().await.expect("Clear should succeed.");

		assert!(store.fetch().await.expect("Cleared fetch should succeed.").is_none());
	}

	#[tokio::test]
	async fn replace_swaps_only_the_access_token() {
		let store = MemoryStore::default();

		store.save(seeded_record()).await.expect("Save should succeed.");

		let outcome = store
			.replace_access_token(TokenSecret::new("fresh-2"), OffsetDateTime::now_utc())
			.await
			.expect("Replace should succeed.");

		assert_eq!(outcome, ReplaceOutcome::Replaced);

		let fetched = store
			.fetch()
			.await
			.expect("Fetch should succeed.")
			.expect("Session should remain present after rotation.");

		assert_eq!(fetched.access_token.expose(), "fresh-2");
		assert_eq!(
			fetched.refresh_token.as_ref().map(|secret| secret.expose()),
			Some("valid-r1")
		);
	}

	#[tokio::test]
	async fn replace_reports_missing_on_empty_slot() {
		let store = MemoryStore::default();
		let outcome = store
			.replace_access_token(TokenSecret::new("fresh-2"), OffsetDateTime::now_utc())
			.await
			.expect("Replace should succeed even when the slot is empty.");

		assert_eq!(outcome, ReplaceOutcome::Missing);
	}
}
