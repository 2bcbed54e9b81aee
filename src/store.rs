//! Storage contracts and built-in backends for the client's session slot.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	session::{SessionRecord, TokenSecret},
};

/// Boxed future returned by [`SessionStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence contract for the client's single session slot.
///
/// Implementations own the slot exclusively; every read and write from the client goes
/// through this interface so the credential lifecycle (populate at login, rotate at refresh,
/// clear at logout or invalidation) stays observable and testable. Writes replace values
/// atomically; concurrent writers follow last-write-wins.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Persists or replaces the stored session.
	fn save(&self, record: SessionRecord) -> StoreFuture<'_, ()>;

	/// Fetches the stored session, if present.
	fn fetch(&self) -> StoreFuture<'_, Option<SessionRecord>>;

	/// Atomically replaces the access token, leaving the refresh token and profile in place.
	fn replace_access_token(
		&self,
		access: TokenSecret,
		rotated_at: OffsetDateTime,
	) -> StoreFuture<'_, ReplaceOutcome>;

	/// Destroys every stored session value.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Result of an access-token replacement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplaceOutcome {
	/// A session was present and its access token was swapped.
	Replaced,
	/// No session was stored.
	Missing,
}

/// Error type produced by [`SessionStore`] implementations.
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
