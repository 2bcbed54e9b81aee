//! Shared fixtures for the integration suites.

#![allow(dead_code)]

// std
use std::sync::{
	Arc,
	atomic::{AtomicU64, Ordering},
};
// self
use careportal_client::{
	client::{ApiClient, ReqwestApiClient, SessionObserver},
	config::ApiConfig,
	session::SessionRecord,
	store::{MemoryStore, SessionStore},
	transport::ReqwestTransport,
};

/// Session observer that counts invalidation callbacks for assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver(AtomicU64);
impl RecordingObserver {
	/// Number of times the session was invalidated.
	pub fn invalidations(&self) -> u64 {
		self.0.load(Ordering::Relaxed)
	}
}
impl SessionObserver for RecordingObserver {
	fn session_invalidated(&self) {
		self.0.fetch_add(1, Ordering::Relaxed);
	}
}

/// Builds a reqwest-backed client against `base_url` with an in-memory store and a
/// recording observer.
pub fn build_test_client(
	base_url: &str,
) -> (ReqwestApiClient, Arc<MemoryStore>, Arc<RecordingObserver>) {
	let config = ApiConfig::new(base_url).expect("Test base URL should be valid.");
	let store_backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn SessionStore> = store_backend.clone();
	let observer = Arc::new(RecordingObserver::default());
	let client = <ApiClient<ReqwestTransport>>::with_transport(
		store,
		config,
		ReqwestTransport::default(),
	)
	.with_observer(observer.clone());

	(client, store_backend, observer)
}

/// Seeds the store with a session holding the provided secrets.
pub async fn seed_session(store: &MemoryStore, access: &str, refresh: Option<&str>) {
	let mut builder = SessionRecord::builder().access_token(access);

	if let Some(refresh) = refresh {
		builder = builder.refresh_token(refresh);
	}

	let record = builder.build().expect("Session fixture should build successfully.");

	store.save(record).await.expect("Failed to seed session into the store.");
}
