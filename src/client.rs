//! The authenticated client: bearer attachment, one-shot refresh, and typed dispatch.

pub mod dispatch;
pub mod refresh;

pub use dispatch::*;
pub use refresh::*;

// self
use crate::{_prelude::*, config::ApiConfig, store::SessionStore, transport::HttpTransport};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Observer notified when the client tears a session down.
///
/// Clearing credentials signs the account out; the embedding application decides what
/// re-authentication looks like (for a UI, typically navigating to its login route).
pub trait SessionObserver
where
	Self: Send + Sync,
{
	/// Called after the stored credentials were cleared due to an unrecoverable failure.
	fn session_invalidated(&self);
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSessionObserver;
impl SessionObserver for NoopSessionObserver {
	fn session_invalidated(&self) {}
}

/// Coordinates authenticated requests against the platform API.
///
/// The client owns the transport, the session store, and the refresh guard so the dispatch
/// pipeline and the refresh flow observe one consistent credential slot. Cloning is cheap;
/// clones share the store, the guard, and the metrics recorder.
#[derive(Clone)]
pub struct ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// HTTP transport used for every outbound request.
	pub transport: Arc<T>,
	/// Session store holding the access token, refresh token, and cached profile.
	pub store: Arc<dyn SessionStore>,
	/// Resolved configuration (normalized base URL).
	pub config: ApiConfig,
	/// Observer notified on session invalidation.
	pub observer: Arc<dyn SessionObserver>,
	/// Shared metrics recorder for refresh flow outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		store: Arc<dyn SessionStore>,
		config: ApiConfig,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			transport: transport.into(),
			store,
			config,
			observer: Arc::new(NoopSessionObserver),
			refresh_metrics: Default::default(),
			refresh_guard: Default::default(),
		}
	}

	/// Sets or replaces the session observer.
	pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
		self.observer = observer;

		self
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a client with the crate's default reqwest transport.
	///
	/// Use [`ApiClient::with_transport`] to supply a preconfigured transport (custom TLS,
	/// proxies, timeouts) and [`ApiClient::with_observer`] to react to session teardown.
	pub fn new(store: Arc<dyn SessionStore>, config: ApiConfig) -> Self {
		Self::with_transport(store, config, ReqwestTransport::default())
	}
}
impl<T> Debug for ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient").field("config", &self.config).finish()
	}
}
