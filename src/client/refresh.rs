//! Token refresh orchestration: singleflight guard, rotation, and session teardown.
//!
//! [`ApiClient::refresh_access_token`] recovers exactly one failure class (an expired access
//! token) transparently. Concurrent callers serialize behind a client-wide guard; whoever
//! acquires it first performs the endpoint call, and later holders reuse the rotated token
//! instead of contacting the endpoint again. Unrecoverable outcomes clear the store, notify
//! the session observer, and surface [`Error::SessionInvalidated`].

mod metrics;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	config,
	error::InvalidationCause,
	obs::{self, RequestKind, RequestOutcome, RequestSpan},
	session::TokenSecret,
	store::ReplaceOutcome,
	transport::HttpTransport,
};

/// Wire payload sent to the refresh endpoint.
#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
	refresh: &'a str,
}

/// Wire payload returned by the refresh endpoint.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
	access: String,
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Exchanges the stored refresh token for a new access token.
	///
	/// `stale` is the access token that was rejected, when known. If the store already holds
	/// a different token by the time the guard is acquired, another caller finished a refresh
	/// first and that token is returned without a network call.
	pub async fn refresh_access_token(&self, stale: Option<&TokenSecret>) -> Result<TokenSecret> {
		const KIND: RequestKind = RequestKind::Refresh;

		let span = RequestSpan::new(KIND, "refresh_access_token");

		obs::record_request_outcome(KIND, RequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.refresh_metrics.record_attempt();

				let _singleflight = self.refresh_guard.lock().await;
				let current = self.store.fetch().await.map_err(|err| {
					self.refresh_metrics.record_failure();

					Error::from(err)
				})?;
				let Some(session) = current else {
					return Err(self.invalidate(InvalidationCause::MissingRefreshToken).await);
				};

				if stale.is_some_and(|stale| session.access_token != *stale) {
					self.refresh_metrics.record_success();

					return Ok(session.access_token);
				}

				let Some(refresh_token) = session.refresh_token.clone() else {
					return Err(self.invalidate(InvalidationCause::MissingRefreshToken).await);
				};
				// Dedicated, non-intercepted call: no bearer attach, no retry, no recursion.
				let rendered = ApiRequest::post(config::REFRESH_PATH)
					.json(&RefreshRequest { refresh: refresh_token.expose() })
					.and_then(|request| request.to_http(&self.config, None))
					.map_err(|err| {
						self.refresh_metrics.record_failure();

						Error::from(err)
					})?;
				let response = match self.transport.execute(rendered).await {
					Ok(response) => response,
					Err(err) =>
						return Err(self.invalidate(InvalidationCause::RefreshTransport(err)).await),
				};
				let status = response.status();

				if !status.is_success() {
					return Err(self
						.invalidate(InvalidationCause::RefreshRejected {
							status: status.as_u16(),
						})
						.await);
				}

				let mut deserializer = serde_json::Deserializer::from_slice(response.body());
				let payload: RefreshResponse =
					match serde_path_to_error::deserialize(&mut deserializer) {
						Ok(payload) => payload,
						Err(source) =>
							return Err(self
								.invalidate(InvalidationCause::RefreshResponseParse(source))
								.await),
					};
				let access = TokenSecret::new(payload.access);
				let rotated_at = OffsetDateTime::now_utc();
				let outcome = self
					.store
					.replace_access_token(access.clone(), rotated_at)
					.await
					.map_err(|err| {
						self.refresh_metrics.record_failure();

						Error::from(err)
					})?;

				if matches!(outcome, ReplaceOutcome::Missing) {
					// The slot emptied mid-flight (a logout raced the refresh); last write
					// wins, so re-save the rotated record.
					let mut rebuilt = session;

					rebuilt.rotate_access_token(access.clone(), rotated_at);
					self.store.save(rebuilt).await.map_err(|err| {
						self.refresh_metrics.record_failure();

						Error::from(err)
					})?;
				}

				self.refresh_metrics.record_success();
				Ok(access)
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(KIND, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(KIND, RequestOutcome::Failure),
		}

		result
	}

	/// Clears the store, notifies the observer, and builds the terminal error.
	async fn invalidate(&self, cause: InvalidationCause) -> Error {
		let _ = self.store.clear().await;

		self.observer.session_invalidated();
		self.refresh_metrics.record_failure();
		self.refresh_metrics.record_invalidation();

		Error::SessionInvalidated { cause }
	}
}
