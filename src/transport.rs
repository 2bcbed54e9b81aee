//! Transport primitives for dispatching platform requests.
//!
//! [`HttpTransport`] is the crate's only dependency on an HTTP stack. The dispatch pipeline
//! renders requests into `http` types and hands them to an implementation, so tests and
//! embedders can substitute fakes without touching the client itself.

// std
use std::ops::Deref;
// crates.io
use http::{Request, Response};
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Response<Vec<u8>>, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing platform requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared
/// across client clones, and the returned futures must be `Send` so caller futures remain
/// `Send` for the lifetime of the in-flight request.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes one request, buffering the complete response body.
	fn execute(&self, request: Request<Vec<u8>>) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Configure the inner client (TLS, proxies, timeouts) before wrapping it; the dispatch
/// pipeline never alters transport-level settings.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: Request<Vec<u8>>) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let request = request.try_into().map_err(TransportError::from)?;
			let response = client.execute(request).await.map_err(TransportError::from)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();
			let mut response_new = Response::new(body);

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
