//! Request descriptors and the bearer-attach / one-shot-retry dispatch pipeline.

// crates.io
use http::{
	Method, Request, Response, StatusCode,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	client::ApiClient,
	config::ApiConfig,
	error::ConfigError,
	obs::{self, RequestKind, RequestOutcome, RequestSpan},
	session::TokenSecret,
	transport::HttpTransport,
};

/// Outgoing request descriptor: method, endpoint path, query pairs, and optional JSON body.
#[derive(Clone)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Endpoint path relative to the configured base URL.
	pub path: String,
	query: Vec<(String, String)>,
	body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates a request with the provided method and relative path.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self { method, path: path.into(), query: Vec::new(), body: None }
	}

	/// Creates a GET request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// Creates a POST request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// Creates a DELETE request.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	/// Appends a query pair.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Attaches a JSON body.
	pub fn json<B>(mut self, body: &B) -> Result<Self, ConfigError>
	where
		B: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_vec(body)?);

		Ok(self)
	}

	/// Renders the descriptor into an `http` request, attaching the bearer credential when
	/// one is provided.
	pub(crate) fn to_http(
		&self,
		config: &ApiConfig,
		bearer: Option<&TokenSecret>,
	) -> Result<Request<Vec<u8>>, ConfigError> {
		let mut url = config.endpoint(&self.path)?;

		for (key, value) in &self.query {
			url.query_pairs_mut().append_pair(key, value);
		}

		let mut builder = Request::builder()
			.method(self.method.clone())
			.uri(url.as_str())
			.header(ACCEPT, "application/json");

		if let Some(token) = bearer {
			builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose()));
		}
		if self.body.is_some() {
			builder = builder.header(CONTENT_TYPE, "application/json");
		}

		builder.body(self.body.clone().unwrap_or_default()).map_err(ConfigError::HttpRequest)
	}
}
impl Debug for ApiRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiRequest")
			.field("method", &self.method)
			.field("path", &self.path)
			.field("query", &self.query)
			.field("body_bytes", &self.body.as_ref().map(Vec::len))
			.finish()
	}
}

/// Explicit one-shot retry marker carried through the dispatch call chain.
///
/// The marker is owned by the dispatch loop rather than the request value, so no request can
/// trigger more than one refresh round-trip.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RequestContext {
	retried: bool,
}
impl RequestContext {
	pub(crate) fn retried(self) -> bool {
		self.retried
	}

	pub(crate) fn mark_retried(&mut self) {
		self.retried = true;
	}
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Dispatches a request through the authenticated pipeline.
	///
	/// The current access token is read from the store at dispatch time and attached as a
	/// bearer credential when present; requests without a stored token are sent
	/// unauthenticated and left to the server to reject. A 401 response triggers at most one
	/// token refresh followed by a redispatch of the original request; every other status,
	/// success or failure, is returned to the caller unmodified.
	pub async fn send(&self, request: ApiRequest) -> Result<Response<Vec<u8>>> {
		const KIND: RequestKind = RequestKind::Dispatch;

		let span = RequestSpan::new(KIND, "send");

		obs::record_request_outcome(KIND, RequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut ctx = RequestContext::default();

				loop {
					let bearer = self.current_access_token().await?;
					let rendered = request.to_http(&self.config, bearer.as_ref())?;
					let response = self.transport.execute(rendered).await?;

					if response.status() != StatusCode::UNAUTHORIZED {
						return Ok(response);
					}
					if ctx.retried() {
						return Err(Error::Unauthorized);
					}

					ctx.mark_retried();
					self.refresh_access_token(bearer.as_ref()).await?;
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(KIND, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(KIND, RequestOutcome::Failure),
		}

		result
	}

	/// Reads the access token currently held by the store.
	pub async fn current_access_token(&self) -> Result<Option<TokenSecret>> {
		let session = self.store.fetch().await?;

		Ok(session.map(|record| record.access_token))
	}

	/// Dispatches and decodes a JSON success body.
	///
	/// Non-2xx statuses become [`Error::UnexpectedStatus`]; interpretation happens in this
	/// typed layer, never inside [`send`](Self::send).
	pub async fn send_json<P>(&self, request: ApiRequest) -> Result<P>
	where
		P: DeserializeOwned,
	{
		let response = self.send(request).await?;
		let status = require_success(&response)?;

		decode_json(response.body(), status)
	}

	/// Dispatches and discards the body, mapping non-2xx statuses to
	/// [`Error::UnexpectedStatus`].
	pub async fn send_expecting_success(&self, request: ApiRequest) -> Result<()> {
		let response = self.send(request).await?;

		require_success(&response).map(|_| ())
	}
}

/// Returns the status as `u16` or an [`Error::UnexpectedStatus`] carrying the body.
pub(crate) fn require_success(response: &Response<Vec<u8>>) -> Result<u16> {
	let status = response.status();

	if status.is_success() {
		Ok(status.as_u16())
	} else {
		Err(Error::UnexpectedStatus {
			status: status.as_u16(),
			body: String::from_utf8_lossy(response.body()).into_owned(),
		})
	}
}

/// Decodes a JSON body with pathed diagnostics.
pub(crate) fn decode_json<P>(body: &[u8], status: u16) -> Result<P>
where
	P: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { source, status })
}
