//! Client-level error types shared across the session store, transport, and dispatch layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Session-store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS) on a primary request.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The server rejected the request with 401 after a completed token refresh.
	#[error("Request was rejected with 401 after a token refresh.")]
	Unauthorized,
	/// The session was torn down and every stored credential was cleared.
	#[error("Session was invalidated: {cause}")]
	SessionInvalidated {
		/// Why the session had to end.
		#[source]
		cause: InvalidationCause,
	},
	/// A typed endpoint helper received a non-success status.
	#[error("Server returned HTTP {status}.")]
	UnexpectedStatus {
		/// HTTP status code returned by the server.
		status: u16,
		/// Response body, for caller-side diagnostics.
		body: String,
	},
	/// A typed endpoint helper could not decode the response body.
	#[error("Response body is not valid JSON for the expected type.")]
	Decode {
		/// Structured parsing failure carrying the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response that failed to decode.
		status: u16,
	},
}

/// Reasons the client invalidates a session and clears stored credentials.
#[derive(Debug, ThisError)]
pub enum InvalidationCause {
	/// No refresh token is stored, so a 401 cannot be recovered.
	#[error("No refresh token is stored.")]
	MissingRefreshToken,
	/// The refresh endpoint answered with a non-success status.
	#[error("Refresh endpoint rejected the session with HTTP {status}.")]
	RefreshRejected {
		/// HTTP status code returned by the refresh endpoint.
		status: u16,
	},
	/// The refresh endpoint could not be reached.
	#[error("Refresh endpoint could not be reached.")]
	RefreshTransport(#[source] TransportError),
	/// The refresh endpoint returned a body the client could not parse.
	#[error("Refresh endpoint returned malformed JSON.")]
	RefreshResponseParse(#[source] serde_path_to_error::Error<serde_json::Error>),
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint path cannot be joined onto the base URL.
	#[error("Endpoint path `{path}` is invalid.")]
	InvalidPath {
		/// The offending path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	RequestBody(#[from] serde_json::Error),
	/// Session record builder validation failed.
	#[error("Unable to build session record.")]
	SessionBuild(#[from] crate::session::SessionRecordBuilderError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the server.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the server.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
