//! Client configuration: base URL resolution and normalization.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Environment variable consulted by [`ApiConfig::from_env`].
pub const BASE_URL_ENV: &str = "CAREPORTAL_API_URL";
/// Base URL used when no explicit value or environment override is present.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
/// Relative path of the dedicated token-refresh endpoint.
pub(crate) const REFRESH_PATH: &str = "auth/token/refresh/";

/// Resolved client configuration.
///
/// The base URL is normalized to end with `/` so endpoint paths join as child segments
/// instead of replacing the final path component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
	base_url: Url,
}
impl ApiConfig {
	/// Parses and normalizes an explicit base URL.
	pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
		Ok(Self { base_url: normalize(base_url.as_ref())? })
	}

	/// Resolves the base URL from [`BASE_URL_ENV`], falling back to [`DEFAULT_BASE_URL`].
	pub fn from_env() -> Result<Self, ConfigError> {
		match env::var(BASE_URL_ENV) {
			Ok(value) => Self::new(value),
			Err(_) => Self::new(DEFAULT_BASE_URL),
		}
	}

	/// Returns the normalized base URL.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Joins a relative endpoint path onto the base URL.
	pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let relative = path.trim_start_matches('/');

		self.base_url
			.join(relative)
			.map_err(|e| ConfigError::InvalidPath { path: path.to_owned(), source: e })
	}
}

fn normalize(raw: &str) -> Result<Url, ConfigError> {
	let trimmed = raw.trim_end_matches('/');

	Url::parse(&format!("{trimmed}/")).map_err(|e| ConfigError::InvalidBaseUrl { source: e })
}
