//! Authentication endpoints: login, logout, and profile retrieval.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest, decode_json, require_success},
	error::ConfigError,
	session::{SessionRecord, UserProfile},
	transport::HttpTransport,
};

/// Credentials submitted to the login endpoint.
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: String,
}
impl Debug for LoginCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginCredentials")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Wire payload returned by the login endpoint.
#[derive(Debug, Deserialize)]
struct LoginResponse {
	access: String,
	refresh: String,
	user: Option<UserProfile>,
}

/// Wire payload posted to the logout endpoint to revoke the refresh token.
#[derive(Debug, Serialize)]
struct LogoutRequest<'a> {
	refresh: &'a str,
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Authenticates via `POST auth/login/` and stores the returned session.
	///
	/// The call bypasses the authenticated pipeline: no bearer credential is attached, and a
	/// rejection surfaces as [`Error::UnexpectedStatus`](crate::error::Error::UnexpectedStatus)
	/// instead of entering the 401 refresh path.
	pub async fn login(&self, credentials: &LoginCredentials) -> Result<SessionRecord> {
		let rendered =
			ApiRequest::post("auth/login/").json(credentials)?.to_http(&self.config, None)?;
		let response = self.transport.execute(rendered).await?;
		let status = require_success(&response)?;
		let payload: LoginResponse = decode_json(response.body(), status)?;
		let mut builder = SessionRecord::builder()
			.access_token(payload.access)
			.refresh_token(payload.refresh);

		if let Some(user) = payload.user {
			builder = builder.user(user);
		}

		let record = builder.build().map_err(ConfigError::from)?;

		self.store.save(record.clone()).await?;

		Ok(record)
	}

	/// Signs out: best-effort `POST auth/logout/` with the refresh token, then clears the
	/// stored session.
	///
	/// Revocation is advisory; an unreachable server must not block sign-out, so transport
	/// failures on the logout call are ignored and the local slot is cleared regardless.
	pub async fn logout(&self) -> Result<()> {
		let session = self.store.fetch().await?;

		if let Some(refresh) = session.and_then(|record| record.refresh_token) {
			let revoke = ApiRequest::post("auth/logout/")
				.json(&LogoutRequest { refresh: refresh.expose() })
				.and_then(|request| request.to_http(&self.config, None));

			if let Ok(rendered) = revoke {
				let _ = self.transport.execute(rendered).await;
			}
		}

		self.store.clear().await?;

		Ok(())
	}

	/// Fetches the signed-in account's profile via `GET auth/profile/`.
	pub async fn fetch_profile(&self) -> Result<UserProfile> {
		self.send_json(ApiRequest::get("auth/profile/")).await
	}

	/// Returns the profile cached at login, without a network call.
	pub async fn cached_profile(&self) -> Result<Option<UserProfile>> {
		Ok(self.store.fetch().await?.and_then(|record| record.user))
	}
}
