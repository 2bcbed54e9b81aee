//! The session record, its lifecycle helpers, and its builder.

// self
use crate::{
	_prelude::*,
	session::{TokenSecret, UserProfile},
};

/// Errors produced by [`SessionRecordBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum SessionRecordBuilderError {
	/// Issued when no access token value was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
}

/// The single shared mutable session slot persisted by the client.
///
/// Created at login, mutated in place by the refresh flow (access token replaced, refresh
/// token retained), and destroyed on logout or unrecoverable refresh failure. A record
/// without a refresh token cannot recover from an authorization failure.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionRecord {
	/// Short-lived bearer credential attached to authenticated requests.
	pub access_token: TokenSecret,
	/// Long-lived credential exchanged for new access tokens, if one was issued.
	pub refresh_token: Option<TokenSecret>,
	/// Cached profile of the signed-in account.
	pub user: Option<UserProfile>,
	/// Instant the access token was issued or last rotated.
	#[serde(with = "time::serde::rfc3339")]
	pub issued_at: OffsetDateTime,
}
impl SessionRecord {
	/// Returns a builder for constructing validated records.
	pub fn builder() -> SessionRecordBuilder {
		SessionRecordBuilder::default()
	}

	/// Returns `true` if the record can recover from an authorization failure.
	pub fn is_refreshable(&self) -> bool {
		self.refresh_token.is_some()
	}

	/// Replaces the access token in place, retaining the refresh token and profile.
	pub fn rotate_access_token(&mut self, access: TokenSecret, instant: OffsetDateTime) {
		self.access_token = access;
		self.issued_at = instant;
	}
}
impl Debug for SessionRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionRecord")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("user", &self.user)
			.field("issued_at", &self.issued_at)
			.finish()
	}
}

/// Builder for [`SessionRecord`].
#[derive(Clone, Debug, Default)]
pub struct SessionRecordBuilder {
	access_token: Option<TokenSecret>,
	refresh_token: Option<TokenSecret>,
	user: Option<UserProfile>,
	issued_at: Option<OffsetDateTime>,
}
impl SessionRecordBuilder {
	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(TokenSecret::new(token));

		self
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(token));

		self
	}

	/// Attaches the cached profile.
	pub fn user(mut self, user: UserProfile) -> Self {
		self.user = Some(user);

		self
	}

	/// Sets the issued-at instant; defaults to the current clock.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Consumes the builder and produces a [`SessionRecord`].
	pub fn build(self) -> Result<SessionRecord, SessionRecordBuilderError> {
		let access_token =
			self.access_token.ok_or(SessionRecordBuilderError::MissingAccessToken)?;
		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);

		Ok(SessionRecord {
			access_token,
			refresh_token: self.refresh_token,
			user: self.user,
			issued_at,
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;
	use crate::session::UserRole;

	#[test]
	fn builder_requires_access_token() {
		let err = SessionRecord::builder()
			.refresh_token("valid-r1")
			.build()
			.expect_err("Builder should reject records without an access token.");

		assert_eq!(err, SessionRecordBuilderError::MissingAccessToken);
	}

	#[test]
	fn rotation_retains_refresh_token_and_profile() {
		let issued = macros::datetime!(2026-01-01 00:00 UTC);
		let rotated = macros::datetime!(2026-01-01 00:20 UTC);
		let mut record = SessionRecord::builder()
			.access_token("expired-1")
			.refresh_token("valid-r1")
			.user(UserProfile {
				id: 7,
				email: "pat@example.com".into(),
				full_name: None,
				role: UserRole::Patient,
			})
			.issued_at(issued)
			.build()
			.expect("Session record fixture should build successfully.");

		record.rotate_access_token(TokenSecret::new("fresh-2"), rotated);

		assert_eq!(record.access_token.expose(), "fresh-2");
		assert_eq!(record.refresh_token.as_ref().map(|secret| secret.expose()), Some("valid-r1"));
		assert_eq!(record.user.as_ref().map(|user| user.id), Some(7));
		assert_eq!(record.issued_at, rotated);
	}

	#[test]
	fn debug_redacts_both_secrets() {
		let record = SessionRecord::builder()
			.access_token("expired-1")
			.refresh_token("valid-r1")
			.build()
			.expect("Session record fixture should build successfully.");
		let rendered = format!("{record:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("expired-1"));
		assert!(!rendered.contains("valid-r1"));
	}
}
