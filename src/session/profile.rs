//! Cached profile of the signed-in account.

// self
use crate::_prelude::*;

/// Role attached to a platform account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
	/// Patient-facing account.
	Patient,
	/// Practitioner account with access to the doctor dashboard.
	Doctor,
	/// Administrative account.
	Admin,
}

/// Profile record cached alongside the session tokens.
///
/// The profile is a convenience snapshot taken at login; the server remains authoritative and
/// [`fetch_profile`](crate::client::ApiClient::fetch_profile) re-reads it on demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	/// Server-side account identifier.
	pub id: i64,
	/// Account email, also the login identifier.
	pub email: String,
	/// Display name, when the account has completed its profile.
	pub full_name: Option<String>,
	/// Account role.
	pub role: UserRole,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn role_uses_lowercase_wire_names() {
		let payload =
			serde_json::to_string(&UserRole::Doctor).expect("Role should serialize to JSON.");

		assert_eq!(payload, "\"doctor\"");
	}

	#[test]
	fn profile_round_trips() {
		let profile = UserProfile {
			id: 7,
			email: "pat@example.com".into(),
			full_name: Some("Pat Example".into()),
			role: UserRole::Patient,
		};
		let payload =
			serde_json::to_string(&profile).expect("Profile should serialize to JSON.");
		let round_trip: UserProfile = serde_json::from_str(&payload)
			.expect("Serialized profile should deserialize from JSON.");

		assert_eq!(round_trip, profile);
	}
}
