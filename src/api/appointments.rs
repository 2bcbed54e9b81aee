//! Appointment booking endpoints.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	transport::HttpTransport,
};

/// Lifecycle states of a booked appointment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
	/// Confirmed and upcoming.
	Scheduled,
	/// The visit took place.
	Completed,
	/// Cancelled by either party.
	Cancelled,
}

/// A booked appointment as returned by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
	/// Server-side identifier.
	pub id: i64,
	/// Practitioner display name.
	pub doctor: String,
	/// Scheduled start instant.
	#[serde(with = "time::serde::rfc3339")]
	pub scheduled_for: OffsetDateTime,
	/// Current lifecycle state.
	pub status: AppointmentStatus,
	/// Free-form patient notes.
	pub notes: Option<String>,
}

/// Payload for booking a new appointment.
#[derive(Clone, Debug, Serialize)]
pub struct AppointmentDraft {
	/// Identifier of the practitioner to book.
	pub doctor_id: i64,
	/// Requested start instant.
	#[serde(with = "time::serde::rfc3339")]
	pub scheduled_for: OffsetDateTime,
	/// Optional free-form notes.
	pub notes: Option<String>,
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists the account's appointments via `GET appointments/`.
	pub async fn list_appointments(&self) -> Result<Vec<Appointment>> {
		self.send_json(ApiRequest::get("appointments/")).await
	}

	/// Books an appointment via `POST appointments/`.
	pub async fn book_appointment(&self, draft: &AppointmentDraft) -> Result<Appointment> {
		self.send_json(ApiRequest::post("appointments/").json(draft)?).await
	}

	/// Cancels an appointment via `DELETE appointments/{id}/`.
	pub async fn cancel_appointment(&self, id: i64) -> Result<()> {
		self.send_expecting_success(ApiRequest::delete(format!("appointments/{id}/"))).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn appointment_decodes_rfc3339_instants() {
		let payload = r#"{
			"id": 41,
			"doctor": "Dr. Okafor",
			"scheduled_for": "2026-09-01T09:30:00Z",
			"status": "scheduled",
			"notes": null
		}"#;
		let appointment: Appointment = serde_json::from_str(payload)
			.expect("Appointment payload should deserialize from JSON.");

		assert_eq!(appointment.id, 41);
		assert_eq!(appointment.status, AppointmentStatus::Scheduled);
		assert_eq!(appointment.scheduled_for.year(), 2026);
	}
}
