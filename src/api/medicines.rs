//! Medicine reminder endpoints.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	transport::HttpTransport,
};

/// A medicine reminder as returned by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineReminder {
	/// Server-side identifier.
	pub id: i64,
	/// Medicine name.
	pub name: String,
	/// Dose description, e.g. `"500 mg"`.
	pub dosage: String,
	/// Optional intake instructions.
	pub instructions: Option<String>,
	/// Next scheduled dose, when the server has one planned.
	#[serde(with = "time::serde::rfc3339::option")]
	pub next_dose_at: Option<OffsetDateTime>,
}

/// Payload for creating a reminder.
#[derive(Clone, Debug, Serialize)]
pub struct MedicineReminderDraft {
	/// Medicine name.
	pub name: String,
	/// Dose description.
	pub dosage: String,
	/// Optional intake instructions.
	pub instructions: Option<String>,
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists the account's reminders via `GET medicines/reminders/`.
	pub async fn list_medicine_reminders(&self) -> Result<Vec<MedicineReminder>> {
		self.send_json(ApiRequest::get("medicines/reminders/")).await
	}

	/// Creates a reminder via `POST medicines/reminders/`.
	pub async fn create_medicine_reminder(
		&self,
		draft: &MedicineReminderDraft,
	) -> Result<MedicineReminder> {
		self.send_json(ApiRequest::post("medicines/reminders/").json(draft)?).await
	}

	/// Deletes a reminder via `DELETE medicines/reminders/{id}/`.
	pub async fn delete_medicine_reminder(&self, id: i64) -> Result<()> {
		self.send_expecting_success(ApiRequest::delete(format!("medicines/reminders/{id}/")))
			.await
	}
}
