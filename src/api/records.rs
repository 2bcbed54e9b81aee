//! Medical record endpoints: laboratory results and vaccination history.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	transport::HttpTransport,
};

/// A laboratory result entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabResult {
	/// Server-side identifier.
	pub id: i64,
	/// Test name, e.g. `"HbA1c"`.
	pub test_name: String,
	/// Reported value, kept as text because units and formats vary per laboratory.
	pub value: String,
	/// Unit of the reported value, when applicable.
	pub unit: Option<String>,
	/// Instant the laboratory reported the result.
	#[serde(with = "time::serde::rfc3339")]
	pub reported_at: OffsetDateTime,
}

/// A vaccination history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationRecord {
	/// Server-side identifier.
	pub id: i64,
	/// Vaccine name.
	pub vaccine: String,
	/// Dose number within the vaccine's series.
	pub dose_number: u32,
	/// Instant the dose was administered.
	#[serde(with = "time::serde::rfc3339")]
	pub administered_at: OffsetDateTime,
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists the account's laboratory results via `GET labs/results/`.
	pub async fn list_lab_results(&self) -> Result<Vec<LabResult>> {
		self.send_json(ApiRequest::get("labs/results/")).await
	}

	/// Lists the account's vaccination history via `GET vaccinations/`.
	pub async fn list_vaccinations(&self) -> Result<Vec<VaccinationRecord>> {
		self.send_json(ApiRequest::get("vaccinations/")).await
	}
}
