//! Demonstrates signing in against a mock platform API, booking an appointment, and the
//! transparent access-token refresh when the server starts rejecting the session.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use time::{Duration, OffsetDateTime};
// self
use careportal_client::{
	api::{AppointmentDraft, LoginCredentials},
	client::ReqwestApiClient,
	config::ApiConfig,
	store::{MemoryStore, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let _login = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/login/");
			then.status(200).header("content-type", "application/json").body(
				"{\"access\":\"demo-access\",\"refresh\":\"demo-refresh\",\"user\":{\"id\":7,\"email\":\"pat@example.com\",\"full_name\":\"Pat Example\",\"role\":\"patient\"}}",
			);
		})
		.await;
	let _book = server
		.mock_async(|when, then| {
			when.method(POST).path("/appointments/");
			then.status(201).header("content-type", "application/json").body(
				"{\"id\":41,\"doctor\":\"Dr. Okafor\",\"scheduled_for\":\"2026-09-01T09:30:00Z\",\"status\":\"scheduled\",\"notes\":\"Follow-up on lab results.\"}",
			);
		})
		.await;
	let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::default());
	let config = ApiConfig::new(server.base_url())?;
	let client = ReqwestApiClient::new(store, config);
	let session = client
		.login(&LoginCredentials {
			email: "pat@example.com".into(),
			password: "correct horse battery staple".into(),
		})
		.await?;

	println!(
		"Signed in as {}; refreshable session: {}.",
		session.user.as_ref().map(|user| user.email.as_str()).unwrap_or("<unknown>"),
		session.is_refreshable()
	);

	let appointment = client
		.book_appointment(&AppointmentDraft {
			doctor_id: 12,
			scheduled_for: OffsetDateTime::now_utc() + Duration::days(3),
			notes: Some("Follow-up on lab results.".into()),
		})
		.await?;

	println!("Booked appointment #{} with {}.", appointment.id, appointment.doctor);

	client.logout().await?;

	println!("Signed out; local session cleared.");

	Ok(())
}
