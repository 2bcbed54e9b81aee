#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use careportal_client::{client::ApiRequest, store::SessionStore};
use common::{build_test_client, seed_session};

#[tokio::test]
async fn bearer_header_matches_the_stored_token() {
	let server = MockServer::start_async().await;
	let (client, store, _observer) = build_test_client(&server.base_url());

	seed_session(&store, "stored-access", Some("stored-refresh")).await;

	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/appointments/")
				.header("authorization", "Bearer stored-access");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let response = client
		.send(ApiRequest::get("appointments/"))
		.await
		.expect("Authenticated dispatch should succeed.");

	mock.assert_async().await;

	assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn missing_token_dispatches_unauthenticated() {
	let server = MockServer::start_async().await;
	let (client, _store, observer) = build_test_client(&server.base_url());
	let authenticated = server
		.mock_async(|when, then| {
			when.method(GET).path("/labs/results/").header_exists("authorization");
			then.status(500);
		})
		.await;
	let anonymous = server
		.mock_async(|when, then| {
			when.method(GET).path("/labs/results/");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let response = client
		.send(ApiRequest::get("labs/results/"))
		.await
		.expect("Unauthenticated dispatch should not fail at the client layer.");

	authenticated.assert_calls_async(0).await;
	anonymous.assert_async().await;

	assert_eq!(response.status().as_u16(), 200);
	assert_eq!(observer.invalidations(), 0);
}

#[tokio::test]
async fn non_authorization_failures_pass_through_verbatim() {
	let server = MockServer::start_async().await;
	let (client, store, observer) = build_test_client(&server.base_url());

	seed_session(&store, "stored-access", Some("stored-refresh")).await;

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token/refresh/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access\":\"never-used\"}");
		})
		.await;
	let outage = server
		.mock_async(|when, then| {
			when.method(GET).path("/vaccinations/");
			then.status(503)
				.header("content-type", "application/json")
				.body("{\"detail\":\"maintenance window\"}");
		})
		.await;
	let response = client
		.send(ApiRequest::get("vaccinations/"))
		.await
		.expect("A 503 must pass through without client-layer interpretation.");

	outage.assert_async().await;
	refresh.assert_calls_async(0).await;

	assert_eq!(response.status().as_u16(), 503);
	assert_eq!(
		String::from_utf8_lossy(response.body()),
		"{\"detail\":\"maintenance window\"}"
	);
	assert_eq!(observer.invalidations(), 0);

	let stored = store
		.fetch()
		.await
		.expect("Store fetch should succeed.")
		.expect("Session must survive a non-authorization failure.");

	assert_eq!(stored.access_token.expose(), "stored-access");
}

#[tokio::test]
async fn typed_helpers_surface_non_success_statuses() {
	let server = MockServer::start_async().await;
	let (client, store, _observer) = build_test_client(&server.base_url());

	seed_session(&store, "stored-access", Some("stored-refresh")).await;

	let _not_found = server
		.mock_async(|when, then| {
			when.method(GET).path("/appointments/");
			then.status(404)
				.header("content-type", "application/json")
				.body("{\"detail\":\"not found\"}");
		})
		.await;
	let err = client
		.list_appointments()
		.await
		.expect_err("Typed helper should reject a 404.");

	match err {
		careportal_client::error::Error::UnexpectedStatus { status, body } => {
			assert_eq!(status, 404);
			assert!(body.contains("not found"));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}
