// std
use std::{fs, path::PathBuf};
// crates.io
use time::OffsetDateTime;
// self
use careportal_client::{
	session::{SessionRecord, TokenSecret, UserProfile, UserRole},
	store::{FileStore, ReplaceOutcome, SessionStore},
};

fn scratch_path(tag: &str) -> PathBuf {
	std::env::temp_dir().join(format!("careportal-client-{tag}-{}.json", std::process::id()))
}

fn seeded_record() -> SessionRecord {
	SessionRecord::builder()
		.access_token("expired-1")
		.refresh_token("valid-r1")
		.user(UserProfile {
			id: 7,
			email: "pat@example.com".into(),
			full_name: Some("Pat Example".into()),
			role: UserRole::Patient,
		})
		.build()
		.expect("Session record fixture should build successfully.")
}

#[tokio::test]
async fn file_store_persists_the_expected_keys() {
	let path = scratch_path("keys");
	let _ = fs::remove_file(&path);
	let store = FileStore::open(&path).expect("File store should open.");

	store.save(seeded_record()).await.expect("Save should succeed.");

	let raw = fs::read_to_string(&path).expect("Snapshot file should exist after save.");
	let document: serde_json::Value =
		serde_json::from_str(&raw).expect("Snapshot should be valid JSON.");
	let object = document.as_object().expect("Snapshot should be a JSON object.");

	assert_eq!(object.get("access_token"), Some(&serde_json::json!("expired-1")));
	assert_eq!(object.get("refresh_token"), Some(&serde_json::json!("valid-r1")));
	assert!(object.get("user").is_some_and(|user| user.is_object()));

	let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn file_store_reloads_sessions_across_reopens() {
	let path = scratch_path("reopen");
	let _ = fs::remove_file(&path);

	{
		let store = FileStore::open(&path).expect("File store should open.");

		store.save(seeded_record()).await.expect("Save should succeed.");
	}

	let reopened = FileStore::open(&path).expect("File store should reopen.");
	let fetched = reopened
		.fetch()
		.await
		.expect("Fetch should succeed.")
		.expect("Persisted session should survive a reopen.");

	assert_eq!(fetched.access_token.expose(), "expired-1");
	assert_eq!(fetched.user.as_ref().map(|user| user.id), Some(7));

	let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn file_store_clear_empties_the_snapshot() {
	let path = scratch_path("clear");
	let _ = fs::remove_file(&path);
	let store = FileStore::open(&path).expect("File store should open.");

	store.save(seeded_record()).await.expect("Save should succeed.");
	store.clear().await.expect("Clear should succeed.");

	let raw = fs::read_to_string(&path).expect("Snapshot file should exist after clear.");
	let document: serde_json::Value =
		serde_json::from_str(&raw).expect("Snapshot should be valid JSON.");

	assert!(document.is_null(), "A cleared slot must serialize as null.");

	let reopened = FileStore::open(&path).expect("File store should reopen.");

	assert!(reopened.fetch().await.expect("Fetch should succeed.").is_none());

	let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn file_store_rotation_is_atomic_per_record() {
	let path = scratch_path("rotate");
	let _ = fs::remove_file(&path);
	let store = FileStore::open(&path).expect("File store should open.");

	store.save(seeded_record()).await.expect("Save should succeed.");

	let outcome = store
		.replace_access_token(TokenSecret::new("fresh-2"), OffsetDateTime::now_utc())
		.await
		.expect("Replace should succeed.");

	assert_eq!(outcome, ReplaceOutcome::Replaced);

	let reopened = FileStore::open(&path).expect("File store should reopen.");
	let fetched = reopened
		.fetch()
		.await
		.expect("Fetch should succeed.")
		.expect("Rotated session should survive a reopen.");

	assert_eq!(fetched.access_token.expose(), "fresh-2");
	assert_eq!(fetched.refresh_token.as_ref().map(|secret| secret.expose()), Some("valid-r1"));

	let _ = fs::remove_file(&path);
}
