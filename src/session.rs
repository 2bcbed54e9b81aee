//! Session-domain models: redacted secrets, the session record, and the cached user profile.

pub mod profile;
pub mod record;
pub mod secret;

pub use profile::*;
pub use record::*;
pub use secret::*;
