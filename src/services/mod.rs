pub mod preference_service;
pub mod profile_service;

pub use preference_service::{PreferenceError, PreferenceService};
pub use profile_service::{ProfileError, ProfileService, ProfileUpdate};
