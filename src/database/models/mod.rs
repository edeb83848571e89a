pub mod preference;
pub mod profile;

pub use preference::Preference;
pub use profile::{GeoPoint, Gender, Profile, ProfileRow};
