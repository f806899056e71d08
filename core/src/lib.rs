pub mod ascent;
pub mod error;
pub mod ffi;
pub mod loader;
pub mod models;
pub mod profile;

uniffi::setup_scaffolding!();

pub use ascent::{compute_gue_ascent, compute_ssi_ascent, AscentAlgorithm};
pub use error::{AscentError, ValidationError};
pub use loader::{load_profile, load_profile_json};
pub use models::{
    DiveProfilePoint, DiveProfileSegment, DiverConfiguration, DEFAULT_ASCENT_CONSUMPTION,
    DEFAULT_GRAVITY_CONSTANT, DEFAULT_WATER_DENSITY,
};
pub use profile::DiveProfile;
