//! Functions exported to foreign-language hosts.
//!
//! Records arrive by value, so profiles are re-sorted before use.

use crate::ascent::AscentAlgorithm;
use crate::error::{AscentError, ValidationError};
use crate::loader::load_profile_json;
use crate::models::{DiveProfilePoint, DiveProfileSegment, DiverConfiguration};
use crate::profile::DiveProfile;

#[uniffi::export]
pub fn load_dive_profile(json: String) -> Result<DiveProfile, ValidationError> {
    load_profile_json(&json)
}

#[uniffi::export]
pub fn ambient_pressure(profile: DiveProfile, depth: f64) -> f64 {
    profile.ambient_pressure(depth)
}

#[uniffi::export]
pub fn profile_segments(profile: DiveProfile) -> Vec<DiveProfileSegment> {
    profile.normalized().segments()
}

#[uniffi::export]
pub fn plan_ascent(
    algorithm: AscentAlgorithm,
    depth: f64,
    configuration: DiverConfiguration,
) -> Result<Vec<DiveProfilePoint>, AscentError> {
    algorithm.plan(depth, &configuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_profile_segments_resorts_points() {
        let profile = DiveProfile::new(
            12.0,
            232.0,
            vec![
                DiveProfilePoint::new(0.0, TimeDelta::seconds(0), 15.0),
                DiveProfilePoint::new(10.0, TimeDelta::seconds(60), 15.0),
            ],
        );
        let mut reversed = profile.clone();
        reversed.profile.reverse();

        let segments = profile_segments(reversed);
        assert_eq!(segments, profile.segments());
        assert_eq!(segments[0].duration, TimeDelta::seconds(60));
    }

    #[test]
    fn test_exported_round_trip() {
        let profile = load_dive_profile(
            r#"{"gas_volume": 12, "gas_pressure": 232,
                "profile": {"0": {"depth": 0, "consumption": 15},
                            "600": {"depth": 30, "consumption": 20}}}"#
                .to_string(),
        )
        .unwrap();

        assert!((ambient_pressure(profile.clone(), 30.0) - 4.011426082).abs() < 1e-6);

        let config = profile.diver_configuration(15.0);
        let ascent =
            plan_ascent(AscentAlgorithm::GueMinimumDeco, profile.max_depth(), config).unwrap();
        assert_eq!(ascent.len(), 12);
        assert_eq!(ascent.last().unwrap().depth, 0.0);
    }
}
