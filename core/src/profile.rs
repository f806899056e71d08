//! The dive profile aggregate.
//!
//! A [`DiveProfile`] owns the time-ordered point sequence together with the
//! diver's gas loadout and the environmental constants used for pressure
//! calculations. Segments and ascents are derived values; nothing returned
//! from here aliases the owned sequence.

use crate::ascent::AscentAlgorithm;
use crate::error::AscentError;
use crate::models::{
    DiveProfilePoint, DiveProfileSegment, DiverConfiguration, DEFAULT_GRAVITY_CONSTANT,
    DEFAULT_WATER_DENSITY,
};

/// Pascal to bar.
const PA_TO_BAR: f64 = 1e-5;

/// Atmospheric pressure at the surface (bar).
const SURFACE_PRESSURE: f64 = 1.0;

/// A dive: gas loadout, environmental constants and the point sequence,
/// kept sorted by timestamp.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DiveProfile {
    pub(crate) gas_volume: f64,
    pub(crate) gas_pressure: f64,
    pub(crate) profile: Vec<DiveProfilePoint>,
    pub(crate) water_density: f64,
    pub(crate) gravity_constant: f64,
}

impl DiveProfile {
    /// Create a sea water profile. Points are sorted by timestamp.
    pub fn new(gas_volume: f64, gas_pressure: f64, profile: Vec<DiveProfilePoint>) -> Self {
        Self::with_environment(
            gas_volume,
            gas_pressure,
            profile,
            DEFAULT_WATER_DENSITY,
            DEFAULT_GRAVITY_CONSTANT,
        )
    }

    pub fn with_environment(
        gas_volume: f64,
        gas_pressure: f64,
        profile: Vec<DiveProfilePoint>,
        water_density: f64,
        gravity_constant: f64,
    ) -> Self {
        Self {
            gas_volume,
            gas_pressure,
            profile,
            water_density,
            gravity_constant,
        }
        .normalized()
    }

    /// Restore timestamp order. Records lifted over FFI bypass the constructors.
    pub(crate) fn normalized(mut self) -> Self {
        self.profile.sort_by_key(|point| point.timestamp);
        self
    }

    pub fn gas_volume(&self) -> f64 {
        self.gas_volume
    }

    pub fn gas_pressure(&self) -> f64 {
        self.gas_pressure
    }

    pub fn profile(&self) -> &[DiveProfilePoint] {
        &self.profile
    }

    pub fn water_density(&self) -> f64 {
        self.water_density
    }

    pub fn gravity_constant(&self) -> f64 {
        self.gravity_constant
    }

    /// Ambient pressure in bar at `depth` meters: hydrostatic plus one
    /// atmosphere. Negative depths are not rejected.
    pub fn ambient_pressure(&self, depth: f64) -> f64 {
        self.water_density * self.gravity_constant * depth * PA_TO_BAR + SURFACE_PRESSURE
    }

    /// One segment per consecutive pair of points. Empty for fewer than two points.
    pub fn segments(&self) -> Vec<DiveProfileSegment> {
        self.profile
            .windows(2)
            .map(|pair| DiveProfileSegment::between(&pair[0], &pair[1]))
            .collect()
    }

    /// Deepest recorded point, 0 for an empty profile.
    pub fn max_depth(&self) -> f64 {
        self.profile
            .iter()
            .map(|point| point.depth)
            .fold(0.0_f64, f64::max)
    }

    /// Mirror this profile's loadout and constants into an ascent configuration.
    pub fn diver_configuration(&self, consumption: f64) -> DiverConfiguration {
        DiverConfiguration {
            gas_volume: self.gas_volume,
            gas_pressure: self.gas_pressure,
            consumption,
            water_density: self.water_density,
            gravity_constant: self.gravity_constant,
        }
    }

    /// Synthesize an ascent from `depth` with this profile's configuration.
    pub fn ascent(
        &self,
        algorithm: AscentAlgorithm,
        depth: f64,
        consumption: f64,
    ) -> Result<Vec<DiveProfilePoint>, AscentError> {
        algorithm.plan(depth, &self.diver_configuration(consumption))
    }
}
