//! Value types shared by the profile aggregate, the loader and the ascent planners.

use chrono::TimeDelta;
use serde::Deserialize;

/// Sea water density (kg/m³).
pub const DEFAULT_WATER_DENSITY: f64 = 1023.6;

/// Standard gravity (m/s²).
pub const DEFAULT_GRAVITY_CONSTANT: f64 = 9.80665;

/// Gas consumption assumed during a synthesized ascent (l/min).
pub const DEFAULT_ASCENT_CONSUMPTION: f64 = 15.0;

// Offsets cross the FFI boundary as signed microseconds.
uniffi::custom_type!(TimeDelta, i64, {
    remote,
    try_lift: |micros| Ok(TimeDelta::microseconds(micros)),
    lower: |delta| delta.num_microseconds().unwrap_or(if delta < TimeDelta::zero() {
        i64::MIN
    } else {
        i64::MAX
    }),
});

/// Convert fractional minutes to an offset, rounded to the microsecond.
pub(crate) fn minutes(value: f64) -> TimeDelta {
    TimeDelta::microseconds((value * 60_000_000.0).round() as i64)
}

/// One instant of a dive.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DiveProfilePoint {
    /// Depth in meters
    pub depth: f64,
    /// Offset from dive start
    pub timestamp: TimeDelta,
    /// Gas consumption in liters per minute
    pub consumption: f64,
}

impl DiveProfilePoint {
    pub fn new(depth: f64, timestamp: TimeDelta, consumption: f64) -> Self {
        Self {
            depth,
            timestamp,
            consumption,
        }
    }
}

/// Interval between two consecutive profile points.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DiveProfileSegment {
    pub avg_depth: f64,
    pub duration: TimeDelta,
    pub avg_consumption: f64,
}

impl DiveProfileSegment {
    /// Summarize the interval `start..end`. The duration saturates at the
    /// bounds of `TimeDelta`.
    pub fn between(start: &DiveProfilePoint, end: &DiveProfilePoint) -> Self {
        Self {
            avg_depth: (start.depth + end.depth) / 2.0,
            duration: end
                .timestamp
                .checked_sub(&start.timestamp)
                .unwrap_or(if end.timestamp < start.timestamp {
                    TimeDelta::MIN
                } else {
                    TimeDelta::MAX
                }),
            avg_consumption: (start.consumption + end.consumption) / 2.0,
        }
    }
}

fn default_consumption() -> f64 {
    DEFAULT_ASCENT_CONSUMPTION
}

fn default_water_density() -> f64 {
    DEFAULT_WATER_DENSITY
}

fn default_gravity_constant() -> f64 {
    DEFAULT_GRAVITY_CONSTANT
}

/// Diver gear and environment used to synthesize an ascent.
#[derive(Debug, Clone, PartialEq, Deserialize, uniffi::Record)]
#[serde(deny_unknown_fields)]
pub struct DiverConfiguration {
    /// Cylinder volume in liters
    pub gas_volume: f64,
    /// Cylinder pressure in bar
    pub gas_pressure: f64,
    /// Consumption during the ascent in liters per minute
    #[serde(default = "default_consumption")]
    pub consumption: f64,
    /// Water density in kg/m³
    #[serde(default = "default_water_density")]
    pub water_density: f64,
    /// Gravity in m/s²
    #[serde(default = "default_gravity_constant")]
    pub gravity_constant: f64,
}

impl DiverConfiguration {
    pub fn new(gas_volume: f64, gas_pressure: f64) -> Self {
        Self {
            gas_volume,
            gas_pressure,
            consumption: DEFAULT_ASCENT_CONSUMPTION,
            water_density: DEFAULT_WATER_DENSITY,
            gravity_constant: DEFAULT_GRAVITY_CONSTANT,
        }
    }

    pub fn with_consumption(mut self, consumption: f64) -> Self {
        self.consumption = consumption;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(depth: f64, seconds: i64, consumption: f64) -> DiveProfilePoint {
        DiveProfilePoint::new(depth, TimeDelta::seconds(seconds), consumption)
    }

    #[test]
    fn test_segment_between() {
        let segment = DiveProfileSegment::between(&point(0.0, 0, 12.0), &point(10.0, 60, 18.0));

        assert!((segment.avg_depth - 5.0).abs() < f64::EPSILON);
        assert!((segment.avg_consumption - 15.0).abs() < f64::EPSILON);
        assert_eq!(segment.duration, TimeDelta::seconds(60));
    }

    #[test]
    fn test_segment_duration_saturates() {
        let start = DiveProfilePoint::new(0.0, TimeDelta::MIN, 15.0);
        let end = DiveProfilePoint::new(0.0, TimeDelta::MAX, 15.0);

        assert_eq!(DiveProfileSegment::between(&start, &end).duration, TimeDelta::MAX);
        assert_eq!(DiveProfileSegment::between(&end, &start).duration, TimeDelta::MIN);
    }

    #[test]
    fn test_minutes_rounds_to_microseconds() {
        assert_eq!(minutes(2.4), TimeDelta::seconds(144));
        assert_eq!(minutes(0.5), TimeDelta::seconds(30));
        assert_eq!(minutes(-0.3), TimeDelta::seconds(-18));
    }

    #[test]
    fn test_configuration_defaults() {
        let config = DiverConfiguration::new(12.0, 232.0);

        assert_eq!(config.consumption, 15.0);
        assert_eq!(config.water_density, 1023.6);
        assert_eq!(config.gravity_constant, 9.80665);

        let config = config.with_consumption(20.0);
        assert_eq!(config.consumption, 20.0);
        assert_eq!(config.gas_volume, 12.0);
    }

    #[test]
    fn test_configuration_deserialize_defaults() {
        let config: DiverConfiguration =
            serde_json::from_str(r#"{"gas_volume": 11.1, "gas_pressure": 207}"#).unwrap();

        assert_eq!(config, DiverConfiguration::new(11.1, 207.0));

        let config: DiverConfiguration = serde_json::from_str(
            r#"{"gas_volume": 12, "gas_pressure": 232, "consumption": 22.5, "water_density": 1000}"#,
        )
        .unwrap();

        assert_eq!(config.consumption, 22.5);
        assert_eq!(config.water_density, 1000.0);
        assert_eq!(config.gravity_constant, DEFAULT_GRAVITY_CONSTANT);
    }

    #[test]
    fn test_configuration_rejects_unknown_fields() {
        let result = serde_json::from_str::<DiverConfiguration>(
            r#"{"gas_volume": 12, "gas_pressure": 232, "o2": 0.32}"#,
        );
        assert!(result.is_err());
    }
}
