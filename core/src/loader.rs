//! Strict loading of dive profiles from loosely-typed input.
//!
//! The expected shape is:
//!
//! ```json
//! {
//!     "gas_volume": 12,
//!     "gas_pressure": 232,
//!     "water_density": 1023.6,
//!     "gravity_constant": 9.80665,
//!     "profile": {
//!         "0": {"depth": 0, "consumption": 15},
//!         "60": {"depth": 10, "consumption": 15}
//!     }
//! }
//! ```
//!
//! `water_density` and `gravity_constant` are optional. Profile keys are whole
//! seconds from the start of the dive. Any other key is rejected, and every
//! number is normalized to `f64` before the profile is built.
//!
//! # Example
//!
//! ```
//! use dive_profile_compute::loader::load_profile_json;
//!
//! let profile = load_profile_json(
//!     r#"{"gas_volume": 12, "gas_pressure": 232,
//!         "profile": {"0": {"depth": 0, "consumption": 15},
//!                     "60": {"depth": 10, "consumption": 15}}}"#,
//! )
//! .expect("profile should load");
//! assert_eq!(profile.profile().len(), 2);
//! ```

use std::collections::BTreeMap;

use chrono::TimeDelta;
use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::pair,
    IResult, Parser,
};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::models::{DiveProfilePoint, DEFAULT_GRAVITY_CONSTANT, DEFAULT_WATER_DENSITY};
use crate::profile::DiveProfile;

const PROFILE_KEYS: [&str; 5] = [
    "gas_volume",
    "gas_pressure",
    "water_density",
    "gravity_constant",
    "profile",
];

const POINT_KEYS: [&str; 2] = ["depth", "consumption"];

/// Parse JSON text and load it as a dive profile.
pub fn load_profile_json(text: &str) -> Result<DiveProfile, ValidationError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ValidationError::Json(e.to_string()))?;
    load_profile(&value)
}

/// Validate an untyped value and build a dive profile from it.
pub fn load_profile(value: &Value) -> Result<DiveProfile, ValidationError> {
    let root = value
        .as_object()
        .ok_or_else(|| ValidationError::NotAMapping("profile document".to_string()))?;
    reject_unknown_keys(root, &PROFILE_KEYS, "")?;

    let gas_volume = required_number(root, "gas_volume", "gas_volume")?;
    let gas_pressure = required_number(root, "gas_pressure", "gas_pressure")?;
    let water_density = optional_number(root, "water_density", DEFAULT_WATER_DENSITY)?;
    let gravity_constant = optional_number(root, "gravity_constant", DEFAULT_GRAVITY_CONSTANT)?;

    let entries = root
        .get("profile")
        .ok_or_else(|| ValidationError::MissingKey("profile".to_string()))?
        .as_object()
        .ok_or_else(|| ValidationError::WrongType {
            key: "profile".to_string(),
            expected: "mapping".to_string(),
        })?;

    let mut points: BTreeMap<i64, DiveProfilePoint> = BTreeMap::new();
    for (key, record) in entries {
        let seconds = parse_offset(key)?;
        let point = load_point(key, record, seconds)?;
        if points.insert(seconds, point).is_some() {
            warn!(offset = seconds, key = %key, "duplicate profile offset, keeping last entry");
        }
    }

    debug!(points = points.len(), "loaded dive profile");

    Ok(DiveProfile::with_environment(
        gas_volume,
        gas_pressure,
        points.into_values().collect(),
        water_density,
        gravity_constant,
    ))
}

fn load_point(
    key: &str,
    record: &Value,
    seconds: i64,
) -> Result<DiveProfilePoint, ValidationError> {
    let path = format!("profile.{key}");
    let record = record
        .as_object()
        .ok_or_else(|| ValidationError::NotAMapping(path.clone()))?;
    reject_unknown_keys(record, &POINT_KEYS, &path)?;

    let depth = required_number(record, "depth", &format!("{path}.depth"))?;
    let consumption = required_number(record, "consumption", &format!("{path}.consumption"))?;
    // Offsets must fit in i64 microseconds, the FFI representation.
    let timestamp = TimeDelta::try_seconds(seconds)
        .filter(|delta| delta.num_microseconds().is_some())
        .ok_or_else(|| ValidationError::InvalidOffset(key.to_string()))?;

    Ok(DiveProfilePoint::new(depth, timestamp, consumption))
}

fn reject_unknown_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    path: &str,
) -> Result<(), ValidationError> {
    match map.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) if path.is_empty() => Err(ValidationError::UnknownKey(key.clone())),
        Some(key) => Err(ValidationError::UnknownKey(format!("{path}.{key}"))),
        None => Ok(()),
    }
}

fn required_number(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<f64, ValidationError> {
    let value = map
        .get(key)
        .ok_or_else(|| ValidationError::MissingKey(path.to_string()))?;
    as_number(value, path)
}

fn optional_number(
    map: &Map<String, Value>,
    key: &str,
    default: f64,
) -> Result<f64, ValidationError> {
    match map.get(key) {
        Some(value) => as_number(value, key),
        None => Ok(default),
    }
}

fn as_number(value: &Value, path: &str) -> Result<f64, ValidationError> {
    value.as_f64().ok_or_else(|| ValidationError::WrongType {
        key: path.to_string(),
        expected: "number".to_string(),
    })
}

fn offset(input: &str) -> IResult<&str, i64> {
    all_consuming(map_res(
        recognize(pair(opt(char('-')), digit1)),
        str::parse::<i64>,
    ))
    .parse(input)
}

/// Parse a profile key as a whole number of seconds.
fn parse_offset(key: &str) -> Result<i64, ValidationError> {
    offset(key)
        .map(|(_, seconds)| seconds)
        .map_err(|_| ValidationError::InvalidOffset(key.to_string()))
}
