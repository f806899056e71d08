//! Safety-stop ascent planners.
//!
//! Both planners synthesize a point sequence from a starting depth, holding
//! the configured consumption constant for the whole ascent. Times are
//! accumulated in minutes and converted to offsets from the start of the
//! ascent.

use tracing::{debug, warn};

use crate::error::AscentError;
use crate::models::{minutes, DiveProfilePoint, DiverConfiguration};

// SSI Recreational
const SSI_ASCENT_RATE: f64 = 10.0; // m/min
const SSI_STOP_DEPTH: f64 = 6.0;
const SSI_STOP_DURATION: f64 = 3.0; // min

// GUE Minimum Deco
const GUE_DEEP_ASCENT_RATE: f64 = 10.0; // m/min
const GUE_SHALLOW_ASCENT_RATE: f64 = 6.0; // m/min
const GUE_STOP_DURATION: f64 = 0.5; // min
const GUE_STOP_SPACING: f64 = 3.0; // m

/// Available ascent algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum AscentAlgorithm {
    SsiRecreational,
    GueMinimumDeco,
}

impl AscentAlgorithm {
    pub fn label(&self) -> &'static str {
        match self {
            AscentAlgorithm::SsiRecreational => "SSI Recreational",
            AscentAlgorithm::GueMinimumDeco => "GUE Minimum Deco",
        }
    }

    pub fn plan(
        &self,
        depth: f64,
        configuration: &DiverConfiguration,
    ) -> Result<Vec<DiveProfilePoint>, AscentError> {
        match self {
            AscentAlgorithm::SsiRecreational => compute_ssi_ascent(depth, configuration),
            AscentAlgorithm::GueMinimumDeco => compute_gue_ascent(depth, configuration),
        }
    }
}

fn check_depth(depth: f64) -> Result<(), AscentError> {
    if !depth.is_finite() {
        Err(AscentError::NonFiniteDepth { depth })
    } else if depth > 0.0 {
        Ok(())
    } else {
        Err(AscentError::TrivialAscent { depth })
    }
}

/// SSI recreational ascent: 10 m/min to a 3 minute stop at 6 m, then
/// 10 m/min to the surface. Always four points.
///
/// Starting shallower than the stop yields a negative first leg; it is
/// reported as-is.
pub fn compute_ssi_ascent(
    depth: f64,
    configuration: &DiverConfiguration,
) -> Result<Vec<DiveProfilePoint>, AscentError> {
    check_depth(depth)?;
    if depth < SSI_STOP_DEPTH {
        warn!(depth, "SSI ascent starts above the safety stop");
    }

    let consumption = configuration.consumption;
    let mut elapsed = 0.0;
    let mut points = Vec::with_capacity(4);

    points.push(DiveProfilePoint::new(depth, minutes(elapsed), consumption));

    elapsed += (depth - SSI_STOP_DEPTH) / SSI_ASCENT_RATE;
    points.push(DiveProfilePoint::new(SSI_STOP_DEPTH, minutes(elapsed), consumption));

    elapsed += SSI_STOP_DURATION;
    points.push(DiveProfilePoint::new(SSI_STOP_DEPTH, minutes(elapsed), consumption));

    elapsed += SSI_STOP_DEPTH / SSI_ASCENT_RATE;
    points.push(DiveProfilePoint::new(0.0, minutes(elapsed), consumption));

    debug!(
        algorithm = AscentAlgorithm::SsiRecreational.label(),
        depth,
        points = points.len(),
        "computed ascent"
    );
    Ok(points)
}

/// GUE minimum deco ascent: 10 m/min to the first stop, then half-minute
/// stops every 3 m with 6 m/min between them. Starts shallower than 3 m go
/// straight to the surface at 6 m/min.
pub fn compute_gue_ascent(
    depth: f64,
    configuration: &DiverConfiguration,
) -> Result<Vec<DiveProfilePoint>, AscentError> {
    check_depth(depth)?;

    let consumption = configuration.consumption;
    let mut elapsed = 0.0;
    let mut points = vec![DiveProfilePoint::new(depth, minutes(elapsed), consumption)];

    if depth < GUE_STOP_SPACING {
        elapsed += depth / GUE_SHALLOW_ASCENT_RATE;
        points.push(DiveProfilePoint::new(0.0, minutes(elapsed), consumption));
    } else {
        // First stop is ceil(depth / 6) * 3, not a rounding to the next 3 m.
        let mut stop_depth = (depth / 6.0).ceil() * GUE_STOP_SPACING;
        elapsed += (depth - stop_depth) / GUE_DEEP_ASCENT_RATE;
        points.push(DiveProfilePoint::new(stop_depth, minutes(elapsed), consumption));

        while stop_depth > 0.0 {
            elapsed += GUE_STOP_DURATION;
            points.push(DiveProfilePoint::new(stop_depth, minutes(elapsed), consumption));

            stop_depth -= GUE_STOP_SPACING;
            elapsed += GUE_STOP_SPACING / GUE_SHALLOW_ASCENT_RATE;
            points.push(DiveProfilePoint::new(stop_depth, minutes(elapsed), consumption));
        }
    }

    debug!(
        algorithm = AscentAlgorithm::GueMinimumDeco.label(),
        depth,
        points = points.len(),
        "computed ascent"
    );
    Ok(points)
}
