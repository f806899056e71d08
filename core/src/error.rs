use thiserror::Error;

/// Error type for ascent profile generation.
#[derive(Error, Debug, Clone, PartialEq, uniffi::Error)]
#[uniffi(flat_error)]
pub enum AscentError {
    #[error("trivial ascent from depth {depth} m")]
    TrivialAscent { depth: f64 },

    #[error("ascent depth is not finite: {depth}")]
    NonFiniteDepth { depth: f64 },
}

/// Error type for loading a dive profile from untyped input.
#[derive(Error, Debug, Clone, PartialEq, uniffi::Error)]
#[uniffi(flat_error)]
pub enum ValidationError {
    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("expected a mapping at {0}")]
    NotAMapping(String),

    #[error("missing key: {0}")]
    MissingKey(String),

    #[error("unknown key: {0}")]
    UnknownKey(String),

    #[error("wrong type for {key}: expected {expected}")]
    WrongType { key: String, expected: String },

    #[error("invalid profile offset: '{0}'")]
    InvalidOffset(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascent_error_display() {
        let err = AscentError::TrivialAscent { depth: 0.0 };
        assert_eq!(err.to_string(), "trivial ascent from depth 0 m");

        let err = AscentError::TrivialAscent { depth: -2.5 };
        assert_eq!(err.to_string(), "trivial ascent from depth -2.5 m");

        let err = AscentError::NonFiniteDepth {
            depth: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "ascent depth is not finite: inf");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::MissingKey("gas_volume".to_string());
        assert_eq!(err.to_string(), "missing key: gas_volume");

        let err = ValidationError::WrongType {
            key: "profile.60.depth".to_string(),
            expected: "number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "wrong type for profile.60.depth: expected number"
        );

        let err = ValidationError::InvalidOffset("1.5".to_string());
        assert_eq!(err.to_string(), "invalid profile offset: '1.5'");
    }
}
