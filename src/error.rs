//! Error taxonomy for the interface solver.
//!
//! Only genuine failures live here. A critical angle that does not exist is
//! `None`, and an evanescent mode is a tagged angle; neither is an error.

use thiserror::Error;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = RtError::SingularSystem {
            angle_deg: 90.0,
            condition: 2.5e16,
        };
        assert_eq!(
            err.to_string(),
            "boundary matrix is singular at 90.0000 deg (condition number 2.500e16)"
        );
        assert_eq!(
            RtError::InvalidAngle(-1.0).to_string(),
            "incidence angle -1 deg is outside the range [0, 90]"
        );
        assert_eq!(
            RtError::UnknownMaterial("ice".to_string()).to_string(),
            "material 'ice' not found in the database"
        );
    }

    #[test]
    fn wraps_into_anyhow() {
        let err: anyhow::Error = RtError::InvalidShearMarker("n/a".to_string()).into();
        assert_eq!(
            err.downcast_ref::<RtError>(),
            Some(&RtError::InvalidShearMarker("n/a".to_string()))
        );
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RtError {
    /// Non-positive or non-finite density or wave speed.
    #[error("invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: String },

    /// Incidence angle outside `[0, 90]` degrees.
    #[error("incidence angle {0} deg is outside the range [0, 90]")]
    InvalidAngle(f64),

    /// The boundary-condition matrix is numerically singular at this angle.
    #[error("boundary matrix is singular at {angle_deg:.4} deg (condition number {condition:.3e})")]
    SingularSystem { angle_deg: f64, condition: f64 },

    /// Sweep range that is reversed, leaves `[0, 90]`, or has a step that is
    /// not positive or too fine.
    #[error("invalid sweep {start}..{end} deg with step {step}")]
    InvalidSweep { start: f64, end: f64, step: f64 },

    /// Material name not present in the database.
    #[error("material '{0}' not found in the database")]
    UnknownMaterial(String),

    /// A string shear speed that is not the "not applicable" marker.
    #[error("shear speed '{0}' is neither a number nor \"NA\"")]
    InvalidShearMarker(String),
}
