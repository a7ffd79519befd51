//! Homogeneous isotropic media.
//!
//! A [`Material`] carries a density and two wave speeds. The shear speed is
//! complex so that liquids, which cannot carry shear waves, can be described
//! with the small placeholder [`FLUID_SHEAR_SPEED`] and still flow through the
//! same complex arithmetic as solids.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::config::{FLUID_SHEAR_SPEED, SHEAR_NOT_APPLICABLE};
use crate::error::RtError;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn impedances() {
        let aluminium = Material::new("aluminium", 2700.0, 6420.0, Some(3040.0)).unwrap();
        assert_abs_diff_eq!(aluminium.p_wave_impedance(), 17_334_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(aluminium.s_wave_impedance().re, 8_208_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(aluminium.s_wave_impedance().im, 0.0);
        assert!(!aluminium.is_fluid());
    }

    #[test]
    fn fluid_gets_placeholder_shear() {
        let water = Material::new("water", 1000.0, 1480.0, None).unwrap();
        assert_eq!(water.vs, FLUID_SHEAR_SPEED);
        assert!(water.is_fluid());
        let zs = water.s_wave_impedance();
        assert_abs_diff_eq!(zs.re, 1.3, epsilon = 1e-12);
        assert_abs_diff_eq!(zs.im, 1.3, epsilon = 1e-12);
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(matches!(
            Material::new("bad", 0.0, 1480.0, None),
            Err(RtError::InvalidMaterial { .. })
        ));
        assert!(matches!(
            Material::new("bad", 1000.0, -1.0, None),
            Err(RtError::InvalidMaterial { .. })
        ));
        assert!(matches!(
            Material::new("bad", 1000.0, 1480.0, Some(0.0)),
            Err(RtError::InvalidMaterial { .. })
        ));
        assert!(matches!(
            Material::new("bad", f64::NAN, 1480.0, None),
            Err(RtError::InvalidMaterial { .. })
        ));
    }

    #[test]
    fn shear_entry_parsing() {
        let json = r#"[3040.0, "NA", "na", "n/a"]"#;
        let entries: Vec<ShearEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].resolve().unwrap(), Some(3040.0));
        assert_eq!(entries[1].resolve().unwrap(), None);
        assert_eq!(entries[2].resolve().unwrap(), None);
        assert!(matches!(
            entries[3].resolve(),
            Err(RtError::InvalidShearMarker(_))
        ));
    }

    #[test]
    fn damped_shear_is_kept() {
        let plexi = Material::with_complex_shear(
            "plexiglass",
            1185.0,
            2730.0,
            Complex64::new(1430.0, 0.0013),
        )
        .unwrap();
        assert_eq!(plexi.vs.im, 0.0013);
        assert!(!plexi.is_fluid());
    }
}

/// Shear speed as written in a material table: a number, or a marker meaning
/// the medium carries no shear waves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShearEntry {
    Speed(f64),
    Marker(String),
}

impl ShearEntry {
    /// `Some(speed)` for solids, `None` for the "not applicable" marker.
    pub fn resolve(&self) -> Result<Option<f64>, RtError> {
        match self {
            ShearEntry::Speed(speed) => Ok(Some(*speed)),
            ShearEntry::Marker(marker) if marker.eq_ignore_ascii_case(SHEAR_NOT_APPLICABLE) => {
                Ok(None)
            }
            ShearEntry::Marker(marker) => Err(RtError::InvalidShearMarker(marker.clone())),
        }
    }
}

/// A homogeneous isotropic medium. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub name: String,
    pub density: f64, // kg/m^3
    pub vp: f64,      // m/s
    pub vs: Complex64, // m/s, placeholder for fluids
}

impl Material {
    /// Creates a material. A `vs` of `None` marks a fluid and substitutes
    /// [`FLUID_SHEAR_SPEED`].
    pub fn new(name: &str, density: f64, vp: f64, vs: Option<f64>) -> Result<Self, RtError> {
        let vs = match vs {
            Some(speed) => {
                check_positive(name, "shear speed", speed)?;
                Complex64::new(speed, 0.0)
            }
            None => FLUID_SHEAR_SPEED,
        };
        Self::with_complex_shear(name, density, vp, vs)
    }

    /// Creates a material with an explicitly complex shear speed, e.g. a solid
    /// with a small damping term.
    pub fn with_complex_shear(
        name: &str,
        density: f64,
        vp: f64,
        vs: Complex64,
    ) -> Result<Self, RtError> {
        check_positive(name, "density", density)?;
        check_positive(name, "longitudinal speed", vp)?;
        check_positive(name, "shear speed", vs.re)?;
        if !vs.im.is_finite() {
            return Err(RtError::InvalidMaterial {
                name: name.to_string(),
                reason: format!("shear speed {} is not finite", vs),
            });
        }
        Ok(Self {
            name: name.to_string(),
            density,
            vp,
            vs,
        })
    }

    /// Builds a material from a table entry.
    pub fn from_entry(name: &str, density: f64, vp: f64, vs: &ShearEntry) -> Result<Self, RtError> {
        Self::new(name, density, vp, vs.resolve()?)
    }

    /// Longitudinal acoustic impedance `density * vp`.
    pub fn p_wave_impedance(&self) -> f64 {
        self.density * self.vp
    }

    /// Shear acoustic impedance `density * vs`. Complex for fluids.
    pub fn s_wave_impedance(&self) -> Complex64 {
        self.vs * self.density
    }

    /// True when the shear speed is the fluid placeholder.
    pub fn is_fluid(&self) -> bool {
        self.vs == FLUID_SHEAR_SPEED
    }
}

fn check_positive(name: &str, quantity: &str, value: f64) -> Result<(), RtError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RtError::InvalidMaterial {
            name: name.to_string(),
            reason: format!("{} must be positive and finite, got {}", quantity, value),
        })
    }
}
