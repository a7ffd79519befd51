//! An ordered pair of media and the solver operations on it.
//!
//! The pair is asymmetric: the first material carries the incident P-wave.
//! Every call is independent and reads only the two immutable materials, so
//! angles can be evaluated in any order or in parallel.

use serde::Serialize;

use crate::boundary::BoundarySystem;
use crate::closed_form;
use crate::coefficients::{AngularImpedances, CoefficientSet};
use crate::config::DEFAULT_SINGULAR_THRESHOLD;
use crate::critical::{CriticalAngles, Regime};
use crate::error::RtError;
use crate::material::Material;
use crate::snell::{self, AngleSet};


/// Incident medium and transmission medium, in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interface {
    pub incident: Material,
    pub transmission: Material,
}

impl Interface {
    pub fn new(incident: Material, transmission: Material) -> Self {
        Self {
            incident,
            transmission,
        }
    }

    /// The same pair with the roles of the media swapped.
    pub fn reversed(&self) -> Self {
        Self::new(self.transmission.clone(), self.incident.clone())
    }

    pub fn critical_angles(&self) -> CriticalAngles {
        CriticalAngles::new(&self.incident, &self.transmission)
    }

    pub fn regime(&self, incidence_deg: f64) -> Regime {
        self.critical_angles().regime(incidence_deg)
    }

    /// Real transmitted longitudinal and shear refraction angles in degrees.
    pub fn refraction_angles(&self, incidence_deg: f64) -> (Option<f64>, Option<f64>) {
        snell::refraction_angles(&self.incident, &self.transmission, incidence_deg)
    }

    /// Complex propagation angles of all four modes.
    pub fn angles(&self, incidence_deg: f64) -> AngleSet {
        AngleSet::new(&self.incident, &self.transmission, incidence_deg)
    }

    /// `(R, T)` at normal incidence, pressure convention.
    pub fn vertical_incidence_coefficients(&self) -> (f64, f64) {
        closed_form::vertical_coefficients(&self.incident, &self.transmission)
    }

    /// `(reflected, transmitted)` energy fractions at normal incidence.
    pub fn vertical_incidence_energies(&self) -> (f64, f64) {
        closed_form::vertical_energies(&self.incident, &self.transmission)
    }

    /// Full coefficient set with the default singularity threshold.
    pub fn intensity_coefficients(&self, incidence_deg: f64) -> Result<CoefficientSet, RtError> {
        self.solve(incidence_deg, DEFAULT_SINGULAR_THRESHOLD)
    }

    /// Solves the boundary system at one incidence angle (degrees).
    pub fn solve(&self, incidence_deg: f64, threshold: f64) -> Result<CoefficientSet, RtError> {
        check_incidence(incidence_deg)?;

        let angles = self.angles(incidence_deg);
        let amplitudes = BoundarySystem::new(&self.incident, &self.transmission, &angles)
            .solve(incidence_deg, threshold)?
            .into();
        let impedances = AngularImpedances::new(&self.incident, &self.transmission, &angles);
        let energies = impedances.energies(&amplitudes);

        Ok(CoefficientSet {
            incidence_deg,
            regime: self.regime(incidence_deg),
            angles,
            impedances,
            amplitudes,
            energies,
        })
    }

    /// Transmitted `(longitudinal, shear)` energies gated by regime, with the
    /// default singularity threshold.
    pub fn transmitted_intensity(&self, incidence_deg: f64) -> Result<(f64, f64), RtError> {
        self.transmitted_intensity_with(incidence_deg, DEFAULT_SINGULAR_THRESHOLD)
    }

    /// Transmitted `(longitudinal, shear)` energies gated by regime. A fluid
    /// incident medium uses the closed-form expressions, a solid one the
    /// matrix energies. Exactly at the first critical angle, and beyond the
    /// second, both are zero.
    pub fn transmitted_intensity_with(
        &self,
        incidence_deg: f64,
        threshold: f64,
    ) -> Result<(f64, f64), RtError> {
        check_incidence(incidence_deg)?;
        let regime = self.regime(incidence_deg);

        if self.incident.is_fluid() {
            return Ok(closed_form::fluid_solid_transmission(
                &self.incident,
                &self.transmission,
                incidence_deg,
                regime,
            ));
        }

        match regime {
            Regime::Propagating => {
                let energies = self.solve(incidence_deg, threshold)?.energies;
                Ok((energies.transmitted_p, energies.transmitted_s))
            }
            Regime::ModeConverted => {
                let energies = self.solve(incidence_deg, threshold)?.energies;
                Ok((0.0, energies.transmitted_s))
            }
            Regime::AtCritical | Regime::TotalReflection => Ok((0.0, 0.0)),
        }
    }
}

fn check_incidence(incidence_deg: f64) -> Result<(), RtError> {
    if (0.0..=90.0).contains(&incidence_deg) {
        Ok(())
    } else {
        Err(RtError::InvalidAngle(incidence_deg))
    }
}
