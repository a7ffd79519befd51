//! Amplitude and energy coefficients for one incidence angle.
//!
//! Amplitudes come straight out of the boundary system. Energies weight the
//! squared amplitude of each mode by its real angular admittance
//! `Re(1 / conj(Z))` with `Z = rho * c / cos(theta)`, relative to the incident
//! P-wave. An evanescent mode has a purely reactive `Z`, so its admittance
//! vanishes and it carries no energy without any special casing.

use nalgebra::Vector4;
use num_complex::Complex64;
use serde::Serialize;
use std::fmt;

use crate::critical::Regime;
use crate::energy::Energies;
use crate::material::Material;
use crate::snell::AngleSet;


/// `rho * c / cos(theta)` for one mode.
pub fn angular_impedance(speed: Complex64, density: f64, angle: Complex64) -> Complex64 {
    speed * density / angle.cos()
}

/// Real part of the admittance, `Re(1 / conj(z))`.
pub fn admittance(z: Complex64) -> f64 {
    (1.0 / z.conj()).re
}

/// Complex amplitude ratios of the four outgoing modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Amplitudes {
    pub r_p: Complex64,
    pub r_s: Complex64,
    pub t_p: Complex64,
    pub t_s: Complex64,
}

impl From<Vector4<Complex64>> for Amplitudes {
    fn from(x: Vector4<Complex64>) -> Self {
        Self {
            r_p: x[0],
            r_s: x[1],
            t_p: x[2],
            t_s: x[3],
        }
    }
}

/// Angular impedances of the four modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngularImpedances {
    pub p1: Complex64,
    pub s1: Complex64,
    pub p2: Complex64,
    pub s2: Complex64,
}

impl AngularImpedances {
    pub fn new(incident: &Material, transmission: &Material, angles: &AngleSet) -> Self {
        let real = |v: f64| Complex64::new(v, 0.0);
        Self {
            p1: angular_impedance(real(incident.vp), incident.density, angles.p1),
            s1: angular_impedance(incident.vs, incident.density, angles.s1),
            p2: angular_impedance(real(transmission.vp), transmission.density, angles.p2),
            s2: angular_impedance(transmission.vs, transmission.density, angles.s2),
        }
    }

    /// Energy fractions carried by each mode, normalized to the incident flux.
    pub fn energies(&self, amplitudes: &Amplitudes) -> Energies {
        let norm = admittance(self.p1);
        Energies {
            reflected_p: amplitudes.r_p.norm_sqr(),
            reflected_s: amplitudes.r_s.norm_sqr() * admittance(self.s1) / norm,
            transmitted_p: amplitudes.t_p.norm_sqr() * admittance(self.p2) / norm,
            transmitted_s: amplitudes.t_s.norm_sqr() * admittance(self.s2) / norm,
        }
    }
}

/// Everything computed for one incidence angle. Built fresh per angle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoefficientSet {
    pub incidence_deg: f64,
    pub regime: Regime,
    pub angles: AngleSet,
    pub impedances: AngularImpedances,
    pub amplitudes: Amplitudes,
    pub energies: Energies,
}

impl CoefficientSet {
    /// `|R_P|, |R_S|, |T_P|, |T_S|`, for amplitude-ratio plots.
    pub fn magnitudes(&self) -> [f64; 4] {
        let a = &self.amplitudes;
        [a.r_p.norm(), a.r_s.norm(), a.t_p.norm(), a.t_s.norm()]
    }
}

impl fmt::Display for CoefficientSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.amplitudes;
        writeln!(f, "Incidence: {:.4} deg ({})", self.incidence_deg, self.regime)?;
        writeln!(f, "Amplitudes:")?;
        writeln!(f, "  R_P:              {:.6}", a.r_p)?;
        writeln!(f, "  R_S:              {:.6}", a.r_s)?;
        writeln!(f, "  T_P:              {:.6}", a.t_p)?;
        writeln!(f, "  T_S:              {:.6}", a.t_s)?;
        write!(f, "{}", self.energies)
    }
}
