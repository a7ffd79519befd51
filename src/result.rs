use serde::Serialize;
use std::fmt;

use crate::critical::{CriticalAngles, Regime};
use crate::energy::Energies;
use crate::interface::Interface;
use crate::params::Params;

/// Outcome of one incidence angle in a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub angle: f64,
    pub regime: Regime,
    pub energies: Energies,
    pub magnitudes: [f64; 4], // |R_P|, |R_S|, |T_P|, |T_S|
    pub gated: (f64, f64),    // transmitted (longitudinal, shear) after regime gating
    pub failed: bool,
}

impl SweepPoint {
    /// Placeholder for an angle whose system could not be solved.
    pub fn failed(angle: f64, regime: Regime) -> Self {
        Self {
            angle,
            regime,
            energies: Energies::new(),
            magnitudes: [0.0; 4],
            gated: (0.0, 0.0),
            failed: true,
        }
    }
}

/// All points of a sweep, in ascending angle order, with their summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    pub interface: Interface,
    pub critical: CriticalAngles,
    pub points: Vec<SweepPoint>,
    pub params: Params,
}

impl SweepResult {
    pub fn new(interface: Interface, points: Vec<SweepPoint>) -> Self {
        let critical = interface.critical_angles();
        let params = Params::from_points(&critical, &points);
        Self {
            interface,
            critical,
            points,
            params,
        }
    }

    pub fn angles(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.angle).collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SweepPoint> {
        self.points.iter().filter(|p| p.failed)
    }

    pub fn print(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for SweepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Interface: {} -> {}",
            self.interface.incident.name, self.interface.transmission.name
        )?;
        writeln!(f, "Points:             {}", self.points.len())?;
        write!(f, "{}", self.params)
    }
}
