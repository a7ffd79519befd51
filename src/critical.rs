//! Critical angles and the transmission regimes they delimit.
//!
//! The first critical angle `asin(vp1 / vp2)` is where the transmitted
//! longitudinal wave turns evanescent, the second `asin(vp1 / vs2)` is where
//! the transmitted shear wave follows. A ratio above one means the angle does
//! not exist and the corresponding regime extends to grazing incidence.

use serde::Serialize;
use std::fmt;

use crate::material::Material;


/// How much of the transmitted field propagates at a given incidence angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Regime {
    /// Both transmitted modes propagate.
    Propagating,
    /// Exactly at the first critical angle. No transmitted energy.
    AtCritical,
    /// Transmitted P is evanescent, only transmitted S carries energy.
    ModeConverted,
    /// Beyond the second critical angle. Nothing is transmitted.
    TotalReflection,
}

impl Regime {
    pub fn transmits_nothing(&self) -> bool {
        matches!(self, Regime::AtCritical | Regime::TotalReflection)
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Regime::Propagating => "propagating",
            Regime::AtCritical => "at-critical",
            Regime::ModeConverted => "mode-converted",
            Regime::TotalReflection => "total-reflection",
        };
        write!(f, "{}", label)
    }
}

/// First (P) and second (S) critical angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalAngles {
    pub p: Option<f64>,
    pub s: Option<f64>,
}

impl CriticalAngles {
    pub fn new(incident: &Material, transmission: &Material) -> Self {
        Self {
            p: critical_angle(incident.vp / transmission.vp),
            s: critical_angle(incident.vp / transmission.vs.re),
        }
    }

    /// Classifies an incidence angle (degrees). A missing critical angle is
    /// treated as 90 degrees.
    pub fn regime(&self, incidence_deg: f64) -> Regime {
        let p = self.p.unwrap_or(90.0);
        let s = self.s.unwrap_or(90.0);

        if self.p == Some(incidence_deg) {
            Regime::AtCritical
        } else if incidence_deg < p {
            Regime::Propagating
        } else if incidence_deg < s {
            Regime::ModeConverted
        } else {
            Regime::TotalReflection
        }
    }
}

fn critical_angle(ratio: f64) -> Option<f64> {
    if ratio <= 1.0 {
        Some(ratio.asin().to_degrees())
    } else {
        None
    }
}
