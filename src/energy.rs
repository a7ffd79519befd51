//! Energy split of an incident P-wave between the four outgoing modes.
//!
//! For a lossless interface the four fractions sum to one. The residual is
//! exposed through [`Energies::missing`] so that sweeps can report how well
//! conservation holds across angles.

use serde::Serialize;
use std::fmt;

/// Energy (intensity) coefficients, normalized to the incident P-wave flux.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Energies {
    pub reflected_p: f64,   // R_P energy
    pub reflected_s: f64,   // R_S energy, mode converted
    pub transmitted_p: f64, // T_P energy
    pub transmitted_s: f64, // T_S energy
}

impl Energies {
    /// All fractions zero. Used for sweep points that could not be solved.
    pub fn new() -> Self {
        Self {
            reflected_p: 0.0,
            reflected_s: 0.0,
            transmitted_p: 0.0,
            transmitted_s: 0.0,
        }
    }

    pub fn reflected(&self) -> f64 {
        self.reflected_p + self.reflected_s
    }

    pub fn transmitted(&self) -> f64 {
        self.transmitted_p + self.transmitted_s
    }

    pub fn total(&self) -> f64 {
        self.reflected() + self.transmitted()
    }

    /// Incident energy not accounted for by the four modes.
    pub fn missing(&self) -> f64 {
        1.0 - self.total()
    }
}

impl Default for Energies {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Energies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Energies:")?;
        writeln!(f, "  Reflected P:      {:.6}", self.reflected_p)?;
        writeln!(f, "  Reflected S:      {:.6}", self.reflected_s)?;
        writeln!(f, "  Transmitted P:    {:.6}", self.transmitted_p)?;
        writeln!(f, "  Transmitted S:    {:.6}", self.transmitted_s)?;
        writeln!(f, "  Total:            {:.6}", self.total())?;
        writeln!(f, "  Missing:          {:.3e}", self.missing())
    }
}
