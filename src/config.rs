use num_complex::Complex64;

/// Shear speed substituted for media that cannot carry shear waves. Keeps the
/// boundary system uniform for liquids without dividing by zero.
pub const FLUID_SHEAR_SPEED: Complex64 = Complex64::new(0.0013, 0.0013);
/// Marker accepted in material tables in place of a shear speed.
pub const SHEAR_NOT_APPLICABLE: &str = "NA";
/// Condition number above which the boundary matrix is treated as singular.
pub const DEFAULT_SINGULAR_THRESHOLD: f64 = 1e12;
/// Imaginary part (radians) above which a propagation angle counts as evanescent.
pub const EVANESCENT_TOLERANCE: f64 = 1e-9;
/// Upper bound on the number of angles in one sweep.
pub const MAX_SWEEP_POINTS: usize = 10_000_000;
