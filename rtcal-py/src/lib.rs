use std::path::Path;

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use rtcal::database::MaterialDatabase;
use rtcal::sweep::Sweep;
use rtcal::{Interface, Material, RtError};

fn to_py_err(err: RtError) -> PyErr {
    match err {
        RtError::UnknownMaterial(_) => PyKeyError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// A homogeneous isotropic medium. `vs=None` marks a fluid.
#[pyclass(name = "Material")]
#[derive(Clone)]
struct PyMaterial {
    inner: Material,
}

#[pymethods]
impl PyMaterial {
    #[new]
    #[pyo3(signature = (name, density, vp, vs = None))]
    fn py_new(name: &str, density: f64, vp: f64, vs: Option<f64>) -> PyResult<Self> {
        let inner = Material::new(name, density, vp, vs).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    fn density(&self) -> f64 {
        self.inner.density
    }

    #[getter]
    fn vp(&self) -> f64 {
        self.inner.vp
    }

    /// Shear speed, or None for a fluid.
    #[getter]
    fn vs(&self) -> Option<f64> {
        if self.inner.is_fluid() {
            None
        } else {
            Some(self.inner.vs.re)
        }
    }

    fn p_wave_impedance(&self) -> f64 {
        self.inner.p_wave_impedance()
    }

    fn __repr__(&self) -> String {
        format!(
            "Material(name={:?}, density={}, vp={}, vs={:?})",
            self.inner.name,
            self.inner.density,
            self.inner.vp,
            self.vs()
        )
    }
}

fn interface(incident: &PyMaterial, transmission: &PyMaterial) -> Interface {
    Interface::new(incident.inner.clone(), transmission.inner.clone())
}

/// Loads a JSON material table as `(lowercase name, Material)` pairs.
#[pyfunction]
fn load_materials(path: &str) -> PyResult<Vec<(String, PyMaterial)>> {
    let db = MaterialDatabase::from_file(Path::new(path))
        .map_err(|err| PyValueError::new_err(format!("{:#}", err)))?;
    Ok(db
        .materials
        .into_iter()
        .map(|m| (m.name.to_lowercase(), PyMaterial { inner: m }))
        .collect())
}

/// First and second critical angles in degrees, None where they do not exist.
#[pyfunction]
fn critical_angles(incident: &PyMaterial, transmission: &PyMaterial) -> (Option<f64>, Option<f64>) {
    let critical = interface(incident, transmission).critical_angles();
    (critical.p, critical.s)
}

/// Transmitted longitudinal and shear refraction angles in degrees.
#[pyfunction]
fn refraction_angles(
    incident: &PyMaterial,
    transmission: &PyMaterial,
    angle: f64,
) -> (Option<f64>, Option<f64>) {
    interface(incident, transmission).refraction_angles(angle)
}

/// Energy fractions `(R_P, R_S, T_P, T_S)` at one incidence angle.
#[pyfunction]
fn intensity_coefficients(
    incident: &PyMaterial,
    transmission: &PyMaterial,
    angle: f64,
) -> PyResult<(f64, f64, f64, f64)> {
    let e = interface(incident, transmission)
        .intensity_coefficients(angle)
        .map_err(to_py_err)?
        .energies;
    Ok((e.reflected_p, e.reflected_s, e.transmitted_p, e.transmitted_s))
}

/// Regime-gated transmitted `(longitudinal, shear)` energies.
#[pyfunction]
fn transmitted_intensity(
    incident: &PyMaterial,
    transmission: &PyMaterial,
    angle: f64,
) -> PyResult<(f64, f64)> {
    interface(incident, transmission)
        .transmitted_intensity(angle)
        .map_err(to_py_err)
}

/// Pressure reflection and transmission coefficients at normal incidence.
#[pyfunction]
fn vertical_incidence_coefficients(incident: &PyMaterial, transmission: &PyMaterial) -> (f64, f64) {
    interface(incident, transmission).vertical_incidence_coefficients()
}

/// Sweeps the incidence angle and returns one row per angle:
/// `(angle, R_P, R_S, T_P, T_S, T_L_gated, T_S_gated, failed)`.
#[pyfunction]
#[pyo3(signature = (incident, transmission, start = 0.0, end = 90.0, step = 0.1, threshold = 1e12))]
fn sweep(
    py: Python<'_>,
    incident: &PyMaterial,
    transmission: &PyMaterial,
    start: f64,
    end: f64,
    step: f64,
    threshold: f64,
) -> PyResult<Vec<(f64, f64, f64, f64, f64, f64, f64, bool)>> {
    let sweep = Sweep::new(interface(incident, transmission), start, end, step, threshold)
        .map_err(to_py_err)?
        .quiet();
    let result = py.allow_threads(|| sweep.run());
    Ok(result
        .points
        .iter()
        .map(|p| {
            let e = &p.energies;
            (
                p.angle,
                e.reflected_p,
                e.reflected_s,
                e.transmitted_p,
                e.transmitted_s,
                p.gated.0,
                p.gated.1,
                p.failed,
            )
        })
        .collect())
}

/// A Python module implemented in Rust.
#[pymodule]
fn _rtcal_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMaterial>()?;
    m.add_function(wrap_pyfunction!(load_materials, m)?)?;
    m.add_function(wrap_pyfunction!(critical_angles, m)?)?;
    m.add_function(wrap_pyfunction!(refraction_angles, m)?)?;
    m.add_function(wrap_pyfunction!(intensity_coefficients, m)?)?;
    m.add_function(wrap_pyfunction!(transmitted_intensity, m)?)?;
    m.add_function(wrap_pyfunction!(vertical_incidence_coefficients, m)?)?;
    m.add_function(wrap_pyfunction!(sweep, m)?)?;
    Ok(())
}
