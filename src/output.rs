use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;
use ndarray::Array2;
use tracing::info;

use crate::material::Material;
use crate::result::SweepResult;
use crate::settings::Settings;


/// Numeric part of the sweep as a table, one row per angle:
/// `angle R_P R_S T_P T_S total T_L_gated T_S_gated`.
pub fn sweep_table(result: &SweepResult) -> Array2<f64> {
    let mut table = Array2::<f64>::zeros((result.points.len(), 8));
    for (mut row, point) in table.outer_iter_mut().zip(result.points.iter()) {
        let e = &point.energies;
        row[0] = point.angle;
        row[1] = e.reflected_p;
        row[2] = e.reflected_s;
        row[3] = e.transmitted_p;
        row[4] = e.transmitted_s;
        row[5] = e.total();
        row[6] = point.gated.0;
        row[7] = point.gated.1;
    }
    table
}

/// Writes `rt_sweep.dat` and `rt_sweep.json` into `dir`.
pub fn write_sweep(result: &SweepResult, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {:?}", dir))?;

    let path = dir.join("rt_sweep.dat");
    let file = File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# angle R_P R_S T_P T_S total T_L_gated T_S_gated regime")?;
    let table = sweep_table(result);
    for (row, point) in table.outer_iter().zip(result.points.iter()) {
        let values = row.iter().map(|v| format!("{:.8e}", v)).join(" ");
        writeln!(writer, "{} {}", values, point.regime)?;
    }
    writer.flush()?;
    info!(path = ?path, "wrote sweep table");

    let path = dir.join("rt_sweep.json");
    let file = File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), result)?;
    info!(path = ?path, "wrote sweep json");

    Ok(())
}

fn material_row(material: &Material, distance: Option<f64>) -> String {
    let (vs, zs) = if material.is_fluid() {
        ("NA".to_string(), "NA".to_string())
    } else {
        (
            format!("{}", material.vs.re),
            format!("{:.6e}", material.s_wave_impedance().re),
        )
    };
    let mut row = format!(
        "{} {} {} {} {:.6e} {}",
        material.name.replace(' ', "_"),
        material.density,
        material.vp,
        vs,
        material.p_wave_impedance(),
        zs
    );
    if let Some(distance) = distance {
        row.push_str(&format!(" {:.6}", distance));
    }
    row
}

/// Writes `materials.dat`, with an acoustic distance column when one is given
/// for every material.
pub fn write_materials(materials: &[(Material, Option<f64>)], dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {:?}", dir))?;
    let path = dir.join("materials.dat");
    let file = File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    let with_distance = materials.iter().all(|(_, d)| d.is_some());
    if with_distance {
        writeln!(writer, "# name density vp vs Zp Zs distance")?;
    } else {
        writeln!(writer, "# name density vp vs Zp Zs")?;
    }
    for (material, distance) in materials {
        let distance = if with_distance { *distance } else { None };
        writeln!(writer, "{}", material_row(material, distance))?;
    }
    writer.flush()?;
    info!(path = ?path, count = materials.len(), "wrote material table");
    Ok(())
}

/// Echoes the effective settings as `settings.toml`.
pub fn write_settings(settings: &Settings, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {:?}", dir))?;
    let path = dir.join("settings.toml");
    let text = toml::to_string_pretty(settings)?;
    fs::write(&path, text).with_context(|| format!("failed to write {:?}", path))?;
    Ok(())
}
