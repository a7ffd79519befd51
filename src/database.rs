//! Named material table loaded from JSON.
//!
//! ```json
//! { "materials": [ { "name": "Water", "density": 1000, "vp": 1480, "vs": "NA" } ] }
//! ```
//!
//! Names are matched case-insensitively.

use anyhow::{Context, Result};
use itertools::Itertools;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::RtError;
use crate::material::{Material, ShearEntry};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TABLE: &str = r#"{
        "materials": [
            { "name": "Water", "density": 1000, "vp": 1480, "vs": "NA" },
            { "name": "Aluminium", "density": 2700, "vp": 6420, "vs": 3040 },
            { "name": "Plexiglass", "density": 1185, "vp": 2730, "vs": 1430 },
            { "name": "Steel", "density": 7850, "vp": 5900, "vs": 3200 }
        ]
    }"#;

    #[test]
    fn parses_solids_and_fluids() {
        let db = MaterialDatabase::from_json(TABLE).unwrap();
        assert_eq!(db.len(), 4);
        assert!(db.get("water").unwrap().is_fluid());
        assert_eq!(db.get("ALUMINIUM").unwrap().vs.re, 3040.0);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let db = MaterialDatabase::from_json(TABLE).unwrap();
        assert_eq!(
            db.get("unobtainium"),
            Err(RtError::UnknownMaterial("unobtainium".to_string()))
        );
    }

    #[test]
    fn bad_marker_is_rejected() {
        let table = r#"{ "materials": [ { "name": "X", "density": 1, "vp": 1, "vs": "n/a" } ] }"#;
        let err = MaterialDatabase::from_json(table).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RtError>(),
            Some(&RtError::InvalidShearMarker("n/a".to_string()))
        );
    }

    #[test]
    fn lowercase_marker_is_accepted() {
        let table = r#"{ "materials": [ { "name": "Oil", "density": 870, "vp": 1740, "vs": "na" } ] }"#;
        let db = MaterialDatabase::from_json(table).unwrap();
        assert!(db.get("oil").unwrap().is_fluid());
    }

    #[test]
    fn ranking_by_acoustic_distance() {
        let db = MaterialDatabase::from_json(TABLE).unwrap();
        let ranked = db.rank_by_distance("aluminium").unwrap();
        let names: Vec<&str> = ranked.iter().map(|(m, _)| m.name.as_str()).collect();
        assert_eq!(names, vec!["Plexiglass", "Water", "Steel"]);
        // sqrt((3040 - 2730)^2 + (2700 - 1185)^2)
        assert_abs_diff_eq!(ranked[0].1, 1546.39, epsilon = 1e-2);
        assert!(ranked.windows(2).all(|w| w[0].1 <= w[1].1));
    }
}

#[derive(Debug, Deserialize)]
struct MaterialFile {
    materials: Vec<MaterialEntry>,
}

#[derive(Debug, Deserialize)]
struct MaterialEntry {
    name: String,
    density: f64,
    vp: f64,
    vs: ShearEntry,
}

/// Materials in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDatabase {
    pub materials: Vec<Material>,
}

impl MaterialDatabase {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read material table {:?}", path))?;
        let db = Self::from_json(&text)
            .with_context(|| format!("failed to parse material table {:?}", path))?;
        info!(path = ?path, count = db.len(), "loaded material table");
        Ok(db)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: MaterialFile = serde_json::from_str(text)?;
        let materials = file
            .materials
            .iter()
            .map(|entry| Material::from_entry(&entry.name, entry.density, entry.vp, &entry.vs))
            .collect::<Result<Vec<_>, RtError>>()?;
        Ok(Self { materials })
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Result<Material, RtError> {
        let key = name.to_lowercase();
        self.materials
            .iter()
            .find(|m| m.name.to_lowercase() == key)
            .cloned()
            .ok_or_else(|| RtError::UnknownMaterial(name.to_string()))
    }

    /// Every other material paired with its acoustic distance from
    /// `reference`, nearest first. The distance compares the reference's shear
    /// speed with each candidate's longitudinal speed, alongside density.
    pub fn rank_by_distance(&self, reference: &str) -> Result<Vec<(Material, f64)>, RtError> {
        let reference = self.get(reference)?;
        let ranked = self
            .materials
            .iter()
            .filter(|m| m.name != reference.name)
            .map(|m| (m.clone(), acoustic_distance(&reference, m)))
            .sorted_by(|a, b| a.1.total_cmp(&b.1))
            .collect();
        Ok(ranked)
    }
}

/// `sqrt((ref.vs - m.vp)^2 + (ref.density - m.density)^2)`.
pub fn acoustic_distance(reference: &Material, material: &Material) -> f64 {
    (reference.vs.re - material.vp).hypot(reference.density - material.density)
}
