use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            materials_file: "config/materials.json".to_string(),
            incident: "water".to_string(),
            transmission: "aluminium".to_string(),
            start: 0.0,
            end: 90.0,
            step: 0.5,
            singular_threshold: 1e12,
            output_dir: "output".to_string(),
            angle: None,
            reference: None,
        }
    }

    #[test]
    fn default_config_is_valid() {
        let config = load_default_config().unwrap();
        assert!(validate_config(&config).is_ok());
        assert!(config.materials_path().is_file());
    }

    #[test]
    fn rejects_bad_ranges() {
        let mut config = settings();
        config.step = 0.0;
        assert!(validate_config(&config).is_err());

        let mut config = settings();
        config.start = 50.0;
        config.end = 40.0;
        assert!(validate_config(&config).is_err());

        let mut config = settings();
        config.end = 95.0;
        assert!(validate_config(&config).is_err());

        let mut config = settings();
        config.singular_threshold = 0.5;
        assert!(validate_config(&config).is_err());

        let mut config = settings();
        config.angle = Some(-3.0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn cli_overrides() {
        let args = CliArgs::parse_from([
            "rtcal", "-i", "ice", "-t", "steel", "--step", "2", "--angle", "12.5",
        ]);
        let mut config = settings();
        args.apply(&mut config);
        assert_eq!(config.incident, "ice");
        assert_eq!(config.transmission, "steel");
        assert_eq!(config.step, 2.0);
        assert_eq!(config.angle, Some(12.5));
        assert_eq!(config.end, 90.0);
    }
}

/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    pub materials_file: String,
    pub incident: String,
    pub transmission: String,
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub singular_threshold: f64,
    pub output_dir: String,
    #[serde(default)]
    pub angle: Option<f64>,
    #[serde(default)]
    pub reference: Option<String>,
}

impl Settings {
    /// Material table path; relative paths are taken from the project root.
    pub fn materials_path(&self) -> PathBuf {
        resolve(&self.materials_file)
    }

    /// Output directory; relative paths are taken from the working directory.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }
}

fn resolve(path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() || path.exists() {
        return path;
    }
    match retrieve_project_root() {
        Ok(root) => root.join(path),
        Err(_) => path,
    }
}

/// Settings from `config/default.toml` alone, without environment or command
/// line overrides.
pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let default_config_file = root.join("config/default.toml");

    let settings: Config = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("error loading configuration")?;

    let config: Settings = settings
        .try_deserialize()
        .context("error deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

/// Settings from `config/default.toml` (or `config/local.toml` when present),
/// then `RTCAL_*` environment variables, then command line flags.
pub fn load_config() -> Result<Settings> {
    load_config_with_cli(CliArgs::parse())
}

pub fn load_config_with_cli(args: CliArgs) -> Result<Settings> {
    let root = retrieve_project_root()?;

    let default_config_file = root.join("config/default.toml");
    let local_config = root.join("config/local.toml");

    let config_file = if local_config.exists() {
        info!(path = ?local_config, "using local configuration");
        local_config
    } else {
        info!(path = ?default_config_file, "using default configuration");
        default_config_file
    };

    let settings: Config = Config::builder()
        .add_source(File::from(config_file).required(true))
        .add_source(Environment::with_prefix("rtcal"))
        .build()
        .context("error loading configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("error deserializing configuration")?;

    args.apply(&mut config);

    validate_config(&config)?;

    Ok(config)
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the RTCAL_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("RTCAL_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    let exe_path = env::current_exe().context("failed to get current executable path")?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(|dir| dir.to_path_buf())
        .ok_or_else(|| anyhow!("could not find project root directory"))
}

pub fn validate_config(config: &Settings) -> Result<()> {
    if !(config.step > 0.0) {
        bail!("step must be greater than 0, got {}", config.step);
    }
    if !(0.0 <= config.start && config.start <= config.end && config.end <= 90.0) {
        bail!(
            "sweep range must satisfy 0 <= start <= end <= 90, got {}..{}",
            config.start,
            config.end
        );
    }
    if !(config.singular_threshold > 1.0) {
        bail!(
            "singular threshold must be greater than 1, got {}",
            config.singular_threshold
        );
    }
    if let Some(angle) = config.angle {
        if !(0.0..=90.0).contains(&angle) {
            bail!("incidence angle must lie in [0, 90], got {}", angle);
        }
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "RTCAL - acoustic reflection and transmission coefficients at planar interfaces"
)]
pub struct CliArgs {
    /// Path to the JSON material table.
    #[arg(short, long)]
    materials: Option<String>,

    /// Name of the medium carrying the incident P-wave.
    #[arg(short, long)]
    incident: Option<String>,

    /// Name of the medium on the far side of the interface.
    #[arg(short, long)]
    transmission: Option<String>,

    /// First incidence angle of the sweep, in degrees.
    #[arg(long)]
    start: Option<f64>,

    /// Last incidence angle of the sweep, in degrees.
    #[arg(long)]
    end: Option<f64>,

    /// Angle step of the sweep, in degrees.
    #[arg(long)]
    step: Option<f64>,

    /// Condition number above which the boundary system is treated as singular.
    #[arg(long)]
    threshold: Option<f64>,

    /// Directory for output files.
    #[arg(short, long)]
    output: Option<String>,

    /// Solve a single incidence angle (degrees) and print the full report
    /// instead of running a sweep.
    #[arg(short, long)]
    angle: Option<f64>,

    /// Also write the material table ranked by acoustic distance from this material.
    #[arg(short, long)]
    reference: Option<String>,
}

impl CliArgs {
    /// Overrides configuration values with the flags that were given.
    pub fn apply(self, config: &mut Settings) {
        if let Some(materials) = self.materials {
            config.materials_file = materials;
        }
        if let Some(incident) = self.incident {
            config.incident = incident;
        }
        if let Some(transmission) = self.transmission {
            config.transmission = transmission;
        }
        if let Some(start) = self.start {
            config.start = start;
        }
        if let Some(end) = self.end {
            config.end = end;
        }
        if let Some(step) = self.step {
            config.step = step;
        }
        if let Some(threshold) = self.threshold {
            config.singular_threshold = threshold;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if self.angle.is_some() {
            config.angle = self.angle;
        }
        if self.reference.is_some() {
            config.reference = self.reference;
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Materials: {}
  - Incident Medium: {}
  - Transmission Medium: {}
  - Sweep: {} to {} deg, step {}
  - Singular Threshold: {:.3e}
  - Output Directory: {}
  ",
            self.materials_file,
            self.incident,
            self.transmission,
            self.start,
            self.end,
            self.step,
            self.singular_threshold,
            self.output_dir,
        )
    }
}
