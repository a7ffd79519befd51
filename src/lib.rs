//! Reflection and transmission of an obliquely incident longitudinal wave at a
//! planar interface between two elastic or fluid half-spaces.

pub mod bins;
pub mod boundary;
pub mod closed_form;
pub mod coefficients;
pub mod config;
pub mod critical;
pub mod database;
pub mod energy;
pub mod error;
#[cfg(feature = "visualization")]
pub mod helpers;
pub mod interface;
pub mod material;
pub mod output;
pub mod params;
pub mod result;
pub mod settings;
pub mod snell;
pub mod sweep;

pub use error::RtError;
pub use interface::Interface;
pub use material::Material;
