// Library half of the fuel story: data, render model and scene sequencing.
// The binary only adds the terminal front end.
pub mod config;
pub mod data;
pub mod domain;
pub mod filter;
pub mod scale;
pub mod stage;
pub mod story;
pub mod telemetry;

pub use domain::{Fuel, Scene, VehicleRecord};
