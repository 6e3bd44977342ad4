use crate::domain::VehicleRecord;

/// Both axes share the same MPG domain.
pub const MPG_DOMAIN: [f64; 2] = [10.0, 150.0];
pub const AXIS_TICKS: [f64; 4] = [10.0, 20.0, 50.0, 100.0];

const BASE_MARK_RADIUS: f64 = 0.0045;
const CYLINDER_RADIUS_STEP: f64 = 0.0009;

/// A point in plot space, where both axes run from 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Logarithmic scale from the MPG domain onto `[0, 1]`. Values outside the
/// domain are clamped so outliers stay on the plot edge.
pub fn normalize(mpg: f64) -> f64 {
    let [low, high] = MPG_DOMAIN;
    let value = mpg.clamp(low, high);
    (value.ln() - low.ln()) / (high.ln() - low.ln())
}

pub fn project(city_mpg: f64, highway_mpg: f64) -> PlotPoint {
    PlotPoint::new(normalize(city_mpg), normalize(highway_mpg))
}

pub fn project_record(record: &VehicleRecord) -> PlotPoint {
    project(record.city_mpg, record.highway_mpg)
}

/// Mark radius in plot units; larger engines draw larger marks.
pub fn mark_radius(cylinders: u32) -> f64 {
    f64::from(cylinders).mul_add(CYLINDER_RADIUS_STEP, BASE_MARK_RADIUS)
}
