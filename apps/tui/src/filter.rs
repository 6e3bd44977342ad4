use crate::domain::{Fuel, VehicleRecord};

/// Predicate over vehicle records used to pick which marks a fade applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    FuelIs(Fuel),
    FuelIsNot(Fuel),
    /// Cylinder count strictly between the two bounds.
    CylindersBetween(u32, u32),
    CylindersIs(u32),
    CylindersIsNot(u32),
    AnyOf(&'static [Filter]),
}

impl Filter {
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        match *self {
            Self::All => true,
            Self::FuelIs(fuel) => record.fuel == fuel,
            Self::FuelIsNot(fuel) => record.fuel != fuel,
            Self::CylindersBetween(low, high) => record.cylinders > low && record.cylinders < high,
            Self::CylindersIs(count) => record.cylinders == count,
            Self::CylindersIsNot(count) => record.cylinders != count,
            Self::AnyOf(filters) => filters.iter().any(|filter| filter.matches(record)),
        }
    }
}
