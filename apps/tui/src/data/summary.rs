use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::{DataError, SkippedRow};
use crate::domain::{Fuel, VehicleRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelSummary {
    pub fuel: Fuel,
    pub count: usize,
    pub mean_city_mpg: Option<f64>,
    pub mean_highway_mpg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CylinderCount {
    pub cylinders: u32,
    pub count: usize,
}

/// Aggregate view of the loaded dataset, printed by headless mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub source: String,
    pub total: usize,
    pub skipped: usize,
    /// Fuel labels outside the known fuels, whose rows were left out.
    pub unrecognized_fuels: Vec<String>,
    pub by_fuel: Vec<FuelSummary>,
    pub by_cylinders: Vec<CylinderCount>,
}

impl DatasetSummary {
    pub fn new(
        source: impl Into<String>,
        records: &[VehicleRecord],
        skipped: &[SkippedRow],
    ) -> Self {
        let by_fuel = Fuel::ALL
            .iter()
            .map(|&fuel| {
                let matching: Vec<&VehicleRecord> =
                    records.iter().filter(|r| r.fuel == fuel).collect();
                FuelSummary {
                    fuel,
                    count: matching.len(),
                    mean_city_mpg: mean(matching.iter().map(|r| r.city_mpg)),
                    mean_highway_mpg: mean(matching.iter().map(|r| r.highway_mpg)),
                }
            })
            .collect();

        let mut cylinders: BTreeMap<u32, usize> = BTreeMap::new();
        for record in records {
            *cylinders.entry(record.cylinders).or_default() += 1;
        }

        let unrecognized_fuels: BTreeSet<String> = skipped
            .iter()
            .filter_map(|row| match &row.reason {
                DataError::UnknownFuel(label) => Some(label.clone()),
                _ => None,
            })
            .collect();

        Self {
            source: source.into(),
            total: records.len(),
            skipped: skipped.len(),
            unrecognized_fuels: unrecognized_fuels.into_iter().collect(),
            by_fuel,
            by_cylinders: cylinders
                .into_iter()
                .map(|(cylinders, count)| CylinderCount { cylinders, count })
                .collect(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city_mpg: f64, highway_mpg: f64, cylinders: u32, fuel: Fuel) -> VehicleRecord {
        VehicleRecord {
            city_mpg,
            highway_mpg,
            cylinders,
            fuel,
        }
    }

    #[test]
    fn groups_by_fuel_and_cylinders() {
        let records = [
            record(20.0, 30.0, 4, Fuel::Gasoline),
            record(16.0, 22.0, 8, Fuel::Gasoline),
            record(28.0, 40.0, 4, Fuel::Diesel),
        ];
        let skipped = [
            SkippedRow {
                line: 5,
                reason: DataError::NegativeCylinders(-1),
            },
            SkippedRow {
                line: 6,
                reason: DataError::UnknownFuel("Hydrogen".into()),
            },
        ];
        let summary = DatasetSummary::new("test.csv", &records, &skipped);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.unrecognized_fuels, vec!["Hydrogen".to_string()]);

        let gasoline = summary
            .by_fuel
            .iter()
            .find(|f| f.fuel == Fuel::Gasoline)
            .cloned();
        assert_eq!(gasoline.map(|g| (g.count, g.mean_city_mpg)), Some((2, Some(18.0))));

        let electric = summary.by_fuel.iter().find(|f| f.fuel == Fuel::Electric);
        assert_eq!(electric.and_then(|e| e.mean_highway_mpg), None);

        assert_eq!(
            summary.by_cylinders,
            vec![
                CylinderCount { cylinders: 4, count: 2 },
                CylinderCount { cylinders: 8, count: 1 },
            ]
        );
    }

    #[test]
    fn unrecognized_fuel_labels_are_listed_once_each() {
        let report = crate::data::parse_csv(
            "Fuel,EngineCylinders,AverageHighwayMPG,AverageCityMPG\n\
             Diesel,4,39,27\n\
             Hydrogen,4,60,60\n\
             Propane,6,20,15\n\
             Hydrogen,4,61,61\n"
                .as_bytes(),
        )
        .unwrap_or_else(|e| panic!("parse failed: {e}"));
        let summary = DatasetSummary::new("test.csv", &report.records, &report.skipped);

        assert_eq!(summary.total, 1);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.unrecognized_fuels, vec!["Hydrogen", "Propane"]);
    }
}
