use std::io::Read;

use serde::Deserialize;
use tracing::warn;

use super::DataError;
use crate::domain::{Fuel, VehicleRecord};

pub const CITY_COLUMN: &str = "AverageCityMPG";
pub const HIGHWAY_COLUMN: &str = "AverageHighwayMPG";
pub const CYLINDERS_COLUMN: &str = "EngineCylinders";
pub const FUEL_COLUMN: &str = "Fuel";

const REQUIRED_COLUMNS: [&str; 4] = [CITY_COLUMN, HIGHWAY_COLUMN, CYLINDERS_COLUMN, FUEL_COLUMN];

/// One CSV row as text; conversion happens in [`RawRow::into_record`] so a
/// bad value skips the row instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "AverageCityMPG")]
    city_mpg: String,
    #[serde(rename = "AverageHighwayMPG")]
    highway_mpg: String,
    #[serde(rename = "EngineCylinders")]
    cylinders: String,
    #[serde(rename = "Fuel")]
    fuel: String,
}

impl RawRow {
    fn into_record(self) -> Result<VehicleRecord, DataError> {
        let fuel = Fuel::parse(&self.fuel).ok_or(DataError::UnknownFuel(self.fuel))?;
        Ok(VehicleRecord {
            city_mpg: parse_mpg(CITY_COLUMN, self.city_mpg)?,
            highway_mpg: parse_mpg(HIGHWAY_COLUMN, self.highway_mpg)?,
            cylinders: parse_cylinders(self.cylinders)?,
            fuel,
        })
    }
}

fn parse_mpg(field: &'static str, value: String) -> Result<f64, DataError> {
    match value.parse::<f64>() {
        Ok(mpg) if mpg.is_finite() => Ok(mpg),
        _ => Err(DataError::InvalidNumber { field, value }),
    }
}

fn parse_cylinders(value: String) -> Result<u32, DataError> {
    let Ok(count) = value.parse::<i64>() else {
        return Err(DataError::InvalidNumber {
            field: CYLINDERS_COLUMN,
            value,
        });
    };
    if count < 0 {
        return Err(DataError::NegativeCylinders(count));
    }
    u32::try_from(count).map_err(|_| DataError::InvalidNumber {
        field: CYLINDERS_COLUMN,
        value,
    })
}

/// A row left out of the record set.
#[derive(Debug)]
pub struct SkippedRow {
    /// 1-based line in the source, counting the header.
    pub line: u64,
    pub reason: DataError,
}

#[derive(Debug)]
pub struct LoadReport {
    pub records: Vec<VehicleRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Parses the vehicle CSV. Unusable rows are skipped and reported; a file
/// that yields no records at all is an error.
pub fn parse_csv<R: Read>(reader: R) -> Result<LoadReport, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(DataError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for (index, row) in reader.deserialize::<RawRow>().enumerate() {
        let line = index as u64 + 2;
        match row.map_err(DataError::from).and_then(RawRow::into_record) {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!(line, %reason, "skipping dataset row");
                skipped.push(SkippedRow { line, reason });
            }
        }
    }

    if records.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(LoadReport { records, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Make,Fuel,EngineCylinders,AverageHighwayMPG,AverageCityMPG\n";

    fn parse(body: &str) -> Result<LoadReport, DataError> {
        parse_csv(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn reads_the_four_used_columns_by_name() {
        let report = parse("Acura, Gasoline ,6,28,20\nTesla,Electricity,0,101,124\n")
            .unwrap_or_else(|e| panic!("parse failed: {e}"));

        assert!(report.skipped.is_empty());
        assert_eq!(
            report.records,
            vec![
                VehicleRecord {
                    city_mpg: 20.0,
                    highway_mpg: 28.0,
                    cylinders: 6,
                    fuel: Fuel::Gasoline,
                },
                VehicleRecord {
                    city_mpg: 124.0,
                    highway_mpg: 101.0,
                    cylinders: 0,
                    fuel: Fuel::Electric,
                },
            ]
        );
    }

    #[test]
    fn bad_rows_are_skipped_with_their_line() {
        let report = parse(
            "BMW,Diesel,4,39,27\nX,Hydrogen,4,60,60\nY,Gasoline,-2,20,15\nZ,Gasoline,4,fast,20\n",
        )
        .unwrap_or_else(|e| panic!("parse failed: {e}"));

        assert_eq!(report.records.len(), 1);
        let lines: Vec<u64> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert!(matches!(report.skipped[0].reason, DataError::UnknownFuel(ref f) if f == "Hydrogen"));
        assert!(matches!(report.skipped[1].reason, DataError::NegativeCylinders(-2)));
        assert!(matches!(
            report.skipped[2].reason,
            DataError::InvalidNumber { field: HIGHWAY_COLUMN, .. }
        ));
    }

    #[test]
    fn no_usable_rows_is_an_error() {
        assert!(matches!(parse(""), Err(DataError::Empty)));
        assert!(matches!(parse("X,Hydrogen,4,60,60\n"), Err(DataError::Empty)));
    }

    #[test]
    fn missing_columns_are_reported() {
        let result = parse_csv("Make,Fuel,AverageCityMPG\nA,Diesel,20\n".as_bytes());
        assert!(matches!(result, Err(DataError::MissingColumn(HIGHWAY_COLUMN))));
    }
}
