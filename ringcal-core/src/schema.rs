//! Normalization of measurement records into one rectangular table.
//!
//! Records carry a variable number of `Bend<N>_External_Angle` fields. The
//! normalizer finds the largest bend index over all records and projects every
//! record onto the same column list:
//!
//! ```text
//! File Name | Multiplier | Intersection Number | Number of Bends
//!     | Bend1_External_Angle .. Bend<M>_External_Angle
//!     | Total Meandering Angle at All Bends
//! ```
//!
//! Missing bend (and aggregate) values become [`Cell::Absent`].

use log::debug;

use crate::error::{Error, Result};
use crate::record::{
    bend_field, FieldValue, MeasurementRecord, REQUIRED_FIELDS, TOTAL_MEANDERING_ANGLE,
};

/// One table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Present(FieldValue),
    /// Explicit absent marker; never confused with a zero value.
    Absent,
}

impl Cell {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            Self::Present(v) => Some(v),
            Self::Absent => None,
        }
    }
}

/// Rectangular result table with a canonical column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl NormalizedTable {
    /// Column names in canonical order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows, one per input record, each `columns().len()` cells wide.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of bend columns.
    #[must_use]
    pub fn max_bend_index(&self) -> usize {
        self.columns.len().saturating_sub(REQUIRED_FIELDS.len() + 1)
    }

    /// Position of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in column `name`.
    #[must_use]
    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        let col = self.column_index(name)?;
        self.rows.get(row)?.get(col)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Canonical column list for a given maximum bend index.
#[must_use]
pub fn canonical_columns(max_bend_index: usize) -> Vec<String> {
    let mut columns: Vec<String> = REQUIRED_FIELDS.iter().map(|s| (*s).to_string()).collect();
    columns.extend((1..=max_bend_index).map(bend_field));
    columns.push(TOTAL_MEANDERING_ANGLE.to_string());
    columns
}

/// Largest bend index across all records; 0 for none or an empty slice.
#[must_use]
pub fn max_bend_index(records: &[MeasurementRecord]) -> usize {
    records
        .iter()
        .map(MeasurementRecord::max_bend_index)
        .max()
        .unwrap_or(0)
}

/// Largest bend index a table can hold: the xlsx column limit minus the
/// fixed and aggregate columns.
pub const MAX_BEND_INDEX: usize = 16_384 - REQUIRED_FIELDS.len() - 1;

/// Check one record against the schema before any column is allocated.
fn validate(index: usize, record: &MeasurementRecord) -> Result<()> {
    if let Some(field) = REQUIRED_FIELDS.iter().find(|f| !record.contains(f)) {
        return Err(Error::MalformedRecord {
            index,
            field: (*field).to_string(),
            file_name: record.file_name().map(str::to_string),
        });
    }
    let bend = record.max_bend_index();
    if bend > MAX_BEND_INDEX {
        return Err(Error::BendIndexOutOfRange {
            index,
            bend,
            max: MAX_BEND_INDEX,
        });
    }
    Ok(())
}

/// Project `records` onto the canonical schema.
///
/// # Errors
/// - [`Error::MalformedRecord`] for the first record missing a required
///   fixed field. No record is dropped silently.
/// - [`Error::BendIndexOutOfRange`] for a bend index above [`MAX_BEND_INDEX`].
pub fn normalize(records: &[MeasurementRecord]) -> Result<NormalizedTable> {
    for (index, record) in records.iter().enumerate() {
        validate(index, record)?;
    }

    let max_index = max_bend_index(records);
    let columns = canonical_columns(max_index);

    let mut rows = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        for name in record.field_names().filter(|n| !columns.iter().any(|c| c == n)) {
            debug!("record #{index}: dropping field '{name}' outside the result schema");
        }

        let row = columns
            .iter()
            .map(|column| record.get(column).cloned().map_or(Cell::Absent, Cell::Present))
            .collect();
        rows.push(row);
    }

    debug!(
        "normalized {} record(s) into {} column(s), max bend index {max_index}",
        rows.len(),
        columns.len()
    );
    Ok(NormalizedTable { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FILE_NAME, INTERSECTION_NUMBER, MULTIPLIER, NUMBER_OF_BENDS};

    fn record(file: &str, bends: &[f64]) -> MeasurementRecord {
        let mut r = MeasurementRecord::new()
            .with(FILE_NAME, file)
            .with(MULTIPLIER, 1.5)
            .with(INTERSECTION_NUMBER, 2)
            .with(NUMBER_OF_BENDS, i64::try_from(bends.len()).unwrap())
            .with(TOTAL_MEANDERING_ANGLE, bends.iter().sum::<f64>());
        for (i, angle) in bends.iter().enumerate() {
            r.insert(bend_field(i + 1), *angle);
        }
        r
    }

    #[test]
    fn test_normalize_fills_absent_bends() {
        let records = vec![record("a.png", &[12.0]), record("b.png", &[5.0, 8.0])];
        let table = normalize(&records).unwrap();

        assert_eq!(
            table.columns(),
            &[
                "File Name",
                "Multiplier",
                "Intersection Number",
                "Number of Bends",
                "Bend1_External_Angle",
                "Bend2_External_Angle",
                "Total Meandering Angle at All Bends",
            ]
        );
        assert_eq!(table.max_bend_index(), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.cell(0, "Bend1_External_Angle"),
            Some(&Cell::Present(FieldValue::Number(12.0)))
        );
        assert_eq!(table.cell(0, "Bend2_External_Angle"), Some(&Cell::Absent));
        assert_eq!(
            table.cell(1, "Bend2_External_Angle"),
            Some(&Cell::Present(FieldValue::Number(8.0)))
        );
    }

    #[test]
    fn test_zero_angle_is_not_absent() {
        let records = vec![record("a.png", &[0.0]), record("b.png", &[])];
        let table = normalize(&records).unwrap();
        let zero = table.cell(0, "Bend1_External_Angle").unwrap();
        let missing = table.cell(1, "Bend1_External_Angle").unwrap();
        assert!(!zero.is_absent());
        assert!(missing.is_absent());
        assert_ne!(zero, missing);
    }

    #[test]
    fn test_normalize_empty_input() {
        let table = normalize(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 5);
        assert_eq!(table.max_bend_index(), 0);
    }

    #[test]
    fn test_normalize_no_bends() {
        let table = normalize(&[record("a.png", &[])]).unwrap();
        assert_eq!(table.columns(), canonical_columns(0).as_slice());
        assert_eq!(table.rows()[0].len(), 5);
    }

    #[test]
    fn test_column_count_matches_max_index() {
        let records = vec![
            record("a.png", &[1.0, 2.0, 3.0]),
            record("b.png", &[]),
            record("c.png", &[4.0, 5.0, 6.0, 7.0, 8.0]),
        ];
        let table = normalize(&records).unwrap();
        assert_eq!(max_bend_index(&records), 5);
        assert_eq!(table.columns().len(), 4 + 5 + 1);
        assert!(table.rows().iter().all(|row| row.len() == table.columns().len()));
    }

    #[test]
    fn test_sparse_bend_indices_fill_gaps() {
        let r = record("a.png", &[]).with(bend_field(3), 9.0);
        let table = normalize(&[r]).unwrap();
        assert_eq!(table.max_bend_index(), 3);
        assert_eq!(table.cell(0, "Bend1_External_Angle"), Some(&Cell::Absent));
        assert_eq!(table.cell(0, "Bend2_External_Angle"), Some(&Cell::Absent));
        assert_eq!(
            table.cell(0, "Bend3_External_Angle"),
            Some(&Cell::Present(FieldValue::Number(9.0)))
        );
    }

    #[test]
    fn test_huge_bend_index_is_rejected() {
        let r = record("a.png", &[1.0]).with(bend_field(usize::MAX), 1.0);
        assert_eq!(
            normalize(&[record("b.png", &[]), r]).unwrap_err(),
            Error::BendIndexOutOfRange {
                index: 1,
                bend: usize::MAX,
                max: MAX_BEND_INDEX,
            }
        );

        let r = record("a.png", &[]).with(bend_field(1_000_000_000), 1.0);
        assert!(matches!(
            normalize(&[r]),
            Err(Error::BendIndexOutOfRange { bend: 1_000_000_000, .. })
        ));
    }

    #[test]
    fn test_bend_index_at_limit_is_accepted() {
        let r = record("a.png", &[]).with(bend_field(MAX_BEND_INDEX), 2.0);
        let table = normalize(&[r]).unwrap();
        assert_eq!(table.max_bend_index(), MAX_BEND_INDEX);
        assert_eq!(table.columns().len(), 16_384);
        assert_eq!(
            table.cell(0, &bend_field(MAX_BEND_INDEX)),
            Some(&Cell::Present(FieldValue::Number(2.0)))
        );
    }

    #[test]
    fn test_extraneous_fields_dropped() {
        let r = record("a.png", &[1.0])
            .with("Debug Score", 0.3)
            .with("Bend0_External_Angle", 99.0)
            .with("BendX_External_Angle", 1.0);
        let table = normalize(&[r]).unwrap();
        assert_eq!(table.columns().len(), 6);
        assert_eq!(table.column_index("Debug Score"), None);
        assert_eq!(table.column_index("Bend0_External_Angle"), None);
    }

    #[test]
    fn test_missing_aggregate_is_absent() {
        let r = MeasurementRecord::new()
            .with(FILE_NAME, "a.png")
            .with(MULTIPLIER, 1.0)
            .with(INTERSECTION_NUMBER, 0)
            .with(NUMBER_OF_BENDS, 0);
        let table = normalize(&[r]).unwrap();
        assert_eq!(table.cell(0, TOTAL_MEANDERING_ANGLE), Some(&Cell::Absent));
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let good = record("a.png", &[1.0]);
        let bad = MeasurementRecord::new()
            .with(FILE_NAME, "b.png")
            .with(INTERSECTION_NUMBER, 1)
            .with(NUMBER_OF_BENDS, 0);
        let err = normalize(&[good, bad]).unwrap_err();
        assert_eq!(
            err,
            Error::MalformedRecord {
                index: 1,
                field: MULTIPLIER.to_string(),
                file_name: Some("b.png".to_string()),
            }
        );
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let records = vec![
            record("a.png", &[3.0, 1.0]).with("extra", "x"),
            record("b.png", &[2.0]),
        ];
        let first = normalize(&records).unwrap();
        let second = normalize(&records).unwrap();
        assert_eq!(first, second);
    }
}
