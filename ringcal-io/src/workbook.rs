//! Spreadsheet (xlsx) export of ring info and normalized result tables.

use std::path::Path;

use log::info;
use ringcal_core::{Cell, FieldValue, NormalizedTable, Ring};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};

use crate::Result;

/// Columns of the ring-info table.
pub const RING_INFO_COLUMNS: [&str; 5] = ["FileName", "Multiplier", "CenterX", "CenterY", "Radius"];

fn row_num(index: usize) -> std::result::Result<RowNum, XlsxError> {
    RowNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(index: usize) -> std::result::Result<ColNum, XlsxError> {
    ColNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn write_header<S: AsRef<str>>(sheet: &mut Worksheet, columns: &[S]) -> std::result::Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col_num(col)?, name.as_ref(), &bold)?;
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn write_value(
    sheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: &FieldValue,
) -> std::result::Result<(), XlsxError> {
    match value {
        FieldValue::Integer(v) => sheet.write_number(row, col, *v as f64)?,
        FieldValue::Number(v) => sheet.write_number(row, col, *v)?,
        FieldValue::Text(s) => sheet.write_string(row, col, s)?,
    };
    Ok(())
}

/// Write one row per ring: file name, multiplier, center and radius.
///
/// # Errors
/// Returns an error if the workbook cannot be built or saved.
#[allow(clippy::cast_precision_loss)]
pub fn write_ring_info(path: &Path, rings: &[Ring]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_header(sheet, &RING_INFO_COLUMNS)?;

    for (i, ring) in rings.iter().enumerate() {
        let row = row_num(i + 1)?;
        sheet.write_string(row, 0, &ring.file_name)?;
        sheet.write_number(row, 1, ring.multiplier)?;
        sheet.write_number(row, 2, f64::from(ring.center.x))?;
        sheet.write_number(row, 3, f64::from(ring.center.y))?;
        sheet.write_number(row, 4, ring.radius as f64)?;
    }

    workbook.save(path)?;
    info!("Circle data saved as {}", path.display());
    Ok(())
}

/// Write a normalized table; absent cells are left blank.
///
/// # Errors
/// Returns an error if the workbook cannot be built or saved.
pub fn write_table(path: &Path, table: &NormalizedTable) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_header(sheet, table.columns())?;

    for (i, cells) in table.rows().iter().enumerate() {
        let row = row_num(i + 1)?;
        for (col, cell) in cells.iter().enumerate() {
            if let Cell::Present(value) = cell {
                write_value(sheet, row, col_num(col)?, value)?;
            }
        }
    }

    workbook.save(path)?;
    info!("{} result row(s) saved to {}", table.len(), path.display());
    Ok(())
}
