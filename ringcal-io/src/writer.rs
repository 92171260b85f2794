//! CSV writers for ring and result tables.

use crate::workbook::RING_INFO_COLUMNS;
use crate::Result;
use ringcal_core::{Cell, NormalizedTable, Ring};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writer for plain-text table output.
///
/// Absent cells become empty fields; a zero value is written as `0`.
pub struct TableFileWriter<W: Write> {
    writer: W,
}

impl TableFileWriter<BufWriter<File>> {
    /// Creates a new file writer.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TableFileWriter<W> {
    /// Wraps any writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes a normalized table as CSV.
    pub fn write_table_csv(&mut self, table: &NormalizedTable) -> Result<()> {
        self.write_record(table.columns().iter().map(|c| Cow::Borrowed(c.as_str())))?;
        for row in table.rows() {
            self.write_record(row.iter().map(|cell| match cell {
                Cell::Present(value) => Cow::Owned(value.to_string()),
                Cell::Absent => Cow::Borrowed(""),
            }))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Writes the ring-info table as CSV.
    pub fn write_rings_csv(&mut self, rings: &[Ring]) -> Result<()> {
        self.write_record(RING_INFO_COLUMNS.iter().map(|c| Cow::Borrowed(*c)))?;
        for ring in rings {
            self.write_record(
                [
                    ring.file_name.clone(),
                    ring.multiplier.to_string(),
                    ring.center.x.to_string(),
                    ring.center.y.to_string(),
                    ring.radius.to_string(),
                ]
                .into_iter()
                .map(Cow::Owned),
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Consumes the writer, returning the inner sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record<'a, I>(&mut self, fields: I) -> Result<()>
    where
        I: Iterator<Item = Cow<'a, str>>,
    {
        for (i, field) in fields.enumerate() {
            if i > 0 {
                self.writer.write_all(b",")?;
            }
            self.writer.write_all(escape(&field).as_bytes())?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Quotes a field containing separators, quotes or line breaks.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
