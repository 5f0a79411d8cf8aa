//! CSV reference files.

use std::io::Read;

use csv::{ReaderBuilder, Trim};

use crate::columns::ColumnMap;
use crate::error::{IngestError, Result};
use crate::loader::{RowFields, RowSink};

/// Read a headed CSV into `sink`.
///
/// Headers are matched through the column aliases. Rows may be ragged;
/// absent cells count as empty.
pub(crate) fn read_csv<R: Read>(reader: R, sink: &mut RowSink<'_>) -> Result<()> {
    let path = sink.path();
    let csv_error = |err: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = ColumnMap::from_headers(headers.iter()).map_err(|field| {
        IngestError::MissingColumn {
            column: field.canonical(),
            path: path.to_path_buf(),
        }
    })?;

    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let row = record.position().map_or(0, csv::Position::line);
        sink.push(
            row,
            RowFields {
                name: record.get(columns.name),
                country: record.get(columns.country),
                lei: columns.lei.and_then(|idx| record.get(idx)),
                source: columns.source.and_then(|idx| record.get(idx)),
            },
        );
    }
    Ok(())
}
