//! JSON and JSON Lines reference files.

use std::io::{BufRead, Read};

use serde_json::{Map, Value};

use crate::columns::Field;
use crate::error::{IngestError, Result};
use crate::loader::{RowFields, RowSink};

type Object = Map<String, Value>;

/// Read a JSON array of company objects into `sink`.
pub(crate) fn read_json_array<R: Read>(reader: R, sink: &mut RowSink<'_>) -> Result<()> {
    let objects: Vec<Object> =
        serde_json::from_reader(reader).map_err(|err| IngestError::JsonParse {
            path: sink.path().to_path_buf(),
            message: err.to_string(),
        })?;
    for (idx, object) in objects.iter().enumerate() {
        push_object(sink, idx as u64 + 1, object);
    }
    Ok(())
}

/// Read one company object per line into `sink`. Blank lines are ignored.
pub(crate) fn read_json_lines<R: BufRead>(reader: R, sink: &mut RowSink<'_>) -> Result<()> {
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx as u64 + 1;
        let line = line.map_err(|err| IngestError::io(sink.path(), err))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let object: Object = serde_json::from_str(line).map_err(|err| IngestError::JsonParse {
            path: sink.path().to_path_buf(),
            message: format!("line {line_no}: {err}"),
        })?;
        push_object(sink, line_no, &object);
    }
    Ok(())
}

fn push_object(sink: &mut RowSink<'_>, row: u64, object: &Object) {
    let mut values: [Option<String>; 4] = Default::default();
    for (key, value) in object {
        let Some(field) = Field::from_header(key) else {
            continue;
        };
        let slot = &mut values[field_slot(field)];
        if slot.is_none() {
            *slot = scalar_text(value);
        }
    }
    let [name, country, lei, source] = &values;
    sink.push(
        row,
        RowFields {
            name: name.as_deref(),
            country: country.as_deref(),
            lei: lei.as_deref(),
            source: source.as_deref(),
        },
    );
}

const fn field_slot(field: Field) -> usize {
    match field {
        Field::Name => 0,
        Field::Country => 1,
        Field::Lei => 2,
        Field::Source => 3,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
