use super::normalizer::{is_name_header, normalize_header};
use super::{RecordImportError, SchoolRecord};
use crate::admissions::AdmissionFields;
use serde_json::{Map, Value};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::debug;

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<SchoolRecord>, RecordImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    let name_column = headers
        .iter()
        .position(|header| is_name_header(header))
        .ok_or(RecordImportError::MissingNameColumn)?;

    let mut records = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        let name = row
            .get(name_column)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(RecordImportError::MissingName { position: index + 1 })?
            .to_string();

        let fields: AdmissionFields = headers
            .iter()
            .zip(row.iter())
            .enumerate()
            .filter(|(column, _)| *column != name_column)
            .map(|(_, (header, value))| (header.clone(), value))
            .collect();

        records.push(SchoolRecord { name, fields });
    }

    Ok(records)
}

pub(crate) fn parse_json<R: Read>(reader: R) -> Result<Vec<SchoolRecord>, RecordImportError> {
    let rows: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| record_from_object(row, index + 1))
        .collect()
}

/// Scalar entries become fields; nested objects such as `fields` or
/// `transferInfo` are merged in so API payloads can be fed back unchanged.
///
/// Top-level values win over nested ones, and nested objects are merged in
/// key order, so the first object to supply a field keeps it. Null and blank
/// values never claim a field.
fn record_from_object(
    mut row: Map<String, Value>,
    position: usize,
) -> Result<SchoolRecord, RecordImportError> {
    let name = match row.remove("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_string(),
        _ => return Err(RecordImportError::MissingName { position }),
    };

    let mut flattened = BTreeMap::new();
    let mut nested = Vec::new();
    for (key, value) in row {
        match value {
            Value::Object(inner) => nested.push((key, inner)),
            other if carries_text(&other) => {
                flattened.insert(key, other);
            }
            _ => {}
        }
    }
    for (parent, inner) in nested {
        for (key, value) in inner {
            if !carries_text(&value) {
                continue;
            }
            match flattened.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(slot) => debug!(
                    school = %name,
                    field = %slot.key(),
                    source = %parent,
                    "nested field ignored, value already set"
                ),
            }
        }
    }

    Ok(SchoolRecord {
        name,
        fields: AdmissionFields::from(flattened),
    })
}

fn carries_text(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.trim().is_empty(),
        _ => true,
    }
}
