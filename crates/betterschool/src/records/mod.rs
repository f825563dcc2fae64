mod normalizer;
mod parser;

use crate::admissions::AdmissionFields;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// A school listing as far as admission status is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub name: String,
    pub fields: AdmissionFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Csv,
}

impl RecordFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        extension.parse().ok()
    }
}

impl FromStr for RecordFormat {
    type Err = RecordImportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(RecordImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum RecordImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    MissingNameColumn,
    MissingName { position: usize },
    UnsupportedFormat(String),
}

impl std::fmt::Display for RecordImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordImportError::Io(err) => write!(f, "failed to read school records: {}", err),
            RecordImportError::Csv(err) => write!(f, "invalid school CSV data: {}", err),
            RecordImportError::Json(err) => write!(f, "invalid school JSON data: {}", err),
            RecordImportError::MissingNameColumn => {
                write!(f, "school CSV has no name column")
            }
            RecordImportError::MissingName { position } => {
                write!(f, "school record {} has no name", position)
            }
            RecordImportError::UnsupportedFormat(format) => {
                write!(f, "unsupported record format '{}' (expected json or csv)", format)
            }
        }
    }
}

impl std::error::Error for RecordImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordImportError::Io(err) => Some(err),
            RecordImportError::Csv(err) => Some(err),
            RecordImportError::Json(err) => Some(err),
            RecordImportError::MissingNameColumn
            | RecordImportError::MissingName { .. }
            | RecordImportError::UnsupportedFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for RecordImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RecordImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for RecordImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

pub struct SchoolRecordImporter;

impl SchoolRecordImporter {
    /// Loads records, picking the format from `format` or else the file extension.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        format: Option<RecordFormat>,
    ) -> Result<Vec<SchoolRecord>, RecordImportError> {
        let path = path.as_ref();
        let format = match format {
            Some(format) => format,
            None => RecordFormat::from_path(path).ok_or_else(|| {
                RecordImportError::UnsupportedFormat(path.display().to_string())
            })?,
        };
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, format)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        format: RecordFormat,
    ) -> Result<Vec<SchoolRecord>, RecordImportError> {
        let records = match format {
            RecordFormat::Json => parser::parse_json(reader)?,
            RecordFormat::Csv => parser::parse_csv(reader)?,
        };
        tracing::debug!(count = records.len(), ?format, "school records loaded");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admissions::fields::{
        PRIMARY_ONE_START, TRANSFER_END_1, TRANSFER_START_1, TRANSFER_START_2,
    };

    #[test]
    fn csv_import_uses_headers_as_field_names() {
        let csv = "\u{feff}name,插班申请开始时间1,插班申请截止时间1,插班申请开始时间2\n\
圣保罗书院,2025-09-01,2025-09-30,\n\
英华书院,开放申请,,\n";

        let records = SchoolRecordImporter::from_reader(csv.as_bytes(), RecordFormat::Csv)
            .expect("csv imports");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "圣保罗书院");
        assert_eq!(records[0].fields.get(TRANSFER_START_1), Some("2025-09-01"));
        assert_eq!(records[0].fields.get(TRANSFER_END_1), Some("2025-09-30"));
        assert_eq!(records[0].fields.get(TRANSFER_START_2), None);
        assert_eq!(records[1].fields.get(TRANSFER_START_1), Some("开放申请"));
        assert_eq!(records[1].fields.get("name"), None);
    }

    #[test]
    fn csv_without_name_column_is_rejected() {
        let csv = "插班申请开始时间1\n2025-09-01\n";
        let err = SchoolRecordImporter::from_reader(csv.as_bytes(), RecordFormat::Csv)
            .expect_err("name column required");
        assert!(matches!(err, RecordImportError::MissingNameColumn));
    }

    #[test]
    fn json_import_merges_nested_objects() {
        let json = r#"[
            {"name": "拔萃男书院", "fields": {"插班申请开始时间1": "2025-9-1"}},
            {"name": "喇沙小学", "district": "九龙城", "transferInfo": {"插班申请截止时间1": "2025年10月3日"}, "小一入学申请开始时间": "2025-9-2"}
        ]"#;

        let records = SchoolRecordImporter::from_reader(json.as_bytes(), RecordFormat::Json)
            .expect("json imports");

        assert_eq!(records[0].fields.get(TRANSFER_START_1), Some("2025-9-1"));
        assert_eq!(records[1].fields.get(TRANSFER_END_1), Some("2025年10月3日"));
        assert_eq!(records[1].fields.get(PRIMARY_ONE_START), Some("2025-9-2"));
        assert_eq!(records[1].fields.get("district"), Some("九龙城"));
    }

    #[test]
    fn json_top_level_fields_win_over_nested_ones() {
        let json = r#"[{
            "name": "皇仁书院",
            "插班申请开始时间1": "2025-9-1",
            "插班申请截止时间1": "",
            "fields": {"插班申请开始时间1": "2025-10-1", "插班申请截止时间1": "2025-10-20"},
            "transferInfo": {"插班申请截止时间1": "2025-11-20", "插班申请开始时间2": null}
        }]"#;

        let records = SchoolRecordImporter::from_reader(json.as_bytes(), RecordFormat::Json)
            .expect("json imports");
        let fields = &records[0].fields;

        assert_eq!(fields.get(TRANSFER_START_1), Some("2025-9-1"));
        assert_eq!(fields.get(TRANSFER_END_1), Some("2025-10-20"));
        assert_eq!(fields.get(TRANSFER_START_2), None);
    }

    #[test]
    fn json_record_without_name_reports_position() {
        let json = r#"[{"name": "A"}, {"插班申请开始时间1": "2025-9-1"}]"#;
        let err = SchoolRecordImporter::from_reader(json.as_bytes(), RecordFormat::Json)
            .expect_err("name required");
        assert!(matches!(err, RecordImportError::MissingName { position: 2 }));
    }

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(
            RecordFormat::from_path(Path::new("schools.CSV")),
            Some(RecordFormat::Csv)
        );
        assert_eq!(
            RecordFormat::from_path(Path::new("schools.json")),
            Some(RecordFormat::Json)
        );
        assert_eq!(RecordFormat::from_path(Path::new("schools.xlsx")), None);
    }
}
