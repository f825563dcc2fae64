use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PRIMARY_ONE_START: &str = "小一入学申请开始时间";
pub const PRIMARY_ONE_END: &str = "小一入学申请截至时间";
pub const PRIMARY_ONE_END_ALT: &str = "小一入学申请截止时间";
pub const SECONDARY_ONE_START: &str = "入学申请开始时间";
pub const SECONDARY_ONE_END: &str = "入学申请截至时间";
pub const SECONDARY_ONE_END_ALT: &str = "入学申请截止时间";

pub const TRANSFER_START_1: &str = "插班申请开始时间1";
pub const TRANSFER_END_1: &str = "插班申请截止时间1";
pub const TRANSFER_START_2: &str = "插班申请开始时间2";
pub const TRANSFER_END_2: &str = "插班申请截止时间2";

/// Start-date field names for first-grade admission, primary terminology first.
pub const FIRST_GRADE_START_FIELDS: [&str; 2] = [PRIMARY_ONE_START, SECONDARY_ONE_START];

/// End-date field names for first-grade admission; both spellings of "deadline" occur.
pub const FIRST_GRADE_END_FIELDS: [&str; 4] = [
    PRIMARY_ONE_END,
    PRIMARY_ONE_END_ALT,
    SECONDARY_ONE_END,
    SECONDARY_ONE_END_ALT,
];

pub const TRANSFER_WINDOW_FIELDS: [(&str, &str); 2] = [
    (TRANSFER_START_1, TRANSFER_END_1),
    (TRANSFER_START_2, TRANSFER_END_2),
];

/// Raw admission text of one school, keyed by field name.
///
/// Blank values and JSON nulls are dropped on the way in, so lookups only
/// ever see text that carries something.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct AdmissionFields(BTreeMap<String, String>);

impl AdmissionFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl AsRef<str>) {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.0.insert(key.into(), value.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// First present value among `keys`, in order.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AdmissionFields
where
    K: Into<String>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

impl From<BTreeMap<String, serde_json::Value>> for AdmissionFields {
    fn from(map: BTreeMap<String, serde_json::Value>) -> Self {
        let mut fields = Self::new();
        for (key, value) in map {
            match value {
                serde_json::Value::String(text) => fields.insert(key, text),
                serde_json::Value::Number(number) => fields.insert(key, number.to_string()),
                _ => {}
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_values_are_absent() {
        let fields: AdmissionFields = [(TRANSFER_START_1, "  "), (TRANSFER_END_1, "2025-9-30")]
            .into_iter()
            .collect();

        assert_eq!(fields.get(TRANSFER_START_1), None);
        assert_eq!(fields.get(TRANSFER_END_1), Some("2025-9-30"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn first_of_skips_missing_and_blank_fields() {
        let fields: AdmissionFields = [(PRIMARY_ONE_END, ""), (SECONDARY_ONE_END_ALT, "2025-10-1")]
            .into_iter()
            .collect();

        assert_eq!(fields.first_of(&FIRST_GRADE_END_FIELDS), Some("2025-10-1"));
    }

    #[test]
    fn deserializes_from_loose_json() {
        let fields: AdmissionFields = serde_json::from_value(json!({
            "插班申请开始时间1": "开放申请",
            "插班申请截止时间1": 20250930,
            "插班申请开始时间2": null,
            "插班申请截止时间2": "",
            "备注": ["ignored"]
        }))
        .expect("fields deserialize");

        assert_eq!(fields.get(TRANSFER_START_1), Some("开放申请"));
        assert_eq!(fields.get(TRANSFER_END_1), Some("20250930"));
        assert_eq!(fields.get(TRANSFER_START_2), None);
        assert_eq!(fields.get(TRANSFER_END_2), None);
        assert_eq!(fields.len(), 2);
    }
}
