//! Structured fields extracted from contract text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ClausulaResult;

/// Value of one extracted field: a single match or every match in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// The single value, if this is a text field.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// The values, if this is a list field.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::List(v) => Some(v),
        }
    }

    /// Check whether the value equals `needle` or the list contains it.
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            FieldValue::Text(s) => s == needle,
            FieldValue::List(v) => v.iter().any(|s| s == needle),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::List(values)
    }
}

/// Sparse mapping from field name to extracted value.
///
/// A missing key means the field's pattern found nothing. Keys are kept
/// sorted so the JSON form is identical across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuredData(BTreeMap<String, FieldValue>);

impl StructuredData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Shortcut for a text field's value.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// Shortcut for a list field's values.
    pub fn list(&self, field: &str) -> Option<&[String]> {
        self.get(field).and_then(FieldValue::as_list)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    /// Serialize to the transport form `{"field": "v" | ["v", ...]}`.
    pub fn to_json(&self) -> ClausulaResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the transport form.
    pub fn from_json(json: &str) -> ClausulaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse the transport form, treating a malformed blob as empty.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed structured data");
                Self::default()
            }
        }
    }
}

impl FromIterator<(String, FieldValue)> for StructuredData {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for StructuredData {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StructuredData {
        let mut data = StructuredData::new();
        data.insert("valor_aluguel", "R$ 1.200,00");
        data.insert(
            "datas",
            vec!["01/02/2024".to_string(), "31-01-2026".to_string()],
        );
        data.insert("multa_rescisao", "três aluguéis");
        data
    }

    #[test]
    fn test_round_trip() {
        let data = sample();
        let json = data.to_json().unwrap();
        let parsed = StructuredData::from_json(&json).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_transport_shape() {
        let json = sample().to_json().unwrap();
        assert_eq!(
            json,
            r#"{"datas":["01/02/2024","31-01-2026"],"multa_rescisao":"três aluguéis","valor_aluguel":"R$ 1.200,00"}"#
        );
    }

    #[test]
    fn test_empty_serializes_to_empty_object() {
        let data = StructuredData::new();
        assert_eq!(data.to_json().unwrap(), "{}");
        assert!(StructuredData::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn test_single_element_list_stays_list() {
        let mut data = StructuredData::new();
        data.insert("datas", vec!["10/05/2025".to_string()]);
        let parsed = StructuredData::from_json(&data.to_json().unwrap()).unwrap();
        assert_eq!(parsed.list("datas"), Some(&["10/05/2025".to_string()][..]));
        assert_eq!(parsed.text("datas"), None);
    }

    #[test]
    fn test_malformed_json() {
        assert!(StructuredData::from_json("not json").is_err());
        assert!(StructuredData::from_json(r#"{"x": 1}"#).is_err());
        assert!(StructuredData::from_json_or_default("not json").is_empty());
    }

    #[test]
    fn test_accessors() {
        let data = sample();
        assert_eq!(data.len(), 3);
        assert_eq!(data.text("valor_aluguel"), Some("R$ 1.200,00"));
        assert!(data.get("datas").unwrap().contains("31-01-2026"));
        assert!(!data.contains_key("valor_caucao"));
        assert_eq!(
            data.fields().collect::<Vec<_>>(),
            vec!["datas", "multa_rescisao", "valor_aluguel"]
        );
    }
}
