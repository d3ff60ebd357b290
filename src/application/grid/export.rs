//! CSV export of grid rows

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::AppResult;

/// One CSV column: header label and dotted path into the row object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportField {
    pub label: String,
    pub value: String,
}

impl ExportField {
    /// A column labelled with its own path.
    pub fn new(path: impl Into<String>) -> Self {
        let value = path.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    pub fn labeled(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: path.into(),
        }
    }
}

impl From<&str> for ExportField {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub fields: Vec<ExportField>,
}

impl ExportOptions {
    pub fn new<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<ExportField>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Serialize JSON rows to CSV: a header row of labels, then one record per
/// row with the field values in order.
pub fn rows_to_csv(fields: &[ExportField], rows: &[Value]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(fields.iter().map(|f| f.label.as_str()))?;

    for row in rows {
        writer.write_record(fields.iter().map(|f| cell(lookup(row, &f.value))))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn lookup<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(row, |value, key| match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
