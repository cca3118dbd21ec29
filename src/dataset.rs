//! Dataset types for calidad.
//!
//! Provides the [`Cell`] tagged value and the [`Dataset`] container the
//! analysis engine consumes: an ordered header list plus row records keyed
//! by header name. Rows may omit keys; an absent key is a missing value,
//! never an error.
//!
//! Loading helpers turn CSV and JSON files into a [`Dataset`]. CSV fields
//! are kept as text — classifying what a value *is* belongs to the
//! analysis engine, not the parser.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single dynamically-typed cell value.
///
/// Cells carry whatever the source format provided. JSON scalars map
/// one-to-one; CSV fields always arrive as [`Cell::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Explicit null.
    Null,
    /// Native boolean.
    Boolean(bool),
    /// Native number.
    Number(f64),
    /// Text, including text that merely looks numeric or boolean.
    Text(String),
}

impl Cell {
    /// Whether this cell counts as missing: null, empty text, or
    /// whitespace-only text.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Coerce to a finite float. Numbers pass through, text is parsed,
    /// booleans and nulls do not coerce.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Borrow the text content, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable name of the carried type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
        }
    }

    /// Deterministic token used for row fingerprinting. Type-prefixed so
    /// `Text("1")` and `Number(1.0)` never collide.
    #[must_use]
    pub fn fingerprint_token(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Boolean(b) => format!("b:{b}"),
            Self::Number(n) => format!("n:{n}"),
            Self::Text(s) => format!("s:{s}"),
        }
    }
}

/// An immutable tabular dataset: ordered headers plus row records.
///
/// # Example
///
/// ```
/// use calidad::Dataset;
///
/// let dataset = Dataset::from_csv_str("id,age\n1,30\n2,\n").unwrap();
/// assert_eq!(dataset.row_count(), 2);
/// assert_eq!(dataset.headers(), ["id", "age"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<HashMap<String, Cell>>,
}

impl Dataset {
    /// Creates a dataset from headers and row records.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<HashMap<String, Cell>>) -> Self {
        Self { headers, rows }
    }

    /// The ordered column names.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The row records.
    #[must_use]
    pub fn rows(&self) -> &[HashMap<String, Cell>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if the dataset contains no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The cell at (`row`, `header`), or `None` when the row omits the key
    /// or the index is out of bounds.
    #[must_use]
    pub fn value(&self, row: usize, header: &str) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(header))
    }

    /// Iterates one column top to bottom; `None` marks an absent key.
    pub fn column<'a>(&'a self, header: &'a str) -> impl Iterator<Item = Option<&'a Cell>> + 'a {
        self.rows.iter().map(move |row| row.get(header))
    }

    /// Loads a dataset from a path, dispatching on the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for extensions other than
    /// `csv` and `json`, and the underlying ingestion error otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Self::from_csv(path),
            "json" => Self::from_json(path),
            other => Err(Error::unsupported_format(if other.is_empty() {
                path.display().to_string()
            } else {
                other.to_string()
            })),
        }
    }

    /// Loads a dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read,
    /// [`Error::EmptyFile`] when it holds no data, and [`Error::Parse`]
    /// when the CSV reader rejects it.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        if data.trim().is_empty() {
            return Err(Error::empty_file(path));
        }
        Self::from_csv_str(&data)
    }

    /// Parses a dataset from CSV text. The first record is the header row.
    ///
    /// Records shorter than the header leave the trailing columns absent;
    /// extra fields beyond the header are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyFile`] for blank input and [`Error::Parse`]
    /// when the reader rejects a record.
    pub fn from_csv_str(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Err(Error::empty_input());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::parse(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| Error::parse(e.to_string()))?;
            let mut row = HashMap::with_capacity(headers.len());
            for (header, field) in headers.iter().zip(record.iter()) {
                row.insert(header.clone(), Cell::Text(field.to_string()));
            }
            rows.push(row);
        }

        Ok(Self::new(headers, rows))
    }

    /// Loads a dataset from a JSON file holding an array of objects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, plus the errors
    /// of [`Dataset::from_json_str`].
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        if data.trim().is_empty() {
            return Err(Error::empty_file(path));
        }
        Self::from_json_str(&data)
    }

    /// Parses a dataset from JSON text: an array of objects, one per row.
    ///
    /// Headers are the first object's keys in encounter order, extended by
    /// keys first seen in later objects. Scalar values map onto [`Cell`];
    /// nested arrays and objects are kept as their compact JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyFile`] for blank input or an empty array and
    /// [`Error::Parse`] when the input is not an array of objects.
    pub fn from_json_str(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Err(Error::empty_input());
        }

        let value: serde_json::Value =
            serde_json::from_str(data).map_err(|e| Error::parse(e.to_string()))?;
        let items = value
            .as_array()
            .ok_or_else(|| Error::parse("expected a JSON array of objects"))?;
        if items.is_empty() {
            return Err(Error::empty_input());
        }

        let mut headers: Vec<String> = Vec::new();
        let mut rows = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let object = item
                .as_object()
                .ok_or_else(|| Error::parse(format!("row {i} is not a JSON object")))?;
            let mut row = HashMap::with_capacity(object.len());
            for (key, value) in object {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
                row.insert(key.clone(), json_to_cell(value));
            }
            rows.push(row);
        }

        Ok(Self::new(headers, rows))
    }
}

fn json_to_cell(value: &serde_json::Value) -> Cell {
    match value {
        serde_json::Value::Null => Cell::Null,
        serde_json::Value::Bool(b) => Cell::Boolean(*b),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map_or_else(|| Cell::Text(n.to_string()), Cell::Number),
        serde_json::Value::String(s) => Cell::Text(s.clone()),
        nested => Cell::Text(nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_missing() {
        assert!(Cell::Null.is_missing());
        assert!(Cell::Text(String::new()).is_missing());
        assert!(Cell::Text("   ".to_string()).is_missing());
        assert!(!Cell::Text("x".to_string()).is_missing());
        assert!(!Cell::Number(0.0).is_missing());
        assert!(!Cell::Boolean(false).is_missing());
    }

    #[test]
    fn test_cell_as_f64() {
        assert_eq!(Cell::Number(1.5).as_f64(), Some(1.5));
        assert_eq!(Cell::Text("42".to_string()).as_f64(), Some(42.0));
        assert_eq!(Cell::Text(" 3.25 ".to_string()).as_f64(), Some(3.25));
        assert_eq!(Cell::Text("abc".to_string()).as_f64(), None);
        assert_eq!(Cell::Boolean(true).as_f64(), None);
        assert_eq!(Cell::Null.as_f64(), None);
        assert_eq!(Cell::Number(f64::INFINITY).as_f64(), None);
    }

    #[test]
    fn test_cell_fingerprint_tokens_distinct_by_type() {
        assert_ne!(
            Cell::Text("1".to_string()).fingerprint_token(),
            Cell::Number(1.0).fingerprint_token()
        );
        assert_ne!(
            Cell::Text("true".to_string()).fingerprint_token(),
            Cell::Boolean(true).fingerprint_token()
        );
    }

    #[test]
    fn test_from_csv_str() {
        let dataset = Dataset::from_csv_str("id,name\n1,ana\n2,bruno\n").unwrap();
        assert_eq!(dataset.headers(), ["id", "name"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(
            dataset.value(0, "name"),
            Some(&Cell::Text("ana".to_string()))
        );
        // CSV fields always arrive as text
        assert_eq!(dataset.value(1, "id"), Some(&Cell::Text("2".to_string())));
    }

    #[test]
    fn test_from_csv_str_short_record() {
        let dataset = Dataset::from_csv_str("a,b,c\n1,2\n").unwrap();
        assert_eq!(dataset.value(0, "c"), None);
    }

    #[test]
    fn test_from_csv_str_empty() {
        assert!(matches!(
            Dataset::from_csv_str("  \n "),
            Err(Error::EmptyFile { .. })
        ));
    }

    #[test]
    fn test_from_json_str() {
        let dataset =
            Dataset::from_json_str(r#"[{"id": 1, "ok": true}, {"id": null, "extra": "x"}]"#)
                .unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert!(dataset.headers().contains(&"extra".to_string()));
        assert_eq!(dataset.value(0, "id"), Some(&Cell::Number(1.0)));
        assert_eq!(dataset.value(0, "ok"), Some(&Cell::Boolean(true)));
        assert_eq!(dataset.value(1, "id"), Some(&Cell::Null));
        assert_eq!(dataset.value(0, "extra"), None);
    }

    #[test]
    fn test_from_json_str_nested_kept_as_text() {
        let dataset = Dataset::from_json_str(r#"[{"tags": ["a", "b"]}]"#).unwrap();
        assert_eq!(
            dataset.value(0, "tags"),
            Some(&Cell::Text("[\"a\",\"b\"]".to_string()))
        );
    }

    #[test]
    fn test_from_json_str_not_an_array() {
        assert!(matches!(
            Dataset::from_json_str(r#"{"id": 1}"#),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_from_json_str_empty_array() {
        assert!(matches!(
            Dataset::from_json_str("[]"),
            Err(Error::EmptyFile { .. })
        ));
    }

    #[test]
    fn test_from_path_unsupported() {
        assert!(matches!(
            Dataset::from_path("data.parquet"),
            Err(Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_column_iterator() {
        let dataset = Dataset::from_csv_str("x\n1\n2\n3\n").unwrap();
        let values: Vec<_> = dataset.column("x").collect();
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(Option::is_some));
        assert!(dataset.column("missing").all(|v| v.is_none()));
    }
}
