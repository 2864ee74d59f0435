use std::fmt;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FileRef – the file a user asked to import
// ---------------------------------------------------------------------------

/// Handle to a user-selected file. Lives for the duration of one import.
#[derive(Debug, Clone)]
pub enum FileRef {
    /// A file on the local filesystem (dialog, command line, dropped path).
    Path(PathBuf),
    /// File contents delivered directly, e.g. a drop on a platform without paths.
    Memory { name: String, bytes: Arc<[u8]> },
}

impl FileRef {
    /// Short name used in log lines and the preview heading.
    pub fn name(&self) -> String {
        match self {
            FileRef::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            FileRef::Memory { name, .. } => name.clone(),
        }
    }

    /// Open the file for reading.
    pub fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        match self {
            FileRef::Path(path) => Ok(Box::new(std::fs::File::open(path)?)),
            FileRef::Memory { bytes, .. } => Ok(Box::new(Cursor::new(Arc::clone(bytes)))),
        }
    }
}

// ---------------------------------------------------------------------------
// ParseConfig
// ---------------------------------------------------------------------------

/// Options handed to the CSV parser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Treat the first row as field names.
    pub header: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self { header: true }
    }
}

// ---------------------------------------------------------------------------
// ParsedRecord – one data row
// ---------------------------------------------------------------------------

/// One data row as an ordered header → value mapping.
///
/// Column order follows the file. Duplicate headers are kept in order;
/// [`ParsedRecord::get`] returns the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecord {
    fields: Vec<(String, String)>,
    /// Values beyond the last header (ragged rows).
    pub extra: Vec<String>,
}

impl ParsedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.fields.push((header.into(), value.into()));
    }

    /// Value of the first field named `header`.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate `(header, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

#[cfg(test)]
impl ParsedRecord {
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Serializes as a JSON-style object in column order. Surplus values
/// appear under `__parsed_extra`.
impl Serialize for ParsedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.fields.len() + usize::from(!self.extra.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        for (header, value) in &self.fields {
            map.serialize_entry(header, value)?;
        }
        if !self.extra.is_empty() {
            map.serialize_entry("__parsed_extra", &self.extra)?;
        }
        map.end()
    }
}

impl fmt::Display for ParsedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

// ---------------------------------------------------------------------------
// Parser output and import result
// ---------------------------------------------------------------------------

/// What the parser hands back for one file: the header row, the first
/// data row, and how many data rows there were in total.
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    pub headers: Vec<String>,
    pub first: Option<ParsedRecord>,
    pub row_count: usize,
}

/// Result of a completed import, as shown in the window.
#[derive(Debug, Clone)]
pub struct ImportPreview {
    pub file_name: String,
    pub headers: Vec<String>,
    /// Number of data rows (header row excluded).
    pub row_count: usize,
    /// First data row; `None` for a header-only file.
    pub first: Option<ParsedRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> ParsedRecord {
        let mut r = ParsedRecord::new();
        for (h, v) in pairs {
            r.push(*h, *v);
        }
        r
    }

    #[test]
    fn display_keeps_column_order() {
        let r = record(&[("b", "2"), ("a", "1")]);
        assert_eq!(r.to_string(), r#"{"b":"2","a":"1"}"#);
    }

    #[test]
    fn display_includes_surplus_values() {
        let mut r = record(&[("a", "1")]);
        r.extra = vec!["x".into(), "y".into()];
        assert_eq!(r.to_string(), r#"{"a":"1","__parsed_extra":["x","y"]}"#);
    }

    #[test]
    fn get_returns_first_duplicate() {
        let r = record(&[("id", "1"), ("id", "2")]);
        assert_eq!(r.get("id"), Some("1"));
        assert_eq!(r.get("missing"), None);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn file_ref_names() {
        let p = FileRef::Path(PathBuf::from("/tmp/some/teachers.csv"));
        assert_eq!(p.name(), "teachers.csv");

        let m = FileRef::Memory {
            name: "dropped.csv".into(),
            bytes: Arc::from(&b"a,b\n"[..]),
        };
        assert_eq!(m.name(), "dropped.csv");
    }

    #[test]
    fn memory_ref_reads_its_bytes() {
        let m = FileRef::Memory {
            name: "m.csv".into(),
            bytes: Arc::from(&b"a,b\n1,2\n"[..]),
        };
        let mut text = String::new();
        m.open().unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "a,b\n1,2\n");
    }

    #[test]
    fn config_defaults_to_header_row() {
        assert!(ParseConfig::default().header);
        let cfg: ParseConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.header);
        let cfg: ParseConfig = serde_json::from_str(r#"{"header":false}"#).unwrap();
        assert!(!cfg.header);
    }
}
