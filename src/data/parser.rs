use csv::{ReaderBuilder, StringRecord};

use super::error::ImportError;
use super::model::{FileRef, ParseConfig, ParseOutput, ParsedRecord};

// ---------------------------------------------------------------------------
// Parser seam
// ---------------------------------------------------------------------------

/// Anything that can turn a file into parsed records.
///
/// Called on a worker thread, hence `Send + Sync`.
pub trait CsvParser: Send + Sync {
    fn parse(&self, file: &FileRef, config: &ParseConfig) -> Result<ParseOutput, ImportError>;
}

// ---------------------------------------------------------------------------
// csv crate implementation
// ---------------------------------------------------------------------------

/// Production parser backed by `csv::Reader`.
///
/// Rows may be shorter or longer than the header row: missing trailing
/// fields are left out of the record, surplus values go to
/// [`ParsedRecord::extra`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ReaderParser;

impl CsvParser for ReaderParser {
    fn parse(&self, file: &FileRef, config: &ParseConfig) -> Result<ParseOutput, ImportError> {
        let name = file.name();
        let input = file.open().map_err(|source| ImportError::Read {
            name: name.clone(),
            source,
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(config.header)
            .flexible(true)
            .from_reader(input);

        let mut headers: Vec<String> = Vec::new();
        if config.header {
            let row = reader
                .headers()
                .map_err(|e| ImportError::from_csv(&name, e))?;
            if row.is_empty() {
                return Err(ImportError::EmptyFile { name });
            }
            headers = row.iter().map(str::to_string).collect();
        }

        // Only the first row becomes a record; the rest are validated and counted.
        let mut row = StringRecord::new();
        let mut first = None;
        let mut row_count = 0;
        let mut width = headers.len();
        while reader
            .read_record(&mut row)
            .map_err(|e| ImportError::from_csv(&name, e))?
        {
            row_count += 1;
            width = width.max(row.len());
            if config.header && row.len() > headers.len() {
                log::warn!(
                    "{name}: row at line {} has {} values for {} columns",
                    row.position().map_or(0, |p| p.line()),
                    row.len(),
                    headers.len()
                );
            }
            if first.is_none() {
                first = Some(if config.header {
                    build_record(&headers, &row)
                } else {
                    build_record(&index_headers(row.len()), &row)
                });
            }
        }

        if !config.header {
            if row_count == 0 {
                return Err(ImportError::EmptyFile { name });
            }
            headers = index_headers(width);
        }

        log::debug!("{name}: {} columns, {row_count} data rows", headers.len());
        Ok(ParseOutput {
            headers,
            first,
            row_count,
        })
    }
}

/// Zero-based column indices used as keys without a header row.
fn index_headers(width: usize) -> Vec<String> {
    (0..width).map(|i| i.to_string()).collect()
}

/// Pair each value with its header.
fn build_record(headers: &[String], row: &StringRecord) -> ParsedRecord {
    let mut record = ParsedRecord::new();
    for (i, value) in row.iter().enumerate() {
        match headers.get(i) {
            Some(header) => record.push(header.as_str(), value),
            None => record.extra.push(value.to_string()),
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use super::*;

    fn mem(text: &str) -> FileRef {
        FileRef::Memory {
            name: "test.csv".into(),
            bytes: Arc::from(text.as_bytes()),
        }
    }

    fn parse(text: &str) -> Result<ParseOutput, ImportError> {
        ReaderParser.parse(&mem(text), &ParseConfig::default())
    }

    #[test]
    fn header_and_one_row() {
        let out = parse("a,b\n1,2\n").unwrap();
        assert_eq!(out.headers, vec!["a", "b"]);
        assert_eq!(out.row_count, 1);
        let first = out.first.unwrap();
        assert_eq!(first.get("a"), Some("1"));
        assert_eq!(first.get("b"), Some("2"));
        assert!(first.extra.is_empty());
    }

    #[test]
    fn header_only_has_no_data() {
        let out = parse("a,b\n").unwrap();
        assert_eq!(out.headers, vec!["a", "b"]);
        assert_eq!(out.row_count, 0);
        assert!(out.first.is_none());
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(parse(""), Err(ImportError::EmptyFile { .. })));
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let out = parse("name,note\n\"Doe, Jane\",\"said \"\"hi\"\"\"\n").unwrap();
        let first = out.first.unwrap();
        assert_eq!(first.get("name"), Some("Doe, Jane"));
        assert_eq!(first.get("note"), Some("said \"hi\""));
    }

    #[test]
    fn short_first_row_leaves_fields_out() {
        let out = parse("a,b\n1\n1,2,3\n").unwrap();
        assert_eq!(out.row_count, 2);

        let first = out.first.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first.get("a"), Some("1"));
        assert_eq!(first.get("b"), None);
    }

    #[test]
    fn long_first_row_keeps_surplus_values() {
        let out = parse("a,b\n1,2,3\n4,5\n").unwrap();
        assert_eq!(out.row_count, 2);

        let first = out.first.unwrap();
        assert_eq!(first.get("b"), Some("2"));
        assert_eq!(first.extra, vec!["3"]);
    }

    #[test]
    fn later_rows_are_counted_not_kept() {
        let out = parse("id,name\n1,Ada\n2,Grace\n3,Alan\n").unwrap();
        assert_eq!(out.row_count, 3);
        assert_eq!(out.first.unwrap().get("name"), Some("Ada"));
    }

    #[test]
    fn malformed_later_row_still_fails() {
        let file = FileRef::Memory {
            name: "late.csv".into(),
            bytes: Arc::from(&b"a,b\n1,2\n\xff,3\n"[..]),
        };
        let err = ReaderParser.parse(&file, &ParseConfig::default()).unwrap_err();
        assert!(matches!(err, ImportError::Parse { .. }));
    }

    #[test]
    fn without_header_columns_are_indexed() {
        let cfg = ParseConfig { header: false };
        let out = ReaderParser.parse(&mem("x,y\n1,2,3\n"), &cfg).unwrap();
        assert_eq!(out.headers, vec!["0", "1", "2"]);
        assert_eq!(out.row_count, 2);

        let first = out.first.unwrap();
        assert_eq!(first.get("0"), Some("x"));
        assert_eq!(first.get("1"), Some("y"));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn without_header_empty_input_is_an_error() {
        let cfg = ParseConfig { header: false };
        let err = ReaderParser.parse(&mem(""), &cfg).unwrap_err();
        assert!(matches!(err, ImportError::EmptyFile { .. }));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let file = FileRef::Memory {
            name: "bin.csv".into(),
            bytes: Arc::from(&b"a,b\n\xff,2\n"[..]),
        };
        let err = ReaderParser.parse(&file, &ParseConfig::default()).unwrap_err();
        assert!(matches!(err, ImportError::Parse { .. }));
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teachers.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "name,subject").unwrap();
        writeln!(f, "Ada,Math").unwrap();
        writeln!(f, "Linus,Physics").unwrap();
        drop(f);

        let out = ReaderParser
            .parse(&FileRef::Path(path), &ParseConfig::default())
            .unwrap();
        assert_eq!(out.row_count, 2);
        assert_eq!(out.first.unwrap().get("name"), Some("Ada"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = FileRef::Path(dir.path().join("nope.csv"));
        let err = ReaderParser.parse(&file, &ParseConfig::default()).unwrap_err();
        assert!(matches!(err, ImportError::Read { .. }));
        assert_eq!(err.to_string(), "failed to read nope.csv");
    }
}
