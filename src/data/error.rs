use thiserror::Error;

/// Everything that can go wrong between the Import click and the preview.
///
/// All variants are recoverable: they end up in the status line and the
/// log, and the window keeps running.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no file selected")]
    NoFileSelected,

    #[error("an import is already in progress")]
    ImportInProgress,

    #[error("failed to read {name}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {name}{}", line_suffix(.line))]
    Parse {
        name: String,
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },

    #[error("{name} is empty (no header row)")]
    EmptyFile { name: String },

    #[error("parse worker for {name} exited without a result")]
    WorkerLost { name: String },
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl ImportError {
    /// Split a `csv::Error` into a read failure or a parse failure.
    pub fn from_csv(name: &str, err: csv::Error) -> Self {
        let io_kind = match err.kind() {
            csv::ErrorKind::Io(io) => Some(io.kind()),
            _ => None,
        };
        if let Some(kind) = io_kind {
            return ImportError::Read {
                name: name.to_string(),
                source: std::io::Error::new(kind, err),
            };
        }
        ImportError::Parse {
            name: name.to_string(),
            line: err.position().map(|p| p.line()),
            source: err,
        }
    }
}
