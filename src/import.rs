use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::data::error::ImportError;
use crate::data::model::{FileRef, ImportPreview, ParseConfig, ParseOutput, ParsedRecord};
use crate::data::parser::CsvParser;
use crate::data::source::FileSource;

/// Called from the worker once a result is waiting in the channel.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

// ---------------------------------------------------------------------------
// Import handler
// ---------------------------------------------------------------------------

/// Drives one import at a time: pick a file, parse it off the UI thread,
/// then hand the first record to the display step when polled.
pub struct ImportHandler {
    source: Box<dyn FileSource>,
    parser: Arc<dyn CsvParser>,
    config: ParseConfig,
    waker: Option<Waker>,
    pending: Option<PendingImport>,
}

/// A parse running on a worker thread.
struct PendingImport {
    name: String,
    rx: Receiver<Result<ParseOutput, ImportError>>,
}

impl ImportHandler {
    pub fn new(
        source: Box<dyn FileSource>,
        parser: Arc<dyn CsvParser>,
        config: ParseConfig,
    ) -> Self {
        Self {
            source,
            parser,
            config,
            waker: None,
            pending: None,
        }
    }

    /// Wake the event loop when a parse finishes.
    pub fn with_waker(mut self, waker: Waker) -> Self {
        self.waker = Some(waker);
        self
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// React to the Import button: ask the source for a file and start
    /// parsing it. Returns as soon as the worker is running.
    pub fn handle_import(&mut self) -> Result<(), ImportError> {
        self.ensure_idle()?;
        log::info!("Getting CSV file");

        let Some(file) = self.source.pick_file() else {
            log::warn!("Import cancelled: no file selected");
            return Err(ImportError::NoFileSelected);
        };
        self.parse_csv(file)
    }

    /// Start an import for a file that did not come from the source
    /// (command line, drag and drop).
    pub fn import_file(&mut self, file: FileRef) -> Result<(), ImportError> {
        self.ensure_idle()?;
        self.parse_csv(file)
    }

    fn ensure_idle(&self) -> Result<(), ImportError> {
        match &self.pending {
            Some(pending) => {
                log::warn!("Ignoring import request: {} is still parsing", pending.name);
                Err(ImportError::ImportInProgress)
            }
            None => Ok(()),
        }
    }

    fn parse_csv(&mut self, file: FileRef) -> Result<(), ImportError> {
        let name = file.name();
        let (tx, rx) = mpsc::channel();
        let parser = Arc::clone(&self.parser);
        let config = self.config.clone();
        let waker = self.waker.clone();

        thread::Builder::new()
            .name("csv-parse".into())
            .spawn(move || {
                let result = parser.parse(&file, &config);
                // Receiver gone means the handler was dropped; nothing to report.
                let _ = tx.send(result);
                if let Some(wake) = waker {
                    wake();
                }
            })
            .map_err(|e| {
                log::error!("Failed to spawn parse worker: {e}");
                ImportError::WorkerLost { name: name.clone() }
            })?;

        log::info!("CSV parse started for {name}");
        self.pending = Some(PendingImport { name, rx });
        Ok(())
    }

    /// Deliver a finished parse, if any. Call once per frame.
    pub fn poll(&mut self) -> Option<Result<ImportPreview, ImportError>> {
        let pending = self.pending.as_ref()?;
        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(ImportError::WorkerLost {
                name: pending.name.clone(),
            }),
        };
        let pending = self.pending.take()?;
        Some(complete(pending.name, result))
    }
}

#[cfg(test)]
impl ImportHandler {
    /// Whether a parse is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Block until the in-flight parse finishes.
    pub fn wait(&mut self) -> Option<Result<ImportPreview, ImportError>> {
        let pending = self.pending.take()?;
        let result = pending.rx.recv().unwrap_or_else(|_| {
            Err(ImportError::WorkerLost {
                name: pending.name.clone(),
            })
        });
        Some(complete(pending.name, result))
    }
}

/// Completion step: runs on the polling thread once the parser is done.
fn complete(
    name: String,
    result: Result<ParseOutput, ImportError>,
) -> Result<ImportPreview, ImportError> {
    let output = result?;
    log::info!("[----] CSV parsed! {name}: {} data rows", output.row_count);
    display_record(output.first.as_ref());

    Ok(ImportPreview {
        file_name: name,
        headers: output.headers,
        row_count: output.row_count,
        first: output.first,
    })
}

// ---------------------------------------------------------------------------
// Display / log
// ---------------------------------------------------------------------------

/// Log the forwarded record.
pub fn display_record(record: Option<&ParsedRecord>) {
    log::info!("{}", record_line(record));
}

/// Human-readable log line for a record or its absence.
pub fn record_line(record: Option<&ParsedRecord>) -> String {
    match record {
        Some(r) => format!("Data: {r}"),
        None => "Data: <none>".to_string(),
    }
}
