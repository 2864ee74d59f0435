use crate::data::error::ImportError;
use crate::data::model::{FileRef, ImportPreview};
use crate::import::ImportHandler;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Drives imports; owns the file source and parser.
    pub handler: ImportHandler,

    /// Last successful import (None until a file has been imported).
    pub preview: Option<ImportPreview>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    pub fn new(handler: ImportHandler) -> Self {
        Self {
            handler,
            preview: None,
            status_message: None,
            loading: false,
        }
    }

    /// The Import button was clicked.
    pub fn request_import(&mut self) {
        let started = self.handler.handle_import();
        self.after_start(started);
    }

    /// A file arrived from outside the dialog (argv, drag and drop).
    pub fn import_file(&mut self, file: FileRef) {
        let started = self.handler.import_file(file);
        self.after_start(started);
    }

    fn after_start(&mut self, started: Result<(), ImportError>) {
        match started {
            Ok(()) => {
                self.loading = true;
                self.status_message = None;
            }
            // Keep showing the running import.
            Err(ImportError::ImportInProgress) => {}
            Err(e) => self.set_error(e),
        }
    }

    /// Pick up a finished import. Returns true when something changed.
    pub fn poll_import(&mut self) -> bool {
        let Some(result) = self.handler.poll() else {
            return false;
        };
        self.loading = false;
        match result {
            Ok(preview) => {
                log::info!(
                    "Imported {} with columns {:?}",
                    preview.file_name,
                    preview.headers
                );
                self.preview = Some(preview);
                self.status_message = None;
            }
            Err(e) => self.set_error(e),
        }
        true
    }

    fn set_error(&mut self, e: ImportError) {
        let e = anyhow::Error::from(e);
        log::error!("Import failed: {e:#}");
        self.status_message = Some(format!("Error: {e:#}"));
    }
}
