use super::model::FileRef;

/// Where the Import action gets its file from.
pub trait FileSource {
    /// Ask for one file. `None` when the user picked nothing.
    fn pick_file(&mut self) -> Option<FileRef>;
}

// ---------------------------------------------------------------------------
// Native file dialog
// ---------------------------------------------------------------------------

/// Native "open file" dialog, filtered to CSV.
#[derive(Debug, Default)]
pub struct DialogSource;

impl FileSource for DialogSource {
    fn pick_file(&mut self) -> Option<FileRef> {
        rfd::FileDialog::new()
            .set_title("Import CSV")
            .add_filter("CSV", &["csv"])
            .add_filter("All files", &["*"])
            .pick_file()
            .map(FileRef::Path)
    }
}
