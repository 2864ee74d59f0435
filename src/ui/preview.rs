use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::ParsedRecord;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// First-row preview (central panel)
// ---------------------------------------------------------------------------

/// Render the imported file's first row in the central panel.
pub fn record_preview(ui: &mut Ui, state: &AppState) {
    let preview = match &state.preview {
        Some(p) => p,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Import a CSV file to preview its first row  (File → Import CSV…, or drop a file here)");
            });
            return;
        }
    };

    ui.heading(&preview.file_name);
    ui.label(format!(
        "{} data rows, {} columns",
        preview.row_count,
        preview.headers.len()
    ));
    ui.separator();

    match &preview.first {
        Some(record) => record_table(ui, record),
        None => {
            ui.label(RichText::new("No data rows (header only).").italics());
        }
    }
}

fn record_table(ui: &mut Ui, record: &ParsedRecord) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Column");
            });
            header.col(|ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for (column, value) in record.iter() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(column);
                    });
                    row.col(|ui| {
                        ui.label(value);
                    });
                });
            }
            if !record.extra.is_empty() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(RichText::new("(extra)").italics());
                    });
                    row.col(|ui| {
                        ui.label(record.extra.join(", "));
                    });
                });
            }
        });
}
