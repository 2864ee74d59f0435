use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::FileRef;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add_enabled(!state.loading, egui::Button::new("Import CSV…"))
                .clicked()
            {
                state.request_import();
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .add_enabled(!state.loading, egui::Button::new("Import CSV…"))
            .on_hover_text("Pick a CSV file and preview its first row")
            .clicked()
        {
            state.request_import();
        }

        if !state.handler.config().header {
            ui.label(RichText::new("no header row").italics());
        }

        if state.loading {
            ui.spinner();
            ui.label("Parsing…");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Drag and drop
// ---------------------------------------------------------------------------

/// Import the first file dropped onto the window, if any.
pub fn handle_dropped_files(ctx: &egui::Context, state: &mut AppState) {
    let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
    let Some(file) = dropped else {
        return;
    };

    let file_ref = match (file.path, file.bytes) {
        (Some(path), _) => FileRef::Path(path),
        (None, Some(bytes)) => FileRef::Memory {
            name: file.name,
            bytes,
        },
        (None, None) => {
            log::warn!("Dropped file {:?} has neither path nor contents", file.name);
            return;
        }
    };
    log::info!("File dropped: {}", file_ref.name());
    state.import_file(file_ref);
}
