use std::sync::Arc;

use eframe::egui;

use crate::data::model::ParseConfig;
use crate::data::parser::ReaderParser;
use crate::data::source::DialogSource;
use crate::import::ImportHandler;
use crate::state::AppState;
use crate::ui::{panels, preview};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CsvPeekApp {
    pub state: AppState,
}

impl CsvPeekApp {
    /// Wire the native dialog and the csv parser into a fresh state.
    pub fn new(ctx: &egui::Context, config: ParseConfig) -> Self {
        let repaint = ctx.clone();
        let handler = ImportHandler::new(Box::new(DialogSource), Arc::new(ReaderParser), config)
            .with_waker(Arc::new(move || repaint.request_repaint()));
        Self {
            state: AppState::new(handler),
        }
    }
}

impl eframe::App for CsvPeekApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Finished parses and dropped files ----
        self.state.poll_import();
        panels::handle_dropped_files(ctx, &mut self.state);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: first-row preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            preview::record_preview(ui, &self.state);
        });
    }
}
