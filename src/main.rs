mod app;
mod data;
mod import;
mod state;
mod ui;

use std::path::PathBuf;

use app::CsvPeekApp;
use data::model::{FileRef, ParseConfig};
use eframe::egui;

/// Command-line options: `csv-peek [--no-header] [FILE]`.
#[derive(Debug, Default, PartialEq)]
struct Args {
    config: ParseConfig,
    file: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Args {
    let mut parsed = Args::default();
    for arg in args {
        match arg.as_str() {
            "--no-header" => parsed.config.header = false,
            flag if flag.starts_with("--") => log::warn!("Ignoring unknown flag {flag}"),
            _ => parsed.file = Some(PathBuf::from(&arg)),
        }
    }
    parsed
}

fn main() -> eframe::Result {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = parse_args(std::env::args().skip(1));
    log::info!("csv-peek starting (header row: {})", args.config.header);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "csv-peek – CSV Import Preview",
        options,
        Box::new(move |cc| {
            let mut app = CsvPeekApp::new(&cc.egui_ctx, args.config);
            if let Some(path) = args.file {
                app.state.import_file(FileRef::Path(path));
            }
            Ok(Box::new(app))
        }),
    )
}
