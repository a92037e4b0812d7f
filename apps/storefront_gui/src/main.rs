mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use storefront_core::{load_settings, Settings};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::StorefrontApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop storefront catalog")]
struct Args {
    #[arg(long)]
    catalog_url: Option<String>,
    #[arg(long)]
    page_size: Option<usize>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    let mut settings = match load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("failed to load settings, using defaults: {err}");
            Settings::default()
        }
    };
    if let Some(url) = args.catalog_url {
        settings.catalog_url = url;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if let Err(err) = settings.validate() {
        tracing::error!("invalid settings, using defaults: {err}");
        let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
            UiErrorContext::General,
            format!("invalid settings ({err}); using defaults"),
        )));
        settings = Settings::default();
    }

    let page_size = settings.page_size;
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Storefront")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Storefront",
        options,
        Box::new(move |_cc| Ok(Box::new(StorefrontApp::new(cmd_tx, ui_rx, page_size)))),
    )
}
