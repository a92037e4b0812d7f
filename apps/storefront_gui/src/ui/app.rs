use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiErrorCategory, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{AppState, Route, UiAction};
use crate::ui::{cart, catalog};

pub struct StorefrontApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: AppState,
    catalog_ui: catalog::CatalogUiState,
}

impl StorefrontApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, page_size: usize) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: AppState::new(page_size),
            catalog_ui: catalog::CatalogUiState::default(),
        };
        app.apply_actions(vec![UiAction::Navigate(Route::Catalog)]);
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::ProductImageLoaded { id, image } => self.catalog_ui.image_loaded(id, image),
                UiEvent::ProductImageFailed { id } => self.catalog_ui.image_failed(id),
                other => self.state.reduce_event(other),
            }
        }
    }

    fn apply_actions(&mut self, actions: Vec<UiAction>) {
        for action in actions {
            if action == UiAction::Navigate(Route::Cart) {
                self.catalog_ui.clear_interaction();
            }
            if let Some(cmd) = self.state.reduce_action(action) {
                self.dispatch(cmd);
            }
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        match dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status) {
            None => {}
            Some(BackendCommand::FetchProductImage { id, .. }) => self.catalog_ui.image_failed(id),
            Some(rejected) => {
                let reason = self.state.status.clone();
                self.state.command_rejected(rejected, &reason);
            }
        }
    }

    fn show_top_bar(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::TopBottomPanel::top("storefront_top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Storefront");
                ui.separator();
                let on_catalog = self.state.route == Route::Catalog;
                if ui.add(egui::Button::new("Catalog").selected(on_catalog)).clicked() {
                    actions.push(UiAction::Navigate(Route::Catalog));
                }
                let cart_label = format!("Cart ({})", self.state.cart.item_count());
                if ui.add(egui::Button::new(cart_label).selected(!on_catalog)).clicked() {
                    actions.push(UiAction::Navigate(Route::Cart));
                }
            });
            if let Some(view) = self.state.catalog.as_ref() {
                ui.add_space(4.0);
                let active = view.state().active_filter();
                let enabled = !view.state().is_loading() && view.state().load_error().is_none();
                catalog::filter_bar(ui, active, enabled, actions);
            }
            ui.add_space(4.0);
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::TopBottomPanel::bottom("storefront_status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(banner) = self.state.banner.as_ref() {
                    let color = match banner.category() {
                        UiErrorCategory::Transport => egui::Color32::from_rgb(220, 160, 60),
                        UiErrorCategory::Validation | UiErrorCategory::Unknown => {
                            egui::Color32::from_rgb(200, 72, 72)
                        }
                    };
                    ui.colored_label(color, banner.message());
                    if banner.is_retryable() && ui.small_button("Retry").clicked() {
                        actions.push(UiAction::RetryLoad);
                    }
                } else {
                    ui.label(self.state.status.as_str());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(cart::cart_summary(&self.state.cart));
                });
            });
        });
    }
}

impl eframe::App for StorefrontApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut actions = Vec::new();
        self.show_top_bar(ctx, &mut actions);
        self.show_status_bar(ctx, &mut actions);

        egui::CentralPanel::default().show(ctx, |ui| match self.state.route {
            Route::Catalog => {
                if let Some(view) = self.state.catalog.as_ref() {
                    catalog::show_catalog(ui, view, &mut self.catalog_ui, &mut actions);
                }
            }
            Route::Cart => cart::show_cart(ui, &self.state.cart, &mut actions),
        });
        if self.state.route == Route::Catalog {
            catalog::zoom_window(ctx, &mut self.catalog_ui);
        }

        self.apply_actions(actions);

        if self.state.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
