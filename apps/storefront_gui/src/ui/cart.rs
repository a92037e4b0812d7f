use eframe::egui;
use storefront_core::Cart;

use crate::controller::reducer::{Route, UiAction};

pub fn cart_summary(cart: &Cart) -> String {
    match cart.item_count() {
        0 => "Cart is empty".to_string(),
        1 => format!("1 item · ${:.2}", cart.total()),
        n => format!("{n} items · ${:.2}", cart.total()),
    }
}

pub fn show_cart(ui: &mut egui::Ui, cart: &Cart, actions: &mut Vec<UiAction>) {
    ui.heading("Cart");
    ui.add_space(8.0);
    if cart.is_empty() {
        ui.label("Your cart is empty.");
        if ui.button("Browse the catalog").clicked() {
            actions.push(UiAction::Navigate(Route::Catalog));
        }
        return;
    }

    egui::Grid::new("cart_lines")
        .num_columns(5)
        .striped(true)
        .spacing([16.0, 8.0])
        .show(ui, |ui| {
            for line in cart.lines() {
                let id = line.product.id;
                ui.label(line.product.title.as_str());
                ui.label(format!("${:.2}", line.product.price));
                ui.horizontal(|ui| {
                    if ui.small_button("−").clicked() {
                        actions.push(UiAction::CartDecrement(id));
                    }
                    ui.label(line.qty.to_string());
                    if ui.small_button("+").clicked() {
                        actions.push(UiAction::CartIncrement(id));
                    }
                });
                ui.label(format!("${:.2}", line.product.price * f64::from(line.qty)));
                if ui.small_button("Remove").clicked() {
                    actions.push(UiAction::CartRemove(id));
                }
                ui.end_row();
            }
        });

    ui.separator();
    ui.label(egui::RichText::new(cart_summary(cart)).strong());
}
