//! Catalog screen: filter bar, card grid, pagination bar and the zoom window.
//! Hover, zoom and image textures are presentation only and stay here.

use std::collections::HashMap;

use eframe::egui;
use shared::domain::{CategoryTag, Product, ProductId};
use storefront_core::{CatalogView, PageButton, PaginationBar, ProductCard};

use crate::controller::events::ProductImage;
use crate::controller::reducer::UiAction;

const CARD_WIDTH: f32 = 220.0;
const THUMBNAIL_HEIGHT: f32 = 160.0;
const ZOOM_IMAGE_SIZE: f32 = 480.0;
const GRID_COLUMNS: usize = 4;

const IN_STOCK_COLOR: egui::Color32 = egui::Color32::from_rgb(64, 160, 96);
const OUT_OF_STOCK_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 72, 72);

enum ImageSlot {
    Pending,
    Decoded(ProductImage),
    Ready(egui::TextureHandle),
    Failed,
}

#[derive(Default)]
pub struct CatalogUiState {
    selected_variants: HashMap<ProductId, String>,
    hovered: Option<ProductId>,
    zoomed: Option<Product>,
    images: HashMap<ProductId, ImageSlot>,
}

impl CatalogUiState {
    /// Drops hover, zoom and variant choices. Cached images survive.
    pub fn clear_interaction(&mut self) {
        self.selected_variants.clear();
        self.hovered = None;
        self.zoomed = None;
    }

    /// Marks the image as requested. `true` when a fetch should be issued.
    pub fn request_image(&mut self, product: &Product) -> bool {
        if product.image.is_empty() || self.images.contains_key(&product.id) {
            return false;
        }
        self.images.insert(product.id, ImageSlot::Pending);
        true
    }

    pub fn image_loaded(&mut self, id: ProductId, image: ProductImage) {
        self.images.insert(id, ImageSlot::Decoded(image));
    }

    pub fn image_failed(&mut self, id: ProductId) {
        self.images.insert(id, ImageSlot::Failed);
    }

    fn image_pending(&self, id: ProductId) -> bool {
        matches!(
            self.images.get(&id),
            Some(ImageSlot::Pending | ImageSlot::Decoded(_))
        )
    }

    /// Uploads decoded pixels on first use.
    fn texture(&mut self, ctx: &egui::Context, id: ProductId) -> Option<egui::TextureHandle> {
        let slot = self.images.get_mut(&id)?;
        let uploaded = match &*slot {
            ImageSlot::Decoded(image) => Some(ctx.load_texture(
                format!("product_image_{}", id.0),
                egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba),
                egui::TextureOptions::LINEAR,
            )),
            _ => None,
        };
        if let Some(texture) = uploaded {
            *slot = ImageSlot::Ready(texture);
        }
        match &*slot {
            ImageSlot::Ready(texture) => Some(texture.clone()),
            _ => None,
        }
    }
}

pub fn filter_bar(ui: &mut egui::Ui, active: CategoryTag, enabled: bool, actions: &mut Vec<UiAction>) {
    ui.horizontal_wrapped(|ui| {
        for tag in CategoryTag::ALL {
            let button = egui::Button::new(tag.label()).selected(tag == active);
            if ui.add_enabled(enabled, button).clicked() {
                actions.push(UiAction::SelectFilter(tag));
            }
        }
    });
}

pub fn show_catalog(
    ui: &mut egui::Ui,
    view: &CatalogView,
    local: &mut CatalogUiState,
    actions: &mut Vec<UiAction>,
) {
    let state = view.state();
    if state.is_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading catalog…");
        });
        return;
    }
    if let Some(error) = state.load_error() {
        ui.colored_label(OUT_OF_STOCK_COLOR, format!("Could not load the catalog: {}", error.message));
        if ui.button("Retry").clicked() {
            actions.push(UiAction::RetryLoad);
        }
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            product_grid(ui, &view.cards(), local, actions);
            if let Some(bar) = state.pagination_bar() {
                ui.add_space(12.0);
                pagination_bar(ui, &bar, actions);
            }
        });
}

fn product_grid(
    ui: &mut egui::Ui,
    cards: &[ProductCard],
    local: &mut CatalogUiState,
    actions: &mut Vec<UiAction>,
) {
    if cards.is_empty() {
        ui.label("No products match this filter.");
        return;
    }

    let mut hovered = None;
    egui::Grid::new("product_grid")
        .num_columns(GRID_COLUMNS)
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (index, card) in cards.iter().enumerate() {
                let mut card = card.clone();
                let id = card.product().id;
                if let Some(variant) = local.selected_variants.get(&id) {
                    card.select_variant(variant);
                }
                if local.request_image(card.product()) {
                    actions.push(UiAction::FetchImage {
                        id,
                        url: card.product().image.clone(),
                    });
                }
                let thumbnail = Thumbnail {
                    texture: local.texture(ui.ctx(), id),
                    pending: local.image_pending(id),
                };

                let is_hovered = local.hovered == Some(id);
                let stroke = if is_hovered {
                    ui.visuals().selection.stroke
                } else {
                    ui.visuals().widgets.noninteractive.bg_stroke
                };
                let framed = egui::Frame::group(ui.style())
                    .stroke(stroke)
                    .show(ui, |ui| product_card(ui, &mut card, &thumbnail, is_hovered, actions));
                if framed.response.contains_pointer() {
                    hovered = Some(id);
                }
                if framed.inner {
                    local.zoomed = Some(card.product().clone());
                }
                if let Some(variant) = card.selected_variant() {
                    local.selected_variants.insert(id, variant.to_string());
                }

                if (index + 1) % GRID_COLUMNS == 0 {
                    ui.end_row();
                }
            }
        });
    local.hovered = hovered;
}

struct Thumbnail {
    texture: Option<egui::TextureHandle>,
    pending: bool,
}

/// Returns `true` when the image or the zoom button was clicked.
fn product_card(
    ui: &mut egui::Ui,
    card: &mut ProductCard,
    thumbnail: &Thumbnail,
    hovered: bool,
    actions: &mut Vec<UiAction>,
) -> bool {
    let product = card.product().clone();
    let mut zoom = false;
    ui.set_width(CARD_WIDTH);
    ui.vertical(|ui| {
        let thumb_size = egui::vec2(CARD_WIDTH, THUMBNAIL_HEIGHT);
        match thumbnail.texture.as_ref() {
            Some(texture) => {
                let image = egui::Image::new(texture).max_size(thumb_size);
                let response = ui
                    .add_sized(thumb_size, egui::Button::image(image).frame(false))
                    .on_hover_text("Click to zoom");
                if response.clicked() {
                    zoom = true;
                }
            }
            None if thumbnail.pending => {
                ui.add_sized(thumb_size, egui::Spinner::new());
            }
            None => {
                ui.add_sized(thumb_size, egui::Label::new("No image"));
            }
        }
        ui.add(egui::Label::new(egui::RichText::new(product.title.as_str()).strong()).wrap());
        ui.small(product.category.as_str());
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(card.price_label()).size(18.0));
            let color = if card.in_stock() {
                IN_STOCK_COLOR
            } else {
                OUT_OF_STOCK_COLOR
            };
            ui.colored_label(color, card.stock_label());
        });

        let variants = card.variants().to_vec();
        if !variants.is_empty() {
            let mut selected = card.selected_variant().unwrap_or_default().to_string();
            egui::ComboBox::from_id_salt(("variant", product.id.0))
                .selected_text(selected.clone())
                .show_ui(ui, |ui| {
                    for variant in &variants {
                        ui.selectable_value(&mut selected, variant.clone(), variant.as_str());
                    }
                });
            card.select_variant(&selected);
        }

        ui.horizontal(|ui| {
            if ui
                .add_enabled(card.can_add_to_cart(), egui::Button::new("Add to cart"))
                .clicked()
            {
                actions.push(UiAction::AddToCart(product.id));
            }
            let zoom_label = if hovered { "🔍 Zoom" } else { "Zoom" };
            if ui.button(zoom_label).clicked() {
                zoom = true;
            }
        });
    });
    zoom
}

pub fn pagination_bar(ui: &mut egui::Ui, bar: &PaginationBar, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        if ui
            .add_enabled(bar.previous_enabled(), egui::Button::new("Previous"))
            .clicked()
        {
            actions.push(UiAction::PreviousPage);
        }
        for button in &bar.buttons {
            match button {
                PageButton::Page { number, active } => {
                    let page = egui::Button::new(number.to_string()).selected(*active);
                    if ui.add(page).clicked() && !*active {
                        actions.push(UiAction::GoToPage(*number));
                    }
                }
                PageButton::Ellipsis => {
                    ui.label("…");
                }
            }
        }
        if ui
            .add_enabled(bar.next_enabled(), egui::Button::new("Next"))
            .clicked()
        {
            actions.push(UiAction::NextPage);
        }
    });
}

pub fn zoom_window(ctx: &egui::Context, local: &mut CatalogUiState) {
    let Some(product) = local.zoomed.clone() else {
        return;
    };
    let texture = local.texture(ctx, product.id);
    let pending = local.image_pending(product.id);
    let mut open = true;
    egui::Window::new(product.title.as_str())
        .id(egui::Id::new("product_zoom"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            let zoom_size = egui::vec2(ZOOM_IMAGE_SIZE, ZOOM_IMAGE_SIZE);
            match texture.as_ref() {
                Some(texture) => {
                    ui.add(egui::Image::new(texture).max_size(zoom_size));
                }
                None if pending => {
                    ui.add_sized(zoom_size, egui::Spinner::new());
                }
                None => {
                    ui.label("Image unavailable.");
                }
            }
            ui.separator();
            ui.label(format!("Category: {}", product.category));
            ui.label(format!("Price: ${}", product.price));
            let (color, label) = if product.in_stock {
                (IN_STOCK_COLOR, "In Stock")
            } else {
                (OUT_OF_STOCK_COLOR, "Out of Stock")
            };
            ui.colored_label(color, label);
            if !product.variants.is_empty() {
                ui.label(format!("Options: {}", product.variants.join(", ")));
            }
        });
    if !open {
        local.zoomed = None;
    }
}
