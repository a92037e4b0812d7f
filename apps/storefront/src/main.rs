use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use shared::{domain::Product, protocol::CartAction};
use storefront_core::{
    load_settings, AddToCartOutcome, ApplyOutcome, Cart, CartDispatcher, CatalogView,
    HttpCatalogSource, ProductCard, SimulatedStock,
};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(about = "Browse the storefront catalog from the terminal")]
struct Args {
    /// Category filter: all, "men's clothing", "women's clothing", jewelery, electronics.
    #[arg(long, default_value = "all")]
    category: String,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long)]
    catalog_url: Option<String>,
    #[arg(long)]
    page_size: Option<usize>,
    /// Product id to add to the cart; repeatable.
    #[arg(long = "add-to-cart")]
    add_to_cart: Vec<i64>,
    #[arg(long)]
    json: bool,
}

/// Cart that also remembers what was dispatched to it.
#[derive(Default)]
struct RecordingCart {
    cart: Cart,
    dispatched: Vec<CartAction>,
}

impl CartDispatcher for RecordingCart {
    fn dispatch(&mut self, action: CartAction) {
        self.cart.apply(&action);
        self.dispatched.push(action);
    }
}

#[derive(Serialize)]
struct PageReport<'a> {
    filter: &'static str,
    page: usize,
    total_pages: usize,
    products: &'a [Product],
    cart_actions: &'a [CartAction],
    cart_items: u32,
    cart_total: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load storefront settings")?;
    if let Some(url) = args.catalog_url.clone() {
        settings.catalog_url = url;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    settings.validate().context("invalid storefront settings")?;

    let source = HttpCatalogSource::from_settings(&settings)
        .context("failed to build catalog http client")?;
    let mut view = CatalogView::mount(settings.page_size);

    match view
        .load_from(&source, &SimulatedStock, &settings.retry_policy())
        .await
    {
        Some(ApplyOutcome::Applied { products }) => {
            tracing::info!(products, endpoint = source.endpoint(), "catalog ready");
        }
        Some(ApplyOutcome::Failed) => {
            let reason = view
                .state()
                .load_error()
                .map(|err| err.message.clone())
                .unwrap_or_else(|| "unknown error".to_string());
            bail!("could not load catalog from {}: {reason}", source.endpoint());
        }
        Some(ApplyOutcome::Discarded) | None => bail!("catalog load was not applied"),
    }

    view.select_filter_tag(&args.category);
    view.go_to_page(args.page);

    let mut cart = RecordingCart::default();
    for id in &args.add_to_cart {
        let Some(product) = view.state().products().iter().find(|p| p.id.0 == *id) else {
            eprintln!("no product with id {id}");
            continue;
        };
        let card = ProductCard::new(product.clone());
        match card.add_to_cart(&mut cart) {
            AddToCartOutcome::Added => eprintln!("added #{id} to cart"),
            AddToCartOutcome::Unavailable => eprintln!("#{id} is out of stock; not added"),
        }
    }

    let state = view.state();
    if args.json {
        let report = PageReport {
            filter: state.active_filter().as_str(),
            page: state.page(),
            total_pages: state.total_pages(),
            products: state.visible_products(),
            cart_actions: &cart.dispatched,
            cart_items: cart.cart.item_count(),
            cart_total: cart.cart.total(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::page(state, &view.cards()));
        if !cart.cart.is_empty() {
            println!(
                "Cart: {} item(s), ${:.2}",
                cart.cart.item_count(),
                cart.cart.total()
            );
        }
    }

    Ok(())
}
