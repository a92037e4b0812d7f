//! Backend commands queued from UI to backend worker.

use shared::domain::ProductId;
use storefront_core::LoadHandle;

pub enum BackendCommand {
    /// Fetch the catalog for the view that owns `handle`.
    LoadCatalog { handle: LoadHandle },
    FetchProductImage { id: ProductId, url: String },
}
