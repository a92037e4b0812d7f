//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use shared::{
    domain::ProductId,
    error::{ApiError, ErrorCode},
};
use storefront_core::{
    fetch_catalog, HttpCatalogSource, LoadHandle, RetryPolicy, Settings, SimulatedStock,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{ProductImage, UiError, UiErrorContext, UiEvent};

/// Longest edge of a decoded product image; the zoom window shows it at this size.
const MAX_IMAGE_DIMENSION: u32 = 480;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let reason = format!("backend worker startup failure: failed to build runtime: {err}");
                startup_failed(&cmd_rx, &ui_tx, &reason);
                return;
            }
        };

        let source = match HttpCatalogSource::from_settings(&settings) {
            Ok(source) => Arc::new(source),
            Err(err) => {
                let reason = format!("backend worker startup failure: invalid catalog client: {err}");
                startup_failed(&cmd_rx, &ui_tx, &reason);
                return;
            }
        };
        let images = match reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()
        {
            Ok(http) => http,
            Err(err) => {
                let reason = format!("backend worker startup failure: invalid image client: {err}");
                startup_failed(&cmd_rx, &ui_tx, &reason);
                return;
            }
        };
        let retry = settings.retry_policy();
        tracing::info!(endpoint = source.endpoint(), "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Catalog source: {}",
            source.endpoint()
        )));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::LoadCatalog { handle } => {
                    let source = Arc::clone(&source);
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(load_catalog(source, retry, handle, ui_tx));
                }
                BackendCommand::FetchProductImage { id, url } => {
                    runtime.spawn(fetch_product_image(images.clone(), id, url, ui_tx.clone()));
                }
            }
        }
        tracing::debug!("ui command queue closed; backend worker exiting");
    });
}

fn startup_failed(cmd_rx: &Receiver<BackendCommand>, ui_tx: &Sender<UiEvent>, reason: &str) {
    tracing::error!("{reason}");
    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
        UiErrorContext::BackendStartup,
        reason,
    )));
    refuse_commands(cmd_rx, ui_tx, reason);
}

/// Answers every queued and future command with a failure until the UI hangs
/// up, so no view keeps waiting on a worker that never started.
pub(crate) fn refuse_commands(
    cmd_rx: &Receiver<BackendCommand>,
    ui_tx: &Sender<UiEvent>,
    reason: &str,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        let event = match cmd {
            BackendCommand::LoadCatalog { handle } => UiEvent::CatalogLoaded {
                handle,
                result: Err(ApiError::new(ErrorCode::Internal, reason)),
            },
            BackendCommand::FetchProductImage { id, .. } => UiEvent::ProductImageFailed { id },
        };
        if let Err(TrySendError::Disconnected(_)) = ui_tx.try_send(event) {
            break;
        }
    }
}

async fn load_catalog(
    source: Arc<HttpCatalogSource>,
    retry: RetryPolicy,
    handle: LoadHandle,
    ui_tx: Sender<UiEvent>,
) {
    let result = fetch_catalog(source.as_ref(), &SimulatedStock, &retry, &handle)
        .await
        .map_err(ApiError::from);
    if handle.is_cancelled() {
        tracing::debug!("catalog view gone before load finished; dropping result");
        return;
    }
    if ui_tx
        .try_send(UiEvent::CatalogLoaded { handle, result })
        .is_err()
    {
        tracing::warn!("ui event queue unavailable; catalog result dropped");
    }
}

async fn fetch_product_image(
    http: reqwest::Client,
    id: ProductId,
    url: String,
    ui_tx: Sender<UiEvent>,
) {
    let event = match download_image(&http, &url).await {
        Ok(bytes) => match decode_product_image(&bytes) {
            Ok(image) => UiEvent::ProductImageLoaded { id, image },
            Err(err) => {
                tracing::warn!(product_id = id.0, "failed to decode product image: {err}");
                UiEvent::ProductImageFailed { id }
            }
        },
        Err(err) => {
            tracing::warn!(product_id = id.0, url = %url, "failed to download product image: {err}");
            UiEvent::ProductImageFailed { id }
        }
    };
    if ui_tx.try_send(event).is_err() {
        tracing::warn!(product_id = id.0, "ui event queue unavailable; product image dropped");
    }
}

async fn download_image(http: &reqwest::Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let res = http.get(url).send().await?.error_for_status()?;
    Ok(res.bytes().await?.to_vec())
}

/// Decodes and scales an image down so its longest edge is at most
/// `MAX_IMAGE_DIMENSION`, keeping the aspect ratio.
pub fn decode_product_image(bytes: &[u8]) -> Result<ProductImage, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let resized = if decoded.width().max(decoded.height()) > MAX_IMAGE_DIMENSION {
        decoded.resize(
            MAX_IMAGE_DIMENSION,
            MAX_IMAGE_DIMENSION,
            image::imageops::FilterType::Triangle,
        )
    } else {
        decoded
    };
    let rgba = resized.to_rgba8();
    Ok(ProductImage {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        rgba: rgba.into_raw(),
    })
}
