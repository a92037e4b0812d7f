//! Backend-to-UI events and error modeling for the storefront GUI controller.

use shared::{
    domain::{Product, ProductId},
    error::{ApiError, ErrorCode},
};
use storefront_core::LoadHandle;

pub enum UiEvent {
    Info(String),
    CatalogLoaded {
        handle: LoadHandle,
        result: Result<Vec<Product>, ApiError>,
    },
    ProductImageLoaded {
        id: ProductId,
        image: ProductImage,
    },
    ProductImageFailed {
        id: ProductId,
    },
    Error(UiError),
}

/// Decoded RGBA pixels, ready to upload as a texture.
pub struct ProductImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CatalogLoad,
    General,
}

pub fn classify_load_failure(error: &ApiError) -> String {
    match error.code {
        ErrorCode::Transport => {
            "Catalog server unreachable; check the network and retry.".to_string()
        }
        ErrorCode::Status => format!("Catalog server refused the request ({}).", error.message),
        ErrorCode::Decode => "Catalog server sent data the store cannot read.".to_string(),
        _ => format!("Catalog error: {}", error.message),
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
    retryable: bool,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("decode")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
            retryable: category == UiErrorCategory::Transport,
        }
    }

    pub fn from_api(context: UiErrorContext, error: &ApiError) -> Self {
        let category = match error.code {
            ErrorCode::Transport | ErrorCode::Status => UiErrorCategory::Transport,
            ErrorCode::Decode | ErrorCode::Validation => UiErrorCategory::Validation,
            ErrorCode::Cancelled | ErrorCode::Internal => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: classify_load_failure(error),
            retryable: error.is_retryable(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
