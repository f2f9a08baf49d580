//! Error types for Storeshot operations.
//!
//! Only allocation-class failures stop a composite. Cosmetic problems
//! (missing frame asset, unparseable color, text that will not fit, an input
//! raster that cannot be used) are absorbed where they happen and logged.

use std::io;

use thiserror::Error;

use storeshot_core::device::UnknownDevice;

/// The main error type for Storeshot operations.
#[derive(Debug, Error)]
pub enum StoreshotError {
    #[error("Failed to allocate a {width}x{height} canvas")]
    CanvasAllocation { width: u32, height: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error(transparent)]
    UnknownDevice(#[from] UnknownDevice),
}

impl From<image::ImageError> for StoreshotError {
    fn from(error: image::ImageError) -> Self {
        Self::Decode(error.to_string())
    }
}
