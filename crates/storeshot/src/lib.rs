//! Storeshot - deterministic compositing of App Store marketing screenshots.
//!
//! A composite combines a raw UI screenshot, an optional background image and
//! a short heading into a finished image at an exact device export size. The
//! pipeline has four parts:
//!
//! - [`layout`] plans where the text and the device go.
//! - [`frame`] supplies the device bezel, from a bitmap asset or drawn
//!   procedurally.
//! - [`text`] fits and draws the heading and subheading.
//! - [`Compositor`] runs the other three and paints the [`layer`] stack.
//!
//! # Examples
//!
//! ```rust,no_run
//! use image::RgbaImage;
//! use storeshot::{CompositeInput, Compositor, config::AppConfig};
//! use storeshot::{color::ResolvedColors, device::DeviceSize, screen::ScreenConfig};
//!
//! let compositor = Compositor::new(AppConfig::default());
//! let screen = ScreenConfig::new("Budget without spreadsheets")
//!     .with_subheading("Every account in one place");
//! let screenshot = RgbaImage::new(1179, 2556);
//! let device = DeviceSize::preset("iphone-6.9").unwrap();
//!
//! let input = CompositeInput::new(&screen, &screenshot, &device)
//!     .with_colors(ResolvedColors::from_hex("#0a84ff", "#5e5ce6", "#ffffff", "#ebebf5"));
//! let image = compositor.compose(&input).expect("Failed to compose");
//! let rgba = storeshot::canvas::rgba_from_pixmap(&image);
//! assert_eq!(rgba.dimensions(), (1320, 2868));
//! ```

pub mod canvas;
pub mod config;
pub mod frame;
pub mod layer;
pub mod layout;
pub mod text;

mod compose;
mod error;

pub use storeshot_core::{color, device, geometry, screen};

pub use compose::{CompositeInput, Compositor};
pub use error::StoreshotError;
