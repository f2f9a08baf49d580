//! Storeshot CLI library
//!
//! This module contains the core CLI logic for the Storeshot compositor.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use std::io;

use image::RgbaImage;
use log::{debug, info};

use storeshot::{
    CompositeInput, Compositor, StoreshotError,
    canvas::rgba_from_pixmap,
    color::ResolvedColors,
    device::DeviceSize,
    screen::{ScreenConfig, TabletLayout},
};

/// Run the Storeshot CLI application
///
/// Decodes the input images, composes the marketing screenshot for the
/// selected device and writes it to the output file as PNG.
///
/// # Errors
///
/// Returns `StoreshotError` for:
/// - Configuration loading errors
/// - Unknown device presets
/// - Input images that cannot be read or decoded
/// - Canvas allocation failures
/// - Output file write errors
pub fn run(args: &Args) -> Result<(), StoreshotError> {
    info!(
        screenshot = args.screenshot,
        device = args.device,
        output_path = args.output;
        "Composing marketing screenshot"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let device = DeviceSize::preset(&args.device)?.in_orientation(args.orientation);
    debug!(device:?; "Resolved device");

    let screenshot = load_image(&args.screenshot)?;
    let background = args.background.as_deref().map(load_image).transpose()?;

    let mut screen = ScreenConfig::new(&args.heading)
        .with_subheading(&args.subheading)
        .with_position(args.position)
        .with_tilt(args.tilt)
        .with_full_bleed(args.full_bleed);
    if let Some(variant) = args.tablet_layout {
        screen = screen.with_tablet_layout(TabletLayout::new(variant, args.orientation));
    }

    let colors = ResolvedColors::from_hex(&args.primary, &args.accent, &args.text, &args.subtext);

    let mut input = CompositeInput::new(&screen, &screenshot, &device).with_colors(colors);
    if let Some(background) = &background {
        input = input.with_background(background);
    }

    let compositor = Compositor::new(app_config);
    let pixmap = compositor.compose(&input)?;

    rgba_from_pixmap(&pixmap)
        .save(&args.output)
        .map_err(|err| StoreshotError::Io(io::Error::other(err)))?;

    info!(output_file = args.output; "PNG exported successfully");

    Ok(())
}

fn load_image(path: &str) -> Result<RgbaImage, StoreshotError> {
    debug!(path; "Decoding image");
    Ok(image::open(path)?.to_rgba8())
}
