//! Device frames and screen insets.
//!
//! A device frame is the bezel image drawn around the screenshot. Frames come
//! from two places, tried in order:
//!
//! 1. A bitmap asset named `<device-id>_<frame-style>.png`, looked up first in
//!    the in-memory [`FrameCatalog`] and then in an optional resources
//!    directory.
//! 2. A procedurally drawn frame (see [`procedural`]) when no asset exists.
//!
//! [`screen_inset`] tells the compositor where the screen content goes,
//! relative to the device rectangle's origin.

pub mod procedural;

use std::{
    collections::HashMap,
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::{debug, warn};
use serde::Deserialize;
use tiny_skia::Pixmap;

use storeshot_core::{
    color::Color,
    device::{DeviceSize, DeviceType},
    geometry::{Bounds, Insets, Size},
};

use crate::canvas::pixmap_from_rgba;

/// Visual treatment of the device bezel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameStyle {
    /// Dark device body with a subtle rim highlight
    #[default]
    Realistic,
    /// Flat single-color body
    Clay,
    /// Outline only
    Minimal,
    /// Gradient body with a translucent top highlight
    Glass,
    /// No bezel at all; the screenshot fills the device rectangle
    None,
}

impl FrameStyle {
    pub fn name(self) -> &'static str {
        match self {
            Self::Realistic => "realistic",
            Self::Clay => "clay",
            Self::Minimal => "minimal",
            Self::Glass => "glass",
            Self::None => "none",
        }
    }
}

impl fmt::Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrameStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "realistic" => Ok(Self::Realistic),
            "clay" => Ok(Self::Clay),
            "minimal" => Ok(Self::Minimal),
            "glass" => Ok(Self::Glass),
            "none" => Ok(Self::None),
            _ => Err(format!("unknown frame style `{s}`")),
        }
    }
}

/// A frame image together with where it came from.
///
/// Bitmap assets have a transparent screen hole and are drawn above the
/// screenshot; procedural frames have an opaque cutout and are drawn below
/// it. `Placeholder` stands in when no image could be allocated.
#[derive(Debug, Clone)]
pub enum FrameImage {
    Asset(Pixmap),
    Procedural(Pixmap),
    Placeholder,
}

impl FrameImage {
    /// Returns the pixels, or `None` for a placeholder.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        match self {
            Self::Asset(pixmap) | Self::Procedural(pixmap) => Some(pixmap),
            Self::Placeholder => None,
        }
    }

    pub fn is_asset(&self) -> bool {
        matches!(self, Self::Asset(_))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// Default body corner radius: 8% of the width for phones, 5% for tablets.
pub fn default_corner_radius(device_type: DeviceType, width: f32) -> f32 {
    match device_type {
        DeviceType::Phone => width * 0.08,
        DeviceType::Tablet => width * 0.05,
    }
}

/// Returns the screen area for a device of `device_size`, relative to the
/// device rectangle's origin.
///
/// The result always lies inside `(0, 0, width, height)`.
///
/// # Examples
///
/// ```
/// # use storeshot::frame::{screen_inset, FrameStyle};
/// # use storeshot_core::{device::DeviceType, geometry::Size};
/// let size = Size::new(1000.0, 2000.0);
/// let inset = screen_inset(DeviceType::Phone, size, FrameStyle::Realistic);
/// assert_eq!(inset.min_x(), 30.0);
/// assert_eq!(inset.min_y(), 30.0);
///
/// let full = screen_inset(DeviceType::Phone, size, FrameStyle::None);
/// assert_eq!(full.to_size(), size);
/// ```
pub fn screen_inset(device_type: DeviceType, device_size: Size, style: FrameStyle) -> Bounds {
    let width = device_size.width().max(0.0);
    let height = device_size.height().max(0.0);
    let insets = match (style, device_type) {
        (FrameStyle::None, _) => Insets::default(),
        (FrameStyle::Realistic, DeviceType::Phone) => Insets::symmetric(width * 0.03, height * 0.015),
        (FrameStyle::Realistic, DeviceType::Tablet) => {
            Insets::symmetric(width * 0.02, height * 0.015)
        }
        (FrameStyle::Clay | FrameStyle::Glass, _) => Insets::uniform(width * procedural::CUTOUT_INSET),
        (FrameStyle::Minimal, _) => Insets::uniform(width * 0.02),
    };
    Bounds::from_xywh(0.0, 0.0, width, height).inset(insets)
}

/// In-memory bundle of frame assets keyed by asset name (without extension).
///
/// Populated once, then only read; sharing one catalog across threads is
/// safe.
#[derive(Debug, Clone, Default)]
pub struct FrameCatalog {
    assets: HashMap<String, Vec<u8>>,
}

impl FrameCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the encoded PNG bytes for `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, png: Vec<u8>) {
        self.assets.insert(name.into(), png);
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.assets.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Resolves device frames for composites.
///
/// Holds only read-only lookup state, so a single instance can serve any
/// number of concurrent composites.
#[derive(Debug, Clone, Default)]
pub struct DeviceFrame {
    catalog: FrameCatalog,
    resources_dir: Option<PathBuf>,
}

impl DeviceFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: FrameCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resources_dir = Some(dir.into());
        self
    }

    /// Asset naming convention: `<device-id>_<frame-style>`.
    pub fn asset_name(device_id: &str, style: FrameStyle) -> String {
        format!("{device_id}_{style}")
    }

    /// Loads the bitmap frame for `device` in `style`, if one exists.
    ///
    /// Missing or undecodable assets return `None`; callers fall back to a
    /// procedural frame.
    pub fn load_frame(&self, device: &DeviceSize, style: FrameStyle) -> Option<Pixmap> {
        if style == FrameStyle::None {
            return None;
        }
        let name = Self::asset_name(device.id(), style);

        if let Some(bytes) = self.catalog.get(&name) {
            debug!(asset = name; "Frame asset found in catalog");
            return decode_frame(&name, bytes);
        }

        let dir = self.resources_dir.as_deref()?;
        let path = asset_path(dir, &name);
        match fs::read(&path) {
            Ok(bytes) => {
                debug!(path = path.display().to_string(); "Frame asset found in resources");
                decode_frame(&name, &bytes)
            }
            Err(err) => {
                debug!(path = path.display().to_string(), err:err; "No frame asset on disk");
                None
            }
        }
    }

    /// Returns the frame to draw: the bitmap asset when available, otherwise
    /// a procedural frame of `size` in `style`.
    pub fn frame_for(
        &self,
        device: &DeviceSize,
        style: FrameStyle,
        size: Size,
        color: Color,
        corner_radius: Option<f32>,
    ) -> FrameImage {
        if let Some(asset) = self.load_frame(device, style) {
            return FrameImage::Asset(asset);
        }
        debug!(
            device = device.id(),
            style = style.name();
            "Drawing procedural frame",
        );
        procedural::generate_frame(style, size, device.device_type(), color, corner_radius)
    }
}

fn asset_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.png"))
}

fn decode_frame(name: &str, bytes: &[u8]) -> Option<Pixmap> {
    match image::load_from_memory(bytes) {
        Ok(decoded) => pixmap_from_rgba(&decoded.to_rgba8()),
        Err(err) => {
            warn!(asset = name, err:err; "Frame asset could not be decoded");
            None
        }
    }
}
