//! Target device descriptions.
//!
//! A [`DeviceSize`] is the exact pixel size of the exported image together
//! with the kind of device it represents. Its id doubles as the prefix of the
//! frame asset name (`<device-id>_<frame-style>.png`).

use std::{fmt, str::FromStr};

use thiserror::Error;

/// The family of device a composite is rendered for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeviceType {
    #[default]
    Phone,
    Tablet,
}

impl DeviceType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Tablet => "tablet",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canvas orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            _ => Err(format!("unknown orientation `{s}`")),
        }
    }
}

/// Error returned when a device preset id is not known.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown device preset `{0}`")]
pub struct UnknownDevice(pub String);

/// Built-in export sizes: `(id, width, height, type)`, portrait.
const PRESETS: &[(&str, u32, u32, DeviceType)] = &[
    ("iphone-6.9", 1320, 2868, DeviceType::Phone),
    ("iphone-6.7", 1290, 2796, DeviceType::Phone),
    ("iphone-6.5", 1242, 2688, DeviceType::Phone),
    ("iphone-5.5", 1242, 2208, DeviceType::Phone),
    ("ipad-13", 2064, 2752, DeviceType::Tablet),
    ("ipad-12.9", 2048, 2732, DeviceType::Tablet),
    ("ipad-11", 1668, 2388, DeviceType::Tablet),
];

/// The exact pixel size of an export together with its device type.
///
/// # Examples
///
/// ```
/// # use storeshot_core::device::{DeviceSize, DeviceType, Orientation};
/// let phone = DeviceSize::preset("iphone-6.7").unwrap();
/// assert_eq!((phone.width(), phone.height()), (1290, 2796));
/// assert_eq!(phone.device_type(), DeviceType::Phone);
///
/// let landscape = DeviceSize::preset("ipad-13")
///     .unwrap()
///     .in_orientation(Orientation::Landscape);
/// assert_eq!((landscape.width(), landscape.height()), (2752, 2064));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceSize {
    id: String,
    width: u32,
    height: u32,
    device_type: DeviceType,
}

impl DeviceSize {
    /// Creates a custom device size.
    pub fn new(id: impl Into<String>, width: u32, height: u32, device_type: DeviceType) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            device_type,
        }
    }

    /// Looks up one of the built-in App Store export sizes.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownDevice`] when `id` is not a known preset.
    pub fn preset(id: &str) -> Result<Self, UnknownDevice> {
        PRESETS
            .iter()
            .find(|(preset_id, ..)| *preset_id == id)
            .map(|&(preset_id, width, height, device_type)| {
                Self::new(preset_id, width, height, device_type)
            })
            .ok_or_else(|| UnknownDevice(id.to_string()))
    }

    /// Returns the ids of all built-in presets.
    pub fn preset_ids() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(id, ..)| *id)
    }

    /// Returns this size rotated into `orientation`.
    pub fn in_orientation(self, orientation: Orientation) -> Self {
        if self.orientation() == orientation {
            return self;
        }
        Self {
            width: self.height,
            height: self.width,
            ..self
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Returns `height / width`; zero for a zero width.
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 {
            0.0
        } else {
            self.height as f32 / self.width as f32
        }
    }

    /// Landscape when strictly wider than tall.
    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_every_preset_resolves() {
        for id in DeviceSize::preset_ids() {
            let size = DeviceSize::preset(id).unwrap();
            assert_eq!(size.id(), id);
            assert!(size.width() > 0 && size.height() > 0);
            assert_eq!(size.orientation(), Orientation::Portrait);
        }
    }

    #[test]
    fn test_unknown_preset() {
        let err = DeviceSize::preset("pixel-9").unwrap_err();
        assert_eq!(err, UnknownDevice("pixel-9".to_string()));
        assert_eq!(err.to_string(), "unknown device preset `pixel-9`");
    }

    #[test]
    fn test_aspect_ratio_is_height_over_width() {
        let size = DeviceSize::new("custom", 1000, 2000, DeviceType::Phone);
        assert_approx_eq!(f32, size.aspect_ratio(), 2.0);
        let zero = DeviceSize::new("zero", 0, 2000, DeviceType::Phone);
        assert_eq!(zero.aspect_ratio(), 0.0);
    }

    #[test]
    fn test_in_orientation_is_idempotent() {
        let tablet = DeviceSize::preset("ipad-11").unwrap();
        let same = tablet.clone().in_orientation(Orientation::Portrait);
        assert_eq!(same, tablet);

        let landscape = tablet.in_orientation(Orientation::Landscape);
        assert_eq!(landscape.orientation(), Orientation::Landscape);
        assert_eq!(landscape.id(), "ipad-11");
        assert_eq!(landscape.device_type(), DeviceType::Tablet);
    }

    #[test]
    fn test_orientation_from_str() {
        assert_eq!("portrait".parse(), Ok(Orientation::Portrait));
        assert_eq!("landscape".parse(), Ok(Orientation::Landscape));
        assert!("sideways".parse::<Orientation>().is_err());
    }
}
