//! Per-screenshot layout and copy settings.
//!
//! [`ScreenConfig`] is the immutable description of one marketing screen:
//! the copy to print and how the device should be posed. It is built once
//! per export and handed to the compositor by reference.

use std::{fmt, str::FromStr};

use crate::device::Orientation;

/// Horizontal placement of the device on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Position {
    #[default]
    Center,
    Left,
    Right,
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(Self::Center),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(format!("unknown position `{s}`")),
        }
    }
}

/// Layout variants available on tablet canvases.
///
/// The last four variants have no dedicated geometry and are laid out with
/// the [`Standard`](Self::Standard) handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TabletLayoutVariant {
    #[default]
    Standard,
    Angled,
    Frameless,
    HeadlineDominant,
    UiForward,
    Split,
    Floating,
    Panorama,
    Collage,
}

impl TabletLayoutVariant {
    /// All variants, in declaration order.
    pub const ALL: [TabletLayoutVariant; 9] = [
        Self::Standard,
        Self::Angled,
        Self::Frameless,
        Self::HeadlineDominant,
        Self::UiForward,
        Self::Split,
        Self::Floating,
        Self::Panorama,
        Self::Collage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Angled => "angled",
            Self::Frameless => "frameless",
            Self::HeadlineDominant => "headline-dominant",
            Self::UiForward => "ui-forward",
            Self::Split => "split",
            Self::Floating => "floating",
            Self::Panorama => "panorama",
            Self::Collage => "collage",
        }
    }
}

impl fmt::Display for TabletLayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TabletLayoutVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.name() == s)
            .ok_or_else(|| format!("unknown tablet layout `{s}`"))
    }
}

/// Tablet-specific layout settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabletLayout {
    variant: TabletLayoutVariant,
    orientation: Orientation,
}

impl TabletLayout {
    pub fn new(variant: TabletLayoutVariant, orientation: Orientation) -> Self {
        Self {
            variant,
            orientation,
        }
    }

    pub fn variant(&self) -> TabletLayoutVariant {
        self.variant
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

/// Copy and pose for one marketing screen.
///
/// # Examples
///
/// ```
/// # use storeshot_core::screen::{Position, ScreenConfig};
/// let screen = ScreenConfig::new("Plan trips together")
///     .with_subheading("Shared itineraries in real time")
///     .with_position(Position::Left)
///     .with_tilt(true);
/// assert!(screen.has_subheading());
/// assert!(screen.tilt());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenConfig {
    heading: String,
    subheading: String,
    tilt: bool,
    position: Position,
    full_bleed: bool,
    tablet: Option<TabletLayout>,
}

impl ScreenConfig {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ..Self::default()
        }
    }

    pub fn with_subheading(mut self, subheading: impl Into<String>) -> Self {
        self.subheading = subheading.into();
        self
    }

    pub fn with_tilt(mut self, tilt: bool) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_full_bleed(mut self, full_bleed: bool) -> Self {
        self.full_bleed = full_bleed;
        self
    }

    pub fn with_tablet_layout(mut self, tablet: TabletLayout) -> Self {
        self.tablet = Some(tablet);
        self
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn subheading(&self) -> &str {
        &self.subheading
    }

    /// True when the subheading has visible content.
    pub fn has_subheading(&self) -> bool {
        !self.subheading.trim().is_empty()
    }

    pub fn tilt(&self) -> bool {
        self.tilt
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn full_bleed(&self) -> bool {
        self.full_bleed
    }

    pub fn tablet(&self) -> Option<TabletLayout> {
        self.tablet
    }
}
