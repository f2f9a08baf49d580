//! Paint order of a composite.
//!
//! A composite is painted as a stack of [`RenderLayer`]s. Which layers take
//! part depends on the layout mode and on where the device frame came from,
//! but their relative order never changes: the `Ord` derive follows
//! declaration order, bottom first.

use crate::{frame::FrameImage, layout::LayoutResult};

/// One stage of the paint stack, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Background image or the fallback gradient.
    Background,
    /// Soft drop shadow under a frameless device.
    Shadow,
    /// Procedural frame body, painted below the screenshot.
    DeviceBody,
    /// The screenshot itself.
    Screen,
    /// Bitmap frame asset, or the sensor housing of a procedural frame.
    DeviceOverlay,
    /// Legibility gradient over a full-bleed screenshot.
    Scrim,
    /// Heading and subheading.
    Text,
}

impl RenderLayer {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Shadow => "shadow",
            Self::DeviceBody => "device-body",
            Self::Screen => "screen",
            Self::DeviceOverlay => "device-overlay",
            Self::Scrim => "scrim",
            Self::Text => "text",
        }
    }

    /// Layers needed to paint `plan` with `frame`, in paint order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use storeshot::{frame::FrameImage, layer::RenderLayer, layout::LayoutEngine};
    /// # use storeshot_core::{device::DeviceType, geometry::Size, screen::Position};
    /// let plan = LayoutEngine::new().calculate(
    ///     false,
    ///     Position::Center,
    ///     true,
    ///     Size::new(1290.0, 2796.0),
    ///     false,
    ///     DeviceType::Phone,
    /// );
    /// let layers = RenderLayer::stack(&plan, &FrameImage::Placeholder);
    /// assert_eq!(
    ///     layers,
    ///     [RenderLayer::Background, RenderLayer::Screen, RenderLayer::Scrim, RenderLayer::Text]
    /// );
    /// ```
    pub fn stack(plan: &LayoutResult, frame: &FrameImage) -> Vec<RenderLayer> {
        let mut layers = vec![Self::Background, Self::Screen, Self::Text];

        if plan.screenshot_fills_canvas() {
            layers.push(Self::Scrim);
        } else if plan.is_frameless() {
            layers.push(Self::Shadow);
        } else {
            match frame {
                FrameImage::Asset(_) => layers.push(Self::DeviceOverlay),
                FrameImage::Procedural(_) => {
                    layers.push(Self::DeviceBody);
                    layers.push(Self::DeviceOverlay);
                }
                FrameImage::Placeholder => {}
            }
        }

        layers.sort();
        layers
    }
}

#[cfg(test)]
mod tests {
    use storeshot_core::{
        device::{DeviceType, Orientation},
        geometry::Size,
        screen::{Position, TabletLayoutVariant},
    };
    use tiny_skia::Pixmap;

    use super::*;
    use crate::layout::LayoutEngine;

    const CANVAS: Size = Size::new(1290.0, 2796.0);

    fn framed_plan() -> LayoutResult {
        LayoutEngine::new().calculate(false, Position::Center, false, CANVAS, true, DeviceType::Phone)
    }

    #[test]
    fn test_procedural_frame_below_screen() {
        let frame = FrameImage::Procedural(Pixmap::new(1, 1).unwrap());
        let layers = RenderLayer::stack(&framed_plan(), &frame);
        assert_eq!(
            layers,
            [
                RenderLayer::Background,
                RenderLayer::DeviceBody,
                RenderLayer::Screen,
                RenderLayer::DeviceOverlay,
                RenderLayer::Text,
            ]
        );
    }

    #[test]
    fn test_asset_frame_above_screen() {
        let frame = FrameImage::Asset(Pixmap::new(1, 1).unwrap());
        let layers = RenderLayer::stack(&framed_plan(), &frame);
        assert_eq!(
            layers,
            [
                RenderLayer::Background,
                RenderLayer::Screen,
                RenderLayer::DeviceOverlay,
                RenderLayer::Text,
            ]
        );
    }

    #[test]
    fn test_frameless_has_shadow() {
        let plan = LayoutEngine::new().calculate_layout(
            TabletLayoutVariant::Frameless,
            false,
            Size::new(2064.0, 2752.0),
            true,
            Orientation::Portrait,
        );
        let layers = RenderLayer::stack(&plan, &FrameImage::Placeholder);
        assert_eq!(
            layers,
            [
                RenderLayer::Background,
                RenderLayer::Shadow,
                RenderLayer::Screen,
                RenderLayer::Text,
            ]
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(RenderLayer::DeviceBody.name(), "device-body");
        assert_eq!(RenderLayer::Text.name(), "text");
    }
}
