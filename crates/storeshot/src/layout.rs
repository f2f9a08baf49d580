//! Geometric planning for a composite.
//!
//! [`LayoutEngine`] turns the pose of a screen (tilt, position, full bleed,
//! tablet variant) and the canvas size into a [`LayoutResult`]: where the
//! heading, subheading and device go, how large the text starts out, and how
//! far the device is rotated. No drawing happens here and the same inputs
//! always yield the same plan.
//!
//! All coordinates are canvas pixels with the origin at the top-left and y
//! growing downward. The device rectangle may hang past the canvas edges;
//! the text rectangles never do.

mod phone;
mod tablet;

use log::trace;

use storeshot_core::{
    device::{DeviceType, Orientation},
    geometry::{Bounds, Point, Size},
    screen::{Position, TabletLayoutVariant},
};

use crate::frame::{FrameStyle, screen_inset};

/// Magnitude of the device tilt, in degrees.
pub const TILT_DEGREES: f32 = 8.0;

/// Horizontal nudge applied with a tilt, as a fraction of canvas width.
const TILT_SHIFT: f32 = 0.03;

/// Top safe margin for text, as a fraction of canvas height.
const TEXT_TOP_MARGIN: f32 = 0.04;

/// Gap between heading and subheading, as a fraction of canvas height.
const HEADING_GAP: f32 = 0.01;

/// Minimum gap between the text block and the device top.
const DEVICE_GAP: f32 = 0.02;

/// Geometric plan for one composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutResult {
    heading_rect: Bounds,
    subheading_rect: Bounds,
    device_rect: Bounds,
    screen_inset: Bounds,
    heading_font_size: f32,
    subheading_font_size: f32,
    rotation_angle: f32,
    device_type: DeviceType,
    screenshot_fills_canvas: bool,
    is_frameless: bool,
    scrim_rect: Option<Bounds>,
}

impl LayoutResult {
    pub fn heading_rect(&self) -> Bounds {
        self.heading_rect
    }

    /// Zero height when the screen has no subheading.
    pub fn subheading_rect(&self) -> Bounds {
        self.subheading_rect
    }

    /// Device rectangle in canvas space, before rotation. Zero in full-bleed
    /// layouts.
    pub fn device_rect(&self) -> Bounds {
        self.device_rect
    }

    /// Screen area relative to the device rectangle's origin.
    pub fn screen_inset(&self) -> Bounds {
        self.screen_inset
    }

    /// Screen area in canvas space, before rotation.
    pub fn screen_rect(&self) -> Bounds {
        self.screen_inset.translate(self.device_rect.min_point())
    }

    pub fn heading_font_size(&self) -> f32 {
        self.heading_font_size
    }

    pub fn subheading_font_size(&self) -> f32 {
        self.subheading_font_size
    }

    /// Device rotation in degrees, clockwise on screen; zero for none.
    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn screenshot_fills_canvas(&self) -> bool {
        self.screenshot_fills_canvas
    }

    pub fn is_frameless(&self) -> bool {
        self.is_frameless
    }

    pub fn scrim_rect(&self) -> Option<Bounds> {
        self.scrim_rect
    }

    /// Centre of rotation for the device layer.
    pub fn rotation_center(&self) -> Point {
        self.device_rect.center()
    }
}

/// Heading and subheading sizes, stacked top to bottom.
#[derive(Debug, Clone, Copy)]
struct TextStack {
    heading_font_size: f32,
    subheading_font_size: f32,
    heading_height: f32,
    subheading_height: f32,
    gap: f32,
}

impl TextStack {
    /// Font sizes scale with `reference_width`; the gap scales with the
    /// canvas height.
    fn new(
        reference_width: f32,
        heading_scale: f32,
        subheading_scale: f32,
        canvas_height: f32,
        has_subheading: bool,
    ) -> Self {
        let heading_font_size = reference_width * heading_scale;
        let subheading_font_size = reference_width * subheading_scale;
        let (subheading_height, gap) = if has_subheading {
            (subheading_font_size * 2.5, canvas_height * HEADING_GAP)
        } else {
            (0.0, 0.0)
        };
        Self {
            heading_font_size,
            subheading_font_size,
            heading_height: heading_font_size * 3.0,
            subheading_height,
            gap,
        }
    }

    fn height(&self) -> f32 {
        self.heading_height + self.gap + self.subheading_height
    }

    /// Shrinks both fonts by the same factor until the block is at most
    /// `max_height` tall.
    fn fit_height(self, max_height: f32) -> Self {
        let content = self.heading_height + self.subheading_height;
        if self.height() <= max_height || content <= 0.0 {
            return self;
        }
        let scale = ((max_height - self.gap) / content).clamp(0.0, 1.0);
        Self {
            heading_font_size: self.heading_font_size * scale,
            subheading_font_size: self.subheading_font_size * scale,
            heading_height: self.heading_height * scale,
            subheading_height: self.subheading_height * scale,
            gap: self.gap,
        }
    }

    /// Heading and subheading rectangles for a block starting at `top`.
    fn place(&self, x: f32, top: f32, width: f32) -> (Bounds, Bounds) {
        let heading = Bounds::from_xywh(x, top, width, self.heading_height);
        let subheading = Bounds::from_xywh(
            x,
            heading.max_y() + self.gap,
            width,
            self.subheading_height,
        );
        (heading, subheading)
    }
}

/// Keeps a block of `block_height` starting at `top` inside the canvas,
/// preferring the top safe margin when the block is too tall for both.
fn clamp_block_top(top: f32, block_height: f32, canvas: Size) -> f32 {
    let safe_top = canvas.height() * TEXT_TOP_MARGIN;
    top.min(canvas.height() - block_height).max(safe_top)
}

/// Keeps a column inside the canvas horizontally.
fn clamp_column(x: f32, width: f32, canvas: Size) -> (f32, f32) {
    let x = x.clamp(0.0, canvas.width().max(0.0));
    let width = width.max(0.0).min(canvas.width() - x).max(0.0);
    (x, width)
}

/// Centred text column spanning 84% of the canvas width.
fn centered_column(canvas: Size) -> (f32, f32) {
    (canvas.width() * 0.08, canvas.width() * 0.84)
}

/// Canvas height over width; the device takes the canvas's proportions.
fn device_aspect(canvas: Size) -> f32 {
    if canvas.width() > 0.0 {
        canvas.height() / canvas.width()
    } else {
        0.0
    }
}

/// Parts shared by every layout, assembled into a [`LayoutResult`].
#[derive(Debug, Clone, Copy)]
struct Plan {
    stack: TextStack,
    column: (f32, f32),
    text_top: f32,
    device_rect: Bounds,
    rotation_angle: f32,
    kind: PlanKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlanKind {
    Framed,
    Frameless,
    FullBleed,
}

impl Plan {
    fn finish(
        self,
        canvas: Size,
        device_type: DeviceType,
        frame_style: FrameStyle,
    ) -> LayoutResult {
        let stack = self
            .stack
            .fit_height(canvas.height() * (1.0 - TEXT_TOP_MARGIN));
        let (x, width) = clamp_column(self.column.0, self.column.1, canvas);
        let top = clamp_block_top(self.text_top, stack.height(), canvas);
        let (heading_rect, subheading_rect) = stack.place(x, top, width);

        let (screen_inset, scrim_rect) = match self.kind {
            PlanKind::Framed => (
                screen_inset(device_type, self.device_rect.to_size(), frame_style),
                None,
            ),
            PlanKind::Frameless => (
                screen_inset(device_type, self.device_rect.to_size(), FrameStyle::None),
                None,
            ),
            PlanKind::FullBleed => (Bounds::ZERO, Some(full_bleed_scrim(canvas))),
        };

        LayoutResult {
            heading_rect,
            subheading_rect,
            device_rect: self.device_rect,
            screen_inset,
            heading_font_size: stack.heading_font_size,
            subheading_font_size: stack.subheading_font_size,
            rotation_angle: self.rotation_angle,
            device_type,
            screenshot_fills_canvas: self.kind == PlanKind::FullBleed,
            is_frameless: self.kind == PlanKind::Frameless,
            scrim_rect,
        }
    }
}

fn full_bleed_scrim(canvas: Size) -> Bounds {
    Bounds::from_xywh(0.0, 0.0, canvas.width(), canvas.height() * 0.35)
}

/// Full-bleed plan shared by phones and the tablet "ui-forward" variant:
/// no device, text near the bottom of a top scrim.
fn full_bleed(canvas: Size, stack: TextStack) -> Plan {
    let scrim = full_bleed_scrim(canvas);
    let bottom = scrim.height() * 0.85;
    Plan {
        stack,
        column: centered_column(canvas),
        text_top: bottom - stack.height(),
        device_rect: Bounds::ZERO,
        rotation_angle: 0.0,
        kind: PlanKind::FullBleed,
    }
}

/// Computes layout plans.
///
/// Holds only configuration, so one engine can plan any number of
/// composites.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    frame_style: FrameStyle,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame style used to derive screen insets.
    pub fn with_frame_style(mut self, frame_style: FrameStyle) -> Self {
        self.frame_style = frame_style;
        self
    }

    pub fn frame_style(&self) -> FrameStyle {
        self.frame_style
    }

    /// Plans a phone-style layout.
    ///
    /// `full_bleed` takes precedence over `position`, and ignores `tilt`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use storeshot::layout::LayoutEngine;
    /// # use storeshot_core::{device::DeviceType, geometry::Size, screen::Position};
    /// let plan = LayoutEngine::new().calculate(
    ///     false,
    ///     Position::Center,
    ///     false,
    ///     Size::new(1290.0, 2796.0),
    ///     true,
    ///     DeviceType::Phone,
    /// );
    /// assert_eq!(plan.device_rect().width(), 1032.0);
    /// assert_eq!(plan.rotation_angle(), 0.0);
    /// ```
    pub fn calculate(
        &self,
        tilt: bool,
        position: Position,
        full_bleed: bool,
        canvas: Size,
        has_subheading: bool,
        device_type: DeviceType,
    ) -> LayoutResult {
        let plan = if full_bleed {
            phone::full_bleed(canvas, has_subheading)
        } else {
            match position {
                Position::Center => phone::center(canvas, tilt, has_subheading),
                Position::Left | Position::Right => {
                    phone::side(canvas, tilt, position, has_subheading)
                }
            }
        };
        let result = plan.finish(canvas, device_type, self.frame_style);
        trace!(result:?; "Calculated layout");
        result
    }

    /// Plans a tablet layout for `variant`.
    ///
    /// Landscape canvases scale their text from the short edge.
    pub fn calculate_layout(
        &self,
        variant: TabletLayoutVariant,
        tilt: bool,
        canvas: Size,
        has_subheading: bool,
        orientation: Orientation,
    ) -> LayoutResult {
        let plan = tablet::plan(variant, canvas, tilt, has_subheading, orientation);
        let result = plan.finish(canvas, DeviceType::Tablet, self.frame_style);
        trace!(variant = variant.name(), result:?; "Calculated tablet layout");
        result
    }
}
