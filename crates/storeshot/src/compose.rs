//! The compositing pipeline.
//!
//! [`Compositor::compose`] plans the layout once, resolves the device frame,
//! then paints the [`RenderLayer`] stack onto a fresh canvas of exactly the
//! target device size.

use image::RgbaImage;
use log::{debug, info, trace, warn};
use tiny_skia::{Pixmap, Transform};

use storeshot_core::{
    color::{Color, ResolvedColors},
    device::{DeviceSize, DeviceType},
    geometry::{Bounds, Insets, Point, Size},
    screen::ScreenConfig,
};

use crate::{
    StoreshotError,
    canvas::{Canvas, Fill, pixmap_from_rgba},
    config::AppConfig,
    frame::{
        DeviceFrame, FrameCatalog, FrameImage, FrameStyle,
        procedural::{FrameGeometry, draw_sensor_overlay},
    },
    layer::RenderLayer,
    layout::{LayoutEngine, LayoutResult},
    text::TextRenderer,
};

/// Opacity of the scrim at its top edge; it fades to clear at the bottom.
const SCRIM_OPACITY: f32 = 0.55;

/// Number of stacked rectangles forming the frameless drop shadow.
const SHADOW_STEPS: u8 = 4;

/// Everything one composite is made from.
///
/// # Examples
///
/// ```
/// # use image::RgbaImage;
/// # use storeshot::CompositeInput;
/// # use storeshot_core::{device::DeviceSize, screen::ScreenConfig};
/// let screen = ScreenConfig::new("Track every habit");
/// let screenshot = RgbaImage::new(10, 20);
/// let device = DeviceSize::preset("iphone-6.7").unwrap();
/// let input = CompositeInput::new(&screen, &screenshot, &device);
/// assert!(input.background().is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CompositeInput<'a> {
    screen: &'a ScreenConfig,
    screenshot: &'a RgbaImage,
    background: Option<&'a RgbaImage>,
    colors: ResolvedColors,
    device: &'a DeviceSize,
}

impl<'a> CompositeInput<'a> {
    pub fn new(screen: &'a ScreenConfig, screenshot: &'a RgbaImage, device: &'a DeviceSize) -> Self {
        Self {
            screen,
            screenshot,
            background: None,
            colors: ResolvedColors::default(),
            device,
        }
    }

    pub fn with_background(mut self, background: &'a RgbaImage) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_colors(mut self, colors: ResolvedColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn screen(&self) -> &ScreenConfig {
        self.screen
    }

    pub fn screenshot(&self) -> &RgbaImage {
        self.screenshot
    }

    pub fn background(&self) -> Option<&RgbaImage> {
        self.background
    }

    pub fn colors(&self) -> ResolvedColors {
        self.colors
    }

    pub fn device(&self) -> &DeviceSize {
        self.device
    }
}

/// Renders marketing screenshots.
///
/// A compositor only holds read-only configuration; it can be shared across
/// threads and used for any number of composites at once.
///
/// # Examples
///
/// ```rust,no_run
/// use image::RgbaImage;
/// use storeshot::{CompositeInput, Compositor, config::AppConfig};
/// use storeshot_core::{device::DeviceSize, screen::ScreenConfig};
///
/// let compositor = Compositor::new(AppConfig::default());
/// let screen = ScreenConfig::new("Plan trips together").with_tilt(true);
/// let screenshot = RgbaImage::new(1179, 2556);
/// let device = DeviceSize::preset("iphone-6.7").unwrap();
///
/// let image = compositor
///     .compose(&CompositeInput::new(&screen, &screenshot, &device))
///     .expect("Failed to compose");
/// assert_eq!((image.width(), image.height()), (1290, 2796));
/// ```
#[derive(Debug, Clone)]
pub struct Compositor {
    config: AppConfig,
    frames: DeviceFrame,
    layout: LayoutEngine,
    text: TextRenderer,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Compositor {
    pub fn new(config: AppConfig) -> Self {
        let mut frames = DeviceFrame::new();
        if let Some(dir) = config.assets().resources_dir() {
            frames = frames.with_resources_dir(dir);
        }
        let layout = LayoutEngine::new().with_frame_style(config.style().frame_style());
        let text = TextRenderer::new(config.text().font_family());
        Self {
            config,
            frames,
            layout,
            text,
        }
    }

    /// Uses `catalog` as the first place frame assets are looked up.
    pub fn with_catalog(mut self, catalog: FrameCatalog) -> Self {
        self.frames = self.frames.with_catalog(catalog);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Computes the layout `input` would be drawn with.
    pub fn plan(&self, input: &CompositeInput<'_>) -> LayoutResult {
        let screen = input.screen();
        let device = input.device();
        let canvas = Size::new(device.width() as f32, device.height() as f32);

        match (device.device_type(), screen.tablet()) {
            (DeviceType::Tablet, Some(tablet)) => self.layout.calculate_layout(
                tablet.variant(),
                screen.tilt(),
                canvas,
                screen.has_subheading(),
                tablet.orientation(),
            ),
            (device_type, _) => self.layout.calculate(
                screen.tilt(),
                screen.position(),
                screen.full_bleed(),
                canvas,
                screen.has_subheading(),
                device_type,
            ),
        }
    }

    /// Renders one composite.
    ///
    /// The result is always exactly `input.device()` pixels in size.
    ///
    /// # Errors
    ///
    /// Returns [`StoreshotError::CanvasAllocation`] when the output canvas
    /// cannot be allocated. Every other problem (missing frame asset, an
    /// unusable input image, text that does not fit) degrades the output
    /// instead of failing.
    pub fn compose(&self, input: &CompositeInput<'_>) -> Result<Pixmap, StoreshotError> {
        let device = input.device();
        info!(
            device = device.id(),
            width = device.width(),
            height = device.height();
            "Composing screenshot",
        );

        let mut canvas = Canvas::new(device.width(), device.height()).ok_or(
            StoreshotError::CanvasAllocation {
                width: device.width(),
                height: device.height(),
            },
        )?;

        let plan = self.plan(input);
        trace!(plan:?; "Layout plan");

        let frame = self.resolve_frame(device, &plan);
        let frame_geometry = FrameGeometry::new(
            plan.device_rect(),
            plan.device_type(),
            self.config.style().corner_radius(),
        );

        let screenshot = pixmap_from_rgba(input.screenshot());
        if screenshot.is_none() {
            warn!(
                width = input.screenshot().width(),
                height = input.screenshot().height();
                "Screenshot could not be converted, skipping screen layer",
            );
        }

        let layers = RenderLayer::stack(&plan, &frame);
        let painter = Painter {
            input,
            plan: &plan,
            frame: &frame,
            frame_geometry: &frame_geometry,
            screenshot: screenshot.as_ref(),
            frame_style: self.config.style().frame_style(),
            frame_color: self.config.style().frame_color(),
            transform: device_transform(&plan),
        };

        for layer in layers {
            debug!(layer = layer.name(); "Painting layer");
            match layer {
                RenderLayer::Background => painter.background(&mut canvas),
                RenderLayer::Shadow => painter.shadow(&mut canvas),
                RenderLayer::DeviceBody => painter.device_body(&mut canvas),
                RenderLayer::Screen => painter.screen(&mut canvas),
                RenderLayer::DeviceOverlay => painter.device_overlay(&mut canvas),
                RenderLayer::Scrim => painter.scrim(&mut canvas),
                RenderLayer::Text => self.paint_text(&mut canvas, input, &plan),
            }
        }

        Ok(canvas.into_pixmap())
    }

    fn resolve_frame(&self, device: &DeviceSize, plan: &LayoutResult) -> FrameImage {
        let style = self.config.style().frame_style();
        if plan.screenshot_fills_canvas() || plan.is_frameless() || style == FrameStyle::None {
            return FrameImage::Placeholder;
        }
        let frame = self.frames.frame_for(
            device,
            style,
            plan.device_rect().to_size(),
            self.config.style().frame_color(),
            self.config.style().corner_radius(),
        );
        if frame.is_placeholder() {
            warn!(device = device.id(); "Frame image unavailable, drawing device without bezel");
        }
        frame
    }

    fn paint_text(&self, canvas: &mut Canvas, input: &CompositeInput<'_>, plan: &LayoutResult) {
        let screen = input.screen();
        let colors = input.colors();

        let shadow = self.config.text().heading_shadow() || plan.screenshot_fills_canvas();
        if shadow {
            self.text.draw_heading_with_shadow(
                canvas,
                screen.heading(),
                plan.heading_rect(),
                colors.text(),
                plan.heading_font_size(),
            );
        } else {
            self.text.draw_heading(
                canvas,
                screen.heading(),
                plan.heading_rect(),
                colors.text(),
                plan.heading_font_size(),
            );
        }

        if screen.has_subheading() {
            self.text.draw_subheading(
                canvas,
                screen.subheading(),
                plan.subheading_rect(),
                colors.subtext(),
                plan.subheading_font_size(),
            );
        }
    }
}

/// Rotation of the device layer about the device centre.
fn device_transform(plan: &LayoutResult) -> Transform {
    let angle = plan.rotation_angle();
    if angle == 0.0 {
        return Transform::identity();
    }
    let center = plan.rotation_center();
    Transform::from_rotate_at(angle, center.x(), center.y())
}

/// Per-composite state for painting the non-text layers.
struct Painter<'a> {
    input: &'a CompositeInput<'a>,
    plan: &'a LayoutResult,
    frame: &'a FrameImage,
    frame_geometry: &'a FrameGeometry,
    screenshot: Option<&'a Pixmap>,
    frame_style: FrameStyle,
    frame_color: Color,
    transform: Transform,
}

impl Painter<'_> {
    fn background(&self, canvas: &mut Canvas) {
        let full = Bounds::from_xywh(0.0, 0.0, canvas.size().width(), canvas.size().height());

        if let Some(background) = self.input.background() {
            match pixmap_from_rgba(background) {
                Some(pixmap) => {
                    canvas.draw_image_aspect_fill(&pixmap, full, 0.0, Transform::identity());
                    return;
                }
                None => warn!("Background could not be converted, using gradient"),
            }
        }

        let colors = self.input.colors();
        let fill = Fill::Vertical {
            top: colors.accent(),
            bottom: colors.primary(),
        };
        canvas.fill_rounded_rect(full, 0.0, fill, Transform::identity(), None);
    }

    fn shadow(&self, canvas: &mut Canvas) {
        let device = self.plan.device_rect();
        let radius = self.frame_geometry.body_radius();
        let step = device.width() * 0.01;
        for index in 1..=SHADOW_STEPS {
            let spread = step * f32::from(index);
            let bounds = device
                .inset(Insets::uniform(-spread / 2.0))
                .translate(Point::new(0.0, spread));
            canvas.fill_rounded_rect(
                bounds,
                radius + spread / 2.0,
                Fill::Solid(Color::BLACK.with_alpha(0.06)),
                self.transform,
                None,
            );
        }
    }

    fn device_body(&self, canvas: &mut Canvas) {
        if let FrameImage::Procedural(pixmap) = self.frame {
            canvas.draw_image(pixmap, self.plan.device_rect(), self.transform, None);
        }
    }

    fn screen(&self, canvas: &mut Canvas) {
        let Some(screenshot) = self.screenshot else {
            return;
        };

        if self.plan.screenshot_fills_canvas() {
            let full = Bounds::from_xywh(0.0, 0.0, canvas.size().width(), canvas.size().height());
            canvas.draw_image_aspect_fill(screenshot, full, 0.0, Transform::identity());
            return;
        }

        let screen = self.plan.screen_rect();
        let inset_x = self.plan.screen_inset().min_x();
        let radius = (self.frame_geometry.body_radius() - inset_x).max(0.0);
        canvas.draw_image_aspect_fill(screenshot, screen, radius, self.transform);
    }

    fn device_overlay(&self, canvas: &mut Canvas) {
        match self.frame {
            FrameImage::Asset(pixmap) => {
                canvas.draw_image(pixmap, self.plan.device_rect(), self.transform, None);
            }
            FrameImage::Procedural(_) => draw_sensor_overlay(
                canvas,
                self.frame_style,
                self.frame_geometry,
                self.frame_color,
                self.transform,
            ),
            FrameImage::Placeholder => {}
        }
    }

    fn scrim(&self, canvas: &mut Canvas) {
        let Some(scrim) = self.plan.scrim_rect() else {
            return;
        };
        let fill = Fill::Vertical {
            top: Color::BLACK.with_alpha(SCRIM_OPACITY),
            bottom: Color::BLACK.with_alpha(0.0),
        };
        canvas.fill_rounded_rect(scrim, 0.0, fill, Transform::identity(), None);
    }
}
