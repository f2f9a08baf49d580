//! Procedurally drawn device frames.
//!
//! Every style shares the same anatomy: a rounded body, an opaque screen
//! cutout inset from the body edge, and a sensor housing at the top of the
//! cutout (a pill for phones, a camera dot in the bezel for tablets). The
//! styles differ only in how each part is painted.

use log::warn;
use tiny_skia::Transform;

use storeshot_core::{
    color::Color,
    device::DeviceType,
    geometry::{Bounds, Insets, Point, Size},
};

use super::{FrameImage, FrameStyle, default_corner_radius};
use crate::canvas::{Canvas, Fill};

/// Cutout inset as a fraction of the device width.
pub const CUTOUT_INSET: f32 = 0.025;

const CUTOUT_COLOR: Color = Color::from_rgb8(0x0A, 0x0A, 0x0C);
const CAMERA_COLOR: Color = Color::from_rgb8(0x2C, 0x2C, 0x2E);

/// Sensor housing drawn at the top of the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sensor {
    /// Phone notch, drawn as a fully rounded pill.
    Pill(Bounds),
    /// Tablet front camera centred in the top bezel.
    Camera { center: Point, radius: f32 },
}

/// Body and cutout geometry for a device of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    body: Bounds,
    body_radius: f32,
    cutout: Bounds,
    cutout_radius: f32,
    sensor: Sensor,
}

impl FrameGeometry {
    /// Lays out a frame occupying `bounds`.
    ///
    /// `corner_radius` overrides the device-type default.
    pub fn new(bounds: Bounds, device_type: DeviceType, corner_radius: Option<f32>) -> Self {
        let width = bounds.width();
        let body_radius =
            corner_radius.unwrap_or_else(|| default_corner_radius(device_type, width));
        let inset = width * CUTOUT_INSET;
        let cutout = bounds.inset(Insets::uniform(inset));
        let cutout_radius = (body_radius - inset).max(0.0);

        let sensor = match device_type {
            DeviceType::Phone => {
                let pill = Size::new(width * 0.29, width * 0.086);
                let top = cutout.min_y() + width * 0.027;
                let left = bounds.center().x() - pill.width() / 2.0;
                Sensor::Pill(Bounds::new_from_top_left(Point::new(left, top), pill))
            }
            DeviceType::Tablet => Sensor::Camera {
                center: Point::new(bounds.center().x(), bounds.min_y() + inset / 2.0),
                radius: width * 0.006,
            },
        };

        Self {
            body: bounds,
            body_radius,
            cutout,
            cutout_radius,
            sensor,
        }
    }

    pub fn body(&self) -> Bounds {
        self.body
    }

    pub fn body_radius(&self) -> f32 {
        self.body_radius
    }

    pub fn cutout(&self) -> Bounds {
        self.cutout
    }

    pub fn cutout_radius(&self) -> f32 {
        self.cutout_radius
    }

    pub fn sensor(&self) -> Sensor {
        self.sensor
    }
}

/// Draws a complete frame in `style` into a new image of `size`.
///
/// Returns [`FrameImage::Placeholder`] when the image cannot be allocated or
/// `style` is [`FrameStyle::None`].
pub fn generate_frame(
    style: FrameStyle,
    size: Size,
    device_type: DeviceType,
    color: Color,
    corner_radius: Option<f32>,
) -> FrameImage {
    if style == FrameStyle::None {
        return FrameImage::Placeholder;
    }
    let width = size.width().ceil().max(0.0) as u32;
    let height = size.height().ceil().max(0.0) as u32;
    let Some(mut canvas) = Canvas::new(width, height) else {
        warn!(width, height; "Frame image could not be allocated");
        return FrameImage::Placeholder;
    };

    let geometry = FrameGeometry::new(
        Bounds::from_xywh(0.0, 0.0, size.width(), size.height()),
        device_type,
        corner_radius,
    );
    paint_frame(&mut canvas, style, &geometry, color, Transform::identity());
    draw_sensor_overlay(&mut canvas, style, &geometry, color, Transform::identity());
    FrameImage::Procedural(canvas.into_pixmap())
}

/// Dark body, rim highlight and opaque cutout.
pub fn generate_realistic_frame(
    size: Size,
    device_type: DeviceType,
    color: Color,
    corner_radius: Option<f32>,
) -> FrameImage {
    generate_frame(FrameStyle::Realistic, size, device_type, color, corner_radius)
}

/// Flat single-color body.
pub fn generate_clay_frame(
    size: Size,
    device_type: DeviceType,
    color: Color,
    corner_radius: Option<f32>,
) -> FrameImage {
    generate_frame(FrameStyle::Clay, size, device_type, color, corner_radius)
}

/// Outline only; the body stays transparent.
pub fn generate_minimal_frame(
    size: Size,
    device_type: DeviceType,
    color: Color,
    corner_radius: Option<f32>,
) -> FrameImage {
    generate_frame(FrameStyle::Minimal, size, device_type, color, corner_radius)
}

/// Gradient body with a translucent highlight along the top edge.
pub fn generate_glass_frame(
    size: Size,
    device_type: DeviceType,
    color: Color,
    corner_radius: Option<f32>,
) -> FrameImage {
    generate_frame(FrameStyle::Glass, size, device_type, color, corner_radius)
}

/// Paints body and cutout for `style`, without the sensor housing.
pub fn paint_frame(
    canvas: &mut Canvas,
    style: FrameStyle,
    geometry: &FrameGeometry,
    color: Color,
    transform: Transform,
) {
    let body = geometry.body();
    let width = body.width();
    let radius = geometry.body_radius();

    match style {
        FrameStyle::None => {}
        FrameStyle::Realistic => {
            canvas.fill_rounded_rect(body, radius, Fill::Solid(color), transform, None);
            let rim = width * 0.004;
            let rim_bounds = body.inset(Insets::uniform(rim / 2.0));
            canvas.stroke_rounded_rect(
                rim_bounds,
                (radius - rim / 2.0).max(0.0),
                color.lighten(0.25),
                rim,
                transform,
            );
            fill_cutout(canvas, geometry, transform);
        }
        FrameStyle::Clay => {
            canvas.fill_rounded_rect(body, radius, Fill::Solid(color), transform, None);
            fill_cutout(canvas, geometry, transform);
        }
        FrameStyle::Minimal => {
            let outer = width * 0.006;
            let outer_bounds = body.inset(Insets::uniform(outer / 2.0));
            canvas.stroke_rounded_rect(
                outer_bounds,
                (radius - outer / 2.0).max(0.0),
                color,
                outer,
                transform,
            );
            canvas.stroke_rounded_rect(
                geometry.cutout(),
                geometry.cutout_radius(),
                color.with_alpha(0.5),
                width * 0.003,
                transform,
            );
        }
        FrameStyle::Glass => {
            let fill = Fill::Vertical {
                top: color.lighten(0.25),
                bottom: color,
            };
            canvas.fill_rounded_rect(body, radius, fill, transform, None);
            fill_cutout(canvas, geometry, transform);

            let line = width * 0.004;
            let y = body.min_y() + line;
            canvas.stroke_line(
                Point::new(body.min_x() + radius, y),
                Point::new(body.max_x() - radius, y),
                Color::WHITE.with_alpha(0.35),
                line,
                transform,
            );
        }
    }
}

/// Draws the notch or camera on top of whatever is already on the canvas.
///
/// Called after the screenshot so the sensor stays visible over the screen.
pub fn draw_sensor_overlay(
    canvas: &mut Canvas,
    style: FrameStyle,
    geometry: &FrameGeometry,
    color: Color,
    transform: Transform,
) {
    let width = geometry.body().width();
    match (style, geometry.sensor()) {
        (FrameStyle::None, _) => {}
        (FrameStyle::Minimal, Sensor::Pill(pill)) => {
            canvas.stroke_rounded_rect(
                pill,
                pill.height() / 2.0,
                color.with_alpha(0.5),
                width * 0.003,
                transform,
            );
        }
        (FrameStyle::Minimal, Sensor::Camera { center, radius }) => {
            canvas.fill_circle(center, radius, color.with_alpha(0.5), transform);
        }
        (_, Sensor::Pill(pill)) => {
            canvas.fill_rounded_rect(
                pill,
                pill.height() / 2.0,
                Fill::Solid(Color::BLACK),
                transform,
                None,
            );
        }
        (_, Sensor::Camera { center, radius }) => {
            canvas.fill_circle(center, radius, CAMERA_COLOR, transform);
        }
    }
}

fn fill_cutout(canvas: &mut Canvas, geometry: &FrameGeometry, transform: Transform) {
    canvas.fill_rounded_rect(
        geometry.cutout(),
        geometry.cutout_radius(),
        Fill::Solid(CUTOUT_COLOR),
        transform,
        None,
    );
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    const BODY: Color = Color::from_rgb8(0x1C, 0x1C, 0x1E);

    fn pixel(frame: &FrameImage, x: u32, y: u32) -> [u8; 4] {
        let pixmap = frame.pixmap().unwrap();
        let p = pixmap.pixel(x, y).unwrap();
        [p.red(), p.green(), p.blue(), p.alpha()]
    }

    #[test]
    fn test_geometry_phone() {
        let geometry = FrameGeometry::new(
            Bounds::from_xywh(0.0, 0.0, 1000.0, 2000.0),
            DeviceType::Phone,
            None,
        );
        assert_approx_eq!(f32, geometry.body_radius(), 80.0);
        assert_approx_eq!(f32, geometry.cutout().min_x(), 25.0);
        assert_approx_eq!(f32, geometry.cutout_radius(), 55.0);

        let Sensor::Pill(pill) = geometry.sensor() else {
            panic!("phones have a pill sensor");
        };
        assert_approx_eq!(f32, pill.width(), 290.0);
        assert_approx_eq!(f32, pill.height(), 86.0);
        assert_approx_eq!(f32, pill.min_y(), 52.0);
        assert_approx_eq!(f32, pill.center().x(), 500.0);
    }

    #[test]
    fn test_geometry_tablet_camera_in_bezel() {
        let geometry = FrameGeometry::new(
            Bounds::from_xywh(0.0, 0.0, 1000.0, 750.0),
            DeviceType::Tablet,
            None,
        );
        assert_approx_eq!(f32, geometry.body_radius(), 50.0);
        let Sensor::Camera { center, radius } = geometry.sensor() else {
            panic!("tablets have a camera sensor");
        };
        assert_approx_eq!(f32, center.y(), 12.5);
        assert_approx_eq!(f32, radius, 6.0);
        assert!(center.y() < geometry.cutout().min_y());
    }

    #[test]
    fn test_corner_radius_override() {
        let geometry = FrameGeometry::new(
            Bounds::from_xywh(0.0, 0.0, 1000.0, 2000.0),
            DeviceType::Phone,
            Some(10.0),
        );
        assert_approx_eq!(f32, geometry.body_radius(), 10.0);
        assert_approx_eq!(f32, geometry.cutout_radius(), 0.0);
    }

    #[test]
    fn test_clay_frame_pixels() {
        let frame = generate_clay_frame(Size::new(200.0, 400.0), DeviceType::Phone, BODY, None);
        assert!(matches!(frame, FrameImage::Procedural(_)));

        // Bezel between body edge and cutout.
        assert_eq!(pixel(&frame, 100, 398), [0x1C, 0x1C, 0x1E, 255]);
        // Cutout.
        assert_eq!(pixel(&frame, 100, 200), [0x0A, 0x0A, 0x0C, 255]);
        // Outside the rounded corner.
        assert_eq!(pixel(&frame, 0, 0)[3], 0);
    }

    #[test]
    fn test_minimal_frame_is_hollow() {
        let frame = generate_minimal_frame(
            Size::new(200.0, 400.0),
            DeviceType::Phone,
            Color::WHITE,
            None,
        );
        assert_eq!(pixel(&frame, 100, 200)[3], 0);
        assert!(pixel(&frame, 100, 399)[3] > 0);
    }

    #[test]
    fn test_glass_frame_gradient_lighter_at_top() {
        let frame = generate_glass_frame(Size::new(200.0, 400.0), DeviceType::Tablet, BODY, None);
        let top = pixel(&frame, 2, 100);
        let bottom = pixel(&frame, 2, 300);
        assert!(top[0] > bottom[0]);
    }

    #[test]
    fn test_realistic_frame_has_notch() {
        let frame =
            generate_realistic_frame(Size::new(200.0, 400.0), DeviceType::Phone, BODY, None);
        // Pill spans y 10.4..27.6
        assert_eq!(pixel(&frame, 100, 18), [0, 0, 0, 255]);
    }

    #[test]
    fn test_placeholders() {
        let none = generate_frame(
            FrameStyle::None,
            Size::new(200.0, 400.0),
            DeviceType::Phone,
            BODY,
            None,
        );
        assert!(none.is_placeholder());

        let empty = generate_clay_frame(Size::new(0.0, 0.0), DeviceType::Phone, BODY, None);
        assert!(empty.is_placeholder());
        assert!(empty.pixmap().is_none());
    }
}
