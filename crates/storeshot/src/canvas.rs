//! Raster canvas used by every drawing stage.
//!
//! [`Canvas`] is a thin layer over a premultiplied-RGBA [`tiny_skia::Pixmap`]
//! exposing just the operations the compositor needs: filling and stroking
//! rounded rectangles, building clip masks, drawing images into rectangles
//! and blending individual glyph pixels. Geometry comes in as
//! [`storeshot_core::geometry`] types so the layout code never touches the
//! raster backend.

use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, GradientStop, LinearGradient, Mask, Paint, Path,
    PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8, Shader, SpreadMode, Stroke,
    Transform,
};

use storeshot_core::{
    color::Color,
    geometry::{Bounds, Point, Size, aspect_fill},
};

/// Bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// How a shape is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Color),
    /// Two-stop gradient running from the top edge of the shape to its bottom.
    Vertical { top: Color, bottom: Color },
}

/// A premultiplied RGBA drawing surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Allocates a transparent canvas; `None` for zero or oversized dimensions.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Fills a rounded rectangle.
    pub fn fill_rounded_rect(
        &mut self,
        bounds: Bounds,
        radius: f32,
        fill: Fill,
        transform: Transform,
        clip: Option<&Mask>,
    ) {
        let Some(path) = rounded_rect_path(bounds, radius) else {
            return;
        };
        let Some(paint) = paint_for(fill, bounds) else {
            return;
        };
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, transform, clip);
    }

    /// Strokes the outline of a rounded rectangle.
    pub fn stroke_rounded_rect(
        &mut self,
        bounds: Bounds,
        radius: f32,
        color: Color,
        width: f32,
        transform: Transform,
    ) {
        if let Some(path) = rounded_rect_path(bounds, radius) {
            self.stroke_path(&path, color, width, transform);
        }
    }

    /// Strokes a straight segment with round caps.
    pub fn stroke_line(
        &mut self,
        from: Point,
        to: Point,
        color: Color,
        width: f32,
        transform: Transform,
    ) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.x(), from.y());
        builder.line_to(to.x(), to.y());
        if let Some(path) = builder.finish() {
            self.stroke_path(&path, color, width, transform);
        }
    }

    /// Fills a circle.
    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Color, transform: Transform) {
        let Some(path) = PathBuilder::from_circle(center.x(), center.y(), radius) else {
            return;
        };
        let paint = solid_paint(color);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, transform, None);
    }

    /// Builds a clip mask covering a rounded rectangle.
    ///
    /// Returns `None` when the rectangle is degenerate, in which case there is
    /// nothing visible to draw through it.
    pub fn clip_mask(&self, bounds: Bounds, radius: f32, transform: Transform) -> Option<Mask> {
        let path = rounded_rect_path(bounds, radius)?;
        let mut mask = Mask::new(self.width(), self.height())?;
        mask.fill_path(&path, FillRule::Winding, true, transform);
        Some(mask)
    }

    /// Draws `image` stretched into `dest`.
    pub fn draw_image(
        &mut self,
        image: &Pixmap,
        dest: Bounds,
        transform: Transform,
        clip: Option<&Mask>,
    ) {
        if dest.to_size().is_empty() {
            return;
        }
        let scale_x = dest.width() / image.width() as f32;
        let scale_y = dest.height() / image.height() as f32;
        let placement = transform
            .pre_translate(dest.min_x(), dest.min_y())
            .pre_scale(scale_x, scale_y);
        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, image.as_ref(), &paint, placement, clip);
    }

    /// Draws `image` aspect-filled into `dest` and clipped to it.
    ///
    /// `radius` rounds the clip; pass `0.0` for a square clip.
    pub fn draw_image_aspect_fill(
        &mut self,
        image: &Pixmap,
        dest: Bounds,
        radius: f32,
        transform: Transform,
    ) {
        let Some(mask) = self.clip_mask(dest, radius, transform) else {
            return;
        };
        let source = Size::new(image.width() as f32, image.height() as f32);
        let drawn = aspect_fill(source, dest);
        self.draw_image(image, drawn, transform, Some(&mask));
    }

    /// Composites one non-premultiplied pixel over the canvas (source-over).
    ///
    /// Out-of-bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let [r, g, b, a] = rgba;
        if a == 0 {
            return;
        }

        let index = y as usize * self.width() as usize + x as usize;
        let pixels = self.pixmap.pixels_mut();
        let dst = pixels[index];

        let src_a = u32::from(a);
        let inv = 255 - src_a;
        let over = |src: u8, dst: u8| -> u32 {
            (u32::from(src) * src_a + u32::from(dst) * inv + 127) / 255
        };
        let out_a = (src_a * 255 + u32::from(dst.alpha()) * inv + 127) / 255;
        let out_a = out_a.min(255) as u8;
        let clamp = |channel: u32| channel.min(u32::from(out_a)) as u8;

        if let Some(blended) = PremultipliedColorU8::from_rgba(
            clamp(over(r, dst.red())),
            clamp(over(g, dst.green())),
            clamp(over(b, dst.blue())),
            out_a,
        ) {
            pixels[index] = blended;
        }
    }

    fn stroke_path(&mut self, path: &Path, color: Color, width: f32, transform: Transform) {
        let paint = solid_paint(color);
        let stroke = Stroke {
            width,
            line_cap: tiny_skia::LineCap::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &paint, &stroke, transform, None);
    }
}

/// Builds a rounded-rectangle path; the radius is clamped to half the
/// shorter side. Returns `None` for an empty rectangle.
pub fn rounded_rect_path(bounds: Bounds, radius: f32) -> Option<Path> {
    if bounds.to_size().is_empty() {
        return None;
    }
    let r = radius.clamp(0.0, bounds.width().min(bounds.height()) / 2.0);
    let (left, top, right, bottom) = (
        bounds.min_x(),
        bounds.min_y(),
        bounds.max_x(),
        bounds.max_y(),
    );
    let handle = r * (1.0 - KAPPA);

    let mut builder = PathBuilder::new();
    builder.move_to(left + r, top);
    builder.line_to(right - r, top);
    builder.cubic_to(right - handle, top, right, top + handle, right, top + r);
    builder.line_to(right, bottom - r);
    builder.cubic_to(right, bottom - handle, right - handle, bottom, right - r, bottom);
    builder.line_to(left + r, bottom);
    builder.cubic_to(left + handle, bottom, left, bottom - handle, left, bottom - r);
    builder.line_to(left, top + r);
    builder.cubic_to(left, top + handle, left + handle, top, left + r, top);
    builder.close();
    builder.finish()
}

/// Converts a Storeshot color into the backend's color type.
pub fn skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

/// Converts a decoded RGBA image into a premultiplied pixmap.
///
/// Returns `None` for an empty image, which callers treat as "layer
/// unavailable".
pub fn pixmap_from_rgba(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Converts a premultiplied pixmap back into a straight-alpha RGBA image.
pub fn rgba_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        dst.0 = [color.red(), color.green(), color.blue(), color.alpha()];
    }
    image
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

fn paint_for(fill: Fill, bounds: Bounds) -> Option<Paint<'static>> {
    match fill {
        Fill::Solid(color) => Some(solid_paint(color)),
        Fill::Vertical { top, bottom } => {
            let x = bounds.center().x();
            let shader: Shader<'static> = LinearGradient::new(
                tiny_skia::Point::from_xy(x, bounds.min_y()),
                tiny_skia::Point::from_xy(x, bounds.max_y()),
                vec![
                    GradientStop::new(0.0, skia_color(top)),
                    GradientStop::new(1.0, skia_color(bottom)),
                ],
                SpreadMode::Pad,
                Transform::identity(),
            )?;
            Some(Paint {
                shader,
                anti_alias: true,
                ..Paint::default()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn pixel(canvas: &Canvas, x: u32, y: u32) -> [u8; 4] {
        let color = canvas.pixmap().pixel(x, y).unwrap().demultiply();
        [color.red(), color.green(), color.blue(), color.alpha()]
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(Canvas::new(0, 10).is_none());
        assert!(Canvas::new(10, 0).is_none());
        assert!(Canvas::new(10, 10).is_some());
    }

    #[test]
    fn test_rounded_rect_path_empty_bounds() {
        assert!(rounded_rect_path(Bounds::ZERO, 4.0).is_none());
        assert!(rounded_rect_path(Bounds::from_xywh(0.0, 0.0, 10.0, 10.0), 100.0).is_some());
    }

    #[test]
    fn test_fill_rounded_rect_solid() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        canvas.fill_rounded_rect(
            Bounds::from_xywh(0.0, 0.0, 20.0, 20.0),
            0.0,
            Fill::Solid(Color::from_rgb8(255, 0, 0)),
            Transform::identity(),
            None,
        );
        assert_eq!(pixel(&canvas, 10, 10), [255, 0, 0, 255]);
    }

    #[test]
    fn test_rounded_corners_stay_transparent() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        canvas.fill_rounded_rect(
            Bounds::from_xywh(0.0, 0.0, 40.0, 40.0),
            16.0,
            Fill::Solid(Color::WHITE),
            Transform::identity(),
            None,
        );
        assert_eq!(pixel(&canvas, 0, 0)[3], 0);
        assert_eq!(pixel(&canvas, 20, 20), [255, 255, 255, 255]);
    }

    #[test]
    fn test_vertical_gradient_runs_top_to_bottom() {
        let mut canvas = Canvas::new(10, 100).unwrap();
        canvas.fill_rounded_rect(
            Bounds::from_xywh(0.0, 0.0, 10.0, 100.0),
            0.0,
            Fill::Vertical {
                top: Color::from_rgb8(0, 0, 255),
                bottom: Color::from_rgb8(255, 0, 0),
            },
            Transform::identity(),
            None,
        );
        let top = pixel(&canvas, 5, 1);
        let bottom = pixel(&canvas, 5, 98);
        assert!(top[2] > 240 && top[0] < 15);
        assert!(bottom[0] > 240 && bottom[2] < 15);
    }

    #[test]
    fn test_draw_image_aspect_fill_covers_clip() {
        let mut source = RgbaImage::new(4, 8);
        for pixel in source.pixels_mut() {
            *pixel = Rgba([0, 255, 0, 255]);
        }
        let image = pixmap_from_rgba(&source).unwrap();

        let mut canvas = Canvas::new(50, 50).unwrap();
        let dest = Bounds::from_xywh(10.0, 10.0, 30.0, 30.0);
        canvas.draw_image_aspect_fill(&image, dest, 0.0, Transform::identity());

        for (x, y) in [(25, 25), (12, 12), (38, 38)] {
            let [r, g, _, a] = pixel(&canvas, x, y);
            assert!(r < 5 && g > 250 && a > 250, "pixel ({x}, {y})");
        }
        // Outside the clip nothing is drawn even though the image overflows.
        assert_eq!(pixel(&canvas, 25, 5)[3], 0);
        assert_eq!(pixel(&canvas, 25, 45)[3], 0);
    }

    #[test]
    fn test_blend_pixel_source_over() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        canvas.blend_pixel(0, 0, [255, 255, 255, 255]);
        canvas.blend_pixel(0, 0, [0, 0, 0, 128]);
        let [r, _, _, a] = pixel(&canvas, 0, 0);
        assert_eq!(a, 255);
        assert!((126..=128).contains(&r), "got {r}");

        // Out of bounds is ignored.
        canvas.blend_pixel(-1, 0, [255, 0, 0, 255]);
        canvas.blend_pixel(0, 5, [255, 0, 0, 255]);
    }

    #[test]
    fn test_rgba_round_trip_preserves_opaque_pixels() {
        let mut source = RgbaImage::new(3, 2);
        source.put_pixel(1, 1, Rgba([12, 34, 56, 255]));
        let pixmap = pixmap_from_rgba(&source).unwrap();
        let back = rgba_from_pixmap(&pixmap);
        assert_eq!(back.get_pixel(1, 1), &Rgba([12, 34, 56, 255]));
        assert_eq!(back.dimensions(), (3, 2));
    }

    #[test]
    fn test_pixmap_from_empty_image() {
        assert!(pixmap_from_rgba(&RgbaImage::new(0, 0)).is_none());
    }
}
