//! Heading and subheading rendering.
//!
//! Text is fitted before it is drawn: starting from the layout's font size,
//! the string is word-wrapped to the target rectangle's width and the size
//! shrinks in fixed steps until the wrapped block fits the rectangle's
//! height, or a floor of half the starting size is reached. The floor is
//! used even when the block still overflows.
//!
//! Shaping and rasterization go through cosmic-text. Glyph coverage is
//! blended straight into the [`Canvas`], one pixel at a time.

use std::{
    cell::RefCell,
    iter,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, Weight};
use log::{debug, info, warn};

use storeshot_core::{
    color::Color,
    geometry::{Bounds, Point},
};

use crate::canvas::Canvas;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.2;

/// Size decrement between fitting attempts, in points.
pub const FIT_STEP: f32 = 2.0;

/// Smallest size fitting may reach, as a fraction of the starting size.
pub const FIT_FLOOR: f32 = 0.5;

const HEADING_TRACKING: f32 = -0.01;
const ALL_CAPS_TRACKING: f32 = 0.05;

/// (downward offset, opacity) of each shadow pass, both relative to the
/// font size, drawn in order before the solid text.
const SHADOW_PASSES: [(f32, f32); 3] = [(0.06, 0.10), (0.04, 0.18), (0.02, 0.28)];

/// Font parameters needed to measure or draw one line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    font_size: f32,
    bold: bool,
    /// Extra advance after each glyph, in ems.
    tracking: f32,
}

impl TextStyle {
    pub fn new(font_size: f32, bold: bool) -> Self {
        Self {
            font_size,
            bold,
            tracking: 0.0,
        }
    }

    pub fn with_tracking(mut self, tracking: f32) -> Self {
        self.tracking = tracking;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn tracking(&self) -> f32 {
        self.tracking
    }

    /// Tracking in pixels at this size.
    pub fn tracking_px(&self) -> f32 {
        self.tracking * self.font_size
    }

    pub fn line_height(&self) -> f32 {
        self.font_size * LINE_HEIGHT
    }
}

/// Measures the advance width of a single unwrapped line.
pub trait TextMeasure {
    fn line_width(&self, line: &str, style: &TextStyle) -> f32;
}

/// One wrapped line positioned inside its rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    text: String,
    /// Top-left of the line box.
    origin: Point,
    width: f32,
}

impl PlacedLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

/// True when `text` contains letters and none of them are lower-case.
pub fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase)
}

/// Heading tracking: slightly tight, but open for all-caps strings.
pub fn heading_tracking(text: &str) -> f32 {
    if is_all_caps(text) {
        ALL_CAPS_TRACKING
    } else {
        HEADING_TRACKING
    }
}

/// Sizes tried by [`adaptive_font_size`], largest first.
///
/// Yields `max_size`, then steps down by [`FIT_STEP`] while staying above
/// the floor, and always ends with the floor itself.
pub fn font_size_candidates(max_size: f32) -> impl Iterator<Item = f32> {
    let floor = max_size * FIT_FLOOR;
    iter::successors(Some(max_size), move |size| {
        let next = size - FIT_STEP;
        (next > floor).then_some(next)
    })
    .filter(move |size| *size > floor)
    .chain(iter::once(floor))
}

/// Greedy word wrap of `text` to `max_width`.
///
/// Explicit newlines always break. A word wider than `max_width` gets a
/// line of its own.
pub fn wrap_lines(
    measure: &impl TextMeasure,
    text: &str,
    style: &TextStyle,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure.line_width(&candidate, style) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Height of `line_count` lines at `style`'s size.
pub fn block_height(line_count: usize, style: &TextStyle) -> f32 {
    line_count as f32 * style.line_height()
}

/// Largest candidate size at which `text`, wrapped to `rect`'s width, fits
/// `rect`'s height.
///
/// Never returns less than half of `max_size`; at that floor the text is
/// returned as-is even if it overflows.
pub fn adaptive_font_size(
    measure: &impl TextMeasure,
    text: &str,
    max_size: f32,
    rect: Bounds,
    style: &TextStyle,
) -> f32 {
    let floor = max_size * FIT_FLOOR;
    for size in font_size_candidates(max_size) {
        let sized = style.with_font_size(size);
        let lines = wrap_lines(measure, text, &sized, rect.width());
        if block_height(lines.len(), &sized) <= rect.height() {
            return size;
        }
    }
    warn!(
        max_size,
        floor,
        height = rect.height();
        "Text does not fit at the smallest size, allowing overflow",
    );
    floor
}

/// Wraps `text` and centers the block in `rect`.
///
/// The block is centered vertically as a whole; each line is centered
/// horizontally on its own.
pub fn layout_block(
    measure: &impl TextMeasure,
    text: &str,
    rect: Bounds,
    style: &TextStyle,
) -> Vec<PlacedLine> {
    let lines = wrap_lines(measure, text, style, rect.width());
    let line_height = style.line_height();
    let top = rect.min_y() + (rect.height() - block_height(lines.len(), style)) / 2.0;
    let center_x = rect.center().x();

    lines
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let width = measure.line_width(&text, style);
            PlacedLine {
                origin: Point::new(center_x - width / 2.0, top + index as f32 * line_height),
                width,
                text,
            }
        })
        .collect()
}

/// Draws headings and subheadings with system fonts.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    family: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new("sans-serif")
    }
}

impl TextRenderer {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Fits and draws a bold heading.
    pub fn draw_heading(
        &self,
        canvas: &mut Canvas,
        text: &str,
        rect: Bounds,
        color: Color,
        font_size: f32,
    ) {
        let style = TextStyle::new(font_size, true).with_tracking(heading_tracking(text));
        self.draw_fitted(canvas, text, rect, color, style, false);
    }

    /// Fits and draws a regular-weight subheading.
    pub fn draw_subheading(
        &self,
        canvas: &mut Canvas,
        text: &str,
        rect: Bounds,
        color: Color,
        font_size: f32,
    ) {
        let style = TextStyle::new(font_size, false);
        self.draw_fitted(canvas, text, rect, color, style, false);
    }

    /// Like [`draw_heading`](Self::draw_heading), with a layered soft
    /// shadow beneath the text.
    pub fn draw_heading_with_shadow(
        &self,
        canvas: &mut Canvas,
        text: &str,
        rect: Bounds,
        color: Color,
        font_size: f32,
    ) {
        let style = TextStyle::new(font_size, true).with_tracking(heading_tracking(text));
        self.draw_fitted(canvas, text, rect, color, style, true);
    }

    fn draw_fitted(
        &self,
        canvas: &mut Canvas,
        text: &str,
        rect: Bounds,
        color: Color,
        style: TextStyle,
        shadow: bool,
    ) {
        if text.trim().is_empty() || rect.to_size().is_empty() {
            return;
        }

        let mut engine = text_manager().lock();
        let (style, lines) = {
            let measure = FontMeasure {
                engine: RefCell::new(&mut *engine),
                family: &self.family,
            };
            let size = adaptive_font_size(&measure, text, style.font_size(), rect, &style);
            let style = style.with_font_size(size);
            let lines = layout_block(&measure, text, rect, &style);
            (style, lines)
        };
        let size = style.font_size();
        debug!(size, lines = lines.len(); "Drawing text block");

        if shadow {
            for (offset, opacity) in SHADOW_PASSES {
                let shadow_color = Color::BLACK.with_alpha(opacity);
                let offset = Point::new(0.0, offset * size);
                engine.draw_lines(canvas, &lines, &self.family, &style, shadow_color, offset);
            }
        }
        engine.draw_lines(canvas, &lines, &self.family, &style, color, Point::default());
    }
}

/// Font database and glyph cache, shared by every renderer in the process.
struct TextEngine {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TextEngine {
    fn shape(&mut self, line: &str, family: &str, style: &TextStyle) -> Buffer {
        let metrics = Metrics::new(style.font_size(), style.line_height());
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        {
            let mut buffer = buffer.borrow_with(&mut self.font_system);
            let weight = if style.bold() {
                Weight::BOLD
            } else {
                Weight::NORMAL
            };
            let attrs = Attrs::new().family(family_for(family)).weight(weight);
            buffer.set_size(None, None);
            buffer.set_text(line, &attrs, Shaping::Advanced, None);
            buffer.shape_until_scroll(true);
        }
        buffer
    }

    fn line_width(&mut self, line: &str, family: &str, style: &TextStyle) -> f32 {
        if line.is_empty() {
            return 0.0;
        }
        let buffer = self.shape(line, family, style);
        let mut width: f32 = 0.0;
        let mut glyph_count = 0usize;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                width = width.max(last.x + last.w);
            }
            glyph_count += run.glyphs.len();
        }

        if glyph_count == 0 {
            // No usable font: estimate so layout still behaves.
            let chars = line.chars().count();
            return chars as f32 * style.font_size() * 0.55
                + chars.saturating_sub(1) as f32 * style.tracking_px();
        }
        width + glyph_count.saturating_sub(1) as f32 * style.tracking_px()
    }

    fn draw_lines(
        &mut self,
        canvas: &mut Canvas,
        lines: &[PlacedLine],
        family: &str,
        style: &TextStyle,
        color: Color,
        offset: Point,
    ) {
        let [r, g, b, a] = color.to_rgba8();
        let base = cosmic_text::Color::rgba(r, g, b, 255);
        let tracking = style.tracking_px();

        for line in lines {
            let buffer = self.shape(line.text(), family, style);
            let origin = line.origin().add_point(offset);
            // Tracking accumulates across every run of the line, matching
            // `line_width`.
            let mut glyph_index = 0usize;
            for run in buffer.layout_runs() {
                for glyph in run.glyphs.iter() {
                    let x = origin.x() + glyph_index as f32 * tracking;
                    glyph_index += 1;
                    let physical = glyph.physical((x, origin.y() + run.line_y), 1.0);
                    self.swash_cache.with_pixels(
                        &mut self.font_system,
                        physical.cache_key,
                        base,
                        |dx, dy, coverage| {
                            let [cr, cg, cb, ca] = coverage.as_rgba();
                            let alpha = (u32::from(ca) * u32::from(a) + 127) / 255;
                            canvas.blend_pixel(
                                physical.x + dx,
                                physical.y + dy,
                                [cr, cg, cb, alpha as u8],
                            );
                        },
                    );
                }
            }
        }
    }
}

/// Lazily created owner of the shared [`TextEngine`].
struct TextManager {
    engine: Mutex<TextEngine>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            engine: Mutex::new(TextEngine {
                font_system: FontSystem::new(),
                swash_cache: SwashCache::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TextEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

fn text_manager() -> &'static TextManager {
    TEXT_MANAGER.get_or_init(TextManager::new)
}

/// [`TextMeasure`] backed by the shared font system.
struct FontMeasure<'a> {
    engine: RefCell<&'a mut TextEngine>,
    family: &'a str,
}

impl TextMeasure for FontMeasure<'_> {
    fn line_width(&self, line: &str, style: &TextStyle) -> f32 {
        self.engine.borrow_mut().line_width(line, self.family, style)
    }
}

fn family_for(name: &str) -> Family<'_> {
    match name {
        "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        other => Family::Name(other),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    /// Every character is half an em wide.
    struct FixedAdvance;

    impl TextMeasure for FixedAdvance {
        fn line_width(&self, line: &str, style: &TextStyle) -> f32 {
            let chars = line.chars().count();
            chars as f32 * style.font_size() * 0.5
                + chars.saturating_sub(1) as f32 * style.tracking_px()
        }
    }

    #[test]
    fn test_all_caps_detection() {
        assert!(is_all_caps("BOOK IN SECONDS"));
        assert!(is_all_caps("NEW IN 2.0!"));
        assert!(!is_all_caps("Book in seconds"));
        assert!(!is_all_caps("2024"));
        assert!(!is_all_caps(""));
    }

    #[test]
    fn test_heading_tracking() {
        assert_approx_eq!(f32, heading_tracking("Plan your week"), -0.01);
        assert_approx_eq!(f32, heading_tracking("PLAN YOUR WEEK"), 0.05);
    }

    #[test]
    fn test_font_size_candidates() {
        let sizes: Vec<f32> = font_size_candidates(10.0).collect();
        assert_eq!(sizes, vec![10.0, 8.0, 6.0, 5.0]);

        let sizes: Vec<f32> = font_size_candidates(12.0).collect();
        assert_eq!(sizes, vec![12.0, 10.0, 8.0, 6.0]);
    }

    #[test]
    fn test_wrap_lines() {
        let style = TextStyle::new(10.0, false);
        // "aaaa bbbb" is 45 wide at 5 per char.
        let lines = wrap_lines(&FixedAdvance, "aaaa bbbb cccc", &style, 45.0);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);

        let lines = wrap_lines(&FixedAdvance, "one\ntwo", &style, 1000.0);
        assert_eq!(lines, vec!["one", "two"]);

        let lines = wrap_lines(&FixedAdvance, "extraordinarily", &style, 10.0);
        assert_eq!(lines, vec!["extraordinarily"]);
    }

    #[test]
    fn test_adaptive_font_size_keeps_max_when_it_fits() {
        let rect = Bounds::from_xywh(0.0, 0.0, 1000.0, 100.0);
        let style = TextStyle::new(40.0, true);
        let size = adaptive_font_size(&FixedAdvance, "Short", 40.0, rect, &style);
        assert_approx_eq!(f32, size, 40.0);
    }

    #[test]
    fn test_adaptive_font_size_shrinks() {
        // One line needs 1.2 * size; a 30px rect fits size 24 or less.
        let rect = Bounds::from_xywh(0.0, 0.0, 1000.0, 30.0);
        let style = TextStyle::new(30.0, true);
        let size = adaptive_font_size(&FixedAdvance, "Short", 30.0, rect, &style);
        assert_approx_eq!(f32, size, 24.0);
    }

    #[test]
    fn test_adaptive_font_size_floors_on_overflow() {
        let rect = Bounds::from_xywh(0.0, 0.0, 50.0, 10.0);
        let style = TextStyle::new(40.0, true);
        let text = "This heading is far too long for such a tiny box";
        let size = adaptive_font_size(&FixedAdvance, text, 40.0, rect, &style);
        assert_approx_eq!(f32, size, 20.0);
    }

    #[test]
    fn test_layout_block_centers_lines() {
        let style = TextStyle::new(10.0, false);
        let rect = Bounds::from_xywh(0.0, 0.0, 45.0, 100.0);
        let lines = layout_block(&FixedAdvance, "aaaa bbbb cc", rect, &style);

        assert_eq!(lines.len(), 2);
        // Block height 24, so the first line starts at (100 - 24) / 2.
        assert_approx_eq!(f32, lines[0].origin().y(), 38.0);
        assert_approx_eq!(f32, lines[1].origin().y(), 50.0);
        assert_approx_eq!(f32, lines[0].origin().x(), 0.0);
        assert_approx_eq!(f32, lines[1].width(), 10.0);
        assert_approx_eq!(f32, lines[1].origin().x(), 17.5);
    }

    #[test]
    fn test_tracking_widens_lines() {
        let plain = TextStyle::new(10.0, true);
        let tracked = plain.with_tracking(0.05);
        assert!(FixedAdvance.line_width("HELLO", &tracked) > FixedAdvance.line_width("HELLO", &plain));
        assert_approx_eq!(f32, tracked.tracking_px(), 0.5);
    }

    #[test]
    fn test_draw_blank_text_is_noop() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        let rect = Bounds::from_xywh(0.0, 0.0, 20.0, 20.0);
        TextRenderer::default().draw_heading(&mut canvas, "   ", rect, Color::WHITE, 12.0);
        assert!(canvas.pixmap().pixels().iter().all(|p| p.alpha() == 0));
    }

    const GRAY: [u8; 4] = [128, 128, 128, 255];

    fn gray_canvas(width: u32, height: u32) -> Canvas {
        let mut canvas = Canvas::new(width, height).unwrap();
        let full = Bounds::from_xywh(0.0, 0.0, width as f32, height as f32);
        canvas.fill_rounded_rect(
            full,
            0.0,
            crate::canvas::Fill::Solid(Color::from_rgb8(128, 128, 128)),
            tiny_skia::Transform::identity(),
            None,
        );
        canvas
    }

    fn rgba(canvas: &Canvas, x: u32, y: u32) -> [u8; 4] {
        let p = canvas.pixmap().pixel(x, y).unwrap();
        [p.red(), p.green(), p.blue(), p.alpha()]
    }

    /// Rows and columns of every pixel `pick` accepts.
    fn matching(canvas: &Canvas, pick: impl Fn([u8; 4]) -> bool) -> Vec<(u32, u32)> {
        let (width, height) = (canvas.pixmap().width(), canvas.pixmap().height());
        (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&(x, y)| pick(rgba(canvas, x, y)))
            .collect()
    }

    fn inked_span(canvas: &Canvas) -> f32 {
        let inked = matching(canvas, |p| p != GRAY);
        assert!(!inked.is_empty(), "nothing was drawn");
        let min_x = inked.iter().map(|(x, _)| *x).min().unwrap();
        let max_x = inked.iter().map(|(x, _)| *x).max().unwrap();
        (max_x - min_x) as f32
    }

    #[test]
    fn test_heading_shadow_darkens_below_glyphs() {
        let rect = Bounds::from_xywh(0.0, 0.0, 400.0, 120.0);
        let renderer = TextRenderer::default();

        let mut plain = gray_canvas(400, 120);
        renderer.draw_heading(&mut plain, "Shadow", rect, Color::WHITE, 48.0);
        let mut shadowed = gray_canvas(400, 120);
        renderer.draw_heading_with_shadow(&mut shadowed, "Shadow", rect, Color::WHITE, 48.0);

        // White over gray only ever lightens.
        let darker = |p: [u8; 4]| p[0] < GRAY[0];
        assert!(matching(&plain, darker).is_empty());

        let ink_bottom = matching(&plain, |p| p != GRAY)
            .iter()
            .map(|(_, y)| *y)
            .max()
            .expect("heading was drawn");
        let shadow = matching(&shadowed, darker);
        assert!(!shadow.is_empty());
        let shadow_bottom = shadow.iter().map(|(_, y)| *y).max().unwrap();
        assert!(
            shadow_bottom > ink_bottom,
            "shadow ends at row {shadow_bottom}, glyphs at row {ink_bottom}"
        );
    }

    #[test]
    fn test_all_caps_heading_draws_wider() {
        let rect = Bounds::from_xywh(0.0, 0.0, 600.0, 120.0);
        let renderer = TextRenderer::default();

        let mut caps = gray_canvas(600, 120);
        renderer.draw_heading(&mut caps, "HELLO", rect, Color::WHITE, 48.0);
        let mut mixed = gray_canvas(600, 120);
        renderer.draw_heading(&mut mixed, "Hello", rect, Color::WHITE, 48.0);

        assert!(inked_span(&caps) > inked_span(&mixed));
    }

    #[test]
    fn test_drawn_tracking_spreads_glyphs() {
        let draw = |tracking: f32| {
            let mut canvas = gray_canvas(600, 120);
            let line = PlacedLine {
                text: "HELLO".to_string(),
                origin: Point::new(20.0, 20.0),
                width: 0.0,
            };
            let style = TextStyle::new(48.0, true).with_tracking(tracking);
            text_manager().lock().draw_lines(
                &mut canvas,
                &[line],
                "sans-serif",
                &style,
                Color::WHITE,
                Point::default(),
            );
            inked_span(&canvas)
        };

        let tight = draw(HEADING_TRACKING);
        let loose = draw(ALL_CAPS_TRACKING);
        // Four gaps between five glyphs, each 0.06 em wider.
        assert_approx_eq!(f32, loose - tight, 4.0 * 0.06 * 48.0, epsilon = 2.0);
    }

    proptest! {
        #[test]
        fn prop_candidates_non_increasing_and_floored(max in 0.0f32..400.0) {
            let sizes: Vec<f32> = font_size_candidates(max).collect();
            prop_assert!(!sizes.is_empty());
            for pair in sizes.windows(2) {
                prop_assert!(pair[1] <= pair[0]);
            }
            for size in &sizes {
                prop_assert!(*size >= max * FIT_FLOOR);
            }
            prop_assert_eq!(*sizes.last().unwrap(), max * FIT_FLOOR);
        }

        #[test]
        fn prop_adaptive_size_within_range(
            max in 1.0f32..300.0,
            width in 1.0f32..2000.0,
            height in 1.0f32..800.0,
            words in 1usize..12,
        ) {
            let text = vec!["word"; words].join(" ");
            let rect = Bounds::from_xywh(0.0, 0.0, width, height);
            let style = TextStyle::new(max, true);
            let size = adaptive_font_size(&FixedAdvance, &text, max, rect, &style);
            prop_assert!(size <= max);
            prop_assert!(size >= max * FIT_FLOOR);
        }
    }
}
