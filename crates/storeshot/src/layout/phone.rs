//! Phone layouts: centred device, device pushed to a side, and full bleed.

use storeshot_core::{geometry::{Bounds, Size}, screen::Position};

use super::{
    DEVICE_GAP, Plan, PlanKind, TILT_DEGREES, TILT_SHIFT, TextStack, centered_column,
    device_aspect,
};

/// Device sits low and centred, hanging off the bottom edge; text above it.
pub(super) fn center(canvas: Size, tilt: bool, has_subheading: bool) -> Plan {
    let (width, height) = (canvas.width(), canvas.height());
    let device_width = width * 0.80;
    let device_height = device_width * device_aspect(canvas);
    let device_top = height * 1.10 - device_height;

    let stack = TextStack::new(text_reference(canvas), 0.085, 0.045, height, has_subheading);
    let block_bottom = (height * 0.22).min(device_top - height * DEVICE_GAP);

    let mut device_x = (width - device_width) / 2.0;
    let mut rotation_angle = 0.0;
    if tilt {
        rotation_angle = -TILT_DEGREES;
        device_x += width * TILT_SHIFT;
    }

    Plan {
        stack,
        column: centered_column(canvas),
        text_top: block_bottom - stack.height(),
        device_rect: Bounds::from_xywh(device_x, device_top, device_width, device_height),
        rotation_angle,
        kind: PlanKind::Framed,
    }
}

/// Device pushed partly off its outer edge; text fills the other side.
pub(super) fn side(canvas: Size, tilt: bool, position: Position, has_subheading: bool) -> Plan {
    let (width, height) = (canvas.width(), canvas.height());
    let device_width = width * 0.62;
    let device_height = device_width * device_aspect(canvas);
    let device_top = (height - device_height) / 2.0;

    let on_left = position == Position::Left;
    let device_x = if on_left {
        -0.07 * device_width
    } else {
        width - 0.93 * device_width
    };
    let device_rect = Bounds::from_xywh(device_x, device_top, device_width, device_height);

    let (column_left, column_right) = if on_left {
        (device_rect.max_x() + width * 0.04, width * 0.95)
    } else {
        (width * 0.05, device_rect.min_x() - width * 0.04)
    };

    let stack = TextStack::new(text_reference(canvas), 0.065, 0.035, height, has_subheading);
    let rotation_angle = match (tilt, on_left) {
        (false, _) => 0.0,
        (true, true) => -TILT_DEGREES,
        (true, false) => TILT_DEGREES,
    };

    Plan {
        stack,
        column: (column_left, (column_right - column_left).max(0.0)),
        text_top: device_rect.center().y() - stack.height() / 2.0,
        device_rect,
        rotation_angle,
        kind: PlanKind::Framed,
    }
}

/// Screenshot covers the canvas; text sits on a top scrim.
pub(super) fn full_bleed(canvas: Size, has_subheading: bool) -> Plan {
    let stack = TextStack::new(text_reference(canvas), 0.080, 0.042, canvas.height(), has_subheading);
    super::full_bleed(canvas, stack)
}

/// Phone text scales from the short edge so wide canvases keep it on screen.
fn text_reference(canvas: Size) -> f32 {
    canvas.width().min(canvas.height())
}
