//! Tablet layout variants.
//!
//! Each variant maps to a handler through [`handler_for`]. Variants without
//! their own geometry share the standard handler.

use storeshot_core::{
    device::Orientation,
    geometry::{Bounds, Size},
    screen::TabletLayoutVariant,
};

use super::{
    DEVICE_GAP, Plan, PlanKind, TEXT_TOP_MARGIN, TILT_DEGREES, TILT_SHIFT, TextStack,
    centered_column, device_aspect,
};

/// Inputs every tablet handler receives.
#[derive(Debug, Clone, Copy)]
struct TabletParams {
    canvas: Size,
    tilt: bool,
    has_subheading: bool,
    /// Width that font sizes scale from.
    reference_width: f32,
}

type Handler = fn(&TabletParams) -> Plan;

/// Proportions of a device-below-text tablet layout.
#[derive(Debug, Clone, Copy)]
struct DeviceBelowText {
    device_ratio: f32,
    bottom_ratio: f32,
    heading_scale: f32,
    subheading_scale: f32,
    tilt: TiltRule,
    kind: PlanKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TiltRule {
    /// Tilt only when the screen asks for it.
    OnRequest,
    Always,
}

const STANDARD: DeviceBelowText = DeviceBelowText {
    device_ratio: 0.70,
    bottom_ratio: 1.08,
    heading_scale: 0.065,
    subheading_scale: 0.035,
    tilt: TiltRule::OnRequest,
    kind: PlanKind::Framed,
};

const ANGLED: DeviceBelowText = DeviceBelowText {
    device_ratio: 0.65,
    bottom_ratio: 1.10,
    tilt: TiltRule::Always,
    ..STANDARD
};

const FRAMELESS: DeviceBelowText = DeviceBelowText {
    device_ratio: 0.72,
    bottom_ratio: 1.06,
    kind: PlanKind::Frameless,
    ..STANDARD
};

const HEADLINE_DOMINANT: DeviceBelowText = DeviceBelowText {
    device_ratio: 0.55,
    bottom_ratio: 1.12,
    heading_scale: 0.12,
    subheading_scale: 0.05,
    ..STANDARD
};

fn handler_for(variant: TabletLayoutVariant) -> Handler {
    match variant {
        TabletLayoutVariant::Standard
        | TabletLayoutVariant::Split
        | TabletLayoutVariant::Floating
        | TabletLayoutVariant::Panorama
        | TabletLayoutVariant::Collage => standard,
        TabletLayoutVariant::Angled => angled,
        TabletLayoutVariant::Frameless => frameless,
        TabletLayoutVariant::HeadlineDominant => headline_dominant,
        TabletLayoutVariant::UiForward => ui_forward,
    }
}

pub(super) fn plan(
    variant: TabletLayoutVariant,
    canvas: Size,
    tilt: bool,
    has_subheading: bool,
    orientation: Orientation,
) -> Plan {
    let reference_width = match orientation {
        Orientation::Portrait => canvas.width(),
        Orientation::Landscape => canvas.width().min(canvas.height()),
    };
    let params = TabletParams {
        canvas,
        tilt,
        has_subheading,
        reference_width,
    };
    handler_for(variant)(&params)
}

fn standard(params: &TabletParams) -> Plan {
    device_below_text(params, &STANDARD)
}

fn angled(params: &TabletParams) -> Plan {
    device_below_text(params, &ANGLED)
}

fn frameless(params: &TabletParams) -> Plan {
    device_below_text(params, &FRAMELESS)
}

fn headline_dominant(params: &TabletParams) -> Plan {
    device_below_text(params, &HEADLINE_DOMINANT)
}

fn ui_forward(params: &TabletParams) -> Plan {
    let stack = TextStack::new(
        params.reference_width,
        0.075,
        0.040,
        params.canvas.height(),
        params.has_subheading,
    );
    super::full_bleed(params.canvas, stack)
}

/// Device centred low on the canvas; text centred in the zone above it.
fn device_below_text(params: &TabletParams, shape: &DeviceBelowText) -> Plan {
    let canvas = params.canvas;
    let (width, height) = (canvas.width(), canvas.height());

    let device_width = width * shape.device_ratio;
    let device_height = device_width * device_aspect(canvas);
    let device_top = height * shape.bottom_ratio - device_height;
    let mut device_x = (width - device_width) / 2.0;

    let tilted = match shape.tilt {
        TiltRule::Always => true,
        TiltRule::OnRequest => params.tilt,
    };
    let mut rotation_angle = 0.0;
    if tilted {
        rotation_angle = -TILT_DEGREES;
        device_x += width * TILT_SHIFT;
    }

    let stack = TextStack::new(
        params.reference_width,
        shape.heading_scale,
        shape.subheading_scale,
        height,
        params.has_subheading,
    );
    let zone_top = height * TEXT_TOP_MARGIN;
    let zone_bottom = device_top - height * DEVICE_GAP;
    let spare = (zone_bottom - zone_top - stack.height()).max(0.0);

    Plan {
        stack,
        column: centered_column(canvas),
        text_top: zone_top + spare / 2.0,
        device_rect: Bounds::from_xywh(device_x, device_top, device_width, device_height),
        rotation_angle,
        kind: shape.kind,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn params(tilt: bool) -> TabletParams {
        TabletParams {
            canvas: Size::new(2064.0, 2752.0),
            tilt,
            has_subheading: true,
            reference_width: 2064.0,
        }
    }

    #[test]
    fn test_dispatch_table() {
        let p = params(false);
        assert_eq!(
            handler_for(TabletLayoutVariant::Collage)(&p).device_rect,
            standard(&p).device_rect
        );
        assert_eq!(
            handler_for(TabletLayoutVariant::Angled)(&p).device_rect,
            angled(&p).device_rect
        );
    }

    #[test]
    fn test_standard_proportions() {
        let plan = standard(&params(false));
        assert_approx_eq!(f32, plan.device_rect.width(), 2064.0 * 0.70, epsilon = 0.01);
        assert_approx_eq!(f32, plan.device_rect.max_y(), 2752.0 * 1.08, epsilon = 0.01);
        assert_approx_eq!(f32, plan.rotation_angle, 0.0);
        assert_approx_eq!(f32, plan.stack.heading_font_size, 2064.0 * 0.065, epsilon = 0.01);
    }

    #[test]
    fn test_standard_tilt_shifts_device() {
        let straight = standard(&params(false));
        let tilted = standard(&params(true));
        assert_approx_eq!(f32, tilted.rotation_angle, -8.0);
        assert_approx_eq!(
            f32,
            tilted.device_rect.min_x() - straight.device_rect.min_x(),
            2064.0 * 0.03,
            epsilon = 0.01
        );
    }

    #[test]
    fn test_text_centered_above_device() {
        let plan = headline_dominant(&params(false));
        let zone_top = 2752.0 * 0.04;
        let zone_bottom = plan.device_rect.min_y() - 2752.0 * 0.02;
        let block_mid = plan.text_top + plan.stack.height() / 2.0;
        assert_approx_eq!(f32, block_mid, (zone_top + zone_bottom) / 2.0, epsilon = 0.01);
    }

    #[test]
    fn test_frameless_kind() {
        assert_eq!(frameless(&params(false)).kind, PlanKind::Frameless);
        assert_eq!(ui_forward(&params(false)).kind, PlanKind::FullBleed);
    }
}
