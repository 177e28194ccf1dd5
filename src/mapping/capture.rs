//! Binding detection for the capture step
//!
//! Capture looks at the raw events of the controller under mapping; the incomplete
//! mapping plays no part. Within one batch a button press always wins. Otherwise the
//! first hat or axis event that qualifies is taken, in read order.

use super::table::{Binding, HAT_DOWN, HAT_LEFT, HAT_RIGHT, HAT_UP};
use crate::controller::codes;
use crate::controller::{ControllerProfile, Deflection, RawEvent};

pub fn detect_binding(events: &[RawEvent], profile: &ControllerProfile) -> Option<Binding> {
    let button = events
        .iter()
        .filter_map(RawEvent::pressed_code)
        .find_map(|code| profile.button_index(code))
        .map(Binding::Button);

    button.or_else(|| events.iter().find_map(|event| analog_binding(event, profile)))
}

fn analog_binding(event: &RawEvent, profile: &ControllerProfile) -> Option<Binding> {
    let RawEvent::Abs { code, value } = *event else {
        return None;
    };

    if let Some(index) = profile.hat_index(code) {
        let mask = hat_mask(code, value)?;
        return Some(Binding::Hat { index, mask });
    }

    let axis = profile.axis(code)?;
    match axis.deflection(value) {
        Deflection::Neutral => None,
        _ => Some(Binding::Axis(axis.index)),
    }
}

/// Direction bit for a hat axis sample, `None` while the hat is centered
pub fn hat_mask(code: u16, value: i32) -> Option<u8> {
    if value == 0 {
        return None;
    }
    let mask = match (codes::is_horizontal_hat_axis(code), value < 0) {
        (true, true) => HAT_LEFT,
        (true, false) => HAT_RIGHT,
        (false, true) => HAT_UP,
        (false, false) => HAT_DOWN,
    };
    Some(mask)
}
