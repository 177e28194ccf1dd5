//! Reduction of all input sources into one navigation signal
//!
//! The controller under mapping navigates through the slots captured so far. The
//! wiring is positional:
//!
//! | Slot              | Signal      |
//! |-------------------|-------------|
//! | Left Fire, Menu 1 | `confirm`   |
//! | Menu 2            | `secondary` |
//! | Menu 4            | `cancel`    |
//! | Up/Down           | `dy`        |
//! | Left/Right        | `dx`        |
//!
//! Only the last sample per axis code counts, so a stick that swings out and back
//! within one tick produces no movement.

use super::{translate_keyboard, translate_navigator, NavSignal};
use crate::controller::codes::is_horizontal_hat_axis;
use crate::controller::{ControllerProfile, RawEvent};
use crate::mapping::capture::hat_mask;
use crate::mapping::table::{HAT_DOWN, HAT_LEFT, HAT_RIGHT, HAT_UP};
use crate::mapping::{Binding, MappingTable, Slot};
use std::collections::BTreeMap;

/// Merges controller, navigator and keyboard input, in that order of precedence.
pub fn reduce(
    controller: &[RawEvent],
    profile: &ControllerProfile,
    table: &MappingTable,
    navigator: &[RawEvent],
    keyboard: &[RawEvent],
) -> NavSignal {
    translate_controller(controller, profile, table)
        .merge(translate_navigator(navigator))
        .merge(translate_keyboard(keyboard))
}

pub fn translate_controller(
    events: &[RawEvent],
    profile: &ControllerProfile,
    table: &MappingTable,
) -> NavSignal {
    let mut signal = NavSignal::default();
    let bound_to = |slot: Slot, index: usize| table.get(slot) == Binding::Button(index);

    let mut last_sample = BTreeMap::new();
    for event in events {
        match *event {
            RawEvent::Key { code, .. } if event.is_press() => {
                let Some(index) = profile.button_index(code) else {
                    continue;
                };
                if bound_to(Slot::LeftFire, index) || bound_to(Slot::Menu1, index) {
                    signal.confirm = true;
                }
                if bound_to(Slot::Menu2, index) {
                    signal.secondary = true;
                }
                if bound_to(Slot::Menu4, index) {
                    signal.cancel = true;
                }
            }
            RawEvent::Abs { code, value } => {
                last_sample.insert(code, value);
            }
            _ => {}
        }
    }

    for (&code, &value) in &last_sample {
        if let Some(step) = axis_step(profile, table.get(Slot::UpDown), code, value, false) {
            signal.dy = step;
        }
        if let Some(step) = axis_step(profile, table.get(Slot::LeftRight), code, value, true) {
            signal.dx = step;
        }
    }
    signal
}

/// Movement produced by one axis sample for a navigation slot's binding.
///
/// `None` means the sample does not belong to the binding at all.
fn axis_step(
    profile: &ControllerProfile,
    binding: Binding,
    code: u16,
    value: i32,
    horizontal: bool,
) -> Option<i8> {
    match binding {
        Binding::Axis(index) => {
            let axis = profile.axis(code).filter(|axis| axis.index == index)?;
            Some(axis.deflection(value).as_step())
        }
        Binding::Hat { index, .. } => {
            if profile.hat_index(code)? != index || is_horizontal_hat_axis(code) != horizontal {
                return None;
            }
            let step = match hat_mask(code, value) {
                Some(HAT_UP | HAT_LEFT) => -1,
                Some(HAT_DOWN | HAT_RIGHT) => 1,
                _ => 0,
            };
            Some(step)
        }
        Binding::Button(_) | Binding::Unmapped => None,
    }
}
