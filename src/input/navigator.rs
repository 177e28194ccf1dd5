//! THEC64 joystick as an always-on menu navigator
//!
//! The console ships with its own joystick. When one is connected next to the
//! controller being mapped it can drive every menu, using its fixed layout instead
//! of anything captured so far.

use super::NavSignal;
use crate::controller::codes::{ABS_X, ABS_Y, BTN_BASE2, BTN_PINKIE, BTN_TOP2, BTN_TRIGGER};
use crate::controller::{Controller, ControllerProfile, Deflection, RawEvent};
use std::collections::BTreeMap;

pub const NAVIGATOR_NAME: &str = "THEC64 Joystick";
pub const NAVIGATOR_GUIDS: [&str; 2] = [
    "03000000591c00002300000010010000",
    "03000000591c00002400000010010000",
];

const STICK_CENTER: i32 = 127;
const STICK_THRESHOLD: i32 = 50;

pub fn is_navigator(profile: &ControllerProfile) -> bool {
    if profile.name.contains(NAVIGATOR_NAME) {
        return true;
    }
    let guid = profile.guid.to_string();
    NAVIGATOR_GUIDS.contains(&guid.as_str())
}

/// First navigator among the controllers other than the one being mapped
pub fn find_navigator(controllers: &[Controller], selected: usize) -> Option<usize> {
    controllers
        .iter()
        .enumerate()
        .find(|(i, controller)| *i != selected && is_navigator(&controller.profile))
        .map(|(i, _)| i)
}

pub fn translate_navigator(events: &[RawEvent]) -> NavSignal {
    let mut signal = NavSignal::default();
    let mut last_sample = BTreeMap::new();

    for event in events {
        match *event {
            RawEvent::Key { code, .. } if event.is_press() => match code {
                BTN_TRIGGER | BTN_TOP2 => signal.confirm = true,
                BTN_PINKIE => signal.secondary = true,
                BTN_BASE2 => signal.cancel = true,
                _ => {}
            },
            RawEvent::Abs { code, value } if code == ABS_X || code == ABS_Y => {
                last_sample.insert(code, value);
            }
            _ => {}
        }
    }

    let step = |code: u16| {
        last_sample
            .get(&code)
            .map(|&value| Deflection::measure(value, STICK_CENTER, STICK_THRESHOLD).as_step())
            .unwrap_or(0)
    };
    signal.dx = step(ABS_X);
    signal.dy = step(ABS_Y);
    signal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Capabilities, InputIdentity};
    use crate::testing::ScriptedSource;

    fn profile(name: &str, product: u16) -> ControllerProfile {
        let caps = Capabilities {
            name: Some(name.to_string()),
            identity: Some(InputIdentity {
                bus_type: 3,
                vendor: 0x1c59,
                product,
                version: 0x110,
            }),
            keys: [BTN_TRIGGER].into_iter().collect(),
            ..Default::default()
        };
        ControllerProfile::from_capabilities(&caps).unwrap()
    }

    fn controller(name: &str, product: u16) -> Controller {
        Controller {
            path: format!("/dev/input/{}", name).into(),
            profile: profile(name, product),
            source: Box::new(ScriptedSource::default()),
        }
    }

    #[test]
    fn recognized_by_name_or_guid() {
        assert!(is_navigator(&profile("THEC64 Joystick", 0x99)));
        assert!(is_navigator(&profile("Retro Games LTD", 0x23)));
        assert!(is_navigator(&profile("Retro Games LTD", 0x24)));
        assert!(!is_navigator(&profile("Generic USB Joystick", 0x25)));
    }

    #[test]
    fn navigator_search_skips_the_selected_controller() {
        let controllers = vec![
            controller("THEC64 Joystick", 0x23),
            controller("Generic Pad", 0x01),
            controller("THEC64 Joystick", 0x24),
        ];
        assert_eq!(find_navigator(&controllers, 1), Some(0));
        assert_eq!(find_navigator(&controllers, 0), Some(2));
        assert_eq!(find_navigator(&controllers[..2], 0), None);
    }

    #[test]
    fn fixed_layout_translation() {
        let signal = translate_navigator(&[
            RawEvent::key(BTN_TOP2, 1),
            RawEvent::key(BTN_BASE2, 1),
            RawEvent::abs(ABS_Y, 0),
            RawEvent::abs(ABS_X, 200),
        ]);
        assert!(signal.confirm);
        assert!(signal.cancel);
        assert!(!signal.secondary);
        assert_eq!(signal.dy, -1);
        assert_eq!(signal.dx, 1);

        assert!(translate_navigator(&[RawEvent::key(BTN_PINKIE, 1)]).secondary);
    }

    #[test]
    fn only_last_stick_sample_counts() {
        let signal = translate_navigator(&[RawEvent::abs(ABS_Y, 255), RawEvent::abs(ABS_Y, 127)]);
        assert_eq!(signal.dy, 0);

        let barely = translate_navigator(&[RawEvent::abs(ABS_X, 127 + 50)]);
        assert_eq!(barely.dx, 0);
    }
}
