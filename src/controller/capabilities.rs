//! Capability snapshot of an input device
//!
//! A [`Capabilities`] value is a plain copy of everything the mapper needs to know
//! about a device: its name, its identity, the key codes it supports and the range of
//! every absolute axis. It is taken once right after a device is opened, so the
//! qualification and enumeration rules never touch a file descriptor and can be
//! exercised without hardware.

use super::codes::{ABS_X, ABS_Y, BTN_BLOCK_WIDTH, BTN_GAMEPAD, BTN_JOYSTICK, KEY_A, KEY_Q};
use std::collections::{BTreeMap, BTreeSet};

/// Hardware identity as reported by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputIdentity {
    pub bus_type: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

/// Reported range of an absolute axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbsRange {
    pub min: i32,
    pub max: i32,
}

impl AbsRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// `None` when the name query failed
    pub name: Option<String>,
    /// `None` when the identity query failed
    pub identity: Option<InputIdentity>,
    pub keys: BTreeSet<u16>,
    /// Supported absolute axes. A failed range query leaves a zeroed range.
    pub axes: BTreeMap<u16, AbsRange>,
}

impl Capabilities {
    pub fn has_key(&self, code: u16) -> bool {
        self.keys.contains(&code)
    }

    pub fn has_axis(&self, code: u16) -> bool {
        self.axes.contains_key(&code)
    }

    /// A gamepad either has an X/Y analog pair or a button in the joystick or gamepad block
    pub fn is_gamepad(&self) -> bool {
        if self.has_axis(ABS_X) && self.has_axis(ABS_Y) {
            return true;
        }

        let joystick = BTN_JOYSTICK..BTN_JOYSTICK + BTN_BLOCK_WIDTH;
        let gamepad = BTN_GAMEPAD..BTN_GAMEPAD + BTN_BLOCK_WIDTH;
        joystick.chain(gamepad).any(|code| self.has_key(code))
    }

    pub fn is_keyboard(&self) -> bool {
        self.has_key(KEY_Q) && self.has_key(KEY_A)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::codes::{BTN_MISC, KEY_ENTER};

    fn with_keys(keys: &[u16]) -> Capabilities {
        Capabilities {
            keys: keys.iter().copied().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn analog_stick_without_buttons_qualifies() {
        let mut caps = Capabilities::default();
        caps.axes.insert(ABS_X, AbsRange::new(0, 255));
        caps.axes.insert(ABS_Y, AbsRange::new(0, 255));
        assert!(caps.is_gamepad());
    }

    #[test]
    fn single_axis_is_not_enough() {
        let mut caps = Capabilities::default();
        caps.axes.insert(ABS_X, AbsRange::new(0, 255));
        assert!(!caps.is_gamepad());
    }

    #[test]
    fn digital_pad_qualifies_through_either_button_block() {
        assert!(with_keys(&[BTN_JOYSTICK + 3]).is_gamepad());
        assert!(with_keys(&[BTN_GAMEPAD]).is_gamepad());
        assert!(with_keys(&[BTN_GAMEPAD + 0x0f]).is_gamepad());
    }

    #[test]
    fn misc_buttons_and_keyboards_do_not_qualify() {
        assert!(!with_keys(&[BTN_MISC, BTN_MISC + 1]).is_gamepad());
        assert!(!with_keys(&[BTN_GAMEPAD + 0x10]).is_gamepad());

        let keyboard = with_keys(&[KEY_Q, KEY_A, KEY_ENTER]);
        assert!(!keyboard.is_gamepad());
        assert!(keyboard.is_keyboard());
        assert!(!with_keys(&[KEY_Q]).is_keyboard());
    }
}
