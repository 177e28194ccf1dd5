//! Normalized controller model
//!
//! Turns a [`Capabilities`] snapshot into the button, axis and hat numbering used by
//! SDL2's game controller database. The numbering rules have to match SDL exactly,
//! otherwise an exported record points at the wrong physical inputs:
//!
//! - Buttons: every code from `BTN_JOYSTICK` up to `KEY_MAX` first, then the legacy
//!   `BTN_MISC` block. Indices follow first-seen order.
//! - Axes: absolute codes in ascending order, skipping the hat sub-range.
//! - Hats: `ABS_HAT0X..=ABS_HAT3Y`, two codes per hat.
//!
//! The GUID is the SDL 16-byte identity built from bus, vendor, product and version.

use super::capabilities::{AbsRange, Capabilities, InputIdentity};
use super::codes::{self, ABS_MAX, BTN_JOYSTICK, BTN_MISC, KEY_MAX};
use std::fmt;
use uuid::Uuid;

pub const UNKNOWN_CONTROLLER: &str = "Unknown Controller";

/// SDL-compatible controller GUID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guid(Uuid);

impl Guid {
    /// Each 16-bit field is written little-endian followed by two zero bytes.
    pub fn from_identity(identity: &InputIdentity) -> Self {
        let fields = [
            identity.bus_type,
            identity.vendor,
            identity.product,
            identity.version,
        ];

        let mut bytes = [0u8; 16];
        for (chunk, field) in bytes.chunks_exact_mut(4).zip(fields) {
            chunk[..2].copy_from_slice(&field.to_le_bytes());
        }

        Guid(Uuid::from_bytes(bytes))
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A non-hat absolute axis with its reported range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisInfo {
    pub code: u16,
    pub index: usize,
    pub min: i32,
    pub max: i32,
    pub center: i32,
}

/// Direction of an axis sample relative to a threshold around a rest position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deflection {
    Negative,
    Neutral,
    Positive,
}

impl Deflection {
    pub fn measure(value: i32, center: i32, threshold: i32) -> Self {
        let delta = i64::from(value) - i64::from(center);
        if delta < -i64::from(threshold) {
            Deflection::Negative
        } else if delta > i64::from(threshold) {
            Deflection::Positive
        } else {
            Deflection::Neutral
        }
    }

    pub fn as_step(self) -> i8 {
        match self {
            Deflection::Negative => -1,
            Deflection::Neutral => 0,
            Deflection::Positive => 1,
        }
    }
}

impl AxisInfo {
    fn from_range(code: u16, index: usize, range: AbsRange) -> Self {
        // Triggers rest at one end, so the live value is useless as a center.
        let center = ((i64::from(range.min) + i64::from(range.max)).div_euclid(2)) as i32;
        Self {
            code,
            index,
            min: range.min,
            max: range.max,
            center,
        }
    }

    /// 40% of the half range, never below 1
    pub fn threshold(&self) -> i32 {
        let range = i64::from(self.max) - i64::from(self.min);
        if range > 0 {
            (range / 5).max(1) as i32
        } else {
            1
        }
    }

    pub fn deflection(&self, value: i32) -> Deflection {
        Deflection::measure(value, self.center, self.threshold())
    }
}

/// A hat axis code and the hat it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HatAxis {
    pub code: u16,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerProfile {
    pub guid: Guid,
    pub name: String,
    /// Key code per button index
    pub buttons: Vec<u16>,
    pub axes: Vec<AxisInfo>,
    pub hats: Vec<HatAxis>,
}

impl ControllerProfile {
    /// Builds a profile for devices that qualify as gamepads.
    ///
    /// Returns `None` for anything else, and for devices whose identity query failed,
    /// since no GUID can be derived for them.
    pub fn from_capabilities(caps: &Capabilities) -> Option<Self> {
        if !caps.is_gamepad() {
            return None;
        }
        let identity = caps.identity?;

        let buttons = (BTN_JOYSTICK..KEY_MAX)
            .chain(BTN_MISC..BTN_JOYSTICK)
            .filter(|code| caps.has_key(*code))
            .collect();

        let mut axes = Vec::new();
        let mut hats = Vec::new();
        for (&code, &range) in caps.axes.range(..ABS_MAX) {
            if codes::is_hat_axis(code) {
                hats.push(HatAxis {
                    code,
                    index: codes::hat_index(code),
                });
            } else {
                axes.push(AxisInfo::from_range(code, axes.len(), range));
            }
        }

        Some(Self {
            guid: Guid::from_identity(&identity),
            name: caps
                .name
                .clone()
                .unwrap_or_else(|| UNKNOWN_CONTROLLER.to_string()),
            buttons,
            axes,
            hats,
        })
    }

    pub fn button_index(&self, code: u16) -> Option<usize> {
        self.buttons.iter().position(|&c| c == code)
    }

    pub fn axis(&self, code: u16) -> Option<&AxisInfo> {
        self.axes.iter().find(|axis| axis.code == code)
    }

    pub fn hat_index(&self, code: u16) -> Option<usize> {
        self.hats
            .iter()
            .find(|hat| hat.code == code)
            .map(|hat| hat.index)
    }

    /// Number of distinct hats (not hat axis codes)
    #[cfg(test)]
    pub fn hat_count(&self) -> usize {
        self.hats
            .iter()
            .map(|hat| hat.index + 1)
            .max()
            .unwrap_or(0)
    }
}
