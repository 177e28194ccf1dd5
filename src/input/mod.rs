//! Input multiplexing for menu navigation
//!
//! Three independent sources can drive the wizard's menus at the same time:
//!
//! - the controller being mapped, through whatever has been captured so far
//! - the THEC64 joystick, if one is plugged in, through hardcoded codes
//! - any keyboard, through arrows, Enter and number hotkeys
//!
//! All of them collapse into one [`NavSignal`] per tick via [`reduce`].

pub mod keyboard;
pub mod multiplexer;
pub mod navigator;

pub use keyboard::{translate_keyboard, Hotkey};
pub use multiplexer::{reduce, translate_controller};
pub use navigator::{find_navigator, is_navigator, translate_navigator};

/// Normalized navigation input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavSignal {
    pub dy: i8,
    pub dx: i8,
    pub confirm: bool,
    pub cancel: bool,
    pub secondary: bool,
    pub hotkey: Option<Hotkey>,
}

impl NavSignal {
    pub fn is_idle(&self) -> bool {
        *self == NavSignal::default()
    }

    /// Layers `other` on top: nonzero directions override, buttons accumulate.
    pub fn merge(self, other: NavSignal) -> NavSignal {
        NavSignal {
            dy: if other.dy != 0 { other.dy } else { self.dy },
            dx: if other.dx != 0 { other.dx } else { self.dx },
            confirm: self.confirm || other.confirm,
            cancel: self.cancel || other.cancel,
            secondary: self.secondary || other.secondary,
            hotkey: other.hotkey.or(self.hotkey),
        }
    }
}
