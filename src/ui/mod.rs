//! # Framebuffer User Interface
//!
//! Draws the wizard onto a bare Linux framebuffer. There is no window system on
//! the target console, so everything from glyphs to rounded buttons is painted in
//! software into a [`Surface`] and pushed to `/dev/fb0` once per frame.
//!
//! ## Why This Module Exists
//!
//! The wizard state machine knows nothing about pixels. This module turns a
//! [`WizardSession`] snapshot into a finished frame:
//!
//! - [`surface`] holds the back buffer and the drawing primitives
//! - [`font`] is the built-in 8x16 bitmap font
//! - [`screens`] lays out one screen per wizard state
//! - [`framebuffer`] talks to the kernel framebuffer device
//!
//! ## Frame Flow
//!
//! Every tick the app calls [`render`] with the current [`Blink`] phase and then
//! hands the surface to a [`FrameSink`]. Rendering never fails; only presenting
//! can.

pub mod font;
pub mod framebuffer;
pub mod screens;
pub mod surface;
pub mod theme;

pub use framebuffer::{DisplayError, FrameGeometry, FrameSink, LinuxFramebuffer};
pub use screens::render;
pub use surface::Surface;
pub use theme::UiColors;

use std::time::{Duration, Instant};

/// Half period of the capture highlight
pub const BLINK_PERIOD: Duration = Duration::from_millis(400);

/// Square wave used to flash the element that waits for input.
#[derive(Debug, Clone, Copy)]
pub struct Blink {
    on: bool,
    last_toggle: Instant,
}

impl Blink {
    pub fn new(now: Instant) -> Self {
        Self {
            on: true,
            last_toggle: now,
        }
    }

    /// Flips the phase once a full period has passed and returns the new phase.
    pub fn update(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last_toggle) >= BLINK_PERIOD {
            self.on = !self.on;
            self.last_toggle = now;
        }
        self.on
    }

    #[cfg(test)]
    pub fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::codes::{ABS_X, ABS_Y, BTN_GAMEPAD, KEY_2, KEY_DOWN, KEY_ENTER};
    use crate::controller::RawEvent;
    use crate::testing::{pad_profile, FakeScanner, MemoryStorage};
    use crate::wizard::{WizardSession, WizardState, DEBOUNCE};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn blink_toggles_every_period() {
        let start = Instant::now();
        let mut blink = Blink::new(start);
        assert!(blink.is_on());

        assert!(blink.update(start + Duration::from_millis(100)));
        assert!(!blink.update(start + BLINK_PERIOD));
        assert!(!blink.update(start + BLINK_PERIOD + Duration::from_millis(399)));
        assert!(blink.update(start + BLINK_PERIOD * 2));
    }

    fn count(surface: &Surface, color: u32) -> usize {
        surface.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn every_state_renders_into_the_visible_area() {
        let (scanner, pad) = FakeScanner::default().with_controller(pad_profile("Pad", 0x26));
        let (scanner, keyboard) = scanner.with_keyboard();
        let storage = MemoryStorage::with_dirs(&["/mnt/usb"]);
        let mut session = WizardSession::new(
            Box::new(scanner),
            Box::new(storage),
            PathBuf::from("/mnt"),
        )
        .with_save_confirmation(true);

        let mut surface = Surface::new(1280, 720, 1296);
        let mut now = Instant::now();
        let mut tick = |session: &mut WizardSession, step: Duration| {
            now += step;
            session.step(now);
        };
        let frame = Duration::from_millis(16);

        render(&session, &mut surface, true);
        assert!(count(&surface, UiColors::BG) > 0);

        tick(&mut session, frame);
        render(&session, &mut surface, true);
        assert!(count(&surface, UiColors::TEXT) > 0);

        pad.press(BTN_GAMEPAD);
        tick(&mut session, frame);
        assert_eq!(session.state(), WizardState::Capture);
        render(&session, &mut surface, true);
        assert!(count(&surface, UiColors::HIGHLIGHT) > 0);
        assert!(count(&surface, UiColors::BODY) > 0);

        for i in 0..8 {
            pad.press(BTN_GAMEPAD + i);
            tick(&mut session, frame);
            tick(&mut session, DEBOUNCE);
        }
        for code in [ABS_X, ABS_Y] {
            pad.push(&[RawEvent::abs(code, 250)]);
            tick(&mut session, frame);
            tick(&mut session, DEBOUNCE);
        }
        assert_eq!(session.state(), WizardState::Review);
        render(&session, &mut surface, true);
        assert!(count(&surface, UiColors::SELECTED) > 0);
        assert!(count(&surface, UiColors::MAPPED) > 0);

        keyboard.press(KEY_2);
        tick(&mut session, frame);
        assert_eq!(session.state(), WizardState::Browse);
        render(&session, &mut surface, true);
        assert!(count(&surface, UiColors::SUCCESS) > 0);

        keyboard.press(KEY_DOWN);
        tick(&mut session, frame);
        keyboard.press(KEY_ENTER);
        tick(&mut session, frame);
        assert_eq!(session.state(), WizardState::Done);
        render(&session, &mut surface, true);
        assert!(count(&surface, UiColors::SUCCESS) > 0);

        // Row padding past the visible width stays untouched.
        for row in 0..720 {
            let padding = &surface.pixels()[row * 1296 + 1280..(row + 1) * 1296];
            assert!(padding.iter().all(|&p| p == 0));
        }
    }
}
