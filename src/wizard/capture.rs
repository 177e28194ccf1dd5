use super::{WizardSession, WizardState, DEBOUNCE};
use crate::controller::RawEvent;
use crate::input::{translate_keyboard, Hotkey};
use crate::mapping::{detect_binding, Slot, SLOT_COUNT};
use std::time::Instant;
use tracing::{debug, info, warn};

impl WizardSession {
    /// Waits for one input on the selected controller.
    ///
    /// A hit is stored immediately. The slot only advances once the debounce window
    /// has passed; everything read in between, and on the tick that closes the
    /// window, is thrown away.
    pub(super) fn update_capture(&mut self, now: Instant, keyboard: &[RawEvent]) {
        if translate_keyboard(keyboard).hotkey == Some(Hotkey::Quit) {
            self.state = WizardState::Exit;
            return;
        }

        let events = self.drain_selected();
        self.drain_navigator();

        if let Some(deadline) = self.debounce_until {
            if now >= deadline {
                self.debounce_until = None;
                self.finish_capture();
            }
            return;
        }

        let Some(slot) = Slot::from_index(self.current_slot) else {
            self.enter_review();
            return;
        };
        let Some(profile) = self.selected_profile() else {
            warn!("Selected controller disappeared, back to detection");
            self.state = WizardState::Detect;
            return;
        };

        if let Some(binding) = detect_binding(&events, profile) {
            if self.table.capture(slot, binding) {
                info!("{} -> {}", slot, binding);
            } else {
                debug!("{} already bound, ignoring {}", slot, binding);
            }
            self.debounce_until = Some(now + DEBOUNCE);
        }
    }

    fn finish_capture(&mut self) {
        if self.redo {
            self.redo = false;
            self.current_slot = SLOT_COUNT;
            self.enter_review();
            return;
        }

        self.current_slot += 1;
        if self.current_slot >= SLOT_COUNT {
            self.review_cursor = 0;
            self.enter_review();
        }
    }

    /// Clears one slot and captures it again, then goes straight back to review.
    pub(super) fn redo_slot(&mut self, slot: Slot) {
        self.table.clear(slot);
        self.current_slot = slot.index();
        self.redo = true;
        self.debounce_until = None;
        self.state = WizardState::Capture;
    }

    /// Clears every slot and starts over at the first one.
    pub(super) fn restart(&mut self) {
        self.table.reset();
        self.current_slot = 0;
        self.redo = false;
        self.debounce_until = None;
        self.state = WizardState::Capture;
    }
}
