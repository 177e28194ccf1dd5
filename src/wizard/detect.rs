use super::{WizardSession, WizardState, RESCAN_INTERVAL};
use crate::controller::RawEvent;
use crate::input::{find_navigator, translate_keyboard, Hotkey};
use std::time::Instant;
use tracing::{debug, info};

impl WizardSession {
    pub(super) fn update_detect(&mut self, now: Instant, keyboard: &[RawEvent]) {
        if translate_keyboard(keyboard).hotkey == Some(Hotkey::Quit) {
            self.state = WizardState::Exit;
            return;
        }

        let due = self
            .last_scan
            .map_or(true, |last| now.duration_since(last) >= RESCAN_INTERVAL);
        if due {
            self.rescan(now);
        }

        let pressed = self
            .controllers
            .iter_mut()
            .position(|controller| controller.source.drain().iter().any(RawEvent::is_press));
        if let Some(index) = pressed {
            self.select_controller(index);
        }
    }

    fn rescan(&mut self, now: Instant) {
        let set = self.scanner.scan();
        self.controllers = set.controllers;
        self.keyboards = set.keyboards;
        self.last_scan = Some(now);
        debug!(
            "Rescan found {} controller(s), {} keyboard(s)",
            self.controllers.len(),
            self.keyboards.len()
        );
    }

    fn select_controller(&mut self, index: usize) {
        self.selected = Some(index);
        self.navigator = find_navigator(&self.controllers, index);
        self.drain_all();

        self.table.reset();
        self.current_slot = 0;
        self.redo = false;
        self.debounce_until = None;
        self.review_cursor = 0;
        self.record.clear();
        self.saved = None;
        self.export_error = None;
        self.state = WizardState::Capture;

        if let Some(profile) = self.selected_profile() {
            info!("Mapping {} ({})", profile.name, profile.guid);
        }
        if let Some(navigator) = self.navigator_profile() {
            info!("Navigating with {}", navigator.name);
        }
    }

    /// Drops the current controller and waits for a new one, rescanning right away.
    pub(super) fn map_another(&mut self) {
        self.table.reset();
        self.selected = None;
        self.navigator = None;
        self.browser = None;
        self.record.clear();
        self.saved = None;
        self.export_error = None;
        self.last_scan = None;
        self.state = WizardState::Detect;
    }
}
