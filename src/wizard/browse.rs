use super::{SavedRecord, WizardSession, WizardState};
use crate::controller::RawEvent;
use crate::input::Hotkey;
use crate::mapping::{mapping_record, record_file_name};
use chrono::Local;
use std::path::PathBuf;
use tracing::{info, warn};

impl WizardSession {
    pub(super) fn update_browse(&mut self, keyboard: &[RawEvent]) {
        let nav = self.navigation(keyboard);
        let Some(browser) = self.browser.as_mut() else {
            self.state = WizardState::Review;
            return;
        };

        if nav.dy != 0 {
            browser.move_selection(nav.dy);
        }

        if nav.confirm {
            if let Some(dir) = browser.activate(self.storage.as_ref()) {
                self.export_to(dir);
            }
            return;
        }

        if nav.secondary || nav.hotkey == Some(Hotkey::Back) {
            browser.go_up(self.storage.as_ref());
        }

        if nav.cancel || nav.hotkey == Some(Hotkey::Quit) {
            self.state = WizardState::Review;
        }
    }

    /// Writes `<dir>/<guid>.txt`. A failure keeps the browser open.
    fn export_to(&mut self, dir: PathBuf) {
        let Some(profile) = self.selected_profile() else {
            return;
        };
        let path = dir.join(record_file_name(profile));
        let record = mapping_record(profile, &self.table);

        match self.storage.write_record(&path, &format!("{}\n", record)) {
            Ok(()) => {
                info!("Saved mapping to {}", path.display());
                self.record = record;
                self.saved = Some(SavedRecord {
                    path,
                    saved_at: Local::now(),
                });
                self.export_error = None;
                self.state = if self.confirm_after_save {
                    WizardState::Done
                } else {
                    WizardState::Review
                };
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                self.export_error = Some(e.to_string());
            }
        }
    }
}
