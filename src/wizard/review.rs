use super::{ReviewItem, WizardSession, WizardState, REVIEW_ROWS};
use crate::controller::RawEvent;
use crate::input::Hotkey;
use crate::persistence::DirBrowser;

impl WizardSession {
    pub(super) fn update_review(&mut self, keyboard: &[RawEvent]) {
        let nav = self.navigation(keyboard);

        match nav.hotkey {
            Some(Hotkey::Quit) => {
                self.state = WizardState::Exit;
                return;
            }
            Some(Hotkey::RedoSelected) => {
                if let Some(ReviewItem::Slot(slot)) = ReviewItem::from_row(self.review_cursor) {
                    self.redo_slot(slot);
                }
                return;
            }
            Some(Hotkey::Save) => {
                self.open_browser();
                return;
            }
            Some(Hotkey::Restart) => {
                self.restart();
                return;
            }
            Some(Hotkey::Another) => {
                self.map_another();
                return;
            }
            Some(Hotkey::Back) | None => {}
        }

        if nav.dy != 0 {
            let row = self.review_cursor as i64 + i64::from(nav.dy);
            self.review_cursor = row.clamp(0, REVIEW_ROWS as i64 - 1) as usize;
        }

        match ReviewItem::from_row(self.review_cursor) {
            Some(ReviewItem::Slot(slot)) if nav.dx > 0 || nav.confirm || nav.secondary => {
                self.redo_slot(slot);
                return;
            }
            Some(item) if nav.confirm => {
                self.run_action(item);
                return;
            }
            _ => {}
        }

        // Menu 4 saves from anywhere in the list.
        if nav.cancel {
            self.open_browser();
        }
    }

    fn run_action(&mut self, item: ReviewItem) {
        match item {
            ReviewItem::Slot(slot) => self.redo_slot(slot),
            ReviewItem::Save => self.open_browser(),
            ReviewItem::Restart => self.restart(),
            ReviewItem::Another => self.map_another(),
            ReviewItem::Quit => self.state = WizardState::Exit,
        }
    }

    fn open_browser(&mut self) {
        self.browser = Some(DirBrowser::open(&self.export_root, self.storage.as_ref()));
        self.export_error = None;
        self.state = WizardState::Browse;
    }
}
