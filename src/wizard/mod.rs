//! Mapping wizard state machine
//!
//! Drives the whole mapping flow, one [`WizardSession::step`] per tick:
//!
//! ```text
//! Detect ──► Capture ──► Review ──► Browse ──► (Done) ──► Exit
//!   ▲          ▲  │         │  ▲       │
//!   │          │  └─────────┘  └───────┘
//!   │          └── redo ───────┘
//!   └───────── map another ────┘
//! ```
//!
//! Every state can jump to `Exit` on the keyboard quit key. `Done` is only entered
//! when the session is configured to confirm a save before leaving.
//!
//! The session owns every open device. Each tick drains the devices the current
//! state listens to, so nothing is carried over from one tick to the next.

mod browse;
mod capture;
mod detect;
mod review;

use crate::controller::{Controller, ControllerProfile, DeviceScanner, EventSource, RawEvent};
use crate::input::{reduce, translate_keyboard, translate_navigator, NavSignal};
use crate::mapping::{mapping_record, MappingTable, Slot, SLOT_COUNT};
use crate::persistence::{DirBrowser, ExportStorage};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// Quiet period after a capture before the next slot is armed
pub const DEBOUNCE: Duration = Duration::from_millis(300);
/// Device rescan period while waiting for a controller
pub const RESCAN_INTERVAL: Duration = Duration::from_millis(2000);
/// Ten slot rows followed by four actions
pub const REVIEW_ROWS: usize = SLOT_COUNT + 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Detect,
    Capture,
    Review,
    Browse,
    Done,
    Exit,
}

/// One row of the review list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewItem {
    Slot(Slot),
    Save,
    Restart,
    Another,
    Quit,
}

impl ReviewItem {
    pub fn from_row(row: usize) -> Option<Self> {
        match row {
            r if r < SLOT_COUNT => Slot::from_index(r).map(ReviewItem::Slot),
            10 => Some(ReviewItem::Save),
            11 => Some(ReviewItem::Restart),
            12 => Some(ReviewItem::Another),
            13 => Some(ReviewItem::Quit),
            _ => None,
        }
    }

    /// Action label and its keyboard shortcut
    pub fn action(&self) -> Option<(&'static str, &'static str)> {
        match self {
            ReviewItem::Slot(_) => None,
            ReviewItem::Save => Some(("Save to File", "2")),
            ReviewItem::Restart => Some(("Start Over", "3")),
            ReviewItem::Another => Some(("Map Another Controller", "4")),
            ReviewItem::Quit => Some(("Quit", "Q")),
        }
    }
}

/// Where and when the current mapping was last written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRecord {
    pub path: PathBuf,
    pub saved_at: DateTime<Local>,
}

pub struct WizardSession {
    state: WizardState,
    scanner: Box<dyn DeviceScanner>,
    storage: Box<dyn ExportStorage>,
    export_root: PathBuf,
    confirm_after_save: bool,

    controllers: Vec<Controller>,
    keyboards: Vec<Box<dyn EventSource>>,
    selected: Option<usize>,
    navigator: Option<usize>,
    last_scan: Option<Instant>,

    table: MappingTable,
    current_slot: usize,
    redo: bool,
    debounce_until: Option<Instant>,

    review_cursor: usize,
    record: String,
    browser: Option<DirBrowser>,
    saved: Option<SavedRecord>,
    export_error: Option<String>,
}

impl WizardSession {
    pub fn new(
        scanner: Box<dyn DeviceScanner>,
        storage: Box<dyn ExportStorage>,
        export_root: PathBuf,
    ) -> Self {
        Self {
            state: WizardState::Detect,
            scanner,
            storage,
            export_root,
            confirm_after_save: false,
            controllers: Vec::new(),
            keyboards: Vec::new(),
            selected: None,
            navigator: None,
            last_scan: None,
            table: MappingTable::new(),
            current_slot: 0,
            redo: false,
            debounce_until: None,
            review_cursor: 0,
            record: String::new(),
            browser: None,
            saved: None,
            export_error: None,
        }
    }

    /// Show a confirmation screen after a successful save instead of returning to review
    pub fn with_save_confirmation(mut self, enabled: bool) -> Self {
        self.confirm_after_save = enabled;
        self
    }

    /// Advances the wizard by one tick.
    pub fn step(&mut self, now: Instant) {
        let keyboard = self.drain_keyboards();
        let previous = self.state;

        match self.state {
            WizardState::Detect => self.update_detect(now, &keyboard),
            WizardState::Capture => self.update_capture(now, &keyboard),
            WizardState::Review => self.update_review(&keyboard),
            WizardState::Browse => self.update_browse(&keyboard),
            WizardState::Done => self.update_done(&keyboard),
            WizardState::Exit => {}
        }

        if self.state != previous {
            info!("Wizard state: {:?} -> {:?}", previous, self.state);
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    pub fn selected_profile(&self) -> Option<&ControllerProfile> {
        self.selected
            .and_then(|index| self.controllers.get(index))
            .map(|controller| &controller.profile)
    }

    pub fn navigator_profile(&self) -> Option<&ControllerProfile> {
        self.navigator
            .and_then(|index| self.controllers.get(index))
            .map(|controller| &controller.profile)
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Slot waiting for input, `None` once all slots went through capture
    pub fn current_slot(&self) -> Option<Slot> {
        Slot::from_index(self.current_slot)
    }

    pub fn is_redo(&self) -> bool {
        self.redo
    }

    pub fn is_debouncing(&self) -> bool {
        self.debounce_until.is_some()
    }

    pub fn review_cursor(&self) -> usize {
        self.review_cursor
    }

    /// Serialized mapping as of the last time review was entered
    pub fn record(&self) -> &str {
        &self.record
    }

    pub fn browser(&self) -> Option<&DirBrowser> {
        self.browser.as_ref()
    }

    pub fn saved(&self) -> Option<&SavedRecord> {
        self.saved.as_ref()
    }

    pub fn export_error(&self) -> Option<&str> {
        self.export_error.as_deref()
    }

    /// Closes every device handle.
    pub fn release_devices(&mut self) {
        info!(
            "Releasing {} controller(s) and {} keyboard(s)",
            self.controllers.len(),
            self.keyboards.len()
        );
        self.controllers.clear();
        self.keyboards.clear();
        self.selected = None;
        self.navigator = None;
    }

    fn drain_keyboards(&mut self) -> Vec<RawEvent> {
        self.keyboards
            .iter_mut()
            .flat_map(|keyboard| keyboard.drain())
            .collect()
    }

    fn drain_controller(&mut self, index: Option<usize>) -> Vec<RawEvent> {
        index
            .and_then(|index| self.controllers.get_mut(index))
            .map(|controller| controller.source.drain())
            .unwrap_or_default()
    }

    fn drain_selected(&mut self) -> Vec<RawEvent> {
        self.drain_controller(self.selected)
    }

    fn drain_navigator(&mut self) -> Vec<RawEvent> {
        self.drain_controller(self.navigator)
    }

    fn drain_all(&mut self) {
        for controller in &mut self.controllers {
            controller.source.drain();
        }
        self.drain_keyboards();
    }

    /// Reads the selected controller and the navigator and merges them with the
    /// keyboard batch of this tick.
    fn navigation(&mut self, keyboard: &[RawEvent]) -> NavSignal {
        let controller = self.drain_selected();
        let navigator = self.drain_navigator();
        match self.selected_profile() {
            Some(profile) => reduce(&controller, profile, &self.table, &navigator, keyboard),
            None => translate_navigator(&navigator).merge(translate_keyboard(keyboard)),
        }
    }

    fn enter_review(&mut self) {
        if let Some(profile) = self.selected_profile() {
            self.record = mapping_record(profile, &self.table);
        }
        self.state = WizardState::Review;
    }

    fn update_done(&mut self, keyboard: &[RawEvent]) {
        let controller = self.drain_selected();
        let navigator = self.drain_navigator();
        let pressed = controller
            .iter()
            .chain(navigator.iter())
            .chain(keyboard.iter())
            .any(RawEvent::is_press);
        if pressed {
            self.state = WizardState::Exit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::codes::{
        ABS_X, ABS_Y, BTN_GAMEPAD, BTN_TRIGGER, KEY_1, KEY_2, KEY_3, KEY_4, KEY_DOWN, KEY_ENTER,
        KEY_Q, KEY_UP,
    };
    use crate::mapping::{record_file_name, Binding};
    use crate::testing::{pad_profile, FakeScanner, MemoryStorage, ScriptedSource};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::path::Path;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    struct Harness {
        session: WizardSession,
        pad: ScriptedSource,
        keyboard: ScriptedSource,
        storage: MemoryStorage,
        scans: Rc<Cell<usize>>,
        now: Instant,
    }

    impl Harness {
        fn new() -> Self {
            Self::build(FakeScanner::default(), false)
        }

        fn build(scanner: FakeScanner, confirm_after_save: bool) -> Self {
            let (scanner, pad) = scanner.with_controller(pad_profile("Test Pad", 0x26));
            let (scanner, keyboard) = scanner.with_keyboard();
            let scans = scanner.scan_count();
            let storage = MemoryStorage::with_dirs(&["/mnt/usb"]);
            let session = WizardSession::new(
                Box::new(scanner),
                Box::new(storage.clone()),
                PathBuf::from("/mnt"),
            )
            .with_save_confirmation(confirm_after_save);

            Self {
                session,
                pad,
                keyboard,
                storage,
                scans,
                now: Instant::now(),
            }
        }

        fn tick(&mut self) {
            self.now += FRAME;
            self.session.step(self.now);
        }

        fn settle(&mut self) {
            self.now += DEBOUNCE;
            self.session.step(self.now);
        }

        fn press(&mut self, code: u16) {
            self.pad.press(code);
            self.tick();
        }

        fn key(&mut self, code: u16) {
            self.keyboard.press(code);
            self.tick();
        }

        fn select_pad(&mut self) {
            // First tick scans, sees the press and selects.
            self.press(BTN_GAMEPAD);
            assert_eq!(self.session.state(), WizardState::Capture);
        }

        fn capture(&mut self, events: &[RawEvent]) {
            self.pad.push(events);
            self.tick();
            self.settle();
        }

        fn map_everything(&mut self) {
            self.select_pad();
            for i in 0..8 {
                self.capture(&[RawEvent::key(BTN_GAMEPAD + i, 1)]);
            }
            self.capture(&[RawEvent::abs(ABS_X, 250)]);
            self.capture(&[RawEvent::abs(ABS_Y, 5)]);
            assert_eq!(self.session.state(), WizardState::Review);
        }
    }

    #[test]
    fn detect_selects_pressed_controller_and_finds_navigator() {
        let navigator = pad_profile("THEC64 Joystick", 0x23);
        let (scanner, thec64) = FakeScanner::default().with_controller(navigator);
        let mut h = Harness::build(scanner, false);

        h.tick();
        assert_eq!(h.session.state(), WizardState::Detect);
        assert_eq!(h.session.controllers().len(), 2);

        thec64.push(&[RawEvent::abs(ABS_X, 200)]);
        h.press(BTN_GAMEPAD + 2);
        assert_eq!(h.session.state(), WizardState::Capture);
        assert_eq!(h.session.selected_profile().map(|p| p.name.as_str()), Some("Test Pad"));
        assert_eq!(
            h.session.navigator_profile().map(|p| p.name.as_str()),
            Some("THEC64 Joystick")
        );
        assert_eq!(thec64.pending(), 0);
        assert_eq!(h.session.current_slot(), Some(Slot::LeftFire));
    }

    #[test]
    fn detect_rescans_on_interval_only() {
        let mut h = Harness::new();
        h.tick();
        h.tick();
        assert_eq!(h.scans.get(), 1);

        h.now += RESCAN_INTERVAL;
        h.tick();
        assert_eq!(h.scans.get(), 2);
    }

    #[test]
    fn rapid_presses_inside_debounce_capture_once() {
        let mut h = Harness::new();
        h.select_pad();

        h.press(BTN_GAMEPAD + 3);
        assert!(h.session.is_debouncing());
        h.press(BTN_GAMEPAD + 3);
        h.press(BTN_GAMEPAD + 3);
        assert_eq!(h.session.current_slot(), Some(Slot::LeftFire));

        h.settle();
        h.tick();
        assert_eq!(h.session.current_slot(), Some(Slot::RightFire));
        assert_eq!(h.session.table().get(Slot::LeftFire), Binding::Button(3));
        assert_eq!(h.session.table().get(Slot::RightFire), Binding::Unmapped);
    }

    #[test]
    fn full_capture_lands_in_review_with_record() {
        let mut h = Harness::new();
        h.map_everything();

        let profile = pad_profile("Test Pad", 0x26);
        assert_eq!(h.session.review_cursor(), 0);
        assert_eq!(h.session.table().get(Slot::LeftRight), Binding::Axis(0));
        assert_eq!(h.session.table().get(Slot::UpDown), Binding::Axis(1));
        assert_eq!(h.session.record(), mapping_record(&profile, h.session.table()));
    }

    #[test]
    fn redo_from_review_recaptures_one_slot() {
        let mut h = Harness::new();
        h.map_everything();
        let before = h.session.table().clone();

        h.key(KEY_DOWN);
        h.key(KEY_DOWN);
        h.key(KEY_ENTER);
        assert_eq!(h.session.state(), WizardState::Capture);
        assert!(h.session.is_redo());
        assert_eq!(h.session.table().get(Slot::LeftTriangle), Binding::Unmapped);

        h.capture(&[RawEvent::key(BTN_GAMEPAD + 5, 1)]);
        assert_eq!(h.session.state(), WizardState::Review);
        assert_eq!(h.session.review_cursor(), 2);
        assert_eq!(h.session.table().get(Slot::LeftTriangle), Binding::Button(5));
        assert_eq!(
            h.session.table().duplicates_of(Slot::LeftTriangle),
            vec![Slot::Menu2]
        );
        for slot in Slot::ALL.iter().filter(|s| **s != Slot::LeftTriangle) {
            assert_eq!(h.session.table().get(*slot), before.get(*slot));
        }
    }

    #[test]
    fn redo_hotkey_ignores_action_rows() {
        let mut h = Harness::new();
        h.map_everything();
        for _ in 0..20 {
            h.key(KEY_DOWN);
        }
        assert_eq!(h.session.review_cursor(), REVIEW_ROWS - 1);

        h.key(KEY_1);
        assert_eq!(h.session.state(), WizardState::Review);

        h.key(KEY_UP);
        assert_eq!(h.session.review_cursor(), REVIEW_ROWS - 2);
    }

    #[test]
    fn controller_buttons_drive_review() {
        let mut h = Harness::new();
        h.map_everything();

        // Menu 4 is the save shortcut, Menu 4 again leaves the browser.
        h.press(BTN_GAMEPAD + 7);
        assert_eq!(h.session.state(), WizardState::Browse);
        h.press(BTN_GAMEPAD + 7);
        assert_eq!(h.session.state(), WizardState::Review);

        // A swing out and back within one tick does not move, a held deflection does.
        // Menu 2 then redoes the row under the cursor.
        h.pad.push(&[RawEvent::abs(ABS_Y, 250), RawEvent::abs(ABS_Y, 127)]);
        h.tick();
        assert_eq!(h.session.review_cursor(), 0);
        h.pad.push(&[RawEvent::abs(ABS_Y, 250)]);
        h.tick();
        h.pad.push(&[RawEvent::abs(ABS_Y, 127)]);
        h.tick();
        assert_eq!(h.session.review_cursor(), 1);

        h.press(BTN_GAMEPAD + 5);
        assert_eq!(h.session.state(), WizardState::Capture);
        assert_eq!(h.session.current_slot(), Some(Slot::RightFire));
    }

    #[test]
    fn save_writes_record_and_returns_to_review() {
        let mut h = Harness::new();
        h.map_everything();

        h.key(KEY_2);
        assert_eq!(h.session.state(), WizardState::Browse);
        assert_eq!(h.session.browser().map(|b| b.path()), Some(Path::new("/mnt")));

        h.key(KEY_ENTER);
        assert_eq!(h.session.browser().map(|b| b.path()), Some(Path::new("/mnt/usb")));
        h.key(KEY_DOWN);
        h.key(KEY_ENTER);

        let profile = pad_profile("Test Pad", 0x26);
        let expected_path = format!("/mnt/usb/{}", record_file_name(&profile));
        assert_eq!(h.session.state(), WizardState::Review);
        assert_eq!(
            h.session.saved().map(|s| s.path.clone()),
            Some(PathBuf::from(&expected_path))
        );
        assert_eq!(
            h.storage.file(&expected_path),
            Some(format!("{}\n", h.session.record()))
        );
    }

    #[test]
    fn failed_write_stays_in_browse() {
        let mut h = Harness::new();
        h.map_everything();
        h.storage.fail_writes(true);

        h.key(KEY_2);
        h.key(KEY_DOWN);
        h.key(KEY_ENTER);

        assert_eq!(h.session.state(), WizardState::Browse);
        assert!(h.session.saved().is_none());
        assert!(h.session.export_error().is_some());
        assert_eq!(h.storage.file_count(), 0);
    }

    #[test]
    fn confirmation_screen_exits_on_any_press() {
        let mut h = Harness::build(FakeScanner::default(), true);
        h.map_everything();

        h.key(KEY_2);
        h.key(KEY_DOWN);
        h.key(KEY_ENTER);
        assert_eq!(h.session.state(), WizardState::Done);

        h.tick();
        assert_eq!(h.session.state(), WizardState::Done);
        h.press(BTN_GAMEPAD + 1);
        assert_eq!(h.session.state(), WizardState::Exit);
    }

    #[test]
    fn restart_clears_everything_and_quit_exits_from_capture() {
        let mut h = Harness::new();
        h.map_everything();

        h.key(KEY_3);
        assert_eq!(h.session.state(), WizardState::Capture);
        assert_eq!(h.session.current_slot(), Some(Slot::LeftFire));
        assert!(!h.session.is_redo());
        assert_eq!(h.session.table(), &MappingTable::new());

        h.key(KEY_Q);
        assert_eq!(h.session.state(), WizardState::Exit);
    }

    #[test]
    fn map_another_returns_to_detect_and_rescans() {
        let mut h = Harness::new();
        h.map_everything();
        let scans_before = h.scans.get();

        h.key(KEY_4);
        assert_eq!(h.session.state(), WizardState::Detect);
        assert!(h.session.selected_profile().is_none());
        assert!(h.session.record().is_empty());

        h.tick();
        assert_eq!(h.scans.get(), scans_before + 1);
    }

    #[test]
    fn navigator_confirms_while_pad_is_silent() {
        let navigator = pad_profile("THEC64 Joystick", 0x24);
        let (scanner, thec64) = FakeScanner::default().with_controller(navigator);
        let mut h = Harness::build(scanner, false);
        h.map_everything();

        for _ in 0..10 {
            h.key(KEY_DOWN);
        }
        thec64.press(BTN_TRIGGER);
        h.tick();
        assert_eq!(h.session.state(), WizardState::Browse);
    }
}
