//! Test doubles for devices and storage

use crate::controller::codes::{ABS_HAT0X, ABS_X, ABS_Y, BTN_GAMEPAD};
use crate::controller::{
    AbsRange, Capabilities, Controller, ControllerProfile, DeviceScanner, DeviceSet, EventSource,
    InputIdentity, RawEvent,
};
use crate::persistence::{ExportError, ExportStorage};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Event source fed by the test. Clones share one queue.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    queue: Rc<RefCell<Vec<RawEvent>>>,
}

impl ScriptedSource {
    pub fn push(&self, events: &[RawEvent]) {
        self.queue.borrow_mut().extend_from_slice(events);
    }

    pub fn press(&self, code: u16) {
        self.push(&[RawEvent::key(code, 1), RawEvent::key(code, 0)]);
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl EventSource for ScriptedSource {
    fn drain(&mut self) -> Vec<RawEvent> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }
}

/// Gamepad with eight face buttons, a stick and one hat
pub fn pad_profile(name: &str, product: u16) -> ControllerProfile {
    let caps = Capabilities {
        name: Some(name.to_string()),
        identity: Some(InputIdentity {
            bus_type: 3,
            vendor: 0x1c59,
            product,
            version: 0x110,
        }),
        keys: (BTN_GAMEPAD..BTN_GAMEPAD + 8).collect(),
        axes: [
            (ABS_X, AbsRange::new(0, 255)),
            (ABS_Y, AbsRange::new(0, 255)),
            (ABS_HAT0X, AbsRange::new(-1, 1)),
            (ABS_HAT0X + 1, AbsRange::new(-1, 1)),
        ]
        .into_iter()
        .collect(),
    };
    match ControllerProfile::from_capabilities(&caps) {
        Some(profile) => profile,
        None => panic!("test pad does not qualify"),
    }
}

/// Scanner returning a fixed device set. Every scan hands out fresh handles onto
/// the same scripted queues.
#[derive(Debug, Clone, Default)]
pub struct FakeScanner {
    controllers: Vec<(ControllerProfile, ScriptedSource)>,
    keyboards: Vec<ScriptedSource>,
    scans: Rc<Cell<usize>>,
}

impl FakeScanner {
    pub fn with_controller(mut self, profile: ControllerProfile) -> (Self, ScriptedSource) {
        let source = ScriptedSource::default();
        self.controllers.push((profile, source.clone()));
        (self, source)
    }

    pub fn with_keyboard(mut self) -> (Self, ScriptedSource) {
        let source = ScriptedSource::default();
        self.keyboards.push(source.clone());
        (self, source)
    }

    pub fn scan_count(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.scans)
    }
}

impl DeviceScanner for FakeScanner {
    fn scan(&mut self) -> DeviceSet {
        self.scans.set(self.scans.get() + 1);
        let controllers = self
            .controllers
            .iter()
            .enumerate()
            .map(|(i, (profile, source))| Controller {
                path: PathBuf::from(format!("/dev/input/event{}", i)),
                profile: profile.clone(),
                source: Box::new(source.clone()),
            })
            .collect();
        let keyboards = self
            .keyboards
            .iter()
            .map(|source| Box::new(source.clone()) as Box<dyn EventSource>)
            .collect();

        DeviceSet {
            controllers,
            keyboards,
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    fail_writes: bool,
}

/// In-memory directory tree. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStorage {
    pub fn with_dirs(dirs: &[&str]) -> Self {
        let storage = Self::default();
        storage
            .state
            .borrow_mut()
            .dirs
            .extend(dirs.iter().map(PathBuf::from));
        storage
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.state.borrow().files.get(Path::new(path)).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.state.borrow().files.len()
    }
}

impl ExportStorage for MemoryStorage {
    fn list_directories(&self, path: &Path) -> Result<Vec<String>, ExportError> {
        let names = self
            .state
            .borrow()
            .dirs
            .iter()
            .filter(|dir| dir.parent() == Some(path))
            .filter_map(|dir| dir.file_name()?.to_str().map(str::to_string))
            .collect();
        Ok(names)
    }

    fn write_record(&self, path: &Path, contents: &str) -> Result<(), ExportError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(ExportError::Write {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only media"),
            });
        }
        state.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
