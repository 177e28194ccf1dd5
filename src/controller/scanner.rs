//! Device discovery
//!
//! The wizard asks a [`DeviceScanner`] for a fresh [`DeviceSet`]. Every scan
//! replaces the previous set, so dropped handles close their devices.

use super::device::InputDevice;
use super::event::EventSource;
use super::profile::ControllerProfile;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MAX_CONTROLLERS: usize = 8;
pub const MAX_KEYBOARDS: usize = 8;

/// A qualifying gamepad together with its open event stream
pub struct Controller {
    pub path: PathBuf,
    pub profile: ControllerProfile,
    pub source: Box<dyn EventSource>,
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("path", &self.path)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

/// Result of one scan. A device is either a controller or a keyboard, never both.
#[derive(Default)]
pub struct DeviceSet {
    pub controllers: Vec<Controller>,
    pub keyboards: Vec<Box<dyn EventSource>>,
}

pub trait DeviceScanner {
    fn scan(&mut self) -> DeviceSet;
}

/// Scans `event*` nodes in an input directory through evdev
#[derive(Debug, Clone)]
pub struct EvdevScanner {
    input_dir: PathBuf,
}

impl EvdevScanner {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
        }
    }
}

impl DeviceScanner for EvdevScanner {
    /// Opens every node once and sorts it into controllers and keyboards.
    fn scan(&mut self) -> DeviceSet {
        let mut set = DeviceSet::default();

        for path in event_nodes(&self.input_dir) {
            let device = match InputDevice::open(&path) {
                Ok(device) => device,
                Err(e) => {
                    debug!("Skipping device: {}", e);
                    continue;
                }
            };
            let caps = device.capabilities();

            if let Some(profile) = ControllerProfile::from_capabilities(&caps) {
                if set.controllers.len() >= MAX_CONTROLLERS {
                    continue;
                }
                debug!(
                    "Found controller {} ({}) at {}",
                    profile.name,
                    profile.guid,
                    path.display()
                );
                set.controllers.push(Controller {
                    path,
                    profile,
                    source: Box::new(device),
                });
            } else if caps.is_keyboard() && set.keyboards.len() < MAX_KEYBOARDS {
                debug!("Found keyboard at {}", path.display());
                set.keyboards.push(Box::new(device));
            }
        }
        set
    }
}

/// `event*` entries of a directory, ordered by their numeric suffix
pub fn event_nodes(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut nodes: Vec<(u32, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name();
            let number = name.to_str()?.strip_prefix("event")?.parse().ok()?;
            Some((number, entry.path()))
        })
        .collect();

    nodes.sort_by_key(|(number, _)| *number);
    nodes.into_iter().map(|(_, path)| path).collect()
}
