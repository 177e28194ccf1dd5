//! evdev-backed input devices
//!
//! Opens `/dev/input/event*` nodes in non-blocking mode, snapshots their
//! capabilities and drains their event queues once per tick.

use super::capabilities::{AbsRange, Capabilities, InputIdentity};
use super::event::{EventSource, RawEvent};
use super::DeviceError;
use evdev::{Device, InputEventKind};
use std::io::ErrorKind;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct InputDevice {
    path: PathBuf,
    device: Device,
}

impl InputDevice {
    pub fn open(path: &Path) -> Result<Self, DeviceError> {
        let device = Device::open(path).map_err(|source| DeviceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        set_nonblocking(&device).map_err(|source| DeviceError::NonBlocking {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            device,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of everything the profile builder needs.
    ///
    /// Queries that fail are treated as "capability absent" rather than as errors.
    pub fn capabilities(&self) -> Capabilities {
        let input_id = self.device.input_id();
        let identity = InputIdentity {
            bus_type: input_id.bus_type().0,
            vendor: input_id.vendor(),
            product: input_id.product(),
            version: input_id.version(),
        };

        let keys = self
            .device
            .supported_keys()
            .map(|keys| keys.iter().map(|key| key.code()).collect())
            .unwrap_or_default();

        let abs_state = match self.device.get_abs_state() {
            Ok(state) => Some(state),
            Err(e) => {
                debug!("Axis range query failed for {}: {}", self.path.display(), e);
                None
            }
        };

        let axes = self
            .device
            .supported_absolute_axes()
            .map(|axes| {
                axes.iter()
                    .map(|axis| {
                        let range = abs_state
                            .as_ref()
                            .and_then(|state| state.get(usize::from(axis.0)))
                            .map(|info| AbsRange::new(info.minimum, info.maximum))
                            .unwrap_or_default();
                        (axis.0, range)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Capabilities {
            name: self.device.name().map(str::to_string),
            identity: Some(identity),
            keys,
            axes,
        }
    }
}

impl EventSource for InputDevice {
    fn drain(&mut self) -> Vec<RawEvent> {
        let mut batch = Vec::new();
        loop {
            match self.device.fetch_events() {
                Ok(events) => {
                    for event in events {
                        match event.kind() {
                            InputEventKind::Key(key) => {
                                batch.push(RawEvent::key(key.code(), event.value()))
                            }
                            InputEventKind::AbsAxis(axis) => {
                                batch.push(RawEvent::abs(axis.0, event.value()))
                            }
                            _ => {}
                        }
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => {
                    debug!("Failed to read from {}: {}", self.path.display(), e);
                    break;
                }
            }
        }
        batch
    }
}

fn set_nonblocking(device: &Device) -> std::io::Result<()> {
    let fd = device.as_raw_fd();

    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
    if flags < 0 {
        return Err(std::io::Error::last_os_error());
    }

    let rc = unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) };
    if rc < 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}
