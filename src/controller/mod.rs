//! Controller subsystem: device discovery and capability enumeration
//!
//! Turns raw Linux input devices into normalized controller profiles:
//!
//! 1. [`scanner`] - Lists `event*` nodes and opens them non-blocking
//! 2. [`capabilities`] - Snapshots keys, axes, identity and name
//! 3. [`profile`] - Button/axis/hat numbering and the SDL GUID
//! 4. [`event`] - Raw key/axis events drained once per tick
//!
//! # Architecture
//!
//! ```text
//! /dev/input/eventN ──► InputDevice ──► Capabilities ──► ControllerProfile
//!                           │
//!                           └──► drain() ──► Vec<RawEvent>
//! ```
//!
//! Devices that fail to open or that do not qualify are skipped silently;
//! the next rescan gets another chance at them.

pub mod capabilities;
pub mod codes;
pub mod device;
pub mod event;
pub mod profile;
pub mod scanner;

pub use capabilities::{AbsRange, Capabilities, InputIdentity};
pub use event::{EventSource, RawEvent};
pub use profile::{AxisInfo, ControllerProfile, Deflection, Guid};
pub use scanner::{Controller, DeviceScanner, DeviceSet, EvdevScanner};

use std::path::PathBuf;

/// Errors raised while opening an input device
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to switch {} to non-blocking mode: {source}", path.display())]
    NonBlocking {
        path: PathBuf,
        source: std::io::Error,
    },
}
