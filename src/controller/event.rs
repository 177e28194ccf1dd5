//! Raw input events as drained from a device
//!
//! The mapper only cares about key and absolute-axis events; synchronization
//! reports and everything else are dropped while reading.

use std::fmt;

/// Key value reported by the kernel for a press (0 = release, 2 = autorepeat)
pub const KEY_PRESSED: i32 = 1;

/// A single key or axis event read from an input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    Key { code: u16, value: i32 },
    Abs { code: u16, value: i32 },
}

impl RawEvent {
    pub fn key(code: u16, value: i32) -> Self {
        RawEvent::Key { code, value }
    }

    pub fn abs(code: u16, value: i32) -> Self {
        RawEvent::Abs { code, value }
    }

    /// Key-down events only. Releases and autorepeats never count as input.
    pub fn is_press(&self) -> bool {
        matches!(
            self,
            RawEvent::Key {
                value: KEY_PRESSED,
                ..
            }
        )
    }

    /// Code of a key-down event, if this is one
    pub fn pressed_code(&self) -> Option<u16> {
        match *self {
            RawEvent::Key {
                code,
                value: KEY_PRESSED,
            } => Some(code),
            _ => None,
        }
    }
}

impl fmt::Display for RawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawEvent::Key { code, value } => write!(f, "key {:#05x}={}", code, value),
            RawEvent::Abs { code, value } => write!(f, "abs {:#04x}={}", code, value),
        }
    }
}

/// Anything that can hand over its pending events without blocking
///
/// Implementations must return immediately. An empty batch means nothing was queued,
/// and read errors are reported as an empty batch after logging them.
pub trait EventSource {
    fn drain(&mut self) -> Vec<RawEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_key_down_counts_as_press() {
        assert!(RawEvent::key(0x120, 1).is_press());
        assert!(!RawEvent::key(0x120, 0).is_press());
        assert!(!RawEvent::key(0x120, 2).is_press());
        assert!(!RawEvent::abs(0x00, 1).is_press());
        assert_eq!(RawEvent::key(0x130, 1).pressed_code(), Some(0x130));
        assert_eq!(RawEvent::key(0x130, 0).pressed_code(), None);
    }
}
