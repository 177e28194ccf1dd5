//! Keyboard shortcuts
//!
//! Only the first key press of a batch is looked at, so mashing several keys in one
//! frame triggers a single action.

use super::NavSignal;
use crate::controller::codes::{
    KEY_1, KEY_2, KEY_3, KEY_4, KEY_BACKSPACE, KEY_DOWN, KEY_ENTER, KEY_ESC, KEY_LEFT, KEY_Q,
    KEY_RIGHT, KEY_SPACE, KEY_UP,
};
use crate::controller::RawEvent;

/// Direct actions that only a keyboard can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hotkey {
    RedoSelected,
    Save,
    Restart,
    Another,
    Back,
    Quit,
}

pub fn translate_keyboard(events: &[RawEvent]) -> NavSignal {
    let mut signal = NavSignal::default();
    let Some(code) = events.iter().find_map(RawEvent::pressed_code) else {
        return signal;
    };

    match code {
        KEY_UP => signal.dy = -1,
        KEY_DOWN => signal.dy = 1,
        KEY_RIGHT => signal.dx = 1,
        KEY_ENTER | KEY_SPACE => signal.confirm = true,
        KEY_LEFT | KEY_BACKSPACE => signal.hotkey = Some(Hotkey::Back),
        KEY_1 => signal.hotkey = Some(Hotkey::RedoSelected),
        KEY_2 => signal.hotkey = Some(Hotkey::Save),
        KEY_3 => signal.hotkey = Some(Hotkey::Restart),
        KEY_4 => signal.hotkey = Some(Hotkey::Another),
        KEY_Q | KEY_ESC => signal.hotkey = Some(Hotkey::Quit),
        _ => {}
    }
    signal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_press_wins() {
        let events = [
            RawEvent::key(KEY_UP, 0),
            RawEvent::key(KEY_DOWN, 1),
            RawEvent::key(KEY_ENTER, 1),
        ];
        let signal = translate_keyboard(&events);
        assert_eq!(signal.dy, 1);
        assert!(!signal.confirm);
    }

    #[test]
    fn number_row_and_escape_map_to_hotkeys() {
        let hotkey = |code| translate_keyboard(&[RawEvent::key(code, 1)]).hotkey;
        assert_eq!(hotkey(KEY_1), Some(Hotkey::RedoSelected));
        assert_eq!(hotkey(KEY_2), Some(Hotkey::Save));
        assert_eq!(hotkey(KEY_3), Some(Hotkey::Restart));
        assert_eq!(hotkey(KEY_4), Some(Hotkey::Another));
        assert_eq!(hotkey(KEY_ESC), Some(Hotkey::Quit));
        assert_eq!(hotkey(KEY_Q), Some(Hotkey::Quit));
        assert_eq!(hotkey(KEY_BACKSPACE), Some(Hotkey::Back));
        assert!(translate_keyboard(&[RawEvent::key(KEY_SPACE, 1)]).confirm);
    }

    #[test]
    fn autorepeat_is_ignored() {
        assert!(translate_keyboard(&[RawEvent::key(KEY_DOWN, 2)]).is_idle());
    }
}
