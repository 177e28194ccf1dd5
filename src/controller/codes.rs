//! Linux input event codes used by the mapper
//!
//! Values mirror `linux/input-event-codes.h`. Only the codes the mapper actually
//! inspects are listed; everything else is carried around as a plain `u16`.

// Button blocks
pub const BTN_MISC: u16 = 0x100;
pub const BTN_JOYSTICK: u16 = 0x120;
pub const BTN_GAMEPAD: u16 = 0x130;
pub const BTN_BLOCK_WIDTH: u16 = 0x10;
pub const KEY_MAX: u16 = 0x2ff;

// Joystick buttons used by the THEC64 stick
pub const BTN_TRIGGER: u16 = 0x120;
pub const BTN_TOP2: u16 = 0x124;
pub const BTN_PINKIE: u16 = 0x125;
pub const BTN_BASE2: u16 = 0x127;

// Absolute axes
pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_HAT0X: u16 = 0x10;
pub const ABS_HAT3Y: u16 = 0x17;
pub const ABS_MAX: u16 = 0x3f;

// Keyboard
pub const KEY_ESC: u16 = 1;
pub const KEY_1: u16 = 2;
pub const KEY_2: u16 = 3;
pub const KEY_3: u16 = 4;
pub const KEY_4: u16 = 5;
pub const KEY_BACKSPACE: u16 = 14;
pub const KEY_Q: u16 = 16;
pub const KEY_ENTER: u16 = 28;
pub const KEY_A: u16 = 30;
pub const KEY_SPACE: u16 = 57;
pub const KEY_UP: u16 = 103;
pub const KEY_LEFT: u16 = 105;
pub const KEY_RIGHT: u16 = 106;
pub const KEY_DOWN: u16 = 108;

/// Returns true for codes inside the hat axis sub-range.
pub fn is_hat_axis(code: u16) -> bool {
    (ABS_HAT0X..=ABS_HAT3Y).contains(&code)
}

/// Hat index for a hat axis code. Two consecutive codes share one hat.
pub fn hat_index(code: u16) -> usize {
    usize::from(code - ABS_HAT0X) / 2
}

/// Even offsets are the horizontal half of a hat, odd offsets the vertical half.
pub fn is_horizontal_hat_axis(code: u16) -> bool {
    (code - ABS_HAT0X) % 2 == 0
}
