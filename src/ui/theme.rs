//! Color palette for the framebuffer UI
//!
//! All colors are packed `0xAARRGGBB`, which is the byte order a little-endian
//! 32 bpp framebuffer expects.

/// Dark palette shared by every screen.
pub struct UiColors;

impl UiColors {
    /// Screen background
    pub const BG: u32 = 0xFF101828;
    pub const HEADER_BG: u32 = 0xFF182040;

    /// Joystick body and its drop shadow
    pub const BODY: u32 = 0xFF4A4A6A;
    pub const BODY_DARK: u32 = 0xFF36364E;

    pub const STICK_BASE: u32 = 0xFF5A5A7A;
    pub const STICK: u32 = 0xFF6E6E90;
    pub const STICK_TOP: u32 = 0xFF8888AA;
    /// Stick ball when only one of its two axes is bound
    pub const STICK_PARTIAL: u32 = 0xFF66AA44;

    pub const BTN: u32 = 0xFF505078;
    pub const BTN_FIRE: u32 = 0xFF6E4444;

    /// Element currently waiting for input (blinks)
    pub const HIGHLIGHT: u32 = 0xFFFFCC00;
    /// Element with a captured binding
    pub const MAPPED: u32 = 0xFF22BB66;

    pub const TEXT: u32 = 0xFFD0D0E0;
    pub const TEXT_DIM: u32 = 0xFF707088;
    pub const TEXT_TITLE: u32 = 0xFFFFFFFF;

    /// Row background under the cursor
    pub const SELECTED: u32 = 0xFF2A4488;
    pub const BORDER: u32 = 0xFF5566AA;

    pub const ERROR: u32 = 0xFFFF4444;
    pub const SUCCESS: u32 = 0xFF44FF88;

    pub const BLACK: u32 = 0xFF000000;
}
