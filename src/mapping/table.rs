//! Logical slots and their captured bindings

use std::fmt;

pub const SLOT_COUNT: usize = 10;

// Hat direction bits
pub const HAT_UP: u8 = 1;
pub const HAT_RIGHT: u8 = 2;
pub const HAT_DOWN: u8 = 4;
pub const HAT_LEFT: u8 = 8;

/// The ten controls of the THEJOYSTICK layout, in record order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    LeftFire,
    RightFire,
    LeftTriangle,
    RightTriangle,
    Menu1,
    Menu2,
    Menu3,
    Menu4,
    LeftRight,
    UpDown,
}

impl Slot {
    pub const ALL: [Slot; SLOT_COUNT] = [
        Slot::LeftFire,
        Slot::RightFire,
        Slot::LeftTriangle,
        Slot::RightTriangle,
        Slot::Menu1,
        Slot::Menu2,
        Slot::Menu3,
        Slot::Menu4,
        Slot::LeftRight,
        Slot::UpDown,
    ];

    pub fn from_index(index: usize) -> Option<Slot> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::LeftFire => "Left Fire",
            Slot::RightFire => "Right Fire",
            Slot::LeftTriangle => "Left Triangle",
            Slot::RightTriangle => "Right Triangle",
            Slot::Menu1 => "Menu 1",
            Slot::Menu2 => "Menu 2",
            Slot::Menu3 => "Menu 3",
            Slot::Menu4 => "Menu 4",
            Slot::LeftRight => "Left/Right",
            Slot::UpDown => "Up/Down",
        }
    }

    /// Field name in a gamecontrollerdb record
    pub fn record_name(self) -> &'static str {
        match self {
            Slot::LeftFire => "lefttrigger",
            Slot::RightFire => "righttrigger",
            Slot::LeftTriangle => "x",
            Slot::RightTriangle => "y",
            Slot::Menu1 => "a",
            Slot::Menu2 => "b",
            Slot::Menu3 => "back",
            Slot::Menu4 => "start",
            Slot::LeftRight => "leftx",
            Slot::UpDown => "lefty",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Slot::LeftFire => "Press LEFT FIRE button",
            Slot::RightFire => "Press RIGHT FIRE button",
            Slot::LeftTriangle => "Press LEFT TRIANGLE button",
            Slot::RightTriangle => "Press RIGHT TRIANGLE button",
            Slot::Menu1 => "Press MENU 1 button",
            Slot::Menu2 => "Press MENU 2 button",
            Slot::Menu3 => "Press MENU 3 button",
            Slot::Menu4 => "Press MENU 4 button",
            Slot::LeftRight => "Move stick LEFT or RIGHT",
            Slot::UpDown => "Move stick UP or DOWN",
        }
    }

    pub fn is_axis(self) -> bool {
        matches!(self, Slot::LeftRight | Slot::UpDown)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical input bound to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binding {
    #[default]
    Unmapped,
    Button(usize),
    Axis(usize),
    Hat { index: usize, mask: u8 },
}

impl Binding {
    pub fn is_mapped(&self) -> bool {
        !matches!(self, Binding::Unmapped)
    }

    /// Value part of a record field: `b3`, `a1`, `h0.4`, or empty
    pub fn record_value(&self) -> String {
        match self {
            Binding::Unmapped => String::new(),
            Binding::Button(index) => format!("b{}", index),
            Binding::Axis(index) => format!("a{}", index),
            Binding::Hat { index, mask } => format!("h{}.{}", index, mask),
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Unmapped => write!(f, "---"),
            Binding::Button(index) => write!(f, "Button {}", index),
            Binding::Axis(index) => write!(f, "Axis {}", index),
            Binding::Hat { index, mask } => {
                let direction = match *mask {
                    HAT_UP => "Up",
                    HAT_RIGHT => "Right",
                    HAT_DOWN => "Down",
                    HAT_LEFT => "Left",
                    _ => "?",
                };
                write!(f, "Hat {} {}", index, direction)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    bindings: [Binding; SLOT_COUNT],
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Binding {
        self.bindings[slot.index()]
    }

    /// Stores a binding into an empty slot.
    ///
    /// Returns false and leaves the slot alone when it is already bound; a slot has
    /// to be cleared through [`MappingTable::clear`] before it can be captured again.
    pub fn capture(&mut self, slot: Slot, binding: Binding) -> bool {
        let entry = &mut self.bindings[slot.index()];
        if entry.is_mapped() {
            return false;
        }
        *entry = binding;
        true
    }

    pub fn clear(&mut self, slot: Slot) {
        self.bindings[slot.index()] = Binding::Unmapped;
    }

    pub fn reset(&mut self) {
        self.bindings = [Binding::Unmapped; SLOT_COUNT];
    }

    #[cfg(test)]
    pub fn is_complete(&self) -> bool {
        self.bindings.iter().all(Binding::is_mapped)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, Binding)> + '_ {
        Slot::ALL.iter().map(move |&slot| (slot, self.get(slot)))
    }

    /// Other slots bound to the same physical input as `slot`
    pub fn duplicates_of(&self, slot: Slot) -> Vec<Slot> {
        let binding = self.get(slot);
        if !binding.is_mapped() {
            return Vec::new();
        }
        self.iter()
            .filter(|&(other, other_binding)| other != slot && other_binding == binding)
            .map(|(other, _)| other)
            .collect()
    }

    pub fn has_duplicates(&self) -> bool {
        Slot::ALL
            .iter()
            .any(|&slot| !self.duplicates_of(slot).is_empty())
    }
}
