//! THEJOYSTICK mapping model
//!
//! The console firmware expects exactly ten controls. Each one is a [`Slot`] that holds
//! a [`Binding`] to a button, an axis or a hat direction of the controller being mapped.
//! A finished [`MappingTable`] is rendered into a gamecontrollerdb line by
//! [`serializer::mapping_record`].

pub mod capture;
pub mod serializer;
pub mod table;

pub use capture::detect_binding;
pub use serializer::{mapping_record, record_file_name, PLATFORM};
pub use table::{Binding, MappingTable, Slot, SLOT_COUNT};
