//! gamecontrollerdb record rendering
//!
//! Produces one line in SDL's `gamecontrollerdb.txt` format:
//!
//! ```text
//! <guid>,<name>,lefttrigger:b6,righttrigger:b7,...,lefty:a1,platform:Linux,
//! ```
//!
//! Unmapped slots keep their field with an empty value. Names are written as-is;
//! the format has no escaping, so a comma inside a device name ends up in the record.

use super::table::MappingTable;
use crate::controller::ControllerProfile;
use std::fmt::Write;

pub const PLATFORM: &str = "Linux";

pub fn mapping_record(profile: &ControllerProfile, table: &MappingTable) -> String {
    let mut record = format!("{},{},", profile.guid, profile.name);
    for (slot, binding) in table.iter() {
        // Writing into a String cannot fail.
        let _ = write!(record, "{}:{},", slot.record_name(), binding.record_value());
    }
    let _ = write!(record, "platform:{},", PLATFORM);
    record
}

/// Name of the exported file for a profile
pub fn record_file_name(profile: &ControllerProfile) -> String {
    format!("{}.txt", profile.guid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Capabilities, InputIdentity};
    use crate::mapping::table::{Binding, Slot, HAT_LEFT, HAT_UP};
    use pretty_assertions::assert_eq;

    fn profile(name: &str) -> ControllerProfile {
        let caps = Capabilities {
            name: Some(name.to_string()),
            identity: Some(InputIdentity {
                bus_type: 3,
                vendor: 0x1c59,
                product: 0x26,
                version: 0x110,
            }),
            keys: [0x120].into_iter().collect(),
            ..Default::default()
        };
        ControllerProfile::from_capabilities(&caps).unwrap()
    }

    fn full_table() -> MappingTable {
        let mut table = MappingTable::new();
        for (i, slot) in Slot::ALL.iter().take(8).enumerate() {
            table.capture(*slot, Binding::Button(i));
        }
        table.capture(Slot::LeftRight, Binding::Axis(0));
        table.capture(Slot::UpDown, Binding::Axis(1));
        table
    }

    #[test]
    fn full_mapping_renders_exact_record() {
        let record = mapping_record(&profile("THEC64 Joystick"), &full_table());
        assert_eq!(
            record,
            "03000000591c00002600000010010000,THEC64 Joystick,\
             lefttrigger:b0,righttrigger:b1,x:b2,y:b3,a:b4,b:b5,back:b6,start:b7,\
             leftx:a0,lefty:a1,platform:Linux,"
        );
    }

    #[test]
    fn record_has_ten_slot_fields_then_platform() {
        let mut table = full_table();
        table.clear(Slot::LeftRight);
        table.clear(Slot::UpDown);
        table.capture(Slot::LeftRight, Binding::Hat { index: 0, mask: HAT_LEFT });
        table.capture(Slot::UpDown, Binding::Hat { index: 0, mask: HAT_UP });

        let record = mapping_record(&profile("Pad"), &table);
        let fields: Vec<&str> = record.trim_end_matches(',').split(',').collect();

        assert_eq!(fields.len(), 2 + 10 + 1);
        assert_eq!(fields[12], "platform:Linux");
        for (field, slot) in fields[2..12].iter().zip(Slot::ALL) {
            let (name, value) = field.split_once(':').unwrap();
            assert_eq!(name, slot.record_name());
            let valid = value.is_empty()
                || value.strip_prefix('b').is_some_and(|n| n.parse::<usize>().is_ok())
                || value.strip_prefix('a').is_some_and(|n| n.parse::<usize>().is_ok())
                || value
                    .strip_prefix('h')
                    .and_then(|hat| hat.split_once('.'))
                    .is_some_and(|(i, m)| i.parse::<usize>().is_ok() && m.parse::<u8>().is_ok());
            assert!(valid, "unexpected binding value {:?}", value);
        }
        assert_eq!(fields[10], "leftx:h0.8");
        assert_eq!(fields[11], "lefty:h0.1");
    }

    #[test]
    fn unmapped_slots_keep_empty_fields() {
        let mut table = MappingTable::new();
        table.capture(Slot::Menu1, Binding::Button(4));
        let record = mapping_record(&profile("Pad"), &table);
        assert!(record.contains(",lefttrigger:,righttrigger:,x:,y:,a:b4,b:,"));
        assert!(record.ends_with("leftx:,lefty:,platform:Linux,"));
    }

    #[test]
    fn file_name_is_guid() {
        assert_eq!(
            record_file_name(&profile("Pad")),
            "03000000591c00002600000010010000.txt"
        );
    }
}
