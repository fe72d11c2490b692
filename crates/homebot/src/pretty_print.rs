//! Verbose, multi-line dump of a building tree with live state.
//!
//! Used by `homebot show` and by snapshot tests.

use crate::model::Building;
use crate::model::Device;
use crate::model::Entry;
use crate::model::Room;

/// Trait for indented, one-node-per-line pretty-printing.
pub trait PrettyPrint {
    fn pretty_print(&self, indent: usize, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result;

    fn to_pretty_string(&self) -> String {
        struct Wrapper<'a, T: PrettyPrint + ?Sized>(&'a T);
        impl<T: PrettyPrint + ?Sized> std::fmt::Display for Wrapper<'_, T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.pretty_print(0, f)
            }
        }
        Wrapper(self).to_string()
    }
}

fn write_indent(indent: usize, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for _ in 0..indent {
        write!(f, "  ")?;
    }
    Ok(())
}

impl PrettyPrint for Device {
    fn pretty_print(&self, indent: usize, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_indent(indent, f)?;
        writeln!(
            f,
            "Device: {} ({}) [{}]",
            self.name(),
            self.control(),
            self.state()
        )
    }
}

impl PrettyPrint for Room {
    fn pretty_print(&self, indent: usize, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_indent(indent, f)?;
        writeln!(f, "Room: {} [{}]", self.name(), self.power())?;
        if self.devices().is_empty() {
            write_indent(indent + 1, f)?;
            return writeln!(f, "Devices: (none)");
        }
        for device in self.devices() {
            device.pretty_print(indent + 1, f)?;
        }
        Ok(())
    }
}

impl PrettyPrint for Entry {
    fn pretty_print(&self, indent: usize, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entry::Room(room) => room.pretty_print(indent, f),
            Entry::Device(device) => device.pretty_print(indent, f),
        }
    }
}

impl PrettyPrint for Building {
    fn pretty_print(&self, indent: usize, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_indent(indent, f)?;
        writeln!(f, "Building: {} [{}]", self.name(), self.power())?;
        for entry in self.entries() {
            entry.pretty_print(indent + 1, f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bdl::parse_document;
    use crate::model::Power;

    const HOUSE: &str = "
        $N(house)
        [ $N(kitchen) $G( {$N(light) $C(switch)} {$N(fan) $C(regulate)} ) ]
        [ $N(attic) $G() ]
        {$N(pump) $C(switch)}
    ";

    #[test]
    fn test_pretty_print_parsed_building() {
        let building = parse_document(HOUSE).unwrap();
        insta::assert_snapshot!(building.to_pretty_string(), @"
        Building: house [on]
          Room: kitchen [on]
            Device: light (switch) [on]
            Device: fan (regulate) [100%]
          Room: attic [on]
            Devices: (none)
          Device: pump (switch) [on]
        ");
    }

    #[test]
    fn test_pretty_print_reflects_state_changes() {
        let mut building = parse_document(HOUSE).unwrap();
        building
            .resolve_mut("house/kitchen")
            .unwrap()
            .set_power(Power::Off)
            .unwrap();
        building.resolve_mut("house/kitchen/fan").unwrap().set_level(40).unwrap();
        building.resolve_mut("house/pump").unwrap().toggle().unwrap();

        insta::assert_snapshot!(building.to_pretty_string(), @"
        Building: house [on]
          Room: kitchen [off]
            Device: light (switch) [on]
            Device: fan (regulate) [40%]
          Room: attic [on]
            Devices: (none)
          Device: pump (switch) [off]
        ");
    }

    #[test]
    fn test_pretty_print_single_room() {
        let building = parse_document(HOUSE).unwrap();
        let attic = building.entry("attic").unwrap();
        assert_eq!(
            attic.to_pretty_string(),
            "Room: attic [on]\n  Devices: (none)\n"
        );
    }
}
