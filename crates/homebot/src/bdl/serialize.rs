//! Canonical BDL output for the model.
//!
//! The output parses back into a structurally equal tree. Device and room
//! states are not part of BDL, so only names, control kinds and nesting
//! survive a round trip.

use std::fmt;

use crate::model::Building;
use crate::model::Device;
use crate::model::Entry;
use crate::model::Room;

/// Trait for writing model nodes as BDL text.
pub trait ToBdl {
    fn write_bdl(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn to_bdl(&self) -> String {
        struct Wrapper<'a, T: ToBdl + ?Sized>(&'a T);
        impl<T: ToBdl + ?Sized> fmt::Display for Wrapper<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.write_bdl(f)
            }
        }
        Wrapper(self).to_string()
    }
}

impl ToBdl for Device {
    fn write_bdl(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ $N({}) $C({}) }}", self.name(), self.control())
    }
}

impl ToBdl for Room {
    fn write_bdl(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ $N({}) $G(", self.name())?;
        for device in self.devices() {
            write!(f, " ")?;
            device.write_bdl(f)?;
        }
        write!(f, " ) ]")
    }
}

impl ToBdl for Entry {
    fn write_bdl(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Room(room) => room.write_bdl(f),
            Entry::Device(device) => device.write_bdl(f),
        }
    }
}

/// One line for the name, then one line per entry.
impl ToBdl for Building {
    fn write_bdl(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$N({})", self.name())?;
        for entry in self.entries() {
            writeln!(f)?;
            entry.write_bdl(f)?;
        }
        Ok(())
    }
}
