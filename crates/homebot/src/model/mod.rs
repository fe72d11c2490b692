//! The building tree: a [`Building`] owns rooms and standalone devices, a
//! [`Room`] owns devices.
//!
//! Ownership only points downward. Rooms and devices refer back to their
//! container through an [`Address`] handle, which is resolved against the
//! owning [`Building`] whenever the chain of ancestors has to be walked.

mod address;
mod building;
mod device;
mod resolve;
mod room;

pub use address::Address;
pub use building::Building;
pub use building::Entry;
pub use building::DEFAULT_BUILDING_NAME;
pub use device::Control;
pub use device::Device;
pub use device::DeviceState;
pub use device::Level;
pub use device::Power;
pub use resolve::Node;
pub use resolve::NodeMut;
pub use room::Room;

/// Errors from querying or mutating the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("no building, room or device at path '{path}'")]
    PathNotFound { path: String },

    #[error("device '{device}' is a {control} device and cannot take that state")]
    ControlMismatch { device: String, control: Control },

    #[error("'{path}' is not a device and has no level")]
    NotADevice { path: String },
}

/// Delimiters that would end a name early when written back out as BDL.
const DELIMITERS: [&str; 8] = ["$N(", "$C(", "$G(", ")", "{", "}", "[", "]"];

/// Whether `name` can name a building, room or device.
///
/// A valid name is non-empty, has no surrounding whitespace, and contains
/// neither `/` (the path separator) nor any BDL delimiter.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !name.contains('/')
        && !DELIMITERS.iter().any(|delimiter| name.contains(delimiter))
}

/// Constructors take names from code, where an invalid one is a bug.
fn checked_name(name: impl Into<String>) -> String {
    let name = name.into();
    assert!(is_valid_name(&name), "invalid name {name:?}");
    name
}

/// Insert `item`, replacing an existing item with the same name at its
/// original position.
fn upsert<T>(items: &mut Vec<T>, item: T, name: impl Fn(&T) -> &str) -> Option<T> {
    match items.iter().position(|existing| name(existing) == name(&item)) {
        Some(index) => Some(std::mem::replace(&mut items[index], item)),
        None => {
            items.push(item);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["house", "girls room", "light1", "a(b", "$x", "50%"] {
            assert!(is_valid_name(name), "{name:?}");
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in [
            "", " ", " kitchen", "kitchen ", "a/b", "a)b", "{x", "x}", "[x", "x]", "a$N(b",
            "a$C(b", "a$G(b", "line\n",
        ] {
            assert!(!is_valid_name(name), "{name:?}");
        }
    }
}
