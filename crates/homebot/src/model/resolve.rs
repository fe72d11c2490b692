//! Path resolution and ancestor-aware power queries.

use tracing::debug;

use super::Address;
use super::Building;
use super::Device;
use super::Entry;
use super::ModelError;
use super::Power;
use super::Room;

/// Borrowed view of any addressable node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Building(&'a Building),
    Room(&'a Room),
    Device(&'a Device),
}

impl<'a> Node<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Node::Building(building) => building.name(),
            Node::Room(room) => room.name(),
            Node::Device(device) => device.name(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Node::Building(building) => building.name().to_string(),
            Node::Room(room) => room.path(),
            Node::Device(device) => device.path(),
        }
    }

    pub fn parent(&self) -> Option<&'a Address> {
        match *self {
            Node::Building(_) => None,
            Node::Room(room) => room.parent(),
            Node::Device(device) => device.parent(),
        }
    }

    /// Off by the node's own state, ignoring ancestors.
    pub fn is_off(&self) -> bool {
        match self {
            Node::Building(building) => building.is_off(),
            Node::Room(room) => room.is_off(),
            Node::Device(device) => device.is_off(),
        }
    }

    /// Off by its own state or because any ancestor within `root` is off.
    pub fn is_effectively_off(&self, root: &Building) -> bool {
        self.is_off() || self.parent().is_some_and(|parent| root.is_effectively_off(parent))
    }

    /// Human-readable own state: `on`/`off` or a percentage.
    pub fn state_label(&self) -> String {
        match self {
            Node::Building(building) => building.power().to_string(),
            Node::Room(room) => room.power().to_string(),
            Node::Device(device) => device.state().to_string(),
        }
    }
}

/// Mutable handle on any addressable node.
///
/// Only state can be changed through it. Names, children and parents stay
/// as the tree built them, so paths keep resolving to the same nodes.
#[derive(Debug)]
pub struct NodeMut<'a>(Target<'a>);

#[derive(Debug)]
enum Target<'a> {
    Building(&'a mut Building),
    Room(&'a mut Room),
    Device(&'a mut Device),
}

impl NodeMut<'_> {
    pub fn as_node(&self) -> Node<'_> {
        match &self.0 {
            Target::Building(building) => Node::Building(building),
            Target::Room(room) => Node::Room(room),
            Target::Device(device) => Node::Device(device),
        }
    }

    /// Switch the node on or off. Fails for regulated devices.
    pub fn set_power(&mut self, power: Power) -> Result<(), ModelError> {
        match &mut self.0 {
            Target::Building(building) => building.set_power(power),
            Target::Room(room) => room.set_power(power),
            Target::Device(device) => device.set_power(power)?,
        }
        Ok(())
    }

    /// Set a regulated device's level. Fails for every other node.
    pub fn set_level(&mut self, percent: u8) -> Result<(), ModelError> {
        if let Target::Device(device) = &mut self.0 {
            return device.set_level(percent);
        }
        Err(ModelError::NotADevice {
            path: self.as_node().path(),
        })
    }

    /// Flip a switch-like node. Fails for regulated devices.
    pub fn toggle(&mut self) -> Result<(), ModelError> {
        match &mut self.0 {
            Target::Building(building) => building.toggle(),
            Target::Room(room) => room.toggle(),
            Target::Device(device) => device.toggle()?,
        }
        Ok(())
    }
}

impl Building {
    /// Find the node a path such as `house/kitchen/light` points at.
    pub fn resolve(&self, path: &str) -> Result<Node<'_>, ModelError> {
        self.resolve_address(&Address::parse(path)).ok_or_else(|| {
            debug!(path, "path did not resolve");
            ModelError::PathNotFound {
                path: path.to_string(),
            }
        })
    }

    pub fn resolve_mut(&mut self, path: &str) -> Result<NodeMut<'_>, ModelError> {
        self.resolve_address_mut(&Address::parse(path))
            .ok_or_else(|| {
                debug!(path, "path did not resolve");
                ModelError::PathNotFound {
                    path: path.to_string(),
                }
            })
    }

    pub fn resolve_address(&self, address: &Address) -> Option<Node<'_>> {
        let (first, rest) = address.segments().split_first()?;
        if *first != self.name() {
            return None;
        }
        let Some((entry_name, tail)) = rest.split_first() else {
            return Some(Node::Building(self));
        };
        match self.entry(entry_name)? {
            Entry::Device(device) if tail.is_empty() => Some(Node::Device(device)),
            Entry::Device(_) => None,
            Entry::Room(room) => room.resolve_segments(rest),
        }
    }

    pub(crate) fn resolve_address_mut(&mut self, address: &Address) -> Option<NodeMut<'_>> {
        let (first, rest) = address.segments().split_first()?;
        if *first != self.name() {
            return None;
        }
        let Some((entry_name, tail)) = rest.split_first() else {
            return Some(NodeMut(Target::Building(self)));
        };
        match self.entry_mut(entry_name)? {
            Entry::Device(device) if tail.is_empty() => Some(NodeMut(Target::Device(device))),
            Entry::Device(_) => None,
            Entry::Room(room) => room.resolve_segments_mut(rest),
        }
    }

    /// Whether the node at `address` or any of its ancestors is off.
    ///
    /// Walks parent handles until a node without a parent is reached, so the
    /// depth of the tree is not fixed. An address that does not resolve is
    /// never off.
    pub fn is_effectively_off(&self, address: &Address) -> bool {
        let mut cursor = self.resolve_address(address);
        while let Some(node) = cursor {
            if node.is_off() {
                return true;
            }
            cursor = node.parent().and_then(|parent| self.resolve_address(parent));
        }
        false
    }

    /// Every addressable path: the building, then each entry in order with
    /// a room's devices following the room.
    pub fn paths(&self) -> Vec<String> {
        let mut paths = vec![self.name().to_string()];
        for entry in self.entries() {
            match entry {
                Entry::Room(room) => {
                    paths.push(room.path());
                    paths.extend(room.devices().iter().map(Device::path));
                }
                Entry::Device(device) => paths.push(device.path()),
            }
        }
        paths
    }
}

impl Room {
    /// Resolve `<room name>[/<device name>]` against this room.
    pub fn resolve_segments(&self, segments: &[String]) -> Option<Node<'_>> {
        match segments {
            [name] if *name == self.name() => Some(Node::Room(self)),
            [name, device] if *name == self.name() => self.device(device).map(Node::Device),
            _ => None,
        }
    }

    pub(crate) fn resolve_segments_mut(&mut self, segments: &[String]) -> Option<NodeMut<'_>> {
        match segments {
            [name] if *name == self.name() => Some(NodeMut(Target::Room(self))),
            [name, device] if *name == self.name() => self
                .device_mut(device)
                .map(|device| NodeMut(Target::Device(device))),
            _ => None,
        }
    }

    pub fn is_effectively_off(&self, root: &Building) -> bool {
        Node::Room(self).is_effectively_off(root)
    }
}

impl Device {
    pub fn is_effectively_off(&self, root: &Building) -> bool {
        Node::Device(self).is_effectively_off(root)
    }
}
