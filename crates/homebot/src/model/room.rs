use serde::Serialize;

use super::checked_name;
use super::upsert;
use super::Address;
use super::Device;
use super::Power;

/// A named group of devices with its own on/off switch gating all of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    name: String,
    power: Power,
    devices: Vec<Device>,
    #[serde(skip)]
    parent: Option<Address>,
}

impl Room {
    /// # Panics
    ///
    /// If `name` fails [`is_valid_name`](super::is_valid_name).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: checked_name(name),
            power: Power::default(),
            devices: Vec::new(),
            parent: None,
        }
    }

    /// Build a room from devices, applying [`Room::insert`] to each in order.
    pub fn with_devices(
        name: impl Into<String>,
        devices: impl IntoIterator<Item = Device>,
    ) -> Self {
        let mut room = Self::new(name);
        for device in devices {
            room.insert(device);
        }
        room
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn power(&self) -> Power {
        self.power
    }

    pub fn set_power(&mut self, power: Power) {
        self.power = power;
    }

    pub fn toggle(&mut self) {
        self.power = self.power.toggled();
    }

    pub fn is_off(&self) -> bool {
        self.power.is_off()
    }

    /// Devices in declaration order.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn device(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|device| device.name() == name)
    }

    pub(crate) fn device_mut(&mut self, name: &str) -> Option<&mut Device> {
        self.devices.iter_mut().find(|device| device.name() == name)
    }

    /// Add a device, replacing (in place) any device of the same name.
    ///
    /// Returns the replaced device.
    pub fn insert(&mut self, mut device: Device) -> Option<Device> {
        device.set_parent(self.address());
        upsert(&mut self.devices, device, Device::name)
    }

    pub fn parent(&self) -> Option<&Address> {
        self.parent.as_ref()
    }

    /// Attach the room, re-pointing every device at the room's new address.
    pub(crate) fn set_parent(&mut self, parent: Address) {
        self.parent = Some(parent);
        let address = self.address();
        for device in &mut self.devices {
            device.set_parent(address.clone());
        }
    }

    pub fn address(&self) -> Address {
        match &self.parent {
            Some(parent) => parent.child(self.name.as_str()),
            None => Address::root(self.name.as_str()),
        }
    }

    pub fn path(&self) -> String {
        self.address().to_string()
    }
}
