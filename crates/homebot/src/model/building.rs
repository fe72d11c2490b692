use serde::Serialize;

use super::checked_name;
use super::upsert;
use super::Address;
use super::Device;
use super::Power;
use super::Room;

/// Name given to a building whose description does not declare one.
pub const DEFAULT_BUILDING_NAME: &str = "house";

/// A top-level building entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    Room(Room),
    Device(Device),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Room(room) => room.name(),
            Entry::Device(device) => device.name(),
        }
    }

    pub fn as_room(&self) -> Option<&Room> {
        match self {
            Entry::Room(room) => Some(room),
            Entry::Device(_) => None,
        }
    }

    pub fn as_device(&self) -> Option<&Device> {
        match self {
            Entry::Device(device) => Some(device),
            Entry::Room(_) => None,
        }
    }

    fn set_parent(&mut self, parent: Address) {
        match self {
            Entry::Room(room) => room.set_parent(parent),
            Entry::Device(device) => device.set_parent(parent),
        }
    }
}

impl From<Room> for Entry {
    fn from(room: Room) -> Self {
        Entry::Room(room)
    }
}

impl From<Device> for Entry {
    fn from(device: Device) -> Self {
        Entry::Device(device)
    }
}

/// Root of the tree: rooms and standalone devices, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Building {
    name: String,
    power: Power,
    entries: Vec<Entry>,
}

impl Building {
    /// # Panics
    ///
    /// If `name` fails [`is_valid_name`](super::is_valid_name).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: checked_name(name),
            power: Power::default(),
            entries: Vec::new(),
        }
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

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    pub(crate) fn entry_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.name() == name)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.entries.iter().filter_map(Entry::as_room)
    }

    /// Devices that do not belong to a room.
    pub fn standalone_devices(&self) -> impl Iterator<Item = &Device> {
        self.entries.iter().filter_map(Entry::as_device)
    }

    /// Every device, in rooms or standalone.
    pub fn device_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                Entry::Room(room) => room.devices().len(),
                Entry::Device(_) => 1,
            })
            .sum()
    }

    /// Add a room or standalone device, replacing (in place) any entry of
    /// the same name.
    ///
    /// Returns the replaced entry.
    pub fn insert(&mut self, entry: impl Into<Entry>) -> Option<Entry> {
        let mut entry = entry.into();
        entry.set_parent(self.address());
        upsert(&mut self.entries, entry, Entry::name)
    }

    pub fn address(&self) -> Address {
        Address::root(self.name.as_str())
    }
}

impl Default for Building {
    fn default() -> Self {
        Self::new(DEFAULT_BUILDING_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Control;

    fn sample() -> Building {
        let mut building = Building::default();
        building.insert(Room::with_devices(
            "kitchen",
            [
                Device::new("light", Control::Switch),
                Device::new("fan", Control::Regulate),
            ],
        ));
        building.insert(Device::new("pump", Control::Switch));
        building
    }

    #[test]
    fn test_insert_sets_parents_recursively() {
        let building = sample();
        let kitchen = building.entry("kitchen").and_then(Entry::as_room).unwrap();
        assert_eq!(kitchen.path(), "house/kitchen");
        assert_eq!(kitchen.device("fan").unwrap().path(), "house/kitchen/fan");

        let pump = building.entry("pump").and_then(Entry::as_device).unwrap();
        assert_eq!(pump.parent(), Some(&Address::root("house")));
        assert_eq!(pump.path(), "house/pump");
    }

    #[test]
    fn test_counts() {
        let building = sample();
        assert_eq!(building.rooms().count(), 1);
        assert_eq!(building.standalone_devices().count(), 1);
        assert_eq!(building.device_count(), 3);
    }

    #[test]
    fn test_duplicate_entry_last_wins() {
        let mut building = sample();
        let replaced = building.insert(Room::new("pump"));

        assert!(matches!(replaced, Some(Entry::Device(_))));
        let names: Vec<_> = building.entries().iter().map(Entry::name).collect();
        assert_eq!(names, ["kitchen", "pump"]);
        assert!(building.entry("pump").unwrap().as_room().is_some());
    }

    #[test]
    fn test_serialize_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["name"], "house");
        assert_eq!(json["entries"][0]["kind"], "room");
        assert_eq!(json["entries"][0]["devices"][1]["control"], "regulate");
        assert_eq!(json["entries"][0]["devices"][1]["state"], 100);
        assert_eq!(json["entries"][1]["kind"], "device");
        assert_eq!(json["entries"][1]["state"], "on");
    }

    #[test]
    #[should_panic(expected = "invalid name")]
    fn test_new_rejects_empty_name() {
        Building::new("");
    }

    #[test]
    #[should_panic(expected = "invalid name")]
    fn test_new_rejects_path_separator() {
        Building::new("my/house");
    }
}
