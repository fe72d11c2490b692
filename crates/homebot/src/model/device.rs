use std::fmt;

use serde::Serialize;
use strum::Display;
use strum::EnumString;

use super::checked_name;
use super::Address;
use super::ModelError;

/// How a device is controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Control {
    /// On/off.
    Switch,
    /// Percentage output in `0..=100`.
    Regulate,
}

/// Switch-like on/off state, shared by switch devices, rooms and buildings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Power {
    #[default]
    On,
    Off,
}

impl Power {
    pub fn is_off(self) -> bool {
        self == Power::Off
    }

    pub fn toggled(self) -> Self {
        match self {
            Power::On => Power::Off,
            Power::Off => Power::On,
        }
    }
}

/// Output level of a regulated device, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(0);
    pub const MAX: Level = Level(100);

    /// Build a level, clamping anything above 100.
    pub fn new(percent: u8) -> Self {
        Self(percent.min(Self::MAX.0))
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::MAX
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// State of a device. The variant always matches the device's [`Control`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeviceState {
    Switch(Power),
    Regulate(Level),
}

impl DeviceState {
    /// State a freshly declared device starts in: switched on, or fully open.
    pub fn initial(control: Control) -> Self {
        match control {
            Control::Switch => DeviceState::Switch(Power::default()),
            Control::Regulate => DeviceState::Regulate(Level::default()),
        }
    }

    pub fn control(&self) -> Control {
        match self {
            DeviceState::Switch(_) => Control::Switch,
            DeviceState::Regulate(_) => Control::Regulate,
        }
    }

    /// A switch is off when switched off; a regulated device when at 0%.
    pub fn is_off(&self) -> bool {
        match self {
            DeviceState::Switch(power) => power.is_off(),
            DeviceState::Regulate(level) => *level == Level::MIN,
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceState::Switch(power) => write!(f, "{}", power),
            DeviceState::Regulate(level) => write!(f, "{}", level),
        }
    }
}

/// A controllable unit, either standalone in a building or inside a room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    name: String,
    control: Control,
    state: DeviceState,
    #[serde(skip)]
    parent: Option<Address>,
}

impl Device {
    /// # Panics
    ///
    /// If `name` fails [`is_valid_name`](super::is_valid_name).
    pub fn new(name: impl Into<String>, control: Control) -> Self {
        Self {
            name: checked_name(name),
            control,
            state: DeviceState::initial(control),
            parent: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn control(&self) -> Control {
        self.control
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Replace the state. The new state must match the device's control kind.
    pub fn set_state(&mut self, state: DeviceState) -> Result<(), ModelError> {
        if state.control() != self.control {
            return Err(self.mismatch());
        }
        self.state = state;
        Ok(())
    }

    pub fn set_power(&mut self, power: Power) -> Result<(), ModelError> {
        self.set_state(DeviceState::Switch(power))
    }

    /// Set a regulated device's level, clamping to 100.
    pub fn set_level(&mut self, percent: u8) -> Result<(), ModelError> {
        self.set_state(DeviceState::Regulate(Level::new(percent)))
    }

    pub fn toggle(&mut self) -> Result<(), ModelError> {
        match self.state {
            DeviceState::Switch(power) => {
                self.state = DeviceState::Switch(power.toggled());
                Ok(())
            }
            DeviceState::Regulate(_) => Err(self.mismatch()),
        }
    }

    pub fn is_off(&self) -> bool {
        self.state.is_off()
    }

    pub fn parent(&self) -> Option<&Address> {
        self.parent.as_ref()
    }

    pub(crate) fn set_parent(&mut self, parent: Address) {
        self.parent = Some(parent);
    }

    pub fn address(&self) -> Address {
        match &self.parent {
            Some(parent) => parent.child(self.name.as_str()),
            None => Address::root(self.name.as_str()),
        }
    }

    /// `<parent path>/<name>`, or just the name while detached.
    pub fn path(&self) -> String {
        self.address().to_string()
    }

    fn mismatch(&self) -> ModelError {
        ModelError::ControlMismatch {
            device: self.name.clone(),
            control: self.control,
        }
    }
}
