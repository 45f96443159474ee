//! Power state for bulb control.

use serde::{Deserialize, Serialize};

/// Power state for a bulb.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    /// Turn the bulb on
    On,
    /// Turn the bulb off
    Off,
}

impl PowerMode {
    /// The string form the protocol expects as a `set_power` parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            PowerMode::On => "on",
            PowerMode::Off => "off",
        }
    }

    /// The opposite power state.
    pub fn flipped(&self) -> Self {
        match self {
            PowerMode::On => PowerMode::Off,
            PowerMode::Off => PowerMode::On,
        }
    }
}
