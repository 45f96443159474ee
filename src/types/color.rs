//! RGB color representation and wire encoding.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An RGB color with red, green, and blue components (0-255 each).
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub(crate) red: u8,
    pub(crate) green: u8,
    pub(crate) blue: u8,
}

impl Color {
    /// Create a color with the given RGB values.
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a color from wide integers, clamping each channel to 0-255.
    ///
    /// The protocol only understands byte-sized channels; out-of-range input
    /// saturates rather than wraps.
    ///
    /// # Examples
    ///
    /// ```
    /// use yeelight_rs::Color;
    ///
    /// assert_eq!(Color::clamped(300, -10, 128), Color::rgb(255, 0, 128));
    /// ```
    pub fn clamped(red: i64, green: i64, blue: i64) -> Self {
        Self {
            red: red.clamp(0, 255) as u8,
            green: green.clamp(0, 255) as u8,
            blue: blue.clamp(0, 255) as u8,
        }
    }

    /// Create a default color (black: 0,0,0).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// The single-integer form the protocol expects: `red * 65536 + green * 256 + blue`.
    pub fn packed(&self) -> u32 {
        u32::from(self.red) * 65536 + u32::from(self.green) * 256 + u32::from(self.blue)
    }
}

impl FromStr for Color {
    type Err = String;

    /// Parse from comma-separated string (e.g., "255,128,0").
    fn from_str(s: &str) -> Result<Self, String> {
        let parts: Vec<u8> = s.split(',').map(|c| c.trim().parse().unwrap_or(0)).collect();
        if parts.len() == 3 {
            Ok(Self::rgb(parts[0], parts[1], parts[2]))
        } else {
            Err("Expected format: r,g,b".into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_encoding() {
        assert_eq!(Color::rgb(255, 0, 0).packed(), 16711680);
        assert_eq!(Color::rgb(0, 255, 0).packed(), 65280);
        assert_eq!(Color::rgb(0, 0, 255).packed(), 255);
        assert_eq!(Color::rgb(255, 255, 255).packed(), 16777215);
    }

    #[test]
    fn test_clamped_channels() {
        assert_eq!(Color::clamped(300, -10, 128), Color::rgb(255, 0, 128));
        assert_eq!(Color::clamped(300, -10, 128).packed(), 16711808);
        assert_eq!(Color::clamped(0, 0, 0), Color::rgb(0, 0, 0));
        assert_eq!(Color::clamped(255, 255, 255), Color::rgb(255, 255, 255));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("255,128,0".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
        assert!("255,128".parse::<Color>().is_err());
    }
}
