//! Flow construction and compilation to the bulb's wire expression.
//!
//! A [`Flow`] is a timed sequence of lighting transitions the bulb plays back
//! autonomously after being sent once. Compilation is pure: no network
//! interaction happens until the flow is handed to
//! [`Bulb::start_flow`](crate::Bulb::start_flow).

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::types::Color;

/// Minimum per-transition duration the protocol accepts, in milliseconds.
const MIN_DURATION_MS: i64 = 50;

/// Maximum brightness the protocol accepts.
const MAX_BRIGHTNESS: u8 = 100;

/// What the bulb does once a flow finishes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, EnumIter, PartialEq, Eq)]
pub enum FlowAction {
    /// Restore the state from before the flow started
    Recover = 0,
    /// Stay at the last transition's state
    Stay = 1,
    /// Turn the bulb off
    Off = 2,
}

impl FlowAction {
    pub fn create(value: u8) -> Option<Self> {
        FlowAction::iter().find(|action| *action as u8 == value)
    }

    pub fn id(&self) -> u8 {
        *self as u8
    }
}

/// A single step of a flow.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum FlowTransition {
    /// Fade to `color` over `duration_ms`, ending at `brightness` percent.
    Color {
        color: Color,
        duration_ms: i64,
        brightness: u8,
    },
    /// Hold the current state for `duration_ms`.
    Sleep { duration_ms: i64 },
}

impl FlowTransition {
    /// Mode tag for a color fade.
    const MODE_COLOR: i64 = 1;
    /// Mode tag for a pause. Value and brightness are fixed filler the bulb ignores.
    const MODE_SLEEP: i64 = 7;
    const SLEEP_VALUE: i64 = 1;
    const SLEEP_BRIGHTNESS: i64 = 2;

    /// A color fade built from raw channel values, clamping each to 0-255.
    pub fn color(red: i64, green: i64, blue: i64, duration_ms: i64, brightness: u8) -> Self {
        FlowTransition::Color {
            color: Color::clamped(red, green, blue),
            duration_ms,
            brightness,
        }
    }

    /// A pause of `duration_ms`.
    pub fn sleep(duration_ms: i64) -> Self {
        FlowTransition::Sleep { duration_ms }
    }

    /// The `[duration, mode, value, brightness]` quadruple the wire expression
    /// is assembled from. Durations below the protocol minimum are raised to
    /// it; brightness is capped at 100 but never raised.
    fn as_quad(&self) -> [i64; 4] {
        match *self {
            FlowTransition::Color {
                color,
                duration_ms,
                brightness,
            } => [
                duration_ms.max(MIN_DURATION_MS),
                Self::MODE_COLOR,
                i64::from(color.packed()),
                i64::from(brightness.min(MAX_BRIGHTNESS)),
            ],
            FlowTransition::Sleep { duration_ms } => [
                duration_ms.max(MIN_DURATION_MS),
                Self::MODE_SLEEP,
                Self::SLEEP_VALUE,
                Self::SLEEP_BRIGHTNESS,
            ],
        }
    }
}

/// A complete flow: an ordered transition list plus repetition and
/// end-of-flow behavior.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Flow {
    count: u32,
    action: FlowAction,
    transitions: Vec<FlowTransition>,
}

impl Flow {
    /// Create a flow running `count` times (0 = forever), performing `action`
    /// when it stops, playing `transitions` in order.
    pub fn new(count: u32, action: FlowAction, transitions: Vec<FlowTransition>) -> Self {
        Flow {
            count,
            action,
            transitions,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn action(&self) -> FlowAction {
        self.action
    }

    pub fn transitions(&self) -> &[FlowTransition] {
        &self.transitions
    }

    /// Compile the flow into the wire expression: every transition's
    /// quadruple flattened and joined with `", "`.
    ///
    /// An empty transition list yields an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use yeelight_rs::{Flow, FlowAction, FlowTransition};
    ///
    /// let flow = Flow::new(
    ///     0,
    ///     FlowAction::Recover,
    ///     vec![
    ///         FlowTransition::color(255, 0, 0, 1000, 100),
    ///         FlowTransition::sleep(1000),
    ///     ],
    /// );
    /// assert_eq!(flow.expression(), "1000, 1, 16711680, 100, 1000, 7, 1, 2");
    /// ```
    pub fn expression(&self) -> String {
        self.transitions
            .iter()
            .flat_map(|transition| transition.as_quad())
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_canonical() {
        let flow = Flow::new(
            0,
            FlowAction::Recover,
            vec![
                FlowTransition::color(255, 0, 0, 1000, 100),
                FlowTransition::sleep(1000),
            ],
        );
        assert_eq!(flow.expression(), "1000, 1, 16711680, 100, 1000, 7, 1, 2");
        // Deterministic: compiling again gives the same string.
        assert_eq!(flow.expression(), flow.expression());
    }

    #[test]
    fn test_expression_empty() {
        let flow = Flow::new(0, FlowAction::Stay, vec![]);
        assert_eq!(flow.expression(), "");
    }

    #[test]
    fn test_expression_order_preserved() {
        let forward = Flow::new(
            1,
            FlowAction::Off,
            vec![
                FlowTransition::color(0, 255, 0, 500, 50),
                FlowTransition::color(0, 0, 255, 500, 50),
            ],
        );
        assert_eq!(forward.expression(), "500, 1, 65280, 50, 500, 1, 255, 50");

        let reversed = Flow::new(
            1,
            FlowAction::Off,
            vec![
                FlowTransition::color(0, 0, 255, 500, 50),
                FlowTransition::color(0, 255, 0, 500, 50),
            ],
        );
        assert_eq!(reversed.expression(), "500, 1, 255, 50, 500, 1, 65280, 50");
    }

    #[test]
    fn test_duration_floor() {
        let flow = Flow::new(
            0,
            FlowAction::Recover,
            vec![
                FlowTransition::color(255, 0, 0, 10, 100),
                FlowTransition::sleep(-5),
            ],
        );
        assert_eq!(flow.expression(), "50, 1, 16711680, 100, 50, 7, 1, 2");
    }

    #[test]
    fn test_brightness_cap() {
        let capped = FlowTransition::color(0, 0, 0, 1000, 150);
        assert_eq!(capped.as_quad(), [1000, 1, 0, 100]);

        let kept = FlowTransition::color(0, 0, 0, 1000, 42);
        assert_eq!(kept.as_quad(), [1000, 1, 0, 42]);
    }

    #[test]
    fn test_color_channels_clamped() {
        let transition = FlowTransition::color(300, -10, 128, 1000, 100);
        assert_eq!(transition.as_quad(), [1000, 1, 16711808, 100]);
    }

    #[test]
    fn test_action_wire_ids() {
        assert_eq!(FlowAction::Recover.id(), 0);
        assert_eq!(FlowAction::Stay.id(), 1);
        assert_eq!(FlowAction::Off.id(), 2);
        assert_eq!(FlowAction::create(1), Some(FlowAction::Stay));
        assert_eq!(FlowAction::create(9), None);
    }
}
