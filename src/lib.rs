//! # yeelight_rs
//!
//! An async Rust library for controlling Yeelight smart bulbs over the LAN.
//!
//! This crate provides a **runtime-agnostic** async API to communicate with
//! Yeelight bulbs through their line-delimited JSON command protocol on TCP
//! port 55443. It supports power control, RGB color, device naming, and color
//! flows (timed transition sequences the bulb plays back on its own).
//!
//! ## Quick Start
//!
//! ```ignore
//! use yeelight_rs::{Bulb, Flow, FlowAction, FlowTransition};
//!
//! // Works with any async runtime!
//! async fn control_bulb() -> Result<(), yeelight_rs::Error> {
//!     let mut bulb = Bulb::new("192.168.1.103");
//!
//!     // Cycle red -> green -> blue ten times, then restore the old state.
//!     let flow = Flow::new(
//!         10,
//!         FlowAction::Recover,
//!         vec![
//!             FlowTransition::color(255, 0, 0, 1000, 100),
//!             FlowTransition::sleep(1000),
//!             FlowTransition::color(0, 255, 0, 1000, 100),
//!             FlowTransition::sleep(1000),
//!             FlowTransition::color(0, 0, 255, 1000, 100),
//!             FlowTransition::sleep(1000),
//!         ],
//!     );
//!     bulb.start_flow(&flow).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Power Control**: Turn bulbs on/off or toggle with [`Bulb::set_power`]
//! - **RGB Colors**: Set any RGB color, clamped and packed per the protocol
//! - **Flows**: Compile timed transition sequences with [`Flow`] and play them
//!   with [`Bulb::start_flow`]
//! - **Raw Commands**: Anything the firmware understands via
//!   [`Bulb::send_command`]
//! - **Self-Healing Session**: The TCP connection is opened lazily and
//!   rebuilt transparently after socket faults
//! - **Push Filtering**: Unsolicited `"props"` state pushes the bulb
//!   interleaves with replies are skipped automatically
//! - **Diagnostics**: Sent/received/push traffic recorded in a
//!   [`MessageHistory`]
//!
//! ## Communication
//!
//! Each [`Bulb`] owns one persistent TCP session. Commands are serialized as
//! `{"id": n, "method": "...", "params": [...]}` frames terminated by CRLF;
//! the bulb answers in kind, interleaving unsolicited state pushes tagged
//! `"method": "props"` on the same socket. One command is in flight at a time.
//!
//! ## Runtime Selection
//!
//! This library is runtime-agnostic. Select your preferred runtime using
//! feature flags:
//!
//! ### Using tokio (default)
//!
//! ```toml
//! [dependencies]
//! yeelight-rs = "0.1"
//! tokio = { version = "1", features = ["rt-multi-thread", "macros"] }
//! ```
//!
//! ### Using async-std
//!
//! ```toml
//! [dependencies]
//! yeelight-rs = { version = "0.1", default-features = false, features = ["runtime-async-std"] }
//! async-std = { version = "1.12", features = ["attributes"] }
//! ```
//!
//! ### Using smol
//!
//! ```toml
//! [dependencies]
//! yeelight-rs = { version = "0.1", default-features = false, features = ["runtime-smol"] }
//! smol = "2"
//! ```
//!
//! ## Feature Flags
//!
//! - `runtime-tokio` (default): Use the tokio async runtime
//! - `runtime-async-std`: Use the async-std runtime
//! - `runtime-smol`: Use the smol runtime

mod bulb;
mod connection;
mod errors;
mod flow;
mod history;
mod protocol;
pub mod runtime;
mod types;

// Re-export public API
pub use bulb::Bulb;
pub use errors::Error;
pub use flow::{Flow, FlowAction, FlowTransition};
pub use history::{HistoryEntry, HistorySummary, MessageHistory, MessageType};
pub use protocol::Response;
pub use types::{Color, PowerMode};
