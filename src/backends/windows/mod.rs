#![cfg(target_os = "windows")]

//! Windows input backend, over Win32 Raw Input.
//!
//! Three pieces:
//! - **discovery** — device enumeration (`GetRawInputDeviceList`) and
//!   friendly-name resolution through the device enumeration store
//! - **raw_input** — `WM_INPUT` payload parsing into [`RawEvent`]s
//! - **pump** — a hidden message-only window registered for generic-desktop
//!   mouse + keyboard input, and the blocking message loop
//!
//! [`RawEvent`]: crate::event::RawEvent

pub mod discovery;
pub mod pump;
pub mod raw_input;

pub use discovery::{RawInputEnumerator, RegistryNameResolver};
pub use pump::EventPump;
