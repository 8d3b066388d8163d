//! Raw events as delivered by the platform event source.
//!
//! The core consumes a single flat stream of [`RawEvent`]s. Delivery is
//! in-order per process; there is no ordering guarantee across devices beyond
//! arrival order.
//!
//! ## Value conventions
//! - **Motion deltas** are relative displacements in **raw counts** exactly
//!   as the OS reports them; no DPI scaling or normalization happens anywhere
//!   in this crate. Comparing those raw counts across devices is the whole
//!   point of the tool.
//! - **Key codes** are platform virtual-key values (Win32 `VK_*` on the
//!   Windows backend). They identify command keys, not text.
//! - `is_repeat` is set when the platform itself marks a key-down as an
//!   auto-repeat. Sources that cannot tell (Windows Raw Input is one) leave
//!   it `false`; the router tracks held keys from down/up edges instead.

use std::time::Instant;

use crate::device::DeviceHandle;

/// Timestamped event from one device.
#[derive(Clone, Copy, Debug)]
pub struct RawEvent {
    /// Device that produced the event.
    pub handle: DeviceHandle,
    /// Capture time (monotonic). Suitable for ordering / delta timing within a run.
    pub at: Instant,
    pub payload: EventPayload,
}

/// The actual input change.
#[derive(Clone, Copy, Debug)]
pub enum EventPayload {
    /// Relative displacement since the device's last report (raw counts).
    Motion { dx: i32, dy: i32 },
    /// A key went down (or auto-repeated while held, see module docs).
    KeyDown { code: u16, is_repeat: bool },
    /// A key was released.
    KeyUp { code: u16 },
}
