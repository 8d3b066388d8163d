//! Platform input backends.
//!
//! Implementations of the discovery collaborators
//! ([`DeviceEnumerator`](crate::probe::DeviceEnumerator),
//! [`DisplayNameResolver`](crate::probe::DisplayNameResolver)) and the event
//! pump feeding [`RawEvent`](crate::event::RawEvent)s into the router.
//!
//! Currently Windows-only, over Raw Input. The core never depends on
//! anything in here; ports to other platforms only have to supply these
//! three pieces.

#[cfg(target_os = "windows")]
pub mod windows;
