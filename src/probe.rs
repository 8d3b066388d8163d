//! Startup-time discovery collaborators.
//!
//! Enumeration and friendly-name lookup are the only places the core talks
//! to the platform outside the event stream. Both are synchronous one-shot
//! calls made at startup; their latency is acceptable to block on.

use crate::device::DeviceHandle;
use crate::error::Result;

/// One attached device as reported by the platform, before the registry
/// turns it into a tracked [`Device`](crate::device::Device).
#[derive(Clone, Debug)]
pub struct DiscoveredDevice {
    pub handle: DeviceHandle,
    /// Platform type tag, mapped via
    /// [`DeviceKind::from_raw`](crate::device::DeviceKind::from_raw).
    pub raw_kind: u32,
    /// OS interface path when the platform exposes one; feeds name lookup.
    pub path: Option<String>,
}

/// Lists currently attached devices. May fail with a platform error; zero
/// devices is a valid (empty) result.
pub trait DeviceEnumerator {
    fn enumerate(&mut self, max: usize) -> Result<Vec<DiscoveredDevice>>;
}

/// Resolves a best-effort human-readable name for a discovered device.
/// Failure is recoverable; callers log it and continue with an empty name.
pub trait DisplayNameResolver {
    fn resolve(&mut self, device: &DiscoveredDevice) -> Result<String>;
}
