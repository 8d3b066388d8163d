//! Bounded registry of tracked devices.

use crate::device::{Device, DeviceHandle, DeviceKind};
use crate::error::Result;
use crate::probe::{DeviceEnumerator, DisplayNameResolver};

/// Hard cap on tracked devices. Enumeration past this is truncated; devices
/// attached after startup are reported as unrecognized instead of grown into
/// the registry.
pub const MAX_DEVICES: usize = 16;

/// The set of devices discovered at startup, in discovery order.
///
/// Populated exactly once per process; never grows or shrinks afterwards.
/// Lookup is a linear scan, fine at this bound.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the registry from the platform's current device list, up to
    /// `max` devices (itself capped at [`MAX_DEVICES`]).
    ///
    /// Name resolution is best-effort per device: a failure is logged and
    /// leaves the name empty. Returns the number of devices populated; an
    /// empty device list is `Ok(0)`, only a failing enumeration primitive is
    /// an error.
    pub fn populate(
        &mut self,
        enumerator: &mut dyn DeviceEnumerator,
        resolver: &mut dyn DisplayNameResolver,
        max: usize,
    ) -> Result<usize> {
        let max = max.min(MAX_DEVICES);
        let discovered = enumerator.enumerate(max)?;
        for entry in discovered.into_iter().take(max) {
            let display_name = match resolver.resolve(&entry) {
                Ok(name) => name,
                Err(err) => {
                    log::warn!("no display name for device {}: {err}", entry.handle);
                    String::new()
                }
            };
            let kind = DeviceKind::from_raw(entry.raw_kind);
            self.insert(Device::new(entry.handle, kind, display_name));
        }
        Ok(self.devices.len())
    }

    /// Handles must stay unique within the registry; duplicates and overflow
    /// are dropped with a warning rather than tracked twice.
    pub(crate) fn insert(&mut self, device: Device) {
        if self.devices.len() >= MAX_DEVICES {
            log::warn!(
                "device table full ({MAX_DEVICES}), ignoring device {}",
                device.handle
            );
            return;
        }
        if self.lookup(device.handle).is_some() {
            log::warn!("duplicate handle {} in enumeration, ignoring", device.handle);
            return;
        }
        self.devices.push(device);
    }

    pub fn lookup(&self, handle: DeviceHandle) -> Option<&Device> {
        self.devices.iter().find(|d| d.handle == handle)
    }

    pub fn lookup_mut(&mut self, handle: DeviceHandle) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.handle == handle)
    }

    /// Zero every device's accumulated motion. Event counts and timing stats
    /// are untouched. Idempotent.
    pub fn reset_all_motion(&mut self) {
        for device in &mut self.devices {
            device.reset_motion();
        }
    }

    /// Devices in discovery order, stable across calls.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::probe::DiscoveredDevice;
    use std::time::Instant;

    /// Enumerator over a canned device list.
    struct FixedEnumerator(Vec<DiscoveredDevice>);

    impl DeviceEnumerator for FixedEnumerator {
        fn enumerate(&mut self, max: usize) -> Result<Vec<DiscoveredDevice>> {
            Ok(self.0.iter().take(max).cloned().collect())
        }
    }

    struct FailingEnumerator;

    impl DeviceEnumerator for FailingEnumerator {
        fn enumerate(&mut self, _max: usize) -> Result<Vec<DiscoveredDevice>> {
            Err(Error::Enumeration("platform said no".into()))
        }
    }

    /// Resolves names as "dev-<handle>", failing for odd handles.
    struct EvenOnlyResolver;

    impl DisplayNameResolver for EvenOnlyResolver {
        fn resolve(&mut self, device: &DiscoveredDevice) -> Result<String> {
            if device.handle.0 % 2 == 0 {
                Ok(format!("dev-{}", device.handle))
            } else {
                Err(Error::NameResolution("no such key".into()))
            }
        }
    }

    fn discovered(handle: usize, raw_kind: u32) -> DiscoveredDevice {
        DiscoveredDevice {
            handle: DeviceHandle(handle),
            raw_kind,
            path: None,
        }
    }

    #[test]
    fn test_populate_maps_kinds_and_names() {
        let mut registry = DeviceRegistry::new();
        let mut enumerator =
            FixedEnumerator(vec![discovered(2, 0), discovered(3, 1), discovered(4, 2)]);
        let count = registry
            .populate(&mut enumerator, &mut EvenOnlyResolver, MAX_DEVICES)
            .unwrap();
        assert_eq!(count, 3);

        let mouse = registry.lookup(DeviceHandle(2)).unwrap();
        assert_eq!(mouse.kind, DeviceKind::Mouse);
        assert_eq!(mouse.display_name, "dev-2");

        // Name resolution failed: tracked anyway, with an empty name.
        let keyboard = registry.lookup(DeviceHandle(3)).unwrap();
        assert_eq!(keyboard.kind, DeviceKind::Keyboard);
        assert_eq!(keyboard.display_name, "");

        assert_eq!(
            registry.lookup(DeviceHandle(4)).unwrap().kind,
            DeviceKind::OtherHid
        );
    }

    #[test]
    fn test_populate_zero_devices_is_ok() {
        let mut registry = DeviceRegistry::new();
        let mut enumerator = FixedEnumerator(Vec::new());
        let count = registry
            .populate(&mut enumerator, &mut EvenOnlyResolver, MAX_DEVICES)
            .unwrap();
        assert_eq!(count, 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_populate_propagates_enumeration_failure() {
        let mut registry = DeviceRegistry::new();
        let err = registry
            .populate(&mut FailingEnumerator, &mut EvenOnlyResolver, MAX_DEVICES)
            .unwrap_err();
        assert!(matches!(err, Error::Enumeration(_)));
    }

    #[test]
    fn test_populate_truncates_at_the_cap() {
        let mut registry = DeviceRegistry::new();
        let all: Vec<_> = (0..40).map(|i| discovered(i * 2, 0)).collect();
        let mut enumerator = FixedEnumerator(all);
        let count = registry
            .populate(&mut enumerator, &mut EvenOnlyResolver, 100)
            .unwrap();
        assert_eq!(count, MAX_DEVICES);
    }

    #[test]
    fn test_duplicate_handles_are_dropped() {
        let mut registry = DeviceRegistry::new();
        let mut enumerator = FixedEnumerator(vec![discovered(2, 0), discovered(2, 1)]);
        let count = registry
            .populate(&mut enumerator, &mut EvenOnlyResolver, MAX_DEVICES)
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            registry.lookup(DeviceHandle(2)).unwrap().kind,
            DeviceKind::Mouse
        );
    }

    #[test]
    fn test_lookup_missing_handle() {
        let registry = DeviceRegistry::new();
        assert!(registry.lookup(DeviceHandle(99)).is_none());
    }

    #[test]
    fn test_reset_all_motion_is_idempotent() {
        let mut registry = DeviceRegistry::new();
        registry.insert(Device::new(DeviceHandle(1), DeviceKind::Mouse, String::new()));
        registry.insert(Device::new(DeviceHandle(2), DeviceKind::Mouse, String::new()));

        let t0 = Instant::now();
        registry
            .lookup_mut(DeviceHandle(1))
            .unwrap()
            .record_motion(7, -2, t0);

        registry.reset_all_motion();
        registry.reset_all_motion();

        let dev = registry.lookup(DeviceHandle(1)).unwrap();
        assert_eq!(dev.motion(), (0, 0));
        assert_eq!(dev.event_count(), 1);
        assert_eq!(registry.lookup(DeviceHandle(2)).unwrap().motion(), (0, 0));
    }
}
