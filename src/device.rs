use std::fmt;
use std::time::{Duration, Instant};

/// Opaque, process-stable identifier for an input device.
///
/// The inner value is whatever the platform hands out (a Raw Input `HANDLE`
/// on Windows). It is only ever compared and displayed, never dereferenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeviceHandle(pub usize);

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a tracked device, fixed at discovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    Mouse,
    Keyboard,
    /// Tracked for lookup, never part of a sensitivity comparison.
    OtherHid,
}

impl DeviceKind {
    /// Map the platform's raw type tag. The values match Windows Raw Input
    /// (`RIM_TYPEMOUSE` = 0, `RIM_TYPEKEYBOARD` = 1); anything else is HID.
    pub fn from_raw(tag: u32) -> Self {
        match tag {
            0 => DeviceKind::Mouse,
            1 => DeviceKind::Keyboard,
            _ => DeviceKind::OtherHid,
        }
    }
}

/// Result of recording one motion event.
#[derive(Clone, Copy, Debug)]
pub struct MotionOutcome {
    /// This was the first motion event the device ever produced.
    pub first_event: bool,
}

/// One physical input device recognized by the host, together with the
/// motion and timing state accumulated for it during this run.
#[derive(Clone, Debug)]
pub struct Device {
    pub handle: DeviceHandle,
    pub kind: DeviceKind,
    /// Best-effort friendly name; empty when resolution failed. Cosmetic
    /// only, never used as a key.
    pub display_name: String,
    motion: (i64, i64),
    event_count: u64,
    last_event_time: Option<Instant>,
    min_interval: Option<Duration>,
}

impl Device {
    pub fn new(handle: DeviceHandle, kind: DeviceKind, display_name: String) -> Self {
        Self {
            handle,
            kind,
            display_name,
            motion: (0, 0),
            event_count: 0,
            last_event_time: None,
            min_interval: None,
        }
    }

    /// Accumulated displacement since the last history reset.
    pub fn motion(&self) -> (i64, i64) {
        self.motion
    }

    pub fn has_motion(&self) -> bool {
        self.motion != (0, 0)
    }

    /// Motion events seen since process start. Not affected by history resets.
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Smallest strictly-positive gap observed between consecutive events.
    pub fn min_interval(&self) -> Option<Duration> {
        self.min_interval
    }

    /// Zero the accumulated displacement. Event count and timing stats stay.
    pub fn reset_motion(&mut self) {
        self.motion = (0, 0);
    }

    /// Fold one motion event into the accumulated state.
    ///
    /// The minimum-interval estimate only moves on strictly positive deltas;
    /// two events on the same clock tick would otherwise report an infinite
    /// rate.
    pub fn record_motion(&mut self, dx: i32, dy: i32, now: Instant) -> MotionOutcome {
        self.motion.0 += i64::from(dx);
        self.motion.1 += i64::from(dy);

        let first_event = self.event_count == 0;
        if !first_event {
            if let Some(prev) = self.last_event_time {
                let delta = now.saturating_duration_since(prev);
                if !delta.is_zero() && self.min_interval.map_or(true, |min| delta < min) {
                    self.min_interval = Some(delta);
                }
            }
        }

        self.event_count += 1;
        self.last_event_time = Some(now);
        MotionOutcome { first_event }
    }
}
