//! Event routing and command handling.
//!
//! One router instance owns the registry, the pause flag, and the held-key
//! set, and is driven from a single event loop; nothing here is re-entered
//! concurrently.

use crate::config::{KeyMap, RepeatPolicy};
use crate::device::DeviceKind;
use crate::event::{EventPayload, RawEvent};
use crate::registry::DeviceRegistry;
use crate::report;

/// What the router did with one event. Returned so behavior is assertable
/// without capturing console output; the caller only acts on [`Quit`].
///
/// [`Quit`]: Disposition::Quit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Motion folded into a device's accumulated state.
    Accumulated,
    /// Same, and it was the device's first event (notification printed).
    FirstMotion,
    /// Motion dropped because accumulation is paused.
    PausedDrop,
    /// Motion from a handle the registry does not know; warned and dropped.
    UnknownDevice,
    HistoryReset,
    PauseToggled,
    ReportShown,
    /// The quit key went down; the caller decides what exit means.
    Quit,
    /// Anything routed nowhere: key-ups, suppressed repeats, motion from
    /// non-mouse devices.
    Ignored,
}

pub struct InputEventRouter {
    registry: DeviceRegistry,
    keys: KeyMap,
    repeat_policy: RepeatPolicy,
    paused: bool,
    held: Vec<u16>,
}

impl InputEventRouter {
    pub fn new(registry: DeviceRegistry, keys: KeyMap, repeat_policy: RepeatPolicy) -> Self {
        Self {
            registry,
            keys,
            repeat_policy,
            paused: false,
            held: Vec::new(),
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn handle_event(&mut self, event: RawEvent) -> Disposition {
        match event.payload {
            EventPayload::Motion { dx, dy } => self.on_motion(event, dx, dy),
            EventPayload::KeyDown { code, is_repeat } => self.on_key_down(code, is_repeat),
            EventPayload::KeyUp { code } => {
                self.held.retain(|&held| held != code);
                Disposition::Ignored
            }
        }
    }

    fn on_motion(&mut self, event: RawEvent, dx: i32, dy: i32) -> Disposition {
        let Some(device) = self.registry.lookup_mut(event.handle) else {
            log::warn!(
                "motion from unrecognized device {}; restart to pick up newly attached devices",
                event.handle
            );
            return Disposition::UnknownDevice;
        };
        if device.kind != DeviceKind::Mouse {
            return Disposition::Ignored;
        }
        if self.paused {
            return Disposition::PausedDrop;
        }
        let outcome = device.record_motion(dx, dy, event.at);
        if outcome.first_event {
            println!(
                "device {} ({}) produced motion",
                device.handle, device.display_name
            );
            Disposition::FirstMotion
        } else {
            Disposition::Accumulated
        }
    }

    fn on_key_down(&mut self, code: u16, is_repeat: bool) -> Disposition {
        // A key-down for a key we already saw go down is a hold repeat,
        // whether or not the platform flagged it.
        let repeat = is_repeat || self.held.contains(&code);
        if !repeat {
            self.held.push(code);
        }
        if repeat && self.repeat_policy == RepeatPolicy::Suppress {
            return Disposition::Ignored;
        }

        if self.keys.reset.contains(&code) {
            self.registry.reset_all_motion();
            println!("history reset");
            Disposition::HistoryReset
        } else if code == self.keys.pause {
            self.paused = !self.paused;
            println!("{}paused", if self.paused { "" } else { "un" });
            Disposition::PauseToggled
        } else if code == self.keys.quit {
            Disposition::Quit
        } else {
            let text = report::full_report(&self.registry);
            print!("{text}");
            Disposition::ReportShown
        }
    }
}
