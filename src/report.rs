//! Text rendering of device summaries and the pairwise comparison report.

use std::fmt::Write;

use crate::analysis;
use crate::device::{Device, DeviceKind};
use crate::registry::DeviceRegistry;

fn name_of(device: &Device) -> &str {
    if device.display_name.is_empty() {
        "(unknown)"
    } else {
        &device.display_name
    }
}

/// One line per device: handle and name.
pub fn device_list(devices: &[Device]) -> String {
    let mut out = String::new();
    for device in devices {
        let _ = writeln!(out, "{}: {}", device.handle, name_of(device));
    }
    out
}

/// Summary block for one device: name, handle, estimated peak rate,
/// accumulated displacement.
pub fn device_report(device: &Device) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", device.handle, name_of(device));
    match analysis::reporting_rate_hz(device) {
        Some(hz) => {
            let _ = writeln!(out, "  max rate: {hz:.1} Hz");
        }
        None => {
            let _ = writeln!(out, "  max rate: n/a");
        }
    }
    let (dx, dy) = device.motion();
    let _ = writeln!(out, "  accumulated: ({dx}, {dy})");
    out
}

fn qualifies(device: &Device) -> bool {
    device.kind == DeviceKind::Mouse && device.has_motion()
}

/// Pairwise block for `from` against every other qualifying mouse.
///
/// `None` when `from` itself does not qualify (not a mouse, or no
/// accumulated motion).
pub fn comparison_report(from: &Device, devices: &[Device]) -> Option<String> {
    if !qualifies(from) {
        return None;
    }
    let mut out = String::new();
    let _ = writeln!(out, "from {}: {}", from.handle, name_of(from));
    for to in devices {
        if to.handle == from.handle || !qualifies(to) {
            continue;
        }
        let diff = analysis::angular_difference(from, to);
        let _ = writeln!(out, "  to {}: {}", to.handle, name_of(to));
        let _ = writeln!(out, "    conversion: {:.3}", analysis::conversion_factor(from, to));
        let _ = writeln!(out, "    angle difference: {:.2} ({})", diff, analysis::classify(diff));
    }
    Some(out)
}

/// The full show-report output: a summary per qualifying mouse, then the
/// pairwise section when at least two mice qualify. Empty string when
/// nothing qualifies.
pub fn full_report(registry: &DeviceRegistry) -> String {
    let qualifying: Vec<&Device> = registry.devices().iter().filter(|d| qualifies(d)).collect();

    let mut out = String::new();
    for device in &qualifying {
        out.push_str(&device_report(device));
    }
    if qualifying.len() >= 2 {
        for device in &qualifying {
            if let Some(block) = comparison_report(device, registry.devices()) {
                out.push_str(&block);
            }
        }
    }
    out
}
