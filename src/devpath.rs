//! Device interface path → configuration-store path transforms.
//!
//! A Raw Input interface path looks like
//! `\\?\HID#VID_046D&PID_C08B&MI_01#8&2d599b2f&0&0000#{GUID}`. The friendly
//! name for that device lives under the machine's device enumeration store at
//! `SYSTEM\CurrentControlSet\Enum\HID\VID_046D&PID_C08B&MI_01\8&2d599b2f&0&0000`,
//! i.e. the path with its prefix stripped, the first two `#` turned into
//! `\`, and everything from the third `#` (the interface class GUID) dropped.
//!
//! These are total functions over immutable strings; all the platform I/O
//! that uses them lives in the Windows backend.

/// Root of the per-device enumeration store.
pub const ENUM_ROOT: &str = r"SYSTEM\CurrentControlSet\Enum\";

/// Strip the `\\?\` style prefix off a device interface path.
pub fn trim_leading_separators(name: &str) -> &str {
    name.trim_start_matches(['\\', '?'])
}

/// Build the enumeration-store key path holding a device's description.
pub fn build_registry_path(device_name: &str) -> String {
    let name = trim_leading_separators(device_name);
    let mut path = String::with_capacity(ENUM_ROOT.len() + name.len());
    path.push_str(ENUM_ROOT);
    let mut hashes = 0;
    for c in name.chars() {
        if c == '#' {
            hashes += 1;
            if hashes > 2 {
                break;
            }
            path.push('\\');
        } else {
            path.push(c);
        }
    }
    path
}

/// Extract the friendly part of a `DeviceDesc` value.
///
/// Descriptions read `@msmouse.inf,%hid.mousedevice%;HID-compliant mouse`;
/// the display text follows the first `;`. A value with no `;` is returned
/// whole rather than discarded.
pub fn friendly_name_from_desc(desc: &str) -> &str {
    desc.split_once(';').map_or(desc, |(_, rest)| rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_leading_separators() {
        assert_eq!(trim_leading_separators(r"\\?\HID#VID"), "HID#VID");
        assert_eq!(trim_leading_separators(r"\??\ACPI#x"), "ACPI#x");
        assert_eq!(trim_leading_separators("plain"), "plain");
        assert_eq!(trim_leading_separators(""), "");
    }

    #[test]
    fn test_build_registry_path() {
        let name = r"\\?\HID#VID_046D&PID_C08B&MI_01#8&2d599b2f&0&0000#{378de44c-56ef-11d1-bc8c-00a0c91405dd}";
        assert_eq!(
            build_registry_path(name),
            r"SYSTEM\CurrentControlSet\Enum\HID\VID_046D&PID_C08B&MI_01\8&2d599b2f&0&0000"
        );
    }

    #[test]
    fn test_build_registry_path_without_guid_segment() {
        assert_eq!(
            build_registry_path(r"\\?\HID#VID_1234#instance"),
            r"SYSTEM\CurrentControlSet\Enum\HID\VID_1234\instance"
        );
    }

    #[test]
    fn test_friendly_name_from_desc() {
        assert_eq!(
            friendly_name_from_desc("@msmouse.inf,%hid.mousedevice%;HID-compliant mouse"),
            "HID-compliant mouse"
        );
        assert_eq!(friendly_name_from_desc("Bare name"), "Bare name");
        assert_eq!(friendly_name_from_desc(""), "");
    }
}
