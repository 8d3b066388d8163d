#![cfg(target_os = "windows")]

//! Startup-time device discovery and friendly-name resolution.
//!
//! Enumeration is the Raw Input device list; the raw `dwType` tag maps
//! straight onto [`DeviceKind`](crate::device::DeviceKind). Friendly names
//! come from the `DeviceDesc` value under the machine's device enumeration
//! store, reached via the path transforms in [`crate::devpath`].

use core::ffi::c_void;

use windows_sys::Win32::Foundation::ERROR_SUCCESS;
use windows_sys::Win32::System::Registry::{
    RegCloseKey, RegOpenKeyExW, RegQueryValueExW, HKEY, HKEY_LOCAL_MACHINE, KEY_READ,
};
use windows_sys::Win32::UI::Input::{
    GetRawInputDeviceInfoW, GetRawInputDeviceList, RAWINPUTDEVICELIST, RIDI_DEVICENAME,
};

use crate::device::DeviceHandle;
use crate::devpath;
use crate::error::{Error, Result};
use crate::probe::{DeviceEnumerator, DiscoveredDevice, DisplayNameResolver};

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Enumerates attached devices through `GetRawInputDeviceList`.
pub struct RawInputEnumerator;

impl DeviceEnumerator for RawInputEnumerator {
    fn enumerate(&mut self, max: usize) -> Result<Vec<DiscoveredDevice>> {
        unsafe {
            let mut count: u32 = 0;
            let r0 = GetRawInputDeviceList(
                core::ptr::null_mut(),
                &mut count,
                core::mem::size_of::<RAWINPUTDEVICELIST>() as u32,
            );
            if r0 == u32::MAX {
                return Err(Error::Enumeration(
                    "GetRawInputDeviceList size query failed".into(),
                ));
            }
            if count == 0 {
                return Ok(Vec::new());
            }

            let mut list = vec![
                RAWINPUTDEVICELIST {
                    hDevice: core::ptr::null_mut(),
                    dwType: 0,
                };
                count as usize
            ];
            let filled = GetRawInputDeviceList(
                list.as_mut_ptr(),
                &mut count,
                core::mem::size_of::<RAWINPUTDEVICELIST>() as u32,
            );
            if filled == u32::MAX {
                return Err(Error::Enumeration("GetRawInputDeviceList failed".into()));
            }
            list.truncate(filled as usize);

            Ok(list
                .iter()
                .take(max)
                .map(|rid| DiscoveredDevice {
                    handle: DeviceHandle(rid.hDevice as usize),
                    raw_kind: rid.dwType,
                    path: device_interface_path(rid.hDevice),
                })
                .collect())
        }
    }
}

/// Raw Input interface path for a device (`RIDI_DEVICENAME`).
fn device_interface_path(hdevice: *mut c_void) -> Option<String> {
    unsafe {
        // Size query counts WCHARs including the NUL.
        let mut size: u32 = 0;
        let r0 = GetRawInputDeviceInfoW(hdevice, RIDI_DEVICENAME, core::ptr::null_mut(), &mut size);
        if r0 == u32::MAX || size == 0 {
            return None;
        }

        let mut buf = vec![0u16; size as usize];
        let r1 = GetRawInputDeviceInfoW(
            hdevice,
            RIDI_DEVICENAME,
            buf.as_mut_ptr() as *mut c_void,
            &mut size,
        );
        if r1 == u32::MAX {
            return None;
        }

        while buf.last() == Some(&0) {
            buf.pop();
        }
        Some(String::from_utf16_lossy(&buf))
    }
}

/// Resolves friendly names from the `DeviceDesc` value of a device's
/// enumeration-store key.
pub struct RegistryNameResolver;

impl DisplayNameResolver for RegistryNameResolver {
    fn resolve(&mut self, device: &DiscoveredDevice) -> Result<String> {
        let path = device.path.as_deref().ok_or_else(|| {
            Error::NameResolution(format!("no interface path for device {}", device.handle))
        })?;
        let key_path = devpath::build_registry_path(path);
        let desc = query_device_desc(&key_path)?;
        Ok(devpath::friendly_name_from_desc(&desc).to_string())
    }
}

fn query_device_desc(key_path: &str) -> Result<String> {
    let key_path_w = wide(key_path);
    let value_name_w = wide("DeviceDesc");
    unsafe {
        let mut key: HKEY = core::ptr::null_mut();
        let opened = RegOpenKeyExW(
            HKEY_LOCAL_MACHINE,
            key_path_w.as_ptr(),
            0,
            KEY_READ,
            &mut key,
        );
        if opened != ERROR_SUCCESS {
            return Err(Error::NameResolution(format!(
                "cannot open {key_path} (error {opened})"
            )));
        }

        let mut kind: u32 = 0;
        let mut size: u32 = 0;
        let sized = RegQueryValueExW(
            key,
            value_name_w.as_ptr(),
            core::ptr::null(),
            &mut kind,
            core::ptr::null_mut(),
            &mut size,
        );
        if sized != ERROR_SUCCESS || size == 0 {
            RegCloseKey(key);
            return Err(Error::NameResolution(format!(
                "no DeviceDesc under {key_path}"
            )));
        }

        let mut buf = vec![0u8; size as usize];
        let read = RegQueryValueExW(
            key,
            value_name_w.as_ptr(),
            core::ptr::null(),
            &mut kind,
            buf.as_mut_ptr(),
            &mut size,
        );
        RegCloseKey(key);
        if read != ERROR_SUCCESS {
            return Err(Error::NameResolution(format!(
                "cannot read DeviceDesc under {key_path} (error {read})"
            )));
        }
        buf.truncate(size as usize);

        // REG_SZ payload is UTF-16, usually NUL-terminated.
        let utf16: Vec<u16> = buf
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        let mut desc = String::from_utf16_lossy(&utf16);
        while desc.ends_with('\0') {
            desc.pop();
        }
        Ok(desc)
    }
}
