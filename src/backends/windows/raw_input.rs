#![cfg(target_os = "windows")]

//! `WM_INPUT` payload parsing.
//!
//! This module is intentionally "dumb": it turns one `WM_INPUT` lparam into
//! one [`RawEvent`] and nothing else. Registration and the message loop live
//! in `pump`; routing decisions live in the core.
//!
//! Keyboard identity is the virtual-key code, which is what the command
//! bindings are expressed in. Raw Input does not flag hold auto-repeats, so
//! `is_repeat` is always `false` here and the router's held-key tracking
//! does the filtering.

use core::ffi::c_void;
use std::time::Instant;

use windows_sys::Win32::UI::Input::{
    GetRawInputData, RAWINPUTHEADER, RAWKEYBOARD, RAWMOUSE, RID_INPUT, RIM_TYPEKEYBOARD,
    RIM_TYPEMOUSE,
};

use crate::device::DeviceHandle;
use crate::event::{EventPayload, RawEvent};

const RI_KEY_BREAK: u16 = 0x0001;

/// Read and parse the `WM_INPUT` payload behind `lparam`.
///
/// `None` for unreadable payloads and for device types we are not registered
/// for (only mouse and keyboard input ever arrives).
pub fn read_wm_input(lparam: isize) -> Option<RawEvent> {
    unsafe {
        // Query size, then read. RAWINPUT is variable-sized, so go through a
        // byte buffer instead of assuming the struct layout covers it.
        let mut size: u32 = 0;
        let r0 = GetRawInputData(
            lparam as _,
            RID_INPUT,
            core::ptr::null_mut(),
            &mut size,
            core::mem::size_of::<RAWINPUTHEADER>() as u32,
        );
        if r0 == u32::MAX || size == 0 {
            return None;
        }

        let mut buf = vec![0u8; size as usize];
        let r1 = GetRawInputData(
            lparam as _,
            RID_INPUT,
            buf.as_mut_ptr() as *mut c_void,
            &mut size,
            core::mem::size_of::<RAWINPUTHEADER>() as u32,
        );
        if r1 == u32::MAX {
            return None;
        }

        parse_packet(&buf)
    }
}

/// Parse a raw `RID_INPUT` byte payload into an event, stamped now.
fn parse_packet(buf: &[u8]) -> Option<RawEvent> {
    let hdr_sz = core::mem::size_of::<RAWINPUTHEADER>();
    if buf.len() < hdr_sz {
        return None;
    }

    unsafe {
        let hdr: RAWINPUTHEADER = core::ptr::read_unaligned(buf.as_ptr() as *const RAWINPUTHEADER);
        let data_ptr = buf.as_ptr().add(hdr_sz);

        let payload = match hdr.dwType {
            RIM_TYPEMOUSE => {
                if buf.len() < hdr_sz + core::mem::size_of::<RAWMOUSE>() {
                    return None;
                }
                let mouse: RAWMOUSE = core::ptr::read_unaligned(data_ptr as *const RAWMOUSE);
                EventPayload::Motion {
                    dx: mouse.lLastX,
                    dy: mouse.lLastY,
                }
            }
            RIM_TYPEKEYBOARD => {
                if buf.len() < hdr_sz + core::mem::size_of::<RAWKEYBOARD>() {
                    return None;
                }
                let kbd: RAWKEYBOARD = core::ptr::read_unaligned(data_ptr as *const RAWKEYBOARD);
                let code = kbd.VKey;
                if kbd.Flags & RI_KEY_BREAK != 0 {
                    EventPayload::KeyUp { code }
                } else {
                    EventPayload::KeyDown {
                        code,
                        is_repeat: false,
                    }
                }
            }
            _ => return None,
        };

        Some(RawEvent {
            handle: DeviceHandle(hdr.hDevice as usize),
            at: Instant::now(),
            payload,
        })
    }
}
