#![cfg(target_os = "windows")]

//! Hidden-window Raw Input event pump.
//!
//! A message-only window registered for generic-desktop mouse and keyboard
//! input (`RIDEV_INPUTSINK`, so events arrive regardless of focus). The
//! window procedure only parses `WM_INPUT` payloads and queues the resulting
//! events; `run` drains the queue after each dispatched message and hands
//! events to the caller one at a time, on this thread.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ops::ControlFlow;

use windows_sys::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::Input::{
    RegisterRawInputDevices, RAWINPUTDEVICE, RIDEV_INPUTSINK, RIDEV_NOLEGACY,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DispatchMessageW, GetMessageW, RegisterClassW,
    TranslateMessage, HWND_MESSAGE, MSG, WM_INPUT, WNDCLASSW,
};

use super::raw_input;
use crate::error::{Error, Result};
use crate::event::RawEvent;

const USAGE_PAGE_GENERIC_DESKTOP: u16 = 0x01;
const USAGE_MOUSE: u16 = 0x02;
const USAGE_KEYBOARD: u16 = 0x06;

thread_local! {
    // Single-threaded by contract: the window is created and pumped on one
    // thread, so a thread-local queue is all the plumbing wndproc needs.
    static PENDING: RefCell<VecDeque<RawEvent>> = RefCell::new(VecDeque::new());
}

unsafe extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if msg == WM_INPUT {
        if let Some(event) = raw_input::read_wm_input(lparam) {
            PENDING.with(|queue| queue.borrow_mut().push_back(event));
            return 0;
        }
    }
    DefWindowProcW(hwnd, msg, wparam, lparam)
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Owns the hidden window and the raw-input registration.
pub struct EventPump {
    _hwnd: HWND,
}

impl EventPump {
    /// Register the window class, create the message-only window, and
    /// register for mouse + keyboard raw input. All failures here are fatal
    /// startup errors.
    pub fn new() -> Result<Self> {
        unsafe {
            let class_name = wide("sensmatch-rawinput");
            let hinstance = GetModuleHandleW(core::ptr::null());

            let mut class: WNDCLASSW = core::mem::zeroed();
            class.lpfnWndProc = Some(wndproc);
            class.hInstance = hinstance;
            class.lpszClassName = class_name.as_ptr();
            if RegisterClassW(&class) == 0 {
                return Err(Error::EventSource("window class registration failed".into()));
            }

            let hwnd = CreateWindowExW(
                0,
                class_name.as_ptr(),
                class_name.as_ptr(),
                0,
                0,
                0,
                0,
                0,
                HWND_MESSAGE,
                core::ptr::null_mut(),
                hinstance,
                core::ptr::null(),
            );
            if hwnd.is_null() {
                return Err(Error::EventSource("window creation failed".into()));
            }

            let devices = [
                RAWINPUTDEVICE {
                    usUsagePage: USAGE_PAGE_GENERIC_DESKTOP,
                    usUsage: USAGE_MOUSE,
                    dwFlags: RIDEV_NOLEGACY | RIDEV_INPUTSINK,
                    hwndTarget: hwnd,
                },
                RAWINPUTDEVICE {
                    usUsagePage: USAGE_PAGE_GENERIC_DESKTOP,
                    usUsage: USAGE_KEYBOARD,
                    dwFlags: RIDEV_NOLEGACY | RIDEV_INPUTSINK,
                    hwndTarget: hwnd,
                },
            ];
            if RegisterRawInputDevices(
                devices.as_ptr(),
                devices.len() as u32,
                core::mem::size_of::<RAWINPUTDEVICE>() as u32,
            ) == 0
            {
                return Err(Error::EventSource("raw input registration failed".into()));
            }

            Ok(Self { _hwnd: hwnd })
        }
    }

    /// Block on the message loop, handing each parsed event to `handler`.
    ///
    /// Returns when the handler breaks (quit key) or the message queue ends.
    pub fn run(self, mut handler: impl FnMut(RawEvent) -> ControlFlow<()>) -> Result<()> {
        unsafe {
            let mut msg: MSG = core::mem::zeroed();
            loop {
                let got = GetMessageW(&mut msg, core::ptr::null_mut(), 0, 0);
                if got == 0 {
                    return Ok(());
                }
                if got == -1 {
                    return Err(Error::EventSource("message loop failed".into()));
                }
                TranslateMessage(&msg);
                DispatchMessageW(&msg);

                let drained: Vec<RawEvent> =
                    PENDING.with(|queue| queue.borrow_mut().drain(..).collect());
                for event in drained {
                    if handler(event).is_break() {
                        return Ok(());
                    }
                }
            }
        }
    }
}
