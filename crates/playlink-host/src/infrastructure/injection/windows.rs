//! Windows synthetic-input adapter: `SendInput` + `GetAsyncKeyState`.
//!
//! Translates one [`SyntheticEvent`] descriptor into one Win32 `INPUT`
//! structure per call. Mouse motion is injected as *relative* movement
//! (`MOUSEEVENTF_MOVE` without `ABSOLUTE`) because the client streams
//! deltas, not positions. Keyboard events are injected by hardware scan
//! code when the descriptor asks for it (games reading raw scan codes
//! ignore virtual-key-only injection), with the scan code looked up from
//! the virtual key via `MapVirtualKeyW` at injection time.
//!
//! # Safety
//!
//! This module uses `unsafe` exclusively for Win32 FFI calls. All `unsafe`
//! blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, MapVirtualKeyW, SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE,
    KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, KEYEVENTF_SCANCODE,
    MAPVK_VK_TO_VSC, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MIDDLEDOWN,
    MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_MOVE, MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP,
    MOUSEEVENTF_WHEEL, MOUSEEVENTF_XDOWN, MOUSEEVENTF_XUP, MOUSEINPUT, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{XBUTTON1, XBUTTON2};

use playlink_core::MouseButton;

use crate::application::inject_input::{InputInjector, KeyStateProbe, SyntheticEvent};

/// High bit of the `GetAsyncKeyState` return value: key is currently down.
const KEY_STATE_DOWN: u16 = 0x8000;

/// Windows implementation of both OS input ports.
///
/// Stateless; the same instance can back the injector and the key-state
/// probe of a session.
pub struct SendInputInjector;

impl SendInputInjector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SendInputInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl InputInjector for SendInputInjector {
    fn inject(&self, event: &SyntheticEvent) -> u32 {
        let input = build_input(event);
        // SAFETY: input is a valid INPUT structure on the stack and the
        // size argument matches its layout.
        unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) }
    }
}

impl KeyStateProbe for SendInputInjector {
    fn is_pressed(&self, vk: u16) -> bool {
        // SAFETY: GetAsyncKeyState has no preconditions.
        let state = unsafe { GetAsyncKeyState(vk as i32) };
        (state as u16 & KEY_STATE_DOWN) != 0
    }
}

fn build_input(event: &SyntheticEvent) -> INPUT {
    match *event {
        SyntheticEvent::MouseMove { dx, dy } => mouse_input(MOUSEINPUT {
            dx,
            dy,
            mouseData: 0,
            dwFlags: MOUSEEVENTF_MOVE,
            time: 0,
            dwExtraInfo: 0,
        }),
        SyntheticEvent::MouseButton { button, release } => {
            let (flags, mouse_data) = match (button, release) {
                (MouseButton::Left, false) => (MOUSEEVENTF_LEFTDOWN, 0u32),
                (MouseButton::Left, true) => (MOUSEEVENTF_LEFTUP, 0),
                (MouseButton::Middle, false) => (MOUSEEVENTF_MIDDLEDOWN, 0),
                (MouseButton::Middle, true) => (MOUSEEVENTF_MIDDLEUP, 0),
                (MouseButton::Right, false) => (MOUSEEVENTF_RIGHTDOWN, 0),
                (MouseButton::Right, true) => (MOUSEEVENTF_RIGHTUP, 0),
                (MouseButton::Side, false) => (MOUSEEVENTF_XDOWN, XBUTTON1 as u32),
                (MouseButton::Side, true) => (MOUSEEVENTF_XUP, XBUTTON1 as u32),
                (MouseButton::Extra, false) => (MOUSEEVENTF_XDOWN, XBUTTON2 as u32),
                (MouseButton::Extra, true) => (MOUSEEVENTF_XUP, XBUTTON2 as u32),
            };
            mouse_input(MOUSEINPUT {
                dx: 0,
                dy: 0,
                mouseData: mouse_data,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            })
        }
        SyntheticEvent::Wheel { distance } => mouse_input(MOUSEINPUT {
            dx: 0,
            dy: 0,
            // The delta is signed; the field carries it bit-for-bit.
            mouseData: distance as u32,
            dwFlags: MOUSEEVENTF_WHEEL,
            time: 0,
            dwExtraInfo: 0,
        }),
        SyntheticEvent::Key {
            vk,
            by_scan_code,
            extended,
            release,
        } => {
            let mut flags = KEYBD_EVENT_FLAGS(0);
            let mut w_vk = VIRTUAL_KEY(0);
            let mut w_scan = 0u16;

            if by_scan_code {
                // SAFETY: MapVirtualKeyW has no preconditions.
                w_scan = unsafe { MapVirtualKeyW(vk as u32, MAPVK_VK_TO_VSC) } as u16;
                flags |= KEYEVENTF_SCANCODE;
            } else {
                w_vk = VIRTUAL_KEY(vk);
            }

            if extended {
                flags |= KEYEVENTF_EXTENDEDKEY;
            }
            if release {
                flags |= KEYEVENTF_KEYUP;
            }

            INPUT {
                r#type: INPUT_KEYBOARD,
                Anonymous: INPUT_0 {
                    ki: KEYBDINPUT {
                        wVk: w_vk,
                        wScan: w_scan,
                        dwFlags: flags,
                        time: 0,
                        dwExtraInfo: 0,
                    },
                },
            }
        }
    }
}

fn mouse_input(mi: MOUSEINPUT) -> INPUT {
    INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 { mi },
    }
}
