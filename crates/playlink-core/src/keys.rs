//! Windows virtual-key constants and classification sets used by event
//! translation.
//!
//! # What is a Windows Virtual Key (VK) code? (for beginners)
//!
//! Windows assigns each keyboard key and mouse button a number called a
//! "Virtual Key code", defined in `<winuser.h>` and named `VK_*` (e.g.
//! `VK_RETURN = 0x0D`). They are "virtual" because they identify *logical*
//! keys rather than physical scan codes: the client sends VK codes over the
//! wire, and the host decides per key whether to inject by VK or by the
//! hardware scan code the VK maps to.
//!
//! Only the codes this subsystem actually touches are named here; ordinary
//! letter and digit keys pass through translation untouched as raw `u16`
//! values.

// ── Mouse button VKs (probed by the key-state guard) ──────────────────────────

pub const VK_LBUTTON: u16 = 0x01;
pub const VK_RBUTTON: u16 = 0x02;
pub const VK_MBUTTON: u16 = 0x04;
pub const VK_XBUTTON1: u16 = 0x05;
pub const VK_XBUTTON2: u16 = 0x06;

// ── Keyboard VKs with special handling ────────────────────────────────────────

pub const VK_PAUSE: u16 = 0x13;
/// Page Up. The historical name comes from "prior page".
pub const VK_PRIOR: u16 = 0x21;
/// Page Down ("next page").
pub const VK_NEXT: u16 = 0x22;
pub const VK_END: u16 = 0x23;
pub const VK_HOME: u16 = 0x24;
pub const VK_LEFT: u16 = 0x25;
pub const VK_UP: u16 = 0x26;
pub const VK_RIGHT: u16 = 0x27;
pub const VK_DOWN: u16 = 0x28;
pub const VK_INSERT: u16 = 0x2D;
pub const VK_DELETE: u16 = 0x2E;
pub const VK_LWIN: u16 = 0x5B;
pub const VK_RWIN: u16 = 0x5C;
pub const VK_DIVIDE: u16 = 0x6F;
pub const VK_RCONTROL: u16 = 0xA3;
pub const VK_RMENU: u16 = 0xA5;

/// Keys that must carry `KEYEVENTF_EXTENDEDKEY` when injected.
///
/// These are the keys whose scan codes are prefixed with `0xE0` on real
/// hardware; without the flag Windows resolves them to their numpad twins
/// (e.g. arrow-left becomes numpad-4 when Num Lock is off).
///
/// Reference: "About Keyboard Input – Keystroke Message Flags",
/// <https://docs.microsoft.com/en-us/windows/win32/inputdev/about-keyboard-input>
const EXTENDED_KEYS: [u16; 13] = [
    VK_RMENU, VK_RCONTROL, VK_INSERT, VK_DELETE, VK_HOME, VK_END, VK_PRIOR, VK_NEXT, VK_UP,
    VK_DOWN, VK_LEFT, VK_RIGHT, VK_DIVIDE,
];

/// Keys that must be injected by virtual key rather than by scan code.
///
/// `MapVirtualKey(VK_LWIN, MAPVK_VK_TO_VSC)` does not return a usable scan
/// code for the Windows keys, and Pause has no single scan code at all, so
/// these three go through the virtual-key injection path.
const VIRTUAL_KEY_ONLY: [u16; 3] = [VK_LWIN, VK_RWIN, VK_PAUSE];

/// Collapses virtual-key aliases the host cannot inject directly.
///
/// The client reports the "meta"/platform key as right-alt (`VK_RMENU`)
/// because that is what its own keyboard map produces; Windows has no
/// distinct scan code for it, so it is remapped to the logical left Windows
/// key before any state check or injection.
pub fn normalize(vk: u16) -> u16 {
    if vk == VK_RMENU {
        VK_LWIN
    } else {
        vk
    }
}

/// Returns `true` if injection of `vk` must set `KEYEVENTF_EXTENDEDKEY`.
pub fn is_extended(vk: u16) -> bool {
    EXTENDED_KEYS.contains(&vk)
}

/// Returns `true` if `vk` must be injected by virtual key, never by scan code.
pub fn needs_virtual_key_path(vk: u16) -> bool {
    VIRTUAL_KEY_ONLY.contains(&vk)
}
