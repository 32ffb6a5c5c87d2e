//! Abstract identities for the mouse buttons carried in the client event
//! stream.
//!
//! The stream protocol encodes mouse buttons as small numeric indices
//! (1 = left, 2 = middle, 3 = right, 4/5 = the side "X" buttons). This module
//! gives those indices a typed identity and maps each button to the virtual
//! key the key-state guard probes before injection.

use serde::{Deserialize, Serialize};

use crate::keys;

/// A mouse button as identified by the client event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// First extended button (XBUTTON1, usually "back").
    Side,
    /// Second extended button (XBUTTON2, usually "forward").
    Extra,
}

impl MouseButton {
    /// Maps a wire button index to a button identity.
    ///
    /// Indices 1–4 map to left/middle/right/side; every other value,
    /// including out-of-range ones, maps to [`MouseButton::Extra`]. The
    /// mapping is total so a malformed index degrades to a harmless X-button
    /// event instead of being ambiguous.
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            4 => MouseButton::Side,
            _ => MouseButton::Extra,
        }
    }

    /// The virtual key whose live state mirrors this button.
    ///
    /// Used by the key-state guard to detect press/release transitions that
    /// disagree with what the OS already believes.
    pub fn virtual_key(self) -> u16 {
        match self {
            MouseButton::Left => keys::VK_LBUTTON,
            MouseButton::Middle => keys::VK_MBUTTON,
            MouseButton::Right => keys::VK_RBUTTON,
            MouseButton::Side => keys::VK_XBUTTON1,
            MouseButton::Extra => keys::VK_XBUTTON2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_maps_documented_indices() {
        assert_eq!(MouseButton::from_index(1), MouseButton::Left);
        assert_eq!(MouseButton::from_index(2), MouseButton::Middle);
        assert_eq!(MouseButton::from_index(3), MouseButton::Right);
        assert_eq!(MouseButton::from_index(4), MouseButton::Side);
        assert_eq!(MouseButton::from_index(5), MouseButton::Extra);
    }

    #[test]
    fn test_from_index_is_total() {
        // Out-of-range indices degrade to the second X button.
        assert_eq!(MouseButton::from_index(0), MouseButton::Extra);
        assert_eq!(MouseButton::from_index(6), MouseButton::Extra);
        assert_eq!(MouseButton::from_index(255), MouseButton::Extra);
    }

    #[test]
    fn test_virtual_keys_are_distinct() {
        let buttons = [
            MouseButton::Left,
            MouseButton::Middle,
            MouseButton::Right,
            MouseButton::Side,
            MouseButton::Extra,
        ];
        let mut vks: Vec<u16> = buttons.iter().map(|b| b.virtual_key()).collect();
        vks.sort_unstable();
        vks.dedup();
        assert_eq!(vks.len(), buttons.len());
    }
}
