//! Network-adapter enumeration and MAC address resolution.
//!
//! Clients pairing with the host store its MAC address so they can wake the
//! machine later (Wake-on-LAN). Resolution walks the adapter table looking
//! for the adapter that owns the unicast address the client connected to,
//! and formats that adapter's physical address.
//!
//! The table is re-queried on every resolution request; adapters come and
//! go with docking stations and VPNs, so nothing is cached.

use std::net::IpAddr;

use tracing::warn;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::IpHelperAdapterSource;

/// MAC string returned when no adapter owns the requested address.
pub const UNKNOWN_MAC: &str = "00:00:00:00:00:00";

/// One network adapter as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterRecord {
    /// Human-readable adapter name, for diagnostics only.
    pub friendly_name: String,
    /// Unicast addresses currently assigned to the adapter.
    pub unicast: Vec<IpAddr>,
    /// Physical (MAC) address bytes; empty for adapters without one
    /// (loopback, some tunnels).
    pub mac: Vec<u8>,
}

/// OS boundary for adapter enumeration.
///
/// Each call performs a fresh enumeration.
pub trait AdapterSource {
    fn adapters(&self) -> Vec<AdapterRecord>;
}

/// Resolves the MAC address of the adapter owning `address`.
///
/// Adapters without a physical address are skipped. When no adapter
/// matches, logs a warning and returns [`UNKNOWN_MAC`] so callers always
/// get a well-formed (if useless) value.
pub fn mac_for_address(source: &dyn AdapterSource, address: IpAddr) -> String {
    for adapter in source.adapters() {
        if adapter.mac.is_empty() {
            continue;
        }
        if adapter.unicast.contains(&address) {
            return format_mac(&adapter.mac);
        }
    }
    warn!(%address, "unable to find MAC address");
    UNKNOWN_MAC.to_string()
}

fn format_mac(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}
