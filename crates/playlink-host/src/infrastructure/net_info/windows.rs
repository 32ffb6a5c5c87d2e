//! Windows adapter enumeration via `GetAdaptersAddresses`.
//!
//! The IP Helper API returns the adapter table as a linked list inside one
//! caller-allocated buffer. The required size is not known up front, so the
//! function is called once with a null buffer to learn the size, then again
//! with a buffer of that size.
//!
//! # Safety
//!
//! This module uses `unsafe` exclusively for Win32 FFI calls and for
//! walking the pointer-linked records inside the buffer the API filled.

#![cfg(target_os = "windows")]

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use tracing::warn;
use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, ERROR_SUCCESS};
use windows::Win32::NetworkManagement::IpHelper::{
    GetAdaptersAddresses, GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_MULTICAST,
    IP_ADAPTER_ADDRESSES_LH, IP_ADAPTER_UNICAST_ADDRESS_LH,
};
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR_IN, SOCKADDR_IN6, SOCKET_ADDRESS,
};

use super::{AdapterRecord, AdapterSource};

/// [`AdapterSource`] backed by the IP Helper adapter table.
pub struct IpHelperAdapterSource;

impl IpHelperAdapterSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IpHelperAdapterSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterSource for IpHelperAdapterSource {
    fn adapters(&self) -> Vec<AdapterRecord> {
        let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST;

        // Size query: a null buffer makes the call report the needed size
        // in `size` and return ERROR_BUFFER_OVERFLOW.
        let mut size = 0u32;
        // SAFETY: a null adapter buffer with a zero size is the documented
        // way to query the required buffer size.
        let ret = unsafe {
            GetAdaptersAddresses(AF_UNSPEC.0 as u32, flags, None, None, &mut size)
        };
        if ret != ERROR_BUFFER_OVERFLOW.0 || size == 0 {
            warn!(code = ret, "couldn't size the adapter table");
            return Vec::new();
        }

        let mut buf = vec![0u8; size as usize];
        let head = buf.as_mut_ptr() as *mut IP_ADAPTER_ADDRESSES_LH;
        // SAFETY: buf holds exactly the number of bytes the sizing call
        // asked for, and head points at its start.
        let ret = unsafe {
            GetAdaptersAddresses(AF_UNSPEC.0 as u32, flags, None, Some(head), &mut size)
        };
        if ret != ERROR_SUCCESS.0 {
            warn!(code = ret, "couldn't enumerate network adapters");
            return Vec::new();
        }

        let mut records = Vec::new();
        let mut adapter = head as *const IP_ADAPTER_ADDRESSES_LH;
        while !adapter.is_null() {
            // SAFETY: adapter points into buf; the API null-terminates the
            // Next chain.
            let entry = unsafe { &*adapter };

            let mac_len = (entry.PhysicalAddressLength as usize).min(entry.PhysicalAddress.len());
            let mac = entry.PhysicalAddress[..mac_len].to_vec();

            let mut unicast = Vec::new();
            let mut address = entry.FirstUnicastAddress as *const IP_ADAPTER_UNICAST_ADDRESS_LH;
            while !address.is_null() {
                // SAFETY: unicast records live in the same buffer and are
                // null-terminated the same way.
                let unicast_entry = unsafe { &*address };
                if let Some(ip) = ip_from_socket_address(&unicast_entry.Address) {
                    unicast.push(ip);
                }
                address = unicast_entry.Next;
            }

            // SAFETY: FriendlyName is a valid NUL-terminated wide string
            // for every adapter record the API returns.
            let friendly_name = unsafe { entry.FriendlyName.to_string() }.unwrap_or_default();

            records.push(AdapterRecord {
                friendly_name,
                unicast,
                mac,
            });
            adapter = entry.Next;
        }
        records
    }
}

fn ip_from_socket_address(address: &SOCKET_ADDRESS) -> Option<IpAddr> {
    if address.lpSockaddr.is_null() {
        return None;
    }
    // SAFETY: lpSockaddr points at a sockaddr of iSockaddrLength bytes
    // owned by the adapter buffer; the family tag tells us which concrete
    // layout to read.
    unsafe {
        let family = (*address.lpSockaddr).sa_family;
        if family == AF_INET {
            let v4 = &*(address.lpSockaddr as *const SOCKADDR_IN);
            Some(IpAddr::V4(Ipv4Addr::from(u32::from_be(
                v4.sin_addr.S_un.S_addr,
            ))))
        } else if family == AF_INET6 {
            let v6 = &*(address.lpSockaddr as *const SOCKADDR_IN6);
            Some(IpAddr::V6(Ipv6Addr::from(v6.sin6_addr.u.Byte)))
        } else {
            None
        }
    }
}
