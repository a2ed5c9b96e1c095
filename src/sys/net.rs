//! Local network address lookup.

use std::net::{IpAddr, Ipv4Addr};

/// First non-loopback IPv4 address of this host as a string.
///
/// Returns an empty string when interfaces cannot be enumerated or none
/// qualifies. Order follows the OS enumeration order.
pub fn local_ipv4() -> String {
    local_ipv4_addr()
        .map(|ip| ip.to_string())
        .unwrap_or_default()
}

/// Typed form of [`local_ipv4`].
pub fn local_ipv4_addr() -> Option<Ipv4Addr> {
    first_non_loopback_ipv4(interface_addrs())
}

/// Pick the first address that is not loopback and is representable as IPv4.
///
/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) count as IPv4.
pub fn first_non_loopback_ipv4<I>(addrs: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = IpAddr>,
{
    addrs.into_iter().find_map(|addr| {
        if addr.is_loopback() {
            return None;
        }
        let v4 = match addr {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(v6) => v6.to_ipv4_mapped(),
        }?;
        (!v4.is_loopback()).then_some(v4)
    })
}

#[cfg(unix)]
fn interface_addrs() -> Vec<IpAddr> {
    let Ok(ifaddrs) = nix::ifaddrs::getifaddrs() else {
        return Vec::new();
    };

    ifaddrs
        .filter_map(|ifaddr| {
            let addr = ifaddr.address?;
            if let Some(sin) = addr.as_sockaddr_in() {
                Some(IpAddr::V4(sin.ip()))
            } else {
                addr.as_sockaddr_in6().map(|sin6| IpAddr::V6(sin6.ip()))
            }
        })
        .collect()
}

#[cfg(not(unix))]
fn interface_addrs() -> Vec<IpAddr> {
    Vec::new()
}
