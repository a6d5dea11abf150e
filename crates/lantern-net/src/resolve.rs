//! Host name resolution.
//!
//! No resolution protocol is implemented: the literal name `localhost` maps
//! to the loopback address and anything else must be strict dotted-decimal.
//! This is a deliberate simplification surfaced to the caller as a
//! [`LanternError::Dns`] for any other hostname; the outcome is
//! authoritative -- no retry, no fallback.

use std::net::Ipv4Addr;

use lantern_types::error::{LanternError, Result};

/// Resolve a host string to an IPv4 address.
///
/// Accepts `"localhost"` or exactly four dot-separated decimal octets
/// (three separators, each part 0-255). Everything else fails.
pub fn resolve(host: &str) -> Result<Ipv4Addr> {
    if host == "localhost" {
        return Ok(Ipv4Addr::LOCALHOST);
    }

    let mut octets = [0u8; 4];
    let mut count = 0;
    for part in host.split('.') {
        if count == 4 {
            return Err(unresolved(host));
        }
        octets[count] = part.parse().map_err(|_| unresolved(host))?;
        count += 1;
    }
    if count != 4 {
        return Err(unresolved(host));
    }

    Ok(Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]))
}

fn unresolved(host: &str) -> LanternError {
    LanternError::Dns(format!("cannot resolve {host:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_is_loopback() {
        assert_eq!(resolve("localhost").unwrap(), Ipv4Addr::new(127, 0, 0, 1));
    }

    #[test]
    fn dotted_decimal_resolves() {
        assert_eq!(resolve("127.0.0.1").unwrap(), Ipv4Addr::LOCALHOST);
        assert_eq!(
            resolve("192.168.1.100").unwrap(),
            Ipv4Addr::new(192, 168, 1, 100)
        );
        assert_eq!(resolve("0.0.0.0").unwrap(), Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(
            resolve("255.255.255.255").unwrap(),
            Ipv4Addr::new(255, 255, 255, 255)
        );
    }

    #[test]
    fn hostnames_fail() {
        assert!(resolve("not-an-ip").is_err());
        assert!(resolve("example.com").is_err());
        assert!(resolve("LOCALHOST").is_err());
    }

    #[test]
    fn wrong_separator_count_fails() {
        assert!(resolve("1.2.3").is_err());
        assert!(resolve("1.2.3.4.5").is_err());
        assert!(resolve("1.2.3.").is_err());
        assert!(resolve(".1.2.3").is_err());
    }

    #[test]
    fn out_of_range_octet_fails() {
        assert!(resolve("256.0.0.1").is_err());
        assert!(resolve("1.2.3.999").is_err());
    }

    #[test]
    fn non_numeric_octet_fails() {
        assert!(resolve("a.b.c.d").is_err());
        assert!(resolve("1.2.3.4x").is_err());
        assert!(resolve("").is_err());
    }

    #[test]
    fn failure_is_dns_variant() {
        match resolve("nope") {
            Err(LanternError::Dns(msg)) => assert!(msg.contains("nope")),
            other => panic!("expected Dns error, got {other:?}"),
        }
    }
}
