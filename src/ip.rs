//! Partitions resolved addresses into public and internal space.
//! Candidates that only resolve into private or bogus space are never
//! dialled by the HTTP or content stages.

use serde::Serialize;

/// Addresses that can never identify a live squat.
static BOGUS_ADDRESSES: [&str; 5] = ["127.0.0.1", "0.0.0.0", "255.255.255.255", "::1", "localhost"];

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum IpFlag {
    Localhost,
    NullRoute,
    Private10,
    Private172,
    Private192,
}

/// The public/internal split for one candidate's address set.
#[derive(Clone, Debug, Default)]
pub struct IpClassification {
    pub public: Vec<String>,
    pub internal: Vec<String>,
    pub flags: Vec<IpFlag>,
}

/// Partition `ips` into public and internal sets. The two sets are
/// disjoint and their union is the input.
pub fn classify(ips: &[String]) -> IpClassification {
    let mut classification = IpClassification::default();

    for ip in ips {
        if is_bogus(ip) || is_private(ip) {
            classification.internal.push(ip.clone());
        } else {
            classification.public.push(ip.clone());
        }
    }

    let has = |prefix: &str| ips.iter().any(|ip| ip.starts_with(prefix));

    if ips.iter().any(|ip| ip == "127.0.0.1") {
        classification.flags.push(IpFlag::Localhost);
    }
    if ips.iter().any(|ip| ip == "0.0.0.0") {
        classification.flags.push(IpFlag::NullRoute);
    }
    if has("10.") {
        classification.flags.push(IpFlag::Private10);
    }
    if is_private_172_present(ips) {
        classification.flags.push(IpFlag::Private172);
    }
    if has("192.168.") {
        classification.flags.push(IpFlag::Private192);
    }

    classification
}

fn is_bogus(ip: &str) -> bool {
    BOGUS_ADDRESSES.contains(&ip)
}

fn is_private(ip: &str) -> bool {
    ip.starts_with("10.")
        || ip.starts_with("192.168.")
        || (16..=31).any(|block| ip.starts_with(&format!("172.{block}.")))
}

fn is_private_172_present(ips: &[String]) -> bool {
    ips.iter()
        .any(|ip| (16..=31).any(|block| ip.starts_with(&format!("172.{block}."))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(ips: &[&str]) -> Vec<String> {
        ips.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let ips = strings(&["10.0.0.5", "8.8.8.8", "172.20.1.1", "1.1.1.1"]);
        let c = classify(&ips);

        assert_eq!(c.public.len() + c.internal.len(), ips.len());
        for ip in &c.public {
            assert!(!c.internal.contains(ip));
        }
        assert_eq!(c.public, strings(&["8.8.8.8", "1.1.1.1"]));
        assert_eq!(c.internal, strings(&["10.0.0.5", "172.20.1.1"]));
    }

    #[test]
    fn test_private_ip_suppression_scenario() {
        let c = classify(&strings(&["10.0.0.5", "8.8.8.8"]));

        assert_eq!(c.public, strings(&["8.8.8.8"]));
        assert_eq!(c.internal, strings(&["10.0.0.5"]));
        assert!(c.flags.contains(&IpFlag::Private10));
    }

    #[test]
    fn test_localhost_flag() {
        let c = classify(&strings(&["127.0.0.1"]));

        assert!(c.public.is_empty());
        assert!(c.flags.contains(&IpFlag::Localhost));
    }

    #[test]
    fn test_172_range_boundaries() {
        assert!(is_private("172.16.0.1"));
        assert!(is_private("172.31.255.255"));
        assert!(!is_private("172.15.0.1"));
        assert!(!is_private("172.32.0.1"));
    }

    #[test]
    fn test_bogus_addresses() {
        for ip in BOGUS_ADDRESSES {
            assert!(is_bogus(ip));
        }
        assert!(!is_bogus("8.8.8.8"));
    }

    #[test]
    fn test_null_route_flag() {
        let c = classify(&strings(&["0.0.0.0", "192.168.1.1"]));

        assert!(c.flags.contains(&IpFlag::NullRoute));
        assert!(c.flags.contains(&IpFlag::Private192));
        assert!(c.public.is_empty());
    }
}
