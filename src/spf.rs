//! SPF record parsing. The parser extracts mechanisms and the lookup
//! budget from the first `v=spf1` TXT record and categorises
//! `include:` targets against the provider catalog. It records the
//! RFC 7208 lookup count but does not enforce the 10-lookup cap.

use crate::providers;
use serde::Serialize;
use std::collections::BTreeMap;

pub type Result<T> = std::result::Result<T, SpfError>;

#[derive(thiserror::Error, Clone, Copy, Debug)]
pub enum SpfError {
    #[error("No SPF record found")]
    NoRecord,
}

/// One parsed SPF mechanism. Serialized externally tagged, so an
/// include renders as `{"include": "_spf.google.com"}`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpfMechanism {
    Include(String),
    Ip4(String),
    Ip6(String),
    A(String),
    Mx(String),
    Unknown(String),
}

impl SpfMechanism {
    /// Whether evaluating this mechanism costs a DNS lookup.
    fn is_lookup(&self) -> bool {
        matches!(
            self,
            SpfMechanism::Include(_) | SpfMechanism::A(_) | SpfMechanism::Mx(_)
        )
    }
}

/// A provider matched (or not) from an `include:` target.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ProviderRef {
    pub name: String,
    pub domain: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SpfReport {
    pub version: String,
    pub mechanisms: Vec<SpfMechanism>,
    pub all_mechanism: String,
    pub includes: Vec<String>,
    pub lookup_count: usize,
    pub raw_record: String,
    pub providers_by_category: BTreeMap<String, Vec<ProviderRef>>,
}

static ALL_MECHANISMS: [&str; 4] = ["~all", "-all", "?all", "+all"];

/// Parse the first SPF record out of a candidate's TXT records.
pub fn parse(txt_records: &[String]) -> Result<SpfReport> {
    let record = txt_records
        .iter()
        .find(|r| r.starts_with("v=spf1"))
        .ok_or(SpfError::NoRecord)?;

    let mut mechanisms = Vec::new();
    let mut all_mechanism = None;

    // The first token is the version tag.
    for token in record.split(' ').skip(1).filter(|t| !t.is_empty()) {
        if ALL_MECHANISMS.contains(&token) {
            // Only the first `all` qualifier counts.
            all_mechanism.get_or_insert_with(|| token.to_string());
            continue;
        }

        mechanisms.push(parse_mechanism(token));
    }

    let includes: Vec<String> = mechanisms
        .iter()
        .filter_map(|m| match m {
            SpfMechanism::Include(target) => Some(target.clone()),
            _ => None,
        })
        .collect();

    let lookup_count = mechanisms.iter().filter(|m| m.is_lookup()).count();

    Ok(SpfReport {
        version: "spf1".to_string(),
        providers_by_category: categorize(&includes),
        all_mechanism: all_mechanism.unwrap_or_else(|| "~all".to_string()),
        includes,
        lookup_count,
        raw_record: record.clone(),
        mechanisms,
    })
}

fn parse_mechanism(token: &str) -> SpfMechanism {
    if let Some(target) = token.strip_prefix("include:") {
        SpfMechanism::Include(target.to_string())
    } else if let Some(network) = token.strip_prefix("ip4:") {
        SpfMechanism::Ip4(network.to_string())
    } else if let Some(network) = token.strip_prefix("ip6:") {
        SpfMechanism::Ip6(network.to_string())
    } else if let Some(target) = token.strip_prefix("a:") {
        SpfMechanism::A(target.to_string())
    } else if let Some(target) = token.strip_prefix("mx:") {
        SpfMechanism::Mx(target.to_string())
    } else if token == "a" {
        // Bare `a`/`mx` apply to the current domain and still cost a
        // lookup under the RFC 7208 budget.
        SpfMechanism::A(String::new())
    } else if token == "mx" {
        SpfMechanism::Mx(String::new())
    } else {
        SpfMechanism::Unknown(token.to_string())
    }
}

/// Group include targets by provider category. Targets with no
/// catalog entry land under `unknown`.
fn categorize(includes: &[String]) -> BTreeMap<String, Vec<ProviderRef>> {
    let mut by_category: BTreeMap<String, Vec<ProviderRef>> = BTreeMap::new();

    for include in includes {
        let base = base_domain(include);

        let (category, name) = match providers::find(&base) {
            Some(provider) => (provider.category.to_string(), provider.name.to_string()),
            None => ("unknown".to_string(), base),
        };

        by_category.entry(category).or_default().push(ProviderRef {
            name,
            domain: include.clone(),
        });
    }

    by_category
}

/// Last two dot-labels of an include target, with any leading
/// underscore (e.g. `_spf.google.com`) stripped first.
fn base_domain(include: &str) -> String {
    let trimmed = include.strip_prefix('_').unwrap_or(include);
    let labels: Vec<&str> = trimmed.split('.').collect();

    if labels.len() <= 2 {
        trimmed.to_string()
    } else {
        labels[labels.len() - 2..].join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_record() {
        let records = vec![
            "google-site-verification=xyz".to_string(),
            "v=spf1 include:_spf.google.com include:mail.example.com ip4:1.2.3.4 -all".to_string(),
        ];

        let report = parse(&records).unwrap();

        assert_eq!(report.lookup_count, 2);
        assert_eq!(report.all_mechanism, "-all");
        assert_eq!(
            report.includes,
            vec!["_spf.google.com".to_string(), "mail.example.com".to_string()]
        );
        assert_eq!(report.mechanisms.len(), 3);

        let google = &report.providers_by_category[providers::EMAIL_WORKSPACES];
        assert_eq!(google[0].name, "Google Workspace");
        assert_eq!(google[0].domain, "_spf.google.com");
    }

    #[test]
    fn test_missing_record() {
        let records = vec!["v=DMARC1; p=none".to_string()];

        assert!(matches!(parse(&records), Err(SpfError::NoRecord)));
    }

    #[test]
    fn test_all_mechanism_defaults_to_softfail() {
        let report = parse(&["v=spf1 include:sendgrid.net".to_string()]).unwrap();

        assert_eq!(report.all_mechanism, "~all");
    }

    #[test]
    fn test_bare_a_and_mx_count_as_lookups() {
        let report = parse(&["v=spf1 a mx include:mailgun.org ~all".to_string()]).unwrap();

        assert_eq!(report.lookup_count, 3);
        assert_eq!(report.mechanisms[0], SpfMechanism::A(String::new()));
        assert_eq!(report.mechanisms[1], SpfMechanism::Mx(String::new()));
    }

    #[test]
    fn test_ip_mechanisms_do_not_cost_lookups() {
        let report = parse(&["v=spf1 ip4:192.0.2.0/24 ip6:2001:db8::/32 -all".to_string()]).unwrap();

        assert_eq!(report.lookup_count, 0);
        assert_eq!(report.mechanisms.len(), 2);
    }

    #[test]
    fn test_unknown_token_is_preserved() {
        let report = parse(&["v=spf1 exists:%{i}.example.com -all".to_string()]).unwrap();

        assert_eq!(
            report.mechanisms[0],
            SpfMechanism::Unknown("exists:%{i}.example.com".to_string())
        );
        assert_eq!(report.lookup_count, 0);
    }

    #[test]
    fn test_unmatched_include_lands_in_unknown() {
        let report = parse(&["v=spf1 include:spf.bespoke-relay.example -all".to_string()]).unwrap();

        let unknown = &report.providers_by_category["unknown"];
        assert_eq!(unknown[0].name, "bespoke-relay.example");
        assert_eq!(unknown[0].domain, "spf.bespoke-relay.example");
    }

    #[test]
    fn test_base_domain_strips_leading_underscore() {
        assert_eq!(base_domain("_spf.google.com"), "google.com");
        assert_eq!(base_domain("sendgrid.net"), "sendgrid.net");
        assert_eq!(base_domain("a.b.c.mailgun.org"), "mailgun.org");
    }
}
