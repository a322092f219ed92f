//! Authoritative DNS probing for scan candidates: address resolution
//! with registry-wildcard detection, the auxiliary record sweeps (MX,
//! TXT, NS), DMARC discovery and wildcard-zone detection.

use hickory_resolver::proto::rr::RData;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::{Name, ResolveError, TokioResolver};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

pub type Result<T> = std::result::Result<T, DnsError>;

#[derive(thiserror::Error, Debug)]
pub enum DnsError {
    #[error("invalid domain name: {0}")]
    InvalidName(String),

    #[error("a-record lookup returned no records")]
    NoRecords,

    #[error("cname matches the candidate tld")]
    TldFalsePositive,

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Successful address resolution for a candidate.
#[derive(Clone, Debug)]
pub struct Resolution {
    pub ips: Vec<String>,
    pub cname: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct MxRecord {
    pub priority: u16,
    pub server: String,
}

/// DMARC discovery output. A missing record is data, not a failure:
/// the scan keeps the error payload in the record so callers can tell
/// "no DMARC" apart from "stage never ran".
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum DmarcReport {
    Record(BTreeMap<String, String>),
    Missing { error: String },
}

impl DmarcReport {
    fn missing() -> Self {
        DmarcReport::Missing {
            error: "No DMARC record found".to_string(),
        }
    }
}

impl Default for DmarcReport {
    fn default() -> Self {
        DmarcReport::missing()
    }
}

pub struct DnsProbe {
    inner: TokioResolver,
}

impl DnsProbe {
    /// Build a probe over the system resolver configuration.
    pub fn new() -> std::result::Result<Self, ResolveError> {
        Ok(Self {
            inner: TokioResolver::builder_tokio()?.build(),
        })
    }

    /// Query A records, returning dotted-quad strings. An empty answer
    /// is an error: unresolvable candidates are dropped from the scan.
    pub async fn a_lookup(&self, fqdn: &str) -> Result<Vec<String>> {
        let name = parse_name(fqdn)?;

        let ips: Vec<String> = match self.inner.ipv4_lookup(name).await {
            Ok(lookup) => lookup.into_iter().map(|a| a.0.to_string()).collect(),
            Err(err) if is_no_records(&err) => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        if ips.is_empty() {
            return Err(DnsError::NoRecords);
        }

        Ok(ips)
    }

    /// Resolve a candidate by querying CNAME and A in parallel.
    ///
    /// A CNAME whose target equals the candidate's TLD marks a
    /// registry wildcard that points every unregistered label at a
    /// TLD-owned page; those candidates are treated as unresolvable.
    pub async fn resolve(&self, fqdn: &str, tld: &str) -> Result<Resolution> {
        let (ips, cnames) = futures::join!(self.a_lookup(fqdn), self.cname_lookup(fqdn));

        let ips = ips?;
        let cname = cnames.unwrap_or_default().into_iter().next();

        match cname {
            Some(ref target) if target.as_str() == tld => Err(DnsError::TldFalsePositive),
            cname => Ok(Resolution { ips, cname }),
        }
    }

    async fn cname_lookup(&self, fqdn: &str) -> Result<Vec<String>> {
        let name = parse_name(fqdn)?;

        match self.inner.lookup(name, RecordType::CNAME).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .filter_map(|rdata| match rdata {
                    RData::CNAME(cname) => Some(strip_trailing_dot(&cname.0.to_utf8())),
                    _ => None,
                })
                .collect()),
            Err(err) if is_no_records(&err) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// MX records in resolver order. No records is not an error.
    pub async fn mx_records(&self, fqdn: &str) -> Result<Vec<MxRecord>> {
        let name = parse_name(fqdn)?;

        match self.inner.mx_lookup(name).await {
            Ok(lookup) => Ok(lookup
                .into_iter()
                .map(|mx| MxRecord {
                    priority: mx.preference(),
                    server: strip_trailing_dot(&mx.exchange().to_utf8()),
                })
                .collect()),
            Err(err) if is_no_records(&err) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// TXT records, one string per record with character-strings
    /// concatenated.
    pub async fn txt_records(&self, fqdn: &str) -> Result<Vec<String>> {
        let name = parse_name(fqdn)?;

        match self.inner.txt_lookup(name).await {
            Ok(lookup) => Ok(lookup
                .into_iter()
                .map(|txt| {
                    txt.txt_data()
                        .iter()
                        .map(|data| String::from_utf8_lossy(data).into_owned())
                        .collect::<String>()
                })
                .collect()),
            Err(err) if is_no_records(&err) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// NS hostnames, trailing dot stripped, deduplicated in order.
    pub async fn nameservers(&self, fqdn: &str) -> Result<Vec<String>> {
        let name = parse_name(fqdn)?;

        match self.inner.ns_lookup(name).await {
            Ok(lookup) => Ok(normalize_nameservers(
                lookup.into_iter().map(|ns| ns.0.to_utf8()),
            )),
            Err(err) if is_no_records(&err) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Query `_dmarc.<fqdn>` and parse the first DMARC record found.
    pub async fn dmarc(&self, fqdn: &str) -> DmarcReport {
        match self.txt_records(&format!("_dmarc.{fqdn}")).await {
            Ok(records) => parse_dmarc(&records),
            Err(_) => DmarcReport::missing(),
        }
    }

    /// Probe a random label under the candidate. Any answer means the
    /// zone wildcards every name.
    pub async fn wildcard(&self, fqdn: &str) -> bool {
        let probe = format!("{}.{}", random_label(), fqdn);
        self.a_lookup(&probe).await.is_ok()
    }
}

fn parse_name(fqdn: &str) -> Result<Name> {
    Name::from_utf8(fqdn).map_err(|err| DnsError::InvalidName(format!("{fqdn}: {err}")))
}

fn is_no_records(err: &ResolveError) -> bool {
    matches!(
        err.proto().map(|proto| proto.kind()),
        Some(ProtoErrorKind::NoRecordsFound { .. })
    )
}

fn strip_trailing_dot(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_string()
}

fn normalize_nameservers(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for name in names {
        let name = strip_trailing_dot(&name);
        if !out.contains(&name) {
            out.push(name);
        }
    }

    out
}

/// Parse the first `v=DMARC1` record into its key/value tags.
fn parse_dmarc(records: &[String]) -> DmarcReport {
    let Some(record) = records.iter().find(|r| r.starts_with("v=DMARC1")) else {
        return DmarcReport::missing();
    };

    let tags: BTreeMap<String, String> = record
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect();

    DmarcReport::Record(tags)
}

fn random_label() -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    let mut rng = rand::thread_rng();

    (0..24)
        .map(|_| char::from(HEX[rng.gen_range(0..HEX.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dmarc_record() {
        let records = vec![
            "some-verification=abc123".to_string(),
            "v=DMARC1; p=reject; rua=mailto:dmarc@example.com".to_string(),
        ];

        match parse_dmarc(&records) {
            DmarcReport::Record(tags) => {
                assert_eq!(tags.get("v").unwrap(), "DMARC1");
                assert_eq!(tags.get("p").unwrap(), "reject");
                assert_eq!(tags.get("rua").unwrap(), "mailto:dmarc@example.com");
            }
            DmarcReport::Missing { .. } => panic!("expected a parsed record"),
        }
    }

    #[test]
    fn test_parse_dmarc_absent() {
        let records = vec!["v=spf1 -all".to_string()];

        match parse_dmarc(&records) {
            DmarcReport::Missing { error } => assert_eq!(error, "No DMARC record found"),
            DmarcReport::Record(_) => panic!("expected a missing report"),
        }
    }

    #[test]
    fn test_parse_dmarc_trailing_separator() {
        let records = vec!["v=DMARC1; p=none;".to_string()];

        match parse_dmarc(&records) {
            DmarcReport::Record(tags) => {
                assert_eq!(tags.len(), 2);
                assert_eq!(tags.get("p").unwrap(), "none");
            }
            DmarcReport::Missing { .. } => panic!("expected a parsed record"),
        }
    }

    #[test]
    fn test_normalize_nameservers() {
        let names = vec![
            "ns1.example.com.".to_string(),
            "ns2.example.com.".to_string(),
            "ns1.example.com.".to_string(),
        ];

        assert_eq!(
            normalize_nameservers(names.into_iter()),
            vec!["ns1.example.com".to_string(), "ns2.example.com".to_string()]
        );
    }

    #[test]
    fn test_random_label_shape() {
        let label = random_label();

        assert_eq!(label.len(), 24);
        assert!(label.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
