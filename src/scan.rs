//! The scanning engine: a bounded-concurrency fan-out that runs every
//! candidate through the probe pipeline and folds the stage outputs
//! into one uniform record per candidate.
//!
//! Example:
//!
//! ```no_run
//! use squatscan::scan::{analyze_domain, ScanOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let results = analyze_domain("example.com", ScanOptions::default())
//!         .await
//!         .unwrap();
//!
//!     for result in results {
//!         println!("{} resolves to {:?}", result.fqdn, result.ip_addresses);
//!     }
//! }
//! ```

use crate::content::{self, ContentFingerprint, ContentScore};
use crate::dns::{DmarcReport, DnsProbe, MxRecord};
use crate::error::Error;
use crate::filter::Permissive;
use crate::fuzzy::{self, FuzzyScores};
use crate::http::{self, ServerResponse};
use crate::ip::{self, IpFlag};
use crate::permutate::{Domain, Permutation, PermutationKind};
use crate::spf::{self, SpfReport};
use crate::whois::{self, WhoisRecord};

use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, warn};

const SKIP_NO_PUBLIC_IPS: &str = "no public IPs";

/// Scan tuning knobs. The defaults favour breadth: twice the CPU
/// count in flight, fifteen seconds of wall clock per candidate.
#[derive(Clone, Copy, Debug)]
pub struct ScanOptions {
    pub max_concurrency: usize,
    pub timeout_per_candidate: Duration,
    /// Emit results in candidate input order.
    pub ordered: bool,
    /// Run the WHOIS/RDAP stage.
    pub whois: bool,
    /// Fetch the target page up front and score candidate content
    /// against it.
    pub content_hash: bool,
    /// Keep only candidates with at least one MX record.
    pub mx_only: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        let cpus = std::thread::available_parallelism().map_or(4, NonZeroUsize::get);

        Self {
            max_concurrency: cpus * 2,
            timeout_per_candidate: Duration::from_millis(15_000),
            ordered: false,
            whois: false,
            content_hash: false,
            mx_only: false,
        }
    }
}

/// One probed candidate. Every field is always present; stages that
/// failed or were skipped leave their typed empty value behind.
#[derive(Clone, Debug, Serialize)]
pub struct ScanResult {
    pub kind: PermutationKind,
    pub fqdn: String,
    pub tld: String,
    pub resolvable: bool,
    pub ip_addresses: Vec<String>,
    pub public_ips: Vec<String>,
    pub internal_ips: Vec<String>,
    pub ip_flags: Vec<IpFlag>,
    pub mx_records: Vec<MxRecord>,
    pub txt_records: Vec<String>,
    pub spf_records: Option<SpfReport>,
    pub dmarc: DmarcReport,
    pub nameservers: Vec<String>,
    pub wildcard: bool,
    pub server_response: ServerResponse,
    pub whois: Option<WhoisRecord>,
    pub content_hash: Option<ContentScore>,
    pub fuzzy: FuzzyScores,
}

impl ScanResult {
    /// Fresh record with every slot at its typed default; probe
    /// stages overwrite the slots they own.
    fn new(permutation: &Permutation) -> Self {
        ScanResult {
            kind: permutation.kind,
            fqdn: permutation.domain.fqdn.clone(),
            tld: permutation.domain.tld.clone(),
            resolvable: false,
            ip_addresses: Vec::new(),
            public_ips: Vec::new(),
            internal_ips: Vec::new(),
            ip_flags: Vec::new(),
            mx_records: Vec::new(),
            txt_records: Vec::new(),
            spf_records: None,
            dmarc: DmarcReport::default(),
            nameservers: Vec::new(),
            wildcard: false,
            server_response: ServerResponse::skipped(SKIP_NO_PUBLIC_IPS),
            whois: None,
            content_hash: None,
            fuzzy: FuzzyScores::default(),
        }
    }
}

/// Generate permutations for `domain` and scan them all.
pub async fn analyze_domain(domain: &str, options: ScanOptions) -> Result<Vec<ScanResult>, Error> {
    let parsed = Domain::new(domain)?;
    let candidates: Vec<Permutation> = parsed.all(&Permissive).collect();

    analyze_chunk(candidates, domain, options).await
}

/// [`analyze_domain`] restricted to mail-capable candidates.
pub async fn get_live_mx_domains(
    domain: &str,
    options: ScanOptions,
) -> Result<Vec<ScanResult>, Error> {
    analyze_domain(
        domain,
        ScanOptions {
            mx_only: true,
            ..options
        },
    )
    .await
}

/// Scan a caller-supplied candidate list against `target`. This is
/// the unit of work handed to remote workers when a scan is fanned
/// out across machines; locally it is the whole scan.
pub async fn analyze_chunk(
    candidates: Vec<Permutation>,
    target: &str,
    options: ScanOptions,
) -> Result<Vec<ScanResult>, Error> {
    let probe = Arc::new(DnsProbe::new().map_err(crate::dns::DnsError::from)?);

    // The target page is fetched once, before fan-out. Failure
    // disables the content stage rather than the scan.
    let fingerprint: Option<Arc<ContentFingerprint>> = if options.content_hash {
        match content::fetch_target(target).await {
            Ok(fingerprint) => Some(Arc::new(fingerprint)),
            Err(err) => {
                warn!(domain = target, error = %err, "target fingerprint failed, content stage disabled");
                None
            }
        }
    } else {
        None
    };

    let semaphore = Arc::new(Semaphore::new(options.max_concurrency.max(1)));
    let mut tasks: JoinSet<Option<(usize, ScanResult)>> = JoinSet::new();

    debug!(
        domain = target,
        candidates = candidates.len(),
        concurrency = options.max_concurrency,
        "starting scan"
    );

    for (index, candidate) in candidates.into_iter().enumerate() {
        let probe = Arc::clone(&probe);
        let semaphore = Arc::clone(&semaphore);
        let fingerprint = fingerprint.clone();
        let target = target.to_string();

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;

            let outcome = timeout(
                options.timeout_per_candidate,
                probe_candidate(
                    &probe,
                    &candidate,
                    &target,
                    fingerprint.as_deref(),
                    options,
                ),
            )
            .await;

            match outcome {
                Ok(Ok(result)) => Some((index, result)),
                Ok(Err(err)) => {
                    debug!(fqdn = %candidate.domain.fqdn, error = %err, "probe dropped");
                    None
                }
                Err(_) => {
                    debug!(fqdn = %candidate.domain.fqdn, "probe timed out");
                    None
                }
            }
        });
    }

    let mut results: Vec<(usize, ScanResult)> = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        if let Ok(Some((index, result))) = joined {
            if keep_result(&result, target, options.mx_only) {
                results.push((index, result));
            }
        }
    }

    if options.ordered {
        results.sort_by_key(|(index, _)| *index);
    }

    Ok(results.into_iter().map(|(_, result)| result).collect())
}

/// The emitted set never contains the target itself, and under
/// `mx_only` never contains mail-incapable candidates.
fn keep_result(result: &ScanResult, target: &str, mx_only: bool) -> bool {
    if result.fqdn == target {
        return false;
    }

    if mx_only && result.mx_records.is_empty() {
        return false;
    }

    true
}

/// Run the per-candidate stage pipeline. Only address resolution can
/// drop the probe; every later stage substitutes its typed default on
/// failure and the pipeline keeps going.
async fn probe_candidate(
    probe: &DnsProbe,
    candidate: &Permutation,
    target: &str,
    fingerprint: Option<&ContentFingerprint>,
    options: ScanOptions,
) -> crate::dns::Result<ScanResult> {
    let fqdn = candidate.domain.fqdn.as_str();

    let resolution = probe.resolve(fqdn, &candidate.domain.tld).await?;

    let mut record = ScanResult::new(candidate);
    record.resolvable = true;
    record.ip_addresses = resolution.ips;

    let classification = ip::classify(&record.ip_addresses);
    record.public_ips = classification.public;
    record.internal_ips = classification.internal;
    record.ip_flags = classification.flags;

    record.mx_records = probe.mx_records(fqdn).await.unwrap_or_default();
    record.txt_records = probe.txt_records(fqdn).await.unwrap_or_default();
    record.nameservers = probe.nameservers(fqdn).await.unwrap_or_default();
    record.dmarc = probe.dmarc(fqdn).await;
    record.wildcard = probe.wildcard(fqdn).await;

    record.spf_records = spf::parse(&record.txt_records).ok();

    // Private and bogus space is never dialled.
    record.server_response = if record.public_ips.is_empty() {
        ServerResponse::skipped(SKIP_NO_PUBLIC_IPS)
    } else {
        http::fingerprint(fqdn).await
    };

    if options.whois {
        record.whois = match whois::lookup(fqdn).await {
            Ok(whois_record) => Some(whois_record),
            Err(err) => {
                debug!(fqdn, error = %err, "whois stage failed");
                None
            }
        };
    }

    if let Some(fingerprint) = fingerprint {
        if !record.public_ips.is_empty() {
            record.content_hash = Some(content::compare(fqdn, fingerprint).await);
        }
    }

    record.fuzzy = fuzzy::score(target, fqdn);

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permutation(fqdn: &str, kind: PermutationKind) -> Permutation {
        Permutation {
            domain: Domain::new(fqdn).unwrap(),
            kind,
        }
    }

    #[test]
    fn test_default_options() {
        let options = ScanOptions::default();

        assert!(options.max_concurrency >= 2);
        assert_eq!(options.timeout_per_candidate, Duration::from_millis(15_000));
        assert!(!options.ordered);
        assert!(!options.whois);
        assert!(!options.content_hash);
        assert!(!options.mx_only);
    }

    #[test]
    fn test_new_record_defaults() {
        let record = ScanResult::new(&permutation("examp1e.com", PermutationKind::Homoglyph));

        assert_eq!(record.fqdn, "examp1e.com");
        assert_eq!(record.tld, "com");
        assert!(!record.resolvable);
        assert!(record.ip_addresses.is_empty());
        assert!(record.spf_records.is_none());
        assert!(record.whois.is_none());
        assert!(record.content_hash.is_none());
        assert!(matches!(
            record.server_response,
            ServerResponse::Skipped { .. }
        ));
        assert!(matches!(record.dmarc, DmarcReport::Missing { .. }));
    }

    #[test]
    fn test_target_is_always_filtered() {
        let record = ScanResult::new(&permutation("example.com", PermutationKind::Tld));

        assert!(!keep_result(&record, "example.com", false));
        assert!(keep_result(&record, "examp1e.com", false));
    }

    #[test]
    fn test_mx_only_filter() {
        let mut record = ScanResult::new(&permutation("examp1e.com", PermutationKind::Homoglyph));

        assert!(!keep_result(&record, "example.com", true));

        record.mx_records.push(MxRecord {
            priority: 10,
            server: "mail.examp1e.com".to_string(),
        });
        assert!(keep_result(&record, "example.com", true));
    }

    #[test]
    fn test_record_serializes_every_field() {
        let record = ScanResult::new(&permutation("examp1e.com", PermutationKind::Bitsquatting));
        let json = serde_json::to_value(&record).unwrap();

        for key in [
            "kind",
            "fqdn",
            "tld",
            "resolvable",
            "ip_addresses",
            "public_ips",
            "internal_ips",
            "ip_flags",
            "mx_records",
            "txt_records",
            "spf_records",
            "dmarc",
            "nameservers",
            "wildcard",
            "server_response",
            "whois",
            "content_hash",
            "fuzzy",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }

        assert_eq!(json["kind"], "Bitsquatting");
        assert_eq!(json["server_response"]["status"], "skipped");
        assert_eq!(json["dmarc"]["error"], "No DMARC record found");
    }
}
