//! Registration data lookups. RDAP is tried first: the IANA bootstrap
//! registry maps the TLD to a service base URL and the JSON response
//! carries structured registrar, event and contact data. Any RDAP
//! failure falls back to a classic WHOIS query over TCP/43 parsed
//! with line-oriented heuristics.

use crate::constants::{RDAP_BOOTSTRAP_URL, RDAP_CLIENT, WHOIS_SERVERS};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::OnceCell;
use tokio::time::{sleep, timeout};
use tracing::debug;

pub type Result<T> = std::result::Result<T, WhoisError>;

/// Sentinel for contacts whose vCard carries no identifying fields.
pub const REDACTED_BY_PROVIDER: &str = "Redacted by provider";

/// Sentinel for contact slots the WHOIS text protocol cannot fill.
pub const NOT_AVAILABLE_IN_WHOIS: &str = "Not available in WHOIS";

const WHOIS_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const WHOIS_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Substrings that mark a domain as unregistered in either protocol.
static AVAILABILITY_MARKERS: [&str; 3] = ["available", "no match", "not found"];

#[derive(thiserror::Error, Debug)]
pub enum WhoisError {
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    #[error("No WHOIS server for TLD: {0}")]
    NoServer(String),

    #[error("Domain not found in RDAP")]
    RdapNotFound,

    #[error("RDAP request failed: {0}")]
    Rdap(String),

    #[error("WHOIS query failed: {0}")]
    Query(String),
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WhoisSource {
    Rdap,
    Whois,
}

/// A contact slot: parsed details, or a sentinel explaining why there
/// are none. Serializes as either an object or a bare string.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ContactInfo {
    Details(Contact),
    Note(String),
}

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Contact {
    pub name: Option<String>,
    pub organization: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
}

/// Uniform registration record produced by either protocol.
#[derive(Clone, Debug, Serialize)]
pub struct WhoisRecord {
    pub domain: String,
    pub source: WhoisSource,
    pub raw_data: String,
    pub registered: bool,
    pub registrar: Option<String>,
    pub creation_date: Option<String>,
    pub expiration_date: Option<String>,
    pub updated_date: Option<String>,
    pub status: Option<Vec<String>>,
    pub nameservers: Option<Vec<String>>,
    pub registrant: Option<ContactInfo>,
    pub admin_contact: Option<ContactInfo>,
    pub tech_contact: Option<ContactInfo>,
    pub abuse_contact: Option<ContactInfo>,
}

/// IANA bootstrap registry: each service entry pairs a TLD list with
/// the RDAP base URLs serving them.
#[derive(Clone, Debug, Deserialize)]
pub struct RdapBootstrap {
    pub services: Vec<(Vec<String>, Vec<String>)>,
}

static BOOTSTRAP: OnceCell<RdapBootstrap> = OnceCell::const_new();

/// Look up a domain, RDAP first with WHOIS fallback.
pub async fn lookup(domain: &str) -> Result<WhoisRecord> {
    match rdap_lookup(domain).await {
        Ok(record) => Ok(record),
        Err(err) => {
            debug!(domain, error = %err, "rdap lookup failed, falling back to whois");
            whois_lookup(domain).await
        }
    }
}

/// Best-effort registration check on top of [`lookup`].
pub async fn is_registered(domain: &str) -> Result<bool> {
    registration_status(lookup(domain).await)
}

/// A successful lookup answers from the record's `registered` field,
/// which both protocols derive from their availability markers. A
/// failed lookup still counts as unregistered when the error text
/// carries one of those markers (e.g. an RDAP 404); anything else
/// surfaces as the error it is.
fn registration_status(outcome: Result<WhoisRecord>) -> Result<bool> {
    match outcome {
        Ok(record) => Ok(record.registered),
        Err(err) => {
            let message = err.to_string().to_lowercase();
            if AVAILABILITY_MARKERS.iter().any(|m| message.contains(m)) {
                Ok(false)
            } else {
                Err(err)
            }
        }
    }
}

fn tld_of(domain: &str) -> Result<String> {
    domain
        .rsplit('.')
        .next()
        .filter(|label| !label.is_empty())
        .map(str::to_lowercase)
        .ok_or_else(|| WhoisError::InvalidDomain(domain.to_string()))
}

// ---------------------------------------------------------------------------
// RDAP

async fn rdap_lookup(domain: &str) -> Result<WhoisRecord> {
    let tld = tld_of(domain)?;

    let bootstrap = bootstrap().await?;
    let base = rdap_base(bootstrap, &tld)
        .ok_or_else(|| WhoisError::Rdap(format!("no RDAP service for TLD: {tld}")))?;

    let url = if base.ends_with('/') {
        format!("{base}domain/{domain}")
    } else {
        format!("{base}/domain/{domain}")
    };

    let raw = get_with_retry(&url).await?;
    let json: Value =
        serde_json::from_str(&raw).map_err(|err| WhoisError::Rdap(err.to_string()))?;

    Ok(parse_rdap(domain, &raw, &json))
}

/// Fetch and cache the bootstrap registry. The cache lives for the
/// process; concurrent first callers race on a single fetch.
async fn bootstrap() -> Result<&'static RdapBootstrap> {
    BOOTSTRAP
        .get_or_try_init(|| async {
            let response = RDAP_CLIENT
                .get(RDAP_BOOTSTRAP_URL)
                .send()
                .await
                .map_err(|err| WhoisError::Rdap(format!("bootstrap fetch failed: {err}")))?;

            if !response.status().is_success() {
                return Err(WhoisError::Rdap(format!(
                    "bootstrap fetch failed with status {}",
                    response.status()
                )));
            }

            response
                .json::<RdapBootstrap>()
                .await
                .map_err(|err| WhoisError::Rdap(format!("bootstrap parse failed: {err}")))
        })
        .await
}

fn rdap_base<'a>(bootstrap: &'a RdapBootstrap, tld: &str) -> Option<&'a str> {
    bootstrap
        .services
        .iter()
        .find(|(tlds, _)| tlds.iter().any(|t| t.eq_ignore_ascii_case(tld)))
        .and_then(|(_, servers)| servers.first())
        .map(String::as_str)
}

/// GET with two transient retries and linear backoff (1s, 2s, capped
/// at 5s). HTTP-level failures are final.
async fn get_with_retry(url: &str) -> Result<String> {
    let mut attempt: u64 = 0;

    loop {
        match RDAP_CLIENT.get(url).send().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    return response
                        .text()
                        .await
                        .map_err(|err| WhoisError::Rdap(err.to_string()));
                }

                if status.as_u16() == 404 {
                    return Err(WhoisError::RdapNotFound);
                }

                return Err(WhoisError::Rdap(format!("unexpected status {status}")));
            }
            Err(err) if attempt < 2 => {
                attempt += 1;
                debug!(url, error = %err, attempt, "transient RDAP failure, retrying");
                sleep(Duration::from_secs(attempt.min(5))).await;
            }
            Err(err) => return Err(WhoisError::Rdap(err.to_string())),
        }
    }
}

fn parse_rdap(domain: &str, raw: &str, json: &Value) -> WhoisRecord {
    let entities = json.get("entities").and_then(Value::as_array);
    let events = json.get("events").and_then(Value::as_array);

    let status = json.get("status").and_then(Value::as_array).map(|statuses| {
        statuses
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect::<Vec<String>>()
    });

    let nameservers = json.get("nameservers").and_then(Value::as_array).map(|ns| {
        ns.iter()
            .filter_map(|entry| entry.get("ldhName").and_then(Value::as_str))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect::<Vec<String>>()
    });

    WhoisRecord {
        domain: domain.to_string(),
        source: WhoisSource::Rdap,
        raw_data: raw.to_string(),
        registered: true,
        registrar: registrar_name(entities),
        creation_date: event_date(events, "registration"),
        expiration_date: event_date(events, "expiration"),
        updated_date: event_date(events, "last changed"),
        status: status.filter(|s| !s.is_empty()),
        nameservers: nameservers.filter(|ns| !ns.is_empty()),
        registrant: find_entity(entities, "registrant").map(contact_from_entity),
        admin_contact: find_entity(entities, "administrative").map(contact_from_entity),
        tech_contact: find_entity(entities, "technical").map(contact_from_entity),
        abuse_contact: find_entity(entities, "abuse").map(contact_from_entity),
    }
}

fn event_date(events: Option<&Vec<Value>>, action: &str) -> Option<String> {
    events?.iter().find_map(|event| {
        let event_action = event.get("eventAction")?.as_str()?;

        if event_action.contains(action) {
            non_empty(event.get("eventDate")?.as_str())
        } else {
            None
        }
    })
}

fn entity_has_role(entity: &Value, role: &str) -> bool {
    entity
        .get("roles")
        .and_then(Value::as_array)
        .is_some_and(|roles| roles.iter().any(|r| r.as_str() == Some(role)))
}

/// Find an entity by role, first at the top level and then one level
/// into nested entities: abuse contacts commonly hang off the
/// registrar entity.
fn find_entity<'a>(entities: Option<&'a Vec<Value>>, role: &str) -> Option<&'a Value> {
    let entities = entities?;

    if let Some(entity) = entities.iter().find(|e| entity_has_role(e, role)) {
        return Some(entity);
    }

    entities.iter().find_map(|entity| {
        entity
            .get("entities")
            .and_then(Value::as_array)
            .and_then(|nested| nested.iter().find(|n| entity_has_role(n, role)))
    })
}

fn registrar_name(entities: Option<&Vec<Value>>) -> Option<String> {
    let registrar = find_entity(entities, "registrar")?;
    let properties = vcard_properties(registrar)?;

    properties.iter().find_map(|property| {
        match property_name(property)? {
            "fn" | "org" => non_empty(property_text(property)),
            _ => None,
        }
    })
}

// ---------------------------------------------------------------------------
// jCard (RFC 7095) walking
//
// Each property is a `[name, params, valueType, value]` quad, with
// value shapes varying by property; the helpers below only ever
// inspect shapes, never assume them.

fn vcard_properties(entity: &Value) -> Option<&Vec<Value>> {
    entity.get("vcardArray")?.get(1)?.as_array()
}

fn property_name(property: &Value) -> Option<&str> {
    property.get(0)?.as_str()
}

fn property_text(property: &Value) -> Option<&str> {
    property.get(3)?.as_str()
}

/// The `type` parameter may be a single string or an array of them.
fn property_types(property: &Value) -> Vec<String> {
    match property.get(1).and_then(|params| params.get("type")) {
        Some(Value::String(t)) => vec![t.to_lowercase()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn contact_from_entity(entity: &Value) -> ContactInfo {
    let mut contact = Contact::default();

    if let Some(properties) = vcard_properties(entity) {
        for property in properties {
            let Some(name) = property_name(property) else {
                continue;
            };

            match name {
                "fn" => fill(&mut contact.name, non_empty(property_text(property))),
                "org" => fill(&mut contact.organization, non_empty(property_text(property))),
                "email" => fill(&mut contact.email, non_empty(property_text(property))),
                "tel" => {
                    let value = non_empty(property_text(property));
                    if property_types(property).iter().any(|t| t == "fax") {
                        fill(&mut contact.fax, value);
                    } else {
                        fill(&mut contact.phone, value);
                    }
                }
                "adr" => {
                    if let Some(components) = property.get(3).and_then(Value::as_array) {
                        let parts: Vec<&str> = components
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::trim)
                            .filter(|part| !part.is_empty())
                            .collect();

                        if !parts.is_empty() {
                            fill(&mut contact.address, Some(parts.join(", ")));
                        }

                        let country =
                            non_empty(components.get(6).and_then(Value::as_str));
                        fill(&mut contact.country, country);
                    }
                }
                _ => {}
            }
        }
    }

    if contact.name.is_none() && contact.organization.is_none() && contact.address.is_none() {
        ContactInfo::Note(REDACTED_BY_PROVIDER.to_string())
    } else {
        ContactInfo::Details(contact)
    }
}

fn fill(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_none() {
        *slot = value;
    }
}

// ---------------------------------------------------------------------------
// WHOIS over TCP/43

async fn whois_lookup(domain: &str) -> Result<WhoisRecord> {
    let tld = tld_of(domain)?;

    let server = WHOIS_SERVERS
        .binary_search_by_key(&tld.as_str(), |&(t, _)| t)
        .ok()
        .map(|index| WHOIS_SERVERS[index].1)
        .ok_or(WhoisError::NoServer(tld))?;

    let raw = whois_query(server, domain).await?;
    Ok(parse_whois_text(domain, &raw))
}

async fn whois_query(server: &str, domain: &str) -> Result<String> {
    let mut stream = timeout(WHOIS_CONNECT_TIMEOUT, TcpStream::connect((server, 43)))
        .await
        .map_err(|_| WhoisError::Query(format!("connect to {server} timed out")))?
        .map_err(|err| WhoisError::Query(err.to_string()))?;

    stream
        .write_all(format!("{domain}\r\n").as_bytes())
        .await
        .map_err(|err| WhoisError::Query(err.to_string()))?;

    let mut raw = Vec::new();
    let mut chunk = [0_u8; 4096];

    loop {
        match timeout(WHOIS_IDLE_TIMEOUT, stream.read(&mut chunk)).await {
            Ok(Ok(n)) if n > 0 => raw.extend_from_slice(&chunk[..n]),
            Ok(Err(err)) if raw.is_empty() => return Err(WhoisError::Query(err.to_string())),
            // Close, a late read error, or the idle timeout some
            // registries rely on instead of closing the socket.
            _ => break,
        }
    }

    if raw.is_empty() {
        return Err(WhoisError::Query(format!("empty response from {server}")));
    }

    Ok(String::from_utf8_lossy(&raw).into_owned())
}

fn parse_whois_text(domain: &str, raw: &str) -> WhoisRecord {
    let lower = raw.to_lowercase();
    let registered = !AVAILABILITY_MARKERS.iter().any(|m| lower.contains(m));

    let not_available = || Some(ContactInfo::Note(NOT_AVAILABLE_IN_WHOIS.to_string()));

    WhoisRecord {
        domain: domain.to_string(),
        source: WhoisSource::Whois,
        raw_data: raw.to_string(),
        registered,
        registrar: field_value(raw, "registrar"),
        creation_date: field_value(raw, "creation date"),
        expiration_date: field_value(raw, "expir"),
        updated_date: field_value(raw, "updated date"),
        status: to_option(status_values(raw)),
        nameservers: to_option(nameserver_values(raw)),
        registrant: not_available(),
        admin_contact: not_available(),
        tech_contact: not_available(),
        abuse_contact: not_available(),
    }
}

/// First line containing the prefix wins; `expir` deliberately
/// matches both `Expiration Date` and `Expiry Date`.
fn field_value(raw: &str, prefix: &str) -> Option<String> {
    raw.lines()
        .find(|line| line.to_lowercase().contains(prefix))
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn status_values(raw: &str) -> Vec<String> {
    let mut statuses = Vec::new();

    for line in raw.lines() {
        let lower = line.to_lowercase();
        if !(lower.contains("status:") || lower.contains("domain status:")) {
            continue;
        }

        if let Some((_, value)) = line.split_once(':') {
            let token = value.trim().split(' ').next().unwrap_or("").to_string();
            if !token.is_empty() && !statuses.contains(&token) {
                statuses.push(token);
            }
        }
    }

    statuses
}

fn nameserver_values(raw: &str) -> Vec<String> {
    let mut nameservers = Vec::new();

    for line in raw.lines() {
        let lower = line.to_lowercase();
        if !(lower.contains("name server:") || lower.contains("nserver:")) {
            continue;
        }

        if let Some((_, value)) = line.split_once(':') {
            let name = value.trim().to_lowercase();
            if !name.is_empty() && !nameservers.contains(&name) {
                nameservers.push(name);
            }
        }
    }

    nameservers
}

fn to_option(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whois_server_table_is_searchable() {
        let index = WHOIS_SERVERS
            .binary_search_by_key(&"com", |&(t, _)| t)
            .unwrap();

        assert_eq!(WHOIS_SERVERS[index].1, "whois.verisign-grs.com");
    }

    #[test]
    fn test_tld_extraction() {
        assert_eq!(tld_of("example.com").unwrap(), "com");
        assert_eq!(tld_of("foo.bar.CO.UK").unwrap(), "uk");
        assert!(tld_of("example.").is_err());
    }

    #[test]
    fn test_rdap_base_selection() {
        let bootstrap = RdapBootstrap {
            services: vec![
                (
                    vec!["com".to_string(), "net".to_string()],
                    vec!["https://rdap.verisign.com/com/v1/".to_string()],
                ),
                (
                    vec!["org".to_string()],
                    vec!["https://rdap.publicinterestregistry.org/rdap/".to_string()],
                ),
            ],
        };

        assert_eq!(
            rdap_base(&bootstrap, "net").unwrap(),
            "https://rdap.verisign.com/com/v1/"
        );
        assert!(rdap_base(&bootstrap, "dev").is_none());
    }

    #[test]
    fn test_parse_rdap_full_record() {
        let json = json!({
            "status": ["client transfer prohibited"],
            "events": [
                {"eventAction": "registration", "eventDate": "1997-09-15T04:00:00Z"},
                {"eventAction": "expiration", "eventDate": "2028-09-14T04:00:00Z"},
                {"eventAction": "last changed", "eventDate": "2024-09-09T15:39:04Z"}
            ],
            "nameservers": [
                {"ldhName": "ns1.example.com"},
                {"ldhName": "ns2.example.com"},
                {"ldhName": ""}
            ],
            "entities": [{
                "roles": ["registrar"],
                "vcardArray": ["vcard", [
                    ["version", {}, "text", "4.0"],
                    ["fn", {}, "text", "MarkMonitor Inc."]
                ]],
                "entities": [{
                    "roles": ["abuse"],
                    "vcardArray": ["vcard", [
                        ["fn", {}, "text", "Abuse Desk"],
                        ["email", {}, "text", "abuse@registrar.example"],
                        ["tel", {"type": "voice"}, "uri", "tel:+1.5555550100"]
                    ]]
                }]
            }]
        });

        let record = parse_rdap("example.com", "{}", &json);

        assert_eq!(record.source, WhoisSource::Rdap);
        assert!(record.registered);
        assert_eq!(record.registrar.as_deref(), Some("MarkMonitor Inc."));
        assert_eq!(
            record.creation_date.as_deref(),
            Some("1997-09-15T04:00:00Z")
        );
        assert_eq!(
            record.expiration_date.as_deref(),
            Some("2028-09-14T04:00:00Z")
        );
        assert_eq!(
            record.updated_date.as_deref(),
            Some("2024-09-09T15:39:04Z")
        );
        assert_eq!(
            record.nameservers,
            Some(vec![
                "ns1.example.com".to_string(),
                "ns2.example.com".to_string()
            ])
        );

        // The abuse contact is nested inside the registrar entity.
        match record.abuse_contact.unwrap() {
            ContactInfo::Details(contact) => {
                assert_eq!(contact.name.as_deref(), Some("Abuse Desk"));
                assert_eq!(contact.email.as_deref(), Some("abuse@registrar.example"));
                assert_eq!(contact.phone.as_deref(), Some("tel:+1.5555550100"));
            }
            ContactInfo::Note(note) => panic!("expected details, got note {note:?}"),
        }
    }

    #[test]
    fn test_redacted_contact_substitution() {
        let json = json!({
            "entities": [{
                "roles": ["registrant"],
                "vcardArray": ["vcard", [
                    ["fn", {}, "text", ""],
                    ["email", {}, "text", "abuse@x"]
                ]]
            }]
        });

        let record = parse_rdap("example.com", "{}", &json);

        assert_eq!(
            record.registrant,
            Some(ContactInfo::Note(REDACTED_BY_PROVIDER.to_string()))
        );
    }

    #[test]
    fn test_contact_fax_type_as_string_or_array() {
        let entity = json!({
            "vcardArray": ["vcard", [
                ["fn", {}, "text", "Hostmaster"],
                ["tel", {"type": "fax"}, "uri", "tel:+1.5555550199"],
                ["tel", {"type": ["voice", "work"]}, "uri", "tel:+1.5555550100"]
            ]]
        });

        match contact_from_entity(&entity) {
            ContactInfo::Details(contact) => {
                assert_eq!(contact.fax.as_deref(), Some("tel:+1.5555550199"));
                assert_eq!(contact.phone.as_deref(), Some("tel:+1.5555550100"));
            }
            ContactInfo::Note(note) => panic!("expected details, got note {note:?}"),
        }
    }

    #[test]
    fn test_contact_address_flattening() {
        let entity = json!({
            "vcardArray": ["vcard", [
                ["adr", {}, "text", ["", "", "123 Squat Street", "Springfield", "", "12345", "US"]]
            ]]
        });

        match contact_from_entity(&entity) {
            ContactInfo::Details(contact) => {
                assert_eq!(
                    contact.address.as_deref(),
                    Some("123 Squat Street, Springfield, 12345, US")
                );
                assert_eq!(contact.country.as_deref(), Some("US"));
            }
            ContactInfo::Note(note) => panic!("expected details, got note {note:?}"),
        }
    }

    #[test]
    fn test_parse_whois_registered_record() {
        let raw = "\
Domain Name: EXAMPLE.COM\r
Registrar: Example Registrar, Inc.\r
Updated Date: 2024-08-14T07:01:31Z\r
Creation Date: 1995-08-14T04:00:00Z\r
Registry Expiry Date: 2025-08-13T04:00:00Z\r
Domain Status: clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited\r
Domain Status: clientTransferProhibited https://icann.org/epp#clientTransferProhibited\r
Name Server: A.IANA-SERVERS.NET\r
Name Server: B.IANA-SERVERS.NET\r
";

        let record = parse_whois_text("example.com", raw);

        assert!(record.registered);
        assert_eq!(record.source, WhoisSource::Whois);
        assert_eq!(record.registrar.as_deref(), Some("Example Registrar, Inc."));
        assert_eq!(
            record.creation_date.as_deref(),
            Some("1995-08-14T04:00:00Z")
        );
        // `expir` matches `Registry Expiry Date`.
        assert_eq!(
            record.expiration_date.as_deref(),
            Some("2025-08-13T04:00:00Z")
        );
        assert_eq!(
            record.status,
            Some(vec![
                "clientDeleteProhibited".to_string(),
                "clientTransferProhibited".to_string()
            ])
        );
        assert_eq!(
            record.nameservers,
            Some(vec![
                "a.iana-servers.net".to_string(),
                "b.iana-servers.net".to_string()
            ])
        );
        assert_eq!(
            record.registrant,
            Some(ContactInfo::Note(NOT_AVAILABLE_IN_WHOIS.to_string()))
        );
    }

    #[test]
    fn test_parse_whois_unregistered_record() {
        let record = parse_whois_text("nosuchdomain.com", "No match for \"NOSUCHDOMAIN.COM\".\r\n");

        assert!(!record.registered);
        assert!(record.status.is_none());
        assert!(record.nameservers.is_none());
    }

    #[test]
    fn test_is_registered_unregistered_whois_text() {
        // WHOIS "no match" responses carry no status array at all; the
        // decision has to come from the `registered` field.
        let record = parse_whois_text("nosuchdomain.com", "No match for \"NOSUCHDOMAIN.COM\".\r\n");

        assert!(record.status.is_none());
        assert!(!registration_status(Ok(record)).unwrap());
    }

    #[test]
    fn test_is_registered_registered_whois_text() {
        let record = parse_whois_text(
            "example.com",
            "Registrar: Example Registrar, Inc.\r\nDomain Status: ok\r\n",
        );

        assert!(registration_status(Ok(record)).unwrap());
    }

    #[test]
    fn test_is_registered_rdap_not_found() {
        // "Domain not found in RDAP" carries an availability marker.
        assert!(!registration_status(Err(WhoisError::RdapNotFound)).unwrap());
    }

    #[test]
    fn test_is_registered_surfaces_unrelated_errors() {
        let outcome = registration_status(Err(WhoisError::Query("connection refused".to_string())));

        assert!(outcome.is_err());
    }

    #[test]
    fn test_status_dedupe() {
        let raw = "status: ok\nstatus: ok\ndomain status: serverHold extra\n";

        assert_eq!(
            status_values(raw),
            vec!["ok".to_string(), "serverHold".to_string()]
        );
    }
}
