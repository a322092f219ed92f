use fancy_regex::Regex;
use phf::phf_map;

use std::time::Duration;

// Include the TLD dictionary, keyword dictionary and WHOIS server
// table that are generated during compile time from the data/ files.
include!(concat!(env!("OUT_DIR"), "/data.rs"));

/// Fixed desktop User-Agent presented during content fetches.
pub static DESKTOP_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// IANA bootstrap registry mapping TLDs to RDAP base URLs.
pub static RDAP_BOOTSTRAP_URL: &str = "https://data.iana.org/rdap/dns.json";

lazy_static! {
    /// Strips `<script>`/`<style>` blocks and HTML comments ahead of
    /// shingling. Non-greedy, dot matches newline.
    pub static ref HTML_BLOCK_REGEX: Regex =
        Regex::new("(?is)<script.*?</script>|<style.*?</style>|<!--.*?-->").unwrap();

    /// Presentation attributes that vary per-visit and carry no
    /// structural signal.
    pub static ref HTML_ATTR_REGEX: Regex = Regex::new(
        "(?i)\\s(?:id|class|style|onclick|onload|data-[a-z0-9-]*)\\s*=\\s*(?:\"[^\"]*\"|'[^']*'|[^\\s>]+)",
    )
    .unwrap();

    /// Link-bearing attributes whose values are rewritten to empty
    /// strings so that URL churn does not dominate the comparison.
    pub static ref HTML_URL_ATTR_REGEX: Regex =
        Regex::new("(?i)\\b(href|src|action)\\s*=\\s*(?:\"[^\"]*\"|'[^']*'|[^\\s>]+)").unwrap();

    /// Whitespace runs collapse to a single space.
    pub static ref WHITESPACE_REGEX: Regex = Regex::new("\\s+").unwrap();

    /// Opening-tag names, used by the structural similarity score.
    pub static ref HTML_TAG_REGEX: Regex = Regex::new("<([a-z][a-z0-9]*)").unwrap();

    /// Shared client for content fetches. Certificate validation is
    /// off: squatted pages routinely sit behind self-signed or
    /// mismatched certificates and we still want their markup.
    pub static ref CONTENT_CLIENT: reqwest::Client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .redirect(reqwest::redirect::Policy::limited(5))
        .danger_accept_invalid_certs(true)
        .user_agent(DESKTOP_USER_AGENT)
        .build()
        .expect("content client construction is infallible with static settings");

    /// Shared client for RDAP and bootstrap queries.
    pub static ref RDAP_CLIENT: reqwest::Client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .danger_accept_invalid_certs(true)
        .build()
        .expect("rdap client construction is infallible with static settings");
}

/// Static list of lowercase ASCII characters.
pub static ASCII_LOWER: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub static VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// QWERTY rows used by the keyboard-proximity scorer. Row index and
/// column index together form the coordinate of a key.
pub static QWERTY_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// QWERTY adjacency map used by the insertion and replacement
/// permutation modes.
pub static QWERTY_KEYBOARD_LAYOUT: phf::Map<char, &'static str> = phf_map! {
    '1' => "2q",
    '2' => "3wq1",
    '3' => "4ew2",
    '4' => "5re3",
    '5' => "6tr4",
    '6' => "7yt5",
    '7' => "8uy6",
    '8' => "9iu7",
    '9' => "0oi8",
    '0' => "po9",
    'q' => "12wa",
    'w' => "3esaq2",
    'e' => "4rdsw3",
    'r' => "5tfde4",
    't' => "6ygfr5",
    'y' => "7uhgt6",
    'u' => "8ijhy7",
    'i' => "9okju8",
    'o' => "0plki9",
    'p' => "lo0",
    'a' => "qwsz",
    's' => "edxzaw",
    'd' => "rfcxse",
    'f' => "tgvcdr",
    'g' => "yhbvft",
    'h' => "ujnbgy",
    'j' => "ikmnhu",
    'k' => "olmji",
    'l' => "kop",
    'z' => "asx",
    'x' => "zsdc",
    'c' => "xdfv",
    'v' => "cfgb",
    'b' => "vghn",
    'n' => "bhjm",
    'm' => "njk"
};

pub static HOMOGLYPHS: phf::Map<char, &'static str> = phf_map! {
    'a' => "àáâãäåɑạǎăȧą",
    'b' => "dʙɓḃḅḇƅ",
    'c' => "eƈċćçčĉo",
    'd' => "bɗđďɖḑḋḍḏḓ",
    'e' => "céèêëēĕěėẹęȩɇḛ",
    'f' => "ƒḟ",
    'g' => "qɢɡġğǵģĝǧǥ",
    'h' => "ĥȟħɦḧḩⱨḣḥḫẖ",
    'i' => "1líìïıɩǐĭỉịɨȋī",
    'j' => "ʝɉ",
    'k' => "ḳḵⱪķ",
    'l' => "1iɫł",
    'm' => "nṁṃᴍɱḿ",
    'n' => "mrńṅṇṉñņǹňꞑ",
    'o' => "0ȯọỏơóö",
    'p' => "ƿƥṕṗ",
    'q' => "gʠ",
    'r' => "ʀɼɽŕŗřɍɾȓȑṙṛṟ",
    's' => "ʂśṣṡșŝš",
    't' => "ţŧṫṭțƫ",
    'u' => "ᴜǔŭüʉùúûũūųưůűȕȗụ",
    'v' => "ṿⱱᶌṽⱴ",
    'w' => "ŵẁẃẅⱳẇẉẘ",
    'y' => "ʏýÿŷƴȳɏỿẏỵ",
    'z' => "ʐżźᴢƶẓẕⱬ"
};
