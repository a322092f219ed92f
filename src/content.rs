//! Content similarity between the target site and a candidate. Pages
//! are fetched over HTTPS (falling back to HTTP), normalized down to
//! their structural skeleton, shingled and compared with a weighted
//! Jaccard/length/structure composite. Rendering and script execution
//! never happen; this is a bytes-in, score-out pipeline.

use crate::constants::{
    CONTENT_CLIENT, HTML_ATTR_REGEX, HTML_BLOCK_REGEX, HTML_TAG_REGEX, HTML_URL_ATTR_REGEX,
    WHITESPACE_REGEX,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

pub type Result<T> = std::result::Result<T, ContentError>;

const SHINGLE_SIZE: usize = 5;

#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("failed to fetch content for {domain}: {reason}")]
    Fetch { domain: String, reason: String },
}

/// Pre-computed representation of the scan target's landing page,
/// built once per scan and shared read-only across probes.
#[derive(Clone, Debug)]
pub struct ContentFingerprint {
    pub domain: String,
    pub content: String,
    pub shingles: HashSet<String>,
    pub length: usize,
}

/// Composite similarity score for one candidate, in `[0, 100]`.
#[derive(Clone, Debug, Serialize)]
pub struct ContentScore {
    pub score: u32,
    pub details: SimilarityDetails,
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum SimilarityDetails {
    Breakdown {
        jaccard: f64,
        length_ratio: f64,
        structure: f64,
    },
    Failed {
        error: String,
    },
}

impl ContentScore {
    fn fetch_failed() -> Self {
        ContentScore {
            score: 0,
            details: SimilarityDetails::Failed {
                error: "fetch_failed".to_string(),
            },
        }
    }
}

/// Fetch and fingerprint the scan target. Called once before fan-out;
/// a failure here disables the content stage for the whole run rather
/// than failing the scan.
pub async fn fetch_target(domain: &str) -> Result<ContentFingerprint> {
    let body = fetch(domain).await?;
    let content = normalize(&body);

    Ok(ContentFingerprint {
        domain: domain.to_string(),
        shingles: shingles(&content),
        length: content.chars().count(),
        content,
    })
}

/// Fetch a candidate and score it against the target fingerprint.
/// Fetch failures stay in-band as a zero score.
pub async fn compare(domain: &str, fingerprint: &ContentFingerprint) -> ContentScore {
    match fetch(domain).await {
        Ok(body) => similarity(fingerprint, &normalize(&body)),
        Err(err) => {
            debug!(domain, error = %err, "content fetch failed");
            ContentScore::fetch_failed()
        }
    }
}

/// Try `https://` then `http://`; accept any 2xx body.
async fn fetch(domain: &str) -> Result<String> {
    let mut reason = String::new();

    for scheme in ["https", "http"] {
        let url = format!("{scheme}://{domain}");

        match CONTENT_CLIENT.get(&url).send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(body) => return Ok(body),
                Err(err) => reason = err.to_string(),
            },
            Ok(response) => reason = format!("unexpected status {}", response.status()),
            Err(err) => reason = err.to_string(),
        }
    }

    Err(ContentError::Fetch {
        domain: domain.to_string(),
        reason,
    })
}

/// Reduce markup to a comparable skeleton: drop scripts, styles and
/// comments, strip presentation attributes, blank out link targets
/// and collapse whitespace.
pub fn normalize(html: &str) -> String {
    let lowered = html.to_lowercase();
    let blocks = HTML_BLOCK_REGEX.replace_all(&lowered, "");
    let attrs = HTML_ATTR_REGEX.replace_all(&blocks, "");
    let urls = HTML_URL_ATTR_REGEX.replace_all(&attrs, "${1}=\"\"");
    let collapsed = WHITESPACE_REGEX.replace_all(&urls, " ");

    collapsed.trim().to_string()
}

/// Fixed-size character windows over the normalized document.
/// Incomplete trailing windows are discarded.
pub fn shingles(content: &str) -> HashSet<String> {
    let chars: Vec<char> = content.chars().collect();

    chars
        .windows(SHINGLE_SIZE)
        .map(|window| window.iter().collect())
        .collect()
}

fn similarity(fingerprint: &ContentFingerprint, candidate: &str) -> ContentScore {
    let candidate_shingles = shingles(candidate);

    let jaccard = jaccard_score(&fingerprint.shingles, &candidate_shingles);
    let length_ratio = length_ratio(fingerprint.length, candidate.chars().count());
    let structure = structure_score(&fingerprint.content, candidate);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = (0.6 * jaccard + 0.2 * length_ratio + 0.2 * structure).round() as u32;

    ContentScore {
        score,
        details: SimilarityDetails::Breakdown {
            jaccard,
            length_ratio,
            structure,
        },
    }
}

#[allow(clippy::cast_precision_loss)]
fn jaccard_score(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();

    if union == 0 {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64 * 100.0
}

#[allow(clippy::cast_precision_loss)]
fn length_ratio(a: usize, b: usize) -> f64 {
    if a == 0 || b == 0 {
        return 0.0;
    }

    a.min(b) as f64 / a.max(b) as f64 * 100.0
}

/// Compare tag frequency profiles: per tag seen in either document,
/// the ratio of the rarer count to the commoner count, averaged.
#[allow(clippy::cast_precision_loss)]
fn structure_score(a: &str, b: &str) -> f64 {
    let counts_a = tag_counts(a);
    let counts_b = tag_counts(b);

    let tags: HashSet<&String> = counts_a.keys().chain(counts_b.keys()).collect();

    if tags.is_empty() {
        // No markup on either side reads as identical structure.
        return 100.0;
    }

    let total: f64 = tags
        .iter()
        .map(|tag| {
            let x = *counts_a.get(*tag).unwrap_or(&0);
            let y = *counts_b.get(*tag).unwrap_or(&0);

            if x == 0 && y == 0 {
                1.0
            } else {
                x.min(y) as f64 / x.max(y) as f64
            }
        })
        .sum();

    total / tags.len() as f64 * 100.0
}

fn tag_counts(content: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();

    for captures in HTML_TAG_REGEX.captures_iter(content).flatten() {
        if let Some(tag) = captures.get(1) {
            *counts.entry(tag.as_str().to_string()).or_insert(0) += 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint_of(content: &str) -> ContentFingerprint {
        ContentFingerprint {
            domain: "example.com".to_string(),
            shingles: shingles(content),
            length: content.chars().count(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_normalize_strips_script_style_and_comments() {
        let html = "<html><script>alert(1)\n</script><style>.x{}</style><!-- note\n --><body>Hi</body></html>";

        assert_eq!(normalize(html), "<html><body>hi</body></html>");
    }

    #[test]
    fn test_normalize_strips_presentation_attributes() {
        let html = r#"<div id="main" class='big' data-test=1 onclick="go()">x</div>"#;

        assert_eq!(normalize(html), "<div>x</div>");
    }

    #[test]
    fn test_normalize_blanks_link_targets() {
        let html = r#"<a href="https://evil.example/p">x</a><img src='/l.png'>"#;

        assert_eq!(normalize(html), r#"<a href="">x</a><img src="">"#);
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  a \n\n  b\t c  "), "a b c");
    }

    #[test]
    fn test_shingles_window() {
        let set = shingles("abcdef");

        assert_eq!(set.len(), 2);
        assert!(set.contains("abcde"));
        assert!(set.contains("bcdef"));
        // Shorter inputs produce no complete window.
        assert!(shingles("abcd").is_empty());
    }

    #[test]
    fn test_jaccard_identical_and_disjoint() {
        let a = shingles("abcdefgh");
        let b = shingles("abcdefgh");
        let c = shingles("zyxwvuts");

        assert_eq!(jaccard_score(&a, &b), 100.0);
        assert_eq!(jaccard_score(&a, &c), 0.0);
        assert_eq!(jaccard_score(&HashSet::new(), &HashSet::new()), 0.0);
    }

    #[test]
    fn test_length_ratio_zero_lengths() {
        assert_eq!(length_ratio(0, 100), 0.0);
        assert_eq!(length_ratio(100, 0), 0.0);
        assert_eq!(length_ratio(50, 100), 50.0);
    }

    #[test]
    fn test_structure_score_identical_markup() {
        let doc = "<html><body><div>x</div><div>y</div></body></html>";

        assert_eq!(structure_score(doc, doc), 100.0);
    }

    #[test]
    fn test_structure_score_without_markup() {
        assert_eq!(structure_score("plain text", "other text"), 100.0);
    }

    #[test]
    fn test_structure_score_partial_overlap() {
        // Both have one <html>; only one has a <table>.
        let a = "<html><table></table></html>";
        let b = "<html></html>";
        let score = structure_score(a, b);

        assert!(score > 0.0 && score < 100.0);
    }

    #[test]
    fn test_composite_score_bounds_and_rounding() {
        let fp = fingerprint_of("<html><body>hello world</body></html>");

        let identical = similarity(&fp, &fp.content);
        assert_eq!(identical.score, 100);

        let disjoint = similarity(&fp, "");
        assert!(disjoint.score <= 100);
    }

    #[test]
    fn test_fetch_failed_score() {
        let score = ContentScore::fetch_failed();

        assert_eq!(score.score, 0);
        match score.details {
            SimilarityDetails::Failed { ref error } => assert_eq!(error, "fetch_failed"),
            SimilarityDetails::Breakdown { .. } => panic!("expected a failure payload"),
        }
    }
}
