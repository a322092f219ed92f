//! Candidate filtering. The generators validate every raw string into
//! a [`Domain`] before yielding it; a filter then decides whether the
//! candidate is worth scanning at all. A full generator run over the
//! baked-in TLD table produces tens of thousands of candidates, so
//! cutting uninteresting ones here is the cheapest cut there is.

use crate::permutate::Domain;

/// Predicate over generated candidates. Generators consult the filter
/// before yielding, so rejected candidates cost nothing downstream.
pub trait Filter {
    fn matches(&self, domain: &Domain) -> bool;
}

/// Keeps every candidate. Reconnaissance scans usually start here and
/// narrow down once the generator volume becomes a problem.
#[derive(Default, Copy, Clone)]
pub struct Permissive;

impl Filter for Permissive {
    fn matches(&self, _: &Domain) -> bool {
        true
    }
}

/// Keeps candidates that still carry one of the given brand tokens
/// somewhere in the FQDN. Bitsquatting and keyword modes in
/// particular emit plenty of strings a victim would never mistake for
/// the brand; requiring a recognisable token prunes them.
#[derive(Copy, Clone)]
pub struct BrandTokens<'a, S: AsRef<str>> {
    tokens: &'a [S],
}

impl<'a, S: AsRef<str>> BrandTokens<'a, S> {
    pub fn new(tokens: &'a [S]) -> Self {
        Self { tokens }
    }
}

impl<S: AsRef<str>> Filter for BrandTokens<'_, S> {
    fn matches(&self, domain: &Domain) -> bool {
        self.tokens
            .iter()
            .any(|token| domain.fqdn.contains(token.as_ref()))
    }
}

/// Keeps candidates whose effective TLD is in the allowlist. Pairs
/// with the `Tld` permutation mode, which otherwise fans out across
/// every TLD in the table.
#[derive(Copy, Clone)]
pub struct TldAllowlist<'a, S: AsRef<str>> {
    tlds: &'a [S],
}

impl<'a, S: AsRef<str>> TldAllowlist<'a, S> {
    pub fn new(tlds: &'a [S]) -> Self {
        Self { tlds }
    }
}

impl<S: AsRef<str>> Filter for TldAllowlist<'_, S> {
    fn matches(&self, domain: &Domain) -> bool {
        self.tlds.iter().any(|tld| domain.tld == tld.as_ref())
    }
}

/// Drops candidates whose FQDN exceeds a length ceiling. Keyword
/// prefixing on an already-long brand can push candidates well past
/// anything seen in live squatting campaigns.
#[derive(Copy, Clone)]
pub struct MaxLength(pub usize);

impl Filter for MaxLength {
    fn matches(&self, domain: &Domain) -> bool {
        domain.fqdn.len() <= self.0
    }
}

/// Conjunction of two filters; a candidate passes only when both
/// halves accept it.
#[derive(Copy, Clone)]
pub struct And<A, B>(pub A, pub B);

impl<A: Filter, B: Filter> Filter for And<A, B> {
    fn matches(&self, domain: &Domain) -> bool {
        self.0.matches(domain) && self.1.matches(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_accepts_everything() {
        let domain = Domain::new("wwwgoogle.com").unwrap();

        assert!(Permissive.matches(&domain));
    }

    #[test]
    fn test_brand_tokens() {
        let filter = BrandTokens::new(&["google", "goog1e"]);

        assert!(filter.matches(&Domain::new("goog1e-login.com").unwrap()));
        assert!(!filter.matches(&Domain::new("example.com").unwrap()));
    }

    #[test]
    fn test_tld_allowlist() {
        let filter = TldAllowlist::new(&["com", "co.uk"]);

        assert!(filter.matches(&Domain::new("example.co.uk").unwrap()));
        assert!(!filter.matches(&Domain::new("example.net").unwrap()));
    }

    #[test]
    fn test_max_length() {
        let filter = MaxLength(15);

        assert!(filter.matches(&Domain::new("example.com").unwrap()));
        assert!(!filter.matches(&Domain::new("login-example-secure.com").unwrap()));
    }

    #[test]
    fn test_and_composition() {
        let filter = And(BrandTokens::new(&["example"]), MaxLength(15));

        assert!(filter.matches(&Domain::new("example.com").unwrap()));
        // Carries the brand token but fails the length ceiling.
        assert!(!filter.matches(&Domain::new("login-example-secure.com").unwrap()));
    }
}
