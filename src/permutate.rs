//! Candidate generation: every scan starts from a finite set of
//! lookalike variants of the target domain. Each generator is a lazy
//! iterator; candidates are validated and filtered before they are
//! handed to the scanning pipeline.
//!
//! Example:
//!
//! ```
//! use squatscan::{
//!   permutate::{Domain, Permutation},
//!   filter::{Filter, Permissive},
//! };
//!
//! let domain = Domain::new("google.com").unwrap();
//! let candidates: Vec<Permutation> = domain.all(&Permissive).collect();
//! ```

use crate::constants::{ASCII_LOWER, HOMOGLYPHS, KEYWORDS, QWERTY_KEYBOARD_LAYOUT, TLDS, VOWELS};
use crate::error::Error;
use crate::filter::Filter;

use addr::parser::DomainName;
use addr::psl::List;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Wrapper around an FQDN to generate permutations against.
#[derive(Clone, Hash, Default, Debug, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd)]
pub struct Domain {
    /// The full domain name (e.g. `google.com`).
    pub fqdn: String,

    /// The effective top-level domain (e.g. `com`, `co.uk`).
    pub tld: String,

    /// The registrable label (e.g. `google`).
    pub domain: String,
}

/// One generated variant, tagged with the strategy that produced it.
#[derive(Clone, Debug, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Permutation {
    pub domain: Domain,
    pub kind: PermutationKind,
}

#[derive(Clone, Copy, Serialize, Deserialize, Hash, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum PermutationKind {
    Addition,
    Bitsquatting,
    Homoglyph,
    Hyphenation,
    Insertion,
    Keyword,
    Omission,
    Repetition,
    Replacement,
    Subdomain,
    Tld,
    Transposition,
    VowelSwap,
}

#[derive(Clone, thiserror::Error, Debug)]
pub enum PermutationError {
    #[error("invalid domain name, (expected {expected:?}, found {found:?})")]
    InvalidDomain { expected: String, found: String },
}

impl Domain {
    /// Parse and validate an FQDN. The effective TLD must appear in
    /// the baked-in TLD table; the table is sorted at build time so a
    /// binary search is sound.
    pub fn new(fqdn: &str) -> Result<Domain, Error> {
        let (root, tld) = Self::parse(fqdn)?;

        if TLDS.binary_search(&tld.as_str()).is_err() {
            return Err(PermutationError::InvalidDomain {
                expected: "a tld present in the baked-in tld table".to_string(),
                found: tld,
            }
            .into());
        }

        Ok(Domain {
            fqdn: fqdn.to_string(),
            domain: Self::label(&root, fqdn)?,
            tld,
        })
    }

    /// Like [`Domain::new`] but skips the TLD table check, for callers
    /// that deal in domains with exotic suffixes.
    pub fn raw(fqdn: &str) -> Result<Domain, Error> {
        let (root, tld) = Self::parse(fqdn)?;

        Ok(Domain {
            fqdn: fqdn.to_string(),
            domain: Self::label(&root, fqdn)?,
            tld,
        })
    }

    fn parse(fqdn: &str) -> Result<(String, String), Error> {
        let parsed = List
            .parse_domain_name(fqdn)
            .map_err(|_| PermutationError::InvalidDomain {
                expected: "a parseable domain name".to_string(),
                found: fqdn.to_string(),
            })?;

        let root = parsed.root().ok_or(PermutationError::InvalidDomain {
            expected: "a domain name with a registrable root".to_string(),
            found: fqdn.to_string(),
        })?;

        Ok((root.to_string(), parsed.suffix().to_string()))
    }

    fn label(root: &str, fqdn: &str) -> Result<String, Error> {
        root.find('.')
            .and_then(|offset| root.get(..offset))
            .map(str::to_string)
            // `root` always contains a dot separating label and suffix
            .ok_or_else(|| {
                PermutationError::InvalidDomain {
                    expected: "a domain name with a registrable root".to_string(),
                    found: fqdn.to_string(),
                }
                .into()
            })
    }

    /// Chain every permutation mode into a single iterator.
    pub fn all<'a>(&'a self, filter: &'a impl Filter) -> impl Iterator<Item = Permutation> + 'a {
        self.addition(filter)
            .chain(self.bitsquatting(filter))
            .chain(self.homoglyph(filter))
            .chain(self.hyphenation(filter))
            .chain(self.insertion(filter))
            .chain(self.omission(filter))
            .chain(self.repetition(filter))
            .chain(self.replacement(filter))
            .chain(self.subdomain(filter))
            .chain(self.transposition(filter))
            .chain(self.vowel_swap(filter))
            .chain(self.keyword(filter))
            .chain(self.tld(filter))
    }

    /// Append every lowercase ASCII character between the label and
    /// the TLD (e.g. `googlea.com`).
    pub fn addition<'a>(
        &'a self,
        filter: &'a impl Filter,
    ) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                ASCII_LOWER
                    .iter()
                    .map(move |c| format!("{}{}.{}", self.domain, c, self.tld))
            },
            PermutationKind::Addition,
            filter,
        )
    }

    /// XOR each character against eight single-bit masks and keep the
    /// results that stay within the DNS-safe ASCII range. Models
    /// single-bit memory errors; see <https://dinaburg.org/bitsquatting.html>.
    pub fn bitsquatting<'a>(
        &'a self,
        filter: &'a impl Filter,
    ) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                self.fqdn
                    .chars()
                    .flat_map(move |c| {
                        (0..8).filter_map(move |mask_index| {
                            let mask: u8 = 1 << mask_index;
                            let squatted = mask ^ (c as u8);

                            if squatted.is_ascii_lowercase()
                                || squatted.is_ascii_digit()
                                || squatted == b'-'
                            {
                                Some((1..self.fqdn.len()).filter_map(move |idx| {
                                    self.fqdn.is_char_boundary(idx).then(|| {
                                        let mut candidate = self.fqdn.clone();
                                        candidate.insert(idx, squatted as char);
                                        candidate
                                    })
                                }))
                            } else {
                                None
                            }
                        })
                    })
                    .flatten()
            },
            PermutationKind::Bitsquatting,
            filter,
        )
    }

    /// Swap individual characters for visually confusable glyphs.
    pub fn homoglyph<'a>(
        &'a self,
        filter: &'a impl Filter,
    ) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                let fqdn = self.fqdn.as_str();
                fqdn.char_indices()
                    .filter_map(move |(idx, c)| HOMOGLYPHS.get(&c).map(move |glyphs| (idx, c, glyphs)))
                    .flat_map(move |(idx, c, glyphs)| {
                        let next = idx + c.len_utf8();
                        glyphs.chars().map(move |g| {
                            let mut out = String::with_capacity(fqdn.len() + g.len_utf8());
                            out.push_str(&fqdn[..idx]);
                            out.push(g);
                            out.push_str(&fqdn[next..]);
                            out
                        })
                    })
            },
            PermutationKind::Homoglyph,
            filter,
        )
    }

    /// Insert a hyphen at each interior position.
    pub fn hyphenation<'a>(
        &'a self,
        filter: &'a impl Filter,
    ) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                (1..self.fqdn.len()).filter_map(move |idx| {
                    self.fqdn.is_char_boundary(idx).then(|| {
                        let mut candidate = self.fqdn.clone();
                        candidate.insert(idx, '-');
                        candidate
                    })
                })
            },
            PermutationKind::Hyphenation,
            filter,
        )
    }

    /// Insert characters adjacent on a QWERTY keyboard next to the
    /// character they neighbour (fat-finger doubles).
    pub fn insertion<'a>(
        &'a self,
        filter: &'a impl Filter,
    ) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                self.fqdn
                    .char_indices()
                    // Skip the first and last characters.
                    .filter(move |(idx, _)| *idx > 0 && idx + 1 < self.fqdn.len())
                    .filter_map(move |(idx, c)| {
                        QWERTY_KEYBOARD_LAYOUT
                            .get(&c)
                            .map(move |neighbours| (idx, neighbours))
                    })
                    .flat_map(move |(idx, neighbours)| {
                        neighbours.chars().map(move |neighbour| {
                            let mut candidate = self.fqdn.clone();
                            candidate.insert(idx, neighbour);
                            candidate
                        })
                    })
            },
            PermutationKind::Insertion,
            filter,
        )
    }

    /// Drop one character at a time.
    pub fn omission<'a>(
        &'a self,
        filter: &'a impl Filter,
    ) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                self.fqdn.char_indices().map(move |(idx, c)| {
                    let mut candidate = self.fqdn.clone();
                    candidate.replace_range(idx..idx + c.len_utf8(), "");
                    candidate
                })
            },
            PermutationKind::Omission,
            filter,
        )
    }

    /// Double each alphabetic character (e.g. `gooogle.com`).
    pub fn repetition<'a>(
        &'a self,
        filter: &'a impl Filter,
    ) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                self.fqdn.char_indices().filter_map(move |(idx, c)| {
                    c.is_alphabetic().then(|| {
                        let mut candidate = self.fqdn.clone();
                        candidate.insert(idx, c);
                        candidate
                    })
                })
            },
            PermutationKind::Repetition,
            filter,
        )
    }

    /// Replace characters with their QWERTY neighbours.
    pub fn replacement<'a>(
        &'a self,
        filter: &'a impl Filter,
    ) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                self.fqdn
                    .char_indices()
                    .filter(move |(idx, _)| *idx > 0 && idx + 1 < self.fqdn.len())
                    .filter_map(move |(idx, c)| {
                        QWERTY_KEYBOARD_LAYOUT
                            .get(&c)
                            .map(move |neighbours| (idx, c, neighbours))
                    })
                    .flat_map(move |(idx, c, neighbours)| {
                        neighbours.chars().map(move |neighbour| {
                            let mut candidate = self.fqdn.clone();
                            candidate.replace_range(idx..idx + c.len_utf8(), "");
                            candidate.insert(idx, neighbour);
                            candidate
                        })
                    })
            },
            PermutationKind::Replacement,
            filter,
        )
    }

    /// Promote interior positions to subdomain boundaries
    /// (e.g. `goo.gle.com`).
    pub fn subdomain<'a>(
        &'a self,
        filter: &'a impl Filter,
    ) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                self.fqdn
                    .chars()
                    .take(self.fqdn.len().saturating_sub(3))
                    .enumerate()
                    .tuple_windows()
                    .filter_map(move |((_, c1), (i2, c2))| {
                        if ['-', '.'].iter().all(|x| [c1, c2].contains(x)) {
                            None
                        } else {
                            Some(format!("{}.{}", &self.fqdn[..i2], &self.fqdn[i2..]))
                        }
                    })
            },
            PermutationKind::Subdomain,
            filter,
        )
    }

    /// Swap adjacent characters (e.g. `goolge.com`).
    pub fn transposition<'a>(
        &'a self,
        filter: &'a impl Filter,
    ) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                self.fqdn.chars().enumerate().tuple_windows().filter_map(
                    move |((i1, c1), (i2, c2))| {
                        if c1 == c2 {
                            None
                        } else {
                            Some(format!(
                                "{}{}{}{}",
                                &self.fqdn[..i1],
                                c2,
                                c1,
                                &self.fqdn[i2 + 1..]
                            ))
                        }
                    },
                )
            },
            PermutationKind::Transposition,
            filter,
        )
    }

    /// Swap each vowel for the other four vowels.
    pub fn vowel_swap<'a>(
        &'a self,
        filter: &'a impl Filter,
    ) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                self.fqdn
                    .char_indices()
                    .filter(|(_, c)| VOWELS.contains(&c.to_ascii_lowercase()))
                    .flat_map(move |(idx, c)| {
                        VOWELS.iter().filter_map(move |vowel| {
                            if *vowel == c {
                                None
                            } else {
                                Some(format!(
                                    "{}{}{}",
                                    &self.fqdn[..idx],
                                    vowel,
                                    &self.fqdn[idx + c.len_utf8()..]
                                ))
                            }
                        })
                    })
            },
            PermutationKind::VowelSwap,
            filter,
        )
    }

    /// Prepend and append common phishing keywords, with and without a
    /// separating hyphen (e.g. `login-google.com`, `googlemail.com`).
    pub fn keyword<'a>(
        &'a self,
        filter: &'a impl Filter,
    ) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                KEYWORDS.iter().flat_map(move |keyword| {
                    [
                        format!("{}-{}.{}", &self.domain, keyword, &self.tld),
                        format!("{}{}.{}", &self.domain, keyword, &self.tld),
                        format!("{}-{}.{}", keyword, &self.domain, &self.tld),
                        format!("{}{}.{}", keyword, &self.domain, &self.tld),
                    ]
                    .into_iter()
                })
            },
            PermutationKind::Keyword,
            filter,
        )
    }

    /// Pair the registrable label with every other known TLD.
    pub fn tld<'a>(&'a self, filter: &'a impl Filter) -> impl Iterator<Item = Permutation> + 'a {
        Self::permutation(
            move || {
                TLDS.iter()
                    .filter(move |tld| **tld != self.tld)
                    .map(move |tld| format!("{}.{}", &self.domain, tld))
            },
            PermutationKind::Tld,
            filter,
        )
    }

    /// Wraps each generator to validate candidates as real domain
    /// names and run them through the caller's filter.
    fn permutation<'a, S, T: Fn() -> S + 'a, U: Filter + 'a>(
        f: T,
        kind: PermutationKind,
        filter: &'a U,
    ) -> impl Iterator<Item = Permutation> + 'a
    where
        S: Iterator<Item = String> + 'a,
    {
        f().filter_map(move |candidate| {
            if let Ok(domain) = Domain::new(candidate.as_str()) {
                if filter.matches(&domain) {
                    return Some(Permutation { domain, kind });
                }
            }

            None
        })
    }
}

/// Produce every candidate for a target domain, unfiltered. This is
/// the producer the scanning engine consumes; it is also exposed so
/// callers can inspect or shard the candidate list themselves.
pub fn generate_permutations(domain: &str) -> Result<Vec<Permutation>, Error> {
    let domain = Domain::new(domain)?;
    Ok(domain.all(&crate::filter::Permissive).collect())
}
