//! Squatscan detects domain squatting and phishing infrastructure by
//! generating lookalike permutations of a target domain and probing
//! each candidate across DNS, HTTP, WHOIS/RDAP and page content.
//!
//! The scanning engine is a bounded-concurrency fan-out: every
//! candidate runs through a fixed probe pipeline (resolution,
//! auxiliary DNS, IP classification, HTTP fingerprint, optional
//! WHOIS/RDAP, optional content similarity, fuzzy scoring) and folds
//! into one [`ScanResult`](scan::ScanResult) per live candidate.
//! Individual stage failures never abort a probe, and individual
//! probe failures never abort a scan.
//!
//! ### Example
//!
//! ```no_run
//! use squatscan::scan::{analyze_domain, ScanOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let options = ScanOptions {
//!         whois: true,
//!         ..ScanOptions::default()
//!     };
//!
//!     for result in analyze_domain("example.com", options).await.unwrap() {
//!         println!("{}: {:?}", result.fqdn, result.ip_addresses);
//!     }
//! }
//! ```
//!
//! Candidate generation is independent from scanning: use
//! [`generate_permutations`] to build or shard a candidate list and
//! [`scan::analyze_chunk`] to scan it, which is also the contract a
//! distributed outer layer uses to fan a scan out across workers.

#![deny(
    future_incompatible,
    nonstandard_style,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![deny(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::doc_markdown,
    clippy::empty_enum,
    clippy::explicit_into_iter_loop,
    clippy::explicit_iter_loop,
    clippy::expl_impl_clone_on_copy,
    clippy::fallible_impl_from,
    clippy::manual_filter_map,
    clippy::filter_map_next,
    clippy::manual_find_map,
    clippy::get_unwrap,
    clippy::if_not_else,
    clippy::inline_always,
    clippy::invalid_upcast_comparisons,
    clippy::items_after_statements,
    clippy::map_flatten,
    clippy::match_same_arms,
    clippy::maybe_infinite_iter,
    clippy::mem_forget,
    clippy::multiple_inherent_impl,
    clippy::mut_mut,
    clippy::needless_borrow,
    clippy::needless_continue,
    clippy::map_unwrap_or,
    clippy::path_buf_push_overwrite,
    clippy::redundant_closure_for_method_calls,
    clippy::single_match_else,
    clippy::string_add,
    clippy::string_add_assign,
    clippy::type_repetition_in_bounds,
    clippy::unicode_not_nfc,
    clippy::unseparated_literal_suffix,
    clippy::used_underscore_binding,
    clippy::wildcard_dependencies
)]
#![recursion_limit = "128"]

#[macro_use]
extern crate lazy_static;

pub mod constants;
pub mod content;
pub mod dns;
pub mod error;
pub mod filter;
pub mod fuzzy;
pub mod http;
pub mod ip;
pub mod permutate;
pub mod providers;
pub mod scan;
pub mod spf;
pub mod whois;

pub use error::Error;
pub use permutate::generate_permutations;
pub use scan::{analyze_chunk, analyze_domain, get_live_mx_domains, ScanOptions, ScanResult};
