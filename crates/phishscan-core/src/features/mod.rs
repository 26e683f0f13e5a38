//! Lexical and structural URL features used by the scorer.
//!
//! Features are derived from the raw URL string only: no network access,
//! no DNS, no certificate lookup.

mod host;
mod keywords;

pub use host::{extract_host, subdomain_depth};
pub use keywords::{KeywordDictionary, DEFAULT_KEYWORDS};

use serde::Serialize;

/// Features derived from one URL. Recomputed on every analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlFeatureSet {
    /// Scheme is `https`.
    pub uses_encrypted_transport: bool,
    /// Host labels beyond `domain.tld`.
    pub subdomain_depth: usize,
    /// Number of dictionary entries present in the URL.
    pub suspicious_keyword_hits: usize,
    /// The entries behind `suspicious_keyword_hits`, in dictionary order.
    pub matched_keywords: Vec<String>,
    /// Length in characters.
    pub length: usize,
    pub host: Option<String>,
}

/// Extracts the feature set of `url` against `dictionary`.
pub fn extract_features(url: &str, dictionary: &KeywordDictionary) -> UrlFeatureSet {
    let uses_encrypted_transport = url
        .get(..8)
        .map(|prefix| prefix.eq_ignore_ascii_case("https://"))
        .unwrap_or(false);
    let host = extract_host(url);
    let subdomain_depth = host.as_deref().map(subdomain_depth).unwrap_or(0);
    let matched_keywords = dictionary.matches(url);

    UrlFeatureSet {
        uses_encrypted_transport,
        subdomain_depth,
        suspicious_keyword_hits: matched_keywords.len(),
        matched_keywords,
        length: url.chars().count(),
        host,
    }
}
