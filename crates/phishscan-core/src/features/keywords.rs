//! Suspicious keyword dictionary.

/// Built-in dictionary: URL shorteners and words common in credential-phishing lures.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "bit.ly",
    "tinyurl",
    "t.co",
    "short",
    "click",
    "login",
    "verify",
    "secure",
    "account",
    "update",
    "suspended",
    "urgent",
    "suspicious",
    "phishing",
    "fake",
];

/// Case-insensitive substring dictionary. Each entry counts at most once per URL,
/// however many times it occurs.
#[derive(Debug, Clone)]
pub struct KeywordDictionary {
    entries: Vec<String>,
}

impl Default for KeywordDictionary {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl KeywordDictionary {
    /// Builds a dictionary; entries are lowercased, blanks and duplicates dropped.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for e in entries {
            let e = e.as_ref().trim().to_lowercase();
            if !e.is_empty() && !out.contains(&e) {
                out.push(e);
            }
        }
        Self { entries: out }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries found in `url`, in dictionary order.
    pub fn matches(&self, url: &str) -> Vec<String> {
        let haystack = url.to_lowercase();
        self.entries
            .iter()
            .filter(|k| haystack.contains(k.as_str()))
            .cloned()
            .collect()
    }
}
