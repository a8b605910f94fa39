//! Master and builder blocklists
//!
//! The built-in tables cover masters that are not worth reporting on: mobile
//! and client masters, masters that are handled elsewhere, and masters that
//! are deliberately frozen on old revisions. They can be replaced with a
//! TOML file:
//!
//! ```toml
//! master_keywords = ["bling", "mobile"]
//! masters = ["master.chromium.webkit"]
//! frozen_masters = ["master.chromium.reserved"]
//! builder_keywords = ["ios"]
//! builder_case = "insensitive"
//! ```
//!
//! Any table left out of the file keeps its built-in value.

use crate::error::{InventoryError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Substrings that disqualify a master name
pub const MASTER_KEYWORDS: &[&str] = &[
    "bling",
    "mobile",
    "master.client",
    "master.internal.client",
];

/// Masters excluded by exact name. This list tends to drift as masters
/// are migrated and needs revisiting.
pub const EXCLUDED_MASTERS: &[&str] = &[
    "master.chromium.gpu.fyi",
    "master.chromium.webrtc",
    "master.tryserver.libyuv",
    "master.chromium.webrtc.fyi",
    "master.tryserver.webrtc",
    "master.tryserver.nacl",
    "master.chromium.memory.fyi",
    "master.tryserver.chromium.perf",
    "master.internal.tryserver.webrtc",
    "master.chrome.perf_internal.try",
    "master.chromium.chromedriver",
    "master.tryserver.v8",
    "master.chromium.webkit",
    "master.client.goma",
    "master.chromium.swarm",
];

/// Masters intentionally kept on old revisions
pub const FROZEN_MASTERS: &[&str] = &[
    "master.chrome.reserved",
    "master.chromium.reserved",
    "master.tryserver.reserved",
];

/// Substrings that disqualify a builder name
pub const BUILDER_KEYWORDS: &[&str] = &["ios"];

/// How builder names are compared against builder keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuilderCase {
    /// Lower-case the builder name before matching ("iOS-sim" matches "ios")
    #[default]
    Insensitive,
    /// Match the builder name verbatim
    Sensitive,
}

/// Exclusion rules applied to masters and builders
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Blocklist {
    /// Substrings matched case-sensitively against master names
    pub master_keywords: Vec<String>,

    /// Exact master names to exclude
    pub masters: Vec<String>,

    /// Exact names of frozen masters to exclude
    pub frozen_masters: Vec<String>,

    /// Substrings matched against builder names
    pub builder_keywords: Vec<String>,

    /// Case policy for builder keyword matching
    pub builder_case: BuilderCase,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Blocklist {
    fn default() -> Self {
        Self {
            master_keywords: owned(MASTER_KEYWORDS),
            masters: owned(EXCLUDED_MASTERS),
            frozen_masters: owned(FROZEN_MASTERS),
            builder_keywords: owned(BUILDER_KEYWORDS),
            builder_case: BuilderCase::default(),
        }
    }
}

impl Blocklist {
    /// A blocklist that lets every master and builder through
    pub fn empty() -> Self {
        Self {
            master_keywords: Vec::new(),
            masters: Vec::new(),
            frozen_masters: Vec::new(),
            builder_keywords: Vec::new(),
            builder_case: BuilderCase::default(),
        }
    }

    /// Load a blocklist override from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| InventoryError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
            .map_err(|e| InventoryError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse a blocklist override from TOML content
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// True if the master must not be reported
    pub fn is_master_blocked(&self, mastername: &str) -> bool {
        self.master_keywords
            .iter()
            .any(|keyword| mastername.contains(keyword.as_str()))
            || self.masters.iter().any(|m| m == mastername)
            || self.frozen_masters.iter().any(|m| m == mastername)
    }

    /// True if the builder must not be reported
    pub fn is_builder_blocked(&self, buildername: &str) -> bool {
        let candidate = match self.builder_case {
            BuilderCase::Insensitive => buildername.to_lowercase(),
            BuilderCase::Sensitive => buildername.to_string(),
        };

        self.builder_keywords
            .iter()
            .any(|keyword| candidate.contains(keyword.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_blocks_master_keywords() {
        let blocklist = Blocklist::default();
        assert!(blocklist.is_master_blocked("master.client.v8"));
        assert!(blocklist.is_master_blocked("master.internal.client.foo"));
        assert!(blocklist.is_master_blocked("master.chromium.mobile"));
        assert!(blocklist.is_master_blocked("master.bling.fyi"));
    }

    #[test]
    fn test_master_keywords_are_case_sensitive() {
        let blocklist = Blocklist::default();
        assert!(!blocklist.is_master_blocked("master.chromium.Mobile"));
    }

    #[test]
    fn test_default_blocks_exact_masters() {
        let blocklist = Blocklist::default();
        assert!(blocklist.is_master_blocked("master.chromium.webkit"));
        assert!(blocklist.is_master_blocked("master.tryserver.v8"));
        // Exact match only
        assert!(!blocklist.is_master_blocked("master.chromium.webkit2"));
    }

    #[test]
    fn test_default_blocks_frozen_masters() {
        let blocklist = Blocklist::default();
        assert!(blocklist.is_master_blocked("master.chromium.reserved"));
        assert!(!blocklist.is_master_blocked("master.chromium.reserved.fyi"));
    }

    #[test]
    fn test_default_allows_regular_masters() {
        let blocklist = Blocklist::default();
        assert!(!blocklist.is_master_blocked("master.chromium.mac"));
        assert!(!blocklist.is_master_blocked("master.foo"));
    }

    #[test]
    fn test_builder_keyword_insensitive_by_default() {
        let blocklist = Blocklist::default();
        assert!(blocklist.is_builder_blocked("ios-b2"));
        assert!(blocklist.is_builder_blocked("iOS-sim"));
        assert!(blocklist.is_builder_blocked("Mac iOS Simulator"));
        assert!(!blocklist.is_builder_blocked("Mac10.11 Tests"));
    }

    #[test]
    fn test_builder_keyword_sensitive() {
        let blocklist = Blocklist {
            builder_case: BuilderCase::Sensitive,
            ..Blocklist::default()
        };
        assert!(blocklist.is_builder_blocked("ios-b2"));
        assert!(!blocklist.is_builder_blocked("iOS-sim"));
    }

    #[test]
    fn test_empty_blocks_nothing() {
        let blocklist = Blocklist::empty();
        assert!(!blocklist.is_master_blocked("master.client.v8"));
        assert!(!blocklist.is_builder_blocked("ios"));
    }

    #[test]
    fn test_toml_override_replaces_only_given_tables() {
        let toml = r#"
            masters = ["master.custom"]
            builder_case = "sensitive"
        "#;

        let blocklist = Blocklist::from_toml_str(toml).unwrap();
        assert_eq!(blocklist.masters, vec!["master.custom".to_string()]);
        assert_eq!(blocklist.builder_case, BuilderCase::Sensitive);
        assert_eq!(blocklist.master_keywords, owned(MASTER_KEYWORDS));
        assert_eq!(blocklist.frozen_masters, owned(FROZEN_MASTERS));
        assert!(blocklist.is_master_blocked("master.custom"));
        assert!(!blocklist.is_master_blocked("master.chromium.webkit"));
    }

    #[test]
    fn test_toml_empty_document_is_default() {
        assert_eq!(Blocklist::from_toml_str("").unwrap(), Blocklist::default());
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        assert!(Blocklist::from_toml_str("master_keyword = [\"x\"]").is_err());
    }

    #[test]
    fn test_toml_rejects_unknown_case_policy() {
        assert!(Blocklist::from_toml_str("builder_case = \"upper\"").is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = Blocklist::from_file("/nonexistent/blocklist.toml").unwrap_err();
        assert!(matches!(err, InventoryError::Load { .. }));
    }

    #[test]
    fn test_from_file_invalid() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("blocklist.toml");
        fs::write(&path, "masters = 3").unwrap();

        let err = Blocklist::from_file(&path).unwrap_err();
        assert!(matches!(err, InventoryError::Config(_)));
    }
}
