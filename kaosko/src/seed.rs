//! Seed derivation
//!
//! Maps a seed label to the 32-bit seed of the underlying stream. The default
//! hasher is a plain character checksum: it never depends on per-process hash
//! randomization, so a label yields the same seed on every run and platform.
//!
//! # Known weakness
//!
//! The checksum ignores character order. Labels that are anagrams of each
//! other (`"ab"` and `"ba"`) share a seed. Use [`sha256`] through
//! [`KaosKo::with_hasher`](crate::KaosKo::with_hasher) when that matters.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Sum of the label's UTF-16 code units, with wrapping 32-bit arithmetic
///
/// # Example
/// ```
/// use kaosko::seed::char_sum;
///
/// assert_eq!(char_sum("abc"), 97 + 98 + 99);
/// assert_eq!(char_sum("abc"), char_sum("cab"));
/// assert_eq!(char_sum(""), 0);
/// ```
pub fn char_sum(label: &str) -> i32 {
    label
        .encode_utf16()
        .fold(0i32, |acc, unit| acc.wrapping_add(i32::from(unit)))
}

/// Seed for an optional label; an absent label hashes like the empty string
pub fn seed_for(label: Option<&str>) -> i32 {
    char_sum(label.unwrap_or_default())
}

/// First four bytes of the label's SHA-256 digest, little-endian
///
/// Order-sensitive alternative to [`char_sum`]. Never used unless passed in
/// explicitly.
pub fn sha256(label: &str) -> i32 {
    let digest = Sha256::digest(label.as_bytes());
    i32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Where a generator takes its seed from
///
/// Lets a test suite pin fixture seeds in a config file:
///
/// ```
/// use kaosko::seed::SeedSource;
///
/// let source: SeedSource = serde_json::from_str(r#"{"label": "abc"}"#).unwrap();
/// assert_eq!(source.resolve(), 294);
///
/// let source: SeedSource = serde_json::from_str(r#"{"seed": -7}"#).unwrap();
/// assert_eq!(source.resolve(), -7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    /// Hashed with [`char_sum`]
    Label(String),
    /// Used verbatim
    Seed(i32),
}

impl SeedSource {
    pub fn resolve(&self) -> i32 {
        match self {
            SeedSource::Label(label) => char_sum(label),
            SeedSource::Seed(seed) => *seed,
        }
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        SeedSource::Label(String::new())
    }
}

/// Name of the function enclosing a marker item, given the marker's type path
///
/// `type_path` is what [`std::any::type_name_of_val`] reports for a nested
/// `fn` item, e.g. `my_crate::tests::builds_order::marker`. Closure segments
/// are skipped. Backs the [`kaosko!`](crate::kaosko) macro.
///
/// # Example
/// ```
/// use kaosko::seed::enclosing_fn_name;
///
/// assert_eq!(enclosing_fn_name("app::tests::builds_order::marker"), "builds_order");
/// assert_eq!(
///     enclosing_fn_name("app::tests::builds_order::{{closure}}::marker"),
///     "builds_order"
/// );
/// ```
pub fn enclosing_fn_name(type_path: &'static str) -> &'static str {
    type_path
        .rsplit("::")
        .skip(1)
        .find(|segment| *segment != "{{closure}}")
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_sum_counts_utf16_units() {
        // U+1F600 is the surrogate pair D83D DE00
        assert_eq!(char_sum("\u{1F600}"), 0xD83D + 0xDE00);
    }

    #[test]
    fn test_char_sum_wraps_on_overflow() {
        let label: String = std::iter::repeat('\u{FFFF}').take(40_000).collect();
        let expected = (40_000i64 * 0xFFFF) as i32;
        assert_eq!(char_sum(&label), expected);
    }

    #[test]
    fn test_sha256_is_order_sensitive() {
        assert_ne!(sha256("ab"), sha256("ba"));
    }

    #[test]
    fn test_enclosing_fn_name_without_module_path() {
        assert_eq!(enclosing_fn_name("marker"), "");
        assert_eq!(enclosing_fn_name("run::marker"), "run");
    }
}
