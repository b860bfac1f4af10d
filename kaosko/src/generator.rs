//! The fixture generator
//!
//! A [`KaosKo`] owns one [`SubtractiveRng`] and hands out typed values drawn
//! from it. Every accessor advances the same stream, so the values a test
//! sees depend only on the seed and on the order of calls.
//!
//! # Critical Invariants
//!
//! - **Determinism**: equal seeds + equal call sequences → equal values
//! - **Isolation**: no two generators share a stream
//! - **Half-open bounds**: every bounded draw excludes its upper bound

use crate::core::date::{truncate_days_to_ticks, DateTime};
use crate::rng::{RangeError, SubtractiveRng};
use crate::seed::{self, SeedSource};
use uuid::Uuid;

/// Reproducible generator of test fixture values
///
/// # Example
/// ```
/// use kaosko::KaosKo;
///
/// let mut first = KaosKo::new("creates_invoice");
/// let mut second = KaosKo::new("creates_invoice");
///
/// assert_eq!(first.int(), second.int());
/// assert_eq!(first.guid(), second.guid());
/// assert_eq!(first.int_between(5, 10), second.int_between(5, 10));
/// ```
#[derive(Debug, Clone)]
pub struct KaosKo {
    pub(crate) seed: i32,
    pub(crate) rng: SubtractiveRng,
}

impl KaosKo {
    /// Generator seeded from `label` with the default checksum hasher
    ///
    /// Use the [`kaosko!`](crate::kaosko) macro to take the enclosing
    /// function's name as the label, or
    /// [`with_optional_label`](Self::with_optional_label) when there may be
    /// none.
    pub fn new(label: &str) -> Self {
        Self::with_hasher(seed::char_sum, label)
    }

    /// Generator for a label that may be absent; `None` seeds like `""`
    ///
    /// # Example
    /// ```
    /// use kaosko::KaosKo;
    ///
    /// assert_eq!(KaosKo::with_optional_label(None).seed(), 0);
    /// assert_eq!(KaosKo::with_optional_label(Some("abc")).seed(), 294);
    /// ```
    pub fn with_optional_label(label: Option<&str>) -> Self {
        Self::with_hasher(|_| seed::seed_for(label), label.unwrap_or_default())
    }

    /// Generator seeded from `label` with a caller-supplied hash function
    ///
    /// # Example
    /// ```
    /// use kaosko::{seed, KaosKo};
    ///
    /// let mut ab = KaosKo::with_hasher(seed::sha256, "ab");
    /// let mut ba = KaosKo::with_hasher(seed::sha256, "ba");
    /// assert_ne!(ab.seed(), ba.seed());
    /// ```
    pub fn with_hasher<F>(hasher: F, label: &str) -> Self
    where
        F: FnOnce(&str) -> i32,
    {
        let seed = hasher(label);
        tracing::debug!(label, seed, "seeded fixture generator from label");
        Self::from_seed(seed)
    }

    /// Generator seeded verbatim
    pub fn with_seed(seed: i32) -> Self {
        tracing::debug!(seed, "seeded fixture generator");
        Self::from_seed(seed)
    }

    /// Generator seeded from a label taken from config
    pub fn from_source(source: &SeedSource) -> Self {
        match source {
            SeedSource::Label(label) => Self::new(label),
            SeedSource::Seed(seed) => Self::with_seed(*seed),
        }
    }

    fn from_seed(seed: i32) -> Self {
        Self {
            seed,
            rng: SubtractiveRng::new(seed),
        }
    }

    /// The seed this generator was built with
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// `true` or `false`, equally likely
    pub fn next_bool(&mut self) -> bool {
        self.rng.offset_from(0, 2) != 0
    }

    /// A date at midnight in `[DateTime::MIN, DateTime::MAX)`
    ///
    /// The span is counted in whole days, so the latest possible result is
    /// 9999-12-30.
    pub fn date(&mut self) -> DateTime {
        self.date_between(DateTime::MIN, DateTime::MAX)
    }

    /// A date at midnight, at least `from` and before `to`
    ///
    /// Draws a fraction of the whole-day span between the bounds, shifts
    /// `from` by it and drops the time of day. With midnight bounds the result
    /// lies in `[from, to)`; when `from` carries a time of day the result can
    /// be `from`'s own midnight. An inverted pair (`to < from`) yields a date
    /// in `(to, from]` after truncation.
    ///
    /// # Example
    /// ```
    /// use kaosko::{DateTime, KaosKo};
    ///
    /// let from = DateTime::from_ymd(2024, 1, 1).unwrap();
    /// let to = DateTime::from_ymd(2024, 2, 1).unwrap();
    ///
    /// let mut kaosko = KaosKo::new("books_january");
    /// let day = kaosko.date_between(from, to);
    /// assert!(from <= day && day < to);
    /// assert!(day.is_midnight());
    /// ```
    pub fn date_between(&mut self, from: DateTime, to: DateTime) -> DateTime {
        let span_days = from.whole_days_until(&to);
        let offset_days = self.rng.next_f64() * span_days as f64;
        from.offset_within(truncate_days_to_ticks(offset_days)).date()
    }

    /// 128 random bits shaped like a GUID
    ///
    /// The 16 bytes use the mixed-endian GUID byte layout, so the textual form
    /// matches what the original library printed for the same seed. No
    /// version or variant bits are set.
    pub fn guid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        Uuid::from_bytes_le(bytes)
    }

    /// Any `i32` except `i32::MAX`
    ///
    /// The upper bound is exclusive like every other bounded draw, so
    /// `i32::MAX` itself is never returned.
    pub fn int(&mut self) -> i32 {
        self.rng.offset_from(i32::MIN, u32::MAX)
    }

    /// A value in `[min, max)`; `min == max` yields `min`
    ///
    /// # Errors
    /// [`RangeError::MinExceedsMax`] if `min > max`.
    pub fn int_between(&mut self, min: i32, max: i32) -> Result<i32, RangeError> {
        self.rng.range(min, max)
    }

    /// A value in `[0, i32::MAX)`
    pub fn positive_int(&mut self) -> i32 {
        self.rng.next()
    }

    /// A value in `[0, max)`; `max == 0` yields 0
    ///
    /// # Errors
    /// [`RangeError::NegativeMax`] if `max < 0`.
    pub fn positive_int_below(&mut self, max: i32) -> Result<i32, RangeError> {
        self.rng.next_below(max)
    }
}

impl rand_core::RngCore for KaosKo {
    fn next_u32(&mut self) -> u32 {
        rand_core::RngCore::next_u32(&mut self.rng)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::RngCore::next_u64(&mut self.rng)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::RngCore::fill_bytes(&mut self.rng, dest)
    }
}
