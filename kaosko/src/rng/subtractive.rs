//! Seeded subtractive random number generator
//!
//! The classic lagged subtractive generator from Knuth's *Seminumerical
//! Algorithms*, in the exact variant that .NET's seeded `System.Random` uses.
//! Matching it keeps fixture sequences identical to the ones produced by the
//! original KaosKo library for the same seed.
//!
//! # Algorithm
//!
//! 56 slots (slot 0 unused), modulus `i32::MAX`, lag 21. Every draw subtracts
//! two table entries, folds the result back into `[0, i32::MAX)` and stores
//! it in place.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. This is CRITICAL for:
//! - Test fixtures (a failing test sees the same data on every run)
//! - Debugging (reproduce the exact value that broke a test)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of slots in the lag table (slot 0 is never used).
pub const STATE_LEN: usize = 56;

const MBIG: i32 = i32::MAX;
const MSEED: i32 = 161_803_398;

/// Failures of the bounded draws
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum RangeError {
    #[error("minValue {min} must not be greater than maxValue {max}")]
    MinExceedsMax { min: i32, max: i32 },

    #[error("maxValue {0} must be non-negative")]
    NegativeMax(i32),
}

/// Serializable position of a [`SubtractiveRng`]
///
/// Captures the full lag table and both cursors, so a stream restored from it
/// continues exactly where the captured one stood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamState {
    pub table: Vec<i32>,
    pub inext: usize,
    pub inextp: usize,
}

/// Deterministic subtractive random number generator
///
/// # Example
/// ```
/// use kaosko::SubtractiveRng;
///
/// let mut rng = SubtractiveRng::new(0);
/// assert_eq!(rng.next(), 1559595546);
/// let dice = rng.range(1, 7).unwrap(); // [1, 7)
/// assert!((1..7).contains(&dice));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtractiveRng {
    table: [i32; STATE_LEN],
    inext: usize,
    inextp: usize,
}

impl SubtractiveRng {
    /// Create a new stream with given seed
    ///
    /// The sign of the seed is dropped, so `seed` and `-seed` produce the
    /// same sequence. `i32::MIN` is treated as `i32::MAX`.
    pub fn new(seed: i32) -> Self {
        let subtraction = if seed == i32::MIN {
            i32::MAX
        } else {
            seed.abs()
        };

        let mut table = [0i32; STATE_LEN];
        let mut mj = MSEED.wrapping_sub(subtraction);
        table[55] = mj;
        let mut mk: i32 = 1;
        let mut ii = 0usize;
        for _ in 1..55 {
            ii += 21;
            if ii >= 55 {
                ii -= 55;
            }
            table[ii] = mk;
            mk = mj.wrapping_sub(mk);
            if mk < 0 {
                mk = mk.wrapping_add(MBIG);
            }
            mj = table[ii];
        }

        for _ in 1..5 {
            for i in 1..STATE_LEN {
                let mut n = i + 30;
                if n >= 55 {
                    n -= 55;
                }
                table[i] = table[i].wrapping_sub(table[1 + n]);
                if table[i] < 0 {
                    table[i] = table[i].wrapping_add(MBIG);
                }
            }
        }

        Self {
            table,
            inext: 0,
            inextp: 21,
        }
    }

    /// Generate next random value in `[0, i32::MAX)`
    ///
    /// This advances the internal state and returns the native draw.
    pub fn next(&mut self) -> i32 {
        let mut inext = self.inext + 1;
        if inext >= STATE_LEN {
            inext = 1;
        }
        let mut inextp = self.inextp + 1;
        if inextp >= STATE_LEN {
            inextp = 1;
        }

        let mut value = self.table[inext].wrapping_sub(self.table[inextp]);
        if value == MBIG {
            value -= 1;
        }
        if value < 0 {
            value = value.wrapping_add(MBIG);
        }

        self.table[inext] = value;
        self.inext = inext;
        self.inextp = inextp;
        value
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// # Example
    /// ```
    /// use kaosko::SubtractiveRng;
    ///
    /// let mut rng = SubtractiveRng::new(12345);
    /// let probability = rng.next_f64();
    /// assert!(probability >= 0.0 && probability < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next()) * (1.0 / f64::from(MBIG))
    }

    /// Generate random value in range [0, max)
    ///
    /// `max == 0` is allowed and always yields 0.
    ///
    /// # Errors
    /// [`RangeError::NegativeMax`] if `max < 0`. No draw is consumed then.
    pub fn next_below(&mut self, max: i32) -> Result<i32, RangeError> {
        if max < 0 {
            tracing::trace!(max, "rejected negative upper bound");
            return Err(RangeError::NegativeMax(max));
        }
        Ok((self.next_f64() * f64::from(max)) as i32)
    }

    /// Generate random value in range [min, max)
    ///
    /// `min == max` is allowed and yields `min`. Spans wider than `i32::MAX`
    /// take two draws from the stream.
    ///
    /// # Errors
    /// [`RangeError::MinExceedsMax`] if `min > max`. No draw is consumed then.
    ///
    /// # Example
    /// ```
    /// use kaosko::SubtractiveRng;
    ///
    /// let mut rng = SubtractiveRng::new(12345);
    /// let amount = rng.range(10_000, 100_000).unwrap();
    /// assert!((10_000..100_000).contains(&amount));
    /// ```
    pub fn range(&mut self, min: i32, max: i32) -> Result<i32, RangeError> {
        if min > max {
            tracing::trace!(min, max, "rejected inverted range");
            return Err(RangeError::MinExceedsMax { min, max });
        }

        let span = (i64::from(max) - i64::from(min)) as u32;
        Ok(self.offset_from(min, span))
    }

    /// Draw in `[min, min + span)`; the caller guarantees the upper end fits
    /// in an `i32`.
    pub(crate) fn offset_from(&mut self, min: i32, span: u32) -> i32 {
        if span <= MBIG as u32 {
            return (self.next_f64() * f64::from(span)) as i32 + min;
        }

        let offset = (self.large_range_sample() * f64::from(span)) as i64;
        (offset + i64::from(min)) as i32
    }

    /// Fill `dest` with random bytes, one draw per byte
    pub fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.next() as u8;
        }
    }

    /// Capture the current stream position (for checkpointing/replay)
    pub fn state(&self) -> StreamState {
        StreamState {
            table: self.table.to_vec(),
            inext: self.inext,
            inextp: self.inextp,
        }
    }

    /// Rebuild a stream from a captured [`StreamState`]
    ///
    /// Returns `None` when the table has the wrong length, a cursor points
    /// outside it, or a live slot (1..56) holds a value no seed can produce,
    /// i.e. one outside `[0, i32::MAX)`.
    pub fn from_state(state: &StreamState) -> Option<Self> {
        let table: [i32; STATE_LEN] = state.table.as_slice().try_into().ok()?;
        if state.inext >= STATE_LEN || state.inextp >= STATE_LEN {
            return None;
        }
        if table[1..].iter().any(|value| !(0..MBIG).contains(value)) {
            return None;
        }
        Some(Self {
            table,
            inext: state.inext,
            inextp: state.inextp,
        })
    }

    /// Sample in [0.0, 1.0) with more than 31 bits of resolution, signed by a
    /// second draw.
    fn large_range_sample(&mut self) -> f64 {
        let mut result = self.next();
        if self.next() % 2 == 0 {
            result = -result;
        }
        (f64::from(result) + f64::from(MBIG - 1)) / (2.0 * f64::from(MBIG) - 1.0)
    }
}

impl rand_core::RngCore for SubtractiveRng {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        SubtractiveRng::fill_bytes(self, &mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        SubtractiveRng::fill_bytes(self, dest)
    }
}

impl rand_core::SeedableRng for SubtractiveRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i32::from_le_bytes(seed))
    }
}
