//! Deterministic random number generation
//!
//! Uses the seeded subtractive generator (Knuth, 55-element lag table).
//! CRITICAL: Every accessor of the generator draws from this one stream.

mod subtractive;

pub use subtractive::{RangeError, StreamState, SubtractiveRng, STATE_LEN};
