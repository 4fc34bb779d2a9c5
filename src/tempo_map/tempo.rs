use core::fmt;

use crate::{ConvertResult, TimeSpanError, num};

const MICROS_PER_MINUTE: f64 = 60_000_000.;

#[doc = r#"
The speed of playback, in microseconds per quarter note.

This is the value carried by a `Set Tempo` meta event. The default of
500 000 µs per quarter note is 120 beats per minute.

# Example
```rust
# use midix_timespan::prelude::*;
let tempo = Tempo::from_bpm(150.).unwrap();
assert_eq!(tempo.micros_per_quarter_note(), 400_000);
assert_eq!(Tempo::default().bpm(), 120.);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Tempo {
    /// 120 beats per minute
    pub const DEFAULT: Self = Self(500_000);

    /// Create a new tempo.
    ///
    /// # Panics
    /// if `micros_per_quarter_note` is zero.
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        if micros_per_quarter_note == 0 {
            panic!("Tempo can't be zero microseconds per quarter note.");
        }
        Self(micros_per_quarter_note)
    }

    /// Create a new tempo, failing if `micros_per_quarter_note` is zero.
    pub const fn try_new(micros_per_quarter_note: u32) -> ConvertResult<Self> {
        if micros_per_quarter_note == 0 {
            return Err(TimeSpanError::invalid(
                "micros_per_quarter_note",
                "tempo is zero",
            ));
        }
        Ok(Self(micros_per_quarter_note))
    }

    /// Create a tempo from milliseconds per quarter note
    pub const fn from_millis_per_quarter_note(millis: u32) -> ConvertResult<Self> {
        match millis.checked_mul(1_000) {
            Some(micros) => Self::try_new(micros),
            None => Err(TimeSpanError::Overflow),
        }
    }

    /// Create a tempo from beats per minute
    pub fn from_bpm(bpm: f64) -> ConvertResult<Self> {
        if !(bpm > 0.) {
            return Err(TimeSpanError::invalid("bpm", "tempo is zero or negative"));
        }
        let micros = num::round_to_i64(MICROS_PER_MINUTE / bpm)?;
        let micros = u32::try_from(micros).map_err(|_| TimeSpanError::Overflow)?;
        Self::try_new(micros)
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Beats (quarter notes) per minute
    pub fn bpm(&self) -> f64 {
        MICROS_PER_MINUTE / self.0 as f64
    }

    /// Microseconds that one tick lasts at the given resolution
    pub(crate) fn micros_per_tick(&self, ticks_per_quarter_note: u16) -> f64 {
        self.0 as f64 / ticks_per_quarter_note as f64
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} μs/qnote", self.0)
    }
}

#[test]
fn tempo_constructors() {
    use pretty_assertions::assert_eq;
    assert_eq!(Tempo::from_millis_per_quarter_note(300), Ok(Tempo::new(300_000)));
    assert_eq!(Tempo::from_bpm(60.), Ok(Tempo::new(1_000_000)));
    assert!(Tempo::from_bpm(0.).unwrap_err().is_invalid_argument());
    assert!(Tempo::try_new(0).is_err());
    assert_eq!(Tempo::new(250_000).bpm(), 240.);
}
