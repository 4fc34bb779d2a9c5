use core::{fmt, str::FromStr};

use crate::{ConvertResult, TimeSpanError, num};

#[doc = r#"
A time span in bars, beats and ticks.

`ticks` is what remains inside the last beat. How long a bar or a beat is
depends on the time signature, so the same value stands for different tick
counts at different places in a tempo map.

# Example
```rust
# use midix_timespan::prelude::*;
let tempo_map = TempoMap::new(Timing::new_ticks_per_quarter_note(480));

let span: BarBeatTicksTimeSpan = time::convert_to(2000, &tempo_map).unwrap();
assert_eq!(span, BarBeatTicksTimeSpan::new(1, 0, 80));
assert_eq!(span.to_string(), "1.0.80");
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarBeatTicksTimeSpan {
    bars: i64,
    beats: i64,
    ticks: i64,
}

impl BarBeatTicksTimeSpan {
    /// Zero
    pub const ZERO: Self = Self {
        bars: 0,
        beats: 0,
        ticks: 0,
    };
    /// The longest representable span
    pub const MAX: Self = Self {
        bars: i64::MAX,
        beats: i64::MAX,
        ticks: i64::MAX,
    };

    /// Create a new span.
    ///
    /// # Panics
    /// if any component is negative.
    pub const fn new(bars: i64, beats: i64, ticks: i64) -> Self {
        match Self::try_new(bars, beats, ticks) {
            Ok(span) => span,
            Err(_) => panic!("Bar, beat and tick counts can't be negative."),
        }
    }

    /// Create a new span, failing if any component is negative.
    pub const fn try_new(bars: i64, beats: i64, ticks: i64) -> ConvertResult<Self> {
        if bars < 0 {
            return Err(TimeSpanError::negative("bars"));
        }
        if beats < 0 {
            return Err(TimeSpanError::negative("beats"));
        }
        if ticks < 0 {
            return Err(TimeSpanError::negative("ticks"));
        }
        Ok(Self { bars, beats, ticks })
    }

    /// Whole bars
    pub const fn bars(&self) -> i64 {
        self.bars
    }

    /// Whole beats after the bars
    pub const fn beats(&self) -> i64 {
        self.beats
    }

    /// Ticks after the beats
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Returns true if every component is zero
    pub const fn is_zero(&self) -> bool {
        self.bars == 0 && self.beats == 0 && self.ticks == 0
    }

    /// Component-wise difference.
    ///
    /// Ticks borrow from beats of `beat_length` ticks, beats borrow from bars
    /// of `beats_per_bar` beats, as many as needed. Fails if the result would
    /// be negative.
    pub(crate) fn checked_sub_in(
        self,
        rhs: Self,
        beats_per_bar: i64,
        beat_length: i64,
    ) -> ConvertResult<Self> {
        if beats_per_bar <= 0 || beat_length <= 0 {
            return Err(TimeSpanError::invalid(
                "time_signature",
                "a beat must span at least one tick",
            ));
        }
        let ticks = num::sub(self.ticks, rhs.ticks)?;
        let beats = num::add(num::sub(self.beats, rhs.beats)?, ticks.div_euclid(beat_length))?;
        let bars = num::add(num::sub(self.bars, rhs.bars)?, beats.div_euclid(beats_per_bar))?;
        if bars < 0 {
            return Err(TimeSpanError::invalid(
                "time_span",
                "subtrahend is greater than minuend",
            ));
        }
        Ok(Self {
            bars,
            beats: beats.rem_euclid(beats_per_bar),
            ticks: ticks.rem_euclid(beat_length),
        })
    }

    /// Scales every component by `multiplier`, rounding each
    pub fn multiply(&self, multiplier: f64) -> ConvertResult<Self> {
        super::ensure_multiplier(multiplier)?;
        Ok(Self {
            bars: num::round_to_i64(self.bars as f64 * multiplier)?,
            beats: num::round_to_i64(self.beats as f64 * multiplier)?,
            ticks: num::round_to_i64(self.ticks as f64 * multiplier)?,
        })
    }

    /// Divides every component by `divisor`, rounding each
    pub fn divide(&self, divisor: f64) -> ConvertResult<Self> {
        super::ensure_divisor(divisor)?;
        Ok(Self {
            bars: num::round_to_i64(self.bars as f64 / divisor)?,
            beats: num::round_to_i64(self.beats as f64 / divisor)?,
            ticks: num::round_to_i64(self.ticks as f64 / divisor)?,
        })
    }
}

impl fmt::Display for BarBeatTicksTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.bars, self.beats, self.ticks)
    }
}

impl FromStr for BarBeatTicksTimeSpan {
    type Err = TimeSpanError;

    fn from_str(s: &str) -> ConvertResult<Self> {
        const FORMAT: &str = "`bars.beats.ticks`, like `1.2.60`";
        let mut parts = s.split('.');
        let mut next = || {
            parts
                .next()
                .ok_or(TimeSpanError::InvalidFormat(FORMAT))
                .and_then(|part| super::parse_component(part, FORMAT))
        };
        let span = Self::try_new(next()?, next()?, next()?)?;
        if parts.next().is_some() {
            return Err(TimeSpanError::InvalidFormat(FORMAT));
        }
        Ok(span)
    }
}

#[test]
fn bar_beat_ticks_borrow() {
    use pretty_assertions::assert_eq;
    let a = BarBeatTicksTimeSpan::new(2, 0, 10);
    let b = BarBeatTicksTimeSpan::new(0, 1, 20);
    assert_eq!(
        a.checked_sub_in(b, 4, 480),
        Ok(BarBeatTicksTimeSpan::new(1, 2, 470))
    );
    assert!(b.checked_sub_in(a, 4, 480).unwrap_err().is_invalid_argument());
    // more than a beat of ticks, more than a bar of beats
    assert_eq!(
        BarBeatTicksTimeSpan::new(2, 0, 0).checked_sub_in(BarBeatTicksTimeSpan::new(0, 0, 1000), 4, 480),
        Ok(BarBeatTicksTimeSpan::new(1, 1, 440))
    );
    assert_eq!(
        BarBeatTicksTimeSpan::new(3, 0, 0).checked_sub_in(BarBeatTicksTimeSpan::new(0, 9, 0), 4, 480),
        Ok(BarBeatTicksTimeSpan::new(0, 3, 0))
    );
    assert!(
        BarBeatTicksTimeSpan::new(1, 0, 0)
            .checked_sub_in(BarBeatTicksTimeSpan::new(0, 4, 1), 4, 480)
            .is_err()
    );
    assert!(BarBeatTicksTimeSpan::try_new(0, -1, 0).is_err());
    assert!(BarBeatTicksTimeSpan::new(1, 0, 0) > BarBeatTicksTimeSpan::new(0, 9, 9));
    assert_eq!(a.multiply(1.5), Ok(BarBeatTicksTimeSpan::new(3, 0, 15)));
}

#[test]
fn bar_beat_ticks_parse() {
    use pretty_assertions::assert_eq;
    assert_eq!("1.2.60".parse(), Ok(BarBeatTicksTimeSpan::new(1, 2, 60)));
    assert_eq!("0.9.0".parse(), Ok(BarBeatTicksTimeSpan::new(0, 9, 0)));
    assert!("1.2".parse::<BarBeatTicksTimeSpan>().is_err());
    assert!("1.2.3.4".parse::<BarBeatTicksTimeSpan>().is_err());
    assert!("1.-2.3".parse::<BarBeatTicksTimeSpan>().is_err());
}
