use core::{fmt, str::FromStr};

use crate::{ConvertResult, TimeSpanError, num};

#[doc = r#"
A time span in bars and fractional beats.

Works like [`BarBeatTicksTimeSpan`](super::BarBeatTicksTimeSpan), with the
ticks inside the last beat folded into the fractional part of `beats`.

# Example
```rust
# use midix_timespan::prelude::*;
let tempo_map = TempoMap::new(Timing::new_ticks_per_quarter_note(480));

let span: BarBeatFractionTimeSpan = time::convert_to(1920 + 960 + 240, &tempo_map).unwrap();
assert_eq!(span, BarBeatFractionTimeSpan::new(1, 2.5));
assert_eq!(span.to_string(), "1_2.5");
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarBeatFractionTimeSpan {
    bars: i64,
    beats: f64,
}

impl BarBeatFractionTimeSpan {
    /// Zero
    pub const ZERO: Self = Self { bars: 0, beats: 0. };
    /// The longest representable span
    pub const MAX: Self = Self {
        bars: i64::MAX,
        beats: f64::MAX,
    };

    /// Create a new span.
    ///
    /// # Panics
    /// if `bars` is negative, or `beats` is negative or not finite.
    pub fn new(bars: i64, beats: f64) -> Self {
        match Self::try_new(bars, beats) {
            Ok(span) => span,
            Err(_) => panic!("Bar and beat counts can't be negative."),
        }
    }

    /// Create a new span, checking both components.
    pub fn try_new(bars: i64, beats: f64) -> ConvertResult<Self> {
        if bars < 0 {
            return Err(TimeSpanError::negative("bars"));
        }
        if !(beats >= 0.) || beats.is_infinite() {
            return Err(TimeSpanError::invalid(
                "beats",
                "value is negative or not finite",
            ));
        }
        Ok(Self { bars, beats })
    }

    /// Whole bars
    pub const fn bars(&self) -> i64 {
        self.bars
    }

    /// Beats after the bars, with the part of a beat as the fraction
    pub const fn beats(&self) -> f64 {
        self.beats
    }

    /// Returns true if both components are zero
    pub fn is_zero(&self) -> bool {
        self.bars == 0 && self.beats == 0.
    }

    /// Component-wise difference, borrowing as many bars of `beats_per_bar`
    /// beats as needed.
    pub(crate) fn checked_sub_in(self, rhs: Self, beats_per_bar: i64) -> ConvertResult<Self> {
        if beats_per_bar <= 0 {
            return Err(TimeSpanError::invalid(
                "time_signature",
                "a bar must have at least one beat",
            ));
        }
        let per_bar = beats_per_bar as f64;
        let beats = self.beats - rhs.beats;
        let borrowed = num::floor(beats / per_bar);
        let mut bars = num::add(
            num::sub(self.bars, rhs.bars)?,
            num::round_to_i64(borrowed)?,
        )?;
        let mut beats = beats - borrowed * per_bar;
        // float error can land exactly on the next bar
        if beats >= per_bar {
            bars = num::add(bars, 1)?;
            beats = 0.;
        }
        if bars < 0 || !(beats >= 0.) {
            return Err(TimeSpanError::invalid(
                "time_span",
                "subtrahend is greater than minuend",
            ));
        }
        Ok(Self { bars, beats })
    }

    /// Scales both components by `multiplier`; bars are rounded
    pub fn multiply(&self, multiplier: f64) -> ConvertResult<Self> {
        super::ensure_multiplier(multiplier)?;
        Ok(Self {
            bars: num::round_to_i64(self.bars as f64 * multiplier)?,
            beats: self.beats * multiplier,
        })
    }

    /// Divides both components by `divisor`; bars are rounded
    pub fn divide(&self, divisor: f64) -> ConvertResult<Self> {
        super::ensure_divisor(divisor)?;
        Ok(Self {
            bars: num::round_to_i64(self.bars as f64 / divisor)?,
            beats: self.beats / divisor,
        })
    }
}

impl fmt::Display for BarBeatFractionTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.bars, self.beats)
    }
}

impl FromStr for BarBeatFractionTimeSpan {
    type Err = TimeSpanError;

    fn from_str(s: &str) -> ConvertResult<Self> {
        const FORMAT: &str = "`bars_beats`, like `1_2.5`";
        let (bars, beats) = s
            .split_once('_')
            .ok_or(TimeSpanError::InvalidFormat(FORMAT))?;
        Self::try_new(
            super::parse_component(bars, FORMAT)?,
            super::parse_component(beats, FORMAT)?,
        )
    }
}

#[test]
fn bar_beat_fraction_borrow() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;
    let a = BarBeatFractionTimeSpan::new(1, 0.5);
    let b = BarBeatFractionTimeSpan::new(0, 1.25);
    assert_eq!(
        a.checked_sub_in(b, 4),
        Ok(BarBeatFractionTimeSpan::new(0, 3.25))
    );
    assert!(b.checked_sub_in(a, 4).is_err());
    assert_eq!(
        BarBeatFractionTimeSpan::new(3, 0.).checked_sub_in(BarBeatFractionTimeSpan::new(0, 9.5), 4),
        Ok(BarBeatFractionTimeSpan::new(0, 2.5))
    );
    assert!(BarBeatFractionTimeSpan::try_new(0, f64::NAN).is_err());
    assert_eq!(BarBeatFractionTimeSpan::new(2, 3.).to_string(), "2_3");
    assert_eq!("2_3".parse(), Ok(BarBeatFractionTimeSpan::new(2, 3.)));
    assert_eq!("1_2.125".parse(), Ok(BarBeatFractionTimeSpan::new(1, 2.125)));
    assert!("1_inf".parse::<BarBeatFractionTimeSpan>().unwrap_err().is_invalid_argument());
    assert!("1_2_3".parse::<BarBeatFractionTimeSpan>().is_err());
}
