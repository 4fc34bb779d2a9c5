use core::{fmt, str::FromStr};

use crate::{ConvertResult, TimeSpanError, num};

/// A time span in raw MIDI ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiTimeSpan(i64);

impl MidiTimeSpan {
    /// Zero ticks
    pub const ZERO: Self = Self(0);
    /// The longest representable span
    pub const MAX: Self = Self(i64::MAX);

    /// Create a new span of `ticks`
    pub const fn new(ticks: i64) -> Self {
        Self(ticks)
    }

    /// The number of ticks
    pub const fn ticks(&self) -> i64 {
        self.0
    }

    /// Returns true if the span is zero ticks long
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Sum of two spans, failing on overflow
    pub const fn checked_add(self, rhs: Self) -> ConvertResult<Self> {
        match self.0.checked_add(rhs.0) {
            Some(ticks) => Ok(Self(ticks)),
            None => Err(TimeSpanError::Overflow),
        }
    }

    /// Difference of two spans, failing on overflow
    pub const fn checked_sub(self, rhs: Self) -> ConvertResult<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(ticks) => Ok(Self(ticks)),
            None => Err(TimeSpanError::Overflow),
        }
    }

    /// Stretches the span by `multiplier`, rounding to the nearest tick
    pub fn multiply(&self, multiplier: f64) -> ConvertResult<Self> {
        super::ensure_multiplier(multiplier)?;
        Ok(Self(num::round_to_i64(self.0 as f64 * multiplier)?))
    }

    /// Shrinks the span by `divisor`, rounding to the nearest tick
    pub fn divide(&self, divisor: f64) -> ConvertResult<Self> {
        super::ensure_divisor(divisor)?;
        Ok(Self(num::round_to_i64(self.0 as f64 / divisor)?))
    }
}

impl From<i64> for MidiTimeSpan {
    fn from(ticks: i64) -> Self {
        Self(ticks)
    }
}

impl fmt::Display for MidiTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MidiTimeSpan {
    type Err = TimeSpanError;

    fn from_str(s: &str) -> ConvertResult<Self> {
        super::parse_component(s, "ticks, like `480`").map(Self)
    }
}

#[test]
fn midi_arithmetic() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;
    let span = MidiTimeSpan::new(100);
    assert_eq!(span.multiply(1.5), Ok(MidiTimeSpan::new(150)));
    assert_eq!(span.divide(3.), Ok(MidiTimeSpan::new(33)));
    assert!(span.divide(0.).is_err());
    assert!(span.multiply(-1.).is_err());
    assert_eq!(MidiTimeSpan::MAX.checked_add(span), Err(TimeSpanError::Overflow));
    assert_eq!(span.to_string(), "100");
    assert_eq!(" 100 ".parse(), Ok(span));
    assert!("1.5".parse::<MidiTimeSpan>().is_err());
}
