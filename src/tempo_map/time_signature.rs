use core::fmt;

use crate::{ConvertResult, TimeSpanError};

#[doc = r#"
Meter of a bar: `numerator` beats, each `1/denominator` of a whole note.

The default is 4/4.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    numerator: u32,
    denominator: u32,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TimeSignature {
    /// Common time.
    pub const DEFAULT: Self = Self {
        numerator: 4,
        denominator: 4,
    };

    /// Create a new time signature.
    ///
    /// # Panics
    /// if either part is zero, or if the denominator is not a power of two.
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        match Self::try_new(numerator, denominator) {
            Ok(signature) => signature,
            Err(_) => panic!("Invalid time signature. See documentation for details."),
        }
    }

    /// Create a new time signature, checking its parts.
    pub const fn try_new(numerator: u32, denominator: u32) -> ConvertResult<Self> {
        if numerator == 0 {
            return Err(TimeSpanError::invalid("numerator", "numerator is zero"));
        }
        if !denominator.is_power_of_two() {
            return Err(TimeSpanError::invalid(
                "denominator",
                "denominator is not a power of two",
            ));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Beats per bar
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    /// The note value of one beat
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Ticks in one beat: `4 * tpqn / denominator`
    pub const fn beat_length(&self, ticks_per_quarter_note: u16) -> i64 {
        4 * ticks_per_quarter_note as i64 / self.denominator as i64
    }

    /// Ticks in one bar: `numerator * beat_length`
    pub const fn bar_length(&self, ticks_per_quarter_note: u16) -> i64 {
        self.numerator as i64 * self.beat_length(ticks_per_quarter_note)
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[test]
fn bar_and_beat_lengths() {
    use pretty_assertions::assert_eq;
    let common = TimeSignature::default();
    assert_eq!(common.beat_length(480), 480);
    assert_eq!(common.bar_length(480), 1920);

    let five_eight = TimeSignature::new(5, 8);
    assert_eq!(five_eight.beat_length(480), 240);
    assert_eq!(five_eight.bar_length(480), 1200);

    assert!(TimeSignature::try_new(3, 6).is_err());
    assert!(TimeSignature::try_new(0, 4).is_err());
}
